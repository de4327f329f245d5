/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Implementations of [`ByteBackend`](crate::traits::ByteBackend) for
//! memory, [`std::io::Read`] sources and [`std::io::Write`] sinks.

mod mem_backend;
pub use mem_backend::*;

mod reader_backend;
pub use reader_backend::*;

mod writer_backend;
pub use writer_backend::*;
