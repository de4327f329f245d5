/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

pub mod backends;
pub mod bitstream;
mod error;
#[cfg(feature = "fuzz")]
pub mod fuzz;
pub mod traits;
pub mod utils;

pub use error::{BitstreamError, ErrorKind, Result};

/// Prelude module to import everything from this crate
pub mod prelude {
    pub use crate::backends::*;
    pub use crate::bitstream::*;
    pub use crate::error::{BitstreamError, ErrorKind, Result};
    pub use crate::traits::BitOrder::{L2M, M2L};
    pub use crate::traits::*;
    pub use crate::utils::*;
}
