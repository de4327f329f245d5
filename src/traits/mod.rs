/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Traits
//! This modules contains the traits and the small enums that are used
//! throughout the crate. They are collected into a module so you can do
//! `use bitflow::traits::*;` for ease of use.

mod bit_order;
pub use bit_order::*;

mod byte_backend;
pub use byte_backend::*;
