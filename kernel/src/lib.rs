// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Core support crate for clock and reset drivers.
//!
//! The kernel crate holds the code that chip drivers and boards share: the
//! standard [`ErrorCode`], the [`debug!`] output machinery, build
//! configuration, and the Hardware Interface Layer (HIL) traits through which
//! independent drivers talk to each other.
//!
//! Most `unsafe` code is in this kernel crate.

#![cfg_attr(not(test), no_std)]
#![warn(unreachable_pub)]

pub mod config;
pub mod debug;
pub mod hil;
pub mod platform;
pub mod utilities;

mod errorcode;

pub use crate::errorcode::ErrorCode;
