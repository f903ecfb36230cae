// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Data structure for storing compile-time configuration options.
//!
//! Configuration lives in a typed `const` object rather than in scattered
//! `#[cfg(feature = ...)]` blocks. All code paths are type-checked by the
//! compiler, even those that end up disabled, and the compiler folds the
//! constants away after type-checking, so an `if CONFIG.option { ... }` block
//! has no cost in the resulting binary when the option is off.
//!
//! Cargo features only select the values of the fields below; they are never
//! used to gate code directly.

/// Data structure holding compile-time configuration options.
///
/// To change the configuration, enable the matching cargo feature of the
/// kernel crate from the board crate.
pub struct Config {
    /// Whether clock drivers should trace register updates to the debug
    /// output.
    ///
    /// If enabled, every read-modify-write that a clock or reset driver
    /// performs is printed with the register offset, and the value before and
    /// after the update. This is useful when bringing up a new clock table,
    /// but it is very verbose.
    pub trace_clocks: bool,
}

/// A unique instance of `Config` where compile-time configuration options are
/// defined.
pub const CONFIG: Config = Config {
    trace_clocks: cfg!(feature = "trace_clocks"),
};
