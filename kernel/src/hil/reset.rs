// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interface for peripheral reset lines.

use crate::ErrorCode;

/// Control over a set of numbered reset lines.
pub trait ResetControl {
    /// Put the block behind reset line `id` into reset.
    ///
    /// Return values:
    ///
    /// - `Ok(())`: the line is asserted.
    /// - `INVAL`: `id` does not name a reset line of this controller.
    fn assert(&self, id: usize) -> Result<(), ErrorCode>;

    /// Release reset line `id`.
    ///
    /// Return values:
    ///
    /// - `Ok(())`: the line is deasserted.
    /// - `INVAL`: `id` does not name a reset line of this controller.
    fn deassert(&self, id: usize) -> Result<(), ErrorCode>;

    /// Whether reset line `id` is currently asserted.
    fn is_asserted(&self, id: usize) -> Result<bool, ErrorCode>;
}
