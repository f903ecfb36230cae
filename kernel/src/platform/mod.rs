// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interfaces for peripherals to their chip.

/// Generic operations that clock-like things are expected to support.
///
/// A peripheral driver holds one of these for the clock that gates its
/// registers, and enables it before first touching the hardware.
pub trait ClockInterface {
    fn is_enabled(&self) -> bool;
    fn enable(&self);
    fn disable(&self);
}

