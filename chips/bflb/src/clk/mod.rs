// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Clock tree control.
//!
//! Each clock is a node with up to four register fields:
//!
//! - a selector choosing one of its parents,
//! - a divider, dividing the parent rate by `value + 1`,
//! - a gate, and
//! - a reset bit, pulsed when the clock is enabled.
//!
//! A node may also divide its parent by a constant, or have a constant rate
//! of its own and no parent. Parents are clocks of the same block or clocks
//! found by name through a [`kernel::hil::clock::ClockLookup`].

mod data;
mod dump;
mod peripheral;
mod tree;


pub use self::data::{ClockData, ClockDesc, ClockId, ParentId, RegField};
pub use self::peripheral::PeripheralClock;
pub use self::tree::{ClockError, ClockTree, Parent};
