// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Hardware agnostic interfaces for waiting on time.

/// Synchronous, non-cancellable delays.
///
/// Intended for the short settle times hardware sequencing needs during
/// initialization, before any alarm or scheduler infrastructure exists.
/// Implementations spin; they never yield.
pub trait BusyWait {
    /// Spin for at least `us` microseconds.
    fn delay_us(&self, us: u32);
}
