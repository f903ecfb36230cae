// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Calibrated busy-wait loop.

use kernel::hil::time::BusyWait;

/// Busy waits by spinning, assuming roughly one loop iteration per CPU
/// cycle. Delays are at least as long as requested, often longer.
pub struct SpinDelay {
    loops_per_us: u32,
}

impl SpinDelay {
    pub const fn new(cpu_hz: u32) -> SpinDelay {
        let loops_per_us = cpu_hz / 1_000_000;
        SpinDelay {
            loops_per_us: if loops_per_us == 0 { 1 } else { loops_per_us },
        }
    }
}

impl BusyWait for SpinDelay {
    fn delay_us(&self, us: u32) {
        for _ in 0..us as u64 * self.loops_per_us as u64 {
            core::hint::spin_loop();
        }
    }
}
