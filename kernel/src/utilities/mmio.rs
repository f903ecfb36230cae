// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Offset-addressed access to a block of 32-bit memory mapped registers.
//!
//! Most peripherals describe their registers with `register_structs!`. Clock
//! and reset controllers are different: their drivers are table driven, and
//! each table entry names a register by its byte offset from the block base
//! together with the bit mask of the field it controls. [`RegisterPort`] is
//! the interface those drivers use, so the same driver runs against real
//! hardware ([`MmioRegion`]) or against an in-memory register bank in tests.

use crate::config::CONFIG;
use crate::debug;
use crate::utilities::registers::interfaces::{Readable, Writeable};
use crate::utilities::registers::{FieldValue, ReadWrite};

/// Read and write 32-bit registers by byte offset.
pub trait RegisterPort {
    /// Read the register at `offset`.
    fn read(&self, offset: usize) -> u32;

    /// Write `value` to the register at `offset`.
    fn write(&self, offset: usize, value: u32);

    /// Read the register at `offset`, replace the bits selected by `field`
    /// and write the result back. Bits outside the field are preserved.
    fn modify(&self, offset: usize, field: FieldValue<u32, ()>) {
        let old = self.read(offset);
        let new = field.modify(old);
        self.write(offset, new);
        if CONFIG.trace_clocks {
            debug!("mmio: [{:#05x}] {:#010x} -> {:#010x}", offset, old, new);
        }
    }
}

/// A memory mapped register block.
pub struct MmioRegion {
    base: usize,
    size: usize,
}

impl MmioRegion {
    /// Create a register port for the `size` bytes of registers at `base`.
    ///
    /// # Safety
    ///
    /// `base..base + size` must be a device register region that stays mapped
    /// for the lifetime of the program, and `base` must be 4-byte aligned.
    pub const unsafe fn new(base: usize, size: usize) -> MmioRegion {
        MmioRegion { base, size }
    }

    fn register(&self, offset: usize) -> Option<&ReadWrite<u32>> {
        if offset % 4 != 0 || offset + 4 > self.size {
            debug!(
                "mmio: offset {:#x} outside register block at {:#x}",
                offset, self.base
            );
            return None;
        }
        // SAFETY: the offset is aligned and inside the region promised valid
        // by the caller of `new`.
        Some(unsafe { &*((self.base + offset) as *const ReadWrite<u32>) })
    }
}

impl RegisterPort for MmioRegion {
    fn read(&self, offset: usize) -> u32 {
        self.register(offset).map_or(0, |register| register.get())
    }

    fn write(&self, offset: usize, value: u32) {
        if let Some(register) = self.register(offset) {
            register.set(value);
        }
    }
}
