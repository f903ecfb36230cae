// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Software reset lines of a clock block.
//!
//! Each line is one bit of a register of the block. Setting the bit holds
//! the peripheral in reset.

use kernel::hil::reset::ResetControl;
use kernel::utilities::mmio::RegisterPort;
use kernel::utilities::registers::{Field, LocalRegisterCopy};
use kernel::ErrorCode;

use crate::clk::ClockDesc;

/// One reset line: the register offset and the bit position in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetData {
    pub offset: usize,
    pub bit: u32,
}

impl ResetData {
    pub const fn new(offset: usize, bit: u32) -> ResetData {
        ResetData { offset, bit }
    }
}

pub struct ResetController<'a, R: RegisterPort> {
    resets: &'static [ResetData],
    registers: &'a R,
}

impl<'a, R: RegisterPort> ResetController<'a, R> {
    pub fn new(desc: &'static ClockDesc, registers: &'a R) -> ResetController<'a, R> {
        ResetController {
            resets: desc.resets,
            registers,
        }
    }

    fn line(&self, id: usize) -> Result<(usize, Field<u32, ()>), ErrorCode> {
        match self.resets.get(id) {
            Some(line) if line.bit < 32 => Ok((line.offset, Field::new(1, line.bit as usize))),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

impl<R: RegisterPort> ResetControl for ResetController<'_, R> {
    fn assert(&self, id: usize) -> Result<(), ErrorCode> {
        let (offset, field) = self.line(id)?;
        self.registers.modify(offset, field.val(1));
        Ok(())
    }

    fn deassert(&self, id: usize) -> Result<(), ErrorCode> {
        let (offset, field) = self.line(id)?;
        self.registers.modify(offset, field.val(0));
        Ok(())
    }

    fn is_asserted(&self, id: usize) -> Result<bool, ErrorCode> {
        let (offset, field) = self.line(id)?;
        Ok(LocalRegisterCopy::<u32>::new(self.registers.read(offset)).is_set(field))
    }
}
