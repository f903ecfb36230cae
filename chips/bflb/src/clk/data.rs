// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Static description of a clock block.
//!
//! A block is described by a table of [`ClockData`] entries, indexed by clock
//! id. Tables are built in `const` context with the `with_*` builders:
//!
//! ```rust,ignore
//! static CLOCKS: [ClockData; 2] = [
//!     ClockData::new("XTAL").with_parents(&[ParentId::External(0)]),
//!     ClockData::new("UART")
//!         .with_parents(&[ParentId::Local(0)])
//!         .with_divider(0x150, 0x7 << 0)
//!         .with_gate(0x150, 1 << 4),
//! ];
//! ```

use kernel::utilities::registers::{Field, FieldValue};

use crate::reset::ResetData;

/// Index of a clock in its block's table.
pub type ClockId = usize;

/// A bit field of the register block.
///
/// The field is given by the byte offset of its register and a bit mask.
/// Selector and divider masks are contiguous; a gate mask may have several
/// bits, which are all set to ungate the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegField {
    pub offset: usize,
    pub mask: u32,
}

impl RegField {
    pub const fn new(offset: usize, mask: u32) -> RegField {
        RegField { offset, mask }
    }

    /// Position of the lowest bit of the field.
    pub const fn shift(&self) -> usize {
        if self.mask == 0 {
            0
        } else {
            self.mask.trailing_zeros() as usize
        }
    }

    /// Largest value the field holds.
    pub const fn max(&self) -> u32 {
        self.mask >> self.shift()
    }

    pub(crate) fn field(&self) -> Field<u32, ()> {
        Field::new(self.max(), self.shift())
    }

    /// All bits of the mask set or cleared.
    pub(crate) fn bits(&self, set: bool) -> FieldValue<u32, ()> {
        FieldValue::<u32, ()>::new(self.mask, 0, if set { self.mask } else { 0 })
    }
}

/// One entry of a clock's parent list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentId {
    /// The selector value is reserved or unconnected.
    NoParent,
    /// Another clock of the same block.
    Local(ClockId),
    /// A clock of another provider, by index into
    /// [`ClockDesc::external_parents`].
    External(usize),
}

/// Description of one clock node.
#[derive(Clone, Copy, Debug)]
pub struct ClockData {
    pub name: &'static str,
    /// Parents in selector order. Entry `n` is the parent chosen when the
    /// selector field holds `n`. Without a selector only entry 0 is used.
    pub parents: &'static [ParentId],
    pub selector: Option<RegField>,
    /// Divide-by-(n + 1) field.
    pub divider: Option<RegField>,
    /// Constant divider applied to the parent rate before `divider`.
    pub fixed_divider: u32,
    /// Rate of a clock with a constant frequency, in Hz. Zero for clocks
    /// whose rate comes from their parent.
    pub fixed_rate: u32,
    pub gate: Option<RegField>,
    /// Reset bit pulsed after the clock is ungated.
    pub reset: Option<RegField>,
}

impl ClockData {
    pub const fn new(name: &'static str) -> ClockData {
        ClockData {
            name,
            parents: &[],
            selector: None,
            divider: None,
            fixed_divider: 1,
            fixed_rate: 0,
            gate: None,
            reset: None,
        }
    }

    pub const fn with_parents(self, parents: &'static [ParentId]) -> ClockData {
        ClockData { parents, ..self }
    }

    pub const fn with_selector(self, offset: usize, mask: u32) -> ClockData {
        ClockData {
            selector: Some(RegField::new(offset, mask)),
            ..self
        }
    }

    pub const fn with_divider(self, offset: usize, mask: u32) -> ClockData {
        ClockData {
            divider: Some(RegField::new(offset, mask)),
            ..self
        }
    }

    pub const fn with_fixed_divider(self, fixed_divider: u32) -> ClockData {
        ClockData {
            fixed_divider,
            ..self
        }
    }

    pub const fn with_fixed_rate(self, fixed_rate: u32) -> ClockData {
        ClockData { fixed_rate, ..self }
    }

    pub const fn with_gate(self, offset: usize, mask: u32) -> ClockData {
        ClockData {
            gate: Some(RegField::new(offset, mask)),
            ..self
        }
    }

    pub const fn with_reset(self, offset: usize, mask: u32) -> ClockData {
        ClockData {
            reset: Some(RegField::new(offset, mask)),
            ..self
        }
    }

    /// Number of selector values: `max + 1` of the selector field, or 1.
    pub const fn parent_count(&self) -> usize {
        match self.selector {
            Some(selector) => selector.max() as usize + 1,
            None => 1,
        }
    }
}

/// Everything the engine needs to know about one clock block.
#[derive(Debug)]
pub struct ClockDesc {
    /// Clocks of the block, indexed by [`ClockId`].
    pub clocks: &'static [ClockData],
    /// Names of the clocks, produced elsewhere, that
    /// [`ParentId::External`] refers to.
    pub external_parents: &'static [&'static str],
    /// Reset lines of the block, indexed by reset id.
    pub resets: &'static [ResetData],
}
