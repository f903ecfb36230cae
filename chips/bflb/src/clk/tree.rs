// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Table driven clock engine for one clock block.

use kernel::config::CONFIG;
use kernel::debug;
use kernel::hil::clock::{ClockHandle, ClockLookup, ClockProvider};
use kernel::hil::time::BusyWait;
use kernel::utilities::cells::OptionalCell;
use kernel::utilities::mmio::RegisterPort;
use kernel::utilities::registers::LocalRegisterCopy;
use kernel::ErrorCode;

use super::data::{ClockData, ClockDesc, ClockId, ParentId, RegField};

/// Settle time around each edge of the reset pulse issued by `enable`.
const RESET_SETTLE_US: u32 = 2;

/// Failures of clock tree operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockError {
    /// The clock id is not in the block's table.
    InvalidNode,
    /// The current selector value maps to no parent, or the clock has no
    /// parents at all.
    NoParent,
    /// The selector value, or an external parent index, is outside the
    /// table.
    InvalidSelector,
    /// An external parent could not be resolved to a provider.
    LookupFailed,
    /// The requested parent is not among the clock's possible parents.
    NotFound,
    /// The parent cache handed to the engine is too short.
    AllocationFailed,
    /// Another provider failed while computing a rate or enabling a clock.
    Provider(ErrorCode),
}

impl From<ClockError> for ErrorCode {
    fn from(err: ClockError) -> ErrorCode {
        match err {
            ClockError::InvalidNode => ErrorCode::INVAL,
            ClockError::NoParent => ErrorCode::NODEVICE,
            ClockError::InvalidSelector => ErrorCode::SIZE,
            ClockError::LookupFailed => ErrorCode::UNINSTALLED,
            ClockError::NotFound => ErrorCode::NOSUPPORT,
            ClockError::AllocationFailed => ErrorCode::NOMEM,
            ClockError::Provider(code) => code,
        }
    }
}

/// The clock that currently feeds a node, or that could feed it.
#[derive(Clone, Copy, Debug)]
pub enum Parent<'a> {
    /// A clock of the same block.
    Local(ClockId),
    /// A clock of another provider.
    External(ClockHandle<'a>),
}

/// Best candidate found by the rate search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RateChoice {
    rate: u32,
    selector: u32,
    divider: u32,
}

/// Clock engine for one clock block.
///
/// The engine owns no state beyond a cache of each clock's current parent;
/// everything else is read from the hardware when needed. The cache is
/// filled lazily, on the first `get_parent` of a clock, and is kept in step
/// by `set_parent`. `set_rate` invalidates the entry of a clock whose
/// selector it reprograms.
///
/// Clocks of other blocks are reached through a [`ClockLookup`] that the
/// board installs with [`ClockTree::set_lookup`] once every provider exists.
pub struct ClockTree<'a, R: RegisterPort, D: BusyWait> {
    name: &'static str,
    desc: &'static ClockDesc,
    registers: &'a R,
    delay: &'a D,
    lookup: OptionalCell<&'a dyn ClockLookup<'a>>,
    parents: &'a [OptionalCell<Parent<'a>>],
}

impl<'a, R: RegisterPort, D: BusyWait> ClockTree<'a, R, D> {
    /// Create the engine for the block described by `desc`.
    ///
    /// `parents` holds the parent cache and needs one slot per clock of
    /// the block; all slots are cleared.
    pub fn new(
        name: &'static str,
        desc: &'static ClockDesc,
        registers: &'a R,
        delay: &'a D,
        parents: &'a [OptionalCell<Parent<'a>>],
    ) -> Result<ClockTree<'a, R, D>, ClockError> {
        if parents.len() < desc.clocks.len() {
            return Err(ClockError::AllocationFailed);
        }
        parents.iter().for_each(|slot| slot.clear());
        Ok(ClockTree {
            name,
            desc,
            registers,
            delay,
            lookup: OptionalCell::empty(),
            parents,
        })
    }

    pub fn set_lookup(&self, lookup: &'a dyn ClockLookup<'a>) {
        self.lookup.set(lookup);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn desc(&self) -> &'static ClockDesc {
        self.desc
    }

    pub fn num_clocks(&self) -> usize {
        self.desc.clocks.len()
    }

    /// Check that `id` names a clock of this block.
    pub fn request(&self, id: ClockId) -> Result<(), ClockError> {
        self.data(id).map(|_| ())
    }

    fn data(&self, id: ClockId) -> Result<&'static ClockData, ClockError> {
        self.desc.clocks.get(id).ok_or(ClockError::InvalidNode)
    }

    fn cache(&self, id: ClockId) -> Result<&'a OptionalCell<Parent<'a>>, ClockError> {
        self.parents.get(id).ok_or(ClockError::InvalidNode)
    }

    pub(crate) fn read_field(&self, field: RegField) -> u32 {
        LocalRegisterCopy::<u32>::new(self.registers.read(field.offset)).read(field.field())
    }

    fn write_field(&self, field: RegField, value: u32) {
        self.registers.modify(field.offset, field.field().val(value));
    }

    /// Turn entry `selector` of the parent list of `data` into a parent.
    fn resolve_parent(&self, data: &ClockData, selector: usize) -> Result<Parent<'a>, ClockError> {
        if data.parents.is_empty() {
            return Err(ClockError::NoParent);
        }
        match data.parents.get(selector) {
            None => Err(ClockError::InvalidSelector),
            Some(ParentId::NoParent) => Err(ClockError::NoParent),
            Some(&ParentId::Local(id)) => Ok(Parent::Local(id)),
            Some(&ParentId::External(index)) => {
                let name = self
                    .desc
                    .external_parents
                    .get(index)
                    .ok_or(ClockError::InvalidSelector)?;
                let lookup = self.lookup.ok_or(ClockError::LookupFailed)?;
                lookup
                    .lookup_by_name(name)
                    .map(Parent::External)
                    .map_err(|_| ClockError::LookupFailed)
            }
        }
    }

    fn parent_rate(&self, parent: Parent<'a>) -> Result<u32, ClockError> {
        match parent {
            Parent::Local(id) => self.get_rate(id),
            Parent::External(handle) => handle.get_rate().map_err(ClockError::Provider),
        }
    }

    fn is_same_parent<'p>(&self, a: Parent<'p>, b: Parent<'p>) -> bool {
        match (a, b) {
            (Parent::Local(x), Parent::Local(y)) => x == y,
            (Parent::External(x), Parent::External(y)) => x.is_same(&y),
            (Parent::Local(id), Parent::External(handle))
            | (Parent::External(handle), Parent::Local(id)) => {
                handle.id() == id && handle.is_provided_by(self)
            }
        }
    }

    /// Search all selector and divider values for the highest rate not
    /// above `requested`.
    ///
    /// Selectors are tried in increasing order and, for each, dividers in
    /// increasing order. A candidate replaces the best one so far only if
    /// its rate is strictly higher, so ties go to the lowest selector and
    /// then the lowest divider. Selector values whose parent cannot be
    /// resolved or has no rate are skipped.
    fn calc_rate(&self, data: &ClockData, requested: u32) -> RateChoice {
        let mut best = RateChoice {
            rate: 0,
            selector: 0,
            divider: 0,
        };

        if data.fixed_rate != 0 {
            if data.fixed_rate <= requested {
                best.rate = data.fixed_rate;
            }
            return best;
        }

        let max_selector = data.selector.map_or(0, |field| field.max());
        let max_divider = data.divider.map_or(0, |field| field.max());
        for selector in 0..=max_selector {
            let parent_rate = match self
                .resolve_parent(data, selector as usize)
                .and_then(|parent| self.parent_rate(parent))
            {
                Ok(rate) => rate / data.fixed_divider.max(1),
                Err(_) => continue,
            };

            for divider in 0..=max_divider {
                let rate = (parent_rate as u64 / (divider as u64 + 1)) as u32;
                if rate > requested {
                    continue;
                }
                // Rates only fall as the divider grows.
                if rate <= best.rate {
                    break;
                }
                best = RateChoice {
                    rate,
                    selector,
                    divider,
                };
            }
        }
        best
    }

    /// Rate that `set_rate(id, requested)` would achieve, or 0 if nothing
    /// at or below `requested` is reachable.
    pub fn round_rate(&self, id: ClockId, requested: u32) -> Result<u32, ClockError> {
        let data = self.data(id)?;
        Ok(self.calc_rate(data, requested).rate)
    }

    /// Current rate of a clock in Hz, computed from the hardware state.
    pub fn get_rate(&self, id: ClockId) -> Result<u32, ClockError> {
        let data = self.data(id)?;
        if data.fixed_rate != 0 {
            return Ok(data.fixed_rate);
        }

        let parent = self.get_parent(id)?;
        let rate = self.parent_rate(parent)? / data.fixed_divider.max(1);
        Ok(match data.divider {
            Some(divider) => (rate as u64 / (self.read_field(divider) as u64 + 1)) as u32,
            None => rate,
        })
    }

    /// Program the best selector and divider for `requested` Hz.
    ///
    /// Returns the rate achieved. If no setting reaches a rate at or below
    /// `requested`, returns `Ok(0)` and leaves the hardware untouched.
    pub fn set_rate(&self, id: ClockId, requested: u32) -> Result<u32, ClockError> {
        let data = self.data(id)?;
        let choice = self.calc_rate(data, requested);
        if choice.rate == 0 {
            debug!(
                "{}: {} cannot run at or below {} Hz",
                self.name, data.name, requested
            );
            return Ok(0);
        }

        if let Some(selector) = data.selector {
            self.write_field(selector, choice.selector);
            self.cache(id)?.clear();
        }
        if let Some(divider) = data.divider {
            self.write_field(divider, choice.divider);
        }
        if CONFIG.trace_clocks {
            debug!(
                "{}: {} at {} Hz (sel {}, div {})",
                self.name, data.name, choice.rate, choice.selector, choice.divider
            );
        }
        Ok(choice.rate)
    }

    /// Parent currently feeding a clock.
    ///
    /// The first call reads the selector field and caches the result.
    pub fn get_parent(&self, id: ClockId) -> Result<Parent<'a>, ClockError> {
        let data = self.data(id)?;
        let slot = self.cache(id)?;
        if let Some(parent) = slot.get() {
            return Ok(parent);
        }

        let selector = data.selector.map_or(0, |field| self.read_field(field));
        let parent = self
            .resolve_parent(data, selector as usize)
            .inspect_err(|err| {
                if *err == ClockError::LookupFailed {
                    debug!("{}: cannot find the parent of {}", self.name, data.name);
                }
            })?;
        slot.set(parent);
        Ok(parent)
    }

    /// Switch a clock to `target`.
    ///
    /// The first selector value whose parent is `target` is programmed. A
    /// handle to a clock of this block is the same parent as the matching
    /// local entry. If `target` is not a possible parent, fails with
    /// `NotFound` and changes nothing.
    pub fn set_parent(&self, id: ClockId, target: Parent<'_>) -> Result<(), ClockError> {
        let data = self.data(id)?;
        let slot = self.cache(id)?;

        let (selector, parent) = (0..data.parent_count())
            .find_map(|selector| {
                self.resolve_parent(data, selector)
                    .ok()
                    .filter(|parent| self.is_same_parent(*parent, target))
                    .map(|parent| (selector, parent))
            })
            .ok_or(ClockError::NotFound)?;

        if let Some(field) = data.selector {
            self.write_field(field, selector as u32);
        }
        slot.set(parent);
        if CONFIG.trace_clocks {
            debug!("{}: {} parent {:?}", self.name, data.name, parent);
        }
        Ok(())
    }

    /// Ungate a clock, after its parent.
    ///
    /// A clock without a parent is ungated on its own. If the clock has a
    /// reset bit, the bit is pulsed low once the gate is open.
    pub fn enable(&self, id: ClockId) -> Result<(), ClockError> {
        let data = self.data(id)?;
        match self.get_parent(id) {
            Ok(Parent::Local(parent)) => self.enable(parent)?,
            Ok(Parent::External(handle)) => handle.enable().map_err(ClockError::Provider)?,
            Err(ClockError::NoParent) => {}
            Err(err) => return Err(err),
        }

        if let Some(gate) = data.gate {
            self.registers.modify(gate.offset, gate.bits(true));
        }
        if let Some(reset) = data.reset {
            self.pulse_reset(data, reset);
        }
        Ok(())
    }

    fn pulse_reset(&self, data: &ClockData, reset: RegField) {
        if CONFIG.trace_clocks {
            debug!("{}: reset {}", self.name, data.name);
        }
        self.registers.modify(reset.offset, reset.bits(true));
        self.delay.delay_us(RESET_SETTLE_US);
        self.registers.modify(reset.offset, reset.bits(false));
        self.delay.delay_us(RESET_SETTLE_US);
        self.registers.modify(reset.offset, reset.bits(true));
    }

    /// Gate a clock. Parents are left running.
    pub fn disable(&self, id: ClockId) -> Result<(), ClockError> {
        let data = self.data(id)?;
        if let Some(gate) = data.gate {
            self.registers.modify(gate.offset, gate.bits(false));
        }
        Ok(())
    }

    /// Whether every bit of the clock's gate is set. Clocks without a gate
    /// always run.
    pub fn is_enabled(&self, id: ClockId) -> Result<bool, ClockError> {
        let data = self.data(id)?;
        Ok(match data.gate {
            Some(gate) => self.registers.read(gate.offset) & gate.mask == gate.mask,
            None => true,
        })
    }
}

impl<R: RegisterPort, D: BusyWait> ClockProvider for ClockTree<'_, R, D> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn clock_name(&self, id: usize) -> Option<&'static str> {
        self.desc.clocks.get(id).map(|clock| clock.name)
    }

    fn get_rate(&self, id: usize) -> Result<u32, ErrorCode> {
        ClockTree::get_rate(self, id).map_err(ErrorCode::from)
    }

    fn enable(&self, id: usize) -> Result<(), ErrorCode> {
        ClockTree::enable(self, id).map_err(ErrorCode::from)
    }
}
