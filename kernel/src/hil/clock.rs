// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interfaces for clock providers and for finding clocks by name.
//!
//! A SoC usually splits its clock tree over several hardware blocks, each
//! driven by its own driver instance. A clock in one block can be fed by a
//! clock that another block (or a board-level oscillator) produces. Drivers
//! refer to such clocks by name and resolve the name through a
//! [`ClockLookup`], which hands back a [`ClockHandle`]: the providing driver
//! plus the clock's id within it.
//!
//! Boards typically wire this up as follows:
//!
//! ```rust,ignore
//! let names = [NamedClock::new("xtal"), NamedClock::new("rc32m")];
//! let clocks = NamedClocks::new(&names);
//! names[0].bind(ClockHandle::new(&xtal, 0));
//! names[1].bind(ClockHandle::new(&pds_clocks, RC32M));
//! hbn_clocks.set_lookup(&clocks);
//! ```

use core::fmt;

use crate::utilities::cells::OptionalCell;
use crate::ErrorCode;

/// A driver that produces one or more clocks, identified by a small integer.
pub trait ClockProvider {
    /// Display name of the provider, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Display name of clock `id`, or `None` if `id` is not a clock of this
    /// provider.
    fn clock_name(&self, id: usize) -> Option<&'static str>;

    /// Current rate of clock `id`, in Hz.
    ///
    /// Return values:
    ///
    /// - `Ok(rate)`: the clock runs at `rate` Hz.
    /// - `INVAL`: `id` is not a clock of this provider.
    /// - Any other error the provider hits while walking its own parents.
    fn get_rate(&self, id: usize) -> Result<u32, ErrorCode>;

    /// Ungate clock `id`, together with whatever feeds it.
    fn enable(&self, id: usize) -> Result<(), ErrorCode>;
}

/// One clock of some provider.
///
/// Two handles designate the same clock when they refer to the same provider
/// object and carry the same id.
#[derive(Clone, Copy)]
pub struct ClockHandle<'a> {
    provider: &'a dyn ClockProvider,
    id: usize,
}

impl<'a> ClockHandle<'a> {
    pub fn new(provider: &'a dyn ClockProvider, id: usize) -> ClockHandle<'a> {
        ClockHandle { provider, id }
    }

    pub fn provider(&self) -> &'a dyn ClockProvider {
        self.provider
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn clock_name(&self) -> Option<&'static str> {
        self.provider.clock_name(self.id)
    }

    pub fn get_rate(&self) -> Result<u32, ErrorCode> {
        self.provider.get_rate(self.id)
    }

    pub fn enable(&self) -> Result<(), ErrorCode> {
        self.provider.enable(self.id)
    }

    /// Whether this handle belongs to `provider`.
    ///
    /// Only the object address is compared; vtables are not.
    pub fn is_provided_by(&self, provider: &dyn ClockProvider) -> bool {
        core::ptr::addr_eq(self.provider, provider)
    }

    /// Whether both handles designate the same clock.
    pub fn is_same(&self, other: &ClockHandle<'_>) -> bool {
        self.id == other.id && self.is_provided_by(other.provider)
    }
}

impl fmt::Debug for ClockHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.provider.name(), self.id)
    }
}

/// Resolution of clock names to handles.
pub trait ClockLookup<'a> {
    /// Find the clock registered under `name`.
    ///
    /// Return values:
    ///
    /// - `Ok(handle)`: the clock was found.
    /// - `INVAL`: no clock of that name is known.
    /// - `NODEVICE`: the name is known, but its provider is not available
    ///   (yet).
    fn lookup_by_name(&self, name: &str) -> Result<ClockHandle<'a>, ErrorCode>;
}

/// A free-running clock of constant rate, such as a crystal oscillator.
///
/// The provider has a single clock, with id 0.
pub struct FixedClock {
    name: &'static str,
    rate: u32,
}

impl FixedClock {
    pub const fn new(name: &'static str, rate: u32) -> FixedClock {
        FixedClock { name, rate }
    }
}

impl ClockProvider for FixedClock {
    fn name(&self) -> &'static str {
        self.name
    }

    fn clock_name(&self, id: usize) -> Option<&'static str> {
        match id {
            0 => Some(self.name),
            _ => None,
        }
    }

    fn get_rate(&self, id: usize) -> Result<u32, ErrorCode> {
        match id {
            0 => Ok(self.rate),
            _ => Err(ErrorCode::INVAL),
        }
    }

    fn enable(&self, id: usize) -> Result<(), ErrorCode> {
        match id {
            0 => Ok(()),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

/// A name in a [`NamedClocks`] registry and the clock bound to it.
pub struct NamedClock<'a> {
    name: &'static str,
    handle: OptionalCell<ClockHandle<'a>>,
}

impl<'a> NamedClock<'a> {
    pub const fn new(name: &'static str) -> NamedClock<'a> {
        NamedClock {
            name,
            handle: OptionalCell::empty(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Bind the name to a clock, once its provider is ready.
    pub fn bind(&self, handle: ClockHandle<'a>) {
        self.handle.set(handle);
    }

    pub fn unbind(&self) {
        self.handle.clear();
    }
}

/// A fixed set of clock names, each bound late to a provider.
pub struct NamedClocks<'a> {
    entries: &'a [NamedClock<'a>],
}

impl<'a> NamedClocks<'a> {
    pub const fn new(entries: &'a [NamedClock<'a>]) -> NamedClocks<'a> {
        NamedClocks { entries }
    }
}

impl<'a> ClockLookup<'a> for NamedClocks<'a> {
    fn lookup_by_name(&self, name: &str) -> Result<ClockHandle<'a>, ErrorCode> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or(ErrorCode::INVAL)?
            .handle
            .ok_or(ErrorCode::NODEVICE)
    }
}
