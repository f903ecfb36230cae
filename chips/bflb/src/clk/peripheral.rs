// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

use kernel::debug;
use kernel::hil::time::BusyWait;
use kernel::platform::ClockInterface;
use kernel::utilities::mmio::RegisterPort;

use super::data::ClockId;
use super::tree::ClockTree;

/// The clock of one peripheral, for drivers that take a
/// [`ClockInterface`].
pub struct PeripheralClock<'a, 't, R: RegisterPort, D: BusyWait> {
    tree: &'a ClockTree<'t, R, D>,
    id: ClockId,
}

impl<'a, 't, R: RegisterPort, D: BusyWait> PeripheralClock<'a, 't, R, D> {
    pub const fn new(
        tree: &'a ClockTree<'t, R, D>,
        id: ClockId,
    ) -> PeripheralClock<'a, 't, R, D> {
        PeripheralClock { tree, id }
    }
}

impl<R: RegisterPort, D: BusyWait> ClockInterface for PeripheralClock<'_, '_, R, D> {
    fn is_enabled(&self) -> bool {
        self.tree.is_enabled(self.id).unwrap_or(false)
    }

    fn enable(&self) {
        if let Err(err) = self.tree.enable(self.id) {
            debug!("{}: enabling clock {} failed: {:?}", self.tree.name(), self.id, err);
        }
    }

    fn disable(&self) {
        if let Err(err) = self.tree.disable(self.id) {
            debug!("{}: disabling clock {} failed: {:?}", self.tree.name(), self.id, err);
        }
    }
}
