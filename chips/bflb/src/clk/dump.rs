// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Human readable table of a clock block's state.

use core::fmt::{self, Write};

use kernel::hil::time::BusyWait;
use kernel::utilities::mmio::RegisterPort;

use super::tree::{ClockTree, Parent};

impl<R: RegisterPort, D: BusyWait> ClockTree<'_, R, D> {
    /// Write one row per clock: id, name, parent, rate and the raw
    /// selector, divider and gate fields.
    ///
    /// Clocks whose parent or rate cannot be determined are still listed.
    /// Errors of `out` end the table early and are not reported.
    pub fn dump(&self, out: &mut dyn Write) {
        let _ = self.write_table(out);
    }

    fn write_table(&self, out: &mut dyn Write) -> fmt::Result {
        let clocks = self.desc().clocks;

        writeln!(out, "   {}", self.name())?;
        writeln!(out, "ID       NAME            PARENT         RATE    SEL DIV EN")?;
        writeln!(out, "--+----------------+----------------+----------+---+---+--")?;

        for (id, data) in clocks.iter().enumerate() {
            let parent = match self.get_parent(id) {
                Ok(Parent::Local(parent)) => clocks.get(parent).map_or("(null)", |p| p.name),
                Ok(Parent::External(handle)) => handle
                    .clock_name()
                    .unwrap_or_else(|| handle.provider().name()),
                Err(_) => "(none)",
            };
            write!(out, "{:2} {:>16} {:>16}", id, data.name, parent)?;

            match self.get_rate(id) {
                Ok(rate) => write!(out, " {:10}", rate)?,
                Err(_) => write!(out, " {:>10}", "(error)")?,
            }

            match data.selector {
                Some(selector) => write!(out, " {:3}", self.read_field(selector))?,
                None if data.divider.is_some() || data.gate.is_some() => out.write_str("    ")?,
                None => {}
            }
            match data.divider {
                Some(divider) => write!(out, " {:3}", self.read_field(divider))?,
                None if data.gate.is_some() => out.write_str("    ")?,
                None => {}
            }
            if let Some(gate) = data.gate {
                write!(out, " {:2}", self.read_field(gate))?;
            }
            writeln!(out)?;
        }
        writeln!(out)
    }
}
