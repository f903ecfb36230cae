// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Clock and reset support for Bouffalo Lab SoCs (BL808 family).
//!
//! The clock blocks of these chips (GLB, HBN, MM_GLB, PDS) share one
//! register layout scheme: every clock node is a multiplexer, divider and
//! gate whose fields sit at arbitrary offsets of the block. A single
//! table-driven engine, [`clk::ClockTree`], serves all of them; each block
//! gets its own instance with its own node table.

#![cfg_attr(not(test), no_std)]

pub mod clk;
pub mod delay;
pub mod reset;
