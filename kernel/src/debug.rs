// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Support for in-kernel debugging.
//!
//! For printing, this module exposes the `debug!` macro. It takes the same
//! arguments as `println!` and writes a line terminated with `\r\n` to the
//! debug writer installed by the board:
//!
//! ```rust,ignore
//! kernel::debug!("Clock {} runs at {}Hz", id, rate);
//! ```
//!
//! Board code installs the writer once, during initialization:
//!
//! ```rust,ignore
//! unsafe { kernel::debug::set_debug_writer(uart_writer) };
//! ```
//!
//! Until a writer is installed, debug output is discarded.

use core::fmt::{self, Arguments, Write};
use core::ptr::addr_of_mut;

/// Byte sink for debug output.
///
/// Implementations are expected to be synchronous (e.g. a polled UART).
pub trait IoWrite {
    /// Write as many bytes of `buf` as possible and return the number of
    /// bytes written.
    fn write(&mut self, buf: &[u8]) -> usize;
}

static mut DEBUG_WRITER: Option<&'static mut dyn IoWrite> = None;

/// Install the sink that `debug!` writes to.
///
/// # Safety
///
/// Must be called from the single initialization thread, before or between
/// `debug!` invocations, never concurrently with them.
pub unsafe fn set_debug_writer(writer: &'static mut dyn IoWrite) {
    *addr_of_mut!(DEBUG_WRITER) = Some(writer);
}

struct DebugWriter<'a> {
    sink: &'a mut dyn IoWrite,
}

impl Write for DebugWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let written = self.sink.write(bytes);
            if written == 0 {
                return Err(fmt::Error);
            }
            bytes = &bytes[written.min(bytes.len())..];
        }
        Ok(())
    }
}

/// Write a formatted line to the debug writer, if one is installed.
pub fn debug_println(args: Arguments) {
    // SAFETY: the kernel runs on a single thread; the writer is only replaced
    // by `set_debug_writer`, whose contract excludes concurrent use.
    let writer = unsafe { &mut *addr_of_mut!(DEBUG_WRITER) };
    if let Some(sink) = writer.as_deref_mut() {
        let mut writer = DebugWriter { sink };
        let _ = writer.write_fmt(args);
        let _ = writer.write_str("\r\n");
    }
}

/// In-kernel `println()` debugging.
#[macro_export]
macro_rules! debug {
    () => ({
        $crate::debug!("")
    });
    ($msg:expr $(,)?) => ({
        $crate::debug::debug_println(format_args!($msg))
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::debug::debug_println(format_args!($fmt, $($arg)+))
    });
}
