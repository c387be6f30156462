// Copyright Claudio Mattera 2024-2025.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Console logger for the serial/JTAG port
//!
//! Every line carries the uptime in milliseconds, the level and the module
//! that emitted it:
//!
//! ```text
//! 12.345 INFO  edubase_firmware] Servo at center, 1.24V
//! ```
//!
//! The global level comes from `ESP_LOGLEVEL` at build time, and chatty
//! modules are additionally held below a per-module ceiling.

use core::str::FromStr;

use log::max_level;
use log::set_logger_racy;
use log::set_max_level_racy;
use log::trace;
use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;

use esp_hal::time::Instant;

use esp_println::println;

/// Level used when `ESP_LOGLEVEL` is not set at build time
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// Highest level allowed for modules matching a target prefix
///
/// The display driver traces every nibble, and printing those takes longer
/// than the transfers themselves.
const CEILINGS: [(&str, LevelFilter); 2] = [
    ("edubase_lcd_rs", LevelFilter::Debug),
    ("edubase_peripherals_rs", LevelFilter::Debug),
];

/// Install the console logger
///
/// The level is read from the `ESP_LOGLEVEL` environment variable at build
/// time, set in the `env` section of `.cargo/config.toml`. Unknown values
/// turn logging off.
///
/// Changing it requires a clean rebuild because of
/// <https://github.com/rust-lang/cargo/issues/10358>
pub fn setup() {
    let level = option_env!("ESP_LOGLEVEL").map_or(DEFAULT_LEVEL, |name| {
        LevelFilter::from_str(name).unwrap_or(LevelFilter::Off)
    });

    // SAFETY:
    // Only called at the top of main, before anything else runs
    if unsafe { set_logger_racy(&ConsoleLogger) }.is_err() {
        println!("A logger is already installed");
        return;
    }

    // SAFETY:
    // Only called at the top of main, before anything else runs
    unsafe { set_max_level_racy(level) };

    trace!("Console logger installed at level {level}");
}

/// Highest level allowed for a target
fn ceiling(target: &str) -> LevelFilter {
    CEILINGS
        .iter()
        .find(|(prefix, _)| target.starts_with(prefix))
        .map_or(LevelFilter::Trace, |&(_, ceiling)| ceiling)
}

/// ANSI escape sequence for a level
fn style(level: Level) -> &'static str {
    match level {
        Level::Error => "\u{001B}[31m",
        Level::Warn => "\u{001B}[33m",
        Level::Info => "\u{001B}[32m",
        Level::Debug => "\u{001B}[34m",
        Level::Trace => "\u{001B}[35m",
    }
}

/// Logger writing to the console through `esp-println`
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let level = metadata.level();
        level <= max_level() && level <= ceiling(metadata.target())
    }

    fn log(&self, record: &Record) {
        /// Restore normal text
        const RESET: &str = "\u{001B}[0m";
        /// Dim text
        const DIM: &str = "\u{001B}[2m";

        if !self.enabled(record.metadata()) {
            return;
        }

        let uptime = Instant::now().duration_since_epoch().as_millis();
        println!(
            "{DIM}{}.{:03}{RESET} {}{:<5}{RESET} {DIM}{}]{RESET} {}",
            uptime / 1000,
            uptime % 1000,
            style(record.level()),
            record.level(),
            record.target(),
            record.args(),
        );
    }

    fn flush(&self) {}
}
