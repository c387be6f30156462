// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Mapping of screen positions to DDRAM addresses

/// Number of visible columns
pub const COLUMNS: u8 = 16;

/// Number of rows
pub const ROWS: u8 = 2;

/// DDRAM address of the first column of the second row
const SECOND_ROW_OFFSET: u8 = 0x40;

/// Compute the DDRAM address of a screen position
///
/// Returns `None` when the column is not in `0..16` or the row is neither 0
/// nor 1; callers treat such positions as a no-op.
#[must_use]
pub const fn ddram_address(column: u8, row: u8) -> Option<u8> {
    if column >= COLUMNS {
        return None;
    }
    match row {
        0 => Some(column),
        1 => Some(column + SECOND_ROW_OFFSET),
        _ => None,
    }
}
