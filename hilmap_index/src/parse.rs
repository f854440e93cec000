// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text input formats.
//!
//! Two line-oriented formats are understood:
//!
//! - **Native**: `<startHex> <endHex> <label...>`; the label is the rest of
//!   the line and may contain spaces. Lines starting with `#` are comments.
//! - **Process map** (`/proc/<pid>/maps` style):
//!   `<startHex>-<endHex> <perms> <offset> <dev> <inode> [<pathname>]`.
//!   The first three permission characters are appended to the label as a
//!   `{rwx}` annotation. Lines mentioning `[vsyscall]` are skipped.
//!
//! Bad lines never abort a parse: each one is recorded in
//! [`ParseReport::skipped`] and the rest of the input is kept.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::index::RegionIndex;
use crate::palette::Palette;
use crate::range::{AddressRange, Permissions, unnamed_label};

/// Marker of the legacy vsyscall page, which sits above any sensible ceiling.
const RESERVED_MARKER: &str = "[vsyscall]";

/// Input format of a range description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum InputFormat {
    /// `<startHex> <endHex> <label...>`.
    #[default]
    Native,
    /// `<startHex>-<endHex> <perms> <offset> <dev> <inode> [<pathname>]`.
    ProcessMap,
}

impl InputFormat {
    /// Guesses the format from the first meaningful line.
    ///
    /// A leading `<hex>-<hex>` field selects [`InputFormat::ProcessMap`];
    /// anything else is treated as native.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let first = text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#'));
        match first.and_then(next_field).map(|(field, _)| field) {
            Some(field) if parse_dash_range(field).is_some() => Self::ProcessMap,
            _ => Self::Native,
        }
    }
}

/// Why an input line was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Missing fields or unparsable numbers.
    Malformed,
    /// `start >= end`.
    EmptyRange,
    /// `start` is at or beyond the address-space ceiling.
    BeyondCeiling,
    /// Reserved mapping that is never displayed.
    Reserved,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Malformed => "malformed line",
            Self::EmptyRange => "empty range",
            Self::BeyondCeiling => "range starts beyond the address space",
            Self::Reserved => "reserved mapping",
        })
    }
}

/// A dropped input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SkippedLine {
    /// One-based line number.
    pub line_number: usize,
    /// Why the line was dropped.
    pub reason: SkipReason,
}

/// Outcome of parsing a range description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Accepted ranges, in input order.
    pub ranges: Vec<AddressRange>,
    /// Dropped lines, in input order.
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// Sorts the accepted ranges into a [`RegionIndex`].
    #[must_use]
    pub fn into_index(self) -> RegionIndex {
        RegionIndex::build(self.ranges)
    }
}

/// Parses `text` in the given format.
///
/// Ends are clamped to `ceiling`; labels are colored through `palette`.
pub fn parse(text: &str, format: InputFormat, ceiling: u64, palette: &mut Palette) -> ParseReport {
    let mut report = ParseReport::default();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || (format == InputFormat::Native && line.starts_with('#')) {
            continue;
        }
        let parsed = match format {
            InputFormat::Native => parse_native_line(line),
            InputFormat::ProcessMap => parse_map_line(line),
        };
        let outcome = parsed.and_then(|(start, end, label)| {
            if start >= end {
                return Err(SkipReason::EmptyRange);
            }
            if start >= ceiling {
                return Err(SkipReason::BeyondCeiling);
            }
            let color = palette.color_for(&label);
            AddressRange::clamped(start, end, label, color, ceiling).ok_or(SkipReason::Malformed)
        });
        match outcome {
            Ok(range) => report.ranges.push(range),
            Err(reason) => {
                tracing::debug!(line = i + 1, %reason, "skipping input line");
                report.skipped.push(SkippedLine {
                    line_number: i + 1,
                    reason,
                });
            }
        }
    }
    tracing::debug!(
        ?format,
        accepted = report.ranges.len(),
        skipped = report.skipped.len(),
        "parsed address ranges"
    );
    report
}

/// Detects the format of `text` and parses it.
pub fn parse_auto(text: &str, ceiling: u64, palette: &mut Palette) -> ParseReport {
    parse(text, InputFormat::detect(text), ceiling, palette)
}

fn parse_native_line(line: &str) -> Result<(u64, u64, String), SkipReason> {
    let (start, rest) = next_field(line).ok_or(SkipReason::Malformed)?;
    let (end, rest) = next_field(rest).ok_or(SkipReason::Malformed)?;
    let start = parse_hex(start).ok_or(SkipReason::Malformed)?;
    let end = parse_hex(end).ok_or(SkipReason::Malformed)?;
    let label = rest.trim();
    let label = if label.is_empty() {
        unnamed_label(start)
    } else {
        label.into()
    };
    Ok((start, end, label))
}

fn parse_map_line(line: &str) -> Result<(u64, u64, String), SkipReason> {
    if line.contains(RESERVED_MARKER) {
        return Err(SkipReason::Reserved);
    }
    let (range, rest) = next_field(line).ok_or(SkipReason::Malformed)?;
    let (perms, rest) = next_field(rest).ok_or(SkipReason::Malformed)?;
    let (_offset, rest) = next_field(rest).ok_or(SkipReason::Malformed)?;
    let (_dev, rest) = next_field(rest).ok_or(SkipReason::Malformed)?;
    let (_inode, rest) = next_field(rest).ok_or(SkipReason::Malformed)?;

    let (start, end) = parse_dash_range(range).ok_or(SkipReason::Malformed)?;
    let perms = Permissions::parse(perms).ok_or(SkipReason::Malformed)?;
    let path = rest.trim();
    let label = if path.is_empty() {
        alloc::format!("{} {}", unnamed_label(start), perms.suffix())
    } else {
        alloc::format!("{path} {}", perms.suffix())
    };
    Ok((start, end, label))
}

/// Splits off the first whitespace-delimited field, returning it and the
/// remainder (which may start with whitespace).
fn next_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(s.split_at(s.find(char::is_whitespace).unwrap_or(s.len())))
}

fn parse_dash_range(field: &str) -> Option<(u64, u64)> {
    let (start, end) = field.split_once('-')?;
    Some((parse_hex(start)?, parse_hex(end)?))
}

fn parse_hex(s: &str) -> Option<u64> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}
