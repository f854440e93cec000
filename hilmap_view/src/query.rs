// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact key-value form of [`ZoomState`] for persistence across navigation.
//!
//! The form is URL-query shaped: `level=2&min=0x1c0000000000&max=0x1d0000000000&x=…&y=…`.
//! Unknown keys are ignored so the state can share a query string with other
//! parameters.

use alloc::string::ToString;

use kurbo::Vec2;

use crate::space::AddressSpace;
use crate::zoom::{ViewStateError, ZoomState};

impl ZoomState {
    /// Restores a state serialized by [`ZoomState::to_query`].
    ///
    /// A leading `?` is accepted. The restored state is validated against
    /// `space`, so a query written for a different address space is rejected
    /// rather than producing an inconsistent view.
    pub fn from_query(space: &AddressSpace, query: &str) -> Result<Self, ViewStateError> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut level = None;
        let mut min_addr = None;
        let mut max_addr = None;
        let mut x = None;
        let mut y = None;

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "level" => level = Some(parse_field("level", value, |v| v.parse().ok())?),
                "min" => min_addr = Some(parse_field("min", value, parse_hex)?),
                "max" => max_addr = Some(parse_field("max", value, parse_hex)?),
                "x" => x = Some(parse_field("x", value, parse_offset)?),
                "y" => y = Some(parse_field("y", value, parse_offset)?),
                _ => {}
            }
        }

        Self::from_parts(
            space,
            level.ok_or(ViewStateError::MissingKey("level"))?,
            min_addr.ok_or(ViewStateError::MissingKey("min"))?,
            max_addr.ok_or(ViewStateError::MissingKey("max"))?,
            Vec2::new(
                x.ok_or(ViewStateError::MissingKey("x"))?,
                y.ok_or(ViewStateError::MissingKey("y"))?,
            ),
        )
    }
}

fn parse_field<T>(
    key: &'static str,
    value: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, ViewStateError> {
    parse(value).ok_or_else(|| ViewStateError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_hex(value: &str) -> Option<u64> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

fn parse_offset(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
