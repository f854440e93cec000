// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use peniko::color::Rgba8;

bitflags::bitflags! {
    /// Access permissions of a mapped region, as listed in process maps.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Permissions: u8 {
        /// Readable (`r`).
        const READ = 1;
        /// Writable (`w`).
        const WRITE = 1 << 1;
        /// Executable (`x`).
        const EXEC = 1 << 2;
        /// Shared mapping (`s` in the fourth column, `p` means private).
        const SHARED = 1 << 3;
    }
}

impl Permissions {
    /// Parses a permission column such as `r-xp`.
    ///
    /// The first three characters must each be the expected letter or `-`;
    /// an optional fourth character marks the mapping shared (`s`) or
    /// private (`p`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if !(3..=4).contains(&bytes.len()) {
            return None;
        }
        let mut perms = Self::empty();
        for (byte, (letter, flag)) in bytes.iter().zip([
            (b'r', Self::READ),
            (b'w', Self::WRITE),
            (b'x', Self::EXEC),
        ]) {
            match *byte {
                b'-' => {}
                b if b == letter => perms |= flag,
                _ => return None,
            }
        }
        match bytes.get(3) {
            None | Some(b'p') => {}
            Some(b's') => perms |= Self::SHARED,
            Some(_) => return None,
        }
        Some(perms)
    }

    /// Renders the `{rwx}` label suffix, with `-` for missing permissions.
    #[must_use]
    pub fn suffix(self) -> String {
        let flag = |f: Self, c: char| if self.contains(f) { c } else { '-' };
        alloc::format!(
            "{{{}{}{}}}",
            flag(Self::READ, 'r'),
            flag(Self::WRITE, 'w'),
            flag(Self::EXEC, 'x')
        )
    }
}

/// Synthetic label for a region without a name.
///
/// Built from bits 32–47 of the start address, so unnamed regions in
/// different high-level buckets get different labels (and colors).
#[must_use]
pub fn unnamed_label(start: u64) -> String {
    alloc::format!("{:04x}", (start >> 32) & 0xffff)
}

/// Splits a label into its base name and an optional trailing `{...}`
/// annotation.
#[must_use]
pub fn split_label(label: &str) -> (&str, Option<&str>) {
    if let Some(body) = label.strip_suffix('}')
        && let Some(open) = body.rfind('{')
    {
        return (label[..open].trim_end(), Some(&body[open + 1..]));
    }
    (label, None)
}

/// A labeled, colored half-open address range `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressRange {
    start: u64,
    end: u64,
    label: String,
    color: Rgba8,
}

impl AddressRange {
    /// Creates a range, returning `None` unless `start < end`.
    ///
    /// An empty (or all-whitespace) label is replaced by [`unnamed_label`].
    #[must_use]
    pub fn new(start: u64, end: u64, label: impl Into<String>, color: Rgba8) -> Option<Self> {
        if start >= end {
            return None;
        }
        let mut label = label.into();
        if label.trim().is_empty() {
            label = unnamed_label(start);
        }
        Some(Self {
            start,
            end,
            label,
            color,
        })
    }

    /// Like [`AddressRange::new`], then clamps the range to `[0, ceiling)`.
    ///
    /// Ranges starting at or beyond `ceiling` are dropped.
    #[must_use]
    pub fn clamped(
        start: u64,
        end: u64,
        label: impl Into<String>,
        color: Rgba8,
        ceiling: u64,
    ) -> Option<Self> {
        Self::new(start, end, label, color)?.clamp_to(ceiling)
    }

    /// Clamps the end to `ceiling`, dropping the range if it starts at or
    /// beyond it.
    #[must_use]
    pub fn clamp_to(mut self, ceiling: u64) -> Option<Self> {
        if self.start >= ceiling {
            return None;
        }
        self.end = self.end.min(ceiling);
        Some(self)
    }

    /// Returns the first address of the range.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the exclusive end of the range.
    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Returns the number of addresses covered.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Always `false`: ranges are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the full label, including any `{rwx}` annotation.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the label without its trailing annotation.
    #[must_use]
    pub fn base_label(&self) -> &str {
        split_label(&self.label).0
    }

    /// Returns the display color.
    #[must_use]
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Returns `true` if `address` is inside the range.
    #[must_use]
    pub fn contains(&self, address: u64) -> bool {
        self.start <= address && address < self.end
    }

    /// Half-open overlap test against `[min, max)`.
    #[must_use]
    pub fn overlaps(&self, min: u64, max: u64) -> bool {
        self.end > min && self.start < max
    }

    /// Returns the part of the range inside `[min, max)`, if any.
    #[must_use]
    pub fn clip(&self, min: u64, max: u64) -> Option<(u64, u64)> {
        let start = self.start.max(min);
        let end = self.end.min(max);
        (start < end).then_some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use peniko::color::Rgba8;

    use super::{AddressRange, Permissions, split_label, unnamed_label};

    const GRAY: Rgba8 = Rgba8 {
        r: 128,
        g: 128,
        b: 128,
        a: 255,
    };

    #[test]
    fn clamps_to_ceiling() {
        let ceiling = 0x1_0000_0000_0000;
        let r = AddressRange::clamped(0x1000, 0x2000_0000_0000_0000, "big", GRAY, ceiling).unwrap();
        assert_eq!(r.start(), 0x1000);
        assert_eq!(r.end(), ceiling);

        assert_eq!(
            AddressRange::clamped(ceiling, ceiling + 10, "high", GRAY, ceiling),
            None
        );
    }

    #[test]
    fn rejects_empty_and_inverted_ranges() {
        assert_eq!(AddressRange::new(5, 5, "x", GRAY), None);
        assert_eq!(AddressRange::new(6, 5, "x", GRAY), None);
    }

    #[test]
    fn unnamed_regions_get_bucket_labels() {
        let r = AddressRange::new(0x7fff_1234_0000, 0x7fff_1235_0000, "  ", GRAY).unwrap();
        assert_eq!(r.label(), "7fff");
        assert_eq!(unnamed_label(0x55_0000_0000), "0055");
        assert_ne!(unnamed_label(0x7f00_0000_0000), unnamed_label(0x5500_0000_0000));
    }

    #[test]
    fn clip_and_overlap() {
        let r = AddressRange::new(100, 200, "r", GRAY).unwrap();
        assert!(r.overlaps(150, 300));
        assert!(!r.overlaps(200, 300));
        assert!(!r.overlaps(0, 100));
        assert_eq!(r.clip(150, 300), Some((150, 200)));
        assert_eq!(r.clip(200, 300), None);
    }

    #[test]
    fn permissions_parse_and_render() {
        let p = Permissions::parse("r-xp").unwrap();
        assert_eq!(p, Permissions::READ | Permissions::EXEC);
        assert_eq!(p.suffix(), "{r-x}");
        assert_eq!(
            Permissions::parse("rw-s").unwrap(),
            Permissions::READ | Permissions::WRITE | Permissions::SHARED
        );
        assert_eq!(Permissions::parse("---").unwrap().suffix(), "{---}");
        assert_eq!(Permissions::parse("xwr"), None);
        assert_eq!(Permissions::parse("rw"), None);
    }

    #[test]
    fn labels_split_off_annotations() {
        assert_eq!(split_label("/usr/lib/libc.so {r-x}"), ("/usr/lib/libc.so", Some("r-x")));
        assert_eq!(split_label("[heap]"), ("[heap]", None));
        assert_eq!(split_label("odd}"), ("odd}", None));
    }
}
