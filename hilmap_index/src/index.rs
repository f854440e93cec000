// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::range::AddressRange;

/// Address ranges sorted by start, with first-match point lookup.
///
/// Overlapping ranges are kept as given. When several ranges contain an
/// address, [`RegionIndex::lookup`] returns the first one in sorted order
/// (the lowest start; ties keep input order).
///
/// Lookup is `O(log n)`: alongside the ranges the index keeps the running
/// maximum of their ends, which is monotone, so the first range whose end
/// passes the address can be found by binary search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionIndex {
    ranges: Vec<AddressRange>,
    // reach[i] = max(ranges[..=i].end)
    reach: Vec<u64>,
}

impl RegionIndex {
    /// Builds an index, sorting `ranges` by start address.
    ///
    /// The sort is stable, so ranges with equal starts keep their input order.
    pub fn build(ranges: impl IntoIterator<Item = AddressRange>) -> Self {
        let mut ranges: Vec<AddressRange> = ranges.into_iter().collect();
        ranges.sort_by_key(AddressRange::start);
        let reach = ranges
            .iter()
            .scan(0_u64, |max, r| {
                *max = (*max).max(r.end());
                Some(*max)
            })
            .collect();
        Self { ranges, reach }
    }

    /// Builds an index after clamping every range to `[0, ceiling)`.
    pub fn build_within(ranges: impl IntoIterator<Item = AddressRange>, ceiling: u64) -> Self {
        Self::build(ranges.into_iter().filter_map(|r| r.clamp_to(ceiling)))
    }

    /// Returns the number of ranges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the index holds no ranges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns the ranges in sorted order.
    #[must_use]
    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    /// Iterates the ranges in sorted order.
    pub fn iter(&self) -> core::slice::Iter<'_, AddressRange> {
        self.ranges.iter()
    }

    /// Returns the position of the first range containing `address`.
    #[must_use]
    pub fn lookup_position(&self, address: u64) -> Option<usize> {
        let first = self.reach.partition_point(|&end| end <= address);
        self.ranges
            .get(first)
            .filter(|r| r.start() <= address)
            .map(|_| first)
    }

    /// Returns the first range (in sorted order) containing `address`.
    #[must_use]
    pub fn lookup(&self, address: u64) -> Option<&AddressRange> {
        self.lookup_position(address).map(|i| &self.ranges[i])
    }

    /// Iterates, in sorted order, the ranges overlapping `[min, max)`.
    pub fn visible_ranges(&self, min: u64, max: u64) -> impl Iterator<Item = &AddressRange> + '_ {
        let candidates = self.ranges.partition_point(|r| r.start() < max);
        self.ranges[..candidates]
            .iter()
            .filter(move |r| r.end() > min)
    }

    /// Returns the first range whose full or base label equals `label`.
    #[must_use]
    pub fn find_label(&self, label: &str) -> Option<&AddressRange> {
        self.ranges
            .iter()
            .find(|r| r.label() == label || r.base_label() == label)
    }
}

impl<'a> IntoIterator for &'a RegionIndex {
    type Item = &'a AddressRange;
    type IntoIter = core::slice::Iter<'a, AddressRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl FromIterator<AddressRange> for RegionIndex {
    fn from_iter<I: IntoIterator<Item = AddressRange>>(iter: I) -> Self {
        Self::build(iter)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use peniko::color::Rgba8;

    use super::RegionIndex;
    use crate::AddressRange;

    const GRAY: Rgba8 = Rgba8 {
        r: 128,
        g: 128,
        b: 128,
        a: 255,
    };

    fn range(start: u64, end: u64, label: &str) -> AddressRange {
        AddressRange::new(start, end, label, GRAY).unwrap()
    }

    fn labels<'a>(it: impl Iterator<Item = &'a AddressRange>) -> Vec<&'a str> {
        it.map(AddressRange::label).collect()
    }

    #[test]
    fn sorts_by_start_and_prefers_first_match() {
        let index = RegionIndex::build(vec![range(0x1000, 0x2000, "a"), range(0x500, 0x1500, "b")]);
        assert_eq!(labels(index.iter()), ["b", "a"]);
        assert_eq!(index.lookup(0x1200).map(AddressRange::label), Some("b"));
        assert_eq!(index.lookup(0x1800).map(AddressRange::label), Some("a"));
        assert_eq!(index.lookup(0x4ff), None);
        assert_eq!(index.lookup(0x2000), None);
    }

    #[test]
    fn lookup_skips_short_early_ranges() {
        // `long` starts first and outlives `short`, which ends before the probe.
        let index = RegionIndex::build(vec![
            range(0, 10, "short"),
            range(5, 100, "long"),
            range(50, 60, "inner"),
        ]);
        assert_eq!(index.lookup(55).map(AddressRange::label), Some("long"));
        assert_eq!(index.lookup(7).map(AddressRange::label), Some("short"));
        assert_eq!(index.lookup(100), None);
    }

    #[test]
    fn lookup_matches_linear_scan() {
        let index = RegionIndex::build(vec![
            range(40, 45, "e"),
            range(0, 8, "a"),
            range(10, 30, "b"),
            range(12, 14, "c"),
            range(20, 50, "d"),
            range(60, 61, "f"),
        ]);
        for address in 0..70 {
            let linear = index.iter().find(|r| r.contains(address));
            assert_eq!(index.lookup(address), linear, "address {address}");
        }
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let index = RegionIndex::build(vec![range(0, 5, "first"), range(0, 9, "second")]);
        assert_eq!(index.lookup(2).map(AddressRange::label), Some("first"));
        assert_eq!(index.lookup(7).map(AddressRange::label), Some("second"));
    }

    #[test]
    fn visible_ranges_use_half_open_overlap() {
        let index = RegionIndex::build(vec![
            range(0, 100, "low"),
            range(100, 200, "mid"),
            range(150, 400, "wide"),
            range(400, 500, "high"),
        ]);
        assert_eq!(labels(index.visible_ranges(100, 400)), ["mid", "wide"]);
        assert_eq!(labels(index.visible_ranges(99, 101)), ["low", "mid"]);
        assert_eq!(labels(index.visible_ranges(500, 600)), Vec::<&str>::new());
    }

    #[test]
    fn build_within_clamps_and_drops() {
        let index = RegionIndex::build_within(
            vec![range(0x1000, 0x2000_0000_0000_0000, "big"), range(1 << 48, (1 << 48) + 1, "gone")],
            1 << 48,
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.ranges()[0].end(), 1 << 48);
    }

    #[test]
    fn empty_index() {
        let index = RegionIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.lookup(0), None);
        assert_eq!(index.visible_ranges(0, u64::MAX).count(), 0);
    }

    #[test]
    fn find_by_label() {
        let index = RegionIndex::build(vec![range(0, 5, "libc.so {r-x}"), range(9, 12, "[heap]")]);
        assert_eq!(index.find_label("libc.so").map(AddressRange::start), Some(0));
        assert_eq!(index.find_label("[heap]").map(AddressRange::start), Some(9));
        assert_eq!(index.find_label("[stack]"), None);
    }
}
