//! Range Sharding
//!
//! Lanes interleave by stride instead of taking contiguous blocks: lane `i`
//! of `n` scans relative indices `i, i + n, i + 2n, ...`. Every lane makes
//! progress across the whole range at once, so an early hit near the start
//! is found early no matter which lane owns it.

/// One lane's share of the relative index space `[0, range)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchShard {
    /// First relative index.
    pub start: u64,
    /// Distance between consecutive indices.
    pub stride: u64,
    /// Exclusive upper bound.
    pub end: u64,
}

impl SearchShard {
    /// Shard for `lane` out of `lanes` over `range` candidates.
    ///
    /// # Panics
    /// Panics if `lanes == 0` or `lane >= lanes`.
    pub fn for_lane(lane: usize, lanes: usize, range: u64) -> Self {
        assert!(lane < lanes, "lane {lane} out of {lanes}");
        Self {
            start: lane as u64,
            stride: lanes as u64,
            end: range,
        }
    }

    /// Number of indices in this shard.
    pub fn len(&self) -> u64 {
        if self.start >= self.end {
            0
        } else {
            (self.end - self.start - 1) / self.stride + 1
        }
    }

    /// Does this shard contain no indices?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate relative indices in ascending order.
    pub fn iter(&self) -> ShardIter {
        ShardIter {
            next: self.start,
            stride: self.stride,
            end: self.end,
        }
    }
}

impl IntoIterator for SearchShard {
    type Item = u64;
    type IntoIter = ShardIter;

    fn into_iter(self) -> ShardIter {
        self.iter()
    }
}

/// Iterator over a shard's relative indices.
#[derive(Clone, Debug)]
pub struct ShardIter {
    next: u64,
    stride: u64,
    end: u64,
}

impl Iterator for ShardIter {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.next >= self.end {
            return None;
        }
        let current = self.next;
        // Saturate so a huge stride cannot wrap back into range.
        self.next = self.next.saturating_add(self.stride);
        Some(current)
    }
}

/// Candidate seed for a relative index.
#[inline]
pub fn candidate(base_offset: i64, relative: u64) -> i64 {
    base_offset.wrapping_add(relative as i64)
}
