//! Response-time buckets used to grade scrape durations.

use std::time::Duration;

use crate::types::ScrapeResult;

/// A named response-time range, `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Human-readable grade.
    pub name: &'static str,
    /// Inclusive lower bound.
    pub from: Duration,
    /// Exclusive upper bound.
    pub to: Duration,
}

impl Bucket {
    const fn millis(name: &'static str, from: u64, to: u64) -> Self {
        Self {
            name,
            from: Duration::from_millis(from),
            to: Duration::from_millis(to),
        }
    }

    /// Whether `duration` falls in this bucket.
    pub fn contains(&self, duration: Duration) -> bool {
        duration >= self.from && duration < self.to
    }
}

const BUCKETS: [Bucket; 10] = [
    Bucket::millis("awesome", 0, 50),
    Bucket::millis("great", 50, 100),
    Bucket::millis("ok, google loves you", 100, 200),
    Bucket::millis("not too good, but still ok", 200, 300),
    Bucket::millis("not great", 300, 500),
    Bucket::millis("bad, users start to feel a real difference", 500, 1_000),
    Bucket::millis("really bad, you are loosing users", 1_000, 3_000),
    Bucket::millis("ouch this seems broken", 3_000, 5_000),
    Bucket::millis("catastrophic you site seems to be down", 5_000, 10_000),
    Bucket::millis("end of the world - this must not happen", 10_000, 3_600_000),
];

/// All buckets, fastest first. Contiguous from zero to one hour.
pub fn bucket_list() -> &'static [Bucket] {
    &BUCKETS
}

/// The bucket `duration` falls in, or `None` beyond the last bucket.
pub fn classify(duration: Duration) -> Option<&'static Bucket> {
    BUCKETS.iter().find(|bucket| bucket.contains(duration))
}

/// Count results per bucket, in [`bucket_list`] order.
///
/// Results slower than the last bucket are not counted.
pub fn histogram(results: &[ScrapeResult]) -> Vec<(&'static Bucket, usize)> {
    let mut counts = [0usize; BUCKETS.len()];
    for result in results {
        if let Some(index) = BUCKETS
            .iter()
            .position(|bucket| bucket.contains(result.duration()))
        {
            counts[index] += 1;
        }
    }
    BUCKETS.iter().zip(counts).collect()
}
