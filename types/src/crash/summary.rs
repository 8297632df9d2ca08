use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Descriptive statistics over the current history.
///
/// Always recomputed in full from the history; an empty history has no summary at all
/// (`Option<Summary>::None`), which is distinct from a summary full of zeros.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    /// Arithmetic mean, two decimals.
    pub average: f64,
    /// Median, two decimals.
    pub median: f64,
    pub max: f64,
    pub min: f64,
    /// Population standard deviation, two decimals.
    pub volatility: f64,
    pub crashes_below_2x: usize,
    pub crashes_above_5x: usize,
    pub crashes_above_10x: usize,
}

/// Fixed histogram bins over half-open ranges `[lower, upper)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Under1_5,
    Under2,
    Under3,
    Under5,
    Under10,
    Moon,
}

impl Bucket {
    pub const COUNT: usize = 6;

    /// All buckets in ascending order.
    pub const ALL: [Bucket; Self::COUNT] = [
        Bucket::Under1_5,
        Bucket::Under2,
        Bucket::Under3,
        Bucket::Under5,
        Bucket::Under10,
        Bucket::Moon,
    ];

    /// Inclusive lower bound.
    pub const fn lower(self) -> f64 {
        match self {
            Bucket::Under1_5 => 1.0,
            Bucket::Under2 => 1.5,
            Bucket::Under3 => 2.0,
            Bucket::Under5 => 3.0,
            Bucket::Under10 => 5.0,
            Bucket::Moon => 10.0,
        }
    }

    /// Exclusive upper bound; the last bucket is open-ended.
    pub const fn upper(self) -> Option<f64> {
        match self {
            Bucket::Under1_5 => Some(1.5),
            Bucket::Under2 => Some(2.0),
            Bucket::Under3 => Some(3.0),
            Bucket::Under5 => Some(5.0),
            Bucket::Under10 => Some(10.0),
            Bucket::Moon => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn contains(self, multiplier: f64) -> bool {
        multiplier >= self.lower() && self.upper().map_or(true, |upper| multiplier < upper)
    }

    /// Display label, e.g. `1.50x-1.99x` or `10.00x+`.
    pub fn label(self) -> String {
        match self.upper() {
            Some(upper) => format!("{:.2}x-{:.2}x", self.lower(), upper - 0.01),
            None => format!("{:.2}x+", self.lower()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub bucket: Bucket,
    pub label: String,
    pub count: u64,
}

/// Reasons a decoded bucket list is not a valid [`Histogram`].
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum HistogramError {
    #[error("wrong number of buckets (got={got}, expected={expected})")]
    WrongLength { got: usize, expected: usize },
    #[error("bucket out of order (position={position}, got={got:?}, expected={expected:?})")]
    OutOfOrder {
        position: usize,
        got: Bucket,
        expected: Bucket,
    },
}

/// Six-bin frequency table, always listing every bucket in ascending order.
///
/// Serialized as a plain list; decoding requires exactly [`Bucket::ALL`] in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BucketCount>", into = "Vec<BucketCount>")]
pub struct Histogram {
    buckets: Vec<BucketCount>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            buckets: Bucket::ALL
                .iter()
                .map(|bucket| BucketCount {
                    bucket: *bucket,
                    label: bucket.label(),
                    count: 0,
                })
                .collect(),
        }
    }
}

impl TryFrom<Vec<BucketCount>> for Histogram {
    type Error = HistogramError;

    fn try_from(buckets: Vec<BucketCount>) -> Result<Self, Self::Error> {
        if buckets.len() != Bucket::COUNT {
            return Err(HistogramError::WrongLength {
                got: buckets.len(),
                expected: Bucket::COUNT,
            });
        }
        for (position, (entry, expected)) in buckets.iter().zip(Bucket::ALL).enumerate() {
            if entry.bucket != expected {
                return Err(HistogramError::OutOfOrder {
                    position,
                    got: entry.bucket,
                    expected,
                });
            }
        }
        Ok(Self { buckets })
    }
}

impl From<Histogram> for Vec<BucketCount> {
    fn from(histogram: Histogram) -> Self {
        histogram.buckets
    }
}

impl Histogram {
    pub fn increment(&mut self, bucket: Bucket) {
        self.buckets[bucket.index()].count += 1;
    }

    pub fn count(&self, bucket: Bucket) -> u64 {
        self.buckets[bucket.index()].count
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|entry| entry.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BucketCount> {
        self.buckets.iter()
    }
}
