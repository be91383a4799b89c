//! Partial states computed by chunk workers and the rules for merging them
//!
//! Each state is built from one contiguous chunk in a single sequential pass
//! and merged with its neighbours afterwards. Every [`Merge`] implementation
//! is associative and commutative up to floating-point rounding, so the fold
//! order only changes the last bits of the result. The orchestrator still
//! folds in chunk order so repeated runs are bit-for-bit identical.

use num_traits::AsPrimitive;

/// Element types the statistics accept
///
/// Implemented for every primitive integer and float. All arithmetic is
/// carried out in `f64`; min/max hand back the original element.
pub trait Sample: Copy + PartialOrd + Send + Sync + AsPrimitive<f64> {}

impl<T> Sample for T where T: Copy + PartialOrd + Send + Sync + AsPrimitive<f64> {}

/// Combining two partial states into one
pub trait Merge: Sized {
    fn merge(self, other: Self) -> Self;
}

// `None` stands for an empty chunk and is the identity.
impl<P: Merge> Merge for Option<P> {
    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.merge(b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

/// Welford accumulator: count, running mean and the running sum of squared
/// deviations from the mean (`m2`).
///
/// ```
/// use parstats::statistics::{Merge, Moments};
///
/// let left = Moments::from_slice(&[1.0, 2.0, 3.0]);
/// let right = Moments::from_slice(&[4.0, 5.0, 6.0]);
/// let all = left.merge(right);
///
/// assert_eq!(all.count(), 6);
/// assert!((all.mean().unwrap() - 3.5).abs() < 1e-12);
/// assert!((all.variance().unwrap() - 3.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Moments {
    /// An empty accumulator; the identity element of [`Merge::merge`]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Sequential Welford pass over `data`
    pub fn from_slice<T: Sample>(data: &[T]) -> Self {
        let mut moments = Self::new();
        for &x in data {
            moments.push(x.as_());
        }
        moments
    }

    /// Add one sample
    #[allow(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Running sum of squared deviations from the mean
    #[must_use]
    pub const fn m2(&self) -> f64 {
        self.m2
    }

    #[must_use]
    pub const fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.mean)
        }
    }

    /// Sample variance (Bessel-corrected); a single sample has variance 0
    #[must_use]
    pub fn variance(&self) -> Option<f64> {
        match self.count {
            0 => None,
            1 => Some(0.0),
            #[allow(clippy::cast_precision_loss)]
            n => Some(self.m2 / (n - 1) as f64),
        }
    }

    /// Sample standard deviation
    #[must_use]
    pub fn stdev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}

impl Merge for Moments {
    #[allow(clippy::cast_precision_loss)]
    fn merge(self, other: Self) -> Self {
        if other.count == 0 {
            return self;
        }
        if self.count == 0 {
            return other;
        }

        let count = self.count + other.count;
        let (n_a, n_b, n) = (self.count as f64, other.count as f64, count as f64);
        let delta = other.mean - self.mean;

        Self {
            count,
            mean: self.mean + delta * n_b / n,
            m2: self.m2 + other.m2 + delta * delta * n_a * n_b / n,
        }
    }
}

/// Plain running total
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sum(pub f64);

impl Sum {
    pub fn from_slice<T: Sample>(data: &[T]) -> Self {
        Self(data.iter().fold(0.0, |acc, &x| acc + x.as_()))
    }
}

impl Merge for Sum {
    fn merge(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

/// Smallest and largest element of a non-empty chunk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

impl<T: Sample> MinMax<T> {
    /// Seeds with the first element and scans the rest; `None` for an empty
    /// slice.
    pub fn from_slice(data: &[T]) -> Option<Self> {
        let (&first, rest) = data.split_first()?;
        let mut state = Self {
            min: first,
            max: first,
        };
        for &x in rest {
            if x < state.min {
                state.min = x;
            }
            if x > state.max {
                state.max = x;
            }
        }
        Some(state)
    }
}

impl<T: Sample> Merge for MinMax<T> {
    fn merge(self, other: Self) -> Self {
        Self {
            min: if other.min < self.min { other.min } else { self.min },
            max: if other.max > self.max { other.max } else { self.max },
        }
    }
}

/// Running totals for a weighted mean
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightedSum {
    pub weighted_total: f64,
    pub total_weight: f64,
}

impl WeightedSum {
    /// `values` and `weights` must have the same length
    pub fn from_slices<T: Sample, W: Sample>(values: &[T], weights: &[W]) -> Self {
        values
            .iter()
            .zip(weights)
            .fold(Self::default(), |acc, (&x, &w)| {
                let w: f64 = w.as_();
                Self {
                    weighted_total: acc.weighted_total + w * x.as_(),
                    total_weight: acc.total_weight + w,
                }
            })
    }

    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.total_weight == 0.0 {
            None
        } else {
            Some(self.weighted_total / self.total_weight)
        }
    }
}

impl Merge for WeightedSum {
    fn merge(self, other: Self) -> Self {
        Self {
            weighted_total: self.weighted_total + other.weighted_total,
            total_weight: self.total_weight + other.total_weight,
        }
    }
}
