//! Ordered collections of values and their statistics.

use crate::model::Value;
use crate::stats;
use anyhow::{Context, Result, bail};
use std::fmt;

/// Ordered collection of values.
///
/// Elements may be of mixed kinds; numeric statistics such as
/// [`Series::mean`] require every element to be numeric.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    vals: Vec<Value>,
}

impl Series {
    pub fn new(vals: Vec<Value>) -> Self {
        Self { vals }
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.vals.iter()
    }

    pub fn values(&self) -> &[Value] {
        &self.vals
    }

    /// Compute the arithmetic mean of the series.
    ///
    /// # Errors
    /// Returns an error if the series is empty or has a non-numeric element.
    pub fn mean(&self) -> Result<f64> {
        let mut nums = Vec::with_capacity(self.vals.len());
        for (idx, val) in self.vals.iter().enumerate() {
            match val.as_f64() {
                Some(num) => nums.push(num),
                None => bail!("element {idx} is not numeric: {val:?}"),
            }
        }
        let mean = stats::mean(&nums).context("failed to compute series mean")?;
        log::debug!("mean of {} values is {mean}", nums.len());
        Ok(mean)
    }

    /// Count the occurrences of each distinct element.
    ///
    /// Distinct elements are listed in order of first occurrence.
    /// NaN cells never compare equal, so each one is counted on its own.
    pub fn frequency(&self) -> Frequency {
        let mut counts: Vec<(Value, usize)> = Vec::new();
        for val in &self.vals {
            match counts.iter_mut().find(|(key, _)| key == val) {
                Some((_, count)) => *count += 1,
                None => counts.push((val.clone(), 1)),
            }
        }
        Frequency { counts }
    }

    /// Alias of [`Series::frequency`].
    pub fn freq(&self) -> Frequency {
        self.frequency()
    }

    /// Compute the probability of `val` in the series.
    ///
    /// With a non-zero `smoothing_factor` (k) the Laplace smoothed estimate
    /// `(count + k) / (len + k * n_distinct)` is returned instead of the
    /// plain relative frequency.
    ///
    /// # Errors
    /// Returns an error if the series is empty or if the smoothed counts
    /// overflow.
    pub fn probability(&self, val: &Value, smoothing_factor: u64) -> Result<Probability> {
        let freq = self.frequency();
        let count = freq.get(val) as u64;
        let n_vals = self.vals.len() as u64;
        let n_distinct = freq.len() as u64;

        let too_large = || {
            format!("smoothing factor {smoothing_factor} is too large for a series of {n_vals} values")
        };
        let num = count.checked_add(smoothing_factor).with_context(too_large)?;
        let den = smoothing_factor
            .checked_mul(n_distinct)
            .and_then(|smoothed| smoothed.checked_add(n_vals))
            .with_context(too_large)?;

        Probability::new(num, den).context("failed to compute probability")
    }
}

impl<T: Into<Value>> From<Vec<T>> for Series {
    fn from(vals: Vec<T>) -> Self {
        Self::new(vals.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<Value> for Series {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.vals.iter()
    }
}

/// Occurrence counts of the distinct elements of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    counts: Vec<(Value, usize)>,
}

impl Frequency {
    /// Get the count of `val` (zero if it never occurs).
    pub fn get(&self, val: &Value) -> usize {
        self.counts
            .iter()
            .find(|(key, _)| key == val)
            .map_or(0, |&(_, count)| count)
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, usize)> {
        self.counts.iter().map(|(val, count)| (val, *count))
    }
}

/// Exact probability, kept as a reduced fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probability {
    num: u64,
    den: u64,
}

impl Probability {
    /// Create the probability `num / den`.
    ///
    /// # Errors
    /// Returns an error if `den` is zero or `num` exceeds `den`.
    pub fn new(num: u64, den: u64) -> Result<Self> {
        if den == 0 {
            bail!("denominator must be positive");
        }
        if num > den {
            bail!("numerator must not exceed the denominator, but {num} > {den}");
        }
        let div = gcd(num, den);
        Ok(Self {
            num: num / div,
            den: den / div,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.num
    }

    pub fn denominator(&self) -> u64 {
        self.den
    }

    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
