//! Online collection of summary statistics.
//!
//! A [`Statistic`] accumulates observations one at a time using Welford's
//! update, so mean and variance stay numerically stable over long runs and
//! nothing is buffered. The Monte Carlo integrator collects into one of
//! these; it is equally usable on its own for any replication output.

use crate::variate::invcdf::normal_inv_cdf;

/// A running collector of count, mean, variance, and extremes.
#[derive(Debug, Clone)]
pub struct Statistic {
    count: u64,
    mean: f64,
    /// Sum of squared deviations from the running mean.
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for Statistic {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistic {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Records one observation.
    pub fn collect(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// Number of observations collected.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sample average; NaN before the first observation.
    pub fn average(&self) -> f64 {
        if self.count == 0 { f64::NAN } else { self.mean }
    }

    /// Sample variance (n - 1 denominator); NaN below two observations.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Sample standard deviation; NaN below two observations.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard error of the mean; NaN below two observations.
    pub fn std_error(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            (self.variance() / self.count as f64).sqrt()
        }
    }

    /// Confidence interval half-width at the given level.
    ///
    /// Uses the normal quantile rather than Student-t; for the sample sizes
    /// this crate collects the difference is negligible. NaN below two
    /// observations.
    ///
    /// # Panics
    ///
    /// Panics if `confidence_level` is not strictly between 0 and 1.
    pub fn half_width(&self, confidence_level: f64) -> f64 {
        assert!(
            confidence_level > 0.0 && confidence_level < 1.0,
            "confidence level must be in (0, 1), got {confidence_level}"
        );
        let z = normal_inv_cdf(0.5 + confidence_level / 2.0);
        z * self.std_error()
    }

    /// Smallest observation; infinity before the first observation.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest observation; negative infinity before the first observation.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clears all collected state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
