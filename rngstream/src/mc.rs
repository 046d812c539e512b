//! Monte Carlo integration of one-dimensional functions.
//!
//! Estimates ∫ h(x) w(x) dx by sampling a variate with density w and
//! averaging h at the samples. The caller supplies h already weighted for the
//! chosen sampler: to integrate g over (a, b) with a `UniformVariate(a, b)`
//! sampler, pass `h(x) = (b - a) * g(x)`; with a general sampler of density
//! w, pass `h(x) = g(x) / w(x)`. This factoring also covers importance
//! sampling.
//!
//! Antithetic sampling is on by default. Each observation then averages an
//! antithetic pair, so the reported sample count refers to pairs and each
//! observation costs two function evaluations.

use crate::error::{StreamError, StreamResult};
use crate::statistic::Statistic;
use crate::variate::Variate;
use tracing::debug;

/// Default confidence level for the stopping criterion.
const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.99;
/// Default desired absolute error on the estimate.
const DEFAULT_DESIRED_ABS_ERROR: f64 = 0.0001;
/// Default pilot sample size.
const DEFAULT_INITIAL_SAMPLE_SIZE: u64 = 100;
/// Default cap on the total number of observations.
const DEFAULT_MAX_SAMPLE_SIZE: u64 = 100_000;

/// A Monte Carlo estimator for a 1-D integral.
///
/// # Example
///
/// ```rust
/// use rngstream::{Mc1dIntegrator, Mrg32k3a, UniformVariate};
/// use std::f64::consts::PI;
///
/// // Integrate sin over (0, pi): sample U(0, pi), so h(x) = pi * sin(x).
/// let sampler = UniformVariate::new(0.0, PI, Mrg32k3a::new()).unwrap();
/// let mut mc = Mc1dIntegrator::new(|x: f64| PI * x.sin(), sampler);
/// let estimate = mc.evaluate();
/// assert!((estimate - 2.0).abs() < 0.01);
/// ```
pub struct Mc1dIntegrator<F, V> {
    function: F,
    sampler: V,
    antithetic_sampler: Option<V>,
    statistic: Statistic,
    confidence_level: f64,
    desired_abs_error: f64,
    initial_sample_size: u64,
    max_sample_size: u64,
    reset_stream_option: bool,
}

impl<F, V> Mc1dIntegrator<F, V>
where
    F: Fn(f64) -> f64,
    V: Variate,
{
    /// Creates an estimator with antithetic sampling enabled.
    pub fn new(function: F, sampler: V) -> Self {
        Self::with_antithetic_option(function, sampler, true)
    }

    /// Creates an estimator, choosing whether to use antithetic sampling.
    pub fn with_antithetic_option(function: F, sampler: V, antithetic: bool) -> Self {
        let antithetic_sampler = antithetic.then(|| sampler.antithetic_instance());
        Self {
            function,
            sampler,
            antithetic_sampler,
            statistic: Statistic::new(),
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            desired_abs_error: DEFAULT_DESIRED_ABS_ERROR,
            initial_sample_size: DEFAULT_INITIAL_SAMPLE_SIZE,
            max_sample_size: DEFAULT_MAX_SAMPLE_SIZE,
            reset_stream_option: false,
        }
    }

    /// Sets the confidence level used by the stopping criterion.
    pub fn set_confidence_level(&mut self, level: f64) -> StreamResult<()> {
        if level <= 0.0 || level >= 1.0 {
            return Err(StreamError::InvalidParameter {
                name: "confidence level",
                reason: format!("must be in (0, 1), got {level}"),
            });
        }
        self.confidence_level = level;
        Ok(())
    }

    /// Sets the absolute error the estimate should reach.
    ///
    /// Small values can require very large sample sizes; the cap set by
    /// [`set_max_sample_size`](Self::set_max_sample_size) still applies.
    pub fn set_desired_abs_error(&mut self, error: f64) -> StreamResult<()> {
        if error <= 0.0 {
            return Err(StreamError::InvalidParameter {
                name: "desired absolute error",
                reason: format!("must be positive, got {error}"),
            });
        }
        self.desired_abs_error = error;
        Ok(())
    }

    /// Sets the pilot sample size; at least two observations are required to
    /// estimate a variance.
    pub fn set_initial_sample_size(&mut self, n: u64) -> StreamResult<()> {
        if n < 2 {
            return Err(StreamError::InvalidParameter {
                name: "initial sample size",
                reason: format!("must be at least 2, got {n}"),
            });
        }
        self.initial_sample_size = n;
        Ok(())
    }

    /// Caps the total number of observations an evaluation may collect.
    pub fn set_max_sample_size(&mut self, n: u64) -> StreamResult<()> {
        if n < self.initial_sample_size {
            return Err(StreamError::InvalidParameter {
                name: "max sample size",
                reason: format!(
                    "must be at least the initial sample size {}, got {n}",
                    self.initial_sample_size
                ),
            });
        }
        self.max_sample_size = n;
        Ok(())
    }

    /// When set, each evaluation rewinds the sampler's stream first, so
    /// repeated evaluations within one run reproduce the same estimate. Off
    /// by default.
    pub fn set_reset_stream_option(&mut self, reset: bool) {
        self.reset_stream_option = reset;
    }

    /// Whether antithetic sampling is in use.
    pub fn antithetic_enabled(&self) -> bool {
        self.antithetic_sampler.is_some()
    }

    /// The statistics collected by the last evaluation.
    pub fn statistic(&self) -> &Statistic {
        &self.statistic
    }

    /// Whether the last evaluation met the desired error at the configured
    /// confidence level.
    pub fn error_criterion_met(&self) -> bool {
        let hw = self.statistic.half_width(self.confidence_level);
        // NaN (too little data) compares false, meaning: not met.
        hw <= self.desired_abs_error
    }

    /// Runs only the pilot sample and returns the total sample size the
    /// pilot predicts is needed to meet the error criterion.
    pub fn run_initial_sample(&mut self) -> u64 {
        self.begin_evaluation();
        self.sample(self.initial_sample_size);
        let estimate = self.estimated_sample_size();
        debug!(
            pilot = self.statistic.count(),
            estimated_total = estimate,
            "pilot sample complete"
        );
        estimate
    }

    /// Runs the full evaluation and returns the estimate of the integral.
    ///
    /// Collects the pilot sample, estimates the required sample size from
    /// it, then samples to the minimum of that estimate and the configured
    /// maximum, stopping early once the error criterion is met.
    pub fn evaluate(&mut self) -> f64 {
        let estimated = self.run_initial_sample();
        if !self.error_criterion_met() {
            let target = estimated.min(self.max_sample_size);
            let remaining = target.saturating_sub(self.statistic.count());
            self.sample(remaining);
        }
        debug!(
            observations = self.statistic.count(),
            estimate = self.statistic.average(),
            criterion_met = self.error_criterion_met(),
            "evaluation complete"
        );
        self.statistic.average()
    }

    /// Prepares collector and streams for a fresh evaluation.
    fn begin_evaluation(&mut self) {
        self.statistic.reset();
        if self.reset_stream_option {
            self.sampler.reset_start_stream();
            if let Some(anti) = &mut self.antithetic_sampler {
                anti.reset_start_stream();
            }
        }
    }

    /// Collects up to `n` observations, stopping early once the error
    /// criterion is satisfied.
    fn sample(&mut self, n: u64) {
        for _ in 0..n {
            let y = match &mut self.antithetic_sampler {
                Some(anti) => {
                    let y1 = (self.function)(self.sampler.sample());
                    let y2 = (self.function)(anti.sample());
                    (y1 + y2) / 2.0
                }
                None => (self.function)(self.sampler.sample()),
            };
            self.statistic.collect(y);
            if self.error_criterion_met() {
                return;
            }
        }
    }

    /// Sample size the collected variance predicts is needed to reach the
    /// desired error. Zero when the criterion is already met.
    fn estimated_sample_size(&self) -> u64 {
        if self.error_criterion_met() {
            return 0;
        }
        let hw = self.statistic.half_width(self.confidence_level);
        if hw.is_nan() {
            return self.max_sample_size;
        }
        let n = self.statistic.count() as f64;
        let needed = n * (hw / self.desired_abs_error).powi(2);
        needed.ceil() as u64
    }
}
