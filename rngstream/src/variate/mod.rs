//! Random variables driven by seekable streams.
//!
//! Every variate owns its stream and samples by inverting a single uniform
//! draw, so one sample always costs exactly one position in the stream. That
//! property is what makes common-random-numbers and antithetic designs work:
//! two synchronized streams stay synchronized no matter which distributions
//! consume them. Distributions that would need rejection loops (and a
//! data-dependent number of draws) are deliberately absent.
//!
//! Because a variate is also a [`StreamControl`], resetting or advancing a
//! variate repositions its underlying stream directly:
//!
//! ```rust
//! use rngstream::{Mrg32k3a, StreamControl, UniformVariate, Variate};
//!
//! let mut rv = UniformVariate::new(0.0, 10.0, Mrg32k3a::new()).unwrap();
//! let first = rv.sample();
//! rv.reset_start_stream();
//! assert_eq!(first, rv.sample());
//! ```

pub mod invcdf;

use crate::error::{StreamError, StreamResult};
use crate::rng::mrg32k3a::Mrg32k3a;
use crate::rng::{RandomStream, StreamControl};
use invcdf::normal_inv_cdf;

/// A random variable attached to a seekable stream.
pub trait Variate: StreamControl {
    /// Draws the next sample, consuming exactly one u01 draw.
    fn sample(&mut self) -> f64;

    /// Draws `n` samples into a vector.
    fn sample_vec(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.sample()).collect()
    }

    /// Returns a variate with the same parameters whose stream is an
    /// antithetic clone positioned at the same cursor.
    ///
    /// Sampling the pair in lockstep yields negatively correlated draws.
    fn antithetic_instance(&self) -> Self
    where
        Self: Sized;
}

/// Implements [`StreamControl`] by delegating to the owned `stream` field.
macro_rules! delegate_stream_control {
    ($ty:ident) => {
        impl StreamControl for $ty {
            fn reset_start_stream(&mut self) {
                self.stream.reset_start_stream();
            }

            fn reset_start_substream(&mut self) {
                self.stream.reset_start_substream();
            }

            fn advance_to_next_substream(&mut self) {
                self.stream.advance_to_next_substream();
            }

            fn antithetic(&self) -> bool {
                self.stream.antithetic()
            }

            fn set_antithetic(&mut self, flag: bool) {
                self.stream.set_antithetic(flag);
            }
        }
    };
}

fn require(cond: bool, name: &'static str, reason: &str) -> StreamResult<()> {
    if cond {
        Ok(())
    } else {
        Err(StreamError::InvalidParameter {
            name,
            reason: reason.to_string(),
        })
    }
}

/// Uniform over `[lower, upper)`.
#[derive(Debug, Clone)]
pub struct UniformVariate {
    lower: f64,
    upper: f64,
    stream: Mrg32k3a,
}

impl UniformVariate {
    /// Creates a uniform variate over `[lower, upper)`; requires
    /// `lower < upper`.
    pub fn new(lower: f64, upper: f64, stream: Mrg32k3a) -> StreamResult<Self> {
        require(
            lower < upper,
            "uniform bounds",
            &format!("lower {lower} must be less than upper {upper}"),
        )?;
        Ok(Self {
            lower,
            upper,
            stream,
        })
    }

    /// Lower bound of the interval.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound of the interval.
    pub fn upper(&self) -> f64 {
        self.upper
    }
}

delegate_stream_control!(UniformVariate);

impl Variate for UniformVariate {
    fn sample(&mut self) -> f64 {
        self.lower + (self.upper - self.lower) * self.stream.rand_u01()
    }

    fn antithetic_instance(&self) -> Self {
        Self {
            stream: self.stream.antithetic_clone(),
            ..self.clone()
        }
    }
}

/// Exponential with the given mean.
#[derive(Debug, Clone)]
pub struct ExponentialVariate {
    mean: f64,
    stream: Mrg32k3a,
}

impl ExponentialVariate {
    /// Creates an exponential variate; requires `mean > 0`.
    pub fn new(mean: f64, stream: Mrg32k3a) -> StreamResult<Self> {
        require(mean > 0.0, "exponential mean", "must be positive")?;
        Ok(Self { mean, stream })
    }

    /// Mean of the distribution.
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

delegate_stream_control!(ExponentialVariate);

impl Variate for ExponentialVariate {
    fn sample(&mut self) -> f64 {
        -self.mean * (1.0 - self.stream.rand_u01()).ln()
    }

    fn antithetic_instance(&self) -> Self {
        Self {
            stream: self.stream.antithetic_clone(),
            ..self.clone()
        }
    }
}

/// Normal with the given mean and standard deviation.
#[derive(Debug, Clone)]
pub struct NormalVariate {
    mean: f64,
    std_dev: f64,
    stream: Mrg32k3a,
}

impl NormalVariate {
    /// Creates a normal variate; requires `std_dev > 0`.
    pub fn new(mean: f64, std_dev: f64, stream: Mrg32k3a) -> StreamResult<Self> {
        require(
            std_dev > 0.0,
            "normal standard deviation",
            "must be positive",
        )?;
        Ok(Self {
            mean,
            std_dev,
            stream,
        })
    }

    /// Mean of the distribution.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of the distribution.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

delegate_stream_control!(NormalVariate);

impl Variate for NormalVariate {
    fn sample(&mut self) -> f64 {
        self.mean + self.std_dev * normal_inv_cdf(self.stream.rand_u01())
    }

    fn antithetic_instance(&self) -> Self {
        Self {
            stream: self.stream.antithetic_clone(),
            ..self.clone()
        }
    }
}

/// Weibull with the given shape and scale.
#[derive(Debug, Clone)]
pub struct WeibullVariate {
    shape: f64,
    scale: f64,
    stream: Mrg32k3a,
}

impl WeibullVariate {
    /// Creates a Weibull variate; requires `shape > 0` and `scale > 0`.
    pub fn new(shape: f64, scale: f64, stream: Mrg32k3a) -> StreamResult<Self> {
        require(shape > 0.0, "weibull shape", "must be positive")?;
        require(scale > 0.0, "weibull scale", "must be positive")?;
        Ok(Self {
            shape,
            scale,
            stream,
        })
    }

    /// Shape parameter.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

delegate_stream_control!(WeibullVariate);

impl Variate for WeibullVariate {
    fn sample(&mut self) -> f64 {
        let u = self.stream.rand_u01();
        self.scale * (-(1.0 - u).ln()).powf(1.0 / self.shape)
    }

    fn antithetic_instance(&self) -> Self {
        Self {
            stream: self.stream.antithetic_clone(),
            ..self.clone()
        }
    }
}

/// Poisson with the given mean.
///
/// Samples by inverting the CDF with a sequential search, so one sample is
/// still one draw. Above a mean of about 700 the search's running product
/// underflows; there the variate switches to a rounded normal approximation,
/// which at that scale is accurate to well under the distribution's
/// granularity.
#[derive(Debug, Clone)]
pub struct PoissonVariate {
    mean: f64,
    stream: Mrg32k3a,
}

/// Mean beyond which sequential-search inversion underflows.
const POISSON_INVERSION_LIMIT: f64 = 700.0;

impl PoissonVariate {
    /// Creates a Poisson variate; requires `mean > 0`.
    pub fn new(mean: f64, stream: Mrg32k3a) -> StreamResult<Self> {
        require(mean > 0.0, "poisson mean", "must be positive")?;
        Ok(Self { mean, stream })
    }

    /// Mean of the distribution.
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

delegate_stream_control!(PoissonVariate);

impl Variate for PoissonVariate {
    fn sample(&mut self) -> f64 {
        let u = self.stream.rand_u01();
        if self.mean > POISSON_INVERSION_LIMIT {
            let z = normal_inv_cdf(u);
            return (self.mean + self.mean.sqrt() * z).round().max(0.0);
        }
        let mut p = (-self.mean).exp();
        let mut cdf = p;
        let mut n = 0u64;
        while u > cdf {
            n += 1;
            p *= self.mean / n as f64;
            cdf += p;
        }
        n as f64
    }

    fn antithetic_instance(&self) -> Self {
        Self {
            stream: self.stream.antithetic_clone(),
            ..self.clone()
        }
    }
}

/// Bernoulli returning 1.0 with probability `p`, else 0.0.
#[derive(Debug, Clone)]
pub struct BernoulliVariate {
    p: f64,
    stream: Mrg32k3a,
}

impl BernoulliVariate {
    /// Creates a Bernoulli variate; requires `p` in `[0, 1]`.
    pub fn new(p: f64, stream: Mrg32k3a) -> StreamResult<Self> {
        require(
            (0.0..=1.0).contains(&p),
            "bernoulli probability",
            "must be in [0, 1]",
        )?;
        Ok(Self { p, stream })
    }

    /// Success probability.
    pub fn p(&self) -> f64 {
        self.p
    }
}

delegate_stream_control!(BernoulliVariate);

impl Variate for BernoulliVariate {
    fn sample(&mut self) -> f64 {
        if self.stream.rand_u01() <= self.p {
            1.0
        } else {
            0.0
        }
    }

    fn antithetic_instance(&self) -> Self {
        Self {
            stream: self.stream.antithetic_clone(),
            ..self.clone()
        }
    }
}

/// Equally likely pick from a fixed set of values.
#[derive(Debug, Clone)]
pub struct EmpiricalVariate {
    values: Vec<f64>,
    stream: Mrg32k3a,
}

impl EmpiricalVariate {
    /// Creates an empirical variate over `values`; requires a non-empty set.
    pub fn new(values: Vec<f64>, stream: Mrg32k3a) -> StreamResult<Self> {
        require(!values.is_empty(), "empirical values", "must not be empty")?;
        Ok(Self { values, stream })
    }

    /// The values the variate draws from.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

delegate_stream_control!(EmpiricalVariate);

impl Variate for EmpiricalVariate {
    fn sample(&mut self) -> f64 {
        let u = self.stream.rand_u01();
        // u is strictly below 1.0; min guards the float rounding edge.
        let idx = ((u * self.values.len() as f64) as usize).min(self.values.len() - 1);
        self.values[idx]
    }

    fn antithetic_instance(&self) -> Self {
        Self {
            stream: self.stream.antithetic_clone(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> Mrg32k3a {
        Mrg32k3a::new()
    }

    #[test]
    fn uniform_stays_in_bounds() {
        let mut rv = UniformVariate::new(3.0, 7.0, stream()).expect("valid");
        for _ in 0..1_000 {
            let x = rv.sample();
            assert!((3.0..7.0).contains(&x), "out of bounds: {x}");
        }
    }

    #[test]
    fn constructors_validate_parameters() {
        assert!(UniformVariate::new(1.0, 1.0, stream()).is_err());
        assert!(ExponentialVariate::new(0.0, stream()).is_err());
        assert!(NormalVariate::new(0.0, -1.0, stream()).is_err());
        assert!(WeibullVariate::new(-2.0, 1.0, stream()).is_err());
        assert!(PoissonVariate::new(0.0, stream()).is_err());
        assert!(BernoulliVariate::new(1.5, stream()).is_err());
        assert!(EmpiricalVariate::new(vec![], stream()).is_err());
    }

    #[test]
    fn one_draw_per_sample_keeps_streams_synchronized() {
        // Two variates over different distributions but identical streams
        // must consume positions in lockstep.
        let mut expo = ExponentialVariate::new(2.0, stream()).expect("valid");
        let mut norm = NormalVariate::new(0.0, 1.0, stream()).expect("valid");

        for _ in 0..25 {
            let _ = expo.sample();
            let _ = norm.sample();
        }

        let mut raw = stream();
        for _ in 0..25 {
            let _ = raw.rand_u01();
        }

        // After 25 samples each, both variates sit 25 draws into the stream.
        let mut probe_expo = ExponentialVariate::new(2.0, raw.clone()).expect("valid");
        assert_eq!(expo.sample(), probe_expo.sample());
    }

    #[test]
    fn antithetic_instance_mirrors_the_stream() {
        let mut rv = UniformVariate::new(0.0, 1.0, stream()).expect("valid");
        let mut anti = rv.antithetic_instance();
        for _ in 0..50 {
            let x = rv.sample();
            let y = anti.sample();
            assert!((x + y - 1.0).abs() < 1e-12, "not mirrored: {x} {y}");
        }
    }

    #[test]
    fn variate_stream_control_replays_samples() {
        let mut rv = WeibullVariate::new(1.5, 2.0, stream()).expect("valid");
        let first = rv.sample_vec(4);
        rv.reset_start_stream();
        assert_eq!(first, rv.sample_vec(4));

        rv.advance_to_next_substream();
        let sub = rv.sample_vec(4);
        rv.reset_start_substream();
        assert_eq!(sub, rv.sample_vec(4));
    }

    #[test]
    fn exponential_sample_mean_near_parameter() {
        let mut rv = ExponentialVariate::new(5.0, stream()).expect("valid");
        let n = 20_000;
        let total: f64 = rv.sample_vec(n).iter().sum();
        let mean = total / n as f64;
        assert!((mean - 5.0).abs() < 0.2, "sample mean off: {mean}");
    }

    #[test]
    fn normal_sample_moments() {
        let mut rv = NormalVariate::new(10.0, 2.0, stream()).expect("valid");
        let samples = rv.sample_vec(20_000);
        let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 10.0).abs() < 0.1, "sample mean off: {mean}");
    }

    #[test]
    fn poisson_small_mean_counts() {
        let mut rv = PoissonVariate::new(3.0, stream()).expect("valid");
        let samples = rv.sample_vec(20_000);
        assert!(samples.iter().all(|&x| x >= 0.0 && x.fract() == 0.0));
        let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 3.0).abs() < 0.1, "sample mean off: {mean}");
    }

    #[test]
    fn poisson_large_mean_uses_approximation_without_hanging() {
        let mut rv = PoissonVariate::new(1_000.0, stream()).expect("valid");
        let samples = rv.sample_vec(2_000);
        let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 1_000.0).abs() < 5.0, "sample mean off: {mean}");
    }

    #[test]
    fn bernoulli_frequency_tracks_p() {
        let mut rv = BernoulliVariate::new(0.3, stream()).expect("valid");
        let hits: f64 = rv.sample_vec(20_000).iter().sum();
        let freq = hits / 20_000.0;
        assert!((freq - 0.3).abs() < 0.02, "frequency off: {freq}");
    }

    #[test]
    fn empirical_only_returns_supplied_values() {
        let values = vec![1.0, 4.0, 9.0];
        let mut rv = EmpiricalVariate::new(values.clone(), stream()).expect("valid");
        for x in rv.sample_vec(500) {
            assert!(values.contains(&x), "unexpected value: {x}");
        }
    }
}
