//! # rngstream
//!
//! Seekable pseudo-random number streams for simulation.
//!
//! The crate is built around a small positional-control contract,
//! [`StreamControl`]: any stream can be rewound to its origin, rewound to the
//! start of its current substream, advanced to the next substream, and asked
//! to mirror its draws (antithetic variates). Everything else layers on top:
//!
//! - [`Mrg32k3a`] — a concrete stream with constant-time jumps between
//!   substreams, backed by L'Ecuyer's MRG32k3a generator
//! - [`Mrg32k3aProvider`] — dispenses well-spaced streams so every component
//!   of a model can own its own source of randomness
//! - [`variate`] — inverse-transform random variables that consume exactly
//!   one draw per sample, keeping paired experiment designs synchronized
//! - [`Statistic`] and [`Mc1dIntegrator`] — collection and Monte Carlo
//!   integration with antithetic variance reduction
//!
//! The point of all of it is reproducibility: the same seed always yields the
//! same draws, substream N is always the same place, and separate model
//! components never perturb each other's sequences.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

/// Error types and utilities for stream operations.
pub mod error;
/// Monte Carlo integration of one-dimensional functions.
pub mod mc;
/// Stochastic processes driven by seekable streams.
pub mod process;
/// Stream traits, the MRG32k3a generator, and stream dispensing.
pub mod rng;
/// Online collection of summary statistics.
pub mod statistic;
/// Random variables built on inverse-transform sampling.
pub mod variate;

pub use error::{StreamError, StreamResult};
pub use mc::Mc1dIntegrator;
pub use process::TwoStateMarkovChain;
pub use rng::mrg32k3a::{Mrg32k3a, StreamState};
pub use rng::provider::{Mrg32k3aProvider, StreamProvider};
pub use rng::{RandomStream, StreamControl};
pub use statistic::Statistic;
pub use variate::{
    BernoulliVariate, EmpiricalVariate, ExponentialVariate, NormalVariate, PoissonVariate,
    UniformVariate, Variate, WeibullVariate,
};
