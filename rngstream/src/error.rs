//! Error types for stream construction and configuration.

use thiserror::Error;

/// Errors that can occur when constructing or configuring streams.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// A seed component is not a valid residue for its modulus.
    #[error("seed value {value} at position {position} must be less than {modulus}")]
    SeedOutOfRange {
        /// Index of the offending value within the six-value seed.
        position: usize,
        /// The rejected value.
        value: u64,
        /// The modulus the value must stay below.
        modulus: u64,
    },

    /// One of the two seed triples is all zero, which would collapse the
    /// corresponding recurrence to a constant sequence.
    #[error("the {component} seed triple must not be all zero")]
    ZeroSeed {
        /// Which recurrence component the triple seeds ("first" or "second").
        component: &'static str,
    },

    /// A distribution or configuration parameter is out of range.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Name of the rejected parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A stream was requested by an index the provider does not dispense.
    #[error("no stream with index {index} (stream indices start at 1)")]
    UnknownStream {
        /// The rejected index.
        index: usize,
    },
}

/// A type alias for `Result<T, StreamError>`.
pub type StreamResult<T> = Result<T, StreamError>;
