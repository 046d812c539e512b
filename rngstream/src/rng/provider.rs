//! Stream dispensing: a factory that hands out well-spaced streams.
//!
//! Replications, workloads, and random variables should each get their own
//! stream rather than sharing one, so that adding a draw in one place never
//! perturbs the sequence seen by another. The provider guarantees that the
//! n-th stream it dispenses is always the same stream, run after run, as long
//! as the package seed is unchanged.

use crate::error::{StreamError, StreamResult};
use crate::rng::mrg32k3a::{DEFAULT_SEED, Mrg32k3a, advance_seed_to_next_stream};
use tracing::debug;

/// Dispenses a deterministic sequence of streams.
///
/// Stream indices are 1-based: `stream(1)` is the first stream the provider
/// ever hands out, and `next_stream()` after k dispenses returns stream k+1.
pub trait StreamProvider {
    /// Returns the next stream in the dispensing sequence.
    fn next_stream(&mut self) -> Mrg32k3a;

    /// Returns a fresh copy of the `index`-th stream of the sequence,
    /// creating any intermediate streams as needed.
    ///
    /// The copy is positioned at the stream's origin. Requesting the same
    /// index twice yields identically positioned streams.
    fn stream(&mut self, index: usize) -> StreamResult<Mrg32k3a>;

    /// Number of streams dispensed so far (equivalently, the highest index
    /// that `stream` can serve without creating new streams).
    fn stream_count(&self) -> usize;

    /// Rewinds the dispenser so `next_stream` starts over from stream 1.
    ///
    /// Streams already handed out are unaffected.
    fn reset_sequence(&mut self);
}

/// The default provider: consecutive MRG32k3a streams spaced 2^127 steps
/// apart.
///
/// # Example
///
/// ```rust
/// use rngstream::{Mrg32k3aProvider, RandomStream, StreamProvider};
///
/// let mut provider = Mrg32k3aProvider::new();
/// let mut first = provider.next_stream();
/// let mut second = provider.next_stream();
/// assert_ne!(first.rand_u01(), second.rand_u01());
/// ```
#[derive(Debug, Clone)]
pub struct Mrg32k3aProvider {
    package_seed: [u64; 6],
    /// Origins of every stream created so far, in dispensing order.
    origins: Vec<[u64; 6]>,
    next_index: usize,
}

impl Default for Mrg32k3aProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Mrg32k3aProvider {
    /// Creates a provider using the default package seed.
    pub fn new() -> Self {
        Self {
            package_seed: DEFAULT_SEED,
            origins: Vec::new(),
            next_index: 0,
        }
    }

    /// Creates a provider whose first stream originates at `seed`.
    ///
    /// The seed is validated the same way as a stream seed.
    pub fn with_package_seed(seed: [u64; 6]) -> StreamResult<Self> {
        // Construct a throwaway stream to reuse the seed checks.
        Mrg32k3a::with_seed(seed)?;
        Ok(Self {
            package_seed: seed,
            origins: Vec::new(),
            next_index: 0,
        })
    }

    /// The package seed the dispensing sequence starts from.
    pub fn package_seed(&self) -> [u64; 6] {
        self.package_seed
    }

    /// Ensures origins for streams 1..=index exist.
    fn grow_to(&mut self, index: usize) {
        while self.origins.len() < index {
            let origin = match self.origins.last() {
                Some(prev) => {
                    let mut next = *prev;
                    advance_seed_to_next_stream(&mut next);
                    next
                }
                None => self.package_seed,
            };
            self.origins.push(origin);
            debug!(index = self.origins.len(), "created stream origin");
        }
    }

    /// Builds a stream from a known-valid origin.
    fn stream_at(&self, index: usize) -> Mrg32k3a {
        let mut stream = Mrg32k3a::new();
        // Origins are jumps from a validated package seed, always valid.
        stream
            .set_seed(self.origins[index - 1])
            .unwrap_or_else(|_| unreachable!("provider origins are valid seeds"));
        stream
    }
}

impl StreamProvider for Mrg32k3aProvider {
    fn next_stream(&mut self) -> Mrg32k3a {
        self.next_index += 1;
        self.grow_to(self.next_index);
        debug!(index = self.next_index, "dispensing stream");
        self.stream_at(self.next_index)
    }

    fn stream(&mut self, index: usize) -> StreamResult<Mrg32k3a> {
        if index == 0 {
            return Err(StreamError::UnknownStream { index });
        }
        self.grow_to(index);
        Ok(self.stream_at(index))
    }

    fn stream_count(&self) -> usize {
        self.origins.len()
    }

    fn reset_sequence(&mut self) {
        self.next_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomStream;

    #[test]
    fn dispensing_sequence_is_deterministic() {
        let mut p1 = Mrg32k3aProvider::new();
        let mut p2 = Mrg32k3aProvider::new();

        for _ in 0..5 {
            let mut a = p1.next_stream();
            let mut b = p2.next_stream();
            assert_eq!(a.rand_u01(), b.rand_u01());
        }
    }

    #[test]
    fn streams_by_index_match_dispensing_order() {
        let mut provider = Mrg32k3aProvider::new();
        let dispensed: Vec<_> = (0..3).map(|_| provider.next_stream()).collect();

        for (i, expected) in dispensed.iter().enumerate() {
            let mut by_index = provider.stream(i + 1).expect("valid index");
            let mut expected = expected.clone();
            assert_eq!(expected.rand_u01(), by_index.rand_u01());
        }
    }

    #[test]
    fn stream_by_index_creates_intermediates() {
        let mut sparse = Mrg32k3aProvider::new();
        let mut via_index = sparse.stream(4).expect("valid index");
        assert_eq!(sparse.stream_count(), 4);

        let mut dense = Mrg32k3aProvider::new();
        for _ in 0..3 {
            let _ = dense.next_stream();
        }
        let mut via_next = dense.next_stream();

        assert_eq!(via_index.rand_u01(), via_next.rand_u01());
    }

    #[test]
    fn distinct_streams_differ() {
        let mut provider = Mrg32k3aProvider::new();
        let mut a = provider.next_stream();
        let mut b = provider.next_stream();
        let draws_a: Vec<f64> = (0..10).map(|_| a.rand_u01()).collect();
        let draws_b: Vec<f64> = (0..10).map(|_| b.rand_u01()).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn index_zero_is_rejected() {
        let mut provider = Mrg32k3aProvider::new();
        assert!(matches!(
            provider.stream(0),
            Err(StreamError::UnknownStream { index: 0 })
        ));
    }

    #[test]
    fn reset_sequence_restarts_dispensing() {
        let mut provider = Mrg32k3aProvider::new();
        let mut first = provider.next_stream();
        let _ = provider.next_stream();

        provider.reset_sequence();
        let mut again = provider.next_stream();
        assert_eq!(first.rand_u01(), again.rand_u01());
    }

    #[test]
    fn custom_package_seed_shifts_every_stream() {
        let mut default_provider = Mrg32k3aProvider::new();
        let mut custom =
            Mrg32k3aProvider::with_package_seed([7, 7, 7, 7, 7, 7]).expect("valid seed");
        let mut a = default_provider.next_stream();
        let mut b = custom.next_stream();
        assert_ne!(a.rand_u01(), b.rand_u01());
    }

    #[test]
    fn invalid_package_seed_is_rejected() {
        assert!(Mrg32k3aProvider::with_package_seed([0, 0, 0, 1, 1, 1]).is_err());
    }
}
