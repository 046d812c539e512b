//! L'Ecuyer's MRG32k3a combined multiple recursive generator.
//!
//! This is the backing generator for every stream the crate dispenses. Its
//! period of roughly 2^191 is partitioned into streams spaced 2^127 steps
//! apart, each holding 2^51 substreams of length 2^76. Jumping between
//! substreams is a constant-time multiplication by a precomputed transition
//! matrix, so repositioning never replays the sequence.

use crate::error::{StreamError, StreamResult};
use crate::rng::{RandomStream, StreamControl};
use serde::{Deserialize, Serialize};

/// Modulus of the first component recurrence.
const M1: i64 = 4_294_967_087;
/// Modulus of the second component recurrence.
const M2: i64 = 4_294_944_443;
/// Multiplier of the lag-2 term in the first recurrence.
const A12: i64 = 1_403_580;
/// Negated multiplier of the lag-3 term in the first recurrence.
const A13N: i64 = 810_728;
/// Multiplier of the lag-1 term in the second recurrence.
const A21: i64 = 527_612;
/// Negated multiplier of the lag-3 term in the second recurrence.
const A23N: i64 = 1_370_589;
/// 1 / (M1 + 1); maps the combined state to the open unit interval.
const NORM: f64 = 2.328306549295727688e-10;

/// First-component transition matrix raised to the power 2^76.
const A1P76: [[u64; 3]; 3] = [
    [82_758_667, 1_871_391_091, 4_127_413_238],
    [3_672_831_523, 69_195_019, 1_871_391_091],
    [3_672_091_415, 3_528_743_235, 69_195_019],
];

/// Second-component transition matrix raised to the power 2^76.
const A2P76: [[u64; 3]; 3] = [
    [1_511_326_704, 3_759_209_742, 1_610_795_712],
    [4_292_754_251, 1_511_326_704, 3_889_917_532],
    [3_859_662_829, 4_292_754_251, 3_708_466_080],
];

/// First-component transition matrix raised to the power 2^127.
const A1P127: [[u64; 3]; 3] = [
    [2_427_906_178, 3_580_155_704, 949_770_784],
    [226_153_695, 1_230_515_664, 3_580_155_704],
    [1_988_835_001, 986_791_581, 1_230_515_664],
];

/// Second-component transition matrix raised to the power 2^127.
const A2P127: [[u64; 3]; 3] = [
    [1_464_411_153, 277_697_599, 1_610_723_613],
    [32_183_930, 1_464_411_153, 1_022_607_788],
    [2_824_425_944, 32_183_930, 2_093_834_863],
];

/// The seed every stream starts from unless one is supplied.
pub const DEFAULT_SEED: [u64; 6] = [12345; 6];

/// Multiplies a 3x3 matrix by a length-3 state slice, modulo `m`, in place.
fn mat_vec_mod(a: &[[u64; 3]; 3], v: &mut [u64], m: u64) {
    debug_assert_eq!(v.len(), 3);
    let mut out = [0u64; 3];
    for (row, slot) in a.iter().zip(out.iter_mut()) {
        let mut acc: u128 = 0;
        for (coef, x) in row.iter().zip(v.iter()) {
            acc += (u128::from(*coef) * u128::from(*x)) % u128::from(m);
        }
        *slot = (acc % u128::from(m)) as u64;
    }
    v.copy_from_slice(&out);
}

/// Checks that a six-value seed is a valid generator state.
fn validate_seed(seed: &[u64; 6]) -> StreamResult<()> {
    for (position, &value) in seed[..3].iter().enumerate() {
        if value >= M1 as u64 {
            return Err(StreamError::SeedOutOfRange {
                position,
                value,
                modulus: M1 as u64,
            });
        }
    }
    for (offset, &value) in seed[3..].iter().enumerate() {
        if value >= M2 as u64 {
            return Err(StreamError::SeedOutOfRange {
                position: offset + 3,
                value,
                modulus: M2 as u64,
            });
        }
    }
    if seed[..3].iter().all(|&s| s == 0) {
        return Err(StreamError::ZeroSeed { component: "first" });
    }
    if seed[3..].iter().all(|&s| s == 0) {
        return Err(StreamError::ZeroSeed {
            component: "second",
        });
    }
    Ok(())
}

/// A full snapshot of a stream's cursor.
///
/// Captures the stream origin (`ig`), the start of the current substream
/// (`bg`), the working state (`cg`), and the antithetic flag. Two streams
/// with equal states produce identical draws from that point on, which makes
/// this the concrete "cursor position" callers can record and compare.
/// Serializable so an experiment's position can be saved alongside results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamState {
    /// Seed at the beginning of the stream.
    pub ig: [u64; 6],
    /// Seed at the beginning of the current substream.
    pub bg: [u64; 6],
    /// Working state: the cursor itself.
    pub cg: [u64; 6],
    /// Whether draws are being mirrored.
    pub antithetic: bool,
}

/// A seekable MRG32k3a stream.
///
/// Holds three saved positions: `ig`, the state at the beginning of the
/// stream; `bg`, the state at the beginning of the current substream; and
/// `cg`, the working state the next draw consumes. The [`StreamControl`]
/// operations copy between these, and substream advancement multiplies `bg`
/// by the 2^76 jump matrices.
///
/// # Example
///
/// ```rust
/// use rngstream::{Mrg32k3a, RandomStream, StreamControl};
///
/// let mut stream = Mrg32k3a::new();
/// let first = stream.rand_u01();
/// let _ = stream.rand_u01();
/// stream.reset_start_stream();
/// assert_eq!(first, stream.rand_u01());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mrg32k3a {
    ig: [u64; 6],
    bg: [u64; 6],
    cg: [u64; 6],
    antithetic: bool,
}

impl Default for Mrg32k3a {
    fn default() -> Self {
        Self::new()
    }
}

impl Mrg32k3a {
    /// Creates a stream positioned at the default seed.
    pub fn new() -> Self {
        Self {
            ig: DEFAULT_SEED,
            bg: DEFAULT_SEED,
            cg: DEFAULT_SEED,
            antithetic: false,
        }
    }

    /// Creates a stream whose origin is the given six-value seed.
    ///
    /// The first three values seed the first recurrence and must be less
    /// than its modulus; the last three seed the second. Neither triple may
    /// be all zero.
    pub fn with_seed(seed: [u64; 6]) -> StreamResult<Self> {
        validate_seed(&seed)?;
        Ok(Self {
            ig: seed,
            bg: seed,
            cg: seed,
            antithetic: false,
        })
    }

    /// Re-seeds the stream, repositioning origin, substream, and cursor.
    pub fn set_seed(&mut self, seed: [u64; 6]) -> StreamResult<()> {
        validate_seed(&seed)?;
        self.ig = seed;
        self.bg = seed;
        self.cg = seed;
        Ok(())
    }

    /// Returns a snapshot of the cursor.
    pub fn state(&self) -> StreamState {
        StreamState {
            ig: self.ig,
            bg: self.bg,
            cg: self.cg,
            antithetic: self.antithetic,
        }
    }

    /// Restores the stream to a previously captured snapshot.
    pub fn restore(&mut self, state: &StreamState) {
        self.ig = state.ig;
        self.bg = state.bg;
        self.cg = state.cg;
        self.antithetic = state.antithetic;
    }

    /// Returns a stream at the same position with the antithetic flag
    /// flipped.
    ///
    /// Advancing the clone in lockstep with the original yields exactly
    /// paired draws `(u, 1 - u)`, the building block for antithetic-variates
    /// designs.
    pub fn antithetic_clone(&self) -> Self {
        let mut clone = self.clone();
        clone.antithetic = !self.antithetic;
        clone
    }

    /// Advances both recurrences one step and combines them.
    ///
    /// Returns the raw combined value in `[1, M1]`, before normalization and
    /// before the antithetic transform.
    fn next_raw(&mut self) -> u64 {
        let p1 = (A12 * self.cg[1] as i64 - A13N * self.cg[0] as i64).rem_euclid(M1);
        self.cg[0] = self.cg[1];
        self.cg[1] = self.cg[2];
        self.cg[2] = p1 as u64;

        let p2 = (A21 * self.cg[5] as i64 - A23N * self.cg[3] as i64).rem_euclid(M2);
        self.cg[3] = self.cg[4];
        self.cg[4] = self.cg[5];
        self.cg[5] = p2 as u64;

        if p1 > p2 {
            (p1 - p2) as u64
        } else {
            (p1 - p2 + M1) as u64
        }
    }
}

impl StreamControl for Mrg32k3a {
    fn reset_start_stream(&mut self) {
        self.bg = self.ig;
        self.cg = self.ig;
    }

    fn reset_start_substream(&mut self) {
        self.cg = self.bg;
    }

    /// Advances to the next substream.
    ///
    /// Each stream holds 2^51 substreams, so exhaustion of the substream
    /// space is unreachable in any real workload and this operation is
    /// infallible.
    fn advance_to_next_substream(&mut self) {
        mat_vec_mod(&A1P76, &mut self.bg[..3], M1 as u64);
        mat_vec_mod(&A2P76, &mut self.bg[3..], M2 as u64);
        self.cg = self.bg;
    }

    fn antithetic(&self) -> bool {
        self.antithetic
    }

    fn set_antithetic(&mut self, flag: bool) {
        self.antithetic = flag;
    }
}

impl RandomStream for Mrg32k3a {
    fn rand_u01(&mut self) -> f64 {
        let u = self.next_raw() as f64 * NORM;
        if self.antithetic { 1.0 - u } else { u }
    }
}

/// Interop with the rand ecosystem.
///
/// Words come from the raw recurrence output, so the antithetic flag does not
/// apply here. The combined value lies in `[1, M1]` rather than the full
/// 32-bit range, a bias below 2^-24 per word that is irrelevant for
/// simulation use.
impl rand::RngCore for Mrg32k3a {
    fn next_u32(&mut self) -> u32 {
        self.next_raw() as u32
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Advances a six-value seed by 2^127 steps, the spacing between streams.
///
/// Used by the provider to compute consecutive stream origins.
pub(crate) fn advance_seed_to_next_stream(seed: &mut [u64; 6]) {
    mat_vec_mod(&A1P127, &mut seed[..3], M1 as u64);
    mat_vec_mod(&A2P127, &mut seed[3..], M2 as u64);
}
