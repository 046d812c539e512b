//! Stream abstractions: the position-control contract and the draw interface.
//!
//! The traits here separate two concerns. [`StreamControl`] is the minimal
//! capability any seekable stream must expose so callers can deterministically
//! rewind, segment, and mirror it, without seeing the stream's internal state
//! representation. [`RandomStream`] layers the actual draw operations on top.
//! Simulation code that only replays or repositions streams can depend on
//! `StreamControl` alone.

pub mod mrg32k3a;
pub mod provider;

/// Controls positioning within a pseudo-random number stream.
///
/// A stream's cursor is addressed by three coordinates: the stream origin
/// (fixed at construction), the current substream, and the offset within that
/// substream. The three repositioning operations below are the only exposed
/// transitions besides drawing; draws advance the offset by one and never
/// carry into the next substream implicitly.
///
/// Implementations are not thread-safe by default: all operations take
/// `&mut self`, and a stream shared across threads needs external
/// synchronization. Operations issued sequentially on one instance take
/// effect in issuance order.
pub trait StreamControl {
    /// Repositions the cursor at the beginning of the stream.
    ///
    /// This is the same location the stream held when it was created and
    /// initialized, no matter how far the cursor has advanced since. The
    /// antithetic setting is preserved.
    fn reset_start_stream(&mut self);

    /// Repositions the cursor at the start of the current substream.
    ///
    /// The substream index itself is unchanged, so calling this twice in a
    /// row is the same as calling it once. The antithetic setting is
    /// preserved.
    fn reset_start_substream(&mut self);

    /// Positions the cursor at the beginning of the next substream.
    ///
    /// The substream index advances by exactly one. N calls from the initial
    /// position always land on the same location, independent of any draws
    /// made in between.
    fn advance_to_next_substream(&mut self);

    /// Returns whether draws are currently transformed to antithetic variates.
    fn antithetic(&self) -> bool;

    /// Turns the antithetic transform on or off for subsequent draws.
    ///
    /// When on, a uniform draw `u` is delivered as `1 - u`. Toggling the flag
    /// never moves the cursor and never touches substream state.
    fn set_antithetic(&mut self, flag: bool);
}

/// A seekable stream that can actually be drawn from.
pub trait RandomStream: StreamControl {
    /// Draws the next value as a uniform over the open interval (0, 1).
    ///
    /// The antithetic transform, if enabled, is applied to the returned
    /// value. Never returns exactly 0.0 or 1.0.
    fn rand_u01(&mut self) -> f64;

    /// Draws a uniform integer over the closed range `[i, j]`.
    ///
    /// Consumes exactly one underlying draw.
    ///
    /// # Panics
    ///
    /// Panics if `i > j`.
    fn rand_int(&mut self, i: i32, j: i32) -> i32 {
        assert!(i <= j, "rand_int requires i <= j, got [{i}, {j}]");
        let span = (j as i64 - i as i64) + 1;
        let v = i as i64 + (self.rand_u01() * span as f64) as i64;
        // rand_u01 is strictly below 1.0, but guard the float rounding edge.
        v.min(j as i64) as i32
    }
}
