//! Simple stochastic processes driven by seekable streams.

use crate::error::{StreamError, StreamResult};
use crate::rng::mrg32k3a::Mrg32k3a;
use crate::rng::{RandomStream, StreamControl};

/// A two-state Markov chain over states 0 and 1.
///
/// The chain is parameterized by `p01`, the probability of moving to state 1
/// from state 0, and `p11`, the probability of staying in state 1. Each step
/// consumes exactly one draw from the owned stream, so replications of the
/// chain are reproducible through the usual stream controls: resetting the
/// chain's stream and its state replays the same trajectory.
#[derive(Debug, Clone)]
pub struct TwoStateMarkovChain {
    p01: f64,
    p11: f64,
    initial_state: u8,
    state: u8,
    stream: Mrg32k3a,
}

fn check_probability(name: &'static str, p: f64) -> StreamResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(StreamError::InvalidParameter {
            name,
            reason: format!("must be in [0, 1], got {p}"),
        })
    }
}

fn check_state(state: u8) -> StreamResult<()> {
    if state <= 1 {
        Ok(())
    } else {
        Err(StreamError::InvalidParameter {
            name: "state",
            reason: format!("must be 0 or 1, got {state}"),
        })
    }
}

impl TwoStateMarkovChain {
    /// Creates a chain in `initial_state` with the given transition
    /// probabilities.
    pub fn new(initial_state: u8, p11: f64, p01: f64, stream: Mrg32k3a) -> StreamResult<Self> {
        check_state(initial_state)?;
        check_probability("p11", p11)?;
        check_probability("p01", p01)?;
        Ok(Self {
            p01,
            p11,
            initial_state,
            state: initial_state,
            stream,
        })
    }

    /// Probability of transitioning to state 1 from state 0.
    pub fn p01(&self) -> f64 {
        self.p01
    }

    /// Probability of remaining in state 1.
    pub fn p11(&self) -> f64 {
        self.p11
    }

    /// Steady-state probability of being in state 1.
    pub fn p1(&self) -> f64 {
        self.p01 / (1.0 + self.p01 - self.p11)
    }

    /// Steady-state probability of being in state 0.
    pub fn p0(&self) -> f64 {
        1.0 - self.p1()
    }

    /// Current state of the chain.
    pub fn state(&self) -> u8 {
        self.state
    }

    /// Forces the chain into the given state.
    pub fn set_state(&mut self, state: u8) -> StreamResult<()> {
        check_state(state)?;
        self.state = state;
        Ok(())
    }

    /// The state the chain starts from on reset.
    pub fn initial_state(&self) -> u8 {
        self.initial_state
    }

    /// Changes the state used by [`reset`](Self::reset).
    pub fn set_initial_state(&mut self, state: u8) -> StreamResult<()> {
        check_state(state)?;
        self.initial_state = state;
        Ok(())
    }

    /// Replaces both transition probabilities.
    pub fn set_probabilities(&mut self, p11: f64, p01: f64) -> StreamResult<()> {
        check_probability("p11", p11)?;
        check_probability("p01", p01)?;
        self.p11 = p11;
        self.p01 = p01;
        Ok(())
    }

    /// Steps the chain once and returns the new state.
    pub fn sample(&mut self) -> u8 {
        let u = self.stream.rand_u01();
        let stay_or_enter = if self.state == 1 { self.p11 } else { self.p01 };
        self.state = if u <= stay_or_enter { 1 } else { 0 };
        self.state
    }

    /// Returns the chain to its initial state.
    ///
    /// The stream is left where it is; rewind it through [`StreamControl`]
    /// if the trajectory itself should replay.
    pub fn reset(&mut self) {
        self.state = self.initial_state;
    }
}

impl StreamControl for TwoStateMarkovChain {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(p11: f64, p01: f64) -> TwoStateMarkovChain {
        TwoStateMarkovChain::new(0, p11, p01, Mrg32k3a::new()).expect("valid chain")
    }

    #[test]
    fn construction_validates_arguments() {
        let s = Mrg32k3a::new();
        assert!(TwoStateMarkovChain::new(2, 0.5, 0.5, s.clone()).is_err());
        assert!(TwoStateMarkovChain::new(0, 1.5, 0.5, s.clone()).is_err());
        assert!(TwoStateMarkovChain::new(0, 0.5, -0.1, s).is_err());
    }

    #[test]
    fn steady_state_probabilities_sum_to_one() {
        let c = chain(0.8, 0.3);
        assert!((c.p0() + c.p1() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn occupancy_approaches_steady_state() {
        let mut c = chain(0.8, 0.3);
        let n = 200_000;
        let ones: u64 = (0..n).map(|_| u64::from(c.sample())).sum();
        let occupancy = ones as f64 / n as f64;
        assert!(
            (occupancy - c.p1()).abs() < 0.01,
            "occupancy {occupancy} vs steady state {}",
            c.p1()
        );
    }

    #[test]
    fn trajectory_replays_after_stream_and_state_reset() {
        let mut c = chain(0.7, 0.2);
        let first: Vec<u8> = (0..50).map(|_| c.sample()).collect();

        c.reset();
        c.reset_start_stream();
        let replay: Vec<u8> = (0..50).map(|_| c.sample()).collect();
        assert_eq!(first, replay);
    }

    #[test]
    fn reset_restores_initial_state_only() {
        let mut c = chain(0.9, 0.9);
        for _ in 0..10 {
            let _ = c.sample();
        }
        c.reset();
        assert_eq!(c.state(), c.initial_state());
    }

    #[test]
    fn degenerate_probabilities_pin_the_chain() {
        let mut absorbing =
            TwoStateMarkovChain::new(1, 1.0, 1.0, Mrg32k3a::new()).expect("valid chain");
        for _ in 0..20 {
            assert_eq!(absorbing.sample(), 1);
        }
    }
}
