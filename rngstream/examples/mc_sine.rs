//! Estimates the integral of sin(x) over (0, pi) by Monte Carlo.
//!
//! Samples U(0, pi), so the function to average is pi * sin(x). Runs the
//! pilot sample first to show the predicted effort, then the full
//! evaluation with antithetic sampling.

use rngstream::{Mc1dIntegrator, Mrg32k3aProvider, StreamProvider, UniformVariate};
use std::f64::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let mut provider = Mrg32k3aProvider::new();
    let sampler = UniformVariate::new(0.0, PI, provider.next_stream())?;
    let mut mc = Mc1dIntegrator::new(|x: f64| PI * x.sin(), sampler);
    mc.set_desired_abs_error(0.01)?;
    mc.set_reset_stream_option(true);

    let predicted = mc.run_initial_sample();
    println!(
        "pilot: estimate {:.6} after {} observations, predicted total {}",
        mc.statistic().average(),
        mc.statistic().count(),
        predicted
    );

    let estimate = mc.evaluate();
    let stat = mc.statistic();
    println!(
        "final: estimate {:.6} (exact 2.0), {} observations, half-width {:.6}, criterion met: {}",
        estimate,
        stat.count(),
        stat.half_width(0.99),
        mc.error_criterion_met()
    );

    Ok(())
}
