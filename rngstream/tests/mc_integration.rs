//! End-to-end Monte Carlo integration runs.

use rngstream::{Mc1dIntegrator, Mrg32k3a, Mrg32k3aProvider, StreamProvider, UniformVariate};
use std::f64::consts::PI;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn integrates_sine_over_zero_to_pi() {
    init_tracing();

    // Integral of sin over (0, pi) is 2. Sampling U(0, pi) means the
    // integrand to average is pi * sin(x).
    let sampler = UniformVariate::new(0.0, PI, Mrg32k3a::new()).expect("valid bounds");
    let mut mc = Mc1dIntegrator::new(|x: f64| PI * x.sin(), sampler);
    mc.set_desired_abs_error(0.01).expect("valid error");

    let estimate = mc.evaluate();
    assert!(
        (estimate - 2.0).abs() < 0.05,
        "estimate {estimate} too far from 2"
    );
    assert!(mc.statistic().count() > 100, "pilot alone cannot suffice");
}

#[test]
fn integrates_a_polynomial_without_antithetic() {
    init_tracing();

    // Integral of 3x^2 over (0, 1) is 1.
    let sampler = UniformVariate::new(0.0, 1.0, Mrg32k3a::new()).expect("valid bounds");
    let mut mc =
        Mc1dIntegrator::with_antithetic_option(|x: f64| 3.0 * x * x, sampler, false);
    mc.set_desired_abs_error(0.005).expect("valid error");

    let estimate = mc.evaluate();
    assert!(
        (estimate - 1.0).abs() < 0.02,
        "estimate {estimate} too far from 1"
    );
}

#[test]
fn provider_streams_give_reproducible_evaluations() {
    init_tracing();

    let run = || {
        let mut provider = Mrg32k3aProvider::new();
        let sampler = UniformVariate::new(0.0, PI, provider.stream(2).expect("valid index"))
            .expect("valid bounds");
        let mut mc = Mc1dIntegrator::new(|x: f64| PI * x.sin(), sampler);
        mc.set_desired_abs_error(0.01).expect("valid error");
        mc.evaluate()
    };

    assert_eq!(run(), run());
}

#[test]
fn pilot_then_evaluate_reports_consistent_statistics() {
    init_tracing();

    let sampler = UniformVariate::new(0.0, PI, Mrg32k3a::new()).expect("valid bounds");
    let mut mc = Mc1dIntegrator::new(|x: f64| PI * x.sin(), sampler);
    mc.set_desired_abs_error(0.01).expect("valid error");
    mc.set_reset_stream_option(true);

    let predicted = mc.run_initial_sample();
    let estimate = mc.evaluate();

    let stat = mc.statistic();
    assert_eq!(stat.average(), estimate);
    assert!(stat.count() >= 100, "pilot should have run");
    assert!(
        predicted == 0 || stat.count() <= predicted.max(100_000),
        "collected {} vs predicted {predicted}",
        stat.count()
    );
}
