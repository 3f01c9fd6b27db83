//! Property tests for the optimizer core.
//!
//! Initial parameters are random in production, so exact trajectories are not
//! asserted here; only properties that hold for every starting point.

use approx::assert_abs_diff_eq;
use descent_viz::{
    FramingPolicy, LossSurface, MomentumDescent, MomentumParams, Optimizer, RuggedBowl, Run,
    RunConfig, SeedStrategy,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn theta_never_leaves_domain(
        theta0 in -50.0f64..=50.0,
        velocity0 in -5.0f64..5.0,
        steps in 1usize..600,
    ) {
        let mut engine = MomentumDescent::from_state(MomentumParams::default(), theta0, velocity0).unwrap();
        for _ in 0..steps {
            let rec = engine.step();
            prop_assert!((-50.0..=50.0).contains(&rec.theta));
            prop_assert!(rec.velocity.is_finite());
        }
    }

    #[test]
    fn narrow_domain_is_respected(
        half_width in 0.1f64..5.0,
        learning_rate in 1e-4f64..0.5,
        momentum in 0.0f64..0.999,
        seed in any::<u64>(),
    ) {
        let params = MomentumParams { half_width, learning_rate, momentum };
        let mut engine = MomentumDescent::initialize(params, SeedStrategy::Seeded(seed)).unwrap();
        prop_assert!(engine.state().theta.abs() <= half_width);
        for _ in 0..200 {
            let rec = engine.step();
            prop_assert!(rec.theta.abs() <= half_width);
        }
    }

    #[test]
    fn identical_starts_give_identical_sequences(theta0 in -50.0f64..=50.0, steps in 0usize..300) {
        let mut a = MomentumDescent::from_state(MomentumParams::default(), theta0, 0.0).unwrap();
        let mut b = MomentumDescent::from_state(MomentumParams::default(), theta0, 0.0).unwrap();
        for _ in 0..steps {
            let (ra, rb) = (a.step(), b.step());
            prop_assert_eq!(ra.theta.to_bits(), rb.theta.to_bits());
            prop_assert_eq!(ra.velocity.to_bits(), rb.velocity.to_bits());
            prop_assert_eq!(ra.gradient.to_bits(), rb.gradient.to_bits());
            prop_assert_eq!(ra.loss.to_bits(), rb.loss.to_bits());
            prop_assert_eq!(ra.step_index, rb.step_index);
        }
    }

    #[test]
    fn every_window_contains_its_point(seed in any::<u64>(), frames in 0usize..400) {
        let config = RunConfig { total_frames: frames, ..Default::default() };
        let run = Run::new(config, SeedStrategy::Seeded(seed)).unwrap();
        let initial = run.initial_frame();
        prop_assert!(initial.window.contains(initial.record.theta, initial.record.loss));
        for frame in run {
            let w = frame.window;
            prop_assert!(w.x_min < w.x_max && w.y_min < w.y_max);
            prop_assert!(w.contains(frame.record.theta, frame.record.loss));
        }
    }

    #[test]
    fn extreme_settings_are_rejected_or_stay_bounded(
        lr_exp in -4.0f64..308.0,
        width_exp in -1.0f64..250.0,
        momentum in 0.0f64..0.999,
        seed in any::<u64>(),
    ) {
        let config = RunConfig {
            learning_rate: 10f64.powf(lr_exp),
            domain_half_width: 10f64.powf(width_exp),
            momentum,
            total_frames: 150,
            ..Default::default()
        };
        match Run::new(config, SeedStrategy::Seeded(seed)) {
            Err(err) => prop_assert!(err.is_invalid_configuration(), "{}", err),
            Ok(run) => {
                let l = config.domain_half_width;
                for frame in run {
                    let rec = frame.record;
                    prop_assert!(rec.theta.abs() <= l);
                    prop_assert!(rec.velocity.is_finite());
                    prop_assert!(rec.loss.is_finite());
                    let w = frame.window;
                    prop_assert!(w.x_min < w.x_max && w.y_min < w.y_max);
                    prop_assert!(w.contains(rec.theta, rec.loss));
                }
            }
        }
    }

    #[test]
    fn gradient_matches_central_difference(theta in -50.0f64..=50.0) {
        let h = 1e-5;
        let numeric = (RuggedBowl.loss(theta + h) - RuggedBowl.loss(theta - h)) / (2.0 * h);
        prop_assert!((numeric - RuggedBowl.gradient(theta)).abs() < 1e-4);
    }
}

#[test]
fn run_emits_exactly_configured_frame_count() {
    for n in [1usize, 450, 1000] {
        let config = RunConfig { total_frames: n, ..Default::default() };
        let frames: Vec<_> = Run::new(config, SeedStrategy::Entropy).unwrap().collect();
        assert_eq!(frames.len(), n);
        assert_eq!(frames.first().unwrap().step_index(), 1);
        assert_eq!(frames.last().unwrap().step_index(), n as u64);
    }
}

#[test]
fn reference_first_step_from_ten() {
    let config = RunConfig { total_frames: 1, ..Default::default() };
    let mut run = Run::new(config, SeedStrategy::Fixed(10.0)).unwrap();
    let frame = run.next().unwrap();

    let expected_g = 1.5 * 30f64.cos() + 1.5 * 50f64.cos() + 1.4 * 70f64.cos() + 2.0;
    let expected_v = -0.002 * expected_g;
    assert_abs_diff_eq!(frame.record.gradient, expected_g, epsilon = 1e-9);
    assert_abs_diff_eq!(frame.record.velocity, expected_v, epsilon = 1e-9);
    assert_abs_diff_eq!(frame.record.theta, 10.0 + expected_v, epsilon = 1e-9);

    let w = frame.window;
    assert_abs_diff_eq!(w.x_min, frame.record.theta - 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(w.y_max, frame.record.loss + 3.0, epsilon = 1e-12);
    assert!(run.next().is_none());
}

#[test]
fn boundary_sticking_preserves_velocity() {
    let mut engine = MomentumDescent::from_state(MomentumParams::default(), 50.0, 0.8).unwrap();
    let mut previous_velocity = 0.8;
    for _ in 0..5 {
        let rec = engine.step();
        let g = RuggedBowl.gradient(50.0);
        assert_eq!(rec.gradient, g);
        assert_eq!(rec.theta, 50.0);
        assert_eq!(rec.velocity, 0.99 * previous_velocity - 0.002 * g);
        assert!(rec.velocity > 0.0);
        previous_velocity = rec.velocity;
    }
}

#[test]
fn overflowing_step_size_is_rejected() {
    let config = RunConfig { learning_rate: 1e308, ..Default::default() };
    let err = Run::new(config, SeedStrategy::Fixed(10.0)).unwrap_err();
    assert!(err.is_invalid_configuration(), "{err}");
}

#[test]
fn invalid_configurations_are_rejected_up_front() {
    let cases = [
        RunConfig { momentum: 1.0, ..Default::default() },
        RunConfig { learning_rate: 0.0, ..Default::default() },
        RunConfig { domain_half_width: 0.0, ..Default::default() },
        RunConfig { domain_half_width: -3.0, ..Default::default() },
        RunConfig { domain_half_width: 1e17, ..Default::default() },
        RunConfig { domain_half_width: 1e200, ..Default::default() },
    ];
    for config in cases {
        let err = Run::new(config, SeedStrategy::Entropy).unwrap_err();
        assert!(err.is_invalid_configuration(), "{config:?}: {err}");
    }
}

#[test]
fn injected_rng_reproduces_initial_draw() {
    let config = RunConfig { total_frames: 50, ..Default::default() };
    let a = Run::with_rng(config, &mut StdRng::seed_from_u64(99)).unwrap().collect_trajectory();
    let b = Run::with_rng(config, &mut StdRng::seed_from_u64(99)).unwrap().collect_trajectory();
    assert_eq!(a, b);
}

#[test]
fn momentum_escapes_shallow_basin_more_than_plain_descent() {
    // With no momentum the point settles in the nearest local minimum; heavy
    // momentum carries it further across the landscape.
    let start = 20.0;
    let travel = |momentum: f64| {
        let params = MomentumParams { momentum, ..Default::default() };
        let mut engine = MomentumDescent::from_state(params, start, 0.0).unwrap();
        (0..1000).map(|_| engine.step().theta).fold(0.0f64, |acc, t| acc.max((t - start).abs()))
    };
    assert!(travel(0.99) > travel(0.0));
}

#[test]
fn framing_policy_is_stateless() {
    let policy = FramingPolicy::default();
    let mut run = Run::new(RunConfig { total_frames: 3, ..Default::default() }, SeedStrategy::Seeded(5)).unwrap();
    let frame = run.next().unwrap();
    assert_eq!(policy.frame(&frame.record), frame.window);
    assert_eq!(policy.frame(&frame.record), policy.frame(&frame.record));
}
