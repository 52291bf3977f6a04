use approx::assert_relative_eq;
use flyby::cosmic::{Body, KeplerianOrbit, SpacecraftState};
use flyby::dynamics::{DynamicsError, NBodyDynamics};
use flyby::ephemeris::{EphemerisError, EphemerisSource};
use flyby::linalg::Vector3;
use flyby::md::propagate;
use flyby::propagators::{PropOpts, PropagationError, Propagator};
use flyby::time::{Duration, Epoch, Unit};
use std::f64::consts::TAU;

/// Source that pins every queried body at the barycenter, at rest.
struct PinnedSource;

impl EphemerisSource for PinnedSource {
    fn position_velocity(
        &self,
        _body_id: i32,
        _jd: f64,
    ) -> Result<(Vector3<f64>, Vector3<f64>), EphemerisError> {
        Ok((Vector3::zeros(), Vector3::zeros()))
    }
}

fn leo_initial_state(earth: &Body, epoch: Epoch) -> (SpacecraftState, f64) {
    let radius = 7.0e6 + earth.radius_m;
    let speed = (earth.gm() / radius).sqrt();
    let state = SpacecraftState::new(
        epoch,
        Vector3::new(radius, 0.0, 0.0),
        Vector3::new(0.0, speed, 0.0),
    );
    (state, radius)
}

#[test]
fn circular_orbit_closes_after_one_period() {
    let _ = pretty_env_logger::try_init();

    let earth = Body::earth();
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    let (initial, radius) = leo_initial_state(&earth, epoch);
    let period = TAU * (radius.powi(3) / earth.gm()).sqrt();

    let (end, traj) = propagate(
        initial,
        period * Unit::Second,
        &[earth],
        &PinnedSource,
    )
    .unwrap();

    // Back to the starting point within 0.1% of the orbital radius.
    let closure = (end.position_m - initial.position_m).norm();
    assert!(
        closure < 1e-3 * radius,
        "orbit did not close: {closure:.3} m off after one period"
    );
    // Speed is conserved as well.
    assert_relative_eq!(end.vmag(), initial.vmag(), max_relative = 1e-6);

    // The trajectory is the solver's own step sequence: dense, ordered, and
    // bracketed by the initial and final epochs.
    assert!(traj.len() > 2);
    assert_eq!(traj.first().unwrap().epoch, epoch);
    assert_eq!(traj.last().unwrap().epoch, epoch + period * Unit::Second);
    for pair in traj.states.windows(2) {
        assert!(pair[0].epoch < pair[1].epoch);
    }
}

#[test]
fn initial_conditions_from_keplerian_orbit() {
    let earth = Body::earth();
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    let orbit = KeplerianOrbit::new(7.0e6, 0.01, 0.0, 0.0, 0.0);
    let initial = SpacecraftState::from_orbit(&orbit, 0.0, &earth, epoch, &PinnedSource).unwrap();

    // One day of flight stays bound to the central body.
    let (end, _) = propagate(initial, Unit::Day * 1, &[earth.clone()], &PinnedSource).unwrap();
    let fitted = KeplerianOrbit::from_state(&end.position_m, &end.velocity_m_s, earth.gm());
    assert_relative_eq!(fitted.sma_m, orbit.sma_m, max_relative = 1e-4);
    assert_relative_eq!(fitted.ecc, orbit.ecc, max_relative = 1e-2);
}

#[test]
fn unsupported_body_aborts_the_whole_run() {
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    let (initial, _) = leo_initial_state(&Body::earth(), epoch);

    // The Moon has no ephemeris identifier: the run must fail outright, not
    // silently skip the body.
    let err = propagate(
        initial,
        Unit::Hour * 1,
        &[Body::earth(), Body::moon()],
        &PinnedSource,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PropagationError::Dynamics {
            source: DynamicsError::PerturberBind {
                source: EphemerisError::UnsupportedBody { .. }
            }
        }
    ));
}

#[test]
fn source_query_errors_abort_the_run() {
    /// A kernel with no segments at all.
    struct EmptyKernel;

    impl EphemerisSource for EmptyKernel {
        fn position_velocity(
            &self,
            body_id: i32,
            jd: f64,
        ) -> Result<(Vector3<f64>, Vector3<f64>), EphemerisError> {
            Err(EphemerisError::NoEphemerisData { body_id, jd })
        }
    }

    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    let (initial, _) = leo_initial_state(&Body::earth(), epoch);
    let err = propagate(initial, Unit::Hour * 1, &[Body::earth()], &EmptyKernel).unwrap_err();
    assert!(matches!(
        err,
        PropagationError::Dynamics {
            source: DynamicsError::PerturberBind {
                source: EphemerisError::NoEphemerisData { .. }
            }
        }
    ));
}

#[test]
fn non_positive_duration_is_invalid() {
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    let (initial, _) = leo_initial_state(&Body::earth(), epoch);

    for duration in [Duration::ZERO, Unit::Hour * -1] {
        let err = propagate(initial, duration, &[Body::earth()], &PinnedSource).unwrap_err();
        assert!(matches!(err, PropagationError::InvalidDuration { .. }));
    }
}

#[test]
fn degenerate_window_is_rejected_at_bind_time() {
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    let err =
        NBodyDynamics::bind(&[Body::earth()], &PinnedSource, epoch, Duration::ZERO).unwrap_err();
    assert!(matches!(
        err,
        DynamicsError::PerturberBind {
            source: EphemerisError::InvalidWindow { .. }
        }
    ));
}

#[test]
fn cancellation_preserves_the_partial_sequence() {
    let earth = Body::earth();
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    let (initial, _) = leo_initial_state(&earth, epoch);

    let dynamics = NBodyDynamics::bind(&[earth], &PinnedSource, epoch, Unit::Day * 1).unwrap();
    let prop = Propagator::default(dynamics);
    let mut instance = prop.with(initial);
    let monitor = instance.monitor();

    // Cancel before the first step: the partial trajectory is just the
    // initial state, and the result is Cancelled, not a plain failure.
    monitor.cancel();
    match instance.for_duration_with_traj(Unit::Day * 1).unwrap_err() {
        PropagationError::Cancelled { partial } => {
            assert_eq!(partial.len(), 1);
            assert_eq!(partial.first().unwrap().epoch, epoch);
        }
        other => panic!("expected Cancelled, got {other:?}"),
    }
}

#[test]
fn progress_monitor_tracks_elapsed_simulated_time() {
    let earth = Body::earth();
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    let (initial, _) = leo_initial_state(&earth, epoch);

    let duration = Unit::Hour * 2;
    let dynamics = NBodyDynamics::bind(&[earth], &PinnedSource, epoch, duration)
        .unwrap()
        .with_mass(250.0);
    let mut prop = Propagator::default(dynamics);
    prop.set_tolerance(1e-9);
    let mut instance = prop.with(initial);
    let monitor = instance.monitor();
    assert_eq!(monitor.elapsed_s(), 0.0);

    // Gravity is independent of the test mass, so a 250 kg craft flies the
    // same trajectory as a 1 kg one.
    let end = instance.until_epoch(epoch + duration).unwrap();
    assert_eq!(end.epoch, epoch + duration);
    assert_relative_eq!(monitor.elapsed_s(), duration.to_seconds(), max_relative = 1e-12);
    assert!(!monitor.is_cancelled());
    assert!(instance.latest_details().step <= 2700.0 * Unit::Second);
    assert_relative_eq!(end.rmag(), initial.rmag(), max_relative = 1e-6);
}

#[test]
fn singularity_surfaces_as_divergence() {
    let earth = Body::earth();
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    // Test particle exactly at the body center: the inverse-square law is
    // singular there and the step must be reported as diverged, with the
    // furthest valid state preserved.
    let initial = SpacecraftState::new(epoch, Vector3::zeros(), Vector3::zeros());

    let err = propagate(initial, Unit::Hour * 1, &[earth], &PinnedSource).unwrap_err();
    match err {
        PropagationError::Diverged { furthest, .. } => {
            assert_eq!(furthest.epoch, epoch);
        }
        other => panic!("expected Diverged, got {other:?}"),
    }
}

#[test]
fn fixed_step_walks_the_exact_grid() {
    let earth = Body::earth();
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
    let (initial, _) = leo_initial_state(&earth, epoch);

    let duration = Unit::Hour * 1;
    let dynamics = NBodyDynamics::bind(&[earth.clone()], &PinnedSource, epoch, duration).unwrap();
    let prop = Propagator::dp78(dynamics, PropOpts::with_fixed_step(Unit::Minute * 1));
    let (end, traj) = prop
        .with(initial)
        .for_duration_with_traj(duration)
        .unwrap();

    assert_eq!(end.epoch, epoch + duration);
    // Initial state plus one state per minute.
    assert_eq!(traj.len(), 61);
    // A fixed-step eighth-order integrator still holds a circular orbit.
    assert_relative_eq!(end.rmag(), initial.rmag(), max_relative = 1e-9);
}
