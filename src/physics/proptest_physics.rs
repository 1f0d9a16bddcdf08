//! Property-based tests for the orbit generator, force model and integrator.
//!
//! These verify invariants over a wide range of layouts and body states.

use std::f64::consts::TAU;

use bevy::math::DVec2;
use proptest::prelude::*;

use super::{ForceContext, compute_forces, step};
use crate::config::{ForceConstants, SimulationConfig};
use crate::drive::{DriveIntensity, DriveState, PointerState};
use crate::orbit::generate;
use crate::simulation::{Simulation, TickInput};
use crate::test_utils::fixtures;
use crate::types::BodyId;

fn vec2(range: std::ops::Range<f64>) -> impl Strategy<Value = DVec2> {
    (range.clone(), range).prop_map(|(x, y)| DVec2::new(x, y))
}

fn intensity() -> impl Strategy<Value = DriveIntensity> {
    prop::sample::select(DriveIntensity::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Phase offsets are evenly spaced by 2π/total and increase with index.
    #[test]
    fn prop_phase_offsets_evenly_spaced(total in 1usize..64) {
        let step = TAU / total as f64;
        let mut previous = None;
        for i in 0..total {
            let params = generate(i, total, 180.0, 0.15);
            if let Some(prev) = previous {
                prop_assert!(params.phase_offset > prev);
                prop_assert!((params.phase_offset - prev - step).abs() < 1e-9);
            }
            prop_assert!(params.phase_offset < TAU);
            previous = Some(params.phase_offset);
        }
    }

    /// With zero net force every step advances position by velocity·dt.
    #[test]
    fn prop_zero_force_is_linear(
        start in vec2(-500.0..500.0),
        velocity in vec2(-100.0..100.0),
        dt in 0.001f64..0.1,
        steps in 1usize..50,
    ) {
        let mut body = fixtures::body_at(start, velocity);
        for _ in 0..steps {
            let before = body.position;
            step(&mut body, DVec2::ZERO, dt, Some(8));
            let moved = body.position - before;
            prop_assert!((moved - velocity * dt).length() < 1e-9);
        }
        prop_assert_eq!(body.velocity, velocity);
    }

    /// The force model stays finite everywhere, including at the origin and
    /// exactly on the click point.
    #[test]
    fn prop_forces_finite(
        position in vec2(-1000.0..1000.0),
        target in vec2(-1000.0..1000.0),
        velocity in vec2(-200.0..200.0),
        click_on_body in any::<bool>(),
        hovered in any::<bool>(),
        converging in any::<bool>(),
        intensity in intensity(),
    ) {
        let constants = ForceConstants::default();
        let body = fixtures::body_at(position, velocity);
        let ctx = ForceContext {
            convergence_active: converging,
            click: Some(if click_on_body { position } else { DVec2::ZERO }),
            gravity_multiplier: intensity.gravity_multiplier(),
            hovered,
            constants: &constants,
        };
        prop_assert!(compute_forces(&body, target, &ctx).is_finite());
        prop_assert!(compute_forces(&fixtures::body_at(DVec2::ZERO, velocity), target, &ctx).is_finite());
    }

    /// Arbitrary input sequences keep every body finite.
    #[test]
    fn prop_simulation_stays_finite(
        frames in prop::collection::vec(
            (0.0f64..0.5, intensity(), any::<bool>(), prop::option::of(0usize..7), prop::option::of(vec2(-300.0..300.0))),
            1..120,
        ),
    ) {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        for (elapsed, intensity, converging, hovered, click) in frames {
            sim.tick(TickInput {
                elapsed,
                drive: DriveState { intensity, convergence_active: converging },
                pointer: PointerState { hovered: hovered.map(BodyId), click },
                performance: None,
            });
        }
        for body in sim.bodies() {
            prop_assert!(body.is_finite());
            prop_assert!(body.mass > 0.0);
        }
    }

    /// Seven bodies anywhere within radius 10 converge in one tick.
    #[test]
    fn prop_convergence_within_one_tick(
        offsets in prop::collection::vec((0.0f64..10.0, 0.0f64..TAU), 7),
    ) {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        for (i, (r, theta)) in offsets.into_iter().enumerate() {
            let body = sim.body_mut(BodyId(i)).unwrap();
            body.position = DVec2::from_angle(theta) * r;
            body.velocity = DVec2::ZERO;
        }
        let out = sim.tick(TickInput {
            elapsed: 1.0 / 60.0,
            drive: DriveState::converging(DriveIntensity::Idle),
            ..Default::default()
        });
        prop_assert!(out.convergence_reached);
    }
}
