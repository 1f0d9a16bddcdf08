//! Property-based tests for the spatial grid and collision resolver.

use bevy::math::DVec2;
use proptest::prelude::*;

use super::{CollisionModel, SpatialGrid, colliding_pairs, detect, rebuild_grid, resolve};
use crate::test_utils::fixtures;

fn brute_force_pairs(bodies: &[crate::types::Body], combined_radius: f64) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if detect(&bodies[i], &bodies[j], combined_radius) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn vec2(range: std::ops::Range<f64>) -> impl Strategy<Value = DVec2> {
    (range.clone(), range).prop_map(|(x, y)| DVec2::new(x, y))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Grid-filtered detection finds exactly the brute-force pair set.
    #[test]
    fn prop_grid_matches_brute_force(
        positions in prop::collection::vec(vec2(-300.0..300.0), 1..40),
        combined_radius in 5.0f64..80.0,
        cell_size in 5.0f64..120.0,
    ) {
        let bodies: Vec<_> = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| fixtures::body_with_id(i, p, DVec2::ZERO))
            .collect();

        let mut grid = SpatialGrid::new(cell_size);
        rebuild_grid(&mut grid, &bodies);

        let from_grid = colliding_pairs(&bodies, &grid, combined_radius);
        prop_assert_eq!(from_grid, brute_force_pairs(&bodies, combined_radius));
    }

    /// Swapping argument order yields the same pair of velocities.
    #[test]
    fn prop_resolve_is_symmetric(
        pa in vec2(-50.0..50.0),
        pb in vec2(-50.0..50.0),
        va in vec2(-20.0..20.0),
        vb in vec2(-20.0..20.0),
        ma in 0.1f64..10.0,
        mb in 0.1f64..10.0,
        weighted in any::<bool>(),
    ) {
        let model = if weighted { CollisionModel::MassWeighted } else { CollisionModel::EqualExchange };
        let mut a = fixtures::body_at(pa, va);
        a.mass = ma;
        let mut b = fixtures::body_at(pb, vb);
        b.mass = mb;

        let (a1, b1) = resolve(&a, &b, model);
        let (b2, a2) = resolve(&b, &a, model);

        prop_assert!((a1 - a2).length() < 1e-9, "a: {:?} vs {:?}", a1, a2);
        prop_assert!((b1 - b2).length() < 1e-9, "b: {:?} vs {:?}", b1, b2);
    }

    /// Mass-weighted exchange conserves linear momentum.
    #[test]
    fn prop_mass_weighted_conserves_momentum(
        pb in vec2(1.0..50.0),
        va in vec2(-20.0..20.0),
        vb in vec2(-20.0..20.0),
        ma in 0.1f64..10.0,
        mb in 0.1f64..10.0,
    ) {
        let mut a = fixtures::body_at(DVec2::ZERO, va);
        a.mass = ma;
        let mut b = fixtures::body_at(pb, vb);
        b.mass = mb;

        let (va2, vb2) = resolve(&a, &b, CollisionModel::MassWeighted);
        let before = a.momentum() + b.momentum();
        let after = va2 * ma + vb2 * mb;
        prop_assert!((before - after).length() < 1e-6);
    }
}
