//! Body-body collision detection and resolution.
//!
//! Candidate pairs come from the [`SpatialGrid`]; each unordered pair is
//! checked once per tick (lower index first). Overlapping, approaching
//! pairs exchange their velocity components along the line of centres.

mod grid;

pub use grid::SpatialGrid;

use bevy::log::debug;
use bevy::math::DVec2;

use crate::types::Body;

/// How velocities are exchanged on impact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionModel {
    /// Swap the normal velocity components regardless of mass.
    EqualExchange,
    /// One-dimensional elastic collision along the normal, weighted by mass.
    /// Identical to `EqualExchange` for equal masses.
    #[default]
    MassWeighted,
}

/// Whether two bodies overlap: centre distance strictly below `combined_radius`.
#[inline]
pub fn detect(a: &Body, b: &Body, combined_radius: f64) -> bool {
    a.position.distance_squared(b.position) < combined_radius * combined_radius
}

/// Post-collision velocities of `a` and `b`.
///
/// Only the components along the line of centres change. Pairs that are
/// already separating, or whose centres coincide, keep their velocities.
/// The result does not depend on argument order.
pub fn resolve(a: &Body, b: &Body, model: CollisionModel) -> (DVec2, DVec2) {
    let unchanged = (a.velocity, b.velocity);

    let normal = (b.position - a.position).normalize_or_zero();
    if normal == DVec2::ZERO {
        return unchanged;
    }

    let va = a.velocity.dot(normal);
    let vb = b.velocity.dot(normal);
    if vb - va >= 0.0 {
        return unchanged;
    }

    let (va_new, vb_new) = match model {
        CollisionModel::EqualExchange => (vb, va),
        CollisionModel::MassWeighted => {
            let total = a.mass + b.mass;
            (
                ((a.mass - b.mass) * va + 2.0 * b.mass * vb) / total,
                ((b.mass - a.mass) * vb + 2.0 * a.mass * va) / total,
            )
        }
    };

    (
        a.velocity + normal * (va_new - va),
        b.velocity + normal * (vb_new - vb),
    )
}

/// Rebuild `grid` from the current body positions.
pub fn rebuild_grid(grid: &mut SpatialGrid, bodies: &[Body]) {
    grid.clear();
    for (index, body) in bodies.iter().enumerate() {
        grid.insert(index, body.position);
    }
}

/// Overlapping pairs `(i, j)` with `i < j`, found through the grid.
///
/// `grid` must have been rebuilt from `bodies`.
pub fn colliding_pairs(bodies: &[Body], grid: &SpatialGrid, combined_radius: f64) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut candidates = Vec::new();

    for (i, body) in bodies.iter().enumerate() {
        candidates.clear();
        candidates.extend(grid.query_nearby(body.position, combined_radius).filter(|&j| j > i));
        candidates.sort_unstable();
        candidates.dedup();

        for &j in &candidates {
            if detect(body, &bodies[j], combined_radius) {
                pairs.push((i, j));
            }
        }
    }

    pairs
}

/// Rebuild the grid, then resolve every overlapping pair in place.
///
/// Bodies in click cooldown are left out. Returns the number of pairs
/// whose velocities were exchanged.
pub fn resolve_collisions(
    bodies: &mut [Body],
    grid: &mut SpatialGrid,
    combined_radius: f64,
    model: CollisionModel,
) -> usize {
    rebuild_grid(grid, bodies);

    let mut resolved = 0;
    for (i, j) in colliding_pairs(bodies, grid, combined_radius) {
        if bodies[i].is_clicked || bodies[j].is_clicked {
            continue;
        }

        let before = (bodies[i].velocity, bodies[j].velocity);
        let (va, vb) = resolve(&bodies[i], &bodies[j], model);
        if (va, vb) != before {
            bodies[i].velocity = va;
            bodies[j].velocity = vb;
            resolved += 1;
        }
    }

    if resolved > 0 {
        debug!("resolved {} collision(s)", resolved);
    }
    resolved
}

#[cfg(test)]
mod proptest_collision;
