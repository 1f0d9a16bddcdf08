//! Numerical core: force model and integrator.
//!
//! Both are plain functions over [`Body`](crate::types::Body) so they can be
//! driven by [`Simulation`](crate::simulation::Simulation) or tested directly.

mod forces;
mod integrator;

#[cfg(test)]
mod proptest_physics;

pub use forces::{
    ForceContext, compute_forces, drag_force, gravity_force, repulsion_force, spring_force,
};
pub use integrator::{advance_angle, clamp_dt, record_trail, step};
