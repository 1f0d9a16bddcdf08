//! Rendezvous - real-time orbital simulation core
//!
//! A small 2D simulation that drives an animated display: a fixed set of
//! bodies orbit a common centre under spring, gravity and repulsion forces,
//! collide with each other, and can be pulled into a convergent
//! "rendezvous". Fidelity adapts to the host's measured performance.
//!
//! [`simulation::Simulation`] is the entry point; [`plugin::RendezvousPlugin`]
//! runs it from a Bevy app.

pub mod collision;
pub mod config;
pub mod drive;
pub mod orbit;
pub mod physics;
pub mod plugin;
pub mod quality;
pub mod simulation;
pub mod types;

#[cfg(test)]
pub mod test_utils;
