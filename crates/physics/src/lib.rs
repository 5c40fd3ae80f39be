#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Arena Physics
//!
//! A minimal planar rigid-body host for the cube arena.
//!
//! The original environment leaned on a game engine for rigid-body motion and
//! collision callbacks. This crate provides just enough of that to drive an
//! agent: dynamic axis-aligned boxes, static tagged walls, accumulated forces,
//! a fixed-step integrator, and collision-enter events.
//!
//! ## Key Components
//!
//! -   **Bodies:** [`RigidBody`] and [`Wall`], defined in [`types`].
//! -   **Simulation:** [`PhysicsSim`] owns every body and wall and steps them
//!     forward one tick at a time with [`PhysicsSim::step_cpu`].
//! -   **Events:** each tick returns the [`CollisionEvent`]s that began during
//!     it, tagged with the wall's [`ColliderTag`].
//!
//! ## Usage
//!
//! ```rust
//! use physics::{cube_body, PhysicsSim, Vec3};
//!
//! let mut sim = PhysicsSim::new();
//! let agent = sim.add_body(cube_body(Vec3::new(0.0, 0.5, 0.0), 0.5, 1.0));
//! sim.add_arena_walls(15.0, 1.0, 2.0);
//! sim.add_force(agent, Vec3::new(10.0, 0.0, 0.0)).unwrap();
//! let events = sim.step_cpu();
//! assert!(events.is_empty());
//! assert!(sim.bodies[agent].vel.x > 0.0);
//! ```

pub mod collision;
pub mod error;
pub mod integrator;
pub mod simulation;
pub mod types;

pub use error::PhysicsError;
pub use simulation::{cube_body, PhysicsSim};
pub use types::{
    ColliderTag, CollisionEvent, Material, PhysParams, RigidBody, Vec3, Wall,
    IDENTITY_ORIENTATION,
};
