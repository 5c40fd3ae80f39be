//! # Physics Simulation Core
//!
//! This module provides the main simulation container. One call to
//! [`PhysicsSim::step_cpu`] is one fixed tick: accumulated forces are applied,
//! bodies are integrated, wall contacts are resolved and the contacts that
//! began during the tick are reported.

use std::collections::HashSet;

use crate::collision::{detect_box_wall_collision, resolve_box_wall_collision};
use crate::error::PhysicsError;
use crate::integrator::{apply_forces, integrate_bodies};
use crate::types::{ColliderTag, CollisionEvent, PhysParams, RigidBody, Vec3, Wall};

/// Main physics simulation container
pub struct PhysicsSim {
    pub bodies: Vec<RigidBody>,
    pub walls: Vec<Wall>,
    pub params: PhysParams,
    /// Force accumulated per body since the last tick.
    forces: Vec<Vec3>,
    /// (body, wall) pairs touching at the end of the last tick.
    touching: HashSet<(usize, usize)>,
}

impl PhysicsSim {
    /// Create a new empty simulation
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(PhysParams::default())
    }

    #[must_use]
    pub fn with_params(params: PhysParams) -> Self {
        Self {
            bodies: Vec::new(),
            walls: Vec::new(),
            params,
            forces: Vec::new(),
            touching: HashSet::new(),
        }
    }

    /// Add a dynamic box and return its index.
    pub fn add_body(&mut self, body: RigidBody) -> usize {
        self.bodies.push(body);
        self.forces.push(Vec3::ZERO);
        self.bodies.len() - 1
    }

    /// Add a static wall and return its index.
    pub fn add_wall(&mut self, wall: Wall) -> usize {
        self.walls.push(wall);
        self.walls.len() - 1
    }

    /// Enclose the origin with four `Wall`-tagged walls whose inner faces sit
    /// at `±offset` on both planar axes.
    pub fn add_arena_walls(&mut self, offset: f32, thickness: f32, height: f32) -> [usize; 4] {
        let half_t = thickness * 0.5;
        let half_h = height * 0.5;
        let span = offset + thickness;
        let along_z = Vec3::new(half_t, half_h, span);
        let along_x = Vec3::new(span, half_h, half_t);
        let centre = offset + half_t;
        [
            self.add_wall(Wall::new(Vec3::new(centre, half_h, 0.0), along_z, ColliderTag::Wall)),
            self.add_wall(Wall::new(Vec3::new(-centre, half_h, 0.0), along_z, ColliderTag::Wall)),
            self.add_wall(Wall::new(Vec3::new(0.0, half_h, centre), along_x, ColliderTag::Wall)),
            self.add_wall(Wall::new(Vec3::new(0.0, half_h, -centre), along_x, ColliderTag::Wall)),
        ]
    }

    /// Borrow a body by index.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyOutOfRange`] for an unknown index.
    pub fn body(&self, index: usize) -> Result<&RigidBody, PhysicsError> {
        self.bodies
            .get(index)
            .ok_or(PhysicsError::BodyOutOfRange { index, len: self.bodies.len() })
    }

    /// Mutably borrow a body by index.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyOutOfRange`] for an unknown index.
    pub fn body_mut(&mut self, index: usize) -> Result<&mut RigidBody, PhysicsError> {
        let len = self.bodies.len();
        self.bodies
            .get_mut(index)
            .ok_or(PhysicsError::BodyOutOfRange { index, len })
    }

    /// Accumulate an external force on a body until the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyOutOfRange`] for an unknown index.
    pub fn add_force(&mut self, index: usize, force: Vec3) -> Result<(), PhysicsError> {
        let len = self.forces.len();
        let slot = self
            .forces
            .get_mut(index)
            .ok_or(PhysicsError::BodyOutOfRange { index, len })?;
        *slot += force;
        Ok(())
    }

    /// Force accumulated on a body since the last tick.
    #[must_use]
    pub fn pending_force(&self, index: usize) -> Option<Vec3> {
        self.forces.get(index).copied()
    }

    /// Teleport a body, reset its rotation and clear all of its motion.
    ///
    /// Contacts involving the body are forgotten, so touching a wall again
    /// after the move reports a fresh event.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyOutOfRange`] for an unknown index.
    pub fn set_pose(
        &mut self,
        index: usize,
        position: Vec3,
        orientation: [f32; 4],
    ) -> Result<(), PhysicsError> {
        let body = self.body_mut(index)?;
        body.pos = position;
        body.orientation = orientation;
        body.vel = Vec3::ZERO;
        body.angular_vel = Vec3::ZERO;
        self.forces[index] = Vec3::ZERO;
        self.touching.retain(|&(b, _)| b != index);
        Ok(())
    }

    /// Execute one physics step on CPU and return the contacts that began
    /// during it.
    pub fn step_cpu(&mut self) -> Vec<CollisionEvent> {
        let dt = self.params.dt;

        // 1. Apply forces and integrate positions
        apply_forces(&mut self.bodies, &self.forces, dt);
        integrate_bodies(&mut self.bodies, &self.params);
        self.forces.iter_mut().for_each(|f| *f = Vec3::ZERO);

        // 2. Detect and resolve wall contacts
        self.detect_and_resolve_collisions_cpu()
    }

    /// Run simulation for multiple steps (CPU)
    pub fn run_cpu(&mut self, steps: usize) -> Vec<CollisionEvent> {
        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.step_cpu());
        }
        events
    }

    /// Run `steps` ticks of size `dt` and return the first body's state.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::NoBodies`] when the simulation is empty.
    pub fn run(&mut self, dt: f32, steps: usize) -> Result<RigidBody, PhysicsError> {
        if self.bodies.is_empty() {
            return Err(PhysicsError::NoBodies);
        }
        self.params.dt = dt;
        self.run_cpu(steps);
        Ok(self.bodies[0])
    }

    fn detect_and_resolve_collisions_cpu(&mut self) -> Vec<CollisionEvent> {
        let mut now_touching = HashSet::new();
        let mut events = Vec::new();

        for (b, body) in self.bodies.iter_mut().enumerate() {
            for (w, wall) in self.walls.iter().enumerate() {
                if let Some(contact) = detect_box_wall_collision(body, wall) {
                    resolve_box_wall_collision(body, &contact);
                    now_touching.insert((b, w));
                    if !self.touching.contains(&(b, w)) {
                        tracing::trace!(body = b, wall = w, tag = ?wall.tag, "contact began");
                        events.push(CollisionEvent { body: b, wall: w, tag: wall.tag });
                    }
                }
            }
        }

        self.touching = now_touching;
        events
    }
}

impl Default for PhysicsSim {
    fn default() -> Self {
        Self::new()
    }
}

/// Body with a default cube shape, resting at `pos`.
#[must_use]
pub fn cube_body(pos: Vec3, half_extent: f32, mass: f32) -> RigidBody {
    RigidBody::new(pos, Vec3::new(half_extent, half_extent, half_extent), mass)
}
