//! # Collision Detection and Response
//!
//! Dynamic boxes against static walls. Everything is axis-aligned, so
//! detection is an AABB overlap test and the contact normal is the axis of
//! least penetration.

mod box_wall;

pub use box_wall::*;

use crate::types::{Material, Vec3};

/// Contact information for collision response
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Contact normal, pointing from the wall towards the body
    pub normal: Vec3,
    /// Penetration depth
    pub depth: f32,
    /// Combined friction coefficient
    pub friction: f32,
    /// Combined restitution coefficient
    pub restitution: f32,
}

impl Contact {
    #[must_use]
    pub fn new(normal: Vec3, depth: f32, mat_a: &Material, mat_b: &Material) -> Self {
        Self {
            normal,
            depth,
            friction: combine(mat_a.friction, mat_b.friction),
            restitution: combine(mat_a.restitution, mat_b.restitution),
        }
    }
}

/// Geometric mean, as most engines combine material coefficients.
fn combine(a: f32, b: f32) -> f32 {
    (a * b).sqrt()
}
