//! # Physics Integration
//!
//! Semi-implicit Euler for dynamic boxes: accumulated forces and gravity
//! update velocity first, then velocity updates position.

use crate::types::{PhysParams, RigidBody, Vec3};

/// Apply one tick of accumulated external force to each body.
pub fn apply_forces(bodies: &mut [RigidBody], forces: &[Vec3], dt: f32) {
    for (body, force) in bodies.iter_mut().zip(forces) {
        let acceleration = *force / body.mass;
        body.vel += acceleration * dt;
    }
}

/// Integrate gravity, drag and position for every body.
pub fn integrate_bodies(bodies: &mut [RigidBody], params: &PhysParams) {
    let dt = params.dt;
    let drag = (1.0 - params.linear_drag * dt).clamp(0.0, 1.0);
    for body in bodies.iter_mut() {
        body.vel += params.gravity * dt;
        body.vel *= drag;
        body.pos += body.vel * dt;
        body.orientation = integrate_orientation(body.orientation, body.angular_vel, dt);
    }
}

/// Advance a quaternion by angular velocity `w` over `dt`: `q += 0.5 * (w, 0) * q * dt`.
#[must_use]
pub fn integrate_orientation(q: [f32; 4], w: Vec3, dt: f32) -> [f32; 4] {
    if w == Vec3::ZERO {
        return q;
    }
    let [qx, qy, qz, qw] = q;
    let h = 0.5 * dt;
    let dx = h * (w.x * qw + w.y * qz - w.z * qy);
    let dy = h * (w.y * qw + w.z * qx - w.x * qz);
    let dz = h * (w.z * qw + w.x * qy - w.y * qx);
    let dw = h * (-w.x * qx - w.y * qy - w.z * qz);
    let out = [qx + dx, qy + dy, qz + dz, qw + dw];
    let norm = out.iter().map(|c| c * c).sum::<f32>().sqrt();
    out.map(|c| c / norm)
}
