//! Box-Wall collision detection and response

use super::Contact;
use crate::types::{RigidBody, Vec3, Wall};

/// Detect overlap between a dynamic box and a static wall.
///
/// Touching faces count as contact so that a body resting against a wall
/// keeps reporting it.
#[must_use]
pub fn detect_box_wall_collision(body: &RigidBody, wall: &Wall) -> Option<Contact> {
    let delta = body.pos - wall.center;
    let overlap = Vec3::new(
        body.half_extents.x + wall.half_extents.x - delta.x.abs(),
        body.half_extents.y + wall.half_extents.y - delta.y.abs(),
        body.half_extents.z + wall.half_extents.z - delta.z.abs(),
    );
    if overlap.x < 0.0 || overlap.y < 0.0 || overlap.z < 0.0 {
        return None;
    }

    let normal = if overlap.x <= overlap.y && overlap.x <= overlap.z {
        Vec3::new(sign(delta.x), 0.0, 0.0)
    } else if overlap.z <= overlap.y {
        Vec3::new(0.0, 0.0, sign(delta.z))
    } else {
        Vec3::new(0.0, sign(delta.y), 0.0)
    };
    let depth = overlap.x.min(overlap.y).min(overlap.z);

    Some(Contact::new(normal, depth, &body.material, &wall.material))
}

fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Push the body out of the wall and remove its velocity into the wall.
pub fn resolve_box_wall_collision(body: &mut RigidBody, contact: &Contact) {
    if contact.depth > 0.0 {
        body.pos += contact.normal * contact.depth;
    }

    let velocity_along_normal = body.vel.dot(contact.normal);
    if velocity_along_normal >= 0.0 {
        return;
    }

    let impulse = -(1.0 + contact.restitution) * velocity_along_normal;
    body.vel += contact.normal * impulse;

    if contact.friction > 0.0 {
        let tangent = body.vel - contact.normal * body.vel.dot(contact.normal);
        let tangent_speed = tangent.length();
        if tangent_speed > 1e-4 {
            let reduction = (contact.friction * impulse).min(tangent_speed);
            body.vel -= tangent / tangent_speed * reduction;
        }
    }
}
