use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Identity rotation as an `(x, y, z, w)` quaternion.
pub const IDENTITY_ORIENTATION: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero for a degenerate vector.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > f32::EPSILON {
            self / len
        } else {
            Self::ZERO
        }
    }

    /// Euclidean distance in the XZ plane, ignoring height.
    #[must_use]
    pub fn planar_distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    #[must_use]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

/// Surface response coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self { friction: 0.6, restitution: 0.0 }
    }
}

/// Category attached to a static collider and reported back in contact events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColliderTag {
    /// Arena boundary.
    Wall,
    Untagged,
}

impl ColliderTag {
    /// Whether touching this collider counts as leaving the arena.
    #[must_use]
    pub fn is_boundary(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Dynamic axis-aligned box.
#[derive(Copy, Clone, Debug)]
pub struct RigidBody {
    pub pos: Vec3,
    pub vel: Vec3,
    pub angular_vel: Vec3,
    /// Quaternion `(x, y, z, w)`.
    pub orientation: [f32; 4],
    pub half_extents: Vec3,
    pub mass: f32,
    pub material: Material,
}

impl RigidBody {
    #[must_use]
    pub fn new(pos: Vec3, half_extents: Vec3, mass: f32) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            angular_vel: Vec3::ZERO,
            orientation: IDENTITY_ORIENTATION,
            half_extents,
            mass,
            material: Material::default(),
        }
    }
}

/// Static axis-aligned box collider.
#[derive(Copy, Clone, Debug)]
pub struct Wall {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub tag: ColliderTag,
    pub material: Material,
}

impl Wall {
    #[must_use]
    pub fn new(center: Vec3, half_extents: Vec3, tag: ColliderTag) -> Self {
        Self { center, half_extents, tag, material: Material::default() }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct PhysParams {
    pub gravity: Vec3,
    pub dt: f32,
    /// Fraction of velocity removed per second.
    pub linear_drag: f32,
}

impl Default for PhysParams {
    fn default() -> Self {
        Self { gravity: Vec3::ZERO, dt: 0.02, linear_drag: 0.0 }
    }
}

/// Reported on the tick a body starts touching a wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CollisionEvent {
    pub body: usize,
    pub wall: usize,
    pub tag: ColliderTag,
}
