use glam::Vec3;
use rapier3d::geometry::SharedShape;

/// Index of a shape inside a [`ShapeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub usize);

/// Backend-independent description of a collision shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDesc {
    Cuboid { half_extents: Vec3 },
    Ball { radius: f32 },
}

impl ShapeDesc {
    /// Principal moments of inertia of a solid shape of the given mass,
    /// about its center of mass.
    pub fn local_inertia(&self, mass: f32) -> Vec3 {
        match *self {
            ShapeDesc::Ball { radius } => Vec3::splat(0.4 * mass * radius * radius),
            ShapeDesc::Cuboid { half_extents: h } => {
                let sq = h * h;
                Vec3::new(sq.y + sq.z, sq.x + sq.z, sq.x + sq.y) * (mass / 3.0)
            }
        }
    }

    fn to_shared(self) -> SharedShape {
        match self {
            ShapeDesc::Cuboid { half_extents: h } => SharedShape::cuboid(h.x, h.y, h.z),
            ShapeDesc::Ball { radius } => SharedShape::ball(radius),
        }
    }
}

#[derive(Clone)]
struct RegisteredShape {
    desc: ShapeDesc,
    shared: SharedShape,
}

/// Deduplicating store of collision shapes.
///
/// Registering a description equal to an existing one hands back the existing
/// id, so identical geometry is backed by one shared backend shape.
#[derive(Clone, Default)]
pub struct ShapeRegistry {
    shapes: Vec<RegisteredShape>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, desc: ShapeDesc) -> ShapeId {
        if let Some(i) = self.shapes.iter().position(|s| s.desc == desc) {
            return ShapeId(i);
        }
        self.shapes.push(RegisteredShape {
            desc,
            shared: desc.to_shared(),
        });
        ShapeId(self.shapes.len() - 1)
    }

    pub fn desc(&self, id: ShapeId) -> Option<&ShapeDesc> {
        self.shapes.get(id.0).map(|s| &s.desc)
    }

    /// Backend shape handle. Cloning it bumps a reference count; the
    /// registry keeps its own copy alive.
    pub fn shared(&self, id: ShapeId) -> Option<&SharedShape> {
        self.shapes.get(id.0).map(|s| &s.shared)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        id.0 < self.shapes.len()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &ShapeDesc)> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(i, s)| (ShapeId(i), &s.desc))
    }
}

impl std::fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.shapes.iter().map(|s| s.desc))
            .finish()
    }
}
