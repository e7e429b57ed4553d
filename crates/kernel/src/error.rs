use crate::body::BodyHandle;
use crate::shape::ShapeId;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    #[error("shape {0:?} is not in the registry")]
    UnknownShape(ShapeId),
    #[error("body {0:?} does not exist")]
    UnknownBody(BodyHandle),
    #[error("invalid mass {0}: must be finite and non-negative")]
    InvalidMass(f32),
}
