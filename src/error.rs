// Provides construction-time error types.

use thiserror::Error;

/// Errors raised while assembling a scene. These are all unrecoverable
/// configuration mistakes: once the scene graph is built, rendering itself
/// cannot fail.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot build a BVH over an empty object list")]
    EmptyBvh,

    #[error("object without a bounding box in BVH construction")]
    UnboundedObject,

    #[error("invalid refractive index {0} (must be non-negative)")]
    InvalidRefractiveIndex(f32),

    #[error("invalid medium density {0} (must be positive)")]
    InvalidDensity(f32),
}
