//! Shared types for the trilab exercises: colors, colored vertices, triangles.

pub mod color;
pub mod types;

pub use color::{ColorTarget, Rgb, Rgba, lerp};
pub use types::{ColoredVertex, Triangle};
