//! Vertex files: three `x,y,z` lines describing one triangle.
//!
//! A load failure is never fatal here. `load_triangle_or_absent` logs the
//! error and hands back `None`; what to do with absent geometry is the
//! caller's decision.

mod vertex_file;

pub use vertex_file::{AssetError, load_triangle, load_triangle_or_absent, parse_triangle};

pub fn crate_info() -> &'static str {
    "trilab-assets v0.1.0"
}
