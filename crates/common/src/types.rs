use crate::color::Rgba;
use glam::Vec3;

/// Three triangle corners in model space, in winding order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Pair every corner with the same color.
    pub fn uniform(&self, color: Rgba) -> [ColoredVertex; 3] {
        self.vertices.map(|position| ColoredVertex { position, color })
    }

    /// Pair each corner with its own color.
    pub fn per_vertex(&self, colors: [Rgba; 3]) -> [ColoredVertex; 3] {
        let [a, b, c] = self.vertices;
        let [ca, cb, cc] = colors;
        [
            ColoredVertex {
                position: a,
                color: ca,
            },
            ColoredVertex {
                position: b,
                color: cb,
            },
            ColoredVertex {
                position: c,
                color: cc,
            },
        ]
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self {
            vertices: [Vec3::ZERO; 3],
        }
    }
}

/// A position with the color it is emitted with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredVertex {
    pub position: Vec3,
    pub color: Rgba,
}
