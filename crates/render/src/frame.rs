use glam::{Mat4, Vec3};
use trilab_common::{ColoredVertex, Rgba};
use trilab_kernel::{Camera, FrameController, Orientation};

/// Vertical field of view in radians.
pub const FIELD_OF_VIEW: f32 = std::f32::consts::FRAC_PI_4;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 1000.0;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The controller has no triangle to draw (the vertex file did not load).
    #[error("no triangle geometry to draw")]
    MissingGeometry,
}

/// Camera placement and projection for one frame.
///
/// The eye sits `distance` units along +Z looking at the origin with +Y up.
/// Projection is recomputed from the surface aspect ratio on every resize.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    pub distance: f32,
    pub aspect: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl RenderView {
    pub fn new(camera: &Camera, aspect: f32) -> Self {
        Self {
            distance: camera.distance,
            aspect,
            fov: FIELD_OF_VIEW,
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    /// Aspect ratio of a surface; a zero height counts as one pixel.
    pub fn aspect_of(width: u32, height: u32) -> f32 {
        width as f32 / height.max(1) as f32
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    /// A zero distance puts the eye on the target and yields a degenerate matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Rotate about Y by yaw, then about X by pitch (degrees).
pub fn model_matrix(orientation: &Orientation) -> Mat4 {
    Mat4::from_rotation_y(orientation.yaw.to_radians())
        * Mat4::from_rotation_x(orientation.pitch.to_radians())
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameDraw {
    pub clear: Rgba,
    pub view: RenderView,
    pub model: Mat4,
    pub vertices: [ColoredVertex; 3],
}

impl FrameDraw {
    /// Snapshot a controller's state into a frame.
    pub fn compose(controller: &dyn FrameController, aspect: f32) -> Result<Self, RenderError> {
        let Some(vertices) = controller.triangle() else {
            tracing::warn!(exercise = controller.name(), "no geometry to draw");
            return Err(RenderError::MissingGeometry);
        };
        let rig = controller.rig();
        Ok(Self {
            clear: controller.clear_color(),
            view: RenderView::new(&rig.camera, aspect),
            model: model_matrix(&rig.orientation),
            vertices,
        })
    }

    /// Clip-space position of each vertex.
    pub fn clip_positions(&self) -> [glam::Vec4; 3] {
        let mvp = self.view.view_projection() * self.model;
        self.vertices.map(|v| mvp * v.position.extend(1.0))
    }
}
