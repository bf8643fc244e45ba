//! Camera for ray generation.

use glint_core::{CameraDesc, SceneError, SceneResult};
use glint_math::{normalize, Ray, Vec3};

/// World up direction used to build the view basis.
const WORLD_UP: Vec3 = Vec3::Y;

/// Up direction used instead when the view is parallel to [`WORLD_UP`].
const FALLBACK_UP: Vec3 = Vec3::Z;

/// Pinhole camera mapping screen-space samples to world-space rays.
///
/// Resolution, placement and field of view are only set through the
/// builder methods, followed by [`Camera::initialize`].
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    image_width: u32,
    image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,

    /// Horizontal field of view in degrees
    fov: f32,

    // Cached computed values (set by initialize())
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    screen_width: f32,
    screen_height: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 600,
            look_from: Vec3::ZERO,
            look_at: Vec3::Z,
            fov: 75.0,
            // Cached values (initialized to defaults)
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
            screen_width: 0.0,
            screen_height: 0.0,
        }
    }

    /// Camera placed as described, at the given resolution.
    pub fn from_desc(desc: &CameraDesc, width: u32, height: u32) -> SceneResult<Self> {
        let mut camera = Self::new()
            .with_resolution(width, height)
            .with_position(desc.position, desc.target)
            .with_fov(desc.fov_degrees);
        camera.initialize()?;
        Ok(camera)
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self
    }

    /// Set horizontal field of view in degrees.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    ///
    /// Fails on a zero resolution, a field of view outside (0, 180) or a
    /// target that coincides with the camera position.
    pub fn initialize(&mut self) -> SceneResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(SceneError::InvalidResolution {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(SceneError::InvalidFov(self.fov));
        }

        let forward = normalize(self.look_at - self.look_from);
        if forward == Vec3::ZERO {
            return Err(SceneError::DegenerateCamera(self.look_from));
        }

        let mut right = WORLD_UP.cross(forward);
        if right.length() < 1e-3 {
            log::warn!(
                "Camera at {} looks along the world up axis, using {} as up",
                self.look_from,
                FALLBACK_UP
            );
            right = FALLBACK_UP.cross(forward);
        }

        self.forward = forward;
        self.right = right.normalize();
        self.up = self.forward.cross(self.right);

        // Screen plane sits at distance 1 along forward
        let aspect_ratio = self.image_width as f32 / self.image_height as f32;
        self.screen_width = 2.0 * (self.fov.to_radians() / 2.0).tan();
        self.screen_height = self.screen_width / aspect_ratio;

        Ok(())
    }

    /// Generate the ray through normalized screen coordinates (u, v).
    ///
    /// `u` runs left to right and `v` top to bottom, both in [0, 1].
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let screen_x = (2.0 * u - 1.0) * self.screen_width / 2.0;
        let screen_y = (1.0 - 2.0 * v) * self.screen_height / 2.0;

        let direction = self.right * screen_x + self.up * screen_y + self.forward;
        Ray::new(self.look_from, direction)
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Size of the screen plane at unit distance, as (width, height).
    pub fn screen_size(&self) -> (f32, f32) {
        (self.screen_width, self.screen_height)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
