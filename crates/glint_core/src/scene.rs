//! Scene description types for Glint.
//!
//! This module defines the renderer-agnostic representation of a scene:
//! materials, spheres, point lights, the camera placement and the render
//! settings. Descriptions are plain data; `validate` checks every
//! precondition the renderer relies on before any pixel is traced.

use std::collections::BTreeMap;

use glint_math::{Interval, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a scene violates a construction precondition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Samples per axis must be at least 1")]
    InvalidSampleCount,

    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("Camera position and target coincide at {0}")]
    DegenerateCamera(Vec3),

    #[error("Sphere {sphere} references unknown material '{name}'")]
    UnknownMaterial { sphere: usize, name: String },

    #[error("Material '{name}' is invalid: {reason}")]
    InvalidMaterial { name: String, reason: &'static str },

    #[error("Light {index} must have positive intensity, got {intensity}")]
    InvalidLight { index: usize, intensity: f32 },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Phong surface parameters plus mirror reflectivity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Diffuse color (RGB, 0-1)
    pub diffuse_color: Vec3,

    /// Scale of the specular highlight
    pub specular_strength: f32,

    /// Phong exponent; larger values give tighter highlights
    pub shininess: f32,

    /// Fraction of the final color taken from the mirror bounce (0-1)
    pub reflectivity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Vec3::ONE,
            specular_strength: 1.0,
            shininess: 32.0,
            reflectivity: 0.0,
        }
    }
}

impl Material {
    /// Create a matte-ish material with the given diffuse color.
    pub fn new(diffuse_color: Vec3) -> Self {
        Self {
            diffuse_color,
            ..Default::default()
        }
    }

    pub fn with_specular(mut self, strength: f32, shininess: f32) -> Self {
        self.specular_strength = strength;
        self.shininess = shininess;
        self
    }

    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Red plastic with a moderate highlight and a hint of reflection.
    pub fn plastic_red() -> Self {
        Self::new(Vec3::new(1.0, 0.0, 0.0))
            .with_specular(1.0, 64.0)
            .with_reflectivity(0.05)
    }

    /// Glossy blue glaze.
    pub fn blue_glaze() -> Self {
        Self::new(Vec3::new(0.1, 0.2, 0.9))
            .with_specular(1.0, 128.0)
            .with_reflectivity(0.1)
    }

    /// Mostly mirror-like silver.
    pub fn chrome_silver() -> Self {
        Self::new(Vec3::new(0.6, 0.6, 0.6))
            .with_specular(1.0, 256.0)
            .with_reflectivity(0.9)
    }

    /// Check the material parameters are usable for shading.
    pub fn validate(&self, name: &str) -> SceneResult<()> {
        let reason = if !Interval::UNIT.contains(self.reflectivity) {
            Some("reflectivity must be within [0, 1]")
        } else if !(self.specular_strength >= 0.0) {
            Some("specular strength must be non-negative")
        } else if !(self.shininess >= 0.0) {
            Some("shininess must be non-negative")
        } else if !self.diffuse_color.is_finite() {
            Some("diffuse color must be finite")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SceneError::InvalidMaterial {
                name: name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// A point light.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,

    #[serde(default = "default_light_color")]
    pub color: Vec3,

    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
}

fn default_light_color() -> Vec3 {
    Vec3::ONE
}

fn default_light_intensity() -> f32 {
    1.0
}

impl Light {
    pub fn new(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// White light of unit intensity.
    pub fn white(position: Vec3) -> Self {
        Self::new(position, default_light_color(), default_light_intensity())
    }
}

/// A sphere placed in the scene, referencing a named material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: String,
}

impl SphereDesc {
    pub fn new(center: Vec3, radius: f32, material: impl Into<String>) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }
}

/// Where the camera sits and what it looks at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    pub position: Vec3,
    pub target: Vec3,

    /// Horizontal field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
}

fn default_fov() -> f32 {
    75.0
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::Z,
            fov_degrees: default_fov(),
        }
    }
}

/// Output resolution and quality knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,

    /// Sub-pixel grid size; each pixel traces `samples_per_axis²` rays
    pub samples_per_axis: u32,

    /// Number of mirror bounces before a ray falls back to the background
    pub max_depth: u32,

    /// Background color when a ray escapes the scene
    pub background: Vec3,

    /// Use a white-to-blue sky gradient instead of the solid background
    pub sky_gradient: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            samples_per_axis: 2,
            max_depth: 3,
            background: Vec3::ZERO,
            sky_gradient: false,
        }
    }
}

/// A complete, renderer-agnostic scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDesc,

    #[serde(default)]
    pub settings: RenderSettings,

    /// Named materials shared between spheres
    #[serde(default)]
    pub materials: BTreeMap<String, Material>,

    #[serde(default)]
    pub spheres: Vec<SphereDesc>,

    #[serde(default)]
    pub lights: Vec<Light>,
}

impl SceneDescription {
    /// Create an empty scene seen through `camera`.
    pub fn new(camera: CameraDesc, settings: RenderSettings) -> Self {
        Self {
            camera,
            settings,
            ..Default::default()
        }
    }

    /// Register a material under `name`, replacing any previous one.
    pub fn add_material(&mut self, name: impl Into<String>, material: Material) {
        self.materials.insert(name.into(), material);
    }

    pub fn add_sphere(&mut self, sphere: SphereDesc) {
        self.spheres.push(sphere);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Check every precondition the renderer assumes.
    ///
    /// Returns the first violation found; the scene is unchanged.
    pub fn validate(&self) -> SceneResult<()> {
        let settings = &self.settings;
        if settings.width == 0 || settings.height == 0 {
            return Err(SceneError::InvalidResolution {
                width: settings.width,
                height: settings.height,
            });
        }
        if settings.samples_per_axis == 0 {
            return Err(SceneError::InvalidSampleCount);
        }

        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(SceneError::InvalidFov(fov));
        }
        if (self.camera.target - self.camera.position).length_squared() == 0.0 {
            return Err(SceneError::DegenerateCamera(self.camera.position));
        }

        for (name, material) in &self.materials {
            material.validate(name)?;
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                return Err(SceneError::InvalidRadius(sphere.radius));
            }
            if !self.materials.contains_key(&sphere.material) {
                return Err(SceneError::UnknownMaterial {
                    sphere: index,
                    name: sphere.material.clone(),
                });
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            if !(light.intensity > 0.0) {
                return Err(SceneError::InvalidLight {
                    index,
                    intensity: light.intensity,
                });
            }
        }

        Ok(())
    }

    /// Three spheres under three lights, seen from the origin down +Z.
    pub fn showcase() -> Self {
        let mut scene = Self::new(
            CameraDesc {
                position: Vec3::ZERO,
                target: Vec3::new(0.0, 0.0, 5.0),
                fov_degrees: 75.0,
            },
            RenderSettings {
                sky_gradient: true,
                ..Default::default()
            },
        );

        scene.add_material("plastic_red", Material::plastic_red());
        scene.add_material("blue_glaze", Material::blue_glaze());
        scene.add_material("chrome_silver", Material::chrome_silver());

        scene.add_sphere(SphereDesc::new(Vec3::new(0.0, 0.0, 6.0), 1.0, "blue_glaze"));
        scene.add_sphere(SphereDesc::new(Vec3::new(-1.8, -0.5, 4.5), 0.7, "plastic_red"));
        scene.add_sphere(SphereDesc::new(Vec3::new(1.8, -0.5, 5.0), 0.7, "chrome_silver"));

        scene.add_light(Light::new(Vec3::new(5.0, 5.0, -2.0), Vec3::ONE, 1.2));
        scene.add_light(Light::new(Vec3::new(-4.0, 2.0, -1.0), Vec3::new(0.6, 0.6, 1.0), 0.5));
        scene.add_light(Light::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ONE, 0.3));

        scene
    }
}
