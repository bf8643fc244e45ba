//! Core ray tracing renderer.
//!
//! Implements Whitted-style ray tracing with:
//! - Phong shading from point lights
//! - Recursive mirror reflection with configurable depth
//! - Anti-aliasing via a regular sub-pixel sample grid

use std::time::Instant;

use crate::{shade, Color, Hittable, Scene};
use glint_core::{RenderSettings, SceneError, SceneResult};
use glint_math::{reflect, Interval, Ray, EPSILON};

/// Render configuration.
///
/// Only constructible through [`RenderConfig::new`] or from validated
/// settings, so the sample count is always at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Sub-pixel grid size; each pixel averages `samples_per_axis²` rays
    samples_per_axis: u32,
    /// Maximum mirror bounce depth
    max_depth: u32,
    /// Background color when ray doesn't hit anything
    background: Color,
    /// Whether to use sky gradient instead of solid background
    use_sky_gradient: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_axis: 2,
            max_depth: 3,
            background: Color::ZERO,
            use_sky_gradient: false,
        }
    }
}

impl RenderConfig {
    /// Create a configuration with a black background.
    ///
    /// Fails if `samples_per_axis` is zero; a `max_depth` of zero is allowed
    /// and makes every ray see the background.
    pub fn new(samples_per_axis: u32, max_depth: u32) -> SceneResult<Self> {
        if samples_per_axis == 0 {
            return Err(SceneError::InvalidSampleCount);
        }

        Ok(Self {
            samples_per_axis,
            max_depth,
            ..Default::default()
        })
    }

    /// Set the solid background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Use the sky gradient instead of the solid background.
    pub fn with_sky_gradient(mut self, enabled: bool) -> Self {
        self.use_sky_gradient = enabled;
        self
    }

    pub fn samples_per_axis(&self) -> u32 {
        self.samples_per_axis
    }

    /// Rays traced per pixel.
    pub fn samples_per_pixel(&self) -> u64 {
        u64::from(self.samples_per_axis) * u64::from(self.samples_per_axis)
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn use_sky_gradient(&self) -> bool {
        self.use_sky_gradient
    }
}

impl TryFrom<&RenderSettings> for RenderConfig {
    type Error = SceneError;

    fn try_from(settings: &RenderSettings) -> SceneResult<Self> {
        Ok(Self::new(settings.samples_per_axis, settings.max_depth)?
            .with_background(settings.background)
            .with_sky_gradient(settings.sky_gradient))
    }
}

/// Color seen along a ray that leaves the scene.
pub fn background_color(ray: &Ray, config: &RenderConfig) -> Color {
    if config.use_sky_gradient {
        sky_gradient(ray)
    } else {
        config.background
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let a = 0.5 * (ray.direction().y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Compute the color seen by a ray.
///
/// Shades the closest hit and, for reflective materials, blends in the
/// color of a single mirror bounce. Rays at `depth >= max_depth` and rays
/// that hit nothing see the background.
pub fn trace(ray: &Ray, scene: &Scene, depth: u32) -> Color {
    let config = &scene.config;
    if depth >= config.max_depth {
        return background_color(ray, config);
    }

    let Some(rec) = scene.world.hit(ray, Interval::above(EPSILON)) else {
        return background_color(ray, config);
    };

    let local = shade(&rec, &scene.lights, -ray.direction());

    let reflectivity = rec.material.reflectivity;
    if reflectivity <= 0.0 {
        return local;
    }

    let bounce = Ray::new(
        rec.p + rec.normal * EPSILON,
        reflect(ray.direction(), rec.normal),
    );
    let reflected = trace(&bounce, scene, depth + 1);

    local * (1.0 - reflectivity) + reflected * reflectivity
}

/// Clamp each channel to [0, 1], scale to 255 and truncate.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f32| (255.0 * Interval::UNIT.clamp(c)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Render a single pixel with grid supersampling.
///
/// Pixel (0, 0) is the top-left corner of the image.
pub fn render_pixel(scene: &Scene, x: u32, y: u32) -> Color {
    let camera = &scene.camera;
    let samples = scene.config.samples_per_axis as f32;
    let width = camera.image_width() as f32;
    let height = camera.image_height() as f32;

    let mut pixel_color = Color::ZERO;
    for sy in 0..scene.config.samples_per_axis {
        for sx in 0..scene.config.samples_per_axis {
            let offset_x = (sx as f32 + 0.5) / samples;
            let offset_y = (sy as f32 + 0.5) / samples;
            let u = (x as f32 + offset_x) / width;
            let v = (y as f32 + offset_y) / height;

            let ray = camera.get_ray(u, v);
            pixel_color += trace(&ray, scene, 0);
        }
    }

    // Average the samples
    pixel_color / (samples * samples)
}

/// Image buffer of linear colors, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Quantized 8-bit RGB value of the pixel at (x, y).
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        color_to_rgb(self.get(x, y))
    }

    /// Convert to tightly packed RGB bytes (for encoding or display).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
///
/// This is the single-threaded reference renderer; see
/// [`render_parallel`](crate::render_parallel) for the bucketed version.
pub fn render(scene: &Scene) -> ImageBuffer {
    let camera = &scene.camera;
    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.image_width(), camera.image_height());

    for y in 0..camera.image_height() {
        for x in 0..camera.image_width() {
            image.set(x, y, render_pixel(scene, x, y));
        }
    }

    log::info!(
        "Rendered {}x{} @ {} spp in {:?}",
        image.width,
        image.height,
        scene.config.samples_per_pixel(),
        start.elapsed()
    );

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, HittableList, Sphere};
    use glint_core::{Light, Material};
    use glint_math::Vec3;
    use std::sync::Arc;

    fn camera(width: u32, height: u32) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        camera.initialize().unwrap();
        camera
    }

    fn solid(background: Color) -> RenderConfig {
        RenderConfig::default().with_background(background)
    }

    fn single_sphere(material: Material, width: u32, height: u32, config: RenderConfig) -> Scene {
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Arc::new(material)).unwrap(),
        ));
        let lights = vec![Light::white(Vec3::new(0.0, 5.0, 0.0))];
        Scene::new(world, lights, camera(width, height), config)
    }

    #[test]
    fn test_sky_gradient() {
        // Ray pointing up should be more blue (less red than white)
        let up_color = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down_color = sky_gradient(&Ray::new(Vec3::ZERO, -Vec3::Y));

        assert_eq!(up_color, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down_color, Color::ONE);
    }

    #[test]
    fn test_color_to_rgb_clamps_and_truncates() {
        assert_eq!(color_to_rgb(Color::new(-0.5, 0.5, 2.0)), [0, 127, 255]);
        assert_eq!(color_to_rgb(Color::new(0.999, 0.0, 1.0)), [254, 0, 255]);
    }

    #[test]
    fn test_zero_samples_rejected() {
        assert_eq!(RenderConfig::new(0, 3), Err(SceneError::InvalidSampleCount));

        let settings = RenderSettings {
            samples_per_axis: 0,
            ..Default::default()
        };
        assert_eq!(
            RenderConfig::try_from(&settings),
            Err(SceneError::InvalidSampleCount)
        );
    }

    #[test]
    fn test_config_from_settings() {
        let settings = RenderSettings {
            samples_per_axis: 3,
            max_depth: 0,
            background: Color::new(0.1, 0.2, 0.3),
            sky_gradient: true,
            ..Default::default()
        };
        let config = RenderConfig::try_from(&settings).unwrap();

        assert_eq!(config.samples_per_axis(), 3);
        assert_eq!(config.samples_per_pixel(), 9);
        assert_eq!(config.max_depth(), 0);
        assert_eq!(config.background(), Color::new(0.1, 0.2, 0.3));
        assert!(config.use_sky_gradient());
    }

    #[test]
    fn test_samples_per_pixel_does_not_overflow() {
        let config = RenderConfig::new(u32::MAX, 1).unwrap();
        assert_eq!(
            config.samples_per_pixel(),
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_zero_depth_sees_only_background() {
        let background = Color::new(0.1, 0.2, 0.3);
        let config = RenderConfig::new(2, 0).unwrap().with_background(background);
        let scene = single_sphere(Material::default(), 8, 8, config);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(trace(&ray, &scene, 0), background);
    }

    #[test]
    fn test_non_reflective_trace_is_local_shade() {
        let scene = single_sphere(
            Material::new(Vec3::new(0.3, 0.6, 0.9)),
            8,
            8,
            solid(Color::new(1.0, 0.0, 1.0)),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let rec = scene.world.hit(&ray, Interval::above(EPSILON)).unwrap();
        let local = shade(&rec, &scene.lights, -ray.direction());

        assert_eq!(trace(&ray, &scene, 0), local);
    }

    #[test]
    fn test_reflection_blends_with_background() {
        // Unlit mirror: all color comes from the bounce, which escapes
        let material = Material::new(Vec3::ONE).with_reflectivity(0.5);
        let mut scene = single_sphere(material, 8, 8, solid(Color::new(0.2, 0.4, 0.6)));
        scene.lights.clear();

        let color = trace(&Ray::new(Vec3::ZERO, Vec3::Z), &scene, 0);
        assert!((color - Color::new(0.1, 0.2, 0.3)).length() < 1e-6);
    }

    #[test]
    fn test_last_bounce_sees_background() {
        // With depth 1 the reflected ray is cut off at the depth limit
        let material = Material::new(Vec3::ONE).with_reflectivity(1.0);
        let config = RenderConfig::new(2, 1).unwrap().with_sky_gradient(true);
        let mut scene = single_sphere(material, 8, 8, config);
        scene.lights.clear();

        // Head-on hit mirrors straight back toward -Z
        let color = trace(&Ray::new(Vec3::ZERO, Vec3::Z), &scene, 0);
        assert!((color - Color::new(0.75, 0.85, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_single_sample_matches_center_ray() {
        let config = RenderConfig::new(1, 3)
            .unwrap()
            .with_background(Color::new(0.0, 0.1, 0.0));
        let scene = single_sphere(Material::new(Vec3::new(0.9, 0.5, 0.1)), 16, 12, config);

        for (x, y) in [(8, 6), (0, 0), (10, 4)] {
            let u = (x as f32 + 0.5) / 16.0;
            let v = (y as f32 + 0.5) / 12.0;
            let expected = trace(&scene.camera.get_ray(u, v), &scene, 0);
            assert_eq!(render_pixel(&scene, x, y), expected);
        }
    }

    #[test]
    fn test_supersampling_uniform_scene_is_stable() {
        // A huge unlit half-mirror fills the frame; every sample sees the same color
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(
                Vec3::new(0.0, 0.0, 30.0),
                25.0,
                Arc::new(Material::new(Vec3::ONE).with_reflectivity(0.5)),
            )
            .unwrap(),
        ));
        let background = Color::new(0.8, 0.6, 0.4);
        let one = RenderConfig::new(1, 3).unwrap().with_background(background);
        let many = RenderConfig::new(4, 3).unwrap().with_background(background);

        let mut scene = Scene::new(world, Vec::new(), camera(4, 4), one);
        let single: Vec<Color> = [(0, 0), (1, 2), (3, 3)]
            .iter()
            .map(|&(x, y)| render_pixel(&scene, x, y))
            .collect();

        scene.config = many;
        for (&(x, y), a) in [(0, 0), (1, 2), (3, 3)].iter().zip(single) {
            let b = render_pixel(&scene, x, y);
            assert!((a - b).length() < 1e-6);
            assert!((a - Color::new(0.4, 0.3, 0.2)).length() < 1e-6);
        }
    }

    #[test]
    fn test_render_hit_center_and_background_corner() {
        let background = Color::new(0.25, 0.5, 0.75);
        let scene = single_sphere(Material::new(Vec3::ONE), 64, 48, solid(background));
        let image = render(&scene);

        assert_eq!(image.pixels.len(), 64 * 48);

        let center = image.rgb(32, 24);
        assert!(center.iter().any(|&c| c > 0));
        assert_ne!(center, color_to_rgb(background));

        assert_eq!(image.get(0, 0), background);
        assert_eq!(image.rgb(63, 47), color_to_rgb(background));
    }

    #[test]
    fn test_to_rgb8_is_row_major() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(1, 0, Color::new(1.0, 0.0, 0.0));
        image.set(0, 1, Color::new(0.0, 0.0, 1.0));

        assert_eq!(
            image.to_rgb8(),
            vec![0, 0, 0, 255, 0, 0, 0, 0, 255, 0, 0, 0]
        );
    }

    #[test]
    fn test_pixel_index_uses_wide_arithmetic() {
        // 70_000 * 70_000 overflows u32; the index must not wrap
        let image = ImageBuffer {
            width: 70_000,
            height: 70_000,
            pixels: Vec::new(),
        };
        assert_eq!(image.index(69_999, 69_999), 70_000usize * 70_000 - 1);
    }
}
