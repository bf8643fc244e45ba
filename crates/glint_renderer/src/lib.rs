//! Glint Renderer - CPU Whitted-style ray tracing
//!
//! Traces spheres lit by point lights with Phong shading, recursive mirror
//! reflection and grid supersampling. Scenes are immutable while rendering,
//! so pixels can be computed in any order and on any thread.

mod bucket;
mod camera;
mod hittable;
mod renderer;
mod scene;
mod shading;
mod sphere;

pub use bucket::{
    generate_buckets, render_bucket, render_buckets, render_parallel, Bucket, BucketResult,
    DEFAULT_BUCKET_SIZE,
};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use renderer::{
    background_color, color_to_rgb, render, render_pixel, trace, ImageBuffer, RenderConfig,
};
pub use scene::Scene;
pub use shading::{shade, Color};
pub use sphere::Sphere;

/// Re-export scene data and math types used in the public API
pub use glint_core::{Light, Material};
pub use glint_math::{Interval, Ray, Vec3, EPSILON};
