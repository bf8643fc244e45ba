//! Glint Core - Scene description for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `SceneDescription`, `Material`, `Light`, `SphereDesc`
//! - **Validation**: every construction precondition checked up front
//! - **Loading**: JSON scene files via serde
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.spheres.len(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, scene_to_string, LoadError, LoadResult};
pub use scene::{
    CameraDesc, Light, Material, RenderSettings, SceneDescription, SceneError, SceneResult,
    SphereDesc,
};
