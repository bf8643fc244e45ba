//! Scene file loading.
//!
//! Scenes are stored as JSON documents mirroring [`SceneDescription`].
//! Vectors are written as `[x, y, z]` arrays and any omitted section falls
//! back to its default. Every loaded scene is validated before it is
//! returned, so callers never see a description the renderer would reject.

use std::path::Path;

use thiserror::Error;

use crate::scene::{SceneDescription, SceneError};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load and validate a scene from a JSON file.
///
/// # Example
///
/// ```ignore
/// use glint_core::load_scene;
///
/// let scene = load_scene("scenes/three_spheres.json")?;
/// println!("Loaded {} spheres", scene.spheres.len());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&contents)?;

    log::info!(
        "Loaded scene {}: {} spheres, {} lights, {} materials",
        path.display(),
        scene.spheres.len(),
        scene.lights.len(),
        scene.materials.len()
    );

    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(contents: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(contents)?;
    scene.validate()?;
    Ok(scene)
}

/// Serialize a scene description as pretty-printed JSON.
pub fn scene_to_string(scene: &SceneDescription) -> LoadResult<String> {
    Ok(serde_json::to_string_pretty(scene)?)
}
