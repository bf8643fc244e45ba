//! Render-ready scene built from a [`SceneDescription`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Camera, HittableList, RenderConfig, Sphere};
use glint_core::{Light, Material, SceneDescription, SceneError, SceneResult};

/// Everything the tracer reads: geometry, lights, the camera and the
/// render configuration.
///
/// Immutable once built, so it can be shared freely across render threads.
pub struct Scene {
    pub world: HittableList,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub config: RenderConfig,
}

impl Scene {
    /// Assemble a scene from parts. The camera must already be initialized.
    pub fn new(
        world: HittableList,
        lights: Vec<Light>,
        camera: Camera,
        config: RenderConfig,
    ) -> Self {
        Self {
            world,
            lights,
            camera,
            config,
        }
    }

    /// Validate a description and build its spheres, lights and camera.
    ///
    /// Spheres naming the same material share a single instance of it.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        desc.validate()?;

        let materials: HashMap<&str, Arc<Material>> = desc
            .materials
            .iter()
            .map(|(name, material)| (name.as_str(), Arc::new(material.clone())))
            .collect();

        let mut world = HittableList::new();
        for (index, sphere) in desc.spheres.iter().enumerate() {
            let material = materials
                .get(sphere.material.as_str())
                .cloned()
                .ok_or_else(|| SceneError::UnknownMaterial {
                    sphere: index,
                    name: sphere.material.clone(),
                })?;
            world.add(Box::new(Sphere::new(sphere.center, sphere.radius, material)?));
        }

        let camera = Camera::from_desc(&desc.camera, desc.settings.width, desc.settings.height)?;
        let config = RenderConfig::try_from(&desc.settings)?;

        log::info!(
            "Built scene: {} spheres, {} lights, {} materials",
            world.len(),
            desc.lights.len(),
            materials.len()
        );

        Ok(Self::new(world, desc.lights.clone(), camera, config))
    }
}
