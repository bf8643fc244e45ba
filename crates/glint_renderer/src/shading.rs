//! Phong shading from point lights.
//!
//! Lights are never occluded: every light reaches every surface point.

use crate::hittable::HitRecord;
use glint_core::Light;
use glint_math::{normalize, reflect, Vec3};

/// Color type alias (RGB values typically 0-1, unbounded before output)
pub type Color = Vec3;

/// Diffuse plus specular contribution of a single light.
#[inline]
fn shade_light(rec: &HitRecord, light: &Light, view_dir: Vec3) -> Color {
    let light_dir = normalize(light.position - rec.p);
    let radiance = light.color * light.intensity;
    let material = rec.material;

    let lambert = rec.normal.dot(light_dir).max(0.0);
    let diffuse = radiance * material.diffuse_color * lambert;

    let mirrored = reflect(-light_dir, rec.normal);
    let highlight = mirrored.dot(view_dir).max(0.0).powf(material.shininess);
    let specular = radiance * material.specular_strength * highlight;

    diffuse + specular
}

/// Local color at a hit point, summed over all lights.
///
/// `view_dir` is the unit direction from the hit point toward the viewer.
pub fn shade(rec: &HitRecord, lights: &[Light], view_dir: Vec3) -> Color {
    lights
        .iter()
        .fold(Color::ZERO, |color, light| color + shade_light(rec, light, view_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Material;

    fn record(material: &Material) -> HitRecord<'_> {
        HitRecord {
            t: 1.0,
            p: Vec3::ZERO,
            normal: Vec3::Y,
            material,
        }
    }

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_light_overhead_gives_full_diffuse() {
        let material = Material::new(Vec3::new(0.8, 0.4, 0.2)).with_specular(0.0, 32.0);
        let light = Light::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 0.5, 1.0), 2.0);

        let color = shade(&record(&material), &[light], Vec3::Y);
        assert!(approx_eq(color, Vec3::new(1.6, 0.4, 0.4)));
    }

    #[test]
    fn test_light_behind_surface_gives_no_diffuse() {
        let material = Material::new(Vec3::ONE).with_specular(0.0, 32.0);
        let light = Light::white(Vec3::new(0.0, -3.0, 0.0));

        let color = shade(&record(&material), &[light], Vec3::Y);
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_specular_peaks_along_mirror_direction() {
        // Diffuse off, light at 45 degrees, viewer on the mirror side
        let material = Material::new(Vec3::ZERO).with_specular(0.5, 16.0);
        let light = Light::white(Vec3::new(-1.0, 1.0, 0.0));
        let rec = record(&material);

        let mirror_view = Vec3::new(1.0, 1.0, 0.0).normalize();
        let peak = shade(&rec, &[light.clone()], mirror_view);
        assert!(approx_eq(peak, Vec3::splat(0.5)));

        let off_view = Vec3::new(-1.0, 1.0, 0.0).normalize();
        let off = shade(&rec, &[light], off_view);
        assert!(off.x < 1e-6);
    }

    #[test]
    fn test_lights_accumulate() {
        let material = Material::new(Vec3::splat(0.5)).with_specular(0.0, 1.0);
        let rec = record(&material);
        let light = Light::white(Vec3::new(0.0, 2.0, 0.0));

        let one = shade(&rec, &[light.clone()], Vec3::Y);
        let two = shade(&rec, &[light.clone(), light], Vec3::Y);
        assert!(approx_eq(two, one * 2.0));
    }

    #[test]
    fn test_no_lights_is_black() {
        let material = Material::default();
        assert_eq!(shade(&record(&material), &[], Vec3::Y), Color::ZERO);
    }
}
