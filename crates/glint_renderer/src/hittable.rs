//! Hittable trait and HitRecord for ray-object intersection.

use glint_core::Material;
use glint_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit outward surface normal at the intersection
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
///
/// New primitive shapes only need to implement this; traversal and shading
/// work purely on the returned [`HitRecord`].
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object at a distance strictly inside `ray_t`.
    ///
    /// Returns the nearest such hit, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// A list of hittable objects, searched linearly for the closest hit.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            // Shrink the window so only strictly nearer hits replace the current one;
            // on a tie the first object wins.
            let window = ray_t.with_max(closest.map_or(ray_t.max, |rec| rec.t));
            if let Some(rec) = object.hit(ray, window) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;
    use glint_math::EPSILON;
    use std::sync::Arc;

    fn sphere(z: f32, color: Vec3) -> Box<dyn Hittable> {
        let material = Arc::new(Material::new(color));
        Box::new(Sphere::new(Vec3::new(0.0, 0.0, z), 1.0, material).unwrap())
    }

    #[test]
    fn test_closest_hit_independent_of_order() {
        let near = Vec3::new(1.0, 0.0, 0.0);
        let far = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let mut near_first = HittableList::new();
        near_first.add(sphere(5.0, near));
        near_first.add(sphere(10.0, far));

        let mut far_first = HittableList::new();
        far_first.add(sphere(10.0, far));
        far_first.add(sphere(5.0, near));

        for world in [&near_first, &far_first] {
            let rec = world.hit(&ray, Interval::above(EPSILON)).unwrap();
            assert!((rec.t - 4.0).abs() < 1e-4);
            assert_eq!(rec.material.diffuse_color, near);
        }
    }

    #[test]
    fn test_coincident_spheres_first_wins() {
        let first = Vec3::new(1.0, 0.0, 0.0);
        let mut world = HittableList::new();
        world.add(sphere(5.0, first));
        world.add(sphere(5.0, Vec3::new(0.0, 0.0, 1.0)));

        let rec = world
            .hit(&Ray::new(Vec3::ZERO, Vec3::Z), Interval::above(EPSILON))
            .unwrap();
        assert_eq!(rec.material.diffuse_color, first);
    }

    #[test]
    fn test_empty_world_misses() {
        let world = HittableList::default();
        assert!(world.is_empty());
        assert!(world
            .hit(&Ray::new(Vec3::ZERO, Vec3::Z), Interval::above(EPSILON))
            .is_none());
    }

    #[test]
    fn test_miss_when_all_spheres_behind() {
        let mut world = HittableList::new();
        world.add(sphere(-5.0, Vec3::ONE));
        assert_eq!(world.len(), 1);
        assert!(world
            .hit(&Ray::new(Vec3::ZERO, Vec3::Z), Interval::above(EPSILON))
            .is_none());
    }
}
