//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use glint_core::{Material, SceneError, SceneResult};
use glint_math::{normalize, Interval, Ray, Vec3, EPSILON};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails unless `radius` is positive and finite.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> SceneResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SceneError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    /// Unit outward normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, p: Vec3) -> Vec3 {
        normalize(p - self.center)
    }

    /// Nearest root strictly inside `ray_t`, if any.
    ///
    /// The ray direction is unit length, so the quadratic's leading
    /// coefficient is 1.
    fn nearest_root(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let oc = ray.origin() - self.center;
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let t1 = (-b - sqrtd) / 2.0;
        let t2 = (-b + sqrtd) / 2.0;

        if ray_t.surrounds(t1) {
            Some(t1)
        } else if ray_t.surrounds(t2) {
            Some(t2)
        } else {
            None
        }
    }

    /// Distance to the nearest intersection beyond [`EPSILON`].
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.nearest_root(ray, Interval::above(EPSILON))
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = self.nearest_root(ray, ray_t)?;
        let p = ray.at(t);

        Some(HitRecord {
            t,
            p,
            normal: self.normal_at(p),
            material: &self.material,
        })
    }
}
