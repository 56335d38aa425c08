//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use sphray_math::{Interval, Point3, Ray};
use std::sync::Arc;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius is expected to be positive; scene validation rejects
    /// anything else before a sphere is built.
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use sphray_math::{Color, Vec3};

    fn grey_sphere(center: Point3, radius: f64) -> Sphere {
        Sphere::new(
            center,
            radius,
            Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)).into()),
        )
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let interval = Interval::new(0.001, f64::INFINITY);

        let rec = sphere.hit(&ray, interval).expect("ray aimed at centre must hit");
        assert_eq!(rec.t, 0.5);
        assert_eq!(rec.p, Point3::new(0.0, 0.0, -0.5));
        assert_eq!(rec.normal, Vec3::Z);
        assert!(rec.front_face);
    }

    #[test]
    fn test_distance_to_surface_from_outside() {
        let center = Point3::new(1.0, 2.0, -7.0);
        let radius = 2.0;
        let origin = Point3::new(1.0, 2.0, 3.0);
        let sphere = grey_sphere(center, radius);

        let ray = Ray::new(origin, center - origin);
        let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        // Direction has length 10, so t is distance / 10
        let distance = (center - origin).length() - radius;
        assert!((rec.t * ray.direction().length() - distance).abs() < 1e-12);
        assert!((rec.p.distance(center) - radius).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Passes beside the sphere: discriminant < 0
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));

        for interval in [
            Interval::new(0.001, f64::INFINITY),
            Interval::UNIVERSE,
            Interval::new(-10.0, 10.0),
            Interval::EMPTY,
        ] {
            assert!(sphere.hit(&ray, interval).is_none());
        }
    }

    #[test]
    fn test_sphere_behind_ray() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, 5.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_hit_from_inside() {
        let sphere = grey_sphere(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert_eq!(rec.t, 2.0);
        assert!(!rec.front_face);
        // Stored normal faces back towards the ray origin
        assert_eq!(rec.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert!(rec.normal.dot(ray.origin() - rec.p) >= 0.0);
    }

    #[test]
    fn test_normal_faces_ray_origin() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0);
        let origins = [
            Point3::ZERO,
            Point3::new(0.3, -0.2, -3.1),
            Point3::new(5.0, 5.0, -3.0),
        ];

        for origin in origins {
            let ray = Ray::new(origin, Vec3::new(0.0, 0.0, -3.0) - origin + Vec3::new(0.1, 0.1, 0.0));
            if let Some(rec) = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)) {
                let outside = origin.distance(sphere.center()) > sphere.radius();
                assert_eq!(rec.front_face, outside);
                assert!(rec.normal.dot(origin - rec.p) >= 0.0);
                assert!((rec.normal.length() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_shared_material() {
        let material: Arc<Material> = Arc::new(Lambertian::new(Color::ONE).into());
        let a = Sphere::new(Vec3::ZERO, 1.0, Arc::clone(&material));
        let b = Sphere::new(Vec3::X, 1.0, Arc::clone(&material));

        assert!(Arc::ptr_eq(a.material(), b.material()));
        assert_eq!(Arc::strong_count(&material), 3);
    }
}
