//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Sphere};
use sphray_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material of the surface that was hit
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from an outward normal, orienting it against the ray.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Find the nearest intersection with `ray` whose parameter lies
    /// strictly inside `ray_t`.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// The closed set of things a scene can contain.
#[derive(Debug, Clone)]
pub enum Surface {
    Sphere(Sphere),
    List(HittableList),
}

impl Hittable for Surface {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Surface::Sphere(sphere) => sphere.hit(ray, ray_t),
            Surface::List(list) => list.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl From<HittableList> for Surface {
    fn from(list: HittableList) -> Self {
        Surface::List(list)
    }
}

/// An ordered list of surfaces, hit-tested as a whole.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Surface>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Create a list holding a single object.
    pub fn with_object(object: impl Into<Surface>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Surface>) {
        self.objects.push(object.into());
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Surface] {
        &self.objects
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if let Some(rec) = object.hit(ray, interval) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Metal};
    use sphray_math::Color;
    use std::sync::Arc;

    const FORWARD: Interval = Interval::new(0.001, f64::INFINITY);

    fn near_and_far() -> (Sphere, Sphere) {
        let near = Sphere::new(
            Point3::new(0.0, 0.0, -2.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(1.0, 0.0, 0.0)).into()),
        );
        let far = Sphere::new(
            Point3::new(0.0, 0.0, -2.8),
            1.0,
            Arc::new(Metal::new(Color::new(0.0, 0.0, 1.0), 0.0).into()),
        );
        (near, far)
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        assert!(world.is_empty());
        assert!(world.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_nearest_wins_regardless_of_order() {
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        let (near, far) = near_and_far();

        let mut forward = HittableList::new();
        forward.add(near.clone());
        forward.add(far.clone());

        let mut reversed = HittableList::new();
        reversed.add(far);
        reversed.add(near);

        for world in [&forward, &reversed] {
            let rec = world.hit(&ray, FORWARD).expect("ray should hit");
            assert!((rec.t - 1.5).abs() < 1e-12);
            assert_eq!(rec.material.albedo(), Color::new(1.0, 0.0, 0.0));
            assert!(matches!(rec.material, Material::Lambertian(_)));
            assert_eq!(rec.normal, Vec3::Z);
        }
    }

    #[test]
    fn test_window_excludes_everything() {
        let (near, far) = near_and_far();
        let mut world = HittableList::with_object(near);
        world.add(far);
        assert_eq!(world.len(), 2);

        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        assert!(world.hit(&ray, Interval::new(0.001, 1.0)).is_none());

        world.clear();
        assert!(world.hit(&ray, FORWARD).is_none());
    }

    #[test]
    fn test_nested_lists() {
        let (near, far) = near_and_far();
        let mut world = HittableList::with_object(far);
        world.add(HittableList::with_object(near));

        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, FORWARD).expect("ray should hit");
        assert!((rec.t - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_set_face_normal() {
        let material: Material = Lambertian::new(Color::ONE).into();
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);

        let outside = HitRecord::new(&ray, 1.0, Vec3::Z, &material);
        assert!(outside.front_face);
        assert_eq!(outside.normal, Vec3::Z);

        let inside = HitRecord::new(&ray, 1.0, Vec3::NEG_Z, &material);
        assert!(!inside.front_face);
        assert_eq!(inside.normal, Vec3::Z);
        assert_eq!(inside.p, Point3::new(0.0, 0.0, -1.0));
    }
}
