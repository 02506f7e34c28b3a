//! Host-side axis-aligned bounding box.

use crate::{Point3, Vec3};

/// Axis-aligned box around target geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb {
    /// Box with the given corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any point expands.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point of `points`.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_point(p);
        }
        aabb
    }

    /// True until at least one point has been included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow to cover `p`.
    pub fn expand_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Grow to cover `other`; empty boxes are ignored.
    pub fn expand_aabb(&mut self, other: &Aabb) {
        if other.is_empty() {
            return;
        }
        self.expand_point(&other.min);
        self.expand_point(&other.max);
    }

    /// Box centre.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Surface area, `2 (dx dy + dy dz + dz dx)`.
    pub fn surface_area(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.extent();
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_point() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());
        aabb.expand_point(&Point3::new(1.0, -2.0, 3.0));
        aabb.expand_point(&Point3::new(-1.0, 2.0, 0.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_expand_aabb_ignores_empty() {
        let mut aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        aabb.expand_aabb(&Aabb::empty());
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 1.0));

        aabb.expand_aabb(&Aabb::new(
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ));
        assert_eq!(aabb.min, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_center_and_surface_area() {
        let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.center(), Point3::new(0.5, 1.0, 1.5));
        // 2 * (1*2 + 2*3 + 3*1) = 22
        assert!((aabb.surface_area() - 22.0).abs() < 1e-6);
        assert_eq!(Aabb::empty().surface_area(), 0.0);
    }

    #[test]
    fn test_from_points() {
        let pts = [Point3::new(0.5, 0.5, 0.5), Point3::new(-0.5, -0.5, -0.5)];
        let aabb = Aabb::from_points(&pts);
        assert_eq!(aabb.center(), Point3::origin());
    }
}
