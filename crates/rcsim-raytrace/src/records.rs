//! Geometry records uploaded to the trace engine.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use rcsim_math::{Aabb, Point3, Vec3};

/// Ray in the layout the trace kernel reads.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuRay {
    /// xyz = origin, w = minimum hit distance.
    pub origin: [f32; 4],
    /// xyz = unit direction, w = maximum hit distance.
    pub direction: [f32; 4],
}

impl GpuRay {
    /// Create a ray; `direction` is normalized.
    pub fn new(origin: Point3, direction: Vec3, t_min: f32, t_max: f32) -> Self {
        let d = direction.normalize();
        Self {
            origin: [origin.x, origin.y, origin.z, t_min],
            direction: [d.x, d.y, d.z, t_max],
        }
    }

    /// Ray origin.
    pub fn origin(&self) -> Point3 {
        Point3::new(self.origin[0], self.origin[1], self.origin[2])
    }

    /// Unit ray direction.
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.direction[0], self.direction[1], self.direction[2])
    }

    /// Minimum hit distance.
    pub fn t_min(&self) -> f32 {
        self.origin[3]
    }

    /// Maximum hit distance.
    pub fn t_max(&self) -> f32 {
        self.direction[3]
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Point3 {
        self.origin() + self.direction() * t
    }
}

/// Flattened BVH node.
///
/// The `w` lanes carry the topology as floats: an interior node stores its
/// child indices, a leaf stores `-(first_triangle + 1)` and its triangle
/// count. A negative left lane therefore marks a leaf.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuBvhNode {
    /// xyz = box min, w = left child or encoded first triangle.
    pub bounds_min: [f32; 4],
    /// xyz = box max, w = right child or triangle count.
    pub bounds_max: [f32; 4],
}

impl GpuBvhNode {
    /// Interior node with two children.
    pub fn interior(bounds: &Aabb, left: u32, right: u32) -> Self {
        Self::with_lanes(bounds, left as f32, right as f32)
    }

    /// Leaf node covering `count` triangles starting at `first_triangle`.
    pub fn leaf(bounds: &Aabb, first_triangle: u32, count: u32) -> Self {
        Self::with_lanes(bounds, -(first_triangle as f32) - 1.0, count as f32)
    }

    fn with_lanes(bounds: &Aabb, left: f32, right: f32) -> Self {
        Self {
            bounds_min: [bounds.min.x, bounds.min.y, bounds.min.z, left],
            bounds_max: [bounds.max.x, bounds.max.y, bounds.max.z, right],
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.bounds_min[3] < 0.0
    }

    /// Triangle range of a leaf, `None` for interior nodes.
    pub fn leaf_range(&self) -> Option<Range<u32>> {
        if !self.is_leaf() {
            return None;
        }
        let first = (-self.bounds_min[3] - 1.0) as u32;
        let count = self.bounds_max[3] as u32;
        Some(first..first.saturating_add(count))
    }

    /// `(left, right)` child indices of an interior node, `None` for leaves.
    pub fn child_indices(&self) -> Option<(u32, u32)> {
        if self.is_leaf() {
            None
        } else {
            Some((self.bounds_min[3] as u32, self.bounds_max[3] as u32))
        }
    }

    /// Node bounding box.
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            Point3::new(self.bounds_min[0], self.bounds_min[1], self.bounds_min[2]),
            Point3::new(self.bounds_max[0], self.bounds_max[1], self.bounds_max[2]),
        )
    }
}

/// Triangle positions; the `w` lanes are unused.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuTriangle {
    /// Vertex 0.
    pub v0: [f32; 4],
    /// Vertex 1.
    pub v1: [f32; 4],
    /// Vertex 2.
    pub v2: [f32; 4],
}

impl GpuTriangle {
    /// Create a triangle from three corners.
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        let lane = |p: Point3| [p.x, p.y, p.z, 0.0];
        Self {
            v0: lane(p0),
            v1: lane(p1),
            v2: lane(p2),
        }
    }

    /// The three corners.
    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v1, self.v2].map(|v| Point3::new(v[0], v[1], v[2]))
    }

    /// Bounding box of the corners.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices())
    }
}

/// Crease edge hint for the diffraction pass.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuEdge {
    /// xyz = start point, w = crease angle in radians.
    pub start: [f32; 4],
    /// xyz = end point, w = 1.0 if the edge is a crease, else 0.0.
    pub end: [f32; 4],
}

impl GpuEdge {
    /// Create an edge record.
    pub fn new(start: Point3, end: Point3, crease_angle: f32, is_crease: bool) -> Self {
        Self {
            start: [start.x, start.y, start.z, crease_angle],
            end: [end.x, end.y, end.z, if is_crease { 1.0 } else { 0.0 }],
        }
    }

    /// Start point.
    pub fn start(&self) -> Point3 {
        Point3::new(self.start[0], self.start[1], self.start[2])
    }

    /// End point.
    pub fn end(&self) -> Point3 {
        Point3::new(self.end[0], self.end[1], self.end[2])
    }

    /// Crease angle in radians.
    pub fn crease_angle(&self) -> f32 {
        self.start[3]
    }

    /// Whether the edge is a crease.
    pub fn is_crease(&self) -> bool {
        self.end[3] > 0.5
    }
}

const _: () = assert!(std::mem::size_of::<GpuRay>() == 32);
const _: () = assert!(std::mem::size_of::<GpuBvhNode>() == 32);
const _: () = assert!(std::mem::size_of::<GpuTriangle>() == 48);
const _: () = assert!(std::mem::size_of::<GpuEdge>() == 32);
