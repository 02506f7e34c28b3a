//! Trace results read back from the engine.

use bytemuck::{Pod, Zeroable};
use rcsim_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// Distance lane value that marks a miss.
pub const MISS_DISTANCE: f32 = -1.0;

/// One ray-surface intersection.
///
/// Hits are immutable once produced; the bounce pipeline only reads them.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct HitResult {
    /// xyz = world hit position, w = distance along the ray (-1 on a miss).
    pub hit_point: [f32; 4],
    /// xyz = surface normal, w = material id.
    pub normal: [f32; 4],
    /// xyz = reflection direction, w = reflected intensity in `[0, 1]`.
    pub reflection: [f32; 4],
    /// Index of the triangle that was hit.
    pub triangle_id: u32,
    /// Index of the ray that produced this hit.
    pub ray_id: u32,
    /// Index of the target that was hit.
    pub target_id: u32,
    /// Contribution of this hit to the radar cross-section.
    pub rcs_contribution: f32,
}

impl HitResult {
    /// A hit at `point`, `distance` along the ray, on a surface facing `normal`.
    ///
    /// Material 0, no reflection, full intensity, all ids zero.
    pub fn new(point: Point3, distance: f32, normal: Vec3) -> Self {
        Self {
            hit_point: [point.x, point.y, point.z, distance],
            normal: [normal.x, normal.y, normal.z, 0.0],
            reflection: [0.0, 0.0, 0.0, 1.0],
            triangle_id: 0,
            ray_id: 0,
            target_id: 0,
            rcs_contribution: 0.0,
        }
    }

    /// A miss for `ray_id`.
    pub fn miss(ray_id: u32) -> Self {
        Self {
            hit_point: [0.0, 0.0, 0.0, MISS_DISTANCE],
            reflection: [0.0; 4],
            ray_id,
            ..Self::zeroed()
        }
    }

    /// Set the material id.
    pub fn with_material(mut self, material_id: u32) -> Self {
        self.normal[3] = material_id as f32;
        self
    }

    /// Set the reflection direction and reflected intensity.
    pub fn with_reflection(mut self, direction: Vec3, intensity: f32) -> Self {
        self.reflection = [direction.x, direction.y, direction.z, intensity];
        self
    }

    /// Set the triangle, ray, and target ids.
    pub fn with_ids(mut self, triangle_id: u32, ray_id: u32, target_id: u32) -> Self {
        self.triangle_id = triangle_id;
        self.ray_id = ray_id;
        self.target_id = target_id;
        self
    }

    /// World hit position.
    pub fn hit_point(&self) -> Point3 {
        Point3::new(self.hit_point[0], self.hit_point[1], self.hit_point[2])
    }

    /// Distance along the ray, negative on a miss.
    pub fn distance(&self) -> f32 {
        self.hit_point[3]
    }

    /// Whether the ray missed.
    pub fn is_miss(&self) -> bool {
        self.distance() < 0.0
    }

    /// Surface normal at the hit.
    pub fn normal(&self) -> Vec3 {
        Vec3::new(self.normal[0], self.normal[1], self.normal[2])
    }

    /// Material id of the hit surface.
    pub fn material_id(&self) -> u32 {
        self.normal[3] as u32
    }

    /// Reflection direction.
    pub fn reflection_dir(&self) -> Vec3 {
        Vec3::new(self.reflection[0], self.reflection[1], self.reflection[2])
    }

    /// Reflected intensity.
    pub fn intensity(&self) -> f32 {
        self.reflection[3]
    }
}

/// Summary of a group of reflections leaving a target.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct ReflectionCluster {
    /// xyz = mean hit position, w = hit count.
    pub position: [f32; 4],
    /// xyz = mean reflection direction (unit), w unused.
    pub direction: [f32; 4],
    /// x = mean intensity, y = angular spread in radians, z = target id, w unused.
    pub properties: [f32; 4],
}

impl ReflectionCluster {
    /// Aggregate the non-miss hits of `hits`, or `None` if every ray missed.
    ///
    /// The spread is the widest angle between the mean direction and any
    /// member reflection. The target id is taken from the first hit.
    pub fn from_hits(hits: &[HitResult]) -> Option<Self> {
        let members: Vec<&HitResult> = hits.iter().filter(|h| !h.is_miss()).collect();
        let first = members.first()?;
        let count = members.len() as f32;

        let (pos_sum, dir_sum, intensity_sum) = members.iter().fold(
            (Vec3::zeros(), Vec3::zeros(), 0.0f32),
            |(p, d, i), h| {
                (
                    p + h.hit_point().coords,
                    d + h.reflection_dir().try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros),
                    i + h.intensity(),
                )
            },
        );

        let mean_pos = pos_sum / count;
        let mean_dir = dir_sum
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros);
        let spread = members
            .iter()
            .filter_map(|h| h.reflection_dir().try_normalize(f32::EPSILON))
            .map(|d| d.dot(&mean_dir).clamp(-1.0, 1.0).acos())
            .fold(0.0f32, f32::max);

        Some(Self {
            position: [mean_pos.x, mean_pos.y, mean_pos.z, count],
            direction: [mean_dir.x, mean_dir.y, mean_dir.z, 0.0],
            properties: [intensity_sum / count, spread, first.target_id as f32, 0.0],
        })
    }

    /// Mean hit position.
    pub fn position(&self) -> Point3 {
        Point3::new(self.position[0], self.position[1], self.position[2])
    }

    /// Number of hits in the cluster.
    pub fn hit_count(&self) -> u32 {
        self.position[3] as u32
    }

    /// Mean reflection direction.
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.direction[0], self.direction[1], self.direction[2])
    }

    /// Mean reflected intensity.
    pub fn intensity(&self) -> f32 {
        self.properties[0]
    }

    /// Angular spread in radians.
    pub fn spread(&self) -> f32 {
        self.properties[1]
    }

    /// Target the cluster belongs to.
    pub fn target_id(&self) -> u32 {
        self.properties[2] as u32
    }
}

const _: () = assert!(std::mem::size_of::<HitResult>() == 64);
const _: () = assert!(std::mem::size_of::<ReflectionCluster>() == 48);
