// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public leaf types: node identifiers and the local transform triple.

use glam::{Mat4, Vec3};

/// Identifier for a node in a [`Scene`](crate::Scene).
///
/// This is a small, copyable handle that stays stable across tree mutations but
/// becomes invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On allocation, a fresh slot starts at generation `1`.
/// - On removal, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether a `NodeId` still refers to a
/// live node. Stale `NodeId`s never alias a different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
/// - A `NodeId` is only meaningful for the [`Scene`](crate::Scene) that produced it. A handle
///   minted by a different scene is indistinguishable from a stale one and is treated as dangling.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Local transform of a node relative to its parent space.
///
/// Rotation is a triple of Euler angles in degrees, composed Z, then Y, then X.
/// That order and the degree units are part of the output contract; see
/// [`Transform::local_matrix`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub translate: Vec3,
    /// Euler angles in degrees, composed Z, then Y, then X.
    pub rotate: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform: zero translation, zero rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translate: Vec3::ZERO,
        rotate: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Whether this transform is exactly the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The local matrix: `translate · rotate_z · rotate_y · rotate_x · scale`.
    pub fn local_matrix(&self) -> Mat4 {
        let rotate = Mat4::from_rotation_z(self.rotate.z.to_radians())
            * Mat4::from_rotation_y(self.rotate.y.to_radians())
            * Mat4::from_rotation_x(self.rotate.x.to_radians());
        Mat4::from_translation(self.translate) * rotate * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-5;

    #[test]
    fn identity_transform_is_identity_matrix() {
        assert!(Transform::IDENTITY.is_identity());
        assert!(
            Transform::IDENTITY
                .local_matrix()
                .abs_diff_eq(Mat4::IDENTITY, EPS),
            "identity triple must compose to the identity matrix"
        );
    }

    #[test]
    fn rotation_is_in_degrees() {
        let tf = Transform {
            rotate: Vec3::new(0.0, 0.0, 90.0),
            ..Transform::IDENTITY
        };
        let v = tf.local_matrix() * Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert!(
            v.truncate().abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPS),
            "a 90 degree z rotation must map +x to +y, got {v:?}"
        );
    }

    #[test]
    fn rotation_composes_z_then_y_then_x() {
        // Applied to a vector, the x rotation acts first and the z rotation
        // last. With rx = rz = 90 the +y axis lands on +z; the reverse order
        // would land it on -x.
        let tf = Transform {
            rotate: Vec3::new(90.0, 0.0, 90.0),
            ..Transform::IDENTITY
        };
        let v = tf.local_matrix() * Vec4::new(0.0, 1.0, 0.0, 0.0);
        assert!(
            v.truncate().abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), EPS),
            "rotation order must be z·y·x, got {v:?}"
        );
    }

    #[test]
    fn scale_applies_before_rotation_before_translation() {
        let tf = Transform {
            translate: Vec3::new(1.0, 0.0, 0.0),
            rotate: Vec3::new(0.0, 0.0, 90.0),
            scale: Vec3::splat(2.0),
        };
        let p = tf.local_matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(
            p.truncate().abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), EPS),
            "expected scale, then rotate, then translate, got {p:?}"
        );
    }
}
