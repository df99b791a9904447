//! Plane rotations in 4D space
//!
//! In 4D, rotations happen in planes rather than around axes.
//! There are 6 rotation planes: XY, XZ, YZ, XW, YW, ZW. A rotation in a
//! plane is the standard 2D rotation applied to that coordinate pair,
//! leaving the other two coordinates untouched.

use crate::Vec4;

/// The 6 rotation planes in 4D space
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationPlane {
    /// XY plane - standard yaw (rotation around Z axis in 3D)
    XY,
    /// XZ plane - standard pitch (rotation around Y axis in 3D)
    XZ,
    /// YZ plane - standard roll (rotation around X axis in 3D)
    YZ,
    /// XW plane - ana-kata rotation affecting X
    XW,
    /// YW plane - ana-kata rotation affecting Y
    YW,
    /// ZW plane - ana-kata rotation affecting Z
    ZW,
}

/// Rotate a vector by `angle` radians within a single plane.
///
/// The rotation is norm-preserving on the affected coordinate pair and the
/// identity on the other two coordinates.
pub fn rotate_in_plane(v: Vec4, plane: RotationPlane, angle: f32) -> Vec4 {
    let (sin, cos) = angle.sin_cos();
    let spin = |a: f32, b: f32| (a * cos - b * sin, a * sin + b * cos);

    let mut out = v;
    match plane {
        RotationPlane::XY => (out.x, out.y) = spin(v.x, v.y),
        RotationPlane::XZ => (out.x, out.z) = spin(v.x, v.z),
        RotationPlane::YZ => (out.y, out.z) = spin(v.y, v.z),
        RotationPlane::XW => (out.x, out.w) = spin(v.x, v.w),
        RotationPlane::YW => (out.y, out.w) = spin(v.y, v.w),
        RotationPlane::ZW => (out.z, out.w) = spin(v.z, v.w),
    }
    out
}
