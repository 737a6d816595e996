use super::{Matrix4, Point3, Transform, Vec3};

/// Creates a new `Transform` that is a translation by (`x`, `y`, `z`).
pub fn translation(x: f64, y: f64, z: f64) -> Transform {
    let m = Matrix4::new(
        1.0, 0.0, 0.0, x, //
        0.0, 1.0, 0.0, y, //
        0.0, 0.0, 1.0, z, //
        0.0, 0.0, 0.0, 1.0,
    );
    let m_inv = Matrix4::new(
        1.0, 0.0, 0.0, -x, //
        0.0, 1.0, 0.0, -y, //
        0.0, 0.0, 1.0, -z, //
        0.0, 0.0, 0.0, 1.0,
    );

    Transform::new_full(m, m_inv)
}

/// Creates a new `Transform` that is a scaling by `x`, `y` and `z`.
///
/// Panics if any of the factors is zero.
pub fn scale(x: f64, y: f64, z: f64) -> Transform {
    assert!(
        x != 0.0 && y != 0.0 && z != 0.0,
        "Degenerate scale ({}, {}, {})",
        x,
        y,
        z
    );
    let m = Matrix4::new(
        x, 0.0, 0.0, 0.0, //
        0.0, y, 0.0, 0.0, //
        0.0, 0.0, z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );
    let m_inv = Matrix4::new(
        1.0 / x, 0.0, 0.0, 0.0, //
        0.0, 1.0 / y, 0.0, 0.0, //
        0.0, 0.0, 1.0 / z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );

    Transform::new_full(m, m_inv)
}

/// Creates a new `Transform` that is a rotation of `theta` radians around the x-axis.
pub fn rotation_x(theta: f64) -> Transform {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let m = Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, cos_theta, -sin_theta, 0.0, //
        0.0, sin_theta, cos_theta, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );

    Transform::new_full(m, m.transpose())
}

/// Creates a new `Transform` that is a rotation of `theta` radians around the y-axis.
pub fn rotation_y(theta: f64) -> Transform {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let m = Matrix4::new(
        cos_theta, 0.0, sin_theta, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        -sin_theta, 0.0, cos_theta, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );

    Transform::new_full(m, m.transpose())
}

/// Creates a new `Transform` that is a rotation of `theta` radians around the z-axis.
pub fn rotation_z(theta: f64) -> Transform {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let m = Matrix4::new(
        cos_theta, -sin_theta, 0.0, 0.0, //
        sin_theta, cos_theta, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );

    Transform::new_full(m, m.transpose())
}

/// Creates a new `Transform` that is a rotation of `theta` radians around `axis`.
pub fn rotation(theta: f64, axis: Vec3) -> Transform {
    let a = axis.normalize();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let m = Matrix4::new(
        a.x * a.x + (1.0 - a.x * a.x) * cos_theta,
        a.x * a.y * (1.0 - cos_theta) - a.z * sin_theta,
        a.x * a.z * (1.0 - cos_theta) + a.y * sin_theta,
        0.0,
        a.x * a.y * (1.0 - cos_theta) + a.z * sin_theta,
        a.y * a.y + (1.0 - a.y * a.y) * cos_theta,
        a.y * a.z * (1.0 - cos_theta) - a.x * sin_theta,
        0.0,
        a.x * a.z * (1.0 - cos_theta) - a.y * sin_theta,
        a.y * a.z * (1.0 - cos_theta) + a.x * sin_theta,
        a.z * a.z + (1.0 - a.z * a.z) * cos_theta,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
    );

    Transform::new_full(m, m.transpose())
}

/// Creates a new shearing `Transform`. `xy` moves x in proportion to y and so on.
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Transform {
    Transform::new(Matrix4::new(
        1.0, xy, xz, 0.0, //
        yx, 1.0, yz, 0.0, //
        zx, zy, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ))
}

/// Creates a world_to_camera `Transform` with the eye at `from` looking at `to` with `up` as the up vector.
pub fn view_transform(from: Point3, to: Point3, up: Vec3) -> Transform {
    let forward = (to - from).normalize();
    let left = forward.cross(&up.normalize());
    let true_up = left.cross(&forward);
    let orientation = Matrix4::new(
        left.x, left.y, left.z, 0.0, //
        true_up.x, true_up.y, true_up.z, 0.0, //
        -forward.x, -forward.y, -forward.z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );

    // Orientation is orthonormal so its inverse is the transpose
    let orientation = Transform::new_full(orientation, orientation.transpose());
    translation(-from.x, -from.y, -from.z).then(&orientation)
}
