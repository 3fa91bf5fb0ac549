use crate::math::{Matrix4, Point3, Vector3};

/// Perspective lens parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Distance to the near clipping plane.
    pub near: f64,
    /// Distance to the far clipping plane.
    pub far: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.01,
            far: 10000.0,
        }
    }
}

/// Orbit camera looking at the origin, where imported meshes are centered.
///
/// The eye sits at `(0, 1, distance)`; the mesh is then tilted by `h_angle`
/// degrees about X and turned by `v_angle` degrees about Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f64,
    pub h_angle: f64,
    pub v_angle: f64,
    /// Distance step per zoom notch.
    pub increment: f64,
    pub lens: ProjectionParams,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: 1.0,
            h_angle: 0.0,
            v_angle: 0.0,
            increment: 1.0,
            lens: ProjectionParams::default(),
        }
    }
}

impl Camera {
    /// A camera placed to frame a mesh of the given extent.
    #[must_use]
    pub fn framing(extent: f64) -> Self {
        Self {
            distance: extent,
            increment: extent / 10.0,
            ..Self::default()
        }
    }

    /// Perspective projection with a square aspect ratio, mapping depth to
    /// `[-1, 1]`.
    #[must_use]
    pub fn projection(&self) -> Matrix4 {
        Matrix4::new_perspective(
            1.0,
            self.lens.fov_y_degrees.to_radians(),
            self.lens.near,
            self.lens.far,
        )
    }

    /// World-to-eye transform.
    #[must_use]
    pub fn model_view(&self) -> Matrix4 {
        let eye = Point3::new(0.0, 1.0, self.distance);
        let look = Matrix4::look_at_rh(&eye, &Point3::origin(), &Vector3::y());
        let tilt = Matrix4::from_axis_angle(&Vector3::x_axis(), self.h_angle.to_radians());
        let turn = Matrix4::from_axis_angle(&Vector3::y_axis(), self.v_angle.to_radians());
        look * tilt * turn
    }
}
