use nalgebra::{Matrix4, Perspective3, Point3};

use crate::foundation::error::{IntroError, IntroResult};

/// Perspective camera looking down its local −Z axis.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    fov_deg: f64,
    aspect: f64,
    near: f64,
    far: f64,
    /// World-space position.
    pub position: Point3<f64>,
    projection: Matrix4<f64>,
}

impl PerspectiveCamera {
    /// Create a camera at the origin. `fov_deg` is the vertical field of view.
    pub fn new(fov_deg: f64, aspect: f64, near: f64, far: f64) -> IntroResult<Self> {
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            return Err(IntroError::validation(format!(
                "camera fov must be in (0, 180) degrees, got {fov_deg}"
            )));
        }
        if !(near > 0.0 && far > near) {
            return Err(IntroError::validation(format!(
                "camera clip planes must satisfy 0 < near < far, got near={near} far={far}"
            )));
        }
        validate_aspect(aspect)?;

        let mut cam = Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Point3::origin(),
            projection: Matrix4::identity(),
        };
        cam.update_projection_matrix();
        Ok(cam)
    }

    /// Vertical field of view in degrees.
    pub fn fov_deg(&self) -> f64 {
        self.fov_deg
    }

    /// Width / height of the view.
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Near clip distance.
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Far clip distance.
    pub fn far(&self) -> f64 {
        self.far
    }

    /// Change the aspect ratio and rebuild the projection.
    pub fn set_aspect(&mut self, aspect: f64) -> IntroResult<()> {
        validate_aspect(aspect)?;
        self.aspect = aspect;
        self.update_projection_matrix();
        Ok(())
    }

    fn update_projection_matrix(&mut self) {
        self.projection =
            Perspective3::new(self.aspect, self.fov_deg.to_radians(), self.near, self.far)
                .to_homogeneous();
    }

    /// World space to camera space. The camera never rotates.
    fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&(-self.position.coords))
    }

    /// Distance along the view axis from the camera to a point.
    pub fn depth_of(&self, p: &Point3<f64>) -> f64 {
        self.position.z - p.z
    }

    /// Height of the visible region at `distance` in front of the camera.
    pub fn visible_height_at(&self, distance: f64) -> f64 {
        2.0 * distance * (self.fov_deg.to_radians() / 2.0).tan()
    }

    /// Width of the visible region at `distance` in front of the camera.
    pub fn visible_width_at(&self, distance: f64) -> f64 {
        self.visible_height_at(distance) * self.aspect
    }

    /// Project a world-space point to normalized device coordinates (`x`, `y` in `[-1, 1]`
    /// when visible). Returns `None` for points behind the camera.
    pub fn project(&self, p: &Point3<f64>) -> Option<Point3<f64>> {
        if self.depth_of(p) <= 0.0 {
            return None;
        }
        let clip = self.projection * self.view_matrix() * p.to_homogeneous();
        if clip.w.abs() < 1e-12 {
            return None;
        }
        Some(Point3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w))
    }
}

fn validate_aspect(aspect: f64) -> IntroResult<()> {
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(IntroError::validation(format!(
            "camera aspect must be > 0, got {aspect}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
