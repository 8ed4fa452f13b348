use nalgebra::{Point3, Vector3};

use crate::foundation::core::Rgb;

/// Light sources supported by the scene graph.
///
/// Irradiance follows the physically based conventions of common WebGL engines: punctual lights
/// scale by `N·L`, point lights fall off with inverse-square distance.
#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    /// Uniform light from every direction.
    Ambient {
        /// Linear color.
        color: Rgb,
        /// Intensity multiplier.
        intensity: f64,
    },
    /// Parallel rays shining from `position` toward the origin.
    Directional {
        /// Linear color.
        color: Rgb,
        /// Intensity multiplier.
        intensity: f64,
        /// Light position; only its direction from the origin matters.
        position: Point3<f64>,
    },
    /// Sky/ground gradient keyed on the surface normal's Y component.
    Hemisphere {
        /// Color for normals facing +Y.
        sky: Rgb,
        /// Color for normals facing −Y.
        ground: Rgb,
        /// Intensity multiplier.
        intensity: f64,
    },
    /// Omnidirectional light at a position.
    Point {
        /// Linear color.
        color: Rgb,
        /// Intensity multiplier.
        intensity: f64,
        /// World-space position.
        position: Point3<f64>,
    },
}

impl Light {
    /// Irradiance this light delivers to a surface point with unit normal `normal`.
    pub fn irradiance(&self, at: &Point3<f64>, normal: &Vector3<f64>) -> Rgb {
        match self {
            Self::Ambient { color, intensity } => color.scale(*intensity),
            Self::Directional {
                color,
                intensity,
                position,
            } => {
                let l = position.coords.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
                color.scale(intensity * normal.dot(&l).max(0.0))
            }
            Self::Hemisphere {
                sky,
                ground,
                intensity,
            } => {
                let w = 0.5 * normal.y + 0.5;
                ground.lerp(*sky, w).scale(*intensity)
            }
            Self::Point {
                color,
                intensity,
                position,
            } => {
                let to_light = position - at;
                let dist_sq = to_light.norm_squared();
                let Some(l) = to_light.try_normalize(1e-12) else {
                    return Rgb::BLACK;
                };
                let falloff = 1.0 / dist_sq.max(0.01);
                color.scale(intensity * normal.dot(&l).max(0.0) * falloff)
            }
        }
    }

    /// Short kind name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ambient { .. } => "ambient",
            Self::Directional { .. } => "directional",
            Self::Hemisphere { .. } => "hemisphere",
            Self::Point { .. } => "point",
        }
    }
}
