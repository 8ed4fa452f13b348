use nalgebra::{Point3, Vector3};

use crate::{
    foundation::core::Rgb,
    foundation::error::{IntroError, IntroResult},
    scene::texture::TextureId,
};

/// Identifier of a geometry allocation. Every replacement gets a fresh id.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GeometryId(pub u64);

/// Identifier of a mesh in a [`crate::Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshId(pub u64);

/// Axis-aligned rectangle in the XY plane, centered on its mesh, facing +Z.
#[derive(Debug, PartialEq)]
pub struct PlaneGeometry {
    id: GeometryId,
    width: f64,
    height: f64,
}

impl PlaneGeometry {
    pub(crate) fn new(id: GeometryId, width: f64, height: f64) -> IntroResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(IntroError::validation(format!(
                "plane geometry must have positive size, got {width}x{height}"
            )));
        }
        Ok(Self { id, width, height })
    }

    /// Allocation id.
    pub fn id(&self) -> GeometryId {
        self.id
    }

    /// Width in world units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in world units.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Front-face normal. Planes are built facing +Z, toward the camera.
    pub fn normal(&self) -> Vector3<f64> {
        Vector3::z()
    }
}

/// Which faces of a mesh are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Front faces only.
    #[default]
    Front,
    /// Both faces.
    Double,
}

/// Lit material whose color and emissive channels may both sample a video texture.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMaterial {
    /// Diffuse color multiplier; channels above 1 brighten the map.
    pub color: Rgb,
    /// Diffuse texture.
    pub map: Option<TextureId>,
    /// Emissive color.
    pub emissive: Rgb,
    /// Emissive texture, multiplied with `emissive`.
    pub emissive_map: Option<TextureId>,
    /// Emissive multiplier.
    pub emissive_intensity: f64,
    /// Opacity in `[0, 1]`, honored when `transparent` is set.
    pub opacity: f64,
    /// Blend with what is behind instead of overwriting.
    pub transparent: bool,
    /// Drawn faces.
    pub side: Side,
}

impl Default for VideoMaterial {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            map: None,
            emissive: Rgb::BLACK,
            emissive_map: None,
            emissive_intensity: 1.0,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
        }
    }
}

impl VideoMaterial {
    /// Effective opacity after the `transparent` switch.
    pub fn effective_opacity(&self) -> f64 {
        if self.transparent {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Geometry + material placed in the world.
#[derive(Debug)]
pub struct Mesh {
    id: MeshId,
    geometry: PlaneGeometry,
    /// Surface material.
    pub material: VideoMaterial,
    /// Center of the mesh in world space.
    pub position: Point3<f64>,
}

impl Mesh {
    pub(crate) fn new(
        id: MeshId,
        geometry: PlaneGeometry,
        material: VideoMaterial,
        position: Point3<f64>,
    ) -> Self {
        Self {
            id,
            geometry,
            material,
            position,
        }
    }

    /// Mesh id.
    pub fn id(&self) -> MeshId {
        self.id
    }

    /// Attached geometry.
    pub fn geometry(&self) -> &PlaneGeometry {
        &self.geometry
    }

    /// Attach `geometry`, handing back the one it replaces so the caller can dispose of it.
    #[must_use = "the detached geometry should be disposed"]
    pub fn replace_geometry(&mut self, geometry: PlaneGeometry) -> PlaneGeometry {
        std::mem::replace(&mut self.geometry, geometry)
    }
}
