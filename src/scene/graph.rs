use std::collections::BTreeMap;

use nalgebra::Point3;

use crate::{
    foundation::core::Rgb,
    foundation::error::{IntroError, IntroResult},
    scene::light::Light,
    scene::mesh::{GeometryId, Mesh, MeshId, PlaneGeometry, VideoMaterial},
    scene::texture::{TextureId, VideoTexture},
};

/// Scene graph: background, lights, meshes, and the textures meshes reference.
#[derive(Debug)]
pub struct Scene {
    /// Clear color behind every mesh.
    pub background: Rgb,
    lights: Vec<Light>,
    meshes: Vec<Mesh>,
    textures: BTreeMap<TextureId, VideoTexture>,
    next_id: u64,
}

impl Scene {
    /// Empty scene with a background color.
    pub fn new(background: Rgb) -> Self {
        Self {
            background,
            lights: Vec::new(),
            meshes: Vec::new(),
            textures: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        tracing::debug!(kind = light.kind(), "light added");
        self.lights.push(light);
    }

    /// All lights in insertion order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Allocate a plane geometry with a fresh id.
    pub fn new_plane_geometry(&mut self, width: f64, height: f64) -> IntroResult<PlaneGeometry> {
        let id = GeometryId(self.alloc_id());
        PlaneGeometry::new(id, width, height)
    }

    /// Add a mesh centered at `position`.
    pub fn add_mesh(
        &mut self,
        geometry: PlaneGeometry,
        material: VideoMaterial,
        position: Point3<f64>,
    ) -> MeshId {
        let id = MeshId(self.alloc_id());
        self.meshes.push(Mesh::new(id, geometry, material, position));
        id
    }

    /// All meshes in draw order.
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Look up a mesh.
    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.id() == id)
    }

    /// Look up a mesh for mutation.
    pub fn mesh_mut(&mut self, id: MeshId) -> IntroResult<&mut Mesh> {
        self.meshes
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| IntroError::validation(format!("unknown mesh {id:?}")))
    }

    /// Create an empty video texture of the given size.
    pub fn add_video_texture(&mut self, width: u32, height: u32) -> IntroResult<TextureId> {
        let id = TextureId(self.alloc_id());
        let tex = VideoTexture::new(id, width, height)?;
        self.textures.insert(id, tex);
        Ok(id)
    }

    /// Look up a texture.
    pub fn texture(&self, id: TextureId) -> Option<&VideoTexture> {
        self.textures.get(&id)
    }

    /// Look up a texture for mutation.
    pub fn texture_mut(&mut self, id: TextureId) -> IntroResult<&mut VideoTexture> {
        self.textures
            .get_mut(&id)
            .ok_or_else(|| IntroError::validation(format!("unknown texture {id:?}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
