//! Scene graph, camera and lights, plus the context that ties them to a renderer.

pub(crate) mod camera;
pub(crate) mod context;
pub(crate) mod graph;
pub(crate) mod light;
pub(crate) mod mesh;
pub(crate) mod texture;
