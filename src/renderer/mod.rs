pub mod mesh;
pub mod shader;

use glam::{Mat4, Vec3};
use hecs::World;
use mesh::Mesh;
use shader::ShaderProgram;
use tracing::debug;

use crate::components::{Checkerboard, Color, GlobalTransform, MeshHandle};
use crate::error::GfxError;
use crate::geometry::MeshData;

const VERT_SRC: &str = include_str!("../../shaders/cel.vert");
const FRAG_SRC: &str = include_str!("../../shaders/cel.frag");

const FOG_COLOR: Vec3 = Vec3::new(0.1, 0.1, 0.15);
const LIGHT_DIR: Vec3 = Vec3::new(-0.5, -1.0, -0.3);

struct MeshSlot {
    data: MeshData,
    gpu: Option<Mesh>,
}

/// Holds all meshes. Entities reference meshes by MeshHandle index.
///
/// Geometry is kept CPU-side and uploaded lazily by [`MeshStore::upload_pending`],
/// so scene code can add and replace meshes without a GL context.
#[derive(Default)]
pub struct MeshStore {
    slots: Vec<MeshSlot>,
}

impl MeshStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, data: MeshData) -> MeshHandle {
        let handle = MeshHandle(self.slots.len());
        self.slots.push(MeshSlot { data, gpu: None });
        handle
    }

    /// Swap the geometry behind `handle`. Returns false for an unknown handle.
    pub fn replace(&mut self, handle: MeshHandle, data: MeshData) -> bool {
        match self.slots.get_mut(handle.0) {
            Some(slot) => {
                slot.data = data;
                slot.gpu = None;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Upload every new or replaced mesh. Needs a current GL context.
    pub fn upload_pending(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.gpu.is_none() {
                debug!(index, triangles = slot.data.indices.len() / 3, "uploading mesh");
                slot.gpu = Some(Mesh::upload(&slot.data));
            }
        }
    }

    fn gpu(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.slots.get(handle.0).and_then(|s| s.gpu.as_ref())
    }
}

pub struct Renderer {
    shader: ShaderProgram,
}

impl Renderer {
    pub fn init() -> Result<Self, GfxError> {
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::ClearColor(FOG_COLOR.x, FOG_COLOR.y, FOG_COLOR.z, 1.0);
        }

        let shader = ShaderProgram::from_sources(VERT_SRC, FRAG_SRC)?;

        Ok(Self { shader })
    }

    pub fn set_viewport(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn draw_scene(
        &mut self,
        world: &World,
        meshes: &mut MeshStore,
        view: &Mat4,
        proj: &Mat4,
        camera_pos: Vec3,
    ) {
        meshes.upload_pending();

        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        self.shader.bind();
        self.shader.set_mat4("u_view", view);
        self.shader.set_mat4("u_projection", proj);
        self.shader.set_vec3("u_light_dir", LIGHT_DIR);
        self.shader.set_vec3("u_camera_pos", camera_pos);
        self.shader.set_vec3("u_ambient_color", Vec3::new(0.15, 0.15, 0.15));
        self.shader.set_vec3("u_fog_color", FOG_COLOR);
        self.shader.set_float("u_fog_start", 50.0);
        self.shader.set_float("u_fog_end", 300.0);

        for (_entity, (global_transform, mesh_handle, color, checker)) in world
            .query::<(&GlobalTransform, &MeshHandle, &Color, Option<&Checkerboard>)>()
            .iter()
        {
            let Some(mesh) = meshes.gpu(*mesh_handle) else {
                continue;
            };
            self.shader.set_mat4("u_model", &global_transform.0);
            self.shader.set_vec3("u_object_color", color.0);
            if let Some(checker) = checker {
                self.shader.set_int("u_checkerboard", 1);
                self.shader.set_vec3("u_object_color_2", checker.0);
            } else {
                self.shader.set_int("u_checkerboard", 0);
            }
            mesh.draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::cuboid;

    #[test]
    fn store_tracks_cpu_side_meshes() {
        let mut store = MeshStore::new();
        assert!(store.is_empty());
        let a = store.add(cuboid(1.0, 1.0, 1.0));
        let b = store.add(MeshData::default());
        assert_eq!((a, b), (MeshHandle(0), MeshHandle(1)));
        assert!(store.slots.iter().all(|s| s.gpu.is_none()));

        assert!(store.replace(b, cuboid(2.0, 1.0, 1.0)));
        assert_eq!(store.slots[b.0].data.indices.len(), 36);
        assert!(!store.replace(MeshHandle(9), MeshData::default()));
        assert_eq!(store.len(), 2);
    }
}
