use glam::Mat4;
use savagecube_mesh::MeshBuffer;
use savagecube_scene::Instance;
use serde::Serialize;

/// One indexed draw call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCommand {
    /// `projection * view * transform * model`.
    pub mvp: Mat4,
    pub material: u32,
    pub first_index: usize,
    pub index_count: usize,
}

/// Ordered draw calls for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// One command per submesh of `mesh`, each with its own material.
    ///
    /// # Panics
    /// If `mesh` is not finalized.
    pub fn push_mesh(&mut self, mesh: &MeshBuffer, mvp: Mat4) {
        self.commands
            .extend(mesh.draw_ranges().into_iter().map(|r| DrawCommand {
                mvp,
                material: r.material,
                first_index: r.first_index,
                index_count: r.index_count,
            }));
    }

    /// Draw `mesh` once per instance, binding the instance's material in
    /// place of the submesh material.
    ///
    /// # Panics
    /// If `mesh` is not finalized.
    pub fn push_instances(&mut self, mesh: &MeshBuffer, proj_view: Mat4, instances: &[Instance]) {
        let ranges = mesh.draw_ranges();
        for instance in instances {
            let mvp = proj_view * instance.model;
            self.commands.extend(ranges.iter().map(|r| DrawCommand {
                mvp,
                material: instance.material,
                first_index: r.first_index,
                index_count: r.index_count,
            }));
        }
        tracing::trace!(instances = instances.len(), total = self.commands.len(), "instances queued");
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn index_total(&self) -> usize {
        self.commands.iter().map(|c| c.index_count).sum()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
