use std::collections::BTreeMap;
use std::fmt::Write;

use glam::{Mat4, Vec3};
use savagecube_camera::CameraController;

use crate::draw::DrawList;

/// Camera state a renderer needs, detached from the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub mode: &'static str,
    /// `projection * view * transform`.
    pub proj_view: Mat4,
}

impl RenderView {
    pub fn from_camera(camera: &CameraController) -> Self {
        let pose = camera.pose();
        Self {
            eye: pose.eye(),
            target: pose.target,
            fov_degrees: camera.projection_params().fov_y.to_degrees(),
            mode: camera.mode().name(),
            proj_view: camera.proj_view_transform(),
        }
    }
}

/// Everything submitted for one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub number: u64,
    pub view: RenderView,
    pub draws: DrawList,
    pub fps: f32,
}

/// Trait for rendering backends.
pub trait Renderer {
    type Output;

    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Writes a plain-text summary of each frame, one line per material.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugTextRenderer;

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let mut out = String::new();
        let v = &frame.view;
        // writing to a String cannot fail
        let _ = writeln!(out, "=== Frame {} ({:.1} fps) ===", frame.number, frame.fps);
        let _ = writeln!(
            out,
            "Camera [{}]: eye={} target={} fov={:.1}",
            v.mode, v.eye, v.target, v.fov_degrees
        );
        let _ = writeln!(
            out,
            "Draws: {} ({} indices)",
            frame.draws.len(),
            frame.draws.index_total()
        );

        let mut per_material: BTreeMap<u32, usize> = BTreeMap::new();
        for cmd in frame.draws.commands() {
            *per_material.entry(cmd.material).or_default() += 1;
        }
        for (material, count) in per_material {
            let _ = writeln!(out, "  material {material}: {count}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savagecube_mesh::MemoryUploader;
    use savagecube_scene::{CubeGrid, GridConfig};

    fn grid_frame(camera: &CameraController) -> Frame {
        let mut grid = CubeGrid::new(GridConfig {
            rows: 2,
            cols: 2,
            seed: 1,
            ..GridConfig::block()
        })
        .unwrap();
        let mut mesh = grid.build_mesh().unwrap();
        mesh.finalize(&mut MemoryUploader::new()).unwrap();
        let anim = grid.advance(0.5);

        let view = RenderView::from_camera(camera);
        let mut draws = DrawList::new();
        draws.push_instances(&mesh, view.proj_view, &grid.instances(anim));
        Frame {
            number: 3,
            view,
            draws,
            fps: 60.0,
        }
    }

    #[test]
    fn view_mirrors_camera() {
        let camera = CameraController::new();
        let view = RenderView::from_camera(&camera);
        assert_eq!(view.eye, camera.pose().eye());
        assert_eq!(view.mode, "free-flight");
        assert!((view.fov_degrees - 60.0).abs() < 1e-4);
        assert_eq!(view.proj_view, camera.proj_view_transform());
    }

    #[test]
    fn debug_text_lists_frame_and_materials() {
        let camera = CameraController::new();
        let frame = grid_frame(&camera);
        let text = DebugTextRenderer.render(&frame);
        assert!(text.starts_with("=== Frame 3 (60.0 fps) ==="));
        assert!(text.contains("Camera [free-flight]"));
        assert!(text.contains("Draws: 4 (144 indices)"));
        let material_lines = text.lines().filter(|l| l.starts_with("  material")).count();
        assert!((1..=4).contains(&material_lines));
    }
}
