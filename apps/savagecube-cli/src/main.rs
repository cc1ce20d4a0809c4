use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glam::{Mat4, Vec2, Vec3};
use savagecube_camera::{
    CameraController, CameraSettings, InteractionMode, MaxKey, Pose, Trajectory, TrajectorySample,
};
use savagecube_common::BoundingBox;
use savagecube_input::{FrameInput, InputEvent, MouseButtons};
use savagecube_mesh::{MemoryUploader, MeshBuffer, SphereParams};
use savagecube_render::{DebugTextRenderer, DrawList, Frame, FrameTimer, RenderView, Renderer};
use savagecube_scene::{CubeGrid, GridConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "savagecube-cli", about = "Headless front end for the savagecube engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with camera settings; missing fields keep their defaults
    #[arg(long, global = true)]
    camera_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate list
    Info,
    /// Generate a procedural shape and print its summary
    Shape {
        #[arg(value_enum)]
        kind: ShapeKind,
        /// Segments around the cylinder axis
        #[arg(long, default_value = "16")]
        segments: u32,
        /// Sphere sectors (longitude subdivisions)
        #[arg(long, default_value = "36")]
        sectors: u32,
        /// Sphere stacks (latitude subdivisions)
        #[arg(long, default_value = "18")]
        stacks: u32,
    },
    /// Load a binary STL file and print its summary
    Stl { path: PathBuf },
    /// Replay a JSON list of input events through the camera
    Camera {
        #[arg(long, value_enum, default_value = "free-flight")]
        mode: ModeArg,
        /// JSON array of input events
        #[arg(long)]
        events: PathBuf,
        /// Seconds per event
        #[arg(long, default_value = "0.016")]
        elapsed: f32,
    },
    /// Animate the cube grid and print the debug render of each frame
    Scene {
        #[arg(short, long, default_value = "3")]
        frames: u64,
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Frame time in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeKind {
    Box,
    Sphere,
    Cylinder,
    Quad,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    LookAround,
    FreeFlight,
    /// Circle of 360 keys around the origin
    TrajectoryFlight,
}

#[derive(Serialize)]
struct MeshSummary {
    submeshes: usize,
    vertices: usize,
    faces: usize,
    handle: u32,
    bounding_box: Option<BoundingBox>,
}

fn summarize(mut mesh: MeshBuffer) -> anyhow::Result<MeshSummary> {
    let mut uploader = MemoryUploader::new();
    let handle = mesh.finalize(&mut uploader)?;
    Ok(MeshSummary {
        submeshes: mesh.submeshes().len(),
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
        handle: handle.0,
        bounding_box: mesh.bounding_box(),
    })
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<CameraSettings> {
    let Some(path) = path else {
        return Ok(CameraSettings::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading camera config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing camera config {}", path.display()))
}

fn circle_trajectory() -> Trajectory {
    const KEYS: i32 = 360;
    let sampler = |key: i32| {
        let angle = (key as f32).to_radians();
        let position = Vec3::new(angle.cos(), 0.25, angle.sin()) * 10.0;
        Some(TrajectorySample::new(position, -position, Vec3::Y))
    };
    Trajectory::new(MaxKey::Fixed(KEYS), sampler).looped(true)
}

fn replay(camera: &mut CameraController, events: &[InputEvent], elapsed: f32) {
    let mut buttons = MouseButtons::NONE;
    for &event in events {
        match event {
            InputEvent::ButtonDown(b) => buttons.insert(b),
            InputEvent::ButtonUp(b) => buttons.remove(b),
            _ => {}
        }
        camera.update(&FrameInput::new(event, buttons, elapsed));
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("savagecube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("crates: common, input, camera, mesh, scene, render");
            let settings = load_settings(cli.camera_config.as_deref())?;
            println!("camera settings: {}", serde_json::to_string(&settings)?);
        }
        Commands::Shape {
            kind,
            segments,
            sectors,
            stacks,
        } => {
            let mut mesh = MeshBuffer::new();
            match kind {
                ShapeKind::Box => mesh.add_box(Vec3::ONE)?,
                ShapeKind::Sphere => mesh.add_sphere(&SphereParams {
                    sectors,
                    stacks,
                    ..SphereParams::default()
                })?,
                ShapeKind::Cylinder => mesh.add_cylinder(Vec3::ONE, segments)?,
                ShapeKind::Quad => mesh.add_quad(Vec2::ONE, &Mat4::IDENTITY)?,
            };
            println!("{}", serde_json::to_string_pretty(&summarize(mesh)?)?);
        }
        Commands::Stl { path } => {
            let mesh = savagecube_mesh::load_stl(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&summarize(mesh)?)?);
        }
        Commands::Camera {
            mode,
            events,
            elapsed,
        } => {
            let text = fs::read_to_string(&events)
                .with_context(|| format!("reading events {}", events.display()))?;
            let events: Vec<InputEvent> = serde_json::from_str(&text)
                .with_context(|| format!("parsing events {}", events.display()))?;

            let settings = load_settings(cli.camera_config.as_deref())?;
            let mode = match mode {
                ModeArg::LookAround => InteractionMode::LookAround,
                ModeArg::FreeFlight => InteractionMode::FreeFlight,
                ModeArg::TrajectoryFlight => InteractionMode::TrajectoryFlight(circle_trajectory()),
            };
            let mut camera = CameraController::from_settings(settings).with_mode(mode);
            camera.refresh_trajectory();
            replay(&mut camera, &events, elapsed);
            tracing::info!(events = events.len(), mode = camera.mode().name(), "replay done");
            println!("{}", serde_json::to_string_pretty(camera.pose())?);
        }
        Commands::Scene {
            frames,
            seed,
            frame_ms,
        } => {
            let settings = load_settings(cli.camera_config.as_deref())?;
            let mut camera = CameraController::from_settings(settings);
            camera.resize(1280, 720);
            *camera.pose_mut() =
                Pose::looking_at(Vec3::new(4.0, 12.0, -10.0), Vec3::new(4.0, 0.0, 8.0), Vec3::Y);
            camera.look_at();

            let mut uploader = MemoryUploader::new();
            let floor = CubeGrid::new(GridConfig {
                seed,
                ..GridConfig::floor()
            })?;
            let mut block = CubeGrid::new(GridConfig {
                seed: seed.wrapping_add(1),
                ..GridConfig::block()
            })?;
            let mut floor_mesh = floor.build_mesh()?;
            floor_mesh.finalize(&mut uploader)?;
            let mut block_mesh = block.build_mesh()?;
            block_mesh.finalize(&mut uploader)?;

            // simulated clock with a fixed frame step
            let mut timer = FrameTimer::default();
            let start = Instant::now();
            let step = Duration::from_millis(frame_ms);
            timer.tick(start);
            for number in 0..frames {
                let now = start + step.saturating_mul(number.saturating_add(1) as u32);
                let elapsed = timer.tick(now);
                let view = RenderView::from_camera(&camera);
                let mut draws = DrawList::new();
                // the floor stays at rest
                draws.push_instances(&floor_mesh, view.proj_view, &floor.instances(Mat4::IDENTITY));
                let block_anim = block.advance(elapsed);
                draws.push_instances(&block_mesh, view.proj_view, &block.instances(block_anim));
                let frame = Frame {
                    number,
                    view,
                    draws,
                    fps: timer.fps(),
                };
                print!("{}", DebugTextRenderer.render(&frame));
            }
        }
    }

    Ok(())
}
