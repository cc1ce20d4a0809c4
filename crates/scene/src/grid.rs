use glam::{IVec3, Mat4, Vec3};
use savagecube_mesh::{MeshBuffer, MeshError};
use serde::{Deserialize, Serialize};

use crate::animation::{RotationAnimation, TranslationAnimation};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid grid config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// What a grid cell holds. The discriminant doubles as material index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubeStatus {
    Empty,
    Full,
    Magic,
    Indestructible,
}

impl CubeStatus {
    pub const ALL: [Self; 4] = [Self::Empty, Self::Full, Self::Magic, Self::Indestructible];

    pub fn material(self) -> u32 {
        self as u32
    }
}

/// Grid dimensions and animation timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub cube_size: Vec3,
    pub seed: u64,
    /// Seconds for a quarter turn and for one unit of travel.
    pub duration: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::floor()
    }
}

impl GridConfig {
    /// Flat tiles under the animated block.
    pub fn floor() -> Self {
        Self {
            rows: 32,
            cols: 8,
            cube_size: Vec3::new(0.99, 0.25, 0.99),
            seed: 0,
            duration: 15.0,
        }
    }

    /// The tumbling cubes.
    pub fn block() -> Self {
        Self {
            rows: 16,
            cube_size: Vec3::splat(0.99),
            ..Self::floor()
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SceneError::InvalidConfig(format!(
                "{} rows x {} cols",
                self.rows, self.cols
            )));
        }
        if !self.cube_size.is_finite() || self.cube_size.min_element() <= 0.0 {
            return Err(SceneError::InvalidConfig(format!(
                "cube size {}",
                self.cube_size
            )));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SceneError::InvalidConfig(format!(
                "animation duration {}",
                self.duration
            )));
        }
        Ok(())
    }
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: u32,
    pub status: CubeStatus,
    /// `(col, row, id)`.
    pub coords: IVec3,
    /// Placement at `(col, 0, row)`.
    pub translate: Mat4,
}

/// A model matrix ready to draw, with the material to bind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub model: Mat4,
    pub material: u32,
}

/// Splitmix64 sequence, reproducible across platforms.
#[derive(Debug, Clone, Copy)]
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

/// Rows x cols of cubes sharing one box mesh, all driven by the same
/// rotation and translation animations.
#[derive(Debug, Clone)]
pub struct CubeGrid {
    config: GridConfig,
    cells: Vec<Cell>,
    rotation: RotationAnimation,
    translation: TranslationAnimation,
}

impl CubeGrid {
    pub fn new(config: GridConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let mut rng = SplitMix64(config.seed);
        let mut cells = Vec::with_capacity((config.rows * config.cols) as usize);
        let mut id = 0u32;
        for col in 0..config.cols {
            for row in 0..config.rows {
                let status = CubeStatus::ALL[rng.below(CubeStatus::ALL.len() as u64) as usize];
                cells.push(Cell {
                    id,
                    status,
                    coords: IVec3::new(col as i32, row as i32, id as i32),
                    translate: Mat4::from_translation(Vec3::new(col as f32, 0.0, row as f32)),
                });
                id += 1;
            }
        }
        tracing::debug!(
            rows = config.rows,
            cols = config.cols,
            seed = config.seed,
            "cube grid built"
        );
        Ok(Self {
            rotation: RotationAnimation::new(config.duration),
            translation: TranslationAnimation::new(config.duration),
            config,
            cells,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// How many cells hold each status, in [`CubeStatus::ALL`] order.
    pub fn status_histogram(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for cell in &self.cells {
            counts[cell.status.material() as usize] += 1;
        }
        counts
    }

    /// The shared box mesh, not yet finalized.
    pub fn build_mesh(&self) -> Result<MeshBuffer, SceneError> {
        let mut mesh = MeshBuffer::new();
        mesh.add_box(self.config.cube_size)?;
        Ok(mesh)
    }

    /// Step both animations and return `translation * rotation`.
    pub fn advance(&mut self, elapsed: f32) -> Mat4 {
        let rotation = self.rotation.advance(elapsed);
        let translation = self.translation.advance(elapsed);
        translation * rotation
    }

    /// Current animation matrix without stepping.
    pub fn animation(&self) -> Mat4 {
        self.translation.matrix() * self.rotation.matrix()
    }

    pub fn rotation(&self) -> &RotationAnimation {
        &self.rotation
    }

    pub fn translation(&self) -> &TranslationAnimation {
        &self.translation
    }

    pub fn reset(&mut self) {
        self.rotation.reset();
        self.translation.reset();
    }

    /// `cell.translate * animation` for every cell, plus its material.
    pub fn instances(&self, animation: Mat4) -> Vec<Instance> {
        self.cells
            .iter()
            .map(|c| Instance {
                model: c.translate * animation,
                material: c.status.material(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_and_ids() {
        let grid = CubeGrid::new(GridConfig::block()).unwrap();
        assert_eq!(grid.cells().len(), 16 * 8);
        let cell = grid.cells()[17];
        // column-major: 16 rows per column
        assert_eq!(cell.coords, IVec3::new(1, 1, 17));
        assert_eq!(
            cell.translate.transform_point3(Vec3::ZERO),
            Vec3::new(1.0, 0.0, 1.0)
        );
    }

    #[test]
    fn statuses_follow_seed() {
        let a = CubeGrid::new(GridConfig { seed: 7, ..GridConfig::floor() }).unwrap();
        let b = CubeGrid::new(GridConfig { seed: 7, ..GridConfig::floor() }).unwrap();
        let c = CubeGrid::new(GridConfig { seed: 8, ..GridConfig::floor() }).unwrap();
        let statuses = |g: &CubeGrid| g.cells().iter().map(|c| c.status).collect::<Vec<_>>();
        assert_eq!(statuses(&a), statuses(&b));
        assert_ne!(statuses(&a), statuses(&c));
        // 256 draws should hit every status
        assert!(a.status_histogram().iter().all(|&n| n > 0));
    }

    #[test]
    fn instances_compose_cell_and_animation() {
        let mut grid = CubeGrid::new(GridConfig {
            rows: 2,
            cols: 2,
            duration: 1.0,
            ..GridConfig::floor()
        })
        .unwrap();
        let anim = grid.advance(1.0);
        assert_eq!(anim, grid.animation());
        let instances = grid.instances(anim);
        assert_eq!(instances.len(), 4);
        // last cell is (col 1, row 1); the animation adds one unit along z
        let origin = instances[3].model.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 0.0, 2.0)).length() < 1e-5);

        grid.reset();
        assert_eq!(grid.animation(), Mat4::IDENTITY);
    }

    #[test]
    fn rejects_bad_config() {
        assert!(CubeGrid::new(GridConfig { rows: 0, ..GridConfig::floor() }).is_err());
        assert!(CubeGrid::new(GridConfig { duration: 0.0, ..GridConfig::floor() }).is_err());
        assert!(
            CubeGrid::new(GridConfig {
                cube_size: Vec3::new(1.0, -1.0, 1.0),
                ..GridConfig::floor()
            })
            .is_err()
        );
    }

    #[test]
    fn shared_mesh_is_one_box() {
        let grid = CubeGrid::new(GridConfig::floor()).unwrap();
        let mesh = grid.build_mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        let size = mesh.bounding_box().unwrap().size;
        assert!((size - Vec3::new(0.99, 0.25, 0.99)).length() < 1e-6);
    }

    #[test]
    fn config_from_partial_json() {
        let cfg: GridConfig = serde_json::from_str(r#"{ "rows": 4, "seed": 3 }"#).unwrap();
        assert_eq!(cfg.rows, 4);
        assert_eq!(cfg.cols, 8);
        assert_eq!(cfg.seed, 3);
    }
}
