use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A triangle: three indices into a vertex position array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Face(pub [u32; 3]);

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self([a, b, c])
    }

    /// True when two of the three indices are equal.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.0;
        a == b || b == c || a == c
    }

    /// Largest index referenced by this face.
    pub fn max_index(&self) -> u32 {
        self.0[0].max(self.0[1]).max(self.0[2])
    }

    /// Same face with every index shifted by `offset`.
    pub fn rebased(&self, offset: u32) -> Self {
        let [a, b, c] = self.0;
        Self([a + offset, b + offset, c + offset])
    }
}

impl From<[u32; 3]> for Face {
    fn from(ids: [u32; 3]) -> Self {
        Self(ids)
    }
}

/// Axis-aligned bounding box stored as center + extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Center of the box.
    pub position: Vec3,
    /// Full extent along each axis.
    pub size: Vec3,
}

impl BoundingBox {
    /// Single linear min/max scan. `None` for an empty point set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self {
            position: 0.5 * (min + max),
            size: max - min,
        })
    }

    pub fn min(&self) -> Vec3 {
        self.position - 0.5 * self.size
    }

    pub fn max(&self) -> Vec3 {
        self.position + 0.5 * self.size
    }

    /// Longest of the three extents.
    pub fn longest_side(&self) -> f32 {
        self.size.max_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_degeneracy() {
        assert!(!Face::new(0, 1, 2).is_degenerate());
        assert!(Face::new(0, 0, 2).is_degenerate());
        assert!(Face::new(3, 1, 3).is_degenerate());
        assert!(Face::new(4, 5, 5).is_degenerate());
    }

    #[test]
    fn face_rebase_and_max() {
        let f = Face::new(0, 2, 1).rebased(10);
        assert_eq!(f, Face::new(10, 12, 11));
        assert_eq!(f.max_index(), 12);
    }

    #[test]
    fn bounding_box_of_points() {
        let pts = [
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(1.0, 3.0, -2.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let bb = BoundingBox::from_points(&pts).unwrap();
        assert_eq!(bb.size, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(bb.position, Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(bb.min(), Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(bb.max(), Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(bb.longest_side(), 4.0);
    }

    #[test]
    fn bounding_box_tracks_decreasing_then_increasing() {
        // first point is neither min nor max on x
        let pts = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
        ];
        let bb = BoundingBox::from_points(&pts).unwrap();
        assert_eq!(bb.size.x, 10.0);
    }

    #[test]
    fn empty_bounding_box() {
        let none: [Vec3; 0] = [];
        assert!(BoundingBox::from_points(&none).is_none());
    }
}
