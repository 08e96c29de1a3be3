//! Shape module - piece geometry and the clockwise rotation transform
//!
//! Offsets are relative to the piece's logical origin, which is not necessarily its
//! top-left cell. Rotation maps every offset `(dx, dy) -> (-dy, dx)` and never recenters,
//! so successive rotations are pure linear transforms of the stored offsets.

use crate::types::{PieceKind, Point};

/// Four cell offsets from the piece origin
pub type ShapeOffsets = [Point; 4];

const fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Canonical (spawn) offsets for a piece kind
pub const fn canonical_offsets(kind: PieceKind) -> ShapeOffsets {
    match kind {
        PieceKind::O => [p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
        PieceKind::I => [p(0, 0), p(0, 1), p(0, 2), p(0, 3)],
        PieceKind::S => [p(0, 0), p(1, 0), p(-1, 1), p(0, 1)],
        PieceKind::L => [p(0, 0), p(0, 1), p(0, 2), p(1, 2)],
        PieceKind::J => [p(0, 0), p(0, 1), p(0, 2), p(-1, 2)],
        PieceKind::T => [p(0, 0), p(1, 0), p(2, 0), p(1, 1)],
        PieceKind::Z => [p(0, 0), p(1, 0), p(1, 1), p(1, 2)],
    }
}

/// Extents of a shape around its origin, used for fast boundary tests.
///
/// `left` is a magnitude: the shape reaches `left` columns to the left of the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reach {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Reach {
    pub fn of(offsets: &ShapeOffsets) -> Self {
        offsets.iter().fold(Reach::default(), |acc, o| Reach {
            left: acc.left.max(-o.x),
            right: acc.right.max(o.x),
            bottom: acc.bottom.max(o.y),
        })
    }
}

/// Relative geometry of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    offsets: ShapeOffsets,
}

impl Shape {
    pub fn from_kind(kind: PieceKind) -> Self {
        Self {
            offsets: canonical_offsets(kind),
        }
    }

    pub fn from_offsets(offsets: ShapeOffsets) -> Self {
        Self { offsets }
    }

    pub fn offsets(&self) -> &ShapeOffsets {
        &self.offsets
    }

    /// Rotate 90 degrees clockwise in place.
    ///
    /// No bounds or collision awareness; legality is the caller's concern.
    pub fn rotate_clockwise(&mut self) {
        for o in &mut self.offsets {
            *o = Point::new(-o.y, o.x);
        }
    }

    /// Rotated copy, leaving `self` untouched
    pub fn rotated_clockwise(&self) -> Shape {
        let mut next = *self;
        next.rotate_clockwise();
        next
    }

    pub fn reach(&self) -> Reach {
        Reach::of(&self.offsets)
    }

    /// Absolute cells when anchored at `origin`
    pub fn cells_at(&self, origin: Point) -> [Point; 4] {
        self.offsets.map(|o| origin + o)
    }

    /// True if these offsets are the canonical offsets of `kind` after 0 to 3 rotations
    pub fn matches_kind(&self, kind: PieceKind) -> bool {
        let mut candidate = Shape::from_kind(kind);
        for _ in 0..4 {
            if candidate == *self {
                return true;
            }
            candidate.rotate_clockwise();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_maps_offsets() {
        let mut shape = Shape::from_kind(PieceKind::T);
        shape.rotate_clockwise();
        assert_eq!(
            shape.offsets(),
            &[p(0, 0), p(0, 1), p(0, 2), p(-1, 1)]
        );
    }

    #[test]
    fn test_rotated_copy_leaves_original() {
        let shape = Shape::from_kind(PieceKind::L);
        let rotated = shape.rotated_clockwise();
        assert_eq!(shape, Shape::from_kind(PieceKind::L));
        assert_ne!(rotated, shape);
    }

    #[test]
    fn test_reach_of_canonical_shapes() {
        assert_eq!(
            Shape::from_kind(PieceKind::I).reach(),
            Reach { left: 0, right: 0, bottom: 3 }
        );
        assert_eq!(
            Shape::from_kind(PieceKind::S).reach(),
            Reach { left: 1, right: 1, bottom: 1 }
        );
        assert_eq!(
            Shape::from_kind(PieceKind::T).reach(),
            Reach { left: 0, right: 2, bottom: 1 }
        );
    }

    #[test]
    fn test_matches_kind_accepts_rotations_only() {
        let mut shape = Shape::from_kind(PieceKind::J);
        for _ in 0..4 {
            assert!(shape.matches_kind(PieceKind::J));
            shape.rotate_clockwise();
        }
        assert!(!Shape::from_kind(PieceKind::J).matches_kind(PieceKind::L));
    }
}
