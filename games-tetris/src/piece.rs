//! Falling piece

use rand::Rng;

use crate::shapes::{Rgb, ShapeKind};

/// Anchor column of a freshly spawned piece
pub const SPAWN_X: i32 = 5;
/// Anchor row of a freshly spawned piece
pub const SPAWN_Y: i32 = 0;

/// A shape instance at an anchor position and rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub x: i32,
    pub y: i32,
    pub kind: ShapeKind,
    /// Unbounded, taken modulo the shape's frame count
    pub rotation: i32,
}

impl Piece {
    /// Piece of `kind` at the spawn position
    pub fn spawn(kind: ShapeKind) -> Self {
        Self::at(kind, SPAWN_X, SPAWN_Y)
    }

    pub fn at(kind: ShapeKind, x: i32, y: i32) -> Self {
        Self { x, y, kind, rotation: 0 }
    }

    /// Spawned piece of a uniformly drawn kind
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::spawn(ShapeKind::random(rng))
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Absolute board cells covered by the piece, in frame scan order
    ///
    /// Independent of any board; rows may be negative above the visible area.
    pub fn occupied_cells(&self) -> Vec<(i32, i32)> {
        self.kind
            .shape()
            .offsets(self.rotation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}
