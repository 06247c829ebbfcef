//! Static tetromino catalog
//!
//! Every shape is authored as a list of 5×5 glyph frames, one per rotation
//! state. `0` marks a filled cell.

use rand::Rng;

/// RGB cell color
pub type Rgb = (u8, u8, u8);

/// Color of an empty cell
pub const EMPTY: Rgb = (0, 0, 0);

/// Side length of an authoring frame
pub const FRAME_SIZE: usize = 5;

/// Translation from frame coordinates to board coordinates, relative to the anchor
pub const FRAME_OFFSET: (i32, i32) = (-2, -4);

type Frame = [&'static str; FRAME_SIZE];

/// One of the seven tetrominoes, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    S,
    Z,
    I,
    O,
    J,
    L,
    T,
}

/// Immutable catalog record
#[derive(Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: Rgb,
    frames: &'static [Frame],
}

static CATALOG: [Shape; 7] = [
    Shape {
        kind: ShapeKind::S,
        color: (0, 255, 0),
        frames: &[
            [".....", ".....", "..00.", ".00..", "....."],
            [".....", "..0..", "..00.", "...0.", "....."],
        ],
    },
    Shape {
        kind: ShapeKind::Z,
        color: (255, 0, 0),
        frames: &[
            [".....", ".....", ".00..", "..00.", "....."],
            [".....", "..0..", ".00..", ".0...", "....."],
        ],
    },
    Shape {
        kind: ShapeKind::I,
        color: (0, 255, 255),
        frames: &[
            ["..0..", "..0..", "..0..", "..0..", "....."],
            [".....", "0000.", ".....", ".....", "....."],
        ],
    },
    Shape {
        kind: ShapeKind::O,
        color: (255, 255, 0),
        frames: &[[".....", ".....", ".00..", ".00..", "....."]],
    },
    Shape {
        kind: ShapeKind::J,
        color: (255, 165, 0),
        frames: &[
            [".....", ".0...", ".000.", ".....", "....."],
            [".....", "..00.", "..0..", "..0..", "....."],
            [".....", ".....", ".000.", "...0.", "....."],
            [".....", "..0..", "..0..", ".00..", "....."],
        ],
    },
    Shape {
        kind: ShapeKind::L,
        color: (0, 0, 255),
        frames: &[
            [".....", "...0.", ".000.", ".....", "....."],
            [".....", "..0..", "..0..", "..00.", "....."],
            [".....", ".....", ".000.", ".0...", "....."],
            [".....", ".00..", "..0..", "..0..", "....."],
        ],
    },
    Shape {
        kind: ShapeKind::T,
        color: (128, 0, 128),
        frames: &[
            [".....", "..0..", ".000.", ".....", "....."],
            [".....", "..0..", "..00.", "..0..", "....."],
            [".....", ".....", ".000.", "..0..", "....."],
            [".....", "..0..", ".00..", "..0..", "....."],
        ],
    },
];

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::T,
    ];

    /// Catalog record for this kind
    pub fn shape(self) -> &'static Shape {
        &CATALOG[self.index()]
    }

    /// Position in the catalog
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ShapeKind> {
        Self::ALL.get(index).copied()
    }

    pub fn color(self) -> Rgb {
        self.shape().color
    }

    /// Kind whose color is `color`, if any
    pub fn from_color(color: Rgb) -> Option<ShapeKind> {
        Self::ALL.into_iter().find(|kind| kind.color() == color)
    }

    /// Uniform draw over the catalog
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> ShapeKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl Shape {
    /// Number of authored rotation frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame used for `rotation`; any integer wraps around
    pub fn frame(&self, rotation: i32) -> &'static Frame {
        let frames: &'static [Frame] = self.frames;
        &frames[rotation.rem_euclid(frames.len() as i32) as usize]
    }

    /// Filled cells of the frame, row-major, already shifted by `FRAME_OFFSET`
    pub fn offsets(&self, rotation: i32) -> impl Iterator<Item = (i32, i32)> {
        self.frame(rotation).iter().enumerate().flat_map(|(row, line)| {
            line.bytes()
                .enumerate()
                .filter(|&(_, glyph)| glyph == b'0')
                .map(move |(col, _)| (col as i32 + FRAME_OFFSET.0, row as i32 + FRAME_OFFSET.1))
        })
    }
}
