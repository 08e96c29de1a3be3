//! Core types shared across the blockfall crates
//! This module contains pure data types: geometry, colors, piece kinds and commands.

use std::ops::{Add, AddAssign, Sub};

use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// Grid dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor for new pieces
pub const SPAWN_COLUMN: i32 = 5;
pub const SPAWN_ROW: i32 = 0;

/// Points awarded for each cleared row
pub const SCORE_PER_LINE: u32 = 100;

/// Timing constants (in milliseconds)
pub const DESCENT_INTERVAL_MS: u64 = 500;
pub const FRAME_INTERVAL_MS: u64 = 10;

/// Integer 2D coordinate. `x` grows to the right, `y` grows downwards.
///
/// Values may be negative during intermediate calculations (rotated offsets,
/// candidate positions outside the grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate in place by the given offsets
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn push_x(&mut self, off: i32) {
        self.x += off;
    }

    pub fn push_y(&mut self, off: i32) {
        self.y += off;
    }

    /// Re-express this point relative to `origin`
    pub fn make_relative(&mut self, origin: Point) {
        self.x -= origin.x;
        self.y -= origin.y;
    }

    /// Swap the two axes
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.x, &mut self.y);
    }

    /// Copy of this point shifted by the given offsets
    pub const fn offset(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn to_array(self) -> [i32; 2] {
        [self.x, self.y]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.translate(rhs.x, rhs.y);
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Point::new(x, y)
    }
}

/// RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Color of a cell no piece is drawn on
    pub const BACKGROUND: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

/// Piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    L,
    J,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Fixed display color of the kind
    pub const fn color(self) -> Color {
        match self {
            PieceKind::O => Color::rgb(255, 255, 0),
            PieceKind::I => Color::rgb(0, 100, 150),
            PieceKind::S => Color::rgb(50, 250, 0),
            PieceKind::L => Color::rgb(255, 160, 30),
            PieceKind::J => Color::rgb(200, 20, 100),
            PieceKind::T => Color::rgb(250, 30, 0),
            PieceKind::Z => Color::rgb(220, 20, 170),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::S => "s",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Uniform draw over the seven kinds
impl Distribution<PieceKind> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// Player and session commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    HardDrop,
    Pause,
    Resume,
}

impl Command {
    /// Parse a command name (case-insensitive, short aliases accepted)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Command::MoveLeft),
            "moveright" | "right" => Some(Command::MoveRight),
            "rotate" | "up" => Some(Command::Rotate),
            "harddrop" | "drop" => Some(Command::HardDrop),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::Pause => "pause",
            Command::Resume => "resume",
        }
    }
}
