//! On-disk records, format version 1

use blockfall_core::{CellSnapshot, GameSnapshot, PieceSnapshot};
use blockfall_types::{Color, PieceKind, Point};
use serde::{Deserialize, Serialize};

use crate::SaveError;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub score: u32,
    pub game_on: bool,
    /// Row-major, row 0 on top
    pub grid: Vec<Vec<SavedCell>>,
    pub current: SavedPiece,
    pub next: SavedPiece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCell {
    pub color: [u8; 3],
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPiece {
    pub kind: String,
    pub origin: [i32; 2],
    pub offsets: Vec<[i32; 2]>,
    pub color: [u8; 3],
    pub active: bool,
}

impl From<&PieceSnapshot> for SavedPiece {
    fn from(piece: &PieceSnapshot) -> Self {
        Self {
            kind: piece.kind.as_str().to_string(),
            origin: piece.origin.to_array(),
            offsets: piece.offsets.iter().map(|o| o.to_array()).collect(),
            color: piece.color.to_array(),
            active: piece.active,
        }
    }
}

impl TryFrom<&SavedPiece> for PieceSnapshot {
    type Error = SaveError;

    fn try_from(saved: &SavedPiece) -> Result<Self, SaveError> {
        let kind = PieceKind::from_str(&saved.kind)
            .ok_or_else(|| SaveError::UnknownKind(saved.kind.clone()))?;
        let offsets: [[i32; 2]; 4] = saved
            .offsets
            .as_slice()
            .try_into()
            .map_err(|_| SaveError::OffsetCount(saved.offsets.len()))?;
        Ok(Self {
            kind,
            offsets: offsets.map(Point::from),
            origin: Point::from(saved.origin),
            color: Color::from(saved.color),
            active: saved.active,
        })
    }
}

impl From<&GameSnapshot> for SaveFile {
    fn from(snapshot: &GameSnapshot) -> Self {
        Self {
            version: FORMAT_VERSION,
            score: snapshot.score,
            game_on: snapshot.game_on,
            grid: snapshot
                .cells
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| SavedCell {
                            color: cell.color.to_array(),
                            locked: cell.locked,
                        })
                        .collect()
                })
                .collect(),
            current: SavedPiece::from(&snapshot.current),
            next: SavedPiece::from(&snapshot.next),
        }
    }
}

impl TryFrom<&SaveFile> for GameSnapshot {
    type Error = SaveError;

    /// Converts and validates; a snapshot that comes out of here is safe to restore
    fn try_from(file: &SaveFile) -> Result<Self, SaveError> {
        if file.version != FORMAT_VERSION {
            return Err(SaveError::Version(file.version));
        }
        let snapshot = GameSnapshot {
            cells: file
                .grid
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| CellSnapshot {
                            color: Color::from(cell.color),
                            locked: cell.locked,
                        })
                        .collect()
                })
                .collect(),
            current: PieceSnapshot::try_from(&file.current)?,
            next: PieceSnapshot::try_from(&file.next)?,
            score: file.score,
            game_on: file.game_on,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::Engine;

    fn saved() -> SaveFile {
        let mut engine = Engine::seeded(3);
        engine.tick();
        SaveFile::from(&engine.snapshot())
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let mut file = saved();
        file.current.kind = "q".to_string();
        let err = GameSnapshot::try_from(&file).unwrap_err();
        assert!(matches!(err, SaveError::UnknownKind(k) if k == "q"));
    }

    #[test]
    fn test_offset_count_rejected() {
        let mut file = saved();
        file.next.offsets.pop();
        let err = GameSnapshot::try_from(&file).unwrap_err();
        assert!(matches!(err, SaveError::OffsetCount(3)));
    }

    #[test]
    fn test_version_rejected() {
        let mut file = saved();
        file.version = 2;
        assert!(matches!(
            GameSnapshot::try_from(&file),
            Err(SaveError::Version(2))
        ));
    }

    #[test]
    fn test_short_grid_is_invalid_state() {
        let mut file = saved();
        file.grid.pop();
        let err = GameSnapshot::try_from(&file).unwrap_err();
        assert!(matches!(err, SaveError::Invalid(_)));
        assert!(err.to_string().starts_with("invalid save state"));
    }
}
