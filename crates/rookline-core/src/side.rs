//! The two sides of the board

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Side encoded by the FEN active-colour field (`w` or `b`)
    pub fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    /// Side owning a FEN piece letter (uppercase is white)
    pub fn of_piece_letter(c: char) -> Option<Self> {
        if !"pnbrqkPNBRQK".contains(c) {
            return None;
        }
        if c.is_ascii_uppercase() {
            Some(Side::White)
        } else {
            Some(Side::Black)
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Side::White.opposite(), Side::Black);
        assert_eq!(Side::Black.opposite(), Side::White);
    }

    #[test]
    fn test_piece_letters() {
        assert_eq!(Side::of_piece_letter('K'), Some(Side::White));
        assert_eq!(Side::of_piece_letter('p'), Some(Side::Black));
        assert_eq!(Side::of_piece_letter('x'), None);
        assert_eq!(Side::of_piece_letter('3'), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let text = ron::to_string(&Side::Black).unwrap();
        assert_eq!(text, "black");
        let side: Side = ron::from_str("white").unwrap();
        assert_eq!(side, Side::White);
    }
}
