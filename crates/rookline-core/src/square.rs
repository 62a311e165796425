//! Board squares in algebraic notation

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A square on the 8x8 board
///
/// `file` 0 is the a-file, `rank` 0 is the first rank (white's back rank).
/// Serialized as its algebraic name, e.g. `"e4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square from zero-based file and rank
    pub fn new(file: u8, rank: u8) -> Result<Self> {
        if file < 8 && rank < 8 {
            Ok(Self { file, rank })
        } else {
            Err(Error::InvalidSquare(format!("file {} rank {}", file, rank)))
        }
    }

    /// Zero-based file index (a = 0)
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Zero-based rank index (first rank = 0)
    pub fn rank(&self) -> u8 {
        self.rank
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(Error::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).map_err(|_| Error::InvalidSquare(s.to_string()))
    }
}

impl TryFrom<String> for Square {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, (b'1' + self.rank) as char)
    }
}
