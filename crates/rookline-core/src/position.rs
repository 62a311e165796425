//! Canonical position encoding
//!
//! A position is a full board + turn + rights snapshot in Forsyth-Edwards
//! Notation. The authority's encoding is canonical: positions received from
//! the wire are stored verbatim and only inspected lazily, so a malformed
//! string never prevents the client from mirroring what it was told.

use crate::{Error, Result, Side, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A board snapshot in FEN
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(String);

impl Position {
    /// FEN of the standard starting position
    pub const START_FEN: &'static str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// The standard starting position
    pub fn start() -> Self {
        Self(Self::START_FEN.to_string())
    }

    /// Parse and validate a FEN string
    ///
    /// Checks the piece placement and active colour fields. Castling,
    /// en-passant and clock fields are left to the rules engine.
    pub fn parse(fen: impl Into<String>) -> Result<Self> {
        let position = Self(fen.into());
        position.side_to_move()?;
        position.placement_rows()?;
        Ok(position)
    }

    /// Wrap a string without validating it
    pub fn from_fen_unchecked(fen: impl Into<String>) -> Self {
        Self(fen.into())
    }

    /// The FEN string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Side whose turn it is
    pub fn side_to_move(&self) -> Result<Side> {
        let field = self
            .0
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| Error::invalid_position(&self.0, "missing active colour"))?;
        let mut chars = field.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Side::from_fen_char(c)
                .ok_or_else(|| Error::invalid_position(&self.0, "bad active colour")),
            _ => Err(Error::invalid_position(&self.0, "bad active colour")),
        }
    }

    /// Owner of the piece standing on `square`, if any
    pub fn side_at(&self, square: Square) -> Result<Option<Side>> {
        let rows = self.placement_rows()?;
        // FEN lists the eighth rank first
        let row = rows[7 - square.rank() as usize];
        let mut file = 0u8;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
                continue;
            }
            if file == square.file() {
                return Ok(Side::of_piece_letter(c));
            }
            file += 1;
        }
        Ok(None)
    }

    fn placement_rows(&self) -> Result<Vec<&str>> {
        let placement = self
            .0
            .split_whitespace()
            .next()
            .ok_or_else(|| Error::invalid_position(&self.0, "empty"))?;
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(Error::invalid_position(&self.0, "expected 8 ranks"));
        }
        for row in &rows {
            let mut width = 0u32;
            for c in row.chars() {
                match c.to_digit(10) {
                    Some(n @ 1..=8) => width += n,
                    Some(_) => return Err(Error::invalid_position(&self.0, "bad empty count")),
                    None if Side::of_piece_letter(c).is_some() => width += 1,
                    None => return Err(Error::invalid_position(&self.0, "bad piece letter")),
                }
            }
            if width != 8 {
                return Err(Error::invalid_position(&self.0, "rank is not 8 squares wide"));
            }
        }
        Ok(rows)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
