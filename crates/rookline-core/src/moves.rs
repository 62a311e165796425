//! Moves as the user expresses them

use crate::{Error, Result, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Piece chosen when a pawn reaches the last rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Lowercase piece letter used in coordinate notation
    pub fn letter(self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }
}

impl FromStr for Promotion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "q" | "queen" => Ok(Promotion::Queen),
            "r" | "rook" => Ok(Promotion::Rook),
            "b" | "bishop" => Ok(Promotion::Bishop),
            "n" | "knight" => Ok(Promotion::Knight),
            _ => Err(Error::InvalidPromotion(s.to_string())),
        }
    }
}

/// A piece picked up at `origin` and dropped at `destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub origin: Square,
    pub destination: Square,
    pub promotion: Option<Promotion>,
}

impl Move {
    /// Create a move without a promotion choice
    pub fn new(origin: Square, destination: Square) -> Self {
        Self {
            origin,
            destination,
            promotion: None,
        }
    }

    /// Set the promotion choice
    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotion = Some(promotion);
        self
    }

    /// Parse coordinate notation such as `e2e4` or `e7e8q`
    pub fn parse(text: &str) -> Result<Self> {
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(Error::IllegalMove(format!("unreadable move {:?}", text)));
        }
        let origin = text[0..2].parse()?;
        let destination = text[2..4].parse()?;
        let mut mv = Move::new(origin, destination);
        if text.len() == 5 {
            mv = mv.with_promotion(text[4..].parse()?);
        }
        Ok(mv)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let mv = Move::parse("e2e4").unwrap();
        assert_eq!(mv.origin.to_string(), "e2");
        assert_eq!(mv.destination.to_string(), "e4");
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn test_parse_promotion() {
        let mv = Move::parse("a7a8n").unwrap();
        assert_eq!(mv.promotion, Some(Promotion::Knight));
        assert_eq!(mv.to_string(), "a7a8n");
    }

    #[test]
    fn test_parse_errors() {
        assert!(Move::parse("e2").is_err());
        assert!(Move::parse("e2e9").is_err());
        assert!(Move::parse("e7e8x").is_err());
    }

    #[test]
    fn test_promotion_default_is_queen() {
        assert_eq!(Promotion::default(), Promotion::Queen);
        assert_eq!("Queen".parse::<Promotion>().unwrap(), Promotion::Queen);
    }
}
