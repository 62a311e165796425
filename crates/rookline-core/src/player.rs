//! Room membership

use crate::{PlayerId, Side};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A member of a room as reported by the authority
///
/// `side` is only known once the game has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub side: Option<Side>,
}

impl Player {
    /// Create a player without a side assignment
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            side: None,
        }
    }

    /// Set the side assignment
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }
}

/// Players present in a room, in the order the authority listed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: IndexMap<PlayerId, Player>,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole roster with a fresh listing
    pub fn replace(&mut self, players: impl IntoIterator<Item = Player>) {
        self.players = players.into_iter().map(|p| (p.id.clone(), p)).collect();
    }

    /// Whether anyone other than `local` is present
    pub fn has_peer_of(&self, local: &PlayerId) -> bool {
        self.players.keys().any(|id| id != local)
    }

    /// Whether `id` is present
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    /// Display names in listing order
    pub fn names(&self) -> Vec<&str> {
        self.players.values().map(|p| p.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_keeps_order() {
        let mut roster = Roster::new();
        roster.replace(vec![Player::new("b", "Bob"), Player::new("a", "Alice")]);
        assert_eq!(roster.names(), vec!["Bob", "Alice"]);

        roster.replace(vec![Player::new("a", "Alice")]);
        assert_eq!(roster.names(), vec!["Alice"]);
    }

    #[test]
    fn test_has_peer_of() {
        let alice = PlayerId::new("a");
        let mut roster = Roster::new();
        roster.replace(vec![Player::new("a", "Alice")]);
        assert!(!roster.has_peer_of(&alice));

        roster.replace(vec![
            Player::new("a", "Alice").with_side(Side::White),
            Player::new("b", "Bob").with_side(Side::Black),
        ]);
        assert!(roster.has_peer_of(&alice));
        assert!(!roster.has_peer_of(&PlayerId::new("c")));
    }
}
