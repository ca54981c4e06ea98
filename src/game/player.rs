#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// Player to move after `ply` stones have been played. Red moves first.
    pub fn from_ply(ply: usize) -> Player {
        if ply % 2 == 0 {
            Player::Red
        } else {
            Player::Yellow
        }
    }

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// True for the player who makes the first move.
    pub fn is_first(self) -> bool {
        self == Player::Red
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Yellow => "Yellow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::Red.other(), Player::Yellow);
        assert_eq!(Player::Yellow.other(), Player::Red);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::Red.name(), "Red");
        assert_eq!(Player::Yellow.name(), "Yellow");
    }

    #[test]
    fn test_from_ply_alternates() {
        assert_eq!(Player::from_ply(0), Player::Red);
        assert_eq!(Player::from_ply(1), Player::Yellow);
        assert_eq!(Player::from_ply(42), Player::Red);
        assert!(Player::from_ply(0).is_first());
    }
}
