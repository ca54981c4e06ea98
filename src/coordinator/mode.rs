use crate::game::{Player, Position};

/// Which side, if any, the engine plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PlayMode {
    #[default]
    HumanVsHuman,
    EnginePlaysFirst,
    EnginePlaysSecond,
}

impl PlayMode {
    /// The color the engine plays in this mode.
    pub fn engine_player(self) -> Option<Player> {
        match self {
            PlayMode::HumanVsHuman => None,
            PlayMode::EnginePlaysFirst => Some(Player::Red),
            PlayMode::EnginePlaysSecond => Some(Player::Yellow),
        }
    }

    pub fn engine_plays(self) -> bool {
        self.engine_player().is_some()
    }

    pub fn is_engines_turn(self, position: &Position) -> bool {
        self.engine_player() == Some(position.side_to_move())
    }

    /// Next mode in the order the UI cycles through them.
    pub fn next(self) -> PlayMode {
        match self {
            PlayMode::HumanVsHuman => PlayMode::EnginePlaysFirst,
            PlayMode::EnginePlaysFirst => PlayMode::EnginePlaysSecond,
            PlayMode::EnginePlaysSecond => PlayMode::HumanVsHuman,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayMode::HumanVsHuman => "Human vs Human",
            PlayMode::EnginePlaysFirst => "Engine plays Red",
            PlayMode::EnginePlaysSecond => "Engine plays Yellow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engines_turn_follows_parity() {
        let start = Position::new();
        let one_move = Position::from_moves(&[3]).unwrap();

        assert!(PlayMode::EnginePlaysFirst.is_engines_turn(&start));
        assert!(!PlayMode::EnginePlaysFirst.is_engines_turn(&one_move));
        assert!(!PlayMode::EnginePlaysSecond.is_engines_turn(&start));
        assert!(PlayMode::EnginePlaysSecond.is_engines_turn(&one_move));
        assert!(!PlayMode::HumanVsHuman.is_engines_turn(&start));
        assert!(!PlayMode::HumanVsHuman.is_engines_turn(&one_move));
    }

    #[test]
    fn test_cycle_visits_every_mode() {
        let mode = PlayMode::HumanVsHuman;
        assert_eq!(mode.next().next().next(), mode);
        assert!(mode.next().engine_plays());
    }

    #[test]
    fn test_serde_names() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            mode: PlayMode,
        }
        let parsed: Wrapper = toml::from_str("mode = \"engine-plays-second\"").unwrap();
        assert_eq!(parsed.mode, PlayMode::EnginePlaysSecond);
    }
}
