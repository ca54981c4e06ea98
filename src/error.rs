use std::path::PathBuf;

/// Reasons a move, undo, or reset request was turned away.
///
/// None of these reach the player: the coordinator drops the request and the
/// board stays as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("not this side's turn to act")]
    TurnViolation,

    #[error("the game is already over")]
    GameOver,

    #[error("column {0} cannot be played")]
    InvalidColumn(usize),
}

/// Errors from the background solving engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("engine thread is no longer accepting requests")]
    Disconnected,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "column 9 cannot be played"
        );
        assert_eq!(
            MoveError::TurnViolation.to_string(),
            "not this side's turn to act"
        );
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::Disconnected;
        assert_eq!(
            err.to_string(),
            "engine thread is no longer accepting requests"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("ui.tick_ms must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: ui.tick_ms must be > 0"
        );
    }
}
