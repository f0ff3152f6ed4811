use std::path::PathBuf;

/// Reasons a move is refused. The game state is unchanged in both cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range, choose a column between 1 and 7")]
    InvalidColumn(i64),

    #[error("column {0} is full")]
    ColumnFull(usize),
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

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::InvalidColumn(8).to_string(),
            "column 8 is out of range, choose a column between 1 and 7"
        );
        assert_eq!(MoveError::ColumnFull(3).to_string(), "column 3 is full");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("ui.start_column must be in [1, 7]".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: ui.start_column must be in [1, 7]"
        );
    }

    #[test]
    fn test_file_read_error_names_path() {
        let err = ConfigError::FileRead {
            path: PathBuf::from("connect_four.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read config file connect_four.toml: denied"
        );
    }
}
