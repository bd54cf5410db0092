//! Error types for node construction and document loading.

use thiserror::Error;

/// A node was constructed in a way that can never render meaningful shell text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// An n-ary node received fewer commands than its operator needs.
    #[error("{node} needs at least {min} command(s), got {given}")]
    TooFewCommands {
        node: &'static str,
        min: usize,
        given: usize,
    },
}

/// Failure to turn a tree document into a node tree.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML document: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_commands_message() {
        let err = CommandError::TooFewCommands {
            node: "Pipe",
            min: 2,
            given: 1,
        };
        assert_eq!(err.to_string(), "Pipe needs at least 2 command(s), got 1");
    }

    #[test]
    fn command_error_is_transparent_in_document_error() {
        let err = DocumentError::from(CommandError::TooFewCommands {
            node: "And",
            min: 1,
            given: 0,
        });
        assert_eq!(err.to_string(), "And needs at least 1 command(s), got 0");
    }
}
