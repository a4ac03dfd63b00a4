use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    UnknownSynonymVersion {
        requested: String,
        known: Vec<&'static str>,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSynonymVersion { requested, known } => write!(
                f,
                "unknown synonym table version '{}' (known versions: {})",
                requested,
                known.join(", ")
            ),
        }
    }
}

impl Error for ConfigurationError {}

#[cfg(test)]
mod tests {
    use super::ConfigurationError;

    #[test]
    fn test_unknown_version_message_lists_known_versions() {
        let err = ConfigurationError::UnknownSynonymVersion {
            requested: "v9".to_string(),
            known: vec!["v1", "v2"],
        };

        assert_eq!(
            err.to_string(),
            "unknown synonym table version 'v9' (known versions: v1, v2)"
        );
    }

    #[test]
    fn test_boxes_as_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ConfigurationError::UnknownSynonymVersion {
            requested: String::new(),
            known: Vec::new(),
        });

        assert!(err.to_string().starts_with("unknown synonym table version ''"));
    }
}
