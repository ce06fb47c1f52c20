use thiserror::Error;

use crate::value::ValueKind;

/// Boxed error raised by a user supplied transformation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ParseError {
    // Registration errors.
    #[error("Option already exists!")]
    DuplicateOption { name: String },
    #[error("An option needs at least one name!")]
    EmptyNames,

    // Scan errors.
    #[error("Missing program name (argv[0])!")]
    MissingProgramName,
    #[error("Invalid arguments provided!")]
    InvalidArgument { token: String },
    #[error("After the {option} option should be an extra argument!")]
    MissingValue { option: String },
    #[error("After the {option} option should be at least an extra argument!")]
    MissingValues { option: String },

    // Value errors.
    #[error("{message}")]
    Constraint { option: String, message: String },
    #[error("Invalid value for {option}: {source}")]
    Transformation {
        option: String,
        #[source]
        source: BoxError,
    },
    #[error("The option {option} holds a {found} value, not a {expected}")]
    TypeMismatch {
        option: String,
        expected: ValueKind,
        found: ValueKind,
    },

    // Completeness and lookup errors.
    #[error("Missing option {0}")]
    MissingOption(String),
    #[error("No default value")]
    NoDefaultValue { option: String },
    #[error("The option {0} was not assigned at the parser")]
    UnknownOption(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    /// The option (or raw token) the error is about, when there is one.
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::DuplicateOption { name } => Some(name.as_str()),
            Self::InvalidArgument { token } => Some(token.as_str()),
            Self::MissingValue { option }
            | Self::MissingValues { option }
            | Self::Constraint { option, .. }
            | Self::Transformation { option, .. }
            | Self::TypeMismatch { option, .. }
            | Self::NoDefaultValue { option } => Some(option.as_str()),
            Self::MissingOption(name) | Self::UnknownOption(name) => Some(name.as_str()),
            Self::EmptyNames | Self::MissingProgramName => None,
        }
    }

    pub(crate) fn transformation(option: &str, source: impl Into<BoxError>) -> Self {
        Self::Transformation {
            option: option.to_string(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_parser_contract() {
        let err = ParseError::MissingValue {
            option: "--single".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "After the --single option should be an extra argument!"
        );
        let err = ParseError::MissingValues {
            option: "-c".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "After the -c option should be at least an extra argument!"
        );
        assert_eq!(
            ParseError::MissingOption("-v".to_string()).to_string(),
            "Missing option -v"
        );
        assert_eq!(
            ParseError::UnknownOption("-x".to_string()).to_string(),
            "The option -x was not assigned at the parser"
        );
    }

    #[test]
    fn transformation_keeps_source() {
        let source = "abc".parse::<i32>().unwrap_err();
        let err = ParseError::transformation("-p", source);
        assert_eq!(err.option(), Some("-p"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Invalid value for -p: "));
    }
}
