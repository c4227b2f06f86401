use thiserror::Error;

use crate::model::PropertyId;

#[derive(Error, Debug)]
pub enum AttrError {
    /// The value kind has no source form; callers must serialize it themselves.
    #[error("Source form of '{tag}' attributes is not supported")]
    SourceUnsupported { tag: &'static str },

    /// The value kind only has a placeholder source form for now.
    #[error("Source form of '{tag}' attributes cannot be represented yet")]
    SourceIncomplete { tag: &'static str },

    #[error("Type mismatch: attribute holds '{expected}' values, got '{found}'")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unknown attribute '{keyword}' for {class}")]
    UnknownAttribute { keyword: String, class: &'static str },

    #[error("Attribute '{keyword}' is already defined for {class}")]
    DuplicateAttribute { keyword: String, class: &'static str },

    #[error("Attribute '{0}' is not declared on this property")]
    NotDeclared(String),

    #[error("Property not found: {0}")]
    UnknownProperty(PropertyId),

    #[error("Unknown type tag: {0}")]
    UnknownTypeTag(String),

    #[error("Invalid weekday index: {0}")]
    InvalidWeekday(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AttrError>;
