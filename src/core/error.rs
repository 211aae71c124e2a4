use std::fmt;

/// Errors raised while constructing a controller. Construction does not
/// complete when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No host surface was supplied in the options.
    MissingElement,
    /// The render surface has no sections to navigate between.
    NoSections,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MissingElement => write!(f, "element is required"),
            ConfigurationError::NoSections => write!(f, "element has no sections"),
        }
    }
}

impl std::error::Error for ConfigurationError {}
