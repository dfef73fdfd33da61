use thiserror::Error;

/// Errors raised while loading reference data, resolving pipe parameters,
/// or assembling an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PricingError {
    /// The caller supplied insufficient or invalid parameters.
    #[error("input error: {0}")]
    Input(String),

    /// A requested key (grade, SDR, PN, diameter, catalog entry) is not in the
    /// reference data.
    #[error("not found: {0}")]
    NotFound(String),

    /// Reference data is malformed (unparseable or missing cell).
    #[error("data error: {0}")]
    Data(String),

    /// Invoice number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Configuration could not be read or is out of range.
    #[error("config error: {0}")]
    Config(String),

    /// The issue-date source could not produce a date.
    #[error("clock error: {0}")]
    Clock(String),

    /// File access failed (reference tables, counter, config).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`PricingError`], for callers that pick a
/// message style per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Input,
    NotFound,
    Data,
    Numbering,
    Config,
    Clock,
    Io,
}

impl PricingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::Input,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Data(_) => ErrorKind::Data,
            Self::Numbering(_) => ErrorKind::Numbering,
            Self::Config(_) => ErrorKind::Config,
            Self::Clock(_) => ErrorKind::Clock,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// A money calculation left the representable `Decimal` range.
    pub(crate) fn out_of_range() -> Self {
        Self::Input("amount out of range".into())
    }

    /// Whether the user can fix this by correcting the form input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Input | ErrorKind::NotFound)
    }
}

impl From<csv::Error> for PricingError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            _ => Self::Data(message),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_category() {
        let err = PricingError::NotFound("pipe grade PE40".into());
        assert_eq!(err.to_string(), "not found: pipe grade PE40");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn recoverable_only_for_user_errors() {
        assert!(PricingError::Input("x".into()).is_recoverable());
        assert!(PricingError::NotFound("x".into()).is_recoverable());
        assert!(!PricingError::Data("x".into()).is_recoverable());
        assert!(!PricingError::Config("x".into()).is_recoverable());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PricingError = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
