use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Per-field validation failures, collected rather than short-circuited so a
/// form can display every error at once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn total(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.errors
            .iter()
            .flat_map(|(f, msgs)| msgs.iter().map(move |m| (*f, m.as_str())))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
}

impl ApiError {
    /// A server-side rejection surfaced verbatim under a single key.
    pub fn rejected(message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::default();
        errors.push("server", message);
        ApiError::Validation(errors)
    }
}
