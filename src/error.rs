use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Unknown theme or size tier. Raised before any layout work starts.
    Configuration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
