// SPDX-License-Identifier: MPL-2.0
//! Error types shared by configuration loading and the host port.
//!
//! The viewer itself never hands an error back to the host page: failures
//! inside a session degrade to "nothing changed" and are logged. These types
//! exist for the edges where a caller can act on them.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Fullscreen Error: {0}")]
    Fullscreen(#[from] FullscreenError),
}

/// Reasons a fullscreen request can fail.
///
/// Vendor-prefixed platform APIs are folded into one capability by the host,
/// so there is no per-vendor variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FullscreenError {
    /// The platform exposes no fullscreen API at all.
    #[error("fullscreen is not supported")]
    Unsupported,

    /// The platform refused the request (policy, user gesture, cancellation).
    #[error("fullscreen request denied: {0}")]
    Denied(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn from_toml_error_produces_config_variant() {
        let toml_err = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = toml_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn fullscreen_error_wraps_into_error() {
        let err: Error = FullscreenError::Denied("user cancelled".into()).into();
        assert_eq!(
            format!("{}", err),
            "Fullscreen Error: fullscreen request denied: user cancelled"
        );
    }

    #[test]
    fn unsupported_fullscreen_message() {
        assert_eq!(
            FullscreenError::Unsupported.to_string(),
            "fullscreen is not supported"
        );
    }
}
