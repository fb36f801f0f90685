//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the birthday crate.
#[derive(Debug)]
pub enum GreetingError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// An image or other asset could not be fetched or decoded.
    AssetLoad {
        /// Asset path or URL.
        path: String,
        /// What went wrong.
        reason: String,
    },
    /// Viewer event-loop failure.
    Viewer(String),
    /// A browser API call failed.
    Web(String),
}

impl fmt::Display for GreetingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::AssetLoad { path, reason } => {
                write!(f, "failed to load {path}: {reason}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Web(msg) => write!(f, "browser error: {msg}"),
        }
    }
}

impl std::error::Error for GreetingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for GreetingError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for GreetingError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(feature = "web")]
impl From<wasm_bindgen::JsValue> for GreetingError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Web(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = GreetingError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "I/O error: missing");
    }

    #[test]
    fn asset_errors_name_the_path() {
        let err = GreetingError::AssetLoad {
            path: "assets/images/card1.jpg".into(),
            reason: "truncated".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load assets/images/card1.jpg: truncated"
        );
        assert!(err.source().is_none());
    }
}
