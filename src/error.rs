use thiserror::Error;

/// Errors produced by the picker.
///
/// Only [`PickerError::Sampling`] ever reaches a caller of the widget itself;
/// style and color problems are repaired, logged and ignored.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("sampling failed: {0}")]
    Sampling(String),

    #[error("unknown style key `{0}`")]
    InvalidStyleKey(String),

    #[error("invalid color value: {0}")]
    InvalidColorValue(String),

    #[error("pixel buffer of {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidPixelBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PickerError> = std::result::Result<T, E>;
