//! Picker configuration loaded from TOML.
//!
//! ```toml
//! color = { h = 200, s = 100, l = 50 }
//!
//! [placement]
//! vertical = "down"
//! horizontal = "center"
//!
//! [style.window]
//! background = "black"
//! text = "white"
//! borderWidth = 6
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::color::HslColor;
use crate::error::{PickerError, Result};
use crate::placement::Placement;
use crate::style::StyleConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub placement: Placement,
    /// Initial color; the picker default when absent.
    pub color: Option<HslColor>,
    /// Merged onto the base style.
    pub style: StyleConfig,
}

impl PickerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| PickerError::Config(format!("TOML parse error: {e}")))
    }
}

/// Read a picker config file.
///
/// A missing file is not an error: the picker starts from defaults and a
/// warning is logged. Unreadable or malformed files are errors.
pub fn load(path: impl AsRef<Path>) -> Result<PickerConfig> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            debug!(path = %path.display(), "loading picker config");
            PickerConfig::from_toml_str(&raw)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "picker config not found, using defaults");
            Ok(PickerConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// `$XDG_CONFIG_HOME/floem-popup-picker/picker.toml`, falling back to
/// `~/.config` when the variable is unset.
pub fn default_path() -> PathBuf {
    let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config"),
    };
    config_home.join("floem-popup-picker").join("picker.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{Horizontal, Vertical};
    use crate::style::StylePart;

    #[test]
    fn parses_full_document() {
        let cfg = PickerConfig::from_toml_str(
            r##"
            color = { h = 380, s = 100, l = 50 }

            [placement]
            vertical = "up"
            horizontal = "center"

            [style]
            pickedColorBorder = true

            [style.window]
            background = "black"
            borderWidth = 6

            [style.buttonOk]
            background = "#00d93d"
            "##,
        )
        .unwrap();

        assert_eq!(cfg.placement, Placement::new(Vertical::Up, Horizontal::Center));
        assert_eq!(cfg.color, Some(HslColor::new(20.0, 100.0, 50.0)));
        assert_eq!(cfg.style.picked_color_border, Some(true));
        let window = cfg.style.part(StylePart::Window).unwrap();
        assert_eq!(window.border_width, Some(6.0));
        assert_eq!(window.text, None);
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = PickerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.placement, Placement::default());
        assert!(cfg.color.is_none());
        assert_eq!(cfg.style, StyleConfig::default());
    }

    #[test]
    fn placement_fields_default_independently() {
        let cfg = PickerConfig::from_toml_str("[placement]\nhorizontal = \"right\"\n").unwrap();
        assert_eq!(cfg.placement, Placement::new(Vertical::Down, Horizontal::Right));
    }

    #[test]
    fn bad_placement_is_an_error() {
        let err = PickerConfig::from_toml_str("[placement]\nvertical = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, PickerError::Config(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path().join("absent.toml")).unwrap();
        assert!(cfg.color.is_none());
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load(dir.path()), Err(PickerError::Io { .. })));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.toml");
        std::fs::write(&path, "[style.inputs]\nborderColor = \"orange\"\n").unwrap();
        let cfg = load(&path).unwrap();
        assert_eq!(
            cfg.style.part(StylePart::Inputs).unwrap().border_color.as_deref(),
            Some("orange")
        );
    }
}
