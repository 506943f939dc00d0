//! Per-part style configuration with deep-merge updates.
//!
//! A [`StyleConfig`] is partial: every field is optional and merging only
//! overwrites what the update mentions. [`StyleConfig::base`] is the total
//! default; merging it resets everything.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use tracing::warn;

use crate::error::{PickerError, Result};

/// The styleable parts of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePart {
    Window,
    ButtonOk,
    ButtonCancel,
    Inputs,
}

impl StylePart {
    pub const ALL: [StylePart; 4] = [
        StylePart::Window,
        StylePart::ButtonOk,
        StylePart::ButtonCancel,
        StylePart::Inputs,
    ];

    /// The key used in style documents.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::ButtonOk => "buttonOk",
            Self::ButtonCancel => "buttonCancel",
            Self::Inputs => "inputs",
        }
    }
}

impl fmt::Display for StylePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Visual properties of one part. Colors are CSS color strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartStyle {
    pub background: Option<String>,
    pub text: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

impl PartStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn with_text(mut self, color: impl Into<String>) -> Self {
        self.text = Some(color.into());
        self
    }

    pub fn with_border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn with_border_width(mut self, width: f64) -> Self {
        self.border_width = Some(width);
        self
    }

    fn merge(&mut self, update: &PartStyle) {
        if let Some(v) = &update.background {
            self.background = Some(v.clone());
        }
        if let Some(v) = &update.text {
            self.text = Some(v.clone());
        }
        if let Some(v) = &update.border_color {
            self.border_color = Some(v.clone());
        }
        if let Some(w) = update.border_width {
            if w.is_finite() && w >= 0.0 {
                self.border_width = Some(w);
            } else {
                warn!("ignoring border width {w}");
            }
        }
    }
}

/// Partial style for the whole menu, keyed by part.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub window: Option<PartStyle>,
    pub button_ok: Option<PartStyle>,
    pub button_cancel: Option<PartStyle>,
    pub inputs: Option<PartStyle>,
    /// Draw a border around the picked-color swatch.
    pub picked_color_border: Option<bool>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

impl StyleConfig {
    /// The complete default style. Every part and property is set.
    pub fn base() -> Self {
        let part = |background: &str, text: &str, border: &str, width: f64| {
            Some(
                PartStyle::new()
                    .with_background(background)
                    .with_text(text)
                    .with_border_color(border)
                    .with_border_width(width),
            )
        };
        Self {
            window: part("#F2F2F2", "#202020", "#B4B4B4", 1.0),
            button_ok: part("#E6E6E6", "#202020", "#B4B4B4", 1.0),
            button_cancel: part("#E6E6E6", "#202020", "#B4B4B4", 1.0),
            inputs: part("#FFFFFF", "#202020", "#C8C8C8", 1.0),
            picked_color_border: Some(false),
            unknown: BTreeMap::new(),
        }
    }

    /// Build a (partial) style from a JSON document such as
    /// `{"window": {"text": "blue"}}`.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| PickerError::Config(format!("invalid style document: {e}")))
    }

    pub fn with_part(mut self, part: StylePart, style: PartStyle) -> Self {
        *self.slot_mut(part) = Some(style);
        self
    }

    pub fn with_picked_color_border(mut self, on: bool) -> Self {
        self.picked_color_border = Some(on);
        self
    }

    pub fn part(&self, part: StylePart) -> Option<&PartStyle> {
        match part {
            StylePart::Window => self.window.as_ref(),
            StylePart::ButtonOk => self.button_ok.as_ref(),
            StylePart::ButtonCancel => self.button_cancel.as_ref(),
            StylePart::Inputs => self.inputs.as_ref(),
        }
    }

    fn slot_mut(&mut self, part: StylePart) -> &mut Option<PartStyle> {
        match part {
            StylePart::Window => &mut self.window,
            StylePart::ButtonOk => &mut self.button_ok,
            StylePart::ButtonCancel => &mut self.button_cancel,
            StylePart::Inputs => &mut self.inputs,
        }
    }

    /// Dotted paths of every key the update carried that no part or
    /// property recognizes.
    pub fn unknown_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.unknown.keys().cloned().collect();
        for part in StylePart::ALL {
            if let Some(style) = self.part(part) {
                keys.extend(style.unknown.keys().map(|k| format!("{}.{k}", part.key())));
            }
        }
        keys
    }

    /// Deep-merge `update` into `self`. Unmentioned parts and properties are
    /// left alone; unknown keys are logged and dropped.
    pub fn merge(&mut self, update: &StyleConfig) {
        for key in update.unknown_keys() {
            warn!("{}", PickerError::InvalidStyleKey(key));
        }
        for part in StylePart::ALL {
            if let Some(patch) = update.part(part) {
                self.slot_mut(part)
                    .get_or_insert_with(PartStyle::default)
                    .merge(patch);
            }
        }
        if let Some(on) = update.picked_color_border {
            self.picked_color_border = Some(on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_keeps_unmentioned_properties() {
        let mut style = StyleConfig::base();
        style.merge(&StyleConfig::from_json(json!({"window": {"text": "blue"}})).unwrap());
        style.merge(&StyleConfig::from_json(json!({"buttonOk": {"background": "#00d93d"}})).unwrap());

        let window = style.part(StylePart::Window).unwrap();
        assert_eq!(window.text.as_deref(), Some("blue"));
        assert_eq!(window.background.as_deref(), Some("#F2F2F2"));
        let ok = style.part(StylePart::ButtonOk).unwrap();
        assert_eq!(ok.background.as_deref(), Some("#00d93d"));
        assert_eq!(ok.text.as_deref(), Some("#202020"));
    }

    #[test]
    fn merging_base_resets_everything() {
        let mut style = StyleConfig::base();
        style.merge(&StyleConfig::from_json(json!({
            "buttonOk": { "background": "#00d93d" },
            "buttonCancel": { "text": "hsl(303, 100%, 27%)" },
            "window": { "background": "black", "text": "white", "borderWidth": 6 },
            "inputs": { "background": "rgb(115, 115, 115)", "text": "white", "borderColor": "orange" },
            "pickedColorBorder": true
        })).unwrap());
        assert_ne!(style, StyleConfig::base());

        style.merge(&StyleConfig::base());
        assert_eq!(style, StyleConfig::base());
    }

    #[test]
    fn unknown_keys_are_reported_and_ignored() {
        let update = StyleConfig::from_json(json!({
            "window": { "glow": 3, "text": "red" },
            "scrollbar": { "background": "red" }
        }))
        .unwrap();
        let mut keys = update.unknown_keys();
        keys.sort();
        assert_eq!(keys, vec!["scrollbar".to_string(), "window.glow".to_string()]);

        let mut style = StyleConfig::base();
        style.merge(&update);
        assert!(style.unknown_keys().is_empty());
        assert_eq!(style.part(StylePart::Window).unwrap().text.as_deref(), Some("red"));
    }

    #[test]
    fn merge_into_empty_creates_parts() {
        let mut style = StyleConfig::default();
        style.merge(
            &StyleConfig::default()
                .with_part(StylePart::Inputs, PartStyle::new().with_border_width(2.0))
                .with_picked_color_border(true),
        );
        assert_eq!(style.part(StylePart::Inputs).unwrap().border_width, Some(2.0));
        assert!(style.part(StylePart::Window).is_none());
        assert_eq!(style.picked_color_border, Some(true));
    }

    #[test]
    fn rejects_invalid_border_width() {
        let mut style = StyleConfig::base();
        style.merge(
            &StyleConfig::default()
                .with_part(StylePart::Window, PartStyle::new().with_border_width(-3.0)),
        );
        assert_eq!(style.part(StylePart::Window).unwrap().border_width, Some(1.0));
    }

    #[test]
    fn wrong_value_type_is_a_config_error() {
        let err = StyleConfig::from_json(json!({"window": {"text": 5}})).unwrap_err();
        assert!(matches!(err, PickerError::Config(_)));
    }
}
