//! Editor session configuration.

use crate::error::{EditorError, EditorResult};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::style::Style;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session settings, usually read from a JSON file.
///
/// Missing keys fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Style a new session starts with.
    pub default_style: Style,
    /// Maximum number of undo steps.
    pub history_limit: usize,
    /// RDP tolerance for committed strokes; `None` keeps every point.
    pub simplify_tolerance: Option<f64>,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Canvas background, also used to paint erased regions in vector output.
    pub background: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_style: Style::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            simplify_tolerance: None,
            canvas_width: 800.0,
            canvas_height: 800.0,
            background: "#ffffff".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| EditorError::Io(format!("cannot read {}: {}", path.display(), e)))?;
        log::debug!("loading editor config from {}", path.display());
        Self::from_json(&json)
    }

    pub fn validate(&self) -> EditorResult<()> {
        self.default_style.validate()?;
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.canvas_width) || !size_ok(self.canvas_height) {
            return Err(EditorError::Format(format!(
                "invalid canvas size {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.background.trim().is_empty() {
            return Err(EditorError::Format("background color must not be blank".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EditorConfig::from_json(
            r#"{"history_limit": 10, "simplify_tolerance": 0.5,
                "default_style": {"color": "red", "line_width": 4.0, "font": "800px KaiTi"}}"#,
        )
        .unwrap();

        assert_eq!(config.history_limit, 10);
        assert_eq!(config.simplify_tolerance, Some(0.5));
        assert_eq!(config.default_style.color(), "red");
        assert_eq!(config.canvas_width, 800.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(EditorConfig::from_json(r#"{"canvas_width": 0}"#).is_err());
        assert!(EditorConfig::from_json(
            r#"{"default_style": {"color": "", "line_width": 1.0, "font": "x"}}"#
        )
        .is_err());
        assert!(EditorConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = EditorConfig::load("/nonexistent/strokeink.json").unwrap_err();
        assert!(matches!(err, EditorError::Io(_)));
    }
}
