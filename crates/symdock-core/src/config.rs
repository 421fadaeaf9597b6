//! Editor configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which family of expressions the editor builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// General mathematics.
    #[default]
    Maths,
    /// Boolean logic.
    Logic,
    /// Chemistry and nuclear physics.
    Chemistry,
}

impl EditorMode {
    /// Default base font size in pixels for this mode.
    pub fn base_font_size(self) -> f64 {
        match self {
            EditorMode::Maths | EditorMode::Logic => 50.0,
            EditorMode::Chemistry => 40.0,
        }
    }
}

/// Notation used for boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicSyntax {
    /// `∧`, `∨`, `¬`, `T`/`F`.
    #[default]
    Logic,
    /// `·`, `+`, overline, `1`/`0`.
    Binary,
}

/// Construction options for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub mode: EditorMode,
    pub logic_syntax: LogicSyntax,
    /// Headless text-entry mode: pointer events are ignored.
    pub text_entry: bool,
    pub italic_font: Option<PathBuf>,
    pub regular_font: Option<PathBuf>,
    /// Overrides the mode's base font size.
    pub base_font_size: Option<f64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mode: EditorMode::default(),
            logic_syntax: LogicSyntax::default(),
            text_entry: false,
            italic_font: None,
            regular_font: None,
            base_font_size: None,
        }
    }
}

impl EditorConfig {
    /// Config for the given mode with every other option at its default.
    pub fn with_mode(mode: EditorMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Effective base font size.
    pub fn base_font_size(&self) -> f64 {
        self.base_font_size
            .unwrap_or_else(|| self.mode.base_font_size())
    }

    /// Distance within which a dragged widget snaps to a docking point.
    pub fn docking_threshold(&self) -> f64 {
        self.base_font_size() * 1.5
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
