//! Font metrics providers used by layout.

use crate::error::{EditorError, EditorResult};
use fontdue::{Font, FontSettings};
use kurbo::Rect;
use std::path::Path;

/// Measures text at a given pixel size.
///
/// Returned rects have their origin at the top-left of the text box.
pub trait FontMetrics {
    /// Bounds of `text` set in the regular face.
    fn text_bounds(&self, text: &str, size: f64) -> Rect;

    /// Bounds of `text` set in the italic face (used for letters).
    fn italic_text_bounds(&self, text: &str, size: f64) -> Rect {
        self.text_bounds(text, size)
    }
}

/// Fixed-advance approximation, used headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMetrics;

impl ApproximateMetrics {
    /// Advance of one character as a fraction of the font size.
    pub const ADVANCE: f64 = 0.6;
}

impl FontMetrics for ApproximateMetrics {
    fn text_bounds(&self, text: &str, size: f64) -> Rect {
        let chars = text.chars().count() as f64;
        Rect::new(0.0, 0.0, chars * size * Self::ADVANCE, size)
    }
}

/// Metrics read from the two font files the editor draws with.
pub struct FontdueMetrics {
    italic: Font,
    regular: Font,
}

impl std::fmt::Debug for FontdueMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueMetrics").finish_non_exhaustive()
    }
}

impl FontdueMetrics {
    /// Load both faces. Either failing is fatal for the editor.
    pub fn load(italic: &Path, regular: &Path) -> EditorResult<Self> {
        Ok(Self {
            italic: load_font(italic)?,
            regular: load_font(regular)?,
        })
    }

    fn measure(font: &Font, text: &str, size: f64) -> Rect {
        let px = size as f32;
        let width: f32 = text.chars().map(|ch| font.metrics(ch, px).advance_width).sum();
        let height = font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px);
        Rect::new(0.0, 0.0, f64::from(width), f64::from(height))
    }
}

impl FontMetrics for FontdueMetrics {
    fn text_bounds(&self, text: &str, size: f64) -> Rect {
        Self::measure(&self.regular, text, size)
    }

    fn italic_text_bounds(&self, text: &str, size: f64) -> Rect {
        Self::measure(&self.italic, text, size)
    }
}

fn load_font(path: &Path) -> EditorResult<Font> {
    let bytes = std::fs::read(path).map_err(|e| EditorError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| EditorError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::debug!("Loaded font {:?}", path);
    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_metrics() {
        let r = ApproximateMetrics.text_bounds("ab", 10.0);
        assert!((r.width() - 12.0).abs() < 1e-9);
        assert!((r.height() - 10.0).abs() < 1e-9);
        assert_eq!(ApproximateMetrics.italic_text_bounds("ab", 10.0), r);
    }

    #[test]
    fn test_missing_font_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ttf");
        let err = FontdueMetrics::load(&missing, &missing).unwrap_err();
        assert!(matches!(err, EditorError::FontLoad { .. }));
    }

    #[test]
    fn test_empty_font_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.ttf");
        std::fs::write(&empty, b"").unwrap();
        assert!(FontdueMetrics::load(&empty, &empty).is_err());
    }
}
