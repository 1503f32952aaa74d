//! Label measurement backed by cosmic-text.
//!
//! A single [`TextMeasurer`] instance is shared process-wide because building
//! a `FontSystem` scans installed fonts and is expensive.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use crate::geometry::Size;

static MEASURER: OnceLock<TextMeasurer> = OnceLock::new();

/// Measures text with real font metrics and shaping.
pub struct TextMeasurer {
    font_system: Mutex<FontSystem>,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer {
    pub fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Calculate the rendered size of `text` at the given point size.
    pub fn measure(&self, text: &str, font_size: usize) -> Size {
        let mut font_system = self
            .font_system
            .lock()
            .expect("FontSystem lock is never poisoned");

        // Points to pixels at standard DPI.
        let font_size_px = font_size as f32 * 1.33;
        let metrics = Metrics::new(font_size_px, font_size_px * 1.2);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name("Arial"));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if layout_runs.is_empty() {
            // No font matched; approximate from the glyph count.
            max_width = text.len() as f32 * (font_size_px * 0.6);
            total_height = metrics.line_height;
        } else {
            for run in &layout_runs {
                if let Some(last) = run.glyphs.last() {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        }

        Size::new(max_width, total_height)
    }
}

/// Measure text through the shared process-wide [`TextMeasurer`].
pub fn measure(text: &str, font_size: usize) -> Size {
    MEASURER
        .get_or_init(TextMeasurer::new)
        .measure(text, font_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_grows_with_text_length() {
        let a = measure("VPC", 14);
        let b = measure("Public Security Group", 14);
        assert!(b.width() > a.width());
    }

    #[test]
    fn larger_font_measures_taller() {
        let small = measure("subnet", 10);
        let large = measure("subnet", 20);
        assert!(large.height() > small.height());
    }
}
