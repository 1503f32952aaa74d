use svg::node::element as svg_element;

use super::Drawable;
use crate::{
    geometry::{Point, Size},
    text,
};

/// A measured, centered text label.
#[derive(Debug, Clone)]
pub struct Text {
    content: String,
    font_size: usize,
    size: Size,
}

impl Text {
    /// Create a label and measure it with the shared font system.
    pub fn new(content: impl Into<String>, font_size: usize) -> Self {
        let content = content.into();
        let size = text::measure(&content, font_size);
        Self {
            content,
            font_size,
            size,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Drawable for Text {
    fn render_to_svg(&self, position: Point) -> Box<dyn svg::Node> {
        svg_element::Text::new(self.content.clone())
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", "Arial")
            .set("font-size", self.font_size)
            .into()
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_labels_measure_wider() {
        let short = Text::new("EC2", 14);
        let long = Text::new("ssh.config.tpl", 14);

        assert!(long.size().width() > short.size().width());
        assert!(short.size().height() > 0.0);
    }

    #[test]
    fn content_is_preserved() {
        let label = Text::new("Terraform", 14);
        assert_eq!(label.content(), "Terraform");
    }
}
