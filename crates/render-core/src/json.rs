use crate::error::RenderError;
use crate::traits::DocumentRenderer;
use crate::utils::flip_box_y;
use quire_layout::{LayoutElement, Page, PositionedElement};
use quire_style::Border;
use quire_types::Color;
use serde::Serialize;
use std::io::Write;

/// Which corner of the page element coordinates are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Layout's own convention, `y` growing down.
    #[default]
    TopLeft,
    /// PDF convention, `y` growing up; `y` is the bottom edge of each box.
    BottomLeft,
}

/// Writes the placed geometry of every page as one JSON document.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    pretty: bool,
    origin: Origin,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }
}

#[derive(Serialize)]
struct DocumentDto<'a> {
    page_count: usize,
    pages: Vec<PageDto<'a>>,
}

#[derive(Serialize)]
struct PageDto<'a> {
    number: usize,
    width: f32,
    height: f32,
    elements: Vec<ElementDto<'a>>,
}

#[derive(Serialize)]
struct Bounds {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ElementDto<'a> {
    Text {
        #[serde(flatten)]
        bounds: Bounds,
        text: &'a str,
        font: String,
        size: f32,
        color: Color,
    },
    Rect {
        #[serde(flatten)]
        bounds: Bounds,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<Color>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<&'a Border>,
    },
    Image {
        #[serde(flatten)]
        bounds: Bounds,
        src: &'a str,
    },
}

impl JsonRenderer {
    fn bounds(&self, el: &PositionedElement, page_height: f32) -> Bounds {
        let y = match self.origin {
            Origin::TopLeft => el.y,
            Origin::BottomLeft => flip_box_y(el.y, el.height, page_height),
        };
        Bounds {
            x: el.x,
            y,
            width: el.width,
            height: el.height,
        }
    }

    fn element<'a>(&self, el: &'a PositionedElement, page_height: f32) -> ElementDto<'a> {
        let bounds = self.bounds(el, page_height);
        match &el.element {
            LayoutElement::Text(text) => ElementDto::Text {
                bounds,
                text: &text.content,
                font: text.font.postscript_name(),
                size: text.font_size,
                color: text.color,
            },
            LayoutElement::Rectangle(rect) => ElementDto::Rect {
                bounds,
                fill: rect.fill,
                stroke: rect.stroke.as_ref(),
            },
            LayoutElement::Image(image) => ElementDto::Image {
                bounds,
                src: &image.src,
            },
        }
    }
}

impl DocumentRenderer for JsonRenderer {
    fn format(&self) -> &'static str {
        "json"
    }

    fn render(&self, pages: &[Page], writer: &mut dyn Write) -> Result<(), RenderError> {
        let document = DocumentDto {
            page_count: pages.len(),
            pages: pages
                .iter()
                .map(|page| PageDto {
                    number: page.number,
                    width: page.width,
                    height: page.height,
                    elements: page.elements().map(|el| self.element(el, page.height)).collect(),
                })
                .collect(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &document)?;
        } else {
            serde_json::to_writer(&mut *writer, &document)?;
        }
        writer.flush()?;
        log::debug!("Rendered {} pages as JSON", pages.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_layout::{FontFace, PlacedFragment, RectElement, TextElement};
    use quire_style::{FontStyle, FontWeight};
    use quire_types::{Rect, Size};
    use serde_json::Value;

    fn sample_page() -> Page {
        let mut page = Page::new(1, 200.0, 100.0);
        page.fragments.push(PlacedFragment {
            block: "block #0".to_string(),
            y: 0.0,
            size: Size::new(180.0, 12.0),
            elements: vec![
                PositionedElement::new(
                    Rect::new(10.0, 10.0, 180.0, 12.0),
                    LayoutElement::Rectangle(RectElement {
                        fill: Some(Color::gray(240)),
                        stroke: None,
                    }),
                ),
                PositionedElement::new(
                    Rect::new(10.0, 10.0, 40.0, 12.0),
                    LayoutElement::Text(TextElement {
                        content: "Hello".to_string(),
                        font: FontFace::new("Helvetica", FontWeight::Bold, FontStyle::Normal),
                        font_size: 10.0,
                        color: Color::BLACK,
                    }),
                ),
            ],
            row: None,
        });
        page
    }

    fn render(renderer: &JsonRenderer, pages: &[Page]) -> Value {
        let mut out = Vec::new();
        renderer.render(pages, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_renders_pages_and_elements() {
        let json = render(&JsonRenderer::new(), &[sample_page()]);
        assert_eq!(json["page_count"], 1);

        let page = &json["pages"][0];
        assert_eq!(page["number"], 1);
        assert_eq!(page["width"], 200.0);

        let elements = page["elements"].as_array().unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0]["kind"], "rect");
        assert_eq!(elements[0]["fill"]["r"], 240);
        assert!(elements[0].get("stroke").is_none());
        assert_eq!(elements[1]["kind"], "text");
        assert_eq!(elements[1]["text"], "Hello");
        assert_eq!(elements[1]["font"], "Helvetica-Bold");
        assert_eq!(elements[1]["y"], 10.0);
    }

    #[test]
    fn test_bottom_left_origin_flips_boxes() {
        let renderer = JsonRenderer::new().with_origin(Origin::BottomLeft);
        let json = render(&renderer, &[sample_page()]);
        assert_eq!(json["pages"][0]["elements"][1]["y"], 78.0);
    }

    #[test]
    fn test_empty_page_list() {
        let json = render(&JsonRenderer::new().pretty(true), &[]);
        assert_eq!(json["page_count"], 0);
        assert!(json["pages"].as_array().unwrap().is_empty());
    }
}
