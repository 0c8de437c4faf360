//! Positioned drawing primitives handed to renderers.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and `y` growing downwards. Inside a [`Fragment`](crate::Fragment) they
//! are relative to the fragment's top-left corner until it is placed.

use crate::fonts::FontFace;
use quire_style::Border;
use quire_types::{Color, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Image(ImageElement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font: FontFace,
    pub font_size: f32,
    pub color: Color,
}

/// A filled and/or stroked rectangle: cell backgrounds and grid lines.
#[derive(Debug, Clone, PartialEq)]
pub struct RectElement {
    pub fill: Option<Color>,
    pub stroke: Option<Border>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub src: String,
}

impl PositionedElement {
    pub fn new(rect: Rect, element: LayoutElement) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            element,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn text(&self) -> Option<&str> {
        match &self.element {
            LayoutElement::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}
