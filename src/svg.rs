// Copyright  (C) 2020, Hove and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Hove (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A position on the rendering canvas, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A color kept as the string it will be emitted as. The three input forms
/// (a name, `[r, g, b]`, `[r, g, b, a]`) are normalized at deserialization
/// and pass through verbatim afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColorSpec")]
pub struct Color(String);

impl Color {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color(name.to_string())
    }
}

impl From<String> for Color {
    fn from(name: String) -> Self {
        Color(name)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl From<ColorSpec> for Color {
    fn from(spec: ColorSpec) -> Self {
        match spec {
            ColorSpec::Named(name) => Color(name),
            ColorSpec::Rgb(r, g, b) => Color(format!("rgb({},{},{})", r, g, b)),
            ColorSpec::Rgba(r, g, b, a) => Color(format!("rgba({},{},{},{})", r, g, b, a)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineCap {
    Butt,
    Round,
    Square,
}

impl Display for StrokeLineCap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrokeLineCap::Butt => "butt",
            StrokeLineCap::Round => "round",
            StrokeLineCap::Square => "square",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineJoin {
    Arcs,
    Bevel,
    Miter,
    MiterClip,
    Round,
}

impl Display for StrokeLineJoin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrokeLineJoin::Arcs => "arcs",
            StrokeLineJoin::Bevel => "bevel",
            StrokeLineJoin::Miter => "miter",
            StrokeLineJoin::MiterClip => "miter-clip",
            StrokeLineJoin::Round => "round",
        };
        write!(f, "{}", name)
    }
}

/// Style attributes common to every primitive. Unset attributes are not
/// emitted.
#[derive(Debug, Clone, Default)]
struct Style {
    fill: Option<Color>,
    stroke: Option<Color>,
    stroke_width: Option<f64>,
    stroke_line_cap: Option<StrokeLineCap>,
    stroke_line_join: Option<StrokeLineJoin>,
}

impl Style {
    fn write_attrs(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(fill) = &self.fill {
            write!(f, " fill=\"{}\"", fill)?;
        }
        if let Some(stroke) = &self.stroke {
            write!(f, " stroke=\"{}\"", stroke)?;
        }
        if let Some(width) = self.stroke_width {
            write!(f, " stroke-width=\"{}\"", width)?;
        }
        if let Some(cap) = self.stroke_line_cap {
            write!(f, " stroke-linecap=\"{}\"", cap)?;
        }
        if let Some(join) = self.stroke_line_join {
            write!(f, " stroke-linejoin=\"{}\"", join)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Circle {
    center: Point,
    radius: f64,
    style: Style,
}

impl Circle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn stroke_color(mut self, color: Color) -> Self {
        self.style.stroke = Some(color);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.style.stroke_width = Some(width);
        self
    }

    pub fn stroke_line_cap(mut self, cap: StrokeLineCap) -> Self {
        self.style.stroke_line_cap = Some(cap);
        self
    }

    pub fn stroke_line_join(mut self, join: StrokeLineJoin) -> Self {
        self.style.stroke_line_join = Some(join);
        self
    }
}

impl Display for Circle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
            self.center.x, self.center.y, self.radius
        )?;
        self.style.write_attrs(f)?;
        write!(f, "/>")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Polyline {
    points: Vec<Point>,
    style: Style,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn stroke_color(mut self, color: Color) -> Self {
        self.style.stroke = Some(color);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.style.stroke_width = Some(width);
        self
    }

    pub fn stroke_line_cap(mut self, cap: StrokeLineCap) -> Self {
        self.style.stroke_line_cap = Some(cap);
        self
    }

    pub fn stroke_line_join(mut self, join: StrokeLineJoin) -> Self {
        self.style.stroke_line_join = Some(join);
        self
    }
}

impl Display for Polyline {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<polyline points=\"")?;
        let mut first = true;
        for point in &self.points {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{},{}", point.x, point.y)?;
            first = false;
        }
        write!(f, "\"")?;
        self.style.write_attrs(f)?;
        write!(f, "/>")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Text {
    position: Point,
    offset: Point,
    font_size: u32,
    font_family: Option<String>,
    font_weight: Option<String>,
    data: String,
    style: Style,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn stroke_color(mut self, color: Color) -> Self {
        self.style.stroke = Some(color);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.style.stroke_width = Some(width);
        self
    }

    pub fn stroke_line_cap(mut self, cap: StrokeLineCap) -> Self {
        self.style.stroke_line_cap = Some(cap);
        self
    }

    pub fn stroke_line_join(mut self, join: StrokeLineJoin) -> Self {
        self.style.stroke_line_join = Some(join);
        self
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<text")?;
        self.style.write_attrs(f)?;
        write!(
            f,
            " x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
            self.position.x, self.position.y, self.offset.x, self.offset.y, self.font_size
        )?;
        if let Some(family) = &self.font_family {
            write!(f, " font-family=\"{}\"", family)?;
        }
        if let Some(weight) = &self.font_weight {
            write!(f, " font-weight=\"{}\"", weight)?;
        }
        write!(f, ">{}</text>", escape(&self.data))
    }
}

/// Escapes the five xml special characters of text bodies.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone)]
pub enum Object {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

impl From<Circle> for Object {
    fn from(circle: Circle) -> Self {
        Object::Circle(circle)
    }
}

impl From<Polyline> for Object {
    fn from(polyline: Polyline) -> Self {
        Object::Polyline(polyline)
    }
}

impl From<Text> for Object {
    fn from(text: Text) -> Self {
        Object::Text(text)
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Object::Circle(circle) => circle.fmt(f),
            Object::Polyline(polyline) => polyline.fmt(f),
            Object::Text(text) => text.fmt(f),
        }
    }
}

/// An svg document. Primitives are emitted in insertion order, so earlier
/// objects lie beneath later ones.
#[derive(Debug, Clone, Default)]
pub struct Document {
    objects: Vec<Object>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    pub fn nb_of_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>")?;
        writeln!(
            f,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">"
        )?;
        for object in &self.objects {
            writeln!(f, "  {}", object)?;
        }
        write!(f, "</svg>")
    }
}
