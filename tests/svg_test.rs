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

use munin::svg::{
    escape, Circle, Color, Document, Point, Polyline, StrokeLineCap, StrokeLineJoin, Text,
};

#[test]
fn test_escape() {
    assert_eq!(escape("A&B<C>"), "A&amp;B&lt;C&gt;");
    assert_eq!(escape("\"quoted\" & 'apos'"), "&quot;quoted&quot; &amp; &apos;apos&apos;");
    assert_eq!(escape("plain text"), "plain text");
}

#[test]
fn test_circle_markup() {
    let circle = Circle::new()
        .center(Point::new(20.0, 20.0))
        .radius(5.0)
        .fill_color(Color::from("white"));

    assert_eq!(
        circle.to_string(),
        "<circle cx=\"20\" cy=\"20\" r=\"5\" fill=\"white\"/>"
    );
}

#[test]
fn test_polyline_markup() {
    let polyline = Polyline::new()
        .point(Point::new(20.0, 20.0))
        .point(Point::new(30.0, 40.5))
        .fill_color(Color::from("none"))
        .stroke_color(Color::from("red"))
        .stroke_width(14.0)
        .stroke_line_cap(StrokeLineCap::Round)
        .stroke_line_join(StrokeLineJoin::Round);

    assert_eq!(
        polyline.to_string(),
        "<polyline points=\"20,20 30,40.5\" fill=\"none\" stroke=\"red\" stroke-width=\"14\" \
         stroke-linecap=\"round\" stroke-linejoin=\"round\"/>"
    );
}

#[test]
fn test_text_markup() {
    let text = Text::new()
        .position(Point::new(100.0, 50.0))
        .offset(Point::new(7.0, -3.0))
        .font_size(20)
        .font_family("Verdana")
        .font_weight("bold")
        .data("bus <7>")
        .fill_color(Color::from("black"));

    assert_eq!(
        text.to_string(),
        "<text fill=\"black\" x=\"100\" y=\"50\" dx=\"7\" dy=\"-3\" font-size=\"20\" \
         font-family=\"Verdana\" font-weight=\"bold\">bus &lt;7&gt;</text>"
    );
}

#[test]
fn test_text_without_optional_fonts() {
    let text = Text::new().position(Point::new(1.0, 2.0)).data("plain");

    assert_eq!(
        text.to_string(),
        "<text x=\"1\" y=\"2\" dx=\"0\" dy=\"0\" font-size=\"0\">plain</text>"
    );
}

#[test]
fn test_document_structure_and_painter_order() {
    let mut document = Document::new();
    document.add(Circle::new().center(Point::new(1.0, 1.0)).radius(2.0));
    document.add(Polyline::new().point(Point::new(0.0, 0.0)));
    document.add(Text::new().data("label"));
    assert_eq!(document.nb_of_objects(), 3);

    let rendered = document.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>");
    assert_eq!(
        lines[1],
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">"
    );
    assert!(lines[2].starts_with("  <circle"));
    assert!(lines[3].starts_with("  <polyline"));
    assert!(lines[4].starts_with("  <text"));
    assert_eq!(lines[5], "</svg>");
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_empty_document() {
    let rendered = Document::new().render();
    assert_eq!(
        rendered,
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n\
         </svg>"
    );
}

#[test]
fn test_color_input_forms() {
    let named: Color = serde_json::from_str("\"red\"").unwrap();
    assert_eq!(named.as_str(), "red");

    let rgb: Color = serde_json::from_str("[255, 160, 0]").unwrap();
    assert_eq!(rgb.as_str(), "rgb(255,160,0)");

    let rgba: Color = serde_json::from_str("[255, 200, 23, 0.85]").unwrap();
    assert_eq!(rgba.as_str(), "rgba(255,200,23,0.85)");
}

#[test]
fn test_color_emits_verbatim() {
    let color: Color = serde_json::from_str("[12, 30, 200]").unwrap();
    let circle = Circle::new().fill_color(color);
    assert!(circle.to_string().contains("fill=\"rgb(12,30,200)\""));
}
