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

use crate::catalogue::{Bus, BusIdx, Catalogue, Stop, StopIdx};
use crate::config::RenderSettings;
use crate::geo::Coord;
use crate::svg::{self, Color, Point, StrokeLineCap, StrokeLineJoin};

const EPSILON: f64 = 1e-6;

fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Projects geographic coordinates onto a canvas of `width` x `height`
/// pixels with `padding` pixels kept free on every side. The zoom is the
/// smallest one that fits both spans; a span below [`EPSILON`] degrees is
/// treated as zero and does not constrain the zoom. Latitude grows upwards
/// on the canvas.
#[derive(Debug, Clone, Default)]
pub struct SphereProjector {
    padding: f64,
    min_lon: f64,
    max_lat: f64,
    zoom_coeff: f64,
}

impl SphereProjector {
    pub fn new(points: &[Coord], width: f64, height: f64, padding: f64) -> Self {
        if points.is_empty() {
            return Self {
                padding,
                ..Self::default()
            };
        }

        let min_lon = points.iter().map(|coord| coord.lon).fold(f64::INFINITY, f64::min);
        let max_lon = points
            .iter()
            .map(|coord| coord.lon)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_lat = points.iter().map(|coord| coord.lat).fold(f64::INFINITY, f64::min);
        let max_lat = points
            .iter()
            .map(|coord| coord.lat)
            .fold(f64::NEG_INFINITY, f64::max);

        let width_zoom = if is_zero(max_lon - min_lon) {
            None
        } else {
            Some((width - 2.0 * padding) / (max_lon - min_lon))
        };
        let height_zoom = if is_zero(max_lat - min_lat) {
            None
        } else {
            Some((height - 2.0 * padding) / (max_lat - min_lat))
        };

        let zoom_coeff = match (width_zoom, height_zoom) {
            (Some(width_zoom), Some(height_zoom)) => width_zoom.min(height_zoom),
            (Some(width_zoom), None) => width_zoom,
            (None, Some(height_zoom)) => height_zoom,
            (None, None) => 0.0,
        };

        Self {
            padding,
            min_lon,
            max_lat,
            zoom_coeff,
        }
    }

    pub fn project(&self, coord: &Coord) -> Point {
        Point {
            x: (coord.lon - self.min_lon) * self.zoom_coeff + self.padding,
            y: (self.max_lat - coord.lat) * self.zoom_coeff + self.padding,
        }
    }
}

/// Composes the map of the network, bottom to top : route polylines, route
/// labels, stop points, stop labels. Routes are taken in lexicographic
/// order and colored cyclically from the palette; a route with fewer than
/// two stops is not drawn and does not consume a palette slot, in the
/// polyline and label layers alike.
pub fn render_map(catalogue: &Catalogue, settings: &RenderSettings) -> svg::Document {
    let buses = catalogue.buses_sorted_by_name();
    let mut stops = catalogue.stops_used_in_buses();
    stops.sort_by(|lhs, rhs| lhs.1.id.cmp(&rhs.1.id));

    let points: Vec<Coord> = stops.iter().map(|(_, stop)| stop.coord).collect();
    let projector = SphereProjector::new(&points, settings.width, settings.height, settings.padding);

    let mut document = svg::Document::new();
    render_bus_lines(&mut document, catalogue, &buses, &projector, settings);
    render_bus_labels(&mut document, catalogue, &buses, &projector, settings);
    render_stop_points(&mut document, &stops, &projector, settings);
    render_stop_labels(&mut document, &stops, &projector, settings);
    document
}

/// The full trajectory to plot : the outbound list for a round-trip route,
/// the outbound then its reverse (first element omitted, the turn-around
/// stop is not duplicated) otherwise.
fn trajectory(bus: &Bus) -> Vec<StopIdx> {
    let mut stops = bus.stops.clone();
    if !bus.is_roundtrip {
        stops.extend(bus.stops.iter().rev().skip(1));
    }
    stops
}

fn render_bus_lines(
    document: &mut svg::Document,
    catalogue: &Catalogue,
    buses: &[(BusIdx, &Bus)],
    projector: &SphereProjector,
    settings: &RenderSettings,
) {
    if settings.color_palette.is_empty() {
        return;
    }
    let mut color_index = 0;
    for (_, bus) in buses {
        if bus.stops.len() < 2 {
            continue;
        }
        let color = settings.color_palette[color_index % settings.color_palette.len()].clone();

        let mut polyline = svg::Polyline::new();
        for stop_idx in trajectory(bus) {
            polyline = polyline.point(projector.project(&catalogue.stop(stop_idx).coord));
        }
        let polyline = polyline
            .fill_color(Color::from("none"))
            .stroke_color(color)
            .stroke_width(settings.line_width)
            .stroke_line_cap(StrokeLineCap::Round)
            .stroke_line_join(StrokeLineJoin::Round);

        document.add(polyline);
        color_index += 1;
    }
}

fn render_bus_labels(
    document: &mut svg::Document,
    catalogue: &Catalogue,
    buses: &[(BusIdx, &Bus)],
    projector: &SphereProjector,
    settings: &RenderSettings,
) {
    if settings.color_palette.is_empty() {
        return;
    }
    let offset = Point::new(settings.bus_label_offset.0, settings.bus_label_offset.1);
    let mut color_index = 0;
    for (_, bus) in buses {
        if bus.stops.len() < 2 {
            continue;
        }
        let color = settings.color_palette[color_index % settings.color_palette.len()].clone();

        let mut terminals = vec![bus.stops[0]];
        if !bus.is_roundtrip {
            let last = bus.stops[bus.stops.len() - 1];
            if last != bus.stops[0] {
                terminals.push(last);
            }
        }

        for stop_idx in terminals {
            let point = projector.project(&catalogue.stop(stop_idx).coord);

            let underlayer = svg::Text::new()
                .position(point)
                .offset(offset)
                .font_size(settings.bus_label_font_size)
                .font_family(settings.font_family.clone())
                .font_weight("bold")
                .data(bus.id.clone())
                .fill_color(settings.underlayer_color.clone())
                .stroke_color(settings.underlayer_color.clone())
                .stroke_width(settings.underlayer_width)
                .stroke_line_cap(StrokeLineCap::Round)
                .stroke_line_join(StrokeLineJoin::Round);
            document.add(underlayer);

            let label = svg::Text::new()
                .position(point)
                .offset(offset)
                .font_size(settings.bus_label_font_size)
                .font_family(settings.font_family.clone())
                .font_weight("bold")
                .data(bus.id.clone())
                .fill_color(color.clone());
            document.add(label);
        }

        color_index += 1;
    }
}

fn render_stop_points(
    document: &mut svg::Document,
    stops: &[(StopIdx, &Stop)],
    projector: &SphereProjector,
    settings: &RenderSettings,
) {
    for (_, stop) in stops {
        let circle = svg::Circle::new()
            .center(projector.project(&stop.coord))
            .radius(settings.stop_radius)
            .fill_color(Color::from("white"));
        document.add(circle);
    }
}

fn render_stop_labels(
    document: &mut svg::Document,
    stops: &[(StopIdx, &Stop)],
    projector: &SphereProjector,
    settings: &RenderSettings,
) {
    let offset = Point::new(settings.stop_label_offset.0, settings.stop_label_offset.1);
    for (_, stop) in stops {
        let point = projector.project(&stop.coord);

        let underlayer = svg::Text::new()
            .position(point)
            .offset(offset)
            .font_size(settings.stop_label_font_size)
            .font_family(settings.font_family.clone())
            .data(stop.id.clone())
            .fill_color(settings.underlayer_color.clone())
            .stroke_color(settings.underlayer_color.clone())
            .stroke_width(settings.underlayer_width)
            .stroke_line_cap(StrokeLineCap::Round)
            .stroke_line_join(StrokeLineJoin::Round);
        document.add(underlayer);

        let label = svg::Text::new()
            .position(point)
            .offset(offset)
            .font_size(settings.stop_label_font_size)
            .font_family(settings.font_family.clone())
            .data(stop.id.clone())
            .fill_color(Color::from("black"));
        document.add(label);
    }
}
