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

use crate::svg::Color;

/// Parameters of the routing graph, see [`crate::router::TransportRouter`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// fixed waiting time paid before boarding any bus, in minutes
    pub bus_wait_time: u32,

    /// bus cruise speed, in km/h
    pub bus_velocity: f64,
}

impl RoutingSettings {
    pub fn check(&self) -> Result<(), BadSettings> {
        if self.bus_velocity <= 0.0 {
            return Err(BadSettings::ZeroVelocity);
        }
        Ok(())
    }
}

/// Parameters of the svg map, see [`crate::render::render_map`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default = "default_padding")]
    pub padding: f64,

    #[serde(default = "default_line_width")]
    pub line_width: f64,

    #[serde(default = "default_stop_radius")]
    pub stop_radius: f64,

    #[serde(default = "default_label_font_size")]
    pub bus_label_font_size: u32,

    #[serde(default = "default_bus_label_offset")]
    pub bus_label_offset: (f64, f64),

    #[serde(default = "default_label_font_size")]
    pub stop_label_font_size: u32,

    #[serde(default = "default_stop_label_offset")]
    pub stop_label_offset: (f64, f64),

    #[serde(default = "default_underlayer_color")]
    pub underlayer_color: Color,

    #[serde(default = "default_underlayer_width")]
    pub underlayer_width: f64,

    /// colors assigned cyclically to the drawn routes
    #[serde(default)]
    pub color_palette: Vec<Color>,

    #[serde(default = "default_font_family")]
    pub font_family: String,
}

pub const DEFAULT_FONT_FAMILY: &str = "Verdana";

fn default_width() -> f64 {
    1200.0
}

fn default_height() -> f64 {
    1200.0
}

fn default_padding() -> f64 {
    50.0
}

fn default_line_width() -> f64 {
    14.0
}

fn default_stop_radius() -> f64 {
    5.0
}

fn default_label_font_size() -> u32 {
    20
}

fn default_bus_label_offset() -> (f64, f64) {
    (7.0, 15.0)
}

fn default_stop_label_offset() -> (f64, f64) {
    (7.0, -3.0)
}

fn default_underlayer_color() -> Color {
    Color::from("white")
}

fn default_underlayer_width() -> f64 {
    3.0
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
            line_width: default_line_width(),
            stop_radius: default_stop_radius(),
            bus_label_font_size: default_label_font_size(),
            bus_label_offset: default_bus_label_offset(),
            stop_label_font_size: default_label_font_size(),
            stop_label_offset: default_stop_label_offset(),
            underlayer_color: default_underlayer_color(),
            underlayer_width: default_underlayer_width(),
            color_palette: Vec::new(),
            font_family: default_font_family(),
        }
    }
}

impl RenderSettings {
    pub fn check(&self) -> Result<(), BadSettings> {
        if self.color_palette.is_empty() {
            return Err(BadSettings::EmptyColorPalette);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadSettings {
    ZeroVelocity,
    EmptyColorPalette,
}

impl Display for BadSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BadSettings::ZeroVelocity => {
                write!(f, "bus_velocity must be positive")
            }
            BadSettings::EmptyColorPalette => {
                write!(f, "color_palette must contain at least one color")
            }
        }
    }
}

impl std::error::Error for BadSettings {}
