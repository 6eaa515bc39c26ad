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

use std::collections::BTreeMap;

use serde::Deserialize;

use munin::{RenderSettings, RoutingSettings};

/// The whole batch : catalogue description, settings, then queries.
/// Field order in the document does not matter, ingest order does, see
/// [`crate::answer`].
#[derive(Debug, Clone, Deserialize)]
pub struct InputDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    #[serde(default)]
    pub render_settings: Option<RenderSettings>,

    #[serde(default)]
    pub routing_settings: Option<RoutingSettings>,

    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// road distances from this stop, in meters
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusRequest {
    pub name: String,
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Map { id: i64 },
    Route { id: i64, from: String, to: String },
}
