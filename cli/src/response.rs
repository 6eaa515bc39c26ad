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

use serde::Serialize;

use munin::catalogue::{BusInfo, StopInfo};
use munin::response::{Item, Response};

/// One element of the output array. Untagged : every variant already
/// carries its `request_id`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Bus(BusStat),
    Stop(StopStat),
    Map(MapStat),
    Route(RouteStat),
    Error(ErrorStat),
}

#[derive(Debug, Clone, Serialize)]
pub struct BusStat {
    pub curvature: f64,
    pub request_id: i64,
    pub route_length: i64,
    pub stop_count: usize,
    pub unique_stop_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopStat {
    pub buses: Vec<String>,
    pub request_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapStat {
    pub map: String,
    pub request_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteStat {
    pub request_id: i64,
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: u32,
        time: f64,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorStat {
    pub request_id: i64,
    pub error_message: String,
}

impl StatResponse {
    pub fn bus(request_id: i64, info: &BusInfo) -> Self {
        StatResponse::Bus(BusStat {
            curvature: info.curvature,
            request_id,
            route_length: info.route_length as i64,
            stop_count: info.stops_count,
            unique_stop_count: info.unique_stops_count,
        })
    }

    pub fn stop(request_id: i64, info: StopInfo) -> Self {
        StatResponse::Stop(StopStat {
            buses: info.buses.into_iter().collect(),
            request_id,
        })
    }

    pub fn map(request_id: i64, map: String) -> Self {
        StatResponse::Map(MapStat { map, request_id })
    }

    pub fn route(request_id: i64, journey: &Response) -> Self {
        let items = journey
            .items
            .iter()
            .map(|item| match item {
                Item::Wait { stop_name, time } => RouteItem::Wait {
                    stop_name: stop_name.clone(),
                    time: *time,
                },
                Item::Ride {
                    bus_name,
                    span_count,
                    time,
                } => RouteItem::Bus {
                    bus: bus_name.clone(),
                    span_count: *span_count,
                    time: *time,
                },
            })
            .collect();
        StatResponse::Route(RouteStat {
            request_id,
            total_time: journey.total_time,
            items,
        })
    }

    pub fn not_found(request_id: i64) -> Self {
        StatResponse::Error(ErrorStat {
            request_id,
            error_message: "not found".to_string(),
        })
    }
}
