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

pub mod document;
pub mod logger;
pub mod response;

use anyhow::{Context, Error};

use munin::tracing::info;
use munin::{render, Catalogue, Coord, TransportRouter};

use document::{BaseRequest, InputDocument, StatRequest};
use response::StatResponse;

/// Answers a whole input document : ingest, then stat requests, returning
/// the serialized response array.
pub fn run(input: &str) -> Result<String, Error> {
    let input_document: InputDocument =
        serde_json::from_str(input).context("Malformed input document")?;
    let responses = answer(&input_document)?;
    serde_json::to_string(&responses).context("Could not serialize the response array")
}

pub fn answer(input_document: &InputDocument) -> Result<Vec<StatResponse>, Error> {
    if let Some(render_settings) = &input_document.render_settings {
        render_settings.check().context("Bad render_settings")?;
    }
    if let Some(routing_settings) = &input_document.routing_settings {
        routing_settings.check().context("Bad routing_settings")?;
    }

    let catalogue = ingest(&input_document.base_requests)?;

    let render_settings = input_document.render_settings.clone().unwrap_or_default();

    // built on the first Route request, then reused for the whole batch
    let mut router: Option<TransportRouter<'_>> = None;

    let mut responses = Vec::with_capacity(input_document.stat_requests.len());
    for request in &input_document.stat_requests {
        let response = match request {
            StatRequest::Bus { id, name } => match catalogue.bus_info(name) {
                Some(info) => StatResponse::bus(*id, &info),
                None => StatResponse::not_found(*id),
            },
            StatRequest::Stop { id, name } => match catalogue.stop_info(name) {
                Some(info) => StatResponse::stop(*id, info),
                None => StatResponse::not_found(*id),
            },
            StatRequest::Map { id } => {
                let map = render::render_map(&catalogue, &render_settings);
                StatResponse::map(*id, map.render())
            }
            StatRequest::Route { id, from, to } => match &input_document.routing_settings {
                None => StatResponse::not_found(*id),
                Some(settings) => {
                    let router = router
                        .get_or_insert_with(|| TransportRouter::new(&catalogue, *settings));
                    match router.find_route(from, to) {
                        Some(journey) => StatResponse::route(*id, &journey),
                        None => StatResponse::not_found(*id),
                    }
                }
            },
        };
        responses.push(response);
    }
    Ok(responses)
}

/// Three passes over the base requests : all stops, then all road
/// distances, then all buses. Declaration order inside the array is free.
fn ingest(base_requests: &[BaseRequest]) -> Result<Catalogue, Error> {
    let mut catalogue = Catalogue::new();

    for request in base_requests {
        if let BaseRequest::Stop(stop) = request {
            catalogue.add_stop(&stop.name, Coord::new(stop.latitude, stop.longitude))?;
        }
    }
    for request in base_requests {
        if let BaseRequest::Stop(stop) = request {
            for (to, &meters) in &stop.road_distances {
                catalogue.add_distance(&stop.name, to, meters)?;
            }
        }
    }
    for request in base_requests {
        if let BaseRequest::Bus(bus) = request {
            catalogue.add_bus(&bus.name, &bus.stops, bus.is_roundtrip)?;
        }
    }

    info!(
        "Catalogue ingested : {} stops, {} buses",
        catalogue.nb_of_stops(),
        catalogue.nb_of_buses()
    );
    Ok(catalogue)
}
