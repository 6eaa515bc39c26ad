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

use std::collections::HashMap;

use tracing::debug;

use crate::catalogue::{Bus, BusIdx, Catalogue, StopIdx};
use crate::config::RoutingSettings;
use crate::engine::graph::{DirectedWeightedGraph, Edge, VertexId};
use crate::engine::shortest_path::shortest_path;
use crate::response::{Item, Response};

/// What a graph edge stands for, recorded at build time and replayed when a
/// shortest path is walked back into a journey.
#[derive(Debug, Clone, Copy, PartialEq)]
enum EdgeKind {
    /// waiting at a stop, from its wait vertex to its board vertex
    Wait { stop: StopIdx },
    /// riding a bus over `span_count` consecutive segments
    Ride { bus: BusIdx, span_count: u32 },
}

/// The time-weighted routing graph over a catalogue.
///
/// Every stop gets two vertices : a *wait* vertex (standing on the
/// platform) and a *board* vertex (sitting in a bus). The only way from
/// wait to board is an edge weighted `bus_wait_time`, and every bus edge
/// lands on a *wait* vertex, so changing buses always pays the waiting
/// time while riding through a stop does not.
///
/// The graph borrows the catalogue and is immutable once built.
pub struct TransportRouter<'c> {
    catalogue: &'c Catalogue,
    settings: RoutingSettings,
    graph: DirectedWeightedGraph,
    wait_vertices: HashMap<StopIdx, VertexId>,
    board_vertices: HashMap<StopIdx, VertexId>,
    edges_info: Vec<EdgeKind>,
}

impl<'c> TransportRouter<'c> {
    pub fn new(catalogue: &'c Catalogue, settings: RoutingSettings) -> Self {
        let nb_of_stops = catalogue.nb_of_stops();
        let mut router = Self {
            catalogue,
            settings,
            graph: DirectedWeightedGraph::new(2 * nb_of_stops),
            wait_vertices: HashMap::with_capacity(nb_of_stops),
            board_vertices: HashMap::with_capacity(nb_of_stops),
            edges_info: Vec::new(),
        };
        router.build();
        router
    }

    fn build(&mut self) {
        let catalogue = self.catalogue;

        let mut vertex_id: VertexId = 0;
        for (stop_idx, _) in catalogue.stops() {
            self.wait_vertices.insert(stop_idx, vertex_id);
            self.board_vertices.insert(stop_idx, vertex_id + 1);
            vertex_id += 2;
        }

        for (stop_idx, _) in catalogue.stops() {
            let edge = Edge {
                from: self.wait_vertices[&stop_idx],
                to: self.board_vertices[&stop_idx],
                weight: f64::from(self.settings.bus_wait_time),
            };
            self.record_edge(edge, EdgeKind::Wait { stop: stop_idx });
        }

        for (bus_idx, bus) in catalogue.buses() {
            self.add_bus_edges(bus_idx, bus);
        }

        debug!(
            "Routing graph built : {} vertices, {} edges",
            self.graph.nb_of_vertices(),
            self.graph.nb_of_edges()
        );
    }

    fn record_edge(&mut self, edge: Edge, kind: EdgeKind) {
        let edge_id = self.graph.add_edge(edge);
        debug_assert_eq!(edge_id, self.edges_info.len());
        self.edges_info.push(kind);
    }

    /// One edge per ordered pair of positions along the route. The return
    /// leg of a non round-trip route gets its own pairs, with their own
    /// weights since road distances are asymmetric.
    fn add_bus_edges(&mut self, bus_idx: BusIdx, bus: &Bus) {
        let stops = &bus.stops;
        for i in 0..stops.len() {
            for j in (i + 1)..stops.len() {
                let edge = Edge {
                    from: self.board_vertices[&stops[i]],
                    to: self.wait_vertices[&stops[j]],
                    weight: self.travel_time_between(stops, i, j),
                };
                self.record_edge(
                    edge,
                    EdgeKind::Ride {
                        bus: bus_idx,
                        span_count: (j - i) as u32,
                    },
                );
            }
        }
        if !bus.is_roundtrip {
            for i in (1..stops.len()).rev() {
                for j in (0..i).rev() {
                    let edge = Edge {
                        from: self.board_vertices[&stops[i]],
                        to: self.wait_vertices[&stops[j]],
                        weight: self.travel_time_between(stops, i, j),
                    };
                    self.record_edge(
                        edge,
                        EdgeKind::Ride {
                            bus: bus_idx,
                            span_count: (i - j) as u32,
                        },
                    );
                }
            }
        }
    }

    /// Time in minutes to ride from `stops[from]` to `stops[to]` without
    /// alighting, summing road distances between successive stops.
    fn travel_time_between(&self, stops: &[StopIdx], from: usize, to: usize) -> f64 {
        let mut meters = 0u64;
        if from < to {
            for i in from..to {
                meters += u64::from(self.catalogue.distance_between(stops[i], stops[i + 1]));
            }
        } else {
            for i in (to + 1)..=from {
                meters += u64::from(self.catalogue.distance_between(stops[i], stops[i - 1]));
            }
        }
        let speed_meters_per_min = self.settings.bus_velocity * 1000.0 / 60.0;
        meters as f64 / speed_meters_per_min
    }

    /// Shortest-time journey between two stops, from platform to platform.
    /// `None` when either stop is unknown or no path exists.
    pub fn find_route(&self, from: &str, to: &str) -> Option<Response> {
        let from_idx = self.catalogue.stop_idx(from)?;
        let to_idx = self.catalogue.stop_idx(to)?;
        let start = *self.wait_vertices.get(&from_idx)?;
        let finish = *self.wait_vertices.get(&to_idx)?;

        let path = shortest_path(&self.graph, start, finish)?;

        let items = path
            .edges
            .iter()
            .map(|&edge_id| match self.edges_info[edge_id] {
                EdgeKind::Wait { stop } => Item::Wait {
                    stop_name: self.catalogue.stop(stop).id.clone(),
                    time: f64::from(self.settings.bus_wait_time),
                },
                EdgeKind::Ride { bus, span_count } => Item::Ride {
                    bus_name: self.catalogue.bus(bus).id.clone(),
                    span_count,
                    time: self.graph.edge(edge_id).weight,
                },
            })
            .collect();

        Some(Response {
            total_time: path.weight,
            items,
        })
    }
}
