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

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::graph::{DirectedWeightedGraph, EdgeId, VertexId};

/// A shortest path : its total weight plus the traversed edges in order.
/// `from == to` yields an empty zero-weight path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub weight: f64,
    pub edges: Vec<EdgeId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    distance: f64,
    vertex: VertexId,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra with predecessor-edge recovery. Weights must be nonnegative.
/// A vertex distance is only updated on strict improvement, so among
/// equal-weight paths the first one discovered wins and the result is
/// deterministic given the edge-insertion order.
pub fn shortest_path(
    graph: &DirectedWeightedGraph,
    from: VertexId,
    to: VertexId,
) -> Option<Path> {
    let mut distances = vec![f64::INFINITY; graph.nb_of_vertices()];
    let mut predecessors: Vec<Option<EdgeId>> = vec![None; graph.nb_of_vertices()];
    let mut queue = BinaryHeap::new();

    distances[from] = 0.0;
    queue.push(Reverse(QueueEntry {
        distance: 0.0,
        vertex: from,
    }));

    while let Some(Reverse(entry)) = queue.pop() {
        if entry.vertex == to {
            break;
        }
        // stale entry, a shorter way to this vertex was already settled
        if entry.distance > distances[entry.vertex] {
            continue;
        }
        for edge_id in graph.outgoing_edges(entry.vertex) {
            let edge = graph.edge(edge_id);
            let candidate = entry.distance + edge.weight;
            if candidate < distances[edge.to] {
                distances[edge.to] = candidate;
                predecessors[edge.to] = Some(edge_id);
                queue.push(Reverse(QueueEntry {
                    distance: candidate,
                    vertex: edge.to,
                }));
            }
        }
    }

    if distances[to].is_infinite() {
        return None;
    }

    let mut edges = Vec::new();
    let mut vertex = to;
    while let Some(edge_id) = predecessors[vertex] {
        edges.push(edge_id);
        vertex = graph.edge(edge_id).from;
    }
    edges.reverse();

    Some(Path {
        weight: distances[to],
        edges,
    })
}
