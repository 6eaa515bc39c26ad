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

pub type VertexId = usize;
pub type EdgeId = usize;

/// A directed edge weighted in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

/// A directed weighted graph with a fixed vertex count and append-only
/// edges. Edge ids are dense and allocated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    pub fn new(nb_of_vertices: usize) -> Self {
        Self {
            edges: Vec::new(),
            outgoing: vec![Vec::new(); nb_of_vertices],
        }
    }

    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        let id = self.edges.len();
        self.outgoing[edge.from].push(id);
        self.edges.push(edge);
        id
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    pub fn nb_of_vertices(&self) -> usize {
        self.outgoing.len()
    }

    pub fn nb_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn outgoing_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.outgoing[vertex].iter().copied()
    }
}
