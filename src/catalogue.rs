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

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::{self, Display, Formatter};

use typed_index_collection::{CollectionWithId, Id, Idx};

use crate::geo::{self, Coord};

pub type StopIdx = Idx<Stop>;
pub type BusIdx = Idx<Bus>;

#[derive(Debug, Clone)]
pub struct Stop {
    pub id: String,
    pub coord: Coord,
}

impl Id<Stop> for Stop {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A bus route. `stops` is the outbound leg only : a round-trip route ends
/// where it started (by convention its list ends with its first stop), while
/// a non round-trip route is ridden outbound then backwards to its first stop.
#[derive(Debug, Clone)]
pub struct Bus {
    pub id: String,
    pub stops: Vec<StopIdx>,
    pub is_roundtrip: bool,
}

impl Id<Bus> for Bus {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Statistics of one bus route, see [`Catalogue::bus_info`].
#[derive(Debug, Clone, PartialEq)]
pub struct BusInfo {
    pub stops_count: usize,
    pub unique_stops_count: usize,
    /// Road length of the full trajectory, in meters.
    pub route_length: f64,
    /// Road length divided by great-circle length, 1.0 when the latter is zero.
    pub curvature: f64,
}

/// Names of the buses serving a stop, lexicographically ordered.
/// Empty for a stop no bus goes through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StopInfo {
    pub buses: BTreeSet<String>,
}

#[derive(Debug)]
pub enum ModelError {
    DuplicateStop(String),
    DuplicateBus(String),
    UnknownStop(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::DuplicateStop(name) => {
                write!(f, "A stop named {} is already in the catalogue", name)
            }
            ModelError::DuplicateBus(name) => {
                write!(f, "A bus named {} is already in the catalogue", name)
            }
            ModelError::UnknownStop(name) => {
                write!(f, "The stop {} is not in the catalogue", name)
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// The static transit catalogue : stops, buses and asymmetric road
/// distances, ingested once and then only read.
///
/// Stops and buses live in append-only collections, so an `Idx` handed out
/// at insertion stays valid for the whole life of the catalogue. Every other
/// structure refers to them through these indices.
#[derive(Debug, Default)]
pub struct Catalogue {
    stops: CollectionWithId<Stop>,
    buses: CollectionWithId<Bus>,
    road_distances: HashMap<(StopIdx, StopIdx), u32>,
    buses_of_stop: HashMap<StopIdx, BTreeSet<String>>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stop(&mut self, name: &str, coord: Coord) -> Result<StopIdx, ModelError> {
        let stop = Stop {
            id: name.to_string(),
            coord,
        };
        let idx = self
            .stops
            .push(stop)
            .map_err(|_| ModelError::DuplicateStop(name.to_string()))?;
        self.buses_of_stop.insert(idx, BTreeSet::new());
        Ok(idx)
    }

    /// Records the road distance from `from` to `to`, in meters. The
    /// declaration is directional, see [`Catalogue::distance_between`].
    pub fn add_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), ModelError> {
        let from_idx = self
            .stop_idx(from)
            .ok_or_else(|| ModelError::UnknownStop(from.to_string()))?;
        let to_idx = self
            .stop_idx(to)
            .ok_or_else(|| ModelError::UnknownStop(to.to_string()))?;
        self.road_distances.insert((from_idx, to_idx), meters);
        Ok(())
    }

    pub fn add_bus(
        &mut self,
        name: &str,
        stop_names: &[String],
        is_roundtrip: bool,
    ) -> Result<BusIdx, ModelError> {
        if self.buses.get_idx(name).is_some() {
            return Err(ModelError::DuplicateBus(name.to_string()));
        }
        let mut stops = Vec::with_capacity(stop_names.len());
        for stop_name in stop_names {
            let idx = self
                .stop_idx(stop_name)
                .ok_or_else(|| ModelError::UnknownStop(stop_name.clone()))?;
            stops.push(idx);
        }
        for &stop_idx in &stops {
            self.buses_of_stop
                .entry(stop_idx)
                .or_default()
                .insert(name.to_string());
        }
        let bus = Bus {
            id: name.to_string(),
            stops,
            is_roundtrip,
        };
        self.buses
            .push(bus)
            .map_err(|_| ModelError::DuplicateBus(name.to_string()))
    }

    pub fn stop_idx(&self, name: &str) -> Option<StopIdx> {
        self.stops.get_idx(name)
    }

    pub fn stop(&self, idx: StopIdx) -> &Stop {
        &self.stops[idx]
    }

    pub fn bus(&self, idx: BusIdx) -> &Bus {
        &self.buses[idx]
    }

    pub fn get_stop(&self, name: &str) -> Option<&Stop> {
        self.stops.get(name)
    }

    pub fn get_bus(&self, name: &str) -> Option<&Bus> {
        self.buses.get(name)
    }

    pub fn nb_of_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn nb_of_buses(&self) -> usize {
        self.buses.len()
    }

    pub fn stops(&self) -> impl Iterator<Item = (StopIdx, &Stop)> + '_ {
        self.stops.iter()
    }

    pub fn buses(&self) -> impl Iterator<Item = (BusIdx, &Bus)> + '_ {
        self.buses.iter()
    }

    /// Road distance from `from` to `to` in meters : the declared distance
    /// if any, else the distance declared for the reverse direction, else
    /// the great-circle distance truncated to whole meters.
    pub fn distance_between(&self, from: StopIdx, to: StopIdx) -> u32 {
        if let Some(&meters) = self.road_distances.get(&(from, to)) {
            return meters;
        }
        if let Some(&meters) = self.road_distances.get(&(to, from)) {
            return meters;
        }
        geo::distance_between(&self.stops[from].coord, &self.stops[to].coord) as u32
    }

    pub fn bus_info(&self, name: &str) -> Option<BusInfo> {
        let bus = self.buses.get(name)?;
        if bus.stops.is_empty() {
            return None;
        }

        let stops_count = if bus.is_roundtrip {
            bus.stops.len()
        } else {
            2 * bus.stops.len() - 1
        };
        let unique_stops_count = bus.stops.iter().collect::<HashSet<_>>().len();

        let mut route_length = 0u64;
        let mut geo_length = 0f64;
        for window in bus.stops.windows(2) {
            route_length += u64::from(self.distance_between(window[0], window[1]));
            geo_length +=
                geo::distance_between(&self.stops[window[0]].coord, &self.stops[window[1]].coord);
        }
        if !bus.is_roundtrip {
            // the return leg has its own length since road distances are
            // asymmetric
            for window in bus.stops.windows(2) {
                route_length += u64::from(self.distance_between(window[1], window[0]));
                geo_length += geo::distance_between(
                    &self.stops[window[1]].coord,
                    &self.stops[window[0]].coord,
                );
            }
        }

        let route_length = route_length as f64;
        let curvature = if geo_length > 0.0 {
            route_length / geo_length
        } else {
            1.0
        };

        Some(BusInfo {
            stops_count,
            unique_stops_count,
            route_length,
            curvature,
        })
    }

    /// `None` only when the stop name is unknown : a stop no bus serves
    /// yields an empty set.
    pub fn stop_info(&self, name: &str) -> Option<StopInfo> {
        let idx = self.stops.get_idx(name)?;
        let buses = self.buses_of_stop.get(&idx).cloned().unwrap_or_default();
        Some(StopInfo { buses })
    }

    /// All buses, lexicographically ordered by name.
    pub fn buses_sorted_by_name(&self) -> Vec<(BusIdx, &Bus)> {
        let mut buses: Vec<_> = self.buses.iter().collect();
        buses.sort_by(|lhs, rhs| lhs.1.id.cmp(&rhs.1.id));
        buses
    }

    /// All stops referenced by at least one bus, in insertion order.
    pub fn stops_used_in_buses(&self) -> Vec<(StopIdx, &Stop)> {
        self.stops
            .iter()
            .filter(|(idx, _)| {
                self.buses_of_stop
                    .get(idx)
                    .map_or(false, |buses| !buses.is_empty())
            })
            .collect()
    }
}
