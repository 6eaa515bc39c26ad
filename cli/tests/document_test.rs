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

use anyhow::{format_err, Error};
use serde_json::{json, Value};

use munin_cli::run;

fn run_json(input: &Value) -> Result<Value, Error> {
    let output = run(&input.to_string())?;
    Ok(serde_json::from_str(&output)?)
}

fn two_stop_base() -> Value {
    json!([
        {
            "type": "Stop",
            "name": "A",
            "latitude": 55.611087,
            "longitude": 37.208290,
            "road_distances": {"B": 3900}
        },
        {
            "type": "Stop",
            "name": "B",
            "latitude": 55.595884,
            "longitude": 37.209755,
            "road_distances": {"A": 3900}
        },
        {
            "type": "Bus",
            "name": "X",
            "stops": ["A", "B"],
            "is_roundtrip": false
        }
    ])
}

#[test]
fn test_bus_stats() -> Result<(), Error> {
    let responses = run_json(&json!({
        "base_requests": two_stop_base(),
        "stat_requests": [{"id": 1, "type": "Bus", "name": "X"}]
    }))?;

    let response = &responses[0];
    assert_eq!(response["request_id"], 1);
    assert_eq!(response["route_length"], 7800);
    assert_eq!(response["stop_count"], 3);
    assert_eq!(response["unique_stop_count"], 2);
    let curvature = response["curvature"]
        .as_f64()
        .ok_or_else(|| format_err!("curvature is not a number"))?;
    assert!(curvature > 1.0);

    Ok(())
}

#[test]
fn test_stop_stats() -> Result<(), Error> {
    let responses = run_json(&json!({
        "base_requests": two_stop_base(),
        "stat_requests": [{"id": 7, "type": "Stop", "name": "A"}]
    }))?;

    assert_eq!(responses[0], json!({"buses": ["X"], "request_id": 7}));

    Ok(())
}

#[test]
fn test_stop_without_buses_is_not_an_error() -> Result<(), Error> {
    let responses = run_json(&json!({
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 55.0, "longitude": 37.0}
        ],
        "stat_requests": [{"id": 1, "type": "Stop", "name": "A"}]
    }))?;

    assert_eq!(responses[0], json!({"buses": [], "request_id": 1}));

    Ok(())
}

#[test]
fn test_unknown_names_are_not_found() -> Result<(), Error> {
    let responses = run_json(&json!({
        "base_requests": two_stop_base(),
        "stat_requests": [
            {"id": 1, "type": "Bus", "name": "ghost"},
            {"id": 2, "type": "Stop", "name": "ghost"}
        ]
    }))?;

    assert_eq!(
        responses[0],
        json!({"request_id": 1, "error_message": "not found"})
    );
    assert_eq!(
        responses[1],
        json!({"request_id": 2, "error_message": "not found"})
    );

    Ok(())
}

#[test]
fn test_route_across_transfer() -> Result<(), Error> {
    let responses = run_json(&json!({
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 55.574371, "longitude": 37.651700,
             "road_distances": {"B": 600}},
            {"type": "Stop", "name": "B", "latitude": 55.587655, "longitude": 37.645687,
             "road_distances": {"A": 600, "C": 600}},
            {"type": "Stop", "name": "C", "latitude": 55.592028, "longitude": 37.653656,
             "road_distances": {"B": 600}},
            {"type": "Bus", "name": "R1", "stops": ["A", "B"], "is_roundtrip": false},
            {"type": "Bus", "name": "R2", "stops": ["B", "C"], "is_roundtrip": false}
        ],
        "routing_settings": {"bus_wait_time": 6, "bus_velocity": 30},
        "stat_requests": [{"id": 11, "type": "Route", "from": "A", "to": "C"}]
    }))?;

    let response = &responses[0];
    assert_eq!(response["request_id"], 11);
    let total_time = response["total_time"]
        .as_f64()
        .ok_or_else(|| format_err!("total_time is not a number"))?;
    assert!((total_time - 14.4).abs() < 1e-9);

    let items = response["items"]
        .as_array()
        .ok_or_else(|| format_err!("items is not an array"))?;
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["type"], "Wait");
    assert_eq!(items[0]["stop_name"], "A");
    assert_eq!(items[0]["time"], 6.0);
    assert_eq!(items[1]["type"], "Bus");
    assert_eq!(items[1]["bus"], "R1");
    assert_eq!(items[1]["span_count"], 1);
    assert_eq!(items[2]["type"], "Wait");
    assert_eq!(items[2]["stop_name"], "B");
    assert_eq!(items[3]["type"], "Bus");
    assert_eq!(items[3]["bus"], "R2");

    Ok(())
}

#[test]
fn test_route_between_same_stop() -> Result<(), Error> {
    let responses = run_json(&json!({
        "base_requests": two_stop_base(),
        "routing_settings": {"bus_wait_time": 6, "bus_velocity": 30},
        "stat_requests": [{"id": 3, "type": "Route", "from": "A", "to": "A"}]
    }))?;

    assert_eq!(
        responses[0],
        json!({"request_id": 3, "total_time": 0.0, "items": []})
    );

    Ok(())
}

#[test]
fn test_route_without_routing_settings_is_not_found() -> Result<(), Error> {
    let responses = run_json(&json!({
        "base_requests": two_stop_base(),
        "stat_requests": [{"id": 4, "type": "Route", "from": "A", "to": "B"}]
    }))?;

    assert_eq!(
        responses[0],
        json!({"request_id": 4, "error_message": "not found"})
    );

    Ok(())
}

#[test]
fn test_map_request() -> Result<(), Error> {
    let responses = run_json(&json!({
        "base_requests": [
            {"type": "Stop", "name": "A&B<C>", "latitude": 55.0, "longitude": 37.0},
            {"type": "Stop", "name": "D", "latitude": 55.1, "longitude": 37.1},
            {"type": "Bus", "name": "X", "stops": ["A&B<C>", "D"], "is_roundtrip": false}
        ],
        "render_settings": {
            "width": 200,
            "height": 200,
            "padding": 30,
            "color_palette": ["green", [255, 160, 0], [255, 200, 23, 0.85]]
        },
        "stat_requests": [{"id": 5, "type": "Map"}]
    }))?;

    let response = &responses[0];
    assert_eq!(response["request_id"], 5);
    let map = response["map"]
        .as_str()
        .ok_or_else(|| format_err!("map is not a string"))?;
    assert!(map.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>"));
    assert!(map.ends_with("</svg>"));
    assert!(map.contains("stroke=\"green\""));
    assert!(map.contains("A&amp;B&lt;C&gt;"));

    Ok(())
}

#[test]
fn test_responses_follow_request_order() -> Result<(), Error> {
    let responses = run_json(&json!({
        "base_requests": two_stop_base(),
        "stat_requests": [
            {"id": 30, "type": "Stop", "name": "B"},
            {"id": 10, "type": "Bus", "name": "X"},
            {"id": 20, "type": "Stop", "name": "A"}
        ]
    }))?;

    let ids: Vec<_> = responses
        .as_array()
        .ok_or_else(|| format_err!("responses are not an array"))?
        .iter()
        .map(|response| response["request_id"].clone())
        .collect();
    assert_eq!(ids, vec![json!(30), json!(10), json!(20)]);

    Ok(())
}

#[test]
fn test_identical_batches_are_deterministic() -> Result<(), Error> {
    let input = json!({
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 55.574371, "longitude": 37.651700,
             "road_distances": {"B": 600}},
            {"type": "Stop", "name": "B", "latitude": 55.587655, "longitude": 37.645687,
             "road_distances": {"A": 700, "C": 600}},
            {"type": "Stop", "name": "C", "latitude": 55.592028, "longitude": 37.653656},
            {"type": "Bus", "name": "R1", "stops": ["A", "B"], "is_roundtrip": false},
            {"type": "Bus", "name": "R2", "stops": ["B", "C"], "is_roundtrip": false}
        ],
        "render_settings": {"color_palette": ["red", "green"]},
        "routing_settings": {"bus_wait_time": 2, "bus_velocity": 40},
        "stat_requests": [
            {"id": 1, "type": "Bus", "name": "R1"},
            {"id": 2, "type": "Stop", "name": "B"},
            {"id": 3, "type": "Map"},
            {"id": 4, "type": "Route", "from": "A", "to": "C"}
        ]
    })
    .to_string();

    let first = run(&input)?;
    let second = run(&input)?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_malformed_document_fails() {
    assert!(run("this is not json").is_err());
}

#[test]
fn test_duplicate_stop_aborts_the_batch() {
    let input = json!({
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 55.0, "longitude": 37.0},
            {"type": "Stop", "name": "A", "latitude": 55.1, "longitude": 37.1}
        ],
        "stat_requests": [{"id": 1, "type": "Stop", "name": "A"}]
    });

    assert!(run(&input.to_string()).is_err());
}

#[test]
fn test_bus_referencing_unknown_stop_aborts_the_batch() {
    let input = json!({
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 55.0, "longitude": 37.0},
            {"type": "Bus", "name": "X", "stops": ["A", "ghost"], "is_roundtrip": false}
        ]
    });

    assert!(run(&input.to_string()).is_err());
}

#[test]
fn test_zero_velocity_aborts_the_batch() {
    let input = json!({
        "base_requests": two_stop_base(),
        "routing_settings": {"bus_wait_time": 6, "bus_velocity": 0},
        "stat_requests": [{"id": 1, "type": "Route", "from": "A", "to": "B"}]
    });

    assert!(run(&input.to_string()).is_err());
}

#[test]
fn test_empty_color_palette_aborts_the_batch() {
    let input = json!({
        "base_requests": two_stop_base(),
        "render_settings": {"color_palette": []},
        "stat_requests": [{"id": 1, "type": "Map"}]
    });

    assert!(run(&input.to_string()).is_err());
}

#[test]
fn test_buses_can_be_declared_before_their_stops() -> Result<(), Error> {
    // base_requests order inside the array does not matter
    let responses = run_json(&json!({
        "base_requests": [
            {"type": "Bus", "name": "X", "stops": ["A", "B"], "is_roundtrip": false},
            {"type": "Stop", "name": "A", "latitude": 55.0, "longitude": 37.0},
            {"type": "Stop", "name": "B", "latitude": 55.1, "longitude": 37.1}
        ],
        "stat_requests": [{"id": 1, "type": "Bus", "name": "X"}]
    }))?;

    assert_eq!(responses[0]["stop_count"], 3);

    Ok(())
}
