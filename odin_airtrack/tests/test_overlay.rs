/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

/// airport overlay declutter tests, using the small datasets in resources/
/// run with "cargo test --test test_overlay -- --nocapture"

use odin_airtrack::{
    AirtrackConfig, ReferenceConfig, Tracker, ClickTarget,
    declutter::{Overlay,ThresholdTable},
    frequency::FrequencyIndex,
    reference::{Airport,load_reference_data,read_airports_file,read_routes_file},
    render::{MarkerHandle,RecordingSurface}
};

fn airport (id: i64, iata: &str)->Airport {
    Airport {
        id, name: format!("{iata} airport"), city: None, country: None,
        iata: Some(iata.to_string()), icao: None,
        lat: Some(10.0), lng: Some(20.0), altitude: None, utc_offset: None, tz: None
    }
}

#[test]
fn test_threshold_edge () {
    let airports = vec![ airport(1, "BIG"), airport(2, "MID") ];
    let mut edges: Vec<(Option<&str>,Option<&str>)> = Vec::new();
    for _ in 0..151 { edges.push( (Some("BIG"), None)); }
    for _ in 0..150 { edges.push( (Some("MID"), None)); }
    let sizes = FrequencyIndex::from_edges( edges);

    let mut surface = RecordingSurface::new();
    let mut overlay = Overlay::new( ThresholdTable::default(), 2);
    overlay.plot( &mut surface, &airports, &sizes);

    let big = overlay.markers()[0].marker;
    let mid = overlay.markers()[1].marker;
    assert!( surface.marker(big).unwrap().visible);
    assert!( !surface.marker(mid).unwrap().visible);

    assert_eq!( overlay.set_zoom( &mut surface, 0), 2);
    assert!( surface.marker(mid).unwrap().visible);

    assert_eq!( overlay.set_zoom( &mut surface, 1), 0); // threshold 200
    assert_eq!( surface.visible_markers(), 0);
}

#[test]
fn test_zoom_changes () {
    let routes = read_routes_file("resources/routes.csv").unwrap();
    let airports = read_airports_file("resources/airports.csv").unwrap();
    let sizes = FrequencyIndex::from_routes( &routes);
    println!("LAX: {}, SFO: {}, OAK: {}, RNO: {}", sizes.count("LAX"), sizes.count("SFO"), sizes.count("OAK"), sizes.count("RNO"));
    assert_eq!( sizes.count("LAX"), 5);

    let table = ThresholdTable::new( vec![ None, Some(4), Some(2), Some(0) ]);
    let mut surface = RecordingSurface::new();
    let mut overlay = Overlay::new( table, 1);

    assert_eq!( overlay.plot( &mut surface, &airports, &sizes), 4); // "Nowhere Strip" has no position
    assert_eq!( overlay.visible_count(), 1);

    assert_eq!( overlay.set_zoom( &mut surface, 2), 3); // LAX, SFO, OAK
    assert_eq!( overlay.set_zoom( &mut surface, 3), 4);
    assert_eq!( overlay.set_zoom( &mut surface, 7), 4);
    assert_eq!( overlay.set_zoom( &mut surface, 1), 1);
    assert_eq!( surface.visible_markers(), 1);
}

#[tokio::test]
async fn test_tracker_overlay () {
    let mut config = AirtrackConfig::new("http://localhost/aircrafts");
    config.initial_zoom = 8;
    config.visibility_thresholds = vec![ None, None, None, None, None, None, None, Some(2), Some(4) ];

    let reference = load_reference_data( &ReferenceConfig::Files {
        airports: "resources/airports.csv".into(),
        routes: "resources/routes.csv".into(),
        airlines: "resources/airlines.csv".into(),
    }).await.unwrap();
    assert_eq!( reference.airlines.len(), 4); // inactive airline dropped

    let mut tracker = Tracker::new( &config, RecordingSurface::new());
    tracker.set_reference_data( reference);

    assert_eq!( tracker.overlay().len(), 4);
    assert_eq!( tracker.overlay().visible_count(), 1); // initial visibility is for the initial zoom
    assert_eq!( tracker.on_zoom_changed(7), 3);
    assert_eq!( tracker.zoom(), 7);
    assert_eq!( tracker.on_zoom_changed(9), 4);

    // clicking an airport shows its info but does not select anything
    let lax = tracker.overlay().markers().iter().find( |m| m.airport.key() == Some("LAX")).unwrap().marker;
    assert_eq!( tracker.on_marker_click( lax), ClickTarget::Airport("Los Angeles International Airport".into()));
    let (marker, info) = tracker.surface().info_window().unwrap();
    assert_eq!( *marker, lax);
    assert_eq!( info.iata, "LAX");
    assert_eq!( info.icao, "KLAX");
    assert_eq!( info.altitude, "125 ft");
    assert!( tracker.selected().is_none());

    assert_eq!( tracker.on_marker_click( MarkerHandle(9999)), ClickTarget::Nothing);
}
