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

/// config loading tests
/// run with "cargo test --test test_config -- --nocapture"

use std::time::Duration;
use odin_airtrack::{
    DEFAULT_DROP_AFTER, DEFAULT_POLL_INTERVAL, DEFAULT_VISIBILITY_THRESHOLDS, INITIAL_ZOOM_LEVEL,
    ReferenceConfig, load_config,
    config::parse_config
};

#[test]
fn test_load_config_file () {
    let config = load_config("configs/airtrack.ron").unwrap();
    println!("{config:#?}");

    assert_eq!( config.snapshot_url, "http://localhost:3000/aircrafts");
    assert_eq!( config.poll_interval, Duration::from_secs(2));
    assert_eq!( config.drop_after, Duration::from_millis(120_000));
    assert_eq!( config.initial_zoom, 9);
    assert_eq!( config.visibility_thresholds, DEFAULT_VISIBILITY_THRESHOLDS.to_vec());
    assert!( config.geolocated_only);
    assert!( matches!( config.reference, ReferenceConfig::Files{..}));
}

#[test]
fn test_defaults () {
    let config = parse_config( r#"AirtrackConfig( snapshot_url: "http://example.com/aircrafts" )"#).unwrap();

    assert_eq!( config.poll_interval, DEFAULT_POLL_INTERVAL);
    assert_eq!( config.drop_after, DEFAULT_DROP_AFTER);
    assert_eq!( config.initial_zoom, INITIAL_ZOOM_LEVEL);
    assert_eq!( config.visibility_thresholds.len(), 9);
    assert_eq!( config.max_path_points, None);
    assert!( !config.geolocated_only);
    assert!( matches!( config.reference, ReferenceConfig::Disabled));
}

#[test]
fn test_http_reference () {
    let config = parse_config( r#"AirtrackConfig(
        snapshot_url: "http://example.com/aircrafts",
        reference: Http( base_url: "http://example.com" ),
        drop_after: "90s",
        max_path_points: Some(500),
    )"#).unwrap();

    assert_eq!( config.drop_after, Duration::from_secs(90));
    assert_eq!( config.max_path_points, Some(500));
    match config.reference {
        ReferenceConfig::Http{ base_url } => assert_eq!( base_url, "http://example.com"),
        other => panic!("wrong reference config: {other:?}")
    }
}

#[test]
fn test_bad_duration () {
    let res = parse_config( r#"AirtrackConfig( snapshot_url: "x", drop_after: "forever" )"#);
    assert!( res.is_err());
}
