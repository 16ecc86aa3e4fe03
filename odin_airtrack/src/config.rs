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

use std::{fs, path::{Path,PathBuf}, time::Duration};
use serde::{Serialize,Deserialize};

use crate::{
    DEFAULT_DROP_AFTER, DEFAULT_POLL_INTERVAL, DEFAULT_VISIBILITY_THRESHOLDS, INITIAL_ZOOM_LEVEL,
    datetime::{deserialize_duration, serialize_duration},
    errors::Result
};

/// where we get the static reference datasets (airports, routes and airlines) from
#[derive(Deserialize,Serialize,Debug,Clone)]
pub enum ReferenceConfig {
    /// headerless CSV files with `\N` as null marker
    Files { airports: PathBuf, routes: PathBuf, airlines: PathBuf },
    /// JSON arrays served at `<base_url>/airports`, `<base_url>/routes` and `<base_url>/airlines`
    Http { base_url: String },
    /// run without overlay and airline lookup
    Disabled
}

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct AirtrackConfig {
    pub snapshot_url: String, // where we poll aircraft snapshots from

    #[serde(default="default_reference")]
    pub reference: ReferenceConfig,

    #[serde(default="default_poll_interval", deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub poll_interval: Duration,

    #[serde(default="default_drop_after", deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub drop_after: Duration, // aircraft not seen within this duration are dropped

    #[serde(default="default_initial_zoom")]
    pub initial_zoom: u8,

    #[serde(default="default_visibility_thresholds")]
    pub visibility_thresholds: Vec<Option<u32>>, // indexed by zoom level

    #[serde(default)]
    pub max_path_points: Option<usize>, // None means we keep the whole trace

    #[serde(default)]
    pub geolocated_only: bool, // ignore records without position
}

impl AirtrackConfig {
    pub fn new (snapshot_url: impl Into<String>)->Self {
        AirtrackConfig {
            snapshot_url: snapshot_url.into(),
            reference: default_reference(),
            poll_interval: default_poll_interval(),
            drop_after: default_drop_after(),
            initial_zoom: default_initial_zoom(),
            visibility_thresholds: default_visibility_thresholds(),
            max_path_points: None,
            geolocated_only: false
        }
    }
}

fn default_reference()->ReferenceConfig { ReferenceConfig::Disabled }
fn default_poll_interval()->Duration { DEFAULT_POLL_INTERVAL }
fn default_drop_after()->Duration { DEFAULT_DROP_AFTER }
fn default_initial_zoom()->u8 { INITIAL_ZOOM_LEVEL }
fn default_visibility_thresholds()->Vec<Option<u32>> { DEFAULT_VISIBILITY_THRESHOLDS.to_vec() }

pub fn load_config<P: AsRef<Path>> (path: P)->Result<AirtrackConfig> {
    let contents = fs::read_to_string( path.as_ref())?;
    parse_config( &contents)
}

pub fn parse_config (contents: &str)->Result<AirtrackConfig> {
    Ok( ron::de::from_str( contents)? )
}
