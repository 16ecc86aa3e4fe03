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

//! live aircraft tracking on a map: snapshot batches of aircraft telemetry are reconciled into a
//! store of tracked aircraft, aircraft that stop reporting are dropped, traces are accumulated
//! and shown for the selected aircraft, and airport markers are decluttered by zoom level.
//!
//! The map itself is abstracted as a [`render::RenderSurface`]. Everything is driven from a single
//! [`tracker::Tracker`] owner, either directly or through the [`poller::run_tracker`] event loop

use std::time::Duration;

pub mod errors;
pub mod datetime;
pub mod config;
pub mod record;
pub mod path;
pub mod entity;
pub mod store;
pub mod render;
pub mod detail;
pub mod reference;
pub mod frequency;
pub mod declutter;
pub mod reconcile;
pub mod prune;
pub mod selection;
pub mod tracker;
pub mod poller;

pub use config::{AirtrackConfig,ReferenceConfig,load_config};
pub use errors::{OdinAirtrackError,Result};
pub use tracker::{Tracker,ClickTarget,CycleStats};

/// aircraft we have not seen for this long are dropped
pub const DEFAULT_DROP_AFTER: Duration = datetime::minutes(2);

/// how often we poll for new snapshots
pub const DEFAULT_POLL_INTERVAL: Duration = datetime::secs(2);

pub const INITIAL_ZOOM_LEVEL: u8 = 9;

/// minimum number of routes an airport needs to be shown, indexed by zoom level.
/// Level 0 and everything above 8 shows all airports
pub const DEFAULT_VISIBILITY_THRESHOLDS: [Option<u32>; 9] = [
    None,
    Some(200),
    Some(150),
    Some(120),
    Some(100),
    Some(80),
    Some(60),
    Some(40),
    Some(20),
];
