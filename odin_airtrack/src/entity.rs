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

use std::fmt;
use uom::si::{f64::Velocity, velocity::knot};

use crate::{
    datetime::EpochMillis,
    path::TrackPath,
    record::{Altitude,EntityRecord,Position},
    render::{MarkerHandle,MarkerStyle,PolylineHandle}
};

/// the data model for a tracked aircraft
#[derive(Debug)]
pub struct Entity {
    pub id: String,
    pub last_seen: EpochMillis,

    pub position: Option<Position>, // None until we get the first geolocated record
    pub altitude: Option<Altitude>,
    pub heading: Option<f64>,
    pub ground_speed: Option<f64>, // knots
    pub label: Option<String>, // callsign

    pub path: TrackPath,

    pub marker: Option<MarkerHandle>, // created on the first update with a position
    pub path_line: PolylineHandle,    // created with the entity, hidden unless selected
}

impl Entity {
    pub fn new (id: String, last_seen: EpochMillis, path_line: PolylineHandle, max_path_points: Option<usize>)->Self {
        Entity {
            id,
            last_seen,
            position: None,
            altitude: None,
            heading: None,
            ground_speed: None,
            label: None,
            path: TrackPath::new( max_path_points),
            marker: None,
            path_line
        }
    }

    /// overwrite our telemetry with the record and append its position (if any) to the path.
    /// The last known position survives telemetry-only records, and `last_seen` never goes back
    pub fn apply (&mut self, rec: &EntityRecord) {
        if rec.seen > self.last_seen { self.last_seen = rec.seen; }

        self.altitude = rec.altitude;
        self.heading = rec.heading;
        self.ground_speed = rec.ground_speed;
        self.label = rec.label.clone();

        if let Some(pos) = rec.position {
            self.position = Some(pos);
            self.path.push(pos);
        }
    }

    pub fn velocity (&self)->Option<Velocity> { self.ground_speed.map( Velocity::new::<knot>) }

    pub fn marker_style (&self, highlighted: bool)->MarkerStyle {
        MarkerStyle::Aircraft { heading: self.heading, highlighted }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Entity( id: {}", self.id)?;
        if let Some(cs) = &self.label { write!( f, ", cs: \"{cs}\"")?; }
        if let Some(p) = &self.position { write!( f, ", pos: {p}")?; }
        if !self.path.is_empty() { write!( f, ", n_pos: {}", self.path.len())?; }
        if let Some(alt) = &self.altitude { write!( f, ", alt: {alt}")?; }
        if let Some(hdg) = self.heading { write!( f, ", hdg: {hdg:.0}")?; }
        if let Some(spd) = self.velocity() { write!( f, ", spd: {:.0}kn", spd.get::<knot>())?; }
        write!( f, ", seen: {})", self.last_seen)
    }
}
