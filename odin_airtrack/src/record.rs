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
use serde::{Serialize,Deserialize};
use serde_json::Value;
use uom::si::{f64::{Length,Velocity}, length::{foot,meter}, velocity::knot};

use crate::{datetime::EpochMillis, errors::{OdinAirtrackError,Result,malformed}};

/// geographic position in decimal degrees
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct Position { pub lat: f64, pub lng: f64 }

impl Position {
    pub fn new (lat: f64, lng: f64)->Self { Position{lat,lng} }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "({:.5},{:.5})", self.lat, self.lng)
    }
}

/// the two altitude units a receiver reports. The wire flag is 0 for feet, everything else is meters
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
pub enum AltitudeUnit { Feet, Meters }

impl AltitudeUnit {
    pub fn from_flag (flag: Option<u8>)->Self {
        match flag {
            Some(0) => AltitudeUnit::Feet,
            _ => AltitudeUnit::Meters
        }
    }

    pub fn suffix (&self)->&'static str {
        match self {
            AltitudeUnit::Feet => "ft",
            AltitudeUnit::Meters => "m"
        }
    }
}

/// altitude as reported, i.e. value plus the unit it was reported in
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Altitude { pub value: f64, pub unit: AltitudeUnit }

impl Altitude {
    pub fn length (&self)->Length {
        match self.unit {
            AltitudeUnit::Feet => Length::new::<foot>( self.value),
            AltitudeUnit::Meters => Length::new::<meter>( self.value)
        }
    }
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} {}", self.value, self.unit.suffix())
    }
}

/// the record as it comes over the wire. Every field is optional here, checks happen in
/// [`EntityRecord::try_from`]. We accept both our own field names and the ones used by the
/// reference receiver server (`icao`, `seen`, `unit`, `callsign`)
#[derive(Serialize,Deserialize,Debug,Clone,Default)]
#[serde(rename_all="camelCase")]
pub struct EntityUpdate {
    #[serde(alias="icao")]
    pub id: Option<String>,

    #[serde(alias="seen")]
    pub seen_at: Option<f64>,

    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub altitude: Option<f64>,

    #[serde(alias="unit")]
    pub altitude_unit: Option<u8>,

    pub heading: Option<f64>,

    #[serde(alias="groundSpeed")]
    pub speed: Option<f64>,

    #[serde(alias="callsign")]
    pub label: Option<String>,

    pub count: Option<u64>, // number of messages received for this id, informational
}

/// a validated entity update
#[derive(Debug,Clone,PartialEq)]
pub struct EntityRecord {
    pub id: String,
    pub seen: EpochMillis,
    pub position: Option<Position>,
    pub altitude: Option<Altitude>,
    pub heading: Option<f64>, // degrees
    pub ground_speed: Option<f64>, // knots, as reported
    pub label: Option<String>,
}

impl EntityRecord {
    /// convenience ctor for records that only carry a position
    pub fn with_position (id: impl Into<String>, seen: EpochMillis, lat: f64, lng: f64)->Self {
        EntityRecord {
            id: id.into(),
            seen,
            position: Some( Position::new(lat,lng)),
            altitude: None,
            heading: None,
            ground_speed: None,
            label: None
        }
    }

    pub fn from_json (value: Value)->Result<Self> {
        let update: EntityUpdate = serde_json::from_value(value).map_err(|e| malformed!("{}", e))?;
        EntityRecord::try_from( update)
    }

    pub fn is_geolocated (&self)->bool { self.position.is_some() }

    pub fn velocity (&self)->Option<Velocity> { self.ground_speed.map( Velocity::new::<knot>) }
}

impl TryFrom<EntityUpdate> for EntityRecord {
    type Error = OdinAirtrackError;

    fn try_from (u: EntityUpdate)->Result<Self> {
        let id = match u.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err( malformed!("missing id"))
        };

        let seen = match u.seen_at {
            Some(t) if t.is_finite() && t >= 0.0 => EpochMillis::new( t as i64),
            Some(t) => return Err( malformed!("invalid timestamp {} for {}", t, id)),
            None => return Err( malformed!("missing timestamp for {}", id))
        };

        let position = match (u.lat, u.lng) {
            (Some(lat), Some(lng)) => {
                if !(lat.is_finite() && (-90.0..=90.0).contains(&lat)) {
                    return Err( malformed!("latitude out of range {} for {}", lat, id))
                }
                if !(lng.is_finite() && (-180.0..=180.0).contains(&lng)) {
                    return Err( malformed!("longitude out of range {} for {}", lng, id))
                }
                Some( Position::new(lat,lng))
            }
            (None, None) => None, // telemetry-only record
            _ => return Err( malformed!("incomplete position for {}", id))
        };

        let altitude = finite(u.altitude).map( |value| Altitude{ value, unit: AltitudeUnit::from_flag(u.altitude_unit) });
        let heading = finite(u.heading);
        let ground_speed = finite(u.speed);
        let label = u.label.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

        Ok( EntityRecord{ id, seen, position, altitude, heading, ground_speed, label })
    }
}

impl fmt::Display for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "EntityRecord( id: {}, seen: {}", self.id, self.seen.millis())?;
        if let Some(p) = &self.position { write!( f, ", pos: {}", p)?; }
        if let Some(alt) = &self.altitude { write!( f, ", alt: {}", alt)?; }
        if let Some(hdg) = self.heading { write!( f, ", hdg: {:.0}", hdg)?; }
        if let Some(spd) = self.ground_speed { write!( f, ", spd: {:.0}", spd)?; }
        if let Some(cs) = &self.label { write!( f, ", cs: \"{}\"", cs)?; }
        write!( f, ")")
    }
}

fn finite (v: Option<f64>)->Option<f64> {
    v.filter( |x| x.is_finite())
}

/// parse a snapshot batch (a JSON array of records). A top level parse error fails the whole batch,
/// errors of individual records are returned in place so that the caller can skip them
pub fn parse_batch (bytes: &[u8])->Result<Vec<Result<EntityRecord>>> {
    let values: Vec<Value> = serde_json::from_slice(bytes)?;
    Ok( values.into_iter().map( EntityRecord::from_json).collect())
}
