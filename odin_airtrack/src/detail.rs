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

use crate::{entity::Entity, reference::{AirlineIndex,Airport}};

pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "n/a";

const EXTERNAL_TRACK_URL: &str = "https://www.flightradar24.com";

/// content of the detail panel for the selected aircraft. All values are display ready,
/// whatever we don't know is shown as [`UNKNOWN`]
#[derive(Debug,Clone,PartialEq)]
pub struct EntityDetails {
    pub id: String,
    pub airline: String,
    pub callsign: String,
    pub altitude: String,
    pub ground_speed: String,
    pub track: String,
    pub link: Option<String>,
}

impl EntityDetails {
    pub fn new (entity: &Entity, airlines: &AirlineIndex)->Self {
        let airline = entity.label.as_deref()
            .and_then( |cs| airlines.lookup_label(cs))
            .map( |a| a.name.clone())
            .unwrap_or_else( || UNKNOWN.to_string());

        let altitude = match &entity.altitude {
            Some(alt) if alt.value.is_finite() => alt.to_string(),
            _ => UNKNOWN.to_string()
        };

        let ground_speed = match entity.ground_speed {
            Some(spd) if spd.is_finite() => format!("{} kts", spd),
            _ => UNKNOWN.to_string()
        };

        let track = match entity.heading {
            Some(hdg) if hdg.is_finite() => format!("{}°", hdg),
            _ => UNKNOWN.to_string()
        };

        EntityDetails {
            id: entity.id.clone(),
            airline,
            callsign: entity.label.clone().unwrap_or_else( || UNKNOWN.to_string()),
            altitude,
            ground_speed,
            track,
            link: entity.label.as_ref().map( |cs| format!("{}/{}", EXTERNAL_TRACK_URL, cs)),
        }
    }

    pub fn to_html (&self)->String {
        let mut html = format!(
r#"<dl>
  <dt>Airline</dt><dd>{}</dd>
  <dt>Call sign</dt><dd>{}</dd>
  <dt>Altitude</dt><dd>{}</dd>
  <dt>Ground speed</dt><dd>{}</dd>
  <dt>Track</dt><dd>{}</dd>
</dl>
"#, self.airline, self.callsign, self.altitude, self.ground_speed, self.track);

        if let Some(link) = &self.link {
            // noreferrer - some tracking sites refuse requests with our referrer
            html.push_str( &format!(r#"<a href="{}" class="external" target="_blank" rel="noreferrer">{}</a>"#, link, link));
            html.push('\n');
        }
        html
    }
}

impl fmt::Display for EntityDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!( f, "  airline:      {}", self.airline)?;
        writeln!( f, "  call sign:    {}", self.callsign)?;
        writeln!( f, "  altitude:     {}", self.altitude)?;
        writeln!( f, "  ground speed: {}", self.ground_speed)?;
        write!( f, "  track:        {}", self.track)
    }
}

/// the info window content for an airport marker
#[derive(Debug,Clone,PartialEq)]
pub struct LocationDetails {
    pub name: String,
    pub iata: String,
    pub icao: String,
    pub altitude: String,
}

impl LocationDetails {
    pub fn new (airport: &Airport)->Self {
        LocationDetails {
            name: airport.name.clone(),
            iata: airport.iata.clone().unwrap_or_else( || NOT_AVAILABLE.to_string()),
            icao: airport.icao.clone().unwrap_or_else( || NOT_AVAILABLE.to_string()),
            altitude: airport.altitude.map( |alt| format!("{} ft", alt)).unwrap_or_else( || NOT_AVAILABLE.to_string()),
        }
    }
}

impl fmt::Display for LocationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!( f, "  {}", self.name)?;
        writeln!( f, "  IATA:     {}", self.iata)?;
        writeln!( f, "  ICAO:     {}", self.icao)?;
        write!( f, "  Altitude: {}", self.altitude)
    }
}
