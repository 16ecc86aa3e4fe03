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

use std::{fmt, time::Duration};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize,Serializer,Deserializer};
use parse_duration::parse;

/// milliseconds since the unix epoch. This is the time base of snapshot records (`seen`)
/// and hence also of the staleness computation
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn now ()->Self { EpochMillis( Utc::now().timestamp_millis()) }

    pub fn new (millis: i64)->Self { EpochMillis(millis) }

    pub fn millis (&self)->i64 { self.0 }

    /// the point in time `dur` before self (saturating, we never go below i64::MIN)
    pub fn minus (&self, dur: Duration)->Self {
        let millis = i64::try_from( dur.as_millis()).unwrap_or( i64::MAX);
        EpochMillis( self.0.saturating_sub( millis))
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0)
        }
    }
}

impl From<DateTime<Utc>> for EpochMillis {
    fn from (date: DateTime<Utc>)->Self { EpochMillis( date.timestamp_millis()) }
}

#[inline] pub const fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub const fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }

//--- serde support for human readable durations in configs ("2s", "2min")

pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error> where D: Deserializer<'a> {
    let s = String::deserialize(deserializer)?;
    parse( s.as_str()).map_err( |e| serde::de::Error::custom( format!("{:?}", e)))
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_str( &format!("{}ms", dur.as_millis()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minus () {
        let t = EpochMillis::new(121_500);
        assert_eq!( t.minus( minutes(2)), EpochMillis::new(1_500));
        assert_eq!( EpochMillis::new(i64::MIN).minus( secs(1)), EpochMillis::new(i64::MIN));

        // durations beyond i64 millis must not wrap into the future
        let t = EpochMillis::new(1_700_000_000_000);
        assert!( t.minus( Duration::MAX) < t);
        assert!( t.minus( Duration::from_millis( u64::MAX)) < t);
    }

    #[test]
    fn test_display () {
        assert_eq!( EpochMillis::new(1_500).to_string(), "1970-01-01T00:00:01.500Z");
    }
}
