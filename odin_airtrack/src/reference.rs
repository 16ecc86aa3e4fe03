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

//! static reference data: airports, routes and airlines.
//! These come either as the (headerless) openflights.org CSV files or as JSON arrays from a server

use std::{collections::HashMap, fs::File, io, path::Path, str::FromStr};
use serde::{Serialize,Deserialize};
use csv::{ReaderBuilder,StringRecord};
use tracing::{debug,warn};

use crate::{
    config::ReferenceConfig,
    errors::{Result,malformed},
    record::Position
};

/// the null marker used in the CSV files
const NULL_FIELD: &str = "\\N";

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Airport {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(rename="IATA")] pub iata: Option<String>,
    #[serde(rename="ICAO")] pub icao: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub altitude: Option<i64>, // ft
    #[serde(rename="utcOffset", default)] pub utc_offset: Option<f64>,
    #[serde(default)] pub tz: Option<String>,
}

impl Airport {
    pub fn position (&self)->Option<Position> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some( Position::new(lat,lng)),
            _ => None
        }
    }

    /// the key under which routes refer to this airport
    pub fn key (&self)->Option<&str> { self.iata.as_deref() }
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(rename_all="camelCase")]
pub struct Route {
    pub airline: Option<String>,
    pub airline_id: Option<i64>,
    #[serde(alias="sourceKey")] pub source: Option<String>,
    pub source_id: Option<i64>,
    #[serde(alias="destKey")] pub dest: Option<String>,
    pub dest_id: Option<i64>,
    #[serde(default)] pub codeshare: bool,
    pub stops: Option<u32>,
    pub equipment: Option<String>,
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Airline {
    pub id: i64,
    pub name: String,
    pub alias: Option<String>,
    #[serde(rename="IATA")] pub iata: Option<String>,
    #[serde(rename="ICAO")] pub icao: Option<String>,
    pub callsign: Option<String>,
    pub country: Option<String>,
    pub active: bool,
}

/// airlines keyed by their ICAO code, which is what the first three characters of a flight callsign are
#[derive(Debug,Default)]
pub struct AirlineIndex {
    airlines: HashMap<String,Airline>
}

impl AirlineIndex {
    pub fn new<I> (airlines: I)->Self where I: IntoIterator<Item=Airline> {
        let mut map = HashMap::new();
        for airline in airlines {
            if let Some(icao) = airline.icao.clone() {
                map.insert( icao, airline);
            }
        }
        AirlineIndex { airlines: map }
    }

    pub fn len (&self)->usize { self.airlines.len() }
    pub fn is_empty (&self)->bool { self.airlines.is_empty() }

    pub fn get (&self, icao: &str)->Option<&Airline> { self.airlines.get(icao) }

    /// look up the operating airline from a callsign such as "SWR8ZK"
    pub fn lookup_label (&self, label: &str)->Option<&Airline> {
        let prefix: String = label.chars().take(3).collect();
        if prefix.is_empty() { None } else { self.airlines.get( prefix.as_str()) }
    }
}

/// everything we load once at startup
#[derive(Debug,Default)]
pub struct ReferenceData {
    pub airports: Vec<Airport>,
    pub routes: Vec<Route>,
    pub airlines: Vec<Airline>,
}

//--- CSV parsing

fn field<'a> (rec: &'a StringRecord, idx: usize)->Option<&'a str> {
    match rec.get(idx) {
        Some(s) if !s.is_empty() && s != NULL_FIELD => Some(s),
        _ => None
    }
}

fn string_field (rec: &StringRecord, idx: usize)->Option<String> {
    field(rec,idx).map(str::to_string)
}

fn num_field<T: FromStr> (rec: &StringRecord, idx: usize, name: &str)->Result<Option<T>> {
    match field(rec,idx) {
        Some(s) => s.trim().parse::<T>().map(Some).map_err(|_| malformed!("invalid {} '{}'", name, s)),
        None => Ok(None)
    }
}

fn required<T> (v: Option<T>, name: &str)->Result<T> {
    v.ok_or_else(|| malformed!("missing {}", name))
}

fn airport_from_csv (rec: &StringRecord)->Result<Airport> {
    // id,name,city,country,IATA,ICAO,lat,lng,altitude,utcOffset,DST,tz,type,source
    Ok( Airport {
        id: required( num_field(rec, 0, "id")?, "id")?,
        name: required( string_field(rec, 1), "name")?,
        city: string_field(rec, 2),
        country: string_field(rec, 3),
        iata: string_field(rec, 4),
        icao: string_field(rec, 5),
        lat: num_field(rec, 6, "lat")?,
        lng: num_field(rec, 7, "lng")?,
        altitude: num_field(rec, 8, "altitude")?,
        utc_offset: num_field(rec, 9, "utcOffset")?,
        tz: string_field(rec, 11),
    })
}

fn route_from_csv (rec: &StringRecord)->Result<Route> {
    // airline,airlineId,source,sourceId,dest,destId,codeshare,stops,equipment
    Ok( Route {
        airline: string_field(rec, 0),
        airline_id: num_field(rec, 1, "airlineId")?,
        source: string_field(rec, 2),
        source_id: num_field(rec, 3, "sourceId")?,
        dest: string_field(rec, 4),
        dest_id: num_field(rec, 5, "destId")?,
        codeshare: field(rec, 6) == Some("Y"),
        stops: num_field(rec, 7, "stops")?,
        equipment: string_field(rec, 8),
    })
}

fn airline_from_csv (rec: &StringRecord)->Result<Airline> {
    // id,name,alias,IATA,ICAO,callsign,country,active
    Ok( Airline {
        id: required( num_field(rec, 0, "id")?, "id")?,
        name: required( string_field(rec, 1), "name")?,
        alias: string_field(rec, 2),
        iata: string_field(rec, 3),
        icao: string_field(rec, 4),
        callsign: string_field(rec, 5),
        country: string_field(rec, 6),
        active: field(rec, 7) == Some("Y"),
    })
}

/// read all rows of a headerless CSV source. Rows that cannot be converted are skipped, I/O and
/// CSV syntax errors fail the whole read
fn read_csv<R,T,F> (rdr: R, what: &str, convert: F)->Result<Vec<T>>
    where R: io::Read, F: Fn(&StringRecord)->Result<T>
{
    let mut csv = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(rdr);
    let mut list = Vec::new();
    let mut n_skipped = 0;

    for res in csv.records() {
        let rec = res?;
        match convert(&rec) {
            Ok(t) => list.push(t),
            Err(e) => {
                n_skipped += 1;
                warn!("skipping {what} row {:?}: {e}", rec.position().map(|p| p.line()));
            }
        }
    }
    debug!("read {} {what} records ({n_skipped} skipped)", list.len());
    Ok(list)
}

pub fn read_airports<R: io::Read> (rdr: R)->Result<Vec<Airport>> {
    read_csv( rdr, "airport", airport_from_csv)
}

pub fn read_routes<R: io::Read> (rdr: R)->Result<Vec<Route>> {
    read_csv( rdr, "route", route_from_csv)
}

/// defunct airlines are not flying, we only keep the active ones
pub fn read_airlines<R: io::Read> (rdr: R)->Result<Vec<Airline>> {
    let airlines = read_csv( rdr, "airline", airline_from_csv)?;
    Ok( airlines.into_iter().filter(|a| a.active).collect())
}

pub fn read_airports_file<P: AsRef<Path>> (path: P)->Result<Vec<Airport>> { read_airports( File::open(path)?) }
pub fn read_routes_file<P: AsRef<Path>> (path: P)->Result<Vec<Route>> { read_routes( File::open(path)?) }
pub fn read_airlines_file<P: AsRef<Path>> (path: P)->Result<Vec<Airline>> { read_airlines( File::open(path)?) }

//--- loading per config

async fn get_json<T> (client: &reqwest::Client, base_url: &str, what: &str)->Result<T> where T: for<'a> Deserialize<'a> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), what);
    let response = client.get( &url).send().await?.error_for_status()?;
    Ok( response.json::<T>().await? )
}

/// load the reference datasets. Routes are loaded before airports since we need them to
/// compute airport sizes before we can plot airports
pub async fn load_reference_data (config: &ReferenceConfig)->Result<ReferenceData> {
    match config {
        ReferenceConfig::Files { airports, routes, airlines } => {
            let routes = read_routes_file( routes)?;
            let airports = read_airports_file( airports)?;
            let airlines = read_airlines_file( airlines)?;
            Ok( ReferenceData{ airports, routes, airlines })
        }
        ReferenceConfig::Http { base_url } => {
            let client = reqwest::Client::new();
            let routes: Vec<Route> = get_json( &client, base_url, "routes").await?;
            let airports: Vec<Airport> = get_json( &client, base_url, "airports").await?;
            let airlines: Vec<Airline> = get_json( &client, base_url, "airlines").await?;
            let airlines = airlines.into_iter().filter(|a| a.active).collect();
            Ok( ReferenceData{ airports, routes, airlines })
        }
        ReferenceConfig::Disabled => Ok( ReferenceData::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields () {
        let data = "1,\"Goroka Airport\",\"Goroka\",\"Papua New Guinea\",\"GKA\",\"AYGA\",-6.081689834590001,145.391998291,5282,10,\"U\",\"Pacific/Port_Moresby\",\"airport\",\"OurAirports\"\n\
                    2,\"Nowhere\",\\N,\\N,\\N,\\N,\\N,\\N,\\N,\\N,\\N,\\N,\"airport\",\"OurAirports\"\n";
        let airports = read_airports( data.as_bytes()).unwrap();
        assert_eq!( airports.len(), 2);
        assert_eq!( airports[0].key(), Some("GKA"));
        assert_eq!( airports[0].altitude, Some(5282));
        assert!( airports[1].iata.is_none());
        assert!( airports[1].position().is_none());
    }

    #[test]
    fn test_bad_row_skipped () {
        let data = "2B,410,AER,2965,KZN,2990,,0,CR2\nXX,bogus,AER,2965,KZN,2990,,0,CR2\n";
        let routes = read_routes( data.as_bytes()).unwrap();
        assert_eq!( routes.len(), 1);
        assert_eq!( routes[0].source.as_deref(), Some("AER"));
        assert!( !routes[0].codeshare);
    }

    #[test]
    fn test_json_datasets () {
        // the JSON arrays served at /airports, /routes and /airlines
        let airports: Vec<Airport> = serde_json::from_str( r#"[
            {"id":3469,"name":"San Francisco International Airport","city":"San Francisco","country":"United States","IATA":"SFO","ICAO":"KSFO","lat":37.61899948120117,"lng":-122.375,"altitude":13,"utcOffset":-8,"DST":"A","tz":"America/Los_Angeles","type":"airport","source":"OurAirports"}
            ,{"id":8227,"name":"Nowhere Strip","city":null,"country":"United States","IATA":null,"ICAO":null,"lat":null,"lng":null,"altitude":null,"utcOffset":null,"DST":null,"tz":null,"type":"airport","source":"OurAirports"}
        ]"#).unwrap();
        assert_eq!( airports.len(), 2);
        assert_eq!( airports[0].key(), Some("SFO"));
        assert_eq!( airports[0].icao.as_deref(), Some("KSFO"));
        assert_eq!( airports[0].altitude, Some(13));
        assert_eq!( airports[0].utc_offset, Some(-8.0));
        assert!( airports[0].position().is_some());
        assert!( airports[1].key().is_none());
        assert!( airports[1].position().is_none());

        let routes: Vec<Route> = serde_json::from_str( r#"[
            {"airline":"UA","airlineId":5209,"source":"SFO","sourceId":3469,"dest":"LAX","destId":3484,"codeshare":false,"stops":0,"equipment":"320"}
            ,{"airline":"AA","airlineId":null,"source":"SFO","sourceId":null,"dest":"LAX","destId":3484,"codeshare":true,"stops":null,"equipment":"321"}
        ]"#).unwrap();
        assert_eq!( routes.len(), 2);
        assert_eq!( routes[0].airline_id, Some(5209));
        assert!( routes[1].airline_id.is_none());
        assert!( routes[1].codeshare);
        assert_eq!( routes[1].dest.as_deref(), Some("LAX"));

        let airlines: Vec<Airline> = serde_json::from_str( r#"[
            {"id":4559,"name":"Swiss International Air Lines","alias":null,"IATA":"LX","ICAO":"SWR","callsign":"SWISS","country":"Switzerland","active":true}
        ]"#).unwrap();
        let index = AirlineIndex::new( airlines);
        assert_eq!( index.get("SWR").map(|a| a.iata.as_deref()), Some(Some("LX")));
    }

    #[test]
    fn test_label_lookup () {
        let data = "4559,\"Swiss International Air Lines\",\\N,\"LX\",\"SWR\",\"SWISS\",\"Switzerland\",\"Y\"\n\
                    1,\"Defunct Air\",\\N,\"DA\",\"DFA\",\"DEFUNCT\",\"Nowhere\",\"N\"\n";
        let index = AirlineIndex::new( read_airlines( data.as_bytes()).unwrap());
        assert_eq!( index.len(), 1);
        assert_eq!( index.lookup_label("SWR8ZK").map(|a| a.name.as_str()), Some("Swiss International Air Lines"));
        assert!( index.lookup_label("DFA123").is_none());
        assert!( index.lookup_label("SW").is_none());
        assert!( index.lookup_label("").is_none());
    }
}
