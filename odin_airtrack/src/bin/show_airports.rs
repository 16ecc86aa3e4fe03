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

use clap::Parser;
use lazy_static::lazy_static;
use anyhow::Result;

use odin_airtrack::{
    INITIAL_ZOOM_LEVEL,
    declutter::{Overlay,ThresholdTable},
    frequency::FrequencyIndex,
    reference::{read_airports_file,read_routes_file},
    render::RecordingSurface
};

#[derive(Parser)]
#[command(about = "list the airports that are visible at a given zoom level")]
struct CliOpts {
    /// airports CSV file (openflights.org format)
    airports: String,

    /// routes CSV file (openflights.org format)
    routes: String,

    /// zoom level
    #[arg(long, default_value_t = INITIAL_ZOOM_LEVEL)]
    zoom: u8,
}

lazy_static! { static ref ARGS: CliOpts = CliOpts::parse(); }

fn main()->Result<()> {
    tracing_subscriber::fmt().init();

    let routes = read_routes_file( &ARGS.routes)?;
    let airports = read_airports_file( &ARGS.airports)?;
    let sizes = FrequencyIndex::from_routes( &routes);

    let mut surface = RecordingSurface::new();
    let mut overlay = Overlay::new( ThresholdTable::default(), ARGS.zoom);
    overlay.plot( &mut surface, &airports, &sizes);

    let mut visible: Vec<_> = overlay.markers().iter().filter(|m| m.visible).collect();
    visible.sort_by( |a,b| b.count.cmp(&a.count));

    for m in &visible {
        println!("{:5} {:4} {}", m.count, m.airport.iata.as_deref().unwrap_or("-"), m.airport.name);
    }
    println!("--- {} of {} airports visible at zoom level {} (threshold: {:?})",
        visible.len(), overlay.len(), ARGS.zoom, overlay.table().threshold( ARGS.zoom));

    Ok(())
}
