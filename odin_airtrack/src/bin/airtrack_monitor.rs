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

use std::sync::Arc;
use clap::Parser;
use lazy_static::lazy_static;
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{Level,warn};

use odin_airtrack::{
    AirtrackConfig, Tracker, load_config,
    poller::{HttpSnapshotSource,TrackerMsg,run_tracker},
    reference::{ReferenceData,load_reference_data},
    render::LogSurface
};

#[derive(Parser)]
#[command(about = "headless live aircraft tracking monitor")]
struct CliOpts {
    /// pathname of the RON config file
    #[arg(long)]
    config: Option<String>,

    /// snapshot URL to poll (overrides config)
    #[arg(long)]
    url: Option<String>,

    /// zoom level for airport declutter
    #[arg(long)]
    zoom: Option<u8>,

    /// log every render operation
    #[arg(short, long)]
    verbose: bool,
}

lazy_static! { static ref ARGS: CliOpts = CliOpts::parse(); }

const DEFAULT_URL: &str = "http://localhost:3000/aircrafts";

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_max_level( if ARGS.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let mut config = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => AirtrackConfig::new( DEFAULT_URL)
    };
    if let Some(url) = &ARGS.url { config.snapshot_url = url.clone(); }

    // missing reference data only costs us the airport overlay and airline names
    let reference = load_reference_data( &config.reference).await.unwrap_or_else( |e| {
        warn!("failed to load reference data: {e}");
        ReferenceData::default()
    });

    let mut tracker = Tracker::new( &config, LogSurface::new());
    tracker.set_reference_data( reference);

    let source = Arc::new( HttpSnapshotSource::new( config.snapshot_url.clone(), config.poll_interval)?);
    let (tx, rx) = mpsc::channel::<TrackerMsg>(16);

    if let Some(zoom) = ARGS.zoom {
        tx.send( TrackerMsg::ZoomChanged(zoom)).await?;
    }

    let tx_term = tx.clone();
    tokio::spawn( async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx_term.send( TrackerMsg::Terminate).await;
        }
    });

    let tracker = run_tracker( tracker, source, config.poll_interval, rx).await;
    drop(tx);

    println!("--- {} live aircraft at termination:", tracker.store().len());
    for id in tracker.store().ids() {
        if let Some(entity) = tracker.store().get( &id) {
            println!("{entity}");
        }
    }
    if let Some(entity) = tracker.store().selected_entity() {
        println!("selected: {entity}");
    }
    println!("{} of {} airports visible at zoom level {}",
        tracker.overlay().visible_count(), tracker.overlay().len(), tracker.zoom());

    Ok(())
}
