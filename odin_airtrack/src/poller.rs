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

use std::{sync::Arc, time::Duration};
use async_trait::async_trait;
use tokio::{sync::mpsc, task::JoinSet, time::{self,MissedTickBehavior}};
use tracing::{debug,info,warn};

use crate::{
    datetime::EpochMillis,
    errors::{Result,op_failed},
    record::{EntityRecord,parse_batch},
    render::{MarkerHandle,RenderSurface},
    tracker::Tracker
};

/// a snapshot batch: the records that parsed and the errors of the ones that did not
pub type SnapshotBatch = Vec<Result<EntityRecord>>;

/// where we get snapshot batches from
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch (&self)->Result<SnapshotBatch>;
}

/// polls a JSON endpoint that returns an array of entity update records
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    pub fn new (url: impl Into<String>, timeout: Duration)->Result<Self> {
        let client = reqwest::Client::builder().timeout( timeout).build()?;
        Ok( HttpSnapshotSource{ client, url: url.into() })
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch (&self)->Result<SnapshotBatch> {
        let response = self.client.get( &self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err( op_failed!("snapshot request to {} returned {}", self.url, status))
        }
        let bytes = response.bytes().await?;
        parse_batch( &bytes)
    }
}

/// the external events that drive the tracker (besides the poll timer)
#[derive(Debug,Clone,PartialEq)]
pub enum TrackerMsg {
    ZoomChanged(u8),
    MarkerClicked(MarkerHandle),
    Terminate
}

/// the tracker event loop. This is the only place that mutates the tracker once it runs.
/// Fetches run as separate tasks that we join in the loop. While a fetch
/// is outstanding we skip further poll ticks so that cycles never interleave. A failed fetch just
/// skips the cycle - the tracker state then ages until the next successful one.
/// Returns the tracker once we get a `Terminate` message or all message senders are dropped
pub async fn run_tracker<S,Src> (mut tracker: Tracker<S>, source: Arc<Src>, poll_interval: Duration, mut rx: mpsc::Receiver<TrackerMsg>)->Tracker<S>
    where S: RenderSurface, Src: SnapshotSource + ?Sized + 'static
{
    let mut interval = time::interval( poll_interval);
    interval.set_missed_tick_behavior( MissedTickBehavior::Skip);

    // holds at most one fetch task. A task that panics shows up as a JoinError and is treated
    // like a failed fetch
    let mut fetches: JoinSet<Result<SnapshotBatch>> = JoinSet::new();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if !fetches.is_empty() {
                    debug!("previous snapshot request still pending, skipping poll");
                } else {
                    let source = source.clone();
                    fetches.spawn( async move { source.fetch().await });
                }
            }

            Some(res) = fetches.join_next() => {
                match res {
                    Ok(Ok(batch)) => {
                        let stats = tracker.update( batch, EpochMillis::now());
                        info!("{stats}");
                    }
                    Ok(Err(e)) => warn!("snapshot fetch failed: {e}"),
                    Err(e) => warn!("snapshot fetch task failed: {e}")
                }
            }

            msg = rx.recv() => {
                match msg {
                    Some(TrackerMsg::ZoomChanged(zoom)) => { tracker.on_zoom_changed( zoom); }
                    Some(TrackerMsg::MarkerClicked(marker)) => {
                        let target = tracker.on_marker_click( marker);
                        debug!("click on {marker}: {target:?}");
                    }
                    Some(TrackerMsg::Terminate) | None => break
                }
            }
        }
    }

    info!("tracker terminated with {} live entities", tracker.store().len());
    tracker
}
