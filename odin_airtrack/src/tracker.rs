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
use tracing::{debug,info};

use crate::{
    config::AirtrackConfig,
    datetime::EpochMillis,
    declutter::{Overlay,ThresholdTable},
    detail::LocationDetails,
    errors::Result,
    frequency::FrequencyIndex,
    prune::prune_stale,
    reconcile::{ReconcileStats,reconcile},
    record::EntityRecord,
    reference::{AirlineIndex,ReferenceData},
    render::{MarkerHandle,RenderSurface},
    selection,
    store::TrackStore
};

/// what a marker click hit
#[derive(Debug,Clone,PartialEq)]
pub enum ClickTarget {
    Entity(String),
    Airport(String),
    Nothing
}

/// result of one poll cycle (reconcile followed by prune)
#[derive(Debug,Default,Clone,PartialEq)]
pub struct CycleStats {
    pub reconciled: ReconcileStats,
    pub n_filtered: usize, // records without position if we only track geolocated entities
    pub dropped: Vec<String>,
    pub n_live: usize,
}

impl fmt::Display for CycleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}, filtered: {}, dropped: {}, live: {}", self.reconciled, self.n_filtered, self.dropped.len(), self.n_live)
    }
}

/// the owner of all tracking state and of the surface we render on. All events (new snapshot
/// batches, zoom changes and marker clicks) go through here
pub struct Tracker<S> where S: RenderSurface {
    store: TrackStore,
    surface: S,
    airlines: AirlineIndex,
    overlay: Overlay,

    drop_after: Duration,
    max_path_points: Option<usize>,
    geolocated_only: bool,
}

impl<S> Tracker<S> where S: RenderSurface {
    pub fn new (config: &AirtrackConfig, surface: S)->Self {
        Tracker {
            store: TrackStore::new(),
            surface,
            airlines: AirlineIndex::default(),
            overlay: Overlay::new( ThresholdTable::new( config.visibility_thresholds.clone()), config.initial_zoom),
            drop_after: config.drop_after,
            max_path_points: config.max_path_points,
            geolocated_only: config.geolocated_only,
        }
    }

    /// set up airline lookup and airport overlay. The airport sizes are computed from the routes
    /// before we plot the airports
    pub fn set_reference_data (&mut self, data: ReferenceData) {
        let sizes = FrequencyIndex::from_routes( &data.routes);
        let n_plotted = self.overlay.plot( &mut self.surface, &data.airports, &sizes);
        self.airlines = AirlineIndex::new( data.airlines);

        info!("reference data: {} routes, {} airports plotted, {} airlines", data.routes.len(), n_plotted, self.airlines.len());
    }

    pub fn store (&self)->&TrackStore { &self.store }
    pub fn surface (&self)->&S { &self.surface }
    pub fn overlay (&self)->&Overlay { &self.overlay }
    pub fn airlines (&self)->&AirlineIndex { &self.airlines }
    pub fn drop_after (&self)->Duration { self.drop_after }

    pub fn reconcile<I> (&mut self, records: I)->ReconcileStats where I: IntoIterator<Item=Result<EntityRecord>> {
        reconcile( &mut self.store, &mut self.surface, &self.airlines, self.max_path_points, records)
    }

    pub fn prune (&mut self, now: EpochMillis)->Vec<String> {
        prune_stale( &mut self.store, &mut self.surface, now, self.drop_after)
    }

    /// one complete poll cycle: reconcile the batch, then drop what has become stale at `now`
    pub fn update<I> (&mut self, records: I, now: EpochMillis)->CycleStats where I: IntoIterator<Item=Result<EntityRecord>> {
        let mut n_filtered = 0;
        let geolocated_only = self.geolocated_only;

        let records = records.into_iter().filter( |res| {
            let keep = !geolocated_only || res.as_ref().map_or( true, |rec| rec.is_geolocated());
            if !keep { n_filtered += 1; }
            keep
        });

        let reconciled = self.reconcile( records);
        let dropped = self.prune( now);
        let stats = CycleStats { reconciled, n_filtered, dropped, n_live: self.store.len() };
        debug!("update cycle: {stats}");
        stats
    }

    pub fn select (&mut self, id: &str)->bool {
        selection::select( &mut self.store, &mut self.surface, &self.airlines, id)
    }

    pub fn selected (&self)->Option<&str> { self.store.selected() }

    /// entity markers change the selection, airport markers open their info window
    pub fn on_marker_click (&mut self, marker: MarkerHandle)->ClickTarget {
        if let Some(id) = selection::select_marker( &mut self.store, &mut self.surface, &self.airlines, marker) {
            ClickTarget::Entity(id)

        } else if let Some(m) = self.overlay.get(marker) {
            let details = LocationDetails::new( &m.airport);
            self.surface.show_info_window( marker, &details);
            ClickTarget::Airport( m.airport.name.clone())

        } else {
            ClickTarget::Nothing
        }
    }

    /// recompute airport visibility. Returns the number of visible airports
    pub fn on_zoom_changed (&mut self, zoom: u8)->usize {
        self.overlay.set_zoom( &mut self.surface, zoom)
    }

    pub fn zoom (&self)->u8 { self.overlay.zoom() }
}
