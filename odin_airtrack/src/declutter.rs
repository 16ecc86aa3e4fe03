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

//! zoom dependent visibility of airport markers. The bigger the zoom level, the smaller the
//! airports we show. This is a simple per-zoom-level threshold on the number of routes, not a
//! spatial index

use std::collections::HashMap;
use tracing::debug;

use crate::{
    DEFAULT_VISIBILITY_THRESHOLDS,
    frequency::FrequencyIndex,
    reference::Airport,
    render::{MarkerHandle,MarkerStyle,RenderSurface}
};

/// minimum route count per zoom level (index). Levels without entry, with `None` or with 0 show
/// all markers
#[derive(Debug,Clone,PartialEq)]
pub struct ThresholdTable {
    thresholds: Vec<Option<u32>>
}

impl ThresholdTable {
    pub fn new (thresholds: Vec<Option<u32>>)->Self { ThresholdTable{thresholds} }

    pub fn threshold (&self, zoom: u8)->Option<u32> {
        self.thresholds.get( zoom as usize).copied().flatten()
    }

    /// note the count has to be strictly greater than the threshold
    pub fn is_visible (&self, zoom: u8, count: u32)->bool {
        match self.threshold(zoom) {
            None | Some(0) => true,
            Some(threshold) => count > threshold
        }
    }
}

impl Default for ThresholdTable {
    fn default()->Self { ThresholdTable::new( DEFAULT_VISIBILITY_THRESHOLDS.to_vec()) }
}

#[derive(Debug)]
pub struct OverlayMarker {
    pub airport: Airport,
    pub count: u32, // number of routes touching this airport
    pub marker: MarkerHandle,
    pub visible: bool,
}

/// the airport overlay
#[derive(Debug)]
pub struct Overlay {
    table: ThresholdTable,
    zoom: u8,
    markers: Vec<OverlayMarker>,
    by_handle: HashMap<MarkerHandle,usize>,
}

impl Overlay {
    pub fn new (table: ThresholdTable, zoom: u8)->Self {
        Overlay { table, zoom, markers: Vec::new(), by_handle: HashMap::new() }
    }

    pub fn zoom (&self)->u8 { self.zoom }
    pub fn table (&self)->&ThresholdTable { &self.table }

    pub fn len (&self)->usize { self.markers.len() }
    pub fn is_empty (&self)->bool { self.markers.is_empty() }

    pub fn markers (&self)->&[OverlayMarker] { self.markers.as_slice() }

    pub fn visible_count (&self)->usize { self.markers.iter().filter(|m| m.visible).count() }

    pub fn get (&self, marker: MarkerHandle)->Option<&OverlayMarker> {
        self.by_handle.get(&marker).map( |idx| &self.markers[*idx])
    }

    /// create markers for all airports that have a position, with the visibility of the current zoom level.
    /// Returns the number of markers created
    pub fn plot<S> (&mut self, surface: &mut S, airports: &[Airport], sizes: &FrequencyIndex)->usize where S: RenderSurface + ?Sized {
        let n_before = self.markers.len();

        for airport in airports {
            if let Some(pos) = airport.position() {
                let count = airport.key().map( |k| sizes.count(k)).unwrap_or(0);
                let visible = self.table.is_visible( self.zoom, count);
                let marker = surface.create_marker( pos, MarkerStyle::Airport, Some(airport.name.as_str()), visible);

                self.by_handle.insert( marker, self.markers.len());
                self.markers.push( OverlayMarker{ airport: airport.clone(), count, marker, visible });
            }
        }

        let n_plotted = self.markers.len() - n_before;
        debug!("plotted {} of {} airports", n_plotted, airports.len());
        n_plotted
    }

    /// recompute visibility of all markers for a new zoom level. Returns the number of visible markers
    pub fn set_zoom<S> (&mut self, surface: &mut S, zoom: u8)->usize where S: RenderSurface + ?Sized {
        self.zoom = zoom;

        let mut n_visible = 0;
        for m in &mut self.markers {
            m.visible = self.table.is_visible( zoom, m.count);
            surface.set_marker_visible( m.marker, m.visible);
            if m.visible { n_visible += 1; }
        }

        debug!("zoom level {}: {} of {} airports visible", zoom, n_visible, self.markers.len());
        n_visible
    }
}
