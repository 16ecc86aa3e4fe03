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

use std::{collections::HashMap, fmt};
use tracing::debug;

use crate::{record::Position, detail::{EntityDetails,LocationDetails}};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct MarkerHandle(pub u64);

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!( f, "marker-{}", self.0) }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct PolylineHandle(pub u64);

impl fmt::Display for PolylineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!( f, "polyline-{}", self.0) }
}

/// what a marker should look like
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum MarkerStyle {
    /// aircraft icon rotated by heading, outlined if highlighted (selected)
    Aircraft { heading: Option<f64>, highlighted: bool },
    /// airport pin
    Airport
}

impl MarkerStyle {
    pub fn is_highlighted (&self)->bool {
        matches!( self, MarkerStyle::Aircraft{ highlighted: true, .. })
    }
}

/// the capabilities we need from the map we render on. Implementations own the actual graphics
/// primitives, we only keep the opaque handles they return.
/// Polylines are created hidden. Calls with unknown (already removed) handles are ignored
pub trait RenderSurface {
    fn create_marker (&mut self, pos: Position, style: MarkerStyle, title: Option<&str>, visible: bool)->MarkerHandle;
    fn update_marker (&mut self, marker: MarkerHandle, pos: Position, style: MarkerStyle);
    fn set_marker_visible (&mut self, marker: MarkerHandle, visible: bool);
    fn remove_marker (&mut self, marker: MarkerHandle);

    fn create_polyline (&mut self)->PolylineHandle;
    fn set_polyline_path (&mut self, line: PolylineHandle, path: &[Position]);
    fn set_polyline_visible (&mut self, line: PolylineHandle, visible: bool);
    fn remove_polyline (&mut self, line: PolylineHandle);

    fn show_detail_panel (&mut self, details: &EntityDetails);
    fn hide_detail_panel (&mut self);

    /// the popup for overlay (airport) markers, which is independent of the detail panel
    fn show_info_window (&mut self, marker: MarkerHandle, details: &LocationDetails);
}

#[derive(Debug,Clone,PartialEq)]
pub struct MarkerState {
    pub position: Position,
    pub style: MarkerStyle,
    pub title: Option<String>,
    pub visible: bool,
}

#[derive(Debug,Clone,PartialEq,Default)]
pub struct PolylineState {
    pub path: Vec<Position>,
    pub visible: bool,
}

/// a headless surface that just keeps the state of all primitives in memory.
/// Used for tests and as the backend for [`LogSurface`]
#[derive(Debug,Default)]
pub struct RecordingSurface {
    next_id: u64,
    markers: HashMap<MarkerHandle,MarkerState>,
    polylines: HashMap<PolylineHandle,PolylineState>,
    detail_panel: Option<EntityDetails>,
    info_window: Option<(MarkerHandle,LocationDetails)>,
}

impl RecordingSurface {
    pub fn new ()->Self { RecordingSurface::default() }

    fn next_handle (&mut self)->u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn marker (&self, marker: MarkerHandle)->Option<&MarkerState> { self.markers.get(&marker) }
    pub fn polyline (&self, line: PolylineHandle)->Option<&PolylineState> { self.polylines.get(&line) }

    pub fn num_markers (&self)->usize { self.markers.len() }
    pub fn num_polylines (&self)->usize { self.polylines.len() }

    pub fn visible_markers (&self)->usize { self.markers.values().filter(|m| m.visible).count() }

    pub fn highlighted_markers (&self)->Vec<MarkerHandle> {
        let mut v: Vec<MarkerHandle> = self.markers.iter()
            .filter( |(_,m)| m.style.is_highlighted())
            .map( |(h,_)| *h)
            .collect();
        v.sort();
        v
    }

    pub fn visible_polylines (&self)->Vec<PolylineHandle> {
        let mut v: Vec<PolylineHandle> = self.polylines.iter()
            .filter( |(_,l)| l.visible)
            .map( |(h,_)| *h)
            .collect();
        v.sort();
        v
    }

    /// the currently shown detail panel content (None if hidden)
    pub fn detail_panel (&self)->Option<&EntityDetails> { self.detail_panel.as_ref() }

    pub fn info_window (&self)->Option<&(MarkerHandle,LocationDetails)> { self.info_window.as_ref() }
}

impl RenderSurface for RecordingSurface {
    fn create_marker (&mut self, position: Position, style: MarkerStyle, title: Option<&str>, visible: bool)->MarkerHandle {
        let h = MarkerHandle( self.next_handle());
        self.markers.insert( h, MarkerState{ position, style, title: title.map(str::to_string), visible });
        h
    }

    fn update_marker (&mut self, marker: MarkerHandle, pos: Position, style: MarkerStyle) {
        if let Some(m) = self.markers.get_mut(&marker) {
            m.position = pos;
            m.style = style;
        }
    }

    fn set_marker_visible (&mut self, marker: MarkerHandle, visible: bool) {
        if let Some(m) = self.markers.get_mut(&marker) { m.visible = visible; }
    }

    fn remove_marker (&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker);
        if self.info_window.as_ref().is_some_and( |(h,_)| *h == marker) { self.info_window = None; }
    }

    fn create_polyline (&mut self)->PolylineHandle {
        let h = PolylineHandle( self.next_handle());
        self.polylines.insert( h, PolylineState::default());
        h
    }

    fn set_polyline_path (&mut self, line: PolylineHandle, path: &[Position]) {
        if let Some(l) = self.polylines.get_mut(&line) { l.path = path.to_vec(); }
    }

    fn set_polyline_visible (&mut self, line: PolylineHandle, visible: bool) {
        if let Some(l) = self.polylines.get_mut(&line) { l.visible = visible; }
    }

    fn remove_polyline (&mut self, line: PolylineHandle) {
        self.polylines.remove(&line);
    }

    fn show_detail_panel (&mut self, details: &EntityDetails) {
        self.detail_panel = Some( details.clone());
    }

    fn hide_detail_panel (&mut self) {
        self.detail_panel = None;
    }

    fn show_info_window (&mut self, marker: MarkerHandle, details: &LocationDetails) {
        self.info_window = Some( (marker, details.clone()) );
    }
}

/// a surface for headless monitoring: keeps state like [`RecordingSurface`] and traces every
/// render operation
#[derive(Debug,Default)]
pub struct LogSurface {
    inner: RecordingSurface
}

impl LogSurface {
    pub fn new ()->Self { LogSurface::default() }

    pub fn state (&self)->&RecordingSurface { &self.inner }
}

impl RenderSurface for LogSurface {
    fn create_marker (&mut self, pos: Position, style: MarkerStyle, title: Option<&str>, visible: bool)->MarkerHandle {
        let h = self.inner.create_marker( pos, style, title, visible);
        debug!("create {h} at {pos} {style:?} title: {title:?} visible: {visible}");
        h
    }

    fn update_marker (&mut self, marker: MarkerHandle, pos: Position, style: MarkerStyle) {
        debug!("move {marker} to {pos} {style:?}");
        self.inner.update_marker( marker, pos, style)
    }

    fn set_marker_visible (&mut self, marker: MarkerHandle, visible: bool) {
        self.inner.set_marker_visible( marker, visible)
    }

    fn remove_marker (&mut self, marker: MarkerHandle) {
        debug!("remove {marker}");
        self.inner.remove_marker( marker)
    }

    fn create_polyline (&mut self)->PolylineHandle {
        self.inner.create_polyline()
    }

    fn set_polyline_path (&mut self, line: PolylineHandle, path: &[Position]) {
        debug!("{line} path with {} points", path.len());
        self.inner.set_polyline_path( line, path)
    }

    fn set_polyline_visible (&mut self, line: PolylineHandle, visible: bool) {
        self.inner.set_polyline_visible( line, visible)
    }

    fn remove_polyline (&mut self, line: PolylineHandle) {
        self.inner.remove_polyline( line)
    }

    fn show_detail_panel (&mut self, details: &EntityDetails) {
        debug!("detail panel:\n{details}");
        self.inner.show_detail_panel( details)
    }

    fn hide_detail_panel (&mut self) {
        debug!("hide detail panel");
        self.inner.hide_detail_panel()
    }

    fn show_info_window (&mut self, marker: MarkerHandle, details: &LocationDetails) {
        debug!("info window for {marker}:\n{details}");
        self.inner.show_info_window( marker, details)
    }
}
