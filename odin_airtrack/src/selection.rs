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

use tracing::debug;

use crate::{
    detail::EntityDetails,
    reference::AirlineIndex,
    render::{MarkerHandle,RenderSurface},
    store::TrackStore
};

/// select the entity with the given id and re-render all entities. Selecting the already selected
/// entity re-renders as well. Returns false (and leaves the selection alone) if there is no such entity
pub fn select<S> (store: &mut TrackStore, surface: &mut S, airlines: &AirlineIndex, id: &str)->bool
    where S: RenderSurface + ?Sized
{
    if store.set_selected(id) {
        debug!("selected {id}");
        render_selection( store, surface, airlines);
        true
    } else {
        false
    }
}

/// select the entity that owns `marker`, if any
pub fn select_marker<S> (store: &mut TrackStore, surface: &mut S, airlines: &AirlineIndex, marker: MarkerHandle)->Option<String>
    where S: RenderSurface + ?Sized
{
    let id = store.entity_id_for_marker(marker)?.to_string();
    if select( store, surface, airlines, &id) { Some(id) } else { None }
}

/// bring all entities in line with the selection state: exactly the selected one is highlighted,
/// shows its full path and fills the detail panel
pub fn render_selection<S> (store: &TrackStore, surface: &mut S, airlines: &AirlineIndex)
    where S: RenderSurface + ?Sized
{
    for entity in store.iter() {
        let highlighted = store.is_selected( &entity.id);

        if let (Some(marker), Some(pos)) = (entity.marker, entity.position) {
            surface.update_marker( marker, pos, entity.marker_style( highlighted));
        }

        if highlighted {
            surface.set_polyline_path( entity.path_line, &entity.path.to_vec());
            surface.set_polyline_visible( entity.path_line, true);
            surface.show_detail_panel( &EntityDetails::new( entity, airlines));
        } else {
            surface.set_polyline_visible( entity.path_line, false);
        }
    }
}
