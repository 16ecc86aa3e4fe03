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

use std::time::Duration;
use tracing::debug;

use crate::{datetime::EpochMillis, render::RenderSurface, store::TrackStore};

/// drop all entities we have not seen since `now - drop_after`, releasing their render resources.
/// If the selected entity is dropped the selection is cleared and the detail panel hidden.
/// Returns the ids of the dropped entities
pub fn prune_stale<S> (store: &mut TrackStore, surface: &mut S, now: EpochMillis, drop_after: Duration)->Vec<String>
    where S: RenderSurface + ?Sized
{
    let cutoff = now.minus( drop_after);
    let stale = store.stale_ids( cutoff);

    for id in &stale {
        if store.is_selected(id) {
            store.clear_selection();
            surface.hide_detail_panel();
        }

        if let Some(entity) = store.remove(id) {
            surface.remove_polyline( entity.path_line);
            if let Some(marker) = entity.marker {
                surface.remove_marker( marker);
            }
            debug!("dropped {entity}");
        }
    }

    stale
}
