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

use std::fmt;
use tracing::{trace,warn};

use crate::{
    detail::EntityDetails,
    entity::Entity,
    errors::Result,
    record::EntityRecord,
    reference::AirlineIndex,
    render::RenderSurface,
    store::TrackStore
};

#[derive(Debug,Default,Clone,Copy,PartialEq,Eq)]
pub struct ReconcileStats {
    pub n_created: usize,
    pub n_updated: usize,
    pub n_rejected: usize,
}

impl fmt::Display for ReconcileStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "created: {}, updated: {}, rejected: {}", self.n_created, self.n_updated, self.n_rejected)
    }
}

/// merge a snapshot batch into the store. Records are independent of each other - a record that
/// failed validation is logged and skipped without affecting the rest of the batch.
/// Duplicate ids within the same batch are applied in batch order
pub fn reconcile<S,I> (store: &mut TrackStore, surface: &mut S, airlines: &AirlineIndex, max_path_points: Option<usize>, records: I)->ReconcileStats
    where S: RenderSurface + ?Sized, I: IntoIterator<Item=Result<EntityRecord>>
{
    let mut stats = ReconcileStats::default();

    for res in records {
        match res {
            Ok(rec) => {
                if apply_record( store, surface, airlines, max_path_points, &rec) {
                    stats.n_created += 1;
                } else {
                    stats.n_updated += 1;
                }
            }
            Err(e) => {
                warn!("skipping record: {e}");
                stats.n_rejected += 1;
            }
        }
    }

    stats
}

/// apply a single record, returning true if this created a new entity
pub fn apply_record<S> (store: &mut TrackStore, surface: &mut S, airlines: &AirlineIndex, max_path_points: Option<usize>, rec: &EntityRecord)->bool
    where S: RenderSurface + ?Sized
{
    let is_selected = store.is_selected( &rec.id);
    let mut created = false;

    let entity = store.get_or_insert_with( &rec.id, || {
        created = true;
        Entity::new( rec.id.clone(), rec.seen, surface.create_polyline(), max_path_points)
    });

    entity.apply( rec);
    trace!("{entity}");

    let mut new_marker = None;
    if let Some(pos) = entity.position {
        let style = entity.marker_style( is_selected);
        match entity.marker {
            Some(marker) => surface.update_marker( marker, pos, style),
            None => {
                let marker = surface.create_marker( pos, style, entity.label.as_deref(), true);
                entity.marker = Some(marker);
                new_marker = Some(marker);
            }
        }
    }

    if is_selected {
        surface.set_polyline_path( entity.path_line, &entity.path.to_vec());
        surface.show_detail_panel( &EntityDetails::new( entity, airlines));
    }

    if let Some(marker) = new_marker {
        store.register_marker( marker, &rec.id);
    }

    created
}
