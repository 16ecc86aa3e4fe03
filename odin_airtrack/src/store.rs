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

use std::collections::{HashMap,hash_map::Entry};

use crate::{datetime::EpochMillis, entity::Entity, render::MarkerHandle};

/// the live index of tracked entities plus the selection state.
/// There is at most one entity per id, and the selection (if any) always refers to a live entity
/// as long as entities are only removed through the pruner
#[derive(Debug,Default)]
pub struct TrackStore {
    entities: HashMap<String,Entity>,
    markers: HashMap<MarkerHandle,String>, // reverse lookup for click events
    selected: Option<String>,
}

impl TrackStore {
    pub fn new ()->Self { TrackStore::default() }

    pub fn len (&self)->usize { self.entities.len() }
    pub fn is_empty (&self)->bool { self.entities.is_empty() }

    pub fn contains (&self, id: &str)->bool { self.entities.contains_key(id) }
    pub fn get (&self, id: &str)->Option<&Entity> { self.entities.get(id) }

    pub fn iter (&self)->impl Iterator<Item=&Entity> { self.entities.values() }

    pub fn ids (&self)->Vec<String> {
        let mut ids: Vec<String> = self.entities.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// return the entity for `id`, creating it with `create` if we don't have it yet
    pub fn get_or_insert_with<F> (&mut self, id: &str, create: F)->&mut Entity where F: FnOnce()->Entity {
        match self.entities.entry( id.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert( create())
        }
    }

    pub fn register_marker (&mut self, marker: MarkerHandle, id: &str) {
        self.markers.insert( marker, id.to_string());
    }

    pub fn entity_id_for_marker (&self, marker: MarkerHandle)->Option<&str> {
        self.markers.get(&marker).map(String::as_str)
    }

    /// remove entity and its marker registration. This does not touch the selection
    pub fn remove (&mut self, id: &str)->Option<Entity> {
        let entity = self.entities.remove(id)?;
        if let Some(marker) = entity.marker {
            self.markers.remove(&marker);
        }
        Some(entity)
    }

    /// ids of all entities that were last seen before `cutoff`
    pub fn stale_ids (&self, cutoff: EpochMillis)->Vec<String> {
        self.entities.values()
            .filter( |e| e.last_seen < cutoff)
            .map( |e| e.id.clone())
            .collect()
    }

    //--- selection state

    pub fn selected (&self)->Option<&str> { self.selected.as_deref() }

    pub fn selected_entity (&self)->Option<&Entity> {
        self.selected.as_deref().and_then( |id| self.entities.get(id))
    }

    pub fn is_selected (&self, id: &str)->bool { self.selected.as_deref() == Some(id) }

    /// we only select live entities
    pub fn set_selected (&mut self, id: &str)->bool {
        if self.entities.contains_key(id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection (&mut self)->Option<String> { self.selected.take() }
}
