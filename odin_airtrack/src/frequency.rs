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

use std::collections::HashMap;
use crate::reference::Route;

/// number of routes flying to or from a given airport, which we use as a measure of airport size.
/// Built once, read-only afterwards
#[derive(Debug,Default,Clone)]
pub struct FrequencyIndex {
    counts: HashMap<String,u32>
}

impl FrequencyIndex {
    /// build from (source,dest) key pairs. Missing keys are ignored, a self-loop counts twice
    pub fn from_edges<'a,I> (edges: I)->Self where I: IntoIterator<Item=(Option<&'a str>, Option<&'a str>)> {
        let mut counts: HashMap<String,u32> = HashMap::new();
        for (src,dest) in edges {
            for key in [src,dest].into_iter().flatten() {
                *counts.entry( key.to_string()).or_insert(0) += 1;
            }
        }
        FrequencyIndex { counts }
    }

    pub fn from_routes (routes: &[Route])->Self {
        FrequencyIndex::from_edges( routes.iter().map( |r| (r.source.as_deref(), r.dest.as_deref())))
    }

    /// unknown keys have a count of 0
    pub fn count (&self, key: &str)->u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len (&self)->usize { self.counts.len() }
    pub fn is_empty (&self)->bool { self.counts.is_empty() }
}
