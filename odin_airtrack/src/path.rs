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

use std::collections::VecDeque;
use crate::record::Position;

/// the accumulated trace of an entity, oldest position first.
/// Positions are never de-duplicated. If there is a `max_points` limit the path is used as a
/// ringbuffer, i.e. the oldest point is dropped when the limit is reached
#[derive(Debug,Clone,Default)]
pub struct TrackPath {
    points: VecDeque<Position>,
    max_points: Option<usize>,
}

impl TrackPath {
    pub fn new (max_points: Option<usize>)->Self {
        TrackPath { points: VecDeque::new(), max_points: max_points.filter(|n| *n > 0) }
    }

    pub fn push (&mut self, pos: Position) {
        if let Some(max) = self.max_points {
            while self.points.len() >= max { self.points.pop_front(); }
        }
        self.points.push_back(pos);
    }

    pub fn len (&self)->usize { self.points.len() }

    pub fn is_empty (&self)->bool { self.points.is_empty() }

    pub fn last (&self)->Option<&Position> { self.points.back() }

    pub fn iter (&self)->impl Iterator<Item=&Position> { self.points.iter() }

    /// the full path in a form we can hand to a polyline
    pub fn to_vec (&self)->Vec<Position> { self.points.iter().copied().collect() }
}
