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

//! generalized ("wildcard") tile ids for multi tile matches: "31UFT" + "32UFT" -> "3*UFT"

pub const WILDCARD: char = '*';

/// position-wise generalization of a set of equally long ids. Positions where the ids disagree
/// get a [`WILDCARD`]. Returns `None` for an empty set or ids of different length
pub fn wildcard_id<S: AsRef<str>> (ids: &[S]) -> Option<String> {
    let mut pattern: Vec<char> = ids.first()?.as_ref().chars().collect();

    for id in &ids[1..] {
        let chars: Vec<char> = id.as_ref().chars().collect();
        if chars.len() != pattern.len() { return None }

        for (p,c) in pattern.iter_mut().zip( chars) {
            if *p != c { *p = WILDCARD }
        }
    }

    Some( pattern.into_iter().collect() )
}

/// does a concrete id match a (possibly generalized) id
pub fn wildcard_matches (pattern: &str, id: &str) -> bool {
    pattern.chars().count() == id.chars().count()
        && pattern.chars().zip( id.chars()).all( |(p,c)| p == WILDCARD || p == c)
}

/// number of wildcard positions in a generalized id
pub fn wildcard_count (pattern: &str) -> usize {
    pattern.chars().filter( |c| *c == WILDCARD).count()
}
