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

//! roll-up of 50km / 20km cell assignments into their 100km parent cells.
//!
//! A 100km cell needs every sensor tile that any of its children needs. Since the 50km and 20km
//! grids nest within the 100km grid, roll-ups from both levels have to agree.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, warn};

use s2grid_common::laea_grid::{LaeaCellId, LaeaLevel};
use crate::MatchResult;
use crate::errors::{Result, invalid_input, inconsistent_hierarchy};

#[derive(Debug,Clone,PartialEq,Eq)]
pub struct RollupRecord {
    /// the 100km parent cell
    pub cell: LaeaCellId,

    /// union of the children's tile lists, sorted
    pub tile_list: Vec<String>,

    pub n_children: usize,
}

/// parse a 20km or 50km cell id. Both share the same format, ids that are valid at both
/// levels resolve to the same 100km parent
pub fn child_cell_id (grid_id: &str) -> Result<LaeaCellId> {
    LaeaCellId::parse( grid_id, LaeaLevel::Km20)
        .or_else( |_| LaeaCellId::parse( grid_id, LaeaLevel::Km50))
        .map_err( |_| inconsistent_hierarchy!("{grid_id} is not a 50km or 20km LAEA cell id"))
}

/// group child assignments by 100km parent and union their tile lists.
///
/// Without `parents` we report every parent that has children, ordered by id. With `parents`
/// the records follow that order, parents without children get an empty tile list and a child
/// whose parent is not listed is an error
pub fn rollup_tile_lists (children: &[MatchResult], parents: Option<&[LaeaCellId]>) -> Result<Vec<RollupRecord>> {
    let mut groups: BTreeMap<LaeaCellId,(BTreeSet<String>,usize)> = BTreeMap::new();

    for child in children {
        let parent = child_cell_id( &child.grid_id)?.parent_100km();
        let tiles = child.tile_list.as_ref()
            .ok_or_else( || invalid_input!("{} ({}) has no tile list", child.grid_id, child.match_kind))?;

        let (tile_set, n) = groups.entry( parent).or_default();
        tile_set.extend( tiles.iter().cloned());
        *n += 1;
    }
    debug!("rolled up {} child cells into {} parents", children.len(), groups.len());

    let to_record = |cell: LaeaCellId, (tile_set,n_children): (BTreeSet<String>,usize)| {
        RollupRecord { cell, tile_list: tile_set.into_iter().collect(), n_children }
    };

    match parents {
        Some(parents) => {
            if let Some(p) = parents.iter().find( |p| p.level != LaeaLevel::Km100) {
                return Err( inconsistent_hierarchy!("parent cell {p} is not a 100km cell"))
            }

            let known: HashSet<&LaeaCellId> = parents.iter().collect();
            if let Some(p) = groups.keys().find( |p| !known.contains( p)) {
                return Err( inconsistent_hierarchy!("children of {p} have no parent in the parent grid"))
            }

            let mut records = Vec::with_capacity( parents.len());
            for p in parents {
                match groups.remove( p) {
                    Some(group) => records.push( to_record( *p, group)),
                    None => {
                        warn!("parent cell {p} has no children");
                        records.push( RollupRecord { cell: *p, tile_list: Vec::new(), n_children: 0 });
                    }
                }
            }
            Ok(records)
        }
        None => Ok( groups.into_iter().map( |(cell,group)| to_record( cell, group)).collect() )
    }
}

/// two roll-ups of the same parent grid (e.g. from the 20km and the 50km assignment) have to
/// produce the same tile set for every parent cell
pub fn check_rollup_consistency (a: &[RollupRecord], b: &[RollupRecord]) -> Result<()> {
    let tile_sets = |records: &[RollupRecord]| -> BTreeMap<LaeaCellId,BTreeSet<String>> {
        records.iter().map( |r| (r.cell, r.tile_list.iter().cloned().collect())).collect()
    };
    let sa = tile_sets( a);
    let sb = tile_sets( b);

    for cell in sa.keys().chain( sb.keys()) {
        match (sa.get( cell), sb.get( cell)) {
            (Some(ta), Some(tb)) if ta == tb => {}
            (Some(ta), Some(tb)) => {
                let only_a: Vec<&str> = ta.difference( tb).map( |s| s.as_str()).collect();
                let only_b: Vec<&str> = tb.difference( ta).map( |s| s.as_str()).collect();
                return Err( inconsistent_hierarchy!("{cell}: tiles {only_a:?} vs. {only_b:?}"))
            }
            _ => return Err( inconsistent_hierarchy!("{cell} is only in one of the roll-ups"))
        }
    }

    Ok(())
}
