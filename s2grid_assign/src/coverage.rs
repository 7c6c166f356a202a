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

//! combinatorial search for the smallest set of sensor tiles that jointly covers a grid cell

use geo::{BooleanOps, MultiPolygon, Relate};
use itertools::Itertools;
use tracing::debug;

use crate::{GridCell, SensorTile};
use crate::candidates::{bbox_union, geometry_bbox};

/// DE-9IM containment: no point of `inner` lies outside `outer` and the interiors intersect.
/// Boundaries may touch
pub fn contains_geometry (outer: &MultiPolygon<f64>, inner: &MultiPolygon<f64>) -> bool {
    outer.relate( inner).is_contains()
}

pub fn union_geometry (tiles: &[&SensorTile]) -> MultiPolygon<f64> {
    let mut it = tiles.iter();
    match it.next() {
        Some(first) => it.fold( first.geometry.clone(), |acc,t| acc.union( &t.geometry)),
        None => MultiPolygon::new( Vec::new())
    }
}

/// does the union of `tiles` fully contain the cell
pub fn covers_cell (cell: &GridCell, tiles: &[&SensorTile]) -> bool {
    // the tile boxes have to cover the cell box before we compute any polygon union
    let tile_bboxes: Vec<_> = tiles.iter().filter_map( |t| geometry_bbox( &t.geometry)).collect();
    match (geometry_bbox( &cell.geometry), bbox_union( &tile_bboxes)) {
        (Some(cell_bbox), Some(tiles_bbox)) => {
            if !tiles_bbox.contains_box( &cell_bbox) { return false }
        }
        _ => return false
    }

    contains_geometry( &union_geometry( tiles), &cell.geometry)
}

/// partition tiles by zone. Groups are ordered by size (largest first), equally sized groups
/// keep the order in which their first tile appears
pub fn zone_groups<'a> (tiles: &[&'a SensorTile]) -> Vec<Vec<&'a SensorTile>> {
    let mut groups: Vec<Vec<&'a SensorTile>> = Vec::new();

    for tile in tiles {
        match groups.iter_mut().find( |g| g[0].zone == tile.zone) {
            Some(group) => group.push( *tile),
            None => groups.push( vec![*tile])
        }
    }

    groups.sort_by( |a,b| b.len().cmp( &a.len())); // stable
    groups
}

/// the first `k` element combination of `tiles` (lexicographic order over input positions)
/// whose union covers the cell
pub fn first_covering_combination<'a> (cell: &GridCell, tiles: &[&'a SensorTile], k: usize) -> Option<Vec<&'a SensorTile>> {
    if k == 0 || tiles.len() < k { return None }
    tiles.iter().copied().combinations(k).find( |combo| covers_cell( cell, combo))
}

/// find the smallest covering subset with 2..=`max_size` tiles.
///
/// For each subset size we first look within each zone group (if candidates span several zones
/// and the zone pass is enabled) and then across all candidates. A smaller covering subset
/// always wins over a larger one, and for a given size a same-zone subset wins over mixed ones
pub fn find_covering_subset<'a> (cell: &GridCell, candidates: &[&'a SensorTile], max_size: usize, zone_restricted_first_pass: bool) -> Option<Vec<&'a SensorTile>> {
    let groups = if zone_restricted_first_pass { zone_groups( candidates) } else { Vec::new() };
    let restricted: Vec<&Vec<&'a SensorTile>> = if groups.len() > 1 {
        groups.iter().filter( |g| g.len() >= 2).collect()
    } else {
        Vec::new()
    };

    for k in 2..=max_size.min( candidates.len()) {
        for group in &restricted {
            if let Some(subset) = first_covering_combination( cell, group, k) {
                debug!("{}: covered by {} tiles of zone {}", cell.id, k, subset[0].zone);
                return Some(subset)
            }
        }

        if let Some(subset) = first_covering_combination( cell, candidates, k) {
            debug!("{}: covered by {} tiles", cell.id, k);
            return Some(subset)
        }
    }

    None
}
