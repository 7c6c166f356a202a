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

//! the per grid cell decision procedure and its fold over all cells

use std::collections::HashSet;
use geo::Centroid;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use s2grid_common::laea::GeoProjection;
use crate::{AssignConfig, GridCell, MatchKind, MatchResult, OutputMode, SensorTile};
use crate::candidates::{TileIndex, geometry_bbox, merge_tile_rows};
use crate::coverage::{contains_geometry, find_covering_subset};
use crate::tie_break::{TileIdOracle, FALLBACK_RULE, choose_tile};
use crate::wildcard::wildcard_id;
use crate::errors::{Result, S2GridAssignError, invalid_input, invalid_geometry, op_failed};

/// compute one [`MatchResult`] for each grid cell, in the order of `cells`.
///
/// `no_match` and `unresolved` cells are regular results. Errors are reserved for invalid input
/// (empty geometries, duplicate grid cell ids, invalid config) and for a violated one-result-per-cell invariant.
/// Sensor tile rows that share an id are merged into a single tile
pub fn assign_tiles<O> (cells: &[GridCell], tiles: &[SensorTile], oracle: &O, config: &AssignConfig) -> Result<Vec<MatchResult>>
    where O: TileIdOracle + Sync + ?Sized
{
    config.check()?;
    check_unique_ids( cells.iter().map( |c| c.id.as_str()), "grid cell")?;

    for cell in cells {
        if geometry_bbox( &cell.geometry).is_none() {
            return Err( invalid_geometry!("grid cell {} has empty geometry", cell.id))
        }
    }

    let tiles = merge_tile_rows( tiles)?;
    let index = TileIndex::new( &tiles)?;
    info!("assigning {} sensor tiles to {} grid cells", index.len(), cells.len());

    let results: Vec<MatchResult> = if config.parallel {
        // indexed parallel iterators collect in input order
        cells.par_iter().map( |cell| assign_cell( cell, &index, oracle, config)).collect::<Result<Vec<_>>>()?
    } else {
        cells.iter().map( |cell| assign_cell( cell, &index, oracle, config)).collect::<Result<Vec<_>>>()?
    };

    check_cardinality( cells, &results)?;

    for (kind,n) in count_by_kind( &results) {
        info!("  {:>10}: {}", kind.as_str(), n);
    }

    Ok(results)
}

/// the decision procedure for a single cell
pub fn assign_cell<O> (cell: &GridCell, index: &TileIndex, oracle: &O, config: &AssignConfig) -> Result<MatchResult>
    where O: TileIdOracle + ?Sized
{
    let candidates = index.candidates( cell, config.bbox_padding)?;
    debug!("{}: {} candidate tiles", cell.id, candidates.len());

    if candidates.is_empty() {
        warn!("no sensor tile matches the bounds of grid cell {}", cell.id);
        return Ok( MatchResult::no_match( &cell.id))
    }

    if candidates.len() == 1 {
        debug!("{}: single candidate {}", cell.id, candidates[0].id);
        return Ok( MatchResult::single( &cell.id, &candidates[0].id))
    }

    let single_match: Vec<&SensorTile> = candidates.iter().copied()
        .filter( |t| contains_geometry( &t.geometry, &cell.geometry))
        .collect();

    match single_match.len() {
        0 => {}
        1 => {
            debug!("{}: single covering tile {}", cell.id, single_match[0].id);
            return Ok( MatchResult::single( &cell.id, &single_match[0].id))
        }
        _ => {
            let ref_id = reference_tile_id( cell, oracle, config);
            let (tile,rule) = choose_tile( &single_match, ref_id.as_deref())
                .ok_or_else( || op_failed!("no tie-break choice for {}", cell.id))?;

            if rule.name == FALLBACK_RULE {
                warn!("{}: none of {} covering tiles matches reference id {:?}, using {}", cell.id, single_match.len(), ref_id, tile.id);
            } else {
                debug!("{}: {} covering tiles, chose {} by {} rule", cell.id, single_match.len(), tile.id, rule.name);
            }
            return Ok( MatchResult::single( &cell.id, &tile.id))
        }
    }

    match find_covering_subset( cell, &candidates, config.max_subset_size, config.zone_restricted_first_pass) {
        Some(subset) => {
            let match_kind = MatchKind::for_tile_count( subset.len())
                .ok_or_else( || op_failed!("covering subset of {} tiles for {}", subset.len(), cell.id))?;
            let tile_list: Vec<String> = subset.iter().map( |t| t.id.clone()).collect();
            let primary_tile_id = match config.output_mode {
                OutputMode::Wildcard => wildcard_id( &tile_list),
                OutputMode::TileList => None
            };

            Ok( MatchResult { grid_id: cell.id.clone(), match_kind, primary_tile_id, tile_list: Some(tile_list) } )
        }
        None => {
            let ids: Vec<String> = candidates.iter().map( |t| t.id.clone()).collect();
            warn!("{}: no subset of up to {} of the {} candidates covers the cell: {}", cell.id, config.max_subset_size, ids.len(), ids.join(","));
            Ok( MatchResult::unresolved( &cell.id, ids))
        }
    }
}

// the oracle id for the geographic centroid of the cell
fn reference_tile_id<O> (cell: &GridCell, oracle: &O, config: &AssignConfig) -> Option<String> where O: TileIdOracle + ?Sized {
    let c = cell.geometry.centroid()?;
    let (lon,lat) = config.grid_crs.to_lon_lat( c.x(), c.y());
    let ref_id = oracle.reference_tile_id( lon, lat);
    debug!("{}: centroid {:.5},{:.5} has reference id {:?}", cell.id, lon, lat, ref_id);
    ref_id
}

fn check_unique_ids<'a,I> (ids: I, what: &str) -> Result<()> where I: Iterator<Item=&'a str> {
    let mut seen: HashSet<&str> = HashSet::new();
    for id in ids {
        if !seen.insert( id) {
            return Err( invalid_input!("duplicate {what} id {id}"))
        }
    }
    Ok(())
}

/// results have to correspond one-to-one and in order to the grid cells
pub fn check_cardinality (cells: &[GridCell], results: &[MatchResult]) -> Result<()> {
    if cells.len() != results.len() {
        return Err( S2GridAssignError::CardinalityMismatch { expected: cells.len(), actual: results.len() })
    }

    if let Some((cell,res)) = cells.iter().zip( results).find( |(c,r)| c.id != r.grid_id) {
        return Err( invalid_input!("result for {} out of order, expected {}", res.grid_id, cell.id))
    }

    Ok(())
}

/// number of results per match kind, in [`MatchKind::ALL`] order
pub fn count_by_kind (results: &[MatchResult]) -> Vec<(MatchKind,usize)> {
    let counts = results.iter().counts_by( |r| r.match_kind);
    MatchKind::ALL.iter().map( |k| (*k, counts.get(k).copied().unwrap_or(0))).collect()
}
