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

//! choosing one of several sensor tiles that each fully cover a grid cell.
//!
//! Cells on a UTM zone seam are usually covered by tiles of both zones. We pick the tile that
//! agrees best with the MGRS square of the cell centroid, using an ordered list of rules with
//! decreasing specificity. The first rule that matches any covering tile decides.

use s2grid_common::mgrs::mgrs_id;
use crate::SensorTile;

/// provides the reference tile id for a geographic position (degrees)
pub trait TileIdOracle {
    fn reference_tile_id (&self, lon_deg: f64, lat_deg: f64) -> Option<String>;
}

impl <F> TileIdOracle for F where F: Fn(f64,f64)->Option<String> {
    fn reference_tile_id (&self, lon_deg: f64, lat_deg: f64) -> Option<String> {
        self( lon_deg, lat_deg)
    }
}

/// the Sentinel-2 tile id of a position is its MGRS 100km square id
#[derive(Debug,Clone,Copy,Default)]
pub struct MgrsOracle;

impl TileIdOracle for MgrsOracle {
    fn reference_tile_id (&self, lon_deg: f64, lat_deg: f64) -> Option<String> {
        mgrs_id( lon_deg, lat_deg).ok()
    }
}

pub struct TieBreakRule {
    pub name: &'static str,
    pub matches: fn(&str,&str)->bool, // (tile_id, reference_id)
}

fn same_id (tile_id: &str, ref_id: &str) -> bool { tile_id == ref_id }

fn same_prefix (tile_id: &str, ref_id: &str, n: usize) -> bool {
    match (tile_id.get(..n), ref_id.get(..n)) {
        (Some(a), Some(b)) => a == b,
        _ => false
    }
}

fn same_zone_and_band (tile_id: &str, ref_id: &str) -> bool { same_prefix( tile_id, ref_id, 3) }

fn same_zone (tile_id: &str, ref_id: &str) -> bool { same_prefix( tile_id, ref_id, 2) }

fn any_tile (_tile_id: &str, _ref_id: &str) -> bool { true }

/// name of the last resort rule that picks the first covering tile
pub const FALLBACK_RULE: &str = "first";

pub static TIE_BREAK_RULES: [TieBreakRule;4] = [
    TieBreakRule { name: "exact", matches: same_id },
    TieBreakRule { name: "zone+band", matches: same_zone_and_band },
    TieBreakRule { name: "zone", matches: same_zone },
    TieBreakRule { name: FALLBACK_RULE, matches: any_tile },
];

/// pick one tile out of `covering` (which are in candidate order). Without a reference id
/// only the fallback rule applies. Returns `None` only if `covering` is empty
pub fn choose_tile<'a> (covering: &[&'a SensorTile], ref_id: Option<&str>) -> Option<(&'a SensorTile, &'static TieBreakRule)> {
    TIE_BREAK_RULES.iter()
        .filter( |rule| ref_id.is_some() || rule.name == FALLBACK_RULE)
        .find_map( |rule| {
            let ref_id = ref_id.unwrap_or_default();
            covering.iter().find( |t| (rule.matches)( &t.id, ref_id)).map( |t| (*t, rule))
        })
}
