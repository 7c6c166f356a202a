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

use std::{fmt, str::FromStr};
use geo::MultiPolygon;
use serde::{Serialize,Deserialize};

use s2grid_common::laea::{GeoProjection, LonLat, LAEA_3035};

pub mod errors;
pub mod candidates;
pub mod coverage;
pub mod tie_break;
pub mod wildcard;
pub mod assigner;
pub mod layers;
pub mod output;
pub mod rollup;

use errors::{Result, S2GridAssignError, invalid_input};

pub use assigner::assign_tiles;
pub use tie_break::{TileIdOracle, MgrsOracle};
pub use s2grid_common::load_config_path;

/// one polygon of the equal-area processing grid we assign sensor tiles to
#[derive(Debug,Clone,PartialEq)]
pub struct GridCell {
    pub id: String,
    pub geometry: MultiPolygon<f64>,
}

/// one polygon of the Sentinel-2 tiling grid (in the same planar CRS as the grid cells)
#[derive(Debug,Clone,PartialEq)]
pub struct SensorTile {
    pub id: String,
    pub geometry: MultiPolygon<f64>,

    /// projected CRS (UTM EPSG code) the tile is defined in
    pub zone: u32,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    NoMatch,
    Single,
    Double,
    Triple,
    Quadruple,
    Unresolved,
}

impl MatchKind {
    pub const ALL: [MatchKind;6] = [
        MatchKind::NoMatch, MatchKind::Single, MatchKind::Double, MatchKind::Triple, MatchKind::Quadruple, MatchKind::Unresolved
    ];

    /// the match kind for a covering set of `n` tiles
    pub fn for_tile_count (n: usize) -> Option<MatchKind> {
        match n {
            1 => Some(MatchKind::Single),
            2 => Some(MatchKind::Double),
            3 => Some(MatchKind::Triple),
            4 => Some(MatchKind::Quadruple),
            _ => None
        }
    }

    pub fn as_str (&self) -> &'static str {
        match self {
            MatchKind::NoMatch => "no_match",
            MatchKind::Single => "single",
            MatchKind::Double => "double",
            MatchKind::Triple => "triple",
            MatchKind::Quadruple => "quadruple",
            MatchKind::Unresolved => "unresolved",
        }
    }

    /// did we find a set of tiles that fully covers the cell
    pub fn is_covered (&self) -> bool {
        !matches!( self, MatchKind::NoMatch | MatchKind::Unresolved)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}", self.as_str())
    }
}

impl FromStr for MatchKind {
    type Err = S2GridAssignError;

    fn from_str (s: &str) -> Result<Self> {
        MatchKind::ALL.iter().find( |k| k.as_str() == s).copied()
            .ok_or_else( || invalid_input!("unknown match kind {s:?}"))
    }
}

/// the per grid cell outcome of the assignment
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct MatchResult {
    pub grid_id: String,
    pub match_kind: MatchKind,

    /// the covering tile, or the wildcard generalization of a covering set (if requested)
    pub primary_tile_id: Option<String>,

    /// covering tile ids for matched cells, all candidate ids for unresolved cells
    pub tile_list: Option<Vec<String>>,
}

impl MatchResult {
    pub fn no_match (grid_id: &str) -> Self {
        MatchResult { grid_id: grid_id.to_string(), match_kind: MatchKind::NoMatch, primary_tile_id: None, tile_list: None }
    }

    pub fn single (grid_id: &str, tile_id: &str) -> Self {
        MatchResult {
            grid_id: grid_id.to_string(),
            match_kind: MatchKind::Single,
            primary_tile_id: Some(tile_id.to_string()),
            tile_list: Some( vec![tile_id.to_string()])
        }
    }

    pub fn unresolved (grid_id: &str, candidate_ids: Vec<String>) -> Self {
        MatchResult { grid_id: grid_id.to_string(), match_kind: MatchKind::Unresolved, primary_tile_id: None, tile_list: Some(candidate_ids) }
    }

    /// comma separated tile list as it appears in the output tables
    pub fn joined_tile_list (&self) -> Option<String> {
        self.tile_list.as_ref().map( |list| list.join(","))
    }
}

/// do we report multi-tile matches as raw id lists or also as a generalized wildcard id
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum OutputMode {
    #[default]
    TileList,
    Wildcard,
}

/// the planar CRS of the grid and tile layers. Only used to get geographic centroids for the tie-break
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum GridCrs {
    #[default]
    Laea3035,
    Wgs84,
}

impl GeoProjection for GridCrs {
    fn epsg (&self) -> u32 {
        match self {
            GridCrs::Laea3035 => LAEA_3035.epsg(),
            GridCrs::Wgs84 => LonLat.epsg(),
        }
    }

    fn to_lon_lat (&self, x: f64, y: f64) -> (f64,f64) {
        match self {
            GridCrs::Laea3035 => LAEA_3035.to_lon_lat( x, y),
            GridCrs::Wgs84 => LonLat.to_lon_lat( x, y),
        }
    }

    fn from_lon_lat (&self, lon_deg: f64, lat_deg: f64) -> (f64,f64) {
        match self {
            GridCrs::Laea3035 => LAEA_3035.from_lon_lat( lon_deg, lat_deg),
            GridCrs::Wgs84 => LonLat.from_lon_lat( lon_deg, lat_deg),
        }
    }
}

/// the largest covering set we search for. Candidates that need more tiles end up unresolved
pub const MAX_SUBSET_SIZE: usize = 4;

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct AssignConfig {
    /// padding around the cell bounding box for the candidate filter, in grid CRS units
    pub bbox_padding: f64,

    /// covering subsets are searched up to this size (2..=4)
    pub max_subset_size: usize,

    pub output_mode: OutputMode,

    /// search within tiles of the same zone before mixing zones
    pub zone_restricted_first_pass: bool,

    pub grid_id_property: String,
    pub tile_id_property: String,

    /// tile property holding the EPSG code. If not set (or missing on a tile) we derive it from the tile id
    pub zone_property: Option<String>,

    pub grid_crs: GridCrs,

    /// process cells on the rayon thread pool
    pub parallel: bool,
}

impl Default for AssignConfig {
    fn default () -> Self {
        AssignConfig {
            bbox_padding: 100.0,
            max_subset_size: MAX_SUBSET_SIZE,
            output_mode: OutputMode::TileList,
            zone_restricted_first_pass: true,
            grid_id_property: "name".to_string(),
            tile_id_property: "tile_id".to_string(),
            zone_property: Some("epsg".to_string()),
            grid_crs: GridCrs::Laea3035,
            parallel: false,
        }
    }
}

impl AssignConfig {
    pub fn check (&self) -> Result<()> {
        if !(2..=MAX_SUBSET_SIZE).contains( &self.max_subset_size) {
            return Err( invalid_input!("max_subset_size {} not in 2..={}", self.max_subset_size, MAX_SUBSET_SIZE))
        }
        if !self.bbox_padding.is_finite() || self.bbox_padding < 0.0 {
            return Err( invalid_input!("invalid bbox_padding {}", self.bbox_padding))
        }
        Ok(())
    }
}
