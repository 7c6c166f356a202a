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

/// the pan-European ETRS89-LAEA (EPSG:3035) tiling grids at 100km, 50km and 20km resolution.
///
/// 100km cells are named `E<ee>N<nn>` with coordinates in units of 100km (e.g. `E09N08` has its
/// lower left corner at 900000,800000). 50km and 20km cells share the `E<eee>N<nnn>` format with
/// coordinates in units of 10km, which means the id alone does not tell the resolution (`E090N080`
/// is both a 50km and a 20km cell). 50km cells sit at multiples of 5, 20km cells at even values.

use std::{fmt, ops::RangeInclusive, str::FromStr};
use geo::{Intersects, LineString, MultiPolygon, Polygon, coord};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::BoundingBox;
use crate::errors::{Result, S2GridCommonError, invalid_grid_id};

/// the 100km E/N index ranges that cover the pan-European area
pub const EU_100KM_E_RANGE: RangeInclusive<u32> = 9..=80;
pub const EU_100KM_N_RANGE: RangeInclusive<u32> = 8..=75;

/// vertex spacing [m] of the densified ("high res") grid variants that survive reprojection
pub const DEFAULT_DENSIFY_STEP: f64 = 250.0;

lazy_static! {
    static ref ID_100KM_RE: Regex = Regex::new(r"^E(\d{2})N(\d{2})$").unwrap();
    static ref ID_10KM_RE: Regex = Regex::new(r"^E(\d{3})N(\d{3})$").unwrap();
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
pub enum LaeaLevel { Km100, Km50, Km20 }

impl LaeaLevel {
    pub fn cell_size (&self) -> f64 {
        match self {
            LaeaLevel::Km100 => 100_000.0,
            LaeaLevel::Km50 => 50_000.0,
            LaeaLevel::Km20 => 20_000.0,
        }
    }

    /// size of one id coordinate unit in meters
    fn unit (&self) -> u32 {
        match self {
            LaeaLevel::Km100 => 100_000,
            _ => 10_000
        }
    }

    /// spacing of valid id coordinates in units
    fn step (&self) -> u32 {
        match self {
            LaeaLevel::Km100 => 1,
            LaeaLevel::Km50 => 5,
            LaeaLevel::Km20 => 2,
        }
    }
}

impl FromStr for LaeaLevel {
    type Err = S2GridCommonError;

    fn from_str (s: &str) -> Result<Self> {
        match s.trim_end_matches("km") {
            "100" => Ok(LaeaLevel::Km100),
            "50" => Ok(LaeaLevel::Km50),
            "20" => Ok(LaeaLevel::Km20),
            _ => Err( invalid_grid_id!("unknown LAEA grid level {s:?}"))
        }
    }
}

impl fmt::Display for LaeaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}km", self.cell_size() as u32 / 1000)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct LaeaCellId {
    pub level: LaeaLevel,
    pub e: u32,
    pub n: u32,
}

impl LaeaCellId {
    pub fn new (level: LaeaLevel, e: u32, n: u32) -> Result<Self> {
        let step = level.step();
        let max = if level == LaeaLevel::Km100 { 99 } else { 999 };

        if e % step != 0 || n % step != 0 || e > max || n > max {
            Err( invalid_grid_id!("E{e}N{n} is not a valid {level} cell"))
        } else {
            Ok( LaeaCellId { level, e, n } )
        }
    }

    /// parse an id of the given resolution
    pub fn parse (s: &str, level: LaeaLevel) -> Result<Self> {
        let re: &Regex = if level == LaeaLevel::Km100 { &ID_100KM_RE } else { &ID_10KM_RE };

        let caps = re.captures(s).ok_or_else( || invalid_grid_id!("{s:?} is not a {level} LAEA id"))?;
        let e: u32 = caps[1].parse().map_err( |_| invalid_grid_id!("invalid easting in {s:?}"))?;
        let n: u32 = caps[2].parse().map_err( |_| invalid_grid_id!("invalid northing in {s:?}"))?;

        Self::new( level, e, n)
    }

    /// the 100km id of the cell that contains this one. This works on the textual id of both 50km
    /// and 20km cells (`E092N084` -> `E09N08`)
    pub fn parent_100km (&self) -> LaeaCellId {
        match self.level {
            LaeaLevel::Km100 => *self,
            _ => LaeaCellId { level: LaeaLevel::Km100, e: self.e / 10, n: self.n / 10 }
        }
    }

    /// all cells of the given finer level inside this 100km cell, easting index varying slowest
    pub fn children (&self, level: LaeaLevel) -> Result<Vec<LaeaCellId>> {
        if self.level != LaeaLevel::Km100 || level == LaeaLevel::Km100 {
            return Err( invalid_grid_id!("{self} has no {level} children"))
        }

        let step = level.step();
        let mut ids = Vec::new();
        for x in (0..10).step_by( step as usize) {
            for y in (0..10).step_by( step as usize) {
                ids.push( LaeaCellId { level, e: self.e * 10 + x, n: self.n * 10 + y });
            }
        }
        Ok(ids)
    }

    /// cell extent in EPSG:3035 meters
    pub fn extent (&self) -> BoundingBox<f64> {
        let unit = self.level.unit() as f64;
        let size = self.level.cell_size();
        let west = self.e as f64 * unit;
        let south = self.n as f64 * unit;
        BoundingBox::new( west, south, west + size, south + size)
    }

    pub fn polygon (&self, densify_step: Option<f64>) -> Polygon<f64> {
        bbox_polygon( &self.extent(), densify_step)
    }
}

impl fmt::Display for LaeaCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            LaeaLevel::Km100 => write!( f, "E{:02}N{:02}", self.e, self.n),
            _ => write!( f, "E{:03}N{:03}", self.e, self.n)
        }
    }
}

/// closed counter-clockwise ring around a bounding box. If `densify_step` is set we insert
/// equidistant vertices so that no segment is longer than the step
pub fn bbox_polygon (bbox: &BoundingBox<f64>, densify_step: Option<f64>) -> Polygon<f64> {
    let corners = [
        (bbox.west, bbox.south),
        (bbox.east, bbox.south),
        (bbox.east, bbox.north),
        (bbox.west, bbox.north),
    ];

    let mut coords = Vec::new();
    for i in 0..corners.len() {
        let (x0,y0) = corners[i];
        let (x1,y1) = corners[(i+1) % corners.len()];
        let len = ((x1-x0).powi(2) + (y1-y0).powi(2)).sqrt();

        let n_seg = match densify_step {
            Some(step) if step > 0.0 => (len / step).ceil().max(1.0) as usize,
            _ => 1
        };

        for j in 0..n_seg {
            let t = j as f64 / n_seg as f64;
            coords.push( coord!{ x: x0 + t*(x1-x0), y: y0 + t*(y1-y0) });
        }
    }
    coords.push( coord!{ x: bbox.west, y: bbox.south }); // close ring

    Polygon::new( LineString::new(coords), Vec::new())
}

/// enumerate the cells of a LAEA grid covering an inclusive range of 100km indices (northing
/// varying slowest), optionally restricted to cells that intersect a mask
pub fn create_laea_grid (level: LaeaLevel, e_range: RangeInclusive<u32>, n_range: RangeInclusive<u32>,
                         mask: Option<&MultiPolygon<f64>>, densify_step: Option<f64>) -> Result<Vec<(LaeaCellId,Polygon<f64>)>> {
    let mut cells = Vec::new();

    for n in n_range.clone() {
        for e in e_range.clone() {
            let id100 = LaeaCellId::new( LaeaLevel::Km100, e, n)?;
            let ids = if level == LaeaLevel::Km100 { vec![id100] } else { id100.children(level)? };

            for id in ids {
                let poly = id.polygon( densify_step);
                if mask.map( |m| m.intersects( &poly)).unwrap_or(true) {
                    cells.push( (id, poly) );
                }
            }
        }
    }

    Ok(cells)
}
