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

/// Military Grid Reference System identifiers at 100km square resolution, which is what
/// Sentinel-2 uses as tile ids (e.g. "31UFT": zone 31, latitude band U, 100km square FT).
/// We also support the non-overlapping grid100/grid20 processing grid ids that replace the
/// latitude band letter with a 2000km northing letter.

use crate::utm::{self, UTM, UtmZone};
use crate::errors::{Result, S2GridCommonError, invalid_grid_id, out_of_range};

const M_100K: f64 = 100_000.0;
const M_20K: f64 = 20_000.0;
const M_2000K: f64 = 2_000_000.0;

// 100km column letters repeat every third zone (eastings start at 166km so index is E/100km - 1)
const COL_LETTERS: [&[u8;8];3] = [b"ABCDEFGH", b"JKLMNPQR", b"STUVWXYZ"];

// 100km row letters in odd zones start at 'A', in even zones at 'F'
const ROW_LETTERS: [&[u8;20];2] = [b"ABCDEFGHJKLMNPQRSTUV", b"FGHJKLMNPQRSTUVABCDE"];

// 2000km northing letters (ordered south to north)
const NORTH_2000K_LETTERS: [char;5] = ['λ','π','σ','τ','φ'];
const SOUTH_2000K_LETTERS: [char;5] = ['α','ß','Γ','δ','ε'];

/// the two letter 100km square designator for a UTM position in a given zone
pub fn mgrs_100k_letters (easting: f64, northing: f64, zone: u32) -> String {
    let e = (easting / M_100K).floor() as i64;
    let n = (northing / M_100K).floor() as i64;

    let cols = COL_LETTERS[ ((zone - 1) % 3) as usize ];
    let rows = ROW_LETTERS[ ((zone - 1) % 2) as usize ];

    let c = cols[ (e - 1).rem_euclid( cols.len() as i64) as usize ] as char;
    let r = rows[ n.rem_euclid( rows.len() as i64) as usize ] as char;

    let mut s = String::with_capacity(2);
    s.push(c);
    s.push(r);
    s
}

pub fn utm_to_mgrs_id (utm: &UTM) -> String {
    let UtmZone { zone, band } = utm.utm_zone;
    format!("{:02}{}{}", zone, band, mgrs_100k_letters( utm.easting, utm.northing, zone))
}

/// the 5 character MGRS (Sentinel-2 tile) id of a geographic position
pub fn mgrs_id (lon_deg: f64, lat_deg: f64) -> Result<String> {
    let utm = utm::geo_to_utm( lon_deg, lat_deg)?;
    Ok( utm_to_mgrs_id( &utm))
}

/// the 2000km northing letter that makes 100km squares unique within a zone
pub fn northing_2000k_letter (northing: f64, is_north: bool) -> Result<char> {
    let idx = (northing / M_2000K).floor();
    let letters = if is_north { &NORTH_2000K_LETTERS } else { &SOUTH_2000K_LETTERS };

    if idx >= 0.0 && (idx as usize) < letters.len() {
        Ok( letters[idx as usize])
    } else {
        Err( out_of_range!("northing {northing} outside of 2000km letter range"))
    }
}

pub fn utm_to_grid100_id (utm: &UTM) -> Result<String> {
    let UtmZone { zone, .. } = utm.utm_zone;
    let l2m = northing_2000k_letter( utm.northing, utm.utm_zone.is_north())?;
    Ok( format!("{:02}{}{}", zone, l2m, mgrs_100k_letters( utm.easting, utm.northing, zone)) )
}

/// grid100 id followed by the column/row (0..4) of the 20km sub-square
pub fn utm_to_grid20_id (utm: &UTM) -> Result<String> {
    let grid100_id = utm_to_grid100_id( utm)?;
    let e = (utm.easting.rem_euclid( M_100K) / M_20K).floor() as u32;
    let n = (utm.northing.rem_euclid( M_100K) / M_20K).floor() as u32;
    Ok( format!("{grid100_id}{e}{n}") )
}

pub fn grid100_id (lon_deg: f64, lat_deg: f64) -> Result<String> {
    utm_to_grid100_id( &utm::geo_to_utm( lon_deg, lat_deg)?)
}

pub fn grid20_id (lon_deg: f64, lat_deg: f64) -> Result<String> {
    utm_to_grid20_id( &utm::geo_to_utm( lon_deg, lat_deg)?)
}

fn parse_zone (id: &str) -> Result<u32> {
    let zone: u32 = id.get(0..2)
        .and_then( |s| s.parse().ok())
        .ok_or_else( || invalid_grid_id!("no zone number in {id:?}"))?;
    if zone == 0 || zone > 60 {
        return Err( invalid_grid_id!("zone {zone} of {id:?} out of range"))
    }
    Ok(zone)
}

/// EPSG code of the UTM zone a MGRS/Sentinel-2 tile id refers to
pub fn epsg_for_tile_id (tile_id: &str) -> Result<u32> {
    let zone = parse_zone( tile_id)?;
    let band = tile_id.chars().nth(2).ok_or_else( || invalid_grid_id!("no latitude band in {tile_id:?}"))?;
    if !band.is_ascii_uppercase() {
        return Err( invalid_grid_id!("invalid latitude band in {tile_id:?}"))
    }
    Ok( UtmZone { zone, band }.epsg() )
}

/// EPSG code of the UTM zone a grid100/grid20 id refers to
pub fn epsg_for_grid_id (grid_id: &str) -> Result<u32> {
    let zone = parse_zone( grid_id)?;
    let l2m = grid_id.chars().nth(2).ok_or_else( || invalid_grid_id!("no northing letter in {grid_id:?}"))?;

    if NORTH_2000K_LETTERS.contains(&l2m) {
        Ok( 32600 + zone)
    } else if SOUTH_2000K_LETTERS.contains(&l2m) {
        Ok( 32700 + zone)
    } else {
        Err( invalid_grid_id!("invalid northing letter in {grid_id:?}"))
    }
}
