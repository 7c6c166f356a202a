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

//! reading grid cell and sensor tile layers from GeoJSON FeatureCollections

use std::path::Path;
use geo::{Area, Geometry, MultiPolygon};
use geojson::{Feature, FeatureCollection, GeoJson, feature::Id};
use serde_json::Value;
use tracing::debug;

use s2grid_common::mgrs::epsg_for_tile_id;
use crate::{AssignConfig, GridCell, SensorTile};
use crate::errors::{Result, invalid_input, invalid_geometry};

pub fn parse_feature_collection (s: &str) -> Result<FeatureCollection> {
    match s.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err( invalid_input!("GeoJSON is not a FeatureCollection"))
    }
}

pub fn read_feature_collection<P: AsRef<Path>> (path: P) -> Result<FeatureCollection> {
    let s = std::fs::read_to_string( path.as_ref())?;
    parse_feature_collection( &s)
}

/// string or integer property value as a string
pub fn property_string (feature: &Feature, key: &str) -> Option<String> {
    match feature.property( key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None
    }
}

/// integer property value, also accepting numeric strings such as "32631" or "EPSG:32631"
pub fn property_u32 (feature: &Feature, key: &str) -> Option<u32> {
    match feature.property( key)? {
        Value::Number(n) => n.as_u64().and_then( |v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().trim_start_matches("EPSG:").parse().ok(),
        _ => None
    }
}

// the id property, falling back to the feature id
fn feature_id (feature: &Feature, key: &str) -> Option<String> {
    property_string( feature, key).or_else( || match &feature.id {
        Some(Id::String(s)) => Some(s.clone()),
        Some(Id::Number(n)) => Some(n.to_string()),
        None => None
    })
}

/// the (multi) polygon geometry of a feature. Other geometry types and polygons without area
/// are rejected
pub fn feature_multipolygon (feature: &Feature, id: &str) -> Result<MultiPolygon<f64>> {
    let geometry = feature.geometry.as_ref().ok_or_else( || invalid_geometry!("feature {id} has no geometry"))?;

    let mp = match Geometry::<f64>::try_from( geometry.clone())? {
        Geometry::Polygon(poly) => MultiPolygon::new( vec![poly]),
        Geometry::MultiPolygon(mp) => mp,
        other => return Err( invalid_geometry!("feature {id} is not a polygon: {other:?}"))
    };

    if mp.0.is_empty() || mp.unsigned_area() <= 0.0 {
        return Err( invalid_geometry!("feature {id} has a degenerate polygon"))
    }

    Ok(mp)
}

pub fn grid_cells_from_features (fc: &FeatureCollection, id_property: &str) -> Result<Vec<GridCell>> {
    let mut cells = Vec::with_capacity( fc.features.len());

    for (i,feature) in fc.features.iter().enumerate() {
        let id = feature_id( feature, id_property).ok_or_else( || invalid_input!("grid feature {i} has no {id_property:?} property"))?;
        let geometry = feature_multipolygon( feature, &id)?;
        cells.push( GridCell { id, geometry });
    }

    debug!("read {} grid cells", cells.len());
    Ok(cells)
}

/// sensor tiles with their zone from `zone_property` (if set and present), otherwise derived from the tile id
pub fn sensor_tiles_from_features (fc: &FeatureCollection, id_property: &str, zone_property: Option<&str>) -> Result<Vec<SensorTile>> {
    let mut tiles = Vec::with_capacity( fc.features.len());

    for (i,feature) in fc.features.iter().enumerate() {
        let id = feature_id( feature, id_property).ok_or_else( || invalid_input!("tile feature {i} has no {id_property:?} property"))?;
        let geometry = feature_multipolygon( feature, &id)?;

        let zone = match zone_property.and_then( |key| property_u32( feature, key)) {
            Some(zone) => zone,
            None => epsg_for_tile_id( &id)?
        };

        tiles.push( SensorTile { id, geometry, zone });
    }

    debug!("read {} sensor tiles", tiles.len());
    Ok(tiles)
}

pub fn parse_grid_cells (s: &str, config: &AssignConfig) -> Result<Vec<GridCell>> {
    grid_cells_from_features( &parse_feature_collection(s)?, &config.grid_id_property)
}

pub fn parse_sensor_tiles (s: &str, config: &AssignConfig) -> Result<Vec<SensorTile>> {
    sensor_tiles_from_features( &parse_feature_collection(s)?, &config.tile_id_property, config.zone_property.as_deref())
}

pub fn read_grid_cells<P: AsRef<Path>> (path: P, config: &AssignConfig) -> Result<Vec<GridCell>> {
    grid_cells_from_features( &read_feature_collection( path)?, &config.grid_id_property)
}

pub fn read_sensor_tiles<P: AsRef<Path>> (path: P, config: &AssignConfig) -> Result<Vec<SensorTile>> {
    sensor_tiles_from_features( &read_feature_collection( path)?, &config.tile_id_property, config.zone_property.as_deref())
}

/// all polygons of a FeatureCollection merged into one multipolygon (e.g. a land mask)
pub fn parse_mask (s: &str) -> Result<MultiPolygon<f64>> {
    let fc = parse_feature_collection( s)?;
    let mut polygons = Vec::new();

    for (i,feature) in fc.features.iter().enumerate() {
        let mp = feature_multipolygon( feature, &format!("#{i}"))?;
        polygons.extend( mp.0);
    }

    if polygons.is_empty() {
        return Err( invalid_input!("mask has no polygons"))
    }
    Ok( MultiPolygon::new( polygons) )
}

pub fn read_mask<P: AsRef<Path>> (path: P) -> Result<MultiPolygon<f64>> {
    let s = std::fs::read_to_string( path.as_ref())?;
    parse_mask( &s)
}
