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

//! result tables: GeoJSON features joinable to the grid layer by `grid_id`, and CSV

use std::io::{Read, Write};
use geo::{MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, JsonObject};
use serde::{Serialize, Deserialize};
use serde_json::Value;

use s2grid_common::{BoundingBox, laea::{GeoProjection, geometry_to_lon_lat}, laea_grid::LaeaCellId};
use crate::{GridCell, MatchKind, MatchResult};
use crate::assigner::check_cardinality;
use crate::rollup::RollupRecord;
use crate::layers::{parse_feature_collection, property_string};
use crate::errors::{Result, invalid_input};

pub const GRID_ID: &str = "grid_id";
pub const MATCH_KIND: &str = "match_kind";
pub const PRIMARY_TILE_ID: &str = "primary_tile_id";
pub const TILE_LIST: &str = "tile_list";

fn optional_string (s: Option<String>) -> Value {
    s.map( Value::String).unwrap_or( Value::Null)
}

fn polygon_feature (geometry: geojson::Geometry, properties: JsonObject) -> Feature {
    Feature { bbox: None, geometry: Some(geometry), id: None, properties: Some(properties), foreign_members: None }
}

fn feature_collection (features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection { bbox: None, features, foreign_members: None }
}

pub fn result_properties (res: &MatchResult) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert( GRID_ID.to_string(), Value::String( res.grid_id.clone()));
    props.insert( MATCH_KIND.to_string(), Value::String( res.match_kind.to_string()));
    props.insert( PRIMARY_TILE_ID.to_string(), optional_string( res.primary_tile_id.clone()));
    props.insert( TILE_LIST.to_string(), optional_string( res.joined_tile_list()));
    props
}

/// one feature per grid cell with the cell geometry and the match properties
pub fn results_to_feature_collection (cells: &[GridCell], results: &[MatchResult]) -> Result<FeatureCollection> {
    check_cardinality( cells, results)?;

    let features = cells.iter().zip( results).map( |(cell,res)| {
        polygon_feature( geojson::Geometry::new( geojson::Value::from( &cell.geometry)), result_properties( res))
    }).collect();

    Ok( feature_collection( features) )
}

pub fn write_results_geojson<W: Write> (mut w: W, cells: &[GridCell], results: &[MatchResult]) -> Result<()> {
    let fc = results_to_feature_collection( cells, results)?;
    serde_json::to_writer( &mut w, &fc)?;
    w.flush()?;
    Ok(())
}

fn split_tile_list (s: &str) -> Vec<String> {
    s.split(',').map( |id| id.trim()).filter( |id| !id.is_empty()).map( |id| id.to_string()).collect()
}

/// read match results back from features written by [`write_results_geojson`]
pub fn results_from_feature_collection (fc: &FeatureCollection) -> Result<Vec<MatchResult>> {
    let mut results = Vec::with_capacity( fc.features.len());

    for (i,feature) in fc.features.iter().enumerate() {
        let grid_id = property_string( feature, GRID_ID).ok_or_else( || invalid_input!("result feature {i} has no {GRID_ID}"))?;
        let match_kind: MatchKind = property_string( feature, MATCH_KIND).ok_or_else( || invalid_input!("result {grid_id} has no {MATCH_KIND}"))?.parse()?;
        let primary_tile_id = property_string( feature, PRIMARY_TILE_ID);
        let tile_list = property_string( feature, TILE_LIST).map( |s| split_tile_list( &s));

        results.push( MatchResult { grid_id, match_kind, primary_tile_id, tile_list });
    }

    Ok(results)
}

pub fn parse_results_geojson (s: &str) -> Result<Vec<MatchResult>> {
    results_from_feature_collection( &parse_feature_collection( s)?)
}

#[derive(Debug,Serialize,Deserialize)]
struct ResultRow {
    grid_id: String,
    match_kind: MatchKind,
    primary_tile_id: Option<String>,
    tile_list: Option<String>,
}

/// CSV with columns `grid_id,match_kind,primary_tile_id,tile_list`. Null values are empty fields
pub fn write_results_csv<W: Write> (w: W, results: &[MatchResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer( w);
    for res in results {
        wtr.serialize( ResultRow {
            grid_id: res.grid_id.clone(),
            match_kind: res.match_kind,
            primary_tile_id: res.primary_tile_id.clone(),
            tile_list: res.joined_tile_list(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_results_csv<R: Read> (r: R) -> Result<Vec<MatchResult>> {
    let mut rdr = csv::Reader::from_reader( r);
    let mut results = Vec::new();

    for row in rdr.deserialize() {
        let row: ResultRow = row?;
        results.push( MatchResult {
            grid_id: row.grid_id,
            match_kind: row.match_kind,
            primary_tile_id: row.primary_tile_id,
            tile_list: row.tile_list.map( |s| split_tile_list( &s)),
        });
    }

    Ok(results)
}

/// `bbox` property of grid features: extent in the grid CRS plus its EPSG code
pub fn bbox_property (bbox: &BoundingBox<f64>, epsg: u32) -> Value {
    serde_json::json!({
        "west": bbox.west, "south": bbox.south, "east": bbox.east, "north": bbox.north, "crs": epsg
    })
}

/// LAEA grid cells as features with `name` and `bbox` properties. Geometries are reprojected
/// with `proj` if given (bbox stays in EPSG:3035)
pub fn laea_cells_to_feature_collection<P: GeoProjection> (cells: &[(LaeaCellId,Polygon<f64>)], proj: Option<&P>) -> FeatureCollection {
    let features = cells.iter().map( |(id,poly)| {
        let mut props = JsonObject::new();
        props.insert( "name".to_string(), Value::String( id.to_string()));
        props.insert( "bbox".to_string(), bbox_property( &id.extent(), 3035));

        let poly = match proj {
            Some(proj) => geometry_to_lon_lat( poly, proj),
            None => poly.clone()
        };
        polygon_feature( geojson::Geometry::new( geojson::Value::from( &poly)), props)
    }).collect();

    feature_collection( features)
}

/// features for rolled up 100km cells: `name`, `tile_list`, `bbox` and the cell polygon
pub fn rollup_to_feature_collection<P: GeoProjection> (records: &[RollupRecord], densify_step: Option<f64>, proj: Option<&P>) -> FeatureCollection {
    let features = records.iter().map( |rec| {
        let mut props = JsonObject::new();
        props.insert( "name".to_string(), Value::String( rec.cell.to_string()));
        props.insert( TILE_LIST.to_string(), Value::String( rec.tile_list.join(",")));
        props.insert( "bbox".to_string(), bbox_property( &rec.cell.extent(), 3035));

        let poly = rec.cell.polygon( densify_step);
        let poly = match proj {
            Some(proj) => geometry_to_lon_lat( &poly, proj),
            None => poly
        };
        polygon_feature( geojson::Geometry::new( geojson::Value::from( &MultiPolygon::new( vec![poly]))), props)
    }).collect();

    feature_collection( features)
}

pub fn write_feature_collection<W: Write> (mut w: W, fc: &FeatureCollection) -> Result<()> {
    serde_json::to_writer( &mut w, fc)?;
    w.flush()?;
    Ok(())
}
