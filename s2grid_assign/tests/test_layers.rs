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
#![allow(unused)]

use geo::{Area, MultiPolygon};
use s2grid_assign::*;
use s2grid_assign::errors::S2GridAssignError;
use s2grid_assign::layers::*;
use s2grid_assign::output::*;
use s2grid_common::laea::LonLat;
use s2grid_common::laea_grid::{LaeaLevel, create_laea_grid};

const GRID: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": { "name": "E090N080" },
      "geometry": { "type": "Polygon", "coordinates": [[[20000,20000],[40000,20000],[40000,40000],[20000,40000],[20000,20000]]] } },
    { "type": "Feature", "properties": { "name": 4711 },
      "geometry": { "type": "MultiPolygon", "coordinates": [[[[95000,20000],[115000,20000],[115000,40000],[95000,40000],[95000,20000]]]] } },
    { "type": "Feature", "id": "far", "properties": {},
      "geometry": { "type": "Polygon", "coordinates": [[[500000,20000],[520000,20000],[520000,40000],[500000,40000],[500000,20000]]] } }
  ]
}"#;

const TILES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": { "tile_id": "31UFT", "epsg": 32631 },
      "geometry": { "type": "Polygon", "coordinates": [[[0,0],[110000,0],[110000,110000],[0,110000],[0,0]]] } },
    { "type": "Feature", "properties": { "tile_id": "32UFT" },
      "geometry": { "type": "Polygon", "coordinates": [[[100000,0],[210000,0],[210000,110000],[100000,110000],[100000,0]]] } }
  ]
}"#;

#[test]
fn test_read_layers () {
    let config = AssignConfig::default();

    let cells = parse_grid_cells( GRID, &config).unwrap();
    let ids: Vec<&str> = cells.iter().map( |c| c.id.as_str()).collect();
    assert_eq!( ids, vec!["E090N080", "4711", "far"]);
    assert_eq!( cells[0].geometry.unsigned_area(), 400_000_000.0);

    let tiles = parse_sensor_tiles( TILES, &config).unwrap();
    assert_eq!( tiles.len(), 2);
    assert_eq!( tiles[0].zone, 32631);
    assert_eq!( tiles[1].zone, 32632); // derived from the id

    let results = assign_tiles( &cells, &tiles, &MgrsOracle, &config).unwrap();
    let kinds: Vec<MatchKind> = results.iter().map( |r| r.match_kind).collect();
    assert_eq!( kinds, vec![MatchKind::Single, MatchKind::Double, MatchKind::NoMatch]);
}

#[test]
fn test_invalid_layers () {
    let config = AssignConfig::default();

    let point = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "name": "p" }, "geometry": { "type": "Point", "coordinates": [1,2] } } ] }"#;
    assert!( matches!( parse_grid_cells( point, &config), Err(S2GridAssignError::InvalidGeometry(_))));

    let flat = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "name": "f" },
          "geometry": { "type": "Polygon", "coordinates": [[[0,0],[10,0],[20,0],[0,0]]] } } ] }"#;
    assert!( matches!( parse_grid_cells( flat, &config), Err(S2GridAssignError::InvalidGeometry(_))));

    let no_id = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "other": "x" },
          "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]] } } ] }"#;
    assert!( matches!( parse_grid_cells( no_id, &config), Err(S2GridAssignError::InvalidInput(_))));

    let bad_tile_id = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "tile_id": "XYZ" },
          "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]] } } ] }"#;
    assert!( matches!( parse_sensor_tiles( bad_tile_id, &config), Err(S2GridAssignError::CommonError(_))));

    let feature = r#"{ "type": "Feature", "properties": {}, "geometry": null }"#;
    assert!( parse_feature_collection( feature).is_err());
    assert!( parse_feature_collection( "not json").is_err());
}

#[test]
fn test_zone_property () {
    let tiles = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "id": 17, "crs": "EPSG:32633" },
          "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]] } } ] }"#;
    let config = AssignConfig { tile_id_property: "id".to_string(), zone_property: Some("crs".to_string()), ..AssignConfig::default() };

    let tiles = parse_sensor_tiles( tiles, &config).unwrap();
    assert_eq!( tiles[0].id, "17");
    assert_eq!( tiles[0].zone, 32633);
}

#[test]
fn test_write_results () {
    let config = AssignConfig { output_mode: OutputMode::Wildcard, ..AssignConfig::default() };
    let cells = parse_grid_cells( GRID, &config).unwrap();
    let tiles = parse_sensor_tiles( TILES, &config).unwrap();
    let results = assign_tiles( &cells, &tiles, &MgrsOracle, &config).unwrap();

    // GeoJSON
    let mut buf: Vec<u8> = Vec::new();
    write_results_geojson( &mut buf, &cells, &results).unwrap();
    let s = String::from_utf8( buf).unwrap();
    println!("{s}");

    let fc = parse_feature_collection( &s).unwrap();
    assert_eq!( fc.features.len(), 3);
    let props = fc.features[1].properties.as_ref().unwrap();
    assert_eq!( props["grid_id"], "4711");
    assert_eq!( props["match_kind"], "double");
    assert!( !props.contains_key("match"));
    assert_eq!( props["primary_tile_id"], "3*UFT");
    assert_eq!( props["tile_list"], "31UFT,32UFT");
    assert!( fc.features[2].properties.as_ref().unwrap()["tile_list"].is_null());

    assert_eq!( parse_results_geojson( &s).unwrap(), results);

    // CSV
    let mut buf: Vec<u8> = Vec::new();
    write_results_csv( &mut buf, &results).unwrap();
    let s = String::from_utf8( buf).unwrap();
    println!("{s}");

    let lines: Vec<&str> = s.lines().collect();
    assert_eq!( lines[0], "grid_id,match_kind,primary_tile_id,tile_list");
    assert_eq!( lines[1], "E090N080,single,31UFT,31UFT");
    assert_eq!( lines[2], "4711,double,3*UFT,\"31UFT,32UFT\"");
    assert_eq!( lines[3], "far,no_match,,");

    assert_eq!( read_results_csv( s.as_bytes()).unwrap(), results);

    // results have to line up with the cells
    assert!( results_to_feature_collection( &cells[..2], &results).is_err());
}

/// accepts all writes but fails on flush, like a full disk behind a BufWriter
struct FlushFailure;

impl std::io::Write for FlushFailure {
    fn write (&mut self, buf: &[u8]) -> std::io::Result<usize> { Ok(buf.len()) }
    fn flush (&mut self) -> std::io::Result<()> { Err( std::io::Error::other("no space left on device")) }
}

#[test]
fn test_write_flush_errors () {
    let config = AssignConfig::default();
    let cells = parse_grid_cells( GRID, &config).unwrap();
    let results: Vec<MatchResult> = cells.iter().map( |c| MatchResult::no_match( &c.id)).collect();

    let res = write_results_geojson( FlushFailure, &cells, &results);
    println!("{res:?}");
    assert!( matches!( res, Err(S2GridAssignError::IOError(_))));

    let fc = results_to_feature_collection( &cells, &results).unwrap();
    assert!( matches!( write_feature_collection( FlushFailure, &fc), Err(S2GridAssignError::IOError(_))));
}

#[test]
fn test_grid_features () {
    let mask = parse_mask( r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": {},
          "geometry": { "type": "Polygon", "coordinates": [[[910000,810000],[930000,810000],[930000,830000],[910000,830000],[910000,810000]]] } } ] }"#).unwrap();

    let cells = create_laea_grid( LaeaLevel::Km50, 9..=10, 8..=8, Some(&mask), None).unwrap();
    assert_eq!( cells.len(), 1);

    let fc = laea_cells_to_feature_collection::<LonLat>( &cells, None);
    let props = fc.features[0].properties.as_ref().unwrap();
    assert_eq!( props["name"], "E090N080");
    assert_eq!( props["bbox"]["west"], 900000.0);
    assert_eq!( props["bbox"]["north"], 850000.0);
    assert_eq!( props["bbox"]["crs"], 3035);

    let fc = laea_cells_to_feature_collection( &cells, Some(&GridCrs::Laea3035));
    let geom: geo::Geometry<f64> = fc.features[0].geometry.clone().unwrap().try_into().unwrap();
    let bbox = geo::BoundingRect::bounding_rect( &geom).unwrap();
    println!("E090N080 in lon/lat: {bbox:?}");
    assert!( bbox.min().x > -25.0 && bbox.max().x < -22.0);
    assert!( bbox.min().y > 23.0 && bbox.max().y < 25.0);
}
