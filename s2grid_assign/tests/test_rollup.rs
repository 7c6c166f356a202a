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

use s2grid_assign::*;
use s2grid_assign::errors::S2GridAssignError;
use s2grid_assign::output::rollup_to_feature_collection;
use s2grid_assign::rollup::*;
use s2grid_common::laea::LonLat;
use s2grid_common::laea_grid::{LaeaCellId, LaeaLevel};

fn matched (grid_id: &str, tiles: &[&str]) -> MatchResult {
    MatchResult {
        grid_id: grid_id.to_string(),
        match_kind: MatchKind::for_tile_count( tiles.len()).unwrap_or( MatchKind::Unresolved),
        primary_tile_id: None,
        tile_list: Some( tiles.iter().map( |s| s.to_string()).collect()),
    }
}

fn km100 (id: &str) -> LaeaCellId {
    LaeaCellId::parse( id, LaeaLevel::Km100).unwrap()
}

fn results_20km () -> Vec<MatchResult> {
    vec![
        matched( "E100N080", &["32TLR"]),
        matched( "E090N080", &["31TFJ"]),
        matched( "E092N080", &["31TGJ", "31TFJ"]),
        matched( "E098N088", &["31TGK"]),
        matched( "E102N084", &["32TLR", "32TMR"]),
    ]
}

fn results_50km () -> Vec<MatchResult> {
    vec![
        matched( "E090N080", &["31TFJ", "31TGJ"]),
        matched( "E095N085", &["31TGK"]),
        matched( "E100N080", &["32TMR", "32TLR"]),
    ]
}

#[test]
fn test_rollup () {
    let records = rollup_tile_lists( &results_20km(), None).unwrap();
    for r in &records { println!("{r:?}") }

    assert_eq!( records.len(), 2);
    assert_eq!( records[0].cell.to_string(), "E09N08");
    assert_eq!( records[0].tile_list, vec!["31TFJ", "31TGJ", "31TGK"]);
    assert_eq!( records[0].n_children, 3);
    assert_eq!( records[1].cell.to_string(), "E10N08");
    assert_eq!( records[1].tile_list, vec!["32TLR", "32TMR"]);
    assert_eq!( records[1].n_children, 2);

    // both child levels agree
    let records_50 = rollup_tile_lists( &results_50km(), None).unwrap();
    check_rollup_consistency( &records, &records_50).unwrap();
}

#[test]
fn test_inconsistent_rollup () {
    let records = rollup_tile_lists( &results_20km(), None).unwrap();

    let mut children = results_50km();
    children[2] = matched( "E100N080", &["32TLR"]);
    let other = rollup_tile_lists( &children, None).unwrap();
    match check_rollup_consistency( &records, &other) {
        Err(S2GridAssignError::InconsistentHierarchy(msg)) => println!("expected error: {msg}"),
        res => panic!("unexpected {res:?}")
    }

    children.pop();
    let other = rollup_tile_lists( &children, None).unwrap();
    assert!( matches!( check_rollup_consistency( &records, &other), Err(S2GridAssignError::InconsistentHierarchy(_))));
}

#[test]
fn test_rollup_with_parents () {
    let parents = vec![ km100("E10N08"), km100("E11N08"), km100("E09N08") ];

    let records = rollup_tile_lists( &results_20km(), Some(&parents)).unwrap();
    let names: Vec<String> = records.iter().map( |r| r.cell.to_string()).collect();
    assert_eq!( names, vec!["E10N08", "E11N08", "E09N08"]);
    assert!( records[1].tile_list.is_empty());
    assert_eq!( records[1].n_children, 0);

    // child outside of the parent grid
    let parents = vec![ km100("E09N08") ];
    assert!( matches!( rollup_tile_lists( &results_20km(), Some(&parents)), Err(S2GridAssignError::InconsistentHierarchy(_))));

    let parents = vec![ LaeaCellId::parse( "E090N080", LaeaLevel::Km50).unwrap() ];
    assert!( matches!( rollup_tile_lists( &results_20km(), Some(&parents)), Err(S2GridAssignError::InconsistentHierarchy(_))));
}

#[test]
fn test_invalid_children () {
    let mut children = results_20km();
    children.push( matched( "E09N08", &["31TFJ"]));
    assert!( matches!( rollup_tile_lists( &children, None), Err(S2GridAssignError::InconsistentHierarchy(_))));

    let mut children = results_20km();
    children.push( MatchResult::no_match( "E094N082"));
    assert!( matches!( rollup_tile_lists( &children, None), Err(S2GridAssignError::InvalidInput(_))));

    assert_eq!( child_cell_id( "E095N085").unwrap().level, LaeaLevel::Km50);
    assert_eq!( child_cell_id( "E094N082").unwrap().level, LaeaLevel::Km20);
}

#[test]
fn test_rollup_features () {
    let records = rollup_tile_lists( &results_20km(), None).unwrap();
    let fc = rollup_to_feature_collection::<LonLat>( &records, Some(250.0), None);

    assert_eq!( fc.features.len(), 2);
    let props = fc.features[0].properties.as_ref().unwrap();
    assert_eq!( props["name"], "E09N08");
    assert_eq!( props["tile_list"], "31TFJ,31TGJ,31TGK");
    assert_eq!( props["bbox"]["east"], 1000000.0);

    let geom: geo::Geometry<f64> = fc.features[0].geometry.clone().unwrap().try_into().unwrap();
    match geom {
        geo::Geometry::MultiPolygon(mp) => assert_eq!( mp.0[0].exterior().0.len(), 1601),
        other => panic!("unexpected geometry {other:?}")
    }
}
