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

use s2grid_common::mgrs::*;

#[test]
fn test_mgrs_id () {
    let cases = [
        ((4.35, 50.85), "31UES"),  // Brussels
        ((2.35, 48.86), "31UDQ"),  // Paris
        ((-3.7, 40.4), "30TVK"),   // Madrid
        ((-70.5, -33.4), "19HCD"), // Santiago de Chile
        ((5.5, 60.0), "32VLM"),    // Norway exception
        ((20.0, 78.0), "33XXG"),   // Svalbard
        ((-175.0, 10.0), "01PGM"),
    ];

    for ((lon,lat),expected) in cases {
        let id = mgrs_id( lon, lat).unwrap();
        println!("  ({lon},{lat}) -> {id}");
        assert_eq!( id, expected);
    }

    assert!( mgrs_id( 0.0, -85.0).is_err());
}

#[test]
fn test_100k_letters_wrap () {
    // eastings below 100km wrap to the last column letter of the set
    assert_eq!( mgrs_100k_letters( 50_000.0, 0.0, 1), "HA");
    assert_eq!( mgrs_100k_letters( 150_000.0, 0.0, 2), "JF");
    assert_eq!( mgrs_100k_letters( 850_000.0, 2_050_000.0, 3), "ZA");
}

#[test]
fn test_grid_ids () {
    assert_eq!( grid100_id( 4.35, 50.85).unwrap(), "31σES");
    assert_eq!( grid20_id( 4.35, 50.85).unwrap(), "31σES41");
    assert_eq!( grid100_id( -70.5, -33.4).unwrap(), "19δCD");

    assert_eq!( epsg_for_grid_id( "31σES41").unwrap(), 32631);
    assert_eq!( epsg_for_grid_id( "19δCD").unwrap(), 32719);
    assert!( epsg_for_grid_id( "31UES").is_err());
}

#[test]
fn test_epsg_for_tile_id () {
    assert_eq!( epsg_for_tile_id( "31UFT").unwrap(), 32631);
    assert_eq!( epsg_for_tile_id( "32UFT").unwrap(), 32632);
    assert_eq!( epsg_for_tile_id( "19HCD").unwrap(), 32719);
    assert_eq!( epsg_for_tile_id( "01NAA").unwrap(), 32601);
    assert_eq!( epsg_for_tile_id( "01MAA").unwrap(), 32701);

    assert!( epsg_for_tile_id( "3").is_err());
    assert!( epsg_for_tile_id( "99UFT").is_err());
    assert!( epsg_for_tile_id( "31").is_err());
}
