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

use s2grid_common::utm::*;

// run with "cargo test -p s2grid_common --test test_utm -- --nocapture"

#[test]
fn test_zone_number () {
    assert_eq!( utm_zone_number( 4.35, 50.85), 31);
    assert_eq!( utm_zone_number( -175.0, 10.0), 1);
    assert_eq!( utm_zone_number( 179.9, 0.0), 60);
    assert_eq!( utm_zone_number( 180.0, 0.0), 1);

    // Norway
    assert_eq!( utm_zone_number( 5.5, 60.0), 32);
    assert_eq!( utm_zone_number( 5.5, 55.0), 31);

    // Svalbard
    assert_eq!( utm_zone_number( 8.0, 78.0), 31);
    assert_eq!( utm_zone_number( 20.0, 78.0), 33);
    assert_eq!( utm_zone_number( 25.0, 78.0), 35);
    assert_eq!( utm_zone_number( 40.0, 78.0), 37);
}

#[test]
fn test_latitude_band () {
    assert_eq!( utm_latitude_band( 50.85), Some('U'));
    assert_eq!( utm_latitude_band( -33.4), Some('H'));
    assert_eq!( utm_latitude_band( -80.0), Some('C'));
    assert_eq!( utm_latitude_band( 0.0), Some('N'));
    assert_eq!( utm_latitude_band( -0.1), Some('M'));
    assert_eq!( utm_latitude_band( 78.0), Some('X'));
    assert_eq!( utm_latitude_band( 84.0), Some('X'));
    assert_eq!( utm_latitude_band( 84.5), None);
    assert_eq!( utm_latitude_band( -80.5), None);
}

#[test]
fn test_geo_to_utm () {
    let utm = geo_to_utm( 4.35, 50.85).unwrap();
    println!("Brussels: {utm:?}");
    assert_eq!( utm.utm_zone, UtmZone { zone: 31, band: 'U' });
    assert_eq!( utm.utm_zone.epsg(), 32631);
    assert!( (utm.easting - 595032.29).abs() < 0.01);
    assert!( (utm.northing - 5634012.83).abs() < 0.01);

    // on the central meridian
    let utm = geo_to_utm( 9.0, 45.0).unwrap();
    assert!( (utm.easting - 500000.0).abs() < 1e-6);

    // southern hemisphere uses 10000km false northing
    let utm = geo_to_utm( 15.0, -30.0).unwrap();
    assert_eq!( utm.utm_zone.epsg(), 32733);
    assert!( (utm.northing - 6681214.65).abs() < 0.01);

    assert!( geo_to_utm( 0.0, 85.0).is_err());
}

#[test]
fn test_utm_round_trip () {
    for (lon,lat) in [(4.35, 50.85), (-70.5, -33.4), (15.0, -30.0), (-3.7, 40.4), (20.0, 78.0)] {
        let utm = geo_to_utm( lon, lat).unwrap();
        let (lon1,lat1) = utm_to_geo( &utm);
        println!("  ({lon},{lat}) -> {:.3},{:.3} -> ({lon1:.8},{lat1:.8})", utm.easting, utm.northing);
        assert!( (lon - lon1).abs() < 1e-6);
        assert!( (lat - lat1).abs() < 1e-6);
    }
}
