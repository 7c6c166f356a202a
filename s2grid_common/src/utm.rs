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
#![allow(non_snake_case)]

use serde::{Deserialize, Serialize};

use crate::*;
use crate::errors::{Result, S2GridCommonError, out_of_range};

// no 'I' or 'O' bands, 'X' is extended to 84°N
const LAT_BAND: [char;21] = ['C','D','E','F','G','H','J','K','L','M','N','P','Q','R','S','T','U','V','W','X','X'];

#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq,Eq,Hash)]
pub struct UtmZone {
    pub zone: u32,
    pub band: char,
}

impl UtmZone {
    pub fn is_north(&self) -> bool { self.band >= 'N' }
    pub fn central_meridian(&self) -> f64 { -180.0 + (self.zone as f64)*6.0 - 3.0 }

    /// the WGS84 / UTM EPSG code (326xx north, 327xx south)
    pub fn epsg(&self) -> u32 {
        if self.is_north() { 32600 + self.zone } else { 32700 + self.zone }
    }
}

#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct UTM {
    pub easting: f64,
    pub northing: f64,
    pub utm_zone: UtmZone,
}

/// the UTM zone number for a geographic position, including the Norway and Svalbard exceptions
pub fn utm_zone_number (lon_deg: f64, lat_deg: f64) -> u32 {
    if lat_deg >= 56.0 && lat_deg < 64.0 && lon_deg >= 3.0 && lon_deg < 12.0 {
        return 32
    }

    if lat_deg >= 72.0 && lat_deg <= 84.0 && lon_deg >= 0.0 {
        if lon_deg < 9.0 { return 31 }
        if lon_deg < 21.0 { return 33 }
        if lon_deg < 33.0 { return 35 }
        if lon_deg < 42.0 { return 37 }
    }

    ((((lon_deg + 180.0) / 6.0).floor() as i64).rem_euclid(60) as u32) + 1
}

/// MGRS latitude band letter, None outside of [-80,84]
pub fn utm_latitude_band (lat_deg: f64) -> Option<char> {
    if lat_deg >= -80.0 && lat_deg <= 84.0 {
        Some( LAT_BAND[ ((lat_deg + 80.0) as usize) >> 3 ] )
    } else {
        None
    }
}

pub fn utm_zone (lon_deg: f64, lat_deg: f64) -> Option<UtmZone> {
    utm_latitude_band( lat_deg).map( |band| UtmZone { zone: utm_zone_number( lon_deg, lat_deg), band })
}

// Krueger approximation - see https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system
pub fn geo_to_utm_zone (lon_deg: f64, lat_deg: f64, utm_zone: UtmZone) -> Result<UTM> {
    // let a = 6378.137
    // let f = 0.0033528106647474805 // 1.0/298.257223563
    // let n = 0.0016792203863837047 // f / (2.0 - f)
    // let A = 6367.449145823416 // (a / (1.0 + n)) * (1 + n2/4.0 + n4/64.0)
    let α1 = 8.377318188192541E-4; // n/2.0 - (2.0/3.0)*n2 + (5.0/16.0)*n3
    let α2 = 7.608496958699166E-7; // (13.0/48.0)*n2 - (3.0/5.0)*n3
    let α3 = 1.2034877875966646E-9; // (61.0/240.0)*n3
    let C = 0.08181919084262149; // (2.0*sqrt(n)) / (1.0 + n)
    let D = 6364.902166165087; // k0 * A with k0 = 0.9996
    let E0 = 500.0;

    if lat_deg < -80.0 || lat_deg > 84.0 {
        return Err( out_of_range!("latitude {lat_deg} outside of UTM coverage"))
    }

    let φ = lat_deg.to_radians();
    let λ = lon_deg.to_radians();
    let λ0 = utm_zone.central_meridian().to_radians();
    let dλ = λ - λ0;
    let N0 = if utm_zone.is_north() { 0.0 } else { 10000.0 };

    let sin_φ = sin(φ);
    let t = sinh( atanh(sin_φ) - C * atanh( C*sin_φ));

    let ξ = atan( t/cos(dλ));
    let ξ2 = ξ * 2.0;
    let ξ4 = ξ * 4.0;
    let ξ6 = ξ * 6.0;

    let η = atanh( sin(dλ) / sqrt(1.0 + t*t));
    let η2 = η * 2.0;
    let η4 = η * 4.0;
    let η6 = η * 6.0;

    let easting = (E0 + D*(η + (α1 * cos(ξ2)*sinh(η2)) + (α2 * cos(ξ4)*sinh(η4)) + (α3 * cos(ξ6)*sinh(η6)))) * 1000.0;
    let northing = (N0 + D*(ξ + (α1 * sin(ξ2)*cosh(η2)) + (α2 * sin(ξ4)*cosh(η4)) + (α3 * sin(ξ6)*cosh(η6)))) * 1000.0;

    Ok( UTM {easting, northing, utm_zone} )
}

pub fn geo_to_utm (lon_deg: f64, lat_deg: f64) -> Result<UTM> {
    let utm_zone = utm_zone( lon_deg, lat_deg).ok_or_else( || out_of_range!("latitude {lat_deg} outside of UTM coverage"))?;
    geo_to_utm_zone( lon_deg, lat_deg, utm_zone)
}

/// inverse Krueger series, returns (lon,lat) in degrees
pub fn utm_to_geo (utm: &UTM) -> (f64,f64) {
    let UTM { easting, northing, utm_zone} = utm;
    let N = northing / 1000.0;
    let E = easting / 1000.0;

    let k0_A = 6364.902166165086634;
    let β1 = 0.000837732164082144;
    let β2 = 0.00000005906110863719917;
    let β3 = 0.00000000016769911794379754;
    let δ1 = 0.003356551448628875;
    let δ2 = 0.000006571913193172695;
    let δ3 = 0.0000000176774599620756;

    let E0 = 500.0;
    let N0 = if utm_zone.is_north() { 0.0 } else { 10000.0 };

    let ξ = (N - N0)/k0_A;
    let ξ2 = ξ * 2.0;
    let ξ4 = ξ * 4.0;
    let ξ6 = ξ * 6.0;

    let η = (E - E0)/k0_A;
    let η2 = η * 2.0;
    let η4 = η * 4.0;
    let η6 = η * 6.0;

    let ξʹ = ξ - ((β1*sin(ξ2)*cosh(η2)) + (β2*sin(ξ4)*cosh(η4)) + (β3*sin(ξ6)*cosh(η6)));
    let ηʹ = η - ((β1*cos(ξ2)*sinh(η2)) + (β2*cos(ξ4)*sinh(η4)) + (β3*cos(ξ6)*sinh(η6)));

    let χ = asin( sin(ξʹ) / cosh(ηʹ));

    let φ = χ + (δ1*sin(2.0*χ)) + (δ2*sin(4.0*χ)) + (δ3*sin(6.0*χ));
    let λ0 = utm_zone.central_meridian().to_radians();
    let λ = λ0 + atan( sinh(ηʹ)/cos(ξʹ));

    (λ.to_degrees(), φ.to_degrees())
}
