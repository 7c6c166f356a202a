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

/// Lambert Azimuthal Equal Area projection (ellipsoidal form, IOGP guidance note 7-2 method 9820)
/// and the projection abstraction used to get geographic coordinates for planar grid positions.
/// ETRS89-LAEA Europe (EPSG:3035) is the CRS of the European tiling grids.

use std::f64::consts::FRAC_PI_2;
use geo::{Coord, MapCoords, coord};
use lazy_static::lazy_static;

use crate::*;

/// a planar CRS we can convert to and from WGS84 geographic coordinates (degrees, lon/lat order)
pub trait GeoProjection {
    fn epsg (&self) -> u32;
    fn to_lon_lat (&self, x: f64, y: f64) -> (f64,f64);
    fn from_lon_lat (&self, lon_deg: f64, lat_deg: f64) -> (f64,f64);
}

impl <P: GeoProjection + ?Sized> GeoProjection for &P {
    fn epsg (&self) -> u32 { (**self).epsg() }
    fn to_lon_lat (&self, x: f64, y: f64) -> (f64,f64) { (**self).to_lon_lat(x,y) }
    fn from_lon_lat (&self, lon_deg: f64, lat_deg: f64) -> (f64,f64) { (**self).from_lon_lat(lon_deg,lat_deg) }
}

/// reproject all coordinates of a geometry from the planar CRS into lon/lat degrees
pub fn geometry_to_lon_lat<G,P> (geom: &G, proj: &P) -> G::Output where G: MapCoords<f64,f64>, P: GeoProjection {
    geom.map_coords( |c: Coord<f64>| {
        let (x,y) = proj.to_lon_lat( c.x, c.y);
        coord!{ x: x, y: y}
    })
}

/// reproject all lon/lat degree coordinates of a geometry into the planar CRS
pub fn geometry_from_lon_lat<G,P> (geom: &G, proj: &P) -> G::Output where G: MapCoords<f64,f64>, P: GeoProjection {
    geom.map_coords( |c: Coord<f64>| {
        let (x,y) = proj.from_lon_lat( c.x, c.y);
        coord!{ x: x, y: y}
    })
}

/// identity projection for layers that already are in EPSG:4326
#[derive(Debug,Clone,Copy,Default)]
pub struct LonLat;

impl GeoProjection for LonLat {
    fn epsg (&self) -> u32 { 4326 }
    fn to_lon_lat (&self, x: f64, y: f64) -> (f64,f64) { (x,y) }
    fn from_lon_lat (&self, lon_deg: f64, lat_deg: f64) -> (f64,f64) { (lon_deg,lat_deg) }
}

#[derive(Debug,Clone)]
pub struct LambertAzimuthalEqualArea {
    epsg: u32,
    e: f64,
    e2: f64,
    λ0: f64,
    FE: f64,
    FN: f64,

    // derived constants
    qP: f64,
    β0: f64,
    Rq: f64,
    D: f64,
}

lazy_static! {
    pub static ref LAEA_3035: LambertAzimuthalEqualArea = LambertAzimuthalEqualArea::etrs89_laea_europe();
}

impl LambertAzimuthalEqualArea {
    pub fn new (epsg: u32, a: f64, inv_f: f64, lat0_deg: f64, lon0_deg: f64, false_easting: f64, false_northing: f64) -> Self {
        let f = 1.0 / inv_f;
        let e2 = 2.0*f - f*f;
        let e = sqrt(e2);
        let φ0 = lat0_deg.to_radians();

        let qP = q( FRAC_PI_2, e, e2);
        let q0 = q( φ0, e, e2);
        let β0 = asin( q0/qP);
        let Rq = a * sqrt( qP/2.0);
        let D = a * (cos(φ0) / sqrt( 1.0 - e2*pow2(sin(φ0)))) / (Rq * cos(β0));

        LambertAzimuthalEqualArea { epsg, e, e2, λ0: lon0_deg.to_radians(), FE: false_easting, FN: false_northing, qP, β0, Rq, D }
    }

    /// EPSG:3035 - GRS80 ellipsoid, natural origin at 52°N 10°E
    pub fn etrs89_laea_europe () -> Self {
        Self::new( 3035, 6378137.0, 298.257222101, 52.0, 10.0, 4321000.0, 3210000.0)
    }
}

fn q (φ: f64, e: f64, e2: f64) -> f64 {
    let sin_φ = sin(φ);
    (1.0 - e2) * ( (sin_φ / (1.0 - e2*sin_φ*sin_φ)) - (1.0/(2.0*e)) * ((1.0 - e*sin_φ)/(1.0 + e*sin_φ)).ln() )
}

impl GeoProjection for LambertAzimuthalEqualArea {
    fn epsg (&self) -> u32 { self.epsg }

    fn from_lon_lat (&self, lon_deg: f64, lat_deg: f64) -> (f64,f64) {
        let φ = lat_deg.to_radians();
        let dλ = lon_deg.to_radians() - self.λ0;

        let β = asin( (q( φ, self.e, self.e2) / self.qP).clamp(-1.0, 1.0));
        let (sin_β0, cos_β0) = self.β0.sin_cos();
        let (sin_β, cos_β) = β.sin_cos();

        let B = self.Rq * sqrt( 2.0 / (1.0 + sin_β0*sin_β + cos_β0*cos_β*cos(dλ)));

        let x = self.FE + (B * self.D) * (cos_β * sin(dλ));
        let y = self.FN + (B / self.D) * (cos_β0*sin_β - sin_β0*cos_β*cos(dλ));
        (x,y)
    }

    fn to_lon_lat (&self, x: f64, y: f64) -> (f64,f64) {
        let dx = (x - self.FE) / self.D;
        let dy = (y - self.FN) * self.D;
        let ρ = sqrt( dx*dx + dy*dy);

        if ρ == 0.0 {
            return ( self.λ0.to_degrees(), (self.β0 + authalic_correction( self.β0, self.e2)).to_degrees() )
        }

        let C = 2.0 * asin( ρ / (2.0 * self.Rq));
        let (sin_β0, cos_β0) = self.β0.sin_cos();
        let (sin_C, cos_C) = C.sin_cos();

        let βʹ = asin( cos_C*sin_β0 + (dy*sin_C*cos_β0)/ρ);
        let λ = self.λ0 + atan2( dx*sin_C, ρ*cos_β0*cos_C - dy*sin_β0*sin_C);
        let φ = βʹ + authalic_correction( βʹ, self.e2);

        (λ.to_degrees(), φ.to_degrees())
    }
}

// series to get from authalic to geodetic latitude
fn authalic_correction (β: f64, e2: f64) -> f64 {
    let e4 = e2*e2;
    let e6 = e4*e2;
    (e2/3.0 + 31.0*e4/180.0 + 517.0*e6/5040.0) * sin(2.0*β)
        + (23.0*e4/360.0 + 251.0*e6/3780.0) * sin(4.0*β)
        + (761.0*e6/45360.0) * sin(6.0*β)
}
