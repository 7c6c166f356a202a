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
#![allow(uncommon_codepoints)]

use std::path::Path;
use serde::{Serialize,Deserialize};
use num::{Num,ToPrimitive};

pub mod errors;
pub mod utm;
pub mod mgrs;
pub mod laea;
pub mod laea_grid;

use errors::Result;

// syntactic sugar - this is just more readable in the projection formulas
#[inline(always)] pub fn sin(x:f64) -> f64 { x.sin() }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn sinh(x:f64) -> f64 { x.sinh() }
#[inline(always)] pub fn cosh(x:f64) -> f64 { x.cosh() }
#[inline(always)] pub fn asin(x:f64) -> f64 {x.asin() }
#[inline(always)] pub fn atan(x:f64) -> f64 { x.atan() }
#[inline(always)] pub fn atan2(y:f64,x:f64) -> f64 { y.atan2(x) }
#[inline(always)] pub fn atanh(x:f64) -> f64 { x.atanh() }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn pow2(x:f64) -> f64 { x*x }

/// a generic bounding box without semantics for the coordinate type
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy + PartialOrd + ToPrimitive> BoundingBox<T> {
    pub fn new(west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north}
    }

    pub fn from_wsen<N> (wsen: &[N;4]) -> BoundingBox<T> where N: Num + Copy + Into<T> {
        BoundingBox::<T>{
            west: wsen[0].into(),
            south: wsen[1].into(),
            east: wsen[2].into(),
            north: wsen[3].into()
        }
    }

    pub fn to_minmax_array (&self) -> [T;4] {
        [self.west,self.south,self.east,self.north]
    }

    /// grow the box by `d` on each side
    pub fn padded (&self, d: T) -> BoundingBox<T> {
        BoundingBox{ west: self.west - d, south: self.south - d, east: self.east + d, north: self.north + d }
    }

    /// closed interval semantics - touching boxes do intersect
    pub fn intersects (&self, other: &BoundingBox<T>) -> bool {
        self.west <= other.east && other.west <= self.east && self.south <= other.north && other.south <= self.north
    }

    pub fn contains_box (&self, other: &BoundingBox<T>) -> bool {
        self.west <= other.west && self.south <= other.south && self.east >= other.east && self.north >= other.north
    }

    pub fn center (&self) -> (f64,f64) {
        let w = self.west.to_f64().unwrap_or(f64::NAN);
        let s = self.south.to_f64().unwrap_or(f64::NAN);
        let e = self.east.to_f64().unwrap_or(f64::NAN);
        let n = self.north.to_f64().unwrap_or(f64::NAN);
        ( (w + e) / 2.0, (s + n) / 2.0 )
    }
}

impl BoundingBox<f64> {
    pub fn from_rect (rect: &geo::Rect<f64>) -> Self {
        BoundingBox { west: rect.min().x, south: rect.min().y, east: rect.max().x, north: rect.max().y }
    }

    pub fn to_rect (&self) -> geo::Rect<f64> {
        geo::Rect::new( geo::coord!{ x: self.west, y: self.south}, geo::coord!{ x: self.east, y: self.north})
    }
}

/// load a RON serialized config from the given path
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = std::fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}
