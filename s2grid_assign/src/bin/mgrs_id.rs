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

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use s2grid_common::mgrs::{grid100_id, grid20_id, mgrs_id, epsg_for_tile_id};
use s2grid_common::laea::{GeoProjection, LAEA_3035};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "show the Sentinel-2 (MGRS) tile and openEO grid ids of a position")]
pub struct Args {
    /// longitude in degrees
    #[arg(long, allow_hyphen_values=true)]
    pub lon: f64,

    /// latitude in degrees
    #[arg(long, allow_hyphen_values=true)]
    pub lat: f64,
}

fn main()->Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).try_init().ok();

    let args = Args::parse();

    let tile_id = mgrs_id( args.lon, args.lat)?;
    let (x,y) = LAEA_3035.from_lon_lat( args.lon, args.lat);

    println!("position:   {:.6}, {:.6}", args.lon, args.lat);
    println!("mgrs tile:  {}", tile_id);
    println!("epsg:       {}", epsg_for_tile_id( &tile_id)?);
    println!("grid100:    {}", grid100_id( args.lon, args.lat)?);
    println!("grid20:     {}", grid20_id( args.lon, args.lat)?);
    println!("laea 3035:  {:.3}, {:.3}", x, y);

    Ok(())
}
