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

use std::{fs::File, io::BufWriter, path::PathBuf};
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use s2grid_common::laea::LonLat;
use s2grid_common::laea_grid::{LaeaLevel, EU_100KM_E_RANGE, EU_100KM_N_RANGE, create_laea_grid};
use s2grid_assign::GridCrs;
use s2grid_assign::layers::read_mask;
use s2grid_assign::output::{laea_cells_to_feature_collection, write_feature_collection};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "create an ETRS89-LAEA (EPSG:3035) tiling grid as GeoJSON")]
pub struct Args {
    /// grid resolution: 100, 50 or 20 (km)
    #[arg(short,long, default_value = "100")]
    pub level: LaeaLevel,

    #[arg(long, default_value_t = *EU_100KM_E_RANGE.start())]
    pub e_min: u32,

    #[arg(long, default_value_t = *EU_100KM_E_RANGE.end())]
    pub e_max: u32,

    #[arg(long, default_value_t = *EU_100KM_N_RANGE.start())]
    pub n_min: u32,

    #[arg(long, default_value_t = *EU_100KM_N_RANGE.end())]
    pub n_max: u32,

    /// GeoJSON with (EPSG:3035) polygons. Only cells intersecting them are kept
    #[arg(short,long)]
    pub mask: Option<PathBuf>,

    /// insert edge vertices every <densify> meters
    #[arg(short,long, num_args=0..=1, default_missing_value = "250")]
    pub densify: Option<f64>,

    /// write geometries in EPSG:4326 instead of EPSG:3035
    #[arg(long)]
    pub wgs84: bool,

    /// GeoJSON output path
    #[arg(short,long)]
    pub output: PathBuf,
}

fn main()->Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).try_init().ok();

    let args = Args::parse();

    let mask = match &args.mask {
        Some(path) => Some( read_mask( path)?),
        None => None
    };

    let cells = create_laea_grid( args.level, args.e_min..=args.e_max, args.n_min..=args.n_max, mask.as_ref(), args.densify)?;
    info!("created {} {} cells (densify step {:?})", cells.len(), args.level, args.densify);

    let fc = if args.wgs84 {
        laea_cells_to_feature_collection( &cells, Some(&GridCrs::Laea3035))
    } else {
        laea_cells_to_feature_collection::<LonLat>( &cells, None)
    };
    write_feature_collection( BufWriter::new( File::create( &args.output)?), &fc)?;

    println!("{} {} cells written to {:?}", cells.len(), args.level, args.output);
    Ok(())
}
