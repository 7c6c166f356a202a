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
use s2grid_common::laea_grid::{LaeaCellId, LaeaLevel};
use s2grid_assign::GridCrs;
use s2grid_assign::layers::{read_feature_collection, grid_cells_from_features};
use s2grid_assign::output::{parse_results_geojson, rollup_to_feature_collection, write_feature_collection};
use s2grid_assign::rollup::{check_rollup_consistency, rollup_tile_lists};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "aggregate 50km/20km Sentinel-2 tile assignments into the 100km LAEA grid")]
pub struct Args {
    /// GeoJSON assignment result of the 20km (or 50km) grid
    #[arg(long)]
    pub children: PathBuf,

    /// GeoJSON assignment result of the other child level to cross check against
    #[arg(long)]
    pub check: Option<PathBuf>,

    /// GeoJSON 100km grid whose cells define the parents and their order
    #[arg(long)]
    pub parents: Option<PathBuf>,

    /// id property of the parent grid features
    #[arg(long, default_value = "name")]
    pub parent_id_property: String,

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

    let parents: Option<Vec<LaeaCellId>> = match &args.parents {
        Some(path) => {
            let cells = grid_cells_from_features( &read_feature_collection( path)?, &args.parent_id_property)?;
            Some( cells.iter().map( |c| LaeaCellId::parse( &c.id, LaeaLevel::Km100)).collect::<Result<Vec<_>,_>>()?)
        }
        None => None
    };

    let children = parse_results_geojson( &std::fs::read_to_string( &args.children)?)?;
    let records = rollup_tile_lists( &children, parents.as_deref())?;
    info!("{} child cells rolled up into {} parent cells", children.len(), records.len());

    if let Some(path) = &args.check {
        let other = parse_results_geojson( &std::fs::read_to_string( path)?)?;
        let other_records = rollup_tile_lists( &other, parents.as_deref())?;
        check_rollup_consistency( &records, &other_records)?;
        println!("roll-ups of {:?} and {:?} are consistent", args.children, path);
    }

    let fc = if args.wgs84 {
        rollup_to_feature_collection( &records, args.densify, Some(&GridCrs::Laea3035))
    } else {
        rollup_to_feature_collection::<LonLat>( &records, args.densify, None)
    };
    write_feature_collection( BufWriter::new( File::create( &args.output)?), &fc)?;

    println!("{} parent cells written to {:?}", records.len(), args.output);
    Ok(())
}
