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

use s2grid_assign::{AssignConfig, MgrsOracle, OutputMode, assign_tiles, load_config_path};
use s2grid_assign::assigner::count_by_kind;
use s2grid_assign::layers::{read_grid_cells, read_sensor_tiles};
use s2grid_assign::output::{write_results_csv, write_results_geojson};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "assign the Sentinel-2 tiles needed to fully cover each cell of a grid")]
pub struct Args {
    /// GeoJSON with the grid cell polygons
    #[arg(long)]
    pub grid: PathBuf,

    /// GeoJSON with the Sentinel-2 tile polygons (same CRS as the grid)
    #[arg(long)]
    pub tiles: PathBuf,

    /// RON assignment config (defaults are used if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// report multi tile matches also as a generalized wildcard tile id
    #[arg(short,long)]
    pub wildcard: bool,

    /// GeoJSON output path
    #[arg(short,long)]
    pub output: PathBuf,

    /// optional CSV output path
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

fn main()->Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).try_init().ok();

    let args = Args::parse();

    let mut config: AssignConfig = match &args.config {
        Some(path) => load_config_path( path)?,
        None => AssignConfig::default()
    };
    if args.wildcard { config.output_mode = OutputMode::Wildcard }

    let cells = read_grid_cells( &args.grid, &config)?;
    let tiles = read_sensor_tiles( &args.tiles, &config)?;

    let results = assign_tiles( &cells, &tiles, &MgrsOracle, &config)?;

    write_results_geojson( BufWriter::new( File::create( &args.output)?), &cells, &results)?;
    info!("results written to {:?}", args.output);

    if let Some(path) = &args.csv {
        write_results_csv( BufWriter::new( File::create( path)?), &results)?;
        info!("results written to {:?}", path);
    }

    println!("{} grid cells:", cells.len());
    for (kind,n) in count_by_kind( &results) {
        println!("  {:>10}: {}", kind.as_str(), n);
    }

    Ok(())
}
