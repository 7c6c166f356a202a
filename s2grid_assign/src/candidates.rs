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

//! bounding box based candidate selection of sensor tiles for grid cells

use std::collections::HashMap;
use geo::{BooleanOps, BoundingRect, MultiPolygon};
use rstar::{AABB, RTree, RTreeObject};
use tracing::debug;
use s2grid_common::BoundingBox;

use crate::{GridCell, SensorTile};
use crate::errors::{Result, invalid_geometry, invalid_input};

/// the bounding box of a (multi) polygon, `None` if it has no coordinates
pub fn geometry_bbox (geom: &MultiPolygon<f64>) -> Option<BoundingBox<f64>> {
    geom.bounding_rect().map( |r| BoundingBox::from_rect(&r))
}

/// smallest box containing all given boxes
pub fn bbox_union<'a,I> (bboxes: I) -> Option<BoundingBox<f64>> where I: IntoIterator<Item=&'a BoundingBox<f64>> {
    bboxes.into_iter().fold( None, |acc: Option<BoundingBox<f64>>, b| match acc {
        Some(u) => Some( BoundingBox::new( u.west.min(b.west), u.south.min(b.south), u.east.max(b.east), u.north.max(b.north))),
        None => Some(*b)
    })
}

/// merge tile rows that share an id (e.g. a tile split into several polygons) into one tile.
/// The merged tile keeps the position of its first row. All rows of a tile have to agree on the zone
pub fn merge_tile_rows (tiles: &[SensorTile]) -> Result<Vec<SensorTile>> {
    let mut merged: Vec<SensorTile> = Vec::with_capacity( tiles.len());
    let mut pos: HashMap<&str,usize> = HashMap::new();

    for tile in tiles {
        match pos.get( tile.id.as_str()) {
            Some(&i) => {
                let first = &mut merged[i];
                if first.zone != tile.zone {
                    return Err( invalid_input!("rows of sensor tile {} have different zones {} and {}", tile.id, first.zone, tile.zone))
                }
                debug!("merging split rows of sensor tile {}", tile.id);
                first.geometry = first.geometry.union( &tile.geometry);
            }
            None => {
                pos.insert( tile.id.as_str(), merged.len());
                merged.push( tile.clone());
            }
        }
    }

    Ok(merged)
}

// what we store in the R-tree: the tile index and its bounding box
#[derive(Debug,Clone)]
struct TileEnvelope {
    idx: usize,
    bbox: BoundingBox<f64>,
}

impl RTreeObject for TileEnvelope {
    type Envelope = AABB<[f64;2]>;

    fn envelope (&self) -> Self::Envelope {
        AABB::from_corners( [self.bbox.west, self.bbox.south], [self.bbox.east, self.bbox.north])
    }
}

/// spatial index over the sensor tile bounding boxes.
/// Query results are always reported in tile input order so that everything downstream
/// (subset enumeration, tie-break fallback) does not depend on R-tree internals
pub struct TileIndex<'a> {
    tiles: &'a [SensorTile],
    tree: RTree<TileEnvelope>,
}

impl <'a> TileIndex<'a> {
    pub fn new (tiles: &'a [SensorTile]) -> Result<Self> {
        let mut envelopes = Vec::with_capacity( tiles.len());
        for (idx,tile) in tiles.iter().enumerate() {
            let bbox = geometry_bbox( &tile.geometry).ok_or_else( || invalid_geometry!("sensor tile {} has empty geometry", tile.id))?;
            envelopes.push( TileEnvelope { idx, bbox });
        }

        Ok( TileIndex { tiles, tree: RTree::bulk_load( envelopes) } )
    }

    pub fn len (&self) -> usize { self.tiles.len() }

    pub fn is_empty (&self) -> bool { self.tiles.is_empty() }

    /// all tiles whose bounding box intersects (or touches) `bbox`, in input order
    pub fn intersecting (&self, bbox: &BoundingBox<f64>) -> Vec<&'a SensorTile> {
        let envelope = AABB::from_corners( [bbox.west, bbox.south], [bbox.east, bbox.north]);

        let mut idxs: Vec<usize> = self.tree.locate_in_envelope_intersecting( &envelope).map( |e| e.idx).collect();
        idxs.sort_unstable();

        idxs.into_iter().map( |i| &self.tiles[i]).collect()
    }

    /// the candidate set of a grid cell: tiles intersecting the padded cell bounding box
    pub fn candidates (&self, cell: &GridCell, padding: f64) -> Result<Vec<&'a SensorTile>> {
        let bbox = geometry_bbox( &cell.geometry).ok_or_else( || invalid_geometry!("grid cell {} has empty geometry", cell.id))?;
        Ok( self.intersecting( &bbox.padded( padding)) )
    }
}
