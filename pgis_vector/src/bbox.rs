/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

//! envelopes of WKT geometries or vector datasets as WKT polygons

use std::path::Path;
use gdal::Dataset;
use gdal::vector::{Geometry, LayerAccess, OGRwkbGeometryType};
use pgis_common::BoundingBox;

use crate::errors::{Result, invalid_input};

pub fn geometry_bbox (geom: &Geometry) -> BoundingBox<f64> {
    let env = geom.envelope();
    BoundingBox::new( env.MinX, env.MinY, env.MaxX, env.MaxY)
}

/// union of the extents of all layers in a vector dataset
pub fn dataset_bbox (path: &Path) -> Result<BoundingBox<f64>> {
    let ds = Dataset::open(path)?;
    let mut bbox: Option<BoundingBox<f64>> = None;

    for layer in ds.layers() {
        if layer.feature_count() == 0 { continue }
        let env = layer.get_extent()?;
        let bb = BoundingBox::new( env.MinX, env.MinY, env.MaxX, env.MaxY);
        bbox = Some( match bbox { Some(b) => b.union(&bb), None => bb });
    }
    bbox.ok_or_else( || invalid_input( format!("no features in {}", path.display())))
}

/// the closed ring (minx miny,maxx miny,maxx maxy,minx maxy,minx miny) as WKT polygon
pub fn bbox_polygon_wkt (bbox: &BoundingBox<f64>) -> Result<String> {
    let mut ring = Geometry::empty( OGRwkbGeometryType::wkbLinearRing)?;
    for p in bbox.ring() {
        ring.add_point_2d(p);
    }
    let mut poly = Geometry::empty( OGRwkbGeometryType::wkbPolygon)?;
    poly.add_geometry(ring)?;
    Ok( poly.wkt()?)
}

pub fn wkt_bbox (wkt: &str) -> Result<BoundingBox<f64>> {
    let geom = Geometry::from_wkt(wkt)?;
    Ok( geometry_bbox(&geom))
}

/// `input` is either the path of a vector dataset or a WKT geometry
pub fn bbox_wkt (input: &str) -> Result<String> {
    let path = Path::new(input);
    let bbox = if path.is_file() { dataset_bbox(path)? } else { wkt_bbox(input)? };
    bbox_polygon_wkt(&bbox)
}
