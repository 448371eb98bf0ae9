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

//! re-register a raster to the extent and projection of another raster

use std::path::{Path,PathBuf};
use pgis_common::fs::with_suffix;

use crate::{Dataset, GeoTransform, pixel_to_geo};
use crate::errors::Result;
use crate::programs::translate;

/// (ulx, uly, lrx, lry) of a raster with the given geotransform and size
pub fn corner_extent (gt: &GeoTransform, xsize: usize, ysize: usize) -> (f64,f64,f64,f64) {
    let (ulx,uly) = pixel_to_geo( gt, 0.0, 0.0);
    let (lrx,lry) = pixel_to_geo( gt, xsize as f64, ysize as f64);
    (ulx,uly,lrx,lry)
}

/// `<replica stem>_match.tif` in the directory of the replica
pub fn match_output_path (replica: &Path) -> PathBuf {
    with_suffix( replica, "_match", "tif")
}

pub fn match_args (extent: (f64,f64,f64,f64), projection: &str) -> Vec<String> {
    let (ulx,uly,lrx,lry) = extent;
    vec![
        "-of".to_string(), "GTiff".to_string(),
        "-a_ullr".to_string(), ulx.to_string(), uly.to_string(), lrx.to_string(), lry.to_string(),
        "-a_srs".to_string(), projection.to_string(),
    ]
}

/// assign the corner coordinates and projection of `primary` to a copy of `replica`. Returns the path of the copy
pub fn match_extents (primary: &Path, replica: &Path) -> Result<PathBuf> {
    let primary_ds = Dataset::open(primary)?;
    let gt = primary_ds.geo_transform()?;
    let (xsize,ysize) = primary_ds.raster_size();
    let extent = corner_extent( &gt, xsize, ysize);

    let out = match_output_path(replica);
    let replica_ds = Dataset::open(replica)?;
    translate( &replica_ds, &out, &match_args( extent, primary_ds.projection().as_str()))?;
    Ok(out)
}
