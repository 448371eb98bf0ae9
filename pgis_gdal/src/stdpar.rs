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

//! change the latitude of true scale of Equirectangular rasters without resampling, and split global
//! mosaics into latitude bands with local standard parallels

use std::path::{Path,PathBuf};
use tracing::info;
use pgis_common::fs::strip_extension;

use crate::{Dataset, GeoTransform, SpatialRef, CoordTransform, new_geotransform, transform_point_2d, geographic_srs,
            set_traditional_axis_order, get_driver};
use crate::errors::{Result, misc_error};
use crate::programs::{translate, warp};

/// the geotransform of the re-registered raster: new origin and x cell size, everything else unchanged
pub fn shifted_geotransform (gt: &GeoTransform, newminx: f64, newmaxx: f64, xsize: usize) -> GeoTransform {
    let newcellsizex = (newmaxx - newminx) / xsize as f64;
    new_geotransform( newminx, newcellsizex, gt[2], gt[3], gt[4], gt[5])
}

#[derive(Debug,Clone)]
pub struct StdParallelShift {
    pub clat: f64,
    pub minx: f64,
    pub newminx: f64,
    pub cellsize_x: f64,
    pub cellsize_y: f64,
    pub new_cellsize_x: f64,
    pub geotransform: GeoTransform,
    pub wkt: String,
}

pub fn is_equirectangular (srs: &SpatialRef) -> bool {
    match srs.get_attr_value("PROJECTION", 0) {
        Ok(Some(proj)) => proj.eq_ignore_ascii_case("Equirectangular"),
        _ => false
    }
}

/// compute the new SRS and geotransform of `ds` for a standard parallel at `clat`
pub fn std_parallel_shift (ds: &Dataset, clat: f64) -> Result<StdParallelShift> {
    let gt = ds.geo_transform()?;
    let (xsize,_) = ds.raster_size();

    let srs = ds.spatial_ref()?;
    set_traditional_axis_order(&srs);
    if !is_equirectangular(&srs) {
        return Err( misc_error("input raster is not in an Equirectangular projection"))
    }

    let maxy = gt[3];
    let minx = gt[0];
    let maxx = minx + gt[1] * xsize as f64;

    let geog = geographic_srs(&srs)?;
    let to_geo = CoordTransform::new( &srs, &geog)?;
    let (lon1,lat1) = transform_point_2d( &to_geo, minx, maxy)?;
    let (lon2,lat2) = transform_point_2d( &to_geo, maxx, maxy)?;

    let mut new_srs = srs.clone();
    new_srs.set_proj_param( "standard_parallel_1", clat)?;
    set_traditional_axis_order(&new_srs);

    let from_geo = CoordTransform::new( &geog, &new_srs)?;
    let (newminx,_) = transform_point_2d( &from_geo, lon1, lat1)?;
    let (newmaxx,_) = transform_point_2d( &from_geo, lon2, lat2)?;

    let geotransform = shifted_geotransform( &gt, newminx, newmaxx, xsize);

    Ok( StdParallelShift {
        clat, minx, newminx,
        cellsize_x: gt[1],
        cellsize_y: -gt[5],
        new_cellsize_x: geotransform[1],
        geotransform,
        wkt: new_srs.to_wkt()?,
    })
}

/// copy `src` into `dst` (of the given GDAL format) and assign the standard parallel shifted projection
pub fn new_standard_parallel (src: &Path, dst: &Path, format: &str, clat: f64) -> Result<StdParallelShift> {
    get_driver(format).map_err( |_| misc_error( format!("\"{format}\" driver not registered.")))?;

    let ds = Dataset::open(src)?;
    let shift = std_parallel_shift( &ds, clat)?;

    let mut out = translate( &ds, dst, &["-of", format])?;
    out.set_projection( shift.wkt.as_str())?;
    out.set_geo_transform( &shift.geotransform)?;

    Ok(shift)
}

/* #region latitude bands *************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct LatBand {
    pub min: i32,
    pub max: i32,
    pub std_parallel: i32,
}

/// global latitude bands of `step` degrees from the south pole up. The standard parallel of each band
/// is its boundary closest to the equator
pub fn lat_bands (step: i32) -> Vec<LatBand> {
    let step = step.max(1);
    (-90..90).step_by(step as usize)
        .map( |min| {
            let max = min + step;
            let std_parallel = if max > 0 { min } else { max };
            LatBand { min, max, std_parallel }
        })
        .collect()
}

pub fn band_tile_name (root: &str, band: &LatBand) -> String {
    format!("{}_n{}s{}_standpar{}.tif", root, band.max, band.min, band.std_parallel)
}

pub fn band_vrt_name (tile_name: &str) -> String {
    format!("{}_global0.vrt", strip_extension(tile_name))
}

pub fn band_warp_args (band: &LatBand, radius: f64, source_srs: &str, res: f64) -> Vec<String> {
    vec![
        "-of".to_string(), "GTiff".to_string(),
        "-t_srs".to_string(), format!("+proj=eqc +lat_ts={} +R={}", band.std_parallel, radius),
        "-te".to_string(), "-180".to_string(), band.min.to_string(), "180".to_string(), band.max.to_string(),
        "-te_srs".to_string(), source_srs.to_string(),
        "-tr".to_string(), res.to_string(), res.to_string(),
    ]
}

/// warp `src` into 5 degree latitude band tiles with local standard parallels, each with a VRT that
/// re-registers the tile to a standard parallel of 0. Returns the created tile paths
pub fn split_lat_bands (src: &Path, outroot: &str, radius: f64, source_srs: &str, res: f64) -> Result<Vec<PathBuf>> {
    let src_ds = Dataset::open(src)?;
    let mut tiles = Vec::new();

    for band in lat_bands(5) {
        let tile = band_tile_name( outroot, &band);
        info!("writing: {tile}");
        let tile_path = PathBuf::from(&tile);
        {
            let _tile_ds = warp( &[&src_ds], &tile_path, &band_warp_args( &band, radius, source_srs, res))?;
        } // closed and flushed here

        let vrt_path = PathBuf::from( band_vrt_name(&tile));
        new_standard_parallel( &tile_path, &vrt_path, "VRT", 0.0)?;
        tiles.push( tile_path);
    }

    Ok(tiles)
}

/* #endregion latitude bands */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_bands() {
        let bands = lat_bands(5);
        assert_eq!( bands.len(), 36);
        assert_eq!( bands[0], LatBand{ min: -90, max: -85, std_parallel: -85 });
        assert_eq!( bands[17], LatBand{ min: -5, max: 0, std_parallel: 0 });
        assert_eq!( bands[18], LatBand{ min: 0, max: 5, std_parallel: 0 });
        assert_eq!( bands[35], LatBand{ min: 85, max: 90, std_parallel: 85 });
    }

    #[test]
    fn test_band_names() {
        let band = LatBand{ min: -90, max: -85, std_parallel: -85 };
        let tile = band_tile_name( "moon", &band);
        assert_eq!( tile, "moon_n-85s-90_standpar-85.tif");
        assert_eq!( band_vrt_name(&tile), "moon_n-85s-90_standpar-85_global0.vrt");

        let args = band_warp_args( &band, 1737400.0, "IAU_2015:30100", 100.0);
        assert!( args.contains( &"+proj=eqc +lat_ts=-85 +R=1737400".to_string()));
    }

    #[test]
    fn test_shifted_geotransform() {
        let gt = [ -1000.0, 10.0, 0.0, 500.0, 0.0, -10.0 ];
        let ngt = shifted_geotransform( &gt, -2000.0, 2000.0, 200);
        assert_eq!( ngt, [ -2000.0, 20.0, 0.0, 500.0, 0.0, -10.0 ]);
    }
}
