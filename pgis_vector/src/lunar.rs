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

//! Lunar Prospector tables (latitude/longitude cells with hydrogen abundance) as polygon layers,
//! and rasterization of such polygon layers into global grids

use std::fs;
use std::path::Path;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;
use gdal::{Dataset, DriverManager};
use gdal::vector::{FieldValue, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType, ToGdal};
use geo_types::{LineString, Polygon};
use pgis_common::fs::{filestem, lowercase_extension};
use pgis_gdal::programs::rasterize;

use crate::{SHAPEFILE_DRIVER, srs_from_definition};
use crate::errors::{Result, misc_error, unsupported_output};

pub const DEFAULT_CRS: &str = "IAU_2015:30100";
pub const COLUMNS: [&str; 5] = ["Lat_min", "Lat_max", "Lon_min", "Lon_max", "H_ppm"];

lazy_static! {
    static ref SEP_RE: Regex = Regex::new(r"[,\s]+").unwrap();
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct LpRecord {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub h_ppm: f64,
}

impl LpRecord {
    pub fn values (&self) -> [f64; 5] {
        [self.lat_min, self.lat_max, self.lon_min, self.lon_max, self.h_ppm]
    }

    pub fn polygon (&self) -> Polygon<f64> {
        Polygon::new( LineString::from( vec![
            (self.lon_min, self.lat_min),
            (self.lon_max, self.lat_min),
            (self.lon_max, self.lat_max),
            (self.lon_min, self.lat_max),
            (self.lon_min, self.lat_min),
        ]), vec![])
    }
}

fn parse_line (line: &str) -> Option<LpRecord> {
    let vals: Vec<f64> = SEP_RE.split(line)
        .map( |s| s.parse::<f64>().unwrap_or(f64::NAN))
        .collect();
    if vals.len() != COLUMNS.len() || vals.iter().any( |v| v.is_nan()) {
        return None
    }
    Some( LpRecord { lat_min: vals[0], lat_max: vals[1], lon_min: vals[2], lon_max: vals[3], h_ppm: vals[4] })
}

/// everything after a '#' is a comment. Rows that don't have 5 valid numbers are dropped
pub fn parse_lp_table (text: &str) -> Vec<LpRecord> {
    let mut records = Vec::new();
    for (i,line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() { continue }

        match parse_line(line) {
            Some(rec) => records.push(rec),
            None => warn!("dropping line {}: '{}'", i+1, line)
        }
    }
    records
}

/// OGR driver for the supported output types
pub fn vector_driver_for (path: &Path) -> Result<&'static str> {
    match lowercase_extension(path).as_deref() {
        Some("shp") => Ok(SHAPEFILE_DRIVER),
        Some("geojson") => Ok("GeoJSON"),
        _ => Err( unsupported_output("Output file must end with .shp or .geojson"))
    }
}

pub fn write_lp_polygons (path: &Path, records: &[LpRecord], crs: &str) -> Result<()> {
    let driver = DriverManager::get_driver_by_name( vector_driver_for(path)?)?;
    let srs = srs_from_definition(crs)?;
    let layer_name = filestem(&path).unwrap_or("lp_table");

    let mut ds = driver.create_vector_only(path)?;
    let mut layer = ds.create_layer( LayerOptions {
        name: layer_name,
        srs: Some(&srs),
        ty: OGRwkbGeometryType::wkbPolygon,
        options: None
    })?;
    let defs: Vec<(&str, OGRFieldType::Type)> = COLUMNS.iter().map( |c| (*c, OGRFieldType::OFTReal)).collect();
    layer.create_defn_fields(&defs)?;

    for rec in records {
        let values: Vec<FieldValue> = rec.values().iter().map( |v| FieldValue::RealValue(*v)).collect();
        layer.create_feature_fields( rec.polygon().to_gdal()?, &COLUMNS, &values)?;
    }
    Ok(())
}

/// returns the number of polygons written
pub fn lp_table_to_polygon (infile: &Path, outfile: &Path, crs: &str) -> Result<usize> {
    vector_driver_for(outfile)?;
    let records = parse_lp_table( &fs::read_to_string(infile)?);
    write_lp_polygons( outfile, &records, crs)?;
    Ok( records.len())
}

/// global -180..180 / -90..90 grid parameters for cell size `pixel_size` (in degrees)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GlobalGrid {
    pub pixel_size: f64,
    pub width: usize,
    pub height: usize,
}

impl GlobalGrid {
    pub fn new (pixel_size: f64) -> Result<Self> {
        if !(pixel_size > 0.0) {
            return Err( misc_error( format!("invalid pixel size {pixel_size}")))
        }
        let width = (360.0 / pixel_size) as usize;
        let height = (180.0 / pixel_size) as usize;
        Ok( GlobalGrid { pixel_size, width, height })
    }

    pub fn geotransform (&self) -> [f64;6] {
        [-180.0, self.pixel_size, 0.0, 90.0, 0.0, -self.pixel_size]
    }

    /// (xmin,ymin,xmax,ymax) of the grid
    pub fn extent (&self) -> (f64,f64,f64,f64) {
        (-180.0, 90.0 - self.height as f64 * self.pixel_size, -180.0 + self.width as f64 * self.pixel_size, 90.0)
    }

    /// gdal_rasterize arguments to burn `attribute` into a compressed Float32 GeoTIFF of this grid.
    /// Cells not covered by any polygon are 0
    pub fn rasterize_args (&self, attribute: &str) -> Vec<String> {
        let (xmin,ymin,xmax,ymax) = self.extent();
        [ "-of", "GTiff", "-a", attribute, "-ot", "Float32", "-a_nodata", "-32768", "-init", "0",
          "-co", "COMPRESS=LZW", "-co", "TILED=YES" ].iter().map( |s| s.to_string())
        .chain( [
            "-te".to_string(), xmin.to_string(), ymin.to_string(), xmax.to_string(), ymax.to_string(),
            "-ts".to_string(), self.width.to_string(), self.height.to_string()
        ])
        .collect()
    }
}

pub fn shp_to_geotiff (shapefile: &Path, outfile: &Path, pixel_size: f64, attribute: &str) -> Result<GlobalGrid> {
    let src = Dataset::open(shapefile)?;
    let layer = src.layer(0)?;
    if layer.spatial_ref().is_none() {
        return Err( misc_error("Shapefile has no CRS defined."))
    }

    let grid = GlobalGrid::new(pixel_size)?;
    rasterize( &src, outfile, &grid.rasterize_args(attribute))?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let text = "# Lunar Prospector hydrogen
-90.0 -88.0, -180.0 -178.0 120.5
-88.0,-86.0,-180.0,-178.0,NaN
-86.0 -84.0 -180.0 -178.0 xx   # bad
-84.0 -82.0 -180.0 -178.0 88.0 # trailing comment
";
        let recs = parse_lp_table(text);
        assert_eq!( recs.len(), 2);
        assert_eq!( recs[0], LpRecord { lat_min: -90.0, lat_max: -88.0, lon_min: -180.0, lon_max: -178.0, h_ppm: 120.5 });
        assert_eq!( recs[1].h_ppm, 88.0);
    }

    #[test]
    fn test_polygon_ring() {
        let rec = LpRecord { lat_min: 10.0, lat_max: 12.0, lon_min: 30.0, lon_max: 32.0, h_ppm: 1.0 };
        let coords: Vec<(f64,f64)> = rec.polygon().exterior().points().map( |p| (p.x(), p.y())).collect();
        assert_eq!( coords, vec![(30.0,10.0), (32.0,10.0), (32.0,12.0), (30.0,12.0), (30.0,10.0)]);
    }

    #[test]
    fn test_output_driver() {
        assert_eq!( vector_driver_for( Path::new("h.SHP")).unwrap(), "ESRI Shapefile");
        assert_eq!( vector_driver_for( Path::new("h.GeoJSON")).unwrap(), "GeoJSON");
        assert!( vector_driver_for( Path::new("h.kml")).is_err());
    }

    #[test]
    fn test_global_grid() {
        let grid = GlobalGrid::new(0.5).unwrap();
        assert_eq!( (grid.width, grid.height), (720, 360));
        assert_eq!( grid.geotransform(), [-180.0, 0.5, 0.0, 90.0, 0.0, -0.5]);
        assert_eq!( grid.extent(), (-180.0, -90.0, 180.0, 90.0));

        let grid = GlobalGrid::new(7.0).unwrap();
        assert_eq!( (grid.width, grid.height), (51, 25));
        assert_eq!( grid.extent(), (-180.0, -85.0, 177.0, 90.0));
        assert!( GlobalGrid::new(0.0).is_err());
    }
}
