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

//! convert isisminer footprint CSV tables (WKB encoded `GisFootprint` column) into shapefiles

use std::path::{Path, PathBuf};
use pgis_common::fs::{filename, filestem, replace_extension};

use crate::vrt_to_shapefile;
use crate::errors::{Result, invalid_input};
use crate::ogr_vrt::{GeometryEncoding, VrtLayer, write_csvt, write_vrt};

pub const FOOTPRINT_FIELD: &str = "GisFootprint";

/// column types of the isisminer output table, in column order
pub fn isisminer_types () -> Vec<&'static str> {
    let mut types = vec!["String", "String"];
    types.extend( std::iter::repeat("Real").take(12));
    types.extend( ["String", "String"]);
    types.extend( std::iter::repeat("Real").take(32));
    types.push("String");
    types
}

pub fn isisminer_vrt_layer (name: &str, csv_name: &str) -> VrtLayer {
    VrtLayer::new( name, csv_name, "WGS84", "wkbPolygon", GeometryEncoding::Wkb(FOOTPRINT_FIELD.to_string()))
        .with_open_option("AUTODETECT_TYPE", "YES")
        .with_open_option("HEADERS", "YES")
}

#[derive(Debug,Clone,PartialEq)]
pub struct IsisminerOutput {
    pub csvt: PathBuf,
    pub vrt: PathBuf,
    pub shp: PathBuf,
}

/// write the `.csvt` and `.vrt` sidecars next to `csv`
pub fn write_isisminer_sidecars (csv: &Path) -> Result<IsisminerOutput> {
    let name = filestem(&csv).ok_or_else( || invalid_input( format!("invalid CSV filename {}", csv.display())))?;
    let csv_name = filename(&csv).unwrap_or(name);

    let out = IsisminerOutput {
        csvt: replace_extension( csv, "csvt"),
        vrt: replace_extension( csv, "vrt"),
        shp: replace_extension( csv, "shp"),
    };
    write_csvt( &out.csvt, &isisminer_types())?;
    write_vrt( &out.vrt, &isisminer_vrt_layer( name, csv_name))?;
    Ok(out)
}

pub fn isisminer_to_shp (csv: &Path, prj: Option<&str>) -> Result<IsisminerOutput> {
    if prj.is_none() {
        println!("No projection sent, defaulting to WGS84 (degrees)");
    }
    let out = write_isisminer_sidecars(csv)?;
    vrt_to_shapefile( &out.vrt, &out.shp, prj)?;
    println!("shapefile created: {}", out.shp.display());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types() {
        let types = isisminer_types();
        assert_eq!( types.len(), 49);
        assert_eq!( types[13], "Real");
        assert_eq!( (types[14], types[15]), ("String", "String"));
        assert_eq!( types[48], "String");
    }

    #[test]
    fn test_layer() {
        let xml = isisminer_vrt_layer( "minerout", "minerout.csv").to_xml();
        assert!( xml.contains("<OOI key=\"AUTODETECT_TYPE\">YES</OOI>"));
        assert!( xml.contains("<GeometryField encoding=\"WKB\" field=\"GisFootprint\"/>"));
    }
}
