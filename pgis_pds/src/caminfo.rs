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

//! convert the footprint of ISIS3 `caminfo` PVL output (footprintinit + caminfo uselabel=yes)
//! into a single feature polygon shapefile

use std::path::{Path, PathBuf};
use pgis_common::fs::{filename, filestem, replace_extension};
use pgis_vector::vrt_to_shapefile;
use pgis_vector::ogr_vrt::{GeometryEncoding, VrtLayer, write_csvt, write_vrt};

use crate::pvl::{PvlObject, read_label};
use crate::errors::{Result, invalid_input, missing_key};

pub const FOOTPRINT_FIELD: &str = "GisFootprint";

/// geometry keywords in column order
const GEOMETRY_FIELDS: [&str;31] = [
    "CenterLine", "CenterSample", "CenterLatitude", "CenterLongitude", "CenterRadius", "RightAscension",
    "Declination", "PhaseAngle", "EmissionAngle", "IncidenceAngle", "NorthAzimuth", "OffNadir",
    "SolarLongitude", "LocalTime", "TargetCenterDistance", "SlantDistance", "SampleResolution",
    "LineResolution", "PixelResolution", "MeanGroundResolution", "SubSolarAzimuth", "SubSolarGroundAzimuth",
    "SubSolarLatitude", "SubSolarLongitude", "SubSpacecraftAzimuth", "SubSpacecraftLatitude",
    "SubSpacecraftLongitude", "ParallaxX", "ParallaxY", "ShadowX", "ShadowY",
];

const POLYGON_FIELDS: [&str;4] = [ "CentroidLine", "CentroidSample", "CentroidLatitude", "CentroidLongitude" ];

// these are sequences of which we only use the first element
const POLYGON_FIRST_FIELDS: [&str;3] = [ "CentroidRadius", "SurfaceArea", "GlobalCoverage" ];

/// all 40 column names, starting with `Filename` and ending with `GisFootprint`
pub fn caminfo_fields () -> Vec<&'static str> {
    let mut fields = vec!["Filename"];
    fields.extend( GEOMETRY_FIELDS);
    fields.extend( POLYGON_FIELDS);
    fields.extend( POLYGON_FIRST_FIELDS);
    fields.push( FOOTPRINT_FIELD);
    fields
}

pub fn caminfo_types () -> Vec<&'static str> {
    let mut types = vec!["String"];
    types.extend( std::iter::repeat("Real").take( GEOMETRY_FIELDS.len() + POLYGON_FIELDS.len() + POLYGON_FIRST_FIELDS.len()));
    types.push("String");
    types
}

/// one footprint row, values in the order of `caminfo_fields()`
#[derive(Debug,Clone,PartialEq)]
pub struct CaminfoRecord {
    pub values: Vec<String>,
}

impl CaminfoRecord {
    pub fn from_label (label: &PvlObject) -> Result<Self> {
        let get = |path: String, first: bool| -> Result<String> {
            let v = label.get(&path).ok_or_else( || missing_key(&path))?;
            let v = if first { v.first().ok_or_else( || missing_key(&path))? } else { v };
            Ok( v.to_string())
        };

        let mut values = vec![ get( "Caminfo.Parameters.From".to_string(), false)? ];
        for f in GEOMETRY_FIELDS {
            values.push( get( format!("Caminfo.Geometry.{f}"), false)?);
        }
        for f in POLYGON_FIELDS {
            values.push( get( format!("Caminfo.Polygon.{f}"), false)?);
        }
        for f in POLYGON_FIRST_FIELDS {
            values.push( get( format!("Caminfo.Polygon.{f}"), true)?);
        }
        values.push( get( format!("Caminfo.Polygon.{FOOTPRINT_FIELD}"), false)?);

        Ok( CaminfoRecord { values })
    }

    pub fn filename (&self) -> &str {
        &self.values[0]
    }

    pub fn footprint (&self) -> &str {
        self.values.last().map( |s| s.as_str()).unwrap_or_default()
    }
}

pub fn write_caminfo_csv (path: &Path, record: &CaminfoRecord) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style( csv::QuoteStyle::Necessary)
        .from_path(path)?;
    wtr.write_record( caminfo_fields())?;
    wtr.write_record( &record.values)?;
    wtr.flush()?;
    Ok(())
}

pub fn caminfo_vrt_layer (name: &str, csv_name: &str) -> VrtLayer {
    VrtLayer::new( name, csv_name, "WGS84", "wkbPolygon", GeometryEncoding::Wkt( FOOTPRINT_FIELD.to_string()))
}

#[derive(Debug,Clone,PartialEq)]
pub struct CaminfoOutput {
    pub csv: PathBuf,
    pub csvt: PathBuf,
    pub vrt: PathBuf,
    pub shp: PathBuf,
    pub record: CaminfoRecord,
}

/// write the `.csv`, `.csvt` and `.vrt` files for the footprint in `pvl`
pub fn write_caminfo_sources (pvl: &Path) -> Result<CaminfoOutput> {
    let name = filestem(&pvl).ok_or_else( || invalid_input( format!("invalid PVL filename {}", pvl.display())))?;
    let record = CaminfoRecord::from_label( &read_label(pvl)?)?;

    let out = CaminfoOutput {
        csv: replace_extension( pvl, "csv"),
        csvt: replace_extension( pvl, "csvt"),
        vrt: replace_extension( pvl, "vrt"),
        shp: replace_extension( pvl, "shp"),
        record,
    };
    let csv_name = filename(&out.csv).unwrap_or(name);

    write_caminfo_csv( &out.csv, &out.record)?;
    write_csvt( &out.csvt, &caminfo_types())?;
    write_vrt( &out.vrt, &caminfo_vrt_layer( name, csv_name))?;
    Ok(out)
}

pub fn footprint_to_shp (pvl: &Path, prj: Option<&str>) -> Result<CaminfoOutput> {
    let out = write_caminfo_sources(pvl)?;
    if prj.is_none() {
        println!("No projection sent, defaulting to WGS84 (degrees)");
    }
    vrt_to_shapefile( &out.vrt, &out.shp, prj)?;

    if out.shp.is_file() {
        println!("shapefile created: {}.\n  Note: intermediate files *.pvl, *.csv, *.csvt, and *.vrt can be deleted.", out.shp.display());
    } else {
        println!("shapefile not created");
    }
    Ok(out)
}
