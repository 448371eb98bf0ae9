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

//! writers for the generated CRS list: WKT catalog, PROJ init file, ESRI .prj files and PostGIS SQL

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use clap::ValueEnum;
use strum::Display;
use tracing::{error, warn};
use pgis_common::fmt::py_float;

use crate::catalog::{CrsEntry, get_reference};
use crate::errors::{Result, PgisIauError, catalog_error};
use crate::validate::WktValidator;
use crate::wkt::CrsKind;

#[derive(Debug,Clone,Copy,PartialEq,Eq,ValueEnum,Display)]
pub enum OutputFormat {
    #[value(name="WKT")] #[strum(to_string="WKT")]
    Wkt,
    #[value(name="PROJ")] #[strum(to_string="PROJ")]
    Proj,
    #[value(name="PRJ")] #[strum(to_string="PRJ")]
    Prj,
    #[value(name="POSTGIS")] #[strum(to_string="POSTGIS")]
    Postgis,
}

fn references (crss: &[CrsEntry]) -> Result<&'static str> {
    let first = crss.first().ok_or_else( || catalog_error("no CRS to export"))?;
    get_reference(&first.authority)
        .map( |r| r.text)
        .ok_or_else( || catalog_error( format!("No reference for the this year: {}", first.year())))
}

fn check_failures (n_invalid: usize) -> Result<()> {
    if n_invalid > 0 { Err( PgisIauError::ValidationFailed { count: n_invalid }) } else { Ok(()) }
}

/// all entries grouped by target. Invalid WKTs are written as comments and reported after the whole list is written
pub fn save_as_wkt<W: Write + ?Sized> (crss: &[CrsEntry], validator: &dyn WktValidator, out: &mut W) -> Result<()> {
    let mut n_invalid = 0;
    let mut target = "";

    write!(out, "{}\n", references(crss)?)?;
    for crs in crss {
        if crs.target != target {
            write!(out, "\n\n#{} WKT Codes for {}\n", crs.authority, crs.target)?;
            target = crs.target.as_str();
        }
        let v = validator.validate(&crs.wkt)?;
        if v.valid {
            write!(out, "{},{}\n", crs.code, v.wkt)?;
        } else {
            n_invalid += 1;
            write!(out, "# {},{}\n", crs.code, v.wkt)?;
        }
    }
    out.flush()?;
    check_failures(n_invalid)
}

/// PROJ init file with ocentric entries only, since PROJ does not convert ocentric to ographic latitudes correctly
pub fn save_as_proj4<W: Write + ?Sized> (crss: &[CrsEntry], validator: &dyn WktValidator, out: &mut W) -> Result<()> {
    warn!("Export only ocentric CRS or projected ocentric CRS while proj4 does not convert correctly ocentric latitude to ographic latitude");
    let mut n_invalid = 0;

    write!(out, "{}\n", references(crss)?)?;
    for crs in crss.iter().filter( |c| c.kind.is_ocentric()) {
        let v = validator.validate(&crs.wkt)?;
        if v.valid {
            let projection = crs.projection.map( |p| format!(" - {}", p.projection)).unwrap_or_default();
            write!(out, "#{} : {} WKT Codes for {} : {} {}\n", crs.code, crs.authority, crs.target, crs.kind, projection)?;
            write!(out, "<{}> {}\n", crs.code, v.proj4.unwrap_or_default())?;
        } else {
            n_invalid += 1;
        }
    }
    out.flush()?;
    check_failures(n_invalid)
}

/// one `<target> <year>.prj` file per projected ocentric entry. All projections of a target
/// share the same file name, i.e. the last projection of each target ends up in the file
pub fn save_as_prj (crss: &[CrsEntry], validator: &dyn WktValidator, dir: &Path) -> Result<()> {
    warn!("Export only ocentric CRS while proj4 does not convert correctly ocentric latitude to ographic latitude");
    let mut n_invalid = 0;

    for crs in crss.iter().filter( |c| c.kind == CrsKind::ProjectedOcentric) {
        let v = validator.validate(&crs.wkt)?;
        if v.valid {
            let path = dir.join( format!("{} {}.prj", crs.target, crs.year()));
            fs::write( &path, &v.wkt)?;
        } else {
            n_invalid += 1;
            error!("WKT {} is not valid", v.wkt);
        }
    }
    check_failures(n_invalid)
}

/// SQL statements that (re)define the ocentric entries in a PostGIS `spatial_ref_sys` table
pub fn save_as_postgis<W: Write + ?Sized> (crss: &[CrsEntry], validator: &dyn WktValidator, out: &mut W) -> Result<()> {
    let mut n_invalid = 0;

    for crs in crss.iter().filter( |c| c.kind == CrsKind::Ocentric) {
        let v = validator.validate(&crs.wkt)?;
        if v.valid {
            write!(out, "DELETE FROM spatial_ref_sys WHERE srid IN ({});\n", crs.code)?;
            write!(out, "INSERT INTO spatial_ref_sys (srid, auth_name, auth_srid, srtext, proj4text) VALUES ({}, '{}', {}, '{}', '+proj=longlat +a={} +b={} +no_defs');\n",
                   crs.code, crs.authority, crs.code, v.wkt, py_float(crs.semi_major), py_float(crs.semi_minor))?;
        } else {
            n_invalid += 1;
        }
    }
    out.flush()?;
    check_failures(n_invalid)
}

fn save_to<F> (output: Option<&Path>, f: F) -> Result<()> where F: FnOnce(&mut dyn Write)->Result<()> {
    match output {
        Some(path) => {
            let mut file = io::BufWriter::new( fs::File::create(path)?);
            f(&mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            f(&mut lock)
        }
    }
}

/// write the CRS list in the requested format to `output`, or stdout if there is none
pub fn save_as (crss: &[CrsEntry], validator: &dyn WktValidator, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Wkt => save_to( output, |w| save_as_wkt( crss, validator, w)),
        OutputFormat::Proj => save_to( output, |w| save_as_proj4( crss, validator, w)),
        OutputFormat::Postgis => save_to( output, |w| save_as_postgis( crss, validator, w)),
        OutputFormat::Prj => {
            warn!("output filename is ignored for PRJ format");
            save_as_prj( crss, validator, Path::new("."))
        }
    }
}
