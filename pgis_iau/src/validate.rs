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

//! WKT validation, either in-process through OSR or by running the `gdalsrsinfo` tool

use std::process::Command;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::error;
use pgis_gdal::{run_quiet, SpatialRef};
use pgis_gdal::errors::misc_error;

use crate::errors::Result;

#[derive(Debug,Clone,PartialEq)]
pub struct Validation {
    pub valid: bool,
    pub proj4: Option<String>,
    /// the WKT to export, which can differ from the input if it had to be fixed for PROJ
    pub wkt: String,
}

impl Validation {
    pub fn invalid (wkt: &str) -> Self {
        Validation { valid: false, proj4: None, wkt: wkt.to_string() }
    }

    pub fn valid (wkt: &str, proj4: &str) -> Self {
        let (wkt, proj4) = fix_wkt_for_proj4( wkt, proj4);
        Validation { valid: true, proj4: Some(proj4), wkt }
    }
}

pub trait WktValidator {
    fn validate (&self, wkt: &str) -> Result<Validation>;
}

/// west positive longitudes have to be carried as explicit PROJ axis spec and WKT extension
pub fn fix_wkt_for_proj4 (wkt: &str, proj4: &str) -> (String,String) {
    if wkt.contains("AXIS[\"longitude\",WEST]") {
        let new_proj4 = match proj4.rfind("+no_defs") {
            Some(pos) => format!("{}+axis=wnu {}", &proj4[..pos], &proj4[pos..]),
            None => format!("{proj4} +axis=wnu")
        };

        let extension = format!("EXTENSION[\"PROJ4\",\"{new_proj4}\"],");
        let new_wkt = match wkt.rfind("AUTHORITY") {
            Some(pos) => format!("{}{}{}", &wkt[..pos], extension, &wkt[pos..]),
            None => format!("{wkt}{extension}")
        };
        (new_wkt, new_proj4)
    } else {
        (wkt.to_string(), proj4.to_string())
    }
}

/// the default validator which uses the GDAL library of this process
#[derive(Debug,Default)]
pub struct SpatialRefValidator;

impl WktValidator for SpatialRefValidator {
    fn validate (&self, wkt: &str) -> Result<Validation> {
        let res = run_quiet( || {
            let srs = SpatialRef::from_wkt(wkt)?;
            let rc = unsafe { gdal_sys::OSRValidate( srs.to_c_hsrs()) };
            if rc != 0 {
                return Err( misc_error( format!("OSRValidate failed with error {rc}")))
            }
            Ok( srs.to_proj4()?)
        });

        match res {
            Ok(proj4) => Ok( Validation::valid( wkt, proj4.trim())),
            Err(e) => {
                error!("WKT is not valid : {e}");
                Ok( Validation::invalid(wkt))
            }
        }
    }
}

lazy_static! {
    static ref PROJ4_RE: Regex = Regex::new(r"PROJ\.4 : '?([^'\n]*)'?").unwrap();
}

/// validator that runs the external `gdalsrsinfo -v` tool
#[derive(Debug,Default)]
pub struct GdalSrsInfoValidator;

fn parse_gdalsrsinfo_output (out: &str) -> Option<String> {
    PROJ4_RE.captures(out).and_then( |c| c.get(1)).map( |m| m.as_str().trim().to_string())
}

impl WktValidator for GdalSrsInfoValidator {
    fn validate (&self, wkt: &str) -> Result<Validation> {
        let output = match Command::new("gdalsrsinfo").arg("-v").arg(wkt).output() {
            Ok(output) => output,
            Err(_) => {
                error!("Please install gdalsrsinfo");
                return Ok( Validation::invalid(wkt))
            }
        };
        let out = String::from_utf8_lossy(&output.stdout);

        if out.contains("Validate Succeeds") {
            match parse_gdalsrsinfo_output(&out) {
                Some(proj4) => Ok( Validation::valid( wkt, &proj4)),
                None => Ok( Validation { valid: true, proj4: None, wkt: wkt.to_string() })
            }
        } else {
            let err = String::from_utf8_lossy(&output.stderr);
            error!("WKT is not valid : {}", if err.is_empty() { wkt } else { err.as_ref() });
            Ok( Validation::invalid(wkt))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gdalsrsinfo() {
        let out = "\nValidate Succeeds\n\nPROJ.4 : '+proj=longlat +R=1737400 +no_defs'\n\nOGC WKT :\n";
        assert_eq!( parse_gdalsrsinfo_output(out).as_deref(), Some("+proj=longlat +R=1737400 +no_defs"));

        let out = "PROJ.4 : +proj=longlat +a=3396190 +b=3376200 +no_defs\n";
        assert_eq!( parse_gdalsrsinfo_output(out).as_deref(), Some("+proj=longlat +a=3396190 +b=3376200 +no_defs"));
    }

    #[test]
    fn test_fix_west_axis() {
        let wkt = "GEOGCS[\"Mars 2015\",AXIS[\"latitude\",NORTH],AXIS[\"longitude\",WEST],AUTHORITY[\"IAU2015\",\"49901\"]]";
        let (w,p) = fix_wkt_for_proj4( wkt, "+proj=longlat +a=3396190 +b=3376200 +no_defs");
        assert_eq!( p, "+proj=longlat +a=3396190 +b=3376200 +axis=wnu +no_defs");
        assert_eq!( w, "GEOGCS[\"Mars 2015\",AXIS[\"latitude\",NORTH],AXIS[\"longitude\",WEST],EXTENSION[\"PROJ4\",\"+proj=longlat +a=3396190 +b=3376200 +axis=wnu +no_defs\"],AUTHORITY[\"IAU2015\",\"49901\"]]");

        let east = "GEOGCS[\"Mars 2015\",AUTHORITY[\"IAU2015\",\"49900\"]]";
        assert_eq!( fix_wkt_for_proj4( east, "+proj=longlat").0, east);
    }
}
