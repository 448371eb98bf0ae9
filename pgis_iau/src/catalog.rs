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

//! parser for the IAU body radii catalog (NAIF id, target, mean/a/b/c radii in meters, rotation
//! direction and prime meridian) and generator of the respective ocentric, ographic and projected CRSs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::{Result, catalog_error};
use crate::wkt::{CrsKind, LongitudeAxis, Projection, Wkt, PROJECTIONS};

const EPS: f64 = 1e-9;

pub struct Reference {
    pub authority: &'static str,
    pub group: &'static str,
    pub text: &'static str,
}

pub static REFERENCES: [Reference; 3] = [
    Reference { authority: "IAU2000", group: "IAU_IAG", text:
"#IAU2000 WKT Codes
# This file derived from the naif ID Codes.txt file distributed by
# USGS for NASA/IAU/NAIF (http://naif.jpl.nasa.gov/)
#
#
#     The sources for the constants listed in this file are:
#
#        [1]  Seidelmann, P.K., Abalakin, V.K., Bursa, M., Davies, M.E.,
#              Bergh, C. de, Lieske, J.H., Oberst, J., Simon, J.L.,
#              Standish, E.M., Stooke, P., and Thomas, P.C. (2002).
#              \"Report of the IAU/IAG Working Group on Cartographic
#              Coordinates and Rotational Elements of the Planets and
#              Satellites: 2000,\" Celestial Mechanics and Dynamical
#              Astronomy, v.82, Issue 1, pp. 83-111.
#
" },
    Reference { authority: "IAU2009", group: "IAU", text:
"#IAU2009 WKT Codes
# This file derived from the naif ID Codes.txt file distributed by
# USGS for NASA/IAU/NAIF (http://naif.jpl.nasa.gov/)
#
#
#     The sources for the constants listed in this file are:
#
#        [2]  Archinal, B. A., M. F. A'Hearn, E. Bowell, A. Conrad,
#              G. J. Consolmagno, R. Courtin, T. Fukushima, D. Hestroffer,
#              J. L. Hilton, G. A. Krasinsky, G. Neumann, J. Oberst,
#              P. K. Seidelmann, P. Stooke, D. J. Tholen, P. C. Thomas,
#              I. P. Williams (2011), \"Report of the IAU Working Group
#              on Cartographic Coordinates and Rotational Elements of the
#              Planets and Satellites: 2011,\" Celestial Mechanics and Dynamical
#              Astronomy, v.109, Issue 2, pp. 101-135.
#
" },
    Reference { authority: "IAU2015", group: "IAU", text:
"#IAU2015 WKT Codes
# This file derived from the naif ID Codes.txt file distributed by
# USGS for NASA/IAU/NAIF (http://naif.jpl.nasa.gov/)
#
#
#     The sources for the constants listed in this file are:
#
#        [3] Archinal, B. A., C. H. Acton, M. F. A'Hearn, A. Conrad,
#             G. J. Consolmagno, T. Duxbury, D. Hestroffer, J. L. Hilton,
#             R. L. Kirk, S. A. Klioner, D. McCarthy, J. Oberst, J. Ping,
#             P. K. Seidelmann, D. J. Tholen, P. C. Thomas,
#             I. P. Williams (2018), \"Report of the IAU Working Group
#             on Cartographic Coordinates and Rotational Elements of the
#             Planets and Satellites: 2015,\" Celestial Mechanics and Dynamical
#             Astronomy, 130: 22. https://doi.org/10.1007/s10569-017-9805-5.
#
" },
];

pub fn get_reference (authority: &str) -> Option<&'static Reference> {
    REFERENCES.iter().find( |r| r.authority == authority)
}

fn is_equal (a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS
}

/// one row of the catalog
#[derive(Debug,Clone,PartialEq)]
pub struct BodyRecord {
    pub naif_id: i64,
    pub target: String,
    pub mean: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub rotation: Option<String>,
    pub origin_name: String,
    pub origin_longitude: f64,
}

fn parse_f64 (tokens: &[&str], idx: usize) -> Result<f64> {
    let s = tokens.get(idx).ok_or_else( || catalog_error( format!("missing column {idx} in {tokens:?}")))?;
    s.trim().parse::<f64>().map_err( |_| catalog_error( format!("could not convert string to float: '{s}'")))
}

fn opt_token<'a> (tokens: &[&'a str], idx: usize) -> Option<&'a str> {
    tokens.get(idx).copied().filter( |s| !s.is_empty())
}

impl BodyRecord {
    /// parse the comma separated tokens of a catalog line. Lines without an integer NAIF id or
    /// without any radius (mean, a and b all -1) are ignored and return `Ok(None)`
    pub fn from_tokens (tokens: &[&str]) -> Result<Option<BodyRecord>> {
        let Ok(naif_id) = tokens[0].trim().parse::<i64>() else { return Ok(None) };

        let mean = parse_f64(tokens, 2)?;
        let a = parse_f64(tokens, 3)?;
        let b = parse_f64(tokens, 4)?;
        if is_equal(mean, -1.0) && is_equal(a, -1.0) && is_equal(b, -1.0) {
            return Ok(None)
        }
        let c = parse_f64(tokens, 5)?;

        let target = tokens[1].to_string();
        let rotation = opt_token(tokens, 6).map( |s| s.to_string());
        let origin_name = opt_token(tokens, 7).unwrap_or("Reference_Meridian").to_string();
        let origin_longitude = match opt_token(tokens, 8) {
            Some(s) => s.trim().parse::<f64>().map_err( |_| catalog_error( format!("could not convert string to float: '{s}'")))?,
            None => 0.0
        };

        Ok( Some( BodyRecord { naif_id, target, mean, a, b, c, rotation, origin_name, origin_longitude }))
    }

    /// (semi major, semi minor) axis. Triaxial bodies with a known mean radius are approximated by a sphere
    pub fn axes (&self) -> (f64,f64) {
        if !is_equal(self.a, self.b) && !is_equal(self.a, self.c) && !is_equal(self.b, self.c) && !is_equal(self.mean, -1.0) {
            (self.mean, self.mean)
        } else {
            (self.a, self.c)
        }
    }

    /// inverse flattening, or the (near zero) flattening itself for spheres
    pub fn inverse_flattening (&self) -> f64 {
        let (a,c) = self.axes();
        let flattening = (a - c) / a;
        if !is_equal(flattening, 0.0) { 1.0 / flattening } else { flattening }
    }

    fn is_direct (&self) -> bool {
        self.rotation.as_ref().map( |r| r.eq_ignore_ascii_case("DIRECT")).unwrap_or(true)
    }
}

/// a generated coordinate reference system
#[derive(Debug,Clone)]
pub struct CrsEntry {
    pub authority: String,
    pub code: i64,
    pub target: String,
    pub wkt: String,
    pub kind: CrsKind,
    pub projection: Option<&'static Projection>,
    pub semi_major: f64,
    pub semi_minor: f64,
}

impl CrsEntry {
    pub fn year (&self) -> &str {
        self.authority.trim_start_matches("IAU")
    }
}

#[derive(Debug)]
pub struct IauCatalog {
    file: PathBuf,
    year: String,
    group: &'static str,
    references: &'static str,
}

/// the catalog year is the part of the file name between "IAU" and the next '.'
pub fn year_from_filename (file: &Path) -> Result<String> {
    let name = file.file_name().map( |n| n.to_string_lossy().to_string()).unwrap_or_default();
    let err = || catalog_error( format!("Can't parse the year from filename: {}", file.display()));

    let (_, rest) = name.split_once("IAU").ok_or_else(err)?;
    let year = rest.split('.').next().unwrap_or("");
    if year.parse::<i32>().is_err() {
        return Err( err())
    }
    Ok(year.to_string())
}

impl IauCatalog {
    pub fn new<P: AsRef<Path>> (file: P) -> Result<Self> {
        let file = file.as_ref().to_path_buf();
        let year = year_from_filename(&file)?;

        // before 2015 all longitudes were counted positive to the east, which is not IAU conform
        if year.parse::<i32>().unwrap_or(0) < 2015 {
            return Err( catalog_error("This program is not valid before 2015"))
        }
        let authority = format!("IAU{year}");
        let reference = get_reference(&authority).ok_or_else( || catalog_error( format!("No reference for the this year: {year}")))?;

        Ok( IauCatalog { file, year, group: reference.group, references: reference.text })
    }

    pub fn year (&self) -> &str { &self.year }

    pub fn authority (&self) -> String { format!("IAU{}", self.year) }

    pub fn references (&self) -> &'static str { self.references }

    pub fn process_file (&self) -> Result<Vec<CrsEntry>> {
        let reader = BufReader::new( File::open(&self.file)?);
        self.process_reader(reader)
    }

    pub fn process_reader<R: BufRead> (&self, reader: R) -> Result<Vec<CrsEntry>> {
        let mut data = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let tokens: Vec<&str> = line.trim_end().split(',').collect();
            match BodyRecord::from_tokens(&tokens)? {
                Some(rec) => data.extend( self.process_record(&rec)?),
                None => warn!("{:?} is ignored", tokens)
            }
        }
        debug!("{} CRS processed from {:?}", data.len(), self.file);
        Ok(data)
    }

    fn new_wkt (&self, rec: &BodyRecord, code: i64) -> Result<Wkt> {
        let (a,_) = rec.axes();
        Wkt::new( &format!("{} {}", rec.target, self.year),
                  &format!("D_{}_{}", rec.target, self.year),
                  &format!("{}_{}_{}", rec.target, self.year, self.group),
                  a, rec.inverse_flattening(), &self.authority(), &code.to_string())
    }

    fn entry (&self, rec: &BodyRecord, code: i64, wkt: &Wkt, kind: CrsKind, projection: Option<&'static Projection>) -> CrsEntry {
        let (semi_major, semi_minor) = rec.axes();
        CrsEntry {
            authority: self.authority(),
            code,
            target: rec.target.clone(),
            wkt: wkt.to_string(),
            kind,
            projection,
            semi_major,
            semi_minor,
        }
    }

    /// longitudes of ocentric CRSs are always counted positive to the east, hence the prime
    /// meridian position is inverted for bodies that do not rotate in the direct sense
    pub fn ocentric_crs (&self, rec: &BodyRecord) -> Result<(i64,Wkt)> {
        let code = rec.naif_id * 100;
        let mut wkt = self.new_wkt(rec, code)?;
        let pos = if rec.is_direct() { rec.origin_longitude } else { -rec.origin_longitude };
        wkt.set_primem( &rec.origin_name, pos)?;
        Ok((code,wkt))
    }

    /// the axis direction of ographic CRSs depends on the rotation, hence there is none without rotation
    pub fn ographic_crs (&self, rec: &BodyRecord) -> Result<Option<(i64,Wkt)>> {
        let Some(rotation) = &rec.rotation else { return Ok(None) };

        let code = rec.naif_id * 100 + 1;
        let mut wkt = self.new_wkt(rec, code)?;
        wkt.set_primem( &rec.origin_name, rec.origin_longitude)?;

        let axis = if ["SUN","EARTH","MOON"].contains( &rec.target.to_uppercase().as_str()) {
            LongitudeAxis::East
        } else if rotation.eq_ignore_ascii_case("DIRECT") {
            LongitudeAxis::West
        } else if rotation.eq_ignore_ascii_case("RETROGRADE") {
            LongitudeAxis::East
        } else {
            return Err( catalog_error( format!("The rotation code is unknown : {rotation}")))
        };
        wkt.set_longitude_axis(axis);

        Ok(Some((code,wkt)))
    }

    /// all CRSs of a body in output order: ocentric, ographic, then ocentric/ographic pairs for each projection
    pub fn process_record (&self, rec: &BodyRecord) -> Result<Vec<CrsEntry>> {
        let mut crs = Vec::new();

        let (code, mut ocentric) = self.ocentric_crs(rec)?;
        crs.push( self.entry( rec, code, &ocentric, CrsKind::Ocentric, None));

        let mut ographic = self.ographic_crs(rec)?;
        match &ographic {
            Some((code,wkt)) => crs.push( self.entry( rec, *code, wkt, CrsKind::Ographic, None)),
            None => warn!("No ographic CRS for {} because the rotation direction is not defined.", rec.target)
        }

        let authority = self.authority();
        for projection in PROJECTIONS.iter() {
            let name = format!("{}_{}", rec.target, projection.projection);
            let code = rec.naif_id * 100 + projection.code as i64;

            ocentric.set_projection( &name, projection, &authority, &code.to_string());
            crs.push( self.entry( rec, code, &ocentric, CrsKind::ProjectedOcentric, Some(projection)));
            ocentric.unset_projection();

            if let Some((_,wkt)) = &mut ographic {
                let code = code + 1;
                wkt.set_projection( &name, projection, &authority, &code.to_string());
                crs.push( self.entry( rec, code, wkt, CrsKind::ProjectedOgraphic, Some(projection)));
                wkt.unset_projection();
            }
        }

        Ok(crs)
    }
}
