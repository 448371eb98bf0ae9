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

use std::fs;
use std::path::PathBuf;
use pgis_iau::catalog::{IauCatalog, CrsEntry};
use pgis_iau::errors::{PgisIauError, Result};
use pgis_iau::export::{save_as_wkt, save_as_proj4, save_as_prj, save_as_postgis};
use pgis_iau::validate::{Validation, WktValidator};
use pgis_iau::wkt::CrsKind;

// run with "cargo test test_xx -- --nocapture"

const CSV: &str = "Naif_ID,Body,IAU2015_Mean,IAU2015_Semimajor,IAU2015_Axisb,IAU2015_Polar,rotation,origin_long_name,origin_lon_pos
301,Moon,1737400,1737400,1737400,1737400,Direct,,
499,Mars,3389500,3396190,3396190,3376200,Direct,,
299,Venus,6051800,6051800,6051800,6051800,Retrograde,Ariadne,0
32,Kalypso,-1,-1,-1,-1,,,
";

/// accepts everything and returns a fixed PROJ string
struct AcceptAll;

impl WktValidator for AcceptAll {
    fn validate (&self, wkt: &str) -> Result<Validation> {
        Ok( Validation::valid( wkt, "+proj=longlat +no_defs"))
    }
}

/// rejects projected WKTs
struct RejectProjected;

impl WktValidator for RejectProjected {
    fn validate (&self, wkt: &str) -> Result<Validation> {
        if wkt.starts_with("PROJCS") { Ok( Validation::invalid(wkt)) } else { Ok( Validation::valid( wkt, "+proj=longlat +no_defs")) }
    }
}

fn load_catalog () -> (tempfile::TempDir, Vec<CrsEntry>) {
    let tmp = tempfile::tempdir().unwrap();
    let path: PathBuf = tmp.path().join("naifcodes_radii_m_wAsteroids_IAU2015.csv");
    fs::write( &path, CSV).unwrap();
    let crss = IauCatalog::new(&path).unwrap().process_file().unwrap();
    (tmp, crss)
}

fn find (crss: &[CrsEntry], code: i64) -> &CrsEntry {
    crss.iter().find( |c| c.code == code).unwrap()
}

#[test]
fn test_crs_counts_and_order() {
    let (_tmp, crss) = load_catalog();
    // (ocentric + ographic) * (1 + 22 projections) for 3 bodies
    assert_eq!( crss.len(), 3 * 46);

    let moon: Vec<i64> = crss.iter().filter( |c| c.target == "Moon").map( |c| c.code).take(6).collect();
    assert_eq!( moon, vec![30100, 30101, 30110, 30111, 30112, 30113]);
    assert_eq!( crss[0].kind, CrsKind::Ocentric);
    assert_eq!( crss[1].kind, CrsKind::Ographic);
    assert_eq!( crss[2].kind, CrsKind::ProjectedOcentric);
    assert_eq!( crss[3].kind, CrsKind::ProjectedOgraphic);
    assert_eq!( crss[0].authority, "IAU2015");
}

#[test]
fn test_geographic_wkts() {
    let (_tmp, crss) = load_catalog();

    assert_eq!( find(&crss, 30100).wkt,
        r#"GEOGCS["Moon 2015",DATUM["D_Moon_2015",SPHEROID["Moon_2015_IAU",1737400.0,0.0],TOWGS84[0,0,0]],PRIMEM["Reference_Meridian",0.0],UNIT["Degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["IAU2015","30100"]]"#);

    // the Moon has east positive longitudes
    assert_eq!( find(&crss, 30101).wkt,
        r#"GEOGCS["Moon 2015",DATUM["D_Moon_2015",SPHEROID["Moon_2015_IAU",1737400.0,0.0],TOWGS84[0,0,0]],PRIMEM["Reference_Meridian",0.0],UNIT["Degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["IAU2015","30101"]]"#);

    assert_eq!( find(&crss, 49900).wkt,
        r#"GEOGCS["Mars 2015",DATUM["D_Mars_2015",SPHEROID["Mars_2015_IAU",3396190.0,169.8944472236118],TOWGS84[0,0,0]],PRIMEM["Reference_Meridian",0.0],UNIT["Degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["IAU2015","49900"]]"#);

    assert_eq!( find(&crss, 49901).wkt,
        r#"GEOGCS["Mars 2015",DATUM["D_Mars_2015",SPHEROID["Mars_2015_IAU",3396190.0,169.8944472236118],TOWGS84[0,0,0]],PRIMEM["Reference_Meridian",0.0],UNIT["Degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AXIS["latitude",NORTH],AXIS["longitude",WEST],AUTHORITY["IAU2015","49901"]]"#);

    // retrograde rotation inverts the ocentric prime meridian, ographic longitudes stay east positive
    assert_eq!( find(&crss, 29900).wkt,
        r#"GEOGCS["Venus 2015",DATUM["D_Venus_2015",SPHEROID["Venus_2015_IAU",6051800.0,0.0],TOWGS84[0,0,0]],PRIMEM["Ariadne",-0.0],UNIT["Degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["IAU2015","29900"]]"#);
    assert!( find(&crss, 29901).wkt.contains(r#"PRIMEM["Ariadne",0.0]"#));
    assert!( !find(&crss, 29901).wkt.contains("AXIS"));
}

#[test]
fn test_projected_wkt() {
    let (_tmp, crss) = load_catalog();
    let mars = find( &crss, 49910);
    assert_eq!( mars.kind, CrsKind::ProjectedOcentric);
    assert_eq!( mars.wkt,
        r#"PROJCS["Mars_Equirectangular",GEOGCS["Mars 2015",DATUM["D_Mars_2015",SPHEROID["Mars_2015_IAU",3396190.0,169.8944472236118],TOWGS84[0,0,0]],PRIMEM["Reference_Meridian",0.0],UNIT["Degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["IAU2015","49900"]],PROJECTION["Equirectangular"],PARAMETER["False_Easting",0],PARAMETER["False_Northing",0],PARAMETER["Central_Meridian",0],PARAMETER["latitude_Of_Origin",0],UNIT["Meter",1, AUTHORITY["EPSG","9001"]],AUTHORITY["IAU2015","49910"]]"#);

    let albers = find( &crss, 49977);
    assert_eq!( albers.kind, CrsKind::ProjectedOgraphic);
    assert!( albers.wkt.contains(r#"PARAMETER["Standard_Parallel_1",60.0]"#));
    assert!( albers.wkt.contains(r#"AXIS["longitude",WEST],AUTHORITY["IAU2015","49901"]]"#));
    assert!( albers.wkt.ends_with(r#"AUTHORITY["IAU2015","49977"]]"#));
}

#[test]
fn test_no_ographic_without_rotation() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("radii_IAU2015.csv");
    fs::write( &path, "10,Sun,695700000,695700000,695700000,695700000,,,\n").unwrap();
    let crss = IauCatalog::new(&path).unwrap().process_file().unwrap();
    assert_eq!( crss.len(), 23);
    assert!( crss.iter().all( |c| c.kind.is_ocentric()));
}

#[test]
fn test_unknown_rotation() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("radii_IAU2015.csv");
    fs::write( &path, "499,Mars,3389500,3396190,3396190,3376200,Sideways,,\n").unwrap();
    let e = IauCatalog::new(&path).unwrap().process_file().unwrap_err();
    assert_eq!( e.to_string(), "The rotation code is unknown : Sideways");
}

#[test]
fn test_save_as_wkt() {
    let (_tmp, crss) = load_catalog();
    let mut out: Vec<u8> = Vec::new();
    save_as_wkt( &crss, &AcceptAll, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!( text.starts_with("#IAU2015 WKT Codes\n"));
    assert!( text.contains("#\n\n\n\n#IAU2015 WKT Codes for Moon\n30100,GEOGCS[\"Moon 2015\""));
    assert!( text.contains("\n\n#IAU2015 WKT Codes for Mars\n49900,"));
    // west positive longitudes get the PROJ extension
    assert!( text.contains(r#"AXIS["longitude",WEST],EXTENSION["PROJ4","+proj=longlat +axis=wnu +no_defs"],AUTHORITY["IAU2015","49901"]]"#));
}

#[test]
fn test_save_as_wkt_with_invalid() {
    let (_tmp, crss) = load_catalog();
    let mut out: Vec<u8> = Vec::new();
    let res = save_as_wkt( &crss, &RejectProjected, &mut out);
    assert!( matches!( res, Err(PgisIauError::ValidationFailed{ count: 132 })));

    let text = String::from_utf8(out).unwrap();
    assert!( text.contains("\n# 30110,PROJCS[\"Moon_Equirectangular\""));
    assert!( text.ends_with("AUTHORITY[\"IAU2015\",\"29983\"]]\n"));
}

#[test]
fn test_save_as_proj4() {
    let (_tmp, crss) = load_catalog();
    let mut out: Vec<u8> = Vec::new();
    save_as_proj4( &crss, &AcceptAll, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!( text.contains("\n#30100 : IAU2015 WKT Codes for Moon : Ocentric \n<30100> +proj=longlat +no_defs\n"));
    assert!( text.contains("\n#49910 : IAU2015 WKT Codes for Mars : Projected ocentric  - Equirectangular\n<49910> +proj=longlat +no_defs\n"));
    assert!( !text.contains("<30101>"));
    assert_eq!( text.matches('<').count(), 3 * 23);
}

#[test]
fn test_save_as_postgis() {
    let (_tmp, crss) = load_catalog();
    let mut out: Vec<u8> = Vec::new();
    save_as_postgis( &crss, &AcceptAll, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!( lines.len(), 6);
    assert_eq!( lines[2], "DELETE FROM spatial_ref_sys WHERE srid IN (49900);");
    assert!( lines[3].starts_with("INSERT INTO spatial_ref_sys (srid, auth_name, auth_srid, srtext, proj4text) VALUES (49900, 'IAU2015', 49900, 'GEOGCS[\"Mars 2015\""));
    assert!( lines[3].ends_with("'+proj=longlat +a=3396190.0 +b=3376200.0 +no_defs');"));
}

#[test]
fn test_save_as_prj() {
    let (tmp, crss) = load_catalog();
    save_as_prj( &crss, &AcceptAll, tmp.path()).unwrap();

    let prj = fs::read_to_string( tmp.path().join("Mars 2015.prj")).unwrap();
    assert!( prj.starts_with("PROJCS[\"Mars_Robinson\""));
    assert!( prj.ends_with("AUTHORITY[\"IAU2015\",\"49982\"]]"));
    assert!( tmp.path().join("Venus 2015.prj").is_file());
}
