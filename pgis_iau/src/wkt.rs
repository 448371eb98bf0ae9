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

//! WKT1 strings for planetary geographic and projected coordinate reference systems

use std::fmt;
use strum::Display;
use pgis_common::fmt::py_float;

use crate::errors::{Result, wkt_error};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Display)]
pub enum CrsKind {
    #[strum(to_string="Ocentric")]
    Ocentric,
    #[strum(to_string="Ographic")]
    Ographic,
    #[strum(to_string="Projected ocentric")]
    ProjectedOcentric,
    #[strum(to_string="Projected ographic")]
    ProjectedOgraphic,
}

impl CrsKind {
    pub fn is_ocentric (&self) -> bool {
        matches!( self, CrsKind::Ocentric | CrsKind::ProjectedOcentric)
    }
}

/// direction in which longitudes are counted positive
#[derive(Debug,Clone,Copy,PartialEq,Eq,Display)]
pub enum LongitudeAxis {
    #[strum(to_string="WEST")]
    West,
    #[strum(to_string="EAST")]
    East,
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl fmt::Display for ParamValue {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{}", py_float(*v)),
        }
    }
}

#[derive(Debug,PartialEq)]
pub struct Projection {
    /// offset added to the CRS code of the body
    pub code: u64,
    pub url: Option<&'static str>,
    pub projection: &'static str,
    pub parameters: &'static [(&'static str, ParamValue)],
}

use ParamValue::{Int,Float};

// the order of entries and parameters is part of the generated output
pub static PROJECTIONS: [Projection; 22] = [
    Projection { code: 10, url: Some("https://proj4.org/operations/projections/eqc.html"), projection: "Equirectangular",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(0)), ("latitude_Of_Origin",Int(0))] },
    Projection { code: 12, url: Some("https://proj4.org/operations/projections/eqc.html"), projection: "Equirectangular",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(180)), ("Latitude_Of_Origin",Int(0))] },
    Projection { code: 14, url: Some("https://proj4.org/operations/projections/sinu.html"), projection: "Sinusoidal",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Longitude_Of_Center",Int(0))] },
    Projection { code: 16, url: Some("https://proj4.org/operations/projections/sinu.html"), projection: "Sinusoidal",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Longitude_Of_Center",Int(180))] },
    Projection { code: 18, url: Some("https://proj4.org/operations/projections/stere.html"), projection: "Stereographic",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(0)), ("Scale_Factor",Int(1)), ("Latitude_Of_Origin",Int(90))] },
    Projection { code: 20, url: Some("https://proj4.org/operations/projections/stere.html"), projection: "Stereographic",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(0)), ("Scale_Factor",Int(1)), ("Latitude_Of_Origin",Int(-90))] },
    Projection { code: 22, url: Some("https://proj4.org/operations/projections/moll.html"), projection: "Mollweide",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(0))] },
    Projection { code: 24, url: Some("https://proj4.org/operations/projections/moll.html"), projection: "Mollweide",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(180))] },
    Projection { code: 26, url: Some("https://proj4.org/operations/projections/robin.html"), projection: "Robinson",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Longitude_Of_Center",Int(0))] },
    Projection { code: 28, url: Some("https://proj4.org/operations/projections/robin.html"), projection: "Robinson",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Longitude_Of_Center",Int(180))] },

    //--- the "auto" projections
    Projection { code: 60, url: Some("https://proj4.org/operations/projections/sinu.html"), projection: "Sinusoidal",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Longitude_Of_Center",Int(0))] },
    Projection { code: 62, url: Some("https://proj4.org/operations/projections/stere.html"), projection: "Stereographic",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(0)), ("Scale_Factor",Int(1)), ("Latitude_Of_Origin",Int(0))] },
    Projection { code: 64, url: Some("https://proj4.org/operations/projections/tmerc.html"), projection: "Transverse_Mercator",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(0)), ("Scale_Factor",Float(0.9996)), ("Latitude_Of_Origin",Int(0))] },
    Projection { code: 66, url: Some("https://proj4.org/operations/projections/ortho.html"), projection: "Orthographic",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(0)), ("Latitude_Of_Origin",Int(90))] },
    Projection { code: 68, url: Some("https://proj4.org/operations/projections/eqc.html"), projection: "Equirectangular",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(180)), ("Latitude_Of_Origin",Int(0))] },
    Projection { code: 70, url: Some("https://proj4.org/operations/projections/lcc.html"), projection: "Lambert_Conformal_Conic_2SP",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(0)), ("Standard_Parallel_1",Int(-20)),
                      ("Standard_Parallel_2",Int(20)), ("Latitude_Of_Origin",Int(0))] },
    Projection { code: 72, url: Some("https://proj4.org/operations/projections/laea.html"), projection: "Lambert_Azimuthal_Equal_Area",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Longitude_Of_Center",Int(0)), ("Latitude_Of_Center",Int(90))] },
    Projection { code: 74, url: Some("https://proj4.org/operations/projections/merc.html"), projection: "Mercator_1SP",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Int(0)), ("Scale_Factor",Int(1))] },
    Projection { code: 76, url: Some("https://proj4.org/operations/projections/aea.html"), projection: "Albers_Conic_Equal_Area",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Longitude_Of_Center",Float(0.0)), ("Standard_Parallel_1",Float(60.0)),
                      ("Standard_Parallel_2",Float(20.0)), ("Latitude_Of_Center",Float(40.0))] },
    Projection { code: 78, url: None, projection: "Oblique_Cylindrical_Equal_Area",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Float(0.0)), ("Standard_Parallel_1",Float(0.0))] },
    Projection { code: 80, url: Some("https://proj4.org/operations/projections/moll.html"), projection: "Mollweide",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Central_Meridian",Float(0.0))] },
    Projection { code: 82, url: Some("https://proj4.org/operations/projections/robin.html"), projection: "Robinson",
        parameters: &[("False_Easting",Int(0)), ("False_Northing",Int(0)), ("Longitude_of_center",Float(0.0))] },
];

#[derive(Debug,Clone)]
struct WktProjection {
    name: String,
    projection: &'static Projection,
    authority_name: String,
    authority_code: String,
}

/// builder for GEOGCS and PROJCS strings. Without a longitude axis (or with East) no AXIS
/// elements are written, which means longitudes are counted positive to the east
#[derive(Debug,Clone)]
pub struct Wkt {
    geogcs_name: String,
    datum_name: String,
    spheroid_name: String,
    radius: f64,
    inverse_flattening: f64,
    authority_name: String,
    authority_code: String,
    projection: Option<WktProjection>,
    longitude_axis: Option<LongitudeAxis>,
    longitude_name: String,
    longitude_pos: f64,
}

impl Wkt {
    pub fn new (geogcs_name: &str, datum_name: &str, spheroid_name: &str, radius: f64, inverse_flattening: f64,
                authority_name: &str, authority_code: &str) -> Result<Self>
    {
        if !(radius > 0.0) {
            return Err( wkt_error( format!("radius={radius}, it must be > 0 for {geogcs_name}")))
        }
        Ok( Wkt {
            geogcs_name: geogcs_name.to_string(),
            datum_name: datum_name.to_string(),
            spheroid_name: spheroid_name.to_string(),
            radius,
            inverse_flattening,
            authority_name: authority_name.to_string(),
            authority_code: authority_code.to_string(),
            projection: None,
            longitude_axis: None,
            longitude_name: "Reference_Meridian".to_string(),
            longitude_pos: 0.0,
        })
    }

    pub fn set_longitude_axis (&mut self, axis: LongitudeAxis) {
        self.longitude_axis = Some(axis);
    }

    pub fn longitude_axis (&self) -> LongitudeAxis {
        self.longitude_axis.unwrap_or(LongitudeAxis::East)
    }

    /// longitude position is given in the rotation direction of the body and can't exceed 360
    pub fn set_primem (&mut self, name: &str, pos: f64) -> Result<()> {
        if pos > 360.0 {
            return Err( wkt_error( format!("prime meridian position {pos} of {} must be between 0 and 360", self.geogcs_name)))
        }
        self.longitude_name = name.to_string();
        self.longitude_pos = pos;
        Ok(())
    }

    pub fn set_projection (&mut self, name: &str, projection: &'static Projection, authority_name: &str, authority_code: &str) {
        self.projection = Some( WktProjection {
            name: name.to_string(),
            projection,
            authority_name: authority_name.to_string(),
            authority_code: authority_code.to_string(),
        });
    }

    pub fn unset_projection (&mut self) {
        self.projection = None;
    }

    fn write_geogcs (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GEOGCS[\"{}\",DATUM[\"{}\",SPHEROID[\"{}\",{},{}],TOWGS84[0,0,0]],PRIMEM[\"{}\",{}],",
               self.geogcs_name, self.datum_name, self.spheroid_name, py_float(self.radius), py_float(self.inverse_flattening),
               self.longitude_name, py_float(self.longitude_pos))?;
        write!(f, "UNIT[\"Degree\",0.0174532925199433,AUTHORITY[\"EPSG\",\"9122\"]],")?;
        if self.longitude_axis == Some(LongitudeAxis::West) {
            write!(f, "AXIS[\"latitude\",NORTH],AXIS[\"longitude\",{}],", LongitudeAxis::West)?;
        }
        write!(f, "AUTHORITY[\"{}\",\"{}\"]]", self.authority_name, self.authority_code)
    }
}

impl fmt::Display for Wkt {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.projection {
            Some(p) => {
                write!(f, "PROJCS[\"{}\",", p.name)?;
                self.write_geogcs(f)?;
                write!(f, ",PROJECTION[\"{}\"]", p.projection.projection)?;
                for (k,v) in p.projection.parameters {
                    write!(f, ",PARAMETER[\"{k}\",{v}]")?;
                }
                write!(f, ",UNIT[\"Meter\",1, AUTHORITY[\"EPSG\",\"9001\"]],AUTHORITY[\"{}\",\"{}\"]]", p.authority_name, p.authority_code)
            }
            None => self.write_geogcs(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_table() {
        let codes: Vec<u64> = PROJECTIONS.iter().map( |p| p.code).collect();
        assert_eq!( codes, vec![10,12,14,16,18,20,22,24,26,28,60,62,64,66,68,70,72,74,76,78,80,82]);
        assert!( PROJECTIONS.iter().all( |p| p.parameters[0].0 == "False_Easting" && p.parameters[1].0 == "False_Northing"));
        assert_eq!( PROJECTIONS[0].parameters[3].0, "latitude_Of_Origin");
    }

    #[test]
    fn test_param_value() {
        assert_eq!( Int(0).to_string(), "0");
        assert_eq!( Int(-90).to_string(), "-90");
        assert_eq!( Float(60.0).to_string(), "60.0");
        assert_eq!( Float(0.9996).to_string(), "0.9996");
    }

    #[test]
    fn test_primem_range() {
        let mut wkt = Wkt::new( "Moon 2015", "D_Moon_2015", "Moon_2015_IAU", 1737400.0, 0.0, "IAU2015", "30100").unwrap();
        assert!( wkt.set_primem( "Reference_Meridian", 361.0).is_err());
        assert!( wkt.set_primem( "Reference_Meridian", 360.0).is_ok());
        assert!( Wkt::new( "x", "x", "x", -1.0, 0.0, "IAU2015", "1").is_err());
    }
}
