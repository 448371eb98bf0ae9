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

//! export GDAL rasters as raw images with a detached PDS3 label in the format used for Lunar
//! Mapping and Modeling Project (LMMP) products. Supported are geographic, Equirectangular and
//! polar stereographic rasters

use std::f64::consts::PI;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;
use chrono::Local;
use tracing::warn;
use pgis_common::fmt::fmt_g;
use pgis_common::fs::filename;
use pgis_gdal::{Dataset, GdalDataType, GeoTransform, SpatialRef, CoordTransform, data_type_name, geographic_srs,
                pixel_to_geo, set_traditional_axis_order, transform_point_2d};
use pgis_gdal::programs::translate;

use crate::errors::{Result, PgisPdsError, invalid_input};

pub const PRODUCER_INSTITUTION: &str = "Lunar Mapping and Modeling Project";

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SampleFormat {
    pub bits: usize,
    pub sample_type: &'static str,
    pub bit_mask: &'static str,
}

impl SampleFormat {
    pub fn for_type (data_type: GdalDataType) -> Result<Self> {
        use GdalDataType::*;
        match data_type {
            Float32 => Ok( SampleFormat { bits: 32, sample_type: "PC_REAL", bit_mask: "2#11111111111111111111111111111111#" }),
            Int16 => Ok( SampleFormat { bits: 16, sample_type: "LSB_INTEGER", bit_mask: "2#1111111111111111#" }),
            UInt16 => Ok( SampleFormat { bits: 16, sample_type: "UNSIGNED_INTEGER", bit_mask: "2#1111111111111111#" }),
            UInt8 => Ok( SampleFormat { bits: 8, sample_type: "UNSIGNED_INTEGER", bit_mask: "2#11111111#" }),
            _ => Err( PgisPdsError::UnsupportedType( data_type_name(data_type).to_string()))
        }
    }

    /// CORE_NULL, CORE_LOW_REPR_SATURATION, CORE_LOW_INSTR_SATURATION, CORE_HIGH_REPR_SATURATION
    /// and CORE_HIGH_INSTR_SATURATION
    pub fn special_values (&self) -> [&'static str;5] {
        match self.bits {
            32 => ["16#FF7FFFFB#", "16#FF7FFFFC#", "16#FF7FFFFD#", "16#FF7FFFFF#", "16#FF7FFFFE#"],
            16 => ["-32768", "-32767", "-32766", "32767", "32768"],
            _ => ["0", "0", "0", "255", "255"]
        }
    }
}

/// the label file for an `.IMG`/`.img` output
pub fn label_filename (img: &str) -> Result<String> {
    let lbl = img.replace("IMG", "LBL").replace("img", "lbl");
    if lbl.eq_ignore_ascii_case(img) {
        Err( invalid_input( format!("Extension must be .IMG or .img - unable to run using filename: {img}")))
    } else {
        Ok(lbl)
    }
}

/// body name from an ESRI style datum name such as `D_Moon_2000`
pub fn target_from_datum (datum: &str) -> String {
    datum.replace("D_", "").replace("_2000", "")
}

/// (pixels per degree, km per pixel)
pub fn map_resolution (geographic: bool, pixel_width: f64, a_axis_km: f64) -> (f64,f64) {
    if geographic {
        (1.0 / pixel_width, pixel_width * (a_axis_km * PI / 180.0))
    } else {
        (1.0 / (pixel_width / (a_axis_km * 1000.0 * PI / 180.0)), pixel_width / 1000.0)
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct MapProjection {
    pub name: String,
    pub center_lat: f64,
    pub center_lon: f64,
}

pub fn map_projection (srs: &SpatialRef) -> Result<MapProjection> {
    if srs.is_geographic() {
        return Ok( MapProjection { name: "SIMPLE_CYLINDRICAL".to_string(), center_lat: 0.0, center_lon: 0.0 })
    }
    if !srs.is_projected() {
        return Err( invalid_input("Can't parse this type of projection"))
    }

    let name = srs.get_attr_value("PROJECTION", 0)?.unwrap_or_default();
    let lat_param = if name.eq_ignore_ascii_case("Equirectangular") {
        Some("standard_parallel_1")
    } else if ["Polar_Stereographic", "Stereographic_South_Pole", "Stereographic_North_Pole"].iter().any( |p| name.eq_ignore_ascii_case(p)) {
        Some("latitude_of_origin")
    } else {
        None
    };

    match lat_param {
        Some(param) => {
            let center_lat = srs.get_proj_param(param)?.unwrap_or(0.0);
            let center_lon = srs.get_proj_param("central_meridian")?.unwrap_or(0.0);
            Ok( MapProjection { name, center_lat, center_lon })
        }
        None => {
            warn!("projection {name} is not supported, center set to 0,0");
            Ok( MapProjection { name, center_lat: 0.0, center_lon: 0.0 })
        }
    }
}

/// file name parts that identify the product, e.g. `LRO_LOLA_DEM_v2.tif`
#[derive(Debug,Clone,PartialEq)]
pub struct ProductName {
    pub product_id: String,
    pub version_id: String,
    pub instrument_host: String,
    pub instrument: String,
}

impl ProductName {
    pub fn parse (src: &str) -> Self {
        let name = filename(&src).unwrap_or(src);
        let product_id = name.split('.').next().unwrap_or(name).to_string();
        let parts: Vec<&str> = name.split('_').collect();

        let version_id = match parts.last() {
            Some(last) if name.contains("_v") => format!("{}.0", last.split('.').next().unwrap_or(*last).to_uppercase()),
            _ => "V1.0".to_string()
        };
        let instrument_host = parts.first().map( |s| s.to_string()).unwrap_or_default();
        let instrument = parts.get(1).map( |s| s.to_string()).unwrap_or_else( || "N/A".to_string());

        ProductName { product_id, version_id, instrument_host, instrument }
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct Pds3Label {
    pub source: String,
    pub image_file: String,
    pub product: ProductName,
    pub target: String,
    pub projection: MapProjection,
    pub a_axis_km: f64,
    pub c_axis_km: f64,
    pub lines: usize,
    pub samples: usize,
    pub bands: usize,
    pub map_resolution: f64,
    pub map_scale: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub west_lon: f64,
    pub east_lon: f64,
    pub offset: f64,
    pub scale: f64,
    pub sample: SampleFormat,
    pub creation_time: String,
}

/// corner in source and (if a transformation is available) geographic coordinates
fn corner (gt: &GeoTransform, to_geo: Option<&CoordTransform>, x: f64, y: f64) -> ((f64,f64), Option<(f64,f64)>) {
    let p = pixel_to_geo( gt, x, y);
    (p, to_geo.and_then( |t| transform_point_2d( t, p.0, p.1).ok()))
}

impl Pds3Label {
    pub fn from_dataset (ds: &Dataset, source: &str, image_file: &str) -> Result<Self> {
        let srs = ds.spatial_ref().map_err( |_| invalid_input("No Coordinate System defined"))?;
        set_traditional_axis_order(&srs);

        let target = target_from_datum( &srs.get_attr_value("DATUM", 0)?.unwrap_or_default());
        let a_axis_km = srs.semi_major()? / 1000.0;
        let c_axis_km = srs.semi_minor()? / 1000.0;
        let projection = map_projection(&srs)?;

        let gt = ds.geo_transform()?;
        let (samples,lines) = ds.raster_size();
        let (map_resolution, map_scale) = map_resolution( srs.is_geographic(), gt[1], a_axis_km);

        let geog = geographic_srs(&srs)?;
        let to_geo = CoordTransform::new( &srs, &geog).ok();
        let (ul, ul_geo) = corner( &gt, to_geo.as_ref(), 0.0, 0.0);
        let (lr, lr_geo) = corner( &gt, to_geo.as_ref(), samples as f64, lines as f64);
        let (west_lon, max_lat) = ul_geo.unwrap_or(ul);
        let (east_lon, min_lat) = lr_geo.unwrap_or(lr);

        let band = ds.rasterband(1)?;
        let sample = SampleFormat::for_type( band.band_type())?;

        Ok( Pds3Label {
            source: source.to_string(),
            image_file: image_file.to_string(),
            product: ProductName::parse(source),
            target,
            projection,
            a_axis_km, c_axis_km,
            lines, samples,
            bands: ds.raster_count(),
            map_resolution, map_scale,
            min_lat, max_lat, west_lon, east_lon,
            offset: band.offset().unwrap_or(0.0),
            scale: band.scale().unwrap_or(1.0),
            sample,
            creation_time: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        })
    }

    pub fn record_bytes (&self) -> usize {
        self.samples * self.sample.bits / 8
    }

    pub fn render (&self) -> String {
        let mut s = String::new();
        let p = &self.product;
        let core = self.sample.special_values();

        // formatting into a String can't fail
        let _ = write!( s, "\
PDS_VERSION_ID            = PDS3

/* The source image data definition. */
FILE_NAME      = \"{img}\"
RECORD_TYPE   = FIXED_LENGTH
RECORD_BYTES  = {record_bytes}
FILE_RECORDS  = {lines}
^IMAGE        = \"{img}\"

/* Identification Information  */
DATA_SET_ID               = \"{id}\"
DATA_SET_NAME             = \"{id}\"
PRODUCER_INSTITUTION_NAME = \"{PRODUCER_INSTITUTION}\"
PRODUCER_ID               = \"LMMP_TEAM\"
PRODUCER_FULL_NAME        = \"LMMP TEAM\"
PRODUCT_ID                = \"{id}\"
PRODUCT_VERSION_ID        = \"{version}\"
PRODUCT_TYPE              = \"RDR\"
INSTRUMENT_HOST_NAME      = \"{host}\"
INSTRUMENT_HOST_ID        = \"{host}\"
INSTRUMENT_NAME           = \"{instr}\"
INSTRUMENT_ID             = \"{instr}\"
TARGET_NAME               = {target}
MISSION_PHASE_NAME        = \"POST MISSION\"
RATIONALE_DESC            = \"Created at the request of NASA's Exploration
                            Systems Mission Directorate to support future
                            human exploration\"
SOFTWARE_NAME             = \"ISIS 3.2.1 | SOCET SET v5.5 (r) BAE Systems
                            | GDAL 1.8\"

/* Time Parameters */
START_TIME                   = \"N/A\"
STOP_TIME                    = \"N/A\"
SPACECRAFT_CLOCK_START_COUNT = \"N/A\"
SPACECRAFT_CLOCK_STOP_COUNT  = \"N/A\"
PRODUCT_CREATION_TIME        = {time}

",
            img = self.image_file, record_bytes = self.record_bytes(), lines = self.lines,
            id = p.product_id, version = p.version_id, host = p.instrument_host, instr = p.instrument,
            target = self.target.to_uppercase(), time = self.creation_time);

        let _ = write!( s, "\
OBJECT = IMAGE_MAP_PROJECTION
    ^DATA_SET_MAP_PROJECTION     = \"DSMAP.CAT\"
    MAP_PROJECTION_TYPE          = \"{proj}\"
    PROJECTION_LATITUDE_TYPE     = PLANETOCENTRIC
    A_AXIS_RADIUS                = {a:.1} <KM>
    B_AXIS_RADIUS                = {a:.1} <KM>
    C_AXIS_RADIUS                = {c:.1} <KM>
    COORDINATE_SYSTEM_NAME       = PLANETOCENTRIC
    POSITIVE_LONGITUDE_DIRECTION = EAST
    KEYWORD_LATITUDE_TYPE        = PLANETOCENTRIC
    /* NOTE:  CENTER_LATITUDE and CENTER_LONGITUDE describe the location   */
    /* of the center of projection, which is not necessarily equal to the  */
    /* location of the center point of the image.                          */
    CENTER_LATITUDE              = {clat:5.2} <DEG>
    CENTER_LONGITUDE             = {clon:5.2} <DEG>
    LINE_FIRST_PIXEL             = 1
    LINE_LAST_PIXEL              = {lines}
    SAMPLE_FIRST_PIXEL           = 1
    SAMPLE_LAST_PIXEL            = {samples}
    MAP_PROJECTION_ROTATION      = 0.0 <DEG>
    MAP_RESOLUTION               = {mapres:.4} <PIX/DEG>
    MAP_SCALE                    = {kmres:.8} <KM/PIXEL>
    MINIMUM_LATITUDE             = {minlat:.8} <DEGREE>
    MAXIMUM_LATITUDE             = {maxlat:.8} <DEGREE>
    WESTERNMOST_LONGITUDE        = {west:.8} <DEGREE>
    EASTERNMOST_LONGITUDE        = {east:.8} <DEGREE>
    LINE_PROJECTION_OFFSET       = {line_off:.1}
    SAMPLE_PROJECTION_OFFSET     = {sample_off:.1}
END_OBJECT = IMAGE_MAP_PROJECTION

",
            proj = self.projection.name, a = self.a_axis_km, c = self.c_axis_km,
            clat = self.projection.center_lat, clon = self.projection.center_lon,
            lines = self.lines, samples = self.samples, mapres = self.map_resolution, kmres = self.map_scale,
            minlat = self.min_lat, maxlat = self.max_lat, west = self.west_lon, east = self.east_lon,
            line_off = (self.west_lon / self.map_scale * 1000.0) - 0.5,
            sample_off = (self.max_lat / self.map_scale * 1000.0) + 0.5);

        let _ = write!( s, "\
OBJECT = IMAGE
    NAME                       = \"{source}\"
    DESCRIPTION                = \"Export data set from LMMP portal.
                                 see filename for data type.\"
    LINES                      = {lines}
    LINE_SAMPLES               = {samples}
    UNIT                       = METER
    OFFSET                     = {offset}
    SCALING_FACTOR             = {scale}
    SAMPLE_TYPE                = {stype}
    SAMPLE_BITS                = {bits}
    SAMPLE_BIT_MASK            = {mask}
    BANDS                      = {bands}
    BAND_STORAGE_TYPE          = BAND_SEQUENTIAL
    CORE_NULL                  = {c0}
    CORE_LOW_REPR_SATURATION   = {c1}
    CORE_LOW_INSTR_SATURATION  = {c2}
    CORE_HIGH_REPR_SATURATION  = {c3}
    CORE_HIGH_INSTR_SATURATION = {c4}
END_OBJECT = IMAGE
END
",
            source = self.source, lines = self.lines, samples = self.samples,
            offset = fmt_g( self.offset, 10), scale = fmt_g( self.scale, 10),
            stype = self.sample.sample_type, bits = self.sample.bits, mask = self.sample.bit_mask, bands = self.bands,
            c0 = core[0], c1 = core[1], c2 = core[2], c3 = core[3], c4 = core[4]);
        s
    }
}

/// gdalinfo style summary of the input, printed with `-debug`
pub fn dataset_report (ds: &Dataset) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let driver = ds.driver();
    lines.push( format!("Driver: {}/{}", driver.short_name(), driver.long_name()));
    let (w,h) = ds.raster_size();
    lines.push( format!("Size is {w}, {h}"));

    let srs = ds.spatial_ref()?;
    set_traditional_axis_order(&srs);
    lines.push( format!("Coordinate System is:\n{}", srs.to_pretty_wkt()?));

    let gt = ds.geo_transform()?;
    lines.push( format!("Origin = ({:.15},{:.15})", gt[0], gt[3]));
    lines.push( format!("Pixel Size = ({:.15},{:.15})", gt[1], gt[5]));

    let to_geo = geographic_srs(&srs).ok().and_then( |geog| CoordTransform::new( &srs, &geog).ok());
    lines.push( "Corner Coordinates:".to_string());
    let (wf,hf) = (w as f64, h as f64);
    for (name,x,y) in [("Upper Left",0.0,0.0), ("Lower Left",0.0,hf), ("Upper Right",wf,0.0), ("Lower Right",wf,hf), ("Center",wf/2.0,hf/2.0)] {
        let ((gx,gy), geo) = corner( &gt, to_geo.as_ref(), x, y);
        let mut line = if gx.abs() < 181.0 && gy.abs() < 91.0 {
            format!("{:<11} ({:12.7},{:12.7}) ", name, gx, gy)
        } else {
            format!("{:<11} ({:12.3},{:12.3}) ", name, gx, gy)
        };
        if let Some((lon,lat)) = geo {
            let _ = write!( line, "({lon:.7},{lat:.7})");
        }
        lines.push(line);
    }

    for i in 1..=ds.raster_count() {
        let band = ds.rasterband(i)?;
        let (bx,by) = band.block_size();
        lines.push( format!("Band {} Block={}x{} Type={}", i, bx, by, data_type_name( band.band_type())));
        if let Some(nodata) = band.no_data_value() {
            lines.push( format!("  NoData Value={}", fmt_g( nodata, 18)));
        }
    }
    Ok(lines)
}

/// write `<img>` as raw ENVI image and the LMMP PDS3 label next to it
pub fn gdal_to_pds3 (src: &Path, img: &str, debug: bool) -> Result<Pds3Label> {
    let lbl = label_filename(img)?;
    let ds = Dataset::open(src)?;
    if debug {
        for line in dataset_report(&ds)? { println!("{line}"); }
    }

    let label = Pds3Label::from_dataset( &ds, &src.to_string_lossy(), img)?;
    fs::write( &lbl, label.render())?;

    println!("Please wait, writing out raw image: {img}");
    translate( &ds, Path::new(img), &["-of", "ENVI"])?;
    println!("Complete. PDS label also created: {lbl}");
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_filename() {
        assert_eq!( label_filename("out/moon.IMG").unwrap(), "out/moon.LBL");
        assert_eq!( label_filename("moon.img").unwrap(), "moon.lbl");
        assert!( label_filename("moon.raw").is_err());
    }

    #[test]
    fn test_product_name() {
        let p = ProductName::parse("data/LRO_LOLA_DEM_v2.tif");
        assert_eq!( p.product_id, "LRO_LOLA_DEM_v2");
        assert_eq!( p.version_id, "V2.0");
        assert_eq!( (p.instrument_host.as_str(), p.instrument.as_str()), ("LRO", "LOLA"));

        let p = ProductName::parse("mosaic.tif");
        assert_eq!( p.version_id, "V1.0");
        assert_eq!( p.instrument, "N/A");
    }

    #[test]
    fn test_resolution() {
        assert_eq!( target_from_datum("D_Moon_2000"), "Moon");

        let (mapres, kmres) = map_resolution( true, 0.5, 1737.4);
        assert_eq!( mapres, 2.0);
        assert!( (kmres - 15.161675).abs() < 1e-5);

        let (mapres, kmres) = map_resolution( false, 100.0, 1737.4);
        assert!( (mapres - 303.2335).abs() < 1e-3);
        assert_eq!( kmres, 0.1);
    }

    #[test]
    fn test_sample_format() {
        let f = SampleFormat::for_type( GdalDataType::Int16).unwrap();
        assert_eq!( (f.bits, f.sample_type), (16, "LSB_INTEGER"));
        assert_eq!( f.special_values()[0], "-32768");
        assert!( SampleFormat::for_type( GdalDataType::Float64).is_err());
    }
}
