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

pub mod errors;
pub mod programs;
pub mod clip;
pub mod extent;
pub mod stdpar;
pub mod slope;
pub mod hist;
pub mod clipper;

use std::{collections::HashMap, ffi::CString, path::Path, ptr::null, sync::Mutex};
use lazy_static::lazy_static;
use ndarray::Array2;
use gdal::raster::RasterCreationOptions;
use gdal_sys::CPLErr;

// re-exported so that downstream crates don't need their own gdal dependency for the common types
pub use gdal::{self, Driver, DriverManager, Metadata, Dataset, errors::GdalError, GeoTransform, GeoTransformEx, cpl::CslStringList};
pub use gdal::raster::{GdalType,GdalDataType,RasterBand,Buffer};
pub use gdal::spatial_ref::{CoordTransform, SpatialRef};

use pgis_common::fs::lowercase_extension;
use crate::errors::{Result, PgisGdalError, misc_error, unsupported_type, last_gdal_error};

lazy_static! {
    // we can't populate this by iterating over DriverManager since several drivers share extensions
    static ref EXT_MAP: HashMap<&'static str, &'static str> = HashMap::from( [ // file extension -> driver short name
        //--- raster drivers
        ("tif", "GTiff"),
        ("tiff", "GTiff"),
        ("vrt", "VRT"),
        ("png", "PNG"),
        ("img", "ENVI"),
        ("cub", "ISIS3"),
        ("lbl", "PDS"),
        ("xml", "PDS4"),
        ("h5", "HDF5"),
        ("hdf5", "HDF5"),

        //--- vector drivers
        ("json", "GeoJSON"),
        ("geojson", "GeoJSON"),
        ("csv", "CSV"),
        ("gpkg", "GPKG"),
        ("shp", "ESRI Shapefile"),
    ]);
}

/// use this to protect non-threadsafe GDAL operations
static GLOB_GDAL_MUTEX: Mutex<usize> = Mutex::new(0);

/// extension lookup is case-insensitive
pub fn get_driver_name_from_filename (filename: &str) -> Option<&'static str> {
    lowercase_extension(filename).and_then( |ext| EXT_MAP.get( ext.as_str()).map(|v| &**v))
}

pub fn get_driver (name: &str) -> Result<Driver> {
    Ok( DriverManager::get_driver_by_name(name)? )
}

pub fn ok_true <F> (cond: bool, err: F) -> Result<()> where F: FnOnce()->String {
    if cond { Ok(()) } else { Err( PgisGdalError::MiscError(err())) }
}

pub fn ok_ce_none (res: CPLErr::Type) -> Result<()> {
    if res == CPLErr::CE_None { Ok(()) } else { Err(last_gdal_error()) }
}

/// run the provided closure with the global GDAL error handler disabled. Note this does not
/// change the return value but prevents GDAL from printing errors and warnings to the console
pub fn run_quiet<T,F> (f: F)->Result<T> where F: FnOnce()->Result<T> {
    let _lock = GLOB_GDAL_MUTEX.lock().map_err( |_| misc_error("GDAL mutex poisoned"))?;
    unsafe { gdal_sys::CPLPushErrorHandler( Some(gdal_sys::CPLQuietErrorHandler)); }
    let result = f();
    unsafe { gdal_sys::CPLPopErrorHandler(); }
    result
}

/* #region geotransform and SRS ********************************************************************************/

pub fn new_geotransform (x_upper_left: f64, x_resolution: f64, row_rotation: f64,
                         y_upper_left: f64, col_rotation: f64, y_resolution: f64) -> GeoTransform {
    [x_upper_left,x_resolution,row_rotation,y_upper_left,col_rotation,y_resolution]
}

/// georeferenced position of the upper left corner of pixel (x,y)
pub fn pixel_to_geo (gt: &GeoTransform, x: f64, y: f64) -> (f64,f64) {
    ( gt[0] + x * gt[1] + y * gt[2],
      gt[3] + x * gt[4] + y * gt[5] )
}

pub fn transform_point_2d (transform: &CoordTransform, x: f64, y: f64) -> Result<(f64,f64)> {
    let mut ax: [f64;1] = [x];
    let mut ay: [f64;1] = [y];
    let mut az: [f64;0] = [];

    transform.transform_coords(&mut ax, &mut ay, &mut az)?;
    Ok((ax[0],ay[0]))
}

/// switch a SpatialRef to x=longitude/easting, y=latitude/northing axis order
pub fn set_traditional_axis_order (srs: &SpatialRef) {
    unsafe {
        gdal_sys::OSRSetAxisMappingStrategy( srs.to_c_hsrs(), gdal_sys::OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER);
    }
}

/// the geographic coordinate system of the provided SRS, with traditional GIS axis order
pub fn geographic_srs (srs: &SpatialRef) -> Result<SpatialRef> {
    let geog = srs.geog_cs()?;
    set_traditional_axis_order(&geog);
    Ok(geog)
}

/* #endregion geotransform and SRS */

/* #region data types and bands *******************************************************************************/

/// map GDAL data type names as used on the command line of the GDAL utilities
pub fn parse_data_type (name: &str) -> Result<GdalDataType> {
    use GdalDataType::*;
    match name {
        "Byte" | "UInt8" => Ok(UInt8),
        "Int8"    => Ok(Int8),
        "Int16"   => Ok(Int16),
        "UInt16"  => Ok(UInt16),
        "Int32"   => Ok(Int32),
        "UInt32"  => Ok(UInt32),
        "Int64"   => Ok(Int64),
        "UInt64"  => Ok(UInt64),
        "Float32" => Ok(Float32),
        "Float64" => Ok(Float64),
        // complex types can't be created through create_with_band_type
        "CInt16" | "CInt32" | "CFloat32" | "CFloat64" => Err( unsupported_type(name)),
        _ => Err( unsupported_type(name))
    }
}

/// GDAL utility name of a data type
pub fn data_type_name (data_type: GdalDataType) -> &'static str {
    use GdalDataType::*;
    match data_type {
        UInt8 => "Byte",
        Int8 => "Int8",
        Int16 => "Int16",
        UInt16 => "UInt16",
        Int32 => "Int32",
        UInt32 => "UInt32",
        Int64 => "Int64",
        UInt64 => "UInt64",
        Float32 => "Float32",
        Float64 => "Float64",
        _ => "Unknown"
    }
}

/// nodata value to use if a band does not define one
pub fn default_nodata (data_type: GdalDataType) -> f64 {
    use GdalDataType::*;
    match data_type {
        UInt8 => 0.0,
        Int16 => -32768.0,
        UInt16 => 0.0,
        Int32 => -2147483647.0,
        UInt32 => 0.0,
        Float32 => -3.402823466E+38,
        _ => -1.7976931348623158E+308,
    }
}

pub fn create_dataset<P> (driver: &Driver, path: P, width: usize, height: usize, n_bands: usize, data_type: GdalDataType, co: Option<RasterCreationOptions>)->Result<Dataset>
    where P: AsRef<Path>
{
    use GdalDataType::*;
    if let Some(co) = co {
        match data_type {
            UInt8   => Ok( driver.create_with_band_type_with_options::<u8,P>(path, width, height, n_bands, &co)? ),
            UInt16  => Ok( driver.create_with_band_type_with_options::<u16,P>(path, width, height, n_bands, &co)? ),
            UInt32  => Ok( driver.create_with_band_type_with_options::<u32,P>(path, width, height, n_bands, &co)? ),
            UInt64  => Ok( driver.create_with_band_type_with_options::<u64,P>(path, width, height, n_bands, &co)? ),
            Int8    => Ok( driver.create_with_band_type_with_options::<i8,P>(path, width, height, n_bands, &co)? ),
            Int16   => Ok( driver.create_with_band_type_with_options::<i16,P>(path, width, height, n_bands, &co)? ),
            Int32   => Ok( driver.create_with_band_type_with_options::<i32,P>(path, width, height, n_bands, &co)? ),
            Int64   => Ok( driver.create_with_band_type_with_options::<i64,P>(path, width, height, n_bands, &co)? ),
            Float32 => Ok( driver.create_with_band_type_with_options::<f32,P>(path, width, height, n_bands, &co)? ),
            Float64 => Ok( driver.create_with_band_type_with_options::<f64,P>(path, width, height, n_bands, &co)? ),
            _ => Err( unsupported_type( data_type_name(data_type)))
        }

    } else {
        match data_type {
            UInt8   => Ok( driver.create_with_band_type::<u8,P>(path, width, height, n_bands)? ),
            UInt16  => Ok( driver.create_with_band_type::<u16,P>(path, width, height, n_bands)? ),
            UInt32  => Ok( driver.create_with_band_type::<u32,P>(path, width, height, n_bands)? ),
            UInt64  => Ok( driver.create_with_band_type::<u64,P>(path, width, height, n_bands)? ),
            Int8    => Ok( driver.create_with_band_type::<i8,P>(path, width, height, n_bands)? ),
            Int16   => Ok( driver.create_with_band_type::<i16,P>(path, width, height, n_bands)? ),
            Int32   => Ok( driver.create_with_band_type::<i32,P>(path, width, height, n_bands)? ),
            Int64   => Ok( driver.create_with_band_type::<i64,P>(path, width, height, n_bands)? ),
            Float32 => Ok( driver.create_with_band_type::<f32,P>(path, width, height, n_bands)? ),
            Float64 => Ok( driver.create_with_band_type::<f64,P>(path, width, height, n_bands)? ),
            _ => Err( unsupported_type( data_type_name(data_type)))
        }
    }
}

/// read the whole band as f64 values. The array is indexed [row,col]
pub fn read_band_f64 (band: &RasterBand) -> Result<Array2<f64>> {
    let (w,h) = band.size();
    let buf = band.read_as::<f64>( (0,0), (w,h), (w,h), None)?;
    Array2::from_shape_vec( (h,w), buf.data().to_vec()).map_err( |e| misc_error(e))
}

/// write a [row,col] array into a band of the same size. GDAL converts to the band type
pub fn write_band_f64 (band: &mut RasterBand, data: &Array2<f64>) -> Result<()> {
    let (h,w) = data.dim();
    let (bw,bh) = band.size();
    ok_true( bw == w && bh == h, || format!("array size {w}x{h} does not match band size {bw}x{bh}"))?;

    let mut buf = Buffer::new( (w,h), data.iter().cloned().collect());
    Ok( band.write( (0,0), (w,h), &mut buf)? )
}

/// remove a band metadata item (GDAL has no explicit delete, setting a null value removes it)
pub fn remove_metadata_item (band: &RasterBand, key: &str, domain: &str) -> Result<()> {
    let c_key = CString::new(key)?;
    let c_domain = CString::new(domain)?;
    let res = unsafe {
        gdal_sys::GDALSetMetadataItem( band.c_rasterband() as gdal_sys::GDALMajorObjectH, c_key.as_ptr(), null(), c_domain.as_ptr())
    };
    ok_ce_none(res)
}

/// keys of the default domain metadata items of a band
pub fn metadata_keys (band: &RasterBand) -> Vec<String> {
    band.metadata_domain("").unwrap_or_default().iter()
        .filter_map( |kv| kv.split_once('=').map( |(k,_)| k.to_string()))
        .collect()
}

/* #endregion data types and bands */
