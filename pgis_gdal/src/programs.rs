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

//! in-process versions of the GDAL command line utilities (gdal_translate, gdalwarp, gdal_rasterize
//! and ogr2ogr). Arguments are the same strings the respective command line tool accepts, without
//! the program name and without source/destination names

use std::ffi::{c_int, CString};
use std::path::Path;
use std::ptr::null_mut;
use gdal::Dataset;
use gdal::cpl::CslStringList;
use gdal_sys::GDALDatasetH;
use tracing::debug;

use crate::errors::{Result, PgisGdalError, last_gdal_error};

fn to_c_args<S: AsRef<str>> (args: &[S]) -> Result<CslStringList> {
    let mut list = CslStringList::new();
    for a in args {
        list.add_string( a.as_ref())?;
    }
    Ok(list)
}

fn owned_args<S: AsRef<str>> (args: &[S]) -> Vec<String> {
    args.iter().map( |a| a.as_ref().to_string()).collect()
}

fn path_cstring (path: &Path) -> Result<CString> {
    Ok( CString::new( path.to_string_lossy().as_ref())? )
}

fn checked_dataset (h_ds: GDALDatasetH, usage_error: c_int, program: &'static str, args: Vec<String>) -> Result<Dataset> {
    if usage_error != 0 {
        if !h_ds.is_null() { unsafe { gdal_sys::GDALClose(h_ds); } }
        return Err( PgisGdalError::InvalidArguments( program, args))
    }
    if h_ds.is_null() {
        return Err( last_gdal_error())
    }
    Ok( unsafe { Dataset::from_c_dataset(h_ds) } )
}

/* #region option wrappers ***************************************************************************************/

// each of the GDAL utilities has its own opaque options type with New/Free functions

struct TranslateOptions { options: *mut gdal_sys::GDALTranslateOptions }

impl TranslateOptions {
    fn new<S: AsRef<str>> (args: &[S]) -> Result<Self> {
        let c_args = to_c_args(args)?;
        let options = unsafe { gdal_sys::GDALTranslateOptionsNew( c_args.as_ptr(), null_mut()) };
        if options.is_null() { Err( PgisGdalError::InvalidArguments("gdal_translate", owned_args(args))) } else { Ok( TranslateOptions{options}) }
    }
}

impl Drop for TranslateOptions {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALTranslateOptionsFree(self.options); }
    }
}

struct WarpOptions { options: *mut gdal_sys::GDALWarpAppOptions }

impl WarpOptions {
    fn new<S: AsRef<str>> (args: &[S]) -> Result<Self> {
        let c_args = to_c_args(args)?;
        let options = unsafe { gdal_sys::GDALWarpAppOptionsNew( c_args.as_ptr(), null_mut()) };
        if options.is_null() { Err( PgisGdalError::InvalidArguments("gdalwarp", owned_args(args))) } else { Ok( WarpOptions{options}) }
    }
}

impl Drop for WarpOptions {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALWarpAppOptionsFree(self.options); }
    }
}

struct RasterizeOptions { options: *mut gdal_sys::GDALRasterizeOptions }

impl RasterizeOptions {
    fn new<S: AsRef<str>> (args: &[S]) -> Result<Self> {
        let c_args = to_c_args(args)?;
        let options = unsafe { gdal_sys::GDALRasterizeOptionsNew( c_args.as_ptr(), null_mut()) };
        if options.is_null() { Err( PgisGdalError::InvalidArguments("gdal_rasterize", owned_args(args))) } else { Ok( RasterizeOptions{options}) }
    }
}

impl Drop for RasterizeOptions {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALRasterizeOptionsFree(self.options); }
    }
}

struct VectorTranslateOptions { options: *mut gdal_sys::GDALVectorTranslateOptions }

impl VectorTranslateOptions {
    fn new<S: AsRef<str>> (args: &[S]) -> Result<Self> {
        let c_args = to_c_args(args)?;
        let options = unsafe { gdal_sys::GDALVectorTranslateOptionsNew( c_args.as_ptr(), null_mut()) };
        if options.is_null() { Err( PgisGdalError::InvalidArguments("ogr2ogr", owned_args(args))) } else { Ok( VectorTranslateOptions{options}) }
    }
}

impl Drop for VectorTranslateOptions {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALVectorTranslateOptionsFree(self.options); }
    }
}

/* #endregion option wrappers */

/// gdal_translate equivalent. The returned dataset is the (open) output, which gets flushed and closed when dropped
pub fn translate<S: AsRef<str>> (src: &Dataset, dst: &Path, args: &[S]) -> Result<Dataset> {
    debug!("translate -> {:?} : {:?}", dst, owned_args(args));
    let opts = TranslateOptions::new(args)?;
    let dst_path = path_cstring(dst)?;
    let mut usage_error: c_int = 0;

    let h_ds = unsafe {
        gdal_sys::GDALTranslate( dst_path.as_ptr(), src.c_dataset(), opts.options, &mut usage_error)
    };
    checked_dataset( h_ds, usage_error, "gdal_translate", owned_args(args))
}

pub fn translate_file<S: AsRef<str>> (src: &Path, dst: &Path, args: &[S]) -> Result<Dataset> {
    let src_ds = Dataset::open(src)?;
    translate( &src_ds, dst, args)
}

/// gdalwarp equivalent that creates a new output dataset from one or more sources
pub fn warp<S: AsRef<str>> (srcs: &[&Dataset], dst: &Path, args: &[S]) -> Result<Dataset> {
    debug!("warp -> {:?} : {:?}", dst, owned_args(args));
    let opts = WarpOptions::new(args)?;
    let dst_path = path_cstring(dst)?;
    let mut src_handles: Vec<GDALDatasetH> = srcs.iter().map( |ds| unsafe { ds.c_dataset() }).collect();
    let mut usage_error: c_int = 0;

    let h_ds = unsafe {
        gdal_sys::GDALWarp( dst_path.as_ptr(), null_mut(), src_handles.len() as c_int, src_handles.as_mut_ptr(),
                            opts.options, &mut usage_error)
    };
    checked_dataset( h_ds, usage_error, "gdalwarp", owned_args(args))
}

/// gdal_rasterize equivalent that creates a new raster from a vector source
pub fn rasterize<S: AsRef<str>> (src: &Dataset, dst: &Path, args: &[S]) -> Result<Dataset> {
    debug!("rasterize -> {:?} : {:?}", dst, owned_args(args));
    let opts = RasterizeOptions::new(args)?;
    let dst_path = path_cstring(dst)?;
    let mut usage_error: c_int = 0;

    let h_ds = unsafe {
        gdal_sys::GDALRasterize( dst_path.as_ptr(), null_mut(), src.c_dataset(), opts.options, &mut usage_error)
    };
    checked_dataset( h_ds, usage_error, "gdal_rasterize", owned_args(args))
}

/// ogr2ogr equivalent
pub fn vector_translate<S: AsRef<str>> (srcs: &[&Dataset], dst: &Path, args: &[S]) -> Result<Dataset> {
    debug!("vector_translate -> {:?} : {:?}", dst, owned_args(args));
    let opts = VectorTranslateOptions::new(args)?;
    let dst_path = path_cstring(dst)?;
    let mut src_handles: Vec<GDALDatasetH> = srcs.iter().map( |ds| unsafe { ds.c_dataset() }).collect();
    let mut usage_error: c_int = 0;

    let h_ds = unsafe {
        gdal_sys::GDALVectorTranslate( dst_path.as_ptr(), null_mut(), src_handles.len() as c_int, src_handles.as_mut_ptr(),
                                       opts.options, &mut usage_error)
    };
    checked_dataset( h_ds, usage_error, "ogr2ogr", owned_args(args))
}
