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

use std::ffi::{CStr,NulError};
use thiserror::Error;
use gdal::errors::GdalError;

pub type Result<T> = std::result::Result<T, PgisGdalError>;

#[derive(Error,Debug)]
pub enum PgisGdalError {

    #[error("unsupported data type: {0}")]
    UnsupportedType(String),

    #[error("invalid {0} arguments: {1:?}")]
    InvalidArguments(&'static str, Vec<String>),

    // generic self-created error
    #[error("GDAL operation failed: {0}")]
    MiscError(String),

    // pass through for errors reported by the gdal crate
    #[error("GDAL error: {0}")]
    GdalError( #[from] GdalError),

    #[error("invalid C string: {0}")]
    NulError( #[from] NulError),

    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),
}

pub fn misc_error<S: ToString> (msg: S)->PgisGdalError {
    PgisGdalError::MiscError(msg.to_string())
}

pub fn unsupported_type<S: ToString> (type_name: S)->PgisGdalError {
    PgisGdalError::UnsupportedType(type_name.to_string())
}

/// turn the last error message recorded by GDAL into a PgisGdalError
pub fn last_gdal_error ()->PgisGdalError {
    let msg = unsafe {
        let p = gdal_sys::CPLGetLastErrorMsg();
        if p.is_null() { String::new() } else { CStr::from_ptr(p).to_string_lossy().to_string() }
    };
    if msg.is_empty() {
        misc_error("unknown GDAL error")
    } else {
        PgisGdalError::MiscError(msg)
    }
}
