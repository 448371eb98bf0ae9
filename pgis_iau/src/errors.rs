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

use thiserror::Error;
use pgis_gdal::errors::PgisGdalError;

pub type Result<T> = std::result::Result<T, PgisIauError>;

#[derive(Error,Debug)]
pub enum PgisIauError {

    #[error("{count} WKT(s) failed validation")]
    ValidationFailed { count: usize },

    #[error("{0}")]
    CatalogError(String),

    #[error("invalid WKT parameter: {0}")]
    WktError(String),

    #[error("GDAL error: {0}")]
    GdalError( #[from] PgisGdalError),

    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),
}

pub fn catalog_error<S: ToString> (msg: S)->PgisIauError {
    PgisIauError::CatalogError(msg.to_string())
}

pub fn wkt_error<S: ToString> (msg: S)->PgisIauError {
    PgisIauError::WktError(msg.to_string())
}
