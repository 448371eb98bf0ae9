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
use gdal::errors::GdalError;
use pgis_gdal::errors::PgisGdalError;

pub type Result<T> = std::result::Result<T, PgisVectorError>;

#[derive(Error,Debug)]
pub enum PgisVectorError {

    #[error("unsupported output: {0}")]
    UnsupportedOutput(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // generic self-created error
    #[error("vector operation failed: {0}")]
    MiscError(String),

    #[error("GeoJSON error: {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("JSON error: {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("{0}")]
    PgisGdalError( #[from] PgisGdalError),

    #[error("GDAL error: {0}")]
    GdalError( #[from] GdalError),

    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),
}

pub fn unsupported_output<S: ToString> (msg: S)->PgisVectorError {
    PgisVectorError::UnsupportedOutput(msg.to_string())
}

pub fn invalid_input<S: ToString> (msg: S)->PgisVectorError {
    PgisVectorError::InvalidInput(msg.to_string())
}

pub fn misc_error<S: ToString> (msg: S)->PgisVectorError {
    PgisVectorError::MiscError(msg.to_string())
}
