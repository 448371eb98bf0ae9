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
use pgis_vector::errors::PgisVectorError;

pub type Result<T> = std::result::Result<T, PgisMeshError>;

#[derive(Error,Debug)]
pub enum PgisMeshError {

    #[error("line {0}: {1}")]
    ParseError(usize, String),

    #[error("invalid mesh: {0}")]
    MeshError(String),

    #[error("GDAL error: {0}")]
    GdalError( #[from] PgisGdalError),

    #[error("GDAL error: {0}")]
    GdalLibError( #[from] pgis_gdal::GdalError),

    #[error("vector error: {0}")]
    VectorError( #[from] PgisVectorError),

    #[error("CSV error: {0}")]
    CsvError( #[from] csv::Error),

    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),
}

pub fn parse_error<S: ToString> (line: usize, msg: S)->PgisMeshError {
    PgisMeshError::ParseError(line, msg.to_string())
}

pub fn mesh_error<S: ToString> (msg: S)->PgisMeshError {
    PgisMeshError::MeshError(msg.to_string())
}
