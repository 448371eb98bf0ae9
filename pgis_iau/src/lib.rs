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

//! generator for the IAU coordinate reference system catalog of planetary bodies.
//!
//! Each row of the IAU radii CSV is turned into an ocentric CRS, an ographic CRS (if the rotation
//! direction of the body is known) and a projected CRS for each entry of [`wkt::PROJECTIONS`].
//! Generated WKTs are validated before they get exported as WKT catalog, PROJ init file, ESRI .prj
//! files or PostGIS SQL.

pub mod errors;
pub mod wkt;
pub mod catalog;
pub mod validate;
pub mod export;

use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::errors::Result;
use crate::catalog::{CrsEntry, IauCatalog};
use crate::export::{OutputFormat, save_as};
use crate::validate::WktValidator;

fn timed<T,F> (name: &str, f: F) -> T where F: FnOnce()->T {
    let start = Instant::now();
    let result = f();
    info!("function [{}] finished in {} ms", name, start.elapsed().as_millis());
    result
}

pub fn load_and_process_catalog (file: &Path) -> Result<Vec<CrsEntry>> {
    timed( "load_and_process_catalog", || IauCatalog::new(file)?.process_file())
}

pub fn save_catalog (crss: &[CrsEntry], validator: &dyn WktValidator, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    timed( "save_catalog", || save_as( crss, validator, output, format))
}
