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

use std::path::Path;
use std::process::ExitCode;
use clap::ValueEnum;
use tracing::{error, info};
use pgis_common::{define_cli, check_cli, init_tracing};
use pgis_iau::{load_and_process_catalog, save_catalog};
use pgis_iau::errors::{PgisIauError, Result};
use pgis_iau::export::OutputFormat;
use pgis_iau::validate::{WktValidator, SpatialRefValidator, GdalSrsInfoValidator};

#[derive(Debug,Clone,Copy,PartialEq,Eq,ValueEnum)]
enum Verbose {
    #[value(name="OFF")] Off,
    #[value(name="INFO")] Info,
    #[value(name="DEBUG")] Debug,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,ValueEnum)]
enum Validator {
    Gdal,
    Gdalsrsinfo,
}

define_cli! { ARGS [about="Converts IAU CSV file into WKT/proj4/prj/PostGIS format, for example: create_iau_wkt naifcodes_radii_m_wAsteroids_IAU2015.csv"] =
    output: Option<String> [help="output file (default is stdout)", long],
    format: OutputFormat [help="output format", long, value_enum, default_value="WKT"],
    verbose: Verbose [help="verbose mode: OFF does not display errors, INFO displays errors, DEBUG displays everything", long, value_enum, default_value="INFO"],
    validator: Validator [help="WKT validator: in-process GDAL or external gdalsrsinfo", long, value_enum, default_value="gdal"],
    csv: String [help="data from IAU as CSV file"]
}

fn run (validator: &dyn WktValidator) -> Result<()> {
    let csv = Path::new(&ARGS.csv);
    let crss = load_and_process_catalog(csv)?;
    info!("{} WKTs loaded from {}", crss.len(), csv.display());

    save_catalog( &crss, validator, ARGS.output.as_ref().map(Path::new), ARGS.format)
}

fn main()->ExitCode {
    check_cli!(ARGS);
    init_tracing( match ARGS.verbose {
        Verbose::Off => "off",
        Verbose::Info => "info",
        Verbose::Debug => "debug",
    });

    if !Path::new(&ARGS.csv).is_file() {
        error!("File not found: {}", ARGS.csv);
        return ExitCode::from(2)
    }

    let validator: Box<dyn WktValidator> = match ARGS.validator {
        Validator::Gdal => Box::new(SpatialRefValidator),
        Validator::Gdalsrsinfo => Box::new(GdalSrsInfoValidator),
    };

    match run( validator.as_ref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(PgisIauError::ValidationFailed{..}) => {
            error!("Error during the WKT validation");
            ExitCode::from(1)
        }
        Err(e) => {
            error!("Error: {e}");
            ExitCode::from(2)
        }
    }
}
