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
use anyhow::Result;
use pgis_common::{define_cli, check_cli, init_tracing};
use pgis_gdal::stdpar::split_lat_bands;

define_cli! { ARGS [about="split a global raster into 5 degree latitude bands, each with its own standard parallel"] =
    radius: f64 [help="body radius in meters", long, default_value="1737400"],
    source_srs: String [help="SRS of the band bounds", long, default_value="IAU_2015:30100"],
    res: f64 [help="output resolution in meters", long, default_value="100"],
    infile: String [help="input raster"],
    outroot: String [help="root name of the output tiles"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    let tiles = split_lat_bands( Path::new(&ARGS.infile), &ARGS.outroot, ARGS.radius, &ARGS.source_srs, ARGS.res)?;
    println!("Extraction complete! {} tiles written", tiles.len());
    Ok(())
}
