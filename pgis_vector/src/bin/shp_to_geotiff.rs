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
use pgis_vector::lunar::shp_to_geotiff;

define_cli! { ARGS [about="rasterizes a polygon attribute into a global GeoTIFF"] =
    pixel: f64 [help="pixel size in degrees", long, default_value="0.5"],
    attribute: String [help="attribute to burn", long, default_value="H_ppm"],
    input: String [help="input shapefile"],
    output: String [help="output GeoTIFF"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("warn");

    shp_to_geotiff( Path::new(&ARGS.input), Path::new(&ARGS.output), ARGS.pixel, &ARGS.attribute)?;
    println!(" GeoTIFF saved to {} with CRS from shapefile and bounds -180.0,180.0,-90.0,90.0", ARGS.output);
    Ok(())
}
