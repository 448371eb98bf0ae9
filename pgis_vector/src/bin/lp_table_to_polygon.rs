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
use tracing::info;
use pgis_common::{define_cli, check_cli, init_tracing};
use pgis_vector::lunar::{lp_table_to_polygon, vector_driver_for, DEFAULT_CRS};

define_cli! { ARGS [about="converts a Lunar Prospector table into a polygon shapefile or GeoJSON file"] =
    input: String [help="input table"],
    output: String [help="output file (.shp or .geojson)"],
    crs: String [help="output CRS", default_value=DEFAULT_CRS]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    let output = Path::new(&ARGS.output);
    let n = lp_table_to_polygon( Path::new(&ARGS.input), output, &ARGS.crs)?;
    let kind = if vector_driver_for(output)? == "GeoJSON" { "GeoJSON" } else { "Shapefile" };
    println!("{kind} saved to {} with CRS {}", output.display(), ARGS.crs);
    info!("{n} polygons written");
    Ok(())
}
