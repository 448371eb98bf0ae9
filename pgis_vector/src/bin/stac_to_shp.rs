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
use pgis_vector::stac::stac_to_shp;

define_cli! { ARGS [about="collects the footprints of STAC item JSON files into a polygon shapefile"] =
    dir: String [help="directory to search recursively for STAC items", long, default_value="."],
    output: String [help="output shapefile"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    stac_to_shp( Path::new(&ARGS.dir), Path::new(&ARGS.output))?;
    println!("completed. This has not converted a 0-360 range to a -180 to 180");
    println!("  if needed run: ogr2ogr -f 'ESRI Shapefile' output180.shp input360.shp -wrapdateline");
    Ok(())
}
