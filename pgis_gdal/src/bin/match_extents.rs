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
use pgis_gdal::extent::match_extents;

define_cli! { ARGS [about="assign the extent and projection of a primary raster to a copy of a replica raster"] =
    primary: String [help="raster that defines extent and projection"],
    replica: String [help="raster to re-register, the result is stored as <replica>_match.tif"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    let out = match_extents( Path::new(&ARGS.primary), Path::new(&ARGS.replica))?;
    println!("{} created", out.display());
    Ok(())
}
