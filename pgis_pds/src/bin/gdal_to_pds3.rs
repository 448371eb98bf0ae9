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
use pgis_pds::pds3::gdal_to_pds3;

define_cli! { ARGS [about="creates a raw image with a PDS3 label from a GDAL raster (LMMP products in geographic, equirectangular or polar stereographic projection)"] =
    debug: bool [help="print input image information", long],
    input: String [help="input raster"],
    output: String [help="output image (.IMG or .img)"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("warn");

    gdal_to_pds3( Path::new(&ARGS.input), &ARGS.output, ARGS.debug)?;
    Ok(())
}
