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
use pgis_pds::caminfo::footprint_to_shp;

define_cli! { ARGS [about="converts the footprint of an ISIS3 caminfo PVL file (caminfo uselabel=yes) into a shapefile"] =
    input: String [help="caminfo PVL file"],
    prj: Option<String> [help="optional projection (prj file or SRS definition) to assign"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("warn");

    footprint_to_shp( Path::new(&ARGS.input), ARGS.prj.as_deref())?;
    Ok(())
}
