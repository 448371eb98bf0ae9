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

use anyhow::Result;
use pgis_common::{define_cli, check_cli, init_tracing};
use pgis_mesh::xyzi::{xyzi_to_vrt, DEFAULT_SRS};

define_cli! { ARGS [about="creates a CSV table and OGR VRT point layer from a LOLA xyzi binary file"] =
    srs: String [help="layer SRS", long, default_value=DEFAULT_SRS],
    input: String [help="input xyzi file"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("warn");

    let res = xyzi_to_vrt( &ARGS.input, &ARGS.srs)?;
    println!(" {} records converted", res.records);
    println!(" CSV written to: {}", res.csv.display());
    println!(" VRT written to: {}", res.vrt.display());
    Ok(())
}
