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
use pgis_mesh::obj::plate_to_obj;

define_cli! { ARGS [about="converts a simple PDS shape model (plate/vertex table) into an Alias Wavefront OBJ file"] =
    input: String [help="input plate/vertex table (.tab)"],
    output: String [help="output OBJ file"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("warn");

    plate_to_obj( &ARGS.input, &ARGS.output)?;
    println!("\nObj file: {} successfully created.", ARGS.output);
    Ok(())
}
