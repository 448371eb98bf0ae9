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
use pgis_mesh::ply::{raster_to_ply, PlyFormat};

define_cli! { ARGS [about="creates a triangle mesh PLY file from a DEM raster (nodata values are not handled)"] =
    ascii: bool [help="write ASCII instead of binary little endian PLY", long],
    input: String [help="input DEM raster"],
    output: String [help="output PLY file"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("warn");

    let format = if ARGS.ascii { PlyFormat::Ascii } else { PlyFormat::BinaryLittleEndian };
    let mesh = raster_to_ply( &ARGS.input, &ARGS.output, format)?;
    println!("{} vertices and {} faces written to {}", mesh.vertices.len(), mesh.faces.len(), ARGS.output);
    Ok(())
}
