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
use pgis_common::fs::replace_extension;
use pgis_pds::hdf5::{h5_to_pds4, epic_h5_to_pds4};

define_cli! { ARGS [about="exports the subdatasets of an HDF5 file as PDS4"] =
    epic: bool [help="write one product per EPIC band image and pixel type", long],
    input: String [help="input HDF5 file"],
    output: Option<String> [help="output PDS4 XML (default is the input name with .xml extension, not used with --epic)"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    let input = Path::new(&ARGS.input);
    if ARGS.epic {
        epic_h5_to_pds4(input)?;
    } else {
        let output = ARGS.output.as_ref().map( |s| Path::new(s).to_path_buf()).unwrap_or_else( || replace_extension( input, "xml"));
        h5_to_pds4( input, &output)?;
    }
    Ok(())
}
