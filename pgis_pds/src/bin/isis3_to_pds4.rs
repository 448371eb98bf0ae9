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
use pgis_pds::pds4::{isis3_to_pds4, DEFAULT_TEMPLATE};

define_cli! { ARGS [about="writes a gdal_translate option file for a PDS4 template from an ISIS3 cube label"] =
    run: bool [help="run the PDS4 conversion instead of printing the gdal_translate command", long],
    template: String [help="PDS4 XML template with known variables", long, default_value=DEFAULT_TEMPLATE],
    input: String [help="input ISIS3 cube"],
    config: String [help="output option file"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    let prog = std::env::args().next().unwrap_or_else( || "isis3_to_pds4".to_string());
    let header = format!("#{} {} {}", prog, ARGS.input, ARGS.config);
    isis3_to_pds4( &ARGS.input, &ARGS.config, &ARGS.template, ARGS.run, &header)?;
    Ok(())
}
