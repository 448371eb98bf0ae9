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
use anyhow::{Result, bail};
use pgis_common::{define_cli, check_cli, init_tracing};
use pgis_gdal::parse_data_type;
use pgis_gdal::clipper::{clipper_prep, ClipperOptions, Padding};

define_cli! { ARGS [about="prepare frames for clipper processing (scale, flip, mask negatives, fill and pad)"] =
    of: String [help="output format", long, default_value="GTiff"],
    ot: Option<String> [help="output data type (default is the input type)", long],
    pad_left: bool [help="pad columns on the left", long="padLeft"],
    pad_right: bool [help="pad columns on the right", long="padRight"],
    flip: bool [help="flip rows", short, long],
    fill: bool [help="interpolate NaN values", long],
    positive: bool [help="turn negative values into NaN", long],
    scale: bool [help="apply BSCALE and BZERO", short, long],
    quiet: bool [help="don't report progress", short, long],
    infile: String [help="input frame"],
    outfile: String [help="output raster"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    let padding = match (ARGS.pad_left, ARGS.pad_right) {
        (true,true) => bail!("only one of --padLeft and --padRight can be set"),
        (true,false) => Padding::Left,
        (false,true) => Padding::Right,
        _ => Padding::None
    };
    let data_type = match &ARGS.ot {
        Some(t) => Some( parse_data_type(t)?),
        None => None
    };

    let opts = ClipperOptions {
        format: ARGS.of.clone(),
        data_type,
        padding,
        flip: ARGS.flip,
        fill: ARGS.fill,
        positive: ARGS.positive,
        scale: ARGS.scale,
        quiet: ARGS.quiet,
    };
    clipper_prep( Path::new(&ARGS.infile), Path::new(&ARGS.outfile), &opts)?;
    Ok(())
}
