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
use tracing::warn;
use pgis_common::{define_cli, check_cli, init_tracing};
use pgis_gdal::slope::{baseline_slope, SlopeMethod, SlopeOptions};

define_cli! { ARGS [about="compute slope in degrees over a 1, 2 or 5 pixel baseline (default is Horn's method)"] =
    baseline: Option<u32> [help="baseline in pixels (1, 2 or 5)", long],
    ot: Option<String> [help="output type, only 'Byte' adds a scaled 8 bit product", long],
    crop: bool [help="drop the pixels that can't be computed for the baseline", short, long],
    quiet: bool [help="don't report progress", short, long],
    infile: String [help="input DEM"],
    outfile: String [help="output GeoTIFF"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    if ARGS.baseline.is_none() {
        warn!("Using Horn's method for slope calculation, send --baseline VALUE [1,2,5] to set specialized calculation.");
    }
    let byte_output = match ARGS.ot.as_deref() {
        None => false,
        Some("Byte") => true,
        Some(t) => bail!("unsupported output type {t}, only Byte is supported")
    };

    let opts = SlopeOptions {
        method: SlopeMethod::from_baseline( ARGS.baseline)?,
        byte_output,
        crop: ARGS.crop,
        quiet: ARGS.quiet,
    };
    baseline_slope( Path::new(&ARGS.infile), Path::new(&ARGS.outfile), &opts)?;
    Ok(())
}
