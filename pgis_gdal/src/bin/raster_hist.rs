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
use pgis_gdal::hist::{dataset_report, HistOptions};

define_cli! { ARGS [about="report min/max, statistics and histograms of raster bands (at least one flag must be set)"] =
    mm: bool [help="report min/max", long],
    stats: bool [help="report statistics", long],
    hist: bool [help="report histogram", long],
    unscale: bool [help="apply band scale and offset", long],
    dataset: String [help="raster dataset"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("warn");

    let opts = HistOptions { min_max: ARGS.mm, stats: ARGS.stats, hist: ARGS.hist, unscale: ARGS.unscale };
    if !opts.has_report() {
        bail!("at least one of --mm, --stats, --hist or --unscale has to be set");
    }

    for line in dataset_report( Path::new(&ARGS.dataset), &opts)? {
        println!("{line}");
    }
    Ok(())
}
