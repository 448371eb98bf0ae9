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
use pgis_gdal::clip::clip_to_range;

define_cli! { ARGS [about="copy a raster to GeoTIFF and replace all values outside of [min,max] with nodata"] =
    input: String [help="input raster"],
    output: String [help="output GeoTIFF"],
    min: f64 [help="minimum valid value", allow_negative_numbers=true],
    max: f64 [help="maximum valid value", allow_negative_numbers=true],
    nodata: Option<f64> [help="nodata value (default is the nodata value of the input band)", allow_negative_numbers=true]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    println!("input file: {}", ARGS.input);
    println!("min: {}", ARGS.min);
    println!("max: {}", ARGS.max);

    let clipped = clip_to_range( Path::new(&ARGS.input), Path::new(&ARGS.output), ARGS.min, ARGS.max, ARGS.nodata)?;
    for c in &clipped {
        println!("NoData: {}", c.nodata);
    }
    Ok(())
}
