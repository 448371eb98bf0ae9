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
use pgis_gdal::stdpar::new_standard_parallel;

define_cli! { ARGS [about="set a new standard_parallel_1 (latitude of true scale) for an Equirectangular raster without resampling"] =
    of: String [help="output format", long, default_value="GTiff"],
    clat: f64 [help="new standard parallel", long, default_value="0", allow_negative_numbers=true],
    infile: String [help="input raster"],
    outfile: String [help="output raster"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing("info");

    let shift = new_standard_parallel( Path::new(&ARGS.infile), Path::new(&ARGS.outfile), &ARGS.of, ARGS.clat)?;

    println!("To standard_parallel_1: {:.6}", shift.clat);
    println!("Original X: {:.6}\tShifted X: {:.6}", shift.minx, shift.newminx);
    println!("Original Y cellsize (will be unchanged): {:.6}", shift.cellsize_y);
    println!("Original X cellsize: {:.6}\tNew X cellsize: {:.6}", shift.cellsize_x, shift.new_cellsize_x);
    Ok(())
}
