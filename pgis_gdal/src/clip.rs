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

//! replace raster values outside of a valid range by nodata

use std::path::Path;
use tracing::debug;

use crate::{Dataset, GdalDataType, read_band_f64, write_band_f64, remove_metadata_item, metadata_keys};
use crate::errors::{Result, misc_error};
use crate::programs::translate;

/// per band outcome of a clip operation
#[derive(Debug,Clone,PartialEq)]
pub struct ClippedBand {
    pub band: usize,
    pub nodata: f64,
    pub replaced: usize,
}

/// replace all values below `min` or above `max` with `nodata` and return the number of replaced values.
/// Values that already equal nodata are not counted
pub fn clip_values (values: &mut [f64], min: f64, max: f64, nodata: f64) -> usize {
    let mut n = 0;
    for v in values.iter_mut() {
        if (*v < min || *v > max) && *v != nodata {
            *v = nodata;
            n += 1;
        }
    }
    n
}

/// copy `src` as GeoTIFF to `dst` and clip all bands of the copy to [min,max]. If no `nodata` value is
/// provided the band nodata value is used, which then has to be defined
pub fn clip_to_range (src: &Path, dst: &Path, min: f64, max: f64, nodata: Option<f64>) -> Result<Vec<ClippedBand>> {
    let src_ds = Dataset::open(src)?;
    let ds = translate( &src_ds, dst, &["-of", "GTiff"])?;
    clip_dataset( &ds, min, max, nodata)
}

pub fn clip_dataset (ds: &Dataset, min: f64, max: f64, nodata: Option<f64>) -> Result<Vec<ClippedBand>> {
    let mut clipped = Vec::with_capacity( ds.raster_count());

    for i in 1..=ds.raster_count() {
        let mut band = ds.rasterband(i)?;
        let nodata = nodata.or( band.no_data_value())
            .ok_or_else( || misc_error( format!("band {i} has no nodata value and none was provided")))?;
        if band.band_type() == GdalDataType::UInt8 && !(0.0..=255.0).contains(&nodata) {
            return Err( misc_error( format!("nodata value {nodata} out of range for Byte band {i}")))
        }

        let mut data = read_band_f64( &band)?;
        let replaced = match data.as_slice_mut() {
            Some(values) => clip_values( values, min, max, nodata),
            None => return Err( misc_error("non-contiguous band data"))
        };
        write_band_f64( &mut band, &data)?;
        band.set_no_data_value( Some(nodata))?;

        // cached statistics are stale now
        for key in metadata_keys( &band) {
            if key.starts_with("STATISTICS_") {
                remove_metadata_item( &band, &key, "")?;
            }
        }

        debug!("band {i}: {replaced} values replaced by {nodata}");
        clipped.push( ClippedBand{ band: i, nodata, replaced });
    }

    Ok(clipped)
}
