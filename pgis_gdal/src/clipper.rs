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

//! prepare image frames for the clipper pipeline: unscale, flip, mask negatives, fill gaps and
//! pad to the full frame width

use std::path::Path;
use ndarray::{Array2, Axis, concatenate};
use tracing::debug;

use crate::{Dataset, Metadata, GdalDataType, create_dataset, get_driver, read_band_f64, write_band_f64};
use crate::errors::{Result, misc_error};

pub const PAD_SIZE: usize = 3664;

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Padding { None, Left, Right }

#[derive(Debug,Clone)]
pub struct ClipperOptions {
    pub format: String,
    pub data_type: Option<GdalDataType>,
    pub padding: Padding,
    pub flip: bool,
    pub fill: bool,
    pub positive: bool,
    pub scale: bool,
    pub quiet: bool,
}

impl Default for ClipperOptions {
    fn default() -> Self {
        ClipperOptions {
            format: "GTiff".to_string(),
            data_type: None,
            padding: Padding::None,
            flip: false, fill: false, positive: false, scale: false, quiet: false
        }
    }
}

pub fn flip_rows (data: &Array2<f64>) -> Array2<f64> {
    let mut flipped = data.clone();
    flipped.invert_axis( Axis(0));
    flipped.as_standard_layout().to_owned()
}

pub fn negatives_to_nan (data: &mut Array2<f64>) {
    data.mapv_inplace( |v| if v < 0.0 { f64::NAN } else { v });
}

/// replace NaNs by linear interpolation between the closest valid neighbors in the flattened
/// sequence. NaNs before the first or after the last valid value take that value.
/// Nothing is changed if there is no valid value at all
pub fn fill_nan_linear (values: &mut [f64]) {
    let valid: Vec<usize> = values.iter().enumerate().filter( |(_,v)| !v.is_nan()).map( |(i,_)| i).collect();
    let (Some(&first), Some(&last)) = (valid.first(), valid.last()) else { return };

    let (v_first, v_last) = (values[first], values[last]);
    for v in values[..first].iter_mut() { *v = v_first }
    for v in values[last+1..].iter_mut() { *v = v_last }

    for w in valid.windows(2) {
        let (i0, i1) = (w[0], w[1]);
        if i1 > i0 + 1 {
            let (y0, y1) = (values[i0], values[i1]);
            let d = (i1 - i0) as f64;
            for i in i0+1..i1 {
                values[i] = y0 + (y1 - y0) * (i - i0) as f64 / d;
            }
        }
    }
}

/// add zero columns on the left or right to reach `width`
pub fn pad_columns (data: &Array2<f64>, width: usize, padding: Padding) -> Result<Array2<f64>> {
    let (rows,cols) = data.dim();
    if padding == Padding::None { return Ok(data.clone()) }
    if cols > width {
        return Err( misc_error( format!("raster width {cols} exceeds pad size {width}")))
    }

    let pad = Array2::<f64>::zeros( (rows, width - cols));
    let res = match padding {
        Padding::Left => concatenate( Axis(1), &[pad.view(), data.view()]),
        _ => concatenate( Axis(1), &[data.view(), pad.view()]),
    };
    res.map_err( |e| misc_error(e))
}

/// apply the configured steps to one band
pub fn prepare_band (mut data: Array2<f64>, opts: &ClipperOptions, bscale: f64, bzero: f64) -> Result<Array2<f64>> {
    if opts.scale {
        data.mapv_inplace( |v| v * bscale + bzero);
    }
    if opts.flip {
        data = flip_rows( &data);
    }
    if opts.positive {
        negatives_to_nan( &mut data);
    }
    if opts.fill {
        match data.as_slice_mut() {
            Some(values) => fill_nan_linear( values),
            None => return Err( misc_error("non-contiguous band data"))
        }
    }
    pad_columns( &data, PAD_SIZE, opts.padding)
}

fn metadata_f64 (ds: &Dataset, key: &str) -> Result<f64> {
    let v = ds.metadata_item( key, "").ok_or_else( || misc_error( format!("no {key} metadata item in input")))?;
    v.trim().parse::<f64>().map_err( |_| misc_error( format!("invalid {key} value: {v}")))
}

pub fn clipper_prep (infile: &Path, outfile: &Path, opts: &ClipperOptions) -> Result<()> {
    let in_ds = Dataset::open(infile)?;
    let (cols,rows) = in_ds.raster_size();
    let n_bands = in_ds.raster_count();
    if n_bands == 0 { return Err( misc_error("no raster bands in input")) }

    let (bscale, bzero) = if opts.scale {
        ( metadata_f64( &in_ds, "BSCALE")?, metadata_f64( &in_ds, "BZERO")? )
    } else {
        (1.0, 0.0)
    };

    let data_type = match opts.data_type {
        Some(t) => t,
        None => in_ds.rasterband(1)?.band_type()
    };
    let out_cols = if opts.padding == Padding::None { cols } else { PAD_SIZE };

    let driver = get_driver( &opts.format)?;
    let mut out_ds = create_dataset( &driver, outfile, out_cols, rows, n_bands, data_type, None)?;
    let projection = in_ds.projection();
    if !projection.is_empty() { out_ds.set_projection( projection.as_str())?; }

    for i in 1..=n_bands {
        let in_band = in_ds.rasterband(i)?;
        let mut out_band = out_ds.rasterband(i)?;
        out_band.set_offset(0.0)?;
        out_band.set_scale(1.0)?;
        if let Some(nodata) = in_band.no_data_value() {
            out_band.set_no_data_value( Some(nodata))?;
        }

        let data = prepare_band( read_band_f64( &in_band)?, opts, bscale, bzero)?;
        write_band_f64( &mut out_band, &data)?;
        debug!("band {i}: {:?} -> {:?}", (rows,cols), data.dim());
        if !opts.quiet { println!("band: {i} complete."); }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fill() {
        let mut v = [ f64::NAN, 1.0, f64::NAN, f64::NAN, 4.0, f64::NAN ];
        fill_nan_linear( &mut v);
        assert_eq!( v, [ 1.0, 1.0, 2.0, 3.0, 4.0, 4.0 ]);

        let mut none = [ f64::NAN, f64::NAN ];
        fill_nan_linear( &mut none);
        assert!( none.iter().all( |v| v.is_nan()));
    }

    #[test]
    fn test_flip_and_pad() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!( flip_rows(&a), array![[3.0, 4.0], [1.0, 2.0]]);
        assert_eq!( pad_columns( &a, 4, Padding::Left).unwrap(), array![[0.0, 0.0, 1.0, 2.0], [0.0, 0.0, 3.0, 4.0]]);
        assert_eq!( pad_columns( &a, 3, Padding::Right).unwrap(), array![[1.0, 2.0, 0.0], [3.0, 4.0, 0.0]]);
        assert!( pad_columns( &a, 1, Padding::Right).is_err());
    }

    #[test]
    fn test_prepare_order() {
        // scale first, then negatives are masked and filled from the flattened neighbors
        let a = array![[1.0, -1.0], [3.0, 5.0]];
        let opts = ClipperOptions{ scale: true, positive: true, fill: true, flip: true, ..Default::default() };
        let res = prepare_band( a, &opts, 2.0, -1.0).unwrap();
        // scaled: [[1,-3],[5,9]] flipped: [[5,9],[1,-3]] masked: [[5,9],[1,NaN]] filled: last valid 1
        assert_eq!( res, array![[5.0, 9.0], [1.0, 1.0]]);
    }
}
