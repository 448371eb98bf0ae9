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

//! slope in degrees over fixed baselines (1, 2 or 5 pixels) or Horn's 3x3 method

use std::path::{Path,PathBuf};
use ndarray::{Array2, s};
use strum::Display;
use tracing::{info, warn};

use crate::{Dataset, GdalDataType, GeoTransform, new_geotransform, default_nodata, create_dataset, read_band_f64,
            write_band_f64};
use crate::errors::{Result, misc_error};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Display)]
pub enum SlopeMethod {
    Baseline1,
    Baseline2,
    Baseline5,
    Horn,
}

impl SlopeMethod {
    /// Horn's method if no baseline is given
    pub fn from_baseline (baseline: Option<u32>) -> Result<Self> {
        match baseline {
            Some(1) => Ok(SlopeMethod::Baseline1),
            Some(2) => Ok(SlopeMethod::Baseline2),
            Some(5) => Ok(SlopeMethod::Baseline5),
            Some(3) | None => Ok(SlopeMethod::Horn),
            Some(b) => Err( misc_error( format!("unsupported baseline {b}, has to be 1, 2 or 5")))
        }
    }

    pub fn window_size (&self) -> usize {
        match self {
            SlopeMethod::Baseline1 => 2,
            SlopeMethod::Baseline2 => 3,
            SlopeMethod::Baseline5 => 6,
            SlopeMethod::Horn => 3,
        }
    }

    fn divisor (&self) -> f64 {
        match self {
            SlopeMethod::Baseline1 => 2.0,
            SlopeMethod::Baseline2 => 4.0,
            SlopeMethod::Baseline5 => 10.0,
            SlopeMethod::Horn => 8.0,
        }
    }

    /// even sized windows are not centered on their cell, which shifts the result by half a pixel
    fn is_half_pixel_shifted (&self) -> bool {
        matches!( self, SlopeMethod::Baseline1 | SlopeMethod::Baseline5)
    }

    /// (leading pixels dropped, total pixels dropped) per axis when cropping
    fn crop_margins (&self) -> Option<(usize,usize)> {
        match self {
            SlopeMethod::Baseline1 => Some((1,1)),
            SlopeMethod::Baseline2 => Some((1,2)),
            SlopeMethod::Baseline5 => Some((3,5)),
            SlopeMethod::Horn => None,
        }
    }
}

pub fn slope_degrees (dzdx: f64, dzdy: f64) -> f64 {
    (dzdx * dzdx + dzdy * dzdy).sqrt().atan().to_degrees()
}

/// slope of a full window, given as row-major values. Returns None if the window contains nodata
fn window_slope (method: SlopeMethod, w: &[f64], cellx: f64, celly: f64, nodata: f64) -> Option<f64> {
    if w.iter().any( |v| *v == nodata) { return None }

    let n = method.window_size();
    let div = method.divisor();
    let (dzdx, dzdy) = match method {
        SlopeMethod::Horn => {
            let (a,b,c, d,f, g,h,i) = (w[0],w[1],w[2], w[3],w[5], w[6],w[7],w[8]);
            ( ((c + 2.0*f + i) - (a + 2.0*d + g)) / (div * cellx),
              ((g + 2.0*h + i) - (a + 2.0*b + c)) / (div * celly) )
        }
        _ => {
            let (a,b,c,d) = (w[0], w[n-1], w[n*(n-1)], w[n*n-1]);
            ( ((b + d) - (a + c)) / (div * cellx),
              ((a + b) - (c + d)) / (div * celly) )
        }
    };
    Some( slope_degrees( dzdx, dzdy))
}

/// compute the slope for every cell of `data` ([row,col]). The window of size n for a cell at r covers
/// r - n/2 ..= r - n/2 + n - 1 in both dimensions. Cells whose window contains nodata or reaches beyond
/// the raster edge are set to nodata
pub fn compute_slope (data: &Array2<f64>, method: SlopeMethod, cellx: f64, celly: f64, nodata: f64) -> Array2<f64> {
    let (rows,cols) = data.dim();
    let n = method.window_size();
    let lead = n / 2;
    let mut slope = Array2::from_elem( (rows,cols), nodata);
    let mut window = vec![0.0; n*n];

    if rows + lead < n || cols + lead < n { return slope }

    for r in lead..(rows + lead + 1 - n) {
        let r0 = r - lead;
        for c in lead..(cols + lead + 1 - n) {
            let c0 = c - lead;
            for (k, v) in data.slice( s![r0..r0+n, c0..c0+n]).iter().enumerate() {
                window[k] = *v;
            }
            if let Some(v) = window_slope( method, &window, cellx, celly, nodata) {
                slope[[r,c]] = v;
            }
        }
    }
    slope
}

/// 8 bit representation with offset -0.2 and scale 0.2. Nodata maps to 0
pub fn slope_to_byte (slope: &Array2<f64>, nodata: f64) -> Array2<f64> {
    slope.mapv( |v| {
        if v == nodata || v.is_nan() { 0.0 } else { ((v + 0.2) * 5.0).round_ties_even() }
    })
}

pub fn slope_geotransform (gt: &GeoTransform, method: SlopeMethod) -> GeoTransform {
    if method.is_half_pixel_shifted() {
        new_geotransform( gt[0] - gt[1]/2.0, gt[1], gt[2], gt[3] - gt[5]/2.0, gt[4], gt[5])
    } else {
        *gt
    }
}

/// drop the border that can't be computed for a baseline method. Horn results are not cropped
pub fn crop_slope (slope: &Array2<f64>, method: SlopeMethod) -> Option<Array2<f64>> {
    let (lead, total) = method.crop_margins()?;
    let (rows,cols) = slope.dim();
    if rows <= total || cols <= total { return None }
    let trail = total - lead;
    Some( slope.slice( s![lead..rows-trail, lead..cols-trail]).to_owned())
}

/// geotransform of the cropped result, `gt` being the geotransform of the uncropped slope
pub fn crop_geotransform (gt: &GeoTransform, method: SlopeMethod) -> GeoTransform {
    match method.crop_margins() {
        Some((lead,_)) => {
            let k = lead as f64;
            new_geotransform( gt[0] + gt[1]*k, gt[1], gt[2], gt[3] + gt[5]*k, gt[4], gt[5])
        }
        None => *gt
    }
}

#[derive(Debug,Clone)]
pub struct SlopeOptions {
    pub method: SlopeMethod,
    pub byte_output: bool,
    pub crop: bool,
    pub quiet: bool,
}

/// the float result goes into `32bit_<outfile>` if an additional 8 bit product is requested
pub fn float_output_path (outfile: &Path, byte_output: bool) -> PathBuf {
    if byte_output {
        let name = outfile.file_name().map( |n| format!("32bit_{}", n.to_string_lossy())).unwrap_or_else( || "32bit_".to_string());
        outfile.with_file_name(name)
    } else {
        outfile.to_path_buf()
    }
}

struct SlopeBand {
    slope: Array2<f64>,
    nodata: f64,
}

/// compute the slope of all bands of `infile` and write them as GeoTIFF. Returns the written files
pub fn baseline_slope (infile: &Path, outfile: &Path, opts: &SlopeOptions) -> Result<Vec<PathBuf>> {
    let method = opts.method;
    if opts.crop && method == SlopeMethod::Horn {
        warn!("-crop is not supported for Horn's method, ignored");
    }
    let crop = opts.crop && method != SlopeMethod::Horn;

    let in_ds = Dataset::open(infile)?;
    let (cols,rows) = in_ds.raster_size();
    let n_bands = in_ds.raster_count();
    if n_bands == 0 { return Err( misc_error("no raster bands in input")) }

    let in_type = in_ds.rasterband(1)?.band_type();
    let float_type = match in_type {
        GdalDataType::Float32 | GdalDataType::Float64 => in_type,
        _ => GdalDataType::Float32
    };

    let gt = in_ds.geo_transform()?;
    let (cellx, celly) = (gt[1], gt[5]);
    let projection = in_ds.projection();

    let mut bands: Vec<SlopeBand> = Vec::with_capacity(n_bands);
    for i in 1..=n_bands {
        let band = in_ds.rasterband(i)?;
        let nodata = band.no_data_value().unwrap_or_else( || default_nodata( band.band_type()));
        let data = read_band_f64( &band)?;
        let slope = compute_slope( &data, method, cellx, celly, nodata);
        bands.push( SlopeBand{ slope, nodata });
        if !opts.quiet { println!("band: {i} complete."); }
    }

    let slope_gt = slope_geotransform( &gt, method);
    let (out_gt, out_cols, out_rows) = if crop {
        let (_,total) = method.crop_margins().unwrap_or((0,0));
        let (nc, nr) = (cols.saturating_sub(total), rows.saturating_sub(total));
        if !opts.quiet { println!("cropping file with {total} less pixels X={nc}, Y={nr}"); }
        (crop_geotransform( &slope_gt, method), nc, nr)
    } else {
        (slope_gt, cols, rows)
    };

    let driver = crate::get_driver("GTiff")?;
    let float_path = float_output_path( outfile, opts.byte_output);
    let mut written = Vec::new();

    {
        let mut ds = create_dataset( &driver, &float_path, out_cols, out_rows, n_bands, float_type, None)?;
        if !projection.is_empty() { ds.set_projection( projection.as_str())?; }
        ds.set_geo_transform( &out_gt)?;
        for (k, b) in bands.iter().enumerate() {
            let mut band = ds.rasterband(k+1)?;
            band.set_offset(0.0)?;
            band.set_scale(1.0)?;
            band.set_no_data_value( Some(b.nodata))?;
            write_band_f64( &mut band, &cropped( &b.slope, method, crop)?)?;
        }
        written.push( float_path);
    }

    if opts.byte_output {
        let mut ds = create_dataset( &driver, outfile, out_cols, out_rows, n_bands, GdalDataType::UInt8, None)?;
        if !projection.is_empty() { ds.set_projection( projection.as_str())?; }
        ds.set_geo_transform( &out_gt)?;
        for (k, b) in bands.iter().enumerate() {
            let mut band = ds.rasterband(k+1)?;
            band.set_offset(-0.2)?;
            band.set_scale(0.2)?;
            band.set_no_data_value( Some(0.0))?;
            let bytes = slope_to_byte( &b.slope, b.nodata);
            write_band_f64( &mut band, &cropped( &bytes, method, crop)?)?;
        }
        written.push( outfile.to_path_buf());
    }

    info!("{method} slope written to {written:?}");
    Ok(written)
}

fn cropped (data: &Array2<f64>, method: SlopeMethod, crop: bool) -> Result<Array2<f64>> {
    if crop {
        crop_slope( data, method).ok_or_else( || misc_error("raster too small to crop"))
    } else {
        Ok( data.clone())
    }
}
