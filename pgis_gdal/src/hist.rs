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

//! min/max, statistics and histogram reports for raster bands

use std::path::Path;

use crate::{Dataset, GdalDataType, RasterBand, read_band_f64, data_type_name};
use crate::errors::{Result, misc_error};

pub const DEFAULT_BUCKETS: usize = 256;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct RasterStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// population standard deviation
    pub std_dev: f64,
    pub count: usize,
}

impl RasterStats {
    pub fn rms (&self) -> f64 {
        (self.mean * self.mean + self.std_dev * self.std_dev).sqrt()
    }

    /// apply a linear value transformation. The standard deviation only scales
    pub fn unscaled (&self, scale: f64, offset: f64) -> RasterStats {
        let (a, b) = (self.min * scale + offset, self.max * scale + offset);
        RasterStats {
            min: a.min(b),
            max: a.max(b),
            mean: self.mean * scale + offset,
            std_dev: self.std_dev * scale.abs(),
            count: self.count,
        }
    }
}

/// statistics over all values that are neither nodata nor NaN. None if there are no such values
pub fn compute_stats (values: &[f64], nodata: Option<f64>) -> Option<RasterStats> {
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;

    for v in valid_values( values, nodata) {
        count += 1;
        sum += v;
        if v < min { min = v }
        if v > max { max = v }
    }
    if count == 0 { return None }

    let mean = sum / count as f64;
    let var = valid_values( values, nodata).map( |v| (v - mean) * (v - mean)).sum::<f64>() / count as f64;
    Some( RasterStats { min, max, mean, std_dev: var.sqrt(), count })
}

fn valid_values (values: &[f64], nodata: Option<f64>) -> impl Iterator<Item=f64> + '_ {
    values.iter().cloned().filter( move |v| !v.is_nan() && Some(*v) != nodata)
}

#[derive(Debug,Clone,PartialEq)]
pub struct Histogram {
    /// lower bound of the first bucket
    pub min: f64,
    /// upper bound of the last bucket
    pub max: f64,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn total (&self) -> u64 { self.counts.iter().sum() }
}

/// equally sized buckets over [min,max]. Values outside are ignored, `max` goes into the last bucket
pub fn compute_histogram (values: &[f64], nodata: Option<f64>, min: f64, max: f64, buckets: usize) -> Histogram {
    let mut counts = vec![0u64; buckets];
    let width = max - min;
    if buckets > 0 && width > 0.0 {
        for v in valid_values( values, nodata) {
            if v < min || v > max { continue }
            let k = (((v - min) / width) * buckets as f64).floor() as usize;
            counts[k.min(buckets - 1)] += 1;
        }
    }
    Histogram { min, max, counts }
}

/// bucket range GDAL uses for default histograms: the full value range for Byte bands, otherwise
/// the data range extended by half a bucket on either side
pub fn default_histogram_range (data_type: GdalDataType, stats: &RasterStats, buckets: usize) -> (f64,f64) {
    if data_type == GdalDataType::UInt8 {
        (-0.5, 255.5)
    } else {
        let half = if buckets > 1 { (stats.max - stats.min) / (2.0 * (buckets - 1) as f64) } else { 0.0 };
        (stats.min - half, stats.max + half)
    }
}

fn round2 (v: f64) -> f64 { (v * 100.0).round() / 100.0 }

/// report lines of a histogram. Values start at `min` and advance by the rounded bucket width
pub fn histogram_lines (hist: &Histogram, min: f64, max: f64) -> Vec<String> {
    let mut lines = vec![ "level\tvalue\tcount\tcumlative".to_string() ];
    let n = hist.counts.len();
    if n == 0 { return lines }

    let total = hist.total() as f64;
    let increment = round2( (max - min) / n as f64);
    let mut value = min;
    let mut sum = 0u64;

    for (level, count) in hist.counts.iter().enumerate() {
        sum += count;
        let cum = if total > 0.0 { sum as f64 / total } else { 0.0 };
        lines.push( format!("{}\t{:.2}\t{}\t{:.6}", level, value, count, cum));
        value += increment;
    }
    lines
}

pub fn minmax_line (stats: &RasterStats) -> String {
    format!("Min={:.3} Max={:.3}   Computed Min/Max={:.3},{:.3}", stats.min, stats.max, stats.min, stats.max)
}

pub fn stats_line (stats: &RasterStats) -> String {
    format!("Min={:.2}, Max={:.2}, Mean={:.2}, StdDev={:.2}, RMS={:.2}", stats.min, stats.max, stats.mean, stats.std_dev, stats.rms())
}

#[derive(Debug,Clone,Copy,Default)]
pub struct HistOptions {
    pub min_max: bool,
    pub stats: bool,
    pub hist: bool,
    pub unscale: bool,
}

impl HistOptions {
    pub fn has_report (&self) -> bool { self.min_max || self.stats || self.hist || self.unscale }
}

pub fn band_report (band: &RasterBand, opts: &HistOptions) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    let (scale, offset) = if opts.unscale {
        ( band.scale().unwrap_or(1.0), band.offset().unwrap_or(0.0) )
    } else {
        (1.0, 0.0)
    };

    let data = read_band_f64( band)?;
    let values = data.as_slice().ok_or_else( || misc_error("non-contiguous band data"))?;
    let nodata = band.no_data_value();
    let Some(raw) = compute_stats( values, nodata) else {
        lines.push( "no valid values".to_string());
        return Ok(lines)
    };
    let stats = raw.unscaled( scale, offset);

    if opts.min_max { lines.push( minmax_line(&stats)); }
    if opts.stats { lines.push( stats_line(&stats)); }
    if opts.hist {
        let (lo, hi) = default_histogram_range( band.band_type(), &raw, DEFAULT_BUCKETS);
        let hist = compute_histogram( values, nodata, lo, hi, DEFAULT_BUCKETS);
        lines.extend( histogram_lines( &hist, stats.min, stats.max));
    }

    Ok(lines)
}

pub fn dataset_report (path: &Path, opts: &HistOptions) -> Result<Vec<String>> {
    let ds = Dataset::open(path)?;
    let n_bands = ds.raster_count();
    let mut lines = Vec::new();

    for i in 1..=n_bands {
        let band = ds.rasterband(i)?;
        if n_bands > 1 {
            let (bx,by) = band.block_size();
            lines.push( format!("Band {} Block={}x{} Type={}, ColorInterp={}", i, bx, by, data_type_name( band.band_type()),
                                band.color_interpretation().name()));
        }
        lines.extend( band_report( &band, opts)?);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats() {
        let v = [ 2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0, -9999.0, f64::NAN ];
        let s = compute_stats( &v, Some(-9999.0)).unwrap();
        assert_eq!( s.count, 8);
        assert_eq!( s.min, 2.0);
        assert_eq!( s.max, 9.0);
        assert_eq!( s.mean, 5.0);
        assert_eq!( s.std_dev, 2.0);
        assert_eq!( stats_line(&s), "Min=2.00, Max=9.00, Mean=5.00, StdDev=2.00, RMS=5.39");
        assert_eq!( minmax_line(&s), "Min=2.000 Max=9.000   Computed Min/Max=2.000,9.000");

        let u = s.unscaled( 0.5, 10.0);
        assert_eq!( (u.min, u.max, u.mean, u.std_dev), (11.0, 14.5, 12.5, 1.0));

        assert!( compute_stats( &[-9999.0], Some(-9999.0)).is_none());
    }

    #[test]
    fn test_histogram() {
        let v = [ 0.0, 1.0, 2.0, 3.0, 4.0 ];
        let h = compute_histogram( &v, None, 0.0, 4.0, 4);
        assert_eq!( h.counts, vec![1,1,1,2]);

        let lines = histogram_lines( &h, 0.0, 4.0);
        assert_eq!( lines.len(), 5);
        assert_eq!( lines[0], "level\tvalue\tcount\tcumlative");
        assert_eq!( lines[1], "0\t0.00\t1\t0.200000");
        assert_eq!( lines[4], "3\t3.00\t2\t1.000000");
    }

    #[test]
    fn test_histogram_range() {
        let s = RasterStats{ min: 0.0, max: 255.0, mean: 0.0, std_dev: 0.0, count: 1 };
        assert_eq!( default_histogram_range( GdalDataType::UInt8, &s, 256), (-0.5, 255.5));
        assert_eq!( default_histogram_range( GdalDataType::Float32, &s, 256), (-0.5, 255.5));
    }
}
