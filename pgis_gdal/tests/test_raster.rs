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
use ndarray::Array2;
use pgis_gdal::{Dataset, GdalDataType, SpatialRef, get_driver, create_dataset, read_band_f64, write_band_f64,
                get_driver_name_from_filename, parse_data_type, default_nodata};
use pgis_gdal::clip::clip_to_range;
use pgis_gdal::hist::{dataset_report, HistOptions};
use pgis_gdal::slope::{baseline_slope, SlopeMethod, SlopeOptions};
use pgis_gdal::clipper::{clipper_prep, ClipperOptions, Padding, PAD_SIZE};
use pgis_gdal::programs::translate;
use pgis_gdal::stdpar::new_standard_parallel;
use pgis_gdal::extent::match_extents;

// run with "cargo test test_xx -- --nocapture"

fn make_raster (path: &Path, w: usize, h: usize, values: Vec<f64>, nodata: Option<f64>) {
    let driver = get_driver("GTiff").unwrap();
    let mut ds = create_dataset( &driver, path, w, h, 1, GdalDataType::Float32, None).unwrap();
    ds.set_geo_transform( &[0.0, 1.0, 0.0, h as f64, 0.0, -1.0]).unwrap();
    let mut band = ds.rasterband(1).unwrap();
    band.set_no_data_value( nodata).unwrap();
    write_band_f64( &mut band, &Array2::from_shape_vec( (h,w), values).unwrap()).unwrap();
}

const LUNAR_EQC: &str = "+proj=eqc +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +R=1737400 +units=m +no_defs";

fn make_georef_raster (path: &Path, w: usize, h: usize, gt: [f64;6], srs: &SpatialRef, n_bands: usize) {
    let driver = get_driver("GTiff").unwrap();
    let mut ds = create_dataset( &driver, path, w, h, n_bands, GdalDataType::Float32, None).unwrap();
    ds.set_geo_transform( &gt).unwrap();
    ds.set_spatial_ref( srs).unwrap();
    for i in 1..=n_bands {
        let mut band = ds.rasterband(i).unwrap();
        let values: Vec<f64> = (0..w*h).map( |v| (v + 10*i) as f64).collect();
        write_band_f64( &mut band, &Array2::from_shape_vec( (h,w), values).unwrap()).unwrap();
    }
}

#[test]
fn test_driver_lookup() {
    assert_eq!( get_driver_name_from_filename("moon.TIF"), Some("GTiff"));
    assert_eq!( get_driver_name_from_filename("out.shp"), Some("ESRI Shapefile"));
    assert_eq!( get_driver_name_from_filename("noext"), None);
    assert_eq!( parse_data_type("Byte").unwrap(), GdalDataType::UInt8);
    assert!( parse_data_type("CFloat32").is_err());
    assert_eq!( default_nodata( GdalDataType::Int16), -32768.0);
}

#[test]
fn test_clip_to_range() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src.tif");
    let dst = tmp.path().join("clipped.tif");
    make_raster( &src, 3, 2, vec![ -5.0, 0.0, 5.0, 10.0, 15.0, -9999.0 ], Some(-9999.0));

    let res = clip_to_range( &src, &dst, 0.0, 10.0, None).unwrap();
    assert_eq!( res.len(), 1);
    assert_eq!( res[0].replaced, 2);
    assert_eq!( res[0].nodata, -9999.0);

    let ds = Dataset::open(&dst).unwrap();
    let band = ds.rasterband(1).unwrap();
    let data = read_band_f64( &band).unwrap();
    assert_eq!( data.as_slice().unwrap(), &[ -9999.0, 0.0, 5.0, 10.0, -9999.0, -9999.0 ]);
    assert_eq!( band.no_data_value(), Some(-9999.0));
}

#[test]
fn test_clip_requires_nodata() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src.tif");
    make_raster( &src, 2, 1, vec![ 1.0, 2.0 ], None);
    assert!( clip_to_range( &src, &tmp.path().join("out.tif"), 0.0, 1.0, None).is_err());
}

#[test]
fn test_hist_report() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src.tif");
    make_raster( &src, 4, 2, vec![ 2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0 ], Some(-9999.0));

    let opts = HistOptions { stats: true, hist: true, ..Default::default() };
    let lines = dataset_report( &src, &opts).unwrap();
    for l in &lines { println!("{l}"); }

    assert_eq!( lines[0], "Min=2.00, Max=9.00, Mean=5.00, StdDev=2.00, RMS=5.39");
    assert_eq!( lines[1], "level\tvalue\tcount\tcumlative");
    assert_eq!( lines.len(), 2 + 256);
    assert!( lines.last().unwrap().ends_with("1.000000"));
}

#[test]
fn test_baseline_slope() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("dem.tif");
    let values: Vec<f64> = (0..36).map( |i| (i % 6) as f64).collect();
    make_raster( &src, 6, 6, values, Some(-9999.0));

    let out = tmp.path().join("slope.tif");
    let opts = SlopeOptions { method: SlopeMethod::Baseline1, byte_output: true, crop: true, quiet: true };
    let written = baseline_slope( &src, &out, &opts).unwrap();
    assert_eq!( written.len(), 2);

    let ds32 = Dataset::open( tmp.path().join("32bit_slope.tif")).unwrap();
    assert_eq!( ds32.raster_size(), (5,5));
    let gt = ds32.geo_transform().unwrap();
    assert_eq!( gt[0], 0.5);
    assert_eq!( gt[3], 5.5);
    let slope = read_band_f64( &ds32.rasterband(1).unwrap()).unwrap();
    assert!( (slope[[0,0]] - 45.0).abs() < 1e-4);

    let ds8 = Dataset::open(&out).unwrap();
    let band8 = ds8.rasterband(1).unwrap();
    assert_eq!( band8.band_type(), GdalDataType::UInt8);
    assert_eq!( band8.no_data_value(), Some(0.0));
    let bytes = read_band_f64( &band8).unwrap();
    assert_eq!( bytes[[0,0]], 226.0);
}

#[test]
fn test_clipper_pad() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("frame.tif");
    make_raster( &src, 2, 2, vec![ 1.0, -1.0, 3.0, 5.0 ], None);

    let out = tmp.path().join("frame_pad.tif");
    let opts = ClipperOptions { padding: Padding::Right, positive: true, fill: true, quiet: true, ..Default::default() };
    clipper_prep( &src, &out, &opts).unwrap();

    let ds = Dataset::open(&out).unwrap();
    assert_eq!( ds.raster_size(), (PAD_SIZE, 2));
    let data = read_band_f64( &ds.rasterband(1).unwrap()).unwrap();
    assert_eq!( data[[0,0]], 1.0);
    assert_eq!( data[[0,1]], 2.0);
    assert_eq!( data[[1,1]], 5.0);
    assert_eq!( data[[1,PAD_SIZE-1]], 0.0);
}

#[test]
fn test_translate() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src.tif");
    make_raster( &src, 2, 2, vec![ 1.0, 2.0, 3.0, 4.0 ], None);

    let src_ds = Dataset::open(&src).unwrap();
    let out = tmp.path().join("out.tif");
    {
        let _ds = translate( &src_ds, &out, &["-of", "GTiff", "-a_ullr", "10", "20", "30", "0"]).unwrap();
    }
    let ds = Dataset::open(&out).unwrap();
    let gt = ds.geo_transform().unwrap();
    assert_eq!( (gt[0], gt[1], gt[3], gt[5]), (10.0, 10.0, 20.0, -10.0));

    assert!( translate( &src_ds, &tmp.path().join("bad.tif"), &["-of"]).is_err());
}

#[test]
fn test_clip_reports_nodata_per_band() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("two_bands.tif");
    {
        let driver = get_driver("GTiff").unwrap();
        let ds = create_dataset( &driver, &src, 2, 1, 2, GdalDataType::Float32, None).unwrap();
        for (i,nd) in [(1, -9999.0), (2, -1.0)] {
            let mut band = ds.rasterband(i).unwrap();
            band.set_no_data_value( Some(nd)).unwrap();
            write_band_f64( &mut band, &Array2::from_shape_vec( (1,2), vec![ 5.0, 50.0 ]).unwrap()).unwrap();
        }
    }

    let res = clip_to_range( &src, &tmp.path().join("clipped.tif"), 0.0, 10.0, None).unwrap();
    assert_eq!( res.len(), 2);
    assert_eq!( (res[0].band, res[0].nodata, res[0].replaced), (1, -9999.0, 1));
    assert_eq!( (res[1].band, res[1].nodata, res[1].replaced), (2, -1.0, 1));
}

#[test]
fn test_hist_band_header() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("two_bands.tif");
    let srs = SpatialRef::from_epsg(4326).unwrap();
    make_georef_raster( &src, 4, 2, [0.0, 1.0, 0.0, 2.0, 0.0, -1.0], &srs, 2);

    let opts = HistOptions { stats: true, ..Default::default() };
    let lines = dataset_report( &src, &opts).unwrap();
    for l in &lines { println!("{l}"); }

    let headers: Vec<&String> = lines.iter().filter( |l| l.starts_with("Band ")).collect();
    assert_eq!( headers.len(), 2);
    assert!( headers[0].starts_with("Band 1 Block="));
    assert!( headers[0].ends_with("Type=Float32, ColorInterp=Gray"));
    assert!( headers[1].starts_with("Band 2 Block="));
    assert!( headers[1].contains("Type=Float32, ColorInterp="));
}

#[test]
fn test_new_standard_parallel() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("moon_eqc.tif");
    let srs = SpatialRef::from_proj4( LUNAR_EQC).unwrap();
    make_georef_raster( &src, 4, 2, [-1000.0, 500.0, 0.0, 1000.0, 0.0, -500.0], &srs, 1);

    let dst = tmp.path().join("moon_eqc60.tif");
    let shift = new_standard_parallel( &src, &dst, "GTiff", 60.0).unwrap();
    assert_eq!( shift.clat, 60.0);
    assert!( (shift.newminx + 500.0).abs() < 1e-6);
    assert!( (shift.new_cellsize_x - 250.0).abs() < 1e-6);
    assert_eq!( shift.cellsize_y, 500.0);

    let ds = Dataset::open(&dst).unwrap();
    let gt = ds.geo_transform().unwrap();
    assert!( (gt[0] + 500.0).abs() < 1e-6);
    assert!( (gt[1] - 250.0).abs() < 1e-6);
    assert_eq!( (gt[2], gt[3], gt[4], gt[5]), (0.0, 1000.0, 0.0, -500.0));

    let out_srs = ds.spatial_ref().unwrap();
    let sp = out_srs.get_proj_param("standard_parallel_1").unwrap().unwrap();
    assert!( (sp - 60.0).abs() < 1e-9);

    let data = read_band_f64( &ds.rasterband(1).unwrap()).unwrap();
    assert_eq!( data[[1,3]], 17.0);
}

#[test]
fn test_new_standard_parallel_requires_equirectangular() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("geographic.tif");
    let srs = SpatialRef::from_epsg(4326).unwrap();
    make_georef_raster( &src, 4, 2, [-180.0, 90.0, 0.0, 90.0, 0.0, -90.0], &srs, 1);

    let dst = tmp.path().join("never.tif");
    assert!( new_standard_parallel( &src, &dst, "GTiff", 30.0).is_err());
    assert!( !dst.exists());
}

#[test]
fn test_match_extents() {
    let tmp = tempfile::tempdir().unwrap();
    let primary = tmp.path().join("primary.tif");
    let srs = SpatialRef::from_proj4( LUNAR_EQC).unwrap();
    make_georef_raster( &primary, 3, 2, [100.0, 10.0, 0.0, 200.0, 0.0, -10.0], &srs, 1);

    let replica = tmp.path().join("replica.tif");
    make_raster( &replica, 3, 2, vec![ 1.0, 2.0, 3.0, 4.0, 5.0, 6.0 ], None);

    let out = match_extents( &primary, &replica).unwrap();
    assert_eq!( out, tmp.path().join("replica_match.tif"));

    let ds = Dataset::open(&out).unwrap();
    assert_eq!( ds.geo_transform().unwrap(), [100.0, 10.0, 0.0, 200.0, 0.0, -10.0]);
    let out_srs = ds.spatial_ref().unwrap();
    assert!( out_srs.is_projected());
    assert_eq!( out_srs.get_attr_value("PROJECTION", 0).unwrap().as_deref(), Some("Equirectangular"));

    let data = read_band_f64( &ds.rasterband(1).unwrap()).unwrap();
    assert_eq!( data.as_slice().unwrap(), &[ 1.0, 2.0, 3.0, 4.0, 5.0, 6.0 ]);
}
