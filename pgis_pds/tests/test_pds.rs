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

use std::fs;
use std::path::Path;
use gdal::Dataset;
use gdal::vector::LayerAccess;
use pgis_gdal::{GdalDataType, SpatialRef, get_driver, create_dataset};
use pgis_pds::pds3::gdal_to_pds3;
use pgis_pds::pds4::isis3_to_pds4;
use pgis_pds::caminfo::footprint_to_shp;

// run with "cargo test test_xx -- --nocapture"

const CAMINFO: &str = r#"Object = Caminfo
  Group = Parameters
    Program     = caminfo
    From        = EN0108828322M.cub
  End_Group

  Group = Geometry
    BandsUsed              = 1
    StartTime              = 2008-01-14T19:00:26.936
    EndTime                = 2008-01-14T19:00:26.954
    CenterLine             = 512.5
    CenterSample           = 512.5
    CenterLatitude         = 4.46
    CenterLongitude        = 133.37
    CenterRadius           = 2439400.0 <meters>
    RightAscension         = 161.2
    Declination            = 7.5
    PhaseAngle             = 42.1
    EmissionAngle          = 1.3
    IncidenceAngle         = 41.8
    NorthAzimuth           = 270.6
    OffNadir               = 1.2
    SolarLongitude         = 202.4
    LocalTime              = 10.2
    TargetCenterDistance   = 29932.0 <km>
    SlantDistance          = 27493.0 <km>
    SampleResolution       = 547.2
    LineResolution         = 547.2
    PixelResolution        = 547.2
    MeanGroundResolution   = 547.3
    SubSolarAzimuth        = 180.2
    SubSolarGroundAzimuth  = 178.5
    SubSolarLatitude       = 0.01
    SubSolarLongitude      = 175.5
    SubSpacecraftAzimuth   = 4.3
    SubSpacecraftLatitude  = 3.9
    SubSpacecraftLongitude = 132.2
    ParallaxX              = 0.02
    ParallaxY              = -0.01
    ShadowX                = 0.9
    ShadowY                = -0.02
  End_Group

  Group = Polygon
    CentroidLine      = 510.0
    CentroidSample    = 512.0
    CentroidLatitude  = 4.4
    CentroidLongitude = 133.4
    CentroidRadius    = (2439400.0 <meters>, 0.0)
    SurfaceArea       = (302411.4 <km^2>, 0.0)
    GlobalCoverage    = (0.4, 0.0)
    GisFootprint      = "MULTIPOLYGON (((131 2, 136 2, 136 7, 131 7, 131 2)))"
  End_Group
End_Object
End
"#;

#[test]
fn test_footprint_to_shp() {
    let tmp = tempfile::tempdir().unwrap();
    let pvl = tmp.path().join("EN0108828322M.pvl");
    fs::write( &pvl, CAMINFO).unwrap();

    let out = footprint_to_shp( &pvl, None).unwrap();
    assert_eq!( out.record.filename(), "EN0108828322M.cub");
    assert_eq!( out.record.values.len(), 40);
    assert_eq!( out.record.values[5], "2439400.0");
    assert_eq!( out.record.values[36], "2439400.0");

    let csv = fs::read_to_string( &out.csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!( lines.len(), 2);
    assert!( lines[0].starts_with("Filename,CenterLine,CenterSample,"));
    assert!( lines[0].ends_with(",GlobalCoverage,GisFootprint"));
    assert!( lines[1].starts_with("EN0108828322M.cub,512.5,512.5,4.46,133.37,2439400.0,"));
    assert!( lines[1].ends_with(",0.4,\"MULTIPOLYGON (((131 2, 136 2, 136 7, 131 7, 131 2)))\""));

    let vrt = fs::read_to_string( &out.vrt).unwrap();
    assert!( vrt.contains("<GeometryField encoding=\"WKT\" field=\"GisFootprint\"/>"));

    let ds = Dataset::open( &out.shp).unwrap();
    assert_eq!( ds.layer(0).unwrap().feature_count(), 1);
}

#[test]
fn test_footprint_missing_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let pvl = tmp.path().join("broken.pvl");
    fs::write( &pvl, "Object = Caminfo\n  Group = Parameters\n    From = x.cub\n  End_Group\nEnd_Object\nEnd\n").unwrap();
    assert!( footprint_to_shp( &pvl, None).is_err());
}

#[test]
fn test_isis3_to_pds4_config() {
    let tmp = tempfile::tempdir().unwrap();
    let cub = tmp.path().join("ldem.cub");
    fs::write( &cub, "Object = IsisCube\n  Group = Mapping\n    TargetName = Moon\n  End_Group\n  Group = Archive\n    DataSetId = LRO-L-LOLA-4-GDR-V1.0\n  End_Group\nEnd_Object\nEnd\n").unwrap();
    let cub = cub.to_str().unwrap();
    let config = tmp.path().join("ldem.config");
    let config = config.to_str().unwrap();

    let res = isis3_to_pds4( cub, config, "pds4_template.xml", false, "#isis3_to_pds4 ldem.cub ldem.config").unwrap();
    assert_eq!( res.missing, vec!["InstrumentHostName", "InstrumentId", "ProductId"]);
    assert!( res.output.to_str().unwrap().ends_with("ldem_pds4.xml"));
    assert!( res.command.starts_with("gdal_translate -of PDS4 -co IMAGE_FORMAT=GEOTIFF -co TEMPLATE=pds4_template.xml --optfile "));

    let text = fs::read_to_string(config).unwrap();
    assert_eq!( text, "#isis3_to_pds4 ldem.cub ldem.config
-co VAR_TARGET_TYPE=Satellite
-co VAR_INVESTIGATION_AREA_LID_REFERENCE=\"urn:nasa:pds:context:instrument_host:spacecraft.lro\"
-co VAR_TARGET=MOON
-co VAR_LOGICAL_IDENTIFIER=LRO-L-LOLA-4-GDR-V1.0
");
}

fn make_geographic_raster (path: &Path) {
    let driver = get_driver("GTiff").unwrap();
    let mut ds = create_dataset( &driver, path, 4, 2, 1, GdalDataType::Float32, None).unwrap();
    ds.set_geo_transform( &[-180.0, 1.0, 0.0, 90.0, 0.0, -1.0]).unwrap();
    let srs = SpatialRef::from_epsg(4326).unwrap();
    ds.set_projection( &srs.to_wkt().unwrap()).unwrap();
}

#[test]
fn test_gdal_to_pds3() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("LRO_LOLA_DEM_v3.tif");
    make_geographic_raster(&src);

    let img = tmp.path().join("dem.img");
    let img = img.to_str().unwrap();
    let label = gdal_to_pds3( &src, img, false).unwrap();
    assert_eq!( label.record_bytes(), 16);
    assert_eq!( label.product.version_id, "V3.0");

    let lbl = fs::read_to_string( tmp.path().join("dem.lbl")).unwrap();
    for l in lbl.lines() { println!("{l}"); }
    assert!( lbl.starts_with("PDS_VERSION_ID            = PDS3\n"));
    assert!( lbl.contains("\nRECORD_BYTES  = 16\nFILE_RECORDS  = 2\n"));
    assert!( lbl.contains("\nPRODUCT_ID                = \"LRO_LOLA_DEM_v3\"\n"));
    assert!( lbl.contains("\nINSTRUMENT_NAME           = \"LOLA\"\n"));
    assert!( lbl.contains("    MAP_PROJECTION_TYPE          = \"SIMPLE_CYLINDRICAL\"\n"));
    assert!( lbl.contains("    CENTER_LATITUDE              =  0.00 <DEG>\n"));
    assert!( lbl.contains("    MAP_RESOLUTION               = 1.0000 <PIX/DEG>\n"));
    assert!( lbl.contains("    MAP_SCALE                    = 111.31949079 <KM/PIXEL>\n"));
    assert!( lbl.contains("    MINIMUM_LATITUDE             = 88.00000000 <DEGREE>\n"));
    assert!( lbl.contains("    EASTERNMOST_LONGITUDE        = -176.00000000 <DEGREE>\n"));
    assert!( lbl.contains("    SAMPLE_TYPE                = PC_REAL\n"));
    assert!( lbl.contains("    CORE_NULL                  = 16#FF7FFFFB#\n"));
    assert!( lbl.ends_with("END_OBJECT = IMAGE\nEND\n"));

    assert!( Path::new(img).is_file());
}
