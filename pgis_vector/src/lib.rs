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

pub mod errors;
pub mod ogr_vrt;
pub mod bbox;
pub mod stac;
pub mod lunar;
pub mod isisminer;

use std::path::Path;
use gdal::Dataset;
use gdal::spatial_ref::SpatialRef;
use pgis_gdal::programs::vector_translate;

use crate::errors::Result;

pub const SHAPEFILE_DRIVER: &str = "ESRI Shapefile";

/// `-a_srs <prj>` arguments for ogr2ogr if a projection file is given
pub fn assign_srs_args (prj: Option<&str>) -> Vec<String> {
    match prj {
        Some(prj) => vec!["-a_srs".to_string(), prj.to_string()],
        None => Vec::new()
    }
}

/// convert an OGR VRT layer into a shapefile, replacing existing output and skipping features that fail
pub fn vrt_to_shapefile (vrt: &Path, shp: &Path, prj: Option<&str>) -> Result<()> {
    let src = Dataset::open(vrt)?;

    let mut args = vec!["-f".to_string(), SHAPEFILE_DRIVER.to_string()];
    args.extend( assign_srs_args(prj));
    args.push("-overwrite".to_string());
    args.push("-skipfailures".to_string());

    vector_translate( &[&src], shp, &args)?;
    Ok(())
}

/// parse a user SRS definition (EPSG/IAU authority code, PROJ string, WKT or .prj file)
pub fn srs_from_definition (definition: &str) -> Result<SpatialRef> {
    let srs = SpatialRef::from_definition(definition)?;
    pgis_gdal::set_traditional_axis_order(&srs);
    Ok(srs)
}
