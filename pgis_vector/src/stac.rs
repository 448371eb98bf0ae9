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

//! collect the footprints of downloaded STAC items into a polygon shapefile

use std::fs;
use std::path::{Path, PathBuf};
use gdal::DriverManager;
use gdal::spatial_ref::SpatialRef;
use gdal::vector::{FieldValue, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType, ToGdal};
use tracing::warn;
use pgis_common::fs::files_with_extension;

use crate::SHAPEFILE_DRIVER;
use crate::errors::{Result, invalid_input};

#[derive(Debug,Clone,PartialEq)]
pub struct StacItem {
    pub id: String,
    pub geometry: geo_types::Geometry<f64>,
}

impl StacItem {
    pub fn from_json (json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        let id = value.get("id").and_then( |v| v.as_str())
            .ok_or_else( || invalid_input("STAC item has no 'id'"))?
            .to_string();
        let geometry = value.get("geometry").filter( |v| !v.is_null())
            .ok_or_else( || invalid_input( format!("STAC item {id} has no geometry")))?;
        let geometry = geojson::Geometry::from_json_value( geometry.clone())?;
        let geometry = geo_types::Geometry::<f64>::try_from(geometry)?;

        Ok( StacItem { id, geometry })
    }

    pub fn from_file (path: &Path) -> Result<Self> {
        StacItem::from_json( &fs::read_to_string(path)?)
    }
}

/// all `*.json` files below `dir`, in sorted order
pub fn find_stac_files (dir: &Path) -> Result<Vec<PathBuf>> {
    Ok( files_with_extension( &dir, "json", true)? )
}

/// polygon layer "layer" in EPSG:4326 with a string field "id"
pub fn write_stac_shapefile (path: &Path, items: &[StacItem]) -> Result<()> {
    let driver = DriverManager::get_driver_by_name(SHAPEFILE_DRIVER)?;
    let mut ds = driver.create_vector_only(path)?;
    let srs = SpatialRef::from_epsg(4326)?;

    let mut layer = ds.create_layer( LayerOptions {
        name: "layer",
        srs: Some(&srs),
        ty: OGRwkbGeometryType::wkbPolygon,
        options: None
    })?;
    layer.create_defn_fields( &[("id", OGRFieldType::OFTString)])?;

    for item in items {
        let geom = item.geometry.to_gdal()?;
        layer.create_feature_fields( geom, &["id"], &[FieldValue::StringValue(item.id.clone())])?;
    }
    Ok(())
}

/// returns the number of items written
pub fn stac_to_shp (dir: &Path, outfile: &Path) -> Result<usize> {
    let mut items = Vec::new();

    for file in find_stac_files(dir)? {
        match StacItem::from_file(&file) {
            Ok(item) => {
                items.push(item);
                println!("loaded geom from: {}", file.display());
            }
            Err(e) => warn!("skipping {}: {}", file.display(), e)
        }
    }

    write_stac_shapefile( outfile, &items)?;
    Ok( items.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let json = r#"{"type":"Feature","stac_version":"1.0.0","id":"ESP_011261_1960",
            "geometry":{"type":"Polygon","coordinates":[[[10.0,20.0],[11.0,20.0],[11.0,21.0],[10.0,20.0]]]},
            "properties":{},"links":[],"assets":{}}"#;
        let item = StacItem::from_json(json).unwrap();
        assert_eq!( item.id, "ESP_011261_1960");
        assert!( matches!( item.geometry, geo_types::Geometry::Polygon(_)));
    }

    #[test]
    fn test_invalid_items() {
        assert!( StacItem::from_json(r#"{"type":"Collection","id":"ctx"}"#).is_err());
        assert!( StacItem::from_json(r#"{"geometry":{"type":"Point","coordinates":[1,2]}}"#).is_err());
        assert!( StacItem::from_json("not json").is_err());
    }
}
