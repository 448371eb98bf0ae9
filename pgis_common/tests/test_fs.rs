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
use std::path::{Path,PathBuf};
use pgis_common::fs::*;
use pgis_common::BoundingBox;

// run with "cargo test test_xx -- --nocapture"

#[test]
fn test_files_with_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let sub = tmp.path().join("a/b");
    fs::create_dir_all(&sub).unwrap();
    fs::write( tmp.path().join("one.json"), "{}").unwrap();
    fs::write( sub.join("two.json"), "{}").unwrap();
    fs::write( sub.join("three.txt"), "").unwrap();

    let flat = files_with_extension( &tmp.path(), "json", false).unwrap();
    assert_eq!( flat.len(), 1);

    let all = files_with_extension( &tmp.path(), "json", true).unwrap();
    assert_eq!( all.len(), 2);
    assert!( all.iter().all( |p| extension(p) == Some("json")));

    assert!( files_with_extension( &tmp.path().join("nope"), "json", true).is_err());
}

#[test]
fn test_path_names() {
    assert_eq!( with_suffix("data/moon.tif", "_match", "tif"), PathBuf::from("data/moon_match.tif"));
    assert_eq!( with_suffix("moon.cub", "_pds4", "xml"), PathBuf::from("moon_pds4.xml"));
    assert_eq!( replace_extension("x/lola.tab", "obj"), PathBuf::from("x/lola.obj"));
    assert_eq!( strip_extension("dir.v2/EPIC_1.h5"), "dir.v2/EPIC_1");
    assert_eq!( strip_extension("dir.v2/EPIC"), "dir.v2/EPIC");
    assert_eq!( lowercase_extension("OUT.GeoJSON"), Some("geojson".to_string()));
}

#[test]
fn test_bbox_ring() {
    let bb = BoundingBox::new( -1.0, -2.0, 3.0, 4.0);
    let r = bb.ring();
    assert_eq!( r[0], r[4]);
    assert_eq!( r[1], (3.0, -2.0));
    assert_eq!( bb.width(), 4.0);

    let u = bb.union( &BoundingBox::new( 0.0, -5.0, 1.0, 5.0));
    assert_eq!( u, BoundingBox::new( -1.0, -5.0, 3.0, 5.0));
}
