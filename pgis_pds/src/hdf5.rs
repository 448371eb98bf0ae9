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

//! export the subdatasets of HDF5 files (e.g. DSCOVR EPIC products) as PDS4 arrays

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use pgis_gdal::{Dataset, Metadata};
use pgis_gdal::programs::translate;

use crate::errors::Result;

#[derive(Debug,Clone,PartialEq)]
pub struct Subdataset {
    pub name: String,
    pub description: String,
}

impl Subdataset {
    /// the name without quotes, as used for ARRAY_IDENTIFIER
    pub fn array_identifier (&self) -> String {
        self.name.replace('"', "")
    }
}

/// parse `SUBDATASET_<n>_NAME=..` / `SUBDATASET_<n>_DESC=..` metadata items, ordered by n
pub fn parse_subdatasets<S: AsRef<str>> (items: &[S]) -> Vec<Subdataset> {
    let mut map: BTreeMap<usize,(Option<String>,Option<String>)> = BTreeMap::new();

    for item in items {
        let Some((key,value)) = item.as_ref().split_once('=') else { continue };
        let Some(rest) = key.strip_prefix("SUBDATASET_") else { continue };
        let Some((idx,kind)) = rest.split_once('_') else { continue };
        let Ok(idx) = idx.parse::<usize>() else { continue };

        let e = map.entry(idx).or_default();
        match kind {
            "NAME" => e.0 = Some(value.to_string()),
            "DESC" => e.1 = Some(value.to_string()),
            _ => {}
        }
    }

    map.into_values()
        .filter_map( |(name,desc)| name.map( |name| Subdataset { name, description: desc.unwrap_or_default() }))
        .collect()
}

pub fn subdatasets (ds: &Dataset) -> Vec<Subdataset> {
    parse_subdatasets( &ds.metadata_domain("SUBDATASETS").unwrap_or_default())
}

fn pds4_args (array_id: &str, append: bool) -> Vec<String> {
    let mut args = vec!["-of".to_string(), "PDS4".to_string()];
    if append {
        args.push("-co".to_string());
        args.push("APPEND_SUBDATASET=YES".to_string());
    }
    args.push("-co".to_string());
    args.push( format!("ARRAY_IDENTIFIER={array_id}"));
    args
}

/// translate all subdatasets of `h5` into one PDS4 product. Returns the number of exported subdatasets
pub fn h5_to_pds4 (h5: &Path, output: &Path) -> Result<usize> {
    let ds = Dataset::open(h5)?;
    let mut n = 0;

    for (i,sub) in subdatasets(&ds).iter().enumerate() {
        println!("Processing subdataset {i}: {}", sub.name);
        let src = match Dataset::open(&sub.name) {
            Ok(src) => src,
            Err(e) => { warn!("cannot open subdataset {}: {}", sub.name, e); continue }
        };
        translate( &src, output, &pds4_args( &sub.array_identifier(), n > 0))?;
        n += 1;
    }

    println!("{} : {} layers/subdatasets exported successfully.", output.display(), n);
    Ok(n)
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum EpicProduct { Image, PixelType }

impl EpicProduct {
    pub fn from_description (desc: &str) -> Option<Self> {
        if desc.contains("Image") {
            Some(EpicProduct::Image)
        } else if desc.contains("PixelType") {
            Some(EpicProduct::PixelType)
        } else {
            None
        }
    }

    pub fn suffix (&self) -> &'static str {
        match self {
            EpicProduct::Image => "image",
            EpicProduct::PixelType => "pixeltype",
        }
    }
}

/// wavelength name from descriptions such as `[2048x2048] //Band317nm/Image (32-bit floating-point)`
pub fn epic_band_name (desc: &str) -> Option<String> {
    desc.split('/').nth(2)
        .and_then( |s| s.split_whitespace().next())
        .map( |s| s.replace("Band", ""))
}

/// `<prefix>_<band>_<image|pixeltype>.xml`
pub fn epic_output_name (prefix: &str, band: &str, product: EpicProduct) -> String {
    format!("{}_{}_{}.xml", prefix, band, product.suffix())
}

/// one PDS4 product per EPIC band image and pixel type subdataset
pub fn epic_h5_to_pds4 (h5: &Path) -> Result<Vec<PathBuf>> {
    let ds = Dataset::open(h5)?;
    let h5_name = h5.to_string_lossy();
    let prefix = h5_name.replace(".h5", "");
    let mut outputs = Vec::new();

    for sub in subdatasets(&ds) {
        let Some(product) = EpicProduct::from_description( &sub.description) else { continue };
        let Some(band) = epic_band_name( &sub.description) else {
            warn!("no band name in subdataset {}", sub.description);
            continue
        };
        let src = match Dataset::open(&sub.name) {
            Ok(src) => src,
            Err(e) => { warn!("cannot open subdataset {}: {}", sub.name, e); continue }
        };

        let output = PathBuf::from( epic_output_name( &prefix, &band, product));
        translate( &src, &output, &pds4_args( &sub.array_identifier(), false))?;
        outputs.push(output);
    }

    println!("{} : {} layers/subdatasets exported successfully.", h5.display(), outputs.len());
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subdatasets() {
        let md = [
            "SUBDATASET_2_NAME=HDF5:\"epic.h5\"://Band317nm/PixelType",
            "SUBDATASET_1_NAME=HDF5:\"epic.h5\"://Band317nm/Image",
            "SUBDATASET_1_DESC=[2048x2048] //Band317nm/Image (32-bit floating-point)",
            "SUBDATASET_2_DESC=[2048x2048] //Band317nm/PixelType (8-bit unsigned character)",
        ];
        let subs = parse_subdatasets(&md);
        assert_eq!( subs.len(), 2);
        assert_eq!( subs[0].array_identifier(), "HDF5:epic.h5://Band317nm/Image");
        assert_eq!( EpicProduct::from_description( &subs[0].description), Some(EpicProduct::Image));
        assert_eq!( EpicProduct::from_description( &subs[1].description), Some(EpicProduct::PixelType));
        assert_eq!( epic_band_name( &subs[1].description).as_deref(), Some("317nm"));
        assert_eq!( epic_output_name( "data/epic_1b", "317nm", EpicProduct::Image), "data/epic_1b_317nm_image.xml");
    }

    #[test]
    fn test_pds4_args() {
        assert_eq!( pds4_args( "a", false), vec!["-of", "PDS4", "-co", "ARRAY_IDENTIFIER=a"]);
        assert_eq!( pds4_args( "b", true), vec!["-of", "PDS4", "-co", "APPEND_SUBDATASET=YES", "-co", "ARRAY_IDENTIFIER=b"]);
    }
}
