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

//! OGR virtual layer (VRT) descriptions and CSVT type sidecars for CSV sources

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use crate::errors::Result;

#[derive(Debug,Clone,PartialEq)]
pub enum GeometryEncoding {
    PointFromColumns { x: String, y: String, z: Option<String> },
    Wkb(String),
    Wkt(String),
}

#[derive(Debug,Clone,PartialEq)]
pub struct VrtField {
    pub name: String,
    pub field_type: String,
}

/// a single OGRVRTLayer with a data source that is resolved relative to the VRT file
#[derive(Debug,Clone,PartialEq)]
pub struct VrtLayer {
    pub name: String,
    pub source: String,
    pub srs: String,
    pub geometry_type: String,
    pub geometry: GeometryEncoding,
    pub fields: Vec<VrtField>,
    /// open options of the source data set
    pub open_options: Vec<(String,String)>,
}

pub fn xml_escape (s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c)
        }
    }
    out
}

impl VrtLayer {
    pub fn new (name: &str, source: &str, srs: &str, geometry_type: &str, geometry: GeometryEncoding) -> Self {
        VrtLayer {
            name: name.to_string(),
            source: source.to_string(),
            srs: srs.to_string(),
            geometry_type: geometry_type.to_string(),
            geometry,
            fields: Vec::new(),
            open_options: Vec::new(),
        }
    }

    pub fn with_field (mut self, name: &str, field_type: &str) -> Self {
        self.fields.push( VrtField { name: name.to_string(), field_type: field_type.to_string() });
        self
    }

    pub fn with_open_option (mut self, key: &str, value: &str) -> Self {
        self.open_options.push( (key.to_string(), value.to_string()));
        self
    }

    fn geometry_field_xml (&self) -> String {
        match &self.geometry {
            GeometryEncoding::PointFromColumns { x, y, z } => {
                let z = z.as_ref().map( |z| format!(" z=\"{}\"", xml_escape(z))).unwrap_or_default();
                format!("<GeometryField encoding=\"PointFromColumns\" x=\"{}\" y=\"{}\"{}/>", xml_escape(x), xml_escape(y), z)
            }
            GeometryEncoding::Wkb(field) => format!("<GeometryField encoding=\"WKB\" field=\"{}\"/>", xml_escape(field)),
            GeometryEncoding::Wkt(field) => format!("<GeometryField encoding=\"WKT\" field=\"{}\"/>", xml_escape(field)),
        }
    }

    pub fn to_xml (&self) -> String {
        let mut s = String::new();
        // writing into a String can't fail
        let _ = write!( s, "<OGRVRTDataSource>\n  <OGRVRTLayer name=\"{}\">\n", xml_escape(&self.name));
        let _ = write!( s, "    <SrcDataSource relativeToVRT=\"1\">{}</SrcDataSource>\n", xml_escape(&self.source));
        if !self.open_options.is_empty() {
            s.push_str("    <OpenOptions>\n");
            for (k,v) in &self.open_options {
                let _ = write!( s, "      <OOI key=\"{}\">{}</OOI>\n", xml_escape(k), xml_escape(v));
            }
            s.push_str("    </OpenOptions>\n");
        }
        let _ = write!( s, "    <LayerSRS>{}</LayerSRS>\n", xml_escape(&self.srs));
        let _ = write!( s, "    <GeometryType>{}</GeometryType>\n", self.geometry_type);
        let _ = write!( s, "    {}\n", self.geometry_field_xml());
        for f in &self.fields {
            let _ = write!( s, "    <Field name=\"{}\" type=\"{}\" />\n", xml_escape(&f.name), f.field_type);
        }
        s.push_str("  </OGRVRTLayer>\n</OGRVRTDataSource>\n");
        s
    }
}

pub fn write_vrt (path: &Path, layer: &VrtLayer) -> Result<()> {
    fs::write( path, layer.to_xml())?;
    Ok(())
}

/// the single line content of a CSVT file, e.g. `"String","Real"`
pub fn csvt_line<S: AsRef<str>> (types: &[S]) -> String {
    types.iter().map( |t| format!("\"{}\"", t.as_ref())).collect::<Vec<_>>().join(",")
}

pub fn write_csvt<S: AsRef<str>> (path: &Path, types: &[S]) -> Result<()> {
    fs::write( path, format!("{}\n", csvt_line(types)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wkb_layer() {
        let layer = VrtLayer::new( "mosaic", "mosaic.csv", "WGS84", "wkbPolygon", GeometryEncoding::Wkb("GisFootprint".into()));
        assert_eq!( layer.to_xml(),
"<OGRVRTDataSource>
  <OGRVRTLayer name=\"mosaic\">
    <SrcDataSource relativeToVRT=\"1\">mosaic.csv</SrcDataSource>
    <LayerSRS>WGS84</LayerSRS>
    <GeometryType>wkbPolygon</GeometryType>
    <GeometryField encoding=\"WKB\" field=\"GisFootprint\"/>
  </OGRVRTLayer>
</OGRVRTDataSource>
");
    }

    #[test]
    fn test_csvt() {
        assert_eq!( csvt_line( &["String","Real","Real"]), "\"String\",\"Real\",\"Real\"");
        assert_eq!( xml_escape("a<b&\"c\""), "a&lt;b&amp;&quot;c&quot;");
    }
}
