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

//! gdal_translate option files that fill the variables of a PDS4 XML template from the label of an
//! ISIS3 cube

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use pgis_gdal::programs::translate_file;

use crate::pvl::{PvlObject, read_label};
use crate::errors::Result;

pub const DEFAULT_TEMPLATE: &str = "pds4_template.xml";

const FIXED_OPTIONS: [&str;2] = [
    "-co VAR_TARGET_TYPE=Satellite",
    "-co VAR_INVESTIGATION_AREA_LID_REFERENCE=\"urn:nasa:pds:context:instrument_host:spacecraft.lro\"",
];

/// a template variable that is set from an ISIS3 label keyword
struct LabelVar {
    path: &'static str,
    var: &'static str,
    uppercase: bool,
    quoted: bool,
    missing: &'static str,
}

const LABEL_VARS: [LabelVar;5] = [
    LabelVar { path: "IsisCube.Mapping.TargetName", var: "VAR_TARGET", uppercase: true, quoted: false, missing: "Target" },
    LabelVar { path: "IsisCube.Archive.InstrumentHostName", var: "VAR_INVESTIGATION_AREA_NAME", uppercase: true, quoted: true, missing: "InstrumentHostName" },
    LabelVar { path: "IsisCube.Archive.DataSetId", var: "VAR_LOGICAL_IDENTIFIER", uppercase: false, quoted: false, missing: "DataSetId" },
    LabelVar { path: "IsisCube.Archive.InstrumentId", var: "VAR_OBSERVING_SYSTEM_NAME", uppercase: false, quoted: false, missing: "InstrumentId" },
    LabelVar { path: "IsisCube.Archive.ProductId", var: "VAR_TITLE", uppercase: false, quoted: false, missing: "ProductId" },
];

/// option file lines (without the leading comment line) and the names of keywords missing in the label
pub fn pds4_options (label: &PvlObject) -> (Vec<String>, Vec<&'static str>) {
    let mut lines: Vec<String> = FIXED_OPTIONS.iter().map( |s| s.to_string()).collect();
    let mut missing = Vec::new();

    for v in &LABEL_VARS {
        // list values contribute their first element
        match label.get(v.path).and_then( |val| val.first()).and_then( |val| val.as_str()) {
            Some(val) => {
                let val = if v.uppercase { val.to_uppercase() } else { val.to_string() };
                if v.quoted {
                    lines.push( format!("-co {}=\"{}\"", v.var, val));
                } else {
                    lines.push( format!("-co {}={}", v.var, val));
                }
            }
            None => missing.push(v.missing)
        }
    }
    (lines, missing)
}

/// `in.cub` -> `in_pds4.xml`
pub fn pds4_output_name (cub: &str) -> String {
    cub.replace(".cub", "_pds4.xml")
}

pub fn translate_command (template: &str, config: &str, cub: &str, out: &str) -> String {
    format!("gdal_translate -of PDS4 -co IMAGE_FORMAT=GEOTIFF -co TEMPLATE={template} --optfile {config} {cub} {out}")
}

/// split option file content into arguments. `#` lines are comments, double quotes group words
pub fn optfile_args (text: &str) -> Vec<String> {
    let mut args = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue }

        let mut arg = String::new();
        let mut in_quotes = false;
        let mut has_arg = false;
        for c in line.chars() {
            match c {
                '"' => { in_quotes = !in_quotes; has_arg = true; }
                c if c.is_whitespace() && !in_quotes => {
                    if has_arg { args.push( std::mem::take(&mut arg)); has_arg = false; }
                }
                c => { arg.push(c); has_arg = true; }
            }
        }
        if has_arg { args.push(arg); }
    }
    args
}

#[derive(Debug,Clone,PartialEq)]
pub struct Pds4Conversion {
    pub config: PathBuf,
    pub output: PathBuf,
    pub command: String,
    pub missing: Vec<&'static str>,
}

/// write the option file for `cub` and either print the gdal_translate command or run it in-process
pub fn isis3_to_pds4 (cub: &str, config: &str, template: &str, run: bool, header: &str) -> Result<Pds4Conversion> {
    let label = read_label( Path::new(cub))?;
    let (lines, missing) = pds4_options(&label);
    for m in &missing {
        warn!("No {m} in ISIS3 Label");
    }

    println!("writing {config}");
    let mut text = format!("{header}\n");
    for line in &lines {
        text.push_str(line);
        text.push('\n');
    }
    fs::write( config, &text)?;

    let output = pds4_output_name(cub);
    let command = translate_command( template, config, cub, &output);
    if run {
        let mut args: Vec<String> = ["-of", "PDS4", "-co", "IMAGE_FORMAT=GEOTIFF", "-co"].iter().map( |s| s.to_string()).collect();
        args.push( format!("TEMPLATE={template}"));
        args.extend( optfile_args(&text));
        translate_file( Path::new(cub), Path::new(&output), &args)?;
    } else {
        println!("\nRecommended gdal run:");
        println!("{command}\n");
    }

    Ok( Pds4Conversion { config: PathBuf::from(config), output: PathBuf::from(output), command, missing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pvl::parse_pvl;

    #[test]
    fn test_options() {
        let label = parse_pvl("Object = IsisCube
  Group = Archive
    InstrumentHostName = \"Lunar Reconnaissance Orbiter\"
    ProductId = LDEM_4
  End_Group
  Group = Mapping
    TargetName = Moon
  End_Group
End_Object
End
").unwrap();
        let (lines, missing) = pds4_options(&label);
        assert_eq!( lines, vec![
            "-co VAR_TARGET_TYPE=Satellite",
            "-co VAR_INVESTIGATION_AREA_LID_REFERENCE=\"urn:nasa:pds:context:instrument_host:spacecraft.lro\"",
            "-co VAR_TARGET=MOON",
            "-co VAR_INVESTIGATION_AREA_NAME=\"LUNAR RECONNAISSANCE ORBITER\"",
            "-co VAR_TITLE=LDEM_4",
        ]);
        assert_eq!( missing, vec!["DataSetId", "InstrumentId"]);
    }

    #[test]
    fn test_list_valued_keyword() {
        let label = parse_pvl("Object = IsisCube
  Group = Archive
    DataSetId = LRO-L-LOLA-4-GDR-V1.0
    InstrumentId = (LOLA, LROC)
  End_Group
End_Object
End
").unwrap();
        let (lines, missing) = pds4_options(&label);
        assert!( lines.contains( &"-co VAR_OBSERVING_SYSTEM_NAME=LOLA".to_string()));
        assert!( lines.contains( &"-co VAR_LOGICAL_IDENTIFIER=LRO-L-LOLA-4-GDR-V1.0".to_string()));
        assert_eq!( missing, vec!["Target", "InstrumentHostName", "ProductId"]);
    }

    #[test]
    fn test_optfile_args() {
        let args = optfile_args("#isis3_to_pds4 a.cub a.config\n-co VAR_TARGET=MOON\n-co VAR_NAME=\"LUNAR ORBITER\"\n");
        assert_eq!( args, vec!["-co", "VAR_TARGET=MOON", "-co", "VAR_NAME=LUNAR ORBITER"]);
        assert_eq!( pds4_output_name("data/ldem.cub"), "data/ldem_pds4.xml");
    }
}
