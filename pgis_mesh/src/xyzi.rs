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

//! LOLA xyzi shot files: little endian records of four f64 values (x, y, z in km and the
//! RDR id as YYDOYHHMM) converted into a CSV table plus an OGR VRT point layer

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use pgis_common::fmt::py_float;
use pgis_common::fs::{filestem, replace_extension};
use pgis_vector::ogr_vrt::{GeometryEncoding, VrtLayer, write_vrt};

use crate::errors::Result;

pub const RECORD_SIZE: usize = 4 * 8;
pub const DEFAULT_SRS: &str = "IAU_2015:30135";
pub const CSV_HEADER: [&str; 4] = ["X_m", "Y_m", "Z_m", "RDRid_YYDOYHHMM"];

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct XyziRecord {
    pub x_km: f64,
    pub y_km: f64,
    pub z_km: f64,
    pub rdr_id: f64,
}

impl XyziRecord {
    pub fn from_le_bytes (buf: &[u8; RECORD_SIZE]) -> Self {
        let val = |i: usize| {
            let mut b = [0u8; 8];
            b.copy_from_slice( &buf[i*8..(i+1)*8]);
            f64::from_le_bytes(b)
        };
        XyziRecord { x_km: val(0), y_km: val(1), z_km: val(2), rdr_id: val(3) }
    }

    /// rounded to the nearest integer and zero padded to 9 digits
    pub fn rdr_id_string (&self) -> String {
        format!("{:09}", self.rdr_id.round_ties_even() as i64)
    }

    pub fn csv_row (&self) -> [String; 4] {
        [ py_float(self.x_km * 1000.0), py_float(self.y_km * 1000.0), py_float(self.z_km * 1000.0), self.rdr_id_string() ]
    }
}

/// reads records until the input is exhausted. An incomplete trailing record is ignored
pub struct XyziReader<R> {
    reader: R,
}

impl <R: Read> XyziReader<R> {
    pub fn new (reader: R) -> Self {
        XyziReader { reader }
    }

    fn read_record (&mut self) -> io::Result<Option<XyziRecord>> {
        let mut buf = [0u8; RECORD_SIZE];
        let mut len = 0;
        while len < RECORD_SIZE {
            match self.reader.read( &mut buf[len..]) {
                Ok(0) => return Ok(None),
                Ok(n) => len += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e)
            }
        }
        Ok( Some( XyziRecord::from_le_bytes(&buf)))
    }
}

impl <R: Read> Iterator for XyziReader<R> {
    type Item = io::Result<XyziRecord>;

    fn next (&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// write all records of `reader` as CSV to `out`, returning the number of records
pub fn write_xyzi_csv<R: Read, W: Write> (reader: R, out: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(&CSV_HEADER)?;

    let mut n = 0;
    for rec in XyziReader::new(reader) {
        wtr.write_record( &rec?.csv_row())?;
        n += 1;
    }
    wtr.flush()?;
    Ok(n)
}

pub fn xyzi_vrt_layer (layer_name: &str, csv_name: &str, srs: &str) -> VrtLayer {
    VrtLayer::new( layer_name, csv_name, srs, "wkbPoint25D",
                   GeometryEncoding::PointFromColumns { x: "X_m".into(), y: "Y_m".into(), z: Some("Z_m".into()) })
        .with_field( "X_m", "Real")
        .with_field( "Y_m", "Real")
        .with_field( "Z_m", "Real")
        .with_field( "RDRid_YYDOYHHMM", "String")
}

#[derive(Debug)]
pub struct XyziOutput {
    pub csv: PathBuf,
    pub vrt: PathBuf,
    pub records: usize,
}

/// writes `<stem>.csv` and `<stem>.vrt` next to the input file
pub fn xyzi_to_vrt<P: AsRef<Path>> (infile: P, srs: &str) -> Result<XyziOutput> {
    let infile = infile.as_ref();
    let csv = replace_extension( infile, "csv");
    let vrt = replace_extension( infile, "vrt");
    let stem = filestem(&infile).unwrap_or("xyzi");

    let reader = BufReader::new( File::open(infile)?);
    let records = write_xyzi_csv( reader, File::create(&csv)?)?;

    let csv_name = csv.file_name().map( |n| n.to_string_lossy().to_string()).unwrap_or_default();
    write_vrt( &vrt, &xyzi_vrt_layer( stem, &csv_name, srs))?;

    Ok( XyziOutput { csv, vrt, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_bytes (vals: [f64;4]) -> Vec<u8> {
        vals.iter().flat_map( |v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_csv_records() {
        let mut data = record_bytes( [1.5, -0.25, 1737.4, 91801011.6]);
        data.extend( record_bytes( [0.0, 0.0, 0.0, 5.0]));
        data.extend( [1u8, 2, 3]); // incomplete trailing record

        let mut out: Vec<u8> = Vec::new();
        let n = write_xyzi_csv( data.as_slice(), &mut out).unwrap();
        assert_eq!( n, 2);
        assert_eq!( String::from_utf8(out).unwrap(),
                    "X_m,Y_m,Z_m,RDRid_YYDOYHHMM\n1500.0,-250.0,1737400.0,091801012\n0.0,0.0,0.0,000000005\n");
    }
}
