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

//! conversion of simple PDS shape models (plate/vertex tables) into Alias Wavefront OBJ files.
//! Vertices are expected in sequential order 1,2,3.. since OBJ face indices refer to that order

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;
use tracing::warn;

use crate::errors::{Result, parse_error};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub struct ObjCounts {
    pub vertices: usize,
    pub faces: usize,
}

/// plate/vertex table with a parsed `nVerts nFaces` header line
pub struct PlateModel<R> {
    lines: Lines<R>,
    pub n_vertices: usize,
    pub n_faces: usize,
}

fn parse_count (line_no: usize, s: &str) -> Result<usize> {
    s.parse::<usize>().map_err( |_| parse_error( line_no, format!("invalid count '{s}'")))
}

impl <R: BufRead> PlateModel<R> {
    pub fn new (reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let header = lines.next().ok_or_else( || parse_error( 1, "empty input"))??;
        let tokens: Vec<&str> = header.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err( parse_error( 1, format!("expected 'nVerts nFaces', got '{header}'")))
        }
        let n_vertices = parse_count( 1, tokens[0])?;
        let n_faces = parse_count( 1, tokens[1])?;

        Ok( PlateModel { lines, n_vertices, n_faces })
    }

    /// each data line is `<index> <a> <b> <c>`. The first `n_vertices` data lines are written as
    /// `v a b c`, the remaining ones as `f a b c`
    pub fn write_obj<W: Write> (self, out: &mut W) -> Result<ObjCounts> {
        let mut counts = ObjCounts::default();

        for (i,line) in self.lines.enumerate() {
            let line = line?;
            let line_no = i + 2;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.len() {
                0 => continue,
                4 => {
                    if counts.vertices < self.n_vertices {
                        writeln!( out, "v {} {} {}", tokens[1], tokens[2], tokens[3])?;
                        counts.vertices += 1;
                    } else {
                        writeln!( out, "f {} {} {}", tokens[1], tokens[2], tokens[3])?;
                        counts.faces += 1;
                    }
                }
                n => return Err( parse_error( line_no, format!("expected 4 values, got {n}")))
            }
        }
        out.flush()?;

        if counts.vertices != self.n_vertices || counts.faces != self.n_faces {
            warn!("header announced {} vertices and {} faces, found {} and {}",
                  self.n_vertices, self.n_faces, counts.vertices, counts.faces);
        }
        Ok(counts)
    }
}

pub fn plate_to_obj<P: AsRef<Path>, Q: AsRef<Path>> (infile: P, outfile: Q) -> Result<ObjCounts> {
    let model = PlateModel::new( BufReader::new( File::open(infile)?))?;
    println!("number of vertices: {}  //  number of faces: {}", model.n_vertices, model.n_faces);
    println!("\tconverting file - please wait...");

    let mut out = BufWriter::new( File::create(outfile)?);
    model.write_obj(&mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_obj() {
        let tab = "3 1\n 1 0.0 0.0 1.0\n 2 1.0 0.0 1.0\n\n 3 0.0 1.0 1.0\n 1 1 2 3\n";
        let model = PlateModel::new( tab.as_bytes()).unwrap();
        assert_eq!( (model.n_vertices, model.n_faces), (3,1));

        let mut out: Vec<u8> = Vec::new();
        let counts = model.write_obj(&mut out).unwrap();
        assert_eq!( counts, ObjCounts{ vertices: 3, faces: 1 });
        assert_eq!( String::from_utf8(out).unwrap(), "v 0.0 0.0 1.0\nv 1.0 0.0 1.0\nv 0.0 1.0 1.0\nf 1 2 3\n");
    }

    #[test]
    fn test_bad_lines() {
        assert!( PlateModel::new( "3\n".as_bytes()).is_err());

        let model = PlateModel::new( "1 0\n1 2 3\n".as_bytes()).unwrap();
        let mut out: Vec<u8> = Vec::new();
        let e = model.write_obj(&mut out).unwrap_err();
        assert_eq!( e.to_string(), "line 2: expected 4 values, got 3");
    }
}
