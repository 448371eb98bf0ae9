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

//! triangle meshes from DEM rasters, written as Stanford PLY files. Nodata values are not
//! treated specially and end up as regular z values

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use ndarray::Array2;
use strum::Display;
use pgis_gdal::{Dataset, GeoTransform, read_band_f64};

use crate::errors::{Result, mesh_error};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Display)]
pub enum PlyFormat {
    #[strum(to_string="binary_little_endian")]
    BinaryLittleEndian,
    #[strum(to_string="ascii")]
    Ascii,
}

#[derive(Debug,Clone,PartialEq)]
pub struct PlyMesh {
    pub vertices: Vec<[f64;3]>,
    pub faces: Vec<[usize;3]>,
}

impl PlyMesh {
    /// one vertex per grid cell in row major order, two triangles per quad of neighboring vertices
    pub fn from_grid (gt: &GeoTransform, values: &Array2<f64>) -> Self {
        let (height, width) = values.dim();

        let mut vertices = Vec::with_capacity(width * height);
        for j in 0..height {
            let y = j as f64 * gt[5] + gt[3];
            for i in 0..width {
                vertices.push( [i as f64 * gt[1] + gt[0], y, values[[j,i]]]);
            }
        }

        let mut faces = Vec::with_capacity( 2 * width.saturating_sub(1) * height.saturating_sub(1));
        for j in 0..height.saturating_sub(1) {
            for i in 0..width.saturating_sub(1) {
                let a = i + j * width;
                faces.push( [a, a + width, a + width + 1]);
                faces.push( [a, a + width + 1, a + 1]);
            }
        }

        PlyMesh { vertices, faces }
    }

    pub fn header (&self, format: PlyFormat) -> String {
        format!("ply\nformat {} 1.0\nelement vertex {}\nproperty float x\nproperty float y\nproperty float z\nelement face {}\nproperty list int int vertex_index\nend_header\n",
                format, self.vertices.len(), self.faces.len())
    }

    pub fn write<W: Write> (&self, out: &mut W, format: PlyFormat) -> Result<()> {
        out.write_all( self.header(format).as_bytes())?;

        match format {
            PlyFormat::BinaryLittleEndian => {
                for v in &self.vertices {
                    for c in v {
                        out.write_all( &(*c as f32).to_le_bytes())?;
                    }
                }
                for f in &self.faces {
                    out.write_all( &3i32.to_le_bytes())?;
                    for idx in f {
                        let idx = i32::try_from(*idx).map_err( |_| mesh_error( format!("vertex index {idx} exceeds PLY int range")))?;
                        out.write_all( &idx.to_le_bytes())?;
                    }
                }
            }
            PlyFormat::Ascii => {
                for v in &self.vertices {
                    writeln!( out, "{:.3} {:.3} {:.3}", v[0], v[1], v[2])?;
                }
                for f in &self.faces {
                    writeln!( out, "3 {} {} {}", f[0], f[1], f[2])?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// mesh from the first band of `infile`
pub fn raster_to_ply<P: AsRef<Path>, Q: AsRef<Path>> (infile: P, outfile: Q, format: PlyFormat) -> Result<PlyMesh> {
    let ds = Dataset::open( infile.as_ref())?;
    let gt = ds.geo_transform()?;
    let band = ds.rasterband(1)?;
    let values = read_band_f64(&band)?;

    let mesh = PlyMesh::from_grid( &gt, &values);
    let mut out = BufWriter::new( File::create(outfile)?);
    mesh.write( &mut out, format)?;
    Ok(mesh)
}
