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

use std::fs::{self,DirEntry};
use std::io::{self,ErrorKind};
use std::path::{Path,PathBuf};

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

pub fn filestem <'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_stem().and_then(|ostr| ostr.to_str())
}

/// lower case extension of path, if any
pub fn lowercase_extension (path: impl AsRef<Path>)->Option<String> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str()).map( |s| s.to_lowercase())
}

/// path with the extension replaced (or added if there was none)
pub fn replace_extension (path: impl AsRef<Path>, new_ext: &str)->PathBuf {
    let mut p = path.as_ref().to_path_buf();
    p.set_extension(new_ext);
    p
}

/// path in the same dir with `suffix` appended to the file stem and the given extension, e.g.
/// `with_suffix("data/a.tif", "_match", "tif")` -> `data/a_match.tif`
pub fn with_suffix (path: impl AsRef<Path>, suffix: &str, ext: &str)->PathBuf {
    let path = path.as_ref();
    let stem = filestem(&path).unwrap_or("");
    let fname = if ext.is_empty() { format!("{stem}{suffix}") } else { format!("{stem}{suffix}.{ext}") };
    match path.parent() {
        Some(dir) => dir.join(fname),
        None => PathBuf::from(fname)
    }
}

/// everything up to the last '.' of the final path component, keeping the parent dir
pub fn strip_extension (path: &str)->&str {
    let i0 = path.rfind('/').map(|i| i+1).unwrap_or(0);
    match path[i0..].rfind('.') {
        Some(idx) => &path[..i0+idx],
        None => path
    }
}

pub fn visit_dirs (dir: &Path, recursive: bool, cb: &mut dyn FnMut(&DirEntry)) -> io::Result<()> {
    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                if recursive { visit_dirs(&path, recursive, cb)?; }
            } else {
                cb(&entry);
            }
        }
    }
    Ok(())
}

/// sorted list of files below `dir` that have the given (case sensitive) extension
pub fn files_with_extension<P: AsRef<Path>> (dir: &P, ext: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    if !dir.is_dir() {
        return Err( io_error!(ErrorKind::NotFound, "dir {:?}", dir))
    }

    let mut list: Vec<PathBuf> = Vec::new();
    visit_dirs( dir, recursive, &mut |e| {
        let path = e.path();
        if extension(&path) == Some(ext) { list.push(path) }
    })?;
    list.sort();

    Ok(list)
}
