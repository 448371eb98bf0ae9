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

use serde::{Serialize,Deserialize};
use num::{Num,ToPrimitive};
use tracing_subscriber::EnvFilter;

pub mod macros;
pub mod fs;
pub mod fmt;

/// set up the global tracing subscriber. `RUST_LOG` takes precedence over the provided
/// default directive (e.g. "info" or "pgis_iau=debug"). Log output goes to stderr so that tools
/// which write their product to stdout stay clean
pub fn init_tracing (default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// a generic bounding box without semantics for the coordinate type
#[repr(C)]
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy + ToPrimitive + PartialOrd> BoundingBox<T> {
    pub fn new(west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north}
    }

    pub fn width (&self)->T { self.east - self.west }
    pub fn height (&self)->T { self.north - self.south }

    /// smallest box containing both
    pub fn union (&self, other: &BoundingBox<T>)->BoundingBox<T> {
        BoundingBox {
            west: if other.west < self.west { other.west } else { self.west },
            south: if other.south < self.south { other.south } else { self.south },
            east: if other.east > self.east { other.east } else { self.east },
            north: if other.north > self.north { other.north } else { self.north },
        }
    }

    /// closed counter-clockwise ring starting at the lower left corner:
    /// (w,s) (e,s) (e,n) (w,n) (w,s)
    pub fn ring (&self)->[(T,T);5] {
        [ (self.west,self.south), (self.east,self.south), (self.east,self.north), (self.west,self.north), (self.west,self.south) ]
    }
}
