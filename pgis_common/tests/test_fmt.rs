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

use pgis_common::fmt::{py_float, fmt_g};

#[test]
fn test_py_float() {
    assert_eq!( py_float(1737400.0), "1737400.0");
    assert_eq!( py_float(-0.0), "-0.0");
    assert_eq!( py_float(0.0), "0.0");
    assert_eq!( py_float(20.0), "20.0");
    assert_eq!( py_float(3396190.0 / (3396190.0 - 3376200.0)), "169.8944472236118");
    assert_eq!( py_float(0.1 + 0.2), "0.30000000000000004");
    assert_eq!( py_float(1e16), "1e+16");
    assert_eq!( py_float(1.5e-5), "1.5e-05");
    assert_eq!( py_float(695700000.0), "695700000.0");
}

#[test]
fn test_fmt_g() {
    assert_eq!( fmt_g(1.0, 10), "1");
    assert_eq!( fmt_g(0.0, 10), "0");
    assert_eq!( fmt_g(-0.2, 10), "-0.2");
    assert_eq!( fmt_g(0.5, 10), "0.5");
    assert_eq!( fmt_g(1e-5, 10), "1e-05");
    assert_eq!( fmt_g(123456789012.0, 10), "1.23456789e+11");
    assert_eq!( fmt_g(1234.5678, 6), "1234.57");
}
