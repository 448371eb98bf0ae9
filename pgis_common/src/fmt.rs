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

//! number rendering for the text formats we write (WKT, CSV, labels). Rust's native float
//! formatting differs from what the established planetary data files use in two places: the exponent
//! syntax of the shortest round-trip representation and the lack of a `%g` format

/// shortest round-trip representation that always has a fractional part or an exponent, and uses a
/// signed two digit exponent: `1737400.0`, `-0.0`, `169.8944472236118`, `1e+16`, `1.5e-05`
pub fn py_float (v: f64)->String {
    if v.is_nan() { return "nan".to_string() }
    if v.is_infinite() { return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() } }

    let s = format!("{v:?}");
    match s.split_once('e') {
        Some((mantissa,exp)) => {
            let (sign,digits) = if let Some(d) = exp.strip_prefix('-') { ('-',d) } else { ('+',exp) };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s
    }
}

/// equivalent of the C `%.<precision>g` conversion
pub fn fmt_g (v: f64, precision: usize)->String {
    if v.is_nan() { return "nan".to_string() }
    if v.is_infinite() { return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() } }
    if v == 0.0 { return if v.is_sign_negative() { "-0".to_string() } else { "0".to_string() } }

    let p = precision.max(1);
    let sci = format!("{:.*e}", p-1, v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m,e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0)
    };

    if exp < -4 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_fraction_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        strip_fraction_zeros( &format!("{:.*}", decimals, v)).to_string()
    }
}

fn strip_fraction_zeros (s: &str)->&str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
