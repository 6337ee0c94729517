//! The Maidenhead Locator System, as used by radio amateurs.
//!
//! Pairs of fields, longitude first, alternating between letters and
//! digits: The first pair subdivides the globe into 18 × 18 fields of
//! 20° × 10°, marked `A`-`R`. The following pairs subdivide by 10
//! (digits `0`-`9`) and 24 (letters `a`-`x`) in turn.
use super::{cell, malformed, validated, Tile};
use crate::Error;

pub const NAME: &str = "maidenhead";
pub const MAX_LEVEL: usize = 6;

// Subdivisions per pair of fields
const BASE: [usize; MAX_LEVEL] = [18, 10, 24, 10, 24, 10];

/// Encode (lon, lat) as a locator with `level` pairs of fields
pub fn encode(lon: f64, lat: f64, level: usize) -> Result<String, Error> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return Err(Error::InvalidDigitCount {
            codec: NAME,
            digits: level,
        });
    }
    let (lon, lat) = validated(NAME, lon, lat)?;

    let (mut x, mut y) = (lon + 180., lat + 90.);
    let (mut width, mut height) = (360., 180.);
    let mut code = String::with_capacity(2 * level);

    for (i, &base) in BASE.iter().take(level).enumerate() {
        width /= base as f64;
        height /= base as f64;
        let (ix, rx) = cell(x, width, base);
        let (iy, ry) = cell(y, height, base);
        (x, y) = (rx, ry);

        // The first pair is in upper case, the letters of the later pairs in lower
        let first = match (base, i) {
            (10, _) => b'0',
            (_, 0) => b'A',
            _ => b'a',
        };
        code.push((first + ix as u8) as char);
        code.push((first + iy as u8) as char);
    }
    Ok(code)
}

/// Decode a locator to the centre of its cell. Letters are accepted in
/// either case.
pub fn decode(code: &str) -> Result<Tile, Error> {
    let bytes = code.as_bytes();
    if bytes.is_empty() || bytes.len() % 2 != 0 || bytes.len() > 2 * MAX_LEVEL {
        return Err(malformed(NAME, code));
    }

    let (mut lon, mut lat) = (-180., -90.);
    let (mut width, mut height) = (360., 180.);

    for (pair, &base) in bytes.chunks(2).zip(BASE.iter()) {
        width /= base as f64;
        height /= base as f64;
        let mut index = [0_usize; 2];
        for (i, c) in pair.iter().enumerate() {
            let value = match base {
                10 if c.is_ascii_digit() => c - b'0',
                18 | 24 if c.is_ascii_alphabetic() => c.to_ascii_uppercase() - b'A',
                _ => return Err(malformed(NAME, code)),
            };
            if value as usize >= base {
                return Err(malformed(NAME, code));
            }
            index[i] = value as usize;
        }
        lon += index[0] as f64 * width;
        lat += index[1] as f64 * height;
    }

    let precision = (width / 2., height / 2.);
    Ok(Tile::new(lon + precision.0, lat + precision.1, precision))
}

// ----- T E S T S ---------------------------------------------------------------------
