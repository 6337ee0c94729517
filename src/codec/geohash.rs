//! Geohash: Interleaved bisections of the longitude and latitude ranges,
//! longitude first, five bits per character of a base 32 alphabet.
//! See [Niemeyer (2008)](crate::Bibliography::Nie08).
use super::{malformed, validated, Tile};
use crate::Error;

pub const NAME: &str = "geohash";
pub const MAX_DIGITS: usize = 12;

const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Encode (lon, lat) as a geohash of `digits` characters
pub fn encode(lon: f64, lat: f64, digits: usize) -> Result<String, Error> {
    if !(1..=MAX_DIGITS).contains(&digits) {
        return Err(Error::InvalidDigitCount {
            codec: NAME,
            digits,
        });
    }
    let (lon, lat) = validated(NAME, lon, lat)?;

    let mut ranges = [(-180., 180.), (-90., 90.)];
    let values = [lon, lat];
    let mut code = String::with_capacity(digits);

    for i in 0..digits {
        let mut index = 0;
        for bit in 0..5 {
            // Even bits (counted over the full code) bisect the longitude range
            let axis = (5 * i + bit) % 2;
            let (lo, hi) = ranges[axis];
            let mid = (lo + hi) / 2.;
            index <<= 1;
            if values[axis] >= mid {
                index |= 1;
                ranges[axis].0 = mid;
            } else {
                ranges[axis].1 = mid;
            }
        }
        code.push(ALPHABET[index] as char);
    }
    Ok(code)
}

/// Decode a geohash to the centre of its cell, or, if `center` is false,
/// to its south west corner. Upper case is accepted.
pub fn decode(code: &str, center: bool) -> Result<Tile, Error> {
    if code.is_empty() || code.len() > MAX_DIGITS {
        return Err(malformed(NAME, code));
    }

    let mut ranges = [(-180., 180.), (-90., 90.)];
    for (i, c) in code.bytes().enumerate() {
        let c = c.to_ascii_lowercase();
        let Some(index) = ALPHABET.iter().position(|&a| a == c) else {
            return Err(malformed(NAME, code));
        };
        for bit in 0..5 {
            let axis = (5 * i + bit) % 2;
            let (lo, hi) = ranges[axis];
            let mid = (lo + hi) / 2.;
            if index & (16 >> bit) != 0 {
                ranges[axis].0 = mid;
            } else {
                ranges[axis].1 = mid;
            }
        }
    }

    let [(west, east), (south, north)] = ranges;
    let precision = ((east - west) / 2., (north - south) / 2.);
    if center {
        return Ok(Tile::new(west + precision.0, south + precision.1, precision));
    }
    Ok(Tile::new(west, south, precision))
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn encode() -> Result<(), Error> {
        // The British Library
        assert_eq!(super::encode(-0.127005, 51.518602, 10)?, "gcpvj4et8e");
        assert_eq!(super::encode(-0.127005, 51.518602, 4)?, "gcpv");
        // Jutland, from the Wikipedia article
        assert_eq!(super::encode(10.40744, 57.64911, 11)?, "u4pruydqqvj");
        assert_eq!(super::encode(0., 0., 1)?, "s");
        assert_eq!(super::encode(-180., -90., 2)?, "00");
        assert_eq!(super::encode(180., 90., 2)?, "bp");

        assert_eq!(
            super::encode(0., 0., 13),
            Err(Error::InvalidDigitCount {
                codec: NAME,
                digits: 13
            })
        );
        Ok(())
    }

    #[test]
    fn decode() -> Result<(), Error> {
        let tile = super::decode("gcpvj4et8e", true)?;
        assert_float_eq!(tile.lon, -0.127_002_596_855, abs <= 1e-11);
        assert_float_eq!(tile.lat, 51.518_602_073_193, abs <= 1e-11);
        assert_float_eq!(tile.precision.0, 5.364_418_029_785_156e-6, abs <= 1e-18);
        assert_float_eq!(tile.precision.1, 2.682_209_014_892_578e-6, abs <= 1e-18);
        assert!(tile.contains(-0.127005, 51.518602));

        let corner = super::decode("gcpvj4et8e", false)?;
        assert_float_eq!(corner.lon, tile.lon - tile.precision.0, abs <= 1e-12);
        assert_float_eq!(corner.lat, tile.lat - tile.precision.1, abs <= 1e-12);
        assert_eq!(corner.precision, tile.precision);

        assert_eq!(super::decode("GCPVJ4ET8E", true)?, tile);

        for bad in ["", "gcpvj4et8eaaa", "gcpa", "gcp i"] {
            assert!(
                matches!(super::decode(bad, true), Err(Error::InvalidCodecInput { .. })),
                "{bad}"
            );
        }
        Ok(())
    }
}
