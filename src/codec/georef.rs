//! The World Geographic Reference System, GEOREF.
//!
//! Four letters and an even number of digits: A 15° quadrangle (longitude
//! zone, then latitude band), a 1° cell within it, and the minutes of
//! longitude and latitude within that cell. With 4, 6 or 8 digits, the
//! minutes are given to 1, 0.1 or 0.01 minutes of arc.
use super::{cell, malformed, validated, Tile};
use crate::Error;

pub const NAME: &str = "georef";
pub const MAX_DIGITS: usize = 8;

const ZONES: &[u8; 24] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const BANDS: &[u8; 12] = b"ABCDEFGHJKLM";
const DEGREES: &[u8; 15] = b"ABCDEFGHJKLMNPQ";

fn position(alphabet: &[u8], c: u8) -> Option<usize> {
    alphabet.iter().position(|&a| a == c)
}

fn check_digits(digits: usize) -> Result<(), Error> {
    if !matches!(digits, 4 | 6 | 8) {
        return Err(Error::InvalidDigitCount {
            codec: NAME,
            digits,
        });
    }
    Ok(())
}

/// Encode (lon, lat) as a GEOREF code with `digits` (4, 6 or 8) digits
pub fn encode(lon: f64, lat: f64, digits: usize) -> Result<String, Error> {
    check_digits(digits)?;
    let (lon, lat) = validated(NAME, lon, lat)?;

    let (zone, x) = cell(lon + 180., 15., 24);
    let (band, y) = cell(lat + 90., 15., 12);
    let (dx, x) = cell(x, 1., 15);
    let (dy, y) = cell(y, 1., 15);

    // Units of the minute fields, per minute of arc
    let n = digits / 2;
    let scale = 10_usize.pow(n as u32 - 2);
    let (mx, _) = cell(x * 60. * scale as f64, 1., 60 * scale);
    let (my, _) = cell(y * 60. * scale as f64, 1., 60 * scale);

    let letters = [ZONES[zone], BANDS[band], DEGREES[dx], DEGREES[dy]];
    let letters: String = letters.iter().map(|&c| c as char).collect();
    Ok(format!("{letters}{mx:0n$}{my:0n$}"))
}

/// Decode a GEOREF code to the centre of its cell. Lower case is accepted.
pub fn decode(code: &str) -> Result<Tile, Error> {
    let upper = code.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    if bytes.len() < 4 || !upper.is_ascii() {
        return Err(malformed(NAME, code));
    }
    check_digits(bytes.len() - 4)?;

    let (Some(zone), Some(band), Some(dx), Some(dy)) = (
        position(ZONES, bytes[0]),
        position(BANDS, bytes[1]),
        position(DEGREES, bytes[2]),
        position(DEGREES, bytes[3]),
    ) else {
        return Err(malformed(NAME, code));
    };

    let n = (bytes.len() - 4) / 2;
    let minutes = |field: &str| -> Result<f64, Error> {
        if !field.bytes().all(|c| c.is_ascii_digit()) {
            return Err(malformed(NAME, code));
        }
        let value = field.parse::<u32>().map_err(|_| malformed(NAME, code))?;
        let value = value as f64 / 10_f64.powi(n as i32 - 2);
        if value >= 60. {
            return Err(malformed(NAME, code));
        }
        Ok(value)
    };
    let mx = minutes(&upper[4..4 + n])?;
    let my = minutes(&upper[4 + n..])?;

    let size = 10_f64.powi(2 - n as i32) / 60.;
    let lon = -180. + 15. * zone as f64 + dx as f64 + mx / 60.;
    let lat = -90. + 15. * band as f64 + dy as f64 + my / 60.;
    let precision = (size / 2., size / 2.);
    Ok(Tile::new(lon + precision.0, lat + precision.1, precision))
}

// ----- T E S T S ---------------------------------------------------------------------
