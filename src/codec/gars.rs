//! The Global Area Reference System, GARS.
//!
//! Three digits numbering the 30' longitude bands eastward from 180°W,
//! two letters naming the 30' latitude bands northward from 90°S, then
//! optionally a 15' quadrant (1-4, from the north west) and a 5' cell
//! (1-9, numbered like a telephone keypad).
//! See [NGA (2006)](crate::Bibliography::Nga06).
use super::{cell, malformed, validated, Tile};
use crate::Error;

pub const NAME: &str = "gars";
pub const MAX_LEVEL: usize = 3;

const LETTERS: &[u8; 24] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

// Cell sizes, in degrees, of the three levels
const SIZE: [f64; MAX_LEVEL] = [0.5, 0.25, 1. / 12.];

/// Encode (lon, lat) as a GARS code. `level` 1, 2 or 3 selects a 30',
/// 15' or 5' cell.
pub fn encode(lon: f64, lat: f64, level: usize) -> Result<String, Error> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return Err(Error::InvalidDigitCount {
            codec: NAME,
            digits: level,
        });
    }
    let (lon, lat) = validated(NAME, lon, lat)?;

    let (ix, x) = cell(lon + 180., SIZE[0], 720);
    let (iy, y) = cell(lat + 90., SIZE[0], 360);
    let mut code = format!(
        "{:03}{}{}",
        ix + 1,
        LETTERS[iy / 24] as char,
        LETTERS[iy % 24] as char
    );
    if level == 1 {
        return Ok(code);
    }

    let (qx, x) = cell(x, SIZE[1], 2);
    let (qy, y) = cell(y, SIZE[1], 2);
    code.push_str(&(1 + qx + 2 * (1 - qy)).to_string());
    if level == 2 {
        return Ok(code);
    }

    let (kx, _) = cell(x, SIZE[2], 3);
    let (ky, _) = cell(y, SIZE[2], 3);
    code.push_str(&(3 * (2 - ky) + kx + 1).to_string());
    Ok(code)
}

/// Decode a GARS code of 5, 6 or 7 characters. The `anchor` selects the
/// point of the cell returned: `""` for the centre, or one of the compass
/// directions `n`, `e`, `s`, `w`, `ne`, `nw`, `se`, `sw` for the midpoint
/// of an edge or a corner.
pub fn decode(code: &str, anchor: &str) -> Result<Tile, Error> {
    let (north, south, east, west) = match anchor.to_ascii_lowercase().as_str() {
        "" => (false, false, false, false),
        "n" => (true, false, false, false),
        "s" => (false, true, false, false),
        "e" => (false, false, true, false),
        "w" => (false, false, false, true),
        "ne" => (true, false, true, false),
        "nw" => (true, false, false, true),
        "se" => (false, true, true, false),
        "sw" => (false, true, false, true),
        _ => return Err(malformed(NAME, anchor)),
    };

    let upper = code.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    if !(5..=7).contains(&bytes.len()) || !upper.is_ascii() {
        return Err(malformed(NAME, code));
    }

    // Longitude band
    let band: usize = match upper[..3].parse() {
        Ok(band) if (1..=720).contains(&band) && bytes[..3].iter().all(u8::is_ascii_digit) => band,
        _ => return Err(malformed(NAME, code)),
    };

    // Latitude band
    let letter = |c: u8| LETTERS.iter().position(|&a| a == c);
    let (Some(hi), Some(lo)) = (letter(bytes[3]), letter(bytes[4])) else {
        return Err(malformed(NAME, code));
    };
    let row = hi * 24 + lo;
    if row >= 360 {
        return Err(malformed(NAME, code));
    }

    let mut lon = -180. + (band - 1) as f64 * SIZE[0];
    let mut lat = -90. + row as f64 * SIZE[0];
    let mut size = SIZE[0];

    // Quadrant
    if let Some(&q) = bytes.get(5) {
        if !(b'1'..=b'4').contains(&q) {
            return Err(malformed(NAME, code));
        }
        let q = (q - b'1') as usize;
        size = SIZE[1];
        lon += (q % 2) as f64 * size;
        lat += (1 - q / 2) as f64 * size;
    }

    // Keypad
    if let Some(&k) = bytes.get(6) {
        if !(b'1'..=b'9').contains(&k) {
            return Err(malformed(NAME, code));
        }
        let k = (k - b'1') as usize;
        size = SIZE[2];
        lon += (k % 3) as f64 * size;
        lat += (2 - k / 3) as f64 * size;
    }

    let half = size / 2.;
    let mut tile = Tile::new(lon + half, lat + half, (half, half));
    if north {
        tile.lat += half;
    }
    if south {
        tile.lat -= half;
    }
    if east {
        tile.lon += half;
    }
    if west {
        tile.lon -= half;
    }
    Ok(tile)
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn encode() -> Result<(), Error> {
        // The British Library
        assert_eq!(super::encode(-0.127005, 51.518602, 1)?, "360MV");
        assert_eq!(super::encode(-0.127005, 51.518602, 2)?, "360MV4");
        assert_eq!(super::encode(-0.127005, 51.518602, 3)?, "360MV48");

        assert_eq!(super::encode(0., 0., 3)?, "361HN37");
        assert_eq!(super::encode(-180., -90., 3)?, "001AA37");
        assert_eq!(super::encode(179.9999, 89.9999, 3)?, "720QZ23");

        assert_eq!(
            super::encode(0., 0., 4),
            Err(Error::InvalidDigitCount {
                codec: NAME,
                digits: 4
            })
        );
        Ok(())
    }

    #[test]
    fn decode() -> Result<(), Error> {
        let tile = super::decode("360MV48", "")?;
        assert_float_eq!(tile.lon, -0.125, abs <= 1e-12);
        assert_float_eq!(tile.lat, 51.541_666_666_667, abs <= 1e-11);
        assert_float_eq!(tile.precision.0, 2.5 / 60., abs <= 1e-15);
        assert!(tile.contains(-0.127005, 51.518602));

        let sw = super::decode("360MV48", "sw")?;
        assert_float_eq!(sw.lon, -1. / 6., abs <= 1e-12);
        assert_float_eq!(sw.lat, 51.5, abs <= 1e-12);
        let ne = super::decode("360mv48", "NE")?;
        assert_float_eq!(ne.lon, -1. / 12., abs <= 1e-12);
        assert_float_eq!(ne.lat, 51.5 + 1. / 12., abs <= 1e-12);
        let n = super::decode("360MV48", "n")?;
        assert_float_eq!(n.lon, tile.lon, abs <= 1e-15);
        assert_float_eq!(n.lat, ne.lat, abs <= 1e-15);

        let tile = super::decode("360MV", "")?;
        assert_eq!((tile.lon, tile.lat, tile.precision), (-0.25, 51.75, (0.25, 0.25)));
        let tile = super::decode("360MV4", "")?;
        assert_eq!((tile.lon, tile.lat, tile.precision), (-0.125, 51.625, (0.125, 0.125)));

        assert!(matches!(
            super::decode("360MV48", "up"),
            Err(Error::InvalidCodecInput { .. })
        ));
        for bad in ["", "360M", "000MV", "721MV", "+60MV", "360MI", "360RA", "360MV5", "360MV40", "360MV481"] {
            assert!(
                matches!(super::decode(bad, ""), Err(Error::InvalidCodecInput { .. })),
                "{bad}"
            );
        }
        Ok(())
    }
}
