//! Tile codes: Short strings naming a bounded cell of the lon/lat graticule.
//!
//! Each codec is a pair of free functions in its own module, with the
//! parameters that make sense for that codec. The [`TileCodec`] trait and
//! the [`Codec`] enum give uniform access to all four, for code that needs
//! to treat them alike.
//!
//! All angles are in degrees: Tile codes are a human facing format.
use crate::authoring::*;
use std::str::FromStr;

pub mod gars;
pub mod geohash;
pub mod georef;
pub mod maidenhead;

/// A decoded tile code: A representative point of the cell (its centre,
/// unless the decoder was asked for another anchor), and the precision
/// of the code, i.e. half the width and height of the cell. All in degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tile {
    pub lon: f64,
    pub lat: f64,
    pub precision: (f64, f64),
}

impl Tile {
    #[must_use]
    pub fn new(lon: f64, lat: f64, precision: (f64, f64)) -> Tile {
        Tile {
            lon,
            lat,
            precision,
        }
    }

    /// The representative point as a [`Geodetic`] coordinate, with zero altitude
    #[must_use]
    pub fn to_geodetic(&self) -> Geodetic {
        Geodetic::gis(self.lon, self.lat, 0.)
    }

    /// Is (lon, lat) within the precision of the tile's representative point?
    #[must_use]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        const SLACK: f64 = 1e-9;
        (lon - self.lon).abs() <= self.precision.0 + SLACK
            && (lat - self.lat).abs() <= self.precision.1 + SLACK
    }
}

/// The operations every tile codec supports. `precision` is codec specific:
/// The number of field pairs for Maidenhead, of characters for Geohash, of
/// digits for Georef, and the subdivision level for GARS.
pub trait TileCodec {
    fn name(&self) -> &'static str;

    /// The largest value of `precision` accepted by [`encode`](TileCodec::encode)
    fn max_precision(&self) -> usize;

    fn encode(&self, lon: f64, lat: f64, precision: usize) -> Result<String, Error>;

    /// Decode to the centre of the tile
    fn decode(&self, code: &str) -> Result<Tile, Error>;
}

/// The tile codecs supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Maidenhead,
    Geohash,
    Georef,
    Gars,
}

impl Codec {
    pub const ALL: [Codec; 4] = [Codec::Maidenhead, Codec::Geohash, Codec::Georef, Codec::Gars];
}

impl TileCodec for Codec {
    fn name(&self) -> &'static str {
        match self {
            Codec::Maidenhead => maidenhead::NAME,
            Codec::Geohash => geohash::NAME,
            Codec::Georef => georef::NAME,
            Codec::Gars => gars::NAME,
        }
    }

    fn max_precision(&self) -> usize {
        match self {
            Codec::Maidenhead => maidenhead::MAX_LEVEL,
            Codec::Geohash => geohash::MAX_DIGITS,
            Codec::Georef => georef::MAX_DIGITS,
            Codec::Gars => gars::MAX_LEVEL,
        }
    }

    fn encode(&self, lon: f64, lat: f64, precision: usize) -> Result<String, Error> {
        match self {
            Codec::Maidenhead => maidenhead::encode(lon, lat, precision),
            Codec::Geohash => geohash::encode(lon, lat, precision),
            Codec::Georef => georef::encode(lon, lat, precision),
            Codec::Gars => gars::encode(lon, lat, precision),
        }
    }

    fn decode(&self, code: &str) -> Result<Tile, Error> {
        match self {
            Codec::Maidenhead => maidenhead::decode(code),
            Codec::Geohash => geohash::decode(code, true),
            Codec::Georef => georef::decode(code),
            Codec::Gars => gars::decode(code, ""),
        }
    }
}

impl FromStr for Codec {
    type Err = Error;

    fn from_str(name: &str) -> Result<Codec, Error> {
        Codec::ALL
            .into_iter()
            .find(|codec| codec.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::NotFound(name.to_string(), ": unknown tile codec".to_string()))
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

// Check the latitude, and wrap the longitude into [-180, 180)
pub(crate) fn validated(codec: &'static str, lon: f64, lat: f64) -> Result<(f64, f64), Error> {
    if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90. {
        return Err(Error::InvalidCodecInput {
            codec,
            input: format!("{lon} {lat}"),
        });
    }
    Ok(((lon + 180.).rem_euclid(360.) - 180., lat))
}

// The cell index of `offset` in a row of `count` cells of size `size`,
// and the remaining offset into that cell
pub(crate) fn cell(offset: f64, size: f64, count: usize) -> (usize, f64) {
    // Clamping takes care of lat = 90, which belongs to the topmost cell
    let index = ((offset / size).floor().max(0.) as usize).min(count - 1);
    (index, offset - index as f64 * size)
}

pub(crate) fn malformed(codec: &'static str, input: &str) -> Error {
    Error::InvalidCodecInput {
        codec,
        input: input.to_string(),
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // Some places, and some corners of the graticule
    const PLACES: [(f64, f64); 9] = [
        (-0.127005, 51.518602),
        (-6.272877, 53.344606),
        (151.2093, -33.8688),
        (-74.0060, 40.7128),
        (0., 0.),
        (-180., -90.),
        (179.999_999, 89.999_999),
        (-179.5, 90.),
        (12., -89.999),
    ];

    #[test]
    fn roundtrips() -> Result<(), Error> {
        for codec in Codec::ALL {
            for (lon, lat) in PLACES {
                let code = codec.encode(lon, lat, codec.max_precision())?;
                let tile = codec.decode(&code)?;
                assert!(tile.contains(lon, lat), "{}: {code} {tile:?}", codec.name());
            }
        }
        Ok(())
    }

    #[test]
    fn precision_increases() -> Result<(), Error> {
        let (lon, lat) = PLACES[0];
        for codec in Codec::ALL {
            let mut previous = f64::INFINITY;
            let precisions: Vec<usize> = match codec {
                Codec::Georef => vec![4, 6, 8],
                _ => (1..=codec.max_precision()).collect(),
            };
            for precision in precisions {
                let tile = codec.decode(&codec.encode(lon, lat, precision)?)?;
                assert!(tile.contains(lon, lat));
                assert!(tile.precision.1 < previous, "{}", codec.name());
                previous = tile.precision.1;
            }
        }
        Ok(())
    }

    #[test]
    fn names() -> Result<(), Error> {
        for codec in Codec::ALL {
            assert_eq!(codec.name().parse::<Codec>()?, codec);
        }
        assert_eq!("GARS".parse::<Codec>()?, Codec::Gars);
        assert!(matches!("mgrs".parse::<Codec>(), Err(Error::NotFound(..))));
        Ok(())
    }

    #[test]
    fn validation() -> Result<(), Error> {
        assert_eq!(validated("test", 180., 0.)?, (-180., 0.));
        assert_eq!(validated("test", 190., 10.)?, (-170., 10.));
        assert_eq!(validated("test", -180., -90.)?, (-180., -90.));
        assert!(matches!(
            validated("test", 0., 90.5),
            Err(Error::InvalidCodecInput { .. })
        ));
        assert!(matches!(
            validated("test", f64::NAN, 0.),
            Err(Error::InvalidCodecInput { .. })
        ));
        for codec in Codec::ALL {
            assert!(codec.encode(0., f64::INFINITY, 1).is_err());
        }
        Ok(())
    }

    #[test]
    fn tile() {
        let tile = Tile::new(12., 55., (0.5, 0.25));
        assert!(tile.contains(12.5, 54.75));
        assert!(!tile.contains(12.6, 55.));
        let g = tile.to_geodetic();
        assert!((g.longitude - 12_f64.to_radians()).abs() < 1e-15);
        assert!((g.latitude - 55_f64.to_radians()).abs() < 1e-15);
    }
}
