//! Coordinate value types.
//!
//! None of the types carry any reference system information: The same
//! numeric triple means different things under different datums, so the
//! datum (or CRS) is always supplied alongside the coordinate.
use crate::math::angular;
use crate::unit::Unit;
use std::fmt;
use std::ops::{Add, Sub};

pub mod sighting;
pub use sighting::{Estimate, Sighting};

/// A geodetic coordinate: Longitude and latitude in radians, altitude in metres.
///
/// The longitude is reckoned from the prime meridian of whatever datum the
/// caller associates with the coordinate.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Geodetic {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

/// A geocentric cartesian coordinate, in metres.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Geocentric {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A planar coordinate in the linear unit of a projected CRS, with the
/// altitude carried along unscaled, in metres.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub altitude: f64,
    pub unit: Unit,
}

// ----- C O N S T R U C T O R S ---------------------------------------------

/// Constructors
impl Geodetic {
    /// A `Geodetic` from latitude/longitude/altitude, with the angular input in degrees
    #[must_use]
    pub fn geo(latitude: f64, longitude: f64, altitude: f64) -> Geodetic {
        Geodetic {
            longitude: longitude.to_radians(),
            latitude: latitude.to_radians(),
            altitude,
        }
    }

    /// A `Geodetic` from longitude/latitude/altitude, with the angular input in degrees
    #[must_use]
    pub fn gis(longitude: f64, latitude: f64, altitude: f64) -> Geodetic {
        Geodetic::geo(latitude, longitude, altitude)
    }

    /// A `Geodetic` from longitude/latitude/altitude, with the angular input in radians
    #[must_use]
    pub fn raw(longitude: f64, latitude: f64, altitude: f64) -> Geodetic {
        Geodetic {
            longitude,
            latitude,
            altitude,
        }
    }
}

impl Geocentric {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Geocentric {
        Geocentric { x, y, z }
    }
}

impl Projected {
    #[must_use]
    pub fn new(x: f64, y: f64, altitude: f64, unit: Unit) -> Projected {
        Projected {
            x,
            y,
            altitude,
            unit,
        }
    }

    /// A `Projected` with the planar elements in metres
    #[must_use]
    pub fn metres(x: f64, y: f64, altitude: f64) -> Projected {
        Projected::new(x, y, altitude, Unit::metre())
    }
}

// ----- A C C E S S O R S ---------------------------------------------------

impl Geodetic {
    /// Longitude, latitude and altitude, with the angular elements in degrees
    #[must_use]
    pub fn to_gis(&self) -> (f64, f64, f64) {
        (
            self.longitude.to_degrees(),
            self.latitude.to_degrees(),
            self.altitude,
        )
    }

    /// Latitude, longitude and altitude, with the angular elements in degrees
    #[must_use]
    pub fn to_geo(&self) -> (f64, f64, f64) {
        (
            self.latitude.to_degrees(),
            self.longitude.to_degrees(),
            self.altitude,
        )
    }

    /// The larger of the two angular differences to `other`, in radians.
    /// Longitude differences are taken modulo 2π.
    #[must_use]
    pub fn angular_deviation(&self, other: &Geodetic) -> f64 {
        let dlon = angular::normalize_symmetric(self.longitude - other.longitude);
        let dlat = self.latitude - other.latitude;
        dlon.abs().max(dlat.abs())
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite() && self.altitude.is_finite()
    }
}

impl Geocentric {
    /// Euclidean distance to `other`
    #[must_use]
    pub fn hypot3(&self, other: &Geocentric) -> f64 {
        (self.x - other.x)
            .hypot(self.y - other.y)
            .hypot(self.z - other.z)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Arithmetic (also see the operator trait implementations `add, sub`)

    /// Multiply by a scalar
    #[must_use]
    pub fn scale(&self, factor: f64) -> Geocentric {
        Geocentric::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Scalar product
    #[must_use]
    pub fn dot(&self, other: &Geocentric) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Length, when seen as a vector from the geocentre
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }
}

// ----- O P E R A T O R   T R A I T S -----------------------------------------------

impl Add for Geocentric {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Geocentric::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Geocentric {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Geocentric::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Projected {
    /// The planar elements, converted to metres
    #[must_use]
    pub fn to_metres(&self) -> (f64, f64) {
        (self.unit.to_metres(self.x), self.unit.to_metres(self.y))
    }

    /// The same position, expressed in another linear unit
    #[must_use]
    pub fn in_unit(&self, unit: Unit) -> Projected {
        let (x, y) = self.to_metres();
        Projected::new(unit.from_metres(x), unit.from_metres(y), self.altitude, unit)
    }

    /// Planar distance to `other`, in metres
    #[must_use]
    pub fn hypot2(&self, other: &Projected) -> f64 {
        let (x0, y0) = self.to_metres();
        let (x1, y1) = other.to_metres();
        (x0 - x1).hypot(y0 - y1)
    }
}

// ----- D I S P L A Y -------------------------------------------------------

impl fmt::Display for Geodetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lon, lat, h) = self.to_gis();
        write!(
            f,
            "{} {} {:.3}",
            angular::format_dms(lat, 'N', 'S'),
            angular::format_dms(lon, 'E', 'W'),
            h
        )
    }
}

impl fmt::Display for Geocentric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} {:.3} {:.3}", self.x, self.y, self.z)
    }
}

impl fmt::Display for Projected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} {:.3} {:.3}", self.x, self.y, self.altitude)
    }
}

// ----- T E S T S -----------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use float_eq::assert_float_eq;

    #[test]
    fn constructors() {
        let geo = Geodetic::geo(55., 12., 100.);
        let gis = Geodetic::gis(12., 55., 100.);
        assert_eq!(geo, gis);
        assert_eq!(geo.longitude, 12_f64.to_radians());
        assert_eq!(geo.latitude, 55_f64.to_radians());

        let (lon, lat, h) = geo.to_gis();
        assert_float_eq!([lon, lat, h], [12., 55., 100.], abs_all <= 1e-13);
        let (lat, lon, _) = geo.to_geo();
        assert_float_eq!([lat, lon], [55., 12.], abs_all <= 1e-13);

        let raw = Geodetic::raw(1., 0.5, 0.);
        assert_eq!(raw.longitude, 1.);
        assert!(raw.is_finite());
        assert!(!Geodetic::raw(f64::NAN, 0., 0.).is_finite());
    }

    #[test]
    fn deviation() {
        let a = Geodetic::gis(179.999, 0., 0.);
        let b = Geodetic::gis(-179.999, 0.001, 0.);
        assert_float_eq!(
            a.angular_deviation(&b),
            0.002_f64.to_radians(),
            abs <= 1e-12
        );
    }

    #[test]
    fn units() -> Result<(), Error> {
        let foot = Unit::new(0.3048)?;
        let p = Projected::metres(3048., 30.48, 1.);
        let q = p.in_unit(foot);
        assert_float_eq!([q.x, q.y], [10_000., 100.], abs_all <= 1e-9);
        assert_eq!(q.altitude, 1.);
        assert!(p.hypot2(&q) < 1e-9);
        Ok(())
    }

    #[test]
    fn display() {
        let p = Geodetic::gis(-6.272877, 53.344606, 12.5);
        assert_eq!(p.to_string(), "53°20'40.582\"N 6°16'22.357\"W 12.500");
        let c = Geocentric::new(1., 2., 3.);
        assert_eq!(c.to_string(), "1.000 2.000 3.000");
    }

    #[test]
    fn arithmetic() {
        let a = Geocentric::new(1., 2., 2.);
        let b = Geocentric::new(3., -1., 0.5);
        assert_eq!(a + b, Geocentric::new(4., 1., 2.5));
        assert_eq!(a - b, Geocentric::new(-2., 3., 1.5));
        assert_eq!(a.scale(2.), Geocentric::new(2., 4., 4.));
        assert_eq!(a.dot(&b), 2.);
        assert_float_eq!(a.norm(), 3., abs <= 1e-15);
        assert_eq!((a - b).norm(), a.hypot3(&b));
    }
}
