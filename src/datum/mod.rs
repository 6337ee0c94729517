//! Geodetic datums, and transformations between them.
//!
//! A datum is resolved relative to WGS84 only: Transformations between two
//! arbitrary datums always go through WGS84, never directly.
use crate::authoring::*;

mod helmert;
pub use helmert::{Convention, Helmert};

/// An ellipsoid, a prime meridian, and the Helmert parameters taking
/// geocentric coordinates from the datum to WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    ellipsoid: Ellipsoid,
    prime_meridian: f64,
    helmert: Helmert,
}

/// WGS84 is the default datum.
impl Default for Datum {
    fn default() -> Datum {
        Datum::wgs84()
    }
}

impl Datum {
    /// A datum from its constituents. The `prime_meridian` is the longitude of
    /// the datum's zero meridian, east of Greenwich, in radians.
    pub fn new(ellipsoid: Ellipsoid, prime_meridian: f64, helmert: Helmert) -> Result<Datum, Error> {
        if !prime_meridian.is_finite() {
            return Err(Error::InvalidDatum(format!(
                "prime meridian must be finite, got {prime_meridian}"
            )));
        }
        if !helmert.is_finite() {
            return Err(Error::InvalidDatum(format!(
                "Helmert parameters must be finite, got {:?}",
                helmert.parameters()
            )));
        }
        Ok(Datum {
            ellipsoid,
            prime_meridian,
            helmert,
        })
    }

    /// WGS84 itself: The identity datum
    #[must_use]
    pub fn wgs84() -> Datum {
        Datum {
            ellipsoid: wgs84_ellipsoid(),
            prime_meridian: 0.,
            helmert: Helmert::identity(),
        }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Longitude of the prime meridian, east of Greenwich, in radians
    #[must_use]
    pub fn prime_meridian(&self) -> f64 {
        self.prime_meridian
    }

    #[must_use]
    pub fn helmert(&self) -> &Helmert {
        &self.helmert
    }

    /// Convert a coordinate given in this datum to WGS84: To geocentric on
    /// our own ellipsoid, Helmert forward, and back to geodetic on the WGS84
    /// ellipsoid.
    pub fn to_wgs84(&self, coordinate: &Geodetic) -> Result<Geodetic, Error> {
        let mut local = *coordinate;
        local.longitude += self.prime_meridian;

        let cartesian = self.ellipsoid.cartesian(&local);
        let shifted = self.helmert.apply(&cartesian, Fwd);
        let result = wgs84_ellipsoid().geodetic(&shifted)?;
        trace!("to_wgs84: {coordinate} -> {result}");
        Ok(result)
    }

    /// The inverse of [`to_wgs84`](Datum::to_wgs84): Convert a WGS84
    /// coordinate to this datum
    pub fn from_wgs84(&self, coordinate: &Geodetic) -> Result<Geodetic, Error> {
        let cartesian = wgs84_ellipsoid().cartesian(coordinate);
        let shifted = self.helmert.apply(&cartesian, Inv);
        let mut result = self.ellipsoid.geodetic(&shifted)?;
        result.longitude = angular::normalize_symmetric(result.longitude - self.prime_meridian);
        Ok(result)
    }

    /// Convert a coordinate from this datum to the `target` datum, going
    /// through WGS84
    pub fn to_crs(&self, target: &Datum, coordinate: &Geodetic) -> Result<Geodetic, Error> {
        let wgs84 = self.to_wgs84(coordinate)?;
        target.from_wgs84(&wgs84)
    }
}

fn wgs84_ellipsoid() -> Ellipsoid {
    static WGS84: once_cell::sync::Lazy<Ellipsoid> = once_cell::sync::Lazy::new(|| {
        Ellipsoid::named("WGS84").unwrap_or_default()
    });
    *WGS84
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn identity() -> Result<(), Error> {
        let datum = Datum::wgs84();
        for p in [
            Geodetic::gis(12., 55., 100.),
            Geodetic::gis(-179.9, -89.5, -30.),
            Geodetic::gis(0., 0., 0.),
            Geodetic::gis(45., 90., 0.),
        ] {
            let q = datum.to_wgs84(&p)?;
            assert!(p.angular_deviation(&q) < 1e-11);
            assert_float_eq!(p.altitude, q.altitude, abs <= 1e-6);
        }
        Ok(())
    }

    #[test]
    fn validation() -> Result<(), Error> {
        let ellps = Ellipsoid::named("intl")?;
        assert!(matches!(
            Datum::new(ellps, f64::NAN, Helmert::identity()),
            Err(Error::InvalidDatum(_))
        ));
        assert!(matches!(
            Datum::new(ellps, 0., Helmert::translation(0., f64::INFINITY, 0.)),
            Err(Error::InvalidDatum(_))
        ));
        Ok(())
    }

    #[test]
    fn osgb36() -> Result<(), Error> {
        // EPSG:1314, OSGB36 to WGS84, position vector convention
        let helmert = Helmert::new(
            [446.448, -125.157, 542.06, 0.15, 0.247, 0.842, -20.489],
            Convention::PositionVector,
        );
        let osgb36 = Datum::new(Ellipsoid::named("airy")?, 0., helmert)?;

        let p = Geodetic::gis(-0.127005, 51.518602, 0.);
        let q = osgb36.to_wgs84(&p)?;
        let (lon, lat, h) = q.to_gis();
        assert_float_eq!(lon, -0.128_611_851_428, abs <= 1e-9);
        assert_float_eq!(lat, 51.519_111_036_307, abs <= 1e-9);
        assert_float_eq!(h, 46.137, abs <= 1e-3);

        // ...and back
        let r = osgb36.from_wgs84(&q)?;
        assert!(p.angular_deviation(&r) < 1e-10);
        assert_float_eq!(r.altitude, 0., abs <= 1e-6);
        Ok(())
    }

    #[test]
    fn through_wgs84() -> Result<(), Error> {
        let ed50 = Datum::new(
            Ellipsoid::named("intl")?,
            0.,
            Helmert::translation(-87., -98., -121.),
        )?;
        let p = Geodetic::gis(12., 55., 0.);
        let q = ed50.to_wgs84(&p)?;
        let (lon, lat, _) = q.to_gis();
        assert_float_eq!(lon, 11.998_784_754_418, abs <= 1e-9);
        assert_float_eq!(lat, 54.999_380_545_408, abs <= 1e-9);

        // Datum to datum: ED50 to itself is the identity, to within
        // the rounding of the two geocentric conversions
        let r = ed50.to_crs(&ed50, &p)?;
        assert!(p.angular_deviation(&r) < 1e-11);

        // ED50 to WGS84, by way of to_crs
        let r = ed50.to_crs(&Datum::wgs84(), &p)?;
        assert!(q.angular_deviation(&r) < 1e-14);
        Ok(())
    }

    #[test]
    fn prime_meridian() -> Result<(), Error> {
        // NTF (Paris): Longitudes reckoned from the Paris meridian
        let clarke = Ellipsoid::from_axes(6_378_249.2, 6_356_515.0)?;
        let shift = Helmert::translation(-168., -60., 320.);
        let paris = Datum::new(clarke, 2.337_229_17_f64.to_radians(), shift)?;
        let greenwich = Datum::new(clarke, 0., shift)?;

        let p = Geodetic::gis(0., 48.8566, 0.);
        let q = paris.to_wgs84(&p)?;
        let (lon, lat, _) = q.to_gis();
        assert_float_eq!(lon, 2.336_505_576_855, abs <= 1e-9);
        assert_float_eq!(lat, 48.856_530_641_523, abs <= 1e-9);

        // Same datum, different prime meridian: A pure longitude offset
        let r = paris.to_crs(&greenwich, &p)?;
        assert_float_eq!(r.longitude.to_degrees(), 2.337_229_17, abs <= 1e-9);
        assert_float_eq!(r.latitude, p.latitude, abs <= 1e-11);
        Ok(())
    }
}
