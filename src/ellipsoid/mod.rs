use crate::authoring::*;

mod cartesians;
mod geodesics;
mod latitudes;

pub use geodesics::{Destination, Distance};

/// An ellipsoid of revolution.
///
/// Exactly one of the flattening or the semiminor axis is given at
/// construction; the other is derived, so `b = a(1 - f)` always holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    b: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        let a = 6_378_137.0;
        let f = 1. / 298.257_222_101;
        Ellipsoid { a, b: a * (1. - f), f }
    }
}

// The "shape" half of a builtin definition: Either reciproque flattening, or semiminor axis
#[derive(Clone, Copy, Debug)]
enum Shape {
    Rf(f64),
    B(f64),
}

#[rustfmt::skip]
const ELLIPSOID_LIST: [(&str, f64, Shape); 9] = [
    ("WGS84",     6_378_137.0,   Shape::Rf(298.257_223_563)),
    ("GRS80",     6_378_137.0,   Shape::Rf(298.257_222_101)),
    ("intl",      6_378_388.0,   Shape::Rf(297.0)),
    ("bessel",    6_377_397.155, Shape::Rf(299.152_812_8)),
    ("airy",      6_377_563.396, Shape::Rf(299.324_964_6)),
    ("clrk66",    6_378_206.4,   Shape::B(6_356_583.8)),
    ("clrk80ign", 6_378_249.2,   Shape::B(6_356_515.0)),
    ("krass",     6_378_245.0,   Shape::Rf(298.3)),
    ("evrstSS",   6_377_298.556, Shape::Rf(300.8017)),
];

/// Constructors for `Ellipsoid`
impl Ellipsoid {
    /// User defined ellipsoid, from semimajor axis and flattening
    pub fn new(semimajor_axis: f64, flattening: f64) -> Result<Ellipsoid, Error> {
        Self::validated(semimajor_axis, semimajor_axis * (1. - flattening), flattening)
    }

    /// User defined ellipsoid, from semimajor and semiminor axes
    pub fn from_axes(semimajor_axis: f64, semiminor_axis: f64) -> Result<Ellipsoid, Error> {
        let f = (semimajor_axis - semiminor_axis) / semimajor_axis;
        Self::validated(semimajor_axis, semiminor_axis, f)
    }

    /// User defined ellipsoid, from semimajor axis and reciproque flattening.
    /// EPSG convention: zero reciproque flattening indicates zero flattening
    pub fn from_inverse_flattening(
        semimajor_axis: f64,
        inverse_flattening: f64,
    ) -> Result<Ellipsoid, Error> {
        let f = if inverse_flattening == 0. {
            0.
        } else {
            1. / inverse_flattening
        };
        Self::new(semimajor_axis, f)
    }

    /// Predefined ellipsoid; built-in or given as a string formatted
    /// (a, rf) tuple, e.g. "6378137, 298.25"
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        if let Some((_, a, shape)) = ELLIPSOID_LIST.iter().find(|e| e.0 == name) {
            return match shape {
                Shape::Rf(rf) => Ellipsoid::from_inverse_flattening(*a, *rf),
                Shape::B(b) => Ellipsoid::from_axes(*a, *b),
            };
        }

        // Remove optional parenthesis
        let mut name = name.trim();
        if let Some(inner) = name.strip_prefix('(').and_then(|n| n.strip_suffix(')')) {
            name = inner;
        }

        // The "semimajor, reciproque-flattening" form, e.g. "6378137, 298.3"
        let parts: Vec<&str> = name.split(',').map(str::trim).collect();
        if parts.len() == 2 {
            if let (Ok(a), Ok(rf)) = (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
                return Ellipsoid::from_inverse_flattening(a, rf);
            }
        }

        Err(Error::NotFound(name.to_string(), ": unknown ellipsoid".to_string()))
    }

    fn validated(a: f64, b: f64, f: f64) -> Result<Ellipsoid, Error> {
        if !(a.is_finite() && b.is_finite() && f.is_finite()) {
            return Err(Error::InvalidEllipsoid(format!("non-finite shape (a={a}, b={b})")));
        }
        if a <= 0. {
            return Err(Error::InvalidEllipsoid(format!(
                "semimajor axis must be positive, got {a}"
            )));
        }
        if b <= 0. {
            return Err(Error::InvalidEllipsoid(format!(
                "semiminor axis must be positive, got {b}"
            )));
        }
        if b > a {
            return Err(Error::InvalidEllipsoid(format!(
                "semiminor axis {b} exceeds semimajor axis {a}"
            )));
        }
        Ok(Ellipsoid { a, b, f })
    }
}

impl Ellipsoid {
    // ----- Axes ------------------------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.b
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²) / a²*.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }

    // ----- Flattenings -----------------------------------------------------------

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The third flattening, *n = (a - b) / (a + b) = f / (2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    // ----- Meridian geometry -----------------------------------------------------

    /// The Normalized Meridian Arc Unit, *Qn*, is the mean length of one radian
    /// of the meridian. "Normalized", because we measure it in units of the
    /// semimajor axis, *a*.
    ///
    /// König und Weise p.50 (96), p.19 (38b), p.5 (2), here using the extended
    /// version from [Karney 2011](crate::Bibliography::Kar11) eq. (14)
    #[must_use]
    pub fn normalized_meridian_arc_unit(&self) -> f64 {
        let n = self.third_flattening();
        let nn = n * n;
        (1. + nn * (1. / 4. + nn * (1. / 64. + nn / 256.))) / (1. + n)
    }

    /// The Meridian Quadrant, *Qm*, is the distance from the equator to one of the poles.
    /// i.e. *π/2 · Qn · a*, where *Qn* is the
    /// [normalized meridian arc unit](Ellipsoid::normalized_meridian_arc_unit)
    #[must_use]
    pub fn meridian_quadrant(&self) -> f64 {
        self.a * FRAC_PI_2 * self.normalized_meridian_arc_unit()
    }

    // ----- Curvatures ------------------------------------------------------------

    /// The radius of curvature in the prime vertical, *N*
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        self.a / (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).sqrt()
    }

    /// The meridian radius of curvature, *M*
    #[must_use]
    pub fn meridian_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        let num = self.a * (1.0 - self.eccentricity_squared());
        let denom = (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).powf(1.5);
        num / denom
    }

    /// The polar radius of curvature, *c*
    #[must_use]
    pub fn polar_radius_of_curvature(&self) -> f64 {
        self.a * self.a / self.b
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn constructors() -> Result<(), Error> {
        let ellps = Ellipsoid::named("intl")?;
        assert_eq!(ellps.flattening(), 1. / 297.);

        let ellps = Ellipsoid::named("GRS80")?;
        assert_eq!(ellps.semimajor_axis(), 6378137.0);
        assert_eq!(ellps.flattening(), 1. / 298.257_222_101);
        assert_eq!(ellps, Ellipsoid::default());

        // Semiminor axis as the authoritative input
        let clrk66 = Ellipsoid::named("clrk66")?;
        assert_eq!(clrk66.semiminor_axis(), 6_356_583.8);
        assert_float_eq!(1. / clrk66.flattening(), 294.978_698_2, abs <= 1e-6);

        // The "a, rf" form
        let ellps = Ellipsoid::named("(6378137, 298.257223563)")?;
        assert_eq!(ellps, Ellipsoid::named("WGS84")?);

        // EPSG convention: rf = 0 is a sphere
        let sphere = Ellipsoid::from_inverse_flattening(6_371_000., 0.)?;
        assert_eq!(sphere.semiminor_axis(), 6_371_000.);
        assert_eq!(sphere.eccentricity(), 0.);

        assert!(matches!(
            Ellipsoid::named("Mars"),
            Err(Error::NotFound(..))
        ));
        Ok(())
    }

    #[test]
    fn validation() {
        assert!(matches!(
            Ellipsoid::new(0., 0.),
            Err(Error::InvalidEllipsoid(_))
        ));
        assert!(matches!(
            Ellipsoid::new(-6e6, 0.003),
            Err(Error::InvalidEllipsoid(_))
        ));
        // f > 1 gives a negative semiminor axis
        assert!(matches!(
            Ellipsoid::new(6e6, 1.5),
            Err(Error::InvalidEllipsoid(_))
        ));
        // Prolate ellipsoids are rejected
        assert!(matches!(
            Ellipsoid::from_axes(6e6, 6.1e6),
            Err(Error::InvalidEllipsoid(_))
        ));
        assert!(matches!(
            Ellipsoid::new(f64::NAN, 0.003),
            Err(Error::InvalidEllipsoid(_))
        ));
        assert!(matches!(
            Ellipsoid::from_axes(6e6, f64::INFINITY),
            Err(Error::InvalidEllipsoid(_))
        ));
    }

    #[test]
    fn shape_and_size() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let ellps = Ellipsoid::new(ellps.semimajor_axis(), ellps.flattening())?;

        // The derivation rules
        let f = ellps.flattening();
        assert_float_eq!(ellps.eccentricity_squared(), 2. * f - f * f, abs <= 1e-18);
        assert_float_eq!(
            ellps.semiminor_axis(),
            ellps.semimajor_axis() * (1. - f),
            abs <= 1e-9
        );

        assert!((ellps.eccentricity() - 0.081819191).abs() < 1.0e-10);
        assert!((ellps.eccentricity_squared() - 0.00669_43800_22903_41574).abs() < 1.0e-10);
        assert!((ellps.semiminor_axis() - 6_356_752.314_140_356).abs() < 1e-8);
        assert!((ellps.third_flattening() - 0.001_679_220_394_628_745).abs() < 1e-15);

        assert!((ellps.normalized_meridian_arc_unit() - 0.998_324_298_423_042_4).abs() < 1e-13);
        assert!((4.0 * ellps.meridian_quadrant() - 40_007_862.916_921_8).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn curvatures() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let pole = 90_f64.to_radians();

        // The curvatures at the North Pole
        assert!((ellps.meridian_radius_of_curvature(pole) - 6_399_593.6259).abs() < 1e-4);
        assert!((ellps.prime_vertical_radius_of_curvature(pole) - 6_399_593.6259).abs() < 1e-4);
        assert!(
            (ellps.polar_radius_of_curvature() - ellps.meridian_radius_of_curvature(pole)).abs()
                < 1e-6
        );

        // The curvatures at the Equator
        assert!((ellps.meridian_radius_of_curvature(0.0) - 6_335_439.3271).abs() < 1.0e-4);
        assert!(
            (ellps.prime_vertical_radius_of_curvature(0.0) - ellps.semimajor_axis()).abs() < 1.0e-4
        );
        Ok(())
    }
}
