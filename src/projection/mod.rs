//! Map projections: A small set of formula families, each driven by the
//! same fixed parameter set, and the projected reference systems built on
//! top of them.
//!
//! The formulas work in metres and radians throughout. Linear units enter
//! only at the [`Crs`] boundary, and longitudes are reckoned from the prime
//! meridian of the datum, so that is where the central meridian is
//! reckoned from too.
use crate::authoring::*;

mod lcc;
mod merc;
mod omerc;
mod tmerc;

use lcc::LambertConformalConic;
use merc::{Mercator, PseudoMercator};
use omerc::ObliqueMercator;
use tmerc::TransverseMercator;

// Latitudes closer than this to a pole are considered singular
const EPS10: f64 = 1e-10;

// ----- P A R A M E T E R S -----------------------------------------------------------

/// The parameters of a projection. Angles in radians, lengths in metres.
///
/// Not every family uses every field. Unused fields are left at zero,
/// and a zero `k0` means "not given", i.e. unit scale.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    /// Central meridian, or longitude of the projection centre
    pub lambda0: f64,
    /// Latitude of origin, or of the projection centre
    pub phi0: f64,
    /// First standard parallel (conics), or latitude of true scale (Mercator)
    pub phi1: f64,
    /// Second standard parallel
    pub phi2: f64,
    /// Scale factor at the natural origin, or on the initial line
    pub k0: f64,
    /// False easting
    pub x0: f64,
    /// False northing
    pub y0: f64,
    /// Azimuth of the initial line of an oblique projection
    pub azimut: f64,
    /// Angle from the rectified to the skew grid (oblique projections).
    /// Defaults to the azimuth of the initial line.
    pub gamma: Option<f64>,
}

impl ProjectionParameters {
    /// Build a parameter set from (EPSG parameter code, value) pairs. Angles
    /// are given in degrees, false eastings and northings in `unit`.
    /// Codes with no counterpart in the parameter set are ignored.
    pub fn from_epsg(parameters: &[(u32, f64)], unit: Unit) -> Result<ProjectionParameters, Error> {
        let mut result = ProjectionParameters::default();
        for &(code, value) in parameters {
            if !value.is_finite() {
                return Err(Error::BadParam(format!("EPSG:{code}"), value.to_string()));
            }
            let angle = value.to_radians();
            let length = unit.to_metres(value);
            match code {
                8801 | 8811 | 8821 => result.phi0 = angle,
                8802 | 8812 | 8822 => result.lambda0 = angle,
                8805 | 8815 => result.k0 = value,
                8806 | 8816 | 8826 => result.x0 = length,
                8807 | 8817 | 8827 => result.y0 = length,
                8813 => result.azimut = angle,
                8814 => result.gamma = Some(angle),
                8823 => result.phi1 = angle,
                8824 => result.phi2 = angle,
                _ => debug!("ignoring EPSG parameter {code} = {value}"),
            }
        }
        Ok(result)
    }

    /// The scale factor, with the "zero means not given" convention resolved
    #[must_use]
    pub fn scale(&self) -> f64 {
        if self.k0 == 0. {
            return 1.;
        }
        self.k0
    }
}

// ----- F A M I L I E S ---------------------------------------------------------------

/// The formula families supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Ellipsoidal normal Mercator. Uses `lambda0, phi0, phi1, k0, x0, y0`
    Mercator,
    /// Spherical Mercator on ellipsoidal coordinates ("Web Mercator").
    /// Uses `lambda0, k0, x0, y0`
    PseudoMercator,
    /// Uses `lambda0, phi0, k0, x0, y0`
    TransverseMercator,
    /// One or two standard parallels. Uses `lambda0, phi0, phi1, phi2, k0, x0, y0`
    LambertConformalConic,
    /// Hotine variant A: False origin at the natural origin.
    /// Uses `lambda0, phi0, azimut, gamma, k0, x0, y0`
    ObliqueMercator,
    /// Hotine variant B: False origin at the projection centre.
    /// Uses the same parameters as variant A
    ObliqueMercatorCentred,
}

impl Family {
    /// The formula family implementing a given EPSG method code
    pub fn from_epsg_method(code: u32) -> Result<Family, Error> {
        match code {
            1024 | 1026 => Ok(Family::PseudoMercator),
            1108 | 9804 | 9805 => Ok(Family::Mercator),
            9807 => Ok(Family::TransverseMercator),
            9812 => Ok(Family::ObliqueMercator),
            9815 => Ok(Family::ObliqueMercatorCentred),
            1051 | 1102 | 9801 | 9802 | 9803 | 9822 => Ok(Family::LambertConformalConic),
            _ => Err(Error::NotFound(
                format!("EPSG:{code}"),
                ": unsupported projection method".to_string(),
            )),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Family::Mercator => "mercator",
            Family::PseudoMercator => "pseudo mercator",
            Family::TransverseMercator => "transverse mercator",
            Family::LambertConformalConic => "lambert conformal conic",
            Family::ObliqueMercator => "oblique mercator",
            Family::ObliqueMercatorCentred => "oblique mercator (centred)",
        }
    }
}

// ----- P R O J E C T I O N -----------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Inner {
    Merc(Mercator),
    PseudoMerc(PseudoMercator),
    Tmerc(TransverseMercator),
    Lcc(LambertConformalConic),
    Omerc(ObliqueMercator),
}

/// A projection: A formula family, closed over an ellipsoid and a parameter
/// set. Immutable after construction, with all the constants the family
/// needs precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    family: Family,
    parameters: ProjectionParameters,
    inner: Inner,
}

impl Projection {
    pub fn new(
        family: Family,
        ellipsoid: &Ellipsoid,
        parameters: &ProjectionParameters,
    ) -> Result<Projection, Error> {
        let inner = match family {
            Family::Mercator => Inner::Merc(Mercator::new(ellipsoid, parameters)?),
            Family::PseudoMercator => Inner::PseudoMerc(PseudoMercator::new(ellipsoid, parameters)),
            Family::TransverseMercator => {
                Inner::Tmerc(TransverseMercator::new(ellipsoid, parameters)?)
            }
            Family::LambertConformalConic => {
                Inner::Lcc(LambertConformalConic::new(ellipsoid, parameters)?)
            }
            Family::ObliqueMercator => {
                Inner::Omerc(ObliqueMercator::new(ellipsoid, parameters, false)?)
            }
            Family::ObliqueMercatorCentred => {
                Inner::Omerc(ObliqueMercator::new(ellipsoid, parameters, true)?)
            }
        };
        debug!("{}: {parameters:?}", family.name());
        Ok(Projection {
            family,
            parameters: *parameters,
            inner,
        })
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    #[must_use]
    pub fn parameters(&self) -> &ProjectionParameters {
        &self.parameters
    }

    /// Geodetic to planar coordinates, in metres. The altitude is passed
    /// through unchanged.
    pub fn forward(&self, geodetic: &Geodetic) -> Result<Projected, Error> {
        let (lon, lat) = (geodetic.longitude, geodetic.latitude);
        let (x, y) = match &self.inner {
            Inner::Merc(p) => p.fwd(lon, lat)?,
            Inner::PseudoMerc(p) => p.fwd(lon, lat)?,
            Inner::Tmerc(p) => p.fwd(lon, lat)?,
            Inner::Lcc(p) => p.fwd(lon, lat)?,
            Inner::Omerc(p) => p.fwd(lon, lat)?,
        };
        if !(x.is_finite() && y.is_finite()) {
            warn!("{}: non-finite result for {geodetic}", self.family.name());
            return Err(Error::Singularity(self.family.name()));
        }
        Ok(Projected::metres(x, y, geodetic.altitude))
    }

    /// Planar coordinates, in any unit, to geodetic. The altitude is
    /// passed through unchanged.
    pub fn inverse(&self, projected: &Projected) -> Result<Geodetic, Error> {
        let (x, y) = projected.to_metres();
        let (lon, lat) = match &self.inner {
            Inner::Merc(p) => p.inv(x, y)?,
            Inner::PseudoMerc(p) => p.inv(x, y)?,
            Inner::Tmerc(p) => p.inv(x, y)?,
            Inner::Lcc(p) => p.inv(x, y)?,
            Inner::Omerc(p) => p.inv(x, y)?,
        };
        if !(lon.is_finite() && lat.is_finite()) {
            warn!("{}: non-finite result for {projected}", self.family.name());
            return Err(Error::Singularity(self.family.name()));
        }
        Ok(Geodetic::raw(lon, lat, projected.altitude))
    }
}

// ----- C R S -------------------------------------------------------------------------

/// A projected coordinate reference system: A datum, a projection on the
/// datum's ellipsoid, and the linear unit of the planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crs {
    datum: Datum,
    projection: Projection,
    unit: Unit,
}

impl Crs {
    pub fn new(
        datum: Datum,
        family: Family,
        parameters: &ProjectionParameters,
        unit: Unit,
    ) -> Result<Crs, Error> {
        let projection = Projection::new(family, datum.ellipsoid(), parameters)?;
        Ok(Crs {
            datum,
            projection,
            unit,
        })
    }

    #[must_use]
    pub fn datum(&self) -> &Datum {
        &self.datum
    }

    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Geodetic coordinates in the datum of the CRS to planar coordinates
    /// in the unit of the CRS
    pub fn forward(&self, geodetic: &Geodetic) -> Result<Projected, Error> {
        Ok(self.projection.forward(geodetic)?.in_unit(self.unit))
    }

    /// Planar coordinates to geodetic coordinates in the datum of the CRS.
    /// The planar coordinates may be given in any unit.
    pub fn inverse(&self, projected: &Projected) -> Result<Geodetic, Error> {
        self.projection.inverse(projected)
    }

    /// Planar coordinates to WGS84 geodetic coordinates
    pub fn to_wgs84(&self, projected: &Projected) -> Result<Geodetic, Error> {
        self.datum.to_wgs84(&self.inverse(projected)?)
    }

    /// WGS84 geodetic coordinates to planar coordinates
    pub fn from_wgs84(&self, geodetic: &Geodetic) -> Result<Projected, Error> {
        self.forward(&self.datum.from_wgs84(geodetic)?)
    }

    /// Planar coordinates in this CRS to planar coordinates in `target`,
    /// going through WGS84 if the datums differ
    pub fn reproject(&self, target: &Crs, projected: &Projected) -> Result<Projected, Error> {
        let geodetic = self.inverse(projected)?;
        if self.datum == target.datum {
            return target.forward(&geodetic);
        }
        target.forward(&self.datum.to_crs(&target.datum, &geodetic)?)
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn parameters() -> Result<(), Error> {
        let p = ProjectionParameters::from_epsg(
            &[
                (8801, 49.),
                (8802, -2.),
                (8805, 0.9996012717),
                (8806, 400000.),
                (8807, -100000.),
                (1234, 42.),
            ],
            Unit::metre(),
        )?;
        assert_float_eq!(p.phi0, 49_f64.to_radians(), abs <= 1e-15);
        assert_float_eq!(p.lambda0, -2_f64.to_radians(), abs <= 1e-15);
        assert_eq!(p.k0, 0.9996012717);
        assert_eq!((p.x0, p.y0), (400000., -100000.));
        assert_eq!((p.phi1, p.phi2, p.azimut, p.gamma), (0., 0., 0., None));

        // False easting in US survey feet, stored in metres
        let p = ProjectionParameters::from_epsg(&[(8826, 984250.)], Unit::us_survey_foot())?;
        assert_float_eq!(p.x0, 300_000., abs <= 1e-9);

        // Zero scale means unit scale
        assert_eq!(p.k0, 0.);
        assert_eq!(p.scale(), 1.);

        assert!(matches!(
            ProjectionParameters::from_epsg(&[(8805, f64::NAN)], Unit::metre()),
            Err(Error::BadParam(..))
        ));
        Ok(())
    }

    #[test]
    fn families() -> Result<(), Error> {
        assert_eq!(Family::from_epsg_method(9807)?, Family::TransverseMercator);
        assert_eq!(Family::from_epsg_method(1024)?, Family::PseudoMercator);
        assert_eq!(Family::from_epsg_method(9805)?, Family::Mercator);
        assert_eq!(Family::from_epsg_method(9802)?, Family::LambertConformalConic);
        assert_eq!(Family::from_epsg_method(9801)?, Family::LambertConformalConic);
        assert_eq!(Family::from_epsg_method(9812)?, Family::ObliqueMercator);
        assert_eq!(Family::from_epsg_method(9815)?, Family::ObliqueMercatorCentred);
        // Geographic 2D is not a projection
        assert!(matches!(
            Family::from_epsg_method(9659),
            Err(Error::NotFound(..))
        ));
        Ok(())
    }

    // Roundtrip of every family at a point in its domain
    #[test]
    fn roundtrips() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let mut p = ProjectionParameters {
            lambda0: 10_f64.to_radians(),
            phi0: 35_f64.to_radians(),
            phi1: 33_f64.to_radians(),
            phi2: 45_f64.to_radians(),
            k0: 0.9996,
            x0: 500_000.,
            y0: 200_000.,
            ..Default::default()
        };

        let geo = Geodetic::gis(12., 40., 123.);
        for family in [
            Family::Mercator,
            Family::PseudoMercator,
            Family::TransverseMercator,
            Family::LambertConformalConic,
        ] {
            let projection = Projection::new(family, &ellps, &p)?;
            let projected = projection.forward(&geo)?;
            assert_eq!(projected.altitude, 123.);
            let back = projection.inverse(&projected)?;
            assert!(back.angular_deviation(&geo) < 1e-10, "{}", family.name());
            assert_eq!(back.altitude, 123.);
        }

        p.azimut = 30_f64.to_radians();
        p.lambda0 = 12_f64.to_radians();
        p.phi0 = 38_f64.to_radians();
        for family in [Family::ObliqueMercator, Family::ObliqueMercatorCentred] {
            let projection = Projection::new(family, &ellps, &p)?;
            let back = projection.inverse(&projection.forward(&geo)?)?;
            assert!(back.angular_deviation(&geo) < 1e-9, "{}", family.name());
        }
        Ok(())
    }

    #[test]
    fn singularities() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;
        let p = ProjectionParameters::default();
        let pole = Geodetic::gis(0., 90., 0.);

        for family in [Family::Mercator, Family::PseudoMercator] {
            let projection = Projection::new(family, &ellps, &p)?;
            assert_eq!(
                projection.forward(&pole),
                Err(Error::Singularity(family.name()))
            );
        }

        // The transverse aspect is well behaved at the pole...
        let tmerc = Projection::new(Family::TransverseMercator, &ellps, &p)?;
        let projected = tmerc.forward(&pole)?;
        assert_float_eq!(projected.y, 10_001_965.729, abs <= 1e-3);

        // ...but not 90 degrees away from the central meridian
        let far = Geodetic::gis(90., 0., 0.);
        assert!(matches!(tmerc.forward(&far), Err(Error::Singularity(_))));
        Ok(())
    }

    #[test]
    fn crs() -> Result<(), Error> {
        // NAD83 / New York Long Island (ftUS), EPSG:2263
        let datum = Datum::new(Ellipsoid::named("GRS80")?, 0., Helmert::identity())?;
        let unit = Unit::us_survey_foot();
        let parameters = ProjectionParameters::from_epsg(
            &[
                (8821, 40. + 10. / 60.),
                (8822, -74.),
                (8823, 41. + 2. / 60.),
                (8824, 40. + 40. / 60.),
                (8826, 984250.),
                (8827, 0.),
            ],
            unit,
        )?;
        let crs = Crs::new(datum, Family::LambertConformalConic, &parameters, unit)?;

        let empire_state = Geodetic::gis(-73.9857, 40.7484, 443.);
        let p = crs.forward(&empire_state)?;
        assert_eq!(p.unit, unit);
        assert_float_eq!(p.x, 988_212.237_183, abs <= 1e-5);
        assert_float_eq!(p.y, 211_939.278_568, abs <= 1e-5);
        assert_eq!(p.altitude, 443.);

        // The same point, in metres
        let (x, y) = p.to_metres();
        assert_float_eq!(x, 301_207.692_309, abs <= 1e-5);
        assert_float_eq!(y, 64_599.221_306, abs <= 1e-5);

        // Inverse accepts any unit
        let back = crs.inverse(&p.in_unit(Unit::metre()))?;
        assert!(back.angular_deviation(&empire_state) < 1e-10);
        Ok(())
    }
}
