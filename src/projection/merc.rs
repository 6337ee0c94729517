//! Mercator, in its ellipsoidal and its "Web" form
use super::{ProjectionParameters, EPS10};
use crate::authoring::*;

/// The normal aspect ellipsoidal Mercator
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Mercator {
    ellps: Ellipsoid,
    // a * k0
    ak0: f64,
    lambda0: f64,
    // Isometric latitude of the latitude of origin
    psi0: f64,
    x0: f64,
    y0: f64,
}

impl Mercator {
    pub(super) fn new(ellps: &Ellipsoid, p: &ProjectionParameters) -> Result<Mercator, Error> {
        if p.phi1.abs() >= FRAC_PI_2 || p.phi0.abs() >= FRAC_PI_2 {
            return Err(Error::BadParam(
                "mercator".to_string(),
                "latitudes must be inside (-90, 90)".to_string(),
            ));
        }

        // A latitude of true scale trumps the scale factor
        let mut k0 = p.scale();
        if p.phi1 != 0. {
            k0 = ancillary::msfn(p.phi1.sin_cos(), ellps.eccentricity_squared());
        }

        Ok(Mercator {
            ellps: *ellps,
            ak0: ellps.semimajor_axis() * k0,
            lambda0: p.lambda0,
            psi0: ellps.isometric_latitude(p.phi0, Fwd),
            x0: p.x0,
            y0: p.y0,
        })
    }

    // ----- F O R W A R D -------------------------------------------------------------

    pub(super) fn fwd(&self, lon: f64, lat: f64) -> Result<(f64, f64), Error> {
        if FRAC_PI_2 - lat.abs() < EPS10 {
            return Err(Error::Singularity("mercator"));
        }
        let lam = angular::normalize_symmetric(lon - self.lambda0);
        let psi = self.ellps.isometric_latitude(lat, Fwd);
        Ok((self.x0 + self.ak0 * lam, self.y0 + self.ak0 * (psi - self.psi0)))
    }

    // ----- I N V E R S E -------------------------------------------------------------

    pub(super) fn inv(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let lon = (x - self.x0) / self.ak0 + self.lambda0;
        let psi = (y - self.y0) / self.ak0 + self.psi0;
        let lat = self.ellps.isometric_latitude(psi, Inv);
        if lat.is_nan() {
            return Err(Error::Convergence {
                solver: "mercator inverse",
                iterations: 5,
            });
        }
        Ok((angular::normalize_symmetric(lon), lat))
    }
}

/// The spherical Mercator formulas, applied directly to ellipsoidal
/// coordinates. Not conformal, but ubiquitous in web mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PseudoMercator {
    ak0: f64,
    lambda0: f64,
    x0: f64,
    y0: f64,
}

impl PseudoMercator {
    pub(super) fn new(ellps: &Ellipsoid, p: &ProjectionParameters) -> PseudoMercator {
        PseudoMercator {
            ak0: ellps.semimajor_axis() * p.scale(),
            lambda0: p.lambda0,
            x0: p.x0,
            y0: p.y0,
        }
    }

    pub(super) fn fwd(&self, lon: f64, lat: f64) -> Result<(f64, f64), Error> {
        if FRAC_PI_2 - lat.abs() < EPS10 {
            return Err(Error::Singularity("pseudo mercator"));
        }
        let lam = angular::normalize_symmetric(lon - self.lambda0);
        let northing = (FRAC_PI_4 + lat / 2.).tan().ln();
        Ok((self.x0 + self.ak0 * lam, self.y0 + self.ak0 * northing))
    }

    pub(super) fn inv(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let lon = (x - self.x0) / self.ak0 + self.lambda0;
        let lat = FRAC_PI_2 - 2. * (-(y - self.y0) / self.ak0).exp().atan();
        Ok((angular::normalize_symmetric(lon), lat))
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn merc() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let merc = Mercator::new(&ellps, &ProjectionParameters::default())?;

        // Validation value from PROJ: echo 12 55 0 0 | cct -d18 +proj=merc
        // followed by quadrant tests from PROJ builtins.gie
        let geo: [(f64, f64); 5] = [(12., 55.), (2., 1.), (2., -1.), (-2., 1.), (-2., -1.)];
        let projected = [
            (1_335_833.889_519_282_8, 7_326_837.714_873_877),
            (222_638.981_586_547, 110_579.965_218_249),
            (222_638.981_586_547, -110_579.965_218_249),
            (-222_638.981_586_547, 110_579.965_218_249),
            (-222_638.981_586_547, -110_579.965_218_249),
        ];

        for (g, p) in geo.iter().zip(projected.iter()) {
            let (x, y) = merc.fwd(g.0.to_radians(), g.1.to_radians())?;
            assert_float_eq!(x, p.0, abs <= 2e-8);
            assert_float_eq!(y, p.1, abs <= 2e-8);

            let (lon, lat) = merc.inv(x, y)?;
            assert_float_eq!(lon.to_degrees(), g.0, abs <= 1e-10);
            assert_float_eq!(lat.to_degrees(), g.1, abs <= 1e-10);
        }

        assert_eq!(
            merc.fwd(0., FRAC_PI_2),
            Err(Error::Singularity("mercator"))
        );
        Ok(())
    }

    #[test]
    fn merc_lat_ts() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let parameters = ProjectionParameters {
            phi1: 56_f64.to_radians(),
            k0: 0.5,
            ..Default::default()
        };
        let merc = Mercator::new(&ellps, &parameters)?;

        // Validation value from PROJ: echo 12 55 0 0 | cct -d18 +proj=merc +lat_ts=56
        let (x, y) = merc.fwd(12_f64.to_radians(), 55_f64.to_radians())?;
        assert_float_eq!(x, 748_713.257_925_886_8, abs <= 2e-8);
        assert_float_eq!(y, 4_106_573.862_841_270_4, abs <= 2e-8);

        let bad = ProjectionParameters {
            phi1: FRAC_PI_2,
            ..Default::default()
        };
        assert!(matches!(Mercator::new(&ellps, &bad), Err(Error::BadParam(..))));
        Ok(())
    }

    #[test]
    fn webmerc() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;
        let webmerc = PseudoMercator::new(&ellps, &ProjectionParameters::default());

        // Validation value from PROJ: echo 12 55 0 0 | cct -d18 +proj=webmerc
        let (x, y) = webmerc.fwd(12_f64.to_radians(), 55_f64.to_radians())?;
        assert_float_eq!(x, 1_335_833.889_519_282_8, abs <= 1e-8);
        assert_float_eq!(y, 7_361_866.113_051_188, abs <= 1e-8);

        let (lon, lat) = webmerc.inv(x, y)?;
        assert_float_eq!(lon.to_degrees(), 12., abs <= 2e-9);
        assert_float_eq!(lat.to_degrees(), 55., abs <= 2e-9);

        // Spherical formulas: Further from the equator than the ellipsoidal Mercator
        let merc = Mercator::new(&ellps, &ProjectionParameters::default())?;
        assert!(merc.fwd(0., 1.)?.1 < webmerc.fwd(0., 1.)?.1);
        Ok(())
    }
}
