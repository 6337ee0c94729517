//! Lambert Conformal Conic, following the PROJ implementation,
//! cf. [Snyder (1987)](crate::Bibliography::Sny87) ch. 15
use super::{ProjectionParameters, EPS10};
use crate::authoring::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct LambertConformalConic {
    e: f64,
    // a * k0
    ak0: f64,
    // The cone constant
    n: f64,
    c: f64,
    // Radius of the parallel of origin
    rho0: f64,
    lambda0: f64,
    x0: f64,
    y0: f64,
}

impl LambertConformalConic {
    pub(super) fn new(
        ellps: &Ellipsoid,
        p: &ProjectionParameters,
    ) -> Result<LambertConformalConic, Error> {
        let bad = |what: &str| {
            Error::BadParam("lambert conformal conic".to_string(), what.to_string())
        };

        // Missing standard parallels: Tangent cone. With no standard
        // parallel at all, the cone touches the latitude of origin.
        let (phi1, phi2) = match (p.phi1, p.phi2) {
            (a, b) if a == 0. && b == 0. => (p.phi0, p.phi0),
            (a, b) if b == 0. => (a, a),
            (a, b) if a == 0. => (b, b),
            (a, b) => (a, b),
        };
        let phi0 = p.phi0;

        if (phi1 + phi2).abs() < EPS10 {
            return Err(bad("|phi1 + phi2| should be > 0"));
        }
        if phi1.abs() >= FRAC_PI_2 || phi1.cos().abs() < EPS10 {
            return Err(bad("|phi1| should be < 90°"));
        }
        if phi2.abs() >= FRAC_PI_2 || phi2.cos().abs() < EPS10 {
            return Err(bad("|phi2| should be < 90°"));
        }
        if phi0.abs() > FRAC_PI_2 {
            return Err(bad("|phi0| should not exceed 90°"));
        }

        let e = ellps.eccentricity();
        let es = ellps.eccentricity_squared();
        let sc = phi1.sin_cos();
        let mut n = sc.0;

        // Snyder (1987) eq. 14-15
        let m1 = ancillary::msfn(sc, es);
        // Snyder (1987) eq. 7-10: exp(-𝜓)
        let ml1 = ancillary::ts(sc, e);

        // Secant case?
        if (phi1 - phi2).abs() >= EPS10 {
            let sc = phi2.sin_cos();
            let denom = (ml1 / ancillary::ts(sc, e)).ln();
            n = (m1 / ancillary::msfn(sc, es)).ln() / denom;
        }
        if n == 0. || !n.is_finite() {
            return Err(bad("degenerate cone constant"));
        }

        let c = m1 * ml1.powf(-n) / n;
        let mut rho0 = 0.;
        if (phi0.abs() - FRAC_PI_2).abs() > EPS10 {
            rho0 = c * ancillary::ts(phi0.sin_cos(), e).powf(n);
        }

        Ok(LambertConformalConic {
            e,
            ak0: ellps.semimajor_axis() * p.scale(),
            n,
            c,
            rho0,
            lambda0: p.lambda0,
            x0: p.x0,
            y0: p.y0,
        })
    }

    // ----- F O R W A R D -------------------------------------------------------------

    pub(super) fn fwd(&self, lon: f64, lat: f64) -> Result<(f64, f64), Error> {
        // The apex of the cone is as singular as the opposite pole
        if (lat.abs() - FRAC_PI_2).abs() < EPS10 {
            return Err(Error::Singularity("lambert conformal conic"));
        }
        let lam = angular::normalize_symmetric(lon - self.lambda0);
        let rho = self.c * ancillary::ts(lat.sin_cos(), self.e).powf(self.n);
        let (s, c) = (lam * self.n).sin_cos();
        Ok((
            self.x0 + self.ak0 * rho * s,
            self.y0 + self.ak0 * (self.rho0 - rho * c),
        ))
    }

    // ----- I N V E R S E -------------------------------------------------------------

    pub(super) fn inv(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let mut x = (x - self.x0) / self.ak0;
        let mut y = self.rho0 - (y - self.y0) / self.ak0;
        let mut rho = x.hypot(y);

        // On one of the poles
        if rho == 0. {
            return Ok((self.lambda0, FRAC_PI_2.copysign(self.n)));
        }

        // Standard parallel on the southern hemisphere?
        if self.n < 0. {
            rho = -rho;
            x = -x;
            y = -y;
        }

        let ts0 = (rho / self.c).powf(1. / self.n);
        let lat = ancillary::phi2(ts0, self.e);
        if !lat.is_finite() {
            return Err(Error::Convergence {
                solver: "lambert conformal conic inverse",
                iterations: 5,
            });
        }
        let lon = angular::normalize_symmetric(x.atan2(y) / self.n + self.lambda0);
        Ok((lon, lat))
    }
}

// ----- T E S T S ---------------------------------------------------------------------
