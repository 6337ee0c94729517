use super::*;

// Convergence criterion and iteration cap for the geocentric-to-geodetic recovery
const LATITUDE_TOLERANCE: f64 = 1e-11;
const MAX_ITERATIONS: usize = 10;

impl Ellipsoid {
    // ----- Cartesian <--> Geographic conversion ----------------------------------

    /// Geographic to cartesian conversion.
    ///
    /// Follows the the derivation given by
    /// Bowring ([1976](crate::Bibliography::Bow76) and
    /// [1985](crate::Bibliography::Bow85))
    #[must_use]
    #[allow(non_snake_case)] // make it possible to mimic math notation from original paper
    pub fn cartesian(&self, geodetic: &Geodetic) -> Geocentric {
        let lam = geodetic.longitude;
        let phi = geodetic.latitude;
        let h = geodetic.altitude;

        let N = self.prime_vertical_radius_of_curvature(phi);
        let (sinphi, cosphi) = phi.sin_cos();
        let (sinlam, coslam) = lam.sin_cos();

        let X = (N + h) * cosphi * coslam;
        let Y = (N + h) * cosphi * sinlam;
        let Z = (N * (1.0 - self.eccentricity_squared()) + h) * sinphi;

        Geocentric::new(X, Y, Z)
    }

    /// Cartesian to geodetic conversion.
    ///
    /// Iterates Bowring's ([1976](crate::Bibliography::Bow76)) update of the
    /// reduced latitude until the geographic latitude changes by less than
    /// 1e-11 radians. For points anywhere near the surface of the Earth,
    /// that takes one or two iterations. Fails with [`Error::Convergence`]
    /// after 10 iterations, which in practice means non-finite input.
    #[allow(non_snake_case)] // make it possible to mimic math notation from original paper
    pub fn geodetic(&self, geocentric: &Geocentric) -> Result<Geodetic, Error> {
        let X = geocentric.x;
        let Y = geocentric.y;
        let Z = geocentric.z;

        // We need a few additional ellipsoidal parameters
        let a = self.a;
        let b = self.b;
        let eps = self.second_eccentricity_squared();
        let es = self.eccentricity_squared();

        // The longitude is straightforward
        let lam = Y.atan2(X);

        // The perpendicular distance from the point coordinate to the Z-axis
        // (HM eq. 5-28)
        let p = X.hypot(Y);

        // For p < 1 picometer, we simplify things to avoid numerical havoc.
        if p < 1.0e-12 {
            // The sign of Z determines the hemisphere
            let phi = FRAC_PI_2.copysign(Z);
            // We have forced phi to one of the poles, so the height is |Z| - b
            let h = Z.abs() - b;
            return Ok(Geodetic::raw(lam, phi, h));
        }

        // Initial guess for the reduced latitude, 𝛽
        let mut beta = Z.atan2(p * (1. - self.f));
        let mut phi = f64::NAN;

        for i in 1..=MAX_ITERATIONS {
            let (sinbeta, cosbeta) = beta.sin_cos();
            let phi_num = Z + eps * b * sinbeta.powi(3);
            let phi_denom = p - es * a * cosbeta.powi(3);
            let next = phi_num.atan2(phi_denom);

            if (next - phi).abs() < LATITUDE_TOLERANCE {
                trace!("geocentric recovery converged after {i} iterations");
                let (sinphi, cosphi) = next.sin_cos();
                let N = a / (1.0 - sinphi.powi(2) * es).sqrt();

                // Bowring (1985), as quoted by Burtch (2006), suggests this expression
                // as more accurate than the commonly used h = p / cosphi - N;
                let h = p * cosphi + Z * sinphi - a * a / N;
                return Ok(Geodetic::raw(lam, next, h));
            }

            phi = next;
            beta = ((1. - self.f) * phi.sin()).atan2(phi.cos());
        }

        warn!("geocentric recovery: no convergence for {geocentric}");
        Err(Error::Convergence {
            solver: "geocentric to geodetic",
            iterations: MAX_ITERATIONS,
        })
    }
}

// ----- Tests ---------------------------------------------------------------------
