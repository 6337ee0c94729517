use super::*;
use std::fmt;

// Convergence criterion and iteration cap, shared by the direct and the inverse solver
const TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 20;

/// The solution of the inverse geodetic problem: The length of the geodesic
/// between two points, and its bearings at the two ends.
///
/// Bearings are in radians, clockwise from north, normalized to [0, 2π).
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Distance {
    pub distance: f64,
    pub initial_bearing: f64,
    pub final_bearing: f64,
}

/// The solution of the direct geodetic problem: The point reached, and the
/// bearing of the geodesic when arriving there (radians, [0, 2π)).
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Destination {
    pub coordinate: Geodetic,
    pub bearing: f64,
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} km, initial bearing {:.9}°, final bearing {:.9}°",
            self.distance / 1000.,
            self.initial_bearing.to_degrees(),
            self.final_bearing.to_degrees()
        )
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, bearing {:.9}°",
            self.coordinate,
            self.bearing.to_degrees()
        )
    }
}

// A and B according to Vincenty's update (1976)
#[allow(non_snake_case)]
fn vincenty_a_b(cos2_alpha: f64, second_eccentricity_squared: f64) -> (f64, f64) {
    let us = cos2_alpha * second_eccentricity_squared;
    let t = (1. + us).sqrt();
    let k1 = (t - 1.) / (t + 1.);
    let A = (1. + k1 * k1 / 4.) / (1. - k1);
    let B = k1 * (1. - 3. * k1 * k1 / 8.);
    (A, B)
}

// Δσ: The difference between the distance on the auxiliary sphere and on the ellipsoid
#[allow(non_snake_case)]
fn delta_sigma(B: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let c2 = cos_2sigma_m * cos_2sigma_m;
    let t1 = -1. + 2. * c2;
    let t2 = -3. + 4. * sin_sigma * sin_sigma;
    let t3 = -3. + 4. * c2;
    B * sin_sigma * (cos_2sigma_m + B / 4. * (cos_sigma * t1 - B / 6. * cos_2sigma_m * t2 * t3))
}

// ----- Geodesics -------------------------------------------------------------
impl Ellipsoid {
    /// For general geodesics, we use the algorithm by Vincenty
    /// ([1975](crate::Bibliography::Vin75)), with updates by the same author
    /// ([1976](crate::Bibliography::Vin76)).
    /// The Vincenty algorithm is relatively simple to implement, but for near-antipodal
    /// cases, it suffers from lack of convergence: When the longitude on the auxiliary
    /// sphere has not settled to within 1e-12 radians after 20 iterations, we give up
    /// and return [`Error::Convergence`]. Falling back to a spherical approximation,
    /// or to Karney's ([2013](crate::Bibliography::Kar13)) algorithm, is up to the caller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// // Compute the distance between Copenhagen and Paris
    /// use geogrid::prelude::*;
    /// let ellps = Ellipsoid::named("GRS80")?;
    /// let p0 = Geodetic::geo(55., 12., 0.);
    /// let p1 = Geodetic::geo(49., 2., 0.);
    /// let d = ellps.distance(&p0, &p1)?;
    /// assert!((d.distance - 956_066.231_959).abs() < 1e-5);
    /// # Ok::<(), geogrid::Error>(())
    /// ```
    #[allow(non_snake_case)] // allow math-like notation
    pub fn distance(&self, start: &Geodetic, stop: &Geodetic) -> Result<Distance, Error> {
        let B1 = start.latitude;
        let B2 = stop.latitude;
        let L = angular::normalize_symmetric(stop.longitude - start.longitude);

        // Coincident points: No geodesic, hence no bearings
        if L.hypot(B2 - B1) < 1e-15 {
            return Ok(Distance::default());
        }

        let U1 = self.reduced_latitude(B1, Fwd);
        let U2 = self.reduced_latitude(B2, Fwd);
        let (U1sin, U1cos) = U1.sin_cos();
        let (U2sin, U2cos) = U2.sin_cos();

        // Initial estimate for λ, the longitude on the auxiliary sphere
        let mut ll = L;

        let mut aacos2 = 0.;
        let mut ssmx2cos = 0.;
        let mut sscos = 0.;
        let mut sssin = 0.;
        let mut ss = 0.;
        let mut converged = false;

        for i in 1..=MAX_ITERATIONS {
            // σ, the angular separation between the points
            let (llsin, llcos) = ll.sin_cos();
            let t1 = U2cos * llsin;
            let t2 = U1cos * U2sin - U2cos * U1sin * llcos;
            sssin = t1.hypot(t2);
            sscos = U1sin * U2sin + U1cos * U2cos * llcos;

            // Vanishing separation on the auxiliary sphere: Either the same
            // point (e.g. the pole, given with two different longitudes), or
            // exactly antipodal, where the geodesic is undetermined
            if sssin == 0. {
                if sscos > 0. {
                    return Ok(Distance::default());
                }
                break;
            }
            ss = sssin.atan2(sscos);

            // α, the forward azimuth of the geodesic at equator
            let aasin = U1cos * U2cos * llsin / sssin;
            aacos2 = 1. - aasin * aasin;

            // cosine of 2 times σ_m, the angular separation from the midpoint to the equator.
            // Equatorial lines have cos²α = 0, and the term vanishes
            ssmx2cos = if aacos2 == 0. {
                0.
            } else {
                sscos - 2. * U1sin * U2sin / aacos2
            };
            let C = (4. + self.f * (4. - 3. * aacos2)) * self.f * aacos2 / 16.;
            let ll_next = L
                + (1. - C)
                    * self.f
                    * aasin
                    * (ss + C * sssin * (ssmx2cos + C * sscos * (-1. + 2. * ssmx2cos * ssmx2cos)));
            let dl = (ll - ll_next).abs();
            ll = ll_next;
            if dl < TOLERANCE {
                trace!("vincenty inverse converged after {i} iterations");
                converged = true;
                break;
            }
        }

        if !converged {
            warn!("vincenty inverse: no convergence between {start} and {stop}");
            return Err(Error::Convergence {
                solver: "vincenty inverse",
                iterations: MAX_ITERATIONS,
            });
        }

        let (A, B) = vincenty_a_b(aacos2, self.second_eccentricity_squared());
        let dss = delta_sigma(B, sssin, sscos, ssmx2cos);

        // Distance, forward azimuth, return azimuth
        let s = self.b * A * (ss - dss);
        let (llsin, llcos) = ll.sin_cos();
        let a1 = (U2cos * llsin).atan2(U1cos * U2sin - U1sin * U2cos * llcos);
        let a2 = (U1cos * llsin).atan2(-U1sin * U2cos + U1cos * U2sin * llcos);

        Ok(Distance {
            distance: s,
            initial_bearing: angular::normalize_positive(a1),
            final_bearing: angular::normalize_positive(a2),
        })
    }

    /// The direct geodetic problem: Where do we end up, when travelling `distance`
    /// metres along the geodesic leaving `start` at the given `bearing`
    /// (radians, clockwise from north)?
    ///
    /// Vincenty's direct solution, iterating on σ, the angular distance on
    /// the auxiliary sphere. The longitude of the destination is normalized
    /// to (-π, π]. See [`distance`](Ellipsoid::distance) for the
    /// convergence criteria.
    #[allow(non_snake_case)]
    pub fn destination(
        &self,
        start: &Geodetic,
        distance: f64,
        bearing: f64,
    ) -> Result<Destination, Error> {
        if !distance.is_finite() || !bearing.is_finite() {
            return Err(Error::BadParam(
                "distance/bearing".to_string(),
                format!("{distance}/{bearing}"),
            ));
        }

        // Coordinates of the point of origin, P1
        let B1 = start.latitude;
        let L1 = start.longitude;

        // The latitude of P1 projected onto the auxiliary sphere
        let U1 = self.reduced_latitude(B1, Fwd);
        let (U1sin, U1cos) = U1.sin_cos();

        // σ_1, here ss1, is the angular distance on the aux sphere from P1 to equator
        let (azisin, azicos) = bearing.sin_cos();
        let ss1 = U1.tan().atan2(azicos);

        // α, the forward azimuth of the geodesic at equator
        let aasin = U1cos * azisin;
        let aacos2 = 1. - aasin * aasin;

        let (A, B) = vincenty_a_b(aacos2, self.second_eccentricity_squared());

        // Initial estimate for σ
        let b = self.b;
        let mut ss = distance / (b * A);
        let mut converged = false;

        for i in 1..=MAX_ITERATIONS {
            // 2σ_m, where σ_m is the latitude of the midpoint on the aux sphere
            let ssmx2cos = (2. * ss1 + ss).cos();
            let (sssin, sscos) = ss.sin_cos();
            let dss = delta_sigma(B, sssin, sscos, ssmx2cos);

            let prevss = ss;
            ss = distance / (b * A) + dss;

            // Stop criterion: Last update of σ made little difference
            if (prevss - ss).abs() < TOLERANCE {
                trace!("vincenty direct converged after {i} iterations");
                converged = true;
                break;
            }
        }

        if !converged {
            warn!("vincenty direct: no convergence from {start}");
            return Err(Error::Convergence {
                solver: "vincenty direct",
                iterations: MAX_ITERATIONS,
            });
        }

        let ssmx2cos = (2. * ss1 + ss).cos();
        let (sssin, sscos) = ss.sin_cos();

        // B2: Latitude of destination
        let t = U1sin * sssin - U1cos * sscos * azicos;
        let B2 = (U1sin * sscos + U1cos * sssin * azicos).atan2((1. - self.f) * aasin.hypot(t));

        // L2: Longitude of destination
        let ll = (sssin * azisin).atan2(U1cos * sscos - U1sin * sssin * azicos);
        let C = (4. + self.f * (4. - 3. * aacos2)) * self.f * aacos2 / 16.;
        let L = ll
            - (1. - C)
                * self.f
                * aasin
                * (ss + C * sssin * (ssmx2cos + C * sscos * (-1. + 2. * ssmx2cos * ssmx2cos)));
        let L2 = angular::normalize_symmetric(L1 + L);

        // Return azimuth
        let aa2 = aasin.atan2(-t);

        Ok(Destination {
            coordinate: Geodetic::raw(L2, B2, start.altitude),
            bearing: angular::normalize_positive(aa2),
        })
    }
}

// ----- Tests ---------------------------------------------------------------------
