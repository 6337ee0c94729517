/// The Gudermannian function (often written as gd), is the work horse for computations involving
/// the isometric latitude (i.e. the vertical coordinate of the Mercator projection)
pub mod gudermannian {
    pub fn fwd(arg: f64) -> f64 {
        arg.sinh().atan()
    }

    pub fn inv(arg: f64) -> f64 {
        arg.tan().asinh()
    }
}

/// ts is the exponential of the negated isometric latitude, exp(-𝜓),
/// as defined in [Snyder (1987)](crate::Bibliography::Sny87), Eq. (7-10),
/// but evaluated in a numerically more stable way than the naive
/// `ellps.isometric_latitude(...).exp()`.
///
/// Inputs:
///   (sin 𝜙, cos 𝜙): trigs of geographic latitude
///   e: eccentricity of the ellipsoid
/// Output:
///   ts: exp(-𝜓)  =  1 / (tan 𝜒 + sec 𝜒)
///   where 𝜒 is the conformal latitude
pub fn ts(sincos: (f64, f64), e: f64) -> f64 {
    // exp(-asinh(tan 𝜙))
    //    = cos 𝜙 / (1 + sin 𝜙)  good for 𝜙 > 0
    //    = (1 - sin 𝜙) / cos 𝜙  good for 𝜙 < 0
    let factor = if sincos.0 > 0. {
        sincos.1 / (1. + sincos.0)
    } else {
        (1. - sincos.0) / sincos.1
    };
    (e * (e * sincos.0).atanh()).exp() * factor
}

/// Snyder (1987) eq. 14-15: The scale factor along a parallel,
/// multiplied by cos 𝜙
pub fn msfn(sincos: (f64, f64), es: f64) -> f64 {
    sincos.1 / (1. - sincos.0 * sincos.0 * es).sqrt()
}

/// The geographic latitude corresponding to a given value of `ts`,
/// i.e. the inverse of [`ts`]. NaN if the underlying Newton iteration
/// fails to converge.
pub fn phi2(ts0: f64, e: f64) -> f64 {
    sinhpsi_to_tanphi((1. / ts0 - ts0) / 2., e).atan()
}

/// Ancillary function for computing the inverse isometric latitude. Follows
/// [Karney, 2011](crate::Bibliography::Kar11): Given taup = sinh 𝜓 = tan 𝜒,
/// find tau = tan 𝜙 by Newton iteration.
pub fn sinhpsi_to_tanphi(taup: f64, e: f64) -> f64 {
    // min iterations = 1, max iterations = 2; mean = 1.954
    const MAX_ITER: usize = 5;

    let rooteps: f64 = f64::EPSILON.sqrt();
    let tol: f64 = rooteps / 10.; // the criterion for Newton's method
    let tmax: f64 = 2. / rooteps; // threshold for large arg limit exact

    let e2m = 1. - e * e;
    let stol = tol * taup.abs().max(1.0);

    // The initial guess.  70 corresponds to chi = 89.18 deg
    let mut tau = if taup.abs() > 70. {
        taup * (e * e.atanh()).exp()
    } else {
        taup / e2m
    };

    // Handle +/-inf, nan, and e = 1
    if (tau.abs() >= tmax) || tau.is_nan() {
        return tau;
    }

    for _ in 0..MAX_ITER {
        let tau1 = (1. + tau * tau).sqrt();
        let sig = (e * (e * tau / tau1).atanh()).sinh();
        let taupa = (1. + sig * sig).sqrt() * tau - sig * tau1;
        let dtau =
            (taup - taupa) * (1. + e2m * (tau * tau)) / (e2m * tau1 * (1. + taupa * taupa).sqrt());
        tau += dtau;

        if (dtau.abs() < stol) || tau.is_nan() {
            return tau;
        }
    }
    f64::NAN
}

/// The forward counterpart of [`sinhpsi_to_tanphi`]: Given tau = tan 𝜙,
/// compute taup = tan 𝜒, where 𝜒 is the conformal latitude.
pub fn tanphi_to_sinhpsi(tau: f64, e: f64) -> f64 {
    let tau1 = tau.hypot(1.);
    let sig = (e * (e * tau / tau1).atanh()).sinh();
    sig.hypot(1.) * tau - sig * tau1
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // GRS80
    const E: f64 = 0.081_819_191_042_815_79;

    #[test]
    fn gudermannian() {
        let x = 0.7_f64;
        assert!((gudermannian::inv(gudermannian::fwd(x)) - x).abs() < 1e-15);
        assert!((gudermannian::fwd(0.)).abs() < 1e-15);
    }

    #[test]
    fn conformal_roundtrip() {
        for lat in [-89.9_f64, -60., -1., 0., 12., 55., 89.9] {
            let tau = lat.to_radians().tan();
            let taup = tanphi_to_sinhpsi(tau, E);
            // The conformal latitude is numerically smaller than the geographic
            if lat != 0. {
                assert!(taup.abs() < tau.abs());
            }
            assert!((sinhpsi_to_tanphi(taup, E) - tau).abs() < 1e-12 * tau.abs().max(1.));
        }
    }

    #[test]
    fn ts_and_phi2() {
        for lat in [-80_f64, -33., 0.5, 45., 80.] {
            let phi = lat.to_radians();
            let t = ts(phi.sin_cos(), E);
            assert!((phi2(t, E) - phi).abs() < 1e-12);
        }
        // The spherical case reduces to cos 𝜙 / (1 + sin 𝜙)
        let phi = 1_f64;
        assert!((ts(phi.sin_cos(), 0.) - phi.cos() / (1. + phi.sin())).abs() < 1e-15);
        assert!((msfn(phi.sin_cos(), 0.) - phi.cos()).abs() < 1e-15);
    }
}
