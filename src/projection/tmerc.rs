//! Transverse Mercator, following [Karney (2011)](crate::Bibliography::Kar11),
//! with the series coefficients of Engsager & Poder, extended to 6th order.
//! The series go back to [Krüger (1912)](crate::Bibliography::Kru12).
use super::ProjectionParameters;
use crate::authoring::*;

// Don't wanna play if we're too far from the center meridian
const ETA_MAX: f64 = 2.623395162778;

#[rustfmt::skip]
const FWD: [[f64; 6]; 6] = [
    [1./2.,   -2./3.,   5./16.,   41./180.,   -127./288.0 ,   7891./37800.],
    [0., 13./48.,   -3./5.,   557./1440.,   281./630.,   -1983433./1935360.],
    [0., 0., 61./240.,  -103./140.,   15061./26880.,   167603./181440.],
    [0., 0., 0., 49561./161280.,   -179./168.,   6601661./7257600.],
    [0., 0., 0., 0., 34729./80640.,   -3418889./1995840.],
    [0., 0., 0., 0., 0., 212378941./319334400.]
];

#[rustfmt::skip]
const INV: [[f64; 6]; 6] = [
    [-1./2.,   2./3.,   -37./96.,   1./360.,   81./512.,   -96199./604800.],
    [0., -1./48.,   -1./15.,   437./1440.,   -46./105.,   1118711./3870720.],
    [0., 0., -17./480.,   37./840.,   209./4480.,   -5569./90720.],
    [0., 0., 0., -4397./161280.,   11./504.,   830251./7257600.],
    [0., 0., 0., 0., -4583./161280.,   108847./3991680.],
    [0., 0., 0., 0., 0., -20648693./638668800.]
];

// Evaluate each row as a polynomial in n, without constant term
fn coefficients(n: f64, table: &[[f64; 6]; 6]) -> [f64; 6] {
    table.map(|row| row.iter().rev().fold(0., |acc, c| acc * n + c) * n)
}

// Add the complex series sum_j c_j sin(2j(xi + i eta)) to (xi, eta)
fn complex_sin(xi: f64, eta: f64, c: &[f64; 6]) -> (f64, f64) {
    let mut d = (xi, eta);
    for (j, c) in c.iter().enumerate() {
        let arg = 2. * (j + 1) as f64;
        let (s, cs) = (arg * xi).sin_cos();
        d.0 += c * s * (arg * eta).cosh();
        d.1 += c * cs * (arg * eta).sinh();
    }
    d
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TransverseMercator {
    e: f64,
    // Forward and inverse series coefficients
    alpha: [f64; 6],
    beta: [f64; 6],
    // The scaled rectifying radius, k0 * A
    qs: f64,
    // Rectified value of the latitude of origin
    xi0: f64,
    lambda0: f64,
    x0: f64,
    y0: f64,
}

impl TransverseMercator {
    pub(super) fn new(
        ellps: &Ellipsoid,
        p: &ProjectionParameters,
    ) -> Result<TransverseMercator, Error> {
        if p.phi0.abs() > FRAC_PI_2 {
            return Err(Error::BadParam(
                "transverse mercator".to_string(),
                "|latitude of origin| must not exceed 90°".to_string(),
            ));
        }
        let n = ellps.third_flattening();
        let e = ellps.eccentricity();
        let alpha = coefficients(n, &FWD);
        let beta = coefficients(n, &INV);
        let qs = p.scale() * ellps.semimajor_axis() * ellps.normalized_meridian_arc_unit();

        // Conformal, then rectified, latitude of the origin
        let chi0 = ancillary::tanphi_to_sinhpsi(p.phi0.tan(), e).atan();
        let xi0 = complex_sin(chi0, 0., &alpha).0;

        Ok(TransverseMercator {
            e,
            alpha,
            beta,
            qs,
            xi0,
            lambda0: p.lambda0,
            x0: p.x0,
            y0: p.y0,
        })
    }

    // ----- F O R W A R D -------------------------------------------------------------

    pub(super) fn fwd(&self, lon: f64, lat: f64) -> Result<(f64, f64), Error> {
        let lam = angular::normalize_symmetric(lon - self.lambda0);
        let (sin_lam, cos_lam) = lam.sin_cos();

        // Conformal latitude, as tan 𝜒
        let taup = ancillary::tanphi_to_sinhpsi(lat.tan(), self.e);

        // Gauss-Schreiber transverse Mercator on the conformal sphere
        let xip = taup.atan2(cos_lam);
        let etap = (sin_lam / taup.hypot(cos_lam)).asinh();

        let (xi, eta) = complex_sin(xip, etap, &self.alpha);
        if !(eta.abs() <= ETA_MAX) {
            return Err(Error::Singularity("transverse mercator"));
        }

        Ok((
            self.x0 + self.qs * eta,
            self.y0 + self.qs * (xi - self.xi0),
        ))
    }

    // ----- I N V E R S E -------------------------------------------------------------

    pub(super) fn inv(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let eta = (x - self.x0) / self.qs;
        let xi = (y - self.y0) / self.qs + self.xi0;
        if !(eta.abs() <= ETA_MAX) {
            return Err(Error::Singularity("transverse mercator"));
        }

        let (xip, etap) = complex_sin(xi, eta, &self.beta);
        let (sin_xip, cos_xip) = xip.sin_cos();
        let sinh_etap = etap.sinh();

        let taup = sin_xip / sinh_etap.hypot(cos_xip);
        let lam = sinh_etap.atan2(cos_xip);

        let lat = ancillary::sinhpsi_to_tanphi(taup, self.e).atan();
        if lat.is_nan() {
            return Err(Error::Convergence {
                solver: "transverse mercator inverse",
                iterations: 5,
            });
        }
        Ok((angular::normalize_symmetric(lam + self.lambda0), lat))
    }
}

// ----- T E S T S ---------------------------------------------------------------------
