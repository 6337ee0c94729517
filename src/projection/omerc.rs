#![allow(non_snake_case)]
//! Hotine Oblique Mercator, variants A and B.
//! Following [IOGP (2019)](crate::Bibliography::Iogp19), section 3.2.4
use super::{ProjectionParameters, EPS10};
use crate::authoring::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ObliqueMercator {
    e: f64,
    es: f64,
    A: f64,
    B: f64,
    H: f64,
    // Longitude of the natural origin
    lambda_0: f64,
    // sin/cos of the azimuth of the initial line at the natural origin
    s0: f64,
    c0: f64,
    // sin/cos of the rectified grid angle
    sc: f64,
    cc: f64,
    // Offset from the natural origin to the projection centre, along
    // the initial line. Zero for variant A.
    offset: f64,
    FE: f64,
    FN: f64,
}

impl ObliqueMercator {
    /// `centred` selects variant B: False easting and northing
    /// at the projection centre, rather than at the natural origin
    pub(super) fn new(
        ellps: &Ellipsoid,
        p: &ProjectionParameters,
        centred: bool,
    ) -> Result<ObliqueMercator, Error> {
        let latc = p.phi0;
        let lonc = p.lambda0;
        let alpha = p.azimut;
        if latc.abs() >= FRAC_PI_2 - EPS10 {
            return Err(Error::BadParam(
                "oblique mercator".to_string(),
                "the projection centre must not be at a pole".to_string(),
            ));
        }
        let gamma_c = p.gamma.unwrap_or(alpha);

        let es = ellps.eccentricity_squared();
        let e = es.sqrt();
        let kc = p.scale();

        // A horrible mess of constants. But by-and-large, just a transcription of
        // the material from Guidance Note 7-2.
        let (s, c) = latc.sin_cos();
        let B = (1_f64 + c.powi(4) * ellps.second_eccentricity_squared()).sqrt();
        let A = ellps.semimajor_axis() * B * kc * (1_f64 - es).sqrt() / (1.0 - es * s * s);
        let t0 = (FRAC_PI_4 - latc / 2.0).tan() / ((1.0 - e * s) / (1.0 + e * s)).powf(e / 2.0);
        let D = B * (1.0 - es).sqrt() / (c * (1.0 - es * s * s).sqrt());
        let DD = if D < 1.0 { 0.0 } else { (D * D - 1.0).sqrt() };
        let F = D + DD * latc.signum();
        let H = F * t0.powf(B);
        let G = (F - 1.0 / F) / 2.0;
        let gamma_0 = (alpha.sin() / D).asin();
        // asin(G tan γ0), using G² = D² - 1. Stays accurate at azimuth ±90°
        let lambda_0 = lonc - (G * alpha.sin()).atan2(D * alpha.cos().abs()) / B;
        if !(lambda_0.is_finite() && gamma_0.is_finite()) {
            return Err(Error::BadParam(
                "oblique mercator".to_string(),
                format!("no initial line with azimuth {}°", alpha.to_degrees()),
            ));
        }

        // (uc, vc): Intermediate coordinates of the projection center, vc = 0
        let uc = (A / B) * (DD / alpha.cos()).atan().abs();
        let offset = if centred { uc.copysign(latc) } else { 0.0 };

        let (s0, c0) = gamma_0.sin_cos();
        let (sc, cc) = gamma_c.sin_cos();

        Ok(ObliqueMercator {
            e,
            es,
            A,
            B,
            H,
            lambda_0,
            s0,
            c0,
            sc,
            cc,
            offset,
            FE: p.x0,
            FN: p.y0,
        })
    }

    // ----- F O R W A R D -------------------------------------------------------------

    pub(super) fn fwd(&self, lon: f64, lat: f64) -> Result<(f64, f64), Error> {
        let (A, B, e) = (self.A, self.B, self.e);
        if FRAC_PI_2 - lat.abs() < EPS10 {
            return Err(Error::Singularity("oblique mercator"));
        }
        let lon = self.lambda_0 + angular::normalize_symmetric(lon - self.lambda_0);
        let slat = lat.sin();

        let t = (FRAC_PI_4 - lat / 2.0).tan() / ((1.0 - e * slat) / (1.0 + e * slat)).powf(e / 2.0);
        let Q = self.H / t.powf(B);
        let S = (Q - 1.0 / Q) / 2.0;
        let T = (Q + 1.0 / Q) / 2.0;
        let V = (B * (lon - self.lambda_0)).sin();
        let U = (S * self.s0 - V * self.c0) / T;
        if (1.0 - U.abs()).abs() < EPS10 {
            return Err(Error::Singularity("oblique mercator"));
        }
        let v = A * ((1.0 - U) / (1.0 + U)).ln() / (2.0 * B);
        let cblon = (B * (lon - self.lambda_0)).cos();

        let u = A * (S * self.c0 + V * self.s0).atan2(cblon) / B - self.offset;

        let x = v * self.cc + u * self.sc + self.FE;
        let y = u * self.cc - v * self.sc + self.FN;
        Ok((x, y))
    }

    // ----- I N V E R S E -------------------------------------------------------------

    pub(super) fn inv(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let (A, B, es) = (self.A, self.B, self.es);
        let (E, N) = (x - self.FE, y - self.FN);

        let v = E * self.cc - N * self.sc;
        let u = N * self.cc + E * self.sc + self.offset;

        let Q = (-B * v / A).exp();
        let S = (Q - 1.0 / Q) / 2.0;
        let T = (Q + 1.0 / Q) / 2.0;
        let V = (B * u / A).sin();
        let U = (V * self.c0 + S * self.s0) / T;
        if (1.0 - U.abs()).abs() < EPS10 {
            return Ok((self.lambda_0, FRAC_PI_2.copysign(U)));
        }
        let t = (self.H / ((1.0 + U) / (1.0 - U)).sqrt()).powf(1.0 / B);

        // The conformal latitude
        let chi = FRAC_PI_2 - 2.0 * t.atan();

        // Fourier coefficients (the outer factor of *es* moved to the summation step)
        let f = [
            (1.0 / 2.0 + es * (5.0 / 24.0 + es * (1.0 / 12.0 + es * 13.0 / 360.0))),
            es * (7.0 / 48.0 + es * (29.0 / 240.0 + es * 811.0 / 11520.0)),
            es * es * (7.0 / 120.0 + es * 81.0 / 1120.0),
            es * es * es * 4279.0 / 161280.0,
        ];

        // Fourier sine components
        let s = [
            (2.0 * chi).sin(),
            (4.0 * chi).sin(),
            (6.0 * chi).sin(),
            (8.0 * chi).sin(),
        ];

        let lat = chi + es * (f[0] * s[0] + f[1] * s[1] + f[2] * s[2] + f[3] * s[3]);
        let lon = self.lambda_0 - (S * self.c0 - V * self.s0).atan2((B * u / A).cos()) / B;
        Ok((angular::normalize_symmetric(lon), lat))
    }
}

// ----- T E S T S ---------------------------------------------------------------------
