use super::*;

// ----- Latitudes -------------------------------------------------------------
impl Ellipsoid {
    /// Geographic latitude, 𝜙 to geocentric latitude, 𝜃.
    #[must_use]
    pub fn latitude_geographic_to_geocentric(&self, geographic: f64) -> f64 {
        ((1.0 - self.eccentricity_squared()) * geographic.tan()).atan()
    }

    /// Geocentric latitude, 𝜃 to geographic latitude, 𝜙.
    #[must_use]
    pub fn latitude_geocentric_to_geographic(&self, latitude: f64) -> f64 {
        (latitude.tan() / (1.0 - self.eccentricity_squared())).atan()
    }

    /// Geographic latitude to reduced latitude, 𝛽, the latitude on the
    /// auxiliary sphere used by the Vincenty solvers
    /// (or vice versa if `direction` is `Inv`).
    #[must_use]
    pub fn reduced_latitude(&self, latitude: f64, direction: Direction) -> f64 {
        if direction == Fwd {
            return ((1. - self.f) * latitude.tan()).atan();
        }
        (latitude.tan() / (1. - self.f)).atan()
    }

    /// Geographic latitude to isometric latitude, 𝜓
    /// (or vice versa if `direction` is `Inv`).
    #[must_use]
    pub fn isometric_latitude(&self, latitude: f64, direction: Direction) -> f64 {
        let e = self.eccentricity();
        if direction == Fwd {
            return ancillary::gudermannian::inv(latitude) - (e * latitude.sin()).atanh() * e;
        }
        ancillary::sinhpsi_to_tanphi(latitude.sinh(), e).atan()
    }
}

// ----- Tests ---------------------------------------------------------------------
