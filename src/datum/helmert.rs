#![allow(non_snake_case)]
//! The Helmert transform performs reference frame shifts. It operates in the 3D cartesian
//! space, here transforming geocentric coordinates between a local datum and WGS84.
use crate::authoring::*;

/// The two sign conventions for the rotation parameters in use: EPSG method 9606
/// (position vector) and EPSG method 9607 (coordinate frame). Same magnitude,
/// opposite sign.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Convention {
    #[default]
    PositionVector,
    CoordinateFrame,
}

impl Convention {
    /// The convention implied by an EPSG transformation method code
    pub fn from_epsg_method(code: u32) -> Result<Convention, Error> {
        match code {
            9603 | 9606 => Ok(Convention::PositionVector),
            9607 => Ok(Convention::CoordinateFrame),
            _ => Err(Error::NotFound(
                format!("EPSG:{code}"),
                ": not a Helmert method".to_string(),
            )),
        }
    }
}

/// A 7-parameter similarity transform in the EPSG units: Translations in
/// metres, rotations in arc seconds, scale difference in ppm.
///
/// The forward direction takes coordinates *from* the datum the parameters
/// belong to, *to* WGS84.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Helmert {
    translation: [f64; 3],
    rotation: [f64; 3],
    scale: f64,
    convention: Convention,
    exact: bool,
    // Derived
    ROT: [[f64; 3]; 3],
}

impl Default for Helmert {
    fn default() -> Helmert {
        Helmert::identity()
    }
}

impl Helmert {
    /// The full 7 parameter transformation, with parameters in the order of
    /// the EPSG "TOWGS84" clause: dx, dy, dz, rx, ry, rz, ds.
    #[must_use]
    pub fn new(parameters: [f64; 7], convention: Convention) -> Helmert {
        let [dx, dy, dz, rx, ry, rz, ds] = parameters;
        let mut helmert = Helmert {
            translation: [dx, dy, dz],
            rotation: [rx, ry, rz],
            scale: ds,
            convention,
            exact: false,
            ROT: [[0.; 3]; 3],
        };
        helmert.ROT = helmert.rotation_matrix();
        helmert
    }

    /// The 3 parameter, translation only, case
    #[must_use]
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Helmert {
        Helmert::new([dx, dy, dz, 0., 0., 0., 0.], Convention::default())
    }

    /// The identity transformation: All parameters zero
    #[must_use]
    pub fn identity() -> Helmert {
        Helmert::new([0.; 7], Convention::default())
    }

    /// Use the exact rotation matrix, rather than the small-angle approximation
    #[must_use]
    pub fn exact(mut self) -> Helmert {
        self.exact = true;
        self.ROT = self.rotation_matrix();
        self
    }

    /// The parameters, in TOWGS84 order
    #[must_use]
    pub fn parameters(&self) -> [f64; 7] {
        let [dx, dy, dz] = self.translation;
        let [rx, ry, rz] = self.rotation;
        [dx, dy, dz, rx, ry, rz, self.scale]
    }

    #[must_use]
    pub fn convention(&self) -> Convention {
        self.convention
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.parameters() == [0.; 7]
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.parameters().iter().all(|p| p.is_finite())
    }

    fn rotated(&self) -> bool {
        self.rotation != [0., 0., 0.]
    }

    /// Apply the transformation in the given direction. The inverse is
    /// deoffset, unscale, and rotate by the transposed matrix.
    #[must_use]
    pub fn apply(&self, c: &Geocentric, direction: Direction) -> Geocentric {
        let T = self.translation;
        let S = 1.0 + self.scale * 1e-6;
        let ROT = &self.ROT;

        // ----- Forward direction -----

        if direction == Fwd {
            if !self.rotated() {
                return Geocentric::new(S * c.x + T[0], S * c.y + T[1], S * c.z + T[2]);
            }

            // Rotate
            let x = c.x * ROT[0][0] + c.y * ROT[0][1] + c.z * ROT[0][2];
            let y = c.x * ROT[1][0] + c.y * ROT[1][1] + c.z * ROT[1][2];
            let z = c.x * ROT[2][0] + c.y * ROT[2][1] + c.z * ROT[2][2];

            // scale and offset
            return Geocentric::new(S * x + T[0], S * y + T[1], S * z + T[2]);
        }

        // ----- Inverse direction -----

        // Deoffset and unscale
        let x = (c.x - T[0]) / S;
        let y = (c.y - T[1]) / S;
        let z = (c.z - T[2]) / S;

        if !self.rotated() {
            return Geocentric::new(x, y, z);
        }

        // Inverse rotation by transposed multiplication
        Geocentric::new(
            x * ROT[0][0] + y * ROT[1][0] + z * ROT[2][0],
            x * ROT[0][1] + y * ROT[1][1] + z * ROT[2][1],
            x * ROT[0][2] + y * ROT[1][2] + z * ROT[2][2],
        )
    }

    // ----- R O T A T I O N   M A T R I X   B U I L D E R -----------------------------

    // Based on Karsten Engsager's implementation in set_dtm_1.c (trlib),
    // but adds optional small-angle approximation, and selection between
    // the "position vector" and "coordinate frame" rotation conventions.
    //
    // TO' = scale * [ROTZ * ROTY * ROTX] * FROM' + [translation x, y, z]'
    //
    //        | cz sz 0 |           | cy 0 -sy |           | 1   0  0 |
    // ROTZ = |-sz cz 0 |,   ROTY = | 0  1   0 |,   ROTX = | 0  cx sx |
    //        |  0  0 1 |           | sy 0  cy |           | 0 -sx cx |
    //
    fn rotation_matrix(&self) -> [[f64; 3]; 3] {
        let [rx, ry, rz] = self.rotation.map(|r| (r / 3600.).to_radians());

        // Small-angle approximations: sx = sin(rx) = rx,  cx = cos(rx) = 1,  etc.
        let (mut sx, mut sy, mut sz) = (rx, ry, rz);
        let (mut cx, mut cy, mut cz) = (1.0, 1.0, 1.0);

        // Leave out the second order infinitesimals in the rotation
        // matrix elements, when using small-angle approximations
        if self.exact {
            (sx, cx) = rx.sin_cos();
            (sy, cy) = ry.sin_cos();
            (sz, cz) = rz.sin_cos();
        }

        let r11 = cy * cz;
        let mut r12 = cx * sz;
        let mut r13 = -cx * sy * cz;

        let r21 = -cy * sz;
        let mut r22 = cx * cz;
        let mut r23 = sx * cz;

        let r31 = sy;
        let r32 = -sx * cy;
        let r33 = cx * cy;

        // But apply the second order terms in the exact case
        if self.exact {
            r12 += sx * sy * cz;
            r13 += sx * sz;

            r22 -= sx * sy * sz;
            r23 += cx * sy * sz;
        }

        if self.convention == Convention::PositionVector {
            return [[r11, r21, r31], [r12, r22, r32], [r13, r23, r33]];
        }
        [[r11, r12, r13], [r21, r22, r23], [r31, r32, r33]]
    }
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    const GDA94: Geocentric = Geocentric {
        x: -4052051.7643,
        y: 4212836.2017,
        z: -2545106.0245,
    };
    const GDA2020: Geocentric = Geocentric {
        x: -4052052.7379,
        y: 4212835.9897,
        z: -2545104.5898,
    };

    #[test]
    fn translation() -> Result<(), Error> {
        // EPSG:1134 - 3 parameter, ED50/WGS84, s = sqrt(27) m
        let helmert = Helmert::translation(-87., -96., -120.);
        let origin = Geocentric::default();

        let c = helmert.apply(&origin, Fwd);
        assert_eq!(c, Geocentric::new(-87., -96., -120.));

        let c = helmert.apply(&c, Inv);
        assert_eq!(c, origin);
        Ok(())
    }

    // Test case from "Intergovernmental Committee on Surveying and Mapping (ICSM)
    // Permanent Committee on Geodesy (PCG)": Geocentric Datum of Australia 2020,
    // Technical Manual Version 1.0, 25 July 2017.
    // Transformation from GDA94 to GDA2020.
    #[test]
    fn translation_rotation_and_scale() -> Result<(), Error> {
        let helmert = Helmert::new(
            [
                0.06155, -0.01087, -0.04019, -0.0394924, -0.0327221, -0.0328979, -0.009994,
            ],
            Convention::CoordinateFrame,
        )
        .exact();

        // The forward transformation should hit closer than 75 um
        let c = helmert.apply(&GDA94, Fwd);
        assert!(GDA2020.hypot3(&c) < 75e-6);

        // ... and an even better roundtrip
        let c = helmert.apply(&c, Inv);
        assert!(GDA94.hypot3(&c) < 75e-7);

        // The small-angle approximation is indistinguishable at this level
        let approx = Helmert::new(helmert.parameters(), Convention::CoordinateFrame);
        assert!(GDA2020.hypot3(&approx.apply(&GDA94, Fwd)) < 75e-6);
        Ok(())
    }

    #[test]
    fn conventions() -> Result<(), Error> {
        let rotation = [0., 0., 0., 1., 2., 3., 0.];
        let pv = Helmert::new(rotation, Convention::PositionVector);
        let cf = Helmert::new(rotation, Convention::CoordinateFrame);

        // Opposite conventions rotate in opposite directions
        let p = Geocentric::new(3_500_000., 700_000., 5_200_000.);
        let a = pv.apply(&p, Fwd);
        let b = cf.apply(&p, Fwd);
        let midpoint = Geocentric::new((a.x + b.x) / 2., (a.y + b.y) / 2., (a.z + b.z) / 2.);
        assert!(midpoint.hypot3(&p) < 1e-3);
        assert!(a.hypot3(&p) > 50.);

        // ...hence the inverse in one convention is the forward in the other,
        // to within the second order terms
        assert!(pv.apply(&p, Inv).hypot3(&b) < 1e-3);

        assert_eq!(
            Convention::from_epsg_method(9607)?,
            Convention::CoordinateFrame
        );
        assert!(Convention::from_epsg_method(9999).is_err());
        Ok(())
    }

    #[test]
    fn identity() {
        let helmert = Helmert::identity();
        assert!(helmert.is_identity());
        assert!(helmert.is_finite());
        let p = Geocentric::new(1., 2., 3.);
        assert_eq!(helmert.apply(&p, Fwd), p);
        assert_eq!(helmert.apply(&p, Inv), p);

        let broken = Helmert::translation(f64::NAN, 0., 0.);
        assert!(!broken.is_finite());
    }
}
