//! Locating a target from lines of sight.
//!
//! A [`Sighting`] is a line through an observer's geocentric position,
//! pointing at the target. Two sightings rarely intersect exactly, so
//! [`triangulate`] takes the weighted midpoint of their mutually closest
//! points, and [`localize`] takes the weighted barycentre of all the
//! pairwise triangulations.
//!
//! Positions carry per axis uncertainties. In a barycentre, an axis value
//! is weighted by how much better its uncertainty is than the worst one
//! on that axis.
use crate::authoring::*;

/// A geocentric position with per axis uncertainties, in metres
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Estimate {
    pub position: Geocentric,
    pub uncertainty: [f64; 3],
}

/// A line of sight: An observer position, and a direction towards
/// the target. The direction need not be normalized.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Sighting {
    pub origin: Estimate,
    pub direction: Geocentric,
}

impl Estimate {
    #[must_use]
    pub fn new(position: Geocentric, uncertainty: [f64; 3]) -> Estimate {
        Estimate {
            position,
            uncertainty,
        }
    }
}

impl Sighting {
    #[must_use]
    pub fn new(origin: Estimate, direction: Geocentric) -> Sighting {
        Sighting { origin, direction }
    }

    /// A sighting from `station`, along the `azimuth` (clockwise from
    /// north) and `elevation` (above the local horizon), both in radians.
    #[must_use]
    pub fn from_station(
        ellps: &Ellipsoid,
        station: &Geodetic,
        azimuth: f64,
        elevation: f64,
        uncertainty: [f64; 3],
    ) -> Sighting {
        let (sa, ca) = azimuth.sin_cos();
        let (se, ce) = elevation.sin_cos();
        let direction = ned_to_ecef(station, [ce * ca, ce * sa, -se]);
        let origin = Estimate::new(ellps.cartesian(station), uncertainty);
        Sighting { origin, direction }
    }
}

/// The rotation taking local north-east-down vectors at `at` to geocentric
/// vectors. Its columns are the north, east, and down unit vectors of the
/// ellipsoidal normal frame, so the transpose is the inverse rotation.
#[must_use]
pub fn ned_rotation(at: &Geodetic) -> [[f64; 3]; 3] {
    let (sl, cl) = at.longitude.sin_cos();
    let (sp, cp) = at.latitude.sin_cos();
    [
        [-sp * cl, -sl, -cp * cl],
        [-sp * sl, cl, -cp * sl],
        [cp, 0., -sp],
    ]
}

/// Rotate the local vector `ned` at `at` into the geocentric frame
#[must_use]
pub fn ned_to_ecef(at: &Geodetic, ned: [f64; 3]) -> Geocentric {
    let r = ned_rotation(at);
    let row = |i: usize| r[i][0] * ned[0] + r[i][1] * ned[1] + r[i][2] * ned[2];
    Geocentric::new(row(0), row(1), row(2))
}

/// Rotate the geocentric vector `v` into the local north-east-down frame at `at`
#[must_use]
pub fn ecef_to_ned(at: &Geodetic, v: &Geocentric) -> [f64; 3] {
    let r = ned_rotation(at);
    let col = |j: usize| r[0][j] * v.x + r[1][j] * v.y + r[2][j] * v.z;
    [col(0), col(1), col(2)]
}

/// The weighted barycentre of `estimates`. The uncertainty of the result
/// is the mean of the input uncertainties.
pub fn barycentre(estimates: &[Estimate]) -> Result<Estimate, Error> {
    if estimates.is_empty() {
        return Err(Error::BadParam(
            "barycentre".to_string(),
            "no estimates given".to_string(),
        ));
    }
    let n = estimates.len() as f64;
    let mut centre = [0.; 3];
    let mut uncertainty = [0.; 3];

    for axis in 0..3 {
        let d = |e: &Estimate| e.uncertainty[axis];
        let value = |e: &Estimate| match axis {
            0 => e.position.x,
            1 => e.position.y,
            _ => e.position.z,
        };

        let max = estimates.iter().map(d).fold(0., f64::max);
        let max = if max == 0. { 1. } else { max };
        let min = estimates.iter().map(d).fold(f64::INFINITY, f64::min) / max;

        let mut sum = 0.;
        let mut weights = 0.;
        for e in estimates {
            let k = min + 1. - d(e) / max;
            sum += value(e) * k;
            weights += k;
        }
        centre[axis] = sum / weights;
        uncertainty[axis] = estimates.iter().map(d).sum::<f64>() / n;
    }

    Ok(Estimate::new(
        Geocentric::new(centre[0], centre[1], centre[2]),
        uncertainty,
    ))
}

/// The weighted midpoint of the mutually closest points of two lines of
/// sight. Fails with [`Error::Singularity`] for parallel lines.
pub fn triangulate(a: &Sighting, b: &Sighting) -> Result<Estimate, Error> {
    let (nu, nv) = (a.direction.norm(), b.direction.norm());
    if !(nu > 0. && nv > 0.) {
        return Err(Error::BadParam(
            "triangulate".to_string(),
            "direction must be a finite, non-zero vector".to_string(),
        ));
    }
    let u = a.direction.scale(1. / nu);
    let v = b.direction.scale(1. / nv);

    let c = a.origin.position - b.origin.position;
    let (cu, cv) = (c.dot(&u), c.dot(&v));
    let alpha = u.dot(&v);
    let denominator = 1. - alpha * alpha;
    if denominator < 1e-12 {
        return Err(Error::Singularity("triangulate"));
    }

    // Parameters of the closest points along each line
    let s = (alpha * cv - cu) / denominator;
    let t = (cv - alpha * cu) / denominator;
    let on_a = Estimate::new(a.origin.position + u.scale(s), a.origin.uncertainty);
    let on_b = Estimate::new(b.origin.position + v.scale(t), b.origin.uncertainty);
    trace!("triangulate: gap {:.3} m", on_a.position.hypot3(&on_b.position));

    barycentre(&[on_a, on_b])
}

/// Triangulate every pair of `sightings`, and return the barycentre of
/// the results. At least two sightings are needed.
pub fn localize(sightings: &[Sighting]) -> Result<Estimate, Error> {
    if sightings.len() < 2 {
        return Err(Error::BadParam(
            "localize".to_string(),
            format!("need at least 2 sightings, got {}", sightings.len()),
        ));
    }
    let mut fixes = Vec::with_capacity(sightings.len() * (sightings.len() - 1) / 2);
    for (i, a) in sightings.iter().enumerate() {
        for b in &sightings[i + 1..] {
            fixes.push(triangulate(a, b)?);
        }
    }
    debug!("localize: {} fixes from {} sightings", fixes.len(), sightings.len());
    barycentre(&fixes)
}

// ----- T E S T S ---------------------------------------------------------------------
