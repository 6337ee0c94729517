//! *Geodetic computations, datum shifts, map projections and tile codes*.
//!
//! Ellipsoids, datums and projected reference systems are plain immutable
//! values, built either directly or from registry records supplied by a
//! [`Provider`]. On top of those, the crate offers
//!
//! - Vincenty's direct and inverse geodesic solutions
//!   ([Vincenty, 1975](crate::Bibliography::Vin75)),
//! - 7-parameter Helmert datum shifts through WGS84,
//! - a small set of parametrized projection families (Mercator,
//!   transverse Mercator, Lambert conformal conic, Hotine oblique Mercator),
//! - the Maidenhead, Geohash, Georef and GARS tile codes,
//! - locating a target from lines of sight, in [`coordinate::sighting`].
//!
//! Internally, angles are in radians and lengths in metres. Degrees appear
//! only at the human facing boundary: The `geo`/`gis` constructors and
//! accessors of [`Geodetic`], and the tile codecs.
//!
//! ```
//! use geogrid::prelude::*;
//!
//! let ellps = Ellipsoid::named("WGS84")?;
//! let dublin = Geodetic::gis(-6.272877, 53.344606, 0.);
//! let london = Geodetic::gis(-0.127005, 51.518602, 0.);
//! let d = ellps.distance(&dublin, &london)?;
//! assert!((d.distance - 464_572.).abs() < 1.);
//! # Ok::<(), geogrid::Error>(())
//! ```

mod bibliography;
pub mod codec;
pub mod coordinate;
pub mod datum;
pub mod ellipsoid;
pub mod math;
pub mod projection;
pub mod provider;
pub mod unit;

pub use bibliography::Bibliography;
pub use codec::Codec;
pub use codec::Tile;
pub use codec::TileCodec;
pub use coordinate::Estimate;
pub use coordinate::Geocentric;
pub use coordinate::Geodetic;
pub use coordinate::Projected;
pub use coordinate::Sighting;
pub use datum::Convention;
pub use datum::Datum;
pub use datum::Helmert;
pub use ellipsoid::Destination;
pub use ellipsoid::Distance;
pub use ellipsoid::Ellipsoid;
pub use projection::Crs;
pub use projection::Family;
pub use projection::Projection;
pub use projection::ProjectionParameters;
pub use provider::Minimal;
pub use provider::Provider;
pub use unit::Unit;

use thiserror::Error;

/// The bread-and-butter, shrink-wrapped and ready to use
pub mod prelude {
    pub use crate::codec::{gars, geohash, georef, maidenhead};
    pub use crate::coordinate::sighting;
    pub use crate::provider::{CrsRecord, DatumRecord, EllipsoidRecord};
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Direction::Inv;
    pub use crate::Error;
    pub use crate::{Estimate, Sighting};
    pub use crate::{Geocentric, Geodetic, Projected};
    pub use crate::{Codec, Tile, TileCodec};
    pub use crate::{Convention, Datum, Helmert};
    pub use crate::{Crs, Family, Projection, ProjectionParameters};
    pub use crate::{Destination, Distance, Ellipsoid};
    pub use crate::{Minimal, Provider};
    pub use crate::Unit;
}

/// Everything the modules of the crate need in order to talk to each other
pub(crate) mod authoring {
    pub use crate::math::{ancillary, angular};
    pub use crate::prelude::*;
    pub use log::{debug, trace, warn};
    pub use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
}

/// Every failure the library can report. None of them are fatal: They are
/// all returned to the caller, who decides whether to retry, fall back to
/// another method, or give up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid ellipsoid: {0}")]
    InvalidEllipsoid(String),

    #[error("invalid datum: {0}")]
    InvalidDatum(String),

    #[error("{solver}: no convergence after {iterations} iterations")]
    Convergence {
        solver: &'static str,
        iterations: usize,
    },

    #[error("singular input for {0}")]
    Singularity(&'static str),

    #[error("{codec}: unsupported precision {digits}")]
    InvalidDigitCount { codec: &'static str, digits: usize },

    #[error("{codec}: malformed input '{input}'")]
    InvalidCodecInput { codec: &'static str, input: String },

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),
}

/// `Fwd`: Indicate that a two-way function, or method, should run in
/// the *forward* direction.
/// `Inv`: Indicate that a two-way function, or method, should run in
/// the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Fwd,
    Inv,
}

// ----- Tests ---------------------------------------------------------------------
