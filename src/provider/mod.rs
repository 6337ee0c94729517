//! Dataset providers: Where ellipsoids, datums and projected reference
//! systems come from.
//!
//! A provider hands out immutable *records*, looked up by their integer
//! registry (EPSG) code. The provided methods of the [`Provider`] trait
//! turn the records into the models of the crate, so an implementation
//! only needs to know how to find the records.
use crate::authoring::*;

mod minimal;
pub use minimal::Minimal;

/// The defining parameters of an ellipsoid: The semimajor axis, and
/// either the inverse flattening or the semiminor axis (the inverse
/// flattening takes precedence if both are given).
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsoidRecord {
    pub code: u32,
    pub name: String,
    pub semimajor_axis: f64,
    pub inverse_flattening: Option<f64>,
    pub semiminor_axis: Option<f64>,
}

impl EllipsoidRecord {
    pub fn to_ellipsoid(&self) -> Result<Ellipsoid, Error> {
        match (self.inverse_flattening, self.semiminor_axis) {
            (Some(rf), _) => Ellipsoid::from_inverse_flattening(self.semimajor_axis, rf),
            (None, Some(b)) => Ellipsoid::from_axes(self.semimajor_axis, b),
            (None, None) => Err(Error::InvalidEllipsoid(format!(
                "EPSG:{} ({}) has neither inverse flattening nor semiminor axis",
                self.code, self.name
            ))),
        }
    }
}

/// A geodetic datum: The code of its ellipsoid, the longitude of its
/// prime meridian (degrees east of Greenwich), and its shift to WGS84.
///
/// The shift parameters are in the EPSG order and units: dx, dy, dz
/// (metres), rx, ry, rz (arc seconds), ds (ppm). A datum coinciding with
/// WGS84 has all zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct DatumRecord {
    pub code: u32,
    pub name: String,
    pub ellipsoid: u32,
    pub prime_meridian: f64,
    pub towgs84: [f64; 7],
    pub convention: Convention,
}

/// A projected reference system: The code of its datum, the EPSG code of
/// its projection method, the (EPSG parameter code, value) pairs of the
/// method, and the ratio of its linear unit to the metre.
///
/// Angular parameter values are in degrees, linear ones in the unit of
/// the system.
#[derive(Debug, Clone, PartialEq)]
pub struct CrsRecord {
    pub code: u32,
    pub name: String,
    pub datum: u32,
    pub method: u32,
    pub parameters: Vec<(u32, f64)>,
    pub unit_ratio: f64,
}

/// The source of ellipsoid, datum and CRS records.
///
/// Implementations must fail with [`Error::NotFound`] for codes they do not
/// know. Fetching records from a remote registry, and caching them, is the
/// business of the implementation: The models built from the records never
/// refer back to the provider.
pub trait Provider {
    fn ellipsoid_record(&self, code: u32) -> Result<EllipsoidRecord, Error>;
    fn datum_record(&self, code: u32) -> Result<DatumRecord, Error>;
    fn crs_record(&self, code: u32) -> Result<CrsRecord, Error>;

    fn ellipsoid(&self, code: u32) -> Result<Ellipsoid, Error> {
        let record = self.ellipsoid_record(code)?;
        debug!("ellipsoid EPSG:{code}: {}", record.name);
        record.to_ellipsoid()
    }

    fn datum(&self, code: u32) -> Result<Datum, Error> {
        let record = self.datum_record(code)?;
        debug!("datum EPSG:{code}: {}", record.name);
        let ellipsoid = self.ellipsoid(record.ellipsoid)?;
        let helmert = Helmert::new(record.towgs84, record.convention);
        Datum::new(ellipsoid, record.prime_meridian.to_radians(), helmert)
    }

    fn crs(&self, code: u32) -> Result<Crs, Error> {
        let record = self.crs_record(code)?;
        debug!("crs EPSG:{code}: {}", record.name);
        let datum = self.datum(record.datum)?;
        let unit = Unit::new(record.unit_ratio)?;
        let family = Family::from_epsg_method(record.method)?;
        let parameters = ProjectionParameters::from_epsg(&record.parameters, unit)?;
        Crs::new(datum, family, &parameters, unit)
    }
}

// ----- T E S T S ---------------------------------------------------------------------
