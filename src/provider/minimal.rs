use super::*;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

// ----- T H E   M I N I M A L   P R O V I D E R ---------------------------------------

/// A minimalistic dataset provider, holding a small built in table of
/// EPSG records, and any records registered at run time.
/// Usually sufficient for the common European and North American cases,
/// and for internal test authoring.
///
/// Datums are keyed by the code of their geographic reference system
/// (e.g. 4326 for WGS 84), since that is what the EPSG transformations
/// to WGS84 refer to.
#[derive(Debug, Clone)]
pub struct Minimal {
    /// Ellipsoid records, built in and user defined
    ellipsoids: BTreeMap<u32, EllipsoidRecord>,
    /// Datum records, built in and user defined
    datums: BTreeMap<u32, DatumRecord>,
    /// Projected reference system records, built in and user defined
    crss: BTreeMap<u32, CrsRecord>,
}

impl Default for Minimal {
    fn default() -> Minimal {
        Minimal {
            ellipsoids: BUILTIN_ELLIPSOIDS.clone(),
            datums: BUILTIN_DATUMS.clone(),
            crss: BUILTIN_CRSS.clone(),
        }
    }
}

impl Minimal {
    /// A provider holding the built in records
    #[must_use]
    pub fn new() -> Minimal {
        Minimal::default()
    }

    /// A provider holding nothing but what the user registers
    #[must_use]
    pub fn empty() -> Minimal {
        Minimal {
            ellipsoids: BTreeMap::new(),
            datums: BTreeMap::new(),
            crss: BTreeMap::new(),
        }
    }

    /// Register an ellipsoid record, replacing any record with the same code
    pub fn register_ellipsoid(&mut self, record: EllipsoidRecord) {
        self.ellipsoids.insert(record.code, record);
    }

    /// Register a datum record, replacing any record with the same code
    pub fn register_datum(&mut self, record: DatumRecord) {
        self.datums.insert(record.code, record);
    }

    /// Register a CRS record, replacing any record with the same code
    pub fn register_crs(&mut self, record: CrsRecord) {
        self.crss.insert(record.code, record);
    }

    /// The codes and names of the projected reference systems known
    pub fn crs_codes(&self) -> impl Iterator<Item = (u32, &str)> {
        self.crss.values().map(|r| (r.code, r.name.as_str()))
    }
}

impl Provider for Minimal {
    fn ellipsoid_record(&self, code: u32) -> Result<EllipsoidRecord, Error> {
        if let Some(record) = self.ellipsoids.get(&code) {
            return Ok(record.clone());
        }
        Err(not_found(code, "ellipsoid"))
    }

    fn datum_record(&self, code: u32) -> Result<DatumRecord, Error> {
        if let Some(record) = self.datums.get(&code) {
            return Ok(record.clone());
        }
        Err(not_found(code, "datum"))
    }

    fn crs_record(&self, code: u32) -> Result<CrsRecord, Error> {
        if let Some(record) = self.crss.get(&code) {
            return Ok(record.clone());
        }
        Err(not_found(code, "crs"))
    }
}

fn not_found(code: u32, kind: &str) -> Error {
    Error::NotFound(format!("EPSG:{code}"), format!(": no {kind} record"))
}

// ----- B U I L T I N S ---------------------------------------------------------------

#[rustfmt::skip]
const ELLIPSOIDS: [(u32, &str, f64, Option<f64>, Option<f64>); 9] = [
    (7030, "WGS 84",                     6_378_137.0,   Some(298.257_223_563), None),
    (7019, "GRS 1980",                   6_378_137.0,   Some(298.257_222_101), None),
    (7022, "International 1924",         6_378_388.0,   Some(297.0),           None),
    (7004, "Bessel 1841",                6_377_397.155, Some(299.152_812_8),   None),
    (7001, "Airy 1830",                  6_377_563.396, Some(299.324_964_6),   None),
    (7008, "Clarke 1866",                6_378_206.4,   None,                  Some(6_356_583.8)),
    (7011, "Clarke 1880 (IGN)",          6_378_249.2,   None,                  Some(6_356_515.0)),
    (7024, "Krassowsky 1940",            6_378_245.0,   Some(298.3),           None),
    (7016, "Everest 1830 (1967 Definition)", 6_377_298.556, Some(300.8017),   None),
];

const ZERO: [f64; 7] = [0.; 7];

#[rustfmt::skip]
const DATUMS: [(u32, &str, u32, f64, [f64; 7]); 11] = [
    (4326, "WGS 84",          7030, 0., ZERO),
    (4258, "ETRS89",          7019, 0., ZERO),
    (4171, "RGF93 v1",        7019, 0., ZERO),
    (4269, "NAD83",           7019, 0., ZERO),
    (4742, "GDM2000",         7019, 0., ZERO),
    (4230, "ED50",            7022, 0., [-87., -98., -121., 0., 0., 0., 0.]),
    (4277, "OSGB36",          7001, 0., [446.448, -125.157, 542.06, 0.15, 0.247, 0.842, -20.489]),
    (4314, "DHDN",            7004, 0., [598.1, 73.7, 418.2, 0.202, 0.045, -2.455, 6.7]),
    (4275, "NTF",             7011, 0., [-168., -60., 320., 0., 0., 0., 0.]),
    (4807, "NTF (Paris)",     7011, 2.337_229_17, [-168., -60., 320., 0., 0., 0., 0.]),
    (4245, "Kertau 1968",     7016, 0., [-11., 851., 5., 0., 0., 0., 0.]),
];

// US survey foot
const FTUS: f64 = 1200. / 3937.;

static BUILTIN_ELLIPSOIDS: Lazy<BTreeMap<u32, EllipsoidRecord>> = Lazy::new(|| {
    ELLIPSOIDS
        .iter()
        .map(|&(code, name, a, rf, b)| {
            let record = EllipsoidRecord {
                code,
                name: name.to_string(),
                semimajor_axis: a,
                inverse_flattening: rf,
                semiminor_axis: b,
            };
            (code, record)
        })
        .collect()
});

static BUILTIN_DATUMS: Lazy<BTreeMap<u32, DatumRecord>> = Lazy::new(|| {
    DATUMS
        .iter()
        .map(|&(code, name, ellipsoid, prime_meridian, towgs84)| {
            let record = DatumRecord {
                code,
                name: name.to_string(),
                ellipsoid,
                prime_meridian,
                towgs84,
                convention: Convention::PositionVector,
            };
            (code, record)
        })
        .collect()
});

#[rustfmt::skip]
static BUILTIN_CRSS: Lazy<BTreeMap<u32, CrsRecord>> = Lazy::new(|| {
    let crs = |code: u32, name: &str, datum: u32, method: u32, parameters: &[(u32, f64)], unit_ratio: f64| {
        let record = CrsRecord {
            code,
            name: name.to_string(),
            datum,
            method,
            parameters: parameters.to_vec(),
            unit_ratio,
        };
        (code, record)
    };
    let utm = |code: u32, name: &str, datum: u32, zone: u32| {
        let lon_0 = 6. * zone as f64 - 183.;
        crs(code, name, datum, 9807, &[(8801, 0.), (8802, lon_0), (8805, 0.9996), (8806, 500_000.), (8807, 0.)], 1.)
    };

    BTreeMap::from([
        crs(27700, "OSGB36 / British National Grid", 4277, 9807,
            &[(8801, 49.), (8802, -2.), (8805, 0.999_601_271_7), (8806, 400_000.), (8807, -100_000.)], 1.),
        crs(2154, "RGF93 v1 / Lambert-93", 4171, 9802,
            &[(8821, 46.5), (8822, 3.), (8823, 49.), (8824, 44.), (8826, 700_000.), (8827, 6_600_000.)], 1.),
        crs(2263, "NAD83 / New York Long Island (ftUS)", 4269, 9802,
            &[(8821, 40. + 10. / 60.), (8822, -74.), (8823, 41. + 2. / 60.), (8824, 40. + 40. / 60.), (8826, 984_250.), (8827, 0.)], FTUS),
        crs(3375, "GDM2000 / Peninsula RSO", 4742, 9812,
            &[(8811, 4.), (8812, 102.25), (8813, 323.025_796_466_666_6), (8814, 323.130_102_361_111_1),
              (8815, 0.99984), (8806, 804_671.), (8807, 0.)], 1.),
        crs(3395, "WGS 84 / World Mercator", 4326, 9804,
            &[(8801, 0.), (8802, 0.), (8805, 1.), (8806, 0.), (8807, 0.)], 1.),
        crs(3857, "WGS 84 / Pseudo-Mercator", 4326, 1024,
            &[(8801, 0.), (8802, 0.), (8806, 0.), (8807, 0.)], 1.),
        utm(32631, "WGS 84 / UTM zone 31N", 4326, 31),
        utm(32632, "WGS 84 / UTM zone 32N", 4326, 32),
        utm(25832, "ETRS89 / UTM zone 32N", 4258, 32),
        utm(23031, "ED50 / UTM zone 31N", 4230, 31),
    ])
});

// ----- T E S T S ---------------------------------------------------------------------
