//! Linear units of projected reference systems.
use crate::Error;

/// A linear unit, represented by its length in metres.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Unit {
    ratio: f64,
}

impl Default for Unit {
    fn default() -> Unit {
        Unit::metre()
    }
}

impl Unit {
    /// A unit `ratio` metres long
    pub fn new(ratio: f64) -> Result<Unit, Error> {
        if !ratio.is_finite() || ratio <= 0. {
            return Err(Error::BadParam("unit ratio".to_string(), ratio.to_string()));
        }
        Ok(Unit { ratio })
    }

    /// From an EPSG unit of measure record, where a value in the unit
    /// converts to SI as `value * factor_b / factor_c`
    pub fn from_factors(factor_b: f64, factor_c: f64) -> Result<Unit, Error> {
        Unit::new(factor_b / factor_c)
    }

    #[must_use]
    pub fn metre() -> Unit {
        Unit { ratio: 1. }
    }

    /// The international foot, EPSG:9002
    #[must_use]
    pub fn foot() -> Unit {
        Unit { ratio: 0.3048 }
    }

    /// The US survey foot, EPSG:9003
    #[must_use]
    pub fn us_survey_foot() -> Unit {
        Unit {
            ratio: 1200. / 3937.,
        }
    }

    /// Metres per unit
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    #[must_use]
    pub fn to_metres(&self, value: f64) -> f64 {
        value * self.ratio
    }

    #[must_use]
    pub fn from_metres(&self, value: f64) -> f64 {
        value / self.ratio
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() -> Result<(), Error> {
        assert_eq!(Unit::default(), Unit::metre());
        assert_eq!(Unit::metre().to_metres(12.5), 12.5);

        let ft = Unit::foot();
        assert!((ft.to_metres(1000.) - 304.8).abs() < 1e-12);
        assert!((ft.from_metres(304.8) - 1000.).abs() < 1e-12);

        // EPSG:9003 is given as factor_b = 12, factor_c = 39.37
        let ftus = Unit::from_factors(12., 39.37)?;
        assert!((ftus.ratio() - Unit::us_survey_foot().ratio()).abs() < 1e-15);
        assert!((ftus.ratio() - 0.304_800_609_601_219_2).abs() < 1e-15);
        Ok(())
    }

    #[test]
    fn validation() {
        assert!(matches!(Unit::new(0.), Err(Error::BadParam(..))));
        assert!(matches!(Unit::new(-1.), Err(Error::BadParam(..))));
        assert!(matches!(Unit::new(f64::NAN), Err(Error::BadParam(..))));
        assert!(matches!(
            Unit::from_factors(1., 0.),
            Err(Error::BadParam(..))
        ));
    }
}
