use std::f64::consts::{PI, TAU};

/// Simplistic transformation from degrees, minutes and seconds-with-decimals
/// to degrees-with-decimals. No sanity check: Sign taken from degree-component,
/// minutes forced to unsigned by u16 type, but passing a negative value for
/// seconds leads to undefined behaviour.
pub fn dms_to_dd(d: i32, m: u16, s: f64) -> f64 {
    d.signum() as f64 * (d.abs() as f64 + (m as f64 + s / 60.) / 60.)
}

/// Split degrees-with-decimals into its sign, and the whole degrees,
/// whole minutes and seconds of its absolute value. The seconds are
/// rounded to milliarcseconds before splitting, so the minutes and
/// seconds never show up as 60.
pub fn dd_to_dms(dd: f64) -> (f64, u32, u32, f64) {
    let sign = if dd < 0. { -1. } else { 1. };
    let total = (dd.abs() * 3_600_000.).round() as u64;
    let d = total / 3_600_000;
    let m = (total / 60_000) % 60;
    let s = (total % 60_000) as f64 / 1000.;
    (sign, d as u32, m as u32, s)
}

/// Format degrees-with-decimals as `DD°MM'SS.sss"H`, where `H` is one
/// of the hemisphere letters given, selected by the sign of `dd`
pub fn format_dms(dd: f64, positive: char, negative: char) -> String {
    let (sign, d, m, s) = dd_to_dms(dd);
    let hemisphere = if sign < 0. { negative } else { positive };
    format!("{d}°{m:02}'{s:06.3}\"{hemisphere}")
}

/// normalize arbitrary angles to (-π, π]
pub fn normalize_symmetric(angle: f64) -> f64 {
    let angle = angle % TAU;
    if angle > PI {
        return angle - TAU;
    }
    if angle <= -PI {
        return angle + TAU;
    }
    angle
}

/// normalize arbitrary angles to [0, 2π)
pub fn normalize_positive(angle: f64) -> f64 {
    let mut angle = angle % TAU;
    if angle < 0. {
        angle += TAU;
    }
    // -1e-17 % TAU + TAU rounds to TAU
    if angle >= TAU {
        return 0.;
    }
    angle
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dms() {
        assert_eq!(dms_to_dd(55, 30, 36.), 55.51);
        assert_eq!(dms_to_dd(-55, 30, 36.), -55.51);

        let (sign, d, m, s) = dd_to_dms(-6.272877);
        assert_eq!(sign, -1.);
        assert_eq!((d, m), (6, 16));
        assert!((s - 22.357).abs() < 1e-9);

        // Rounding must propagate into the minutes, never yield 60 seconds
        assert_eq!(dd_to_dms(12.999_999_999_9), (1., 13, 0, 0.));

        assert_eq!(format_dms(-6.272877, 'E', 'W'), "6°16'22.357\"W");
        assert_eq!(format_dms(51.5, 'N', 'S'), "51°30'00.000\"N");
    }

    #[test]
    fn normalization() {
        assert_eq!(normalize_symmetric(PI), PI);
        assert_eq!(normalize_symmetric(-PI), PI);
        assert!((normalize_symmetric(3. * PI / 2.) + PI / 2.).abs() < 1e-15);
        assert!((normalize_symmetric(-3. * PI / 2.) - PI / 2.).abs() < 1e-15);
        assert_eq!(normalize_symmetric(1.), 1.);

        assert_eq!(normalize_positive(0.), 0.);
        assert!((normalize_positive(-PI / 2.) - 3. * PI / 2.).abs() < 1e-15);
        assert!((normalize_positive(5. * PI) - PI).abs() < 1e-14);
        assert_eq!(normalize_positive(-1e-17), 0.);
        assert!(normalize_positive(-1e-17) < TAU);
    }
}
