#![allow(dead_code)]

/// Some literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// B.R. Bowring (1976): *Transformation from spatial to geographical coordinates*.
    /// Survey Review 23(181), pp. 323–327.
    Bow76,

    /// B.R. Bowring (1985): *The accuracy of geodetic latitude and height equations*.
    /// Survey Review, 28(218), pp.202-206,
    /// [DOI](https://doi.org/10.1179/sre.1985.28.218.202)
    Bow85,

    /// IOGP (2019): *Coordinate Conversions and Transformations including Formulas*.
    /// IOGP Publication 373-7-2, Geomatics Guidance Note number 7, part 2.
    /// [pdf](https://www.iogp.org/wp-content/uploads/2019/09/373-07-02.pdf)
    Iogp19,

    /// Charles F.F. Karney (2011): *Transverse Mercator with an accuracy of a few nanometers*.
    /// J. Geodesy. 85(8): 475–485.
    /// [DOI](https://doi.org/10.1007/s00190-011-0445-3).
    Kar11,

    /// Charles F.F. Karney (2013): *Algorithms for geodesics*.
    /// J. Geodesy. 87(1): 43–55.
    /// [DOI](https://doi.org/10.1007/s00190-012-0578-z).
    Kar13,

    /// L. Krüger (1912). Konforme Abbildung des Erdellipsoids in der Ebene.
    /// Royal Prussian Geodetic Institute, New Series 52.
    /// [DOI](https://dx.doi.org/10.2312/GFZ.b103-krueger28).
    Kru12,

    /// National Geospatial-Intelligence Agency (2006): *Global Area Reference System*.
    /// [Description](https://earth-info.nga.mil/index.php?dir=coordsys&action=coordsys#tab_gars)
    Nga06,

    /// Gustavo Niemeyer (2008): *geohash.org*, the public domain geohash
    /// encoding, [Wikipedia](https://en.wikipedia.org/wiki/Geohash).
    Nie08,

    /// J.P. Snyder (1987): *Map Projections - A Working Manual*.
    /// USGS Professional Paper 1395.
    /// [DOI](https://doi.org/10.3133/pp1395)
    Sny87,

    /// T. Vincenty (1975) Direct and Inverse Solutions of Geodesics on the Ellipsoid
    /// with application of nested equations.
    /// Survey Review, 23(176): 88-93.
    /// [pdf](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf)
    /// (See also Wikipedia: [Vincenty's formulae](https://en.wikipedia.org/wiki/Vincenty's_formulae)).
    Vin75,

    /// T. Vincenty (1976). Correspondence. Survey Review. 23(180): 294.
    Vin76,
}
