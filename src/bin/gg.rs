//! gg: Geodesics, datum shifts, projections and tile codes from the command line.
//!
//! All angles are in degrees, longitude before latitude.
use clap::{Parser, Subcommand};
use geogrid::prelude::*;
use log::{debug, trace};

/// GG: The geogrid command line front end
#[derive(Parser, Debug)]
#[clap(name = "gg")]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Number of decimals in angular output
    #[clap(short = 'd', long, default_value_t = 9)]
    decimals: usize,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Distance and bearings between two points (Vincenty inverse)
    Dist {
        #[clap(allow_negative_numbers = true)]
        lon1: f64,
        #[clap(allow_negative_numbers = true)]
        lat1: f64,
        #[clap(allow_negative_numbers = true)]
        lon2: f64,
        #[clap(allow_negative_numbers = true)]
        lat2: f64,
        /// Ellipsoid name, or "a, rf"
        #[clap(long, default_value = "WGS84")]
        ellps: String,
    },

    /// The point reached after DISTANCE metres along BEARING (Vincenty direct)
    Dest {
        #[clap(allow_negative_numbers = true)]
        lon: f64,
        #[clap(allow_negative_numbers = true)]
        lat: f64,
        distance: f64,
        #[clap(allow_negative_numbers = true)]
        bearing: f64,
        /// Ellipsoid name, or "a, rf"
        #[clap(long, default_value = "WGS84")]
        ellps: String,
    },

    /// Encode a point as a tile code (maidenhead, geohash, georef, gars)
    Encode {
        codec: Codec,
        #[clap(allow_negative_numbers = true)]
        lon: f64,
        #[clap(allow_negative_numbers = true)]
        lat: f64,
        /// Codec specific precision. Defaults to the finest supported
        #[clap(short, long)]
        precision: Option<usize>,
    },

    /// Decode a tile code to a point and its precision
    Decode {
        codec: Codec,
        code: String,
        /// GARS: Return a corner or an edge midpoint (n, ne, e, ..., sw)
        #[clap(long)]
        anchor: Option<String>,
        /// Geohash: Return the south west corner rather than the centre
        #[clap(long)]
        corner: bool,
    },

    /// Project a point to a built in projected reference system
    Project {
        epsg: u32,
        /// Longitude, or easting with --inv
        #[clap(allow_negative_numbers = true)]
        x: f64,
        /// Latitude, or northing with --inv
        #[clap(allow_negative_numbers = true)]
        y: f64,
        /// Inverse operation: From planar coordinates, in the unit of the system
        #[clap(long = "inv")]
        inverse: bool,
    },

    /// Shift a point between two built in datums, through WGS84
    Shift {
        from: u32,
        to: u32,
        #[clap(allow_negative_numbers = true)]
        lon: f64,
        #[clap(allow_negative_numbers = true)]
        lat: f64,
        #[clap(allow_negative_numbers = true)]
        height: Option<f64>,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("{options:#?}");

    let prv = Minimal::new();
    let n = options.decimals;

    match options.command {
        Command::Dist {
            lon1,
            lat1,
            lon2,
            lat2,
            ellps,
        } => {
            let ellps = Ellipsoid::named(&ellps)?;
            let from = Geodetic::gis(lon1, lat1, 0.);
            let to = Geodetic::gis(lon2, lat2, 0.);
            let d = ellps.distance(&from, &to)?;
            debug!("{d}");
            println!(
                "{:.4} {:.n$} {:.n$}",
                d.distance,
                d.initial_bearing.to_degrees(),
                d.final_bearing.to_degrees()
            );
        }

        Command::Dest {
            lon,
            lat,
            distance,
            bearing,
            ellps,
        } => {
            let ellps = Ellipsoid::named(&ellps)?;
            let from = Geodetic::gis(lon, lat, 0.);
            let dest = ellps.destination(&from, distance, bearing.to_radians())?;
            debug!("{dest}");
            let (lon, lat, _) = dest.coordinate.to_gis();
            println!("{lon:.n$} {lat:.n$} {:.n$}", dest.bearing.to_degrees());
        }

        Command::Encode {
            codec,
            lon,
            lat,
            precision,
        } => {
            let precision = precision.unwrap_or_else(|| codec.max_precision());
            println!("{}", codec.encode(lon, lat, precision)?);
        }

        Command::Decode {
            codec,
            code,
            anchor,
            corner,
        } => {
            let tile = match (codec, anchor, corner) {
                (Codec::Gars, Some(anchor), false) => gars::decode(&code, &anchor)?,
                (Codec::Geohash, None, corner) => geohash::decode(&code, !corner)?,
                (_, None, false) => codec.decode(&code)?,
                _ => anyhow::bail!(
                    "--anchor is for gars only, --corner for geohash only, and not both"
                ),
            };
            println!(
                "{:.n$} {:.n$} {:.n$} {:.n$}",
                tile.lon, tile.lat, tile.precision.0, tile.precision.1
            );
        }

        Command::Project {
            epsg,
            x,
            y,
            inverse,
        } => {
            let crs = prv.crs(epsg)?;
            if inverse {
                let geo = crs.inverse(&Projected::new(x, y, 0., crs.unit()))?;
                let (lon, lat, _) = geo.to_gis();
                println!("{lon:.n$} {lat:.n$}");
            } else {
                let p = crs.forward(&Geodetic::gis(x, y, 0.))?;
                println!("{:.4} {:.4}", p.x, p.y);
            }
        }

        Command::Shift {
            from,
            to,
            lon,
            lat,
            height,
        } => {
            let source = prv.datum(from)?;
            let target = prv.datum(to)?;
            let result = source.to_crs(&target, &Geodetic::gis(lon, lat, height.unwrap_or(0.)))?;
            debug!("{result}");
            let (lon, lat, h) = result.to_gis();
            println!("{lon:.n$} {lat:.n$} {h:.4}");
        }
    }
    Ok(())
}
