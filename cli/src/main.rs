#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::collections::BTreeMap;

use anyhow::Result;
use structopt::StructOpt;

use model::{Method, Mode, Params, SplineParams, VesselName};

#[derive(StructOpt)]
#[structopt(
    name = "vms_tracks",
    about = "Rebuilds continuous vessel tracks from sparse VMS pings"
)]
struct Args {
    /// CSV of raw VMS records (I_NCEE, LAT, LON, SPE, HEA, DATE)
    #[structopt(long)]
    vms: String,
    /// Where to write the interpolated tracks
    #[structopt(long, default_value = "tracks.geojson")]
    out: String,
    /// Target minutes between paired pings
    #[structopt(long, default_value = "120")]
    interval: f64,
    /// Tolerance around the interval, in minutes
    #[structopt(long, default_value = "15")]
    margin: f64,
    /// Sampled points per segment, endpoints included
    #[structopt(long, default_value = "100")]
    resolution: usize,
    /// "straight line" or "cubic Hermite spline"
    #[structopt(long, default_value = "cubic Hermite spline")]
    method: String,
    /// Spline tangent strength
    #[structopt(long, default_value = "0.5")]
    fm: f64,
    /// Passed through to tangent-weighting consumers
    #[structopt(long, default_value = "20")]
    distance_scale: f64,
    /// Passed through to tangent-weighting consumers
    #[structopt(long, default_value = "0.1")]
    sigmoid_line: f64,
    /// Bottom of the cruising speed band, in knots
    #[structopt(long, default_value = "2")]
    speed_low: f64,
    /// Top of the cruising speed band, in knots
    #[structopt(long, default_value = "5")]
    speed_high: f64,
    /// 1 to use the heading recorded one ping before the end of each pair for
    /// the arrival tangent
    #[structopt(long, default_value = "0")]
    heading_adjustment: usize,
    /// "sequential" or "batch"
    #[structopt(long, default_value = "sequential")]
    mode: String,
}

fn main() -> Result<()> {
    abstutil::logger::setup();
    let args = Args::from_args();

    let method: Method = args.method.parse()?;
    let mode = match args.mode.as_str() {
        "sequential" => Mode::Sequential,
        "batch" => Mode::Batch,
        other => bail!("unknown mode {other:?}; use \"sequential\" or \"batch\""),
    };
    let params = Params {
        interval: args.interval,
        margin: args.margin,
        resolution: args.resolution,
        method,
        spline: SplineParams {
            fm: args.fm,
            distance_scale: args.distance_scale,
            sigmoid_line: args.sigmoid_line,
            speed_band: (args.speed_low, args.speed_high),
        },
        heading_adjustment: args.heading_adjustment,
        mode,
    };

    let pings = model::vms::load(std::fs::File::open(&args.vms)?)?;
    let output = model::interpolate(&pings, &params)?;

    let mut per_vessel: BTreeMap<&VesselName, usize> = BTreeMap::new();
    for segment in &output.segments {
        *per_vessel.entry(&pings[segment.start].vessel).or_insert(0) += 1;
    }
    for (vessel, count) in per_vessel {
        info!("{:?}: {} segments", vessel, count);
    }
    for (vessel, why) in &output.skipped {
        warn!("{:?} skipped: {}", vessel, why);
    }

    model::write_geojson(args.out.clone(), &pings, &output.segments)?;
    info!("Wrote {}", args.out);
    Ok(())
}
