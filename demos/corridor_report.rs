//! Corridor report: builds a corridor from a route and prints its
//! statistics, a batch query summary and the GeoJSON outline as JSON.
//!
//! Usage:
//! ```text
//! cargo run --example corridor_report                                  # built-in route
//! cargo run --example corridor_report -- "[0, 0], [1, 0], [1, 1]" 0.1  # route text, width
//! RUST_LOG=corridor=debug cargo run --example corridor_report         # pipeline logs
//! ```

use corridor::{
    BatchMode, BatchQuery, Corridor, CorridorError, CorridorParams, Point2, PointSequence, RawInput,
};
use serde_json::json;

const DEFAULT_ROUTE: &str = "[0, 0], [0, 5], [5, 5], [5, 10]";

fn main() -> Result<(), CorridorError> {
    // Default: WARN for everything, INFO for corridor.
    // Override with RUST_LOG env var (e.g. RUST_LOG=corridor=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("corridor=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let route = args.next().unwrap_or_else(|| DEFAULT_ROUTE.to_owned());
    let width = match args.next() {
        Some(w) => w
            .parse::<f64>()
            .map_err(|err| CorridorError::InvalidInput(format!("bad width '{w}': {err}")))?,
        None => 1.0,
    };

    let params = CorridorParams::with_width(width)?;
    let corridor = Corridor::from_raw(RawInput::Text(route), params)?;
    let shifted_route =
        PointSequence::new(corridor.points().iter().map(|p| Point2::new(p.x + width, p.y)).collect())?;
    let shifted = Corridor::new(shifted_route, params)?;

    let corridors = [corridor, shifted];
    let probes: Vec<Point2> = corridors[0].points().iter().copied().collect();
    let summary = BatchQuery::new(&probes, &corridors).execute(BatchMode::Summary)?;

    println!("{}", corridors[0]);
    let report = json!({
        "statistics": corridors[0].statistics(),
        "gradient": corridors[0].gradient(),
        "batch_summary": summary,
        "outline": corridors[0].to_geojson().ok(),
    });
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(err) => tracing::warn!(%err, "report serialization failed"),
    }
    Ok(())
}
