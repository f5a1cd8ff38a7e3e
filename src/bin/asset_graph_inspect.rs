//! Asset Graph Inspect Binary
//!
//! Loads a JSON snapshot of asset definitions and live status, runs the
//! kernel over it and logs a summary:
//! - Graph size and fingerprint
//! - Cycle check (exits non-zero on a cycle)
//! - Counts of stale, running, overdue and failed assets
//!
//! ## Configuration
//!
//! Environment variables:
//! - `ASSET_GRAPH_INPUT`: Path to the snapshot file (falls back to the first argument)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! ASSET_GRAPH_INPUT=snapshot.json cargo run --bin asset_graph_inspect --features inspect
//! ```

use std::path::PathBuf;
use std::time::Instant;

use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use asset_graph_kernel::{
    build_graph_data, build_live_data, ensure_acyclic, AssetDefinition, GraphFingerprint,
    LatestRunInfo, LiveAssetSnapshot,
};

/// Snapshot file layout.
#[derive(Debug, Deserialize)]
struct InspectInput {
    definitions: Vec<AssetDefinition>,
    #[serde(default)]
    live_nodes: Vec<LiveAssetSnapshot>,
    #[serde(default)]
    latest_info: Vec<LatestRunInfo>,
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "asset_graph_inspect=info,asset_graph_kernel=info".into());

    if log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true)
            )
            .init();
    }
}

/// Resolve the input path from the environment or the first argument.
fn input_path() -> Option<PathBuf> {
    std::env::var("ASSET_GRAPH_INPUT")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::args().nth(1))
        .map(PathBuf::from)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting asset graph inspection");

    let Some(path) = input_path() else {
        error!("ASSET_GRAPH_INPUT not set and no path argument given");
        return Err("missing input path".into());
    };

    let raw = std::fs::read_to_string(&path).map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to read snapshot");
        e
    })?;
    let input: InspectInput = serde_json::from_str(&raw).map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to parse snapshot");
        e
    })?;

    let start = Instant::now();
    let graph = build_graph_data(&input.definitions);
    let fingerprint = GraphFingerprint::compute(&graph);

    info!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        sources = graph.source_nodes().count(),
        fingerprint = %fingerprint.fingerprint,
        "Asset graph built"
    );

    if let Err(e) = ensure_acyclic(&graph) {
        error!(error = %e, "Asset graph is not a DAG; skipping live data");
        return Err(e.into());
    }

    let live = build_live_data(&input.live_nodes, &input.latest_info);
    let stale = live.values().filter(|n| n.is_stale()).count();
    let running = live.values().filter(|n| n.is_running()).count();
    let overdue = live.values().filter(|n| n.is_overdue()).count();
    let failed = live
        .values()
        .filter(|n| n.run_which_failed_to_materialize.is_some())
        .count();

    info!(
        live_nodes = live.len(),
        stale,
        running,
        overdue,
        failed,
        latency_ms = start.elapsed().as_millis() as u64,
        "Live data merged"
    );

    Ok(())
}
