// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Helly-Lite CLI - remove faces that contain an empty face.
//!
//! Reads two face collections from JSON files, drops every face that is a
//! superset of an empty face and writes the remaining faces as JSON.
//!
//! # Input formats
//!
//! - Dense (default): `{"columns": 3, "rows": [[1, 1, 0], [0, 1, 1]]}`
//! - Sparse (`--sparse`): `{"vertex_count": 3, "faces": [[0, 1], [1, 2]]}`
//!
//! # Environment
//!
//! - `HELLY_WORKER_THREADS` - rayon pool size (default: CPU count)
//! - `HELLY_PARALLEL_THRESHOLD` - face count that enables parallel filtering (default: 4096)
//! - `HELLY_PRETTY_JSON` - pretty-print output (default: true)
//! - `RUST_LOG` - log filter; logs go to stderr

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use helly_lite_faces::{
    par_remove_faces_with_report, remove_faces_with_report, remove_sparse_faces, FaceMatrix,
    SparseFaces,
};

mod config;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "helly-lite")]
#[command(version, about = "Remove faces that contain an empty face")]
struct Cli {
    /// JSON file with the faces of the complex
    faces: PathBuf,

    /// JSON file with the empty faces
    empty_faces: PathBuf,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read and write vertex-list collections instead of dense matrices
    #[arg(long)]
    sparse: bool,

    /// Always filter dense input in parallel, regardless of size
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,helly_lite=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    tracing::debug!(
        worker_threads = config.worker_threads,
        parallel_threshold = config.parallel_threshold,
        pretty_json = config.pretty_json,
        "Starting helly-lite"
    );

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("failed to initialize rayon thread pool")?;

    let json = run(&cli, &config)?;

    match &cli.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", json),
    }

    Ok(())
}

/// Runs the filter described by `cli` and returns the result as JSON.
fn run(cli: &Cli, config: &Config) -> Result<String> {
    if cli.sparse {
        run_sparse(cli, config)
    } else {
        run_dense(cli, config)
    }
}

fn run_dense(cli: &Cli, config: &Config) -> Result<String> {
    let faces = FaceMatrix::from_json(&read(&cli.faces)?)
        .with_context(|| format!("invalid face matrix in {}", cli.faces.display()))?;
    let empty_faces = FaceMatrix::from_json(&read(&cli.empty_faces)?)
        .with_context(|| format!("invalid face matrix in {}", cli.empty_faces.display()))?;

    let parallel = cli.parallel || faces.rows() >= config.parallel_threshold;
    let (kept, report) = if parallel {
        par_remove_faces_with_report(&faces, &empty_faces)
    } else {
        remove_faces_with_report(&faces, &empty_faces)
    }
    .context("cannot filter faces")?;

    tracing::info!(
        input_faces = report.input_faces,
        empty_faces = report.empty_faces,
        retained = report.retained,
        removed = report.removed,
        parallel,
        "Filtered faces"
    );

    let json = if config.pretty_json {
        kept.to_json()
    } else {
        kept.to_json_compact()
    };
    Ok(json?)
}

fn run_sparse(cli: &Cli, config: &Config) -> Result<String> {
    let faces = SparseFaces::from_json(&read(&cli.faces)?)
        .with_context(|| format!("invalid face list in {}", cli.faces.display()))?;
    let empty_faces = SparseFaces::from_json(&read(&cli.empty_faces)?)
        .with_context(|| format!("invalid face list in {}", cli.empty_faces.display()))?;

    let kept = remove_sparse_faces(&faces, &empty_faces).context("cannot filter faces")?;

    tracing::info!(
        input_faces = faces.len(),
        empty_faces = empty_faces.len(),
        retained = kept.len(),
        removed = faces.len() - kept.len(),
        "Filtered faces"
    );

    let json = if config.pretty_json {
        kept.to_json()
    } else {
        kept.to_json_compact()
    };
    Ok(json?)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
