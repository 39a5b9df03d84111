//! Triangular mesh grid command-line tool.
//!
//! Thin front end over `tmg-grid`:
//! - Point lookup, cell polygons and neighbours
//! - Bounding-box queries
//! - KML / GeoJSON mesh export
//!
//! Results go to stdout, logs to stderr.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tmg_grid::{CellKey, Grid, GridConfig, LatLng, MeshFormat, TmgError};
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "tmg")]
#[command(about = "Triangular mesh grid: cell lookup, polygons, adjacency, tiling and export")]
struct Cli {
    /// Cells along each rhomboid edge (overrides TMG_CELL_COUNT)
    #[arg(long, global = true)]
    cell_count: Option<u32>,

    /// Log level
    #[arg(long, global = true, env = "TMG_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the key of the cell containing a point
    CellKey {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// Print a cell's boundary as a JSON [[lng,lat],...] ring
    Polygon {
        /// Cell key, e.g. 7-2-1
        key: CellKey,
    },

    /// Print a cell's NE/SE/SW/NW neighbours as JSON
    Neighbors {
        key: CellKey,
    },

    /// List the cells overlapping a bounding box
    Tile {
        /// First corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        from: LatLng,

        /// Second corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        to: LatLng,

        /// Longitude direction: >= 0 runs east from `from`, < 0 east from `to`
        #[arg(long, allow_hyphen_values = true, default_value = "1")]
        orientation: i32,

        /// Print a JSON array instead of one key per line
        #[arg(long)]
        json: bool,
    },

    /// Export cell polygons as KML or GeoJSON
    Mesh {
        /// Export every cell of one rhomboid (0-9)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        rhomboid: Option<u8>,

        /// First bounding box corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true, requires = "to")]
        from: Option<LatLng>,

        /// Second bounding box corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true, requires = "from")]
        to: Option<LatLng>,

        #[arg(long, allow_hyphen_values = true, default_value = "1")]
        orientation: i32,

        /// Output format: kml (default), geojson
        #[arg(short, long, default_value = "kml")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the grid configuration and derived sizes
    Info,
}

fn main() {
    if let Err(err) = try_main() {
        error!("{:#}", err);
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}

/// 2 when the grid rejected the caller's input, 1 for anything else.
fn exit_code(err: &anyhow::Error) -> i32 {
    let input = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<TmgError>())
        .any(TmgError::is_input_error);
    if input {
        2
    } else {
        1
    }
}

fn try_main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json)?;

    let mut config = GridConfig::from_env();
    if let Some(n) = cli.cell_count {
        config.cell_count = n;
    }
    let grid = Grid::new(config).context("invalid grid configuration")?;
    debug!(cell_count = config.cell_count, radius_m = config.radius_m, "grid ready");

    run(&grid, cli.command)
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn run(grid: &Grid, command: Commands) -> Result<()> {
    match command {
        Commands::CellKey { lat, lng } => {
            let key = grid
                .cell_key(lat, lng)
                .with_context(|| format!("cannot locate {},{}", lat, lng))?;
            println!("{}", key);
        }
        Commands::Polygon { key } => {
            let ring = grid.cell_polygon(key).with_context(|| format!("cell {}", key))?;
            println!("{}", serde_json::to_string(&ring)?);
        }
        Commands::Neighbors { key } => {
            let neighbors = grid.neighbors(key).with_context(|| format!("cell {}", key))?;
            println!("{}", serde_json::to_string_pretty(&neighbors)?);
        }
        Commands::Tile {
            from,
            to,
            orientation,
            json,
        } => {
            let keys = grid.tile(from, to, orientation)?;
            info!(cells = keys.len(), %from, %to, orientation, "tile query");
            if json {
                println!("{}", serde_json::to_string(&keys)?);
            } else {
                for key in keys {
                    println!("{}", key);
                }
            }
        }
        Commands::Mesh {
            rhomboid,
            from,
            to,
            orientation,
            format,
            output,
        } => {
            let Some(format) = MeshFormat::from_str(&format) else {
                bail!("unknown mesh format '{}', expected kml or geojson", format);
            };
            let mesh = match (rhomboid, from, to) {
                (Some(r), _, _) => grid.rhomboid_mesh(r)?,
                (None, Some(from), Some(to)) => grid.tile_mesh(from, to, orientation)?,
                _ => bail!("either --rhomboid or both --from and --to are required"),
            };
            match output {
                Some(path) => {
                    mesh.write_to(format, &path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), cells = mesh.len(), %format, "mesh written");
                }
                None => println!("{}", mesh.render(format)?),
            }
        }
        Commands::Info => {
            let config = grid.config();
            println!("cell_count:     {}", config.cell_count);
            println!("radius_m:       {}", config.radius_m);
            println!("total_cells:    {}", config.total_cells());
            println!("edge_length_m:  {:.1}", config.edge_length_m());
            println!("cell_side_m:    {:.1}", config.cell_side_m());
        }
    }
    Ok(())
}
