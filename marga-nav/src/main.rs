//! MargaNav - command-line route planner for marga
//!
//! Loads an ASCII terrain map, builds a navigation grid from it, plans one
//! or more routes through the request coordinator and prints the resulting
//! waypoints. With `--walk`, each route is also followed by a simulated
//! point walker using the corridor's turn boundaries.
//!
//! ## Inputs
//!
//! - `configs/marga.yaml`: library settings (grid, penalties, scheduling)
//! - `marga-nav.toml`: map file, walker and routes for this front end
//! - command-line flags override both

mod config;
mod error;
mod walker;

use config::{NavConfig, RouteConfig};
use error::{NavError, Result};
use walker::Walker;

use clap::{Parser, ValueEnum};
use marga::config::RequestMode;
use marga::{
    AsciiTerrain, CorridorPath, GridConfig, MargaConfig, NavGrid, RequestCoordinator, WorldPoint,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_NAV_CONFIG: &str = "marga-nav.toml";

/// Plan routes across an ASCII terrain map
#[derive(Parser, Debug)]
#[command(name = "marga-nav", version, about)]
struct Args {
    /// Library configuration (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Front-end settings (TOML), defaults to ./marga-nav.toml if present
    #[arg(long)]
    nav: Option<PathBuf>,

    /// Terrain map, one character per tile
    #[arg(long)]
    map: Option<PathBuf>,

    /// Start point "x,y" shared by every --to
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    from: Option<WorldPoint>,

    /// Goal point "x,y"; repeat for several routes
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    to: Vec<WorldPoint>,

    /// Override the scheduling mode from the YAML config
    #[arg(long, value_enum)]
    policy: Option<Policy>,

    /// Follow each planned route with the simulated walker
    #[arg(long)]
    walk: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Serialized,
    Concurrent,
}

impl From<Policy> for RequestMode {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Serialized => RequestMode::Serialized,
            Policy::Concurrent => RequestMode::Concurrent,
        }
    }
}

fn parse_point(s: &str) -> std::result::Result<WorldPoint, String> {
    let invalid = || NavError::Point(s.to_string()).to_string();
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x: f32 = x.trim().parse().map_err(|_| invalid())?;
    let y: f32 = y.trim().parse().map_err(|_| invalid())?;
    Ok(WorldPoint::new(x, y))
}

/// One finished request, as reported by its callback
struct Delivery {
    route: usize,
    waypoints: Vec<WorldPoint>,
    success: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marga_nav=info,marga=info")),
        )
        .init();

    if let Err(e) = run(Args::parse()) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    info!("MargaNav v{}", env!("CARGO_PKG_VERSION"));

    let nav = load_nav_config(args.nav.as_deref())?;
    let mut planner = load_marga_config(args.config.as_deref(), &nav)?;
    if let Some(policy) = args.policy {
        info!("Scheduling mode override: {:?}", policy);
        planner.requests.mode = policy.into();
    }

    let routes = collect_routes(&args, &nav)?;
    let map_path = args.map.clone().unwrap_or_else(|| nav.input.map_path.clone());
    let grid = Arc::new(build_grid(&map_path, &nav, &planner)?);

    let deliveries = plan_routes(&grid, &planner, &nav, &routes)?;

    let mut failures = 0;
    for delivery in &deliveries {
        let route = routes[delivery.route];
        print_route(delivery, route);
        if !delivery.success {
            failures += 1;
            continue;
        }
        if args.walk {
            let corridor = CorridorPath::from_waypoints(
                delivery.waypoints.clone(),
                route.from,
                planner.corridor.turn_distance,
            );
            let outcome = Walker::new(route.from, nav.step_length())
                .follow(&corridor, nav.walker.max_steps);
            println!(
                "  walk: {} after {} steps ({:.2} travelled, {:.1}s), ended at ({:.2}, {:.2})",
                if outcome.finished { "finished" } else { "stopped" },
                outcome.steps,
                outcome.distance,
                outcome.steps as f32 * nav.walker.time_step,
                outcome.final_position.x,
                outcome.final_position.y
            );
        }
    }

    info!("Planned {} routes, {} failed", deliveries.len(), failures);
    Ok(())
}

fn load_nav_config(path: Option<&Path>) -> Result<NavConfig> {
    match path {
        Some(path) => {
            info!("Loading nav configuration from {:?}", path);
            NavConfig::load(path)
        }
        None if Path::new(DEFAULT_NAV_CONFIG).exists() => {
            info!("Loading nav configuration from {}", DEFAULT_NAV_CONFIG);
            NavConfig::load(Path::new(DEFAULT_NAV_CONFIG))
        }
        None => {
            info!("Using default nav configuration");
            Ok(NavConfig::default())
        }
    }
}

fn load_marga_config(path: Option<&Path>, nav: &NavConfig) -> Result<MargaConfig> {
    let path = path.unwrap_or(nav.input.marga_config.as_path());
    if path.exists() {
        info!("Loading planner configuration from {:?}", path);
        Ok(MargaConfig::load(path)?)
    } else {
        warn!("{:?} not found, using default planner configuration", path);
        Ok(MargaConfig::default())
    }
}

fn collect_routes(args: &Args, nav: &NavConfig) -> Result<Vec<RouteConfig>> {
    let routes: Vec<RouteConfig> = if args.to.is_empty() {
        nav.routes.clone()
    } else {
        let from = args.from.unwrap_or(WorldPoint::ZERO);
        args.to.iter().map(|&to| RouteConfig { from, to }).collect()
    };
    if routes.is_empty() {
        return Err(NavError::NoRoutes);
    }
    Ok(routes)
}

fn build_grid(map_path: &Path, nav: &NavConfig, planner: &MargaConfig) -> Result<NavGrid> {
    info!("Loading map {:?}", map_path);
    let terrain = AsciiTerrain::load(map_path, nav.input.tile_size, nav.input.map_center)?;

    let mut grid_config = planner.grid_config();
    if nav.input.fit_grid_to_map {
        let fitted = GridConfig::covering(&terrain);
        grid_config.origin = fitted.origin;
        grid_config.world_size = fitted.world_size;
    }

    let grid = NavGrid::build(&grid_config, &terrain, &planner.penalty_table())?;
    debug!("Grid:\n{}", grid.render_ascii());
    Ok(grid)
}

fn plan_routes(
    grid: &Arc<NavGrid>,
    planner: &MargaConfig,
    nav: &NavConfig,
    routes: &[RouteConfig],
) -> Result<Vec<Delivery>> {
    let mut coordinator =
        RequestCoordinator::new(Arc::clone(grid), planner.coordinator_config())?;
    let deliveries = Rc::new(RefCell::new(Vec::with_capacity(routes.len())));

    for (index, route) in routes.iter().enumerate() {
        let sink = Rc::clone(&deliveries);
        let id = coordinator
            .submit(route.from, route.to, move |waypoints, success| {
                sink.borrow_mut().push(Delivery {
                    route: index,
                    waypoints,
                    success,
                })
            })
            .map_err(marga::MargaError::from)?;
        debug!("Route {} submitted as request {}", index, id);
    }

    let wait = Duration::from_millis(nav.run.tick_wait_ms);
    let mut ticks = 0;
    while !coordinator.is_idle() {
        if ticks >= nav.run.max_ticks {
            return Err(NavError::TickLimit {
                ticks,
                outstanding: coordinator.outstanding(),
            });
        }
        coordinator.tick_timeout(wait);
        ticks += 1;
    }

    let stats = coordinator.stats();
    info!(
        "Coordinator idle after {} ticks: {} completed, {} succeeded",
        ticks, stats.completed, stats.succeeded
    );
    drop(coordinator);

    Ok(deliveries.take())
}

fn print_route(delivery: &Delivery, route: RouteConfig) {
    println!(
        "route {}: ({:.2}, {:.2}) -> ({:.2}, {:.2}) {}",
        delivery.route,
        route.from.x,
        route.from.y,
        route.to.x,
        route.to.y,
        if delivery.success { "ok" } else { "FAILED" }
    );
    for (i, p) in delivery.waypoints.iter().enumerate() {
        println!("  {:>3}: ({:.2}, {:.2})", i, p.x, p.y);
    }
}
