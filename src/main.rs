use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Result};
use clap::Parser;
use routemaster::sdk::catalogue::PoiCatalogue;
use routemaster::sdk::config;
use routemaster::sdk::routing::{
    format_distance, format_duration, Location, LocationResolver, NoGeolocation,
    NominatimProvider, PositionProvider, Preference, RemoteBackendProvider, Route, RouteBackend,
};
use routemaster::sdk::search::{Field, SearchController, DEBOUNCE_DELAY};
use routemaster::sdk::session::JourneyPlanner;
use routemaster::sdk::util::{log::init_logging, rate_limit::geocoder_limiter};

/// Plan a journey between two places by free-text search.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Free-text start location (e.g. "Connaught Place")
    #[arg(short, long)]
    from: String,

    /// Free-text destination (e.g. "India Gate")
    #[arg(short, long)]
    to: String,

    /// Route preference
    #[arg(short, long, default_value = "fastest")]
    preference: Preference,

    /// Try the device position for the start, falling back to --from
    #[arg(long)]
    from_current: bool,
}

fn main() -> Result<()> {
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let backend = Arc::new(RemoteBackendProvider::new(config::backend_base_url()));
    let geocoder = Arc::new(NominatimProvider::new(
        config::geocoder_base_url(),
        geocoder_limiter(),
    ));
    let catalogue = PoiCatalogue::bundled();
    let resolver = LocationResolver::new(backend.clone(), geocoder, catalogue.clone());

    if backend.check_health() {
        log::info!("Backend is healthy at {}", backend.base_url());
    } else {
        log::warn!(
            "Backend at {} is not answering; search degrades to fallback tiers",
            backend.base_url()
        );
    }

    let mut planner = JourneyPlanner::new(backend);
    let mut controller = SearchController::new();

    let start = match cli.from_current.then(|| NoGeolocation.current_position()).flatten() {
        Some(position) => position,
        None => pick(&resolver, &mut controller, Field::Start, &cli.from)
            .ok_or_else(|| unknown_place(&planner, &catalogue, &cli.from))?,
    };
    let end = pick(&resolver, &mut controller, Field::End, &cli.to)
        .ok_or_else(|| unknown_place(&planner, &catalogue, &cli.to))?;

    log::info!(
        "Routing {} -> {} ({})",
        start.primary_name().unwrap_or("start"),
        end.primary_name().unwrap_or("destination"),
        cli.preference
    );

    let modes = planner.transport_modes();
    log::info!(
        "Available transport modes: {}",
        modes
            .iter()
            .map(|mode| mode.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let route = planner.calculate_route(start, end, cli.preference)?;
    render(route);
    Ok(())
}

/// Runs one full search cycle the way an input field would: keystroke,
/// debounce, resolve, settle, then take the top suggestion.
fn pick(
    resolver: &LocationResolver,
    controller: &mut SearchController,
    field: Field,
    text: &str,
) -> Option<Location> {
    let timer = controller.text_changed(field, text)?;
    thread::sleep(DEBOUNCE_DELAY);
    let request = controller.timer_fired(&timer)?;
    let results = resolver.resolve(&request.text);
    controller.resolver_settled(field, &request.text, results);

    for suggestion in controller.suggestions(field) {
        let context = suggestion
            .secondary_name()
            .map(|context| format!(" ({context})"))
            .unwrap_or_default();
        log::debug!(
            "Suggestion for {:?}: {}{}",
            field,
            suggestion.primary_name().unwrap_or("(unnamed)"),
            context
        );
    }

    let choice = controller.suggestions(field).first().cloned();
    controller.dismiss();
    choice
}

/// Builds the "no such place" failure, listing the known starting
/// points so the user has something concrete to retry with.
fn unknown_place(
    planner: &JourneyPlanner,
    catalogue: &PoiCatalogue,
    text: &str,
) -> anyhow::Error {
    let known: Vec<String> = planner
        .sample_locations(catalogue)
        .iter()
        .filter_map(|location| location.primary_name().map(str::to_string))
        .collect();
    log::info!("Known locations: {}", known.join(", "));
    anyhow!("No location found for \"{}\"", text)
}

fn render(route: &Route) {
    println!("Route found:");
    println!(
        "  {}  |  {}  |  ₹{}",
        format_duration(route.total_duration),
        format_distance(route.steps_distance()),
        route.total_cost
    );
    for (index, step) in route.steps.iter().enumerate() {
        let instruction = if step.instruction.is_empty() {
            "No instruction"
        } else {
            step.instruction.as_str()
        };
        println!(
            "  {}. [{}] {} ({}, {})",
            index + 1,
            step.mode.label(),
            instruction,
            format_duration(&step.duration),
            format_distance(&step.distance),
        );
        if let Some(cost) = step.cost {
            println!("     fare ₹{}", cost);
        }
    }
}
