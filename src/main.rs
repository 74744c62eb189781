/* 3rd party libraries */
use clap::{Arg, ArgMatches, Command};
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::str::FromStr;
use std::thread::Builder;
use std::time::Duration;

/* Custom libraries */
use config::Config;
use coordinator::Coordinator;
use display::{ChannelSink, DisplayEvent, NoopSink, RenderSink, TerminalDisplay};
use shared::{ConfigurationError, Passenger};

/* Modules */
mod config;
mod coordinator;
mod display;
mod elevator;
mod passengers;
mod shared;

fn cli() -> Command<'static> {
    Command::new("elevator-sim")
        .about("Simulates a bank of elevators serving a queue of passengers")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("passengers")
                .long("passengers")
                .takes_value(true)
                .help("Passenger list (.json array or TOML [[passenger]] tables)"),
        )
        .arg(
            Arg::new("random")
                .long("random")
                .takes_value(true)
                .help("Generate this many random passengers"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for --random"),
        )
        .arg(
            Arg::new("save-passengers")
                .long("save-passengers")
                .takes_value(true)
                .help("Write the resolved passenger list to this path"),
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .help("Skip drawing and run as fast as possible"),
        )
        .arg(
            Arg::new("summary-json")
                .long("summary-json")
                .help("Print the final report as JSON"),
        )
}

fn parse_arg<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, ConfigurationError>
where
    T::Err: std::fmt::Display,
{
    match matches.value_of(name) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigurationError::Parse {
                path: format!("--{}", name),
                message: e.to_string(),
            }),
        None => Ok(None),
    }
}

fn resolve_passengers(config: &Config, matches: &ArgMatches) -> Result<Vec<Passenger>, ConfigurationError> {
    let n_floors = config.simulation.n_floors;
    let seed = parse_arg::<u64>(matches, "seed")?
        .or(config.passengers.seed)
        .unwrap_or(0);

    if let Some(path) = matches.value_of("passengers") {
        return passengers::load_passengers(path);
    }
    if let Some(count) = parse_arg::<usize>(matches, "random")? {
        return Ok(passengers::generate_passengers(count, n_floors, seed));
    }
    if let Some(path) = &config.passengers.file {
        return passengers::load_passengers(path);
    }
    if let Some(count) = config.passengers.random {
        return Ok(passengers::generate_passengers(count, n_floors, seed));
    }

    warn!("No passengers configured, elevators will park immediately");
    Ok(Vec::new())
}

/* Main */
fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut config = unwrap_or_exit!(config::load_config(config_path));
    let headless = matches.is_present("headless");
    if headless {
        config.display.enabled = false;
        config.display.realtime = false;
    }

    let passengers = unwrap_or_exit!(resolve_passengers(&config, &matches));
    unwrap_or_exit!(passengers::validate_passengers(&passengers, config.simulation.n_floors));
    if let Some(path) = matches.value_of("save-passengers") {
        unwrap_or_exit!(passengers::save_passengers(path, &passengers));
        info!("Saved {} passenger(s) to {}", passengers.len(), path);
    }

    // Start the display module
    let (display_event_tx, display_event_rx) = cbc::unbounded::<DisplayEvent>();
    let display = TerminalDisplay::new(&config.display, display_event_rx);
    let display_thread = Builder::new()
        .name("display".into())
        .spawn(move || display.run())?;

    // Start the coordinator
    let render_sink: Box<dyn RenderSink> = if config.display.enabled {
        Box::new(ChannelSink::new(display_event_tx.clone()))
    } else {
        Box::new(NoopSink)
    };
    let report_sink = Box::new(ChannelSink::new(display_event_tx));
    let mut coordinator = unwrap_or_exit!(Coordinator::new(
        &config.simulation,
        passengers,
        render_sink,
        report_sink,
    ));

    let report = if config.display.realtime {
        let (_terminate_tx, terminate_rx) = cbc::unbounded::<()>();
        let ticker = cbc::tick(Duration::from_millis(config.simulation.frame_time_ms));
        coordinator.run(ticker, terminate_rx)
    } else {
        coordinator.run_until_settled();
        coordinator.report()
    };
    let ticks = coordinator.ticks();

    // Closing the sinks ends the display loop
    drop(coordinator);
    if display_thread.join().is_err() {
        error!("Display thread panicked");
    }

    info!(
        "Simulation settled after {} ticks, {} passenger(s) delivered",
        ticks, report.delivered_count
    );
    if matches.is_present("summary-json") {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize report: {}", e),
        }
    }

    Ok(())
}
