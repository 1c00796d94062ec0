use std::fs;

use droneway::config::Config;
use droneway::error::AppError;
use droneway::{render, scheduler, timeline, topology};

fn main() {
    env_logger::init();

    let config = Config::from_process();

    if let Err(err) = run(&config) {
        log::error!("aborting: {err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    log::info!("loading topology from {}", config.map_path);

    let input = fs::read_to_string(&config.map_path)?;
    let network = topology::load(&config.map_path, &input)?;
    log::info!(
        "network validated: {} hubs, {} connections, {} drones",
        network.hub_count(),
        network.connection_count(),
        network.nb_drones()
    );

    let schedule = scheduler::schedule(&network);
    let dropped = network.nb_drones() as usize - schedule.len();
    let tl = timeline::project(&network, &schedule);
    log::info!(
        "schedule complete: {} placed, {} dropped, T_max={}",
        schedule.len(),
        dropped,
        tl.max_turn()
    );

    if let Some(snapshot_path) = &config.snapshot_path {
        write_snapshot(snapshot_path, &network, &schedule, &tl)?;
        log::info!("snapshot written to {snapshot_path}");
    }

    print!("{}", render::render(&network, &schedule));

    Ok(())
}

#[derive(serde::Serialize)]
struct Snapshot<'a> {
    network: &'a droneway::Network,
    paths: &'a scheduler::Schedule,
    timeline: &'a timeline::Timeline,
}

fn write_snapshot(
    path: &str,
    network: &droneway::Network,
    schedule: &scheduler::Schedule,
    tl: &timeline::Timeline,
) -> Result<(), AppError> {
    let snapshot = Snapshot {
        network,
        paths: schedule,
        timeline: tl,
    };
    let json = serde_json::to_string_pretty(&snapshot)
        .expect("Network/Schedule/Timeline are always representable as JSON");
    fs::write(path, json)?;
    Ok(())
}
