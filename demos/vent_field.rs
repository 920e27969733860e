// Runs a vent-field world with progress reporting and a timing report.
//
//     cargo run --release --example vent_field [config.json]
//
// Without a config path the defaults are used with every vent type placed
// along the sediment surface.

use primordial_vents::config::{SimConfig, VentLayout};
use primordial_vents::sim::{SimProps, Simulation};
use std::fs;

const DEFAULT_STEPS: u64 = 5000;
const REPORT_INTERVAL: u64 = 250;

fn load_config() -> Result<SimConfig, String> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path).map_err(|e| format!("cannot read {}: {}", path, e))?;
            SimConfig::from_json_str(&json)
        }
        None => {
            let mut config = SimConfig::default().with_seed(2024).with_steps(DEFAULT_STEPS);
            config.vents.layout = VentLayout::Field;
            config.report_interval = REPORT_INTERVAL;
            Ok(config)
        }
    }
}

fn main() -> Result<(), String> {
    let config = load_config()?;
    let ops = Simulation::default_ops(&config);
    let mut sim = Simulation::new(SimProps {
        name: "vent-field",
        config,
        ops,
        debug: true,
    })?;
    sim.run();

    let survivors = sim.agent_snapshot();
    let json = serde_json::to_string_pretty(&survivors).map_err(|e| e.to_string())?;
    fs::write("vent_field_survivors.json", json).map_err(|e| e.to_string())?;
    println!("💾 wrote {} survivor snapshots to vent_field_survivors.json", survivors.len());
    Ok(())
}
