use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use scope::{AircraftId, AircraftSnapshot};

pub type ScenarioLoadResult<T> = Result<T, String>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub ticks: u64,
    pub aircraft: Vec<ScenarioAircraft>,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioAircraft {
    pub callsign: String,
    pub squawk: String,
    pub destination: String,
    pub route: String,
    pub altitude_ft: i32,
    pub ground_speed_kt: u16,
    pub spawn_tick: u64,
    pub enter_tick: u64,
    #[serde(default)]
    pub exit_tick: Option<u64>,
    #[serde(default)]
    pub remove_tick: Option<u64>,
}

impl ScenarioAircraft {
    pub fn snapshot_at(&self, tick: u64, id: AircraftId) -> Option<AircraftSnapshot> {
        if tick < self.spawn_tick {
            return None;
        }
        if let Some(remove_tick) = self.remove_tick {
            if tick >= remove_tick {
                return None;
            }
        }
        let inside = tick >= self.enter_tick
            && self.exit_tick.map_or(true, |exit_tick| tick < exit_tick);
        Some(
            AircraftSnapshot::new(id, self.callsign.clone())
                .with_squawk(self.squawk.clone())
                .with_inside_controlled_region(inside)
                .with_altitude_ft(self.altitude_ft)
                .with_ground_speed_kt(self.ground_speed_kt)
                .with_destination(self.destination.clone())
                .with_route(self.route.clone()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptStep {
    pub tick: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    Input { line: String },
    SetTheme { name: String },
    Select { callsign: String },
}

pub fn load_scenario_file(path: &Path) -> ScenarioLoadResult<Scenario> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("read scenario '{}': {error}", path.display()))?;
    parse_scenario_json(&raw)
}

pub fn parse_scenario_json(raw: &str) -> ScenarioLoadResult<Scenario> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let scenario = match serde_path_to_error::deserialize::<_, Scenario>(&mut deserializer) {
        Ok(scenario) => scenario,
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                return Err(format!("parse scenario json: {source}"));
            }
            return Err(format!("parse scenario json at {path}: {source}"));
        }
    };
    validate_scenario(&scenario)?;
    Ok(scenario)
}

fn validation_err(path: &str, message: impl Into<String>) -> String {
    format!("validation failed at {path}: {}", message.into())
}

fn expected_actual(path: &str, expected: impl Display, actual: impl Display) -> String {
    validation_err(path, format!("expected {expected}, got {actual}"))
}

fn validate_scenario(scenario: &Scenario) -> ScenarioLoadResult<()> {
    if scenario.name.trim().is_empty() {
        return Err(validation_err("name", "scenario name must not be empty"));
    }
    if scenario.ticks == 0 {
        return Err(expected_actual("ticks", "at least 1", scenario.ticks));
    }

    let mut known_callsigns = HashMap::with_capacity(scenario.aircraft.len());
    let mut known_squawks = HashMap::with_capacity(scenario.aircraft.len());
    for (index, aircraft) in scenario.aircraft.iter().enumerate() {
        let callsign_path = format!("aircraft[{index}].callsign");
        if aircraft.callsign.trim().is_empty() {
            return Err(validation_err(&callsign_path, "callsign must not be empty"));
        }
        if let Some(first_index) =
            known_callsigns.insert(aircraft.callsign.to_ascii_uppercase(), index)
        {
            return Err(validation_err(
                &callsign_path,
                format!(
                    "duplicate callsign {} (first seen at aircraft[{first_index}].callsign)",
                    aircraft.callsign
                ),
            ));
        }

        let squawk_path = format!("aircraft[{index}].squawk");
        if aircraft.squawk.len() != 4
            || !aircraft
                .squawk
                .chars()
                .all(|digit| ('0'..='7').contains(&digit))
        {
            return Err(expected_actual(
                &squawk_path,
                "four octal digits",
                format!("'{}'", aircraft.squawk),
            ));
        }
        if let Some(first_index) = known_squawks.insert(aircraft.squawk.clone(), index) {
            return Err(validation_err(
                &squawk_path,
                format!(
                    "duplicate squawk {} (first seen at aircraft[{first_index}].squawk)",
                    aircraft.squawk
                ),
            ));
        }

        if aircraft.enter_tick < aircraft.spawn_tick {
            return Err(expected_actual(
                &format!("aircraft[{index}].enter_tick"),
                format!("at least spawn_tick {}", aircraft.spawn_tick),
                aircraft.enter_tick,
            ));
        }
        if let Some(exit_tick) = aircraft.exit_tick {
            if exit_tick <= aircraft.enter_tick {
                return Err(expected_actual(
                    &format!("aircraft[{index}].exit_tick"),
                    format!("after enter_tick {}", aircraft.enter_tick),
                    exit_tick,
                ));
            }
        }
        if let Some(remove_tick) = aircraft.remove_tick {
            if remove_tick <= aircraft.spawn_tick {
                return Err(expected_actual(
                    &format!("aircraft[{index}].remove_tick"),
                    format!("after spawn_tick {}", aircraft.spawn_tick),
                    remove_tick,
                ));
            }
        }
    }

    for (index, step) in scenario.script.iter().enumerate() {
        if step.tick >= scenario.ticks {
            return Err(expected_actual(
                &format!("script[{index}].tick"),
                format!("below ticks {}", scenario.ticks),
                step.tick,
            ));
        }
        if let ScriptAction::Select { callsign } = &step.action {
            let Some(aircraft) = scenario
                .aircraft
                .iter()
                .find(|aircraft| aircraft.callsign.eq_ignore_ascii_case(callsign))
            else {
                return Err(validation_err(
                    &format!("script[{index}].select.callsign"),
                    format!("unknown callsign {callsign}"),
                ));
            };
            let alive = step.tick >= aircraft.spawn_tick
                && aircraft
                    .remove_tick
                    .map_or(true, |remove_tick| step.tick < remove_tick);
            if !alive {
                return Err(validation_err(
                    &format!("script[{index}].select"),
                    format!("{callsign} does not exist at tick {}", step.tick),
                ));
            }
        }
    }
    Ok(())
}
