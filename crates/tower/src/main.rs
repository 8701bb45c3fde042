mod parser;
mod scenario;

use std::path::Path;

use scope::{
    AircraftId, AircraftSnapshot, Notice, NoticeBus, ScopeError, ScopeModel, StripBoard,
    StripBoardError, StripSurface, ThemeState, UiLog,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::parser::parse_scope_input;
use crate::scenario::{
    load_scenario_file, parse_scenario_json, Scenario, ScenarioLoadResult, ScriptAction,
};

const DEMO_SCENARIO_JSON: &str = include_str!("../assets/demo.json");

#[derive(Debug, Default)]
struct TracingUiLog;

impl UiLog for TracingUiLog {
    fn log(&mut self, message: &str, warning: bool) {
        if warning {
            warn!(text = message, "operator_log");
        } else {
            info!(text = message, "operator_log");
        }
    }
}

#[derive(Debug, Default)]
struct LogSurface;

impl StripSurface for LogSurface {
    fn append(&mut self, id: AircraftId) {
        debug!(aircraft = %id, "strip_list_append");
    }

    fn detach(&mut self, id: AircraftId) {
        debug!(aircraft = %id, "strip_list_detach");
    }

    fn nudge_scroll(&mut self, delta_rows: i32) {
        debug!(delta_rows, "strip_list_scroll");
    }

    fn set_hidden(&mut self, hidden: bool) {
        debug!(hidden, "strip_list_hidden");
    }
}

#[derive(Debug, Error)]
enum SimError {
    #[error(transparent)]
    Strip(#[from] StripBoardError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error("script selects unknown callsign '{0}'")]
    UnknownScriptCallsign(String),
}

struct TowerSim {
    scenario: Scenario,
    board: StripBoard,
    radar: ScopeModel,
    theme_state: ThemeState,
    bus: NoticeBus,
    ui_log: TracingUiLog,
    tracked: Vec<bool>,
}

impl TowerSim {
    fn new(scenario: Scenario) -> Self {
        let tracked = vec![false; scenario.aircraft.len()];
        Self {
            scenario,
            board: StripBoard::new(Box::new(LogSurface)),
            radar: ScopeModel::new(),
            theme_state: ThemeState::default(),
            bus: NoticeBus::new(),
            ui_log: TracingUiLog,
            tracked,
        }
    }

    fn run(&mut self) -> Result<(), SimError> {
        self.theme_state.enable(&mut self.bus);
        for tick in 0..self.scenario.ticks {
            self.step(tick)?;
        }
        self.theme_state.disable(&mut self.bus);
        self.log_final_state();
        info!(
            scenario = %self.scenario.name,
            strips = self.board.len(),
            targets = self.radar.len(),
            theme = self.theme_state.current().name(),
            "session_complete"
        );
        Ok(())
    }

    fn step(&mut self, tick: u64) -> Result<(), SimError> {
        let actions: Vec<ScriptAction> = self
            .scenario
            .script
            .iter()
            .filter(|step| step.tick == tick)
            .map(|step| step.action.clone())
            .collect();

        // Theme notices land before reconcile so targets tracked this tick
        // see the new theme.
        for action in &actions {
            if let ScriptAction::SetTheme { name } = action {
                self.bus.publish(Notice::SetTheme { name: name.clone() });
            }
        }
        self.theme_state.pump(&mut self.bus);

        let roster = self.reconcile_roster(tick)?;
        self.board.update(&roster)?;
        self.radar.update(&roster)?;

        for action in &actions {
            match action {
                ScriptAction::SetTheme { .. } => {}
                ScriptAction::Input { line } => self.run_input(tick, line),
                ScriptAction::Select { callsign } => self.select_by_callsign(callsign)?,
            }
        }
        Ok(())
    }

    fn reconcile_roster(&mut self, tick: u64) -> Result<Vec<AircraftSnapshot>, SimError> {
        let mut roster = Vec::with_capacity(self.scenario.aircraft.len());
        for (index, aircraft) in self.scenario.aircraft.iter().enumerate() {
            let id = AircraftId(index as u32);
            match aircraft.snapshot_at(tick, id) {
                Some(snapshot) => {
                    if !self.tracked[index] {
                        self.board.create(&snapshot)?;
                        self.radar.track(&snapshot, self.theme_state.current())?;
                        self.tracked[index] = true;
                    }
                    roster.push(snapshot);
                }
                None => {
                    if self.tracked[index] {
                        self.board.remove(id)?;
                        self.radar.release(id)?;
                        self.tracked[index] = false;
                    }
                }
            }
        }
        Ok(roster)
    }

    fn run_input(&mut self, tick: u64, line: &str) {
        match parse_scope_input(line) {
            Ok(command) => {
                let outcome = self.radar.run(command, &mut self.ui_log);
                info!(
                    tick,
                    input = line,
                    accepted = outcome.success,
                    readback = %outcome.message,
                    "scope_command"
                );
            }
            Err(err) => {
                warn!(tick, input = line, error = %err, "scope_input_rejected");
            }
        }
    }

    fn select_by_callsign(&mut self, callsign: &str) -> Result<(), SimError> {
        let index = self
            .scenario
            .aircraft
            .iter()
            .position(|aircraft| aircraft.callsign.eq_ignore_ascii_case(callsign))
            .ok_or_else(|| SimError::UnknownScriptCallsign(callsign.to_string()))?;
        let id = AircraftId(index as u32);
        self.board.select(id)?;
        self.radar.select(id)?;
        Ok(())
    }

    fn log_final_state(&self) {
        for id in self.board.visual_order().ids() {
            if let Some(strip) = self.board.find(*id) {
                debug!(
                    aircraft = %id,
                    callsign = %strip.view().callsign,
                    visible = strip.is_visible(),
                    "strip_final"
                );
            }
        }
        for target in self.radar.targets() {
            debug!(
                callsign = target.callsign(),
                halo = target.halo(),
                scratchpad = target.scratchpad(),
                "target_final"
            );
        }
    }
}

fn main() {
    init_tracing();
    info!("=== Tower Scope Startup ===");

    let scenario = match load_requested_scenario() {
        Ok(scenario) => scenario,
        Err(err) => {
            error!(error = %err, "startup_failed");
            std::process::exit(1);
        }
    };
    info!(
        scenario = %scenario.name,
        ticks = scenario.ticks,
        aircraft = scenario.aircraft.len(),
        "scenario_loaded"
    );

    let mut sim = TowerSim::new(scenario);
    if let Err(err) = sim.run() {
        error!(error = %err, "session_failed");
        std::process::exit(1);
    }
}

fn load_requested_scenario() -> ScenarioLoadResult<Scenario> {
    match std::env::args().nth(1) {
        Some(path) => load_scenario_file(Path::new(&path)),
        None => parse_scenario_json(DEMO_SCENARIO_JSON),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use scope::{Theme, TrackedEntity};

    use super::*;

    fn demo_sim() -> TowerSim {
        let scenario = parse_scenario_json(DEMO_SCENARIO_JSON).expect("embedded demo is valid");
        TowerSim::new(scenario)
    }

    #[test]
    fn embedded_demo_scenario_parses_and_validates() {
        let scenario = parse_scenario_json(DEMO_SCENARIO_JSON).expect("embedded demo is valid");
        assert_eq!(scenario.name, "demo-arrival-push");
        assert_eq!(scenario.aircraft.len(), 4);
        assert!(!scenario.script.is_empty());
    }

    #[test]
    fn demo_session_runs_to_completion() {
        let mut sim = demo_sim();
        sim.run().expect("demo session");

        assert_eq!(sim.board.len(), 3);
        assert_eq!(sim.radar.len(), 3);
        assert!(sim.board.find(AircraftId(1)).is_none());
    }

    #[test]
    fn demo_session_applies_scripted_commands() {
        let mut sim = demo_sim();
        sim.run().expect("demo session");

        let aal = sim.radar.find(AircraftId(0)).expect("still tracked");
        assert!(aal.halo());
        assert_eq!(aal.scratchpad(), "NGT");
    }

    #[test]
    fn demo_session_threads_theme_changes_into_new_targets() {
        let mut sim = demo_sim();
        sim.run().expect("demo session");

        // MIDNIGHT lands at tick 2; DAL9 is tracked at tick 3. AUTUMN is
        // unknown and must not displace it.
        assert_eq!(sim.theme_state.current(), Theme::Midnight);
        let dal = sim.radar.find(AircraftId(2)).expect("still tracked");
        assert_eq!(dal.leader_length(), Theme::Midnight.default_leader_length());
    }

    #[test]
    fn demo_session_moves_entering_strips_to_the_end() {
        let mut sim = demo_sim();
        sim.run().expect("demo session");

        let order = sim.board.visual_order();
        let swa = order.position(AircraftId(3)).expect("in order");
        let aal = order.position(AircraftId(0)).expect("in order");
        let dal = order.position(AircraftId(2)).expect("in order");
        assert!(swa < aal);
        assert!(aal < dal);
        assert!(!sim
            .board
            .find(AircraftId(3))
            .expect("strip exists")
            .is_visible());
    }

    #[test]
    fn demo_session_selection_survives_in_both_views() {
        let mut sim = demo_sim();
        sim.run().expect("demo session");

        assert_eq!(
            sim.board.active().map(TrackedEntity::owner),
            Some(AircraftId(2))
        );
        assert_eq!(
            sim.radar.active().map(TrackedEntity::owner),
            Some(AircraftId(2))
        );
    }

    #[test]
    fn scripted_select_of_missing_aircraft_is_fatal() {
        let mut sim = demo_sim();
        sim.scenario.script.push(crate::scenario::ScriptStep {
            tick: 11,
            action: ScriptAction::Select {
                callsign: "GHOST1".to_string(),
            },
        });
        let err = sim.run().unwrap_err();
        assert!(matches!(err, SimError::UnknownScriptCallsign(_)));
    }
}
