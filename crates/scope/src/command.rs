use thiserror::Error;
use tracing::{debug, warn};

use crate::aircraft::{AircraftId, AircraftSnapshot};
use crate::collection::{CollectionError, EntityCollection, TrackedEntity};
use crate::log::UiLog;
use crate::target::RadarTarget;
use crate::theme::Theme;

const BAD_SYNTAX: &str = "ERR: BAD SYNTAX";
const UNKNOWN_AIRCRAFT: &str = "ERR: UNKNOWN AIRCRAFT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeCommand {
    pub aircraft_reference: String,
    pub command_function: String,
    pub command_arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
}

impl CommandOutcome {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFunction {
    AcceptHandoff,
    AmendAltitude,
    Handoff,
    MoveDataBlock,
    PropagateDataBlock,
    Route,
    SetScratchpad,
    ToggleHalo,
}

impl ScopeFunction {
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "acceptHandoff" => Some(Self::AcceptHandoff),
            "amendAltitude" => Some(Self::AmendAltitude),
            "handoff" => Some(Self::Handoff),
            "moveDataBlock" => Some(Self::MoveDataBlock),
            "propagateDataBlock" | "propogateDataBlock" => Some(Self::PropagateDataBlock),
            "route" => Some(Self::Route),
            "setScratchpad" => Some(Self::SetScratchpad),
            "toggleHalo" => Some(Self::ToggleHalo),
            _ => None,
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::AcceptHandoff => "acceptHandoff",
            Self::AmendAltitude => "amendAltitude",
            Self::Handoff => "handoff",
            Self::MoveDataBlock => "moveDataBlock",
            Self::PropagateDataBlock => "propagateDataBlock",
            Self::Route => "route",
            Self::SetScratchpad => "setScratchpad",
            Self::ToggleHalo => "toggleHalo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error("aircraft {0} reached update() without a radar target; track() must run first")]
    MissingTarget(AircraftId),
}

#[derive(Debug, Default)]
pub struct ScopeModel {
    targets: EntityCollection<RadarTarget>,
}

impl ScopeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn find(&self, id: AircraftId) -> Option<&RadarTarget> {
        self.targets.find_by_owner(id)
    }

    pub fn active(&self) -> Option<&RadarTarget> {
        self.targets.find_active()
    }

    pub fn targets(&self) -> impl Iterator<Item = &RadarTarget> {
        self.targets.iter()
    }

    pub fn track(&mut self, snapshot: &AircraftSnapshot, theme: Theme) -> Result<(), ScopeError> {
        self.targets
            .add_item(RadarTarget::from_snapshot(snapshot, theme))?;
        debug!(callsign = %snapshot.callsign, aircraft = %snapshot.id, "radar_target_tracked");
        Ok(())
    }

    pub fn release(&mut self, id: AircraftId) -> Result<RadarTarget, ScopeError> {
        let target = self
            .targets
            .find_by_owner_mut(id)
            .ok_or(CollectionError::NotFound(id))?;
        target.dispose();
        let released = self.targets.remove_item(id)?;
        debug!(aircraft = %id, "radar_target_released");
        Ok(released)
    }

    pub fn update(&mut self, roster: &[AircraftSnapshot]) -> Result<(), ScopeError> {
        for snapshot in roster {
            let target = self
                .targets
                .find_by_owner_mut(snapshot.id)
                .ok_or(ScopeError::MissingTarget(snapshot.id))?;
            target.refresh(snapshot);
        }
        Ok(())
    }

    pub fn select(&mut self, id: AircraftId) -> Result<(), ScopeError> {
        self.targets.set_active(id)?;
        Ok(())
    }

    pub fn deselect_active(&mut self) {
        if let Some(target) = self.targets.find_active_mut() {
            target.deactivate();
        }
    }

    pub fn run(&mut self, command: ScopeCommand, ui_log: &mut dyn UiLog) -> CommandOutcome {
        // The function name resolves before the aircraft reference by contract.
        let Some(function) = ScopeFunction::from_wire_name(&command.command_function) else {
            debug!(function = %command.command_function, "scope_command_unknown_function");
            return CommandOutcome::rejected(BAD_SYNTAX);
        };
        let Some(target) = self
            .targets
            .iter_mut()
            .find(|target| target.matches_reference(&command.aircraft_reference))
        else {
            debug!(reference = %command.aircraft_reference, "scope_command_unknown_aircraft");
            return CommandOutcome::rejected(UNKNOWN_AIRCRAFT);
        };

        match function {
            ScopeFunction::ToggleHalo => target.toggle_halo(),
            ScopeFunction::SetScratchpad => {
                let text = command
                    .command_arguments
                    .first()
                    .map(String::as_str)
                    .unwrap_or("");
                target.set_scratchpad(text)
            }
            ScopeFunction::MoveDataBlock => match command.command_arguments.as_slice() {
                [argument] => target.move_data_block(argument),
                _ => CommandOutcome::rejected(BAD_SYNTAX),
            },
            ScopeFunction::AcceptHandoff
            | ScopeFunction::AmendAltitude
            | ScopeFunction::Handoff
            | ScopeFunction::PropagateDataBlock
            | ScopeFunction::Route => report_not_yet_available(function, &command, ui_log),
        }
    }
}

// Accepted rather than rejected so recorded sessions stay replayable once
// the handler lands.
fn report_not_yet_available(
    function: ScopeFunction,
    command: &ScopeCommand,
    ui_log: &mut dyn UiLog,
) -> CommandOutcome {
    ui_log.log(
        &format!("{} command not yet available", function.wire_name()),
        true,
    );
    warn!(function = function.wire_name(), "scope_command_stubbed");
    CommandOutcome::accepted(format!(
        "user input received: '{}'",
        command.command_arguments.join(",")
    ))
}
