use crate::aircraft::{AircraftId, AircraftSnapshot};
use crate::collection::TrackedEntity;
use crate::command::CommandOutcome;
use crate::theme::Theme;

pub const SCRATCHPAD_MAX_CHARS: usize = 3;
pub const LEADER_LENGTH_MAX: u8 = 6;

/// Leader direction convention:
/// - Digits follow the numeric keypad: 8 north, 9 northeast, 6 east, and so on.
/// - 5 (the keypad center) and 0 resolve to no direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl LeaderDirection {
    pub fn from_keypad(digit: u8) -> Option<Self> {
        match digit {
            8 => Some(Self::North),
            9 => Some(Self::Northeast),
            6 => Some(Self::East),
            3 => Some(Self::Southeast),
            2 => Some(Self::South),
            1 => Some(Self::Southwest),
            4 => Some(Self::West),
            7 => Some(Self::Northwest),
            _ => None,
        }
    }

    pub fn keypad(self) -> u8 {
        match self {
            Self::North => 8,
            Self::Northeast => 9,
            Self::East => 6,
            Self::Southeast => 3,
            Self::South => 2,
            Self::Southwest => 1,
            Self::West => 4,
            Self::Northwest => 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarTarget {
    owner: AircraftId,
    callsign: String,
    squawk: String,
    leader_direction: LeaderDirection,
    leader_length: u8,
    halo: bool,
    scratchpad: String,
    altitude_ft: i32,
    inside_controlled_region: bool,
    active: bool,
    disposed: bool,
}

impl RadarTarget {
    pub fn from_snapshot(snapshot: &AircraftSnapshot, theme: Theme) -> Self {
        Self {
            owner: snapshot.id,
            callsign: snapshot.callsign.clone(),
            squawk: snapshot.squawk.clone(),
            leader_direction: theme.default_leader_direction(),
            leader_length: theme.default_leader_length(),
            halo: false,
            scratchpad: String::new(),
            altitude_ft: snapshot.altitude_ft,
            inside_controlled_region: snapshot.inside_controlled_region,
            active: false,
            disposed: false,
        }
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    pub fn squawk(&self) -> &str {
        &self.squawk
    }

    pub fn leader_direction(&self) -> LeaderDirection {
        self.leader_direction
    }

    pub fn leader_length(&self) -> u8 {
        self.leader_length
    }

    pub fn halo(&self) -> bool {
        self.halo
    }

    pub fn scratchpad(&self) -> &str {
        &self.scratchpad
    }

    pub fn altitude_ft(&self) -> i32 {
        self.altitude_ft
    }

    pub fn inside_controlled_region(&self) -> bool {
        self.inside_controlled_region
    }

    pub fn matches_reference(&self, reference: &str) -> bool {
        self.callsign.eq_ignore_ascii_case(reference) || self.squawk == reference
    }

    pub fn refresh(&mut self, snapshot: &AircraftSnapshot) {
        debug_assert!(!self.disposed, "radar target refreshed after dispose");
        self.altitude_ft = snapshot.altitude_ft;
        self.inside_controlled_region = snapshot.inside_controlled_region;
    }

    pub fn toggle_halo(&mut self) -> CommandOutcome {
        debug_assert!(!self.disposed, "radar target edited after dispose");
        self.halo = !self.halo;
        CommandOutcome::accepted("TOGGLE HALO")
    }

    pub fn set_scratchpad(&mut self, text: &str) -> CommandOutcome {
        debug_assert!(!self.disposed, "radar target edited after dispose");
        if text.chars().count() > SCRATCHPAD_MAX_CHARS {
            return CommandOutcome::rejected("ERR: SCRATCHPAD MAX 3 CHAR");
        }
        self.scratchpad = text.to_ascii_uppercase();
        CommandOutcome::accepted("SET SCRATCHPAD")
    }

    pub fn move_data_block(&mut self, argument: &str) -> CommandOutcome {
        debug_assert!(!self.disposed, "radar target edited after dispose");
        let Some((direction, length)) = parse_data_block_argument(argument) else {
            return CommandOutcome::rejected("ERR: BAD SYNTAX");
        };
        if let Some(direction) = direction {
            self.leader_direction = direction;
        }
        if let Some(length) = length {
            self.leader_length = length;
        }
        CommandOutcome::accepted("ADJUST DATA BLOCK")
    }
}

fn parse_data_block_argument(
    argument: &str,
) -> Option<(Option<LeaderDirection>, Option<u8>)> {
    let trimmed = argument.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (direction_part, length_part) = match trimmed.split_once('/') {
        Some((direction, length)) => (direction, Some(length)),
        None => (trimmed, None),
    };

    let direction = if direction_part.is_empty() {
        None
    } else {
        let digit = direction_part.parse::<u8>().ok()?;
        Some(LeaderDirection::from_keypad(digit)?)
    };

    let length = match length_part {
        Some(raw) => {
            let value = raw.parse::<u8>().ok()?;
            if value > LEADER_LENGTH_MAX {
                return None;
            }
            Some(value)
        }
        None => None,
    };

    if direction.is_none() && length.is_none() {
        return None;
    }
    Some((direction, length))
}

impl TrackedEntity for RadarTarget {
    fn owner(&self) -> AircraftId {
        self.owner
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) {
        debug_assert!(!self.disposed, "radar target activated after dispose");
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn dispose(&mut self) {
        debug_assert!(!self.disposed, "radar target disposed twice");
        self.disposed = true;
        self.active = false;
    }
}
