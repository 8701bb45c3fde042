mod aircraft;
mod bus;
mod collection;
mod command;
mod log;
mod strip;
mod target;
mod theme;

pub use aircraft::{AircraftId, AircraftSnapshot};
pub use bus::{Notice, NoticeBus, SubscriberId};
pub use collection::{CollectionError, EntityCollection, TrackedEntity};
pub use command::{CommandOutcome, ScopeCommand, ScopeError, ScopeFunction, ScopeModel};
pub use log::{BufferedLog, LogEntry, UiLog};
pub use strip::{
    FlightStrip, NullSurface, StripBoard, StripBoardError, StripSurface, StripViewState,
    VisualOrder, STRIP_APPEND_SCROLL_ROWS,
};
pub use target::{LeaderDirection, RadarTarget, LEADER_LENGTH_MAX, SCRATCHPAD_MAX_CHARS};
pub use theme::{Theme, ThemeState};
