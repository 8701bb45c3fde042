use thiserror::Error;
use tracing::{debug, info};

use crate::aircraft::{AircraftId, AircraftSnapshot};
use crate::collection::{CollectionError, EntityCollection, TrackedEntity};

pub const STRIP_APPEND_SCROLL_ROWS: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripViewState {
    pub callsign: String,
    pub squawk: String,
    pub altitude_ft: i32,
    pub ground_speed_kt: u16,
    pub destination: String,
    pub route: String,
}

impl StripViewState {
    fn from_snapshot(snapshot: &AircraftSnapshot) -> Self {
        Self {
            callsign: snapshot.callsign.clone(),
            squawk: snapshot.squawk.clone(),
            altitude_ft: snapshot.altitude_ft,
            ground_speed_kt: snapshot.ground_speed_kt,
            destination: snapshot.destination.clone(),
            route: snapshot.route.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightStrip {
    owner: AircraftId,
    view: StripViewState,
    inside_controlled_region: bool,
    visible: bool,
    active: bool,
    disposed: bool,
    refresh_count: u64,
}

impl FlightStrip {
    pub fn from_snapshot(snapshot: &AircraftSnapshot) -> Self {
        // The region flag is cached as-is, so the first update is not an entry.
        Self {
            owner: snapshot.id,
            view: StripViewState::from_snapshot(snapshot),
            inside_controlled_region: snapshot.inside_controlled_region,
            visible: snapshot.inside_controlled_region,
            active: false,
            disposed: false,
            refresh_count: 0,
        }
    }

    pub fn view(&self) -> &StripViewState {
        &self.view
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn inside_controlled_region(&self) -> bool {
        self.inside_controlled_region
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    pub fn refresh(&mut self, snapshot: &AircraftSnapshot) -> bool {
        debug_assert!(!self.disposed, "strip refreshed after dispose");
        let next = StripViewState::from_snapshot(snapshot);
        if self.visible && self.inside_controlled_region && next == self.view {
            return false;
        }
        self.view = next;
        self.visible = true;
        self.inside_controlled_region = true;
        self.refresh_count += 1;
        true
    }

    pub fn hide(&mut self) {
        debug_assert!(!self.disposed, "strip hidden after dispose");
        // Clearing the cached flag makes the next inside tick read as an entry.
        self.visible = false;
        self.inside_controlled_region = false;
    }
}

impl TrackedEntity for FlightStrip {
    fn owner(&self) -> AircraftId {
        self.owner
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) {
        debug_assert!(!self.disposed, "strip activated after dispose");
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn dispose(&mut self) {
        debug_assert!(!self.disposed, "strip disposed twice");
        self.disposed = true;
        self.active = false;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualOrder {
    ids: Vec<AircraftId>,
}

impl VisualOrder {
    pub fn append(&mut self, id: AircraftId) {
        debug_assert!(!self.ids.contains(&id), "id appended twice");
        self.ids.push(id);
    }

    pub fn remove(&mut self, id: AircraftId) {
        self.ids.retain(|existing| *existing != id);
    }

    pub fn move_to_end(&mut self, id: AircraftId) {
        self.remove(id);
        self.ids.push(id);
    }

    pub fn position(&self, id: AircraftId) -> Option<usize> {
        self.ids.iter().position(|existing| *existing == id)
    }

    pub fn ids(&self) -> &[AircraftId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

pub trait StripSurface {
    fn append(&mut self, id: AircraftId);
    fn detach(&mut self, id: AircraftId);
    fn nudge_scroll(&mut self, delta_rows: i32);
    fn set_hidden(&mut self, hidden: bool);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl StripSurface for NullSurface {
    fn append(&mut self, _id: AircraftId) {}
    fn detach(&mut self, _id: AircraftId) {}
    fn nudge_scroll(&mut self, _delta_rows: i32) {}
    fn set_hidden(&mut self, _hidden: bool) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StripBoardError {
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error("aircraft {0} reached update() without a strip; create() must run first")]
    MissingStrip(AircraftId),
    #[error("aircraft {0} is not managed by this board")]
    NotManaged(AircraftId),
}

pub struct StripBoard {
    strips: EntityCollection<FlightStrip>,
    order: VisualOrder,
    surface: Box<dyn StripSurface>,
    hidden: bool,
}

impl Default for StripBoard {
    fn default() -> Self {
        Self::new(Box::new(NullSurface))
    }
}

impl StripBoard {
    pub fn new(surface: Box<dyn StripSurface>) -> Self {
        Self {
            strips: EntityCollection::new(),
            order: VisualOrder::default(),
            surface,
            hidden: false,
        }
    }

    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    pub fn visual_order(&self) -> &VisualOrder {
        &self.order
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn find(&self, id: AircraftId) -> Option<&FlightStrip> {
        self.strips.find_by_owner(id)
    }

    pub fn active(&self) -> Option<&FlightStrip> {
        self.strips.find_active()
    }

    pub fn create(&mut self, snapshot: &AircraftSnapshot) -> Result<(), StripBoardError> {
        self.strips.add_item(FlightStrip::from_snapshot(snapshot))?;
        self.order.append(snapshot.id);
        self.append_to_surface(snapshot.id);
        info!(callsign = %snapshot.callsign, aircraft = %snapshot.id, "strip_created");
        Ok(())
    }

    pub fn update(&mut self, roster: &[AircraftSnapshot]) -> Result<(), StripBoardError> {
        for snapshot in roster {
            let strip = self
                .strips
                .find_by_owner_mut(snapshot.id)
                .ok_or(StripBoardError::MissingStrip(snapshot.id))?;
            let entered_region =
                snapshot.inside_controlled_region && !strip.inside_controlled_region();

            if snapshot.inside_controlled_region {
                strip.refresh(snapshot);
            } else {
                strip.hide();
            }

            if entered_region {
                self.order.move_to_end(snapshot.id);
                self.surface.detach(snapshot.id);
                self.append_to_surface(snapshot.id);
                debug!(aircraft = %snapshot.id, "strip_reappended");
            }
        }
        Ok(())
    }

    pub fn select(&mut self, id: AircraftId) -> Result<(), StripBoardError> {
        self.strips.set_active(id)?;
        debug!(aircraft = %id, "strip_selected");
        Ok(())
    }

    pub fn deselect(&mut self, id: AircraftId) -> Result<(), StripBoardError> {
        let strip = self
            .strips
            .find_by_owner_mut(id)
            .ok_or(StripBoardError::NotManaged(id))?;
        strip.deactivate();
        Ok(())
    }

    pub fn deselect_active(&mut self) {
        if let Some(strip) = self.strips.find_active_mut() {
            strip.deactivate();
        }
    }

    pub fn remove(&mut self, id: AircraftId) -> Result<FlightStrip, StripBoardError> {
        let strip = self
            .strips
            .find_by_owner_mut(id)
            .ok_or(CollectionError::NotFound(id))?;
        strip.dispose();
        let removed = self.strips.remove_item(id)?;
        self.order.remove(id);
        self.surface.detach(id);
        info!(aircraft = %id, "strip_removed");
        Ok(removed)
    }

    pub fn handle_background_click(&mut self) {
        self.deselect_active();
    }

    pub fn handle_toggle_click(&mut self) {
        self.hidden = !self.hidden;
        self.surface.set_hidden(self.hidden);
        debug!(hidden = self.hidden, "strip_list_toggled");
    }

    fn append_to_surface(&mut self, id: AircraftId) {
        self.surface.append(id);
        self.surface.nudge_scroll(STRIP_APPEND_SCROLL_ROWS);
    }
}
