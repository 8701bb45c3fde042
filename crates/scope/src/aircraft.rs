use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AircraftId(pub u32);

impl fmt::Display for AircraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AircraftSnapshot {
    pub id: AircraftId,
    pub callsign: String,
    pub squawk: String,
    pub inside_controlled_region: bool,
    pub altitude_ft: i32,
    pub ground_speed_kt: u16,
    pub destination: String,
    pub route: String,
}

impl AircraftSnapshot {
    pub fn new(id: AircraftId, callsign: impl Into<String>) -> Self {
        Self {
            id,
            callsign: callsign.into(),
            squawk: "0000".to_string(),
            inside_controlled_region: false,
            altitude_ft: 0,
            ground_speed_kt: 0,
            destination: String::new(),
            route: String::new(),
        }
    }

    pub fn with_squawk(mut self, squawk: impl Into<String>) -> Self {
        self.squawk = squawk.into();
        self
    }

    pub fn with_inside_controlled_region(mut self, inside: bool) -> Self {
        self.inside_controlled_region = inside;
        self
    }

    pub fn with_altitude_ft(mut self, altitude_ft: i32) -> Self {
        self.altitude_ft = altitude_ft;
        self
    }

    pub fn with_ground_speed_kt(mut self, ground_speed_kt: u16) -> Self {
        self.ground_speed_kt = ground_speed_kt;
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_builder_fills_reasonable_defaults() {
        let snapshot = AircraftSnapshot::new(AircraftId(7), "AAL123");
        assert_eq!(snapshot.id, AircraftId(7));
        assert_eq!(snapshot.callsign, "AAL123");
        assert_eq!(snapshot.squawk, "0000");
        assert!(!snapshot.inside_controlled_region);
        assert_eq!(snapshot.altitude_ft, 0);
    }

    #[test]
    fn snapshot_builder_overrides_stick() {
        let snapshot = AircraftSnapshot::new(AircraftId(1), "UAL604")
            .with_squawk("2345")
            .with_inside_controlled_region(true)
            .with_altitude_ft(11_000)
            .with_ground_speed_kt(250)
            .with_destination("KSFO")
            .with_route("HYP..SFO");
        assert_eq!(snapshot.squawk, "2345");
        assert!(snapshot.inside_controlled_region);
        assert_eq!(snapshot.altitude_ft, 11_000);
        assert_eq!(snapshot.ground_speed_kt, 250);
        assert_eq!(snapshot.destination, "KSFO");
        assert_eq!(snapshot.route, "HYP..SFO");
    }

    #[test]
    fn aircraft_id_displays_as_bare_number() {
        assert_eq!(AircraftId(42).to_string(), "42");
    }
}
