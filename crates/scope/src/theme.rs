use tracing::{error, info};

use crate::bus::{Notice, NoticeBus, SubscriberId};
use crate::target::LeaderDirection;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Classic,
    Midnight,
    HighContrast,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "CLASSIC" => Some(Self::Classic),
            "MIDNIGHT" => Some(Self::Midnight),
            "HIGH_CONTRAST" => Some(Self::HighContrast),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "CLASSIC",
            Self::Midnight => "MIDNIGHT",
            Self::HighContrast => "HIGH_CONTRAST",
        }
    }

    pub fn default_leader_direction(self) -> LeaderDirection {
        match self {
            Self::Classic | Self::Midnight => LeaderDirection::Southeast,
            Self::HighContrast => LeaderDirection::Northeast,
        }
    }

    pub fn default_leader_length(self) -> u8 {
        match self {
            Self::Classic | Self::HighContrast => 1,
            Self::Midnight => 2,
        }
    }
}

#[derive(Debug, Default)]
pub struct ThemeState {
    current: Theme,
    subscription: Option<SubscriberId>,
}

impl ThemeState {
    pub fn new(initial: Theme) -> Self {
        Self {
            current: initial,
            subscription: None,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn set_theme(&mut self, name: &str) {
        match Theme::from_name(name) {
            Some(theme) => {
                if theme != self.current {
                    info!(theme = theme.name(), "theme_changed");
                }
                self.current = theme;
            }
            None => {
                error!(requested = name, "unknown_theme_name");
            }
        }
    }

    pub fn enable(&mut self, bus: &mut NoticeBus) {
        if self.subscription.is_none() {
            self.subscription = Some(bus.subscribe());
        }
    }

    pub fn disable(&mut self, bus: &mut NoticeBus) {
        if let Some(id) = self.subscription.take() {
            bus.unsubscribe(id);
        }
    }

    pub fn pump(&mut self, bus: &mut NoticeBus) {
        let Some(id) = self.subscription else {
            return;
        };
        let mut pending = Vec::new();
        bus.drain(id, &mut pending);
        for notice in pending {
            match notice {
                Notice::SetTheme { name } => self.set_theme(&name),
            }
        }
    }
}
