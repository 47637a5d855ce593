//! src/app/theme.rs
//!
//! Préférence de thème (clair / sombre), persistée sous forme de chaîne.

use eframe::egui;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Clair,
    #[default]
    Sombre,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Clair => "light",
            Theme::Sombre => "dark",
        }
    }

    pub fn depuis_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Clair),
            "dark" => Some(Theme::Sombre),
            _ => None,
        }
    }

    pub fn bascule(self) -> Self {
        match self {
            Theme::Clair => Theme::Sombre,
            Theme::Sombre => Theme::Clair,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Clair => egui::Visuals::light(),
            Theme::Sombre => egui::Visuals::dark(),
        }
    }
}
