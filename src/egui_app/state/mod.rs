//! Shared state types for the egui UI.

mod alert;
mod status;

pub use alert::AlertState;
pub use status::{StatusBarState, StatusTone};

/// The two top-level screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    /// Likelihood chart with per-point insights.
    #[default]
    Trends,
    /// Free-text actions and country picker.
    Contribution,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Self::Trends => "Trends",
            Self::Contribution => "Your Contribution",
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub screen: Screen,
    /// Blocking alert; input to the screens is suspended while set.
    pub alert: Option<AlertState>,
    pub status: StatusBarState,
}
