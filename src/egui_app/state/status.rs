/// Severity of the footer message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusTone {
    #[default]
    Idle,
    Busy,
    Info,
    Error,
}

/// Footer text plus its tone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self {
            text: "Loading Climate Data...".into(),
            tone: StatusTone::Busy,
        }
    }
}
