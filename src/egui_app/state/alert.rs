/// Modal message with a single acknowledge button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertState {
    pub title: String,
    pub message: String,
}

impl AlertState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
