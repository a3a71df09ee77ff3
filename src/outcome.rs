use serde::Serialize;

/// The `(success, message)` pair every backup operation reports back with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub msg: String,
}

impl Outcome {
    pub fn new(success: bool, msg: impl Into<String>) -> Self {
        Self {
            success,
            msg: msg.into(),
        }
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::new(true, msg)
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self::new(false, msg)
    }
}

impl From<Outcome> for (bool, String) {
    fn from(outcome: Outcome) -> Self {
        (outcome.success, outcome.msg)
    }
}
