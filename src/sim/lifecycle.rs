//! Engine readiness gate

use serde::{Deserialize, Serialize};

/// Uninitialized -> Active -> TornDown, never backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Active,
    TornDown,
}

impl Lifecycle {
    pub fn is_active(self) -> bool {
        self == Lifecycle::Active
    }

    /// Uninitialized -> Active. Returns true if the transition happened.
    pub fn activate(&mut self) -> bool {
        if *self == Lifecycle::Uninitialized {
            *self = Lifecycle::Active;
            true
        } else {
            false
        }
    }

    /// Active -> TornDown. Returns true if the transition happened.
    pub fn tear_down(&mut self) -> bool {
        if *self == Lifecycle::Active {
            *self = Lifecycle::TornDown;
            true
        } else {
            false
        }
    }
}
