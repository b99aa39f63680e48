use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pricing::FareSplit;
use crate::selection::{DriverSelection, FirstAvailable, LeastRecentlyDriven};

/// Which driver-selection policy the dispatcher runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicyKind {
    #[default]
    LeastRecentlyDriven,
    FirstAvailable,
}

impl SelectionPolicyKind {
    pub fn build(self) -> Box<dyn DriverSelection> {
        match self {
            SelectionPolicyKind::LeastRecentlyDriven => Box::new(LeastRecentlyDriven),
            SelectionPolicyKind::FirstAvailable => Box::new(FirstAvailable),
        }
    }
}

/// Dispatcher settings. Every field falls back to its default when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub fare_split: FareSplit,
    pub selection: SelectionPolicyKind,
}

impl DispatchConfig {
    pub fn with_selection(mut self, selection: SelectionPolicyKind) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_fare_split(mut self, fare_split: FareSplit) -> Self {
        self.fare_split = fare_split;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.fare_split.validate()
    }
}
