use serde::{Deserialize, Serialize};

/// A catalog entry describing a kind of service. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceType {
    pub name: String,
    pub description: String,
    pub recommended_interval: u64,
}

impl MaintenanceType {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        recommended_interval: u64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            recommended_interval,
        }
    }
}
