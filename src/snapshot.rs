use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::ids::{TypeId, VehicleId};
use crate::maintenance_type::MaintenanceType;
use crate::schedule::Schedule;

/// Serializable image of the whole registry, for handing to an external store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub schedules: Vec<ScheduleEntry>,
    pub types: Vec<TypeEntry>,
    /// Last allocated type id. Restored registries continue after it.
    pub last_type_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub vehicle: VehicleId,
    #[serde(flatten)]
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub id: TypeId,
    #[serde(flatten)]
    pub record: MaintenanceType,
}

impl RegistrySnapshot {
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Snapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| StorageError::Snapshot(e.to_string()))
    }
}
