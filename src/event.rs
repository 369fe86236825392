use serde::{Deserialize, Serialize};

use crate::ids::{TypeId, VehicleId};

/// An input event for the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RegistryEvent {
    /// Create or overwrite a vehicle's schedule.
    SetSchedule {
        vehicle: VehicleId,
        mileage: u64,
        interval: u64,
    },
    /// Report the odometer and ask whether service is due.
    UpdateMileage { vehicle: VehicleId, mileage: u64 },
    /// A service was completed at `mileage`.
    RecordMaintenance { vehicle: VehicleId, mileage: u64 },
    /// Register a maintenance type in the catalog.
    AddType {
        name: String,
        description: String,
        recommended_interval: u64,
    },
}

impl RegistryEvent {
    /// The vehicle this event targets, if any.
    pub fn vehicle(&self) -> Option<VehicleId> {
        match self {
            RegistryEvent::SetSchedule { vehicle, .. }
            | RegistryEvent::UpdateMileage { vehicle, .. }
            | RegistryEvent::RecordMaintenance { vehicle, .. } => Some(*vehicle),
            RegistryEvent::AddType { .. } => None,
        }
    }
}

/// Result of applying a [`RegistryEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Outcome {
    ScheduleSet,
    Due(bool),
    MaintenanceRecorded,
    TypeAdded(TypeId),
}
