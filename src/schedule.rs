use serde::{Deserialize, Serialize};

/// Maintenance-tracking record for one vehicle.
///
/// After creation and after every recorded service,
/// `next_maintenance_mileage == last_maintenance_mileage + maintenance_interval`
/// (saturating at `u64::MAX`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub last_maintenance_mileage: u64,
    pub maintenance_interval: u64,
    pub next_maintenance_mileage: u64,
    /// External clock value at the last write.
    pub last_maintenance_date: u64,
}

impl Schedule {
    /// Create a schedule starting from `current_mileage`.
    pub fn new(current_mileage: u64, interval: u64, height: u64) -> Self {
        Self {
            last_maintenance_mileage: current_mileage,
            maintenance_interval: interval,
            next_maintenance_mileage: current_mileage.saturating_add(interval),
            last_maintenance_date: height,
        }
    }

    /// The all-zero record used when a vehicle has no schedule.
    pub fn unscheduled() -> Self {
        Self::default()
    }

    /// Whether `mileage` has reached the due threshold.
    pub fn is_due(&self, mileage: u64) -> bool {
        mileage >= self.next_maintenance_mileage
    }

    /// Copy with the due threshold recomputed from the baseline and interval.
    /// Leaves a consistent record unchanged.
    pub fn recomputed(&self) -> Self {
        Self {
            next_maintenance_mileage: self
                .last_maintenance_mileage
                .saturating_add(self.maintenance_interval),
            ..*self
        }
    }

    /// The record after a service at `current_mileage`, keeping the interval.
    pub fn serviced_at(&self, current_mileage: u64, height: u64) -> Self {
        Self::new(current_mileage, self.maintenance_interval, height)
    }
}
