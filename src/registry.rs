use std::sync::{Arc, Mutex, MutexGuard};

use crate::clock::HeightSource;
use crate::config::Config;
use crate::error::{RegistryError, StorageError};
use crate::event::{Outcome, RegistryEvent};
use crate::ids::{TypeId, VehicleId};
use crate::maintenance_type::MaintenanceType;
use crate::schedule::Schedule;
use crate::snapshot::{RegistrySnapshot, ScheduleEntry, TypeEntry};
use crate::storage::memory::{InMemoryScheduleStore, InMemoryTypeStore};
use crate::storage::{ScheduleStore, TypeStore};

/// Per-vehicle maintenance schedules plus the maintenance type catalog.
///
/// Mutating operations are serialized by a registry-wide lock so that the
/// read-modify-write of a schedule never interleaves with another writer.
/// Queries only take the store's read lock.
pub struct MaintenanceRegistry {
    schedules: Arc<dyn ScheduleStore>,
    types: Arc<dyn TypeStore>,
    clock: Arc<dyn HeightSource>,
    write_lock: Mutex<()>,
}

impl MaintenanceRegistry {
    /// Create an empty registry backed by in-memory stores.
    pub fn new(clock: Arc<dyn HeightSource>) -> Self {
        Self::with_stores(
            Arc::new(InMemoryScheduleStore::new()),
            Arc::new(InMemoryTypeStore::new()),
            clock,
        )
    }

    pub fn with_stores(
        schedules: Arc<dyn ScheduleStore>,
        types: Arc<dyn TypeStore>,
        clock: Arc<dyn HeightSource>,
    ) -> Self {
        Self {
            schedules,
            types,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Create an empty registry using the configured clock source.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.clock.build())
    }

    /// Rebuild a registry from a snapshot. Type ids continue after the
    /// snapshot's `last_type_id`.
    pub fn restore(
        snapshot: RegistrySnapshot,
        clock: Arc<dyn HeightSource>,
    ) -> Result<Self, RegistryError> {
        let schedules = InMemoryScheduleStore::from_entries(
            snapshot
                .schedules
                .into_iter()
                .map(|entry| (entry.vehicle, entry.schedule)),
        )?;
        let types = InMemoryTypeStore::from_entries(
            snapshot
                .types
                .into_iter()
                .map(|entry| (entry.id, entry.record)),
            snapshot.last_type_id,
        )?;

        let registry = Self::with_stores(Arc::new(schedules), Arc::new(types), clock);
        let schedule_count = registry.schedule_count()?;
        tracing::info!(
            schedules = schedule_count,
            last_type_id = %snapshot.last_type_id,
            "Registry restored from snapshot"
        );
        Ok(registry)
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("registry"))
    }

    /// Create or overwrite the schedule for `vehicle`.
    pub fn set_maintenance_schedule(
        &self,
        vehicle: VehicleId,
        current_mileage: u64,
        interval: u64,
    ) -> Result<(), RegistryError> {
        let _guard = self.lock_writes()?;
        let height = self.clock.current_height();

        let schedule = Schedule::new(current_mileage, interval, height);
        self.schedules.put(vehicle, schedule)?;

        tracing::info!(
            %vehicle,
            mileage = current_mileage,
            interval,
            next = schedule.next_maintenance_mileage,
            height,
            "Maintenance schedule set"
        );
        Ok(())
    }

    /// Report `new_mileage` for `vehicle` and return whether it has reached
    /// the due threshold.
    ///
    /// The threshold is read before the schedule's `next_maintenance_mileage`
    /// is recomputed from its baseline and interval. The mileage itself is not
    /// stored; use [`record_maintenance`](Self::record_maintenance) to advance
    /// the baseline.
    pub fn update_mileage(
        &self,
        vehicle: VehicleId,
        new_mileage: u64,
    ) -> Result<bool, RegistryError> {
        let _guard = self.lock_writes()?;
        let schedule = self
            .schedules
            .get(vehicle)?
            .ok_or(RegistryError::NotFound(vehicle))?;

        let due = schedule.is_due(new_mileage);
        self.schedules.put(vehicle, schedule.recomputed())?;

        tracing::debug!(
            %vehicle,
            mileage = new_mileage,
            threshold = schedule.next_maintenance_mileage,
            due,
            "Mileage updated"
        );
        Ok(due)
    }

    /// Record a completed service at `current_mileage`, keeping the interval.
    pub fn record_maintenance(
        &self,
        vehicle: VehicleId,
        current_mileage: u64,
    ) -> Result<(), RegistryError> {
        let _guard = self.lock_writes()?;
        let schedule = self
            .schedules
            .get(vehicle)?
            .ok_or(RegistryError::NotFound(vehicle))?;

        let height = self.clock.current_height();
        let serviced = schedule.serviced_at(current_mileage, height);
        self.schedules.put(vehicle, serviced)?;

        tracing::info!(
            %vehicle,
            mileage = current_mileage,
            next = serviced.next_maintenance_mileage,
            height,
            "Maintenance recorded"
        );
        Ok(())
    }

    pub fn get_maintenance_schedule(
        &self,
        vehicle: VehicleId,
    ) -> Result<Option<Schedule>, RegistryError> {
        Ok(self.schedules.get(vehicle)?)
    }

    /// Whether service is due at `current_mileage`.
    ///
    /// A vehicle without a schedule is treated as the all-zero record, so it
    /// is always due. This differs from [`update_mileage`](Self::update_mileage),
    /// which fails with [`RegistryError::NotFound`].
    pub fn is_maintenance_due(
        &self,
        vehicle: VehicleId,
        current_mileage: u64,
    ) -> Result<bool, RegistryError> {
        let schedule = self
            .schedules
            .get(vehicle)?
            .unwrap_or_else(Schedule::unscheduled);
        Ok(schedule.is_due(current_mileage))
    }

    /// Register a maintenance type and return its newly allocated id.
    pub fn add_maintenance_type(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        recommended_interval: u64,
    ) -> Result<TypeId, RegistryError> {
        let _guard = self.lock_writes()?;
        let record = MaintenanceType::new(name, description, recommended_interval);
        let name = record.name.clone();

        let id = self.types.insert_next(record)?;

        tracing::info!(
            type_id = %id,
            name = %name,
            recommended_interval,
            "Maintenance type added"
        );
        Ok(id)
    }

    pub fn get_maintenance_type(
        &self,
        id: TypeId,
    ) -> Result<Option<MaintenanceType>, RegistryError> {
        Ok(self.types.get(id)?)
    }

    /// Apply an input event by dispatching to the matching operation.
    pub fn apply(&self, event: RegistryEvent) -> Result<Outcome, RegistryError> {
        match event {
            RegistryEvent::SetSchedule {
                vehicle,
                mileage,
                interval,
            } => {
                self.set_maintenance_schedule(vehicle, mileage, interval)?;
                Ok(Outcome::ScheduleSet)
            }
            RegistryEvent::UpdateMileage { vehicle, mileage } => {
                Ok(Outcome::Due(self.update_mileage(vehicle, mileage)?))
            }
            RegistryEvent::RecordMaintenance { vehicle, mileage } => {
                self.record_maintenance(vehicle, mileage)?;
                Ok(Outcome::MaintenanceRecorded)
            }
            RegistryEvent::AddType {
                name,
                description,
                recommended_interval,
            } => Ok(Outcome::TypeAdded(self.add_maintenance_type(
                name,
                description,
                recommended_interval,
            )?)),
        }
    }

    pub fn schedule_count(&self) -> Result<usize, RegistryError> {
        Ok(self.schedules.count()?)
    }

    pub fn type_count(&self) -> Result<usize, RegistryError> {
        Ok(self.types.count()?)
    }

    pub fn last_type_id(&self) -> Result<TypeId, RegistryError> {
        Ok(self.types.last_id()?)
    }

    /// Capture the full registry state. Writers are held off for the
    /// duration so the schedules, types and counter agree.
    pub fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        let _guard = self.lock_writes()?;

        let schedules = self
            .schedules
            .get_all()?
            .into_iter()
            .map(|(vehicle, schedule)| ScheduleEntry { vehicle, schedule })
            .collect();
        let types = self
            .types
            .get_all()?
            .into_iter()
            .map(|(id, record)| TypeEntry { id, record })
            .collect();

        Ok(RegistrySnapshot {
            schedules,
            types,
            last_type_id: self.types.last_id()?,
        })
    }
}
