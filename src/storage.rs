use crate::error::StorageError;
use crate::ids::{TypeId, VehicleId};
use crate::maintenance_type::MaintenanceType;
use crate::schedule::Schedule;

/// Trait for storing per-vehicle schedules.
pub trait ScheduleStore: Send + Sync {
    /// Get the schedule for a vehicle.
    fn get(&self, vehicle: VehicleId) -> Result<Option<Schedule>, StorageError>;

    /// Insert or overwrite the schedule for a vehicle.
    fn put(&self, vehicle: VehicleId, schedule: Schedule) -> Result<(), StorageError>;

    /// Get all schedules, ordered by vehicle id.
    fn get_all(&self) -> Result<Vec<(VehicleId, Schedule)>, StorageError>;

    fn count(&self) -> Result<usize, StorageError>;
}

/// Trait for the maintenance type catalog.
pub trait TypeStore: Send + Sync {
    /// Get a type by id.
    fn get(&self, id: TypeId) -> Result<Option<MaintenanceType>, StorageError>;

    /// Atomically allocate the next id and store the record under it.
    /// The counter is bumped and the record written under one lock, so two
    /// concurrent callers can never receive the same id.
    fn insert_next(&self, record: MaintenanceType) -> Result<TypeId, StorageError>;

    /// The most recently allocated id, `TypeId(0)` if none.
    fn last_id(&self) -> Result<TypeId, StorageError>;

    /// Get all types, ordered by id.
    fn get_all(&self) -> Result<Vec<(TypeId, MaintenanceType)>, StorageError>;

    fn count(&self) -> Result<usize, StorageError>;
}

pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::RwLock;

    /// In-memory schedule store.
    #[derive(Default)]
    pub struct InMemoryScheduleStore {
        schedules: RwLock<BTreeMap<VehicleId, Schedule>>,
    }

    impl InMemoryScheduleStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Rebuild a store from stored schedules. Fails if a vehicle appears twice.
        pub fn from_entries(
            entries: impl IntoIterator<Item = (VehicleId, Schedule)>,
        ) -> Result<Self, StorageError> {
            let mut schedules = BTreeMap::new();
            for (vehicle, schedule) in entries {
                if schedules.insert(vehicle, schedule).is_some() {
                    return Err(StorageError::Snapshot(format!(
                        "duplicate schedule for {vehicle}"
                    )));
                }
            }
            Ok(Self {
                schedules: RwLock::new(schedules),
            })
        }
    }

    impl ScheduleStore for InMemoryScheduleStore {
        fn get(&self, vehicle: VehicleId) -> Result<Option<Schedule>, StorageError> {
            let schedules = self
                .schedules
                .read()
                .map_err(|_| StorageError::LockPoisoned("schedules"))?;
            Ok(schedules.get(&vehicle).copied())
        }

        fn put(&self, vehicle: VehicleId, schedule: Schedule) -> Result<(), StorageError> {
            self.schedules
                .write()
                .map_err(|_| StorageError::LockPoisoned("schedules"))?
                .insert(vehicle, schedule);
            Ok(())
        }

        fn get_all(&self) -> Result<Vec<(VehicleId, Schedule)>, StorageError> {
            let schedules = self
                .schedules
                .read()
                .map_err(|_| StorageError::LockPoisoned("schedules"))?;
            Ok(schedules.iter().map(|(id, s)| (*id, *s)).collect())
        }

        fn count(&self) -> Result<usize, StorageError> {
            let schedules = self
                .schedules
                .read()
                .map_err(|_| StorageError::LockPoisoned("schedules"))?;
            Ok(schedules.len())
        }
    }

    #[derive(Default)]
    struct TypeTable {
        records: BTreeMap<TypeId, MaintenanceType>,
        last_id: TypeId,
    }

    /// In-memory maintenance type catalog.
    #[derive(Default)]
    pub struct InMemoryTypeStore {
        table: RwLock<TypeTable>,
    }

    impl InMemoryTypeStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Rebuild a catalog from stored records and the last allocated id.
        /// Fails if an id appears twice or `last_id` is behind any stored id.
        pub fn from_entries(
            entries: impl IntoIterator<Item = (TypeId, MaintenanceType)>,
            last_id: TypeId,
        ) -> Result<Self, StorageError> {
            let mut records = BTreeMap::new();
            for (id, record) in entries {
                if records.insert(id, record).is_some() {
                    return Err(StorageError::Snapshot(format!("duplicate {id}")));
                }
            }
            if let Some(max) = records.keys().next_back() {
                if *max > last_id {
                    return Err(StorageError::Snapshot(format!(
                        "last type id {} is behind stored {}",
                        last_id, max
                    )));
                }
            }
            Ok(Self {
                table: RwLock::new(TypeTable { records, last_id }),
            })
        }
    }

    impl TypeStore for InMemoryTypeStore {
        fn get(&self, id: TypeId) -> Result<Option<MaintenanceType>, StorageError> {
            let table = self
                .table
                .read()
                .map_err(|_| StorageError::LockPoisoned("types"))?;
            Ok(table.records.get(&id).cloned())
        }

        fn insert_next(&self, record: MaintenanceType) -> Result<TypeId, StorageError> {
            let mut table = self
                .table
                .write()
                .map_err(|_| StorageError::LockPoisoned("types"))?;

            let id = table
                .last_id
                .next()
                .ok_or(StorageError::IdSpaceExhausted(table.last_id))?;
            table.records.insert(id, record);
            table.last_id = id;

            Ok(id)
        }

        fn last_id(&self) -> Result<TypeId, StorageError> {
            let table = self
                .table
                .read()
                .map_err(|_| StorageError::LockPoisoned("types"))?;
            Ok(table.last_id)
        }

        fn get_all(&self) -> Result<Vec<(TypeId, MaintenanceType)>, StorageError> {
            let table = self
                .table
                .read()
                .map_err(|_| StorageError::LockPoisoned("types"))?;
            Ok(table
                .records
                .iter()
                .map(|(id, t)| (*id, t.clone()))
                .collect())
        }

        fn count(&self) -> Result<usize, StorageError> {
            let table = self
                .table
                .read()
                .map_err(|_| StorageError::LockPoisoned("types"))?;
            Ok(table.records.len())
        }
    }

}
