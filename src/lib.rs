//! Maintrack - per-vehicle maintenance schedules and a maintenance type catalog.
//!
//! The [`MaintenanceRegistry`] owns both keyed containers and the type-id
//! counter. Every write stamps the current height from a caller-supplied
//! [`HeightSource`].

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod maintenance_type;
pub mod registry;
pub mod schedule;
pub mod snapshot;
pub mod storage;
pub mod telemetry;

// Re-exports for convenience
pub use clock::{FixedHeight, HeightSource, ManualHeight, SystemHeight};
pub use config::{ClockSource, Config};
pub use error::{ConfigError, RegistryError, StorageError};
pub use event::{Outcome, RegistryEvent};
pub use ids::{TypeId, VehicleId};
pub use maintenance_type::MaintenanceType;
pub use registry::MaintenanceRegistry;
pub use schedule::Schedule;
pub use snapshot::{RegistrySnapshot, ScheduleEntry, TypeEntry};
pub use storage::memory::{InMemoryScheduleStore, InMemoryTypeStore};
pub use storage::{ScheduleStore, TypeStore};
pub use telemetry::init_tracing;
