use thiserror::Error;

use crate::ids::{TypeId, VehicleId};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("No maintenance schedule for {0}")]
    NotFound(VehicleId),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug, PartialEq)]
pub enum StorageError {
    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    #[error("Type id space exhausted after {0}")]
    IdSpaceExhausted(TypeId),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
