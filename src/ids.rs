use serde::{Deserialize, Serialize};

/// Identifier of a tracked vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub u64);

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vehicle-{}", self.0)
    }
}

/// Identifier of a maintenance type, allocated by the registry starting at 1.
/// `TypeId(0)` is never allocated and marks an empty catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u64);

impl TypeId {
    /// The id following this one, or `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(TypeId)
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "type-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_id_display() {
        assert_eq!(VehicleId(42).to_string(), "vehicle-42");
    }

    #[test]
    fn test_type_id_display_and_next() {
        let id = TypeId(0).next().unwrap();
        assert_eq!(id, TypeId(1));
        assert_eq!(TypeId(u64::MAX).next(), None);
        assert_eq!(id.to_string(), "type-1");
        assert!(TypeId(1) < TypeId(2));
    }

    #[test]
    fn test_vehicle_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&VehicleId(7)).unwrap(), "7");
    }
}
