use std::sync::Arc;

use maintrack::{
    ClockSource, Config, FixedHeight, MaintenanceRegistry, ManualHeight, Outcome, RegistryError,
    RegistryEvent, RegistrySnapshot, Schedule, TypeId, VehicleId,
};

/// Create a registry whose clock is stuck at height 100.
fn create_test_registry() -> MaintenanceRegistry {
    MaintenanceRegistry::new(Arc::new(FixedHeight(100)))
}

// ============================================================================
// Schedule lifecycle
// ============================================================================

#[test]
fn test_full_service_cycle() {
    let registry = create_test_registry();
    let truck = VehicleId(1);

    registry
        .set_maintenance_schedule(truck, 10_000, 5_000)
        .unwrap();
    assert_eq!(
        registry.get_maintenance_schedule(truck).unwrap(),
        Some(Schedule {
            last_maintenance_mileage: 10_000,
            maintenance_interval: 5_000,
            next_maintenance_mileage: 15_000,
            last_maintenance_date: 100,
        })
    );

    assert!(!registry.update_mileage(truck, 12_000).unwrap());
    assert!(registry.update_mileage(truck, 15_000).unwrap());

    registry.record_maintenance(truck, 15_000).unwrap();
    assert_eq!(
        registry.get_maintenance_schedule(truck).unwrap(),
        Some(Schedule {
            last_maintenance_mileage: 15_000,
            maintenance_interval: 5_000,
            next_maintenance_mileage: 20_000,
            last_maintenance_date: 100,
        })
    );

    assert!(!registry.update_mileage(truck, 16_000).unwrap());
    assert!(!registry.is_maintenance_due(truck, 19_999).unwrap());
    assert!(registry.is_maintenance_due(truck, 20_000).unwrap());
}

#[test]
fn test_update_mileage_never_moves_baseline() {
    let registry = create_test_registry();
    let van = VehicleId(2);
    registry.set_maintenance_schedule(van, 0, 1_000).unwrap();

    for mileage in [500, 999, 1_000, 5_000, 250] {
        registry.update_mileage(van, mileage).unwrap();
    }

    let schedule = registry.get_maintenance_schedule(van).unwrap().unwrap();
    assert_eq!(schedule, Schedule::new(0, 1_000, 100));
}

#[test]
fn test_vehicles_are_independent() {
    let registry = create_test_registry();
    registry
        .set_maintenance_schedule(VehicleId(1), 10_000, 5_000)
        .unwrap();
    registry
        .set_maintenance_schedule(VehicleId(2), 40_000, 10_000)
        .unwrap();

    registry.record_maintenance(VehicleId(1), 14_000).unwrap();

    let other = registry
        .get_maintenance_schedule(VehicleId(2))
        .unwrap()
        .unwrap();
    assert_eq!(other.next_maintenance_mileage, 50_000);
    assert_eq!(registry.schedule_count().unwrap(), 2);
}

#[test]
fn test_record_maintenance_stamps_current_height() {
    let clock = Arc::new(ManualHeight::new(100));
    let registry = MaintenanceRegistry::new(clock.clone());

    registry
        .set_maintenance_schedule(VehicleId(1), 10_000, 5_000)
        .unwrap();
    clock.advance(25);
    registry.record_maintenance(VehicleId(1), 15_500).unwrap();

    let schedule = registry
        .get_maintenance_schedule(VehicleId(1))
        .unwrap()
        .unwrap();
    assert_eq!(schedule.last_maintenance_date, 125);
    assert_eq!(schedule.next_maintenance_mileage, 20_500);
}

// ============================================================================
// Absence handling
// ============================================================================

#[test]
fn test_absent_vehicle_behaviour() {
    let registry = create_test_registry();
    let ghost = VehicleId(404);

    assert!(matches!(
        registry.update_mileage(ghost, 1),
        Err(RegistryError::NotFound(id)) if id == ghost
    ));
    assert!(matches!(
        registry.record_maintenance(ghost, 1),
        Err(RegistryError::NotFound(id)) if id == ghost
    ));

    // Queries never fail on absence.
    assert!(registry.get_maintenance_schedule(ghost).unwrap().is_none());
    assert!(registry.is_maintenance_due(ghost, 0).unwrap());
    assert!(registry.is_maintenance_due(ghost, u64::MAX).unwrap());

    // Failed calls leave no trace.
    assert_eq!(registry.schedule_count().unwrap(), 0);
}

#[test]
fn test_not_found_message() {
    let registry = create_test_registry();
    let err = registry.update_mileage(VehicleId(7), 1).unwrap_err();
    assert_eq!(err.to_string(), "No maintenance schedule for vehicle-7");
}

// ============================================================================
// Maintenance type catalog
// ============================================================================

#[test]
fn test_add_and_retrieve_types() {
    let registry = create_test_registry();

    let oil = registry
        .add_maintenance_type("Oil Change", "Regular oil change service", 5_000)
        .unwrap();
    let tires = registry
        .add_maintenance_type("Tire Rotation", "Rotate tires front to back", 10_000)
        .unwrap();

    assert_eq!(oil, TypeId(1));
    assert_eq!(tires, TypeId(2));

    let record = registry.get_maintenance_type(oil).unwrap().unwrap();
    assert_eq!(record.name, "Oil Change");
    assert_eq!(record.description, "Regular oil change service");
    assert_eq!(record.recommended_interval, 5_000);

    assert_eq!(
        registry.get_maintenance_type(tires).unwrap().unwrap().name,
        "Tire Rotation"
    );
    assert!(registry.get_maintenance_type(TypeId(0)).unwrap().is_none());
    assert!(registry.get_maintenance_type(TypeId(3)).unwrap().is_none());
}

#[test]
fn test_types_do_not_touch_schedules() {
    let registry = create_test_registry();
    registry
        .add_maintenance_type("Brake Inspection", "", 20_000)
        .unwrap();

    assert_eq!(registry.schedule_count().unwrap(), 0);
    assert!(registry.is_maintenance_due(VehicleId(1), 0).unwrap());
}

// ============================================================================
// Event log replay
// ============================================================================

#[test]
fn test_replay_event_log() {
    let log = r#"[
        {"type":"SetSchedule","vehicle":1,"mileage":10000,"interval":5000},
        {"type":"UpdateMileage","vehicle":1,"mileage":12000},
        {"type":"UpdateMileage","vehicle":1,"mileage":15000},
        {"type":"RecordMaintenance","vehicle":1,"mileage":15000},
        {"type":"AddType","name":"Oil Change","description":"Regular oil change service","recommended_interval":5000}
    ]"#;
    let events: Vec<RegistryEvent> = serde_json::from_str(log).unwrap();

    let registry = create_test_registry();
    let outcomes: Vec<Outcome> = events
        .into_iter()
        .map(|event| registry.apply(event).unwrap())
        .collect();

    assert_eq!(
        outcomes,
        vec![
            Outcome::ScheduleSet,
            Outcome::Due(false),
            Outcome::Due(true),
            Outcome::MaintenanceRecorded,
            Outcome::TypeAdded(TypeId(1)),
        ]
    );
}

// ============================================================================
// Snapshots and configuration
// ============================================================================

#[test]
fn test_snapshot_json_restore() {
    let registry = create_test_registry();
    registry
        .set_maintenance_schedule(VehicleId(1), 10_000, 5_000)
        .unwrap();
    registry
        .add_maintenance_type("Oil Change", "Regular oil change service", 5_000)
        .unwrap();
    registry
        .add_maintenance_type("Coolant Flush", "", 60_000)
        .unwrap();

    let json = registry.snapshot().unwrap().to_json().unwrap();
    let snapshot = RegistrySnapshot::from_json(&json).unwrap();
    let restored = MaintenanceRegistry::restore(snapshot, Arc::new(FixedHeight(300))).unwrap();

    assert_eq!(restored.last_type_id().unwrap(), TypeId(2));
    assert_eq!(restored.type_count().unwrap(), 2);
    assert!(restored.update_mileage(VehicleId(1), 15_000).unwrap());
    assert_eq!(
        restored
            .add_maintenance_type("Air Filter", "", 15_000)
            .unwrap(),
        TypeId(3)
    );
}

#[test]
fn test_restore_rejects_counter_behind_ids() {
    let json = r#"{
        "schedules": [],
        "types": [{"id": 3, "name": "Oil Change", "description": "", "recommended_interval": 5000}],
        "last_type_id": 1
    }"#;
    let snapshot = RegistrySnapshot::from_json(json).unwrap();

    let result = MaintenanceRegistry::restore(snapshot, Arc::new(FixedHeight(0)));
    assert!(matches!(result, Err(RegistryError::Storage(_))));
}

#[test]
fn test_restore_rejects_duplicate_entries() {
    let duplicate_vehicle = r#"{
        "schedules": [
            {"vehicle": 1, "last_maintenance_mileage": 0, "maintenance_interval": 1000,
             "next_maintenance_mileage": 1000, "last_maintenance_date": 0},
            {"vehicle": 1, "last_maintenance_mileage": 500, "maintenance_interval": 1000,
             "next_maintenance_mileage": 1500, "last_maintenance_date": 0}
        ],
        "types": [],
        "last_type_id": 0
    }"#;
    let duplicate_type = r#"{
        "schedules": [],
        "types": [
            {"id": 1, "name": "Oil Change", "description": "", "recommended_interval": 5000},
            {"id": 1, "name": "Brakes", "description": "", "recommended_interval": 20000}
        ],
        "last_type_id": 1
    }"#;

    for json in [duplicate_vehicle, duplicate_type] {
        let snapshot = RegistrySnapshot::from_json(json).unwrap();
        let result = MaintenanceRegistry::restore(snapshot, Arc::new(FixedHeight(0)));
        assert!(matches!(result, Err(RegistryError::Storage(_))));
    }
}

#[test]
fn test_registry_from_config() {
    let config = Config::from_lookup(|name| match name {
        "MAINTRACK_CLOCK" => Some("fixed:42".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.clock, ClockSource::Fixed(42));

    let registry = MaintenanceRegistry::from_config(&config);
    registry
        .set_maintenance_schedule(VehicleId(1), 0, 3_000)
        .unwrap();

    let schedule = registry
        .get_maintenance_schedule(VehicleId(1))
        .unwrap()
        .unwrap();
    assert_eq!(schedule.last_maintenance_date, 42);
}
