use std::fs;

use client::MemoryGateway;
use model::bounds::MENU_ITEMS_MIN;
use model::{FixtureDocument, ItemId, MenuItem, RegisteredRestaurant, RestaurantId};
use reconcile::{
    AbortReason, DiscoveryPolicy, FixtureStore, ReconcileConfig, ReconcileError, ReconcileState,
    Reconciler, RegistrationOutcome,
};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> FixtureStore {
    FixtureStore::new(dir.path().join("config").join("seeded_data.yaml"))
}

fn listed(restaurant_id: &str, items: &[(&str, f64)]) -> RegisteredRestaurant {
    RegisteredRestaurant {
        restaurant_id: RestaurantId::new(restaurant_id).unwrap(),
        name: "Listed Kitchen".to_string(),
        email: "listed@example.com".to_string(),
        latitude: 9.05,
        longitude: 38.75,
        menus: items
            .iter()
            .map(|(item_id, price)| MenuItem {
                item_id: ItemId::new(*item_id).unwrap(),
                name: format!("{item_id} Special"),
                description: String::new(),
                price: *price,
            })
            .collect(),
    }
}

#[test]
fn seeds_from_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    let mut reconciler = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing());

    let report = reconciler.ensure_fixtures(3).unwrap();
    assert_eq!(report.discovered, 0);
    assert_eq!(report.attempted, 3);
    assert_eq!(report.registered, 3);
    assert_eq!(report.persisted, 3);

    let document = store_in(&dir).load().unwrap();
    assert_eq!(document.len(), 3);
    for fixture in &document.restaurants {
        assert!(fixture.menus.len() >= MENU_ITEMS_MIN);
    }
}

#[test]
fn second_run_registers_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();

    Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(4)
        .unwrap();
    assert_eq!(gateway.registration_attempts(), 4);

    let report = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(4)
        .unwrap();
    assert_eq!(gateway.registration_attempts(), 4);
    assert_eq!(report.attempted, 0);
    assert_eq!(report.discovered, 4);
    assert_eq!(store_in(&dir).load().unwrap().len(), 4);
}

#[test]
fn tops_up_the_shortfall() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    gateway.seed_restaurant(2);
    gateway.seed_restaurant(6);

    let report = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(5)
        .unwrap();
    assert_eq!(report.discovered, 2);
    assert_eq!(gateway.registration_attempts(), 3);
    assert_eq!(store_in(&dir).load().unwrap().len(), 5);
}

#[test]
fn surplus_is_kept_without_registering() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    for _ in 0..4 {
        gateway.seed_restaurant(3);
    }

    let report = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(2)
        .unwrap();
    assert_eq!(report.attempted, 0);
    assert_eq!(report.persisted, 4);
}

#[test]
fn menuless_restaurants_are_not_discovered() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    gateway.seed_restaurant(0);
    gateway.seed_restaurant(3);

    let report = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(2)
        .unwrap();
    assert_eq!(report.discovered, 1);
    assert_eq!(report.attempted, 1);

    let document = store_in(&dir).load().unwrap();
    assert_eq!(document.len(), 2);
    assert!(document.restaurants.iter().all(|r| !r.menus.is_empty()));
}

#[test]
fn invalid_listed_menus_count_toward_the_shortfall() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::with_restaurants(vec![
        listed("listed-ok", &[("a", 80.0), ("b", 120.0)]),
        listed("listed-repeat", &[("i", 80.0), ("i", 80.0), ("i", 80.0)]),
        listed("listed-negative", &[("a", 80.0), ("b", -5.0)]),
    ]);

    let report = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(3)
        .unwrap();
    assert_eq!(report.discovered, 1);
    assert_eq!(report.attempted, 2);
    assert_eq!(report.registered, 2);
    assert_eq!(gateway.registration_attempts(), 2);

    let document = store_in(&dir).load().unwrap();
    assert_eq!(document.len(), 3);
    let ids: Vec<&str> = document
        .restaurants
        .iter()
        .map(|r| r.restaurant_id.as_str())
        .collect();
    assert!(ids.contains(&"listed-ok"));
    assert!(!ids.contains(&"listed-repeat"));
    assert!(!ids.contains(&"listed-negative"));
    assert!(document.restaurants.iter().all(|r| r.validate().is_ok()));
}

#[test]
fn unreachable_leaves_document_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let gateway = MemoryGateway::new();
    Reconciler::new(&gateway, store.clone(), ReconcileConfig::for_testing())
        .ensure_fixtures(2)
        .unwrap();
    let before = fs::read(store.path()).unwrap();

    gateway.set_healthy(false);
    let mut reconciler = Reconciler::new(&gateway, store.clone(), ReconcileConfig::for_testing());
    let err = reconciler.ensure_fixtures(5).unwrap_err();

    assert!(matches!(err, ReconcileError::DependencyUnavailable));
    assert_eq!(
        reconciler.state(),
        ReconcileState::Aborted(AbortReason::Unreachable)
    );
    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert_eq!(gateway.registration_attempts(), 2);
}

#[test]
fn partial_failures_are_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    gateway.fail_registration_attempts([0, 2]);

    let report = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(4)
        .unwrap();
    assert_eq!(report.attempted, 4);
    assert_eq!(report.failed, 2);
    assert_eq!(report.registered, 2);
    assert_eq!(store_in(&dir).load().unwrap().len(), 2);

    let RegistrationOutcome::Failed { error, .. } = &report.outcomes[0] else {
        panic!("first attempt should fail");
    };
    assert!(error.contains("500"));
    assert!(error.contains("Failed to create restaurant"));
}

#[test]
fn all_failures_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let gateway = MemoryGateway::new();
    gateway.fail_registration_attempts(0..3);

    let mut reconciler = Reconciler::new(&gateway, store.clone(), ReconcileConfig::for_testing());
    let err = reconciler.ensure_fixtures(3).unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::NoFixturesAvailable {
            attempted: 3,
            failed: 3
        }
    ));
    assert_eq!(reconciler.state(), ReconcileState::Aborted(AbortReason::Empty));
    assert!(!store.path().exists());
}

#[test]
fn empty_menu_response_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    gateway.strip_registered_menus(true);

    let err = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(2)
        .unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::NoFixturesAvailable { failed: 2, .. }
    ));
}

#[test]
fn listing_failure_is_tolerated_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    gateway.seed_restaurant(5);
    gateway.fail_listing(true);

    let report = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(2)
        .unwrap();
    assert_eq!(report.discovered, 0);
    assert_eq!(report.registered, 2);
}

#[test]
fn listing_failure_aborts_when_required() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    gateway.fail_listing(true);
    let config = ReconcileConfig {
        discovery_policy: DiscoveryPolicy::Required,
        ..ReconcileConfig::for_testing()
    };

    let mut reconciler = Reconciler::new(&gateway, store_in(&dir), config);
    let err = reconciler.ensure_fixtures(2).unwrap_err();
    assert!(matches!(err, ReconcileError::DiscoveryFailed { .. }));
    assert_eq!(
        reconciler.state(),
        ReconcileState::Aborted(AbortReason::DiscoveryFailed)
    );
    assert_eq!(gateway.registration_attempts(), 0);
}

#[test]
fn persisted_ids_come_from_the_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(2)
        .unwrap();

    let document: FixtureDocument = store_in(&dir).load().unwrap();
    let registered = gateway.restaurants();
    for (fixture, restaurant) in document.restaurants.iter().zip(&registered) {
        assert_eq!(fixture.restaurant_id, restaurant.restaurant_id);
        assert_eq!(fixture.menus, restaurant.menus);
    }
}

#[test]
fn report_serializes_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    gateway.fail_registration_attempts([1]);

    let report = Reconciler::new(&gateway, store_in(&dir), ReconcileConfig::for_testing())
        .ensure_fixtures(2)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["state"], "persisted");
    assert_eq!(json["outcomes"][0]["outcome"], "registered");
    assert_eq!(json["outcomes"][1]["outcome"], "failed");
    assert_eq!(json["persisted"], 1);
}
