use super::common::*;

use crate::assessment::archetypes::ArchetypeKey;

#[test]
fn demo_dashboard_aggregates_seven_participants() {
    let (service, _) = build_service();
    service.create_organization(demo_org()).expect("created");
    for request in demo_employees() {
        service.record_result(request).expect("recorded");
    }

    let dashboard = service.dashboard("DEMO2025").expect("dashboard");

    assert_eq!(dashboard.participants, 7);
    // Jan (guardian) and Sophie (visionary) of seven
    assert_eq!(dashboard.pilot_ready_percent, 29);
    assert_eq!(dashboard.high_risk_percent, 0);
    assert!((dashboard.average_style - (-3.0 / 7.0)).abs() < 1e-9);
    assert!((dashboard.average_exposure - 335.0 / 7.0).abs() < 1e-9);
    assert_eq!(dashboard.scatter.len(), 7);
    assert_eq!(dashboard.archetype_distribution.len(), 7);
    assert!(dashboard
        .archetype_distribution
        .iter()
        .all(|share| share.count == 1));
}

#[test]
fn exposed_and_unready_employees_count_as_high_risk() {
    let (service, _) = build_service();
    service.create_organization(demo_org()).expect("created");
    service
        .record_result(employee(
            "Pieter Bakker",
            "Operations",
            -7.0,
            30.0,
            75,
            ArchetypeKey::PracticalTraditionalist,
        ))
        .expect("recorded");
    service
        .record_result(employee(
            "Emma Visser",
            "Sales",
            5.0,
            49.0,
            60,
            ArchetypeKey::CreativeExperimenter,
        ))
        .expect("recorded");
    service
        .record_result(employee(
            "Ahmet Yilmaz",
            "IT",
            2.0,
            50.0,
            90,
            ArchetypeKey::StrategicIntegrator,
        ))
        .expect("recorded");
    service
        .record_result(employee(
            "Lisa de Jong",
            "HR",
            0.0,
            20.0,
            59,
            ArchetypeKey::HesitantObserver,
        ))
        .expect("recorded");

    let dashboard = service.dashboard("DEMO2025").expect("dashboard");

    assert_eq!(dashboard.high_risk_percent, 50);
    assert_eq!(dashboard.pilot_ready_percent, 0);
}

#[test]
fn empty_organization_reports_zeroes() {
    let (service, _) = build_service();
    service.create_organization(demo_org()).expect("created");

    let dashboard = service.dashboard("DEMO2025").expect("dashboard");

    assert_eq!(dashboard.participants, 0);
    assert_eq!(dashboard.average_readiness, 0.0);
    assert_eq!(dashboard.high_risk_percent, 0);
    assert!(dashboard.archetype_distribution.is_empty());
}
