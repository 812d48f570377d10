use tramreport::core::reconcile::MapState;
use tramreport::core::reports::ReportLogic;
use tramreport::core::session::{AuthLogic, Session};
use tramreport::core::sync::sync_snapshot;
use tramreport::db::initialize::open_ready;
use tramreport::db::pool::DbPool;
use tramreport::db::queries::{find_event, load_events, load_stops};
use tramreport::errors::AppError;
use tramreport::gateway::{Gateway, InMemoryGateway};
use tramreport::models::filter::Filter;
use tramreport::models::reaction::Reaction;
use tramreport::models::report_type::ReportType;
use tramreport::models::user::Credentials;

mod common;
use common::{sample_events, sample_stops, setup_test_db, stop};

fn store(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    open_ready(&db_path).expect("open store")
}

fn logged_in(gw: &InMemoryGateway, pool: &mut DbPool) -> Session {
    gw.add_user("ola", "ola@example.com", "secret");
    let creds = Credentials {
        username_or_email: "ola".into(),
        password: "secret".into(),
    };
    AuthLogic::login(gw, pool, &creds).expect("login")
}

#[test]
fn test_sync_fills_cache_and_counts_dangling_reports() {
    let gw = InMemoryGateway::new(sample_stops(), sample_events());
    let mut pool = store("flow_sync");

    let summary = sync_snapshot(&gw, &mut pool).unwrap();
    assert_eq!(summary.stops, 5);
    assert_eq!(summary.events, 2);
    assert_eq!(summary.dangling_events, 1);

    let state = MapState::new(
        load_stops(&mut pool).unwrap(),
        load_events(&mut pool).unwrap(),
        Filter::None,
    );
    let ids: Vec<&str> = state.annotations().iter().map(|a| a.stop_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(state.reported_count(), 1);
}

#[test]
fn test_failed_sync_keeps_previous_snapshot() {
    let gw = InMemoryGateway::new(sample_stops(), sample_events());
    let mut pool = store("flow_sync_fail");
    sync_snapshot(&gw, &mut pool).unwrap();

    gw.replace_stops(vec![stop("9", "Nowy", "1")]);
    gw.set_stops_unavailable(true);
    let err = sync_snapshot(&gw, &mut pool).unwrap_err();
    assert!(matches!(err, AppError::Api { status: 503, .. }));

    assert_eq!(load_stops(&mut pool).unwrap().len(), 5);
    assert_eq!(load_events(&mut pool).unwrap().len(), 2);
}

#[test]
fn test_submitted_report_marks_stop_on_map() {
    let gw = InMemoryGateway::new(sample_stops(), sample_events());
    let mut pool = store("flow_submit");
    sync_snapshot(&gw, &mut pool).unwrap();
    logged_in(&gw, &mut pool);

    let ev = ReportLogic::submit(&gw, &mut pool, "1", ReportType::TicketControl, "  two inspectors ")
        .unwrap();
    assert_eq!(ev.kind, "Kontrola biletów");
    assert_eq!(ev.description, "two inspectors");
    assert!(find_event(&mut pool, &ev.id).unwrap().is_some());

    let state = MapState::new(
        load_stops(&mut pool).unwrap(),
        load_events(&mut pool).unwrap(),
        Filter::Tram,
    );
    let marked: Vec<&str> = state
        .annotations()
        .iter()
        .filter(|a| a.has_open_report)
        .map(|a| a.stop_id.as_str())
        .collect();
    assert_eq!(marked, vec!["1"]);
}

#[test]
fn test_submit_rejects_stop_missing_from_cache() {
    let gw = InMemoryGateway::new(sample_stops(), vec![]);
    let mut pool = store("flow_submit_unknown");
    sync_snapshot(&gw, &mut pool).unwrap();
    logged_in(&gw, &mut pool);

    let err = ReportLogic::submit(&gw, &mut pool, "999", ReportType::Accident, "").unwrap_err();
    assert!(matches!(err, AppError::UnknownStop(id) if id == "999"));
    assert!(gw.events().is_empty());
}

#[test]
fn test_submit_without_session_fails_before_network() {
    let gw = InMemoryGateway::new(sample_stops(), vec![]);
    let mut pool = store("flow_submit_anon");

    let err = ReportLogic::submit(&gw, &mut pool, "1", ReportType::Breakdown, "").unwrap_err();
    assert!(matches!(err, AppError::NotLoggedIn));
    assert!(gw.events().is_empty());
}

#[test]
fn test_reactions_update_cached_counts() {
    let gw = InMemoryGateway::new(sample_stops(), sample_events());
    let mut pool = store("flow_react");
    sync_snapshot(&gw, &mut pool).unwrap();
    logged_in(&gw, &mut pool);

    ReportLogic::react(&gw, &mut pool, "e1", Reaction::Like).unwrap();
    let counts = ReportLogic::react(&gw, &mut pool, "e1", Reaction::Dislike).unwrap();
    assert_eq!(counts, (1, 1));

    let cached = find_event(&mut pool, "e1").unwrap().unwrap();
    assert_eq!((cached.likes, cached.dislikes), (1, 1));
}

#[test]
fn test_logout_clears_session_even_when_server_rejects_token() {
    let gw = InMemoryGateway::new(vec![], vec![]);
    let mut pool = store("flow_logout");
    let session = logged_in(&gw, &mut pool);

    // the server forgets the token first; logout must still drop it locally
    gw.logout(&session.token).unwrap();
    let outcome = AuthLogic::logout(&gw, &mut pool).unwrap();

    assert_eq!(outcome.user.username, "ola");
    assert!(outcome.remote_error.is_some());
    assert!(Session::load(&mut pool).unwrap().is_none());
}

#[test]
fn test_session_survives_reopening_the_store() {
    let db_path = setup_test_db("flow_session_reopen");
    let gw = InMemoryGateway::new(vec![], vec![]);
    {
        let mut pool = open_ready(&db_path).unwrap();
        logged_in(&gw, &mut pool);
    }

    let mut pool = open_ready(&db_path).unwrap();
    let session = Session::require(&mut pool).unwrap();
    assert_eq!(session.user.email, "ola@example.com");
    assert_eq!(AuthLogic::me(&gw, &mut pool).unwrap().username, "ola");
}

#[test]
fn test_reacting_to_missing_report_is_unknown_report() {
    let gw = InMemoryGateway::new(sample_stops(), vec![]);
    let mut pool = store("flow_react_missing");
    logged_in(&gw, &mut pool);

    let err = ReportLogic::react(&gw, &mut pool, "nope", Reaction::Like).unwrap_err();
    assert!(matches!(err, AppError::UnknownReport(id) if id == "nope"));
}
