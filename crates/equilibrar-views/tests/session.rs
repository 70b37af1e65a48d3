use std::sync::Arc;

use jiff::tz::TimeZone;

use equilibrar_core::error::CoreError;
use equilibrar_core::fixtures;
use equilibrar_core::locale::Locale;
use equilibrar_core::models::user::{AccountStatus, UserId};
use equilibrar_instruments::assessment::DiscardResults;
use equilibrar_views::admin::{AdminAction, AdminTab};
use equilibrar_views::context::{DashboardConfig, ViewContext};
use equilibrar_views::coordinator::CoordinatorAction;
use equilibrar_views::dashboard::{Dashboard, DashboardAction, Session};
use equilibrar_views::error::ViewError;
use equilibrar_views::professional::ProfessionalAction;
use equilibrar_views::render::Renderer;

const MARKERS: [&str; 3] = ["Panel Global", "Panel de Gestión", "Panel Profesional"];

fn ctx() -> ViewContext {
    ViewContext::new(
        "2023-10-27T12:00:00Z".parse().unwrap(),
        TimeZone::UTC,
        Locale::Es,
    )
}

fn session() -> Session {
    Session::new(
        fixtures::roster(),
        DashboardConfig::default(),
        Arc::new(DiscardResults),
    )
}

fn id(s: &str) -> UserId {
    UserId::from(s)
}

#[test]
fn logged_out_shows_the_user_picker() {
    let renderer = Renderer::new().unwrap();
    let session = session();
    assert!(session.dashboard().is_none());

    let html = session.render(&ctx(), &renderer).unwrap();
    assert!(html.contains(r#"data-view="login""#));
    for user in session.roster().users() {
        assert!(html.contains(&user.name), "{} missing from picker", user.name);
    }
    for marker in MARKERS {
        assert!(!html.contains(marker));
    }
}

#[test]
fn each_role_mounts_exactly_its_own_view() {
    let renderer = Renderer::new().unwrap();
    let cases = [
        (fixtures::ADMIN_ID, "admin", "Panel Global"),
        (fixtures::COORDINATOR_ID, "coordinator", "Panel de Gestión"),
        (fixtures::PROFESSIONAL_ID, "professional", "Panel Profesional"),
        ("c-w1", "professional", "Panel Profesional"),
    ];

    for (user_id, kind, marker) in cases {
        let mut session = session();
        assert_eq!(session.login(&id(user_id)).unwrap().kind(), kind);

        let html = session.render(&ctx(), &renderer).unwrap();
        assert!(html.contains(&format!(r#"data-view="{kind}""#)));
        for other in MARKERS {
            assert_eq!(html.contains(other), other == marker, "{user_id}: {other}");
        }
    }
}

#[test]
fn client_login_falls_back_to_the_professional_view() {
    let mut session = session();
    let dashboard = session.login(&id("c-w3")).unwrap();
    let Dashboard::Professional(view) = dashboard else {
        panic!("expected the professional view, got {}", dashboard.kind());
    };
    assert_eq!(view.user().id, id("c-w3"));
}

#[test]
fn rendering_is_idempotent() {
    let renderer = Renderer::new().unwrap();
    let ctx = ctx();
    for user_id in [fixtures::ADMIN_ID, fixtures::COORDINATOR_ID, fixtures::PROFESSIONAL_ID] {
        let mut session = session();
        session.login(&id(user_id)).unwrap();
        let first = session.render(&ctx, &renderer).unwrap();
        let second = session.render(&ctx, &renderer).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn logout_returns_to_the_picker() {
    let renderer = Renderer::new().unwrap();
    let mut session = session();
    session.login(&id(fixtures::ADMIN_ID)).unwrap();

    assert!(session.logout());
    assert!(session.dashboard().is_none());
    assert!(session.current_user().is_none());
    let html = session.render(&ctx(), &renderer).unwrap();
    assert!(html.contains(r#"data-view="login""#));

    assert!(!session.logout());
}

#[test]
fn actions_need_a_logged_in_user() {
    let mut session = session();
    let action = DashboardAction::Admin(AdminAction::Back);
    assert!(matches!(
        session.dispatch(action, &ctx()),
        Err(ViewError::LoggedOut)
    ));
}

#[test]
fn actions_for_another_view_are_rejected() {
    let mut session = session();
    session.login(&id(fixtures::ADMIN_ID)).unwrap();

    let err = session
        .dispatch(
            DashboardAction::Coordinator(CoordinatorAction::NextMonth),
            &ctx(),
        )
        .unwrap_err();
    assert!(matches!(err, ViewError::WrongView { view: "admin" }));

    let err = session
        .dispatch(
            DashboardAction::Professional(ProfessionalAction::Back),
            &ctx(),
        )
        .unwrap_err();
    assert!(matches!(err, ViewError::WrongView { view: "admin" }));
}

#[test]
fn unknown_user_cannot_log_in() {
    let mut session = session();
    let err = session.login(&id("u-ghost")).unwrap_err();
    assert!(matches!(err, ViewError::Core(CoreError::UnknownUser(ref u)) if u == "u-ghost"));
    assert!(session.dashboard().is_none());
}

#[test]
fn view_state_does_not_survive_a_new_login() {
    let ctx = ctx();
    let mut session = session();
    session.login(&id(fixtures::COORDINATOR_ID)).unwrap();
    session
        .dispatch(
            DashboardAction::Coordinator(CoordinatorAction::ToggleStatus {
                client_id: id("c-w1"),
            }),
            &ctx,
        )
        .unwrap();

    let Some(Dashboard::Coordinator(view)) = session.dashboard() else {
        panic!("coordinator view not mounted");
    };
    assert_eq!(
        view.roster().get(&id("c-w1")).unwrap().user().status,
        AccountStatus::Inactive
    );

    // The base roster never sees view-local changes.
    assert_eq!(
        session.roster().get(&id("c-w1")).unwrap().user().status,
        AccountStatus::Active
    );

    session.logout();
    session.login(&id(fixtures::ADMIN_ID)).unwrap();
    session
        .dispatch(
            DashboardAction::Admin(AdminAction::SelectTab {
                tab: AdminTab::Users,
            }),
            &ctx,
        )
        .unwrap();
    let Some(Dashboard::Admin(view)) = session.dashboard() else {
        panic!("admin view not mounted");
    };
    assert_eq!(
        view.roster().get(&id("c-w1")).unwrap().user().status,
        AccountStatus::Active
    );

    // Logging in again as the same user starts over as well.
    session.login(&id(fixtures::ADMIN_ID)).unwrap();
    let Some(Dashboard::Admin(view)) = session.dashboard() else {
        panic!("admin view not mounted");
    };
    assert_eq!(view.tab(), AdminTab::Dashboard);
}

#[test]
fn actions_deserialize_from_tagged_json() {
    let action: DashboardAction = serde_json::from_str(
        r#"{"view":"admin","payload":{"type":"select_tab","tab":"users"}}"#,
    )
    .unwrap();
    assert_eq!(
        action,
        DashboardAction::Admin(AdminAction::SelectTab {
            tab: AdminTab::Users
        })
    );

    let action: DashboardAction = serde_json::from_str(
        r#"{"view":"professional","payload":{"type":"answer","rating":4}}"#,
    )
    .unwrap();
    assert_eq!(
        action,
        DashboardAction::Professional(ProfessionalAction::Answer { rating: 4 })
    );
}
