use jiff::tz::TimeZone;

use equilibrar_core::error::CoreError;
use equilibrar_core::fixtures;
use equilibrar_core::locale::Locale;
use equilibrar_core::models::user::{AccountStatus, Role, UserId};
use equilibrar_views::admin::{AdminAction, AdminBody, AdminTab, AdminView, RoleSection, UserFilter};
use equilibrar_views::context::{DashboardConfig, ViewContext};
use equilibrar_views::error::ViewError;
use equilibrar_views::render::Renderer;

fn ctx() -> ViewContext {
    ViewContext::new(
        "2023-10-27T12:00:00Z".parse().unwrap(),
        TimeZone::UTC,
        Locale::Es,
    )
}

fn view() -> AdminView {
    AdminView::new(fixtures::admin(), fixtures::roster(), DashboardConfig::default())
}

fn id(s: &str) -> UserId {
    UserId::from(s)
}

#[test]
fn overview_is_derived_from_the_roster() {
    let page = view().page(&ctx()).unwrap();
    let AdminBody::Overview(overview) = page.body else {
        panic!("expected the overview");
    };
    assert_eq!(overview.counts.total, 7);
    assert_eq!(overview.counts.admins, 1);
    assert_eq!(overview.counts.coordinators, 1);
    assert_eq!(overview.counts.professionals, 1);
    assert_eq!(overview.counts.clients, 4);
    assert_eq!(overview.counts.active_clients, 4);
    assert_eq!(overview.completion_rate, "60.0");
    assert_eq!(overview.completion_goal, "90");
    assert_eq!(overview.audio_chart.len(), 7);
    assert_eq!(overview.activity.len(), 4);

    let tallest = overview.audio_chart.iter().max_by_key(|b| b.value).unwrap();
    assert_eq!(tallest.label, "Jue");
    assert_eq!(tallest.percent, 100);
}

#[test]
fn files_and_settings_fall_back_to_the_overview() {
    for tab in [AdminTab::Files, AdminTab::Settings] {
        let mut view = view();
        view.dispatch(AdminAction::SelectTab { tab }).unwrap();
        assert_eq!(view.tab(), tab);
        assert!(matches!(view.page(&ctx()).unwrap().body, AdminBody::Overview(_)));
    }
}

#[test]
fn filters_narrow_the_user_list() {
    let mut view = view();
    view.dispatch(AdminAction::SelectTab { tab: AdminTab::Users }).unwrap();

    let AdminBody::Users(list) = view.page(&ctx()).unwrap().body else {
        panic!("expected the user list");
    };
    assert_eq!(list.result_count, 7);
    assert_eq!(list.filters.iter().filter(|f| f.active).count(), 1);

    view.dispatch(AdminAction::SetFilter {
        filter: UserFilter::Professional,
    })
    .unwrap();
    let names: Vec<&str> = view
        .filtered_users()
        .iter()
        .map(|u| u.name.as_str())
        .collect();
    assert_eq!(names, ["Dr. Especialista"]);

    let AdminBody::Users(list) = view.page(&ctx()).unwrap().body else {
        panic!("expected the user list");
    };
    assert_eq!(list.result_count, 1);
    let active: Vec<UserFilter> = list.filters.iter().filter(|f| f.active).map(|f| f.filter).collect();
    assert_eq!(active, [UserFilter::Professional]);
}

#[test]
fn clients_are_only_listed_under_all() {
    let view = view();
    for filter in [UserFilter::Admin, UserFilter::Professional, UserFilter::Coordinator] {
        assert!(
            fixtures::roster()
                .clients()
                .all(|c| !filter.matches(&c.user))
        );
    }
    assert_eq!(view.filtered_users().len(), 7);
}

#[test]
fn coordinator_detail_shows_capacity() {
    let mut view = view();
    view.dispatch(AdminAction::SelectUser {
        user_id: id(fixtures::COORDINATOR_ID),
    })
    .unwrap();

    let AdminBody::UserDetail(detail) = view.page(&ctx()).unwrap().body else {
        panic!("expected the user detail");
    };
    assert_eq!(detail.title, "Detalle de Coordinador");
    assert_eq!(detail.display_id, "U-COORD");
    assert_eq!(detail.user.role, Role::Coordinator);
    match detail.section {
        RoleSection::Coordinator {
            active_clients,
            capacity,
            percent_used,
            free_slots,
        } => {
            assert_eq!(active_clients, 4);
            assert_eq!(capacity, 25);
            assert_eq!(percent_used, 16);
            assert_eq!(free_slots, 21);
        }
        other => panic!("unexpected section {other:?}"),
    }
}

#[test]
fn client_detail_shows_program_progress() {
    let mut view = view();
    view.dispatch(AdminAction::SelectUser { user_id: id("c-w3") })
        .unwrap();
    let AdminBody::UserDetail(detail) = view.page(&ctx()).unwrap().body else {
        panic!("expected the user detail");
    };
    assert!(matches!(
        detail.section,
        RoleSection::Client {
            current_week: 3,
            progress_percent: 75
        }
    ));
}

#[test]
fn selecting_an_unknown_user_keeps_the_current_screen() {
    let mut view = view();
    let err = view
        .dispatch(AdminAction::SelectUser {
            user_id: id("u-ghost"),
        })
        .unwrap_err();
    assert!(matches!(err, ViewError::Core(CoreError::UnknownUser(_))));
    assert!(view.selected_user().is_none());
}

#[test]
fn back_returns_to_the_tab() {
    let mut view = view();
    view.dispatch(AdminAction::SelectTab { tab: AdminTab::Users }).unwrap();
    view.dispatch(AdminAction::SelectUser { user_id: id("c-w1") })
        .unwrap();
    view.dispatch(AdminAction::Back).unwrap();
    assert!(view.selected_user().is_none());
    assert!(matches!(view.page(&ctx()).unwrap().body, AdminBody::Users(_)));
}

#[test]
fn toggling_status_twice_restores_it() {
    let mut view = view();
    let target = id(fixtures::PROFESSIONAL_ID);

    view.dispatch(AdminAction::ToggleStatus {
        user_id: target.clone(),
    })
    .unwrap();
    assert_eq!(
        view.roster().get(&target).unwrap().user().status,
        AccountStatus::Inactive
    );

    view.dispatch(AdminAction::ToggleStatus {
        user_id: target.clone(),
    })
    .unwrap();
    assert_eq!(
        view.roster().get(&target).unwrap().user().status,
        AccountStatus::Active
    );
}

#[test]
fn deactivated_client_drops_out_of_the_active_count() {
    let mut view = view();
    view.dispatch(AdminAction::ToggleStatus { user_id: id("c-w2") })
        .unwrap();
    let AdminBody::Overview(overview) = view.page(&ctx()).unwrap().body else {
        panic!("expected the overview");
    };
    assert_eq!(overview.counts.active_clients, 3);
    assert_eq!(overview.counts.clients, 4);
}

#[test]
fn detail_page_renders_the_display_id() {
    let renderer = Renderer::new().unwrap();
    let mut view = view();
    view.dispatch(AdminAction::SelectUser {
        user_id: id(fixtures::PROFESSIONAL_ID),
    })
    .unwrap();
    let html = renderer.render("admin.html", &view.page(&ctx()).unwrap()).unwrap();
    assert!(html.contains("U-PROF"));
    assert!(html.contains("Perfil Profesional"));
}
