use equilibrar_core::error::CoreError;
use equilibrar_core::fixtures;
use equilibrar_core::models::progress::{ProgramWeek, Progress};
use equilibrar_core::models::roster::{Member, Roster};
use equilibrar_core::models::user::{AccountStatus, Role, UserId};

#[test]
fn fixture_clients_respect_lock_invariant() {
    let roster = fixtures::roster();
    for client in roster.clients() {
        for (week, progress) in client.progress.iter() {
            if week < client.current_week {
                assert!(!progress.is_locked, "{} week {week}", client.user.id);
            }
            if week > client.current_week {
                assert!(progress.is_locked, "{} week {week}", client.user.id);
            }
            if progress.is_completed {
                assert!(progress.guide_completed);
            }
        }
        client.validate().unwrap();
    }
    roster.validate().unwrap();
}

#[test]
fn locked_past_week_is_rejected() {
    let mut client = fixtures::client_week3();
    client.progress.week1.is_locked = true;
    let err = client.validate().unwrap_err();
    assert!(matches!(err, CoreError::ProgressInvariant { week, .. } if week.number() == 1));
}

#[test]
fn unlocked_future_week_is_rejected() {
    let mut client = fixtures::client_week1();
    client.progress.week4.is_locked = false;
    assert!(matches!(
        client.validate(),
        Err(CoreError::ProgressInvariant { .. })
    ));
}

#[test]
fn completed_week_needs_its_guide() {
    let mut client = fixtures::client_week2();
    client.progress.week1.guide_completed = false;
    assert!(client.validate().is_err());
}

#[test]
fn client_profile_must_carry_client_role() {
    let mut client = fixtures::client_week2();
    client.user.role = Role::Professional;
    assert!(matches!(client.validate(), Err(CoreError::ClientRole(_))));
}

#[test]
fn program_week_is_bounded() {
    assert!(ProgramWeek::try_from(0).is_err());
    assert!(ProgramWeek::try_from(5).is_err());
    assert_eq!(ProgramWeek::try_from(4).unwrap().index(), 3);
    assert!(serde_json::from_str::<ProgramWeek>("7").is_err());
}

#[test]
fn fresh_progress_unlocks_up_to_the_current_week() {
    let progress = Progress::starting_at(ProgramWeek::try_from(2).unwrap());
    let locked: Vec<bool> = progress.iter().map(|(_, p)| p.is_locked).collect();
    assert_eq!(locked, vec![false, false, true, true]);
}

#[test]
fn roster_partitions_by_role() {
    let roster = fixtures::roster();
    assert_eq!(roster.len(), 7);
    assert_eq!(roster.by_role(Role::Admin).count(), 1);
    assert_eq!(roster.by_role(Role::Coordinator).count(), 1);
    assert_eq!(roster.by_role(Role::Professional).count(), 1);
    assert_eq!(roster.by_role(Role::Client).count(), 4);
    assert_eq!(roster.require_clients().unwrap().len(), 4);
}

#[test]
fn empty_client_list_fails_loudly() {
    let roster = Roster::new(vec![Member::Staff(fixtures::admin())]);
    assert!(matches!(
        roster.require_clients(),
        Err(CoreError::EmptyRole(Role::Client))
    ));
}

#[test]
fn status_toggle_flips_only_the_target() {
    let mut roster = fixtures::roster();
    let id = UserId::from("c-w2");
    assert_eq!(roster.toggle_status(&id).unwrap(), AccountStatus::Inactive);
    assert_eq!(
        roster
            .users()
            .filter(|u| u.status == AccountStatus::Inactive)
            .count(),
        1
    );
    assert_eq!(roster.toggle_status(&id).unwrap(), AccountStatus::Active);
    assert!(roster.toggle_status(&UserId::from("nobody")).is_err());
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut roster = fixtures::roster();
    let err = roster.insert(Member::Staff(fixtures::admin())).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateUser(_)));
}

#[test]
fn insert_rejects_a_taken_email_under_another_id() {
    let mut roster = fixtures::roster();
    let mut admin = fixtures::admin();
    admin.id = UserId::from("u-admin-2");
    admin.email = admin.email.to_uppercase();
    let err = roster.insert(Member::Staff(admin)).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateUser(_)));
    assert_eq!(roster.len(), 7);
    assert!(roster.find_by_email("LUCIA@client.com").is_some());
}

#[test]
fn roles_use_screaming_case_on_the_wire() {
    let json = serde_json::to_value(fixtures::coordinator()).unwrap();
    assert_eq!(json["role"], "COORDINATOR");
    assert_eq!(json["status"], "ACTIVE");
}

#[test]
fn client_profile_round_trips_through_json() {
    let client = fixtures::client_week4();
    let json = serde_json::to_string(&client).unwrap();
    assert!(json.contains("\"currentWeek\":4"));
    assert!(json.contains("\"nextSession\":\"2023-10-30T16:00:00\""));

    let member: Member = serde_json::from_str(&json).unwrap();
    assert_eq!(member.role(), Role::Client);
    assert_eq!(member.as_client(), Some(&client));
}
