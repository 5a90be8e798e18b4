// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use matchday_domain::TournamentId;

fn create_test_event(tournament_id: Option<TournamentId>) -> AuditEvent {
    AuditEvent::new(
        tournament_id,
        Actor::new(String::from("admin-1"), String::from("admin")),
        Cause::new(String::from("req-1"), String::from("Matchday 3 results")),
        Action::new(String::from("SetResult"), Some(String::from("2-1"))),
        StateSnapshot::new(String::from("completed=false")),
        StateSnapshot::new(String::from("completed=true")),
    )
}

#[test]
fn test_actor_creation_requires_all_fields() {
    let actor: Actor = Actor::new(String::from("admin-1"), String::from("admin"));

    assert_eq!(actor.id, "admin-1");
    assert_eq!(actor.actor_type, "admin");
}

#[test]
fn test_system_actor() {
    let actor: Actor = Actor::system();
    assert_eq!(actor.id, "system");
    assert_eq!(actor.actor_type, "system");
}

#[test]
fn test_action_with_details() {
    let action: Action = Action::new(String::from("RunLottery"), Some(String::from("4 teams")));

    assert_eq!(action.name, "RunLottery");
    assert_eq!(action.details, Some(String::from("4 teams")));
}

#[test]
fn test_new_event_has_no_identifier() {
    let tournament_id: TournamentId = TournamentId::new("t-1");
    let event: AuditEvent = create_test_event(Some(tournament_id.clone()));

    assert_eq!(event.event_id, None);
    assert_eq!(event.tournament_id, Some(tournament_id));
    assert_eq!(event.before.data, "completed=false");
    assert_eq!(event.after.data, "completed=true");
}

#[test]
fn test_with_event_id_only_changes_identifier() {
    let event: AuditEvent = create_test_event(None);
    let persisted: AuditEvent = event.clone().with_event_id(17);

    assert_eq!(persisted.event_id, Some(17));
    assert_eq!(persisted.actor, event.actor);
    assert_eq!(persisted.action, event.action);
    assert_eq!(persisted.tournament_id, None);
}

#[test]
fn test_absent_snapshot() {
    assert_eq!(StateSnapshot::absent().data, "absent");
}

#[test]
fn test_audit_event_equality() {
    let tournament_id: TournamentId = TournamentId::new("t-1");
    assert_eq!(
        create_test_event(Some(tournament_id.clone())),
        create_test_event(Some(tournament_id))
    );
    assert_ne!(create_test_event(None), create_test_event(Some("t-2".into())));
}
