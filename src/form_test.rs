use super::*;
use crate::seed::Seed;

fn team() -> Vec<User> {
    Seed::demo().users
}

#[test]
fn new_form_defaults_to_first_user_and_medium() {
    let form = TaskForm::new(&team());
    assert_eq!(form.assignee_id, "1");
    assert_eq!(form.priority, Priority::Medium);
    assert!(form.tags.is_empty());
}

#[test]
fn blank_title_is_rejected() {
    let form = TaskForm { title: "   ".into(), ..TaskForm::new(&team()) };
    assert_eq!(form.into_draft(&team()), Err(FormError::EmptyTitle));
}

#[test]
fn draft_trims_and_snapshots_assignee() {
    let form = TaskForm {
        title: "  Fix login bug ".into(),
        description: " steps inside ".into(),
        assignee_id: "3".into(),
        ..TaskForm::default()
    };
    let draft = form.into_draft(&team()).unwrap();
    assert_eq!(draft.title, "Fix login bug");
    assert_eq!(draft.description, "steps inside");
    assert_eq!(draft.assignee.name, "Carol Davis");
    assert_eq!(draft.assignee.avatar, "/woman-developer.png");
}

#[test]
fn unknown_assignee_falls_back_to_first_user() {
    let form = TaskForm { title: "x".into(), assignee_id: "42".into(), ..TaskForm::default() };
    assert_eq!(form.into_draft(&team()).unwrap().assignee.id, "1");
}

#[test]
fn empty_team_cannot_take_assignments() {
    let form = TaskForm { title: "x".into(), ..TaskForm::default() };
    assert_eq!(form.into_draft(&[]), Err(FormError::NoUsers));
}

#[test]
fn tags_are_trimmed_and_deduplicated() {
    let mut form = TaskForm::default();
    assert!(form.add_tag(" Backend "));
    assert!(!form.add_tag("Backend"));
    assert!(!form.add_tag("   "));
    assert!(form.add_tag("API"));
    form.remove_tag("Backend");
    assert_eq!(form.tags, vec!["API"]);
}

#[test]
fn edit_round_trip_produces_full_patch() {
    let seed = Seed::demo();
    let task = &seed.tasks[&crate::model::ColumnId::Todo][0];
    let mut form = TaskForm::from_task(task);
    form.priority = Priority::Low;

    let patch = form.into_patch(&seed.users).unwrap();
    assert_eq!(patch.title.as_deref(), Some("Design new landing page"));
    assert_eq!(patch.priority, Some(Priority::Low));
    assert_eq!(patch.tags, Some(vec!["Design".to_string(), "UI/UX".to_string()]));
}
