//! Integration tests for the database layer.
//!
//! These tests verify the core storage operations using an in-memory SQLite
//! database. Tests are organized by entity.

use huddle_backend::db::Database;
use huddle_backend::types::{TaskInput, TaskStatus, UserResponseInput};

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

/// Helper to create a user and return its id.
fn create_user(db: &Database, email: &str) -> i64 {
    db.create_invited_user(email)
        .expect("Failed to create user")
        .expect("email should not be taken")
        .id
}

fn task_input(title: &str) -> TaskInput {
    TaskInput {
        title: title.to_string(),
        description: None,
        due_date: None,
        due_time: None,
        status: None,
        category: None,
        tool: None,
        recurring: false,
        duration: None,
        estimated_time_for_completion: None,
        workroom_id: None,
        assigned_to: None,
    }
}

mod user_tests {
    use super::*;

    #[test]
    fn invited_user_has_defaults_and_no_usable_password() {
        let db = setup_db();

        let user = db
            .create_invited_user("new@example.com")
            .expect("create user")
            .expect("email is free");

        assert_eq!(user.email, "new@example.com");
        assert!(user.password_hash.is_none());
        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
        assert!(user.date_joined > 0);
    }

    #[test]
    fn duplicate_email_is_a_conflict_not_a_second_account() {
        let db = setup_db();
        let first = create_user(&db, "taken@example.com");

        let second = db
            .create_invited_user("taken@example.com")
            .expect("insert attempt should not error");

        assert!(second.is_none());
        // The original row is untouched
        let found = db
            .get_user_by_email("taken@example.com")
            .unwrap()
            .expect("original user still there");
        assert_eq!(found.id, first);
    }

    #[test]
    fn email_lookup_is_exact() {
        let db = setup_db();
        create_user(&db, "Case@Example.com");

        assert!(db.get_user_by_email("case@example.com").unwrap().is_none());
        assert!(db.get_user_by_email("Case@Example.com").unwrap().is_some());
    }

    #[test]
    fn deactivation_flips_the_flag_without_deleting() {
        let db = setup_db();
        let id = create_user(&db, "flag@example.com");

        assert!(db.set_user_active(id, false).unwrap());

        let user = db.get_user(id).unwrap().expect("user still exists");
        assert!(!user.is_active);
    }

    #[test]
    fn get_user_returns_none_for_unknown_id() {
        let db = setup_db();

        assert!(db.get_user(999).unwrap().is_none());
    }
}

mod task_tests {
    use super::*;

    #[test]
    fn create_task_defaults_to_pending_with_no_timer() {
        let db = setup_db();
        let owner = create_user(&db, "owner@example.com");

        let task = db.create_task(owner, task_input("Write report")).unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.user_id, owner);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.start_time.is_none());
        assert!(task.end_time.is_none());
        assert_eq!(task.time_spent(), None);
        assert!(!task.is_overdue());
    }

    #[test]
    fn list_tasks_returns_only_the_owner_in_insertion_order() {
        let db = setup_db();
        let alice = create_user(&db, "alice@example.com");
        let bob = create_user(&db, "bob@example.com");

        db.create_task(alice, task_input("Task 1")).unwrap();
        db.create_task(bob, task_input("Not yours")).unwrap();
        db.create_task(alice, task_input("Task 2")).unwrap();

        let tasks = db.list_tasks(alice).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Task 1");
        assert_eq!(tasks[1].title, "Task 2");
    }

    #[test]
    fn get_task_is_invisible_to_non_owners() {
        let db = setup_db();
        let alice = create_user(&db, "alice@example.com");
        let bob = create_user(&db, "bob@example.com");
        let task = db.create_task(alice, task_input("Private")).unwrap();

        assert!(db.get_task(task.id, bob).unwrap().is_none());
        assert!(db.get_task(task.id, alice).unwrap().is_some());
    }

    #[test]
    fn timer_round_trip_sets_both_instants() {
        let db = setup_db();
        let owner = create_user(&db, "timer@example.com");
        let task = db.create_task(owner, task_input("Timed")).unwrap();

        let started = db.start_timer(task.id, owner).unwrap().unwrap();
        assert!(started.start_time.is_some());
        assert!(started.end_time.is_none());
        assert_eq!(started.time_spent(), None);

        let stopped = db.stop_timer(task.id, owner).unwrap().unwrap();
        assert!(stopped.start_time.is_some());
        assert!(stopped.end_time.is_some());
        let spent = stopped.time_spent().expect("both instants set");
        assert!(spent >= 0.0);
    }

    #[test]
    fn restarting_overwrites_the_previous_start_instant() {
        let db = setup_db();
        let owner = create_user(&db, "restart@example.com");
        let task = db.create_task(owner, task_input("Restarted")).unwrap();

        let first = db.start_timer(task.id, owner).unwrap().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = db.start_timer(task.id, owner).unwrap().unwrap();

        assert!(second.start_time.unwrap() >= first.start_time.unwrap());
    }

    #[test]
    fn stop_without_start_leaves_elapsed_unknown() {
        let db = setup_db();
        let owner = create_user(&db, "stop@example.com");
        let task = db.create_task(owner, task_input("Never started")).unwrap();

        let stopped = db.stop_timer(task.id, owner).unwrap().unwrap();

        assert!(stopped.start_time.is_none());
        assert!(stopped.end_time.is_some());
        assert_eq!(stopped.time_spent(), None);
        assert!(!stopped.is_overdue());
    }

    #[test]
    fn timer_on_foreign_task_touches_nothing() {
        let db = setup_db();
        let alice = create_user(&db, "alice@example.com");
        let bob = create_user(&db, "bob@example.com");
        let task = db.create_task(alice, task_input("Mine")).unwrap();

        assert!(db.start_timer(task.id, bob).unwrap().is_none());

        let untouched = db.get_task(task.id, alice).unwrap().unwrap();
        assert!(untouched.start_time.is_none());
    }

    #[test]
    fn stored_status_is_never_auto_transitioned_by_the_timer() {
        let db = setup_db();
        let owner = create_user(&db, "status@example.com");
        let mut input = task_input("Estimated");
        input.estimated_time_for_completion = Some(0);
        let task = db.create_task(owner, input).unwrap();

        db.start_timer(task.id, owner).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let stopped = db.stop_timer(task.id, owner).unwrap().unwrap();

        // Derived predicate fires, stored status does not move
        assert!(stopped.is_overdue());
        assert_eq!(stopped.status, TaskStatus::Pending);
    }

    #[test]
    fn set_task_status_accepts_each_enumerated_value() {
        let db = setup_db();
        let owner = create_user(&db, "enum@example.com");
        let task = db.create_task(owner, task_input("Enum")).unwrap();

        for status in [
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Overdue,
            TaskStatus::Pending,
        ] {
            let updated = db.set_task_status(task.id, owner, status).unwrap();
            assert_eq!(updated.status, status);
        }
    }
}

mod workroom_tests {
    use super::*;

    #[test]
    fn adding_an_existing_member_leaves_the_count_unchanged() {
        let db = setup_db();
        let creator = create_user(&db, "creator@example.com");
        let member = create_user(&db, "member@example.com");
        let room = db
            .create_workroom("Design", None, creator, false)
            .unwrap();

        db.add_member(room.id, member).unwrap();
        db.add_member(room.id, member).unwrap();

        let counts = db.member_counts(room.id).unwrap();
        assert_eq!(counts.total, 1);
    }

    #[test]
    fn removing_a_non_member_leaves_the_count_unchanged() {
        let db = setup_db();
        let creator = create_user(&db, "creator@example.com");
        let member = create_user(&db, "member@example.com");
        let outsider = create_user(&db, "outsider@example.com");
        let room = db.create_workroom("Ops", None, creator, true).unwrap();
        db.add_member(room.id, member).unwrap();

        db.remove_member(room.id, outsider).unwrap();
        db.remove_member(room.id, outsider).unwrap();

        let counts = db.member_counts(room.id).unwrap();
        assert_eq!(counts.total, 1);
    }

    #[test]
    fn member_counts_split_by_active_flag_at_query_time() {
        let db = setup_db();
        let creator = create_user(&db, "creator@example.com");
        let active = create_user(&db, "active@example.com");
        let dormant = create_user(&db, "dormant@example.com");
        let room = db.create_workroom("Team", None, creator, false).unwrap();
        db.add_member(room.id, active).unwrap();
        db.add_member(room.id, dormant).unwrap();

        let before = db.member_counts(room.id).unwrap();
        assert_eq!((before.total, before.active, before.inactive), (2, 2, 0));

        // Deactivating the user is reflected on the next query, not cached
        db.set_user_active(dormant, false).unwrap();

        let after = db.member_counts(room.id).unwrap();
        assert_eq!((after.total, after.active, after.inactive), (2, 1, 1));
    }

    #[test]
    fn list_members_returns_the_membership_set() {
        let db = setup_db();
        let creator = create_user(&db, "creator@example.com");
        let a = create_user(&db, "a@example.com");
        let b = create_user(&db, "b@example.com");
        let room = db.create_workroom("Crew", None, creator, false).unwrap();
        db.add_member(room.id, a).unwrap();
        db.add_member(room.id, b).unwrap();

        let members = db.list_members(room.id).unwrap();
        let emails: Vec<_> = members.iter().map(|m| m.email.as_str()).collect();

        assert_eq!(emails, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn workroom_round_trips_through_storage() {
        let db = setup_db();
        let creator = create_user(&db, "creator@example.com");
        let created = db
            .create_workroom("Design", Some("Visual work"), creator, true)
            .unwrap();

        let found = db.get_workroom(created.id).unwrap().expect("room exists");

        assert_eq!(found.workroom_name, "Design");
        assert_eq!(found.description.as_deref(), Some("Visual work"));
        assert_eq!(found.creator_id, creator);
        assert!(found.is_private);

        assert!(db.get_workroom(999).unwrap().is_none());
    }

    #[test]
    fn creator_is_not_implicitly_a_member() {
        let db = setup_db();
        let creator = create_user(&db, "creator@example.com");
        let room = db.create_workroom("Solo", None, creator, false).unwrap();

        assert_eq!(db.member_counts(room.id).unwrap().total, 0);
    }
}

mod response_tests {
    use super::*;

    #[test]
    fn responses_append_in_order_with_owner_and_timestamp() {
        let db = setup_db();
        let user = create_user(&db, "feedback@example.com");

        let input = UserResponseInput {
            experience: "Amazing".to_string(),
            huddle_feedback: "Great platform!".to_string(),
            feature_suggestion: "Add video conferencing.".to_string(),
        };
        let stored = db.create_response(user, &input).unwrap();

        assert_eq!(stored.user_id, user);
        assert!(stored.created_at > 0);

        let second = UserResponseInput {
            experience: "Still good".to_string(),
            huddle_feedback: "Faster now".to_string(),
            feature_suggestion: "Dark mode".to_string(),
        };
        db.create_response(user, &second).unwrap();

        let all = db.list_responses(user).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].experience, "Amazing");
        assert_eq!(all[1].experience, "Still good");
    }

    #[test]
    fn responses_are_scoped_to_their_owner() {
        let db = setup_db();
        let alice = create_user(&db, "alice@example.com");
        let bob = create_user(&db, "bob@example.com");

        let input = UserResponseInput {
            experience: "Private".to_string(),
            huddle_feedback: "Only mine".to_string(),
            feature_suggestion: "None".to_string(),
        };
        db.create_response(alice, &input).unwrap();

        assert!(db.list_responses(bob).unwrap().is_empty());
        assert_eq!(db.list_responses(alice).unwrap().len(), 1);
    }
}
