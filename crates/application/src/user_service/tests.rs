use std::sync::Arc;

use chrono::Duration;

use stagehand_core::AppError;
use stagehand_domain::{AuditAction, AuditEntity, RecordId, UserPatch};

use crate::test_support::{
    Harness, SteppingClock, actor, base_time, email, harness, harness_with_clock, name,
    role_draft,
};
use crate::{CreateUserInput, UserListQuery};

async fn seed_role(harness: &Harness, role_name: &str) -> RecordId {
    harness
        .role_service
        .create_role(&actor(), role_draft(role_name, &["read"]))
        .await
        .unwrap_or_else(|error| panic!("role seed failed: {error}"))
        .id()
        .clone()
}

fn input(user_name: &str, address: &str, role_id: &RecordId) -> CreateUserInput {
    CreateUserInput {
        name: name(user_name),
        email: email(address),
        role_id: role_id.clone(),
        is_active: None,
    }
}

async fn audit_count(harness: &Harness) -> usize {
    harness.store.audit_entries.lock().await.len()
}

#[tokio::test]
async fn create_user_defaults_active_and_writes_audit_entry() {
    let harness = harness();
    let role_id = seed_role(&harness, "viewer").await;
    let audit_before = audit_count(&harness).await;

    let user = harness
        .user_service
        .create_user(&actor(), input("Hong Gildong", "hong@example.com", &role_id))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    assert_eq!(user.id().as_str(), "1");
    assert!(user.is_active());
    assert_eq!(user.created_at(), user.updated_at());

    let entries = harness.store.audit_entries.lock().await;
    assert_eq!(entries.len(), audit_before + 1);
    let last = &entries[entries.len() - 1];
    assert_eq!(last.action, AuditAction::Create);
    assert_eq!(last.entity, AuditEntity::User);
    assert_eq!(last.entity_id, *user.id());
    assert_eq!(last.actor_id, "1");
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_side_effects() {
    let harness = harness();
    let role_id = seed_role(&harness, "viewer").await;
    assert!(
        harness
            .user_service
            .create_user(&actor(), input("Admin", "admin@example.com", &role_id))
            .await
            .is_ok()
    );
    let audit_before = audit_count(&harness).await;

    let result = harness
        .user_service
        .create_user(&actor(), input("Impostor", "ADMIN@example.com", &role_id))
        .await;

    assert!(matches!(result, Err(AppError::DuplicateEmail(_))));
    assert_eq!(harness.store.users.lock().await.len(), 1);
    assert_eq!(audit_count(&harness).await, audit_before);
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let harness = harness();

    let result = harness
        .user_service
        .create_user(
            &actor(),
            input("Kim Cheolsu", "kim@example.com", &RecordId::from_sequence(99)),
        )
        .await;

    assert!(matches!(result, Err(AppError::InvalidRole(_))));
    assert!(harness.store.users.lock().await.is_empty());
    assert_eq!(audit_count(&harness).await, 0);
}

#[tokio::test]
async fn update_without_email_keeps_existing_email() {
    let harness = harness();
    let role_id = seed_role(&harness, "viewer").await;
    let user = harness
        .user_service
        .create_user(&actor(), input("Hong Gildong", "hong@example.com", &role_id))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    let updated = harness
        .user_service
        .update_user(
            &actor(),
            user.id(),
            UserPatch {
                name: Some(name("Hong Gil-dong")),
                is_active: Some(false),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap_or_else(|error| panic!("update failed: {error}"));

    assert_eq!(updated.email().as_str(), "hong@example.com");
    assert_eq!(updated.name().as_str(), "Hong Gil-dong");
    assert!(!updated.is_active());
    assert!(updated.updated_at() > user.updated_at());

    let entries = harness.store.audit_entries.lock().await;
    let last = &entries[entries.len() - 1];
    assert_eq!(last.action, AuditAction::Update);
    let mut changed: Vec<String> = last
        .changes
        .as_ref()
        .and_then(|changes| changes.as_object())
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default();
    changed.sort();
    assert_eq!(changed, vec!["isActive".to_owned(), "name".to_owned()]);
}

#[tokio::test]
async fn update_to_foreign_email_conflicts_but_own_email_is_fine() {
    let harness = harness();
    let role_id = seed_role(&harness, "viewer").await;
    let hong = harness
        .user_service
        .create_user(&actor(), input("Hong Gildong", "hong@example.com", &role_id))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));
    assert!(
        harness
            .user_service
            .create_user(&actor(), input("Kim Cheolsu", "kim@example.com", &role_id))
            .await
            .is_ok()
    );

    let conflict = harness
        .user_service
        .update_user(
            &actor(),
            hong.id(),
            UserPatch {
                email: Some(email("kim@example.com")),
                ..UserPatch::default()
            },
        )
        .await;
    assert!(matches!(conflict, Err(AppError::DuplicateEmail(_))));

    let same = harness
        .user_service
        .update_user(
            &actor(),
            hong.id(),
            UserPatch {
                email: Some(email("hong@example.com")),
                ..UserPatch::default()
            },
        )
        .await;
    assert!(same.is_ok());
}

#[tokio::test]
async fn update_rejects_missing_user_and_unknown_role() {
    let harness = harness();
    let role_id = seed_role(&harness, "viewer").await;
    let user = harness
        .user_service
        .create_user(&actor(), input("Hong Gildong", "hong@example.com", &role_id))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));
    let audit_before = audit_count(&harness).await;

    let missing = harness
        .user_service
        .update_user(&actor(), &RecordId::from_sequence(42), UserPatch::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let bad_role = harness
        .user_service
        .update_user(
            &actor(),
            user.id(),
            UserPatch {
                role_id: Some(RecordId::from_sequence(42)),
                ..UserPatch::default()
            },
        )
        .await;
    assert!(matches!(bad_role, Err(AppError::InvalidRole(_))));
    assert_eq!(audit_count(&harness).await, audit_before);
}

#[tokio::test]
async fn delete_removes_user_and_ids_are_not_reused() {
    let harness = harness();
    let role_id = seed_role(&harness, "viewer").await;
    let first = harness
        .user_service
        .create_user(&actor(), input("Hong Gildong", "hong@example.com", &role_id))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    let acknowledgement = harness
        .user_service
        .delete_user(&actor(), first.id())
        .await
        .unwrap_or_else(|error| panic!("delete failed: {error}"));
    assert!(acknowledgement.success);

    let again = harness.user_service.delete_user(&actor(), first.id()).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    let second = harness
        .user_service
        .create_user(&actor(), input("Hong Gildong", "hong@example.com", &role_id))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));
    assert_ne!(second.id(), first.id());

    let entries = harness.store.audit_entries.lock().await;
    assert!(
        entries
            .iter()
            .any(|entry| entry.action == AuditAction::Delete && entry.entity_id == *first.id())
    );
}

#[tokio::test]
async fn list_filters_compose() {
    let harness = harness();
    let admin_role = seed_role(&harness, "admin").await;
    let viewer_role = seed_role(&harness, "viewer").await;
    for (user_name, address, role_id, is_active) in [
        ("Super Admin", "admin@example.com", &admin_role, true),
        ("Hong Gildong", "hong@example.com", &viewer_role, true),
        ("Kim Cheolsu", "kim@example.com", &viewer_role, false),
    ] {
        let mut create = input(user_name, address, role_id);
        create.is_active = Some(is_active);
        assert!(harness.user_service.create_user(&actor(), create).await.is_ok());
    }

    let by_text = harness
        .user_service
        .list_users(&UserListQuery {
            text: Some("EXAMPLE.COM".to_owned()),
            ..UserListQuery::default()
        })
        .await
        .unwrap_or_default();
    assert_eq!(by_text.len(), 3);

    let inactive_viewers = harness
        .user_service
        .list_users(&UserListQuery {
            role_id: Some(viewer_role.clone()),
            is_active: Some(false),
            ..UserListQuery::default()
        })
        .await
        .unwrap_or_default();
    assert_eq!(inactive_viewers.len(), 1);
    assert_eq!(inactive_viewers[0].email().as_str(), "kim@example.com");

    let by_name = harness
        .user_service
        .list_users(&UserListQuery {
            text: Some("gildong".to_owned()),
            role_id: Some(admin_role),
            ..UserListQuery::default()
        })
        .await
        .unwrap_or_default();
    assert!(by_name.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_same_email_yield_one_user() {
    let harness = Arc::new(harness());
    let role_id = seed_role(&harness, "viewer").await;

    let mut tasks = Vec::new();
    for index in 0..8 {
        let harness = harness.clone();
        let role_id = role_id.clone();
        tasks.push(tokio::spawn(async move {
            harness
                .user_service
                .create_user(
                    &actor(),
                    input(&format!("Racer {index}"), "race@example.com", &role_id),
                )
                .await
        }));
    }

    let mut successes = 0;
    for task in tasks {
        if let Ok(Ok(_)) = task.await {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(harness.store.users.lock().await.len(), 1);
}

#[tokio::test]
async fn audit_timestamps_never_move_backwards() {
    let harness = harness_with_clock(Arc::new(SteppingClock::frozen(base_time())));
    let role_id = seed_role(&harness, "viewer").await;
    {
        let mut entries = harness.store.audit_entries.lock().await;
        let last = entries.len() - 1;
        entries[last].timestamp = base_time() + Duration::hours(1);
    }

    assert!(
        harness
            .user_service
            .create_user(&actor(), input("Hong Gildong", "hong@example.com", &role_id))
            .await
            .is_ok()
    );

    let entries = harness.store.audit_entries.lock().await;
    assert!(
        entries
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    );
}

#[tokio::test]
async fn get_user_returns_stored_user_or_not_found() {
    let harness = harness();
    let role_id = seed_role(&harness, "viewer").await;
    let created = harness
        .user_service
        .create_user(&actor(), input("Hong Gildong", "Hong@Example.com", &role_id))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    let fetched = harness
        .user_service
        .get_user(created.id())
        .await
        .unwrap_or_else(|error| panic!("get failed: {error}"));
    assert_eq!(fetched, created);
    assert_eq!(fetched.email().as_str(), "Hong@Example.com");

    let missing = harness
        .user_service
        .get_user(&RecordId::from_sequence(99))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
