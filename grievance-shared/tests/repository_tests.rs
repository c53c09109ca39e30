/// Integration tests for the repository layer
///
/// These run against an in-memory SQLite database with migrations applied,
/// so they need no external services.

use grievance_shared::db::bootstrap::bootstrap_admin;
use grievance_shared::db::migrations::run_migrations;
use grievance_shared::db::pool::create_test_pool;
use grievance_shared::models::{
    Complaint, ComplaintStatus, CreateComplaint, CreateUser, Priority, Role, Sentiment, User,
};
use sqlx::SqlitePool;

/// Fresh in-memory database with the schema applied
async fn setup() -> SqlitePool {
    let pool = create_test_pool().await.expect("Pool should be created");
    run_migrations(&pool).await.expect("Migrations should apply");
    pool
}

fn sample_user(email: &str) -> CreateUser {
    CreateUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=65536,t=3,p=4$placeholder$placeholder".to_string(),
        role: Role::User,
    }
}

fn sample_complaint(user_id: Option<i64>, description: &str) -> CreateComplaint {
    CreateComplaint {
        user_id,
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        anonymous: false,
        category: "Infrastructure".to_string(),
        department: "Hostel".to_string(),
        kind: "complaint".to_string(),
        description: description.to_string(),
        sentiment: Sentiment::Neutral,
        priority: Priority::Normal,
    }
}

#[tokio::test]
async fn test_create_and_find_user() {
    let pool = setup().await;

    let user = User::create(&pool, sample_user("a@example.com"))
        .await
        .expect("Create should succeed");
    assert_eq!(user.role, Role::User);

    let found = User::find_by_email(&pool, "a@example.com")
        .await
        .expect("Lookup should succeed")
        .expect("User should exist");
    assert_eq!(found.id, user.id);

    let by_id = User::find_by_id(&pool, user.id)
        .await
        .expect("Lookup should succeed")
        .expect("User should exist");
    assert_eq!(by_id.email, "a@example.com");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let pool = setup().await;

    User::create(&pool, sample_user("dup@example.com"))
        .await
        .expect("First create should succeed");

    let result = User::create(&pool, sample_user("dup@example.com")).await;
    match result {
        Err(sqlx::Error::Database(db_err)) => {
            assert!(db_err.is_unique_violation(), "Expected unique violation");
        }
        other => panic!("Expected unique violation, got {:?}", other),
    }

    // No second row was created
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .expect("Count should succeed");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_email_lookup_is_case_insensitive() {
    let pool = setup().await;

    User::create(&pool, sample_user("Mixed@Example.com"))
        .await
        .expect("Create should succeed");

    let found = User::find_by_email(&pool, "mixed@example.com")
        .await
        .expect("Lookup should succeed");
    assert!(found.is_some());

    // The unique index uses the same collation
    let result = User::create(&pool, sample_user("MIXED@EXAMPLE.COM")).await;
    assert!(result.is_err(), "Case-differing duplicate should be rejected");
}

#[tokio::test]
async fn test_complaint_starts_submitted() {
    let pool = setup().await;

    let complaint = Complaint::create(&pool, sample_complaint(None, "The wifi is slow"))
        .await
        .expect("Create should succeed");

    assert_eq!(complaint.status, ComplaintStatus::Submitted);
    assert!(complaint.id > 0, "Reference ID should be allocated");
    assert!(complaint.user_id.is_none());
}

#[tokio::test]
async fn test_owner_listing_is_isolated() {
    let pool = setup().await;

    let alice = User::create(&pool, sample_user("alice@example.com"))
        .await
        .expect("Create should succeed");
    let bob = User::create(&pool, sample_user("bob@example.com"))
        .await
        .expect("Create should succeed");

    Complaint::create(&pool, sample_complaint(Some(alice.id), "alice first"))
        .await
        .expect("Create should succeed");
    Complaint::create(&pool, sample_complaint(Some(bob.id), "bob only"))
        .await
        .expect("Create should succeed");
    Complaint::create(&pool, sample_complaint(Some(alice.id), "alice second"))
        .await
        .expect("Create should succeed");
    Complaint::create(&pool, sample_complaint(None, "anonymous"))
        .await
        .expect("Create should succeed");

    let alices = Complaint::list_by_owner(&pool, alice.id)
        .await
        .expect("Listing should succeed");
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|c| c.user_id == Some(alice.id)));

    // Newest first
    assert_eq!(alices[0].description, "alice second");
    assert_eq!(alices[1].description, "alice first");

    let bobs = Complaint::list_by_owner(&pool, bob.id)
        .await
        .expect("Listing should succeed");
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].description, "bob only");
}

#[tokio::test]
async fn test_list_all_newest_first() {
    let pool = setup().await;

    for i in 0..3 {
        Complaint::create(&pool, sample_complaint(None, &format!("complaint {}", i)))
            .await
            .expect("Create should succeed");
    }

    let all = Complaint::list_all(&pool).await.expect("Listing should succeed");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].description, "complaint 2");
    assert_eq!(all[2].description, "complaint 0");
}

#[tokio::test]
async fn test_update_status() {
    let pool = setup().await;

    let complaint = Complaint::create(&pool, sample_complaint(None, "broken tap"))
        .await
        .expect("Create should succeed");

    let updated = Complaint::update_status(&pool, complaint.id, ComplaintStatus::Resolved)
        .await
        .expect("Update should succeed")
        .expect("Complaint should exist");
    assert_eq!(updated.status, ComplaintStatus::Resolved);

    // Reapplying the same status is a no-op on observable state
    let again = Complaint::update_status(&pool, complaint.id, ComplaintStatus::Resolved)
        .await
        .expect("Update should succeed")
        .expect("Complaint should exist");
    assert_eq!(again.status, ComplaintStatus::Resolved);
    assert_eq!(again.created_at, updated.created_at);

    // No enforced ordering: Resolved may revert to Submitted
    let reverted = Complaint::update_status(&pool, complaint.id, ComplaintStatus::Submitted)
        .await
        .expect("Update should succeed")
        .expect("Complaint should exist");
    assert_eq!(reverted.status, ComplaintStatus::Submitted);
}

#[tokio::test]
async fn test_update_status_unknown_id() {
    let pool = setup().await;

    let result = Complaint::update_status(&pool, 9999, ComplaintStatus::Resolved)
        .await
        .expect("Update should succeed");
    assert!(result.is_none(), "Unknown ID should yield None");
}

#[tokio::test]
async fn test_counters() {
    let pool = setup().await;

    let a = Complaint::create(&pool, sample_complaint(None, "one"))
        .await
        .expect("Create should succeed");
    Complaint::create(&pool, sample_complaint(None, "two"))
        .await
        .expect("Create should succeed");
    let c = Complaint::create(&pool, sample_complaint(None, "three"))
        .await
        .expect("Create should succeed");

    Complaint::update_status(&pool, a.id, ComplaintStatus::Resolved)
        .await
        .expect("Update should succeed");
    Complaint::update_status(&pool, c.id, ComplaintStatus::InProgress)
        .await
        .expect("Update should succeed");

    let counters = Complaint::counters(&pool).await.expect("Counters should succeed");
    assert_eq!(counters.total, 3);
    assert_eq!(counters.resolved, 1);
    assert_eq!(counters.pending, 2);
}

#[tokio::test]
async fn test_bootstrap_admin_once() {
    let pool = setup().await;

    let created = bootstrap_admin(&pool, "admin@example.com", "S3cure-admin-pass")
        .await
        .expect("Bootstrap should succeed");
    assert!(created);

    let admin = User::find_by_email(&pool, "admin@example.com")
        .await
        .expect("Lookup should succeed")
        .expect("Admin should exist");
    assert_eq!(admin.role, Role::Admin);
    assert!(
        admin.password_hash.starts_with("$argon2id$"),
        "Password must be stored hashed, not in plaintext"
    );

    // Second run is a no-op, even with different credentials
    let created_again = bootstrap_admin(&pool, "other@example.com", "different")
        .await
        .expect("Bootstrap should succeed");
    assert!(!created_again);

    let other = User::find_by_email(&pool, "other@example.com")
        .await
        .expect("Lookup should succeed");
    assert!(other.is_none());
}
