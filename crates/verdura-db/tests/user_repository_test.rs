//! Integration tests for the User repository using in-memory
//! SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;
use verdura_core::error::VerduraError;
use verdura_core::models::user::{CreateUser, Role};
use verdura_core::repository::UserRepository;
use verdura_db::repository::SurrealUserRepository;

async fn setup() -> SurrealUserRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    verdura_db::run_migrations(&db).await.unwrap();
    SurrealUserRepository::new(db)
}

fn opaque_hash() -> String {
    // Shape of an Argon2id PHC string; the repository treats it as
    // opaque.
    "$argon2id$v=19$m=19456,t=2,p=1$YWJjZGVmZ2hpamtsbW5vcA$c2VjcmV0c2VjcmV0c2VjcmV0".into()
}

#[tokio::test]
async fn create_and_get_user() {
    let repo = setup().await;

    let user = repo
        .create(CreateUser {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: opaque_hash(),
            role: Role::User,
        })
        .await
        .unwrap();

    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Role::User);

    // The hash is stored and returned verbatim; the repository never
    // transforms it.
    assert_eq!(user.password_hash, opaque_hash());

    // Get by ID should return the same user.
    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.name, "Alice");
    assert_eq!(fetched.password_hash, opaque_hash());
}

#[tokio::test]
async fn get_by_email() {
    let repo = setup().await;

    let created = repo
        .create(CreateUser {
            name: "Bob".into(),
            email: "bob@example.com".into(),
            password_hash: opaque_hash(),
            role: Role::Admin,
        })
        .await
        .unwrap();

    let fetched = repo.get_by_email("bob@example.com").await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.role, Role::Admin);

    let err = repo.get_by_email("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, VerduraError::NotFound { .. }));
}

#[tokio::test]
async fn get_missing_user_is_not_found() {
    let repo = setup().await;

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, VerduraError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_email_is_rejected_by_unique_index() {
    let repo = setup().await;

    repo.create(CreateUser {
        name: "Carol".into(),
        email: "carol@example.com".into(),
        password_hash: opaque_hash(),
        role: Role::User,
    })
    .await
    .unwrap();

    let err = repo
        .create(CreateUser {
            name: "Impostor".into(),
            email: "carol@example.com".into(),
            password_hash: opaque_hash(),
            role: Role::User,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, VerduraError::Database(_)));
}
