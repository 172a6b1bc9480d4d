//! Integration tests for the Plant repository using in-memory
//! SurrealDB.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;
use verdura_core::error::VerduraError;
use verdura_core::models::plant::{CreatePlant, Review, UpdatePlant};
use verdura_core::repository::PlantRepository;
use verdura_db::repository::SurrealPlantRepository;

async fn setup() -> SurrealPlantRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    verdura_db::run_migrations(&db).await.unwrap();
    SurrealPlantRepository::new(db)
}

fn fern() -> CreatePlant {
    CreatePlant {
        name: "Boston Fern".into(),
        price: 12.0,
        categories: Some(vec!["indoor".into(), "pet-friendly".into()]),
        in_stock: Some(true),
        description: Some("Lush and feathery".into()),
        image_url: None,
        origin: Some("Americas".into()),
        care_instructions: Some("Keep soil moist".into()),
    }
}

#[tokio::test]
async fn create_and_get_plant() {
    let repo = setup().await;

    let plant = repo.create(fern()).await.unwrap();
    assert_eq!(plant.name, "Boston Fern");
    assert_eq!(plant.price, 12.0);
    assert_eq!(plant.categories, vec!["indoor", "pet-friendly"]);
    assert!(plant.in_stock);
    assert_eq!(plant.rating, 0.0);
    assert!(plant.reviews.is_empty());
    // Omitted optional fields default to empty strings.
    assert_eq!(plant.image_url, "");

    let fetched = repo.get_by_id(plant.id).await.unwrap();
    assert_eq!(fetched.id, plant.id);
    assert_eq!(fetched.name, "Boston Fern");
}

#[tokio::test]
async fn get_missing_plant_is_not_found() {
    let repo = setup().await;

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, VerduraError::NotFound { .. }));
}

#[tokio::test]
async fn list_returns_all_plants() {
    let repo = setup().await;

    assert!(repo.list().await.unwrap().is_empty());

    repo.create(fern()).await.unwrap();
    let mut second = fern();
    second.name = "Snake Plant".into();
    repo.create(second).await.unwrap();

    let plants = repo.list().await.unwrap();
    assert_eq!(plants.len(), 2);
}

#[tokio::test]
async fn partial_update_leaves_other_fields() {
    let repo = setup().await;
    let plant = repo.create(fern()).await.unwrap();

    let updated = repo
        .update(
            plant.id,
            UpdatePlant {
                price: Some(15.5),
                in_stock: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, 15.5);
    assert!(!updated.in_stock);
    assert_eq!(updated.name, "Boston Fern");
    assert_eq!(updated.description, "Lush and feathery");
}

#[tokio::test]
async fn update_missing_plant_is_not_found() {
    let repo = setup().await;

    let err = repo
        .update(
            Uuid::new_v4(),
            UpdatePlant {
                price: Some(1.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, VerduraError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_plant_and_embedded_reviews() {
    let repo = setup().await;
    let plant = repo.create(fern()).await.unwrap();

    let review = Review {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        stars: 4,
        comment: "sturdy".into(),
        created_at: Utc::now(),
    };
    repo.save_reviews(plant.id, vec![review], 4.0)
        .await
        .unwrap();

    repo.delete(plant.id).await.unwrap();

    let err = repo.get_by_id(plant.id).await.unwrap_err();
    assert!(matches!(err, VerduraError::NotFound { .. }));
}

#[tokio::test]
async fn delete_missing_plant_is_not_found() {
    let repo = setup().await;

    let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, VerduraError::NotFound { .. }));
}

#[tokio::test]
async fn save_reviews_persists_sequence_and_rating_together() {
    let repo = setup().await;
    let plant = repo.create(fern()).await.unwrap();

    let reviewer = Uuid::new_v4();
    let reviews = vec![
        Review {
            id: Uuid::new_v4(),
            user_id: reviewer,
            stars: 5,
            comment: "gorgeous".into(),
            created_at: Utc::now(),
        },
        Review {
            id: Uuid::new_v4(),
            user_id: reviewer,
            stars: 4,
            comment: String::new(),
            created_at: Utc::now(),
        },
    ];

    let updated = repo
        .save_reviews(plant.id, reviews.clone(), 4.5)
        .await
        .unwrap();
    assert_eq!(updated.rating, 4.5);
    assert_eq!(updated.reviews.len(), 2);

    // Round-trips through storage intact.
    let fetched = repo.get_by_id(plant.id).await.unwrap();
    assert_eq!(fetched.rating, 4.5);
    assert_eq!(fetched.reviews[0].id, reviews[0].id);
    assert_eq!(fetched.reviews[0].user_id, reviewer);
    assert_eq!(fetched.reviews[0].stars, 5);
    assert_eq!(fetched.reviews[0].comment, "gorgeous");
    assert_eq!(fetched.reviews[1].stars, 4);
}

#[tokio::test]
async fn save_reviews_on_missing_plant_is_not_found() {
    let repo = setup().await;

    let err = repo
        .save_reviews(Uuid::new_v4(), Vec::new(), 0.0)
        .await
        .unwrap_err();
    assert!(matches!(err, VerduraError::NotFound { .. }));
}

#[tokio::test]
async fn schema_rejects_out_of_range_stars() {
    let repo = setup().await;
    let plant = repo.create(fern()).await.unwrap();

    // The service validates stars before writing; the schema ASSERT is
    // the backstop, surfaced as a database failure rather than NotFound.
    let review = Review {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        stars: 9,
        comment: String::new(),
        created_at: Utc::now(),
    };
    let err = repo
        .save_reviews(plant.id, vec![review], 9.0)
        .await
        .unwrap_err();
    assert!(matches!(err, VerduraError::Database(_)));

    let fetched = repo.get_by_id(plant.id).await.unwrap();
    assert!(fetched.reviews.is_empty());
}

#[tokio::test]
async fn emptying_reviews_resets_rating() {
    let repo = setup().await;
    let plant = repo.create(fern()).await.unwrap();

    let review = Review {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        stars: 3,
        comment: String::new(),
        created_at: Utc::now(),
    };
    repo.save_reviews(plant.id, vec![review], 3.0)
        .await
        .unwrap();

    let cleared = repo.save_reviews(plant.id, Vec::new(), 0.0).await.unwrap();
    assert!(cleared.reviews.is_empty());
    assert_eq!(cleared.rating, 0.0);
}
