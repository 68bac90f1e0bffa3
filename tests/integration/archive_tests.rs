//! Concert archive tests against a live Postgres database

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;

use concert_hall_server::{
    models::archive::{ArchivedConcert, Genre, Performer},
    repository::{ConcertDao, PgConcertDao},
    AppError,
};

/// Connects using DATABASE_URL and applies the migrations
async fn dao() -> PgConcertDao {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    PgConcertDao::new(pool)
}

fn concert(title: &str, performer: Arc<Performer>) -> ArchivedConcert {
    ArchivedConcert {
        id: None,
        title: title.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap(),
        performer,
    }
}

fn performer(name: &str) -> Arc<Performer> {
    Arc::new(Performer {
        id: None,
        name: name.to_string(),
        image_uri: Some(format!("{}.jpg", name.to_lowercase())),
        genre: Genre::Pop,
    })
}

#[tokio::test]
#[ignore] // Run with: DATABASE_URL=... cargo test -- --ignored
async fn test_save_inserts_then_updates() {
    let dao = dao().await;

    let saved = dao.save(concert("Archive insert", performer("Lorde"))).await.unwrap();
    let id = saved.id.expect("concert id assigned");
    assert!(saved.performer.id.is_some());

    let loaded = dao.get_by_id(id).await.unwrap().expect("concert stored");
    assert_eq!(loaded, saved);

    let mut renamed = loaded.clone();
    renamed.title = "Archive update".to_string();
    let resaved = dao.save(renamed).await.unwrap();
    assert_eq!(resaved.id, Some(id));
    assert_eq!(resaved.performer.id, saved.performer.id);
    assert_eq!(dao.get_by_id(id).await.unwrap().unwrap().title, "Archive update");
}

#[tokio::test]
#[ignore]
async fn test_get_all_shares_performers() {
    let dao = dao().await;

    let first = dao.save(concert("Archive shared 1", performer("Shared"))).await.unwrap();
    let second = dao
        .save(concert("Archive shared 2", first.performer.clone()))
        .await
        .unwrap();
    assert_eq!(first.performer.id, second.performer.id);

    let all = dao.get_all().await.unwrap();
    let shared: Vec<&ArchivedConcert> = all
        .iter()
        .filter(|c| c.id == first.id || c.id == second.id)
        .collect();
    assert_eq!(shared.len(), 2);
    assert!(Arc::ptr_eq(&shared[0].performer, &shared[1].performer));
}

#[tokio::test]
#[ignore]
async fn test_delete_and_unknown_ids() {
    let dao = dao().await;

    let saved = dao.save(concert("Archive delete", performer("Gone"))).await.unwrap();
    let id = saved.id.unwrap();
    assert!(dao.delete(id).await.unwrap());
    assert!(!dao.delete(id).await.unwrap());
    assert!(dao.get_by_id(id).await.unwrap().is_none());

    let mut ghost = concert("Archive ghost", saved.performer.clone());
    ghost.id = Some(id);
    assert!(matches!(dao.save(ghost).await, Err(AppError::NotFound(_))));
}
