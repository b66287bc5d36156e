//! Repository functions for manipulating rows in the `zones` table.
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

/// Application-level representation of a stored zone.
#[derive(Debug, Clone)]
pub struct Zone {
    pub id: i64,
    pub zone: String,
    pub dns_servers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn from_row(row: SqliteRow) -> sqlx::Result<Zone> {
    let raw_servers: String = row.get("dns_servers");
    let dns_servers =
        serde_json::from_str(&raw_servers).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(Zone {
        id: row.get("id"),
        zone: row.get("zone"),
        dns_servers,
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    })
}

/// Fetch every stored zone, oldest first.
pub async fn list(db: &SqlitePool) -> sqlx::Result<Vec<Zone>> {
    let rows = sqlx::query(
        r#"
        SELECT id, zone, dns_servers, created_at, updated_at
        FROM zones
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    rows.into_iter().map(from_row).collect()
}

/// Fetch a single zone by its row id.
pub async fn find(db: &SqlitePool, id: i64) -> sqlx::Result<Option<Zone>> {
    let row = sqlx::query(
        r#"
        SELECT id, zone, dns_servers, created_at, updated_at
        FROM zones
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    row.map(from_row).transpose()
}

/// Determine whether a zone name already has a row.
pub async fn exists(db: &SqlitePool, zone: &str) -> sqlx::Result<bool> {
    let cnt: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM zones WHERE zone = ?")
        .bind(zone)
        .fetch_one(db)
        .await?;
    Ok(cnt.0 > 0)
}

/// Create a new zone row after provisioning completes successfully.
pub async fn insert(db: &SqlitePool, zone: &str, dns_servers: &[String]) -> sqlx::Result<i64> {
    let now = Utc::now();
    let servers_json =
        serde_json::to_string(dns_servers).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    let res = sqlx::query(
        r#"
        INSERT INTO zones (zone, dns_servers, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(zone)
    .bind(servers_json)
    .bind(now)
    .bind(now)
    .execute(db)
    .await?;

    Ok(res.last_insert_rowid())
}

/// Remove a zone row once the remote zone is gone.
pub async fn delete(db: &SqlitePool, id: i64) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM zones WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn insert_then_find_returns_the_row() {
        let db = test_pool().await;
        let servers = vec!["ns1.example.net".to_string(), "ns2.example.net".to_string()];

        let id = insert(&db, "example.com", &servers).await.unwrap();
        let zone = find(&db, id).await.unwrap().expect("row should exist");

        assert_eq!(zone.id, id);
        assert_eq!(zone.zone, "example.com");
        assert_eq!(zone.dns_servers, servers);
    }

    #[tokio::test]
    async fn find_returns_none_for_unknown_id() {
        let db = test_pool().await;
        assert!(find(&db, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn exists_reflects_inserted_names() {
        let db = test_pool().await;
        insert(&db, "taken.com", &[]).await.unwrap();

        assert!(exists(&db, "taken.com").await.unwrap());
        assert!(!exists(&db, "free.com").await.unwrap());
    }

    #[tokio::test]
    async fn list_returns_rows_in_insertion_order() {
        let db = test_pool().await;
        insert(&db, "a.com", &[]).await.unwrap();
        insert(&db, "b.com", &[]).await.unwrap();

        let zones = list(&db).await.unwrap();
        let names: Vec<_> = zones.iter().map(|z| z.zone.as_str()).collect();
        assert_eq!(names, ["a.com", "b.com"]);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let db = test_pool().await;
        let id = insert(&db, "gone.com", &[]).await.unwrap();

        delete(&db, id).await.unwrap();
        assert!(find(&db, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_zone_names_are_rejected_by_the_schema() {
        let db = test_pool().await;
        insert(&db, "dup.com", &[]).await.unwrap();

        assert!(insert(&db, "dup.com", &[]).await.is_err());
    }
}
