//! School repository
//!
//! One SQL statement per operation:
//! - create: INSERT ... RETURNING id
//! - list_all: unfiltered SELECT
//! - update_partial: UPDATE over the supplied columns only
//! - delete: DELETE by id
//!
//! Update and delete report the affected-row count. Zero means the id did
//! not exist, which is not an error at this layer.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{NewSchool, School, SchoolId, SchoolPatch};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("update for school {0} names no columns")]
    EmptyUpdate(SchoolId),
}

/// Typed storage operations over the schools table
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Insert a school and return the id storage assigned to it.
    async fn create(&self, school: NewSchool) -> Result<SchoolId, DbError>;

    /// Every row, unfiltered and unpaginated.
    async fn list_all(&self) -> Result<Vec<School>, DbError>;

    /// Write only the columns set in `patch`. Returns affected rows.
    async fn update_partial(&self, id: SchoolId, patch: &SchoolPatch) -> Result<u64, DbError>;

    /// Remove the row with `id`. Returns affected rows.
    async fn delete(&self, id: SchoolId) -> Result<u64, DbError>;
}

/// PostgreSQL-backed school repository
#[derive(Clone)]
pub struct SchoolRepo {
    pool: PgPool,
}

impl SchoolRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build `UPDATE schools SET <supplied columns> WHERE id = $n`.
///
/// Column names come from a fixed list, never from request keys.
fn update_statement(id: SchoolId, patch: &SchoolPatch) -> Option<QueryBuilder<'_, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut qb = QueryBuilder::new("UPDATE schools SET ");
    let mut set = qb.separated(", ");
    if let Some(name) = &patch.name {
        set.push("name = ").push_bind_unseparated(name.as_str());
    }
    if let Some(address) = &patch.address {
        set.push("address = ").push_bind_unseparated(address.as_str());
    }
    if let Some(latitude) = patch.latitude {
        set.push("latitude = ").push_bind_unseparated(latitude);
    }
    if let Some(longitude) = patch.longitude {
        set.push("longitude = ").push_bind_unseparated(longitude);
    }
    qb.push(" WHERE id = ").push_bind(id.0);

    Some(qb)
}

#[async_trait]
impl SchoolStore for SchoolRepo {
    async fn create(&self, school: NewSchool) -> Result<SchoolId, DbError> {
        let mut conn = self.pool.acquire().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO schools (name, address, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(school.latitude)
        .bind(school.longitude)
        .fetch_one(&mut *conn)
        .await?;

        Ok(SchoolId(id))
    }

    async fn list_all(&self) -> Result<Vec<School>, DbError> {
        let mut conn = self.pool.acquire().await?;

        // ORDER BY id gives the proximity sort a stable tie order
        let rows = sqlx::query_as::<_, School>(
            "SELECT id, name, address, latitude, longitude FROM schools ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }

    async fn update_partial(&self, id: SchoolId, patch: &SchoolPatch) -> Result<u64, DbError> {
        let mut qb = update_statement(id, patch).ok_or(DbError::EmptyUpdate(id))?;
        let mut conn = self.pool.acquire().await?;

        let result = qb.build().execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: SchoolId) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id.0)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_statement_covers_only_supplied_columns() {
        let patch = SchoolPatch {
            name: Some("Beta".into()),
            longitude: Some(3.5),
            ..Default::default()
        };
        let qb = update_statement(SchoolId(9), &patch).unwrap();
        assert_eq!(
            qb.sql(),
            "UPDATE schools SET name = $1, longitude = $2 WHERE id = $3"
        );
    }

    #[test]
    fn update_statement_all_columns() {
        let patch = SchoolPatch {
            name: Some("Beta".into()),
            address: Some("2 High St".into()),
            latitude: Some(1.0),
            longitude: Some(2.0),
        };
        let qb = update_statement(SchoolId(1), &patch).unwrap();
        assert_eq!(
            qb.sql(),
            "UPDATE schools SET name = $1, address = $2, latitude = $3, longitude = $4 WHERE id = $5"
        );
    }

    #[test]
    fn empty_patch_builds_nothing() {
        assert!(update_statement(SchoolId(1), &SchoolPatch::default()).is_none());
    }

    // Integration tests - run with DB_URL set
    // cargo test -p schoolhub-server -- --ignored

    async fn repo() -> SchoolRepo {
        let config = crate::config::DbConfig::from_env().expect("DB_URL required");
        let pool = crate::db::create_pool(&config).await.expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");
        SchoolRepo::new(pool)
    }

    fn alpha() -> NewSchool {
        NewSchool {
            name: "Alpha".into(),
            address: "1 Main St".into(),
            latitude: 10.0,
            longitude: 20.0,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_list_contains_record_once() {
        let repo = repo().await;
        let id = repo.create(alpha()).await.unwrap();

        let rows = repo.list_all().await.unwrap();
        assert_eq!(rows.iter().filter(|s| s.id == id.0).count(), 1);

        repo.delete(id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn partial_update_keeps_omitted_columns() {
        let repo = repo().await;
        let id = repo.create(alpha()).await.unwrap();

        let patch = SchoolPatch {
            name: Some("Beta".into()),
            ..Default::default()
        };
        assert_eq!(repo.update_partial(id, &patch).await.unwrap(), 1);

        let row = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.id == id.0)
            .unwrap();
        assert_eq!(row.name, "Beta");
        assert_eq!(row.address, "1 Main St");
        assert_eq!(row.latitude, 10.0);

        repo.delete(id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_id_affects_no_rows() {
        let repo = repo().await;
        let missing = SchoolId(i32::MAX);
        let patch = SchoolPatch {
            name: Some("X".into()),
            ..Default::default()
        };

        assert_eq!(repo.update_partial(missing, &patch).await.unwrap(), 0);
        assert_eq!(repo.delete(missing).await.unwrap(), 0);
    }
}
