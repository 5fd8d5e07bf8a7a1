//! In-process school store
//!
//! Mirrors the PostgreSQL repository's observable behavior: ids start at 1
//! and are never reused, rows list in id order, and update/delete report
//! affected-row counts.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::schools::{DbError, SchoolStore};
use crate::models::{NewSchool, School, SchoolId, SchoolPatch};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<School>,
    last_id: i32,
}

/// School store held entirely in memory
#[derive(Debug, Default)]
pub struct MemorySchoolStore {
    table: RwLock<Table>,
}

impl MemorySchoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SchoolStore for MemorySchoolStore {
    async fn create(&self, school: NewSchool) -> Result<SchoolId, DbError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(School {
            id,
            name: school.name,
            address: school.address,
            latitude: school.latitude,
            longitude: school.longitude,
        });
        Ok(SchoolId(id))
    }

    async fn list_all(&self) -> Result<Vec<School>, DbError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn update_partial(&self, id: SchoolId, patch: &SchoolPatch) -> Result<u64, DbError> {
        if patch.is_empty() {
            return Err(DbError::EmptyUpdate(id));
        }

        let mut table = self.table.write().await;
        match table.rows.iter_mut().find(|s| s.id == id.0) {
            Some(row) => {
                patch.apply_to(row);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: SchoolId) -> Result<u64, DbError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|s| s.id != id.0);
        Ok((before - table.rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(name: &str) -> NewSchool {
        NewSchool {
            name: name.into(),
            address: "1 Main St".into(),
            latitude: 10.0,
            longitude: 20.0,
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let store = MemorySchoolStore::new();
        let a = store.create(school("Alpha")).await.unwrap();
        store.delete(a).await.unwrap();
        let b = store.create(school("Beta")).await.unwrap();

        assert_eq!(a, SchoolId(1));
        assert_eq!(b, SchoolId(2));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn missing_id_reports_zero_rows() {
        let store = MemorySchoolStore::new();
        let patch = SchoolPatch {
            name: Some("X".into()),
            ..Default::default()
        };

        assert_eq!(store.update_partial(SchoolId(999), &patch).await.unwrap(), 0);
        assert_eq!(store.delete(SchoolId(999)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_patch_is_refused() {
        let store = MemorySchoolStore::new();
        let id = store.create(school("Alpha")).await.unwrap();
        let err = store
            .update_partial(id, &SchoolPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::EmptyUpdate(_)));
    }
}
