//! PostgreSQL-backed content store.

use std::time::Instant;

use async_trait::async_trait;
use distill_db::{
    models::{CategoryRow, SectionRow, TopicRow},
    repositories,
};
use distill_search::{
    CategoryRecord, ContentStore, SectionRecord, StoreError, TopicRecord,
};
use sqlx::PgPool;

use crate::metrics::record_db_query;

/// [`ContentStore`] over the `distill-db` repositories
#[derive(Clone, Debug)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Time a repository call and translate its error for the search layer
async fn timed<T, F>(query_name: &'static str, query: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let start = Instant::now();
    let result = query.await;
    record_db_query(query_name, start.elapsed().as_secs_f64(), result.is_ok());

    result.map_err(|e| match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Query(format!("{query_name}: {other}")),
    })
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn get_all_topics(&self) -> Result<Vec<TopicRecord>, StoreError> {
        let rows = timed("list_topics", repositories::topic::list_all(&self.pool)).await?;
        Ok(rows.into_iter().map(topic_record).collect())
    }

    async fn get_all_categories(&self) -> Result<Vec<CategoryRecord>, StoreError> {
        let rows = timed("list_categories", repositories::category::list_all(&self.pool)).await?;
        Ok(rows.into_iter().map(category_record).collect())
    }

    async fn get_all_sections(&self) -> Result<Vec<SectionRecord>, StoreError> {
        let rows = timed("list_sections", repositories::section::list_all(&self.pool)).await?;
        Ok(rows.into_iter().map(section_record).collect())
    }
}

fn topic_record(row: TopicRow) -> TopicRecord {
    TopicRecord {
        topic_id: row.topic_id,
        title: row.title,
        description: row.description,
        tags: row.tags,
        difficulty: row.difficulty,
        read_time: row.read_time,
        updated_at: row.updated_at.map(|t| t.to_rfc3339()),
        category_id: row.category_id,
        content: row.content.0,
    }
}

fn category_record(row: CategoryRow) -> CategoryRecord {
    CategoryRecord {
        category_id: row.category_id,
        title: row.title,
        description: row.description,
        icon: row.icon,
        color: row.color,
    }
}

fn section_record(row: SectionRow) -> SectionRecord {
    SectionRecord {
        section_id: row.section_id,
        title: row.title,
        description: row.description,
        position: row.position,
    }
}
