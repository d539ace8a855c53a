use sqlx::{Executor, Postgres};

use crate::models::TopicRow;

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<TopicRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                topic_id,
                category_id,
                title,
                description,
                tags,
                difficulty,
                read_time,
                content,
                updated_at
            FROM topics
            ORDER BY created_at, topic_id
        "#,
    )
    .fetch_all(executor)
    .await
}
