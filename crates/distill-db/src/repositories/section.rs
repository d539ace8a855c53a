use sqlx::{Executor, Postgres};

use crate::models::SectionRow;

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<SectionRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT section_id, title, description, position
            FROM sections
            ORDER BY position, section_id
        "#,
    )
    .fetch_all(executor)
    .await
}
