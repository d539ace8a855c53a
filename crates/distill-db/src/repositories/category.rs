use sqlx::{Executor, Postgres};

use crate::models::CategoryRow;

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<CategoryRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT category_id, title, description, icon, color
            FROM categories
            ORDER BY created_at, category_id
        "#,
    )
    .fetch_all(executor)
    .await
}
