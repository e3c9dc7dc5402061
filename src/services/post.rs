//! Social feed and manual moderation.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::post::Post;

const POST_COLUMNS: &str = r#"
    p.id, p.author_id, u.display_name AS author_name, p.content, p.is_hidden, p.created_at
"#;

pub async fn create(pool: &PgPool, author_id: Uuid, content: &str) -> Result<Post, AppError> {
    let post = sqlx::query_as::<_, Post>(&format!(
        r#"
        WITH inserted AS (
            INSERT INTO posts (author_id, content) VALUES ($1, $2) RETURNING *
        )
        SELECT {POST_COLUMNS}
        FROM inserted p
        LEFT JOIN users u ON u.id = p.author_id
        "#
    ))
    .bind(author_id)
    .bind(content.trim())
    .fetch_one(pool)
    .await?;

    tracing::debug!(post_id = %post.id, author_id = %author_id, "Post created");
    Ok(post)
}

/// Page through posts, newest first. Hidden posts are only included when
/// `include_hidden` is set.
pub async fn list(
    pool: &PgPool,
    include_hidden: bool,
    pagination: &Pagination,
) -> Result<PagedResult<Post>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE $1 OR NOT is_hidden")
        .bind(include_hidden)
        .fetch_one(pool)
        .await?;

    let items = sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        LEFT JOIN users u ON u.id = p.author_id
        WHERE $1 OR NOT p.is_hidden
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(include_hidden)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Hide or restore a post.
pub async fn set_hidden(pool: &PgPool, id: Uuid, hidden: bool) -> Result<Post, AppError> {
    let post = sqlx::query_as::<_, Post>(&format!(
        r#"
        WITH updated AS (
            UPDATE posts SET is_hidden = $1 WHERE id = $2 RETURNING *
        )
        SELECT {POST_COLUMNS}
        FROM updated p
        LEFT JOIN users u ON u.id = p.author_id
        "#
    ))
    .bind(hidden)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    tracing::info!(post_id = %id, hidden, "Post visibility changed");
    Ok(post)
}
