use chrono::Utc;
use lessonsync_core::errors::StudioResult;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbMember;
use crate::repositories::sql_err;

pub async fn create_member(
    pool: &Pool<Postgres>,
    full_name: &str,
    email: &str,
) -> StudioResult<DbMember> {
    let member = sqlx::query_as::<_, DbMember>(
        r#"
        INSERT INTO members (id, full_name, email, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, full_name, email, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(full_name)
    .bind(email)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(sql_err)?;

    Ok(member)
}

pub async fn get_member_by_id(pool: &Pool<Postgres>, id: Uuid) -> StudioResult<Option<DbMember>> {
    let member = sqlx::query_as::<_, DbMember>(
        r#"
        SELECT id, full_name, email, created_at
        FROM members
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(sql_err)?;

    Ok(member)
}
