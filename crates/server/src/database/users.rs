use sqlx::{Error as SqlxError, PgExecutor, PgPool, Postgres, Transaction};
use tracing::{info, instrument};

use crate::models::user::{NewSocialLink, SocialLink, User, UserFields, UserId};

#[instrument(skip_all)]
pub async fn email_exists<'a, E: PgExecutor<'a>>(
    executor: E,
    email: &str,
) -> Result<bool, SqlxError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1);")
        .bind(email)
        .fetch_one(executor)
        .await
}

#[instrument(skip_all)]
pub async fn insert_user(
    transaction: &mut Transaction<'_, Postgres>,
    user: &UserFields,
) -> Result<User, SqlxError> {
    let mut created: User = sqlx::query_as(
        "
            INSERT INTO users (name, email, phone_number, password_hash, profile_picture_url, username, joined_at)
            VALUES ($1, $2, $3, $4, $5, $6, current_timestamp)
            RETURNING id, name, email, phone_number, password_hash, profile_picture_url, username, joined_at;
        ",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.phone_number)
    .bind(&user.password_hash)
    .bind(&user.profile_picture_url)
    .bind(&user.username)
    .fetch_one(transaction.as_mut())
    .await?;
    created.social_links = insert_social_links(transaction, created.id, &user.social_links).await?;
    info!("created user with id: {}", created.id);
    Ok(created)
}

#[instrument(skip(transaction, links))]
pub async fn insert_social_links(
    transaction: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    links: &[NewSocialLink],
) -> Result<Vec<SocialLink>, SqlxError> {
    let mut created = Vec::with_capacity(links.len());
    for link in links {
        let row: SocialLink = sqlx::query_as(
            "
                INSERT INTO social_links (user_id, name, icon_url, url)
                VALUES ($1, $2, $3, $4)
                RETURNING id, user_id, name, icon_url, url;
            ",
        )
        .bind(user_id)
        .bind(&link.name)
        .bind(&link.icon_url)
        .bind(&link.url)
        .fetch_one(transaction.as_mut())
        .await?;
        created.push(row);
    }
    Ok(created)
}

#[instrument(skip(executor))]
pub async fn delete_social_links<'a, E: PgExecutor<'a>>(
    executor: E,
    user_id: UserId,
) -> Result<u64, SqlxError> {
    let result = sqlx::query("DELETE FROM social_links WHERE user_id = $1;")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

#[instrument(skip(executor))]
pub async fn select_social_links<'a, E: PgExecutor<'a>>(
    executor: E,
    user_id: UserId,
) -> Result<Vec<SocialLink>, SqlxError> {
    sqlx::query_as(
        "
            SELECT id, user_id, name, icon_url, url
            FROM social_links
            WHERE user_id = $1
            ORDER BY id;
        ",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

async fn with_social_links(pool: &PgPool, user: Option<User>) -> Result<Option<User>, SqlxError> {
    let Some(mut user) = user else {
        return Ok(None);
    };
    user.social_links = select_social_links(pool, user.id).await?;
    Ok(Some(user))
}

#[instrument(skip(pool))]
pub async fn select_user_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, SqlxError> {
    let user = sqlx::query_as(
        "
            SELECT id, name, email, phone_number, password_hash, profile_picture_url, username, joined_at
            FROM users
            WHERE id = $1;
        ",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    with_social_links(pool, user).await
}

#[instrument(skip_all)]
pub async fn select_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, SqlxError> {
    let user = sqlx::query_as(
        "
            SELECT id, name, email, phone_number, password_hash, profile_picture_url, username, joined_at
            FROM users
            WHERE email = $1;
        ",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    with_social_links(pool, user).await
}

#[instrument(skip(pool))]
pub async fn select_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, SqlxError> {
    let user = sqlx::query_as(
        "
            SELECT id, name, email, phone_number, password_hash, profile_picture_url, username, joined_at
            FROM users
            WHERE username = $1;
        ",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    with_social_links(pool, user).await
}

/// Full replace of the profile, social links included.
#[instrument(skip(transaction, user))]
pub async fn update_user(
    transaction: &mut Transaction<'_, Postgres>,
    id: UserId,
    user: &UserFields,
) -> Result<Option<User>, SqlxError> {
    let updated: Option<User> = sqlx::query_as(
        "
            UPDATE users
            SET name = $2, email = $3, phone_number = $4, password_hash = $5,
                profile_picture_url = $6, username = $7
            WHERE id = $1
            RETURNING id, name, email, phone_number, password_hash, profile_picture_url, username, joined_at;
        ",
    )
    .bind(id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.phone_number)
    .bind(&user.password_hash)
    .bind(&user.profile_picture_url)
    .bind(&user.username)
    .fetch_optional(transaction.as_mut())
    .await?;
    let Some(mut updated) = updated else {
        return Ok(None);
    };
    delete_social_links(transaction.as_mut(), id).await?;
    updated.social_links = insert_social_links(transaction, id, &user.social_links).await?;
    info!("updated profile of user {id}");
    Ok(Some(updated))
}

#[instrument(skip(pool))]
pub async fn update_profile_picture(
    pool: &PgPool,
    id: UserId,
    url: &str,
) -> Result<Option<User>, SqlxError> {
    let user = sqlx::query_as(
        "
            UPDATE users
            SET profile_picture_url = $2
            WHERE id = $1
            RETURNING id, name, email, phone_number, password_hash, profile_picture_url, username, joined_at;
        ",
    )
    .bind(id)
    .bind(url)
    .fetch_optional(pool)
    .await?;
    with_social_links(pool, user).await
}

#[instrument(skip(transaction, links))]
pub async fn replace_social_links(
    transaction: &mut Transaction<'_, Postgres>,
    id: UserId,
    links: &[NewSocialLink],
) -> Result<Option<User>, SqlxError> {
    let user: Option<User> = sqlx::query_as(
        "
            SELECT id, name, email, phone_number, password_hash, profile_picture_url, username, joined_at
            FROM users
            WHERE id = $1
            FOR UPDATE;
        ",
    )
    .bind(id)
    .fetch_optional(transaction.as_mut())
    .await?;
    let Some(mut user) = user else {
        return Ok(None);
    };
    let removed = delete_social_links(transaction.as_mut(), id).await?;
    user.social_links = insert_social_links(transaction, id, links).await?;
    info!(
        "replaced {removed} social link(s) of user {id} with {}",
        user.social_links.len()
    );
    Ok(Some(user))
}
