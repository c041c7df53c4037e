use sqlx::{Error as SqlxError, Postgres, Transaction};
use tracing::{info, instrument};

use crate::database::connection::DbConnection;

impl DbConnection {
    /// Creates missing types and tables. Safe to run against an initialized database.
    pub async fn init_schema(&self) -> Result<(), SqlxError> {
        let mut transaction = self.pool().begin().await?;
        create_all_types(&mut transaction).await?;
        create_all_tables(&mut transaction).await?;
        transaction.commit().await?;
        info!("database schema is ready");
        Ok(())
    }

    pub async fn drop_schema(&self) -> Result<(), SqlxError> {
        let mut transaction = self.pool().begin().await?;
        drop_all_tables(&mut transaction).await?;
        drop_all_types(&mut transaction).await?;
        transaction.commit().await?;
        Ok(())
    }
}

#[instrument(skip_all)]
pub async fn create_all_types(
    transaction: &mut Transaction<'_, Postgres>,
) -> Result<(), SqlxError> {
    sqlx::query(
        "
            DO $$ BEGIN
                CREATE TYPE resource_status AS ENUM ('pending', 'published', 'rejected');
            EXCEPTION
                WHEN duplicate_object THEN NULL;
            END $$;
        ",
    )
    .execute(transaction.as_mut())
    .await?;
    Ok(())
}

#[instrument(skip_all)]
pub async fn drop_all_types(transaction: &mut Transaction<'_, Postgres>) -> Result<(), SqlxError> {
    sqlx::query("DROP TYPE IF EXISTS resource_status;")
        .execute(transaction.as_mut())
        .await?;
    Ok(())
}

#[instrument(skip_all)]
pub async fn create_all_tables(
    transaction: &mut Transaction<'_, Postgres>,
) -> Result<(), SqlxError> {
    let statements = [
        "
            CREATE TABLE IF NOT EXISTS users (
                id                    int PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
                name                  VARCHAR(100) NOT NULL,
                email                 VARCHAR(255) NOT NULL UNIQUE,
                phone_number          VARCHAR(30) NOT NULL,
                password_hash         TEXT NOT NULL,
                profile_picture_url   TEXT NOT NULL,
                username              VARCHAR(50) NOT NULL UNIQUE,
                joined_at             TIMESTAMP WITH TIME ZONE NOT NULL
            );
        ",
        "
            CREATE TABLE IF NOT EXISTS social_links (
                id          bigint PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
                user_id     int NOT NULL REFERENCES users(id) ON UPDATE CASCADE ON DELETE CASCADE,
                name        VARCHAR(50) NOT NULL,
                icon_url    TEXT NOT NULL,
                url         TEXT NOT NULL
            );
        ",
        "
            CREATE TABLE IF NOT EXISTS resources (
                id               bigint PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
                name             VARCHAR(255) NOT NULL,
                title            VARCHAR(255) NOT NULL,
                description      TEXT NOT NULL,
                tags             TEXT NOT NULL,
                views            bigint NOT NULL DEFAULT 0 CHECK (views >= 0),
                likes            bigint NOT NULL DEFAULT 0,
                download_count   bigint NOT NULL DEFAULT 0,
                status           resource_status NOT NULL DEFAULT 'pending',
                department       VARCHAR(100) NOT NULL,
                user_id          int NOT NULL REFERENCES users(id),
                category         VARCHAR(100) NOT NULL,
                filepath         TEXT NOT NULL,
                created_at       TIMESTAMP WITH TIME ZONE NOT NULL
            );
        ",
        "CREATE INDEX IF NOT EXISTS resources_user_id_idx ON resources (user_id);",
        "CREATE INDEX IF NOT EXISTS resources_department_idx ON resources (department);",
        "
            CREATE TABLE IF NOT EXISTS comments (
                id            bigint PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
                user_id       int NOT NULL REFERENCES users(id),
                resource_id   bigint NOT NULL REFERENCES resources(id) ON DELETE CASCADE,
                content       TEXT NOT NULL,
                likes         bigint NOT NULL DEFAULT 0,
                dislikes      bigint NOT NULL DEFAULT 0,
                created_at    TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT current_timestamp
            );
        ",
        "
            CREATE TABLE IF NOT EXISTS photos (
                id            bigint PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
                url           TEXT NOT NULL,
                alt           TEXT NOT NULL,
                resource_id   bigint NOT NULL REFERENCES resources(id) ON DELETE CASCADE
            );
        ",
    ];
    for statement in &statements {
        sqlx::query(statement).execute(transaction.as_mut()).await?;
    }
    Ok(())
}

#[instrument(skip_all)]
pub async fn drop_all_tables(transaction: &mut Transaction<'_, Postgres>) -> Result<(), SqlxError> {
    let statements = [
        "DROP TABLE IF EXISTS photos;",
        "DROP TABLE IF EXISTS comments;",
        "DROP TABLE IF EXISTS resources;",
        "DROP TABLE IF EXISTS social_links;",
        "DROP TABLE IF EXISTS users;",
    ];
    for statement in &statements {
        sqlx::query(statement).execute(transaction.as_mut()).await?;
    }
    Ok(())
}
