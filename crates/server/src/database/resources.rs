use sqlx::{Error as SqlxError, PgExecutor, Postgres, QueryBuilder, Transaction};
use tracing::{info, instrument};

use crate::models::resource::{
    Comment, NewResource, Photo, Resource, ResourceDetails, ResourceFilter, ResourceId,
    ResourceStatus,
};

const RESOURCE_COLUMNS: &str = "id, name, title, description, tags, views, likes, download_count, \
     status, department, user_id, category, filepath, created_at";

#[instrument(skip_all)]
pub async fn insert_resource<'a, E: PgExecutor<'a>>(
    executor: E,
    resource: &NewResource,
) -> Result<Resource, SqlxError> {
    let created: Resource = sqlx::query_as(
        "
            INSERT INTO resources (name, title, description, tags, views, likes, download_count,
                                   status, department, user_id, category, filepath, created_at)
            VALUES ($1, $2, $3, $4, 0, 0, 0, $5, $6, $7, $8, $9, current_timestamp)
            RETURNING id, name, title, description, tags, views, likes, download_count,
                      status, department, user_id, category, filepath, created_at;
        ",
    )
    .bind(&resource.name)
    .bind(&resource.title)
    .bind(&resource.description)
    .bind(&resource.tags)
    .bind(ResourceStatus::Pending)
    .bind(&resource.department)
    .bind(resource.user_id)
    .bind(&resource.category)
    .bind(&resource.filepath)
    .fetch_one(executor)
    .await?;
    info!("created resource with id: {}", created.id);
    Ok(created)
}

/// Plain lookup that leaves the view counter alone.
#[instrument(skip(executor))]
pub async fn select_resource_by_id<'a, E: PgExecutor<'a>>(
    executor: E,
    id: ResourceId,
) -> Result<Option<Resource>, SqlxError> {
    let sql = format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1;");
    sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Bumps the view counter of one resource and returns the updated row.
#[instrument(skip(executor))]
pub async fn increment_views_by_id<'a, E: PgExecutor<'a>>(
    executor: E,
    id: ResourceId,
) -> Result<Option<Resource>, SqlxError> {
    sqlx::query_as(
        "
            UPDATE resources
            SET views = views + 1
            WHERE id = $1
            RETURNING id, name, title, description, tags, views, likes, download_count,
                      status, department, user_id, category, filepath, created_at;
        ",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Escapes LIKE metacharacters so the query matches as a plain substring.
pub fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ResourceFilter) {
    match filter {
        ResourceFilter::ByUser(user_id) => {
            builder.push("user_id = ").push_bind(*user_id);
        }
        ResourceFilter::ByDepartment(department) => {
            builder.push("department = ").push_bind(department.clone());
        }
        ResourceFilter::Search(query) => {
            let pattern = like_pattern(query);
            builder
                .push("(title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR tags ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

/// Bumps the view counter of every resource matching `filter` in one statement.
#[instrument(skip(executor))]
pub async fn increment_views_where<'a, E: PgExecutor<'a>>(
    executor: E,
    filter: &ResourceFilter,
) -> Result<Vec<Resource>, SqlxError> {
    let mut builder = QueryBuilder::new("UPDATE resources SET views = views + 1 WHERE ");
    push_filter(&mut builder, filter);
    builder.push(" RETURNING ").push(RESOURCE_COLUMNS);
    let mut resources: Vec<Resource> = builder.build_query_as().fetch_all(executor).await?;
    resources.sort_by_key(|resource| resource.id);
    Ok(resources)
}

#[instrument(skip(executor))]
pub async fn select_comments<'a, E: PgExecutor<'a>>(
    executor: E,
    resource_ids: &[ResourceId],
) -> Result<Vec<Comment>, SqlxError> {
    sqlx::query_as(
        "
            SELECT id, user_id, resource_id, content, likes, dislikes, created_at
            FROM comments
            WHERE resource_id = ANY($1)
            ORDER BY id;
        ",
    )
    .bind(resource_ids)
    .fetch_all(executor)
    .await
}

#[instrument(skip(executor))]
pub async fn select_photos<'a, E: PgExecutor<'a>>(
    executor: E,
    resource_ids: &[ResourceId],
) -> Result<Vec<Photo>, SqlxError> {
    sqlx::query_as(
        "
            SELECT id, url, alt, resource_id
            FROM photos
            WHERE resource_id = ANY($1)
            ORDER BY id;
        ",
    )
    .bind(resource_ids)
    .fetch_all(executor)
    .await
}

/// Loads comments and photos for `resources`, keeping their order.
pub async fn with_details(
    transaction: &mut Transaction<'_, Postgres>,
    resources: Vec<Resource>,
) -> Result<Vec<ResourceDetails>, SqlxError> {
    if resources.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<ResourceId> = resources.iter().map(|resource| resource.id).collect();
    let comments = select_comments(transaction.as_mut(), &ids).await?;
    let photos = select_photos(transaction.as_mut(), &ids).await?;
    Ok(resources
        .into_iter()
        .map(|resource| ResourceDetails {
            comments: comments
                .iter()
                .filter(|comment| comment.resource_id == resource.id)
                .cloned()
                .collect(),
            photos: photos
                .iter()
                .filter(|photo| photo.resource_id == resource.id)
                .cloned()
                .collect(),
            resource,
        })
        .collect())
}

#[instrument(skip(executor))]
pub async fn delete_resource<'a, E: PgExecutor<'a>>(
    executor: E,
    id: ResourceId,
) -> Result<Option<Resource>, SqlxError> {
    sqlx::query_as(
        "
            DELETE FROM resources
            WHERE id = $1
            RETURNING id, name, title, description, tags, views, likes, download_count,
                      status, department, user_id, category, filepath, created_at;
        ",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_query() {
        assert_eq!(like_pattern("bio"), "%bio%");
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\x"), "%c:\\\\x%");
    }

    #[test]
    fn search_filter_builds_or_predicate() {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE resources SET views = views + 1 WHERE ");
        push_filter(&mut builder, &ResourceFilter::Search("bio".to_string()));
        assert_eq!(
            builder.sql(),
            "UPDATE resources SET views = views + 1 WHERE \
             (title ILIKE $1 OR description ILIKE $2 OR tags ILIKE $3)"
        );
    }

    #[test]
    fn department_filter_binds_single_parameter() {
        let mut builder = QueryBuilder::<Postgres>::new("");
        push_filter(&mut builder, &ResourceFilter::ByDepartment("science".to_string()));
        assert_eq!(builder.sql(), "department = $1");
    }
}
