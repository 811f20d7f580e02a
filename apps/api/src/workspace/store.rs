//! Postgres persistence for workspaces and their profiles.
//!
//! Profiles keep discovery order through `position`; `(workspace_id, link)`
//! is the primary key, so appending a link a workspace already has is a no-op.

use anyhow::Result;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::workspace::models::{NewWorkspace, Profile, Workspace, WorkspaceRow, WorkspaceSummary};

/// Inserts a workspace together with its initial profiles.
pub async fn create_workspace(
    pool: &PgPool,
    new: &NewWorkspace,
    profiles: &[Profile],
) -> Result<Workspace> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, WorkspaceRow>(
        r#"
        INSERT INTO workspaces (title, job_description, candidate_count, query_count, template)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&new.title)
    .bind(&new.job_description)
    .bind(new.candidate_count)
    .bind(new.query_count)
    .bind(&new.template)
    .fetch_one(&mut *tx)
    .await?;

    insert_profiles(&mut tx, row.id, profiles).await?;
    tx.commit().await?;

    info!(
        "Created workspace {} \"{}\" with {} profiles",
        row.id,
        row.title,
        profiles.len()
    );

    let profiles = list_profiles(pool, row.id).await?;
    Ok(Workspace { row, profiles })
}

/// Appends profiles after the workspace's existing ones. Returns how many were new.
pub async fn append_profiles(pool: &PgPool, workspace_id: i64, profiles: &[Profile]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let inserted = insert_profiles(&mut tx, workspace_id, profiles).await?;
    tx.commit().await?;

    info!("Added {inserted} new profiles to workspace {workspace_id}");
    Ok(inserted)
}

async fn insert_profiles(
    tx: &mut Transaction<'_, Postgres>,
    workspace_id: i64,
    profiles: &[Profile],
) -> Result<u64> {
    // Serializes concurrent appends to one workspace until commit.
    sqlx::query("SELECT id FROM workspaces WHERE id = $1 FOR UPDATE")
        .bind(workspace_id)
        .execute(&mut **tx)
        .await?;

    let next_position: i32 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM profiles WHERE workspace_id = $1",
    )
    .bind(workspace_id)
    .fetch_one(&mut **tx)
    .await?;

    let mut inserted = 0;
    for (offset, profile) in profiles.iter().enumerate() {
        let result = sqlx::query(
            r#"
            INSERT INTO profiles
                (workspace_id, link, position, page_title, name, job_title, checked)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (workspace_id, link) DO NOTHING
            "#,
        )
        .bind(workspace_id)
        .bind(&profile.link)
        .bind(next_position + offset as i32)
        .bind(&profile.page_title)
        .bind(&profile.name)
        .bind(&profile.job_title)
        .bind(profile.checked)
        .execute(&mut **tx)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

pub async fn get_workspace(pool: &PgPool, workspace_id: i64) -> Result<Option<Workspace>> {
    let row = sqlx::query_as::<_, WorkspaceRow>("SELECT * FROM workspaces WHERE id = $1")
        .bind(workspace_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let profiles = list_profiles(pool, row.id).await?;
            Ok(Some(Workspace { row, profiles }))
        }
        None => Ok(None),
    }
}

pub async fn list_profiles(pool: &PgPool, workspace_id: i64) -> Result<Vec<Profile>> {
    Ok(sqlx::query_as::<_, Profile>(
        r#"
        SELECT page_title, link, name, job_title, checked
        FROM profiles
        WHERE workspace_id = $1
        ORDER BY position ASC
        "#,
    )
    .bind(workspace_id)
    .fetch_all(pool)
    .await?)
}

pub async fn list_workspaces(pool: &PgPool) -> Result<Vec<WorkspaceSummary>> {
    Ok(sqlx::query_as::<_, WorkspaceSummary>(
        r#"
        SELECT w.id, w.title, w.candidate_count, w.query_count, w.created_at,
               COUNT(p.link) AS profile_count,
               COUNT(p.link) FILTER (WHERE p.checked) AS checked_count
        FROM workspaces w
        LEFT JOIN profiles p ON p.workspace_id = w.id
        GROUP BY w.id
        ORDER BY w.id ASC
        "#,
    )
    .fetch_all(pool)
    .await?)
}

/// Returns `false` when no such workspace exists.
pub async fn delete_workspace(pool: &PgPool, workspace_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
        .bind(workspace_id)
        .execute(pool)
        .await?;
    if result.rows_affected() > 0 {
        info!("Deleted workspace {workspace_id}");
    }
    Ok(result.rows_affected() > 0)
}

/// Returns `false` when no such workspace exists.
pub async fn update_template(pool: &PgPool, workspace_id: i64, template: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE workspaces SET template = $1 WHERE id = $2")
        .bind(template)
        .bind(workspace_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Sets the contacted flag. Returns the updated profile, or `None` if the
/// workspace has no profile with that link.
pub async fn set_profile_checked(
    pool: &PgPool,
    workspace_id: i64,
    link: &str,
    checked: bool,
) -> Result<Option<Profile>> {
    Ok(sqlx::query_as::<_, Profile>(
        r#"
        UPDATE profiles SET checked = $1
        WHERE workspace_id = $2 AND link = $3
        RETURNING page_title, link, name, job_title, checked
        "#,
    )
    .bind(checked)
    .bind(workspace_id)
    .bind(link)
    .fetch_optional(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    fn profile(link: &str) -> Profile {
        Profile {
            page_title: format!("{link} - Dev | LinkedIn"),
            link: link.to_string(),
            name: link.to_string(),
            job_title: "Dev".to_string(),
            checked: false,
        }
    }

    /// Runs only when `TEST_DATABASE_URL` points at a scratch Postgres.
    async fn test_pool() -> Option<PgPool> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        Some(create_pool(&url).await.expect("test database"))
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_positions_unique() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let new = NewWorkspace::with_defaults("Concurrent", "Rust engineer", None, None);
        let workspace = create_workspace(&pool, &new, &[profile("https://x/in/seed")])
            .await
            .unwrap();
        let id = workspace.row.id;

        let first: Vec<Profile> = (0..20).map(|i| profile(&format!("https://x/in/a{i}"))).collect();
        let second: Vec<Profile> = (0..20).map(|i| profile(&format!("https://x/in/b{i}"))).collect();
        let (a, b) = tokio::join!(
            append_profiles(&pool, id, &first),
            append_profiles(&pool, id, &second)
        );
        assert_eq!(a.unwrap() + b.unwrap(), 40);

        let (rows, distinct): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(DISTINCT position) FROM profiles WHERE workspace_id = $1",
        )
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(rows, 41);
        assert_eq!(distinct, 41);

        // Each batch stays contiguous and in discovery order.
        let links: Vec<String> = list_profiles(&pool, id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.link)
            .collect();
        let a_links: Vec<&String> = links.iter().filter(|l| l.contains("/a")).collect();
        let expected: Vec<String> = first.iter().map(|p| p.link.clone()).collect();
        assert_eq!(a_links, expected.iter().collect::<Vec<_>>());

        delete_workspace(&pool, id).await.unwrap();
    }
}
