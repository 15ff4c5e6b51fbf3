use chrono::Utc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Admin;
use crate::state::AppState;
use crate::store::file;

pub async fn find_by_email(state: &AppState, email: &str) -> AppResult<Option<Admin>> {
    if let Some(pool) = &state.db {
        match sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = $1")
            .bind(email.to_string())
            .fetch_optional(pool)
            .await
        {
            Ok(found) => return Ok(found),
            Err(err) => {
                tracing::warn!(error = %err, "admin read from database failed, falling back to file storage");
            }
        }
    }
    let items: Vec<Admin> = state.files.load(file::ADMINS).await?;
    Ok(items
        .into_iter()
        .find(|a| a.email.eq_ignore_ascii_case(email)))
}

pub async fn upsert(state: &AppState, admin: &Admin) -> AppResult<()> {
    let mut db_ok = false;
    if let Some(pool) = &state.db {
        let result = sqlx::query(
            r#"
            INSERT INTO admins (id, username, email, password_hash, role, is_active,
                                last_login, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (email) DO UPDATE
            SET username = EXCLUDED.username,
                password_hash = EXCLUDED.password_hash,
                role = EXCLUDED.role,
                is_active = EXCLUDED.is_active,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(admin.id)
        .bind(admin.username.clone())
        .bind(admin.email.clone())
        .bind(admin.password_hash.clone())
        .bind(admin.role)
        .bind(admin.is_active)
        .bind(admin.last_login)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(pool)
        .await;
        match result {
            Ok(_) => db_ok = true,
            Err(err) => {
                tracing::warn!(error = %err, "admin upsert in database failed, falling back to file storage");
            }
        }
    }

    let mut items: Vec<Admin> = state.files.load(file::ADMINS).await?;
    items.retain(|a| !a.email.eq_ignore_ascii_case(&admin.email));
    items.push(admin.clone());
    match state.files.save(file::ADMINS, &items).await {
        Ok(()) => Ok(()),
        Err(err) if db_ok => {
            tracing::warn!(error = %err, "file mirror of admins failed");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Best effort: a failed last-login stamp never blocks a login.
pub async fn touch_last_login(state: &AppState, id: Uuid) {
    let now = Utc::now();
    if let Some(pool) = &state.db {
        if let Err(err) = sqlx::query("UPDATE admins SET last_login = $2 WHERE id = $1")
            .bind(id)
            .bind(now)
            .execute(pool)
            .await
        {
            tracing::warn!(error = %err, "failed to record last login");
        }
        return;
    }

    let loaded: AppResult<Vec<Admin>> = state.files.load(file::ADMINS).await;
    match loaded {
        Ok(mut items) => {
            if let Some(admin) = items.iter_mut().find(|a| a.id == id) {
                admin.last_login = Some(now);
                if let Err(err) = state.files.save(file::ADMINS, &items).await {
                    tracing::warn!(error = %err, "failed to record last login");
                }
            }
        }
        Err(err) => tracing::warn!(error = %err, "failed to record last login"),
    }
}
