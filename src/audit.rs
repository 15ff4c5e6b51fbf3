use serde_json::Value;
use uuid::Uuid;

use crate::error::AppResult;
use crate::state::AppState;

/// Records admin and sync activity. Skipped entirely on the file backend;
/// callers swallow failures.
pub async fn log_audit(
    state: &AppState,
    admin_id: Option<Uuid>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let Some(pool) = &state.db else {
        return Ok(());
    };

    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, admin_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(admin_id)
    .bind(action.to_string())
    .bind(resource.map(|r| r.to_string()))
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}
