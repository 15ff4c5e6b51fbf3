use chrono::Utc;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::sync::{SyncPullResponse, SyncReport},
    error::{AppError, AppResult, flatten_validation_errors},
    models::Product,
    revalidate::{self, STOREFRONT_PATHS},
    state::AppState,
    store::products,
};

/// One sync cycle: pull the authoritative product list, replace the local
/// catalog wholesale, then invalidate the storefront page caches. Any failure
/// before the replacement leaves local data untouched; there is no retry.
pub async fn pull_and_replace(state: &AppState) -> AppResult<SyncReport> {
    let Some(config) = &state.config.sync else {
        return Err(AppError::BadRequest("sync is not configured".into()));
    };

    // One pull at a time; concurrent triggers get a conflict instead of racing.
    let Ok(_guard) = state.sync_gate.try_lock() else {
        return Err(AppError::Conflict("sync already in progress".into()));
    };

    let url = format!(
        "{}/api/sync/products",
        config.server_url.trim_end_matches('/')
    );
    let response = state
        .http
        .get(&url)
        .bearer_auth(&config.secret)
        .send()
        .await
        .map_err(|err| AppError::Upstream(format!("sync server unreachable: {err}")))?;

    if !response.status().is_success() {
        return Err(AppError::Upstream(format!(
            "sync server responded with {}",
            response.status()
        )));
    }

    let body: SyncPullResponse = response
        .json()
        .await
        .map_err(|err| AppError::Upstream(format!("malformed sync response: {err}")))?;

    if !body.success {
        return Err(AppError::Upstream(
            "sync server reported failure".into(),
        ));
    }

    for record in &body.products {
        if let Err(errors) = record.validate() {
            return Err(AppError::Upstream(format!(
                "malformed product '{}': {}",
                record.name,
                flatten_validation_errors(&errors)
            )));
        }
    }

    let now = Utc::now();
    let fetched = body.products.len();
    let catalog: Vec<Product> = body
        .products
        .into_iter()
        .map(|record| record.into_product(now))
        .collect();

    products::replace_all(state, &catalog).await?;
    tracing::info!(fetched, "catalog replaced from sync server");

    revalidate::invalidate_paths(state, STOREFRONT_PATHS).await;

    if let Err(err) = log_audit(
        state,
        None,
        "sync_pull",
        Some("products"),
        Some(serde_json::json!({ "fetched": fetched })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(SyncReport {
        fetched,
        replaced: true,
    })
}

/// Interval driver for the pull. Failures degrade to "no update this cycle".
pub async fn run_periodic(state: AppState) {
    let Some(interval_secs) = state.config.sync.as_ref().map(|s| s.interval_secs) else {
        return;
    };

    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately; skip it so startup is not a pull.
    interval.tick().await;

    loop {
        interval.tick().await;
        match pull_and_replace(&state).await {
            Ok(report) => {
                tracing::info!(fetched = report.fetched, "periodic sync completed");
            }
            Err(err) => {
                tracing::warn!(error = %err, "periodic sync failed, keeping existing catalog");
            }
        }
    }
}
