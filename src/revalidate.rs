use crate::state::AppState;

/// Server-rendered storefront pages whose caches go stale on product writes.
pub const STOREFRONT_PATHS: &[&str] = &["/", "/products", "/men", "/women", "/kids", "/fulkari"];

/// Asks the hosting frontend to revalidate the given paths. Failures are
/// logged and swallowed; callers never see them.
pub async fn invalidate_paths(state: &AppState, paths: &[&str]) {
    let Some(config) = &state.config.revalidate else {
        tracing::debug!("revalidation not configured, skipping");
        return;
    };

    let url = format!("{}/api/revalidate", config.base_url.trim_end_matches('/'));
    for path in paths {
        let result = state
            .http
            .post(&url)
            .query(&[("path", *path), ("secret", config.secret.as_str())])
            .send()
            .await;
        match result {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!(path = *path, "page revalidated");
            }
            Ok(resp) => {
                tracing::warn!(path = *path, status = %resp.status(), "revalidation rejected");
            }
            Err(err) => {
                tracing::warn!(path = *path, error = %err, "revalidation request failed");
            }
        }
    }
}
