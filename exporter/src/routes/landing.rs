//! Landing page pointing at the metrics path.

use axum::extract::State;
use axum::response::Html;
use axum::{routing::get, Router};

use crate::state::AppState;

/// Creates the landing page route.
pub fn landing_routes() -> Router<AppState> {
    Router::new().route("/", get(landing_page))
}

async fn landing_page(State(state): State<AppState>) -> Html<String> {
    let path = html_escape::encode_single_quoted_attribute(state.metrics_path());
    Html(format!(
        "<html>
<head><title>Guacamole Exporter</title></head>
<body>
<h1>Guacamole Exporter</h1>
<p><a href='{path}'>Metrics</a></p>
</body>
</html>
"
    ))
}
