use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::{Method, header},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, warn};

use section_widgets::{WidgetCatalog, WidgetMetadata, prepare, render_contained};

use crate::error::ApiError;

/// Shared, read-only state of the server.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<WidgetCatalog>,
    pub namespace: Arc<str>,
    pub public_url: Arc<str>,
}

impl AppState {
    pub fn new(catalog: WidgetCatalog, namespace: &str, public_url: &str) -> Self {
        Self {
            catalog: Arc::new(catalog),
            namespace: Arc::from(namespace),
            public_url: Arc::from(public_url),
        }
    }
}

/// Widget routes.
///
/// - `GET /widgets` - metadata of every widget, keyed by identifier
/// - `GET /widgets/:identifier` - self-registering bundle script
/// - `POST /widgets/:identifier/render` - raw props in, rendered HTML out
pub fn create_app(state: AppState) -> Router {
    // The bundle route sends its own fixed CORS headers; render requests
    // come from arbitrary host pages and need preflight handling.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let render = Router::new()
        .route("/widgets/:identifier/render", post(render_widget))
        .layer(cors);

    Router::new()
        .route("/widgets", get(list_widgets))
        .route("/widgets/:identifier", get(get_bundle))
        .merge(render)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_widgets(State(state): State<AppState>) -> Response {
    let widgets: BTreeMap<&str, &WidgetMetadata> = state
        .catalog
        .identifiers()
        .filter_map(|id| state.catalog.metadata(id).map(|meta| (id, meta)))
        .collect();
    Json(widgets).into_response()
}

async fn get_bundle(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Response, ApiError> {
    let bundle = state
        .catalog
        .bundle(&identifier, &state.namespace, &state.public_url)?;
    debug!(%identifier, bytes = bundle.script().len(), "serving bundle");

    Ok((
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
        bundle.into_script(),
    )
        .into_response())
}

async fn render_widget(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    body: Bytes,
) -> Result<Html<String>, ApiError> {
    let definition = state
        .catalog
        .get(&identifier)
        .ok_or_else(|| ApiError::NotFound {
            identifier: identifier.clone(),
        })?;

    let raw = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            warn!(%identifier, "props are not valid JSON, rendering defaults: {e}");
            Value::Null
        })
    };

    let config = prepare(&raw, &definition.schema);
    // A panicking component must not take the connection down with it.
    let markup = render_contained(definition.component, &config)?;
    Ok(Html(markup.into_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    fn app() -> Router {
        create_app(AppState::new(
            WidgetCatalog::builtin(),
            "SectionWidgets",
            "https://widgets.example.com",
        ))
    }

    async fn send(request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn bundle_has_script_headers() {
        let (status, headers, body) = send(get_request("/widgets/hero")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/javascript");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert!(body.contains(r#"var ID = "hero";"#));
        assert!(body.contains(r#"var BASE_URL = "https://widgets.example.com";"#));
    }

    #[tokio::test]
    async fn unknown_widget_is_404() {
        let (status, _, body) = send(get_request("/widgets/nope")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Widget not found" }));
    }

    #[tokio::test]
    async fn bad_namespace_is_500() {
        let app = create_app(AppState::new(WidgetCatalog::builtin(), "not-valid", ""));
        let response = app.oneshot(get_request("/widgets/hero")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .starts_with("Failed to load widget: ")
        );
    }

    #[tokio::test]
    async fn lists_widget_metadata() {
        let (status, _, body) = send(get_request("/widgets")).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["hero"]["name"], "HeroSection");
        assert_eq!(json["strategy"]["name"], "StrategySection");
    }

    #[tokio::test]
    async fn renders_hero_with_clamped_rating() {
        let (status, headers, body) = send(post_json(
            "/widgets/hero/render",
            r#"{"rating": 10, "title": "<span class=\"highlight\">X</span>"}"#,
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(
            headers[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert_eq!(body.matches(r#"class="star star--"#).count(), 5);
        assert_eq!(body.matches("star star--full").count(), 5);
        assert_eq!(body.matches(r#"class="highlight "#).count(), 1);
    }

    #[tokio::test]
    async fn invalid_json_renders_defaults() {
        let (status, _, body) = send(post_json("/widgets/hero/render", "{not json")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("4.8/5"));
    }

    #[tokio::test]
    async fn render_preflight_is_allowed() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/widgets/hero/render")
            .header(header::ORIGIN, "https://cms.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = send(request).await;

        assert!(status.is_success());
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn panicking_component_is_500() {
        use section_widgets::{Markup, PropSchema, RenderError, ValidatedConfig, WidgetDefinition};

        fn exploding(_: &ValidatedConfig) -> Result<Markup, RenderError> {
            panic!("layout exploded")
        }

        let catalog = WidgetCatalog::new().with(WidgetDefinition::new(
            "exploding",
            "ExplodingSection",
            "Always panics",
            exploding,
            PropSchema::new(),
        ));
        let app = create_app(AppState::new(catalog, "SectionWidgets", ""));
        let response = app
            .oneshot(post_json("/widgets/exploding/render", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Failed to render widget: component panicked: layout exploded"
            })
        );
    }

    #[tokio::test]
    async fn rendering_unknown_widget_is_404() {
        let (status, _, _) = send(post_json("/widgets/consume/render", "{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
