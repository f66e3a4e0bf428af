use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::AdminGate;
use crate::config::AppConfig;
use crate::database::RecordStore;
use crate::handlers::{admin, public};
use crate::middleware::admin_gate_middleware;
use crate::notify::Notifier;
use crate::services::{BlogService, ContactService, ProfileService, ProjectService, SkillService, StatusService};

/// Shared per-request state: one service per entity over a single store
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub status: StatusService,
    pub profile: ProfileService,
    pub projects: ProjectService,
    pub skills: SkillService,
    pub blog: BlogService,
    pub contact: ContactService,
    pub gate: AdminGate,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>, config: &AppConfig) -> Self {
        Self {
            status: StatusService::new(store.clone()),
            profile: ProfileService::new(store.clone()),
            projects: ProjectService::new(store.clone()),
            skills: SkillService::new(store.clone()),
            blog: BlogService::new(store.clone()),
            contact: ContactService::new(store.clone(), notifier, config.mail.to.clone()),
            gate: AdminGate::new(config.security.admin_token.clone()),
            store,
        }
    }
}

pub fn router(state: AppState, config: &AppConfig) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .merge(public_routes())
        .nest("/api/admin", admin_routes(&state))
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(&config.security.cors_origins))
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        )
        .with_state(state);

    if config.api.enable_request_logging {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}

fn public_routes() -> Router<AppState> {
    use public::{blog, contact, profile, projects, skills, status};

    Router::new()
        .route("/api", get(hello))
        .route("/api/", get(hello))
        .route("/api/status", get(status::list).post(status::create))
        .route("/api/profile", get(profile::get).put(profile::put))
        .route("/api/projects", get(projects::list).post(projects::create))
        .route("/api/projects/:id", put(projects::update).delete(projects::delete))
        .route("/api/skills", get(skills::list).put(skills::replace))
        .route("/api/blog", get(blog::list).post(blog::create))
        .route("/api/blog/:id", get(blog::get).put(blog::update).delete(blog::delete))
        .route("/api/contact", post(contact::create))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    use public::{blog, projects, skills};

    Router::new()
        .route("/projects", post(projects::create))
        .route("/projects/:id", put(projects::update).delete(projects::delete))
        .route("/skills", put(skills::replace))
        .route("/blog", post(blog::create))
        .route("/blog/:id", put(blog::update).delete(blog::delete))
        .route("/contact", get(admin::contact_list))
        .route_layer(middleware::from_fn_with_state(state.gate.clone(), admin_gate_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "version": env!("CARGO_PKG_VERSION"),
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
