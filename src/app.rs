use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::clients::{AuthClient, UserClient};
use crate::config::SecurityConfig;
use crate::database::store::DocumentStore;
use crate::handlers::{self, contents, journeys, knowledges, points, subjects, trails};
use crate::services::{
    ContentService, JourneyService, KnowledgeService, StartPointService, SubjectService, TrailService,
};

/// Everything a handler can reach. Built once in `main` (or a test) from the
/// store and the two collaborator clients.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub knowledges: Arc<KnowledgeService>,
    pub subjects: Arc<SubjectService>,
    pub points: Arc<StartPointService>,
    pub journeys: Arc<JourneyService>,
    pub trails: Arc<TrailService>,
    pub contents: Arc<ContentService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthClient>, users: Arc<dyn UserClient>) -> Self {
        Self {
            knowledges: Arc::new(KnowledgeService::new(store.clone(), auth.clone(), users.clone())),
            subjects: Arc::new(SubjectService::new(store.clone(), auth.clone(), users)),
            points: Arc::new(StartPointService::new(store.clone(), auth)),
            journeys: Arc::new(JourneyService::new(store.clone())),
            trails: Arc::new(TrailService::new(store.clone())),
            contents: Arc::new(ContentService::new(store.clone())),
            store,
        }
    }
}

pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(knowledge_routes())
        .merge(subject_routes())
        .merge(point_routes())
        .merge(journey_routes())
        .merge(trail_routes())
        .merge(content_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(security)),
        )
}

fn knowledge_routes() -> Router<AppState> {
    Router::new()
        .route("/knowledges", post(knowledges::create).get(knowledges::list))
        .route("/knowledges/order", patch(knowledges::update_order))
        .route("/knowledges/users/:id", get(knowledges::list_by_user))
        .route(
            "/knowledges/:id",
            get(knowledges::show).patch(knowledges::update).delete(knowledges::delete),
        )
        .route("/knowledges/:id/subjects", get(knowledges::subjects))
        .route("/knowledges/:id/subjects/:subject_id", put(knowledges::add_subject))
}

fn subject_routes() -> Router<AppState> {
    Router::new()
        .route("/subjects", post(subjects::create).get(subjects::list))
        .route("/subjects/order", patch(subjects::update_order))
        .route("/subjects/users/:id", get(subjects::list_by_user))
        .route(
            "/subjects/:id",
            get(subjects::show).patch(subjects::update).delete(subjects::delete),
        )
        .route("/subjects/:id/journeys", get(subjects::journeys))
        .route("/subjects/:id/journeys/:journey_id", put(subjects::add_journey))
        .route("/subjects/:id/reconcile", put(subjects::reconcile))
}

fn point_routes() -> Router<AppState> {
    Router::new()
        .route("/points", post(points::create).get(points::list))
        .route("/points/update-point-order", patch(points::update_order))
        .route("/points/user/:id", get(points::list_by_user))
        .route(
            "/points/:id",
            get(points::show).put(points::update).delete(points::delete),
        )
        .route("/points/:id/add-journey", patch(points::add_journey))
        .route("/points/:id/journeys", get(points::journeys))
        .route("/points/:id/reconcile", put(points::reconcile))
}

fn journey_routes() -> Router<AppState> {
    Router::new()
        .route("/journeys", post(journeys::create).get(journeys::list))
        .route("/journeys/update-journeys-order", patch(journeys::update_order))
        .route("/journeys/subject/:id", get(journeys::list_by_subject))
        .route("/journeys/point/:id", get(journeys::list_by_point))
        .route(
            "/journeys/:id",
            get(journeys::show).put(journeys::update).delete(journeys::delete),
        )
        .route("/journeys/:id/add-trail", patch(journeys::add_trail))
        .route("/journeys/:id/trails", get(journeys::trails))
        .route("/journeys/:id/reconcile", put(journeys::reconcile))
}

fn trail_routes() -> Router<AppState> {
    Router::new()
        .route("/trails", post(trails::create).get(trails::list))
        .route("/trails/update-trail-order", patch(trails::update_order))
        .route("/trails/journey/:id", get(trails::list_by_journey))
        .route(
            "/trails/:id",
            get(trails::show).put(trails::update).delete(trails::delete),
        )
        .route("/trails/:id/addContent", put(trails::add_content))
        .route("/trails/:id/removeContent", put(trails::remove_content))
        .route("/trails/:id/contents", get(trails::contents))
        .route("/trails/:id/reconcile", put(trails::reconcile))
}

fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/contents", post(contents::create).get(contents::list))
        .route("/contents/order/update-order", patch(contents::update_order))
        .route("/contents/trail/:id", get(contents::list_by_trail))
        .route(
            "/contents/:id",
            get(contents::show).patch(contents::update).delete(contents::delete),
        )
}

/// CORS per configuration. `*` allows any origin; disabled CORS adds no
/// headers at all.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
