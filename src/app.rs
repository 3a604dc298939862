use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::{MemoryStore, TweetStore, UserStore};
use crate::handlers::{protected, public, system};
use crate::middleware::jwt_auth_middleware;
use crate::services::{TweetService, UserService};

/// Shared per-router state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tweets: TweetService,
    pub users: UserService,
}

impl AppState {
    pub fn new<S>(config: AppConfig, store: S) -> Self
    where
        S: TweetStore + UserStore + 'static,
    {
        let config = Arc::new(config);
        let store = Arc::new(store);
        Self {
            tweets: TweetService::new(store.clone()),
            users: UserService::new(store, config.clone()),
            config,
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, MemoryStore::new())
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(user_routes(state.clone()))
        .merge(tweet_routes(state.clone()))
        // Global middleware
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/users/logout", post(protected::users::logout))
        .route("/users/current-user", get(protected::users::current_user))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    Router::new()
        .route("/users/register", post(public::users::register))
        .route("/users/login", post(public::users::login))
        .route("/users/access-refresh", post(public::users::refresh_access_token))
        .merge(protected)
}

fn tweet_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/tweets", post(protected::tweets::create_tweet))
        .route(
            "/tweets/:tweet_id",
            patch(protected::tweets::update_tweet).delete(protected::tweets::delete_tweet),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    Router::new()
        .route("/tweets/user/:user_id", get(public::tweets::user_tweets))
        .merge(protected)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
