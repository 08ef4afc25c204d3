use axum::{
    Router,
    http::{Method, header},
    routing::{get, post, put},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors},
    routes,
};

fn cors_layer() -> CorsLayer {
    // 允许任意来源并携带凭证，因此回显请求的 Origin
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_LENGTH,
        ])
        .allow_credentials(true)
}

pub fn create_router(state: AppState) -> Router {
    // 公开路由
    let public_routes = Router::new()
        .route("/auth/register", post(routes::user::register))
        .route("/auth/login", post(routes::user::login));

    // 需要认证的路由，列表接口同时接受带斜杠和不带斜杠的路径
    let protected_routes = Router::new()
        .route(
            "/users/profile",
            get(routes::user::get_profile).put(routes::user::update_profile),
        )
        .route(
            "/pets",
            get(routes::pet::list_pets).post(routes::pet::create_pet),
        )
        .route(
            "/pets/",
            get(routes::pet::list_pets).post(routes::pet::create_pet),
        )
        .route(
            "/pets/{id}",
            get(routes::pet::get_pet)
                .put(routes::pet::update_pet)
                .delete(routes::pet::delete_pet),
        )
        .route("/services", get(routes::service::list_services))
        .route("/services/", get(routes::service::list_services))
        .route("/services/{id}", get(routes::service::get_service))
        .route(
            "/provider/services",
            post(routes::service::create_service),
        )
        .route(
            "/provider/services/",
            post(routes::service::create_service),
        )
        .route(
            "/provider/services/{id}",
            put(routes::service::update_service).delete(routes::service::delete_service),
        )
        .route(
            "/bookings",
            get(routes::booking::list_bookings).post(routes::booking::create_booking),
        )
        .route(
            "/bookings/",
            get(routes::booking::list_bookings).post(routes::booking::create_booking),
        )
        .route(
            "/bookings/{id}",
            get(routes::booking::get_booking)
                .put(routes::booking::update_booking)
                .delete(routes::booking::cancel_booking),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest(
            &state.config.api_base_uri,
            Router::new().merge(public_routes).merge(protected_routes),
        )
        .route("/health", get(routes::health_check))
        .layer(axum::middleware::from_fn(log_errors))
        .layer(cors_layer())
        .with_state(state)
}
