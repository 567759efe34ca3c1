//! Bazaar Web Server
//!
//! Axum-based REST API for the catalog plus the WebSocket change feed.

pub mod config;
pub mod connection;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{get, post},
    Router,
};
use bazaar_db::Db;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::ServerConfig;
use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    use routes::*;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::destroy),
        )
        .route(
            "/subCategories",
            get(sub_categories::list).post(sub_categories::create),
        )
        .route(
            "/subCategories/{id}",
            get(sub_categories::show)
                .put(sub_categories::update)
                .delete(sub_categories::destroy),
        )
        .route("/brands", get(brands::list).post(brands::create))
        .route(
            "/brands/{id}",
            get(brands::show).put(brands::update).delete(brands::destroy),
        )
        .route(
            "/variantTypes",
            get(variant_types::list).post(variant_types::create),
        )
        .route(
            "/variantTypes/{id}",
            get(variant_types::show)
                .put(variant_types::update)
                .delete(variant_types::destroy),
        )
        .route("/variants", get(variants::list).post(variants::create))
        .route(
            "/variants/{id}",
            get(variants::show)
                .put(variants::update)
                .delete(variants::destroy),
        )
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .route("/couponCodes", get(coupons::list).post(coupons::create))
        .route("/couponCodes/check-coupon", post(coupons::check))
        .route(
            "/couponCodes/{id}",
            get(coupons::show)
                .put(coupons::update)
                .delete(coupons::destroy),
        )
        .route("/posters", get(posters::list).post(posters::create))
        .route(
            "/posters/{id}",
            get(posters::show)
                .put(posters::update)
                .delete(posters::destroy),
        )
        .route("/orders", get(orders::list).post(orders::create))
        .route("/orders/orderByUserId/{user_id}", get(orders::list_by_user))
        .route(
            "/orders/{id}",
            get(orders::show).put(orders::update).delete(orders::destroy),
        )
        .route("/payment/stripe", post(payment::stripe))
        .route("/payment/razorpay", post(payment::razorpay))
        .route("/notification/send-notification", post(notifications::send))
        .route(
            "/notification/track-notification/{id}",
            get(notifications::track),
        )
        .route("/notification/all-notification", get(notifications::list))
        .route(
            "/notification/delete-notification/{id}",
            axum::routing::delete(notifications::destroy),
        )
        .route("/internal/notify", post(internal::notify))
        .route("/internal/stats", get(internal::stats))
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until it is stopped.
pub async fn run_server(db: Db, config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState::new(db, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
