use std::{any::Any, sync::Arc};

use axum::{
    Router,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

pub mod directors;
pub mod genres;
pub mod movies;

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    let mut app = Router::new();
    for (collection, list) in [
        ("/movies", get(movies::list).post(movies::create)),
        ("/directors", get(directors::list).post(directors::create)),
        ("/genres", get(genres::list).post(genres::create)),
    ] {
        app = with_trailing_slash(app, collection, list);
    }

    app.route(
        "/movies/{id}",
        get(movies::get).put(movies::replace).patch(movies::merge).delete(movies::remove),
    )
    .route(
        "/directors/{id}",
        get(directors::get)
            .put(directors::replace)
            .patch(directors::merge)
            .delete(directors::remove),
    )
    .route("/directors/{id}/movies", get(directors::movies))
    .route(
        "/genres/{id}",
        get(genres::get).put(genres::replace).patch(genres::merge).delete(genres::remove),
    )
    .route("/genres/{id}/movies", get(genres::movies))
    .fallback(page_not_found)
    .with_state(state)
    .layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(server_problem))
            .layer(
                CorsLayer::new()
                    .allow_origin(cors::Any)
                    .allow_methods(cors::Any)
                    .allow_headers(cors::Any),
            ),
    )
}

fn with_trailing_slash(
    app: Router<SharedState>,
    path: &str,
    methods: MethodRouter<SharedState>,
) -> Router<SharedState> {
    app.route(path, methods.clone()).route(&format!("{path}/"), methods)
}

async fn page_not_found(uri: Uri) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("OOPS! Error 404 Not Found: {uri}, page not found"))
}

fn server_problem(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "OOPS! Error 500 Internal Server Error, server have a problem",
    )
        .into_response()
}
