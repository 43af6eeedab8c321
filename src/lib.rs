pub mod routes;
pub mod store;
pub mod types;

use handle_errors::return_error;
use warp::{http::Method, Filter};

use crate::store::Store;

/// Upper bound for JSON request bodies.
const MAX_BODY_BYTES: u64 = 1024 * 64;

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

/// Every `/api` route, with CORS, request tracing and error recovery applied.
pub fn api(
    store: Store,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type"])
        .allow_methods(&[Method::GET, Method::POST, Method::DELETE]);

    let get_articles = warp::path("api")
        .and(warp::path("articles"))
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::article::get_articles);

    let get_article = warp::path("api")
        .and(warp::path("articles"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::article::get_article);

    let add_article = warp::path("api")
        .and(warp::path("articles"))
        .and(warp::path::end())
        .and(warp::post())
        .and(store_filter.clone())
        .and(json_body())
        .and_then(routes::article::add_article);

    let delete_article = warp::path("api")
        .and(warp::path("articles"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(store_filter.clone())
        .and_then(routes::article::delete_article);

    let get_dictionary = warp::path("api")
        .and(warp::path("dictionary"))
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::dictionary::get_dictionary);

    let get_dictionary_word = warp::path("api")
        .and(warp::path("dictionary"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::dictionary::get_dictionary_word);

    let add_dictionary_word = warp::path("api")
        .and(warp::path("dictionary"))
        .and(warp::path::end())
        .and(warp::post())
        .and(store_filter.clone())
        .and(json_body())
        .and_then(routes::dictionary::add_dictionary_word);

    let delete_dictionary_word = warp::path("api")
        .and(warp::path("dictionary"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(store_filter.clone())
        .and_then(routes::dictionary::delete_dictionary_word);

    get_articles
        .or(get_article)
        .or(add_article)
        .or(delete_article)
        .or(get_dictionary)
        .or(get_dictionary_word)
        .or(add_dictionary_word)
        .or(delete_dictionary_word)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "api request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }))
        .with(cors)
        .recover(return_error)
}
