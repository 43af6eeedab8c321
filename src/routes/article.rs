use crate::store::Store;
use crate::types::article::ArticleForm;
use handle_errors::Error;
use percent_encoding::percent_decode_str;
use tracing::info;
use warp::http::StatusCode;

pub async fn get_articles(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let articles = store.list_articles().await?;
    Ok(warp::reply::json(&articles))
}

pub async fn get_article(id: String, store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let id = percent_decode_str(&id).decode_utf8_lossy();
    match store.get_article(id.as_ref()).await? {
        Some(article) => Ok(warp::reply::json(&article)),
        None => Err(warp::reject::custom(Error::ArticleNotFound)),
    }
}

pub async fn add_article(
    store: Store,
    form: ArticleForm,
) -> Result<impl warp::Reply, warp::Rejection> {
    let article = form.into_new_article().map_err(Error::InvalidArticle)?;
    let article = store.create_article(article).await?;
    info!("成功新增文章：{}", article.id);
    Ok(warp::reply::with_status(
        warp::reply::json(&article),
        StatusCode::CREATED,
    ))
}

pub async fn delete_article(
    id: String,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let id = percent_decode_str(&id).decode_utf8_lossy();
    if store.delete_article(id.as_ref()).await? {
        info!("刪除文章：{}", id);
        Ok(warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT))
    } else {
        Err(warp::reject::custom(Error::ArticleNotFound))
    }
}
