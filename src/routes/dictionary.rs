use crate::store::Store;
use crate::types::dictionary::DictionaryWordForm;
use handle_errors::Error;
use percent_encoding::percent_decode_str;
use tracing::info;
use warp::http::StatusCode;

pub async fn get_dictionary(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let words = store.list_dictionary_words().await?;
    Ok(warp::reply::json(&words))
}

pub async fn get_dictionary_word(
    id: String,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let id = percent_decode_str(&id).decode_utf8_lossy();
    match store.get_dictionary_word(id.as_ref()).await? {
        Some(word) => Ok(warp::reply::json(&word)),
        None => Err(warp::reject::custom(Error::WordNotFound)),
    }
}

// articleId is stored as given, even when no such article exists.
pub async fn add_dictionary_word(
    store: Store,
    form: DictionaryWordForm,
) -> Result<impl warp::Reply, warp::Rejection> {
    let word = form.into_new_word().map_err(Error::InvalidWord)?;
    let word = store.create_dictionary_word(word).await?;
    info!("成功新增單字：{} ({})", word.word, word.id);
    Ok(warp::reply::with_status(
        warp::reply::json(&word),
        StatusCode::CREATED,
    ))
}

pub async fn delete_dictionary_word(
    id: String,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let id = percent_decode_str(&id).decode_utf8_lossy();
    if store.delete_dictionary_word(id.as_ref()).await? {
        info!("刪除單字：{}", id);
        Ok(warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT))
    } else {
        Err(warp::reject::custom(Error::WordNotFound))
    }
}
