use crate::News;
use crate::model::{Headline, TrustedItem};
use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use tscope_derive::api_handler;
use tscope_domain::constants::NEWS_TAG;
use tscope_kernel::server::{ApiResult, ApiState};
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct CountryQuery {
    /// Two-letter country code, `us` when omitted
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct SearchQuery {
    /// Keywords
    #[serde(default)]
    q: String,
}

#[api_handler(
    get,
    path = "/trusted_news",
    params(CountryQuery),
    responses((status = OK, description = "Top headlines from the first provider that answers", body = [Headline])),
    tag = NEWS_TAG,
)]
pub(crate) async fn trusted_news(
    State(state): State<ApiState>,
    Query(query): Query<CountryQuery>,
) -> ApiResult<Json<Vec<Headline>>> {
    let news = state.try_get_slice::<News>()?;
    let country = query
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(state.config.news.default_country.as_str());

    Ok(Json(news.service.trusted_headlines(country).await))
}

#[api_handler(
    get,
    path = "/search_news",
    params(SearchQuery),
    responses((status = OK, description = "Relevancy-ordered search results, empty on any failure", body = [Headline])),
    tag = NEWS_TAG,
)]
pub(crate) async fn search_news(
    State(state): State<ApiState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Headline>>> {
    let news = state.try_get_slice::<News>()?;
    Ok(Json(news.service.search(&query.q).await))
}

#[api_handler(
    get,
    path = "/trusted_feed",
    responses((status = OK, description = "Newest cached trusted RSS items, oldest first", body = [TrustedItem])),
    tag = NEWS_TAG,
)]
pub(crate) async fn trusted_feed(State(state): State<ApiState>) -> ApiResult<Json<Vec<TrustedItem>>> {
    let news = state.try_get_slice::<News>()?;
    news.feed.refresh().await;
    Ok(Json(news.feed.latest(news.stream_window)))
}

/// `/trusted_news`, `/search_news` and `/trusted_feed`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(trusted_news))
        .routes(routes!(search_news))
        .routes(routes!(trusted_feed))
}
