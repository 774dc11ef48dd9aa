//! HTTP surface: `GET /` and `GET /{number}` return the first `number` pages as one JSON array.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{debug, error};

use crate::aggregate::PageAggregator;
use crate::item::Item;
use crate::{Error, PageIndex, Result, START_PAGE};

#[derive(Clone)]
struct AppState {
    aggregator: Arc<PageAggregator>,
    page_limit: Option<PageIndex>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

type ApiResult<T> = core::result::Result<T, (StatusCode, Json<ErrorBody>)>;

/// Builds the router. Requests for more than `page_limit` pages are rejected.
pub fn router(aggregator: Arc<PageAggregator>, page_limit: Option<PageIndex>) -> Router {
    let state = AppState {
        aggregator,
        page_limit,
    };
    Router::new()
        .route("/", get(read_first_page))
        .route("/healthz", get(healthz))
        .route("/:number", get(read_pages))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn read_first_page(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    aggregate(&state, START_PAGE).await
}

async fn read_pages(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> ApiResult<Json<Vec<Item>>> {
    let total_pages = parse_page_count(&number, state.page_limit).map_err(error_response)?;
    aggregate(&state, total_pages).await
}

async fn aggregate(state: &AppState, total_pages: PageIndex) -> ApiResult<Json<Vec<Item>>> {
    let items = state
        .aggregator
        .aggregate(total_pages)
        .await
        .map_err(error_response)?;
    Ok(Json(items))
}

/// Accepts a positive base-10 integer no larger than `page_limit`.
fn parse_page_count(raw: &str, page_limit: Option<PageIndex>) -> Result<PageIndex> {
    let total_pages: PageIndex = raw
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("'{raw}' is not a page count")))?;
    if total_pages < START_PAGE {
        return Err(Error::InvalidArgument(format!(
            "number of pages must be >= {START_PAGE}, got {total_pages}"
        )));
    }
    if let Some(limit) = page_limit.filter(|limit| total_pages > *limit) {
        return Err(Error::InvalidArgument(format!(
            "at most {limit} pages can be requested at once, got {total_pages}"
        )));
    }
    Ok(total_pages)
}

fn error_response(err: Error) -> (StatusCode, Json<ErrorBody>) {
    let status = if err.is_client_error() {
        debug!("Rejected request: {err}");
        StatusCode::BAD_REQUEST
    } else {
        error!("Request failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorBody {
            message: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_must_be_a_positive_integer() {
        assert_eq!(parse_page_count("3", None).unwrap(), 3);
        for raw in ["0", "-5", "abc", "", "1.5"] {
            let err = parse_page_count(raw, None).unwrap_err();
            assert!(err.is_client_error(), "{raw}: {err:?}");
        }
    }

    #[test]
    fn page_count_respects_limit() {
        assert_eq!(parse_page_count("5", Some(5)).unwrap(), 5);
        assert!(matches!(
            parse_page_count("6", Some(5)),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn errors_map_to_status_codes() {
        let (status, _) = error_response(Error::InvalidArgument("0".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(body)) = error_response(Error::UpstreamFetchFailed {
            page: 2,
            source: Box::new(Error::InternalInconsistency(2)),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.message.contains("page 2"));

        let (status, _) = error_response(Error::InternalInconsistency(1));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
