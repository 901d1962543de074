use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use foodgram_auth_types::identity::IdentityHeaders;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

/// `Content-Disposition` value for `filename`, with characters outside printable ASCII
/// (and quotes) replaced so the header stays valid.
pub fn attachment_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

// ── GET /recipes/download_shopping_cart ──────────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let uc = DownloadShoppingListUseCase {
        users: state.user_repo(),
        carts: state.cart_repo(),
    };
    let list = uc.execute(identity.user_id, Utc::now()).await?;
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_owned(),
            ),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition(&list.filename),
            ),
        ],
        list.body,
    )
        .into_response())
}
