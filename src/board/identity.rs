use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use super::domain::AccountId;
use super::views::{render_page, ErrorPage};

/// Header carrying the authenticated account id, set by the fronting auth layer.
pub const ACCOUNT_HEADER: &str = "x-account-id";

pub(crate) const NOT_SIGNED_IN: &str = "User not logged in or user ID not available.";

fn account_from_headers(headers: &HeaderMap) -> Option<AccountId> {
    headers
        .get(ACCOUNT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| AccountId(value.to_string()))
}

/// Signed-in account. Rejects with a 401 error page when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAccount(pub AccountId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        account_from_headers(&parts.headers)
            .map(CurrentAccount)
            .ok_or_else(|| {
                render_page(
                    StatusCode::UNAUTHORIZED,
                    ErrorPage::new(NOT_SIGNED_IN).with_back("/login"),
                )
            })
    }
}

/// Account when one is signed in; public pages use this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaybeAccount(pub Option<AccountId>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAccount
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAccount(account_from_headers(&parts.headers)))
    }
}
