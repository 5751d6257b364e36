//! HTTP client for the storefront API.
//!
//! [`StorefrontClient::search`] converts [`storefront_search::SearchCriteria`]
//! for the requested API surface and sends it. Store API criteria travel as
//! a query string on a GET; full API criteria as a JSON body on a POST.
//! Every failure comes back as a [`ClientApiError`].

pub mod client;
pub mod error;
pub mod logging;

pub use client::StorefrontClient;
pub use error::{API_ERROR_CODES, ApiErrorKind, ClientApiError, ErrorMessage, ShopwareError};
pub use logging::{init_logging, set_log_level};
