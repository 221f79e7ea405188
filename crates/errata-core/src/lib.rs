#![allow(clippy::must_use_candidate)]

//! Error taxonomy for HTTP-facing services
//!
//! Every application error is a small value type implementing [`HttpError`]:
//! a fixed status code, a message, and a kind name. Handlers return
//! [`ApiError`], and a single rendering boundary turns it into a response
//! through [`classify`].

mod api_error;
mod classify;
mod error;
mod kinds;

pub use api_error::{ApiError, ResultExt};
pub use classify::{Classification, Classify, classify};
pub use error::{HttpError, StatusFamily};
pub use http::StatusCode;
pub use kinds::*;
