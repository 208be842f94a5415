//! API handlers for the Payments domain

pub mod mimos;
pub mod service_payments;
pub mod webhook;

use mimo_common::Error;
use mimo_pix::PixError;

/// Map gateway client failures onto the API error taxonomy
pub(crate) fn pix_error(err: PixError) -> Error {
    match err {
        PixError::Configuration(msg) => Error::Internal(msg),
        PixError::Request(msg) | PixError::Response(msg) => Error::Upstream(msg),
    }
}
