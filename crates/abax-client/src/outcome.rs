//! Classification of a single HTTP exchange.

use chrono::{DateTime, Utc};

use crate::error::{Error, ErrorKind};
use crate::response::HttpResponse;

/// The result of one HTTP attempt, decided once at the transport boundary.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// 2xx. The body still has to go through the call's parser.
    Success(HttpResponse),
    /// 429. `reset_at` is the parsed `X-Rate-Limit-Reset`, when present.
    RateLimited { reset_at: Option<DateTime<Utc>> },
    /// Any other status.
    Rejected(Rejection),
}

impl Outcome {
    pub fn classify(response: HttpResponse) -> Self {
        match response.status() {
            200..=299 => Outcome::Success(response),
            429 => Outcome::RateLimited {
                reset_at: response.rate_limit_reset(),
            },
            status => {
                let api_error = response.api_error();
                Outcome::Rejected(Rejection {
                    status,
                    message: api_error.detail(),
                    error: api_error.error,
                })
            }
        }
    }
}

/// A non-2xx, non-429 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status: u16,
    /// The vendor `error` field, verbatim.
    pub error: Option<String>,
    /// Sanitized vendor message (`message`, falling back to `error`).
    pub message: Option<String>,
}

impl Rejection {
    /// Map the rejection onto the terminal error for its status.
    pub fn into_error(self) -> Error {
        let message = self.message;
        let kind = match self.status {
            401 => ErrorKind::Unauthorized { message },
            400 => ErrorKind::BadRequest { message },
            status => ErrorKind::RequestFailed { status, message },
        };
        Error::new(kind)
    }
}
