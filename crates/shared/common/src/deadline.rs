//! Deadline helper for storage operations.
//!
//! Every repository call is an ordinary future, so dropping it cancels the
//! in-flight store request. `with_deadline` turns an elapsed timer into a
//! typed error instead of a hung request.

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Run `operation`, failing with [`AppError::DeadlineExceeded`] if it does
/// not complete within `deadline`.
pub async fn with_deadline<F, T>(deadline: Duration, operation: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(?deadline, "Storage operation exceeded its deadline");
            Err(AppError::DeadlineExceeded)
        }
    }
}
