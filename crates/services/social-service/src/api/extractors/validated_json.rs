//! JSON body extractor that runs `validator` rules before the handler sees it.

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use common::AppError;

/// Request body that decoded and passed its validation rules.
///
/// Every failure is an `AppError::Validation`, so clients get the same
/// `VALIDATION_ERROR` body for a missing content type, broken JSON, a wrong
/// field type or a rule violation.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(describe_rejection)?;

        payload
            .validate()
            .map_err(|errors| AppError::validation(describe_errors(&errors)))?;

        Ok(ValidatedJson(payload))
    }
}

fn describe_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Expected a JSON body with Content-Type: application/json")
        }
        other => AppError::validation(other.body_text()),
    }
}

/// One message per failing rule, grouped by field name for a stable order.
fn describe_errors(errors: &ValidationErrors) -> String {
    let by_field: BTreeMap<_, _> = errors.field_errors().into_iter().collect();

    by_field
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| match &failure.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
