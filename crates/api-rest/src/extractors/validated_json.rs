//! JSON extractor that also runs the body's `validator` rules.

use super::JsonBody;
use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use drill_catalog_application::ApplicationError;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Decoded body whose field rules all passed; every failing field is
/// reported in one 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate().map_err(ApplicationError::from)?;
        Ok(Self(value))
    }
}
