//! The two seams of the security middleware.
//!
//! # Spring Equivalent
//! `SecurityContextRepository` and `AuthorizationFilter`

use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

use crate::http::security::Principal;

/// Resolves the principal (if any) behind a request.
///
/// Returns an owned `Principal` so it can be stored in request extensions.
pub trait Authenticator {
    fn authenticate(&self, req: &ServiceRequest) -> Option<Principal>;
}

/// Next service in the chain, as handed to an [`Authorizer`].
pub type Next<B> =
    Box<dyn FnOnce(ServiceRequest) -> LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>>;

/// Turns an access decision into a response.
///
/// The returned future resolves to:
/// - `EitherBody::left()` when the request was forwarded to the inner service
/// - `EitherBody::right()` for responses produced here (redirects, plain 403)
pub trait Authorizer<B> {
    fn process(
        &self,
        req: ServiceRequest,
        principal: Option<Principal>,
        next: Next<B>,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>>;
}
