//! Extractors for reading the principal in handlers.
//!
//! # Spring Equivalent
//! `@AuthenticationPrincipal`

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::SecurityError;
use crate::http::security::Principal;

/// The authenticated principal. Fails with `401` when the request is anonymous.
///
/// # Usage
/// ```ignore
/// async fn home(user: AuthenticatedUser) -> impl Responder {
///     format!("Hello, {}!", user.get_username())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(Principal);

impl AuthenticatedUser {
    pub fn into_inner(self) -> Principal {
        self.0
    }
}

impl Deref for AuthenticatedUser {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = SecurityError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Principal>().cloned() {
            Some(principal) => ready(Ok(AuthenticatedUser(principal))),
            None => ready(Err(SecurityError::UnauthenticatedAccess)),
        }
    }
}

/// The principal if there is one; never fails.
#[derive(Debug, Clone)]
pub struct OptionalUser(Option<Principal>);

impl OptionalUser {
    pub fn into_inner(self) -> Option<Principal> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalUser {
    type Target = Option<Principal>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalUser(req.extensions().get::<Principal>().cloned())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_authenticated_user_present() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut()
            .insert(Principal::new("ann", "").roles(&["MANAGER"]));

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.get_username(), "ann");
        assert!(user.has_role("MANAGER"));
    }

    #[actix_web::test]
    async fn test_authenticated_user_missing() {
        let req = TestRequest::default().to_http_request();
        let err = AuthenticatedUser::extract(&req).await.unwrap_err();
        assert_eq!(err, SecurityError::UnauthenticatedAccess);
    }

    #[actix_web::test]
    async fn test_optional_user() {
        let req = TestRequest::default().to_http_request();
        let user = OptionalUser::extract(&req).await.unwrap();
        assert!(!user.is_authenticated());
    }
}
