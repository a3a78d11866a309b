//! Security middleware for Actix Web.
//!
//! # Spring Equivalent
//! `SecurityFilterChain` / `FilterChainProxy`

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::http::security::config::{Authenticator, Authorizer, Next};

/// Security middleware factory.
///
/// The authenticator and authorizer are built once at startup and cloned into each worker.
///
/// # Example
/// ```ignore
/// App::new()
///     .wrap(SecurityTransform::new(
///         SessionAuthenticator::new(SessionConfig::new()),
///         policy.clone(),
///     ))
///     .wrap(session_middleware)
/// ```
#[derive(Clone)]
pub struct SecurityTransform<Auth, Autho> {
    authenticator: Auth,
    authorizer: Autho,
}

impl<Auth, Autho> SecurityTransform<Auth, Autho> {
    pub fn new(authenticator: Auth, authorizer: Autho) -> Self {
        SecurityTransform {
            authenticator,
            authorizer,
        }
    }
}

impl<S, B, Auth, Autho> Transform<S, ServiceRequest> for SecurityTransform<Auth, Autho>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator + Clone + 'static,
    Autho: Authorizer<B> + Clone + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SecurityService<Auth, Autho, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SecurityService {
            authenticator: self.authenticator.clone(),
            authorizer: self.authorizer.clone(),
            service: Rc::new(service),
        })
    }
}

/// Security middleware service.
///
/// # Spring Equivalent
/// `FilterChainProxy`
pub struct SecurityService<Auth, Autho, S> {
    authenticator: Auth,
    authorizer: Autho,
    service: Rc<S>,
}

impl<Auth, Autho, S, B> Service<ServiceRequest> for SecurityService<Auth, Autho, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator,
    Autho: Authorizer<B>,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let principal = self.authenticator.authenticate(&req);

        // Handlers read it back through the AuthenticatedUser / OptionalUser extractors
        if let Some(ref p) = principal {
            req.extensions_mut().insert(p.clone());
        }

        let next: Next<B> = Box::new(move |req: ServiceRequest| {
            let fut = service.call(req);
            Box::pin(fut) as LocalBoxFuture<'static, _>
        });

        self.authorizer.process(req, principal, next)
    }
}
