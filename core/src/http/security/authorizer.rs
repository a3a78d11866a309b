//! Ordered route rules and the access decision.
//!
//! # Spring Security Equivalent
//! `HttpSecurity.authorizeRequests()` with `antMatchers(..).permitAll()`,
//! `.hasRole(..)`, `.hasIpAddress(..)` and `.anyRequest().authenticated()`,
//! plus `exceptionHandling().accessDeniedPage(..)`.

use std::fmt;
use std::net::IpAddr;

use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{header, StatusCode, Uri};
use actix_web::{Error, HttpResponse};
use futures_util::future::LocalBoxFuture;
use log::{debug, error, warn};

use crate::http::security::ant_matcher::AntMatchers;
use crate::http::security::config::{Authorizer, Next};
use crate::http::security::ip_matcher::IpAddressMatcher;
use crate::http::security::Principal;

/// What a matching route demands of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, including anonymous requests.
    PublicAccess,
    /// An authenticated principal holding exactly this role.
    RequiresRole(String),
    /// A client address accepted by the matcher, whoever is (or is not) logged in.
    RequiresSourceIp(IpAddressMatcher),
    /// Any authenticated principal.
    RequiresAuthentication,
}

/// Outcome of evaluating one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Anonymous request to a protected path; send the client to the login page.
    ChallengeAuthentication,
    /// Render the forbidden page.
    Deny,
}

impl Requirement {
    pub fn decide(&self, principal: Option<&Principal>, client_ip: Option<IpAddr>) -> AccessDecision {
        match self {
            Requirement::PublicAccess => AccessDecision::Allow,
            Requirement::RequiresRole(role) => match principal {
                None => AccessDecision::ChallengeAuthentication,
                Some(p) if p.has_role(role) => AccessDecision::Allow,
                Some(_) => AccessDecision::Deny,
            },
            Requirement::RequiresSourceIp(matcher) => match client_ip {
                Some(ip) if matcher.matches(ip) => AccessDecision::Allow,
                _ => AccessDecision::Deny,
            },
            Requirement::RequiresAuthentication => match principal {
                Some(_) => AccessDecision::Allow,
                None => AccessDecision::ChallengeAuthentication,
            },
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::PublicAccess => write!(f, "permitAll"),
            Requirement::RequiresRole(role) => write!(f, "hasRole('{}')", role),
            Requirement::RequiresSourceIp(ip) => write!(f, "hasIpAddress('{}')", ip),
            Requirement::RequiresAuthentication => write!(f, "authenticated"),
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone)]
pub struct RouteRule {
    matchers: AntMatchers,
    requirement: Requirement,
}

impl RouteRule {
    pub fn new(matchers: AntMatchers, requirement: Requirement) -> Self {
        RouteRule {
            matchers,
            requirement,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matchers.matches(path)
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }
}

/// URL pattern-based authorization. Rules are evaluated in the order they were added
/// and the first rule whose patterns match decides.
///
/// # Example
/// ```
/// use travel_agency_security::http::security::{
///     AccessDecision, IpAddressMatcher, Principal, RequestMatcherAuthorizer,
/// };
///
/// let authorizer = RequestMatcherAuthorizer::new()
///     .permit_all(&["/register"])
///     .has_role(&["/hotels/**"], "MANAGER")
///     .has_ip_address(&["/admin/**"], IpAddressMatcher::parse("10.0.0.1").unwrap())
///     .any_request_authenticated();
///
/// let manager = Principal::new("m", "").roles(&["MANAGER"]);
/// assert_eq!(authorizer.decide("/hotels/1", Some(&manager), None), AccessDecision::Allow);
/// assert_eq!(authorizer.decide("/bookings", None, None), AccessDecision::ChallengeAuthentication);
/// ```
#[derive(Debug, Clone)]
pub struct RequestMatcherAuthorizer {
    rules: Vec<RouteRule>,
    login_url: String,
    access_denied_page: Option<String>,
}

impl RequestMatcherAuthorizer {
    pub fn new() -> Self {
        RequestMatcherAuthorizer {
            rules: Vec::new(),
            login_url: "/login".to_string(),
            access_denied_page: None,
        }
    }

    /// Appends a rule after all existing ones.
    pub fn add_rule(mut self, patterns: &[&str], requirement: Requirement) -> Self {
        self.rules
            .push(RouteRule::new(AntMatchers::of(patterns), requirement));
        self
    }

    /// # Spring Equivalent
    /// `antMatchers(..).permitAll()`
    pub fn permit_all(self, patterns: &[&str]) -> Self {
        self.add_rule(patterns, Requirement::PublicAccess)
    }

    /// # Spring Equivalent
    /// `antMatchers(..).hasRole(role)`
    pub fn has_role(self, patterns: &[&str], role: &str) -> Self {
        self.add_rule(patterns, Requirement::RequiresRole(role.to_string()))
    }

    /// # Spring Equivalent
    /// `antMatchers(..).hasIpAddress(ip)`
    pub fn has_ip_address(self, patterns: &[&str], matcher: IpAddressMatcher) -> Self {
        self.add_rule(patterns, Requirement::RequiresSourceIp(matcher))
    }

    /// # Spring Equivalent
    /// `anyRequest().authenticated()`
    pub fn any_request_authenticated(mut self) -> Self {
        self.rules.push(RouteRule::new(
            AntMatchers::any_request(),
            Requirement::RequiresAuthentication,
        ));
        self
    }

    /// Where `ChallengeAuthentication` redirects (default: "/login").
    pub fn login_url(mut self, url: &str) -> Self {
        self.login_url = url.to_string();
        self
    }

    /// Page forwarded to, with status 403, on `Deny`. Without one a bare 403 is sent.
    ///
    /// # Spring Equivalent
    /// `exceptionHandling().accessDeniedPage(url)`
    pub fn access_denied_page(mut self, url: &str) -> Self {
        self.access_denied_page = Some(url.to_string());
        self
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn get_login_url(&self) -> &str {
        &self.login_url
    }

    pub fn get_access_denied_page(&self) -> Option<&str> {
        self.access_denied_page.as_deref()
    }

    /// First matching rule, if any.
    pub fn matching_rule(&self, path: &str) -> Option<&RouteRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// Evaluates the rule table. A path no rule covers is allowed.
    pub fn decide(
        &self,
        path: &str,
        principal: Option<&Principal>,
        client_ip: Option<IpAddr>,
    ) -> AccessDecision {
        match self.matching_rule(path) {
            Some(rule) => rule.requirement.decide(principal, client_ip),
            None => AccessDecision::Allow,
        }
    }
}

impl Default for RequestMatcherAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrites the request so routing dispatches it to `page`, keeping everything else.
fn forward_to(mut req: ServiceRequest, uri: Uri) -> ServiceRequest {
    req.match_info_mut().get_mut().update(&uri);
    req.head_mut().uri = uri;
    req
}

impl<B: 'static> Authorizer<B> for RequestMatcherAuthorizer {
    fn process(
        &self,
        req: ServiceRequest,
        principal: Option<Principal>,
        next: Next<B>,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        // Percent-decoded the same way the router sees it, so `/%68otels` is `/hotels`
        let path = req.match_info().as_str().to_string();
        let client_ip = req.peer_addr().map(|addr| addr.ip());
        let decision = self.decide(&path, principal.as_ref(), client_ip);

        debug!(
            "{} {} from {:?} as {:?} -> {:?}",
            req.method(),
            path,
            client_ip,
            principal.as_ref().map(|p| p.get_username()),
            decision
        );

        match decision {
            AccessDecision::Allow => Box::pin(async move {
                let res = next(req).await?;
                Ok(res.map_into_left_body())
            }),
            AccessDecision::ChallengeAuthentication => {
                let login_url = self.login_url.clone();
                Box::pin(async move {
                    Ok(req.into_response(
                        HttpResponse::Found()
                            .insert_header((header::LOCATION, login_url))
                            .finish()
                            .map_into_right_body(),
                    ))
                })
            }
            AccessDecision::Deny => {
                warn!(
                    "Access denied to {} for {:?} from {:?}",
                    path,
                    principal.as_ref().map(|p| p.get_username()),
                    client_ip
                );

                let page = self
                    .access_denied_page
                    .as_deref()
                    .and_then(|page| match page.parse::<Uri>() {
                        Ok(uri) => Some(uri),
                        Err(e) => {
                            error!("Unusable access denied page '{}': {}", page, e);
                            None
                        }
                    });

                match page {
                    Some(uri) => Box::pin(async move {
                        let mut res = next(forward_to(req, uri)).await?;
                        *res.response_mut().status_mut() = StatusCode::FORBIDDEN;
                        Ok(res.map_into_left_body())
                    }),
                    None => Box::pin(async move {
                        Ok(req.into_response(
                            HttpResponse::Forbidden().finish().map_into_right_body(),
                        ))
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Option<IpAddr> {
        Some(s.parse().unwrap())
    }

    fn authorizer() -> RequestMatcherAuthorizer {
        RequestMatcherAuthorizer::new()
            .permit_all(&["/resources/**", "/register", "/errors/**"])
            .has_role(&["/hotels/**", "/rooms/**", "/management/**"], "MANAGER")
            .has_ip_address(&["/admin/**"], IpAddressMatcher::parse("10.0.0.1").unwrap())
            .any_request_authenticated()
    }

    #[test]
    fn test_requirement_public() {
        assert_eq!(
            Requirement::PublicAccess.decide(None, None),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_requirement_role() {
        let req = Requirement::RequiresRole("MANAGER".into());
        let manager = Principal::new("m", "").roles(&["MANAGER"]);
        let clerk = Principal::new("c", "").roles(&["USER"]);

        assert_eq!(req.decide(Some(&manager), None), AccessDecision::Allow);
        assert_eq!(req.decide(Some(&clerk), None), AccessDecision::Deny);
        assert_eq!(req.decide(None, None), AccessDecision::ChallengeAuthentication);
    }

    #[test]
    fn test_requirement_source_ip_ignores_principal() {
        let req = Requirement::RequiresSourceIp(IpAddressMatcher::parse("10.0.0.1").unwrap());
        let clerk = Principal::new("c", "").roles(&["USER"]);

        assert_eq!(req.decide(None, ip("10.0.0.1")), AccessDecision::Allow);
        assert_eq!(req.decide(Some(&clerk), ip("10.0.0.1")), AccessDecision::Allow);
        assert_eq!(req.decide(None, ip("10.0.0.2")), AccessDecision::Deny);
        assert_eq!(req.decide(Some(&clerk), ip("10.0.0.2")), AccessDecision::Deny);
        assert_eq!(req.decide(None, None), AccessDecision::Deny);
    }

    #[test]
    fn test_first_match_wins() {
        let authorizer = RequestMatcherAuthorizer::new()
            .permit_all(&["/hotels/public"])
            .has_role(&["/hotels/**"], "MANAGER");

        assert_eq!(
            authorizer.decide("/hotels/public", None, None),
            AccessDecision::Allow
        );
        assert_eq!(
            authorizer.decide("/hotels/7", None, None),
            AccessDecision::ChallengeAuthentication
        );

        let reversed = RequestMatcherAuthorizer::new()
            .has_role(&["/hotels/**"], "MANAGER")
            .permit_all(&["/hotels/public"]);
        assert_eq!(
            reversed.decide("/hotels/public", None, None),
            AccessDecision::ChallengeAuthentication
        );
    }

    #[test]
    fn test_unmatched_path_is_allowed() {
        let authorizer = RequestMatcherAuthorizer::new().has_role(&["/hotels/**"], "MANAGER");
        assert_eq!(authorizer.decide("/other", None, None), AccessDecision::Allow);
    }

    #[test]
    fn test_policy_table() {
        let authorizer = authorizer();
        let clerk = Principal::new("c", "").roles(&["USER"]);

        assert_eq!(authorizer.decide("/register", None, None), AccessDecision::Allow);
        assert_eq!(
            authorizer.decide("/resources/css/site.css", None, None),
            AccessDecision::Allow
        );
        assert_eq!(
            authorizer.decide("/rooms/3", Some(&clerk), None),
            AccessDecision::Deny
        );
        assert_eq!(
            authorizer.decide("/admin/reports", Some(&clerk), ip("10.0.0.1")),
            AccessDecision::Allow
        );
        assert_eq!(
            authorizer.decide("/bookings", None, ip("10.0.0.1")),
            AccessDecision::ChallengeAuthentication
        );
        assert_eq!(
            authorizer.decide("/bookings", Some(&clerk), None),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_defaults_and_display() {
        let authorizer = authorizer().access_denied_page("/errors/forbidden");
        assert_eq!(authorizer.get_login_url(), "/login");
        assert_eq!(authorizer.get_access_denied_page(), Some("/errors/forbidden"));

        let shown: Vec<String> = authorizer
            .rules()
            .iter()
            .map(|r| r.requirement().to_string())
            .collect();
        assert_eq!(
            shown,
            vec![
                "permitAll",
                "hasRole('MANAGER')",
                "hasIpAddress('10.0.0.1')",
                "authenticated"
            ]
        );
    }
}
