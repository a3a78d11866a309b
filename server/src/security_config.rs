//! Access policy of the travel agency site.
//!
//! # Spring Security Equivalent
//! ```java
//! @Override
//! protected void configure(HttpSecurity http) throws Exception {
//!     http.csrf().disable()
//!         .authorizeRequests()
//!             .antMatchers("/resources/**", "/register", "/errors/**").permitAll()
//!             .antMatchers("/hotels/**", "/rooms/**", "/management/**").hasRole("MANAGER")
//!             .antMatchers("/admin/**").hasIpAddress(env.getRequiredProperty("user.ip_address"))
//!             .anyRequest().authenticated()
//!         .and()
//!         .formLogin().loginPage("/login").usernameParameter("email").permitAll()
//!         .and()
//!         .logout().permitAll()
//!         .and()
//!         .exceptionHandling().accessDeniedPage("/errors/forbidden");
//! }
//! ```

use travel_agency_security::http::security::{
    BCryptPasswordEncoder, DaoAuthenticationProvider, FormLoginConfig, FormLoginService,
    RequestMatcherAuthorizer, SessionConfig, UserDetailsService, MANAGER_ROLE,
};

use crate::settings::SecurityProperties;

pub const LOGIN_PAGE: &str = "/login";
pub const LOGOUT_URL: &str = "/logout";
pub const FORBIDDEN_PAGE: &str = "/errors/forbidden";

pub const PUBLIC_PATHS: &[&str] = &["/resources/**", "/register", "/errors/**"];
pub const MANAGER_PATHS: &[&str] = &["/hotels/**", "/rooms/**", "/management/**"];
pub const ADMIN_PATHS: &[&str] = &["/admin/**"];

/// Login form posted by `GET /login`: the username travels in the `email` field.
pub fn form_login() -> FormLoginConfig {
    FormLoginConfig::new()
        .login_page(LOGIN_PAGE)
        .login_processing_url(LOGIN_PAGE)
        .username_parameter("email")
        .password_parameter("password")
        .logout_url(LOGOUT_URL)
}

/// The ordered rule table. Login and logout come first so no later rule can lock them.
pub fn authorizer(props: &SecurityProperties) -> RequestMatcherAuthorizer {
    let login = form_login();

    RequestMatcherAuthorizer::new()
        .permit_all(&login.permitted_paths())
        .permit_all(PUBLIC_PATHS)
        .has_role(MANAGER_PATHS, MANAGER_ROLE)
        .has_ip_address(ADMIN_PATHS, props.admin_ip.clone())
        .any_request_authenticated()
        .login_url(login.get_login_page())
        .access_denied_page(FORBIDDEN_PAGE)
}

pub fn password_encoder(props: &SecurityProperties) -> BCryptPasswordEncoder {
    BCryptPasswordEncoder::with_cost(props.bcrypt_cost)
}

/// Login/logout endpoints over the given credential store.
pub fn form_login_service<S>(users: S, props: &SecurityProperties) -> FormLoginService
where
    S: UserDetailsService + 'static,
{
    FormLoginService::new(
        DaoAuthenticationProvider::new(users, password_encoder(props)),
        form_login(),
        SessionConfig::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    use travel_agency_security::http::security::{AccessDecision, IpAddressMatcher, Principal};

    fn props(ip: &str) -> SecurityProperties {
        SecurityProperties {
            admin_ip: IpAddressMatcher::parse(ip).unwrap(),
            bcrypt_cost: 4,
            bind_address: "127.0.0.1:0".to_string(),
        }
    }

    fn ip(s: &str) -> Option<IpAddr> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_public_paths_allow_anonymous() {
        let policy = authorizer(&props("10.0.0.1"));
        for path in [
            "/login",
            "/logout",
            "/register",
            "/resources/css/site.css",
            "/errors/forbidden",
        ] {
            assert_eq!(policy.decide(path, None, None), AccessDecision::Allow, "{}", path);
        }
    }

    #[test]
    fn test_manager_paths() {
        let policy = authorizer(&props("10.0.0.1"));
        let manager = Principal::new("m", "").roles(&[MANAGER_ROLE]);
        let clerk = Principal::new("c", "").roles(&["CLERK"]);

        for path in ["/hotels", "/hotels/7/edit", "/rooms/3", "/management"] {
            assert_eq!(policy.decide(path, Some(&manager), None), AccessDecision::Allow);
            assert_eq!(policy.decide(path, Some(&clerk), None), AccessDecision::Deny);
            assert_eq!(
                policy.decide(path, None, None),
                AccessDecision::ChallengeAuthentication
            );
        }
    }

    #[test]
    fn test_admin_gate_ignores_principal() {
        let policy = authorizer(&props("10.0.0.1"));
        let manager = Principal::new("m", "").roles(&[MANAGER_ROLE]);

        assert_eq!(policy.decide("/admin/users", None, ip("10.0.0.1")), AccessDecision::Allow);
        assert_eq!(
            policy.decide("/admin/users", Some(&manager), ip("10.0.0.2")),
            AccessDecision::Deny
        );
        assert_eq!(policy.decide("/admin", None, None), AccessDecision::Deny);
    }

    #[test]
    fn test_everything_else_needs_login() {
        let policy = authorizer(&props("10.0.0.1"));
        let clerk = Principal::new("c", "").roles(&["CLERK"]);

        assert_eq!(
            policy.decide("/bookings", None, None),
            AccessDecision::ChallengeAuthentication
        );
        assert_eq!(policy.decide("/bookings", Some(&clerk), None), AccessDecision::Allow);
        assert_eq!(policy.decide("/", Some(&clerk), None), AccessDecision::Allow);
    }

    #[test]
    fn test_policy_targets() {
        let policy = authorizer(&props("10.0.0.1"));
        assert_eq!(policy.get_login_url(), "/login");
        assert_eq!(policy.get_access_denied_page(), Some("/errors/forbidden"));
        assert_eq!(form_login().get_username_parameter(), "email");
    }

    #[test]
    fn test_routed_logout_is_permitted() {
        let login = form_login();
        assert_eq!(login.get_logout_url(), LOGOUT_URL);
        assert!(login.permitted_paths().contains(&LOGOUT_URL));
        assert_eq!(
            authorizer(&props("10.0.0.1")).decide(LOGOUT_URL, None, None),
            AccessDecision::Allow
        );
    }
}
