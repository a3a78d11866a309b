//! Startup configuration.
//!
//! # Spring Equivalent
//! `Environment` with `@PropertySource("classpath:security.properties")`
//!
//! Properties are looked up in an ordered list of sources; the first source
//! that defines a key wins. The default order is the process environment
//! (`user.ip_address` is read as `USER_IP_ADDRESS`), then `security.properties`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use travel_agency_security::http::error::SecurityError;
use travel_agency_security::http::security::{BCryptPasswordEncoder, IpAddressMatcher};

pub const USER_IP_ADDRESS: &str = "user.ip_address";
pub const SERVER_ADDRESS: &str = "server.address";
pub const BCRYPT_COST: &str = "security.bcrypt.cost";

/// Environment variable naming an alternative properties file.
pub const PROPERTIES_PATH_VAR: &str = "SECURITY_PROPERTIES";
pub const DEFAULT_PROPERTIES_PATH: &str = "security.properties";

/// One provider of configuration values.
pub trait PropertySource {
    fn name(&self) -> &str;
    fn get_property(&self, key: &str) -> Option<String>;
}

/// Process environment with relaxed names: `user.ip_address` -> `USER_IP_ADDRESS`.
pub struct SystemEnvironmentPropertySource;

impl SystemEnvironmentPropertySource {
    pub fn env_name(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect()
    }
}

impl PropertySource for SystemEnvironmentPropertySource {
    fn name(&self) -> &str {
        "systemEnvironment"
    }

    fn get_property(&self, key: &str) -> Option<String> {
        std::env::var(Self::env_name(key)).ok()
    }
}

/// Key/value pairs in Java properties syntax.
pub struct PropertiesFileSource {
    name: String,
    properties: HashMap<String, String>,
}

impl PropertiesFileSource {
    /// A missing file yields an empty source.
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&name, &content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No properties file at {}", name);
                Ok(Self::parse(&name, ""))
            }
            Err(e) => Err(e),
        }
    }

    /// `key=value` or `key: value`; `#` and `!` start comment lines.
    pub fn parse(name: &str, content: &str) -> Self {
        let properties = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .filter_map(|line| {
                let split = line.find(|c: char| c == '=' || c == ':')?;
                let (key, value) = (&line[..split], &line[split + 1..]);
                Some((key.trim().to_string(), value.trim().to_string()))
            })
            .collect();

        PropertiesFileSource {
            name: name.to_string(),
            properties,
        }
    }
}

impl PropertySource for PropertiesFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }
}

/// Ordered property sources.
#[derive(Default)]
pub struct Environment {
    sources: Vec<Box<dyn PropertySource>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment variables, then the properties file named by `SECURITY_PROPERTIES`
    /// (default `security.properties`).
    pub fn standard() -> std::io::Result<Self> {
        let path = std::env::var(PROPERTIES_PATH_VAR)
            .unwrap_or_else(|_| DEFAULT_PROPERTIES_PATH.to_string());
        Ok(Self::new()
            .with_source(SystemEnvironmentPropertySource)
            .with_source(PropertiesFileSource::load(path)?))
    }

    /// Appends a source with lower precedence than those already present.
    pub fn with_source(mut self, source: impl PropertySource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn get_property(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| {
            let value = source.get_property(key)?;
            debug!("Property '{}' resolved from {}", key, source.name());
            Some(value)
        })
    }

    pub fn get_property_or(&self, key: &str, default: &str) -> String {
        self.get_property(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// # Spring Equivalent
    /// `Environment.getRequiredProperty(key)`
    pub fn get_required_property(&self, key: &str) -> Result<String, SecurityError> {
        self.get_property(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| SecurityError::missing(key))
    }
}

/// Everything the security wiring needs, read once at startup.
#[derive(Debug, Clone)]
pub struct SecurityProperties {
    pub admin_ip: IpAddressMatcher,
    pub bcrypt_cost: u32,
    pub bind_address: String,
}

impl SecurityProperties {
    /// Fails when `user.ip_address` is absent or unparsable.
    pub fn from_environment(env: &Environment) -> Result<Self, SecurityError> {
        let raw_ip = env.get_required_property(USER_IP_ADDRESS)?;
        let admin_ip = IpAddressMatcher::parse(&raw_ip)
            .map_err(|_| SecurityError::invalid(USER_IP_ADDRESS, &raw_ip))?;

        let bcrypt_cost = match env.get_property(BCRYPT_COST) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| SecurityError::invalid(BCRYPT_COST, &raw))?,
            None => BCryptPasswordEncoder::DEFAULT_COST,
        };

        let bind_address = env.get_property_or(SERVER_ADDRESS, "127.0.0.1:8080");

        info!("Admin area restricted to {}", admin_ip);

        Ok(SecurityProperties {
            admin_ip,
            bcrypt_cost,
            bind_address,
        })
    }
}
