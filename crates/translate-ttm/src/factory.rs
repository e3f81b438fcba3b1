// Translation memory service configuration and backend construction
// Origin: ttmserver/TTMServer.php
//
// Services are configured by name; each names a backend `type`. Backend
// types map to constructor functions in a registry, so new backends can be
// added without touching the factory.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::TtmError;
use crate::server::{MemoryTtmServer, QueryOptions, TtmServer};

/// Backend type of the built-in in-memory translation memory.
pub const MEMORY_TYPE: &str = "ttmserver";

/// Configuration of a single service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Backend type tag. Required.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Names of other services that receive copies of writes.
    #[serde(default)]
    pub mirrors: Vec<String>,

    /// A frozen service is read-only.
    #[serde(default)]
    pub frozen: bool,

    /// Minimum quality of returned suggestions.
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Maximum number of returned suggestions.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ServiceConfig {
    /// Query options, falling back to the defaults for unset values.
    pub fn query_options(&self) -> QueryOptions {
        let defaults = QueryOptions::default();
        QueryOptions {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            limit: self.limit.unwrap_or(defaults.limit),
            ..defaults
        }
    }
}

/// All configured services plus the name of the default one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfig>,
}

impl ServicesConfig {
    pub fn from_json(json: &str) -> Result<Self, TtmError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Everything a constructor needs to build one service.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSpec<'a> {
    pub name: &'a str,
    pub config: &'a ServiceConfig,
    /// Validated, de-duplicated mirror names.
    pub mirrors: &'a [String],
}

/// Builds a backend from its service entry.
pub type Constructor = fn(ServiceSpec<'_>) -> Result<Box<dyn TtmServer>, TtmError>;

fn construct_memory(spec: ServiceSpec<'_>) -> Result<Box<dyn TtmServer>, TtmError> {
    let mut server = MemoryTtmServer::new(spec.name)
        .with_options(spec.config.query_options())
        .with_mirrors(spec.mirrors.to_vec());
    server.set_frozen(spec.config.frozen);
    Ok(Box::new(server))
}

/// Creates translation memory backends from service configuration.
pub struct TtmServerFactory {
    config: ServicesConfig,
    constructors: HashMap<String, Constructor>,
}

impl TtmServerFactory {
    /// Create a factory with the built-in backend types registered.
    pub fn new(config: ServicesConfig) -> Self {
        let mut factory = Self {
            config,
            constructors: HashMap::new(),
        };
        factory.register(MEMORY_TYPE, construct_memory);
        factory
    }

    pub fn from_json(json: &str) -> Result<Self, TtmError> {
        Ok(Self::new(ServicesConfig::from_json(json)?))
    }

    /// Register (or replace) the constructor for a backend type.
    pub fn register(&mut self, kind: impl Into<String>, constructor: Constructor) {
        self.constructors.insert(kind.into(), constructor);
    }

    /// Names of all configured services, sorted.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.config.services.keys().map(String::as_str)
    }

    pub fn config(&self) -> &ServicesConfig {
        &self.config
    }

    /// Validated mirrors of a service.
    ///
    /// Every mirror must name a configured service. Duplicates are dropped,
    /// keeping the first occurrence.
    pub fn mirrors(&self, name: &str) -> Result<Vec<String>, TtmError> {
        let service = self
            .config
            .services
            .get(name)
            .ok_or_else(|| TtmError::UnknownService(name.to_string()))?;

        let mut mirrors: Vec<String> = Vec::with_capacity(service.mirrors.len());
        for mirror in &service.mirrors {
            if !self.config.services.contains_key(mirror) {
                return Err(TtmError::InvalidMirror {
                    service: name.to_string(),
                    mirror: mirror.clone(),
                });
            }
            if !mirrors.contains(mirror) {
                mirrors.push(mirror.clone());
            }
        }
        Ok(mirrors)
    }

    /// Build the service called `name`.
    ///
    /// Returns `Ok(None)` when the service's type has no registered
    /// constructor, and an error when the service is unknown, has no type,
    /// or has invalid mirrors.
    pub fn create(&self, name: &str) -> Result<Option<Box<dyn TtmServer>>, TtmError> {
        let config = self
            .config
            .services
            .get(name)
            .ok_or_else(|| TtmError::UnknownService(name.to_string()))?;
        let kind = config
            .kind
            .as_deref()
            .ok_or_else(|| TtmError::MissingType(name.to_string()))?;

        let Some(constructor) = self.constructors.get(kind) else {
            tracing::warn!(service = name, kind, "no backend registered for service type");
            return Ok(None);
        };

        let mirrors = self.mirrors(name)?;
        let server = constructor(ServiceSpec {
            name,
            config,
            mirrors: &mirrors,
        })?;
        tracing::debug!(service = name, kind, "created translation memory service");
        Ok(Some(server))
    }

    /// Build the default service.
    pub fn default_server(&self) -> Result<Box<dyn TtmServer>, TtmError> {
        let name = self.config.default.as_deref().ok_or(TtmError::NoDefault)?;
        self.create(name)?.ok_or_else(|| TtmError::UnsupportedType {
            name: name.to_string(),
            kind: self
                .config
                .services
                .get(name)
                .and_then(|c| c.kind.clone())
                .unwrap_or_default(),
        })
    }
}
