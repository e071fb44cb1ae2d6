//! Lookup of endpoint descriptors by logical operation name.

use crate::error::DefinitionError;
use crate::types::{Endpoint, RestApi};

/// An immutable set of API definitions.
///
/// Operations are addressed either as `(api, endpoint)` or by endpoint id
/// alone when the id is unique across all registered APIs.
///
/// ```
/// use probe_define::{AuthStrategy, Registry, RestApi};
///
/// let api = RestApi {
///     name: "Empty".to_string(),
///     description: String::new(),
///     base_url: "https://example.com".to_string(),
///     docs_url: None,
///     auth: AuthStrategy::None,
///     env_auth: vec![],
///     headers: vec![],
///     endpoints: vec![],
/// };
/// let registry = Registry::new(vec![api]).unwrap();
/// assert!(registry.api("Empty").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    apis: Vec<RestApi>,
}

impl Registry {
    /// Builds a registry, validating every API.
    ///
    /// ## Errors
    ///
    /// Returns the first validation failure of any contained API.
    pub fn new(apis: Vec<RestApi>) -> Result<Self, DefinitionError> {
        for api in &apis {
            api.validate()?;
        }
        Ok(Self { apis })
    }

    /// All registered APIs.
    pub fn apis(&self) -> &[RestApi] {
        &self.apis
    }

    /// Finds an API by name.
    pub fn api(&self, name: &str) -> Option<&RestApi> {
        self.apis.iter().find(|api| api.name == name)
    }

    /// Finds an endpoint within a named API.
    pub fn endpoint(&self, api: &str, id: &str) -> Option<&Endpoint> {
        self.api(api).and_then(|api| api.endpoint(id))
    }

    /// Finds an endpoint by id across all APIs.
    ///
    /// Returns `None` when the id is unknown or ambiguous.
    pub fn find(&self, id: &str) -> Option<(&RestApi, &Endpoint)> {
        let mut hits = self
            .apis
            .iter()
            .filter_map(|api| api.endpoint(id).map(|endpoint| (api, endpoint)));
        let first = hits.next()?;
        match hits.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// Iterates `(api name, endpoint)` pairs.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.apis
            .iter()
            .flat_map(|api| api.endpoints.iter().map(move |e| (api.name.as_str(), e)))
    }
}
