use std::collections::BTreeMap;

use serde::Serialize;

/// Import paths shared by every stub of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldSettings {
    /// Import path of the generated API client package.
    pub clients: String,
    /// Import path of the provider source root; stub packages live beneath it.
    pub provider_root: String,
}

/// Template data for one resource or data-source stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityContext {
    pub name: String,
    pub package_name: String,
    pub clients: String,
}

/// Template data for the provider stub, including every package it registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderContext {
    pub name: String,
    pub package_name: String,
    pub clients: String,
    pub clients_package: String,
    /// Title-cased resource name → `resource_<name>` package.
    pub resources: BTreeMap<String, String>,
    /// Title-cased resource name → `datasource_<name>` package.
    pub data_sources: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StubContext {
    Entity(EntityContext),
    Provider(ProviderContext),
}
