//! Resource registry and scanning
//!
//! The registry plays the role of the classpath: every resource the
//! application knows about is registered here, either in code or from YAML
//! manifests discovered on disk. Scanning selects the marked resources that
//! fall inside the configured packages.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::resource::{ResourceDescriptor, ResourceManifest};

/// Suffixes of manifest files picked up by [`ResourceRegistry::discover`]
const MANIFEST_SUFFIXES: [&str; 2] = [".resources.yaml", ".resources.yml"];

/// Ordered registry of resource descriptors
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: Vec<ResourceDescriptor>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource, replacing any previous one with the same name
    pub fn register(&mut self, resource: ResourceDescriptor) {
        match self.resources.iter_mut().find(|r| r.name == resource.name) {
            Some(existing) => {
                debug!("Replacing registered resource: {}", resource.name);
                *existing = resource;
            }
            None => self.resources.push(resource),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn all(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Load a YAML manifest and register every resource it lists.
    /// Returns the number of resources registered.
    pub fn load_manifest(&mut self, manifest_path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(manifest_path)
            .with_context(|| format!("Failed to read resource manifest {manifest_path:?}"))?;
        let manifest: ResourceManifest = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse resource manifest {manifest_path:?}"))?;

        let count = manifest.resources.len();
        for resource in manifest.resources {
            self.register(resource);
        }

        Ok(count)
    }

    /// Walk a directory and load every resource manifest found in it.
    /// Manifests that fail to load are logged and skipped.
    pub fn discover(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            warn!("Resource directory does not exist: {:?}", dir);
            return Ok(0);
        }

        info!("Scanning resource directory: {:?}", dir);

        let mut loaded = 0;
        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if !is_manifest(path) {
                continue;
            }

            match self.load_manifest(path) {
                Ok(count) => {
                    debug!("Loaded {} resources from {:?}", count, path);
                    loaded += count;
                }
                Err(e) => {
                    warn!("Skipping resource manifest {:?}: {:#}", path, e);
                }
            }
        }

        Ok(loaded)
    }
}

fn is_manifest(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            MANIFEST_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        })
        .unwrap_or(false)
}

/// Package prefixes a scan is restricted to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageFilter {
    prefixes: Vec<String>,
}

impl PackageFilter {
    /// Parse a comma-separated list of package prefixes. Blank entries are
    /// dropped; an empty list accepts every package.
    pub fn parse(packages: Option<&str>) -> Self {
        let prefixes = packages
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Self { prefixes }
    }

    pub fn allows_all(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn accepts(&self, resource: &ResourceDescriptor) -> bool {
        self.allows_all() || self.prefixes.iter().any(|p| resource.in_package(p))
    }
}

/// Something that can produce the set of resources to document
pub trait Scanner: Send + Sync {
    /// Resources carrying a recognised marker, after package filtering
    fn classes(&self) -> Vec<ResourceDescriptor>;

    /// Whether documents produced from this scanner are pretty-printed
    fn pretty_print(&self) -> bool;
}

/// Selects marked resources from a registry
pub struct ResourceScanner;

impl ResourceScanner {
    /// Every marked resource accepted by `filter`, in registry order
    pub fn classes(registry: &ResourceRegistry, filter: &PackageFilter) -> Vec<ResourceDescriptor> {
        registry
            .all()
            .iter()
            .filter(|r| r.is_marked())
            .filter(|r| filter.accepts(r))
            .cloned()
            .collect()
    }
}
