//! The configuration bean

use std::sync::Arc;
use tracing::{error, info, warn};

use swagger_model::{Contact, Info, License, Scheme, Swagger};

use super::settings::ApiSettings;
use crate::context::ScanContext;
use crate::reader::{Reader, ReaderConfig};
use crate::resource::ResourceDescriptor;
use crate::scanner::{PackageFilter, ResourceRegistry, ResourceScanner, Scanner};
use crate::utils::{non_blank, split_comma_list, with_leading_slash};

/// Overlays stored settings onto a document
pub trait SwaggerConfig {
    /// Apply schemes, info, host and base path to `swagger`, registering the
    /// configured filter in `context` when it can be instantiated
    fn configure(&self, swagger: Swagger, context: &mut ScanContext) -> Swagger;

    /// Name of the filter to register on configure
    fn filter_name(&self) -> Option<&str>;
}

/// Configuration bean: holds API settings, scans the resource registry and
/// owns the resulting document.
#[derive(Debug, Clone)]
pub struct BeanConfig {
    reader: Reader,
    registry: Arc<ResourceRegistry>,

    resource_package: Option<String>,
    schemes: Option<Vec<String>>,
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
    terms_of_service_url: Option<String>,
    contact: Option<String>,
    license: Option<String>,
    license_url: Option<String>,
    filter: Option<String>,

    info: Option<Info>,
    host: Option<String>,
    base_path: Option<String>,

    pretty_print: bool,
    scan_all_resources: bool,
    ignored_routes: Vec<String>,
}

impl BeanConfig {
    pub fn new(registry: Arc<ResourceRegistry>) -> Self {
        Self {
            reader: Reader::new(Swagger::new()),
            registry,
            resource_package: None,
            schemes: None,
            title: None,
            version: None,
            description: None,
            terms_of_service_url: None,
            contact: None,
            license: None,
            license_url: None,
            filter: None,
            info: None,
            host: None,
            base_path: None,
            pretty_print: false,
            scan_all_resources: false,
            ignored_routes: Vec::new(),
        }
    }

    /// Build a bean from settings, routing every value through its setter
    pub fn from_settings(settings: &ApiSettings, registry: Arc<ResourceRegistry>) -> Self {
        let mut bean = Self::new(registry);

        if let Some(value) = &settings.resource_package {
            bean.set_resource_package(value.as_str());
        }
        if let Some(value) = &settings.schemes {
            bean.set_schemes(value.clone());
        }
        if let Some(value) = &settings.title {
            bean.set_title(value.as_str());
        }
        if let Some(value) = &settings.version {
            bean.set_version(value.as_str());
        }
        if let Some(value) = &settings.description {
            bean.set_description(value.as_str());
        }
        if let Some(value) = &settings.terms_of_service_url {
            bean.set_terms_of_service_url(value.as_str());
        }
        if let Some(value) = &settings.contact {
            bean.set_contact(value.as_str());
        }
        if let Some(value) = &settings.license {
            bean.set_license(value.as_str());
        }
        if let Some(value) = &settings.license_url {
            bean.set_license_url(value.as_str());
        }
        if let Some(value) = &settings.host {
            bean.set_host(value.as_str());
        }
        if let Some(value) = &settings.base_path {
            bean.set_base_path(value);
        }
        if let Some(value) = &settings.filter {
            bean.set_filter(value.as_str());
        }
        if let Some(value) = &settings.pretty_print {
            bean.set_pretty_print(value);
        }
        if let Some(value) = settings.scan_all_resources {
            bean.set_scan_all_resources(value);
        }
        if let Some(value) = &settings.ignored_routes {
            bean.set_ignored_routes(value);
        }

        bean
    }

    pub fn resource_package(&self) -> Option<&str> {
        self.resource_package.as_deref()
    }

    /// Comma-separated package prefixes to restrict scanning to
    pub fn set_resource_package(&mut self, resource_package: impl Into<String>) {
        self.resource_package = Some(resource_package.into());
    }

    pub fn schemes(&self) -> Option<&[String]> {
        self.schemes.as_deref()
    }

    pub fn set_schemes(&mut self, schemes: Vec<String>) {
        self.schemes = Some(schemes);
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn terms_of_service_url(&self) -> Option<&str> {
        self.terms_of_service_url.as_deref()
    }

    pub fn set_terms_of_service_url(&mut self, terms_of_service_url: impl Into<String>) {
        self.terms_of_service_url = Some(terms_of_service_url.into());
    }

    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }

    pub fn set_contact(&mut self, contact: impl Into<String>) {
        self.contact = Some(contact.into());
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn set_license(&mut self, license: impl Into<String>) {
        self.license = Some(license.into());
    }

    pub fn license_url(&self) -> Option<&str> {
        self.license_url.as_deref()
    }

    pub fn set_license_url(&mut self, license_url: impl Into<String>) {
        self.license_url = Some(license_url.into());
    }

    pub fn info(&self) -> Option<&Info> {
        self.info.as_ref()
    }

    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = Some(host.into());
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Name of a filter in the context's filter registry
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = Some(filter.into());
    }

    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Set the base path, prefixing "/" when missing. An empty value keeps
    /// the current base path.
    pub fn set_base_path(&mut self, base_path: &str) {
        if base_path.is_empty() {
            return;
        }
        self.base_path = Some(with_leading_slash(base_path));
    }

    /// Parse a pretty-print flag: "true" in any case enables it, anything
    /// else disables it
    pub fn set_pretty_print(&mut self, pretty_print: &str) {
        self.pretty_print = pretty_print.trim().eq_ignore_ascii_case("true");
    }

    pub fn set_scan_all_resources(&mut self, scan_all_resources: bool) {
        self.scan_all_resources = scan_all_resources;
    }

    /// Add routes from a comma-separated list. Entries are trimmed, blank
    /// entries dropped and duplicates ignored; insertion order is kept. A
    /// trailing "/" is dropped since read paths never end in one.
    pub fn set_ignored_routes(&mut self, ignored_routes: &str) {
        for route in split_comma_list(ignored_routes) {
            let route = match route.trim_end_matches('/') {
                "" => "/".to_string(),
                trimmed => trimmed.to_string(),
            };
            if !self.ignored_routes.contains(&route) {
                self.ignored_routes.push(route);
            }
        }
    }

    /// Always true: the bean scans whenever asked to
    pub fn scan(&self) -> bool {
        true
    }

    /// Scan the registry into the document, then register this bean as the
    /// active scanner in `context`. The flag is accepted for the setter
    /// surface only; every call scans.
    pub fn set_scan(&mut self, _should_scan: bool, context: &mut ScanContext) {
        let classes = self.classes();

        let mut reader = std::mem::take(&mut self.reader);
        reader.read(&classes, self);
        self.reader = reader;

        if let Some(host) = non_blank(self.host.as_deref()) {
            self.reader.swagger_mut().host = Some(host.to_string());
        }
        if let Some(base_path) = non_blank(self.base_path.as_deref()) {
            self.reader.swagger_mut().base_path = Some(base_path.to_string());
        }

        self.update_info_from_config();

        context.set_scanner(Arc::new(self.clone()));
    }

    /// The document built by the last scan
    pub fn swagger(&self) -> &Swagger {
        self.reader.swagger()
    }

    fn update_info_from_config(&mut self) {
        let base = self.reader.swagger().info.clone().unwrap_or_default();
        let info = self.overlay_info(base);

        let swagger = self.reader.swagger_mut();
        add_schemes(swagger, self.schemes.as_deref());
        swagger.info = Some(info.clone());

        self.info = Some(info);
    }

    /// Overlay the configured descriptive fields onto `info`. Blank values
    /// are treated as unset; a license needs both a name and a URL.
    fn overlay_info(&self, mut info: Info) -> Info {
        if let Some(description) = non_blank(self.description.as_deref()) {
            info = info.description(description);
        }
        if let Some(title) = non_blank(self.title.as_deref()) {
            info = info.title(title);
        }
        if let Some(version) = non_blank(self.version.as_deref()) {
            info = info.version(version);
        }
        if let Some(tos) = non_blank(self.terms_of_service_url.as_deref()) {
            info = info.terms_of_service(tos);
        }
        if let Some(contact) = non_blank(self.contact.as_deref()) {
            info = info.contact(Contact::named(contact));
        }
        if let (Some(license), Some(url)) = (
            non_blank(self.license.as_deref()),
            non_blank(self.license_url.as_deref()),
        ) {
            info = info.license(License::new(license, url));
        }
        info
    }
}

fn add_schemes(swagger: &mut Swagger, schemes: Option<&[String]>) {
    for value in schemes.unwrap_or_default() {
        match Scheme::for_value(value) {
            Some(scheme) => swagger.add_scheme(scheme),
            None => warn!("Ignoring unknown scheme: {}", value),
        }
    }
}

impl Scanner for BeanConfig {
    fn classes(&self) -> Vec<ResourceDescriptor> {
        let filter = PackageFilter::parse(self.resource_package.as_deref());
        let classes = ResourceScanner::classes(&self.registry, &filter);
        info!(
            "Scanner found {} of {} registered resources",
            classes.len(),
            self.registry.len()
        );
        classes
    }

    fn pretty_print(&self) -> bool {
        self.pretty_print
    }
}

impl ReaderConfig for BeanConfig {
    fn scan_all_resources(&self) -> bool {
        self.scan_all_resources
    }

    fn ignored_routes(&self) -> &[String] {
        &self.ignored_routes
    }
}

impl SwaggerConfig for BeanConfig {
    fn configure(&self, mut swagger: Swagger, context: &mut ScanContext) -> Swagger {
        add_schemes(&mut swagger, self.schemes.as_deref());

        if let Some(name) = self.filter.as_deref() {
            match context.filters().instantiate(name) {
                Ok(filter) => context.set_filter(filter),
                Err(e) => error!("failed to load filter: {}", e),
            }
        }

        let info = self.overlay_info(self.info.clone().unwrap_or_default());
        let host = non_blank(self.host.as_deref())
            .map(str::to_string)
            .or_else(|| swagger.host.take());
        let base_path = self.base_path.clone().or_else(|| swagger.base_path.take());

        swagger
            .with_info(Some(info))
            .with_host(host)
            .with_base_path(base_path)
    }

    fn filter_name(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}
