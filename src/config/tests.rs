//! Configuration tests

use super::*;
use crate::context::ScanContext;
use crate::resource::{ApiDescriptor, EndpointDescriptor, ResourceDescriptor};
use crate::scanner::{ResourceRegistry, Scanner};
use std::sync::Arc;
use swagger_model::{HttpMethod, Scheme, Swagger};
use tempfile::NamedTempFile;

fn registry() -> Arc<ResourceRegistry> {
    let mut registry = ResourceRegistry::new();
    registry.register(
        ResourceDescriptor::new("com.foo.api", "UserResource")
            .with_api(ApiDescriptor {
                tags: vec!["users".to_string()],
                ..ApiDescriptor::default()
            })
            .at_path("/users")
            .endpoint(EndpointDescriptor::new(HttpMethod::Get, None))
            .endpoint(EndpointDescriptor::new(HttpMethod::Get, Some("/{id}"))),
    );
    registry.register(
        ResourceDescriptor::new("com.foo.admin", "AdminResource")
            .with_api(ApiDescriptor::default())
            .at_path("/admin")
            .endpoint(EndpointDescriptor::new(HttpMethod::Post, Some("/reindex"))),
    );
    registry.register(
        ResourceDescriptor::new("org.bar", "HealthResource")
            .at_path("/health")
            .endpoint(EndpointDescriptor::new(HttpMethod::Get, None)),
    );
    Arc::new(registry)
}

fn bean() -> BeanConfig {
    BeanConfig::new(registry())
}

#[test]
fn test_set_base_path_normalizes() {
    let mut bean = bean();

    bean.set_base_path("api");
    assert_eq!(bean.base_path(), Some("/api"));

    bean.set_base_path("/api");
    assert_eq!(bean.base_path(), Some("/api"));

    bean.set_base_path("");
    assert_eq!(bean.base_path(), Some("/api"));
}

#[test]
fn test_set_ignored_routes_dedups_and_drops_blanks() {
    let mut bean = bean();
    bean.set_ignored_routes("/a, /b,,/a");
    assert_eq!(
        crate::reader::ReaderConfig::ignored_routes(&bean),
        &["/a".to_string(), "/b".to_string()]
    );

    bean.set_ignored_routes(" /c ,/b");
    assert_eq!(
        crate::reader::ReaderConfig::ignored_routes(&bean),
        &["/a".to_string(), "/b".to_string(), "/c".to_string()]
    );
}

#[test]
fn test_set_pretty_print() {
    let mut bean = bean();
    bean.set_pretty_print("TRUE");
    assert!(bean.pretty_print());
    bean.set_pretty_print("yes");
    assert!(!bean.pretty_print());
}

#[test]
fn test_classes_without_resource_package() {
    let bean = bean();
    assert_eq!(bean.classes().len(), 3);
}

#[test]
fn test_classes_with_resource_package() {
    let mut bean = bean();
    bean.set_resource_package("com.foo");
    let names: Vec<_> = bean.classes().into_iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec!["com.foo.api.UserResource", "com.foo.admin.AdminResource"]
    );

    bean.set_resource_package("org.bar,,com.foo.admin");
    assert_eq!(bean.classes().len(), 2);
}

#[test]
fn test_configure_contact_without_license() {
    let mut bean = bean();
    bean.set_contact("Jane");
    let mut context = ScanContext::default();

    let swagger = bean.configure(Swagger::new(), &mut context);
    let info = swagger.info.expect("info set");
    assert_eq!(info.contact.and_then(|c| c.name).as_deref(), Some("Jane"));
    assert!(info.license.is_none());
}

#[test]
fn test_configure_license_needs_name_and_url() {
    let mut bean = bean();
    bean.set_license("MIT");
    let mut context = ScanContext::default();
    let swagger = bean.configure(Swagger::new(), &mut context);
    assert!(swagger.info.and_then(|i| i.license).is_none());

    bean.set_license_url("https://opensource.org/licenses/MIT");
    let swagger = bean.configure(Swagger::new(), &mut context);
    let license = swagger.info.and_then(|i| i.license).expect("license set");
    assert_eq!(license.name, "MIT");
    assert_eq!(license.url.as_deref(), Some("https://opensource.org/licenses/MIT"));
}

#[test]
fn test_configure_with_unknown_filter_still_returns_model() {
    let mut bean = bean();
    bean.set_title("Users API");
    bean.set_host("api.example.com");
    bean.set_base_path("v1");
    bean.set_filter("com.example.DoesNotExist");
    let mut context = ScanContext::default();

    let swagger = bean.configure(Swagger::new(), &mut context);

    assert!(context.active_filter().is_none());
    assert_eq!(swagger.host.as_deref(), Some("api.example.com"));
    assert_eq!(swagger.base_path.as_deref(), Some("/v1"));
    assert_eq!(
        swagger.info.and_then(|i| i.title).as_deref(),
        Some("Users API")
    );
}

#[test]
fn test_configure_registers_known_filter() {
    let mut bean = bean();
    bean.set_filter("hide-internal");
    let mut context = ScanContext::default();

    bean.configure(Swagger::new(), &mut context);
    assert_eq!(
        context.active_filter().map(|f| f.name().to_string()).as_deref(),
        Some("hide-internal")
    );
}

#[test]
fn test_configure_adds_schemes_and_blank_fields_are_absent() {
    let mut bean = bean();
    bean.set_schemes(vec!["https".to_string(), "bogus".to_string(), "http".to_string()]);
    bean.set_title("   ");
    bean.set_version("2.1");
    let mut context = ScanContext::default();

    let swagger = bean.configure(Swagger::new(), &mut context);
    assert_eq!(swagger.schemes, vec![Scheme::Https, Scheme::Http]);
    let info = swagger.info.expect("info set");
    assert!(info.title.is_none());
    assert_eq!(info.version.as_deref(), Some("2.1"));
}

#[test]
fn test_set_scan_builds_document() {
    let mut bean = bean();
    bean.set_title("Users API");
    bean.set_host("api.example.com");
    bean.set_base_path("v1");
    bean.set_schemes(vec!["https".to_string()]);
    bean.set_ignored_routes("/admin");
    let mut context = ScanContext::default();

    bean.set_scan(true, &mut context);

    let swagger = bean.swagger();
    assert_eq!(swagger.host.as_deref(), Some("api.example.com"));
    assert_eq!(swagger.base_path.as_deref(), Some("/v1"));
    assert_eq!(swagger.schemes, vec![Scheme::Https]);
    assert!(swagger.path("/users").is_some());
    assert!(swagger.path("/users/{id}").is_some());
    assert!(swagger.path("/admin/reindex").is_none());
    // path-only resource needs scan-all
    assert!(swagger.path("/health").is_none());
    assert_eq!(
        bean.info().and_then(|i| i.title.as_deref()),
        Some("Users API")
    );
}

#[test]
fn test_set_scan_all_resources_reads_path_only_resources() {
    let mut bean = bean();
    bean.set_scan_all_resources(true);
    let mut context = ScanContext::default();

    bean.set_scan(true, &mut context);
    assert!(bean.swagger().path("/health").is_some());
}

#[test]
fn test_repeated_scan_registers_each_time() {
    let mut bean = bean();
    let mut context = ScanContext::default();

    bean.set_scan(true, &mut context);
    bean.set_scan(true, &mut context);

    assert_eq!(context.scanner_registrations(), 2);
    let scanner = context.active_scanner().expect("scanner registered");
    assert_eq!(scanner.classes().len(), 3);
}

#[test]
fn test_settings_serialization() {
    let settings = Settings::default();
    let yaml = serde_yaml::to_string(&settings).unwrap();
    let parsed: Settings = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(settings.version, parsed.version);
}

#[test]
fn test_settings_from_file_and_bean() {
    let yaml = r#"
version: "1.0"
api:
  title: Users API
  version: "1.0.0"
  base_path: api
  schemes: [https]
  resource_package: com.foo
  pretty_print: true
  ignored_routes: "/admin, /internal"
  filter: hide-internal
resources:
  directories: [./api]
output:
  path: out/swagger.yaml
  format: yaml
"#;
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), yaml).unwrap();

    let settings = Settings::from_file(temp_file.path()).unwrap();
    assert_eq!(settings.api.pretty_print.as_deref(), Some("true"));
    assert_eq!(settings.output.format, crate::output::OutputFormat::Yaml);

    let bean = BeanConfig::from_settings(&settings.api, registry());
    assert_eq!(bean.base_path(), Some("/api"));
    assert_eq!(bean.filter_name(), Some("hide-internal"));
    assert!(bean.pretty_print());
    assert_eq!(bean.classes().len(), 2);
}

#[test]
fn test_settings_validation() {
    let mut settings = Settings::default();
    assert!(settings.validate().is_ok());

    settings.api.schemes = Some(vec!["gopher".to_string()]);
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.version = "2.0".to_string();
    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_save_and_load() {
    let mut settings = Settings::default();
    settings.api.title = Some("Saved".to_string());

    let temp_file = NamedTempFile::new().unwrap();
    settings.save_to_file(temp_file.path()).unwrap();

    let loaded = Settings::from_file(temp_file.path()).unwrap();
    assert_eq!(loaded.api.title.as_deref(), Some("Saved"));
}

#[test]
fn test_configure_keeps_document_host_when_unset() {
    let bean = bean();
    let mut context = ScanContext::default();

    let swagger = bean.configure(
        Swagger::new().with_host(Some("definition.example.com".to_string())),
        &mut context,
    );
    assert_eq!(swagger.host.as_deref(), Some("definition.example.com"));
    assert!(swagger.base_path.is_none());
}

#[test]
fn test_set_scan_false_still_scans_and_registers() {
    let mut bean = bean();
    bean.set_title("Users API");
    let mut context = ScanContext::default();

    bean.set_scan(false, &mut context);

    assert!(!bean.swagger().paths.is_empty());
    assert!(bean.swagger().path("/users").is_some());
    assert_eq!(
        bean.info().and_then(|i| i.title.as_deref()),
        Some("Users API")
    );
    assert_eq!(context.scanner_registrations(), 1);
}

#[test]
fn test_ignored_route_with_trailing_slash() {
    let mut bean = bean();
    bean.set_ignored_routes("/users/, /admin//");
    assert_eq!(
        crate::reader::ReaderConfig::ignored_routes(&bean),
        &["/users".to_string(), "/admin".to_string()]
    );

    let mut context = ScanContext::default();
    bean.set_scan(true, &mut context);
    assert!(bean.swagger().path("/users").is_none());
    assert!(bean.swagger().path("/users/{id}").is_none());
}

#[test]
fn test_settings_resolve_resource_directories_against_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let conf_dir = temp_dir.path().join("conf");
    std::fs::create_dir_all(&conf_dir).unwrap();
    let absolute = temp_dir.path().join("shared");

    let yaml = format!(
        "version: \"1.0\"\nresources:\n  directories: [./resources, \"{}\"]\n",
        absolute.display()
    );
    let path = conf_dir.join("swagger-scan.yaml");
    std::fs::write(&path, yaml).unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(
        settings.resources.directories,
        vec![conf_dir.join("resources"), absolute]
    );
}
