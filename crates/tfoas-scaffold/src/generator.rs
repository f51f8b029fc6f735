use std::collections::BTreeMap;
use std::path::PathBuf;

use minijinja::Environment;
use tfoas_core::naming::{
    PROVIDER_IMPL_FILE, datasource_impl_file, datasource_package, provider_package,
    resource_impl_file, resource_package, title_case,
};
use tfoas_core::spec::ProviderSpecification;
use tfoas_core::{CodeGenerator, GeneratedFile};

use crate::context::{EntityContext, ProviderContext, ScaffoldSettings, StubContext};
use crate::error::ScaffoldError;

const RESOURCE_TEMPLATE: &str = "resource.go.j2";
const DATA_TEMPLATE: &str = "data.go.j2";
const PROVIDER_TEMPLATE: &str = "provider.go.j2";

/// Which implementation stub a render produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubKind {
    Resource,
    DataSource,
    Provider,
}

impl StubKind {
    fn template_name(&self) -> &'static str {
        match self {
            Self::Resource => RESOURCE_TEMPLATE,
            Self::DataSource => DATA_TEMPLATE,
            Self::Provider => PROVIDER_TEMPLATE,
        }
    }
}

/// One render: template, target path relative to the provider root, and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStub {
    pub kind: StubKind,
    pub path: PathBuf,
    pub context: StubContext,
}

/// Lay out every stub for `spec`: a resource and a data-source stub per
/// resource, in spec order, followed by the provider stub.
pub fn plan_stubs(
    spec: &ProviderSpecification,
    settings: &ScaffoldSettings,
) -> Result<Vec<PlannedStub>, ScaffoldError> {
    let mut stubs = Vec::with_capacity(spec.resources.len() * 2 + 1);
    let mut resources = BTreeMap::new();
    let mut data_sources = BTreeMap::new();

    for resource in &spec.resources {
        let raw = resource.name.as_str();
        let name = title_case(raw);
        // The provider maps are keyed by the title-cased name, so `gadget` and
        // `Gadget` collide just like two `gadget`s.
        if resources.contains_key(&name) {
            return Err(ScaffoldError::DuplicateResource(raw.to_string()));
        }

        let resource_pkg = resource_package(raw);
        let datasource_pkg = datasource_package(raw);
        resources.insert(name.clone(), resource_pkg.clone());
        data_sources.insert(name.clone(), datasource_pkg.clone());

        stubs.push(PlannedStub {
            kind: StubKind::Resource,
            path: PathBuf::from(&resource_pkg).join(resource_impl_file(raw)),
            context: StubContext::Entity(EntityContext {
                name: name.clone(),
                package_name: resource_pkg,
                clients: settings.clients.clone(),
            }),
        });
        stubs.push(PlannedStub {
            kind: StubKind::DataSource,
            path: PathBuf::from(&datasource_pkg).join(datasource_impl_file(raw)),
            context: StubContext::Entity(EntityContext {
                name,
                package_name: datasource_pkg,
                clients: settings.clients.clone(),
            }),
        });
    }

    let provider_pkg = provider_package(&spec.provider.name);
    stubs.push(PlannedStub {
        kind: StubKind::Provider,
        path: PathBuf::from(&provider_pkg).join(PROVIDER_IMPL_FILE),
        context: StubContext::Provider(ProviderContext {
            name: title_case(&spec.provider.name),
            package_name: provider_pkg,
            clients: settings.clients.clone(),
            clients_package: settings.provider_root.clone(),
            resources,
            data_sources,
        }),
    });

    Ok(stubs)
}

/// Renders implementation stubs. Templates are compiled once, on construction.
pub struct ScaffoldGenerator {
    env: Environment<'static>,
}

impl ScaffoldGenerator {
    pub fn new() -> Result<Self, ScaffoldError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        for (name, source) in [
            (
                RESOURCE_TEMPLATE,
                include_str!("../templates/resource.go.j2"),
            ),
            (DATA_TEMPLATE, include_str!("../templates/data.go.j2")),
            (
                PROVIDER_TEMPLATE,
                include_str!("../templates/provider.go.j2"),
            ),
        ] {
            env.add_template(name, source)
                .map_err(|source| ScaffoldError::TemplateLoad { name, source })?;
        }

        Ok(Self { env })
    }

    /// Render a single planned stub.
    pub fn render(&self, stub: &PlannedStub) -> Result<GeneratedFile, ScaffoldError> {
        let render_err = |source| ScaffoldError::TemplateRender {
            path: stub.path.clone(),
            source,
        };
        let tmpl = self
            .env
            .get_template(stub.kind.template_name())
            .map_err(render_err)?;
        let content = tmpl.render(&stub.context).map_err(render_err)?;
        log::debug!("rendered {}", stub.path.display());

        Ok(GeneratedFile {
            path: stub.path.clone(),
            content,
        })
    }
}

impl CodeGenerator for ScaffoldGenerator {
    type Config = ScaffoldSettings;
    type Error = ScaffoldError;

    fn generate(
        &self,
        spec: &ProviderSpecification,
        config: &ScaffoldSettings,
    ) -> Result<Vec<GeneratedFile>, ScaffoldError> {
        plan_stubs(spec, config)?
            .iter()
            .map(|stub| self.render(stub))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tfoas_core::spec::{ProviderDescriptor, ResourceDescriptor};

    fn spec(provider: &str, resources: &[&str]) -> ProviderSpecification {
        ProviderSpecification {
            provider: ProviderDescriptor {
                name: provider.to_string(),
            },
            resources: resources
                .iter()
                .map(|name| ResourceDescriptor {
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn settings() -> ScaffoldSettings {
        ScaffoldSettings {
            clients: "example.com/provider/internal/clients".to_string(),
            provider_root: "example.com/provider/internal/provider".to_string(),
        }
    }

    #[test]
    fn test_plan_single_resource() {
        let stubs = plan_stubs(&spec("Widgets", &["gadget"]), &settings()).unwrap();
        let paths: Vec<_> = stubs.iter().map(|s| s.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("resource_gadget/gadget_resource_impl_gen.go"),
                PathBuf::from("datasource_gadget/gadget_data_impl_gen.go"),
                PathBuf::from("provider_widgets/provider_impl_gen.go"),
            ]
        );

        match &stubs[2].context {
            StubContext::Provider(ctx) => {
                assert_eq!(ctx.name, "Widgets");
                assert_eq!(ctx.package_name, "provider_widgets");
                assert_eq!(
                    ctx.resources,
                    BTreeMap::from([("Gadget".to_string(), "resource_gadget".to_string())])
                );
                assert_eq!(
                    ctx.data_sources,
                    BTreeMap::from([("Gadget".to_string(), "datasource_gadget".to_string())])
                );
            }
            other => panic!("expected provider context, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_counts_two_per_resource_plus_provider() {
        let names = ["gadget", "sprocket", "widget_part", "cog"];
        let stubs = plan_stubs(&spec("acme", &names), &settings()).unwrap();
        assert_eq!(stubs.len(), names.len() * 2 + 1);

        let distinct: HashSet<_> = stubs.iter().map(|s| &s.path).collect();
        assert_eq!(distinct.len(), stubs.len());
        assert_eq!(stubs.last().map(|s| s.kind), Some(StubKind::Provider));
    }

    #[test]
    fn test_plan_empty_spec_renders_provider_only() {
        let stubs = plan_stubs(&spec("acme", &[]), &settings()).unwrap();
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].kind, StubKind::Provider);
    }

    #[test]
    fn test_plan_rejects_duplicate_resources() {
        let err = plan_stubs(&spec("acme", &["gadget", "gadget"]), &settings()).unwrap_err();
        assert!(matches!(err, ScaffoldError::DuplicateResource(name) if name == "gadget"));
    }

    #[test]
    fn test_plan_rejects_names_equal_after_title_case() {
        let err = plan_stubs(&spec("acme", &["gadget", "Gadget"]), &settings()).unwrap_err();
        assert!(matches!(err, ScaffoldError::DuplicateResource(name) if name == "Gadget"));

        let err = plan_stubs(&spec("acme", &["pet store", "Pet Store"]), &settings()).unwrap_err();
        assert!(matches!(err, ScaffoldError::DuplicateResource(_)));
    }

    #[test]
    fn test_entity_contexts_share_client_import_path() {
        let stubs = plan_stubs(&spec("acme", &["gadget"]), &settings()).unwrap();
        for stub in &stubs[..2] {
            match &stub.context {
                StubContext::Entity(ctx) => {
                    assert_eq!(ctx.name, "Gadget");
                    assert_eq!(ctx.clients, "example.com/provider/internal/clients");
                }
                other => panic!("expected entity context, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_render_resource_stub() {
        let generator = ScaffoldGenerator::new().unwrap();
        let stubs = plan_stubs(&spec("Widgets", &["gadget"]), &settings()).unwrap();
        let file = generator.render(&stubs[0]).unwrap();

        assert!(file.content.starts_with("// Code generated by tfprovider-oas-gen. DO NOT EDIT."));
        assert!(file.content.contains("package resource_gadget\n"));
        assert!(file.content.contains("clients \"example.com/provider/internal/clients\""));
        assert!(file.content.contains("func NewGadgetResource() resource.Resource {"));
        assert!(file.content.contains("resp.Schema = GadgetResourceSchema(ctx)"));
        assert!(file.content.contains("req.ProviderTypeName + \"_gadget\""));
        assert!(file.content.ends_with("}\n"));
    }

    #[test]
    fn test_render_data_stub() {
        let generator = ScaffoldGenerator::new().unwrap();
        let stubs = plan_stubs(&spec("Widgets", &["gadget"]), &settings()).unwrap();
        let file = generator.render(&stubs[1]).unwrap();

        assert!(file.content.contains("package datasource_gadget\n"));
        assert!(file.content.contains("func NewGadgetDataSource() datasource.DataSource {"));
        assert!(file.content.contains("resp.Schema = GadgetDataSourceSchema(ctx)"));
    }

    #[test]
    fn test_render_provider_registers_every_package() {
        let generator = ScaffoldGenerator::new().unwrap();
        let files = generator
            .generate(&spec("Widgets", &["gadget", "sprocket"]), &settings())
            .unwrap();
        let provider = files.last().unwrap();

        assert_eq!(provider.path, PathBuf::from("provider_widgets/provider_impl_gen.go"));
        let content = &provider.content;
        assert!(content.contains("package provider_widgets\n"));
        assert!(content.contains("\t\"example.com/provider/internal/provider/resource_gadget\"\n"));
        assert!(content.contains("\t\"example.com/provider/internal/provider/datasource_sprocket\"\n"));
        assert!(content.contains("\t\tresource_gadget.NewGadgetResource,\n"));
        assert!(content.contains("\t\tresource_sprocket.NewSprocketResource,\n"));
        assert!(content.contains("\t\tdatasource_gadget.NewGadgetDataSource,\n"));
        assert!(content.contains("resp.TypeName = \"widgets\""));
        // Block tags leave no blank lines inside the import list.
        assert!(!content.contains("clients\"\n\n"));
    }
}
