//! Source emission
//!
//! Renders stub descriptors as Rust source. Output depends only on the
//! descriptors and the emit options: no timestamps, no absolute paths, no
//! hash-map iteration order. Running synthesis twice over the same catalog
//! therefore yields byte-identical files.
//!
//! Every stub file starts with [`GENERATED_HEADER`] and contains a
//! compile-time assertion that the stub implements its contract trait. An
//! index `mod.rs` declares the stub modules and re-exports the stub types.

use crate::synthesize::{ForwardingMethod, StubDescriptor};
use serde::{Deserialize, Serialize};

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// Code generated by dynrpc-stubgen. DO NOT EDIT.";

/// File name of the generated module index
pub const INDEX_FILE_NAME: &str = "mod.rs";

/// Extension of generated stub files
pub const STUB_EXTENSION: &str = "rs";

/// Default import path of the contract namespace in generated code
pub const DEFAULT_NAMESPACE_IMPORT: &str = "crate::pb";

/// Default alias of the contract namespace in generated code
pub const DEFAULT_NAMESPACE_ALIAS: &str = "pb";

/// Default crate providing `Context`, `DelegateCell` and `Status`
pub const DEFAULT_RUNTIME_CRATE: &str = "dynrpc_runtime";

/// How generated code refers to its collaborators (`[emit]` in `stubgen.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmitOptions {
    /// Path the generated code imports the contract namespace from
    #[serde(default = "default_namespace_import")]
    pub namespace_import: String,
    /// Local name of the contract namespace in generated code
    #[serde(default = "default_namespace_alias")]
    pub namespace_alias: String,
    /// Crate name of the stub runtime
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,
}

fn default_namespace_import() -> String {
    DEFAULT_NAMESPACE_IMPORT.to_string()
}

fn default_namespace_alias() -> String {
    DEFAULT_NAMESPACE_ALIAS.to_string()
}

fn default_runtime_crate() -> String {
    DEFAULT_RUNTIME_CRATE.to_string()
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            namespace_import: default_namespace_import(),
            namespace_alias: default_namespace_alias(),
            runtime_crate: default_runtime_crate(),
        }
    }
}

/// One output file: name relative to the output directory plus contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name, e.g. `widget.rs`
    pub file_name: String,
    /// Full file contents
    pub contents: String,
}

/// Render every stub plus the module index
///
/// Stub artifacts come first, ordered by file name; `mod.rs` is last.
pub fn render_artifacts(descriptors: &[StubDescriptor], options: &EmitOptions) -> Vec<Artifact> {
    let mut sorted: Vec<&StubDescriptor> = descriptors.iter().collect();
    sorted.sort_by(|a, b| a.file_stem.cmp(&b.file_stem));

    let mut artifacts: Vec<Artifact> = sorted
        .iter()
        .map(|descriptor| Artifact {
            file_name: format!("{}.{}", descriptor.file_stem, STUB_EXTENSION),
            contents: render_stub(descriptor, options),
        })
        .collect();
    artifacts.push(Artifact {
        file_name: INDEX_FILE_NAME.to_string(),
        contents: render_index(&sorted),
    });
    artifacts
}

/// Render the source file for one stub
pub fn render_stub(stub: &StubDescriptor, options: &EmitOptions) -> String {
    let alias = options.namespace_alias.as_str();
    let ty = stub.type_name.as_str();
    let contract = format!("{}::{}", alias, stub.contract);

    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str("\n\nuse std::sync::Arc;\n\n");

    let runtime_items = if stub.uses_context() {
        "Context, DelegateCell, Status"
    } else {
        "DelegateCell, Status"
    };
    out.push_str(&format!("use {}::{{{}}};\n\n", options.runtime_crate, runtime_items));
    out.push_str(&namespace_use(&options.namespace_import, alias));
    out.push('\n');

    out.push_str(&format!(
        "/// Activatable stand-in for [`{contract}`].\n\
         ///\n\
         /// Every call fails with `Status::unavailable()` until a server is\n\
         /// installed with [`{ty}::activate_rpc_server`].\n\
         pub struct {ty} {{\n\
         \x20   server: DelegateCell<dyn {contract}>,\n\
         }}\n\n",
    ));

    out.push_str(&format!(
        "const _: fn() = || {{\n\
         \x20   fn assert_server<T: {contract}>() {{}}\n\
         \x20   assert_server::<{ty}>();\n\
         }};\n\n",
    ));

    let accessor_attr = if stub.methods.is_empty() {
        "    #[allow(dead_code)]\n"
    } else {
        ""
    };
    out.push_str(&format!(
        "impl {ty} {{\n\
         \x20   /// Creates a stub with no server installed.\n\
         \x20   pub fn new_stub() -> Self {{\n\
         \x20       {ty} {{\n\
         \x20           server: DelegateCell::new(\"{name}\"),\n\
         \x20       }}\n\
         \x20   }}\n\n\
         \x20   /// Installs `server` as the backend, or clears it when `None`.\n\
         \x20   pub fn activate_rpc_server(&self, server: Option<Arc<dyn {contract}>>) {{\n\
         \x20       self.server.activate(server);\n\
         \x20   }}\n\n\
         {accessor_attr}\
         \x20   fn real_rpc_server(&self) -> Result<Arc<dyn {contract}>, Status> {{\n\
         \x20       self.server.get()\n\
         \x20   }}\n\
         }}\n\n",
        name = stub.contract,
    ));

    out.push_str(&format!(
        "impl Default for {ty} {{\n\
         \x20   fn default() -> Self {{\n\
         \x20       Self::new_stub()\n\
         \x20   }}\n\
         }}\n\n",
    ));

    out.push_str(&format!(
        "impl std::fmt::Debug for {ty} {{\n\
         \x20   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{\n\
         \x20       f.debug_struct(\"{ty}\").field(\"server\", &self.server).finish()\n\
         \x20   }}\n\
         }}\n\n",
    ));

    if stub.methods.is_empty() {
        out.push_str(&format!("impl {contract} for {ty} {{}}\n"));
        return out;
    }

    out.push_str(&format!("impl {contract} for {ty} {{\n"));
    for (i, method) in stub.methods.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_method(&contract, method));
    }
    out.push_str("}\n");
    out
}

fn render_method(contract: &str, method: &ForwardingMethod) -> String {
    let mut signature = String::from("&self");
    // Fully qualified so methods of `Arc` and prelude traits (`clone`, `into`)
    // never capture the call.
    let mut args = vec!["&*server".to_string()];
    for (i, param) in method.params.iter().enumerate() {
        // Contract traits carry no parameter names, so positional ones are used.
        let arg = format!("a{}", i);
        signature.push_str(&format!(", {}: {}", arg, param.rendered));
        args.push(arg);
    }

    format!(
        "    fn {name}({signature}) -> {ret} {{\n\
         \x20       let server = self.real_rpc_server()?;\n\
         \x20       {contract}::{name}({args})\n\
         \x20   }}\n",
        name = method.name,
        ret = method.return_type(),
        args = args.join(", "),
    )
}

fn namespace_use(import: &str, alias: &str) -> String {
    let last = import.rsplit("::").next().unwrap_or(import);
    if last == alias {
        format!("use {};\n", import)
    } else {
        format!("use {} as {};\n", import, alias)
    }
}

fn render_index(stubs: &[&StubDescriptor]) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str("\n\n//! Activatable stubs for every eligible service contract.\n\n");
    for stub in stubs {
        out.push_str(&format!("#[rustfmt::skip]\nmod {};\n", stub.file_stem));
    }
    out.push('\n');
    for stub in stubs {
        out.push_str(&format!("pub use {}::{};\n", stub.file_stem, stub.type_name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesize::{synthesize, SynthOptions};
    use dynrpc_core::{Catalog, Method, ServiceContract};

    fn descriptors() -> Vec<StubDescriptor> {
        let catalog = Catalog::new(
            "acme::pb",
            vec![
                ServiceContract::new(
                    "WidgetServer",
                    vec![
                        Method::new(
                            "get_widget",
                            ["&Context", "&acme::pb::GetWidgetRequest"],
                            ["acme::pb::Widget", "Status"],
                        ),
                        Method::new(
                            "delete_widget",
                            ["&Context", "&acme::pb::DeleteWidgetRequest"],
                            ["Status"],
                        ),
                    ],
                ),
                ServiceContract::new(
                    "HealthServer",
                    vec![Method::new("ping", Vec::<&str>::new(), ["Status"])],
                ),
            ],
        )
        .unwrap();
        synthesize(&catalog, &SynthOptions::default()).unwrap()
    }

    fn artifact<'a>(artifacts: &'a [Artifact], name: &str) -> &'a str {
        &artifacts
            .iter()
            .find(|a| a.file_name == name)
            .unwrap()
            .contents
    }

    #[test]
    fn test_artifact_order() {
        let artifacts = render_artifacts(&descriptors(), &EmitOptions::default());
        let names: Vec<_> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["health.rs", "widget.rs", "mod.rs"]);
    }

    #[test]
    fn test_every_file_has_header() {
        for artifact in render_artifacts(&descriptors(), &EmitOptions::default()) {
            assert!(artifact.contents.starts_with(GENERATED_HEADER), "{}", artifact.file_name);
            assert!(artifact.contents.ends_with('\n'));
        }
    }

    #[test]
    fn test_stub_shape() {
        let artifacts = render_artifacts(&descriptors(), &EmitOptions::default());
        let widget = artifact(&artifacts, "widget.rs");

        assert!(widget.contains("use dynrpc_runtime::{Context, DelegateCell, Status};\n"));
        assert!(widget.contains("use crate::pb;\n"));
        assert!(widget.contains("pub struct Widget {\n    server: DelegateCell<dyn pb::WidgetServer>,\n}"));
        assert!(widget.contains("fn assert_server<T: pb::WidgetServer>() {}"));
        assert!(widget.contains("    assert_server::<Widget>();\n"));
        assert!(widget.contains("server: DelegateCell::new(\"WidgetServer\"),"));
        assert!(widget.contains(
            "pub fn activate_rpc_server(&self, server: Option<Arc<dyn pb::WidgetServer>>) {"
        ));
        assert!(widget.contains("impl pb::WidgetServer for Widget {\n"));
    }

    #[test]
    fn test_forwarding_method_text() {
        let artifacts = render_artifacts(&descriptors(), &EmitOptions::default());
        let widget = artifact(&artifacts, "widget.rs");
        let expected = "    fn get_widget(&self, a0: &Context, a1: &pb::GetWidgetRequest) -> Result<pb::Widget, Status> {\n        \
                        let server = self.real_rpc_server()?;\n        \
                        pb::WidgetServer::get_widget(&*server, a0, a1)\n    \
                        }\n\n    \
                        fn delete_widget(&self, a0: &Context, a1: &pb::DeleteWidgetRequest) -> Result<(), Status> {\n";
        assert!(widget.contains(expected), "{}", widget);
    }

    #[test]
    fn test_context_import_only_when_used() {
        let artifacts = render_artifacts(&descriptors(), &EmitOptions::default());
        let health = artifact(&artifacts, "health.rs");
        assert!(health.contains("use dynrpc_runtime::{DelegateCell, Status};\n"));
        assert!(health.contains("    fn ping(&self) -> Result<(), Status> {\n"));
        assert!(health.contains("        pb::HealthServer::ping(&*server)\n"));
    }

    #[test]
    fn test_index() {
        let artifacts = render_artifacts(&descriptors(), &EmitOptions::default());
        let index = artifact(&artifacts, "mod.rs");
        assert_eq!(
            index,
            "// Code generated by dynrpc-stubgen. DO NOT EDIT.\n\
             \n\
             //! Activatable stubs for every eligible service contract.\n\
             \n\
             #[rustfmt::skip]\n\
             mod health;\n\
             #[rustfmt::skip]\n\
             mod widget;\n\
             \n\
             pub use health::Health;\n\
             pub use widget::Widget;\n"
        );
    }

    #[test]
    fn test_empty_contract() {
        let catalog = Catalog::new("acme::pb", vec![ServiceContract::new("MarkerServer", vec![])])
            .unwrap();
        let descriptors = synthesize(&catalog, &SynthOptions::default()).unwrap();
        let stub = render_stub(&descriptors[0], &EmitOptions::default());
        assert!(stub.contains("    #[allow(dead_code)]\n    fn real_rpc_server"));
        assert!(stub.ends_with("impl pb::MarkerServer for Marker {}\n"));
    }

    #[test]
    fn test_namespace_alias() {
        let catalog = Catalog::new(
            "acme::pb",
            vec![ServiceContract::new(
                "WidgetServer",
                vec![Method::new("get_widget", ["&acme::pb::Id"], ["acme::pb::Widget", "Status"])],
            )],
        )
        .unwrap();
        let synth = SynthOptions {
            namespace_alias: "tf1".to_string(),
            ..SynthOptions::default()
        };
        let options = EmitOptions {
            namespace_import: "acme_proto::terraform1".to_string(),
            namespace_alias: "tf1".to_string(),
            ..EmitOptions::default()
        };
        let descriptors = synthesize(&catalog, &synth).unwrap();
        let stub = render_stub(&descriptors[0], &options);
        assert!(stub.contains("use acme_proto::terraform1 as tf1;\n"));
        assert!(stub.contains("impl tf1::WidgetServer for Widget"));
        assert!(stub.contains("fn get_widget(&self, a0: &tf1::Id) -> Result<tf1::Widget, Status>"));
    }

    #[test]
    fn test_forwarding_is_fully_qualified() {
        let catalog = Catalog::new(
            "acme::pb",
            vec![ServiceContract::new(
                "CacheServer",
                vec![
                    Method::new("clone", ["&Context"], ["acme::pb::Snapshot", "Status"]),
                    Method::new("into", Vec::<&str>::new(), ["Status"]),
                ],
            )],
        )
        .unwrap();
        let descriptors = synthesize(&catalog, &SynthOptions::default()).unwrap();
        let stub = render_stub(&descriptors[0], &EmitOptions::default());
        assert!(stub.contains("        pb::CacheServer::clone(&*server, a0)\n"), "{}", stub);
        assert!(stub.contains("        pb::CacheServer::into(&*server)\n"), "{}", stub);
        assert!(!stub.contains("server.clone("));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render_artifacts(&descriptors(), &EmitOptions::default());
        let b = render_artifacts(&descriptors(), &EmitOptions::default());
        assert_eq!(a, b);
    }
}
