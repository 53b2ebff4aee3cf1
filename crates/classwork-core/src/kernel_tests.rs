use super::*;

use classwork_protocols::stage::{ConstructOutcome, StageManifest};

use crate::class::Mixin;

fn runtime() -> Runtime {
    Runtime::builder()
        .namespace("App", "/srv/app")
        .namespace("App.mixin", "/srv/mixins")
        .value("greeting", "hello")
        .build()
        .unwrap()
}

#[test]
fn test_runtime_creation() {
    let runtime = Runtime::new();
    assert!(runtime.namespaces().is_empty());
    assert!(runtime.registry().is_empty());
    assert!(runtime.container().is_empty());
    assert_eq!(runtime.registry().module_extension(), DEFAULT_MODULE_EXTENSION);
}

#[test]
fn test_builder_wires_components() {
    let runtime = Runtime::builder()
        .module_extension("mod")
        .namespace("App", "/srv/app")
        .value("port", 8080)
        .build()
        .unwrap();

    assert_eq!(runtime.namespaces().len(), 1);
    assert_eq!(runtime.container().resolve("port").unwrap(), Value::from(8080));
    assert_eq!(
        runtime.registry().locate("App.Service").unwrap().path,
        PathBuf::from("/srv/app/Service.mod")
    );
}

#[test]
fn test_builder_rejects_empty_prefix() {
    let result = Runtime::builder().namespace(".", "/srv").build();
    assert!(matches!(result, Err(RuntimeError::Namespace(_))));
}

#[test]
fn test_define_module_uses_most_specific_namespace() {
    let runtime = runtime();
    let path = runtime
        .define_module("App.mixin.Observable", Mixin::builder().build())
        .unwrap();
    assert_eq!(path, PathBuf::from("/srv/mixins/Observable.class"));
    assert!(runtime.modules().contains(&path));
}

#[test]
fn test_end_to_end_pipeline() {
    let runtime = runtime();
    runtime
        .define_module(
            "App.Greeter",
            ClassDef::builder()
                .construct(StageManifest::from_names(["greeting", "name"]), |this, args| {
                    let text = format!(
                        "{}, {}",
                        args.str("greeting").unwrap_or("hi"),
                        args.str("name").unwrap_or("world")
                    );
                    this.set("text", text);
                    Ok(ConstructOutcome::Continue)
                })
                .build(),
        )
        .unwrap();
    runtime
        .define_module(
            "App.mixin.Loud",
            Mixin::builder()
                .method("shout", |this, _| {
                    let text = this.get("text").and_then(Value::as_str).unwrap_or_default();
                    Ok(Value::from(text.to_uppercase()))
                })
                .build(),
        )
        .unwrap();

    let class = runtime
        .compose_as("App.LoudGreeter", "App.Greeter", ["App.mixin.Loud"])
        .unwrap();
    let mut instance = runtime
        .instantiate("App.LoudGreeter", ConstructionConfig::new().with("name", "ada"))
        .unwrap();

    assert!(Arc::ptr_eq(instance.class(), &class));
    assert!(instance.instance_of("App.Greeter"));
    assert!(instance.has_mixin("App.mixin.Loud"));
    assert_eq!(instance.get("text"), Some(&Value::from("hello, ada")));
    assert_eq!(instance.call("shout", &[]).unwrap(), Value::from("HELLO, ADA"));

    let child = runtime
        .instantiate_child(&instance, "App.Greeter", ConstructionConfig::new())
        .unwrap();
    assert_eq!(child.get("text"), Some(&Value::from("hello, world")));
    assert_eq!(child.parent().map(|p| p.instance_id), Some(instance.id()));
}

#[test]
fn test_factory_module_loads_parent() {
    let runtime = runtime();
    runtime
        .define_module("App.Base", ClassDef::builder().static_value("kind", "base").build())
        .unwrap();
    runtime
        .define_module_with("App.Derived", |registry| {
            let parent = registry.load_class("App.Base")?;
            Ok(ClassDef::builder().extends(parent).build().into())
        })
        .unwrap();

    let derived = runtime.load("App.Derived").unwrap();
    let derived = derived.as_class().unwrap();
    assert!(derived.is_subclass_of("App.Base"));
    assert_eq!(derived.static_value("kind"), Some(Value::from("base")));
}

#[test]
fn test_runtimes_are_independent() {
    let first = runtime();
    let second = runtime();
    first.container().register_value("only_first", true);
    first
        .define_module("App.Thing", ClassDef::builder().build())
        .unwrap();

    assert!(!second.container().has("only_first"));
    assert!(first.load("App.Thing").is_ok());
    assert!(second.load("App.Thing").is_err());
}
