use super::*;
use parking_lot::Mutex;

use classwork_protocols::error::ValidationError;
use classwork_protocols::lifecycle::hooks;
use classwork_protocols::stage::{ParamSpec, StageManifest};
use classwork_protocols::types::Value;

use crate::class::Mixin;
use crate::compose::Composer;
use crate::namespace::NamespaceResolver;
use crate::registry::{ClassRegistry, StaticModules, DEFAULT_MODULE_EXTENSION};

type Log = Arc<Mutex<Vec<String>>>;

fn composer() -> Composer {
    let registry = ClassRegistry::new(
        Arc::new(NamespaceResolver::new()),
        Arc::new(StaticModules::new()),
        DEFAULT_MODULE_EXTENSION,
    );
    Composer::new(Arc::new(registry))
}

fn recording_stage(
    log: &Log,
    entry: &'static str,
    outcome: ConstructOutcome,
) -> impl Fn(&mut Instance, &Args) -> Result<ConstructOutcome, LifecycleError> + Send + Sync + 'static
{
    let log = log.clone();
    move |_: &mut Instance, _: &Args| {
        log.lock().push(entry.to_string());
        Ok(outcome.clone())
    }
}

fn recording_hook(
    log: &Log,
    label: String,
) -> impl Fn(&mut Instance) -> Result<Value, LifecycleError> + Send + Sync + 'static {
    let log = log.clone();
    move |_: &mut Instance| {
        log.lock().push(label.clone());
        Ok(Value::null())
    }
}

fn recording_mixin(log: &Log, name: &'static str) -> Arc<Mixin> {
    Mixin::builder()
        .named(name)
        .before_construct(recording_hook(log, format!("{name}:before_construct")))
        .after_construct(recording_hook(log, format!("{name}:after_construct")))
        .before_ready(recording_hook(log, format!("{name}:before_ready")))
        .after_ready(recording_hook(log, format!("{name}:after_ready")))
        .build()
}

#[test]
fn test_construct_runs_child_before_parent() {
    let log: Log = Arc::default();
    let parent = ClassDef::builder()
        .named("App.Parent")
        .construct(StageManifest::new(), recording_stage(&log, "parent", ConstructOutcome::Continue))
        .build();
    let child = ClassDef::builder()
        .named("App.Child")
        .extends(parent)
        .construct(StageManifest::new(), recording_stage(&log, "child", ConstructOutcome::Continue))
        .build();

    let instance = Instance::construct(child, ConstructionConfig::new()).unwrap();
    assert_eq!(*log.lock(), ["child", "parent"]);
    assert_eq!(instance.state(), LifecycleState::Constructed);
}

#[test]
fn test_construct_halt_skips_ancestors() {
    let log: Log = Arc::default();
    let parent = ClassDef::builder()
        .named("App.Parent")
        .construct(StageManifest::new(), recording_stage(&log, "parent", ConstructOutcome::Continue))
        .build();
    let child = ClassDef::builder()
        .named("App.Child")
        .extends(parent)
        .construct(
            StageManifest::new(),
            recording_stage(&log, "child", ConstructOutcome::HaltAncestors),
        )
        .build();

    Instance::construct(child, ConstructionConfig::new()).unwrap();
    assert_eq!(*log.lock(), ["child"]);
}

#[test]
fn test_levels_without_stage_are_skipped() {
    let log: Log = Arc::default();
    let base = ClassDef::builder()
        .construct(StageManifest::new(), recording_stage(&log, "base", ConstructOutcome::Continue))
        .build();
    let middle = ClassDef::builder().extends(base).build();
    let child = ClassDef::builder()
        .extends(middle)
        .construct(StageManifest::new(), recording_stage(&log, "child", ConstructOutcome::Continue))
        .build();

    Instance::construct(child, ConstructionConfig::new()).unwrap();
    assert_eq!(*log.lock(), ["child", "base"]);
}

#[test]
fn test_merge_visible_to_ancestor() {
    let seen: Arc<Mutex<Option<String>>> = Arc::default();
    let captured = seen.clone();
    let parent = ClassDef::builder()
        .named("App.Parent")
        .construct(StageManifest::from_names(["mode"]), move |_, args| {
            *captured.lock() = args.str("mode").map(str::to_string);
            Ok(ConstructOutcome::Continue)
        })
        .build();
    let child = ClassDef::builder()
        .named("App.Child")
        .extends(parent)
        .construct(StageManifest::new(), |_, _| {
            Ok(ConstructOutcome::merge([("mode", "fast")]))
        })
        .build();

    let instance = Instance::construct(child, ConstructionConfig::new().with("mode", "slow")).unwrap();
    assert_eq!(seen.lock().as_deref(), Some("fast"));
    assert_eq!(instance.config().get("mode"), Some(Value::from("fast")));
}

#[test]
fn test_stage_receives_resolved_args() {
    let child = ClassDef::builder()
        .named("App.Service")
        .construct(
            StageManifest::new()
                .param(ParamSpec::new("name"))
                .param(ParamSpec::new("port").with_default(8080)),
            |this, args| {
                this.set("name", args.get("name").cloned().unwrap_or_else(Value::null));
                this.set("port", args.i64("port").unwrap_or_default());
                Ok(ConstructOutcome::Continue)
            },
        )
        .build();

    let instance = Instance::construct(child, ConstructionConfig::new().with("name", "api")).unwrap();
    assert_eq!(instance.get("name"), Some(&Value::from("api")));
    assert_eq!(instance.get("port"), Some(&Value::from(8080)));
    assert!(instance.config().has("port"));
}

#[test]
fn test_lazy_config_resolved_with_store() {
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    let class = ClassDef::builder()
        .construct(StageManifest::from_names(["url"]), |this, args| {
            this.set("url", args.str("url").unwrap_or_default());
            Ok(ConstructOutcome::Continue)
        })
        .build();
    let config = ConstructionConfig::new()
        .with("host", "localhost")
        .with_lazy("url", move |store| {
            *counter.lock() += 1;
            let host = store.get("host").and_then(|v| v.as_str().map(str::to_string));
            Value::from(format!("http://{}", host.unwrap_or_default()))
        });

    let instance = Instance::construct(class, config).unwrap();
    assert_eq!(instance.get("url"), Some(&Value::from("http://localhost")));
    assert_eq!(instance.config().get("url"), Some(Value::from("http://localhost")));
    assert_eq!(*calls.lock(), 1);
}

#[test]
fn test_ready_runs_only_most_derived() {
    let log: Log = Arc::default();
    let parent_log = log.clone();
    let child_log = log.clone();
    let parent = ClassDef::builder()
        .named("App.Parent")
        .ready(move |_| {
            parent_log.lock().push("parent".into());
            Ok(())
        })
        .build();
    let child = ClassDef::builder()
        .named("App.Child")
        .extends(parent)
        .ready(move |_| {
            child_log.lock().push("child".into());
            Ok(())
        })
        .build();

    Instance::construct(child, ConstructionConfig::new()).unwrap();
    assert_eq!(*log.lock(), ["child"]);
}

#[test]
fn test_full_state_order() {
    let log: Log = Arc::default();
    let construct_log = log.clone();
    let ready_log = log.clone();
    let base = ClassDef::builder()
        .named("App.Widget")
        .construct(StageManifest::new(), move |_, _| {
            construct_log.lock().push("construct".into());
            Ok(ConstructOutcome::Continue)
        })
        .ready(move |_| {
            ready_log.lock().push("ready".into());
            Ok(())
        })
        .build();
    let class = composer()
        .compose(base, [recording_mixin(&log, "M1"), recording_mixin(&log, "M2")])
        .unwrap();

    Instance::construct(class, ConstructionConfig::new()).unwrap();
    assert_eq!(
        *log.lock(),
        [
            "M1:before_construct",
            "M2:before_construct",
            "construct",
            "M1:after_construct",
            "M2:after_construct",
            "M1:before_ready",
            "M2:before_ready",
            "ready",
            "M1:after_ready",
            "M2:after_ready",
        ]
    );
}

#[test]
fn test_construct_error_aborts_remaining_states() {
    let log: Log = Arc::default();
    let base = ClassDef::builder()
        .named("App.Broken")
        .construct(StageManifest::new(), |_, _| Err(LifecycleError::custom("disk full")))
        .build();
    let class = composer()
        .compose(base, [recording_mixin(&log, "M1")])
        .unwrap();

    let err = Instance::construct(class, ConstructionConfig::new()).unwrap_err();
    assert_eq!(
        err,
        LifecycleError::StageFailed {
            class: "App.Broken".to_string(),
            state: LifecycleState::Construct,
            message: "disk full".to_string(),
        }
    );
    assert_eq!(*log.lock(), ["M1:before_construct"]);
}

#[test]
fn test_hook_error_names_mixin() {
    let mixin = Mixin::builder()
        .named("App.mixin.Faulty")
        .hook(hooks::BEFORE_READY, |_| Err(LifecycleError::custom("nope")))
        .build();
    let class = composer()
        .compose(ClassDef::builder().build(), [mixin])
        .unwrap();

    let err = Instance::construct(class, ConstructionConfig::new()).unwrap_err();
    assert_eq!(
        err,
        LifecycleError::HookFailed {
            mixin: "App.mixin.Faulty".to_string(),
            hook: hooks::BEFORE_READY.to_string(),
            message: "nope".to_string(),
        }
    );
}

#[test]
fn test_validation_error_propagates() {
    let class = ClassDef::builder()
        .named("App.Service")
        .construct(
            StageManifest::new().param(ParamSpec::new("logger").required()),
            |_, _| Ok(ConstructOutcome::Continue),
        )
        .build();

    let err = Instance::construct(class, ConstructionConfig::new()).unwrap_err();
    assert_eq!(
        err,
        LifecycleError::Validation(ValidationError::Missing {
            member: "App.Service::construct".to_string(),
            param: "logger".to_string(),
        })
    );
}
