use classwork_core::{Args, ClassDef, Instance};
use classwork_macros::stage;
use classwork_protocols::{ConstructOutcome, LifecycleError};

#[stage(requires = "logger, port", required = "logger")]
fn construct_server(this: &mut Instance, args: &Args) -> Result<ConstructOutcome, LifecycleError> {
    this.set("port", args.i64("port").unwrap_or(80));
    Ok(ConstructOutcome::Continue)
}

fn main() {
    let manifest = construct_server_manifest();
    assert_eq!(manifest.names().collect::<Vec<_>>(), ["logger", "port"]);
    assert!(manifest.get("logger").unwrap().required);
    assert!(!manifest.get("port").unwrap().required);

    let class = ClassDef::builder()
        .named("App.Server")
        .construct(construct_server_manifest(), construct_server)
        .build();
    assert_eq!(class.dependency_set(), ["logger", "port"]);
}
