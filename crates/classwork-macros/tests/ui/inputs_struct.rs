use classwork_macros::inputs;

#[allow(dead_code)]
#[inputs]
struct ServerInputs {
    logger: String,
    port: Option<u16>,
    r#type: std::option::Option<String>,
}

fn main() {
    let manifest = ServerInputs::manifest();
    assert_eq!(manifest.names().collect::<Vec<_>>(), ["logger", "port", "type"]);
    assert!(manifest.get("logger").unwrap().required);
    assert!(!manifest.get("port").unwrap().required);
    assert!(!manifest.get("type").unwrap().required);
}
