use classwork_macros::stage;

// Required names count as inputs even when not listed in `requires`
#[stage(requires = "name, name", required = "store")]
pub fn setup() {}

fn main() {
    let manifest = setup_manifest();
    assert_eq!(manifest.names().collect::<Vec<_>>(), ["name", "store"]);
    assert!(manifest.get("store").unwrap().required);
    setup();
}
