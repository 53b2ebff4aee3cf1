use classwork_macros::stage;

#[stage()]
fn noop() {}

fn main() {
    assert!(noop_manifest().is_empty());
    noop();
}
