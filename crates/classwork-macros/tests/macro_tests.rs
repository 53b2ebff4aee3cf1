//! Compile-time tests for classwork-macros using trybuild.

#[test]
fn ui_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/stage_basic.rs");
    t.pass("tests/ui/stage_required_only.rs");
    t.pass("tests/ui/stage_no_inputs.rs");
    t.pass("tests/ui/inputs_struct.rs");
}
