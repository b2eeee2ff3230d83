//! Boundary behaviours called out directly in the design: exit-0, rejecting
//! assignment to `const`, and the two one-line `if` shapes.

use sysyc::error::CompileError;
use sysyc::{compile_to_ir, CompileOptions};
use sysyc_tests::run;

#[test]
fn return_zero_exits_zero() {
    assert_eq!(run("int main() { return 0; }"), 0);
}

#[test]
fn assigning_to_a_const_identifier_aborts_compilation() {
    let result = compile_to_ir("int main() { const int k = 1; k = 2; return k; }", &CompileOptions::default());
    assert!(matches!(result, Err(CompileError::AssignToConst { name }) if name == "k"));
}

#[test]
fn nested_scope_shadowing_restores_the_outer_value_on_exit() {
    assert_eq!(run("int main() { int x = 0; { int x = 1; } return x; }"), 0);
}

#[test]
fn untaken_if_falls_through_to_the_following_statement() {
    assert_eq!(run("int main() { if (0) return 1; return 2; }"), 2);
}

#[test]
fn taken_if_returns_from_the_then_branch() {
    assert_eq!(run("int main() { if (1) return 1; return 2; }"), 1);
}
