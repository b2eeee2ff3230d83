//! Table-driven checks that every operator in the grammar folds correctly
//! at compile time when both operands are literals.

use rstest::rstest;
use sysyc_tests::run;

#[rstest]
#[case("return 2 + 3;", 5)]
#[case("return 2 - 3;", -1)]
#[case("return 2 * 3;", 6)]
#[case("return 7 / 2;", 3)]
#[case("return 7 % 2;", 1)]
#[case("return 1 < 2;", 1)]
#[case("return 2 < 1;", 0)]
#[case("return 1 > 2;", 0)]
#[case("return 1 <= 1;", 1)]
#[case("return 1 >= 2;", 0)]
#[case("return 1 == 1;", 1)]
#[case("return 1 != 1;", 0)]
#[case("return 1 && 0;", 0)]
#[case("return 0 || 1;", 1)]
#[case("return -5;", -5)]
#[case("return !0;", 1)]
#[case("return !5;", 0)]
#[case("return +5;", 5)]
fn binary_and_unary_operators_fold_to_the_expected_value(#[case] body: &str, #[case] expected: i32) {
    let src = format!("int main() {{ {body} }}");
    assert_eq!(run(&src), expected);
}

#[test]
fn negative_divisors_truncate_toward_zero_like_riscv_div() {
    assert_eq!(run("int main() { return -7 / 2; }"), -3);
    assert_eq!(run("int main() { return -7 % 2; }"), -1);
}

#[test]
fn wrapping_arithmetic_matches_two_s_complement_overflow() {
    assert_eq!(run("int main() { return 2147483647 + 1; }"), i32::MIN);
}
