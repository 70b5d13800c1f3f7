//! Property-Based and Fuzz Testing
//!
//! Uses quickcheck for property-based testing of:
//! - Parser robustness (fuzz testing)
//! - Evaluation never leaking non-finite values
//! - Viewport containment and secant convergence

#![allow(clippy::unwrap_used, reason = "Standard test relaxations")]

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

use crate::ParseError;
use crate::parser::{self, ParseLimits};
use crate::{Evaluation, FunctionChoice, Inputs, SymbolicFunction, Visualizer, convergence};

// ============================================================
// PART 1: GENERATORS
// ============================================================

/// Generate random expression strings in `x` for fuzz testing
fn random_expr_string(g: &mut Gen) -> String {
    let depth = g.size().min(4); // Limit depth to avoid stack overflow
    gen_expr_string_recursive(g, depth)
}

fn gen_expr_string_recursive(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        match u8::arbitrary(g) % 4 {
            0 => {
                let n: f64 = f64::arbitrary(g);
                if n.is_finite() && n.abs() < 1e10 {
                    format!("{:.4}", n)
                } else {
                    "1.0".to_string()
                }
            }
            1 => "pi".to_string(),
            _ => "x".to_string(),
        }
    } else {
        match u8::arbitrary(g) % 10 {
            0..=2 => {
                let ops = ["+", "-", "*", "/", "^"];
                let op = ops[usize::arbitrary(g) % ops.len()];
                let left = gen_expr_string_recursive(g, depth - 1);
                let right = gen_expr_string_recursive(g, depth - 1);
                format!("({} {} {})", left, op, right)
            }
            3..=5 => {
                let fns = ["sin", "cos", "tan", "exp", "ln", "log", "sqrt"];
                let f = fns[usize::arbitrary(g) % fns.len()];
                let arg = gen_expr_string_recursive(g, depth - 1);
                format!("{}({})", f, arg)
            }
            6 => {
                let arg = gen_expr_string_recursive(g, depth - 1);
                format!("-({})", arg)
            }
            _ => gen_expr_string_recursive(g, depth - 1),
        }
    }
}

/// Map `n` uniformly onto `[lo, hi]`
fn in_range(n: u16, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * f64::from(n) / f64::from(u16::MAX)
}

fn choice_at(index: u8) -> FunctionChoice {
    FunctionChoice::ALL[usize::from(index) % FunctionChoice::ALL.len()]
}

// ============================================================
// PART 2: PARSER FUZZ TESTS
// ============================================================

#[cfg(test)]
mod parser_fuzz_tests {
    use super::*;

    /// Property: Parser should never panic on arbitrary input
    #[test]
    fn test_parser_never_panics_on_random_input() {
        fn prop_parser_no_panic(input: String) -> TestResult {
            let _ = parser::parse(&input, "x", ParseLimits::default());
            let _ = SymbolicFunction::parse(&input);
            TestResult::passed()
        }
        QuickCheck::new()
            .tests(1000)
            .max_tests(2000)
            .quickcheck(prop_parser_no_panic as fn(String) -> TestResult);
    }

    /// Property: generated expressions parse, differentiate and evaluate
    /// without panicking, and defined values are always finite
    #[test]
    fn test_generated_expressions_evaluate_cleanly() {
        fn prop_generated_expr() -> bool {
            let mut g = Gen::new(10);
            let text = random_expr_string(&mut g);
            let Ok(expr) = parser::parse(&text, "x", ParseLimits::default()) else {
                return true;
            };
            let Ok(derivative) = expr.derive("x") else {
                return true;
            };
            [-2.5, -1.0, 0.0, 0.5, 3.0].iter().all(|&x| {
                let value = Evaluation::from(expr.eval_at(x));
                let slope = Evaluation::from(derivative.eval_at(x));
                [value, slope]
                    .iter()
                    .all(|e| e.value().is_none_or(f64::is_finite))
            })
        }
        QuickCheck::new()
            .tests(500)
            .quickcheck(prop_generated_expr as fn() -> bool);
    }

    /// Fuzz test with specifically crafted edge cases
    #[test]
    fn test_parser_edge_cases() {
        let edge_cases = [
            "",
            "   ",
            "()",
            "((()))",
            "+++",
            "---x",
            "1+",
            "+1",
            "sin()",
            "sin(x,x)",
            "1..2",
            "1e999999",
            "1e-999999",
            "x^x^x",
            "((((x))))",
            "sin(cos(tan(exp(ln(x)))))",
            "1/0",
            "0/0",
            "(-0)",
            "x**",
            "**x",
            "∞",
            "π",
        ];

        for case in &edge_cases {
            let _ = parser::parse(case, "x", ParseLimits::default());
            let _ = SymbolicFunction::parse(case);
        }
    }

    /// Deeply nested input is rejected by the limits, not by the stack
    #[test]
    fn test_parser_deep_nesting() {
        let mut expr = "x".to_string();
        for _ in 0..50 {
            expr = format!("({}+1)", expr);
        }
        let result = parser::parse(&expr, "x", ParseLimits::default());
        assert!(result.is_ok(), "Deep nesting should parse: {:?}", result.err());

        let expr = "(".repeat(100_000) + "x" + &")".repeat(100_000);
        assert_eq!(
            parser::parse(&expr, "x", ParseLimits::default()),
            Err(ParseError::MaxDepthExceeded)
        );
        let chain = "x".to_string() + &"^x".repeat(100_000);
        assert_eq!(
            parser::parse(&chain, "x", ParseLimits::default()),
            Err(ParseError::MaxDepthExceeded)
        );
    }
}

// ============================================================
// PART 3: EVALUATION AND SCENE PROPERTIES
// ============================================================

#[cfg(test)]
mod scene_properties {
    use super::*;

    /// Property: evaluation never returns a non-finite defined value,
    /// whatever the input (NaN and infinities included)
    #[test]
    fn test_evaluation_never_leaks_non_finite() {
        fn prop(index: u8, x: f64) -> bool {
            let f = SymbolicFunction::from_choice(choice_at(index)).unwrap();
            [f.evaluate(x), f.evaluate_derivative(x)]
                .iter()
                .all(|e| e.value().is_none_or(f64::is_finite))
        }
        QuickCheck::new()
            .tests(1000)
            .quickcheck(prop as fn(u8, f64) -> bool);
    }

    /// Property: every sample of every active curve and every marker lies
    /// inside the viewport, and the viewport is never degenerate
    #[test]
    fn test_viewport_contains_all_active_samples() {
        fn prop(index: u8, a: u16, h: u16, show_tangent: bool) -> TestResult {
            let inputs = Inputs::new(choice_at(index), in_range(a, -4.0, 4.0), in_range(h, -1.0, 1.0))
                .with_tangent(show_tangent);
            let frame = Visualizer::new().render(&inputs);
            let Some(scene) = frame.scene() else {
                return TestResult::failed();
            };
            let vp = scene.viewport;
            let curves_inside = scene
                .active_curves()
                .flat_map(|c| c.defined_points())
                .all(|(x, y)| vp.contains(x, y));
            let markers_inside = scene.markers.iter().all(|m| vp.contains(m.x, m.y));
            TestResult::from_bool(
                curves_inside && markers_inside && vp.x_min < vp.x_max && vp.y_min < vp.y_max,
            )
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(u8, u16, u16, bool) -> TestResult);
    }

    /// Property: for functions whose secant error is monotone in `h`, the
    /// error at h=0.001 never exceeds the error at h=0.1
    #[test]
    fn test_secant_error_shrinks_with_h() {
        fn prop(index: u8, a: u16) -> bool {
            let smooth = [
                FunctionChoice::Square,
                FunctionChoice::ShiftedSquare,
                FunctionChoice::Linear,
                FunctionChoice::Exponential,
            ];
            let choice = smooth[usize::from(index) % smooth.len()];
            let f = SymbolicFunction::from_choice(choice).unwrap();
            let table = convergence(&f, in_range(a, -3.0, 3.0), &[0.1, 0.001]);
            let coarse = table.rows[0].error.unwrap();
            let fine = table.rows[1].error.unwrap();
            fine <= coarse + 1e-6
        }
        QuickCheck::new()
            .tests(300)
            .quickcheck(prop as fn(u8, u16) -> bool);
    }

    /// Property: identical inputs give identical frames
    #[test]
    fn test_render_is_deterministic() {
        fn prop(index: u8, a: u16, h: u16, show_tangent: bool) -> bool {
            let inputs = Inputs::new(choice_at(index), in_range(a, -4.0, 4.0), in_range(h, -1.0, 1.0))
                .with_tangent(show_tangent);
            let mut session = Visualizer::new();
            let first = session.render(&inputs);
            let second = session.render(&inputs);
            first == second && first == crate::render(&inputs)
        }
        QuickCheck::new()
            .tests(100)
            .quickcheck(prop as fn(u8, u16, u16, bool) -> bool);
    }

    /// Property: the symbolic derivative agrees with a central difference
    /// on `[0.5, 3]`, where every menu entry is smooth
    #[test]
    fn test_derivative_matches_central_difference() {
        fn prop(index: u8, x: u16) -> bool {
            let f = SymbolicFunction::from_choice(choice_at(index)).unwrap();
            let x = in_range(x, 0.5, 3.0);
            let step = 1e-5;
            let ahead = f.evaluate(x + step).value().unwrap();
            let behind = f.evaluate(x - step).value().unwrap();
            let numeric = (ahead - behind) / (2.0 * step);
            let exact = f.evaluate_derivative(x).value().unwrap();
            (numeric - exact).abs() <= 1e-4 * exact.abs().max(1.0)
        }
        QuickCheck::new()
            .tests(500)
            .quickcheck(prop as fn(u8, u16) -> bool);
    }
}
