#![allow(clippy::unwrap_used, reason = "Standard test relaxations")]

use crate::{
    DomainError, Evaluation, FunctionChoice, SymbolicFunction, Visualizer, VisualizerConfig,
    convergence, evaluate, evaluate_derivative_many, evaluate_many, estimator, secant, tangent,
};
use approx::assert_abs_diff_eq;

fn f(text: &str) -> SymbolicFunction {
    SymbolicFunction::parse(text).unwrap()
}

#[test]
fn test_domain_violations_are_undefined() {
    assert_eq!(
        evaluate(&f("1/x"), 0.0),
        Evaluation::Undefined(DomainError::DivisionByZero)
    );
    assert_eq!(
        evaluate(&f("log(x)"), -1.0),
        Evaluation::Undefined(DomainError::LogOfNonPositive)
    );
    assert_eq!(
        evaluate(&f("sqrt(x)"), -4.0),
        Evaluation::Undefined(DomainError::NegativeSqrt)
    );
    assert_eq!(
        evaluate(&f("x^2"), f64::NAN),
        Evaluation::Undefined(DomainError::NonFiniteInput)
    );
}

#[test]
fn test_evaluate_many_preserves_order() {
    let recip = f("1/x");
    let values = evaluate_many(&recip, &[2.0, 0.0, -4.0]);
    assert_eq!(
        values,
        [
            Evaluation::Defined(0.5),
            Evaluation::Undefined(DomainError::DivisionByZero),
            Evaluation::Defined(-0.25),
        ]
    );

    let slopes = evaluate_derivative_many(&f("x^2"), &[-1.0, 0.0, 3.0]);
    assert_eq!(
        slopes,
        [
            Evaluation::Defined(-2.0),
            Evaluation::Defined(0.0),
            Evaluation::Defined(6.0)
        ]
    );
}

#[test]
fn test_exponential_overflow_is_non_finite() {
    assert_eq!(
        evaluate(&f("exp(x)"), 1000.0),
        Evaluation::Undefined(DomainError::NonFinite)
    );
}

#[test]
fn test_evaluation_is_deterministic() {
    for choice in FunctionChoice::ALL {
        let func = SymbolicFunction::from_choice(choice).unwrap();
        for x in [-2.0, 0.0, 0.5, 1.0, 4.0] {
            assert_eq!(func.evaluate(x), func.evaluate(x), "{choice} at {x}");
        }
    }
}

#[test]
fn test_square_secant_converges_to_two() {
    let sq = f("x^2");
    let table = convergence(&sq, 1.0, &estimator::DEFAULT_STEPS);
    let expected = [2.1, 2.01, 2.001];
    for (row, want) in table.rows.iter().zip(expected) {
        assert_abs_diff_eq!(row.secant.clone().unwrap(), want, epsilon = 1e-9);
    }
    assert_eq!(tangent(&sq, 1.0).unwrap().slope, 2.0);
    assert!(table.is_converging(1e-12));
}

#[test]
fn test_zero_step_undefined_for_every_function() {
    for choice in FunctionChoice::ALL {
        let func = SymbolicFunction::from_choice(choice).unwrap();
        for a in [-3.0, 0.0, 1.0, 2.5] {
            assert!(secant(&func, a, 0.0).is_err(), "{choice} at {a}");
        }
    }
}

#[test]
fn test_derivative_texts() {
    assert_eq!(f("x^2").derivative().to_string(), "2*x");
    assert_eq!(f("x^3 - 2*x").derivative().to_string(), "3*x^2 - 2");
    assert_eq!(f("2*x + 1").derivative().to_string(), "2");
    assert_eq!(f("log(x)").derivative().to_string(), "1 / x");
    assert_eq!(f("1/x").derivative().to_string(), "-1 / x^2");
}

#[test]
fn test_custom_config_shapes_scene() {
    let config = VisualizerConfig::new()
        .with_domain(0.5, 2.0)
        .with_samples(4)
        .with_overlay_samples(3)
        .with_overlay_extension(0.0)
        .with_slope_precision(2);
    let mut vis = Visualizer::with_config(config).unwrap();
    let frame = vis.render(&crate::Inputs::default());
    let scene = frame.scene().unwrap();

    let xs: Vec<f64> = scene.function.points.iter().map(|p| p.x).collect();
    assert_eq!(xs, [0.5, 1.0, 1.5, 2.0]);
    let secant = scene.secant.as_ref().unwrap();
    assert_eq!(secant.points.len(), 3);
    assert_eq!(secant.points[0].x, 1.0);
    assert_eq!(secant.points[2].x, 1.5);
    assert_eq!(secant.label, "Secant line (slope = 2.50)");
}

#[test]
fn test_help_listing_groups_families() {
    let listing = FunctionChoice::help_listing();
    let poly = listing.find("Polynomial").unwrap();
    let trans = listing.find("Transcendental").unwrap();
    assert!(poly < trans);
    for choice in FunctionChoice::ALL {
        assert!(listing.contains(choice.label()), "missing {choice}");
    }
}
