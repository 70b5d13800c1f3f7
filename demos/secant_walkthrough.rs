//! Secant walkthrough: watch the secant of `x^2` at `a = 1` approach the tangent.
//!
//! Usage:
//! ```text
//! cargo run --example secant_walkthrough                    # x^2, a = 1
//! cargo run --example secant_walkthrough -- "sin(x)" 0.5    # any menu entry
//! RUST_LOG=secant_tangent=trace cargo run --example secant_walkthrough
//! ```

use secant_tangent::{
    Frame, FunctionChoice, Inputs, SymbolicFunction, Visualizer, convergence, estimator,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, DEBUG for the library.
    // Override with RUST_LOG env var (e.g. RUST_LOG=secant_tangent=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("secant_tangent=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let choice = match args.next() {
        Some(text) => SymbolicFunction::parse(&text)?.choice(),
        None => FunctionChoice::default(),
    };
    let a: f64 = match args.next() {
        Some(text) => text.parse()?,
        None => 1.0,
    };

    println!("Available functions\n{}", FunctionChoice::help_listing());

    let mut vis = Visualizer::new();
    for h in [1.0, 0.5, 0.1, 0.01, 0.0] {
        match vis.render(&Inputs::new(choice, a, h)) {
            Frame::Plot(scene) => {
                println!("== {}", scene.title);
                for line in &scene.readout {
                    println!("   {line}");
                }
                for note in &scene.notes {
                    println!("   note: {note}");
                }
            }
            Frame::Unavailable(placeholder) => println!("== {}\n{}", placeholder.title, placeholder.message),
        }
    }

    let frame = vis.render(&Inputs::new(choice, a, 0.5).with_tangent(true));
    if let Some(scene) = frame.scene() {
        println!("\nViewport with tangent: {:?}", scene.viewport);
        // Markers and annotations only; the full curves are long
        let summary = serde_json::json!({
            "title": scene.title,
            "markers": scene.markers,
            "annotations": scene.annotations,
            "viewport": scene.viewport,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    let function = vis.function(choice)?;
    let table = convergence(&function, a, &estimator::DEFAULT_STEPS);
    println!("\nConvergence at a = {a}");
    match &table.tangent {
        Ok(slope) => println!("   tangent slope f'(a) = {slope:.6}"),
        Err(err) => println!("   tangent slope unavailable: {err}"),
    }
    for row in &table.rows {
        match (&row.secant, row.error) {
            (Ok(slope), Some(error)) => {
                println!("   h = {:<6} secant = {slope:.6}  |error| = {error:.2e}", row.h)
            }
            (Ok(slope), None) => println!("   h = {:<6} secant = {slope:.6}", row.h),
            (Err(err), _) => println!("   h = {:<6} {err}", row.h),
        }
    }

    Ok(())
}
