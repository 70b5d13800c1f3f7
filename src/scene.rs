//! Scene description handed to the plotting collaborator
//!
//! A scene is built fresh for every interaction and never mutated afterwards.
//! Samples keep their [`Evaluation`] so a renderer decides explicitly how to
//! draw gaps instead of relying on NaN-skipping.

use crate::evaluator::Evaluation;
use crate::viewport::Viewport;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveRole {
    Function,
    Secant,
    Tangent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: Evaluation,
}

/// Sampled curve; points are ordered by `x`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub role: CurveRole,
    pub label: String,
    pub points: Vec<CurvePoint>,
}

impl Polyline {
    /// Samples with a value, in order
    pub fn defined_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.y.value().map(|y| (p.x, y)))
    }

    /// Maximal runs of consecutive defined samples
    ///
    /// A renderer draws each run as one connected stroke.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.y.value() {
                Some(y) => current.push((point.x, y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    pub fn undefined_count(&self) -> usize {
        self.points.iter().filter(|p| !p.y.is_defined()).count()
    }
}

/// Point marker with its coordinate label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    SecantSlope,
    TangentSlope,
}

/// Text anchored at a plot coordinate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub title: String,
    pub function: Polyline,
    pub secant: Option<Polyline>,
    pub tangent: Option<Polyline>,
    pub markers: Vec<Marker>,
    pub annotations: Vec<Annotation>,
    /// Side-panel lines: current values and the calculus connection
    pub readout: Vec<String>,
    /// Why an overlay is missing, one line per omission
    pub notes: Vec<String>,
    pub viewport: Viewport,
}

impl Scene {
    /// Secant and tangent lines currently present
    pub fn overlays(&self) -> impl Iterator<Item = &Polyline> {
        self.secant.iter().chain(self.tangent.iter())
    }

    /// Base curve followed by the present overlays
    pub fn active_curves(&self) -> impl Iterator<Item = &Polyline> {
        std::iter::once(&self.function).chain(self.overlays())
    }

    pub fn annotation(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.kind == kind)
    }
}

/// Shown in place of a plot when the function cannot be rendered at all
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    pub title: String,
    pub message: String,
}

/// Output of one render cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Frame {
    Plot(Scene),
    Unavailable(Placeholder),
}

impl Frame {
    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Frame::Plot(scene) => Some(scene),
            Frame::Unavailable(_) => None,
        }
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            Frame::Plot(_) => None,
            Frame::Unavailable(placeholder) => Some(placeholder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn line(ys: &[Option<f64>]) -> Polyline {
        Polyline {
            role: CurveRole::Function,
            label: "f(x) = 1/x".to_string(),
            points: ys
                .iter()
                .enumerate()
                .map(|(i, y)| CurvePoint {
                    x: i as f64,
                    y: match y {
                        Some(v) => Evaluation::Defined(*v),
                        None => Evaluation::Undefined(DomainError::DivisionByZero),
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn test_segments_split_at_gaps() {
        let poly = line(&[Some(1.0), Some(2.0), None, Some(3.0), None, None]);
        assert_eq!(
            poly.segments(),
            vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 3.0)]]
        );
        assert_eq!(poly.undefined_count(), 3);
        assert_eq!(poly.defined_points().count(), 3);
    }

    #[test]
    fn test_all_undefined_has_no_segments() {
        assert!(line(&[None, None]).segments().is_empty());
    }
}
