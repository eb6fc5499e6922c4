//! Static path-to-formula table.
//!
//! Most routes declare a fixed list of inputs: the dispatcher parses them in
//! order, echoes them into the result and hands the values to the formula.
//! `/pythag` and `/average` take a variable input set and parse for themselves.

use crate::core::formulas;
use crate::domain::model::{ComputationResult, QueryParams};
use crate::utils::error::{MathApiError, Result};
use serde::Serialize;

type Outputs = Vec<(&'static str, f64)>;

#[derive(Clone, Copy)]
enum Evaluator {
    Fixed(fn(&[f64]) -> Result<Outputs>),
    Custom(fn(&QueryParams) -> Result<ComputationResult>),
}

#[derive(Clone, Copy, Serialize)]
pub struct Formula {
    pub path: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub summary: &'static str,
    #[serde(skip)]
    evaluator: Evaluator,
}

impl std::fmt::Debug for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formula")
            .field("path", &self.path)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .finish()
    }
}

impl Formula {
    const fn fixed(
        path: &'static str,
        inputs: &'static [&'static str],
        outputs: &'static [&'static str],
        summary: &'static str,
        compute: fn(&[f64]) -> Result<Outputs>,
    ) -> Self {
        Self {
            path,
            inputs,
            outputs,
            summary,
            evaluator: Evaluator::Fixed(compute),
        }
    }

    const fn custom(
        path: &'static str,
        inputs: &'static [&'static str],
        outputs: &'static [&'static str],
        summary: &'static str,
        compute: fn(&QueryParams) -> Result<ComputationResult>,
    ) -> Self {
        Self {
            path,
            inputs,
            outputs,
            summary,
            evaluator: Evaluator::Custom(compute),
        }
    }

    pub fn evaluate(&self, params: &QueryParams) -> Result<ComputationResult> {
        let result = match self.evaluator {
            Evaluator::Fixed(compute) => {
                let mut result = ComputationResult::new();
                let mut values = Vec::with_capacity(self.inputs.len());
                for &name in self.inputs {
                    let number = params.number(name)?;
                    values.push(number.value());
                    result = result.input(name, number);
                }
                compute(&values)?
                    .into_iter()
                    .fold(result, |acc, (name, value)| acc.output(name, value))
            }
            Evaluator::Custom(compute) => compute(params)?,
        };
        result.ensure_finite()
    }
}

/// Any two of `a`, `b`, `c` with `c` the hypotenuse; returns all three.
fn solve_pythagorean(params: &QueryParams) -> Result<ComputationResult> {
    let a = params.optional_number("a")?;
    let b = params.optional_number("b")?;
    let c = params.optional_number("c")?;

    let (a, b, c) = match (a, b, c) {
        (Some(a), Some(b), None) => (a.value(), b.value(), formulas::hypotenuse(a.value(), b.value())),
        (Some(a), None, Some(c)) => (a.value(), formulas::missing_leg(c.value(), a.value())?, c.value()),
        (None, Some(b), Some(c)) => (formulas::missing_leg(c.value(), b.value())?, b.value(), c.value()),
        _ => {
            return Err(MathApiError::InvalidParameterSet {
                message: "exactly two of 'a', 'b' and 'c' must be given".to_string(),
            })
        }
    };

    Ok(ComputationResult::new()
        .output("a", a)
        .output("b", b)
        .output("c", c))
}

fn average(params: &QueryParams) -> Result<ComputationResult> {
    let nums = params.number_list("nums")?;
    let values: Vec<f64> = nums.iter().map(|n| n.value()).collect();
    let avg = formulas::mean(&values)?;
    Ok(ComputationResult::new()
        .input_list("nums", nums)
        .output("avg", avg))
}

const FORMULAS: &[Formula] = &[
    Formula::fixed("/area/square", &["s"], &["a"], "Area of a square: a = s^2", |v| {
        Ok(vec![("a", formulas::square_area(v[0]))])
    }),
    Formula::fixed("/area/rectangle", &["l", "w"], &["a"], "Area of a rectangle: a = l*w", |v| {
        Ok(vec![("a", formulas::rectangle_area(v[0], v[1]))])
    }),
    Formula::fixed("/area/triangle", &["b", "h"], &["a"], "Area of a triangle: a = b*h/2", |v| {
        Ok(vec![("a", formulas::triangle_area(v[0], v[1]))])
    }),
    Formula::fixed(
        "/area/heron",
        &["x", "y", "z"],
        &["s", "a"],
        "Heron's formula from three side lengths",
        |v| {
            let (s, a) = formulas::heron_area(v[0], v[1], v[2])?;
            Ok(vec![("s", s), ("a", a)])
        },
    ),
    Formula::fixed("/area/parallelogram", &["b", "h"], &["a"], "Area of a parallelogram: a = b*h", |v| {
        Ok(vec![("a", formulas::parallelogram_area(v[0], v[1]))])
    }),
    Formula::fixed("/area/circle", &["r"], &["a"], "Area of a circle: a = pi*r^2", |v| {
        Ok(vec![("a", formulas::circle_area(v[0]))])
    }),
    Formula::fixed(
        "/area/trapezoid",
        &["h", "b1", "b2"],
        &["a"],
        "Area of a trapezoid: a = (b1+b2)/2*h",
        |v| Ok(vec![("a", formulas::trapezoid_area(v[0], v[1], v[2]))]),
    ),
    Formula::fixed("/surface/cube", &["s"], &["sa"], "Surface area of a cube: sa = 6s^2", |v| {
        Ok(vec![("sa", formulas::cube_surface(v[0]))])
    }),
    Formula::fixed("/surface/sphere", &["r"], &["sa"], "Surface area of a sphere: sa = 4*pi*r^2", |v| {
        Ok(vec![("sa", formulas::sphere_surface(v[0]))])
    }),
    Formula::fixed(
        "/surface/cylinder",
        &["r", "h"],
        &["sa"],
        "Surface area of a cylinder: sa = 2*pi*r*h + 2*pi*r^2",
        |v| Ok(vec![("sa", formulas::cylinder_surface(v[0], v[1]))]),
    ),
    Formula::fixed("/perimeter/square", &["s"], &["p"], "Perimeter of a square: p = 4s", |v| {
        Ok(vec![("p", formulas::square_perimeter(v[0]))])
    }),
    Formula::fixed(
        "/perimeter/rectangle",
        &["l", "w"],
        &["p"],
        "Perimeter of a rectangle: p = 2l + 2w",
        |v| Ok(vec![("p", formulas::rectangle_perimeter(v[0], v[1]))]),
    ),
    Formula::fixed(
        "/perimeter/triangle",
        &["s1", "s2", "s3"],
        &["p"],
        "Perimeter of a triangle: p = s1 + s2 + s3",
        |v| Ok(vec![("p", formulas::triangle_perimeter(v[0], v[1], v[2]))]),
    ),
    Formula::fixed("/perimeter/circle", &["d"], &["c"], "Circumference of a circle: c = pi*d", |v| {
        Ok(vec![("c", formulas::circle_circumference(v[0]))])
    }),
    Formula::fixed("/volume/cube", &["s"], &["v"], "Volume of a cube: v = s^3", |v| {
        Ok(vec![("v", formulas::cube_volume(v[0]))])
    }),
    Formula::fixed(
        "/volume/prism",
        &["l", "w", "h"],
        &["v"],
        "Volume of a rectangular prism: v = l*w*h",
        |v| Ok(vec![("v", formulas::prism_volume(v[0], v[1], v[2]))]),
    ),
    Formula::fixed(
        "/volume/pyramid",
        &["b", "h"],
        &["v"],
        "Volume of a square pyramid: v = b^2*h/3",
        |v| Ok(vec![("v", formulas::pyramid_volume(v[0], v[1]))]),
    ),
    Formula::fixed(
        "/volume/cylinder",
        &["r", "h"],
        &["v"],
        "Volume of a cylinder: v = pi*r^2*h",
        |v| Ok(vec![("v", formulas::cylinder_volume(v[0], v[1]))]),
    ),
    Formula::fixed("/volume/sphere", &["r"], &["v"], "Volume of a sphere: v = 4*pi*r^3/3", |v| {
        Ok(vec![("v", formulas::sphere_volume(v[0]))])
    }),
    Formula::fixed("/volume/cone", &["r", "h"], &["v"], "Volume of a cone: v = pi*r^2*h/3", |v| {
        Ok(vec![("v", formulas::cone_volume(v[0], v[1]))])
    }),
    Formula::fixed(
        "/distance",
        &["x1", "y1", "x2", "y2"],
        &["d"],
        "Distance between two points",
        |v| Ok(vec![("d", formulas::distance(v[0], v[1], v[2], v[3]))]),
    ),
    Formula::fixed(
        "/slope",
        &["x1", "y1", "x2", "y2"],
        &["m"],
        "Slope of the line through two points; undefined when x1 = x2",
        |v| Ok(vec![("m", formulas::slope(v[0], v[1], v[2], v[3])?)]),
    ),
    Formula::custom(
        "/pythag",
        &["a", "b", "c"],
        &["a", "b", "c"],
        "Solve a^2 + b^2 = c^2 given any two of a, b, c",
        solve_pythagorean,
    ),
    Formula::custom(
        "/average",
        &["nums"],
        &["avg"],
        "Arithmetic mean of a comma-separated list",
        average,
    ),
];

/// Maps request paths onto formulas. The table is immutable and shared
/// between all requests.
#[derive(Debug, Clone, Copy)]
pub struct FormulaDispatcher {
    formulas: &'static [Formula],
}

impl FormulaDispatcher {
    pub fn new() -> Self {
        Self { formulas: FORMULAS }
    }

    pub fn routes(&self) -> impl Iterator<Item = &'static Formula> {
        self.formulas.iter()
    }

    pub fn lookup(&self, path: &str) -> Option<&'static Formula> {
        self.formulas.iter().find(|formula| formula.path == path)
    }

    pub fn dispatch(&self, path: &str, params: &QueryParams) -> Result<ComputationResult> {
        let formula = self.lookup(path).ok_or_else(|| MathApiError::RouteNotFound {
            path: path.to_string(),
        })?;
        tracing::debug!(path, "Dispatching formula");
        formula.evaluate(params)
    }
}

impl Default for FormulaDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .fold(QueryParams::new(), |acc, (name, value)| acc.with(name, value))
    }

    #[test]
    fn test_route_table_is_complete_and_unique() {
        let dispatcher = FormulaDispatcher::new();
        let paths: HashSet<&str> = dispatcher.routes().map(|f| f.path).collect();
        assert_eq!(paths.len(), 24);
        assert_eq!(paths.len(), dispatcher.routes().count());
        assert!(dispatcher.lookup("/volume/cone").is_some());
        assert!(dispatcher.lookup("/volume/torus").is_none());
    }

    #[test]
    fn test_dispatch_echoes_inputs_then_outputs() {
        let dispatcher = FormulaDispatcher::new();
        let result = dispatcher
            .dispatch("/area/heron", &params(&[("x", "3"), ("y", "4"), ("z", "5")]))
            .unwrap();
        assert_eq!(result.len(), 5);
        assert_eq!(result.number("s"), Some(6.0));
        assert_eq!(result.number("a"), Some(6.0));
    }

    #[test]
    fn test_extra_parameters_are_ignored() {
        let dispatcher = FormulaDispatcher::new();
        let result = dispatcher
            .dispatch("/area/square", &params(&[("s", "3"), ("unit", "cm")]))
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.get("unit").is_none());
    }

    #[test]
    fn test_unknown_path() {
        let err = FormulaDispatcher::new()
            .dispatch("/area/hexagon", &QueryParams::new())
            .unwrap_err();
        assert!(matches!(err, MathApiError::RouteNotFound { .. }));
    }

    #[test]
    fn test_missing_parameter_is_named() {
        let err = FormulaDispatcher::new()
            .dispatch("/volume/prism", &params(&[("l", "1"), ("w", "2")]))
            .unwrap_err();
        assert!(matches!(err, MathApiError::MissingParameter { ref name } if name == "h"));
    }

    #[test]
    fn test_pythagorean_solves_each_side() {
        let dispatcher = FormulaDispatcher::new();
        for query in [
            params(&[("a", "5"), ("b", "12")]),
            params(&[("a", "5"), ("c", "13")]),
            params(&[("b", "12"), ("c", "13")]),
        ] {
            let result = dispatcher.dispatch("/pythag", &query).unwrap();
            assert_eq!(result.number("a"), Some(5.0));
            assert_eq!(result.number("b"), Some(12.0));
            assert_eq!(result.number("c"), Some(13.0));
        }
    }

    #[test]
    fn test_pythagorean_requires_exactly_two() {
        let dispatcher = FormulaDispatcher::new();
        for query in [
            params(&[("a", "3")]),
            params(&[("a", "3"), ("b", "4"), ("c", "5")]),
        ] {
            assert!(matches!(
                dispatcher.dispatch("/pythag", &query),
                Err(MathApiError::InvalidParameterSet { .. })
            ));
        }
    }

    #[test]
    fn test_slope_vertical_line_is_undefined() {
        let err = FormulaDispatcher::new()
            .dispatch(
                "/slope",
                &params(&[("x1", "2"), ("y1", "0"), ("x2", "2"), ("y2", "7")]),
            )
            .unwrap_err();
        assert!(matches!(err, MathApiError::UndefinedResult { .. }));
    }

    #[test]
    fn test_overflow_is_rejected() {
        let err = FormulaDispatcher::new()
            .dispatch("/volume/cube", &params(&[("s", "1e200")]))
            .unwrap_err();
        assert!(matches!(err, MathApiError::UndefinedResult { .. }));
    }

    #[test]
    fn test_average() {
        let result = FormulaDispatcher::new()
            .dispatch("/average", &params(&[("nums", "1,2,3,4")]))
            .unwrap();
        assert_eq!(result.number("avg"), Some(2.5));
    }
}
