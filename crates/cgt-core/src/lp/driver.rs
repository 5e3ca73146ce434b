//! LP Driver: thin wrapper around an external LP solver. See `SPEC_FULL.md`
//! §4.5/§B.6.
//!
//! `minilp` is a pure-Rust revised-simplex solver, substituted here for the
//! HiGHS-class solver described for this engine, since no available crate
//! in this project's dependency pack wraps that solver directly (documented
//! in `DESIGN.md`).

use crate::error::CgtError;
use minilp::{ComparisonOp, OptimizationDirection, Problem};

pub use minilp::Variable;

/// A single (symbol, FY) linear program under construction.
pub struct LpModel {
    problem: Problem,
}

impl LpModel {
    pub fn new() -> Self {
        Self {
            problem: Problem::new(OptimizationDirection::Minimize),
        }
    }

    /// Add a non-negative variable with the given objective coefficient.
    pub fn add_var(&mut self, objective_coefficient: f64) -> Variable {
        self.problem
            .add_var(objective_coefficient, (0.0, f64::INFINITY))
    }

    pub fn add_eq(&mut self, coefficients: &[(Variable, f64)], rhs: f64) {
        self.problem
            .add_constraint(coefficients.iter().copied(), ComparisonOp::Eq, rhs);
    }

    pub fn add_le(&mut self, coefficients: &[(Variable, f64)], rhs: f64) {
        self.problem
            .add_constraint(coefficients.iter().copied(), ComparisonOp::Le, rhs);
    }

    pub fn add_ge(&mut self, coefficients: &[(Variable, f64)], rhs: f64) {
        self.problem
            .add_constraint(coefficients.iter().copied(), ComparisonOp::Ge, rhs);
    }

    /// Solve the relaxation, mapping any non-optimal outcome to
    /// [`CgtError::LpFailed`].
    pub fn solve(self, symbol: &str) -> Result<LpSolution, CgtError> {
        match self.problem.solve() {
            Ok(solution) => Ok(LpSolution(solution)),
            Err(err) => Err(CgtError::LpFailed {
                symbol: symbol.to_string(),
                status: "infeasible_or_unbounded".to_string(),
                message: err.to_string(),
            }),
        }
    }
}

impl Default for LpModel {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LpSolution(minilp::Solution);

impl LpSolution {
    pub fn value(&self, variable: Variable) -> f64 {
        self.0[variable]
    }
}
