// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::model::err::{
    DuplicateNameError, InvalidBoundsError, ModelBuildError, NonFiniteNumberError,
    UnknownVariableError,
};
use std::collections::HashMap;

/// Handle of a variable inside a [`MilpModel`].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VariableId({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Binary,
    Integer,
    Continuous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    name: String,
    kind: VariableKind,
    lower: Option<f64>,
    upper: Option<f64>,
}

impl VariableDefinition {
    #[inline]
    pub fn new(name: impl Into<String>, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            lower: None,
            upper: None,
        }
    }

    #[inline]
    pub fn binary(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Binary)
    }

    #[inline]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Integer)
    }

    #[inline]
    pub fn continuous(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Continuous)
    }

    #[inline]
    pub fn with_lower(mut self, lower: f64) -> Self {
        self.lower = Some(lower);
        self
    }

    #[inline]
    pub fn with_upper(mut self, upper: f64) -> Self {
        self.upper = Some(upper);
        self
    }

    /// Pins the variable to a single value.
    #[inline]
    pub fn with_level(self, level: f64) -> Self {
        self.with_lower(level).with_upper(level)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    #[inline]
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    #[inline]
    pub fn level(&self) -> Option<f64> {
        match (self.lower, self.upper) {
            (Some(l), Some(u)) if l == u => Some(l),
            _ => None,
        }
    }
}

/// A named linear combination of variables.
///
/// With a lower and/or upper bound it acts as a constraint
/// `lower <= Σ c·x <= upper`. With a weight it contributes
/// `weight · Σ c·x` to the maximised objective. It may be both.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearExpression {
    name: String,
    terms: Vec<(VariableId, f64)>,
    lower: Option<f64>,
    upper: Option<f64>,
    weight: Option<f64>,
}

impl LinearExpression {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terms: Vec::new(),
            lower: None,
            upper: None,
            weight: None,
        }
    }

    #[inline]
    pub fn with_term(mut self, variable: VariableId, coefficient: f64) -> Self {
        self.add_term(variable, coefficient);
        self
    }

    #[inline]
    pub fn add_term(&mut self, variable: VariableId, coefficient: f64) -> &mut Self {
        self.terms.push((variable, coefficient));
        self
    }

    #[inline]
    pub fn with_lower(mut self, lower: f64) -> Self {
        self.lower = Some(lower);
        self
    }

    #[inline]
    pub fn with_upper(mut self, upper: f64) -> Self {
        self.upper = Some(upper);
        self
    }

    #[inline]
    pub fn with_level(self, level: f64) -> Self {
        self.with_lower(level).with_upper(level)
    }

    #[inline]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn terms(&self) -> &[(VariableId, f64)] {
        &self.terms
    }

    #[inline]
    pub fn coefficient_of(&self, variable: VariableId) -> Option<f64> {
        let mut found = None;
        for &(v, c) in &self.terms {
            if v == variable {
                found = Some(found.unwrap_or(0.0) + c);
            }
        }
        found
    }

    #[inline]
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    #[inline]
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    #[inline]
    pub fn is_constraint(&self) -> bool {
        self.lower.is_some() || self.upper.is_some()
    }

    #[inline]
    pub fn is_objective(&self) -> bool {
        self.weight.is_some()
    }
}

/// Solver-independent mixed-integer model. Always maximised.
#[derive(Debug, Clone, Default)]
pub struct MilpModel {
    variables: Vec<VariableDefinition>,
    expressions: Vec<LinearExpression>,
    variable_names: HashMap<String, VariableId>,
    expression_names: HashMap<String, usize>,
}

impl MilpModel {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacities(variables: usize, expressions: usize) -> Self {
        Self {
            variables: Vec::with_capacity(variables),
            expressions: Vec::with_capacity(expressions),
            variable_names: HashMap::with_capacity(variables),
            expression_names: HashMap::with_capacity(expressions),
        }
    }

    pub fn add_variable(
        &mut self,
        definition: VariableDefinition,
    ) -> Result<VariableId, ModelBuildError> {
        check_bounds(definition.name(), definition.lower(), definition.upper())?;
        if self.variable_names.contains_key(definition.name()) {
            return Err(DuplicateNameError::new(definition.name()))?;
        }

        let id = VariableId(self.variables.len());
        self.variable_names.insert(definition.name().to_owned(), id);
        self.variables.push(definition);
        Ok(id)
    }

    pub fn add_expression(&mut self, expression: LinearExpression) -> Result<(), ModelBuildError> {
        check_bounds(expression.name(), expression.lower(), expression.upper())?;
        if let Some(w) = expression.weight().filter(|w| !w.is_finite()) {
            return Err(NonFiniteNumberError::new(expression.name(), w))?;
        }
        for &(v, c) in expression.terms() {
            if v.0 >= self.variables.len() {
                return Err(UnknownVariableError::new(expression.name(), v))?;
            }
            if !c.is_finite() {
                return Err(NonFiniteNumberError::new(expression.name(), c))?;
            }
        }
        if self.expression_names.contains_key(expression.name()) {
            return Err(DuplicateNameError::new(expression.name()))?;
        }

        self.expression_names
            .insert(expression.name().to_owned(), self.expressions.len());
        self.expressions.push(expression);
        Ok(())
    }

    #[inline]
    pub fn variable(&self, id: VariableId) -> Option<&VariableDefinition> {
        self.variables.get(id.0)
    }

    #[inline]
    pub fn variable_by_name(&self, name: &str) -> Option<VariableId> {
        self.variable_names.get(name).copied()
    }

    #[inline]
    pub fn expression(&self, name: &str) -> Option<&LinearExpression> {
        self.expression_names
            .get(name)
            .map(|&i| &self.expressions[i])
    }

    #[inline]
    pub fn iter_variables(&self) -> impl Iterator<Item = (VariableId, &VariableDefinition)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, d)| (VariableId(i), d))
    }

    #[inline]
    pub fn iter_expressions(&self) -> impl Iterator<Item = &LinearExpression> {
        self.expressions.iter()
    }

    #[inline]
    pub fn iter_constraints(&self) -> impl Iterator<Item = &LinearExpression> {
        self.expressions.iter().filter(|e| e.is_constraint())
    }

    #[inline]
    pub fn iter_objective(&self) -> impl Iterator<Item = &LinearExpression> {
        self.expressions.iter().filter(|e| e.is_objective())
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.iter_constraints().count()
    }

    /// Objective value of an assignment, `None` if a variable has no value.
    pub fn objective_value<F>(&self, value_of: F) -> Option<f64>
    where
        F: Fn(VariableId) -> Option<f64>,
    {
        let mut total = 0.0;
        for e in self.iter_objective() {
            let mut sum = 0.0;
            for &(v, c) in e.terms() {
                sum += c * value_of(v)?;
            }
            total += e.weight().unwrap_or(0.0) * sum;
        }
        Some(total)
    }
}

#[inline]
fn check_bounds(
    name: &str,
    lower: Option<f64>,
    upper: Option<f64>,
) -> Result<(), ModelBuildError> {
    for b in [lower, upper].into_iter().flatten() {
        if !b.is_finite() {
            return Err(NonFiniteNumberError::new(name, b))?;
        }
    }
    if let (Some(l), Some(u)) = (lower, upper)
        && l > u
    {
        return Err(InvalidBoundsError::new(name, lower, upper))?;
    }
    Ok(())
}
