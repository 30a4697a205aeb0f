//! Termination expressions
//!
//! Boolean condition trees evaluated against the evolution state. An
//! `Expression` is built left-deep with `begin`, `and_` and `or_`, so
//! conditions combine strictly left to right with no operator precedence:
//! `a.or_(b).and_(c)` means `(a OR b) AND c`.

pub mod conditions;

use crate::error::{EvoResult, ExpressionError};
use crate::state::EvolutionState;

pub mod prelude {
    pub use super::conditions::*;
    pub use super::{Concatenator, Condition, Expression};
}

/// An object-safe predicate over the evolution state
pub trait Condition: Send + Sync {
    /// Evaluate the predicate against the current state
    fn evaluate(&self, state: &EvolutionState) -> EvoResult<bool>;
}

/// Boolean connective between two expression branches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concatenator {
    /// Both branches must hold
    And,
    /// Either branch must hold
    Or,
}

impl Concatenator {
    fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Concatenator::And => left && right,
            Concatenator::Or => left || right,
        }
    }
}

enum ExpressionNode {
    Leaf(Box<dyn Condition>),
    Branch {
        op: Concatenator,
        left: Box<ExpressionNode>,
        right: Box<ExpressionNode>,
    },
}

impl ExpressionNode {
    fn evaluate(&self, state: &EvolutionState) -> EvoResult<bool> {
        match self {
            ExpressionNode::Leaf(condition) => condition.evaluate(state),
            ExpressionNode::Branch { op, left, right } => {
                // Both branches always run; listeners and nested expressions
                // must see no short-circuiting.
                let left = left.evaluate(state)?;
                let right = right.evaluate(state)?;
                Ok(op.apply(left, right))
            }
        }
    }
}

/// A left-deep tree of conditions joined by concatenators
#[derive(Default)]
pub struct Expression {
    root: Option<ExpressionNode>,
}

impl Expression {
    /// Create an empty expression
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Start the expression with its first condition
    pub fn begin<C: Condition + 'static>(mut self, condition: C) -> EvoResult<Self> {
        if self.root.is_some() {
            return Err(ExpressionError::AlreadyStarted.into());
        }
        self.root = Some(ExpressionNode::Leaf(Box::new(condition)));
        Ok(self)
    }

    /// Conjoin the expression so far with another condition
    pub fn and_<C: Condition + 'static>(self, condition: C) -> EvoResult<Self> {
        self.extend(Concatenator::And, condition)
    }

    /// Disjoin the expression so far with another condition
    pub fn or_<C: Condition + 'static>(self, condition: C) -> EvoResult<Self> {
        self.extend(Concatenator::Or, condition)
    }

    fn extend<C: Condition + 'static>(mut self, op: Concatenator, condition: C) -> EvoResult<Self> {
        let left = self.root.take().ok_or(ExpressionError::NotStarted)?;
        self.root = Some(ExpressionNode::Branch {
            op,
            left: Box::new(left),
            right: Box::new(ExpressionNode::Leaf(Box::new(condition))),
        });
        Ok(self)
    }

    /// Whether the expression holds no condition yet
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Evaluate the whole tree strictly left to right
    pub fn evaluate(&self, state: &EvolutionState) -> EvoResult<bool> {
        match &self.root {
            Some(root) => root.evaluate(state),
            None => Err(ExpressionError::Empty.into()),
        }
    }
}

impl Condition for Expression {
    fn evaluate(&self, state: &EvolutionState) -> EvoResult<bool> {
        Expression::evaluate(self, state)
    }
}
