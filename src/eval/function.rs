// eval/function.rs — Recursive scalar function trees over (x, y, t)
//
// A `FunctionNode` is a closed tagged-variant tree. Each operator owns its
// children outright, so trees are acyclic and can be shared immutably
// across rayon workers without synchronization.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Which raw input a leaf returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coord {
    X,
    Y,
    T,
}

impl Coord {
    pub const ALL: [Coord; 3] = [Coord::X, Coord::Y, Coord::T];

    #[inline]
    pub fn select(self, x: f64, y: f64, t: f64) -> f64 {
        match self {
            Coord::X => x,
            Coord::Y => y,
            Coord::T => t,
        }
    }
}

/// A scalar function of `(x, y, t)` represented as an operator tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionNode {
    /// Leaf: one of the raw inputs, unmodified.
    Coord(Coord),
    /// `a * b`
    Product(Box<FunctionNode>, Box<FunctionNode>),
    /// `0.5 * a * b`, a scaled product rather than an arithmetic mean.
    Average(Box<FunctionNode>, Box<FunctionNode>),
    /// `cos(2π a)`
    CosPi(Box<FunctionNode>),
    /// `sin(2π a)`
    SinPi(Box<FunctionNode>),
    /// `a * a`
    Square(Box<FunctionNode>),
    /// `sqrt(|a|)`
    SqrtAbs(Box<FunctionNode>),
}

impl FunctionNode {
    pub fn x() -> Self {
        FunctionNode::Coord(Coord::X)
    }

    pub fn y() -> Self {
        FunctionNode::Coord(Coord::Y)
    }

    pub fn t() -> Self {
        FunctionNode::Coord(Coord::T)
    }

    pub fn product(a: FunctionNode, b: FunctionNode) -> Self {
        FunctionNode::Product(Box::new(a), Box::new(b))
    }

    pub fn average(a: FunctionNode, b: FunctionNode) -> Self {
        FunctionNode::Average(Box::new(a), Box::new(b))
    }

    pub fn cos_pi(a: FunctionNode) -> Self {
        FunctionNode::CosPi(Box::new(a))
    }

    pub fn sin_pi(a: FunctionNode) -> Self {
        FunctionNode::SinPi(Box::new(a))
    }

    pub fn square(a: FunctionNode) -> Self {
        FunctionNode::Square(Box::new(a))
    }

    pub fn sqrt_abs(a: FunctionNode) -> Self {
        FunctionNode::SqrtAbs(Box::new(a))
    }

    /// Evaluate the function at `(x, y, t)`.
    ///
    /// Recursion depth equals tree depth; no allocation happens here.
    pub fn evaluate(&self, x: f64, y: f64, t: f64) -> f64 {
        match self {
            FunctionNode::Coord(c) => c.select(x, y, t),
            FunctionNode::Product(a, b) => a.evaluate(x, y, t) * b.evaluate(x, y, t),
            FunctionNode::Average(a, b) => 0.5 * a.evaluate(x, y, t) * b.evaluate(x, y, t),
            FunctionNode::CosPi(a) => (2.0 * PI * a.evaluate(x, y, t)).cos(),
            FunctionNode::SinPi(a) => (2.0 * PI * a.evaluate(x, y, t)).sin(),
            // a * a, same child
            FunctionNode::Square(a) => a.evaluate(x, y, t) * a.evaluate(x, y, t),
            FunctionNode::SqrtAbs(a) => a.evaluate(x, y, t).abs().sqrt(),
        }
    }

    /// Operator levels from this node to its deepest leaf. Leaves are 0.
    pub fn depth(&self) -> usize {
        match self {
            FunctionNode::Coord(_) => 0,
            FunctionNode::Product(a, b) | FunctionNode::Average(a, b) => {
                1 + a.depth().max(b.depth())
            }
            FunctionNode::CosPi(a)
            | FunctionNode::SinPi(a)
            | FunctionNode::Square(a)
            | FunctionNode::SqrtAbs(a) => 1 + a.depth(),
        }
    }

    /// Total number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        match self {
            FunctionNode::Coord(_) => 1,
            FunctionNode::Product(a, b) | FunctionNode::Average(a, b) => {
                1 + a.node_count() + b.node_count()
            }
            FunctionNode::CosPi(a)
            | FunctionNode::SinPi(a)
            | FunctionNode::Square(a)
            | FunctionNode::SqrtAbs(a) => 1 + a.node_count(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, FunctionNode::Coord(_))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Coord::X => "x",
            Coord::Y => "y",
            Coord::T => "t",
        };
        f.write_str(name)
    }
}

/// Formula form, e.g. `prod(x, cos_pi(y))`.
impl fmt::Display for FunctionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionNode::Coord(c) => write!(f, "{c}"),
            FunctionNode::Product(a, b) => write!(f, "prod({a}, {b})"),
            FunctionNode::Average(a, b) => write!(f, "avg({a}, {b})"),
            FunctionNode::CosPi(a) => write!(f, "cos_pi({a})"),
            FunctionNode::SinPi(a) => write!(f, "sin_pi({a})"),
            FunctionNode::Square(a) => write!(f, "square({a})"),
            FunctionNode::SqrtAbs(a) => write!(f, "sqrt_abs({a})"),
        }
    }
}
