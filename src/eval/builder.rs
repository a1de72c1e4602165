// eval/builder.rs — Depth-bounded random construction of function trees
//
// The draw order is fixed: leaf choice, early-exit coin, child A, child B,
// operator choice. Unary operators still draw child B and drop it so that
// a given seed always walks the random stream the same way.

use crate::eval::function::{Coord, FunctionNode};
use crate::eval::remap::color_map;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default depth bounds used for every channel tree.
pub const DEFAULT_MIN_DEPTH: i32 = 6;
pub const DEFAULT_MAX_DEPTH: i32 = 9;

/// Number of operator variants the builder chooses from.
const OPERATOR_COUNT: u32 = 6;

fn random_leaf<R: Rng + ?Sized>(rng: &mut R) -> FunctionNode {
    FunctionNode::Coord(Coord::ALL[rng.gen_range(0..Coord::ALL.len())])
}

/// Build a random function tree with depth in `[min_depth, max_depth]`.
///
/// Below `min_depth` the tree may stop early: each level flips one fair
/// coin and returns a leaf on heads. At `max_depth < 1` a leaf is forced.
/// Never fails; recursion ends because `max_depth` drops every level.
pub fn build_random_function<R: Rng + ?Sized>(
    rng: &mut R,
    min_depth: i32,
    max_depth: i32,
) -> FunctionNode {
    if max_depth < 1 {
        return random_leaf(rng);
    }
    if min_depth < 1 && rng.gen_range(0..2) == 1 {
        return random_leaf(rng);
    }

    let child_a = build_random_function(rng, min_depth - 1, max_depth - 1);
    let child_b = build_random_function(rng, min_depth - 1, max_depth - 1);

    match rng.gen_range(0..OPERATOR_COUNT) {
        0 => FunctionNode::product(child_a, child_b),
        1 => FunctionNode::average(child_a, child_b),
        2 => FunctionNode::cos_pi(child_a),
        3 => FunctionNode::sin_pi(child_a),
        4 => FunctionNode::square(child_a),
        _ => FunctionNode::sqrt_abs(child_a),
    }
}

/// The red, green and blue trees of one image or movie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelTrees {
    pub red: FunctionNode,
    pub green: FunctionNode,
    pub blue: FunctionNode,
}

impl ChannelTrees {
    /// Build red, green, blue in that order from one random source.
    pub fn build<R: Rng + ?Sized>(rng: &mut R, min_depth: i32, max_depth: i32) -> Self {
        let red = build_random_function(rng, min_depth, max_depth);
        let green = build_random_function(rng, min_depth, max_depth);
        let blue = build_random_function(rng, min_depth, max_depth);
        debug!(
            "built channel trees: depths r={} g={} b={}, nodes r={} g={} b={}",
            red.depth(),
            green.depth(),
            blue.depth(),
            red.node_count(),
            green.node_count(),
            blue.node_count(),
        );
        ChannelTrees { red, green, blue }
    }

    /// Deterministic trees from a seed.
    pub fn from_seed(seed: u64, min_depth: i32, max_depth: i32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::build(&mut rng, min_depth, max_depth)
    }

    /// Color of the point `(x, y, t)` in normalized coordinates.
    pub fn pixel_color(&self, x: f64, y: f64, t: f64) -> [u8; 3] {
        [
            color_map(self.red.evaluate(x, y, t)),
            color_map(self.green.evaluate(x, y, t)),
            color_map(self.blue.evaluate(x, y, t)),
        ]
    }
}
