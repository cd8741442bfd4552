use std::hash::Hash;

pub trait State<C = ()>: Sized {
    fn cost(&self, ctx: &C) -> f64;

    fn is_goal(&self, ctx: &C) -> bool;

    fn expand(&self, ctx: &C) -> Vec<Self>;

    // Must never over-estimate when optimal solutions are required.
    fn heuristic(&self, _ctx: &C) -> f64 {
        0.0
    }
}

pub trait Identify {
    type Id: Eq + Hash;

    fn id(&self) -> Self::Id;
}
