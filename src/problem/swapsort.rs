use crate::state::{Identify, State};

use std::fmt;

#[derive(Debug, Clone)]
pub struct SwapSort {
    sorted: Vec<i64>,
}

impl SwapSort {
    pub fn new(vector: &[i64]) -> Self {
        let mut sorted = vector.to_vec();
        sorted.sort_unstable();
        SwapSort { sorted }
    }

    pub fn root_state(vector: &[i64]) -> Arrangement {
        Arrangement {
            vector: vector.to_vec(),
            swaps: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    pub vector: Vec<i64>,
    pub swaps: usize,
}

impl Arrangement {
    // Equal elements never need to pass each other, so ranking them by their
    // current order gives every element a unique target index.
    fn displacement(&self) -> usize {
        let mut order: Vec<usize> = (0..self.vector.len()).collect();
        order.sort_by_key(|&index| (self.vector[index], index));
        order
            .iter()
            .enumerate()
            .map(|(target, &index)| target.abs_diff(index))
            .sum()
    }
}

impl State<SwapSort> for Arrangement {
    fn cost(&self, _ctx: &SwapSort) -> f64 {
        self.swaps as f64
    }

    fn is_goal(&self, ctx: &SwapSort) -> bool {
        self.vector == ctx.sorted
    }

    fn expand(&self, _ctx: &SwapSort) -> Vec<Self> {
        (0..self.vector.len().saturating_sub(1))
            .map(|index| {
                let mut vector = self.vector.clone();
                vector.swap(index, index + 1);
                Arrangement {
                    vector,
                    swaps: self.swaps + 1,
                }
            })
            .collect()
    }

    fn heuristic(&self, _ctx: &SwapSort) -> f64 {
        (self.displacement() / 2) as f64
    }
}

impl Identify for Arrangement {
    type Id = Vec<i64>;

    fn id(&self) -> Vec<i64> {
        self.vector.clone()
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{Algorithm, ConstraintKind, NoLoop, Solver};

    fn same(a: &Arrangement, b: &Arrangement) -> bool {
        a.vector == b.vector
    }

    #[test]
    fn test_heuristic_is_admissible() {
        let ctx = SwapSort::new(&[3, 2, 5, 4, 1]);
        let root = SwapSort::root_state(&[3, 2, 5, 4, 1]);
        // displacement 2 + 0 + 2 + 0 + 4
        assert_eq!(root.heuristic(&ctx), 4.0);
        assert!(!root.is_goal(&ctx));

        let sorted = SwapSort::root_state(&[1, 2, 3, 4, 5]);
        assert_eq!(sorted.heuristic(&ctx), 0.0);
        assert!(sorted.is_goal(&ctx));

        let duplicates = SwapSort::root_state(&[2, 1, 2, 1]);
        assert_eq!(duplicates.heuristic(&SwapSort::new(&[2, 1, 2, 1])), 3.0);
    }

    #[test]
    fn test_expand_swaps_neighbours() {
        let ctx = SwapSort::new(&[3, 1, 2]);
        let children = SwapSort::root_state(&[3, 1, 2]).expand(&ctx);
        let vectors: Vec<Vec<i64>> = children.iter().map(|child| child.vector.clone()).collect();
        assert_eq!(vectors, vec![vec![1, 3, 2], vec![3, 2, 1]]);
        assert!(children.iter().all(|child| child.swaps == 1));
        assert!(SwapSort::root_state(&[7]).expand(&ctx).is_empty());
    }

    #[test]
    fn test_idastar_sorts_with_minimal_swaps() {
        let vector = [3, 2, 5, 4, 1];
        let mut solver = Solver::new(SwapSort::root_state(&vector))
            .algorithm(Algorithm::IdaStar)
            .constraint(NoLoop::new(10, same))
            .context(SwapSort::new(&vector));
        let result = solver.solve();
        // one swap per inversion
        assert_eq!(result.solution.len(), 7);
        assert_eq!(result.solution[0].vector, vector.to_vec());
        assert_eq!(result.goal().map(|goal| goal.vector.clone()), Some(vec![1, 2, 3, 4, 5]));
        for pair in result.solution.windows(2) {
            let changed = pair[0]
                .vector
                .iter()
                .zip(&pair[1].vector)
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 2);
        }
    }

    #[test]
    fn test_astar_matches_idastar() {
        let vector = [4, 1, 3, 2];
        let mut costs = Vec::new();
        for algorithm in [Algorithm::AStar, Algorithm::IdaStar] {
            let mut solver = Solver::new(SwapSort::root_state(&vector))
                .algorithm(algorithm)
                .boxed_constraint(ConstraintKind::CheapestPath.build())
                .context(SwapSort::new(&vector));
            let result = solver.solve();
            costs.push(result.goal().map(|goal| goal.swaps));
        }
        // inversions: (4,1) (4,3) (4,2) (3,2)
        assert_eq!(costs, vec![Some(4), Some(4)]);
    }
}
