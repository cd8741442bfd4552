use super::{Algorithm, GeneralSearch};
use crate::solver::comm::{Node, NodeRef, Strategy};
use crate::solver::constraint::Constraint;
use crate::state::State;

use tracing::{debug, info};

// Keeps the suspended iteration so the next goal drains it before deepening.
pub(crate) struct IdaStar<S> {
    root: S,
    limit: f64,
    bound: f64,
    ubound: f64,
    visited: usize,
    expanded: usize,
    iterations: usize,
    current: Option<GeneralSearch<S>>,
}

impl<S> IdaStar<S> {
    pub(crate) fn new(root: S, limit: f64) -> Self {
        IdaStar {
            root,
            limit,
            bound: 0.0,
            ubound: f64::NEG_INFINITY,
            visited: 0,
            expanded: 0,
            iterations: 0,
            current: None,
        }
    }

    pub(crate) fn visited(&self) -> usize {
        self.current
            .as_ref()
            .map_or(self.visited, |search| search.visited())
    }

    pub(crate) fn expanded(&self) -> usize {
        self.current
            .as_ref()
            .map_or(self.expanded, |search| search.expanded())
    }

    pub(crate) fn iterations(&self) -> usize {
        self.iterations
    }

    pub(crate) fn bound(&self) -> f64 {
        self.bound
    }

    pub(crate) fn next_goal<C>(
        &mut self,
        constraint: &mut dyn Constraint<S>,
        ctx: &C,
    ) -> Option<NodeRef<S>>
    where
        S: State<C> + Clone,
    {
        loop {
            if self.current.is_none() {
                let search = self.start_iteration(constraint, ctx);
                self.current = Some(search);
            }

            let search = self.current.as_mut()?;
            if let Some(goal) = search.next_goal(constraint, ctx) {
                return Some(goal);
            }

            let search = self.current.take()?;
            self.visited = search.visited();
            self.expanded = search.expanded();

            // Every finite contour lies strictly above the bound it was
            // recorded under, so each further iteration advances.
            let contour = search.contour();
            if contour.is_nan() || contour.is_infinite() || contour > self.limit {
                debug!(
                    "no further contour: bound {:?}, contour {:?}, iterations {:?}",
                    self.bound, contour, self.iterations
                );
                return None;
            }

            // Goals at or below the finished bound were already reported.
            self.ubound = self.bound;
            self.bound = contour;
            info!(
                "contour: {:?}, visited: {:?}, expanded: {:?}",
                self.bound, self.visited, self.expanded
            );
        }
    }

    fn start_iteration<C>(
        &mut self,
        constraint: &mut dyn Constraint<S>,
        ctx: &C,
    ) -> GeneralSearch<S>
    where
        S: State<C> + Clone,
    {
        self.iterations += 1;
        constraint.reset();

        let mut frontier = Algorithm::IdaStar.frontier();
        frontier.add(Node::root(self.root.clone(), ctx));
        GeneralSearch::new(frontier, self.ubound, self.bound, self.visited, self.expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::constraint::NoConstraint;

    // Chain 0 -> 1 -> ... -> 10, each step costing `step`.
    #[derive(Debug, Clone)]
    struct Chain {
        at: u32,
        goals: &'static [u32],
        step: f64,
    }

    impl State for Chain {
        fn cost(&self, _: &()) -> f64 {
            if self.at == 0 {
                return 0.0;
            }
            self.at as f64 * self.step
        }

        fn is_goal(&self, _: &()) -> bool {
            self.goals.contains(&self.at)
        }

        fn expand(&self, _: &()) -> Vec<Self> {
            if self.at >= 10 {
                return Vec::new();
            }
            vec![Chain {
                at: self.at + 1,
                ..self.clone()
            }]
        }
    }

    #[test]
    fn test_deepens_until_goal() {
        let mut driver = IdaStar::new(
            Chain {
                at: 0,
                goals: &[3],
                step: 1.0,
            },
            f64::INFINITY,
        );
        let goal = driver.next_goal(&mut NoConstraint, &()).unwrap();
        assert_eq!(goal.state().at, 3);
        // bounds 0, 1, 2, 3
        assert_eq!(driver.iterations(), 4);
        assert_eq!(driver.bound(), 3.0);
        // 1 + 2 + 3 + 4 visits
        assert_eq!(driver.visited(), 10);
    }

    #[test]
    fn test_goal_is_not_expanded() {
        let mut driver = IdaStar::new(
            Chain {
                at: 0,
                goals: &[2, 5],
                step: 1.0,
            },
            f64::INFINITY,
        );
        let found: Vec<u32> = std::iter::from_fn(|| driver.next_goal(&mut NoConstraint, &()))
            .map(|goal| goal.state().at)
            .collect();
        // 5 lies behind the goal at 2 and is never generated.
        assert_eq!(found, vec![2]);
        assert_eq!(driver.iterations(), 3);
    }

    #[test]
    fn test_stops_at_limit() {
        let mut driver = IdaStar::new(
            Chain {
                at: 0,
                goals: &[5],
                step: 1.0,
            },
            4.0,
        );
        assert!(driver.next_goal(&mut NoConstraint, &()).is_none());
        assert_eq!(driver.bound(), 4.0);
    }

    #[test]
    fn test_zero_cost_chain_needs_one_iteration() {
        let mut driver = IdaStar::new(
            Chain {
                at: 0,
                goals: &[],
                step: 0.0,
            },
            f64::INFINITY,
        );
        assert!(driver.next_goal(&mut NoConstraint, &()).is_none());
        assert_eq!(driver.iterations(), 1);
        assert_eq!(driver.bound(), 0.0);
        // 0 through 10
        assert_eq!(driver.visited(), 11);
    }

    #[test]
    fn test_bound_strictly_increases() {
        let mut driver = IdaStar::new(
            Chain {
                at: 0,
                goals: &[4],
                step: 0.5,
            },
            f64::INFINITY,
        );
        let goal = driver.next_goal(&mut NoConstraint, &()).unwrap();
        assert_eq!(goal.state().at, 4);
        // bounds 0, 0.5, 1, 1.5, 2
        assert_eq!(driver.iterations(), 5);
        assert_eq!(driver.bound(), 2.0);
    }

    #[test]
    fn test_infinite_step_terminates() {
        let mut driver = IdaStar::new(
            Chain {
                at: 0,
                goals: &[1],
                step: f64::INFINITY,
            },
            f64::INFINITY,
        );
        assert!(driver.next_goal(&mut NoConstraint, &()).is_none());
        assert_eq!(driver.iterations(), 1);
        assert_eq!(driver.visited(), 1);
        assert_eq!(driver.expanded(), 0);
    }
}
