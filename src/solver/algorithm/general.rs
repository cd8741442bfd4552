use crate::solver::comm::{Frontier, Node, NodeRef, Strategy};
use crate::solver::constraint::Constraint;
use crate::state::State;

use std::rc::Rc;
use tracing::{debug, trace};

pub(crate) struct GeneralSearch<S> {
    frontier: Frontier<S>,
    // Goals must be strictly above this value to be reported.
    ubound: f64,
    // Inclusive; children above it are not enqueued.
    limit: f64,
    // Smallest child value that exceeded `limit`.
    contour: f64,
    visited: usize,
    expanded: usize,
}

impl<S> GeneralSearch<S> {
    pub(crate) fn new(
        frontier: Frontier<S>,
        ubound: f64,
        limit: f64,
        visited: usize,
        expanded: usize,
    ) -> Self {
        GeneralSearch {
            frontier,
            ubound,
            limit,
            contour: f64::INFINITY,
            visited,
            expanded,
        }
    }

    pub(crate) fn contour(&self) -> f64 {
        self.contour
    }

    pub(crate) fn visited(&self) -> usize {
        self.visited
    }

    pub(crate) fn expanded(&self) -> usize {
        self.expanded
    }

    pub(crate) fn next_goal<C>(
        &mut self,
        constraint: &mut dyn Constraint<S>,
        ctx: &C,
    ) -> Option<NodeRef<S>>
    where
        S: State<C>,
    {
        while let Some(current) = self.frontier.take() {
            self.visited += 1;
            trace!("visit node: value {:?} cost {:?}", current.value(), current.cost());

            if constraint.on_visit(&current) {
                continue;
            }

            if current.state().is_goal(ctx) && current.value() > self.ubound {
                debug!(
                    "goal found: value {:?}, visited {:?}, expanded {:?}",
                    current.value(),
                    self.visited,
                    self.expanded
                );
                return Some(current);
            }

            for state in current.state().expand(ctx) {
                let child = Node::child(&current, state, ctx);
                if constraint.on_expand(&child) {
                    continue;
                }

                // NaN never fits under a limit and never lowers the contour.
                if child.value().is_nan() || child.value() > self.limit {
                    self.contour = self.contour.min(child.value());
                    continue;
                }

                self.frontier.add(Rc::new(child));
                self.expanded += 1;
            }
        }

        debug!(
            "frontier exhausted: contour {:?}, visited {:?}, expanded {:?}",
            self.contour, self.visited, self.expanded
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::algorithm::Algorithm;
    use crate::solver::constraint::NoConstraint;

    // Counts upwards; every number below `goal` has two children.
    #[derive(Debug, Clone)]
    struct Counter {
        value: u32,
        goal: u32,
    }

    impl State for Counter {
        fn cost(&self, _: &()) -> f64 {
            self.value as f64
        }

        fn is_goal(&self, _: &()) -> bool {
            self.value >= self.goal
        }

        fn expand(&self, _: &()) -> Vec<Self> {
            if self.value >= self.goal {
                return Vec::new();
            }
            let next = Counter {
                value: self.value + 1,
                goal: self.goal,
            };
            vec![next.clone(), next]
        }
    }

    fn seeded(algorithm: Algorithm, goal: u32, limit: f64) -> GeneralSearch<Counter> {
        let mut frontier = algorithm.frontier();
        frontier.add(Node::root(Counter { value: 0, goal }, &()));
        GeneralSearch::new(frontier, f64::NEG_INFINITY, limit, 0, 0)
    }

    #[test]
    fn test_finds_goal_and_resumes() {
        let mut search = seeded(Algorithm::AStar, 2, f64::INFINITY);
        let mut constraint = NoConstraint;

        let mut goals = 0;
        while let Some(goal) = search.next_goal(&mut constraint, &()) {
            assert_eq!(goal.value(), 2.0);
            assert_eq!(goal.path().len(), 3);
            goals += 1;
        }
        // Two children per level: four distinct paths reach the goal.
        assert_eq!(goals, 4);
        assert_eq!(search.visited(), 7);
        assert_eq!(search.expanded(), 6);
        assert!(search.contour().is_infinite());
    }

    #[test]
    fn test_records_smallest_excluded_value() {
        let mut search = seeded(Algorithm::DepthFirst, 5, 1.0);
        assert!(search.next_goal(&mut NoConstraint, &()).is_none());
        assert_eq!(search.contour(), 2.0);
        // root plus two children at value 1
        assert_eq!(search.visited(), 3);
        assert_eq!(search.expanded(), 2);
    }

    #[test]
    fn test_ubound_skips_cheap_goals() {
        let mut frontier = Algorithm::BreadthFirst.frontier();
        frontier.add(Node::root(Counter { value: 0, goal: 0 }, &()));
        let mut search = GeneralSearch::new(frontier, 0.0, f64::INFINITY, 0, 0);
        assert!(search.next_goal(&mut NoConstraint, &()).is_none());
        assert_eq!(search.visited(), 1);
    }

    #[test]
    fn test_counters_carry_over() {
        let mut frontier = Algorithm::DepthFirst.frontier();
        frontier.add(Node::root(Counter { value: 0, goal: 0 }, &()));
        let mut search = GeneralSearch::new(frontier, f64::NEG_INFINITY, 0.0, 10, 20);
        assert!(search.next_goal(&mut NoConstraint, &()).is_some());
        assert_eq!(search.visited(), 11);
        assert_eq!(search.expanded(), 20);
    }
}
