mod algorithm;
mod comm;
mod constraint;

pub use algorithm::Algorithm;
pub use comm::{Ancestors, Frontier, Node, NodeRef, PriorityQueue, Queue, RingBuffer, Stack, Strategy};
pub use constraint::{
    CheapestPath, Constraint, ConstraintKind, CpEntry, CpStore, KeyedStore, NoConstraint, NoLoop,
};

use crate::config::Config;
use crate::stat::Stats;
use crate::state::{Identify, State};
use algorithm::{GeneralSearch, IdaStar};

use std::time::Instant;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct SolveResult<S> {
    pub solution: Vec<S>,
    pub visited: usize,
    pub expanded: usize,
}

impl<S> SolveResult<S> {
    pub fn solved(&self) -> bool {
        !self.solution.is_empty()
    }

    pub fn goal(&self) -> Option<&S> {
        self.solution.last()
    }
}

// Where the search stands between two `solve` calls.
enum Run<S> {
    Pending,
    General(GeneralSearch<S>),
    IdaStar(IdaStar<S>),
    Exhausted,
}

pub struct Solver<'a, S, C = ()> {
    root: S,
    algorithm: Algorithm,
    constraint: Box<dyn Constraint<S> + 'a>,
    limit: f64,
    context: C,
    run: Run<S>,
    stats: Stats,
}

impl<'a, S> Solver<'a, S, ()> {
    pub fn new(root: S) -> Self {
        Solver {
            root,
            algorithm: Algorithm::default(),
            constraint: Box::new(NoConstraint),
            limit: f64::INFINITY,
            context: (),
            run: Run::Pending,
            stats: Stats::default(),
        }
    }
}

impl<'a, S, C> Solver<'a, S, C> {
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn constraint(mut self, constraint: impl Constraint<S> + 'a) -> Self {
        self.constraint = Box::new(constraint);
        self
    }

    pub fn boxed_constraint(mut self, constraint: Box<dyn Constraint<S> + 'a>) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn limit(mut self, limit: f64) -> Self {
        self.limit = limit;
        self
    }

    pub fn context<D>(self, context: D) -> Solver<'a, S, D> {
        Solver {
            root: self.root,
            algorithm: self.algorithm,
            constraint: self.constraint,
            limit: self.limit,
            context,
            run: Run::Pending,
            stats: Stats::default(),
        }
    }

    pub fn configure(self, config: &Config) -> Self
    where
        S: Identify + 'a,
    {
        self.algorithm(config.algorithm)
            .boxed_constraint(config.constraint.build())
            .limit(config.limit)
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn completed(&self) -> bool {
        matches!(self.run, Run::Exhausted)
    }
}

impl<'a, S, C> Solver<'a, S, C>
where
    S: State<C> + Clone,
{
    #[instrument(skip_all, name = "solve", fields(algorithm = %self.algorithm), level = "debug")]
    pub fn solve(&mut self) -> SolveResult<S> {
        if self.completed() {
            debug!("search space exhausted");
            return self.result(None);
        }

        let start = Instant::now();
        if matches!(self.run, Run::Pending) {
            self.run = self.start();
        }

        let goal = match &mut self.run {
            Run::General(search) => {
                let goal = search.next_goal(self.constraint.as_mut(), &self.context);
                self.stats.visited = search.visited();
                self.stats.expanded = search.expanded();
                goal
            }
            Run::IdaStar(search) => {
                let goal = search.next_goal(self.constraint.as_mut(), &self.context);
                self.stats.visited = search.visited();
                self.stats.expanded = search.expanded();
                self.stats.iterations = search.iterations();
                debug!(
                    "bound {:?} after {:?} iterations",
                    search.bound(),
                    search.iterations()
                );
                goal
            }
            Run::Pending | Run::Exhausted => None,
        };
        self.stats.time_us += start.elapsed().as_micros();

        match goal {
            Some(goal) => {
                self.stats.solutions += 1;
                self.result(Some(goal.path()))
            }
            None => {
                debug!(
                    "search exhausted after {:?} solutions, visited {:?}, expanded {:?}",
                    self.stats.solutions, self.stats.visited, self.stats.expanded
                );
                self.run = Run::Exhausted;
                self.result(None)
            }
        }
    }

    fn start(&mut self) -> Run<S> {
        debug!("start search, limit {:?}", self.limit);
        self.constraint.reset();
        match self.algorithm {
            Algorithm::IdaStar => Run::IdaStar(IdaStar::new(self.root.clone(), self.limit)),
            algorithm => {
                let mut frontier = algorithm.frontier();
                frontier.add(Node::root(self.root.clone(), &self.context));
                Run::General(GeneralSearch::new(
                    frontier,
                    f64::NEG_INFINITY,
                    self.limit,
                    0,
                    0,
                ))
            }
        }
    }

    fn result(&self, solution: Option<Vec<S>>) -> SolveResult<S> {
        SolveResult {
            solution: solution.unwrap_or_default(),
            visited: self.stats.visited,
            expanded: self.stats.expanded,
        }
    }
}
