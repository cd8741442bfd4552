pub mod graph;
pub mod sliding;
pub mod swapsort;

use crate::config::{Config, ProblemConfig};
use crate::solver::{Algorithm, ConstraintKind, Solver};
use crate::stat::Stats;
use crate::state::State;
use graph::Graph;
use sliding::SlidingPuzzle;
use swapsort::SwapSort;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct SolutionReport {
    pub cost: f64,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub problem: ProblemConfig,
    pub algorithm: Algorithm,
    pub constraint: ConstraintKind,
    pub solutions: Vec<SolutionReport>,
    pub completed: bool,
    pub stats: Stats,
}

impl Report {
    pub fn write_json(&self, path: &str) -> anyhow::Result<()> {
        if let Some(dir) = Path::new(path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create directory {}", dir.display()))?;
            }
        }
        let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

pub fn run(config: &Config) -> anyhow::Result<Report> {
    info!(
        "solve {} with {}, constraint {}",
        config.problem.name(),
        config.algorithm,
        config.constraint
    );
    let (solutions, completed, stats) = match &config.problem {
        ProblemConfig::Graph { path } => {
            let graph = Graph::from_file(path)?;
            let solver = Solver::new(graph.root_state())
                .configure(config)
                .context(graph);
            enumerate(solver, config.solutions, |state| state.cost)
        }
        ProblemConfig::SwapSort { vector } => {
            let solver = Solver::new(SwapSort::root_state(vector))
                .configure(config)
                .context(SwapSort::new(vector));
            enumerate(solver, config.solutions, |state| state.swaps as f64)
        }
        ProblemConfig::SlidingPuzzle {
            width,
            height,
            shuffles,
            seed,
        } => {
            let puzzle = SlidingPuzzle::new(*width, *height);
            let mut rng = StdRng::seed_from_u64(*seed);
            let root = puzzle.shuffled(*shuffles, &mut rng);
            info!("shuffled board: {root}");
            let solver = Solver::new(root).configure(config).context(puzzle);
            enumerate(solver, config.solutions, |state| state.moves as f64)
        }
    };

    Ok(Report {
        problem: config.problem.clone(),
        algorithm: config.algorithm,
        constraint: config.constraint,
        solutions,
        completed,
        stats,
    })
}

fn enumerate<S, C>(
    mut solver: Solver<'_, S, C>,
    limit: usize,
    cost: impl Fn(&S) -> f64,
) -> (Vec<SolutionReport>, bool, Stats)
where
    S: State<C> + Clone + Display,
{
    let mut solutions = Vec::new();
    while solutions.len() < limit {
        let result = solver.solve();
        let Some(goal) = result.goal() else {
            break;
        };
        info!(
            "solution {}: cost {:?}, length {:?}",
            solutions.len() + 1,
            cost(goal),
            result.solution.len()
        );
        solutions.push(SolutionReport {
            cost: cost(goal),
            path: result.solution.iter().map(ToString::to_string).collect(),
        });
    }
    (solutions, solver.completed(), solver.stats().clone())
}
