use crate::solver::{Algorithm, ConstraintKind};

use anyhow::{bail, Context};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug, Default)]
#[command(
    name = "state-search",
    about = "Generic state space search: A*, IDA*, breadth-first and depth-first.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(long, help = "Path to the YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Search algorithm: astar, idastar, breadth-first or depth-first")]
    pub algorithm: Option<String>,

    #[arg(long, help = "Pruning constraint: none, no-return, no-loop or cheapest-path")]
    pub constraint: Option<String>,

    #[arg(long, help = "Nodes valued above this limit are not expanded")]
    pub limit: Option<f64>,

    #[arg(long, help = "Number of solutions to enumerate")]
    pub solutions: Option<usize>,

    #[arg(long, help = "Path to the JSON report")]
    pub output_path: Option<String>,

    #[arg(long, help = "Problem to solve: graph, swap-sort or sliding-puzzle")]
    pub problem: Option<String>,

    #[arg(long, help = "Graph problem: path to the YAML graph file")]
    pub graph_path: Option<String>,

    #[arg(
        long,
        help = "Swap sort problem: vector to sort",
        use_value_delimiter = true,
        allow_negative_numbers = true
    )]
    pub vector: Vec<i64>,

    #[arg(long, help = "Sliding puzzle: board width")]
    pub width: Option<usize>,

    #[arg(long, help = "Sliding puzzle: board height")]
    pub height: Option<usize>,

    #[arg(long, help = "Sliding puzzle: number of random moves from the solved board")]
    pub shuffles: Option<usize>,

    #[arg(long, help = "Sliding puzzle: seed for the random number generator")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProblemConfig {
    Graph {
        path: String,
    },
    SwapSort {
        vector: Vec<i64>,
    },
    SlidingPuzzle {
        width: usize,
        height: usize,
        shuffles: usize,
        seed: u64,
    },
}

impl Default for ProblemConfig {
    fn default() -> Self {
        ProblemConfig::SlidingPuzzle {
            width: 3,
            height: 3,
            shuffles: 30,
            seed: 0,
        }
    }
}

impl ProblemConfig {
    fn from_name(name: &str) -> anyhow::Result<Self> {
        let problem = match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "graph" => ProblemConfig::Graph {
                path: "problem_file/cyclic.yaml".to_string(),
            },
            "swap-sort" => ProblemConfig::SwapSort {
                vector: vec![3, 2, 5, 4, 1],
            },
            "sliding-puzzle" => ProblemConfig::default(),
            _ => bail!("unknown problem: {name:?}"),
        };
        Ok(problem)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProblemConfig::Graph { .. } => "graph",
            ProblemConfig::SwapSort { .. } => "swap-sort",
            ProblemConfig::SlidingPuzzle { .. } => "sliding-puzzle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub algorithm: Algorithm,
    pub constraint: ConstraintKind,
    pub limit: f64,
    pub solutions: usize,
    pub output_path: Option<String>,
    pub problem: ProblemConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            algorithm: Algorithm::default(),
            constraint: ConstraintKind::default(),
            limit: f64::INFINITY,
            solutions: 1,
            output_path: None,
            problem: ProblemConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        Self::from_yaml_str(&yaml).with_context(|| format!("error with config file: {path}"))
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(algorithm) = &cli.algorithm {
            self.algorithm = algorithm.parse()?;
        }
        if let Some(constraint) = &cli.constraint {
            self.constraint = constraint.parse()?;
        }
        if let Some(limit) = cli.limit {
            self.limit = limit;
        }
        if let Some(solutions) = cli.solutions {
            self.solutions = solutions;
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }

        if let Some(problem) = &cli.problem {
            let problem = ProblemConfig::from_name(problem)?;
            if problem.name() != self.problem.name() {
                self.problem = problem;
            }
        }
        match &mut self.problem {
            ProblemConfig::Graph { path } => {
                if let Some(graph_path) = &cli.graph_path {
                    *path = graph_path.clone();
                }
            }
            ProblemConfig::SwapSort { vector } => {
                if !cli.vector.is_empty() {
                    *vector = cli.vector.clone();
                }
            }
            ProblemConfig::SlidingPuzzle {
                width,
                height,
                shuffles,
                seed,
            } => {
                *width = cli.width.unwrap_or(*width);
                *height = cli.height.unwrap_or(*height);
                *shuffles = cli.shuffles.unwrap_or(*shuffles);
                *seed = cli.seed.unwrap_or(*seed);
            }
        }
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.limit.is_nan() {
            bail!("Limit must be a number, got NaN");
        }
        if self.solutions == 0 {
            bail!("Number of solutions must be at least 1");
        }

        match &self.problem {
            ProblemConfig::Graph { path } => {
                if path.is_empty() {
                    bail!("Graph problem needs a graph file");
                }
            }
            ProblemConfig::SwapSort { vector } => {
                if vector.is_empty() {
                    bail!("Swap sort problem needs a non-empty vector");
                }
            }
            ProblemConfig::SlidingPuzzle { width, height, .. } => {
                if *width < 2 || *height < 2 {
                    bail!("Sliding puzzle must be at least 2x2, got {width}x{height}");
                }
                if width * height > u8::MAX as usize {
                    bail!(
                        "Sliding puzzle must have at most {} cells, got {}",
                        u8::MAX,
                        width * height
                    );
                }
            }
        }
        Ok(())
    }
}
