use crate::state::{Identify, State};

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::BufReader;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edge {
    pub to: String,
    pub cost: f64,
}

// Without a goal list, names starting with an upper case letter are goals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Graph {
    pub root: String,
    #[serde(default)]
    pub goals: HashSet<String>,
    #[serde(default)]
    pub edges: HashMap<String, Vec<Edge>>,
}

impl Graph {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let graph: Graph = serde_yaml::from_str(yaml)?;
        graph.validate()?;
        Ok(graph)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open graph file {path}"))?;
        let graph: Graph = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("error with graph file: {path}"))?;
        graph.validate()?;
        Ok(graph)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.root.is_empty() {
            bail!("Graph root must not be empty");
        }
        for (from, edges) in &self.edges {
            if let Some(edge) = edges.iter().find(|edge| edge.cost.is_nan()) {
                bail!("Edge {from} -> {} has no valid cost", edge.to);
            }
        }
        Ok(())
    }

    pub fn root_state(&self) -> GraphState {
        GraphState {
            node: self.root.clone(),
            cost: 0.0,
        }
    }

    fn is_goal(&self, node: &str) -> bool {
        if self.goals.is_empty() {
            return node.starts_with(|c: char| c.is_uppercase());
        }
        self.goals.contains(node)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphState {
    pub node: String,
    pub cost: f64,
}

impl State<Graph> for GraphState {
    fn cost(&self, _graph: &Graph) -> f64 {
        self.cost
    }

    fn is_goal(&self, graph: &Graph) -> bool {
        graph.is_goal(&self.node)
    }

    fn expand(&self, graph: &Graph) -> Vec<Self> {
        graph
            .edges
            .get(&self.node)
            .into_iter()
            .flatten()
            .map(|edge| GraphState {
                node: edge.to.clone(),
                cost: self.cost + edge.cost,
            })
            .collect()
    }
}

impl Identify for GraphState {
    type Id = String;

    fn id(&self) -> String {
        self.node.clone()
    }
}

impl fmt::Display for GraphState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.node, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{Algorithm, ConstraintKind, Solver};

    const CYCLIC: &str = r#"
root: a
edges:
  a: [{to: a, cost: 1}, {to: b, cost: 1}]
  b: [{to: c, cost: 1}, {to: d, cost: 2}]
  c: [{to: a, cost: 1}, {to: d, cost: 1}]
  d: [{to: E, cost: 1}]
"#;

    fn nodes(solution: &[GraphState]) -> Vec<&str> {
        solution.iter().map(|state| state.node.as_str()).collect()
    }

    #[test]
    fn test_load_graph() {
        let graph = Graph::from_yaml_str(CYCLIC).unwrap();
        assert_eq!(graph.root, "a");
        assert!(graph.goals.is_empty());
        assert_eq!(graph.edges["b"].len(), 2);
        assert_eq!(
            graph.edges["d"][0],
            Edge {
                to: "E".to_string(),
                cost: 1.0
            }
        );

        assert!(Graph::from_yaml_str("root: ''").is_err());
        assert!(Graph::from_yaml_str("edges: {}").is_err());
        assert!(Graph::from_file("problem_file/missing.yaml").is_err());
    }

    #[test]
    fn test_goal_rule() {
        let mut graph = Graph::from_yaml_str(CYCLIC).unwrap();
        assert!(graph.is_goal("E"));
        assert!(!graph.is_goal("a"));

        graph.goals.insert("c".to_string());
        assert!(graph.is_goal("c"));
        assert!(!graph.is_goal("E"));
    }

    #[test]
    fn test_expand_accumulates_cost() {
        let graph = Graph::from_yaml_str(CYCLIC).unwrap();
        let children = graph.root_state().expand(&graph);
        assert_eq!(nodes(&children), vec!["a", "b"]);
        assert!(children.iter().all(|child| child.cost == 1.0));
        assert!(GraphState {
            node: "E".to_string(),
            cost: 4.0
        }
        .expand(&graph)
        .is_empty());
    }

    #[test]
    fn test_solve_cyclic_graph() {
        let graph = Graph::from_yaml_str(CYCLIC).unwrap();
        for algorithm in [Algorithm::AStar, Algorithm::IdaStar, Algorithm::BreadthFirst] {
            let mut solver = Solver::new(graph.root_state())
                .algorithm(algorithm)
                .boxed_constraint(ConstraintKind::CheapestPath.build())
                .context(graph.clone());
            let result = solver.solve();
            assert_eq!(nodes(&result.solution), vec!["a", "b", "d", "E"]);
            assert_eq!(result.goal().map(|goal| goal.cost), Some(4.0));
        }
    }

    #[test]
    fn test_sample_files() {
        let graph = Graph::from_file("problem_file/three_goals.yaml").unwrap();
        assert_eq!(graph.goals.len(), 3);
        let graph = Graph::from_file("problem_file/cyclic.yaml").unwrap();
        assert_eq!(graph.edges.len(), 4);
    }
}
