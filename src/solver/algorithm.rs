mod general;
mod idastar;

pub(crate) use general::GeneralSearch;
pub(crate) use idastar::IdaStar;

use super::comm::{Frontier, PriorityQueue, Queue, Stack};

use anyhow::bail;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    AStar,
    IdaStar,
    BreadthFirst,
    DepthFirst,
}

impl Algorithm {
    pub(crate) fn frontier<S>(self) -> Frontier<S> {
        match self {
            Algorithm::AStar => Frontier::Priority(PriorityQueue::new()),
            Algorithm::BreadthFirst => Frontier::Queue(Queue::new()),
            Algorithm::IdaStar | Algorithm::DepthFirst => Frontier::Stack(Stack::new()),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Algorithm::AStar => "A*",
            Algorithm::IdaStar => "IDA*",
            Algorithm::BreadthFirst => "BreadthFirst",
            Algorithm::DepthFirst => "DepthFirst",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let algorithm = match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "a*" | "astar" => Algorithm::AStar,
            "ida*" | "idastar" => Algorithm::IdaStar,
            "breadth-first" | "breadthfirst" | "bfs" => Algorithm::BreadthFirst,
            "depth-first" | "depthfirst" | "dfs" => Algorithm::DepthFirst,
            _ => bail!("unknown algorithm: {s:?}"),
        };
        Ok(algorithm)
    }
}

impl Serialize for Algorithm {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::comm::Strategy;

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("idastar".parse::<Algorithm>().unwrap(), Algorithm::IdaStar);
        assert_eq!(
            "breadth_first".parse::<Algorithm>().unwrap(),
            Algorithm::BreadthFirst
        );
        assert_eq!("DFS".parse::<Algorithm>().unwrap(), Algorithm::DepthFirst);
        assert!("dijkstra".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for algorithm in [
            Algorithm::AStar,
            Algorithm::IdaStar,
            Algorithm::BreadthFirst,
            Algorithm::DepthFirst,
        ] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_deserialize_rejects_unknown_algorithm() {
        let algorithm: Algorithm = serde_yaml::from_str("ida*").unwrap();
        assert_eq!(algorithm, Algorithm::IdaStar);
        assert!(serde_yaml::from_str::<Algorithm>("greedy").is_err());
    }

    #[test]
    fn test_frontier_per_algorithm() {
        let frontier: Frontier<u8> = Algorithm::BreadthFirst.frontier();
        assert!(matches!(frontier, Frontier::Queue(_)));
        assert!(frontier.is_empty());
        assert!(matches!(Algorithm::AStar.frontier::<u8>(), Frontier::Priority(_)));
        assert!(matches!(Algorithm::IdaStar.frontier::<u8>(), Frontier::Stack(_)));
    }
}
