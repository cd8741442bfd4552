use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub visited: usize,
    pub expanded: usize,
    // zero unless IDA*
    pub iterations: usize,
    pub solutions: usize,
    pub time_us: u128,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Solutions {:?} Visited {:?} Expanded {:?} Iterations {:?} Time(microseconds) {:?}",
            self.solutions, self.visited, self.expanded, self.iterations, self.time_us
        );
    }
}
