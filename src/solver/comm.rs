mod node;
mod strategy;

pub use node::{Ancestors, Node, NodeRef};
pub use strategy::{Frontier, PriorityQueue, Queue, RingBuffer, Stack, Strategy};
