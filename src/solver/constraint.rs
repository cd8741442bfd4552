use super::comm::Node;
use crate::state::Identify;

use anyhow::bail;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

// Both hooks return true when the node must be pruned.
pub trait Constraint<S> {
    fn on_visit(&mut self, node: &Node<S>) -> bool;

    fn on_expand(&mut self, node: &Node<S>) -> bool;

    fn reset(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoConstraint;

impl<S> Constraint<S> for NoConstraint {
    fn on_visit(&mut self, _node: &Node<S>) -> bool {
        false
    }

    fn on_expand(&mut self, _node: &Node<S>) -> bool {
        false
    }
}

// Depth 2 compares with the parent and the grandparent.
pub struct NoLoop<F> {
    depth: usize,
    same: F,
}

impl<F> NoLoop<F> {
    pub fn new(depth: usize, same: F) -> Self {
        NoLoop { depth, same }
    }

    pub fn no_return(same: F) -> Self {
        Self::new(2, same)
    }

    pub fn unbounded(same: F) -> Self {
        Self::new(usize::MAX, same)
    }
}

impl<S, F> Constraint<S> for NoLoop<F>
where
    F: Fn(&S, &S) -> bool,
{
    fn on_visit(&mut self, _node: &Node<S>) -> bool {
        false
    }

    fn on_expand(&mut self, node: &Node<S>) -> bool {
        node.ancestors()
            .take(self.depth)
            .any(|ancestor| (self.same)(ancestor.state(), node.state()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpEntry {
    pub value: f64,
    pub visited: bool,
}

pub trait CpStore<S> {
    fn get(&self, state: &S) -> Option<CpEntry>;

    fn put(&mut self, state: &S, entry: CpEntry);

    fn clear(&mut self);
}

pub struct KeyedStore<K, F> {
    entries: HashMap<K, CpEntry>,
    key: F,
}

impl<K, F> KeyedStore<K, F> {
    pub fn new(key: F) -> Self {
        KeyedStore {
            entries: HashMap::new(),
            key,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S, K, F> CpStore<S> for KeyedStore<K, F>
where
    K: Eq + Hash,
    F: Fn(&S) -> K,
{
    fn get(&self, state: &S) -> Option<CpEntry> {
        self.entries.get(&(self.key)(state)).copied()
    }

    fn put(&mut self, state: &S, entry: CpEntry) {
        self.entries.insert((self.key)(state), entry);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

// A state is kept on a strictly lower value, or on its first visit at the stored value.
pub struct CheapestPath<M> {
    store: M,
}

impl<M> CheapestPath<M> {
    pub fn new(store: M) -> Self {
        CheapestPath { store }
    }

    pub fn store(&self) -> &M {
        &self.store
    }
}

impl<S, M> Constraint<S> for CheapestPath<M>
where
    M: CpStore<S>,
{
    fn on_visit(&mut self, node: &Node<S>) -> bool {
        let value = node.value();
        let keep = match self.store.get(node.state()) {
            None => true,
            Some(entry) => value < entry.value || (value == entry.value && !entry.visited),
        };
        if keep {
            self.store.put(
                node.state(),
                CpEntry {
                    value,
                    visited: true,
                },
            );
        }
        !keep
    }

    fn on_expand(&mut self, node: &Node<S>) -> bool {
        let value = node.value();
        let keep = match self.store.get(node.state()) {
            None => true,
            Some(entry) => value < entry.value,
        };
        if keep {
            self.store.put(
                node.state(),
                CpEntry {
                    value,
                    visited: false,
                },
            );
        }
        !keep
    }

    fn reset(&mut self) {
        self.store.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstraintKind {
    #[default]
    None,
    NoReturn,
    NoLoop,
    CheapestPath,
}

impl ConstraintKind {
    pub fn build<'a, S>(self) -> Box<dyn Constraint<S> + 'a>
    where
        S: Identify + 'a,
    {
        let same = |a: &S, b: &S| a.id() == b.id();
        match self {
            ConstraintKind::None => Box::new(NoConstraint),
            ConstraintKind::NoReturn => Box::new(NoLoop::no_return(same)),
            ConstraintKind::NoLoop => Box::new(NoLoop::unbounded(same)),
            ConstraintKind::CheapestPath => {
                Box::new(CheapestPath::new(KeyedStore::new(|state: &S| state.id())))
            }
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::None => "none",
            ConstraintKind::NoReturn => "no-return",
            ConstraintKind::NoLoop => "no-loop",
            ConstraintKind::CheapestPath => "cheapest-path",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let kind = match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "none" => ConstraintKind::None,
            "no-return" => ConstraintKind::NoReturn,
            "no-loop" => ConstraintKind::NoLoop,
            "cheapest-path" => ConstraintKind::CheapestPath,
            _ => bail!("unknown constraint: {s:?}"),
        };
        Ok(kind)
    }
}

impl Serialize for ConstraintKind {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConstraintKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
