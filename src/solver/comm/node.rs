use crate::state::State;

use std::rc::Rc;

pub type NodeRef<S> = Rc<Node<S>>;

#[derive(Debug)]
pub struct Node<S> {
    parent: Option<NodeRef<S>>,
    state: S,
    cost: f64,
    // max(parent.value, cost + heuristic); never decreases along a path.
    value: f64,
}

impl<S> Node<S> {
    pub(crate) fn new(parent: Option<NodeRef<S>>, state: S, cost: f64, value: f64) -> Self {
        Node {
            parent,
            state,
            cost,
            value,
        }
    }

    pub fn root<C>(state: S, ctx: &C) -> NodeRef<S>
    where
        S: State<C>,
    {
        let cost = state.cost(ctx);
        let value = cost + state.heuristic(ctx);
        Rc::new(Node::new(None, state, cost, value))
    }

    // A NaN estimate or a NaN parent makes the child NaN, which the search
    // loop refuses. `f64::max` alone would drop it.
    pub fn child<C>(parent: &NodeRef<S>, state: S, ctx: &C) -> Self
    where
        S: State<C>,
    {
        let cost = state.cost(ctx);
        let estimate = cost + state.heuristic(ctx);
        let value = if estimate.is_nan() || parent.value.is_nan() {
            f64::NAN
        } else {
            parent.value.max(estimate)
        };
        Node::new(Some(Rc::clone(parent)), state, cost, value)
    }

    pub fn parent(&self) -> Option<&NodeRef<S>> {
        self.parent.as_ref()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn ancestors(&self) -> Ancestors<'_, S> {
        Ancestors {
            next: self.parent.as_deref(),
        }
    }

    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    pub fn path(&self) -> Vec<S>
    where
        S: Clone,
    {
        let mut path = vec![self.state.clone()];
        path.extend(self.ancestors().map(|node| node.state.clone()));
        path.reverse();
        path
    }
}

// Unlink the chain iteratively; the default recursive drop overflows the
// stack on deep depth-first paths.
impl<S> Drop for Node<S> {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Rc::try_unwrap(node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

pub struct Ancestors<'a, S> {
    next: Option<&'a Node<S>>,
}

impl<'a, S> Iterator for Ancestors<'a, S> {
    type Item = &'a Node<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent.as_deref();
        Some(node)
    }
}
