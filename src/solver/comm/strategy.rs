use super::node::NodeRef;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

const INITIAL_CAPACITY: usize = 64;

pub trait Strategy<S> {
    fn take(&mut self) -> Option<NodeRef<S>>;

    fn add(&mut self, node: NodeRef<S>);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Heap entry; lowest value first, then highest cost, then oldest.
struct QueueEntry<S> {
    node: NodeRef<S>,
    sequence: u64,
}

impl<S> PartialEq for QueueEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for QueueEntry<S> {}

impl<S> Ord for QueueEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .value()
            .total_cmp(&self.node.value())
            // Among equal totals prefer the larger sunk cost.
            .then_with(|| self.node.cost().total_cmp(&other.node.cost()))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<S> PartialOrd for QueueEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct PriorityQueue<S> {
    heap: BinaryHeap<QueueEntry<S>>,
    sequence: u64,
}

impl<S> PriorityQueue<S> {
    pub fn new() -> Self {
        PriorityQueue {
            heap: BinaryHeap::with_capacity(INITIAL_CAPACITY),
            sequence: 0,
        }
    }
}

impl<S> Default for PriorityQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Strategy<S> for PriorityQueue<S> {
    fn take(&mut self) -> Option<NodeRef<S>> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn add(&mut self, node: NodeRef<S>) {
        self.heap.push(QueueEntry {
            node,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

pub struct Stack<S> {
    nodes: Vec<NodeRef<S>>,
}

impl<S> Stack<S> {
    pub fn new() -> Self {
        Stack {
            nodes: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }
}

impl<S> Default for Stack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Strategy<S> for Stack<S> {
    fn take(&mut self) -> Option<NodeRef<S>> {
        self.nodes.pop()
    }

    fn add(&mut self, node: NodeRef<S>) {
        self.nodes.push(node);
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

pub struct Queue<S> {
    buffer: RingBuffer<NodeRef<S>>,
}

impl<S> Queue<S> {
    pub fn new() -> Self {
        Queue {
            buffer: RingBuffer::with_capacity(INITIAL_CAPACITY),
        }
    }
}

impl<S> Default for Queue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Strategy<S> for Queue<S> {
    fn take(&mut self) -> Option<NodeRef<S>> {
        self.buffer.pop_front()
    }

    fn add(&mut self, node: NodeRef<S>) {
        self.buffer.push_back(node);
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

// One slot is always free so that head == tail means empty.
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
}

impl<T> RingBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2).next_power_of_two();
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        RingBuffer {
            slots,
            head: 0,
            tail: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.tail.wrapping_sub(self.head) & self.mask()
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn push_back(&mut self, item: T) {
        if self.len() == self.capacity() - 1 {
            self.grow();
        }
        self.slots[self.tail] = Some(item);
        self.tail = (self.tail + 1) & self.mask();
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.head].take();
        self.head = (self.head + 1) & self.mask();
        item
    }

    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    fn grow(&mut self) {
        let len = self.len();
        let capacity = self.capacity() * 2;
        let mut slots = Vec::with_capacity(capacity);
        if self.head <= self.tail {
            slots.extend(self.slots[self.head..self.tail].iter_mut().map(Option::take));
        } else {
            // Live region wraps around the end of the buffer.
            slots.extend(self.slots[self.head..].iter_mut().map(Option::take));
            slots.extend(self.slots[..self.tail].iter_mut().map(Option::take));
        }
        slots.resize_with(capacity, || None);
        self.slots = slots;
        self.head = 0;
        self.tail = len;
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }
}

pub enum Frontier<S> {
    Priority(PriorityQueue<S>),
    Stack(Stack<S>),
    Queue(Queue<S>),
}

impl<S> Strategy<S> for Frontier<S> {
    fn take(&mut self) -> Option<NodeRef<S>> {
        match self {
            Frontier::Priority(queue) => queue.take(),
            Frontier::Stack(stack) => stack.take(),
            Frontier::Queue(queue) => queue.take(),
        }
    }

    fn add(&mut self, node: NodeRef<S>) {
        match self {
            Frontier::Priority(queue) => queue.add(node),
            Frontier::Stack(stack) => stack.add(node),
            Frontier::Queue(queue) => queue.add(node),
        }
    }

    fn len(&self) -> usize {
        match self {
            Frontier::Priority(queue) => queue.len(),
            Frontier::Stack(stack) => stack.len(),
            Frontier::Queue(queue) => queue.len(),
        }
    }
}
