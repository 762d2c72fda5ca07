use std::cell::RefCell;
use std::rc::Rc;

use pathkit_core::Node;

use crate::{GraphPath, SearchRecord};

/// Synchronous hooks into a running search, for visualisation and tracing.
///
/// Observers run on the searching thread, in registration order, and cannot change the
/// outcome.
pub trait PathfinderObserver {
    /// `node` was popped from the open set and is now being examined.
    fn on_node(&mut self, _node: &Node, _record: &SearchRecord) {}

    /// The search ended; `path` is empty when the goal was unreachable.
    fn on_finish(&mut self, _path: &GraphPath) {}
}

/// Shared observers stay inspectable by the caller after the pathfinder has run.
impl<T: PathfinderObserver + ?Sized> PathfinderObserver for Rc<RefCell<T>> {
    fn on_node(&mut self, node: &Node, record: &SearchRecord) {
        self.borrow_mut().on_node(node, record);
    }

    fn on_finish(&mut self, path: &GraphPath) {
        self.borrow_mut().on_finish(path);
    }
}

/// Records every expansion and completion it sees.
#[derive(Debug, Clone, Default)]
pub struct SearchTrace {
    pub visited: Vec<Node>,
    pub records: Vec<SearchRecord>,
    pub finished: Vec<GraphPath>,
}

impl SearchTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn clear(&mut self) {
        self.visited.clear();
        self.records.clear();
        self.finished.clear();
    }

    pub fn last_path(&self) -> Option<&GraphPath> {
        self.finished.last()
    }
}

impl PathfinderObserver for SearchTrace {
    fn on_node(&mut self, node: &Node, record: &SearchRecord) {
        self.visited.push(*node);
        self.records.push(*record);
    }

    fn on_finish(&mut self, path: &GraphPath) {
        self.finished.push(path.clone());
    }
}
