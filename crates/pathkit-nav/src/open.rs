use pathkit_core::NodeId;

const ABSENT: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: NodeId,
    f: f64,
}

/// Indexed binary min-heap of open nodes keyed by f-cost, with decrease-key.
///
/// Ties: an entry moving up stops below an equal parent; moving down, the left child wins
/// ties and the entry stops above an equal child. This keeps expansion order reproducible for
/// a fixed graph and heuristic.
#[derive(Debug, Default)]
pub struct OpenList {
    heap: Vec<Entry>,
    slots: Vec<usize>,
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the list and size the slot table for `node_count` nodes.
    pub fn reset(&mut self, node_count: usize) {
        self.heap.clear();
        self.slots.clear();
        self.slots.resize(node_count, ABSENT);
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.get(id.index()).is_some_and(|&s| s != ABSENT)
    }

    /// Priority of `id` while it is queued.
    pub fn priority(&self, id: NodeId) -> Option<f64> {
        let slot = *self.slots.get(id.index())?;
        self.heap.get(slot).map(|e| e.f)
    }

    /// Insert `id`, or re-prioritise it if already queued.
    pub fn push(&mut self, id: NodeId, f: f64) {
        if id.index() >= self.slots.len() {
            self.slots.resize(id.index() + 1, ABSENT);
        }
        match self.slots[id.index()] {
            ABSENT => {
                self.heap.push(Entry { id, f });
                self.sift_up(self.heap.len() - 1);
            }
            slot => {
                let old = self.heap[slot].f;
                self.heap[slot].f = f;
                if f.total_cmp(&old).is_lt() {
                    self.sift_up(slot);
                } else {
                    self.sift_down(slot);
                }
            }
        }
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        let last = self.heap.pop()?;
        let top = if self.heap.is_empty() {
            last
        } else {
            let top = self.heap[0];
            self.heap[0] = last;
            self.slots[last.id.index()] = 0;
            self.sift_down(0);
            top
        };
        self.slots[top.id.index()] = ABSENT;
        Some(top.id)
    }

    fn sift_up(&mut self, mut k: usize) {
        let entry = self.heap[k];
        while k > 0 {
            let parent = (k - 1) / 2;
            if entry.f.total_cmp(&self.heap[parent].f).is_ge() {
                break;
            }
            self.place(k, self.heap[parent]);
            k = parent;
        }
        self.place(k, entry);
    }

    fn sift_down(&mut self, mut k: usize) {
        let entry = self.heap[k];
        let len = self.heap.len();
        let half = len / 2;
        while k < half {
            let mut child = 2 * k + 1;
            let right = child + 1;
            if right < len && self.heap[child].f.total_cmp(&self.heap[right].f).is_gt() {
                child = right;
            }
            if entry.f.total_cmp(&self.heap[child].f).is_le() {
                break;
            }
            self.place(k, self.heap[child]);
            k = child;
        }
        self.place(k, entry);
    }

    fn place(&mut self, k: usize, entry: Entry) {
        self.heap[k] = entry;
        self.slots[entry.id.index()] = k;
    }
}
