//! SkipList implementation
//!
//! Arena-backed skip list with span tracking for rank queries.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{MAX_LEVEL, P};

/// Handle of a node inside the arena
type NodeId = usize;

/// The sentinel header always occupies the first arena slot
const HEAD: NodeId = 0;

#[derive(Debug)]
struct Node {
    key: i64,
    value: String,

    /// `forward[i]` is the successor at level `i`
    forward: Vec<Option<NodeId>>,

    /// `span[i]` is the base-level distance to `forward[i]`.
    /// When `forward[i]` is `None` it holds the number of nodes after this one.
    span: Vec<usize>,
}

impl Node {
    fn new(height: usize, key: i64, value: String) -> Self {
        Self {
            key,
            value,
            forward: vec![None; height],
            span: vec![0; height],
        }
    }

    /// Placeholder left in a freed arena slot
    fn vacant() -> Self {
        Self::new(0, 0, String::new())
    }

    fn height(&self) -> usize {
        self.forward.len()
    }
}

/// Result of a top-down search for `key`
struct Descent {
    /// Last node visited at each level (the one whose link may be rewired)
    update: [NodeId; MAX_LEVEL],

    /// Base-level position of `update[i]`
    rank: [usize; MAX_LEVEL],
}

/// Sorted integer-keyed index with O(log n) rank queries
#[derive(Debug)]
pub struct SkipList {
    /// Node arena; slot 0 is the header
    nodes: Vec<Node>,

    /// Arena slots released by deletions
    free: Vec<NodeId>,

    /// Highest level populated by a real node (1 when empty)
    level: usize,

    /// Number of real nodes
    len: usize,

    rng: SmallRng,
}

impl SkipList {
    /// Create an empty skip list seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Create an empty skip list with a deterministic level sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            nodes: vec![Node::new(MAX_LEVEL, i64::MIN, String::new())],
            free: Vec::new(),
            level: 1,
            len: 0,
            rng,
        }
    }

    /// Draw a node height in `1..=MAX_LEVEL` by repeated coin flips
    pub fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < MAX_LEVEL && self.rng.gen_bool(P) {
            level += 1;
        }
        level
    }

    /// Look up the value stored under `key`
    pub fn search(&self, key: i64) -> Option<&str> {
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].forward[i] {
                if self.nodes[next].key >= key {
                    break;
                }
                x = next;
            }
        }

        match self.nodes[x].forward[0] {
            Some(found) if self.nodes[found].key == key => Some(&self.nodes[found].value),
            _ => None,
        }
    }

    /// Insert `key`, or overwrite its value if it is already present.
    ///
    /// Returns the previous value on overwrite.
    pub fn insert(&mut self, key: i64, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        let Descent { update, rank } = self.descend(key);

        // Keys are unique: replace in place, spans stay as they are.
        if let Some(existing) = self.nodes[update[0]].forward[0] {
            if self.nodes[existing].key == key {
                return Some(std::mem::replace(&mut self.nodes[existing].value, value));
            }
        }

        let height = self.random_level();
        if height > self.level {
            // update[i] is already HEAD and rank[i] is 0 above the old level
            for i in self.level..height {
                self.nodes[HEAD].span[i] = self.len;
            }
            self.level = height;
        }

        let id = self.alloc(Node::new(height, key, value));

        for i in 0..height {
            let prev = update[i];
            let hops = rank[0] - rank[i];

            self.nodes[id].forward[i] = self.nodes[prev].forward[i];
            self.nodes[prev].forward[i] = Some(id);

            self.nodes[id].span[i] = self.nodes[prev].span[i] - hops;
            self.nodes[prev].span[i] = hops + 1;
        }

        // Jumps that pass over the new node get one position longer
        for i in height..self.level {
            self.nodes[update[i]].span[i] += 1;
        }

        self.len += 1;
        None
    }

    /// Remove `key`, returning its value. Absent keys are a no-op.
    pub fn delete(&mut self, key: i64) -> Option<String> {
        let Descent { update, .. } = self.descend(key);

        let target = match self.nodes[update[0]].forward[0] {
            Some(found) if self.nodes[found].key == key => found,
            _ => return None,
        };

        let height = self.nodes[target].height();
        for i in 0..self.level {
            let prev = update[i];
            if i < height {
                debug_assert_eq!(self.nodes[prev].forward[i], Some(target));
                // prev.span[i] >= 1 here, so the sum cannot underflow
                let folded = self.nodes[prev].span[i] + self.nodes[target].span[i] - 1;
                self.nodes[prev].span[i] = folded;
                self.nodes[prev].forward[i] = self.nodes[target].forward[i];
            } else {
                self.nodes[prev].span[i] -= 1;
            }
        }

        while self.level > 1 && self.nodes[HEAD].forward[self.level - 1].is_none() {
            self.level -= 1;
        }

        self.len -= 1;
        let node = std::mem::replace(&mut self.nodes[target], Node::vacant());
        self.free.push(target);
        Some(node.value)
    }

    /// Remove every key in `start..=end`, returning how many were removed
    pub fn delete_range(&mut self, start: i64, end: i64) -> usize {
        let Descent { update, .. } = self.descend(start);

        let mut cursor = self.nodes[update[0]].forward[0];
        let mut removed = 0;
        while let Some(id) = cursor {
            let key = self.nodes[id].key;
            if key > end {
                break;
            }
            cursor = self.nodes[id].forward[0];
            self.delete(key);
            removed += 1;
        }
        removed
    }

    /// Number of keys strictly less than `key`
    pub fn rank(&self, key: i64) -> usize {
        let mut count = 0;
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].forward[i] {
                if self.nodes[next].key >= key {
                    break;
                }
                count += self.nodes[x].span[i];
                x = next;
            }
        }
        count
    }

    /// Keys reachable at each level, highest level first
    pub fn levels(&self) -> Vec<Vec<i64>> {
        (0..self.level)
            .rev()
            .map(|i| {
                let mut keys = Vec::new();
                let mut x = self.nodes[HEAD].forward[i];
                while let Some(id) = x {
                    keys.push(self.nodes[id].key);
                    x = self.nodes[id].forward[i];
                }
                keys
            })
            .collect()
    }

    /// Dump the level layout to stdout
    pub fn print_levels(&self) {
        print!("{self}");
    }

    /// Iterate `(key, value)` pairs in ascending key order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].forward[0],
        }
    }

    /// Number of keys stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest populated level
    pub fn level(&self) -> usize {
        self.level
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Walk down from the header, stopping at each level on the last node
    /// whose key is below `key`.
    fn descend(&self, key: i64) -> Descent {
        let mut update = [HEAD; MAX_LEVEL];
        let mut rank = [0usize; MAX_LEVEL];

        let mut x = HEAD;
        for i in (0..self.level).rev() {
            rank[i] = if i + 1 == self.level { 0 } else { rank[i + 1] };
            while let Some(next) = self.nodes[x].forward[i] {
                if self.nodes[next].key >= key {
                    break;
                }
                rank[i] += self.nodes[x].span[i];
                x = next;
            }
            update[i] = x;
        }

        Descent { update, rank }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }
}

impl Default for SkipList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SkipList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, keys) in self.levels().iter().enumerate() {
            write!(f, "Level {}:", self.level - depth)?;
            for key in keys {
                write!(f, " {key}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over SkipList entries
pub struct Iter<'a> {
    list: &'a SkipList,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i64, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = &self.list.nodes[id];
        self.cursor = node.forward[0];
        Some((node.key, node.value.as_str()))
    }
}
