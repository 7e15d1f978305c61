//! Arena for binary code trees.
//! Nodes are kept in a vector and refer to their sons by index, so a finished
//! tree can be lent to any number of readers without reference counting.

/// A node in the pool.  Sons are indexed by the bit that selects them.
#[derive(Clone,Debug,PartialEq)]
pub enum Node {
    Leaf { symbol: u8, weight: u64 },
    Branch { weight: u64, down: [Option<usize>;2] }
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Branch { weight, .. } => *weight
        }
    }
}

#[derive(Clone,Debug,PartialEq,Default)]
pub struct NodePool {
    nodes: Vec<Node>
}

impl NodePool {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }
    pub fn with_capacity(n: usize) -> Self {
        Self { nodes: Vec::with_capacity(n) }
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn get(&self,idx: usize) -> &Node {
        &self.nodes[idx]
    }
    /// add a leaf, returns its index
    pub fn spawn_leaf(&mut self,symbol: u8,weight: u64) -> usize {
        self.nodes.push(Node::Leaf { symbol, weight });
        self.nodes.len() - 1
    }
    /// add a branch over `left` and optionally `right`, weight is the sum of the sons
    pub fn spawn_branch(&mut self,left: usize,right: Option<usize>) -> usize {
        let weight = self.nodes[left].weight() + right.map_or(0,|r| self.nodes[r].weight());
        self.nodes.push(Node::Branch { weight, down: [Some(left),right] });
        self.nodes.len() - 1
    }
    /// add a branch with no sons yet, used when growing a tree from codes
    pub fn spawn_empty_branch(&mut self) -> usize {
        self.nodes.push(Node::Branch { weight: 0, down: [None,None] });
        self.nodes.len() - 1
    }
    /// Follow the son selected by `bit`, `None` if there is no such son or `idx` is a leaf.
    pub fn down(&self,idx: usize,bit: bool) -> Option<usize> {
        match &self.nodes[idx] {
            Node::Branch { down, .. } => down[bit as usize],
            Node::Leaf { .. } => None
        }
    }
    /// Attach `son` below the branch `idx` on side `bit`.
    /// Panics if `idx` is a leaf, callers only attach to branches they created.
    pub fn attach(&mut self,idx: usize,bit: bool,son: usize) {
        match &mut self.nodes[idx] {
            Node::Branch { down, .. } => down[bit as usize] = Some(son),
            Node::Leaf { .. } => panic!("cannot attach below a leaf")
        }
    }
}

#[test]
fn branch_weight_is_sum() {
    let mut pool = NodePool::new();
    let a = pool.spawn_leaf(b'a',5);
    let b = pool.spawn_leaf(b'b',2);
    let ab = pool.spawn_branch(a,Some(b));
    assert_eq!(pool.get(ab).weight(),7);
    assert_eq!(pool.down(ab,false),Some(a));
    assert_eq!(pool.down(ab,true),Some(b));
    assert_eq!(pool.down(a,false),None);
}

#[test]
fn lone_son() {
    let mut pool = NodePool::new();
    let a = pool.spawn_leaf(b'a',4);
    let root = pool.spawn_branch(a,None);
    assert_eq!(pool.get(root).weight(),4);
    assert_eq!(pool.down(root,true),None);
}

#[test]
fn grow_by_attaching() {
    let mut pool = NodePool::new();
    let root = pool.spawn_empty_branch();
    let x = pool.spawn_leaf(b'x',0);
    pool.attach(root,true,x);
    assert_eq!(pool.down(root,true),Some(x));
    assert_eq!(pool.down(root,false),None);
    assert_eq!(pool.len(),2);
}
