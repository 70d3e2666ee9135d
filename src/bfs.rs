/// This module implements a breadth-first search in the style of
/// [pathfinding's bfs function](https://docs.rs/pathfinding/latest/pathfinding/directed/bfs/index.html).
/// The insertion-ordered parent map doubles as the visited set and the FIFO
/// queue: nodes are expanded in the order they were first discovered.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::Vacant;
use indexmap::IndexMap;

use std::hash::Hash;
use std::iter;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

fn reverse_path<N>(parents: &FxIndexMap<N, usize>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = iter::successors(Some(start), |&i| {
        parents.get_index(i).map(|(_, &parent)| parent)
    })
    .map_while(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Returns the shortest path (in number of edges) from `start` to the first
/// node for which `success` holds, including both ends. Successors are
/// discovered in the order `successors` yields them, which decides between
/// paths of equal length. Each node is visited at most once.
pub fn bfs<N, FN, IN, FS>(start: &N, mut successors: FN, mut success: FS) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FS: FnMut(&N) -> bool,
{
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), usize::MAX);
    let mut index = 0;
    while let Some((node, _)) = parents.get_index(index) {
        if success(node) {
            return Some(reverse_path(&parents, index));
        }
        for successor in successors(node) {
            if let Vacant(e) = parents.entry(successor) {
                e.insert(index);
            }
        }
        index += 1;
    }
    None
}
