//! Union-find over decomposition heads.

/// A disjoint-set forest stored in a single signed array.
///
/// Non-negative entries are parent links; negative entries mark roots and
/// encode the root's rank.
#[derive(Debug)]
pub struct UnionFind {
    /// Parent links, with negative rank encoding at roots.
    parents: Vec<isize>,
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
impl UnionFind {
    /// A forest of `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parents: vec![-1; len],
        }
    }

    /// The representative of `v`'s set, compressing the path behind it.
    pub fn find(&mut self, v: usize) -> usize {
        let mut root = v;
        while self.parents[root] >= 0 {
            root = self.parents[root] as usize;
        }
        let mut v = v;
        while self.parents[v] >= 0 {
            let next = self.parents[v] as usize;
            self.parents[v] = root as isize;
            v = next;
        }
        root
    }

    /// Merges the sets of `u` and `v` by rank. Returns `false` if they
    /// were already one set.
    pub fn union(&mut self, u: usize, v: usize) -> bool {
        let (mut pu, mut pv) = (self.find(u), self.find(v));
        if pu == pv {
            return false;
        }
        if self.parents[pv] < self.parents[pu] {
            std::mem::swap(&mut pu, &mut pv);
        }
        if self.parents[pu] == self.parents[pv] {
            self.parents[pu] -= 1;
        }
        self.parents[pv] = pu as isize;
        true
    }
}
