//! Connected components of the forecaster/question bipartite graph.
//!
//! Effects are only comparable within a component; more than one means the
//! decomposition is not fully identified.

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Count components over `(forecaster, question)` edges. Nodes without edges are ignored.
pub fn count_components(
    n_forecasters: usize,
    n_questions: usize,
    edges: impl IntoIterator<Item = (usize, usize)>,
) -> usize {
    let mut uf = UnionFind::new(n_forecasters + n_questions);
    let mut touched = vec![false; n_forecasters + n_questions];
    for (f, q) in edges {
        let qn = n_forecasters + q;
        touched[f] = true;
        touched[qn] = true;
        uf.union(f, qn);
    }
    let mut roots: Vec<usize> = (0..touched.len())
        .filter(|&i| touched[i])
        .map(|i| uf.find(i))
        .collect();
    roots.sort_unstable();
    roots.dedup();
    roots.len()
}
