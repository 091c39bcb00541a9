//! Ordered partitions of integers.

#[cfg(test)]
#[path = "partition_tests.rs"]
mod partition_tests;

/// An iterator over all partitions of a non-negative integer $`n`$ into $`k > 0`$ ordered
/// non-negative parts, in reverse lexicographic order. For $`n = 2`$ and $`k = 3`$, the partitions
/// are `[2, 0, 0]`, `[1, 1, 0]`, `[1, 0, 1]`, `[0, 2, 0]`, `[0, 1, 1]`, and `[0, 0, 2]`.
#[derive(Clone, Debug)]
pub struct FixedOrderedIntegerPartitions {
    n: usize,

    k: usize,

    /// The next partition to be yielded, or `None` once the range is exhausted.
    partition: Option<Vec<usize>>,
}

impl FixedOrderedIntegerPartitions {
    /// Creates an iterator over the partitions of `n` into `k` parts.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero.
    pub fn new(n: usize, k: usize) -> Self {
        assert!(k > 0, "The number of parts must be at least 1.");
        let mut partition = vec![0; k];
        partition[0] = n;
        Self {
            n,
            k,
            partition: Some(partition),
        }
    }

    /// The total number of partitions in the range, $`\binom{n + k - 1}{n}`$.
    pub fn range_size(&self) -> usize {
        (1..=self.n).fold(1, |acc, d| acc * (self.k + d - 1) / d)
    }
}

/// Returns `true` if `partition` is the last in its range, *i.e.* all of its sum is in the final
/// part.
fn is_last(partition: &[usize]) -> bool {
    partition.last().copied() == Some(partition.iter().sum::<usize>())
}

/// Moves all of the sum of `partition` into its first part.
fn reset(partition: &mut [usize]) {
    let n = partition.iter().sum::<usize>();
    partition.fill(0);
    partition[0] = n;
}

/// Advances `partition` to the next partition in reverse lexicographic order. `partition` must
/// not be the last one.
fn advance(partition: &mut [usize]) {
    if partition.len() == 1 {
        return;
    }
    if is_last(&partition[1..]) {
        partition[0] -= 1;
        partition[1] += 1;
        reset(&mut partition[1..]);
    } else {
        advance(&mut partition[1..]);
    }
}

impl Iterator for FixedOrderedIntegerPartitions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.partition.take()?;
        if !is_last(&current) {
            let mut next = current.clone();
            advance(&mut next);
            self.partition = Some(next);
        }
        Some(current)
    }
}

/// Iterates over the geometric derivatives of a given order over a number of centres. Each item
/// gives the derivative order with respect to each of the $`3N`$ Cartesian coordinates.
pub fn cartesian_deriv_indices(ncenters: usize, order: usize) -> FixedOrderedIntegerPartitions {
    FixedOrderedIntegerPartitions::new(order, 3 * ncenters)
}
