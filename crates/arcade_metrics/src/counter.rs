//! Named event counters

use std::collections::BTreeMap;

#[derive(Default)]
pub struct Counter {
    counts: BTreeMap<&'static str, u64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, name: &'static str, by: u64) {
        *self.counts.entry(name).or_insert(0) += by;
    }

    pub fn get(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn reset_all(&mut self) {
        self.counts.clear();
    }

    /// Counters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.counts.iter().map(|(name, count)| (*name, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_accumulate_per_name() {
        let mut counter = Counter::new();
        counter.increment("spawned", 2);
        counter.increment("spawned", 3);
        counter.increment("destroyed", 1);

        assert_eq!(counter.get("spawned"), 5);
        assert_eq!(counter.get("missing"), 0);
        assert_eq!(
            counter.iter().collect::<Vec<_>>(),
            vec![("destroyed", 1), ("spawned", 5)]
        );
    }
}
