use crate::core::sample::RawSample;

/// Fixed-capacity, arrival-ordered buffer of the most recent raw samples.
///
/// Backed by a fixed arena of K slots with a write cursor rather than a
/// growable list: push and evict are O(1) and nothing is allocated after
/// construction. Order is arrival order, which is the only ordering signal
/// the sensor provides. Samples are never mutated once pushed; the window
/// only stores and evicts.
#[derive(Debug)]
pub struct SampleWindow {
    slots: Vec<Option<RawSample>>,
    /// Next slot to write; wraps around the arena.
    head: usize,
    len: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        // A zero-capacity window would make every tick a no-op forever.
        let capacity = capacity.max(1);
        Self {
            slots: vec![None; capacity],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a sample, evicting the oldest one once the window is full.
    pub fn push(&mut self, sample: RawSample) {
        self.slots[self.head] = Some(sample);
        self.head = (self.head + 1) % self.slots.len();
        if self.len < self.slots.len() {
            self.len += 1;
        }
    }

    /// Returns the current window contents, oldest first.
    pub fn snapshot_window(&self) -> Vec<RawSample> {
        let cap = self.slots.len();
        let start = (self.head + cap - self.len) % cap;
        (0..self.len)
            .filter_map(|i| self.slots[(start + i) % cap].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(mass_kg: f64) -> RawSample {
        RawSample {
            mass_kg,
            ..Default::default()
        }
    }

    fn masses(window: &SampleWindow) -> Vec<f64> {
        window.snapshot_window().iter().map(|s| s.mass_kg).collect()
    }

    #[test]
    fn fills_in_arrival_order() {
        let mut window = SampleWindow::new(5);
        for m in [1.0, 2.0, 3.0] {
            window.push(sample(m));
        }
        assert_eq!(window.len(), 3);
        assert_eq!(masses(&window), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let mut window = SampleWindow::new(5);
        for m in 1..=8 {
            window.push(sample(m as f64));
        }
        // Exactly the 5 most recent, still in arrival order.
        assert_eq!(window.len(), 5);
        assert_eq!(masses(&window), vec![4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut window = SampleWindow::new(3);
        for m in 0..100 {
            window.push(sample(m as f64));
            assert!(window.len() <= window.capacity());
        }
        assert_eq!(masses(&window), vec![97.0, 98.0, 99.0]);
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut window = SampleWindow::new(0);
        window.push(sample(7.0));
        assert_eq!(masses(&window), vec![7.0]);
    }
}
