//! Fixed-capacity ring of dot transforms
//!
//! One 4x4 transform per slot. `used` only ever grows; the slot written next
//! is `used % capacity`. Slots that were never written stay at identity.

use glam::Mat4;

#[derive(Debug, Clone)]
pub struct DotRing {
    slots: Vec<Mat4>,
    /// Total dots ever placed since the last reset
    used: u64,
    /// Set when slots changed since the last upload
    dirty: bool,
}

impl DotRing {
    /// Allocate `capacity` identity slots (at least one)
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Mat4::IDENTITY; capacity.max(1)],
            used: 0,
            dirty: false,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Monotonic write counter
    #[inline]
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Slots holding a placed dot, `min(used, capacity)`
    #[inline]
    pub fn active_count(&self) -> usize {
        self.used.min(self.capacity() as u64) as usize
    }

    /// Slot the next placement will overwrite
    #[inline]
    pub fn next_slot(&self) -> usize {
        (self.used % self.capacity() as u64) as usize
    }

    /// Overwrite a single slot; out-of-range indices wrap
    pub fn write(&mut self, index: usize, transform: Mat4) {
        let cap = self.capacity();
        self.slots[index % cap] = transform;
    }

    /// Write into the next slot and advance the cursor, returning the slot used
    pub fn push(&mut self, transform: Mat4) -> usize {
        let slot = self.next_slot();
        self.write(slot, transform);
        self.used += 1;
        slot
    }

    pub fn get(&self, index: usize) -> Option<&Mat4> {
        self.slots.get(index)
    }

    /// All slots, including never-written identity ones
    pub fn transforms(&self) -> &[Mat4] {
        &self.slots
    }

    /// Back to all-identity with the cursor at zero
    pub fn reset(&mut self) {
        self.slots.fill(Mat4::IDENTITY);
        self.used = 0;
        self.dirty = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// True when every slot is identity
    pub fn is_clear(&self) -> bool {
        self.slots.iter().all(|m| *m == Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn dot_at(i: usize) -> Mat4 {
        Mat4::from_translation(Vec3::new(i as f32 + 1.0, 0.0, 0.0))
    }

    #[test]
    fn test_fill_below_capacity() {
        let mut ring = DotRing::new(8);
        for i in 0..5 {
            assert_eq!(ring.push(dot_at(i)), i);
        }
        assert_eq!(ring.used(), 5);
        assert_eq!(ring.active_count(), 5);
        for i in 0..5 {
            assert_ne!(ring.transforms()[i], Mat4::IDENTITY);
        }
        for i in 5..8 {
            assert_eq!(ring.transforms()[i], Mat4::IDENTITY);
        }
    }

    #[test]
    fn test_wraparound_overwrites_oldest() {
        let cap = 10;
        let mut ring = DotRing::new(cap);
        for i in 0..cap + 5 {
            ring.push(dot_at(i));
        }
        assert_eq!(ring.used(), (cap + 5) as u64);
        assert_eq!(ring.active_count(), cap);

        let overwritten = (0..cap)
            .filter(|&i| ring.transforms()[i] != dot_at(i))
            .count();
        assert_eq!(overwritten, 5);
        for i in 0..5 {
            assert_eq!(ring.transforms()[i], dot_at(cap + i));
        }
        assert_eq!(ring.next_slot(), 5);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ring = DotRing::new(4);
        ring.push(dot_at(0));
        ring.push(dot_at(1));
        ring.take_dirty();

        ring.reset();
        assert!(ring.is_clear());
        assert_eq!(ring.used(), 0);
        assert_eq!(ring.active_count(), 0);
        assert!(ring.take_dirty());
        assert!(!ring.is_dirty());
    }

    #[test]
    fn test_zero_capacity_rounds_up() {
        let mut ring = DotRing::new(0);
        assert_eq!(ring.capacity(), 1);
        ring.push(dot_at(0));
        ring.push(dot_at(1));
        assert_eq!(ring.transforms()[0], dot_at(1));
    }

    #[test]
    fn test_write_wraps_index() {
        let mut ring = DotRing::new(4);
        ring.write(6, dot_at(3));
        assert_eq!(ring.transforms()[2], dot_at(3));
        // Direct writes don't move the cursor
        assert_eq!(ring.used(), 0);
    }
}
