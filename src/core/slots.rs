/// Fixed-capacity slot allocator.
///
/// Slots are addressed by index and allocation always takes the lowest free index.
/// The index itself carries no meaning beyond allocation order.
#[derive(Debug, Clone)]
pub struct SlotArray<T, const N: usize> {
    slots: [Option<T>; N],
}

impl<T, const N: usize> SlotArray<T, N> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Lowest empty slot index
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.first_free().is_none()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Place `item` in the lowest free slot, handing it back when every slot is taken
    pub fn insert(&mut self, item: T) -> Result<usize, T> {
        match self.first_free() {
            Some(index) => {
                self.slots[index] = Some(item);
                Ok(index)
            }
            None => Err(item),
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Empty the slot and return what it held
    pub fn take(&mut self, index: usize) -> Option<T> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Index of the first occupied slot whose item satisfies `pred`
    pub fn position<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().map_or(false, &mut pred))
    }

    /// Every slot in index order, `None` for empty ones
    pub fn slots(&self) -> impl Iterator<Item = Option<&T>> {
        self.slots.iter().map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().flatten()
    }
}

impl<T, const N: usize> Default for SlotArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_empty_wins() {
        let mut slots: SlotArray<&str, 3> = SlotArray::new();
        assert_eq!(slots.insert("a"), Ok(0));
        assert_eq!(slots.insert("b"), Ok(1));
        assert_eq!(slots.take(0), Some("a"));
        // freed slot 0 is reused before slot 2
        assert_eq!(slots.insert("c"), Ok(0));
        assert_eq!(slots.insert("d"), Ok(2));
        assert!(slots.is_full());
        assert_eq!(slots.insert("e"), Err("e"));
        assert_eq!(slots.occupied(), 3);
    }

    #[test]
    fn test_position_skips_empty_slots() {
        let mut slots: SlotArray<u32, 3> = SlotArray::new();
        slots.insert(1).unwrap();
        slots.insert(2).unwrap();
        slots.insert(3).unwrap();
        slots.take(1);
        assert_eq!(slots.position(|v| *v > 1), Some(2));
        assert_eq!(slots.position(|v| *v > 5), None);
        assert_eq!(slots.get(1), None);
        assert_eq!(slots.take(7), None);
    }
}
