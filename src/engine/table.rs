/// Fixed-size transposition table mapping position keys to stored bounds.
///
/// Slots are picked by `key % len`; a colliding store simply overwrites. A
/// stored value of 0 marks an empty slot.
pub struct TranspositionTable {
    keys: Vec<u64>,
    values: Vec<u8>,
}

impl TranspositionTable {
    pub fn new(entries: usize) -> Self {
        let entries = entries.max(1);
        TranspositionTable {
            keys: vec![0; entries],
            values: vec![0; entries],
        }
    }

    pub fn put(&mut self, key: u64, value: u8) {
        let index = self.index(key);
        self.keys[index] = key;
        self.values[index] = value;
    }

    pub fn get(&self, key: u64) -> Option<u8> {
        let index = self.index(key);
        if self.keys[index] == key && self.values[index] != 0 {
            Some(self.values[index])
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.keys.fill(0);
        self.values.fill(0);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn index(&self, key: u64) -> usize {
        (key % self.keys.len() as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_after_put() {
        let mut table = TranspositionTable::new(1009);
        table.put(42, 7);
        assert_eq!(table.get(42), Some(7));
        assert_eq!(table.get(43), None);
    }

    #[test]
    fn test_collision_overwrites() {
        let mut table = TranspositionTable::new(10);
        table.put(3, 1);
        table.put(13, 2);
        assert_eq!(table.get(3), None);
        assert_eq!(table.get(13), Some(2));
    }

    #[test]
    fn test_empty_slot_for_zero_key() {
        let mut table = TranspositionTable::new(10);
        assert_eq!(table.get(0), None);
        table.put(0, 5);
        assert_eq!(table.get(0), Some(5));
        table.clear();
        assert_eq!(table.get(0), None);
    }

    #[test]
    fn test_zero_entries_rounds_up() {
        let table = TranspositionTable::new(0);
        assert_eq!(table.len(), 1);
    }
}
