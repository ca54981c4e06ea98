/// Columns played so far, oldest first. Drives undo and reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    columns: Vec<usize>,
}

impl MoveHistory {
    pub fn new() -> Self {
        MoveHistory::default()
    }

    pub fn push(&mut self, col: usize) {
        self.columns.push(col);
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.columns.pop()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = MoveHistory::new();
        history.push(3);
        history.push(5);
        assert_eq!(history.as_slice(), &[3, 5]);
        assert_eq!(history.pop(), Some(5));
        assert_eq!(history.pop(), Some(3));
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }
}
