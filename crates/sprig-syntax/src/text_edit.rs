use text_size::{TextRange, TextSize};

/// A single edit: delete `delete`, then insert `insert` at its start.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Indel {
    pub insert: String,
    /// Refers to offsets in the original text.
    pub delete: TextRange,
}

impl Indel {
    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self::replace(TextRange::empty(offset), text)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::replace(range, String::new())
    }

    pub fn replace(range: TextRange, replace_with: impl Into<String>) -> Self {
        Self { delete: range, insert: replace_with.into() }
    }

    pub fn apply(&self, text: &mut String) {
        let start: usize = self.delete.start().into();
        let end: usize = self.delete.end().into();
        text.replace_range(start..end, &self.insert);
    }

    /// Length of the inserted text.
    pub fn insert_len(&self) -> TextSize {
        TextSize::of(self.insert.as_str())
    }

    /// The range the inserted text occupies after the edit.
    pub fn inserted_range(&self) -> TextRange {
        TextRange::at(self.delete.start(), self.insert_len())
    }

    /// Maps an offset at or after the deleted range into the edited text.
    pub fn shift_after(&self, offset: TextSize) -> TextSize {
        debug_assert!(offset >= self.delete.end());
        offset - self.delete.len() + self.insert_len()
    }
}

#[cfg(test)]
mod tests {
    use text_size::{TextRange, TextSize};

    use super::Indel;

    #[test]
    fn apply_replaces_the_range() {
        let mut text = String::from("fn f() {}");
        let edit = Indel::replace(TextRange::new(3.into(), 4.into()), "main");
        edit.apply(&mut text);
        assert_eq!(text, "fn main() {}");
        assert_eq!(edit.inserted_range(), TextRange::new(3.into(), 7.into()));
        assert_eq!(edit.shift_after(TextSize::new(9)), TextSize::new(12));
    }

    #[test]
    fn insert_and_delete() {
        let mut text = String::from("ab");
        Indel::insert(1.into(), "xyz").apply(&mut text);
        assert_eq!(text, "axyzb");
        Indel::delete(TextRange::new(0.into(), 2.into())).apply(&mut text);
        assert_eq!(text, "yzb");
    }
}
