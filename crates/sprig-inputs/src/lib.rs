//! Source files fed into the database.

pub use line_index::{LineCol, LineIndex};
use text_size::TextSize;

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: camino::Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

impl File {
    /// Zero-based line and UTF-8 column of `offset`.
    pub fn line_col(self, db: &dyn salsa::Database, offset: TextSize) -> LineCol {
        self.line_index(db).line_col(offset)
    }
}

#[cfg(test)]
mod tests {
    use salsa::Setter as _;

    use super::*;

    #[test]
    fn line_index_follows_the_text() {
        let mut db = salsa::DatabaseImpl::new();
        let file = File::new(&db, "main.rs".into(), "fn f() {}\nfn g() {}\n".to_owned());
        assert_eq!(file.line_col(&db, 13.into()), LineCol { line: 1, col: 3 });

        file.set_text(&mut db).to("\n\nfn g() {}".to_owned());
        assert_eq!(file.line_col(&db, 5.into()), LineCol { line: 2, col: 3 });
    }
}
