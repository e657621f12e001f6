//! Diagnostics reported while checking a file, and their rendering.

use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
use sprig_syntax::{SyntaxError, SyntaxErrorKind};
pub use text_size::TextRange;

#[salsa::accumulator]
#[derive(Debug, Clone)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
    label: &'static str,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range, label: "here" }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label(self.label))
                .fold(true),
        );
        renderer.render(message)
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(error: &SyntaxError) -> Self {
        let label = match error.kind() {
            SyntaxErrorKind::UnexpectedToken => "here",
            SyntaxErrorKind::UnterminatedConstruct => "unterminated",
        };
        Self { message: error.message().to_owned(), range: error.range(), label }
    }
}

#[cfg(test)]
mod tests {
    use sprig_syntax::{SyntaxError, SyntaxErrorKind, TextRange};

    use crate::{Diagnostic, Renderer};

    #[test]
    fn renders_message_and_location() {
        let text = "fn f( {}\n";
        let range = TextRange::new(6.into(), 7.into());
        let error = SyntaxError::new(SyntaxErrorKind::UnterminatedConstruct, "expected `)`", range);
        let diagnostic = Diagnostic::from(&error);

        let rendered = diagnostic.render(&Renderer::plain(), "main.rs", text).to_string();
        assert!(rendered.contains("error: expected `)`"), "{rendered}");
        assert!(rendered.contains("main.rs:1:7"), "{rendered}");
        assert!(rendered.contains("unterminated"), "{rendered}");
    }

    #[test]
    fn error_at_the_end_of_the_text() {
        let text = "fn f(";
        let diagnostic = Diagnostic::error("expected `)`", TextRange::empty(5.into()));
        assert_eq!(diagnostic.range(), TextRange::empty(5.into()));

        let rendered = diagnostic.render(&Renderer::plain(), "main.rs", text).to_string();
        assert!(rendered.contains("expected `)`"), "{rendered}");
    }
}
