use sprig_syntax::SyntaxKind;
use sprig_tokenizer::Token;

type Bits = u64;

/// The parser's view of the token stream: kinds of the non-trivia tokens,
/// plus one bit per token telling whether the next token follows it with no
/// trivia in between. Composite punctuation is glued from those bits.
pub(crate) struct Input {
    kind: Vec<SyntaxKind>,
    joint: Vec<Bits>,
}

impl Input {
    pub(crate) fn new(tokens: &[Token<'_>]) -> Self {
        let mut input = Self { kind: Vec::with_capacity(tokens.len()), joint: Vec::new() };
        let mut was_joint = false;

        for token in tokens {
            if token.kind == SyntaxKind::EOF {
                break;
            }
            if token.kind.is_trivia() {
                was_joint = false;
                continue;
            }
            if was_joint {
                input.was_joint();
            }
            input.push(token.kind);
            was_joint = true;
        }

        input
    }

    pub(crate) fn kind(&self, idx: usize) -> SyntaxKind {
        self.kind.get(idx).copied().unwrap_or(SyntaxKind::EOF)
    }

    pub(crate) fn is_joint(&self, idx: usize) -> bool {
        let (word, bit) = Self::bit_index(idx);
        self.joint.get(word).is_some_and(|bits| bits & (1 << bit) != 0)
    }

    pub(crate) fn len(&self) -> usize {
        self.kind.len()
    }

    fn push(&mut self, kind: SyntaxKind) {
        let idx = self.kind.len();
        if idx.is_multiple_of(Bits::BITS as usize) {
            self.joint.push(0);
        }
        self.kind.push(kind);
    }

    /// Marks the last pushed token as joint with the next one.
    fn was_joint(&mut self) {
        let (word, bit) = Self::bit_index(self.kind.len() - 1);
        self.joint[word] |= 1 << bit;
    }

    fn bit_index(idx: usize) -> (usize, usize) {
        (idx / Bits::BITS as usize, idx % Bits::BITS as usize)
    }
}

#[cfg(test)]
mod tests {
    use sprig_syntax::SyntaxKind::*;

    use super::Input;

    #[test]
    fn trivia_breaks_jointness() {
        let tokens = sprig_tokenizer::tokenize("a::b : :c");
        let input = Input::new(&tokens);

        assert_eq!(input.len(), 7);
        let kinds: Vec<_> = (0..input.len()).map(|idx| input.kind(idx)).collect();
        assert_eq!(kinds, [IDENT, COLON, COLON, IDENT, COLON, COLON, IDENT]);
        assert!(input.is_joint(1));
        assert!(!input.is_joint(4));
        assert!(input.is_joint(5));
        assert_eq!(input.kind(7), EOF);
    }
}
