use crate::{NodeOrToken, SyntaxElement, SyntaxNode, WalkEvent};

/// Preorder walk over the nodes of a subtree.
pub struct Preorder {
    start: SyntaxNode,
    next: Option<WalkEvent<SyntaxNode>>,
    skip_subtree: bool,
}

impl Preorder {
    pub(crate) fn new(start: SyntaxNode) -> Self {
        let next = Some(WalkEvent::Enter(start.clone()));
        Self { start, next, skip_subtree: false }
    }

    /// Stops descending into the node entered last.
    pub fn skip_subtree(&mut self) {
        self.skip_subtree = true;
    }

    fn do_skip(&mut self) {
        self.next = self.next.take().and_then(|next| match next {
            WalkEvent::Enter(first_child) => first_child.parent().map(WalkEvent::Leave),
            WalkEvent::Leave(parent) => Some(WalkEvent::Leave(parent)),
        });
    }
}

impl Iterator for Preorder {
    type Item = WalkEvent<SyntaxNode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.skip_subtree {
            self.do_skip();
            self.skip_subtree = false;
        }

        let next = self.next.take();

        self.next = next.as_ref().and_then(|event| {
            Some(match event {
                WalkEvent::Enter(node) => match node.first_child() {
                    Some(child) => WalkEvent::Enter(child),
                    None => WalkEvent::Leave(node.clone()),
                },
                WalkEvent::Leave(node) => {
                    if node == &self.start {
                        return None;
                    }

                    match node.next_sibling() {
                        Some(sibling) => WalkEvent::Enter(sibling),
                        None => WalkEvent::Leave(node.parent()?),
                    }
                }
            })
        });

        next
    }
}

/// Preorder walk over the nodes and tokens of a subtree.
pub struct PreorderWithTokens {
    start: SyntaxElement,
    next: Option<WalkEvent<SyntaxElement>>,
    skip_subtree: bool,
}

impl PreorderWithTokens {
    pub(crate) fn new(start: SyntaxNode) -> Self {
        let start = SyntaxElement::Node(start);
        let next = Some(WalkEvent::Enter(start.clone()));
        Self { start, next, skip_subtree: false }
    }

    /// Stops descending into the node entered last.
    pub fn skip_subtree(&mut self) {
        self.skip_subtree = true;
    }

    fn do_skip(&mut self) {
        self.next = self.next.take().and_then(|next| match next {
            WalkEvent::Enter(first_child) => {
                first_child.parent().map(|parent| WalkEvent::Leave(parent.into()))
            }
            WalkEvent::Leave(parent) => Some(WalkEvent::Leave(parent)),
        });
    }
}

impl Iterator for PreorderWithTokens {
    type Item = WalkEvent<SyntaxElement>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.skip_subtree {
            self.do_skip();
            self.skip_subtree = false;
        }

        let next = self.next.take();

        self.next = next.as_ref().and_then(|event| {
            Some(match event {
                WalkEvent::Enter(NodeOrToken::Node(node)) => match node.first_child_or_token() {
                    Some(child) => WalkEvent::Enter(child),
                    None => WalkEvent::Leave(NodeOrToken::Node(node.clone())),
                },
                WalkEvent::Enter(NodeOrToken::Token(token)) => {
                    WalkEvent::Leave(NodeOrToken::Token(token.clone()))
                }
                WalkEvent::Leave(element) => {
                    if element == &self.start {
                        return None;
                    }

                    match element.next_sibling_or_token() {
                        Some(sibling) => WalkEvent::Enter(sibling),
                        None => WalkEvent::Leave(element.parent()?.into()),
                    }
                }
            })
        });

        next
    }
}
