macro_rules! syntax_kinds {
    (
        punct: { $($punct_kind:ident = $punct:literal,)* }
        keywords: { $($kw_kind:ident = $kw:literal,)* }
        literals: { $($literal_kind:ident = $literal:literal,)* }
        classes: { $($class_kind:ident = $class:literal,)* }
        tokens: { $($token_kind:ident,)* }
        nodes: { $($node_kind:ident = $rule:literal,)* }
    ) => {
        /// Tag of every token and node in the tree.
        ///
        /// Punctuation is listed as the tokenizer produces it (single
        /// characters) followed by the composite forms the parser glues
        /// together from adjacent pieces.
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[repr(u16)]
        pub enum SyntaxKind {
            /// Placeholder left behind by abandoned markers in the event log.
            TOMBSTONE,
            EOF,
            $($punct_kind,)*
            $($kw_kind,)*
            $($literal_kind,)*
            $($class_kind,)*
            $($token_kind,)*
            $($node_kind,)*
            #[doc(hidden)]
            __LAST,
        }

        impl SyntaxKind {
            /// Number of real kinds.
            pub const COUNT: usize = Self::__LAST as usize;

            const ALL: &'static [Self] = &[
                Self::TOMBSTONE,
                Self::EOF,
                $(Self::$punct_kind,)*
                $(Self::$kw_kind,)*
                $(Self::$literal_kind,)*
                $(Self::$class_kind,)*
                $(Self::$token_kind,)*
                $(Self::$node_kind,)*
            ];

            /// Inverse of `kind as u16`.
            pub fn from_raw(raw: u16) -> Option<Self> {
                Self::ALL.get(usize::from(raw)).copied()
            }

            /// The `SCREAMING_CASE` name of the kind.
            pub const fn name(self) -> &'static str {
                match self {
                    Self::TOMBSTONE => "TOMBSTONE",
                    Self::EOF => "EOF",
                    $(Self::$punct_kind => stringify!($punct_kind),)*
                    $(Self::$kw_kind => stringify!($kw_kind),)*
                    $(Self::$literal_kind => stringify!($literal_kind),)*
                    $(Self::$class_kind => stringify!($class_kind),)*
                    $(Self::$token_kind => stringify!($token_kind),)*
                    $(Self::$node_kind => stringify!($node_kind),)*
                    Self::__LAST => "__LAST",
                }
            }

            /// Fixed source spelling of punctuation and keywords.
            pub const fn spelling(self) -> Option<&'static str> {
                match self {
                    $(Self::$punct_kind => Some($punct),)*
                    $(Self::$kw_kind => Some($kw),)*
                    $(Self::$literal_kind => Some($literal),)*
                    _ => None,
                }
            }

            pub const fn is_punct(self) -> bool {
                matches!(self, $(Self::$punct_kind)|*)
            }

            pub const fn is_keyword(self) -> bool {
                matches!(self, $(Self::$kw_kind)|* $(| Self::$literal_kind)*)
            }

            pub const fn is_literal(self) -> bool {
                matches!(
                    self,
                    $(Self::$literal_kind)|*
                        | Self::INT_NUMBER
                        | Self::FLOAT_NUMBER
                        | Self::STRING
                        | Self::BYTE_STRING
                        | Self::CHAR
                        | Self::BYTE
                )
            }

            /// `true` for kinds that only ever label nodes.
            pub const fn is_node(self) -> bool {
                matches!(self, $(Self::$node_kind)|*)
            }

            pub fn from_keyword(ident: &str) -> Option<Self> {
                match ident {
                    $($kw => Some(Self::$kw_kind),)*
                    $($literal => Some(Self::$literal_kind),)*
                    _ => None,
                }
            }

            /// Maps a token literal of the grammar DSL, either a fixed
            /// spelling (`'::'`, `'fn'`) or a class name (`'ident'`).
            pub fn from_spelling(spelling: &str) -> Option<Self> {
                match spelling {
                    $($punct => Some(Self::$punct_kind),)*
                    $($kw => Some(Self::$kw_kind),)*
                    $($literal => Some(Self::$literal_kind),)*
                    $($class => Some(Self::$class_kind),)*
                    _ => None,
                }
            }

            /// Maps a rule name of the grammar DSL to its node kind.
            pub fn from_rule_name(name: &str) -> Option<Self> {
                match name {
                    $($rule => Some(Self::$node_kind),)*
                    _ => None,
                }
            }
        }
    };
}

syntax_kinds! {
    punct: {
        SEMICOLON = ";",
        COMMA = ",",
        LEFT_PAREN = "(",
        RIGHT_PAREN = ")",
        LEFT_BRACE = "{",
        RIGHT_BRACE = "}",
        LEFT_BRACKET = "[",
        RIGHT_BRACKET = "]",
        LEFT_ANGLE = "<",
        RIGHT_ANGLE = ">",
        AT = "@",
        POUND = "#",
        TILDE = "~",
        QUESTION = "?",
        DOLLAR = "$",
        AMP = "&",
        PIPE = "|",
        PLUS = "+",
        STAR = "*",
        SLASH = "/",
        CARET = "^",
        PERCENT = "%",
        UNDERSCORE = "_",
        DOT = ".",
        COLON = ":",
        EQ = "=",
        BANG = "!",
        MINUS = "-",
        DOT2 = "..",
        DOT3 = "...",
        DOT2EQ = "..=",
        COLON2 = "::",
        EQ2 = "==",
        FAT_ARROW = "=>",
        NEQ = "!=",
        THIN_ARROW = "->",
        LTEQ = "<=",
        GTEQ = ">=",
        PLUSEQ = "+=",
        MINUSEQ = "-=",
        PIPEEQ = "|=",
        AMPEQ = "&=",
        CARETEQ = "^=",
        SLASHEQ = "/=",
        STAREQ = "*=",
        PERCENTEQ = "%=",
        AMP2 = "&&",
        PIPE2 = "||",
        SHL = "<<",
        SHR = ">>",
        SHLEQ = "<<=",
        SHREQ = ">>=",
    }
    keywords: {
        AS_KW = "as",
        ASYNC_KW = "async",
        BREAK_KW = "break",
        CONST_KW = "const",
        CONTINUE_KW = "continue",
        CRATE_KW = "crate",
        DYN_KW = "dyn",
        ELSE_KW = "else",
        ENUM_KW = "enum",
        FN_KW = "fn",
        FOR_KW = "for",
        IF_KW = "if",
        IMPL_KW = "impl",
        IN_KW = "in",
        LET_KW = "let",
        LOOP_KW = "loop",
        MATCH_KW = "match",
        MOD_KW = "mod",
        MOVE_KW = "move",
        MUT_KW = "mut",
        PUB_KW = "pub",
        REF_KW = "ref",
        RETURN_KW = "return",
        SELF_KW = "self",
        SELF_TYPE_KW = "Self",
        STATIC_KW = "static",
        STRUCT_KW = "struct",
        SUPER_KW = "super",
        TRAIT_KW = "trait",
        TYPE_KW = "type",
        UNSAFE_KW = "unsafe",
        USE_KW = "use",
        WHERE_KW = "where",
        WHILE_KW = "while",
    }
    literals: {
        TRUE_KW = "true",
        FALSE_KW = "false",
    }
    classes: {
        IDENT = "ident",
        LIFETIME_IDENT = "lifetime_ident",
        INT_NUMBER = "int_number",
        FLOAT_NUMBER = "float_number",
        STRING = "string",
        BYTE_STRING = "byte_string",
        CHAR = "char",
        BYTE = "byte",
    }
    tokens: {
        WHITESPACE,
        COMMENT,
        ERROR,
    }
    nodes: {
        SOURCE_FILE = "SourceFile",
        NAME = "Name",
        NAME_REF = "NameRef",
        LIFETIME = "Lifetime",
        PATH = "Path",
        PATH_SEGMENT = "PathSegment",
        GENERIC_ARG_LIST = "GenericArgList",
        TYPE_ARG = "TypeArg",
        LIFETIME_ARG = "LifetimeArg",
        VISIBILITY = "Visibility",
        MODULE = "Module",
        ITEM_LIST = "ItemList",
        USE = "Use",
        USE_TREE = "UseTree",
        USE_TREE_LIST = "UseTreeList",
        RENAME = "Rename",
        FN = "Fn",
        PARAM_LIST = "ParamList",
        SELF_PARAM = "SelfParam",
        PARAM = "Param",
        RET_TYPE = "RetType",
        TYPE_ALIAS = "TypeAlias",
        STRUCT = "Struct",
        RECORD_FIELD_LIST = "RecordFieldList",
        RECORD_FIELD = "RecordField",
        TUPLE_FIELD_LIST = "TupleFieldList",
        TUPLE_FIELD = "TupleField",
        ENUM = "Enum",
        VARIANT_LIST = "VariantList",
        VARIANT = "Variant",
        CONST = "Const",
        STATIC = "Static",
        TRAIT = "Trait",
        ASSOC_ITEM_LIST = "AssocItemList",
        IMPL = "Impl",
        GENERIC_PARAM_LIST = "GenericParamList",
        TYPE_PARAM = "TypeParam",
        CONST_PARAM = "ConstParam",
        LIFETIME_PARAM = "LifetimeParam",
        WHERE_CLAUSE = "WhereClause",
        WHERE_PRED = "WherePred",
        TYPE_BOUND_LIST = "TypeBoundList",
        TYPE_BOUND = "TypeBound",
        LET_STMT = "LetStmt",
        LET_ELSE = "LetElse",
        EXPR_STMT = "ExprStmt",
        STMT_LIST = "StmtList",
        LITERAL = "Literal",
        PATH_EXPR = "PathExpr",
        BLOCK_EXPR = "BlockExpr",
        REF_EXPR = "RefExpr",
        TRY_EXPR = "TryExpr",
        PREFIX_EXPR = "PrefixExpr",
        BIN_EXPR = "BinExpr",
        CAST_EXPR = "CastExpr",
        PAREN_EXPR = "ParenExpr",
        ARRAY_EXPR = "ArrayExpr",
        INDEX_EXPR = "IndexExpr",
        TUPLE_EXPR = "TupleExpr",
        RECORD_EXPR = "RecordExpr",
        RECORD_EXPR_FIELD_LIST = "RecordExprFieldList",
        RECORD_EXPR_FIELD = "RecordExprField",
        CALL_EXPR = "CallExpr",
        ARG_LIST = "ArgList",
        METHOD_CALL_EXPR = "MethodCallExpr",
        FIELD_EXPR = "FieldExpr",
        CLOSURE_EXPR = "ClosureExpr",
        IF_EXPR = "IfExpr",
        LET_EXPR = "LetExpr",
        LOOP_EXPR = "LoopExpr",
        FOR_EXPR = "ForExpr",
        WHILE_EXPR = "WhileExpr",
        BREAK_EXPR = "BreakExpr",
        CONTINUE_EXPR = "ContinueExpr",
        RANGE_EXPR = "RangeExpr",
        MATCH_EXPR = "MatchExpr",
        MATCH_ARM_LIST = "MatchArmList",
        MATCH_ARM = "MatchArm",
        MATCH_GUARD = "MatchGuard",
        RETURN_EXPR = "ReturnExpr",
        PAREN_TYPE = "ParenType",
        NEVER_TYPE = "NeverType",
        PATH_TYPE = "PathType",
        TUPLE_TYPE = "TupleType",
        PTR_TYPE = "PtrType",
        REF_TYPE = "RefType",
        ARRAY_TYPE = "ArrayType",
        SLICE_TYPE = "SliceType",
        INFER_TYPE = "InferType",
        IMPL_TRAIT_TYPE = "ImplTraitType",
        DYN_TRAIT_TYPE = "DynTraitType",
        LITERAL_PAT = "LiteralPat",
        IDENT_PAT = "IdentPat",
        WILDCARD_PAT = "WildcardPat",
        REF_PAT = "RefPat",
        PATH_PAT = "PathPat",
        OR_PAT = "OrPat",
        TUPLE_STRUCT_PAT = "TupleStructPat",
        TUPLE_PAT = "TuplePat",
        REST_PAT = "RestPat",
    }
}

impl SyntaxKind {
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }
}

impl From<SyntaxKind> for u16 {
    fn from(kind: SyntaxKind) -> Self {
        kind as u16
    }
}

/// Spells a [`SyntaxKind`] by its source text: `T![fn]`, `T![::]`, `T!['{']`.
#[macro_export]
macro_rules! T {
    [;] => { $crate::SyntaxKind::SEMICOLON };
    [,] => { $crate::SyntaxKind::COMMA };
    ['('] => { $crate::SyntaxKind::LEFT_PAREN };
    [')'] => { $crate::SyntaxKind::RIGHT_PAREN };
    ['{'] => { $crate::SyntaxKind::LEFT_BRACE };
    ['}'] => { $crate::SyntaxKind::RIGHT_BRACE };
    ['['] => { $crate::SyntaxKind::LEFT_BRACKET };
    [']'] => { $crate::SyntaxKind::RIGHT_BRACKET };
    [<] => { $crate::SyntaxKind::LEFT_ANGLE };
    [>] => { $crate::SyntaxKind::RIGHT_ANGLE };
    [@] => { $crate::SyntaxKind::AT };
    [#] => { $crate::SyntaxKind::POUND };
    [~] => { $crate::SyntaxKind::TILDE };
    [?] => { $crate::SyntaxKind::QUESTION };
    [&] => { $crate::SyntaxKind::AMP };
    [|] => { $crate::SyntaxKind::PIPE };
    [+] => { $crate::SyntaxKind::PLUS };
    [*] => { $crate::SyntaxKind::STAR };
    [/] => { $crate::SyntaxKind::SLASH };
    [^] => { $crate::SyntaxKind::CARET };
    [%] => { $crate::SyntaxKind::PERCENT };
    [_] => { $crate::SyntaxKind::UNDERSCORE };
    [.] => { $crate::SyntaxKind::DOT };
    [..] => { $crate::SyntaxKind::DOT2 };
    [...] => { $crate::SyntaxKind::DOT3 };
    [..=] => { $crate::SyntaxKind::DOT2EQ };
    [:] => { $crate::SyntaxKind::COLON };
    [::] => { $crate::SyntaxKind::COLON2 };
    [=] => { $crate::SyntaxKind::EQ };
    [==] => { $crate::SyntaxKind::EQ2 };
    [=>] => { $crate::SyntaxKind::FAT_ARROW };
    [!] => { $crate::SyntaxKind::BANG };
    [!=] => { $crate::SyntaxKind::NEQ };
    [-] => { $crate::SyntaxKind::MINUS };
    [->] => { $crate::SyntaxKind::THIN_ARROW };
    [<=] => { $crate::SyntaxKind::LTEQ };
    [>=] => { $crate::SyntaxKind::GTEQ };
    [+=] => { $crate::SyntaxKind::PLUSEQ };
    [-=] => { $crate::SyntaxKind::MINUSEQ };
    [|=] => { $crate::SyntaxKind::PIPEEQ };
    [&=] => { $crate::SyntaxKind::AMPEQ };
    [^=] => { $crate::SyntaxKind::CARETEQ };
    [/=] => { $crate::SyntaxKind::SLASHEQ };
    [*=] => { $crate::SyntaxKind::STAREQ };
    [%=] => { $crate::SyntaxKind::PERCENTEQ };
    [&&] => { $crate::SyntaxKind::AMP2 };
    [||] => { $crate::SyntaxKind::PIPE2 };
    [<<] => { $crate::SyntaxKind::SHL };
    [>>] => { $crate::SyntaxKind::SHR };
    [<<=] => { $crate::SyntaxKind::SHLEQ };
    [>>=] => { $crate::SyntaxKind::SHREQ };
    [as] => { $crate::SyntaxKind::AS_KW };
    [async] => { $crate::SyntaxKind::ASYNC_KW };
    [break] => { $crate::SyntaxKind::BREAK_KW };
    [const] => { $crate::SyntaxKind::CONST_KW };
    [continue] => { $crate::SyntaxKind::CONTINUE_KW };
    [crate] => { $crate::SyntaxKind::CRATE_KW };
    [dyn] => { $crate::SyntaxKind::DYN_KW };
    [else] => { $crate::SyntaxKind::ELSE_KW };
    [enum] => { $crate::SyntaxKind::ENUM_KW };
    [false] => { $crate::SyntaxKind::FALSE_KW };
    [fn] => { $crate::SyntaxKind::FN_KW };
    [for] => { $crate::SyntaxKind::FOR_KW };
    [if] => { $crate::SyntaxKind::IF_KW };
    [impl] => { $crate::SyntaxKind::IMPL_KW };
    [in] => { $crate::SyntaxKind::IN_KW };
    [let] => { $crate::SyntaxKind::LET_KW };
    [loop] => { $crate::SyntaxKind::LOOP_KW };
    [match] => { $crate::SyntaxKind::MATCH_KW };
    [mod] => { $crate::SyntaxKind::MOD_KW };
    [move] => { $crate::SyntaxKind::MOVE_KW };
    [mut] => { $crate::SyntaxKind::MUT_KW };
    [pub] => { $crate::SyntaxKind::PUB_KW };
    [ref] => { $crate::SyntaxKind::REF_KW };
    [return] => { $crate::SyntaxKind::RETURN_KW };
    [self] => { $crate::SyntaxKind::SELF_KW };
    [Self] => { $crate::SyntaxKind::SELF_TYPE_KW };
    [static] => { $crate::SyntaxKind::STATIC_KW };
    [struct] => { $crate::SyntaxKind::STRUCT_KW };
    [super] => { $crate::SyntaxKind::SUPER_KW };
    [trait] => { $crate::SyntaxKind::TRAIT_KW };
    [true] => { $crate::SyntaxKind::TRUE_KW };
    [type] => { $crate::SyntaxKind::TYPE_KW };
    [unsafe] => { $crate::SyntaxKind::UNSAFE_KW };
    [use] => { $crate::SyntaxKind::USE_KW };
    [where] => { $crate::SyntaxKind::WHERE_KW };
    [while] => { $crate::SyntaxKind::WHILE_KW };
    [ident] => { $crate::SyntaxKind::IDENT };
    [lifetime_ident] => { $crate::SyntaxKind::LIFETIME_IDENT };
    [int_number] => { $crate::SyntaxKind::INT_NUMBER };
}

#[cfg(test)]
mod tests {
    use super::SyntaxKind;

    #[test]
    fn spelling_round_trips() {
        for spelling in ["::", "fn", "Self", "..=", ">>=", "_"] {
            let kind = SyntaxKind::from_spelling(spelling).unwrap();
            assert_eq!(kind.spelling(), Some(spelling));
        }
        assert_eq!(SyntaxKind::from_spelling("ident"), Some(SyntaxKind::IDENT));
        assert_eq!(SyntaxKind::from_spelling("ident").and_then(SyntaxKind::spelling), None);
    }

    #[test]
    fn classification() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::COMMENT.is_trivia());
        assert!(!SyntaxKind::ERROR.is_trivia());
        assert!(T![fn].is_keyword());
        assert!(T![true].is_keyword());
        assert!(T![true].is_literal());
        assert!(SyntaxKind::STRING.is_literal());
        assert!(T![::].is_punct());
        assert!(SyntaxKind::FN.is_node());
        assert!(!SyntaxKind::ERROR.is_node());
        assert_eq!(SyntaxKind::from_keyword("while"), Some(T![while]));
        assert_eq!(SyntaxKind::from_keyword("whilst"), None);
        assert_eq!(SyntaxKind::from_rule_name("RecordFieldList"), Some(SyntaxKind::RECORD_FIELD_LIST));
        assert_eq!(SyntaxKind::BIN_EXPR.name(), "BIN_EXPR");
    }
}
