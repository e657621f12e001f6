//! Computes the shape of the typed AST layer from a grammar.

use crate::model::{Grammar, Node, Rule};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AstSrc {
    pub nodes: Vec<AstNodeSrc>,
    pub enums: Vec<AstEnumSrc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNodeSrc {
    pub name: String,
    /// `SCREAMING_CASE` name of the node's kind.
    pub kind: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstEnumSrc {
    pub name: String,
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Optional,
    Many,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Token { name: String, kind: String },
    Node { name: String, ty: String, cardinality: Cardinality },
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Self::Token { name, .. } | Self::Node { name, .. } => name,
        }
    }
}

const TOKEN_CLASSES: &[&str] = &[
    "ident",
    "lifetime_ident",
    "int_number",
    "float_number",
    "string",
    "byte_string",
    "char",
    "byte",
];

const PUNCT: &[(&str, &str, &str)] = &[
    (";", "SEMICOLON", "semicolon"),
    (",", "COMMA", "comma"),
    ("(", "LEFT_PAREN", "l_paren"),
    (")", "RIGHT_PAREN", "r_paren"),
    ("{", "LEFT_BRACE", "l_curly"),
    ("}", "RIGHT_BRACE", "r_curly"),
    ("[", "LEFT_BRACKET", "l_brack"),
    ("]", "RIGHT_BRACKET", "r_brack"),
    ("<", "LEFT_ANGLE", "l_angle"),
    (">", "RIGHT_ANGLE", "r_angle"),
    ("@", "AT", "at"),
    ("#", "POUND", "pound"),
    ("~", "TILDE", "tilde"),
    ("?", "QUESTION", "question_mark"),
    ("$", "DOLLAR", "dollar"),
    ("&", "AMP", "amp"),
    ("|", "PIPE", "pipe"),
    ("+", "PLUS", "plus"),
    ("*", "STAR", "star"),
    ("/", "SLASH", "slash"),
    ("^", "CARET", "caret"),
    ("%", "PERCENT", "percent"),
    ("_", "UNDERSCORE", "underscore"),
    (".", "DOT", "dot"),
    (":", "COLON", "colon"),
    ("=", "EQ", "eq"),
    ("!", "BANG", "excl"),
    ("-", "MINUS", "minus"),
    ("..", "DOT2", "dotdot"),
    ("...", "DOT3", "dot3"),
    ("..=", "DOT2EQ", "dot2eq"),
    ("::", "COLON2", "coloncolon"),
    ("==", "EQ2", "eq2"),
    ("=>", "FAT_ARROW", "fat_arrow"),
    ("!=", "NEQ", "neq"),
    ("->", "THIN_ARROW", "thin_arrow"),
    ("<=", "LTEQ", "lteq"),
    (">=", "GTEQ", "gteq"),
    ("+=", "PLUSEQ", "pluseq"),
    ("-=", "MINUSEQ", "minuseq"),
    ("|=", "PIPEEQ", "pipeeq"),
    ("&=", "AMPEQ", "ampeq"),
    ("^=", "CARETEQ", "careteq"),
    ("/=", "SLASHEQ", "slasheq"),
    ("*=", "STAREQ", "stareq"),
    ("%=", "PERCENTEQ", "percenteq"),
    ("&&", "AMP2", "amp2"),
    ("||", "PIPE2", "pipe2"),
    ("<<", "SHL", "shl"),
    (">>", "SHR", "shr"),
    ("<<=", "SHLEQ", "shleq"),
    (">>=", "SHREQ", "shreq"),
];

/// Kind name of a grammar terminal: `'::'` is `COLON2`, `'fn'` is `FN_KW`,
/// `'ident'` is `IDENT`.
pub fn token_kind_name(spelling: &str) -> Option<String> {
    token_kind(spelling).map(|(kind, _)| kind)
}

/// Kind name and accessor stem of a terminal.
fn token_kind(spelling: &str) -> Option<(String, String)> {
    if let Some(&(_, kind, stem)) = PUNCT.iter().find(|(punct, ..)| *punct == spelling) {
        return Some((kind.to_owned(), stem.to_owned()));
    }
    if TOKEN_CLASSES.contains(&spelling) {
        return Some((spelling.to_ascii_uppercase(), spelling.to_owned()));
    }
    if spelling == "Self" {
        return Some(("SELF_TYPE_KW".to_owned(), "self_type".to_owned()));
    }
    if !spelling.is_empty() && spelling.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
        return Some((format!("{}_KW", spelling.to_ascii_uppercase()), spelling.to_owned()));
    }
    None
}

pub fn lower(grammar: &Grammar) -> AstSrc {
    let mut src = AstSrc::default();

    for node in grammar.iter() {
        let name = grammar[node].name.clone();
        if grammar.is_enum(node) {
            let Rule::Alt(alternatives) = &grammar[node].rule else { continue };
            let variants = alternatives
                .iter()
                .filter_map(|rule| match rule {
                    Rule::Node(variant) => Some(grammar[*variant].name.clone()),
                    _ => None,
                })
                .collect();
            src.enums.push(AstEnumSrc { name, variants });
            continue;
        }

        let mut fields = Vec::new();
        lower_rule(&mut fields, grammar, None, &grammar[node].rule);
        src.nodes.push(AstNodeSrc { kind: to_upper_snake_case(&name), name, fields: dedup(fields) });
    }

    for node in &mut src.nodes {
        drop_enum_variants(&mut node.fields, &src.enums);
    }

    src
}

fn lower_rule(acc: &mut Vec<Field>, grammar: &Grammar, label: Option<&str>, rule: &Rule) {
    if lower_separated_list(acc, grammar, label, rule) {
        return;
    }

    match rule {
        Rule::Node(node) => {
            let ty = grammar[*node].name.clone();
            let name = label.map_or_else(|| field_name(&ty), ToOwned::to_owned);
            acc.push(Field::Node { name, ty, cardinality: Cardinality::Optional });
        }
        Rule::Token(token) => {
            let spelling = grammar.token_name(*token);
            match token_kind(spelling) {
                Some((kind, stem)) => acc.push(Field::Token { name: format!("{stem}_token"), kind }),
                None => tracing::warn!(spelling, "no kind for grammar token"),
            }
        }
        Rule::Rep(inner) => {
            if let Rule::Node(node) = &**inner {
                let ty = grammar[*node].name.clone();
                let name = label.map_or_else(|| pluralize(&field_name(&ty)), ToOwned::to_owned);
                acc.push(Field::Node { name, ty, cardinality: Cardinality::Many });
                return;
            }
            lower_rule(acc, grammar, label, inner);
        }
        // Labeled alternations carry operators and other choices that
        // are spelled out by hand.
        Rule::Labeled { rule, .. } if matches!(&**rule, Rule::Alt(_)) => {}
        Rule::Labeled { label, rule } => lower_rule(acc, grammar, Some(label), rule),
        Rule::Seq(rules) | Rule::Alt(rules) => {
            for rule in rules {
                lower_rule(acc, grammar, label, rule);
            }
        }
        Rule::Opt(inner) => lower_rule(acc, grammar, label, inner),
    }
}

/// `T (',' T)* ','?` lowers to one `Many` field.
fn lower_separated_list(
    acc: &mut Vec<Field>,
    grammar: &Grammar,
    label: Option<&str>,
    rule: &Rule,
) -> bool {
    let Rule::Seq(rules) = rule else { return false };
    let (node, repeat, trailing) = match rules.as_slice() {
        [Rule::Node(node), Rule::Rep(repeat)] => (node, repeat, None),
        [Rule::Node(node), Rule::Rep(repeat), Rule::Opt(trailing)] => (node, repeat, Some(trailing)),
        _ => return false,
    };
    let Rule::Seq(repeat) = &**repeat else { return false };
    let [Rule::Token(separator), Rule::Node(repeated)] = repeat.as_slice() else { return false };
    if repeated != node {
        return false;
    }
    if let Some(trailing) = trailing
        && **trailing != Rule::Token(*separator)
    {
        return false;
    }

    let ty = grammar[*node].name.clone();
    let name = label.map_or_else(|| pluralize(&field_name(&ty)), ToOwned::to_owned);
    acc.push(Field::Node { name, ty, cardinality: Cardinality::Many });
    true
}

/// Keeps the first field of each name, then drops optional node fields
/// that share their type with another one: their accessors cannot be told
/// apart by type and are written by hand.
fn dedup(fields: Vec<Field>) -> Vec<Field> {
    let mut unique: Vec<Field> = Vec::with_capacity(fields.len());
    for field in fields {
        if unique.iter().all(|seen| seen.name() != field.name()) {
            unique.push(field);
        }
    }

    let optional_ty = |field: &Field| match field {
        Field::Node { ty, cardinality: Cardinality::Optional, .. } => Some(ty.clone()),
        _ => None,
    };
    let clashing: Vec<String> = unique
        .iter()
        .filter_map(optional_ty)
        .filter(|ty| unique.iter().filter_map(optional_ty).filter(|other| other == ty).count() > 1)
        .collect();

    unique.retain(|field| optional_ty(field).is_none_or(|ty| !clashing.contains(&ty)));
    unique
}

/// Drops optional node fields typed as a variant of another optional
/// field's enum, as `BlockExpr` next to `Expr`: the enum accessor can return
/// the same node, so these are positional and written by hand.
fn drop_enum_variants(fields: &mut Vec<Field>, enums: &[AstEnumSrc]) {
    let optional_ty = |field: &Field| match field {
        Field::Node { ty, cardinality: Cardinality::Optional, .. } => Some(ty.clone()),
        _ => None,
    };
    let overlapping: Vec<&AstEnumSrc> = fields
        .iter()
        .filter_map(optional_ty)
        .filter_map(|ty| enums.iter().find(|enum_| enum_.name == ty))
        .collect();

    fields.retain(|field| {
        optional_ty(field)
            .is_none_or(|ty| !overlapping.iter().any(|enum_| enum_.variants.contains(&ty)))
    });
}

fn field_name(ty: &str) -> String {
    match ty {
        "Type" => "ty".to_owned(),
        _ => to_lower_snake_case(ty),
    }
}

fn pluralize(name: &str) -> String {
    format!("{name}s")
}

pub fn to_lower_snake_case(name: &str) -> String {
    let mut buf = String::with_capacity(name.len() + 4);
    for (index, c) in name.char_indices() {
        if c.is_ascii_uppercase() && index != 0 {
            buf.push('_');
        }
        buf.push(c.to_ascii_lowercase());
    }
    buf
}

pub fn to_upper_snake_case(name: &str) -> String {
    to_lower_snake_case(name).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::{Cardinality, Field, lower, to_upper_snake_case, token_kind_name};
    use crate::Grammar;

    fn node(name: &str, ty: &str, cardinality: Cardinality) -> Field {
        Field::Node { name: name.into(), ty: ty.into(), cardinality }
    }

    fn token(name: &str, kind: &str) -> Field {
        Field::Token { name: name.into(), kind: kind.into() }
    }

    #[test]
    fn token_kinds() {
        assert_eq!(token_kind_name("::").as_deref(), Some("COLON2"));
        assert_eq!(token_kind_name("fn").as_deref(), Some("FN_KW"));
        assert_eq!(token_kind_name("Self").as_deref(), Some("SELF_TYPE_KW"));
        assert_eq!(token_kind_name("int_number").as_deref(), Some("INT_NUMBER"));
        assert_eq!(token_kind_name("<->"), None);
        assert_eq!(to_upper_snake_case("RecordFieldList"), "RECORD_FIELD_LIST");
    }

    #[test]
    fn fields_follow_cardinality() {
        let grammar: Grammar = "
            List = '(' items:(Item (',' Item)* ','?)? ')'
            Item = Name ':' Type
            Pair = lhs:Expr '+' rhs:Expr
            Expr = Name | Type
            Name = 'ident'
            Type = 'ident'
        "
        .parse()
        .unwrap();
        let src = lower(&grammar);

        let fields = |name: &str| {
            src.nodes.iter().find(|node| node.name == name).map(|node| node.fields.clone()).unwrap()
        };
        assert_eq!(
            fields("List"),
            [
                token("l_paren_token", "LEFT_PAREN"),
                node("items", "Item", Cardinality::Many),
                token("r_paren_token", "RIGHT_PAREN"),
            ]
        );
        assert_eq!(
            fields("Item"),
            [
                node("name", "Name", Cardinality::Optional),
                token("colon_token", "COLON"),
                node("ty", "Type", Cardinality::Optional),
            ]
        );
        assert_eq!(fields("Pair"), [token("plus_token", "PLUS")]);

        assert_eq!(src.enums.len(), 1);
        assert_eq!(src.enums[0].name, "Expr");
        assert_eq!(src.enums[0].variants, ["Name", "Type"]);
    }

    #[test]
    fn enum_variants_next_to_their_enum_are_dropped() {
        let grammar: Grammar = "
            If = 'if' condition:Expr then_branch:Block
            Expr = Block | Name
            Block = 'ident'
            Name = 'ident'
        "
        .parse()
        .unwrap();
        let src = lower(&grammar);

        let if_ = src.nodes.iter().find(|node| node.name == "If").unwrap();
        assert_eq!(
            if_.fields,
            [token("if_token", "IF_KW"), node("condition", "Expr", Cardinality::Optional)]
        );
    }
}
