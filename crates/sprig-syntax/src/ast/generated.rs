//! Generated by `sprig grammar --codegen`, do not edit by hand.

use crate::ast::{AstChildren, AstNode, support};
use crate::{SyntaxKind, SyntaxNode, SyntaxToken};

ast_node! {
    Name => NAME {
        ident_token: token IDENT,
        self_token: token SELF_KW,
    }
    NameRef => NAME_REF {
        ident_token: token IDENT,
        int_number_token: token INT_NUMBER,
        self_token: token SELF_KW,
        super_token: token SUPER_KW,
        crate_token: token CRATE_KW,
        self_type_token: token SELF_TYPE_KW,
    }
    Lifetime => LIFETIME {
        lifetime_ident_token: token LIFETIME_IDENT,
    }
    Path => PATH {
        qualifier: child Path,
        coloncolon_token: token COLON2,
        segment: child PathSegment,
    }
    PathSegment => PATH_SEGMENT {
        coloncolon_token: token COLON2,
        name_ref: child NameRef,
        generic_arg_list: child GenericArgList,
    }
    GenericArgList => GENERIC_ARG_LIST {
        coloncolon_token: token COLON2,
        l_angle_token: token LEFT_ANGLE,
        generic_args: children GenericArg,
        r_angle_token: token RIGHT_ANGLE,
    }
    TypeArg => TYPE_ARG {
        ty: child Type,
    }
    LifetimeArg => LIFETIME_ARG {
        lifetime: child Lifetime,
    }
    SourceFile => SOURCE_FILE {
        items: children Item,
    }
    Visibility => VISIBILITY {
        pub_token: token PUB_KW,
        l_paren_token: token LEFT_PAREN,
        path: child Path,
        r_paren_token: token RIGHT_PAREN,
    }
    Module => MODULE {
        visibility: child Visibility,
        mod_token: token MOD_KW,
        name: child Name,
        item_list: child ItemList,
        semicolon_token: token SEMICOLON,
    }
    ItemList => ITEM_LIST {
        l_curly_token: token LEFT_BRACE,
        items: children Item,
        r_curly_token: token RIGHT_BRACE,
    }
    Use => USE {
        visibility: child Visibility,
        use_token: token USE_KW,
        use_tree: child UseTree,
        semicolon_token: token SEMICOLON,
    }
    UseTree => USE_TREE {
        path: child Path,
        coloncolon_token: token COLON2,
        star_token: token STAR,
        use_tree_list: child UseTreeList,
        rename: child Rename,
    }
    UseTreeList => USE_TREE_LIST {
        l_curly_token: token LEFT_BRACE,
        use_trees: children UseTree,
        r_curly_token: token RIGHT_BRACE,
    }
    Rename => RENAME {
        as_token: token AS_KW,
        name: child Name,
        underscore_token: token UNDERSCORE,
    }
    Fn => FN {
        visibility: child Visibility,
        const_token: token CONST_KW,
        async_token: token ASYNC_KW,
        unsafe_token: token UNSAFE_KW,
        fn_token: token FN_KW,
        name: child Name,
        generic_param_list: child GenericParamList,
        param_list: child ParamList,
        ret_type: child RetType,
        where_clause: child WhereClause,
        body: child BlockExpr,
        semicolon_token: token SEMICOLON,
    }
    ParamList => PARAM_LIST {
        l_paren_token: token LEFT_PAREN,
        self_param: child SelfParam,
        comma_token: token COMMA,
        params: children Param,
        r_paren_token: token RIGHT_PAREN,
        pipe_token: token PIPE,
        pipe2_token: token PIPE2,
    }
    SelfParam => SELF_PARAM {
        amp_token: token AMP,
        lifetime: child Lifetime,
        mut_token: token MUT_KW,
        name: child Name,
        colon_token: token COLON,
        ty: child Type,
    }
    Param => PARAM {
        pat: child Pat,
        colon_token: token COLON,
        ty: child Type,
    }
    RetType => RET_TYPE {
        thin_arrow_token: token THIN_ARROW,
        ty: child Type,
    }
    TypeAlias => TYPE_ALIAS {
        visibility: child Visibility,
        type_token: token TYPE_KW,
        name: child Name,
        generic_param_list: child GenericParamList,
        colon_token: token COLON,
        type_bound_list: child TypeBoundList,
        where_clause: child WhereClause,
        eq_token: token EQ,
        ty: child Type,
        semicolon_token: token SEMICOLON,
    }
    Struct => STRUCT {
        visibility: child Visibility,
        struct_token: token STRUCT_KW,
        name: child Name,
        generic_param_list: child GenericParamList,
        where_clause: child WhereClause,
        record_field_list: child RecordFieldList,
        semicolon_token: token SEMICOLON,
        tuple_field_list: child TupleFieldList,
    }
    RecordFieldList => RECORD_FIELD_LIST {
        l_curly_token: token LEFT_BRACE,
        fields: children RecordField,
        r_curly_token: token RIGHT_BRACE,
    }
    RecordField => RECORD_FIELD {
        visibility: child Visibility,
        name: child Name,
        colon_token: token COLON,
        ty: child Type,
    }
    TupleFieldList => TUPLE_FIELD_LIST {
        l_paren_token: token LEFT_PAREN,
        fields: children TupleField,
        r_paren_token: token RIGHT_PAREN,
    }
    TupleField => TUPLE_FIELD {
        visibility: child Visibility,
        ty: child Type,
    }
    Enum => ENUM {
        visibility: child Visibility,
        enum_token: token ENUM_KW,
        name: child Name,
        generic_param_list: child GenericParamList,
        where_clause: child WhereClause,
        variant_list: child VariantList,
    }
    VariantList => VARIANT_LIST {
        l_curly_token: token LEFT_BRACE,
        variants: children Variant,
        r_curly_token: token RIGHT_BRACE,
    }
    Variant => VARIANT {
        visibility: child Visibility,
        name: child Name,
        field_list: child FieldList,
        eq_token: token EQ,
        expr: child Expr,
    }
    Const => CONST {
        visibility: child Visibility,
        const_token: token CONST_KW,
        name: child Name,
        underscore_token: token UNDERSCORE,
        colon_token: token COLON,
        ty: child Type,
        eq_token: token EQ,
        body: child Expr,
        semicolon_token: token SEMICOLON,
    }
    Static => STATIC {
        visibility: child Visibility,
        static_token: token STATIC_KW,
        mut_token: token MUT_KW,
        name: child Name,
        colon_token: token COLON,
        ty: child Type,
        eq_token: token EQ,
        body: child Expr,
        semicolon_token: token SEMICOLON,
    }
    Trait => TRAIT {
        visibility: child Visibility,
        unsafe_token: token UNSAFE_KW,
        trait_token: token TRAIT_KW,
        name: child Name,
        generic_param_list: child GenericParamList,
        colon_token: token COLON,
        type_bound_list: child TypeBoundList,
        where_clause: child WhereClause,
        assoc_item_list: child AssocItemList,
    }
    AssocItemList => ASSOC_ITEM_LIST {
        l_curly_token: token LEFT_BRACE,
        assoc_items: children AssocItem,
        r_curly_token: token RIGHT_BRACE,
    }
    Impl => IMPL {
        visibility: child Visibility,
        unsafe_token: token UNSAFE_KW,
        impl_token: token IMPL_KW,
        generic_param_list: child GenericParamList,
        excl_token: token BANG,
        for_token: token FOR_KW,
        where_clause: child WhereClause,
        assoc_item_list: child AssocItemList,
    }
    GenericParamList => GENERIC_PARAM_LIST {
        l_angle_token: token LEFT_ANGLE,
        generic_params: children GenericParam,
        r_angle_token: token RIGHT_ANGLE,
    }
    TypeParam => TYPE_PARAM {
        name: child Name,
        colon_token: token COLON,
        type_bound_list: child TypeBoundList,
        eq_token: token EQ,
        default_type: child Type,
    }
    ConstParam => CONST_PARAM {
        const_token: token CONST_KW,
        name: child Name,
        colon_token: token COLON,
        ty: child Type,
    }
    LifetimeParam => LIFETIME_PARAM {
        lifetime: child Lifetime,
        colon_token: token COLON,
        type_bound_list: child TypeBoundList,
    }
    WhereClause => WHERE_CLAUSE {
        where_token: token WHERE_KW,
        predicates: children WherePred,
    }
    WherePred => WHERE_PRED {
        lifetime: child Lifetime,
        ty: child Type,
        colon_token: token COLON,
        type_bound_list: child TypeBoundList,
    }
    TypeBoundList => TYPE_BOUND_LIST {
        bounds: children TypeBound,
    }
    TypeBound => TYPE_BOUND {
        lifetime: child Lifetime,
        question_mark_token: token QUESTION,
        ty: child Type,
    }
    LetStmt => LET_STMT {
        let_token: token LET_KW,
        pat: child Pat,
        colon_token: token COLON,
        ty: child Type,
        eq_token: token EQ,
        initializer: child Expr,
        let_else: child LetElse,
        semicolon_token: token SEMICOLON,
    }
    LetElse => LET_ELSE {
        else_token: token ELSE_KW,
        block_expr: child BlockExpr,
    }
    ExprStmt => EXPR_STMT {
        expr: child Expr,
        semicolon_token: token SEMICOLON,
    }
    Literal => LITERAL {}
    PathExpr => PATH_EXPR {
        path: child Path,
    }
    StmtList => STMT_LIST {
        l_curly_token: token LEFT_BRACE,
        statements: children Stmt,
        tail_expr: child Expr,
        r_curly_token: token RIGHT_BRACE,
    }
    BlockExpr => BLOCK_EXPR {
        unsafe_token: token UNSAFE_KW,
        async_token: token ASYNC_KW,
        move_token: token MOVE_KW,
        const_token: token CONST_KW,
        stmt_list: child StmtList,
    }
    RefExpr => REF_EXPR {
        amp_token: token AMP,
        mut_token: token MUT_KW,
        expr: child Expr,
    }
    TryExpr => TRY_EXPR {
        expr: child Expr,
        question_mark_token: token QUESTION,
    }
    PrefixExpr => PREFIX_EXPR {
        expr: child Expr,
    }
    BinExpr => BIN_EXPR {}
    CastExpr => CAST_EXPR {
        expr: child Expr,
        as_token: token AS_KW,
        ty: child Type,
    }
    ParenExpr => PAREN_EXPR {
        l_paren_token: token LEFT_PAREN,
        expr: child Expr,
        r_paren_token: token RIGHT_PAREN,
    }
    ArrayExpr => ARRAY_EXPR {
        l_brack_token: token LEFT_BRACKET,
        exprs: children Expr,
        expr: child Expr,
        semicolon_token: token SEMICOLON,
        r_brack_token: token RIGHT_BRACKET,
    }
    IndexExpr => INDEX_EXPR {
        l_brack_token: token LEFT_BRACKET,
        r_brack_token: token RIGHT_BRACKET,
    }
    TupleExpr => TUPLE_EXPR {
        l_paren_token: token LEFT_PAREN,
        fields: children Expr,
        r_paren_token: token RIGHT_PAREN,
    }
    RecordExpr => RECORD_EXPR {
        path: child Path,
        record_expr_field_list: child RecordExprFieldList,
    }
    RecordExprFieldList => RECORD_EXPR_FIELD_LIST {
        l_curly_token: token LEFT_BRACE,
        fields: children RecordExprField,
        dotdot_token: token DOT2,
        spread: child Expr,
        r_curly_token: token RIGHT_BRACE,
    }
    RecordExprField => RECORD_EXPR_FIELD {
        name_ref: child NameRef,
        colon_token: token COLON,
        expr: child Expr,
    }
    CallExpr => CALL_EXPR {
        expr: child Expr,
        arg_list: child ArgList,
    }
    ArgList => ARG_LIST {
        l_paren_token: token LEFT_PAREN,
        args: children Expr,
        r_paren_token: token RIGHT_PAREN,
    }
    MethodCallExpr => METHOD_CALL_EXPR {
        receiver: child Expr,
        dot_token: token DOT,
        name_ref: child NameRef,
        generic_arg_list: child GenericArgList,
        arg_list: child ArgList,
    }
    FieldExpr => FIELD_EXPR {
        expr: child Expr,
        dot_token: token DOT,
        name_ref: child NameRef,
    }
    ClosureExpr => CLOSURE_EXPR {
        move_token: token MOVE_KW,
        param_list: child ParamList,
        ret_type: child RetType,
        body: child Expr,
    }
    IfExpr => IF_EXPR {
        if_token: token IF_KW,
        condition: child Expr,
        else_token: token ELSE_KW,
    }
    LetExpr => LET_EXPR {
        let_token: token LET_KW,
        pat: child Pat,
        eq_token: token EQ,
        expr: child Expr,
    }
    LoopExpr => LOOP_EXPR {
        loop_token: token LOOP_KW,
        loop_body: child BlockExpr,
    }
    ForExpr => FOR_EXPR {
        for_token: token FOR_KW,
        pat: child Pat,
        in_token: token IN_KW,
        iterable: child Expr,
    }
    WhileExpr => WHILE_EXPR {
        while_token: token WHILE_KW,
        condition: child Expr,
    }
    BreakExpr => BREAK_EXPR {
        break_token: token BREAK_KW,
        lifetime: child Lifetime,
        expr: child Expr,
    }
    ContinueExpr => CONTINUE_EXPR {
        continue_token: token CONTINUE_KW,
        lifetime: child Lifetime,
    }
    RangeExpr => RANGE_EXPR {}
    MatchExpr => MATCH_EXPR {
        match_token: token MATCH_KW,
        expr: child Expr,
        match_arm_list: child MatchArmList,
    }
    MatchArmList => MATCH_ARM_LIST {
        l_curly_token: token LEFT_BRACE,
        arms: children MatchArm,
        r_curly_token: token RIGHT_BRACE,
    }
    MatchArm => MATCH_ARM {
        pat: child Pat,
        guard: child MatchGuard,
        fat_arrow_token: token FAT_ARROW,
        expr: child Expr,
        comma_token: token COMMA,
    }
    MatchGuard => MATCH_GUARD {
        if_token: token IF_KW,
        condition: child Expr,
    }
    ReturnExpr => RETURN_EXPR {
        return_token: token RETURN_KW,
        expr: child Expr,
    }
    ParenType => PAREN_TYPE {
        l_paren_token: token LEFT_PAREN,
        ty: child Type,
        r_paren_token: token RIGHT_PAREN,
    }
    NeverType => NEVER_TYPE {
        excl_token: token BANG,
    }
    PathType => PATH_TYPE {
        path: child Path,
    }
    TupleType => TUPLE_TYPE {
        l_paren_token: token LEFT_PAREN,
        fields: children Type,
        r_paren_token: token RIGHT_PAREN,
    }
    PtrType => PTR_TYPE {
        star_token: token STAR,
        const_token: token CONST_KW,
        mut_token: token MUT_KW,
        ty: child Type,
    }
    RefType => REF_TYPE {
        amp_token: token AMP,
        lifetime: child Lifetime,
        mut_token: token MUT_KW,
        ty: child Type,
    }
    ArrayType => ARRAY_TYPE {
        l_brack_token: token LEFT_BRACKET,
        ty: child Type,
        semicolon_token: token SEMICOLON,
        expr: child Expr,
        r_brack_token: token RIGHT_BRACKET,
    }
    SliceType => SLICE_TYPE {
        l_brack_token: token LEFT_BRACKET,
        ty: child Type,
        r_brack_token: token RIGHT_BRACKET,
    }
    InferType => INFER_TYPE {
        underscore_token: token UNDERSCORE,
    }
    ImplTraitType => IMPL_TRAIT_TYPE {
        impl_token: token IMPL_KW,
        type_bound_list: child TypeBoundList,
    }
    DynTraitType => DYN_TRAIT_TYPE {
        dyn_token: token DYN_KW,
        type_bound_list: child TypeBoundList,
    }
    LiteralPat => LITERAL_PAT {
        minus_token: token MINUS,
        literal: child Literal,
    }
    IdentPat => IDENT_PAT {
        ref_token: token REF_KW,
        mut_token: token MUT_KW,
        name: child Name,
        at_token: token AT,
        pat: child Pat,
    }
    WildcardPat => WILDCARD_PAT {
        underscore_token: token UNDERSCORE,
    }
    RefPat => REF_PAT {
        amp_token: token AMP,
        mut_token: token MUT_KW,
        pat: child Pat,
    }
    PathPat => PATH_PAT {
        path: child Path,
    }
    OrPat => OR_PAT {
        pats: children Pat,
    }
    TupleStructPat => TUPLE_STRUCT_PAT {
        path: child Path,
        l_paren_token: token LEFT_PAREN,
        fields: children Pat,
        r_paren_token: token RIGHT_PAREN,
    }
    TuplePat => TUPLE_PAT {
        l_paren_token: token LEFT_PAREN,
        fields: children Pat,
        r_paren_token: token RIGHT_PAREN,
    }
    RestPat => REST_PAT {
        dotdot_token: token DOT2,
    }
}

ast_enum! {
    GenericArg {
        TypeArg,
        LifetimeArg,
    }
    Item {
        Const,
        Enum,
        Fn,
        Impl,
        Module,
        Static,
        Struct,
        Trait,
        TypeAlias,
        Use,
    }
    FieldList {
        RecordFieldList,
        TupleFieldList,
    }
    AssocItem {
        Const,
        Fn,
        TypeAlias,
    }
    GenericParam {
        ConstParam,
        LifetimeParam,
        TypeParam,
    }
    Stmt {
        ExprStmt,
        Item,
        LetStmt,
    }
    Expr {
        ArrayExpr,
        BinExpr,
        BlockExpr,
        BreakExpr,
        CallExpr,
        CastExpr,
        ClosureExpr,
        ContinueExpr,
        FieldExpr,
        ForExpr,
        IfExpr,
        IndexExpr,
        LetExpr,
        Literal,
        LoopExpr,
        MatchExpr,
        MethodCallExpr,
        ParenExpr,
        PathExpr,
        PrefixExpr,
        RangeExpr,
        RecordExpr,
        RefExpr,
        ReturnExpr,
        TryExpr,
        TupleExpr,
        WhileExpr,
    }
    Type {
        ArrayType,
        DynTraitType,
        ImplTraitType,
        InferType,
        NeverType,
        ParenType,
        PathType,
        PtrType,
        RefType,
        SliceType,
        TupleType,
    }
    Pat {
        IdentPat,
        LiteralPat,
        OrPat,
        PathPat,
        RefPat,
        RestPat,
        TuplePat,
        TupleStructPat,
        WildcardPat,
    }
}
