use salsa::Setter as _;
use sprig_db::{Diagnostic, File, RootDatabase, check_file, parse_file};

#[derive(Debug, PartialEq, Eq)]
struct ExpectedDiag {
    line: usize,
    message: String,
}

#[derive(Debug, PartialEq, Eq)]
struct ActualDiag {
    line: usize,
    message: String,
}

fn parse_expectations(fixture: &str) -> Vec<ExpectedDiag> {
    let mut expected = Vec::new();

    for (idx, line) in fixture.lines().enumerate() {
        let Some((_, comment)) = line.split_once("//~") else {
            continue;
        };
        let comment = comment.trim();
        let comment = comment.strip_prefix("ERROR").unwrap_or(comment).trim();
        if comment.is_empty() {
            continue;
        }
        expected.push(ExpectedDiag { line: idx + 1, message: comment.to_owned() });
    }

    expected
}

fn collect_actual(db: &RootDatabase, file: File) -> Vec<ActualDiag> {
    let mut actual = check_file::accumulated::<Diagnostic>(db, file)
        .into_iter()
        .map(|diag| {
            let line = file.line_col(db, diag.range().start()).line as usize + 1;
            ActualDiag { line, message: diag.message().to_owned() }
        })
        .collect::<Vec<_>>();
    actual.sort_by_key(|diag| (diag.line, diag.message.clone()));
    actual
}

#[track_caller]
fn check(fixture: &str) {
    let db = RootDatabase::default();
    let file = File::new(&db, "fixture.rs".into(), fixture.to_owned());

    let mut actual = collect_actual(&db, file);
    let mut expected = parse_expectations(fixture);

    expected.sort_by_key(|diag| (diag.line, diag.message.clone()));

    assert_eq!(
        expected.len(),
        actual.len(),
        "expected {} diagnostic(s), got {}\nexpected: {expected:#?}\nactual: {actual:#?}",
        expected.len(),
        actual.len(),
    );

    for expected_diag in expected {
        let Some(pos) = actual.iter().position(|diag| {
            diag.line == expected_diag.line && diag.message.contains(&expected_diag.message)
        }) else {
            panic!(
                "missing diagnostic on line {} containing `{}`\nactual: {actual:#?}",
                expected_diag.line, expected_diag.message
            );
        };
        actual.remove(pos);
    }

    assert!(actual.is_empty(), "unexpected diagnostics:\n{actual:#?}");
}

#[test]
fn clean_file() {
    check(
        r#"
fn main() {
    let x = 1;
    x + 2
}
"#,
    );
}

#[test]
fn missing_r_paren() {
    check(
        r#"
fn f( {} //~ ERROR expected `)`
struct S { a: i32, b: i32 }
"#,
    );
}

#[test]
fn missing_semicolon() {
    check(
        r#"
fn g() {
    a b //~ ERROR expected `;`
}
"#,
    );
}

#[test]
fn missing_initializer() {
    check(
        r#"
fn main() {
    let x = ; //~ ERROR expected an expression
}
"#,
    );
}

#[test]
fn errors_in_several_items() {
    check(
        r#"
fn f( {} //~ ERROR expected `)`

fn g() {
    let y = ; //~ ERROR expected an expression
}
"#,
    );
}

#[test]
fn editing_the_text_updates_the_diagnostics() {
    let mut db = RootDatabase::default();
    let file = File::new(&db, "main.rs".into(), "fn f( {}".to_owned());
    assert_eq!(collect_actual(&db, file).len(), 1);

    file.set_text(&mut db).to("fn f() {}".to_owned());
    assert!(collect_actual(&db, file).is_empty());
    assert!(parse_file(&db, file).ok());
}

#[test]
fn unrelated_files_keep_their_trees() {
    let mut db = RootDatabase::default();
    let a = File::new(&db, "a.rs".into(), "fn a() { 1 }".to_owned());
    let b = File::new(&db, "b.rs".into(), "fn b() { 2 }".to_owned());

    let before = parse_file(&db, b).green().clone();
    a.set_text(&mut db).to("fn a() { 3 }".to_owned());
    let after = parse_file(&db, b).green();

    assert!(before.ptr_eq(after));
    assert_eq!(parse_file(&db, a).syntax_node().text(), "fn a() { 3 }");
}
