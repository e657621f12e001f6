use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use sprig_tokenizer::{SyntaxKind, Tokenizer};

static SOURCE: &str = "
pub fn foo<'a>(x: &'a mut Vec<Vec<u8>>) -> Option<()> { x >>= 1; a::b::<c>() == 0x1f_u8 }
pub fn foo<'a>(x: &'a mut Vec<Vec<u8>>) -> Option<()> { x >>= 1; a::b::<c>() == 0x1f_u8 }
pub fn foo<'a>(x: &'a mut Vec<Vec<u8>>) -> Option<()> { x >>= 1; a::b::<c>() == 0x1f_u8 }
pub fn foo<'a>(x: &'a mut Vec<Vec<u8>>) -> Option<()> { x >>= 1; a::b::<c>() == 0x1f_u8 }
pub fn foo<'a>(x: &'a mut Vec<Vec<u8>>) -> Option<()> { x >>= 1; a::b::<c>() == 0x1f_u8 }
pub fn foo<'a>(x: &'a mut Vec<Vec<u8>>) -> Option<()> { x >>= 1; a::b::<c>() == 0x1f_u8 }
pub fn foo<'a>(x: &'a mut Vec<Vec<u8>>) -> Option<()> { x >>= 1; a::b::<c>() == 0x1f_u8 }
pub fn foo<'a>(x: &'a mut Vec<Vec<u8>>) -> Option<()> { x >>= 1; a::b::<c>() == 0x1f_u8 }
";

static LITERALS: &str = r##"
let s = "a string with \"escapes\"\n"; let r = r#"raw "text""#; let c = '\''; // comment
let s = "a string with \"escapes\"\n"; let r = r#"raw "text""#; let c = '\''; /* block */
let s = "a string with \"escapes\"\n"; let r = r#"raw "text""#; let c = '\''; // comment
let s = "a string with \"escapes\"\n"; let r = r#"raw "text""#; let c = '\''; /* block */
"##;

static IDENTIFIERS: &str =
    "It was the year when they finally immanentized the Eschaton It was the year when they \
     finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton It was the year when they finally immanentized the Eschaton It was the year when \
     they finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton";

static CANDIDATES: [(&str, &str); 3] = [
    ("identifiers", IDENTIFIERS),
    ("keywords_operators_and_punctuation", SOURCE),
    ("literals_and_comments", LITERALS),
];

fn iterate(s: &str) {
    let mut tokenizer = Tokenizer::new(s);

    loop {
        let token = tokenizer.next_token();
        if token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
