use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regex_nfa::matching::Matcher;
use regex_nfa::regex::Regex;
use regex_nfa::utils::RegexFlags;

const PATTERN: &str = "a(b|c)*d(ab|c)d*";

fn inputs() -> Vec<String> {
    (0..200)
        .map(|i| {
            let middle: String = (0..i).map(|j| if j % 3 == 0 { 'b' } else { 'c' }).collect();
            let tail = "d".repeat(i % 7);
            if i % 5 == 0 {
                format!("a{}dab{}e", middle, tail)
            } else {
                format!("a{}dc{}", middle, tail)
            }
        })
        .collect()
}

fn do_the_work(regex: &Regex, texts: &[String], expected: &[bool]) {
    let actual: Vec<bool> = texts.iter().map(|text| regex.is_match(text)).collect();
    assert_eq!(expected, actual.as_slice())
}

fn criterion_benchmark_regex_nfa(c: &mut Criterion) {
    let texts = inputs();
    let oracle = regex::Regex::new(&format!("^(?:{})$", PATTERN)).unwrap();
    let expected: Vec<bool> = texts.iter().map(|text| oracle.is_match(text)).collect();

    let plain = Regex::new_with_flags(PATTERN, RegexFlags::NO_FLAG).unwrap();
    let optimized = Regex::new_with_flags(PATTERN, RegexFlags::OPTIMIZE).unwrap();

    c.bench_function("match with epsilon edges", |b| {
        b.iter(|| do_the_work(black_box(&plain), black_box(&texts), &expected))
    });
    c.bench_function("match after epsilon elimination", |b| {
        b.iter(|| do_the_work(black_box(&optimized), black_box(&texts), &expected))
    });
}

criterion_group!(benches, criterion_benchmark_regex_nfa);
criterion_main!(benches);
