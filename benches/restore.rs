use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lyric_clues::{
    Dataset, LanguageEntry, LanguageFamily, LanguageRegistry, MatchState, MemorySourceText,
    RestoreContext, Segment, SongRecord, encode_dataset, encode_line, tokenize,
};

const SONG: &str = "bench-song";

fn sample_lines(count: usize) -> Vec<(&'static str, String)> {
    let templates = [
        ("US", "Remember me though I have to say goodbye"),
        ("US", "Oh, my love, don't you cry tonight"),
        ("KR", "너를 사랑한다 영원히 함께"),
        ("KR", "오늘 밤 너와 함께 걸어가"),
        ("JP", "君の名は夢を見ていた"),
        ("JP", "こんにちは世界、また明日"),
    ];
    (0..count)
        .map(|i| {
            let (code, text) = templates[i % templates.len()];
            (code, format!("{text} {i}"))
        })
        .collect()
}

fn sample_dataset(count: usize) -> (Dataset, MemorySourceText) {
    let lines = sample_lines(count);
    let mut source = MemorySourceText::new();
    for code in ["US", "KR", "JP"] {
        let text: Vec<&str> = lines
            .iter()
            .filter(|(c, _)| *c == code)
            .map(|(_, line)| line.as_str())
            .collect();
        source.insert(SONG, code, text.join("\n"));
    }

    let segments = lines
        .iter()
        .map(|(code, line)| {
            let mut segment = Segment::new();
            segment.insert(code.to_string(), LanguageEntry::plain(line.as_str()));
            segment
        })
        .collect();
    let mut dataset = Dataset::new();
    dataset.insert(
        SONG,
        SongRecord {
            lyrics: vec![segments],
            ..SongRecord::default()
        },
    );
    (
        encode_dataset(&dataset, &LanguageRegistry::default()),
        source,
    )
}

fn bench_restore(c: &mut Criterion) {
    let mut group = c.benchmark_group("restore_song");

    for &count in &[60usize, 240usize] {
        let (encoded, source) = sample_dataset(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(BenchmarkId::from_parameter(count), move |b| {
            b.iter_batched(
                || RestoreContext::new(LanguageRegistry::default(), source.clone()),
                |mut context| black_box(context.restore_dataset(&encoded)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    let registry = LanguageRegistry::default();

    for (code, family, filler, target) in [
        (
            "US",
            LanguageFamily::Latin,
            "Remember me though I have to say goodbye",
            "So long and farewell my friend",
        ),
        ("KR", LanguageFamily::Korean, "너를 사랑한다 영원히 함께", "마지막 인사를 남겨"),
        ("JP", LanguageFamily::Japanese, "君の名は夢を見ていた", "さよならまた明日"),
    ] {
        let (Some(clue), Ok(strategy)) = (encode_line(target, family), registry.strategy(code))
        else {
            continue;
        };
        // Target line sits after every filler copy.
        let raw = format!("{}\n{target}", vec![filler; 64].join("\n"));
        let units = tokenize(&raw, family);
        let state = MatchState::default();
        group.bench_function(code, |b| {
            b.iter(|| black_box(strategy.locate(&clue, &units, &state)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_restore, bench_locate);
criterion_main!(benches);
