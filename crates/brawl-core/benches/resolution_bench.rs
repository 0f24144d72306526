use brawl_core::{Brawl, BrawlConfig, ParticipantId, ParticipantSheet, SeededDice, StatBlock};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn roster() -> Vec<ParticipantSheet> {
    [(1, "Fighter"), (2, "Rogue"), (3, "Bard"), (4, "Wizard")]
        .into_iter()
        .map(|(id, class)| {
            ParticipantSheet::new(ParticipantId::new(id), class, StatBlock::new(12))
                .with_class(class)
                .with_move_slots(u8::MAX)
        })
        .collect()
}

fn bench_baseline_strike(c: &mut Criterion) {
    let mut brawl = Brawl::new(BrawlConfig::default(), SeededDice::new(1)).unwrap();
    brawl.start(roster()).unwrap();
    let (a, b) = (ParticipantId::new(1), ParticipantId::new(2));

    c.bench_function("baseline_strike", |bench| {
        bench.iter(|| {
            // wounds pile up; restart once the target drops
            if brawl.participant(b).is_some_and(|p| p.is_knocked_out()) {
                brawl.end().unwrap();
                brawl.start(roster()).unwrap();
            }
            let outcome = brawl.perform_action(a, "unarmed_strike", &[b]).unwrap();
            black_box(brawl.take_events());
            black_box(outcome)
        })
    });
}

fn bench_full_round(c: &mut Criterion) {
    let actions: [(u64, &str, &[u64]); 4] = [
        (1, "shove", &[2]),
        (2, "taunt", &[3]),
        (3, "heckle", &[1, 2, 4]),
        (4, "twin_sparks", &[1, 1]),
    ];

    c.bench_function("full_round", |bench| {
        bench.iter(|| {
            let mut brawl = Brawl::new(BrawlConfig::default(), SeededDice::new(7)).unwrap();
            brawl.start(roster()).unwrap();
            for (actor, key, targets) in &actions {
                let targets: Vec<_> = targets.iter().map(|t| ParticipantId::new(*t)).collect();
                // KO'd actors are rejected; that is part of a round too
                let _ = black_box(brawl.perform_action(ParticipantId::new(*actor), key, &targets));
            }
            black_box(brawl.on_turn_advance().unwrap());
            black_box(brawl.end().unwrap())
        })
    });
}

fn bench_available_moves(c: &mut Criterion) {
    let mut brawl = Brawl::new(BrawlConfig::default(), SeededDice::new(3)).unwrap();
    brawl.start(roster()).unwrap();
    let wizard = ParticipantId::new(4);

    c.bench_function("available_moves", |bench| {
        bench.iter(|| black_box(brawl.available_moves(wizard).unwrap()))
    });
}

criterion_group!(benches, bench_baseline_strike, bench_full_round, bench_available_moves);
criterion_main!(benches);
