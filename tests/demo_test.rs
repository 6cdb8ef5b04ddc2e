mod common;

use common::today;
use habitlog::core::demo::{generate, seed};
use habitlog::core::store::{MemoryStore, RecordStore};
use habitlog::core::validate::validate;
use habitlog::models::HabitType;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_generate_covers_every_day_and_habit() {
    let mut rng = StdRng::seed_from_u64(7);
    let records = generate(today(), 30, &mut rng);
    assert_eq!(records.len(), 90);
    assert_eq!(records[0].0, today());
    assert_eq!(records.last().unwrap().0, today().offset(-29));
}

#[test]
fn test_generated_records_pass_validation() {
    let mut rng = StdRng::seed_from_u64(42);
    for (_, habit, record) in generate(today(), 60, &mut rng) {
        assert!(
            validate(&habit, &record.to_fields()).is_ok(),
            "{} record failed validation: {:?}",
            habit,
            record
        );
    }
}

#[test]
fn test_generate_is_reproducible() {
    let a = generate(today(), 10, &mut StdRng::seed_from_u64(1));
    let b = generate(today(), 10, &mut StdRng::seed_from_u64(1));
    assert_eq!(a, b);
}

#[test]
fn test_notes_on_schedule() {
    let records = generate(today(), 6, &mut StdRng::seed_from_u64(3));
    let noted = |habit: HabitType| {
        records
            .iter()
            .filter(|(_, h, r)| *h == habit && r.notes.is_some())
            .count()
    };
    // days back 0..6: exercise every 3rd (0, 3), sleep every 4th (0, 4), nutrition every 5th (0, 5)
    assert_eq!(noted(HabitType::Exercise), 2);
    assert_eq!(noted(HabitType::Sleep), 2);
    assert_eq!(noted(HabitType::Nutrition), 2);
}

#[test]
fn test_seed_fills_store() {
    let mut store = MemoryStore::new();
    let n = seed(&mut store, today(), 14, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(n, 42);
    assert_eq!(store.len(), 42);
    let week = store
        .records_in_range(&HabitType::Sleep, today().offset(-6), today())
        .unwrap();
    assert_eq!(week.len(), 7);
}
