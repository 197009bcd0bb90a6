//! Lingering conditions across turns.

mod common;

use common::stacked;
use rust_brawl::catalogue::{DEFLECTOR, FREEZE, POISON, POKE, POTION, PUNCH, SLASH};
use rust_brawl::{HookPhase, PlayerId};

const A: PlayerId = PlayerId::new(1);
const B: PlayerId = PlayerId::new(2);
const C: PlayerId = PlayerId::new(3);

#[test]
fn test_poison_and_freeze_stack() {
    let order = [
        POISON, FREEZE, POKE, POKE, POKE, // A
        SLASH, SLASH, SLASH, SLASH, SLASH, // B
    ];
    let mut engine = stacked(2, &order);

    engine.play(A, &[POISON], Some(B)).unwrap();
    engine.pass(B).unwrap();
    assert_eq!(engine.player(B).unwrap().hp, 8);
    engine.discard(B, &[SLASH]).unwrap();

    engine.play(A, &[FREEZE], Some(B)).unwrap();
    engine.pass(B).unwrap();

    // Both hooks ran; the freeze skipped B's turn.
    assert_eq!(engine.current_player(), Some(A));
    assert_eq!(engine.player(B).unwrap().hp, 7);
    assert!(engine.has_condition(B, POISON));
    assert!(!engine.has_condition(B, FREEZE));
    assert_eq!(engine.player(B).unwrap().queue(HookPhase::BeforeTurn).len(), 1);

    engine.discard(A, &[POKE]).unwrap();
    assert_eq!(engine.player(B).unwrap().hp, 6);
    assert!(engine.player(B).unwrap().condition_cards.is_empty());
    for phase in HookPhase::ALL {
        assert!(engine.player(B).unwrap().queue(phase).is_empty());
    }
    assert_eq!(engine.game().card_count(), engine.total_cards());
}

#[test]
fn test_forwarded_contact_skips_second_deflector() {
    let order = [
        PUNCH, POKE, POKE, POKE, POKE, // A
        DEFLECTOR, SLASH, SLASH, SLASH, SLASH, // B
        DEFLECTOR, POTION, POTION, POTION, POTION, // C
    ];
    let mut engine = stacked(3, &order);
    engine.discard(A, &[POKE]).unwrap();
    engine.play(B, &[DEFLECTOR], None).unwrap();
    engine.play(C, &[DEFLECTOR], None).unwrap();

    engine.play(A, &[PUNCH], Some(B)).unwrap();
    engine.pass(B).unwrap();

    assert_eq!(engine.player(B).unwrap().hp, 10);
    assert!(!engine.has_condition(B, DEFLECTOR));
    assert!(engine.has_condition(C, DEFLECTOR));

    let hurt = [A, C].into_iter().filter(|&id| engine.player(id).unwrap().hp == 8).count();
    assert_eq!(hurt, 1);
    assert_eq!(engine.game().card_count(), engine.total_cards());
}
