use engine::{BattleEngine, Enemy, Fighter, MoveCatalog, MoveError, Roller};

fn fighter() -> Fighter {
    Fighter::new(
        "Tester",
        30,
        MoveCatalog::from_entries([("punch", 2), ("kick", 4)]).unwrap(),
    )
}

fn enemy() -> Enemy {
    Enemy::new(
        "Dummy",
        10,
        MoveCatalog::from_entries([("Punch", 1), ("Kick", 2), ("Knife Stab", 4)]).unwrap(),
    )
}

#[test]
fn unknown_move_is_rejected_without_side_effects() {
    let mut f = fighter();
    let mut engine = BattleEngine::new(&mut f, enemy(), None, false, Roller::from_seed(1));

    assert_eq!(
        engine.validate("headbutt"),
        Err(MoveError::UnknownMove("headbutt".to_string()))
    );
    assert_eq!(
        engine.submit_move("headbutt").unwrap_err(),
        MoveError::UnknownMove("headbutt".to_string())
    );
    assert_eq!(engine.round(), 0);
    assert_eq!(engine.fighter().hp, 30);
    assert_eq!(engine.enemy().hp, 10);
    assert!(engine.fighter().last_move.is_none());
}

#[test]
fn repeated_move_is_rejected_without_side_effects() {
    let mut f = fighter();
    let mut engine = BattleEngine::new(&mut f, enemy(), None, false, Roller::from_seed(7));

    let first = engine.submit_move("punch").unwrap();
    let fighter_hp = first.fighter_hp;
    let enemy_hp = first.enemy_hp;

    // Same move again, in any casing, is refused and changes nothing.
    assert_eq!(
        engine.submit_move("PUNCH").unwrap_err(),
        MoveError::RepeatedMove("punch".to_string())
    );
    assert_eq!(engine.round(), 1);
    assert_eq!(engine.fighter().hp, fighter_hp);
    assert_eq!(engine.enemy().hp, enemy_hp);
    assert_eq!(engine.fighter().last_move.as_deref(), Some("punch"));

    // A different move is fine.
    assert!(engine.validate("kick").is_ok());
}

#[test]
fn submitted_names_match_case_insensitively() {
    let mut f = fighter();
    let mut engine = BattleEngine::new(&mut f, enemy(), None, false, Roller::from_seed(3));

    let report = engine.submit_move("KICK").unwrap();
    // The canonical catalog spelling is what gets recorded.
    assert_eq!(report.fighter_move, "kick");
    assert_eq!(engine.fighter().last_move.as_deref(), Some("kick"));
}

#[test]
fn a_new_battle_clears_repetition_state() {
    let mut f = fighter();
    {
        let mut engine = BattleEngine::new(&mut f, enemy(), None, false, Roller::from_seed(11));
        engine.submit_move("punch").unwrap();
    }
    assert_eq!(f.last_move.as_deref(), Some("punch"));

    let mut engine = BattleEngine::new(&mut f, enemy(), None, false, Roller::from_seed(12));
    // "punch" was last round's move of the previous match; still legal here.
    assert!(engine.validate("punch").is_ok());
}
