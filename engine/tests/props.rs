use engine::{BattleEngine, Enemy, Fighter, MoveCatalog, Outcome, Roller};
use proptest::prelude::*;

fn fighter() -> Fighter {
    Fighter::new(
        "Prop",
        30,
        MoveCatalog::from_entries([("punch", 2), ("kick", 4), ("rest", -4), ("taunt", 0)]).unwrap(),
    )
}

fn enemy() -> Enemy {
    Enemy::new(
        "Prop Dummy",
        25,
        MoveCatalog::from_entries([("Jab", 1), ("Hook", 3)]).unwrap(),
    )
}

proptest! {
    /// Resolved rounds only ever shrink hp, never below zero, and the round
    /// counter moves iff a submission is accepted.
    #[test]
    fn hp_is_clamped_and_monotone(seed in any::<u64>(), picks in prop::collection::vec(0usize..4, 1..60)) {
        let mut f = fighter();
        let mut engine = BattleEngine::new(&mut f, enemy(), None, false, Roller::from_seed(seed));
        let mut prev_fighter = 30;
        let mut prev_enemy = 25;
        let mut rounds = 0u32;
        for idx in picks {
            let (name, _) = engine.fighter().moves.at(idx);
            let name = name.to_string();
            match engine.submit_move(&name) {
                Ok(report) => {
                    rounds += 1;
                    prop_assert_eq!(report.round, rounds);
                    prop_assert!(report.fighter_hp >= 0 && report.enemy_hp >= 0);
                    prop_assert!(report.fighter_hp <= prev_fighter);
                    prop_assert!(report.enemy_hp <= prev_enemy);
                    prev_fighter = report.fighter_hp;
                    prev_enemy = report.enemy_hp;
                    if report.outcome != Outcome::Continuing {
                        break;
                    }
                }
                Err(_) => {
                    prop_assert_eq!(engine.round(), rounds);
                    prop_assert_eq!(engine.fighter().hp, prev_fighter);
                    prop_assert_eq!(engine.enemy().hp, prev_enemy);
                }
            }
        }
    }

    /// Names outside the catalog are always refused and never mutate.
    #[test]
    fn unknown_names_never_mutate(name in "[a-z]{1,12}", seed in any::<u64>()) {
        prop_assume!(!["punch", "kick", "rest", "taunt"].contains(&name.as_str()));
        let mut f = fighter();
        let mut engine = BattleEngine::new(&mut f, enemy(), None, false, Roller::from_seed(seed));
        prop_assert!(engine.validate(&name).is_err());
        prop_assert!(engine.submit_move(&name).is_err());
        prop_assert_eq!(engine.round(), 0);
        prop_assert_eq!(engine.fighter().hp, 30);
        prop_assert_eq!(engine.enemy().hp, 25);
        prop_assert!(engine.fighter().last_move.is_none());
    }

    /// The first submission of a battle is never a repeat, whatever the
    /// previous match recorded.
    #[test]
    fn fresh_battles_accept_any_catalog_move(idx in 0usize..4) {
        let mut f = fighter();
        let (name, _) = f.moves.at(idx);
        let name = name.to_string();
        f.last_move = Some(name.clone());
        let mut engine = BattleEngine::new(&mut f, enemy(), None, false, Roller::from_seed(0));
        prop_assert!(engine.validate(&name).is_ok());
    }
}
