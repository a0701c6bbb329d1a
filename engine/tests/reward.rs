use engine::{
    BattleEngine, Enemy, Fighter, Move, MoveCatalog, Outcome, RewardGrant, Roller, UPGRADE_BONUS,
};

fn fighter() -> Fighter {
    Fighter::new(
        "Tester",
        30,
        MoveCatalog::from_entries([("punch", 2), ("kick", 4)]).unwrap(),
    )
}

/// An enemy that dies to the first punch.
fn pushover() -> Enemy {
    Enemy::new("Pushover", 1, MoveCatalog::from_entries([("Jab", 1)]).unwrap())
}

fn win(fighter: &mut Fighter, reward: Option<Move>, upgrade_all: bool) -> Option<RewardGrant> {
    let mut engine = BattleEngine::new(fighter, pushover(), reward, upgrade_all, Roller::from_seed(1));
    let report = engine.submit_move("punch").unwrap();
    assert_eq!(report.outcome, Outcome::Won);
    report.reward
}

#[test]
fn positive_reward_adds_a_damage_ability() {
    let mut f = fighter();
    let grant = win(&mut f, Some(Move::new("wrestle", 7)), false);
    assert_eq!(
        grant,
        Some(RewardGrant::NewAbility {
            name: "wrestle".to_string(),
            value: 7,
        })
    );
    assert_eq!(f.moves.get("wrestle"), Some(7));
    assert_eq!(f.moves.len(), 3);
}

#[test]
fn negative_reward_is_granted_and_still_self_inflicts() {
    let mut f = fighter();
    let grant = win(&mut f, Some(Move::new("rest", -4)), false);
    assert_eq!(
        grant,
        Some(RewardGrant::NewAbility {
            name: "rest".to_string(),
            value: -4,
        })
    );
    assert_eq!(f.moves.get("rest"), Some(-4));

    // Using the new "heal" in the next match reduces the fighter's own hp.
    let hp_before = f.hp;
    let mut engine = BattleEngine::new(
        &mut f,
        Enemy::new("Jabber", 10, MoveCatalog::from_entries([("Jab", 1)]).unwrap()),
        None,
        false,
        Roller::from_seed(2),
    );
    let report = engine.submit_move("rest").unwrap();
    assert_eq!(report.enemy_hp, 10);
    assert_eq!(report.fighter_hp, hp_before - 4 - 1);
}

#[test]
fn zero_or_missing_reward_changes_nothing() {
    let mut f = fighter();
    assert_eq!(win(&mut f, None, false), None);
    assert_eq!(f.moves.len(), 2);

    let mut f = fighter();
    assert_eq!(win(&mut f, Some(Move::new("noop", 0)), false), None);
    assert_eq!(f.moves.len(), 2);
    assert_eq!(f.moves.get("noop"), None);
}

#[test]
fn upgrade_all_grows_every_move() {
    let mut f = fighter();
    f.moves.set("rest", -4);
    let grant = win(&mut f, None, true);
    assert_eq!(
        grant,
        Some(RewardGrant::UpgradeAll {
            bonus: UPGRADE_BONUS,
        })
    );
    assert_eq!(f.moves.get("punch"), Some(4));
    assert_eq!(f.moves.get("kick"), Some(6));
    assert_eq!(f.moves.get("rest"), Some(-6));
}

#[test]
fn upgrade_all_wins_over_a_supplied_reward() {
    let mut f = fighter();
    let grant = win(&mut f, Some(Move::new("wrestle", 7)), true);
    assert_eq!(
        grant,
        Some(RewardGrant::UpgradeAll {
            bonus: UPGRADE_BONUS,
        })
    );
    // The reward move must not sneak into the catalog.
    assert_eq!(f.moves.get("wrestle"), None);
    assert_eq!(f.moves.get("punch"), Some(4));
}

#[test]
fn reward_overwrites_an_existing_move() {
    let mut f = fighter();
    let grant = win(&mut f, Some(Move::new("kick", 9)), false);
    assert_eq!(
        grant,
        Some(RewardGrant::NewAbility {
            name: "kick".to_string(),
            value: 9,
        })
    );
    assert_eq!(f.moves.len(), 2);
    assert_eq!(f.moves.get("kick"), Some(9));
}
