use std::collections::HashMap;

pub fn builtin_fighters() -> HashMap<&'static str, &'static str> {
    HashMap::from([(
        "adventurer",
        include_str!("../content/fighters/adventurer.json"),
    )])
}

pub fn builtin_enemies() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("bandit", include_str!("../content/enemies/bandit.json")),
        ("footpad", include_str!("../content/enemies/footpad.json")),
        ("cutthroat", include_str!("../content/enemies/cutthroat.json")),
        ("warlord", include_str!("../content/enemies/warlord.json")),
    ])
}

pub fn builtin_campaigns() -> HashMap<&'static str, &'static str> {
    HashMap::from([(
        "journey",
        include_str!("../content/campaigns/journey.json"),
    )])
}
