use std::collections::HashMap;

pub(super) const DEFAULT_HEALING: u32 = 5;

pub(super) fn builtin_healing() -> HashMap<String, u32> {
    [
        ("ELIXIR_OF_LIFE", 100),
        ("UNICORN_BLOOD", 80),
        ("PHOENIX_FEATHERS", 40),
        ("MERMAID_TAIL", 20),
        ("SPIRIT_TEAR", 15),
        ("GOD_LEAF", 10),
        ("ELIXIR", 5),
    ]
    .into_iter()
    .map(|(id, heal)| (id.to_owned(), heal))
    .collect()
}

/// Containers are destructible obstacles; the egg holds premium loot.
pub(super) fn builtin_containers() -> HashMap<String, u32> {
    [("CHEST", 100), ("DRAGON_EGG", 500)]
        .into_iter()
        .map(|(id, value)| (id.to_owned(), value))
        .collect()
}
