/// Known heroes and the universe they come from. Checked top to bottom by
/// substring, so more specific names must come first.
pub const UNIVERSE_TABLE: &[(&str, &str)] = &[
    ("Miles Morales", "Earth-1610"),
    ("Peter B. Parker", "Earth-616B"),
    ("Gwen Stacy", "Earth-65"),
    ("Spider-Man Noir", "Earth-90214"),
    ("Peni Parker", "Earth-14512"),
    ("Spider-Ham", "Earth-8311"),
    ("Miguel O'Hara", "Earth-928"),
    ("Jessica Drew", "Earth-404"),
];

const FALLBACK_BASE: usize = 1000;

/// Maps a hero name to its universe label, falling back to a label derived
/// from the record's 0-based position.
pub fn resolve_universe(hero_name: &str, position_index: usize) -> String {
    UNIVERSE_TABLE
        .iter()
        .find(|(needle, _)| hero_name.contains(needle))
        .map(|(_, universe)| (*universe).to_string())
        .unwrap_or_else(|| format!("Earth-{}", FALLBACK_BASE + position_index))
}
