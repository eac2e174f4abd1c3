//! Gallery view state: search term, group filter and the comparison selection.
//!
//! State is never mutated in place. Every user action goes through [`reduce`],
//! which returns the next state.

use crate::domain::model::{Character, Group};
use std::fmt;
use std::str::FromStr;

pub const MAX_SELECTION: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupFilter {
    #[default]
    All,
    Only(Group),
}

impl GroupFilter {
    pub fn matches(&self, group: Group) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Only(wanted) => *wanted == group,
        }
    }
}

impl FromStr for GroupFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(GroupFilter::All)
        } else {
            s.parse().map(GroupFilter::Only)
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupFilter::All => f.write_str("all"),
            GroupFilter::Only(group) => write!(f, "{}", group),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryState {
    pub search_term: String,
    pub group_filter: GroupFilter,
    /// Indices of selected records, in the order they were picked.
    pub selected: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryAction {
    Search(String),
    Filter(GroupFilter),
    ToggleSelect(u32),
    ClearSelection,
    /// A new batch arrived; old indices no longer name the same characters.
    ReplaceBatch,
}

impl GalleryState {
    pub fn is_selected(&self, index: u32) -> bool {
        self.selected.contains(&index)
    }

    pub fn can_select_more(&self) -> bool {
        self.selected.len() < MAX_SELECTION
    }
}

pub fn reduce(state: &GalleryState, action: GalleryAction) -> GalleryState {
    match action {
        GalleryAction::Search(term) => GalleryState {
            search_term: term,
            ..state.clone()
        },
        GalleryAction::Filter(group_filter) => GalleryState {
            group_filter,
            ..state.clone()
        },
        GalleryAction::ToggleSelect(index) => GalleryState {
            selected: toggle(state, index),
            ..state.clone()
        },
        GalleryAction::ClearSelection | GalleryAction::ReplaceBatch => GalleryState {
            selected: Vec::new(),
            ..state.clone()
        },
    }
}

fn toggle(state: &GalleryState, index: u32) -> Vec<u32> {
    let selected = &state.selected;
    if state.is_selected(index) {
        selected.iter().copied().filter(|i| *i != index).collect()
    } else if state.can_select_more() {
        selected.iter().copied().chain(std::iter::once(index)).collect()
    } else {
        selected.clone()
    }
}

/// Records matching the search term (hero or universe, case-insensitive)
/// and the group filter, in batch order.
pub fn visible<'a>(state: &GalleryState, records: &'a [Character]) -> Vec<&'a Character> {
    let needle = state.search_term.to_lowercase();
    records
        .iter()
        .filter(|c| {
            c.hero_name.to_lowercase().contains(&needle)
                || c.display_name.to_lowercase().contains(&needle)
        })
        .filter(|c| state.group_filter.matches(c.group))
        .collect()
}

/// Selected records in selection order. Indices missing from `records` are skipped.
pub fn selected<'a>(state: &GalleryState, records: &'a [Character]) -> Vec<&'a Character> {
    state
        .selected
        .iter()
        .filter_map(|index| records.iter().find(|c| c.index == *index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(index: u32, hero: &str, universe: &str, group: Group) -> Character {
        Character {
            index,
            display_name: universe.to_string(),
            hero_name: hero.to_string(),
            image_url: "/placeholder.svg".to_string(),
            group,
            stats: None,
        }
    }

    fn roster() -> Vec<Character> {
        vec![
            character(1, "Miles Morales", "Earth-1610", Group::Cartoons),
            character(2, "Peni Parker", "Earth-14512", Group::Anime),
            character(3, "Spider-Man (PS4)", "Earth-1002", Group::Games),
            character(4, "Gwen Stacy", "Earth-65", Group::Cartoons),
            character(5, "Spider-Man Noir", "Earth-90214", Group::Cartoons),
        ]
    }

    #[test]
    fn test_selection_caps_at_four() {
        let mut state = GalleryState::default();
        for index in 1..=5 {
            state = reduce(&state, GalleryAction::ToggleSelect(index));
        }
        assert_eq!(state.selected, vec![1, 2, 3, 4]);
        assert!(!state.can_select_more());
    }

    #[test]
    fn test_toggle_deselects_and_frees_a_slot() {
        let mut state = GalleryState::default();
        for index in 1..=4 {
            state = reduce(&state, GalleryAction::ToggleSelect(index));
        }
        let state = reduce(&state, GalleryAction::ToggleSelect(2));
        assert_eq!(state.selected, vec![1, 3, 4]);

        let state = reduce(&state, GalleryAction::ToggleSelect(5));
        assert_eq!(state.selected, vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_reduce_leaves_previous_state_untouched() {
        let before = GalleryState::default();
        let after = reduce(&before, GalleryAction::ToggleSelect(1));
        assert!(before.selected.is_empty());
        assert!(after.is_selected(1));
    }

    #[test]
    fn test_new_batch_clears_selection_but_keeps_filters() {
        let state = GalleryState {
            search_term: "spider".to_string(),
            group_filter: GroupFilter::Only(Group::Games),
            selected: vec![1, 2],
        };
        let next = reduce(&state, GalleryAction::ReplaceBatch);
        assert!(next.selected.is_empty());
        assert_eq!(next.search_term, "spider");
        assert_eq!(next.group_filter, GroupFilter::Only(Group::Games));
    }

    #[test]
    fn test_visible_applies_search_and_group() {
        let records = roster();
        let state = reduce(&GalleryState::default(), GalleryAction::Search("SPIDER".to_string()));
        let names: Vec<&str> = visible(&state, &records).iter().map(|c| c.hero_name.as_str()).collect();
        assert_eq!(names, vec!["Spider-Man (PS4)", "Spider-Man Noir"]);

        let state = reduce(&state, GalleryAction::Filter(GroupFilter::Only(Group::Games)));
        assert_eq!(visible(&state, &records).len(), 1);

        // Universe labels are searchable too.
        let state = reduce(&GalleryState::default(), GalleryAction::Search("earth-65".to_string()));
        assert_eq!(visible(&state, &records)[0].hero_name, "Gwen Stacy");
    }

    #[test]
    fn test_selected_follows_selection_order() {
        let records = roster();
        let state = GalleryState {
            selected: vec![4, 1, 99],
            ..GalleryState::default()
        };
        let heroes: Vec<&str> = selected(&state, &records).iter().map(|c| c.hero_name.as_str()).collect();
        assert_eq!(heroes, vec!["Gwen Stacy", "Miles Morales"]);
    }

    #[test]
    fn test_group_filter_parsing() {
        assert_eq!("all".parse::<GroupFilter>().unwrap(), GroupFilter::All);
        assert_eq!("Anime".parse::<GroupFilter>().unwrap(), GroupFilter::Only(Group::Anime));
        assert!("Manga".parse::<GroupFilter>().is_err());
        assert_eq!(GroupFilter::Only(Group::Games).to_string(), "Games");
    }
}
