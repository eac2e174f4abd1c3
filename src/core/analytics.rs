use crate::domain::model::{Character, Group, StatKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupShare {
    pub group: Group,
    pub count: usize,
    /// Share of the batch, rounded to a whole percent.
    pub percent: u32,
}

/// How many records fall in each group. Empty groups are left out.
pub fn group_distribution(records: &[Character]) -> Vec<GroupShare> {
    let total = records.len();
    Group::ALL
        .into_iter()
        .filter_map(|group| {
            let count = records.iter().filter(|c| c.group == group).count();
            (count > 0).then(|| GroupShare {
                group,
                count,
                percent: ((count as f64 / total as f64) * 100.0).round() as u32,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatAverage {
    pub stat: &'static str,
    pub average: f64,
}

/// Mean of each stat over records that have stats. Empty when none do.
pub fn stat_averages(records: &[Character]) -> Vec<StatAverage> {
    let with_stats: Vec<_> = records.iter().filter_map(|c| c.stats).collect();
    if with_stats.is_empty() {
        return Vec::new();
    }

    StatKind::ALL
        .into_iter()
        .map(|kind| {
            let sum: u32 = with_stats.iter().map(|s| u32::from(s.get(kind))).sum();
            StatAverage {
                stat: kind.label(),
                average: f64::from(sum) / with_stats.len() as f64,
            }
        })
        .collect()
}

/// Side-by-side stats for the selected characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub heroes: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub stat: &'static str,
    /// One value per hero, in `heroes` order. Missing stats read as 0.
    pub values: Vec<u8>,
}

impl ComparisonTable {
    /// Hero with the highest value for `stat`; ties go to the first selected.
    pub fn leader(&self, stat: StatKind) -> Option<&str> {
        let row = self.rows.iter().find(|r| r.stat == stat.label())?;
        let best = row.values.iter().copied().max()?;
        let position = row.values.iter().position(|v| *v == best)?;
        self.heroes.get(position).map(String::as_str)
    }
}

pub fn comparison_table(selected: &[&Character]) -> ComparisonTable {
    ComparisonTable {
        heroes: selected.iter().map(|c| c.hero_name.clone()).collect(),
        rows: StatKind::ALL
            .into_iter()
            .map(|kind| ComparisonRow {
                stat: kind.label(),
                values: selected
                    .iter()
                    .map(|c| c.stats.map_or(0, |s| s.get(kind)))
                    .collect(),
            })
            .collect(),
    }
}
