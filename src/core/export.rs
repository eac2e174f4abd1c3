use crate::domain::model::{Character, CharacterBatch, StatKind};
use crate::utils::error::{Result, ScraperError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_EXPORT_FILENAME: &str = "spiderverse-characters.csv";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

pub const EXPORT_HEADERS: [&str; 10] = [
    "index",
    "displayName",
    "heroName",
    "imageUrl",
    "group",
    "strength",
    "agility",
    "intelligence",
    "webSlinging",
    "combat",
];

/// One exported row, every cell as text. Missing stats are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub index: String,
    pub display_name: String,
    pub hero_name: String,
    pub image_url: String,
    pub group: String,
    pub strength: String,
    pub agility: String,
    pub intelligence: String,
    pub web_slinging: String,
    pub combat: String,
}

impl From<&Character> for ExportRow {
    fn from(character: &Character) -> Self {
        let stat = |kind: StatKind| {
            character
                .stats
                .map(|s| s.get(kind).to_string())
                .unwrap_or_default()
        };

        Self {
            index: character.index.to_string(),
            display_name: character.display_name.clone(),
            hero_name: character.hero_name.clone(),
            image_url: character.image_url.clone(),
            group: character.group.to_string(),
            strength: stat(StatKind::Strength),
            agility: stat(StatKind::Agility),
            intelligence: stat(StatKind::Intelligence),
            web_slinging: stat(StatKind::WebSlinging),
            combat: stat(StatKind::Combat),
        }
    }
}

/// Serializes records to comma-separated text with a header row.
pub fn serialize(records: &[Character]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    // Written explicitly so an empty batch still gets its header.
    writer.write_record(EXPORT_HEADERS)?;
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScraperError::IoError(std::io::Error::new(e.error().kind(), e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| ScraperError::ProcessingError {
        message: format!("export produced invalid UTF-8: {}", e),
    })
}

/// Reads text produced by [`serialize`] back into rows.
pub fn parse(text: &str) -> Result<Vec<ExportRow>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    if headers.iter().ne(EXPORT_HEADERS) {
        return Err(ScraperError::ProcessingError {
            message: format!("unexpected export header: {:?}", headers),
        });
    }

    let mut rows = Vec::new();
    for row in reader.deserialize::<ExportRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Pretty JSON of the whole batch, including when it was produced.
pub fn snapshot_json(batch: &CharacterBatch) -> Result<String> {
    Ok(serde_json::to_string_pretty(batch)?)
}

/// JSON file name that sits next to the CSV export.
pub fn snapshot_filename(export_filename: &str) -> String {
    let path = Path::new(export_filename);
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let stem = match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) if is_csv => stem,
        _ => export_filename,
    };
    format!("{}.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Group, Stats};

    fn sample() -> Vec<Character> {
        vec![
            Character {
                index: 1,
                display_name: "Earth-928".to_string(),
                hero_name: "Miguel O'Hara, \"2099\"".to_string(),
                image_url: "https://images.weserv.nl/?url=a&w=400&h=600&fit=cover".to_string(),
                group: Group::Cartoons,
                stats: Some(Stats {
                    strength: 90,
                    agility: 85,
                    intelligence: 99,
                    web_slinging: 70,
                    combat: 88,
                }),
            },
            Character {
                index: 2,
                display_name: "Earth-1001".to_string(),
                hero_name: "Peni Parker".to_string(),
                image_url: "/placeholder.svg".to_string(),
                group: Group::Anime,
                stats: None,
            },
        ]
    }

    #[test]
    fn test_header_and_rows() {
        let text = serialize(&sample()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "index,displayName,heroName,imageUrl,group,strength,agility,intelligence,webSlinging,combat"
        );
        assert_eq!(
            lines[1],
            r#"1,Earth-928,"Miguel O'Hara, ""2099""",https://images.weserv.nl/?url=a&w=400&h=600&fit=cover,Cartoons,90,85,99,70,88"#
        );
        assert_eq!(lines[2], "2,Earth-1001,Peni Parker,/placeholder.svg,Anime,,,,,");
    }

    #[test]
    fn test_read_back_reproduces_fields() {
        let records = sample();
        let rows = parse(&serialize(&records).unwrap()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ExportRow::from(&records[0]));
        assert_eq!(rows[0].hero_name, "Miguel O'Hara, \"2099\"");
        assert_eq!(rows[0].web_slinging, "70");
        assert_eq!(rows[1].strength, "");
        assert_eq!(rows[1].combat, "");
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let records = sample();
        assert_eq!(serialize(&records).unwrap(), serialize(&records).unwrap());
    }

    #[test]
    fn test_empty_batch_has_header_only() {
        let text = serialize(&[]).unwrap();
        assert_eq!(text.trim_end(), EXPORT_HEADERS.join(","));
        assert!(parse(&text).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_foreign_header() {
        assert!(parse("id,name\n1,x\n").is_err());
    }

    #[test]
    fn test_snapshot_filename() {
        assert_eq!(snapshot_filename(DEFAULT_EXPORT_FILENAME), "spiderverse-characters.json");
        assert_eq!(snapshot_filename("out"), "out.json");
        assert_eq!(snapshot_filename("HEROES.CSV"), "HEROES.json");
        assert_eq!(snapshot_filename("heroes.Csv"), "heroes.json");
        assert_eq!(snapshot_filename("heroes.tsv"), "heroes.tsv.json");
    }
}
