use serde::{Deserialize, Serialize, Serializer};

/// Info-box values of one character, keyed by field name in schema order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryRecord {
    fields: Vec<(String, String)>,
}

impl GalleryRecord {
    /// Create a record from `(field name, value)` pairs already in schema order
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value of a field, `None` only if the field is not part of the schema
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Values in schema order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    /// Field names in schema order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Normalized record extracted from one character page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// URL of the character page
    pub url: String,

    /// Name derived from the URL
    pub name: String,

    /// Power phrases in page order
    pub powers: Vec<String>,

    /// Info-box values
    pub gallery: GalleryRecord,
}

impl CharacterRecord {
    /// Flatten into cells matching [`CharacterTable::columns`]; powers are joined with `; `
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(3 + self.gallery.len());
        row.push(self.url.clone());
        row.push(self.name.clone());
        row.push(self.powers.join("; "));
        row.extend(self.gallery.values().map(str::to_string));
        row
    }
}

/// Output of a harvest run: fixed header plus one record per extracted page
///
/// Serialized rows are flat cell lists lined up with `columns`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CharacterTable {
    /// `url, name, powers` followed by the gallery field names
    pub columns: Vec<String>,

    /// Extracted records, in processing order
    #[serde(serialize_with = "serialize_rows")]
    pub rows: Vec<CharacterRecord>,

    /// URLs whose text could not be resolved
    pub skipped: Vec<String>,
}

impl CharacterTable {
    /// Create an empty table for the given gallery schema
    pub fn new(gallery_fields: &[String]) -> Self {
        Self {
            columns: Self::columns(gallery_fields),
            rows: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Column header for the given gallery schema
    pub fn columns(gallery_fields: &[String]) -> Vec<String> {
        ["url", "name", "powers"]
            .iter()
            .map(|c| c.to_string())
            .chain(gallery_fields.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn serialize_rows<S: Serializer>(rows: &[CharacterRecord], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(rows.iter().map(CharacterRecord::to_row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GALLERY_FIELDS;

    fn schema() -> Vec<String> {
        GALLERY_FIELDS.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_columns_are_fixed() {
        let columns = CharacterTable::columns(&schema());
        assert_eq!(columns.len(), 18);
        assert_eq!(&columns[..4], &["url", "name", "powers", "Real Name"]);
        assert_eq!(columns[17], "Creators");
    }

    #[test]
    fn test_row_matches_columns() {
        let gallery = GalleryRecord::new(
            schema()
                .into_iter()
                .map(|f| {
                    let value = if f == "Eyes" { "Brown".to_string() } else { String::new() };
                    (f, value)
                })
                .collect(),
        );
        let record = CharacterRecord {
            url: "https://marvel.fandom.com/wiki/Jessica_Jones".to_string(),
            name: "Jessica Jones".to_string(),
            powers: vec!["flight".to_string(), "strength".to_string()],
            gallery,
        };

        let row = record.to_row();
        let columns = CharacterTable::columns(&schema());
        assert_eq!(row.len(), columns.len());
        assert_eq!(row[2], "flight; strength");
        let eyes = columns.iter().position(|c| c == "Eyes").unwrap();
        assert_eq!(row[eyes], "Brown");
        assert_eq!(record.gallery.get("Eyes"), Some("Brown"));
        assert_eq!(record.gallery.get("Hair"), Some(""));
        assert_eq!(record.gallery.get("Shoe Size"), None);
    }

    #[test]
    fn test_serialized_rows_line_up_with_columns() {
        let mut table = CharacterTable::new(&schema());
        let gallery = GalleryRecord::new(
            schema()
                .into_iter()
                .map(|f| {
                    let value = if f == "Real Name" { "Scott Lang".to_string() } else { String::new() };
                    (f, value)
                })
                .collect(),
        );
        table.rows.push(CharacterRecord {
            url: "https://marvel.fandom.com/wiki/Ant-Man".to_string(),
            name: "Ant-Man".to_string(),
            powers: vec!["size shifting".to_string()],
            gallery,
        });
        table.skipped.push("https://marvel.fandom.com/wiki/Angel".to_string());

        let json = serde_json::to_value(&table).unwrap();
        let columns = json["columns"].as_array().unwrap();
        let row = json["rows"][0].as_array().unwrap();
        assert_eq!(row.len(), columns.len());
        assert_eq!(columns[3], "Real Name");
        assert_eq!(row[3], "Scott Lang");
        assert_eq!(row[2], "size shifting");
        assert_eq!(json["skipped"][0], "https://marvel.fandom.com/wiki/Angel");
    }
}
