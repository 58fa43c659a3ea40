// src/export/yaml.rs
use super::document::ExportDocument;
use crate::error::ExportError;
use crate::linkedin::{EmploymentType, WorkSettingType};
use serde::Serialize;

const INDENT: &str = "  ";

/// Everything but the description, in file order.
#[derive(Serialize)]
struct ScalarFields<'a> {
    title: &'a str,
    company: &'a str,
    user_id: &'a str,
    status: &'a str,
    country: &'a str,
    city: &'a str,
    work_setting_type: WorkSettingType,
    employment_type: EmploymentType,
    platform: &'a str,
    url: &'a str,
    notes: &'a str,
}

impl<'a> From<&'a ExportDocument> for ScalarFields<'a> {
    fn from(doc: &'a ExportDocument) -> Self {
        Self {
            title: &doc.title,
            company: &doc.company,
            user_id: &doc.user_id,
            status: &doc.status,
            country: &doc.country,
            city: &doc.city,
            work_setting_type: doc.work_setting_type,
            employment_type: doc.employment_type,
            platform: &doc.platform,
            url: &doc.url,
            notes: &doc.notes,
        }
    }
}

/// Render the document; `description` is always a literal block scalar.
pub fn render(doc: &ExportDocument) -> Result<String, ExportError> {
    let mut yaml = serde_yaml::to_string(&ScalarFields::from(doc))?;
    yaml.push_str("description: ");
    yaml.push_str(&literal_block(&doc.description)?);
    Ok(yaml)
}

/// `|` header plus body indented one level. Chomping keeps trailing
/// newlines exact; an indentation indicator is added when the first
/// non-empty line starts with a space.
fn literal_block(text: &str) -> Result<String, ExportError> {
    if let Some(character) = text.chars().find(|c| !is_block_safe(*c)) {
        return Err(ExportError::UnsupportedCharacter {
            field: "description",
            character,
        });
    }

    let body = text.trim_end_matches('\n');
    let trailing = text.len() - body.len();
    let chomping = match trailing {
        0 => "-",
        1 if !body.is_empty() => "",
        _ => "+",
    };

    let indentation = match text.split('\n').find(|line| !line.is_empty()) {
        Some(line) if line.starts_with(' ') => "2",
        _ => "",
    };

    let mut block = format!("|{}{}\n", indentation, chomping);
    if text.is_empty() {
        return Ok(block);
    }

    let content = text.strip_suffix('\n').unwrap_or(text);
    for line in content.split('\n') {
        if !line.is_empty() {
            block.push_str(INDENT);
            block.push_str(line);
        }
        block.push('\n');
    }
    Ok(block)
}

fn is_block_safe(c: char) -> bool {
    match c {
        '\n' | '\t' => true,
        '\u{2028}' | '\u{2029}' | '\u{FEFF}' | '\u{FFFE}' | '\u{FFFF}' => false,
        c => !c.is_control(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::{DEFAULT_USER_ID, EXPORT_KEYS};
    use crate::linkedin::JobRecord;

    fn sample_document(description: &str) -> ExportDocument {
        let record = JobRecord {
            title: "Senior SWE".to_string(),
            company: "Acme, Inc.!".to_string(),
            location: "San Francisco, United States".to_string(),
            city: "San Francisco".to_string(),
            country: "United States".to_string(),
            description: description.to_string(),
            url: "https://www.linkedin.com/jobs/view/42".to_string(),
            work_setting_type: WorkSettingType::Remote,
            employment_type: EmploymentType::Fulltime,
        };
        ExportDocument::from_record(&record, DEFAULT_USER_ID)
    }

    #[test]
    fn test_keys_in_fixed_order() {
        let yaml = render(&sample_document("About the job")).unwrap();
        let mapping: serde_yaml::Mapping = serde_yaml::from_str(&yaml).unwrap();
        let keys: Vec<&str> = mapping.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(keys, EXPORT_KEYS);
    }

    #[test]
    fn test_description_is_block_scalar() {
        let description = "About the job\n\nWe ship: fast & \"safe\" # really\n- bullet";
        let yaml = render(&sample_document(description)).unwrap();

        assert!(yaml.contains("description: |-\n  About the job\n\n  We ship:"));
        assert!(yaml.ends_with("  - bullet\n"));
    }

    #[test]
    fn test_round_trip_recovers_document() {
        let descriptions = [
            "",
            "single line",
            "two\nlines",
            "ends with newline\n",
            "many trailing\n\n\n",
            "\n",
            "  indented start\nnext",
            "\n\n  leading blank lines",
            "tabs\tand   spaces   \n   \nend",
        ];
        for description in descriptions {
            let doc = sample_document(description);
            let yaml = render(&doc).unwrap();
            let parsed: ExportDocument = serde_yaml::from_str(&yaml)
                .unwrap_or_else(|e| panic!("{:?} failed: {}\n{}", description, e, yaml));
            assert_eq!(parsed, doc, "yaml:\n{}", yaml);
        }
    }

    #[test]
    fn test_quotes_scalars_that_need_it() {
        let mut doc = sample_document("x");
        doc.title = "Engineer: Platform #1".to_string();
        let yaml = render(&doc).unwrap();
        let parsed: ExportDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.title, "Engineer: Platform #1");
        assert!(yaml.contains("notes: ''"));
    }

    #[test]
    fn test_control_characters_fail() {
        let err = render(&sample_document("bell\u{7}")).unwrap_err();
        assert!(matches!(
            err,
            ExportError::UnsupportedCharacter {
                field: "description",
                character: '\u{7}'
            }
        ));
        assert!(render(&sample_document("crlf\r\n")).is_err());
    }
}
