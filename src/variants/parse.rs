// Parsing the model's reply into variants.
//
// The prompt asks for a bare JSON array, but chat models often wrap it in a
// ```json fence anyway.

use anyhow::{Context, Result};

use super::traits::GeneratedVariant;

/// Parse a JSON array of `{variant, type}` objects, dropping entries whose
/// variant is blank.
pub fn parse_variants(text: &str) -> Result<Vec<GeneratedVariant>> {
    let body = strip_code_fence(text.trim());
    let parsed: Vec<GeneratedVariant> =
        serde_json::from_str(body).context("Failed to parse AI response")?;

    Ok(parsed
        .into_iter()
        .filter_map(|v| {
            let variant = v.variant.trim();
            if variant.is_empty() {
                return None;
            }
            Some(GeneratedVariant {
                variant: variant.to_string(),
                variant_type: v.variant_type.trim().to_string(),
            })
        })
        .collect())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip the info string ("json") up to the end of the opening line.
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_array() {
        let variants = parse_variants(
            r#"[{"variant": "kteb", "type": "conjugation"}, {"variant": "ktub", "type": "plural"}]"#,
        )
        .unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].variant, "kteb");
        assert_eq!(variants[1].variant_type, "plural");
    }

    #[test]
    fn test_tolerates_code_fence() {
        let text = "```json\n[{\"variant\": \"jmal\", \"type\": \"plural\"}]\n```";
        let variants = parse_variants(text).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].variant, "jmal");

        let bare_fence = "```\n[]\n```";
        assert!(parse_variants(bare_fence).unwrap().is_empty());
    }

    #[test]
    fn test_drops_blank_variants() {
        let variants =
            parse_variants(r#"[{"variant": "  ", "type": "plural"}, {"variant": "x2"}]"#).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].variant, "x2");
        assert_eq!(variants[0].variant_type, "");
    }

    #[test]
    fn test_prose_is_an_error() {
        let err = parse_variants("Sorry, I can't help with that.").unwrap_err();
        assert!(err.to_string().contains("Failed to parse AI response"));
    }
}
