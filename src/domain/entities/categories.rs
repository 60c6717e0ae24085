use serde::{Deserialize, Deserializer, Serialize};

/// Ordered, duplicate-free set of category tags.
///
/// Always serialized as a JSON array. Deserialization accepts an array,
/// a bare string, `null` or an absent field, so records written by older
/// clients with a scalar category still read back as a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Categories(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Many(Vec<String>),
    One(String),
}

impl Categories {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
                normalized.push(tag.to_string());
            }
        }
        Categories(normalized)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for Categories {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let categories = match Option::<CategoryRepr>::deserialize(deserializer)? {
            Some(CategoryRepr::Many(tags)) => Categories::new(tags),
            Some(CategoryRepr::One(tag)) => Categories::new([tag]),
            None => Categories::default(),
        };
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default)]
        category: Categories,
    }

    fn parse(value: serde_json::Value) -> Categories {
        serde_json::from_value::<Holder>(value).unwrap().category
    }

    #[test]
    fn absent_and_null_become_empty() {
        assert!(parse(json!({})).is_empty());
        assert!(parse(json!({ "category": null })).is_empty());
    }

    #[test]
    fn bare_string_becomes_single_tag() {
        let categories = parse(json!({ "category": "web" }));

        assert_eq!(categories.as_slice(), ["web".to_string()]);
        assert_eq!(serde_json::to_value(&categories).unwrap(), json!(["web"]));
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated_in_order() {
        let categories = parse(json!({ "category": [" mobile", "web", "mobile", "", "ai "] }));

        assert_eq!(categories.as_slice(), ["mobile", "web", "ai"]);
    }

    #[test]
    fn blank_string_is_no_category() {
        assert!(parse(json!({ "category": "  " })).is_empty());
    }

    #[test]
    fn rejects_non_string_tags() {
        assert!(serde_json::from_value::<Holder>(json!({ "category": 7 })).is_err());
    }
}
