use serde::Serialize;

use crate::core::display::NO_PROVIDER;
use crate::models::{ConfigDocument, DerivedStats};

/// 解析状态面板中每个集成的概要
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationCard {
    pub label: String,
    pub provider: String,
    pub stats: DerivedStats,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ParseSummary {
    Invalid,
    #[serde(rename_all = "camelCase")]
    Valid {
        integrations_found: usize,
        cards: Vec<IntegrationCard>,
    },
}

impl ParseSummary {
    pub fn from_document(doc: Option<&ConfigDocument>) -> Self {
        match doc {
            None => ParseSummary::Invalid,
            Some(doc) => ParseSummary::Valid {
                integrations_found: doc.integrations.len(),
                cards: doc
                    .integrations
                    .iter()
                    .map(|i| IntegrationCard {
                        label: i.label().to_string(),
                        provider: i.provider_or(NO_PROVIDER).to_string(),
                        stats: i.stats(),
                    })
                    .collect(),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ParseSummary::Valid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse;

    #[test]
    fn test_invalid_summary() {
        let summary = ParseSummary::from_document(None);
        assert!(!summary.is_valid());
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({"status": "invalid"})
        );
    }

    #[test]
    fn test_valid_summary_cards() {
        let yaml = "integrations:\n  - name: a\n    provider: p\n    read:\n      objects: [{}]\n  - displayName: B\n";
        let doc = parse(yaml).unwrap();
        let summary = ParseSummary::from_document(Some(&doc));

        match summary {
            ParseSummary::Valid {
                integrations_found,
                cards,
            } => {
                assert_eq!(integrations_found, 2);
                assert_eq!(cards[0].label, "a");
                assert_eq!(cards[0].provider, "p");
                assert_eq!(cards[0].stats.read_objects, 1);
                assert_eq!(cards[1].label, "B");
                assert_eq!(cards[1].provider, "N/A");
                assert_eq!(cards[1].stats.write_objects, 0);
            }
            ParseSummary::Invalid => panic!("expected valid summary"),
        }
    }

    #[test]
    fn test_valid_summary_json() {
        let doc = parse("integrations: []").unwrap();
        let summary = ParseSummary::from_document(Some(&doc));
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({"status": "valid", "integrationsFound": 0, "cards": []})
        );
    }
}
