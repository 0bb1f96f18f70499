use crate::models::{DerivedStats, Integration};

/// 计算单个集成的统计数据；未选中或集合缺失时计为 0
pub fn derive_stats(integration: Option<&Integration>) -> DerivedStats {
    let integration = match integration {
        Some(i) => i,
        None => return DerivedStats::default(),
    };

    let reads = integration.read_objects();
    let writes = integration.write_objects();

    let read_fields: usize = reads
        .iter()
        .map(|obj| obj.required_fields.len() + obj.optional_fields.len())
        .sum();
    let write_fields: usize = writes.iter().map(|obj| obj.fields.len()).sum();

    DerivedStats {
        read_objects: reads.len(),
        write_objects: writes.len(),
        total_fields: read_fields + write_fields,
    }
}

impl Integration {
    pub fn stats(&self) -> DerivedStats {
        derive_stats(Some(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse;
    use crate::models::{Field, ReadObject, ReadSection, WriteObject, WriteSection};
    use proptest::prelude::*;

    fn field(name: &str) -> Field {
        Field {
            field_name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_no_selection() {
        assert_eq!(derive_stats(None), DerivedStats::default());
    }

    #[test]
    fn test_empty_integrations_document() {
        let doc = parse("integrations: []").unwrap();
        assert_eq!(derive_stats(doc.integrations.first()), DerivedStats::default());
    }

    #[test]
    fn test_read_only_integration() {
        let yaml = r#"integrations:
  - name: crm
    read:
      objects:
        - objectName: contact
          requiredFields:
            - fieldName: firstName
            - fieldName: lastName
          optionalFields:
            - fieldName: phone
"#;
        let doc = parse(yaml).unwrap();
        let stats = derive_stats(doc.integrations.first());
        assert_eq!(
            stats,
            DerivedStats {
                read_objects: 1,
                write_objects: 0,
                total_fields: 3,
            }
        );
    }

    #[test]
    fn test_write_only_integration() {
        let yaml = r#"integrations:
  - name: crm
    write:
      objects:
        - objectName: lead
          fields:
            - fieldName: email
            - fieldName: company
"#;
        let doc = parse(yaml).unwrap();
        let stats = derive_stats(doc.integrations.first());
        assert_eq!(
            stats,
            DerivedStats {
                read_objects: 0,
                write_objects: 1,
                total_fields: 2,
            }
        );
    }

    #[test]
    fn test_invalid_document_yields_zero() {
        let doc = parse("integrations:\n  - read: {objects: [\n");
        assert!(doc.is_none());
        let selected = doc.as_ref().and_then(|d| d.integrations.get(3));
        assert_eq!(derive_stats(selected), DerivedStats::default());
    }

    #[test]
    fn test_read_objects_without_fields() {
        let yaml = r#"integrations:
  - read:
      objects:
        - objectName: a
        - objectName: b
    write:
      objects:
        - fields:
            - fieldName: x
"#;
        let doc = parse(yaml).unwrap();
        let stats = doc.integrations[0].stats();
        assert_eq!(stats.read_objects, 2);
        assert_eq!(stats.write_objects, 1);
        assert_eq!(stats.total_fields, 1);
    }

    #[test]
    fn test_read_section_without_objects() {
        let doc = parse("integrations:\n  - read: {}\n    write:\n      objects: 5\n").unwrap();
        assert_eq!(doc.integrations[0].stats(), DerivedStats::default());
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = DerivedStats {
            read_objects: 1,
            write_objects: 2,
            total_fields: 3,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"readObjects": 1, "writeObjects": 2, "totalFields": 3})
        );
    }

    proptest! {
        #[test]
        fn prop_total_fields_is_sum(
            reads in proptest::collection::vec((0usize..5, 0usize..5), 0..6),
            writes in proptest::collection::vec(0usize..5, 0..6),
        ) {
            let integration = Integration {
                read: Some(ReadSection {
                    objects: reads
                        .iter()
                        .map(|(req, opt)| ReadObject {
                            required_fields: (0..*req).map(|i| field(&format!("r{}", i))).collect(),
                            optional_fields: (0..*opt).map(|i| field(&format!("o{}", i))).collect(),
                            ..Default::default()
                        })
                        .collect(),
                }),
                write: Some(WriteSection {
                    objects: writes
                        .iter()
                        .map(|n| WriteObject {
                            fields: (0..*n).map(|i| field(&format!("w{}", i))).collect(),
                            ..Default::default()
                        })
                        .collect(),
                }),
                ..Default::default()
            };

            let expected: usize = reads.iter().map(|(a, b)| a + b).sum::<usize>()
                + writes.iter().sum::<usize>();
            let stats = derive_stats(Some(&integration));
            prop_assert_eq!(stats.read_objects, reads.len());
            prop_assert_eq!(stats.write_objects, writes.len());
            prop_assert_eq!(stats.total_fields, expected);
        }
    }
}
