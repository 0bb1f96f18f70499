use crate::core::display::UNKNOWN_PROVIDER;
use crate::models::{Integration, ReadObject, WriteObject};

/// 读 / 写对象的统一视图，字段提取逻辑只实现一次
#[derive(Debug, Clone, Copy)]
pub enum SyncObject<'a> {
    Read(&'a ReadObject),
    Write(&'a WriteObject),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

impl Requirement {
    pub fn label(self) -> &'static str {
        match self {
            Requirement::Required => "required",
            Requirement::Optional => "optional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedField {
    pub name: String,
    /// 只有 source 侧字段区分 required / optional
    pub requirement: Option<Requirement>,
}

impl SyncObject<'_> {
    pub fn object_name(&self) -> &str {
        match self {
            SyncObject::Read(obj) => obj.label(),
            SyncObject::Write(obj) => obj.label(),
        }
    }

    /// source 侧为 required ∪ optional，destination 侧为 fields
    pub fn mapped_fields(&self) -> Vec<MappedField> {
        match self {
            SyncObject::Read(obj) => obj
                .required_fields
                .iter()
                .map(|f| (f, Requirement::Required))
                .chain(obj.optional_fields.iter().map(|f| (f, Requirement::Optional)))
                .map(|(f, req)| MappedField {
                    name: f.label().to_string(),
                    requirement: Some(req),
                })
                .collect(),
            SyncObject::Write(obj) => obj
                .fields
                .iter()
                .map(|f| MappedField {
                    name: f.label().to_string(),
                    requirement: None,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingObject {
    pub object_name: String,
    pub fields: Vec<MappedField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    pub title: String,
    pub objects: Vec<MappingObject>,
}

/// 字段映射详情：左侧 source 字段，右侧 destination 字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub source: MappingTable,
    pub destination: MappingTable,
}

impl FieldMapping {
    pub fn for_integration(integration: &Integration) -> Self {
        let source = integration
            .read_objects()
            .iter()
            .map(SyncObject::Read);
        let destination = integration
            .write_objects()
            .iter()
            .map(SyncObject::Write);

        Self {
            source: MappingTable {
                title: format!(
                    "Source Fields ({})",
                    integration.provider_or(UNKNOWN_PROVIDER)
                ),
                objects: source.map(mapping_object).collect(),
            },
            destination: MappingTable {
                title: "Destination Fields (Your App)".to_string(),
                objects: destination.map(mapping_object).collect(),
            },
        }
    }
}

fn mapping_object(obj: SyncObject<'_>) -> MappingObject {
    MappingObject {
        object_name: obj.object_name().to_string(),
        fields: obj.mapped_fields(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse;

    #[test]
    fn test_field_mapping_tables() {
        let yaml = r#"integrations:
  - provider: hubspot
    read:
      objects:
        - objectName: contact
          requiredFields:
            - fieldName: email
          optionalFields:
            - fieldName: phone
            - {}
    write:
      objects:
        - fields:
            - fieldName: company
"#;
        let doc = parse(yaml).unwrap();
        let mapping = FieldMapping::for_integration(&doc.integrations[0]);

        assert_eq!(mapping.source.title, "Source Fields (hubspot)");
        let contact = &mapping.source.objects[0];
        assert_eq!(contact.object_name, "contact");
        assert_eq!(
            contact.fields,
            vec![
                MappedField {
                    name: "email".to_string(),
                    requirement: Some(Requirement::Required),
                },
                MappedField {
                    name: "phone".to_string(),
                    requirement: Some(Requirement::Optional),
                },
                MappedField {
                    name: "Unnamed Field".to_string(),
                    requirement: Some(Requirement::Optional),
                },
            ]
        );

        assert_eq!(mapping.destination.title, "Destination Fields (Your App)");
        let dest = &mapping.destination.objects[0];
        assert_eq!(dest.object_name, "Unnamed Object");
        assert_eq!(dest.fields[0].name, "company");
        assert_eq!(dest.fields[0].requirement, None);
    }

    #[test]
    fn test_field_mapping_empty_integration() {
        let mapping = FieldMapping::for_integration(&Integration::default());
        assert_eq!(mapping.source.title, "Source Fields (Unknown)");
        assert!(mapping.source.objects.is_empty());
        assert!(mapping.destination.objects.is_empty());
    }

    #[test]
    fn test_requirement_label() {
        assert_eq!(Requirement::Required.label(), "required");
        assert_eq!(Requirement::Optional.label(), "optional");
    }
}
