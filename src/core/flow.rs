use crate::core::display::{capitalize, UNKNOWN_PROVIDER};
use crate::models::{Field, Integration, ReadObject, WriteObject};

/// 流程图节点：source 系统 / 映射层 / 目标应用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub id: &'static str,
    pub label: String,
    pub subtitle: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl Direction {
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Read => "→",
            Direction::Write => "←",
        }
    }
}

/// 一组非空字段（Required / Optional / Fields）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    pub label: &'static str,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationEntry {
    pub object_name: String,
    pub schedule: Option<String>,
    pub direction: Direction,
    /// read 为 destination，write 为 source
    pub endpoint: String,
    pub groups: Vec<FieldGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSection {
    pub title: &'static str,
    pub entries: Vec<OperationEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowDiagram {
    pub title: String,
    pub nodes: [FlowNode; 3],
    pub edges: [FlowEdge; 2],
    /// 只包含有对象的方向
    pub operations: Vec<OperationSection>,
}

impl FlowDiagram {
    pub fn for_integration(integration: &Integration) -> Self {
        let provider = integration.provider_or(UNKNOWN_PROVIDER);
        let nodes = [
            FlowNode {
                id: "source",
                label: capitalize(provider),
                subtitle: "Source System",
            },
            FlowNode {
                id: "mapping",
                label: "Ampersand".to_string(),
                subtitle: "Integration Layer",
            },
            FlowNode {
                id: "destination",
                label: "Your app".to_string(),
                subtitle: "Destination",
            },
        ];
        let edges = [
            FlowEdge {
                from: "source",
                to: "mapping",
            },
            FlowEdge {
                from: "mapping",
                to: "destination",
            },
        ];

        let mut operations = Vec::new();
        let reads = integration.read_objects();
        if !reads.is_empty() {
            operations.push(OperationSection {
                title: "Read Operations",
                entries: reads.iter().map(read_entry).collect(),
            });
        }
        let writes = integration.write_objects();
        if !writes.is_empty() {
            operations.push(OperationSection {
                title: "Write Operations",
                entries: writes.iter().map(write_entry).collect(),
            });
        }

        Self {
            title: format!("{} Flow", integration.label()),
            nodes,
            edges,
            operations,
        }
    }
}

fn read_entry(obj: &ReadObject) -> OperationEntry {
    OperationEntry {
        object_name: obj.label().to_string(),
        schedule: obj.schedule.clone().filter(|s| !s.is_empty()),
        direction: Direction::Read,
        endpoint: obj.target().to_string(),
        groups: non_empty_groups(&[
            ("Required", obj.required_fields.as_slice()),
            ("Optional", obj.optional_fields.as_slice()),
        ]),
    }
}

fn write_entry(obj: &WriteObject) -> OperationEntry {
    OperationEntry {
        object_name: obj.label().to_string(),
        schedule: None,
        direction: Direction::Write,
        endpoint: obj.origin().to_string(),
        groups: non_empty_groups(&[("Fields", obj.fields.as_slice())]),
    }
}

fn non_empty_groups(groups: &[(&'static str, &[Field])]) -> Vec<FieldGroup> {
    groups
        .iter()
        .filter(|(_, fields)| !fields.is_empty())
        .map(|(label, fields)| FieldGroup {
            label: *label,
            fields: fields.iter().map(|f| f.label().to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse;

    const YAML: &str = r#"integrations:
  - name: salesforce
    displayName: My Salesforce Integration
    provider: salesforce
    read:
      objects:
        - objectName: contact
          destination: contactWebhook
          schedule: "*/10 * * * *"
          requiredFields:
            - fieldName: firstName
          optionalFields: []
    write:
      objects:
        - objectName: lead
          fields:
            - fieldName: email
            - {}
"#;

    #[test]
    fn test_nodes_and_edges() {
        let doc = parse(YAML).unwrap();
        let diagram = FlowDiagram::for_integration(&doc.integrations[0]);

        assert_eq!(diagram.title, "My Salesforce Integration Flow");
        assert_eq!(diagram.nodes[0].label, "Salesforce");
        assert_eq!(diagram.nodes[0].subtitle, "Source System");
        assert_eq!(diagram.nodes[1].label, "Ampersand");
        assert_eq!(diagram.nodes[2].label, "Your app");
        assert_eq!(diagram.edges[0], FlowEdge { from: "source", to: "mapping" });
        assert_eq!(diagram.edges[1], FlowEdge { from: "mapping", to: "destination" });
    }

    #[test]
    fn test_operation_sections() {
        let doc = parse(YAML).unwrap();
        let diagram = FlowDiagram::for_integration(&doc.integrations[0]);
        assert_eq!(diagram.operations.len(), 2);

        let read = &diagram.operations[0];
        assert_eq!(read.title, "Read Operations");
        let entry = &read.entries[0];
        assert_eq!(entry.object_name, "contact");
        assert_eq!(entry.schedule.as_deref(), Some("*/10 * * * *"));
        assert_eq!(entry.direction.arrow(), "→");
        assert_eq!(entry.endpoint, "contactWebhook");
        // 空的 optionalFields 不出现
        assert_eq!(entry.groups.len(), 1);
        assert_eq!(entry.groups[0].label, "Required");

        let write = &diagram.operations[1];
        assert_eq!(write.title, "Write Operations");
        let entry = &write.entries[0];
        assert_eq!(entry.direction, Direction::Write);
        assert_eq!(entry.endpoint, "API");
        assert_eq!(entry.groups[0].fields, vec!["email", "Unnamed Field"]);
    }

    #[test]
    fn test_missing_provider_and_sections() {
        let diagram = FlowDiagram::for_integration(&Integration::default());
        assert_eq!(diagram.nodes[0].label, "Unknown");
        assert_eq!(diagram.title, "Unnamed Integration Flow");
        assert!(diagram.operations.is_empty());
    }
}
