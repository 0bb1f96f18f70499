use crate::models::{Field, Integration, ReadObject, WriteObject};

pub const UNNAMED_INTEGRATION: &str = "Unnamed Integration";
pub const UNNAMED_OBJECT: &str = "Unnamed Object";
pub const UNNAMED_FIELD: &str = "Unnamed Field";
pub const NO_PROVIDER: &str = "N/A";
pub const UNKNOWN_PROVIDER: &str = "Unknown";
pub const DEFAULT_READ_TARGET: &str = "webhook";
pub const DEFAULT_WRITE_ORIGIN: &str = "API";

/// 依次取第一个存在且非空的值，都没有时返回默认值
pub fn first_non_empty<'a>(a: Option<&'a str>, b: Option<&'a str>, default: &'a str) -> &'a str {
    a.filter(|s| !s.is_empty())
        .or_else(|| b.filter(|s| !s.is_empty()))
        .unwrap_or(default)
}

impl Integration {
    /// displayName → name → 占位符
    pub fn label(&self) -> &str {
        first_non_empty(
            self.display_name.as_deref(),
            self.name.as_deref(),
            UNNAMED_INTEGRATION,
        )
    }

    pub fn provider_or<'a>(&'a self, default: &'a str) -> &'a str {
        first_non_empty(self.provider.as_deref(), None, default)
    }
}

impl ReadObject {
    pub fn label(&self) -> &str {
        first_non_empty(self.object_name.as_deref(), None, UNNAMED_OBJECT)
    }

    pub fn target(&self) -> &str {
        first_non_empty(self.destination.as_deref(), None, DEFAULT_READ_TARGET)
    }
}

impl WriteObject {
    pub fn label(&self) -> &str {
        first_non_empty(self.object_name.as_deref(), None, UNNAMED_OBJECT)
    }

    pub fn origin(&self) -> &str {
        first_non_empty(self.source.as_deref(), None, DEFAULT_WRITE_ORIGIN)
    }
}

impl Field {
    pub fn label(&self) -> &str {
        first_non_empty(self.field_name.as_deref(), None, UNNAMED_FIELD)
    }
}

/// 首字母大写，用于流程图节点标题
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty(Some("a"), Some("b"), "c"), "a");
        assert_eq!(first_non_empty(None, Some("b"), "c"), "b");
        assert_eq!(first_non_empty(Some(""), Some("b"), "c"), "b");
        assert_eq!(first_non_empty(Some(""), Some(""), "c"), "c");
        assert_eq!(first_non_empty(None, None, "c"), "c");
    }

    #[test]
    fn test_integration_label_fallbacks() {
        let mut integration = Integration {
            name: Some("salesforce".to_string()),
            display_name: Some("My Salesforce".to_string()),
            ..Default::default()
        };
        assert_eq!(integration.label(), "My Salesforce");

        integration.display_name = None;
        assert_eq!(integration.label(), "salesforce");

        integration.name = None;
        assert_eq!(integration.label(), UNNAMED_INTEGRATION);
    }

    #[test]
    fn test_provider_fallback() {
        let integration = Integration::default();
        assert_eq!(integration.provider_or(NO_PROVIDER), "N/A");
        assert_eq!(integration.provider_or(UNKNOWN_PROVIDER), "Unknown");
    }

    #[test]
    fn test_object_and_field_labels() {
        assert_eq!(ReadObject::default().label(), UNNAMED_OBJECT);
        assert_eq!(ReadObject::default().target(), "webhook");
        assert_eq!(WriteObject::default().origin(), "API");
        assert_eq!(Field::default().label(), UNNAMED_FIELD);

        let write = WriteObject {
            object_name: Some("lead".to_string()),
            source: Some("leadAPI".to_string()),
            fields: vec![],
        };
        assert_eq!(write.label(), "lead");
        assert_eq!(write.origin(), "leadAPI");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("salesforce"), "Salesforce");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
    }
}
