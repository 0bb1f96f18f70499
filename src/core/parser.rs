use serde_yaml::Value;

use crate::error::Result;
use crate::models::{
    ConfigDocument, Field, Integration, ReadObject, ReadSection, WriteObject, WriteSection,
};

/// 严格解析：文本不符合 YAML 语法时返回 `VisualizerError::Parse`。
/// 不做 schema 校验，缺失或类型不符的键一律按缺省处理。
pub fn parse_document(text: &str) -> Result<ConfigDocument> {
    if is_blank(text) {
        return Ok(ConfigDocument::default());
    }
    let root: Value = serde_yaml::from_str(text)?;
    Ok(document_from_value(&root))
}

/// 供界面使用的解析入口：失败时记录原因并返回 None，错误不外抛
pub fn parse(text: &str) -> Option<ConfigDocument> {
    match parse_document(text) {
        Ok(doc) => {
            tracing::debug!("解析成功，集成数量: {}", doc.integrations.len());
            Some(doc)
        }
        Err(e) => {
            tracing::warn!("解析 YAML 失败: {}", e);
            None
        }
    }
}

/// 只有空白和注释的文本视为空文档
fn is_blank(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn document_from_value(root: &Value) -> ConfigDocument {
    ConfigDocument {
        spec_version: scalar_string(root, "specVersion"),
        integrations: sequence(root, "integrations")
            .iter()
            .map(integration_from_value)
            .collect(),
    }
}

fn integration_from_value(value: &Value) -> Integration {
    let value = untag(value);
    Integration {
        name: scalar_string(value, "name"),
        display_name: scalar_string(value, "displayName"),
        provider: scalar_string(value, "provider"),
        read: mapping(value, "read").map(|read| ReadSection {
            objects: sequence(read, "objects")
                .iter()
                .map(read_object_from_value)
                .collect(),
        }),
        write: mapping(value, "write").map(|write| WriteSection {
            objects: sequence(write, "objects")
                .iter()
                .map(write_object_from_value)
                .collect(),
        }),
    }
}

fn read_object_from_value(value: &Value) -> ReadObject {
    let value = untag(value);
    ReadObject {
        object_name: scalar_string(value, "objectName"),
        destination: scalar_string(value, "destination"),
        schedule: scalar_string(value, "schedule"),
        required_fields: fields(value, "requiredFields"),
        optional_fields: fields(value, "optionalFields"),
    }
}

fn write_object_from_value(value: &Value) -> WriteObject {
    let value = untag(value);
    WriteObject {
        object_name: scalar_string(value, "objectName"),
        source: scalar_string(value, "source"),
        fields: fields(value, "fields"),
    }
}

fn fields(value: &Value, key: &str) -> Vec<Field> {
    sequence(value, key)
        .iter()
        .map(|field| Field {
            field_name: scalar_string(untag(field), "fieldName"),
        })
        .collect()
}

/// 递归剥离 YAML tag，取内部值
fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// 取 key 对应的序列；缺失或不是序列都视为空
fn sequence<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    match value.get(key).map(untag) {
        Some(Value::Sequence(seq)) => seq.as_slice(),
        _ => &[],
    }
}

/// 取 key 对应的 mapping；不是 mapping 视为缺失
fn mapping<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value.get(key).map(untag) {
        Some(v) if v.is_mapping() => Some(v),
        _ => None,
    }
}

/// 标量转字符串：数字和布尔取文本形式，null / 序列 / mapping 视为缺失
fn scalar_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key).map(untag)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
