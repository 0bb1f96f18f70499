use serde::Serialize;

/// 解析后的完整配置文档，每次解析成功后整体替换
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    pub spec_version: Option<String>,
    /// 按文档顺序排列
    pub integrations: Vec<Integration>,
}

/// 集成：source 系统 → 映射层 → 目标应用
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub provider: Option<String>,
    pub read: Option<ReadSection>,
    pub write: Option<WriteSection>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ReadSection {
    pub objects: Vec<ReadObject>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct WriteSection {
    pub objects: Vec<WriteObject>,
}

/// 读对象：按计划从 source 拉取，投递到 destination
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadObject {
    pub object_name: Option<String>,
    pub destination: Option<String>,
    /// 原样展示，不做 cron 校验
    pub schedule: Option<String>,
    pub required_fields: Vec<Field>,
    pub optional_fields: Vec<Field>,
}

/// 写对象：从 source API 推送到目标应用
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WriteObject {
    pub object_name: Option<String>,
    pub source: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub field_name: Option<String>,
}

/// 单个集成的统计数据，按需重新计算
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub read_objects: usize,
    pub write_objects: usize,
    pub total_fields: usize,
}

impl Integration {
    pub fn read_objects(&self) -> &[ReadObject] {
        self.read.as_ref().map(|r| r.objects.as_slice()).unwrap_or(&[])
    }

    pub fn write_objects(&self) -> &[WriteObject] {
        self.write.as_ref().map(|w| w.objects.as_slice()).unwrap_or(&[])
    }
}
