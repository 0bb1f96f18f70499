pub mod display;
pub mod flow;
pub mod mapping;
pub mod parser;
pub mod stats;
pub mod summary;

use crate::models::{ConfigDocument, DerivedStats, Integration};

use self::flow::FlowDiagram;
use self::mapping::FieldMapping;
use self::summary::ParseSummary;

/// 启动时默认载入的示例配置
pub const SAMPLE_CONFIG: &str = r#"specVersion: 1.0.0
integrations:
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
            - fieldName: lastName
            - fieldName: email
          optionalFields:
            - fieldName: phone
            - fieldName: company
    write:
      objects:
        - objectName: lead
          source: leadAPI
          fields:
            - fieldName: firstName
            - fieldName: lastName
            - fieldName: email
            - fieldName: company"#;

/// 可视化会话：文本缓冲 + 当前文档 + 选中集成 + 字段映射开关。
/// 文本每次变化都同步重新解析，文档整体替换。
pub struct Visualizer {
    text: String,
    document: Option<ConfigDocument>,
    selected: usize,
    show_field_mapping: bool,
}

impl Visualizer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let document = parser::parse(&text);
        Self {
            text,
            document,
            selected: 0,
            show_field_mapping: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn document(&self) -> Option<&ConfigDocument> {
        self.document.as_ref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn show_field_mapping(&self) -> bool {
        self.show_field_mapping
    }

    /// 替换文本并重新解析；解析失败时清空文档而不是保留旧结果
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.document = parser::parse(&self.text);
        self.clamp_selection();
    }

    /// 文档缺失时为空切片
    pub fn integrations(&self) -> &[Integration] {
        self.document
            .as_ref()
            .map(|d| d.integrations.as_slice())
            .unwrap_or(&[])
    }

    /// 越界索引收敛到 [0, len-1]；没有集成时不做任何事
    pub fn select(&mut self, index: usize) {
        let len = self.integrations().len();
        if len == 0 {
            return;
        }
        self.selected = index.min(len - 1);
    }

    pub fn select_next(&mut self) {
        let len = self.integrations().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.integrations().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn toggle_field_mapping(&mut self) {
        self.show_field_mapping = !self.show_field_mapping;
    }

    pub fn selected_integration(&self) -> Option<&Integration> {
        self.integrations().get(self.selected)
    }

    pub fn stats(&self) -> DerivedStats {
        stats::derive_stats(self.selected_integration())
    }

    pub fn summary(&self) -> ParseSummary {
        ParseSummary::from_document(self.document())
    }

    pub fn flow(&self) -> Option<FlowDiagram> {
        self.selected_integration().map(FlowDiagram::for_integration)
    }

    /// 仅在开关打开时返回
    pub fn field_mapping(&self) -> Option<FieldMapping> {
        if !self.show_field_mapping {
            return None;
        }
        self.selected_integration().map(FieldMapping::for_integration)
    }

    fn clamp_selection(&mut self) {
        let len = self.integrations().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
