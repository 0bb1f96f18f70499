use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Terminal;

use super::editor::Editor;
use crate::core::flow::FlowDiagram;
use crate::core::mapping::{FieldMapping, MappingTable};
use crate::core::summary::ParseSummary;
use crate::core::Visualizer;
use crate::storage::BufferFile;

/// 焦点区域：编辑器 or 可视化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Visualization,
}

/// TUI 应用状态
pub struct App {
    viz: Visualizer,
    editor: Editor,
    export: BufferFile,
    focus: Focus,
    status_message: String,
    running: bool,
}

impl App {
    /// 以初始文本创建 App，导出目标由调用方指定
    pub fn new(text: &str, export: BufferFile) -> Self {
        Self {
            viz: Visualizer::new(text),
            editor: Editor::new(text),
            export,
            focus: Focus::Editor,
            status_message: "Ready".to_string(),
            running: true,
        }
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.viz
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 启动 TUI 事件循环
    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    /// 处理键盘输入
    fn handle_key(&mut self, code: KeyCode) {
        if code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Editor => Focus::Visualization,
                Focus::Visualization => Focus::Editor,
            };
            return;
        }

        match self.focus {
            Focus::Editor => self.handle_editor_key(code),
            Focus::Visualization => self.handle_visualization_key(code),
        }
    }

    /// 编辑器按键：每次修改文本都立即重新解析
    fn handle_editor_key(&mut self, code: KeyCode) {
        let edited = match code {
            KeyCode::Esc => {
                self.focus = Focus::Visualization;
                false
            }
            KeyCode::Char(c) => {
                self.editor.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.editor.insert_newline();
                true
            }
            KeyCode::Backspace => {
                self.editor.backspace();
                true
            }
            KeyCode::Delete => {
                self.editor.delete();
                true
            }
            KeyCode::Left => {
                self.editor.move_left();
                false
            }
            KeyCode::Right => {
                self.editor.move_right();
                false
            }
            KeyCode::Up => {
                self.editor.move_up();
                false
            }
            KeyCode::Down => {
                self.editor.move_down();
                false
            }
            KeyCode::Home => {
                self.editor.home();
                false
            }
            KeyCode::End => {
                self.editor.end();
                false
            }
            _ => false,
        };

        if edited {
            self.viz.set_text(self.editor.text());
        }
    }

    fn handle_visualization_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Left => self.viz.select_previous(),
            KeyCode::Right => self.viz.select_next(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.viz.select(index);
            }
            KeyCode::Char('f') => {
                self.viz.toggle_field_mapping();
                let state = if self.viz.show_field_mapping() { "shown" } else { "hidden" };
                self.set_status(format!("Field mapping {}", state));
            }
            KeyCode::Char('w') => self.export_buffer(),
            _ => {}
        }
    }

    /// 原样导出当前文本缓冲
    fn export_buffer(&mut self) {
        match self.export.write(self.viz.text()) {
            Ok(()) => {
                let msg = format!("Exported to {}", self.export.path().display());
                self.set_status(msg);
            }
            Err(e) => {
                tracing::warn!("导出失败: {}", e);
                self.set_status(format!("Error: {}", e));
            }
        }
    }

    /// 渲染整个界面
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_title(frame, outer[0]);
        self.render_body(frame, outer[1]);
        self.render_status(frame, outer[2]);
    }

    fn render_title(&self, frame: &mut ratatui::Frame, area: Rect) {
        let title = Paragraph::new("Integration Visualizer")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn render_body(&self, frame: &mut ratatui::Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Min(1)])
            .split(area);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        self.render_editor(frame, cols[0]);
        self.render_parse_status(frame, cols[1]);
        self.render_visualization(frame, rows[1]);
    }

    fn border_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn render_editor(&self, frame: &mut ratatui::Frame, area: Rect) {
        let (row, col) = self.editor.cursor();
        // 保证光标所在行、列可见
        let scroll = scroll_offset(row, area.height.saturating_sub(2) as usize);
        let hscroll = scroll_offset(col, area.width.saturating_sub(2) as usize);

        let lines: Vec<Line> = self
            .editor
            .lines()
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();
        let editor = Paragraph::new(lines)
            .scroll((clamp_u16(scroll), clamp_u16(hscroll)))
            .block(
                Block::default()
                    .title(" YAML Configuration ")
                    .borders(Borders::ALL)
                    .border_style(self.border_style(Focus::Editor)),
            );
        frame.render_widget(editor, area);

        if self.focus == Focus::Editor {
            let x = area.x.saturating_add(1).saturating_add(clamp_u16(col - hscroll));
            let y = area.y.saturating_add(1).saturating_add(clamp_u16(row - scroll));
            if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
                frame.set_cursor_position((x, y));
            }
        }
    }

    fn render_parse_status(&self, frame: &mut ratatui::Frame, area: Rect) {
        let lines = parse_status_lines(&self.viz.summary());
        let status = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().title(" Parse Status ").borders(Borders::ALL));
        frame.render_widget(status, area);
    }

    fn render_visualization(&self, frame: &mut ratatui::Frame, area: Rect) {
        let mapping_hint = if self.viz.show_field_mapping() { "Hide" } else { "Show" };
        let block = Block::default()
            .title(format!(" Integration Visualization (f: {} Field Mapping) ", mapping_hint))
            .borders(Borders::ALL)
            .border_style(self.border_style(Focus::Visualization));

        // 文档缺失或没有集成时不渲染
        let integrations = self.viz.integrations();
        if integrations.is_empty() {
            let hint = Paragraph::new("No integrations to visualize.").block(block);
            frame.render_widget(hint, area);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tabs_height = if integrations.len() > 1 { 1 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(tabs_height),
                Constraint::Length(4),
                Constraint::Min(1),
            ])
            .split(inner);

        if integrations.len() > 1 {
            let titles: Vec<String> = integrations.iter().map(|i| i.label().to_string()).collect();
            let tabs = Tabs::new(titles)
                .select(self.viz.selected())
                .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            frame.render_widget(tabs, rows[0]);
        }

        self.render_stats(frame, rows[1]);

        match self.viz.field_mapping() {
            Some(mapping) => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(rows[2]);
                self.render_flow(frame, cols[0]);
                render_field_mapping(frame, cols[1], &mapping);
            }
            None => self.render_flow(frame, rows[2]),
        }
    }

    fn render_stats(&self, frame: &mut ratatui::Frame, area: Rect) {
        let stats = self.viz.stats();
        let cards = [
            ("Read Objects", stats.read_objects, Color::Blue),
            ("Write Objects", stats.write_objects, Color::Green),
            ("Total Fields", stats.total_fields, Color::Magenta),
        ];
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        for (i, (title, value, color)) in cards.into_iter().enumerate() {
            let card = Paragraph::new(Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .block(
                Block::default()
                    .title(format!(" {} ", title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
            frame.render_widget(card, cols[i]);
        }
    }

    fn render_flow(&self, frame: &mut ratatui::Frame, area: Rect) {
        let diagram = match self.viz.flow() {
            Some(d) => d,
            None => return,
        };
        let block = Block::default()
            .title(format!(" {} ", diagram.title))
            .borders(Borders::ALL);
        let flow = Paragraph::new(flow_lines(&diagram))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(flow, area);
    }

    fn render_status(&self, frame: &mut ratatui::Frame, area: Rect) {
        let status = Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
            Span::styled(&self.status_message, Style::default().fg(Color::Green)),
            Span::raw(" | "),
            Span::styled(
                "Tab:Switch  Esc:Leave editor  ←→/1-9:Integration  f:Field mapping  w:Export  q:Quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let bar = Paragraph::new(status).block(Block::default().borders(Borders::ALL));
        frame.render_widget(bar, area);
    }
}

/// 使 pos 落在长度为 visible 的窗口内所需的最小偏移
fn scroll_offset(pos: usize, visible: usize) -> usize {
    if visible == 0 {
        0
    } else {
        pos.saturating_sub(visible - 1)
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// 解析状态面板内容
fn parse_status_lines(summary: &ParseSummary) -> Vec<Line<'static>> {
    match summary {
        ParseSummary::Invalid => vec![Line::from(Span::styled(
            "✗ Unable to parse configuration. Please check your YAML syntax.",
            Style::default().fg(Color::Red),
        ))],
        ParseSummary::Valid {
            integrations_found,
            cards,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "✓ Configuration parsed successfully",
                    Style::default().fg(Color::Green),
                )),
                Line::from(format!("Integrations found: {}", integrations_found)),
            ];
            for card in cards {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    card.label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(format!("  Provider: {}", card.provider)));
                lines.push(Line::from(format!("  Read: {} objects", card.stats.read_objects)));
                lines.push(Line::from(format!("  Write: {} objects", card.stats.write_objects)));
            }
            lines
        }
    }
}

/// 三节点流程图 + 读写操作明细
fn flow_lines(diagram: &FlowDiagram) -> Vec<Line<'static>> {
    let node_span = |id: &str| {
        let color = match id {
            "source" => Color::Blue,
            "mapping" => Color::Magenta,
            _ => Color::Green,
        };
        let label = diagram
            .nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.label.clone())
            .unwrap_or_default();
        Span::styled(
            format!("[{}]", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };

    let mut chain = vec![node_span(diagram.edges[0].from)];
    for edge in &diagram.edges {
        chain.push(Span::raw(" ──▶ "));
        chain.push(node_span(edge.to));
    }
    let subtitles: Vec<&str> = diagram.nodes.iter().map(|n| n.subtitle).collect();

    let mut lines = vec![
        Line::from(chain),
        Line::from(Span::styled(
            format!(" {}", subtitles.join(" · ")),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    for section in &diagram.operations {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            section.title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for entry in &section.entries {
            let mut header = vec![Span::styled(
                format!("  {}", entry.object_name),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if let Some(schedule) = &entry.schedule {
                header.push(Span::styled(
                    format!("  ⏱ {}", schedule),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(header));
            lines.push(Line::from(format!(
                "    {} {}",
                entry.direction.arrow(),
                entry.endpoint
            )));
            for group in &entry.groups {
                lines.push(Line::from(format!(
                    "    {}: {}",
                    group.label,
                    group.fields.join(", ")
                )));
            }
        }
    }
    lines
}

fn render_field_mapping(frame: &mut ratatui::Frame, area: Rect, mapping: &FieldMapping) {
    let mut lines = mapping_table_lines(&mapping.source, Color::Blue);
    lines.push(Line::from(""));
    lines.extend(mapping_table_lines(&mapping.destination, Color::Green));

    let view = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Field Mapping Details ")
            .borders(Borders::ALL),
    );
    frame.render_widget(view, area);
}

fn mapping_table_lines(table: &MappingTable, dot: Color) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        table.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for obj in &table.objects {
        lines.push(Line::from(format!("  {}", obj.object_name)));
        for field in &obj.fields {
            let mut spans = vec![
                Span::styled("    ● ", Style::default().fg(dot)),
                Span::raw(field.name.clone()),
            ];
            if let Some(req) = field.requirement {
                spans.push(Span::styled(
                    format!(" ({})", req.label()),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}
