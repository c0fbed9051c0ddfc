//! Ratatui panels for the playground shell. Each panel borrows the
//! controller and renders read-only state.

use crate::command::PanelId;
use crate::controller::PlaygroundController;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;
use showroom_catalog::ControlKind;

/// Filterable catalog list with the selection marker.
pub struct CatalogPanel<'a> {
    pub controller: &'a PlaygroundController,
}

impl WidgetRef for CatalogPanel<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let c = self.controller;
        let cursor = if c.search_focused() { "_" } else { "" };
        let mut lines: Vec<Line<'static>> = Vec::with_capacity(c.visible().len() + 1);
        lines.push(Line::raw(format!("search: {}{cursor}", c.filter())));
        if c.visible().is_empty() {
            lines.push(Line::raw("  no results"));
        }
        for (i, entry) in c.visible().iter().enumerate() {
            let marker = if i == c.selected_index() { ">" } else { " " };
            let line = format!("{marker} {}/{}", entry.category, entry.name);
            if i == c.selected_index() {
                lines.push(Line::styled(
                    line,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                lines.push(Line::raw(line));
            }
        }
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Catalog"))
            .render(area, buf);
    }
}

/// Property editor view: one row per property of the current
/// descriptor, showing control kind and live value.
pub struct PropertyPanel<'a> {
    pub controller: &'a PlaygroundController,
}

impl WidgetRef for PropertyPanel<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let c = self.controller;
        let mut lines: Vec<Line<'static>> = Vec::new();
        match c.descriptor() {
            None => lines.push(Line::raw("select a component")),
            Some(descriptor) => {
                if descriptor.error {
                    lines.push(Line::styled(
                        descriptor.description.clone(),
                        Style::default().add_modifier(Modifier::REVERSED),
                    ));
                }
                for (name, spec) in &descriptor.property_schema {
                    let value = c
                        .props()
                        .get(name)
                        .cloned()
                        .unwrap_or(serde_json::Value::Null);
                    lines.push(Line::raw(format!(
                        "{name} [{}] = {value}",
                        control_label(spec.control)
                    )));
                }
            }
        }
        let title = c
            .descriptor()
            .map(|d| d.title.clone())
            .unwrap_or_else(|| "Properties".to_string());
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .render(area, buf);
    }
}

fn control_label(control: ControlKind) -> &'static str {
    match control {
        ControlKind::Text => "text",
        ControlKind::Boolean => "bool",
        ControlKind::Number => "number",
        ControlKind::Range => "range",
        ControlKind::Select => "select",
        ControlKind::Color => "color",
    }
}

/// Generated usage snippet for the current selection.
pub struct CodePanel<'a> {
    pub controller: &'a PlaygroundController,
}

impl WidgetRef for CodePanel<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let snippet = self
            .controller
            .generated_code()
            .unwrap_or_else(|| "// nothing selected".to_string());
        Paragraph::new(snippet)
            .block(Block::default().borders(Borders::ALL).title("Code"))
            .render(area, buf);
    }
}

/// One-line status bar: notice if one is live, selection otherwise.
pub struct StatusBar<'a> {
    pub controller: &'a PlaygroundController,
}

impl WidgetRef for StatusBar<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let c = self.controller;
        let line = match c.notice() {
            Some(notice) if notice.failure => Line::from(Span::styled(
                format!("✗ {}", notice.text),
                Style::default().add_modifier(Modifier::REVERSED),
            )),
            Some(notice) => Line::raw(format!("✓ {}", notice.text)),
            None => match c.selected_key() {
                Some(key) => Line::raw(format!("{key}  (F1 help)")),
                None => Line::raw("F1 help".to_string()),
            },
        };
        Paragraph::new(line).render(area, buf);
    }
}

/// Chord reference shown over everything while toggled on.
pub struct HelpOverlay;

impl WidgetRef for HelpOverlay {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let lines = [
            "/            focus search",
            "Esc          blur search / clear filter",
            "Ctrl+1..9    jump to Nth visible entry",
            "Ctrl+arrows  previous / next entry (wraps)",
            "Ctrl+Tab     back to previous component",
            "Ctrl+P       toggle properties panel",
            "Ctrl+G       toggle code panel",
            "Ctrl+Shift+C copy generated code",
            "Ctrl+E       export session",
            "Ctrl+I       import session",
            "Ctrl+Q       quit",
        ];
        Clear.render(area, buf);
        Paragraph::new(lines.iter().map(|l| Line::raw(*l)).collect::<Vec<_>>())
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .render(area, buf);
    }
}

/// Full-frame layout: catalog on the left, properties and code stacked
/// on the right, status bar along the bottom.
pub fn draw(controller: &PlaygroundController, area: Rect, buf: &mut Buffer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    CatalogPanel { controller }.render_ref(columns[0], buf);

    let show_props = controller.panel_visible(PanelId::Properties);
    let show_code = controller.panel_visible(PanelId::Code);
    match (show_props, show_code) {
        (true, true) => {
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(columns[1]);
            PropertyPanel { controller }.render_ref(right[0], buf);
            CodePanel { controller }.render_ref(right[1], buf);
        }
        (true, false) => PropertyPanel { controller }.render_ref(columns[1], buf),
        (false, true) => CodePanel { controller }.render_ref(columns[1], buf),
        (false, false) => {}
    }

    StatusBar { controller }.render_ref(rows[1], buf);

    if controller.help_visible() {
        let inset = Rect {
            x: area.x + area.width / 8,
            y: area.y + 1,
            width: area.width * 3 / 4,
            height: area.height.saturating_sub(2).min(13),
        };
        HelpOverlay.render_ref(inset, buf);
    }
}

/// Map a terminal cell to the catalog entry rendered on it, if any.
/// Mirrors the column split in [`draw`]: one border row, then the
/// search line, then the entries.
pub fn catalog_row_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);
    let catalog = columns[0];
    if column < catalog.x + 1 || column + 1 >= catalog.x + catalog.width {
        return None;
    }
    let first_entry = catalog.y + 2;
    if row < first_entry || row + 1 >= catalog.y + catalog.height {
        return None;
    }
    Some((row - first_entry) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FakeClipboard;
    use crate::surface::RecordingSurface;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use showroom_catalog::ComponentKey;
    use showroom_catalog::DeclaredProperty;
    use showroom_catalog::DeclaredType;
    use showroom_catalog::Loader;
    use showroom_catalog::StaticResolver;
    use showroom_catalog::Unit;
    use showroom_memory::MemKvStore;
    use showroom_memory::MemoryStore;
    use showroom_perf::OptimizedLoader;
    use showroom_search::SearchConfig;
    use showroom_search::SearchIndex;
    use std::sync::Arc;
    use std::sync::Mutex;

    fn controller() -> PlaygroundController {
        let mut resolver = StaticResolver::new();
        resolver.register(
            ComponentKey::new("atoms", "button"),
            Unit::new(
                "atoms/button",
                vec![DeclaredProperty::new(
                    "label",
                    DeclaredType::Text,
                    json!("hi"),
                )],
            ),
        );
        let keys = resolver.keys();
        PlaygroundController::new(
            SearchIndex::build(&keys, &SearchConfig::default()),
            OptimizedLoader::new(Arc::new(Loader::new(Arc::new(resolver)))),
            MemoryStore::open(Box::new(MemKvStore::new())),
            Box::new(Arc::new(Mutex::new(RecordingSurface::new()))),
            Box::new(FakeClipboard::default()),
        )
    }

    fn rendered(c: &PlaygroundController) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(c, area, frame.buffer_mut());
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn catalog_panel_marks_the_selection() {
        let mut c = controller();
        c.select_key(&ComponentKey::new("atoms", "button"));
        let screen = rendered(&c);
        assert!(screen.contains("> atoms/button"));
        assert!(screen.contains("Catalog"));
    }

    #[test]
    fn property_panel_shows_live_values() {
        let mut c = controller();
        c.select_key(&ComponentKey::new("atoms", "button"));
        c.set_property("label", json!("Save"));
        let screen = rendered(&c);
        assert!(screen.contains("label [text] = \"Save\""));
    }

    #[test]
    fn no_results_state_renders_as_text_not_error() {
        let mut c = controller();
        c.set_filter("zzzz");
        let screen = rendered(&c);
        assert!(screen.contains("no results"));
    }

    #[test]
    fn hover_position_maps_to_the_rendered_entry() {
        let area = Rect::new(0, 0, 80, 20);
        // Row 1 is the search line inside the border; the first entry
        // is painted on row 2.
        assert_eq!(catalog_row_at(area, 4, 2), Some(0));
        assert_eq!(catalog_row_at(area, 4, 5), Some(3));
        assert_eq!(catalog_row_at(area, 4, 1), None);
        assert_eq!(catalog_row_at(area, 0, 2), None);
        // 40% of 80 columns: the right panels start at x = 32.
        assert_eq!(catalog_row_at(area, 40, 2), None);
    }

    #[test]
    fn help_overlay_lists_chords_when_toggled() {
        let mut c = controller();
        assert!(!rendered(&c).contains("focus search"));
        c.handle(crate::command::Command::ToggleHelp);
        assert!(rendered(&c).contains("focus search"));
    }
}
