mod theme;

use crate::app::{AppModel, LineEditor};
use crate::domain::{Tab, page_window};
use ratatui::prelude::*;
use ratatui::widgets::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TAB_BAR_HEIGHT: u16 = 3;
const PREFIX_LABEL: &str = "Command Prefix: ";
/// Prefix line, blank, header, blank.
const LIST_HEADER_ROWS: u16 = 4;

pub fn render(frame: &mut Frame, model: &AppModel) {
    let full_area = frame.area();
    if full_area.width == 0 || full_area.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(full_area);

    render_tab_bar(frame, chunks[0], model.nav.tab);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    match model.nav.tab {
        Tab::Games => render_games(frame, inner, model),
        Tab::Record | Tab::Config | Tab::Help => {
            let hint = format!("Press ENTER to open file in {}.", model.data.editor);
            render_hint(frame, inner, &hint);
        }
        Tab::Exit => render_hint(frame, inner, "Press ENTER to quit."),
    }

    frame.render_widget(footer_paragraph(model.notice.as_deref()), chunks[2]);
}

fn render_tab_bar(frame: &mut Frame, area: Rect, active: Tab) {
    let mut x = area.x;
    let right_edge = area.x.saturating_add(area.width);

    for tab in Tab::ALL {
        let label = tab.label();
        let width = (UnicodeWidthStr::width(label) as u16).saturating_add(2);
        if x.saturating_add(width) > right_edge {
            break;
        }

        let (text_style, border_style) = if tab == active {
            (
                Style::default()
                    .fg(theme::ACCENT)
                    .bg(theme::ACCENT_BG)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(theme::ACCENT).bg(theme::ACCENT_BG),
            )
        } else {
            (
                Style::default().fg(theme::MUTED),
                Style::default().fg(theme::BORDER),
            )
        };

        let tab_area = Rect {
            x,
            y: area.y,
            width,
            height: area.height,
        };
        let paragraph = Paragraph::new(Span::styled(label, text_style))
            .style(text_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        frame.render_widget(paragraph, tab_area);
        x = x.saturating_add(width).saturating_add(1);
    }
}

fn render_hint(frame: &mut Frame, area: Rect, hint: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(theme::FG),
    )))
    .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(paragraph, area);
}

fn render_games(frame: &mut Frame, area: Rect, model: &AppModel) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let area = area.inner(Margin {
        vertical: 0,
        horizontal: 1,
    });
    let max_width = area.width as usize;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(prefix_line(&model.prefix, model.prefix_editor.as_ref(), max_width));
    lines.push(Line::from(""));

    let catalog = &model.data.catalog;
    if catalog.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_end(
                &format!(
                    "No games found. Add directories to {} and restart.",
                    model.data.paths.config.display()
                ),
                max_width,
            ),
            Style::default().fg(theme::DIM),
        )));
    } else {
        let column_width = catalog.playtime_column_width();
        let header = format!("{} Title", pad_left("Playtime", column_width));
        lines.push(Line::from(Span::styled(
            truncate_end(&header, max_width),
            Style::default().fg(theme::MUTED).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        let page_size = area.height.saturating_sub(LIST_HEADER_ROWS) as usize;
        let title_width = max_width.saturating_sub(column_width + 1);
        let window = page_window(model.nav.row, page_size, catalog.len());
        let first = window.start;
        let page = catalog.entries().get(window).unwrap_or_default();
        for (offset, entry) in page.iter().enumerate() {
            let index = first + offset;
            let text = format!(
                "{} {}",
                pad_left(&entry.playtime_clock(), column_width),
                truncate_end(&entry.title, title_width)
            );
            let style = if index == model.nav.row {
                Style::default()
                    .fg(theme::SELECTED_FG)
                    .bg(theme::SELECTED_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::FG)
            };
            lines.push(Line::from(Span::styled(text, style)));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);

    if let Some(editor) = &model.prefix_editor {
        let offset = UnicodeWidthStr::width(PREFIX_LABEL) + editor.cursor_offset();
        let x = area
            .x
            .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
            .min(area.x.saturating_add(area.width.saturating_sub(1)));
        frame.set_cursor_position((x, area.y));
    }
}

fn prefix_line(prefix: &str, editor: Option<&LineEditor>, max_width: usize) -> Line<'static> {
    let label = Span::styled(PREFIX_LABEL, Style::default().fg(theme::MUTED));
    let value_width = max_width.saturating_sub(UnicodeWidthStr::width(PREFIX_LABEL));
    let value = match editor {
        Some(editor) => Span::styled(
            truncate_end(editor.text(), value_width),
            Style::default()
                .fg(theme::ACCENT)
                .bg(theme::ACCENT_BG)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            truncate_end(prefix, value_width),
            Style::default().fg(theme::FG),
        ),
    };
    Line::from(vec![label, value])
}

fn footer_paragraph(notice: Option<&str>) -> Paragraph<'static> {
    let mut text = String::from(
        "Keys: h/l=tab  j/k=move  Ctrl+D/U=page  Enter=select  e=prefix  Ctrl+C=quit",
    );
    if let Some(message) = notice.filter(|message| !message.trim().is_empty()) {
        text.push_str("  ·  ");
        text.push_str(message);
    }
    Paragraph::new(Line::from(text)).style(Style::default().fg(theme::DIM))
}

fn pad_left(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - current), text)
}

fn truncate_end(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let ellipsis = "…";
    let available = max_width.saturating_sub(UnicodeWidthStr::width(ellipsis));
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > available {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push_str(ellipsis);
    out
}
