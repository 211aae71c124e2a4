use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::Mode;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Deck, PagerBar, StatusBar};

/// Screen regions: status line, main view, bottom bar.
pub fn regions(area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1)]).areas(area)
}

/// Area available to page text (main view minus its border).
pub fn page_text_area(area: Rect) -> Rect {
    let [_, main, _] = regions(area);
    Block::bordered().inner(main)
}

pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState) {
    let [status_area, main_area, bar_area] = regions(frame.area());
    let nav_state = tui.navigator.state();

    let position = match tui.mode {
        Mode::Deck => format!(
            "section {}/{}",
            nav_state.current_index + 1,
            nav_state.section_count
        ),
        Mode::Pages => format!("page {}/{}", tui.pager.current_page(), tui.pager.total_page()),
    };
    StatusBar {
        document_name: tui.document_name.clone(),
        mode: tui.mode,
        position,
        busy: nav_state.transition_in_flight,
    }
    .render(frame, status_area);

    match tui.mode {
        Mode::Deck => {
            let offset = tui.navigator.surface().offset();
            Deck::new(&tui.document.sections, offset).render(frame, main_area);
            draw_section_dots(frame, bar_area, nav_state.current_index, nav_state.section_count);
        }
        Mode::Pages => {
            draw_page(frame, main_area, tui);
            PagerBar::new(tui.pager.host_mut()).render(frame, bar_area);
        }
    }
}

fn draw_page(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let index = tui.pager.current_page().saturating_sub(1) as usize;
    let text = tui
        .pages
        .get(index)
        .map(|lines| lines.join("\n"))
        .unwrap_or_default();
    let block = Block::bordered()
        .title(format!(" Page {} ", tui.pager.current_page()))
        .border_style(Style::default().fg(Color::DarkGray));
    // Lines are pre-wrapped to the text area, so no Wrap here
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_section_dots(frame: &mut Frame, area: Rect, current: usize, count: usize) {
    let spans: Vec<Span> = (0..count)
        .map(|i| {
            if i == current {
                Span::styled("● ", Style::default().fg(Color::White))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
}
