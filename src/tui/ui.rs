use crate::list::StoryList;
use crate::storage::KeyValueStore;
use crate::story::Story;
use crate::tui::app::App;
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

const SEARCH_LABEL: &str = "Search: ";
const SUBMIT_LABEL: &str = " [ Submit ] ";

pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Length(3), // Search form
            Constraint::Length(1), // Error banner
            Constraint::Min(3),    // Stories
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_heading(frame, chunks[0]);
    let input_area = draw_search_form(frame, app, chunks[1]);
    draw_error_banner(frame, app, chunks[2]);
    if app.stories.state().is_loading() {
        draw_loading(frame, chunks[3]);
    } else {
        draw_table(frame, app, chunks[3]);
    }
    draw_status_bar(frame, app, chunks[4]);

    if app.input.focused {
        let cursor_x = input_area
            .x
            .saturating_add(SEARCH_LABEL.len() as u16)
            .saturating_add(app.input.cursor_column(app.stories.term()))
            .min(input_area.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(cursor_x, input_area.y));
    }
}

fn draw_heading(frame: &mut Frame, area: Rect) {
    let heading = Paragraph::new(Line::from(Span::styled(
        " My Hacker Stories",
        Style::default()
            .fg(Color::Rgb(255, 102, 0))
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(heading, area);
}

/// Returns the area the term is typed into.
fn draw_search_form<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) -> Rect {
    let border_style = if app.input.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let submit_width = SUBMIT_LABEL.len() as u16;
    let [input_area, submit_area] = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(submit_width),
    ])
    .areas(inner);

    let line = Line::from(vec![
        Span::styled(SEARCH_LABEL, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(app.stories.term(), Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line), input_area);

    // Disabled look while the term is empty
    let submit_style = if app.stories.search().can_submit() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(Paragraph::new(SUBMIT_LABEL).style(submit_style), submit_area);
    input_area
}

fn draw_error_banner<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    if !app.stories.state().is_error() {
        return;
    }
    let banner = Paragraph::new(" Something went wrong ...").style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(banner, area);
}

fn draw_loading(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new(" \u{23F3} Loading ...")
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(loading, area);
}

fn draw_table<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    // Area height minus border minus header
    let table_inner_height = area.height.saturating_sub(2) as usize;
    app.table.visible_rows = table_inner_height;

    let header = Row::new(
        ["Title", "Author", "Comments", "Points", ""]
            .into_iter()
            .map(|name| {
                Cell::from(name).style(
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Rgb(0, 95, 135))
                        .add_modifier(Modifier::BOLD),
                )
            }),
    )
    .height(1);

    // Dismissals go through the key handler; drawing only reads
    let list = StoryList::new(&app.stories.state().data, |_: &Story| {});
    let block = Block::default()
        .borders(Borders::TOP)
        .title(format!(" {} stories ", list.len()));

    if list.is_empty() {
        let empty = Paragraph::new(" No stories")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let start = app.table.scroll_offset;
    let rows: Vec<Row> = list
        .rows()
        .enumerate()
        .skip(start)
        .take(table_inner_height)
        .map(|(index, row)| {
            let is_selected = app.table.selected == Some(index);
            let bg = if is_selected {
                Color::Rgb(60, 60, 80)
            } else if (index - start) % 2 == 1 {
                Color::Rgb(25, 25, 35)
            } else {
                Color::Reset
            };
            let fg_modifier = if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            };

            let title = format!("{} {}", colors::icon_for_story(row.url), row.title);
            Row::new(vec![
                Cell::from(title).style(
                    Style::default()
                        .fg(Color::LightBlue)
                        .bg(bg)
                        .add_modifier(fg_modifier | Modifier::UNDERLINED),
                ),
                Cell::from(row.author.to_string())
                    .style(Style::default().fg(Color::Gray).bg(bg)),
                Cell::from(row.num_comments.to_string()).style(
                    Style::default()
                        .fg(colors::color_for_comments(row.num_comments))
                        .bg(bg),
                ),
                Cell::from(row.points.to_string())
                    .style(Style::default().fg(colors::color_for_points(row.points)).bg(bg)),
                Cell::from(if is_selected { "[Dismiss]" } else { "" })
                    .style(Style::default().fg(Color::Red).bg(bg)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(20),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(block);

    frame.render_widget(table, area);
}

fn draw_status_bar<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let left_text = format!(" {}", app.status_message);
    let right_text = if app.input.focused {
        " Enter:Submit  Tab:List  Esc:Clear  Ctrl+Q:Quit "
    } else {
        " \u{2191}\u{2193}:Move  Enter:Open  D:Dismiss  R:Refresh  /:Search  Esc:Quit "
    };

    let available_width = area.width as usize;
    let left_len = left_text.chars().count();
    let right_len = right_text.chars().count();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(Color::Rgb(0, 95, 135)));

    frame.render_widget(status, area);
}
