//! Semi Trucker rendering: balance header, fleet rows and activity log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::{AUTO_BASE, AUTO_KEYS, BUY_BASE, BUY_KEYS, RUN_BASE, RUN_KEYS};
use super::catalog::{Catalog, Job};
use super::logic::{can_afford, format_money, income_rate, job_progress};
use super::state::{Business, JobStats, TruckingState};

const BAR_WIDTH: usize = 12;
const NAME_WIDTH: usize = 12;

pub fn render(
    state: &TruckingState,
    catalog: &Catalog,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    // Column header, two lines per business, borders.
    let fleet_height = (Business::ALL.len() * 2) as u16 + 3;

    let (main_area, log_area) = if is_narrow_layout(area.width) {
        (area, None)
    } else {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(area);
        (h[0], Some(h[1]))
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(fleet_height),
            Constraint::Min(3),
        ])
        .split(main_area);

    render_header(state, catalog, f, chunks[0]);
    render_fleet(state, catalog, f, chunks[1], click_state);
    render_log(state, f, log_area.unwrap_or(chunks[2]));
}

fn render_header(state: &TruckingState, catalog: &Catalog, f: &mut Frame, area: Rect) {
    let balance_style = if state.payout_flash > 0 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    let rate = income_rate(&state.data, catalog);

    let lines = vec![
        Line::from(vec![
            Span::styled("Balance ", Style::default().fg(Color::Gray)),
            Span::styled(format!("${}", format_money(state.data.money)), balance_style),
        ]),
        Line::from(Span::styled(
            format!("Drivers earn ${}/s", format_money(rate as u64)),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Semi Trucker "),
    );
    f.render_widget(widget, area);
}

fn render_fleet(
    state: &TruckingState,
    catalog: &Catalog,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let idle = JobStats::default();
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!("    {:<width$} pay x owned", "route", width = NAME_WIDTH),
        Style::default().fg(Color::DarkGray),
    )));

    for (i, job) in catalog.iter().enumerate() {
        let id = job.id;
        let stats = state.data.jobs.get(&id).unwrap_or(&idle);
        let owned = stats.amount > 0;

        cl.push_clickable(status_line(job, stats, RUN_KEYS[i]), RUN_BASE + i as u16);

        let buy_cost = job.cost(stats.amount);
        let pressed = state.last_click == Some(id);
        cl.push_segmented(vec![
            (Span::raw("    "), None),
            (
                Span::styled(
                    format!("[{}] Buy ${}", BUY_KEYS[i].to_ascii_uppercase(), format_money(buy_cost)),
                    button_style(can_afford(&state.data, buy_cost), pressed),
                ),
                Some(BUY_BASE + i as u16),
            ),
            (Span::raw("   "), None),
            auto_segment(job, stats, owned && can_afford(&state.data, job.auto_cost), i),
        ]);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Fleet (tap a route to drive it) ");

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 1);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

/// `[1] Hot Dogs     $50.00 x 3   ██████░░░░░░`
fn status_line(job: &Job, stats: &JobStats, key: char) -> Line<'static> {
    let owned = stats.amount > 0;
    let name_style = if owned {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let status = if stats.is_running() {
        let bar = progress_bar(job_progress(stats, job), BAR_WIDTH);
        let color = if stats.managed { Color::Cyan } else { Color::Green };
        Span::styled(bar, Style::default().fg(color))
    } else if owned {
        Span::styled("parked", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw("")
    };

    Line::from(vec![
        Span::styled(
            format!("[{}] ", key),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<width$}", job.name, width = NAME_WIDTH), name_style),
        Span::styled(
            format!(" ${} x {}  ", format_money(job.profit), stats.amount),
            Style::default().fg(Color::Gray),
        ),
        status,
    ])
}

fn auto_segment(
    job: &Job,
    stats: &JobStats,
    affordable: bool,
    i: usize,
) -> (Span<'static>, Option<u16>) {
    if stats.managed {
        return (
            Span::styled("AUTO", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            None,
        );
    }
    (
        Span::styled(
            format!("[{}] Auto ${}", AUTO_KEYS[i].to_ascii_uppercase(), format_money(job.auto_cost)),
            button_style(affordable, false),
        ),
        Some(AUTO_BASE + i as u16),
    )
}

fn button_style(affordable: bool, pressed: bool) -> Style {
    match (affordable, pressed) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Green),
    }
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_log(state: &TruckingState, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);

    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Dispatch "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
