// TUI module - terminal shell around the storefront
//
// This module owns everything the host page would in a browser:
// - Terminal initialization and cleanup (raw mode, alternate screen)
// - The event loop (keyboard input, timer ticks)
// - Compositing page regions onto the screen each frame
//
// The views never see the terminal. They write into page regions; the draw
// pass here looks up each anchor's rectangle and paints the content with
// the theme's chrome.

pub mod app;
pub mod layout;
pub mod page;
pub mod theme;
pub mod view;
pub mod views;

use anyhow::{Context, Result};
use app::{Focus, Storefront};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// the way out, even when the loop errors.
pub async fn run(mut app: Storefront) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    // Session summary. An assembled order is held, never dispatched, so
    // exit is the only place it becomes visible.
    if let Some(order) = app.orders.candidate() {
        tracing::info!(
            items = order.items.len(),
            total = %order.total,
            "exiting with an assembled order on hold"
        );
    } else if app.orders.details().is_some() {
        tracing::info!("exiting mid-checkout");
    }
    let basket = app.catalog.basket();
    if !basket.is_empty() {
        tracing::debug!(lines = basket.len(), "basket left behind");
    }

    result
}

/// Main event loop: draw, then wait on keyboard input or the redraw tick.
/// All state mutation happens synchronously inside `handle_key_event`.
async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut Storefront,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        app.handle_key_event(key_event);
                    }
                }
            } => {}

            // Periodic tick so resizes and external changes repaint
            _ = tick_interval.tick() => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Composite the page onto the terminal: chrome, gallery grid, sidebar
/// panels, and the modal overlay on top.
fn draw(f: &mut Frame, app: &Storefront) {
    let theme = app.theme.clone();

    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, f.area());

    let screen = layout::screen(f.area(), app.card_count());

    // Header band: shop name and the live basket count.
    let header = Line::from(vec![
        Span::styled(
            " stall ",
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" terminal storefront", Style::default().fg(theme.muted)),
        Span::styled(
            format!("   basket: {}", app.item_count()),
            Style::default().fg(theme.foreground),
        ),
    ]);
    f.render_widget(Paragraph::new(header), screen.header);

    // Gallery grid. Slots the layout dropped are simply not drawn.
    for (index, slot) in screen.cards.iter().enumerate() {
        let focused = app.focus == Focus::Card(index) && !app.is_modal_open();
        draw_panel(f, *slot, "", focused, app.card_content(index), &theme);
    }

    draw_panel(
        f,
        screen.basket,
        " Basket ",
        app.focus == Focus::Basket && !app.is_modal_open(),
        app.content("basket"),
        &theme,
    );
    draw_panel(
        f,
        screen.order,
        " Checkout ",
        app.focus == Focus::OrderForm && !app.is_modal_open(),
        app.content("order"),
        &theme,
    );

    // Status bar: key hints for whatever currently has focus.
    f.render_widget(
        Paragraph::new(app.status_line()).style(Style::default().fg(theme.muted)),
        screen.status,
    );

    // Modal overlay, cleared so it sits on top of everything.
    if app.is_modal_open() {
        let content = app.content("modal");
        let height = content.lines.len() as u16 + 2;
        let rect = layout::modal_rect(f.area(), 52, height);
        f.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.background));
        f.render_widget(
            Paragraph::new(content)
                .style(Style::default().fg(theme.foreground))
                .block(block),
            rect,
        );
    }
}

fn draw_panel(
    f: &mut Frame,
    rect: Rect,
    title: &str,
    focused: bool,
    content: ratatui::text::Text<'static>,
    theme: &theme::Theme,
) {
    let border = if focused { theme.accent } else { theme.border };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(border));
    if !title.is_empty() {
        block = block.title(title);
    }
    f.render_widget(
        Paragraph::new(content)
            .style(Style::default().fg(theme.foreground))
            .block(block),
        rect,
    );
}
