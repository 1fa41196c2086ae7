use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Terminal,
};
use std::{
    borrow::Cow,
    io,
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    time::{Duration, Instant},
};

use crate::cli::{Output, Settings};
use crate::conversion::{spawn_read, Completion, Converter, ReadDone, Session, State};
use crate::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    /// Typing a path into the file prompt.
    Select,
}

struct App {
    session: Session,
    output_dir: PathBuf,
    mode: Mode,
    prompt: String,
    notice: Option<Notice>,
    scroll_position: u16,
    viewport_height: u16,
    viewport_width: u16,
    tx: Sender<ReadDone>,
    rx: Receiver<ReadDone>,
}

impl App {
    fn new(converter: Converter, output_dir: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            session: Session::new(converter),
            output_dir,
            mode: Mode::Browse,
            prompt: String::new(),
            notice: None,
            scroll_position: 0,
            viewport_height: 0,
            viewport_width: 0,
            tx,
            rx,
        }
    }

    /// Start converting `path`; the read finishes on a worker thread.
    fn open(&mut self, path: PathBuf) {
        match self.session.select(&path) {
            Ok(ticket) => {
                self.notice = Some(Notice::info("Reading", path.display().to_string()));
                spawn_read(path, ticket, self.tx.clone());
            }
            Err(e) => self.notice = Some(Notice::from(&e)),
        }
    }

    /// Apply any reads that have finished since the last tick.
    fn poll_reads(&mut self) {
        while let Ok(done) = self.rx.try_recv() {
            self.apply(done);
        }
    }

    fn apply(&mut self, done: ReadDone) {
        let notice = match self.session.complete(done.ticket, done.read) {
            Ok(Completion::Converted(result)) => {
                Some(Notice::converted(result.output_name.as_str()))
            }
            Ok(Completion::Stale) => None,
            Err(e) => Some(Notice::from(&e)),
        };
        if let Some(notice) = notice {
            if !notice.is_error() {
                self.scroll_position = 0;
            }
            self.notice = Some(notice);
        }
    }

    fn save(&mut self) {
        self.notice = Some(match self.session.download(&self.output_dir) {
            Ok(path) => Notice::saved(&path),
            Err(e) => Notice::from(&e),
        });
    }

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::Select => match key.code {
                KeyCode::Enter => {
                    let typed = self.prompt.trim().to_string();
                    self.prompt.clear();
                    self.mode = Mode::Browse;
                    if !typed.is_empty() {
                        self.open(PathBuf::from(typed));
                    }
                }
                KeyCode::Esc => {
                    self.prompt.clear();
                    self.mode = Mode::Browse;
                }
                KeyCode::Backspace => {
                    self.prompt.pop();
                }
                KeyCode::Char(c) => self.prompt.push(c),
                _ => {}
            },
            Mode::Browse => match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('o') | KeyCode::Char('/') => self.mode = Mode::Select,
                KeyCode::Char('s') => self.save(),
                KeyCode::Down => self.scroll_down(),
                KeyCode::Up => self.scroll_up(),
                KeyCode::PageDown => self.page_down(),
                KeyCode::PageUp => self.page_up(),
                KeyCode::Home => self.scroll_position = 0,
                KeyCode::End => self.scroll_position = self.get_max_scroll(),
                _ => {}
            },
        }
        false
    }

    fn preview_text(&self) -> Cow<'_, str> {
        if let Some(result) = self.session.result() {
            return Cow::Borrowed(result.text.as_str());
        }
        match self.session.state() {
            State::Idle => Cow::Borrowed("Press 'o' and enter the path of a file to convert."),
            State::FileSelected { name } => Cow::Owned(format!("Reading {}...", name)),
            State::Rejected { .. } | State::Failed { .. } => {
                Cow::Borrowed("No converted output. Select another file with 'o'.")
            }
            State::Converted { .. } => Cow::Borrowed(""),
        }
    }

    fn get_max_scroll(&self) -> u16 {
        let rows = wrapped_rows(&self.preview_text(), self.viewport_width);
        let rows = u16::try_from(rows).unwrap_or(u16::MAX);
        rows.saturating_sub(self.viewport_height)
    }

    fn scroll_down(&mut self) {
        if self.scroll_position < self.get_max_scroll() {
            self.scroll_position += 1;
        }
    }

    fn scroll_up(&mut self) {
        self.scroll_position = self.scroll_position.saturating_sub(1);
    }

    fn page_down(&mut self) {
        self.scroll_position = (self.scroll_position + 10).min(self.get_max_scroll());
    }

    fn page_up(&mut self) {
        self.scroll_position = self.scroll_position.saturating_sub(10);
    }
}

/// Rows `text` occupies when word-wrapped to `width` columns.
fn wrapped_rows(text: &str, width: u16) -> usize {
    let width = usize::from(width.max(1));
    text.lines().map(|line| line_rows(line, width)).sum()
}

fn line_rows(line: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut col = 0;
    for word in line.split(' ') {
        let len = word.chars().count();
        if col > 0 && col + 1 + len <= width {
            col += 1 + len;
            continue;
        }
        if col > 0 {
            rows += 1;
        }
        // words longer than a row are broken across rows
        rows += len.saturating_sub(1) / width;
        col = match len % width {
            0 if len > 0 => width,
            rest => rest,
        };
    }
    rows
}

pub fn run_tui(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = match &settings.output {
        Output::Files(Some(dir)) => dir.clone(),
        _ => PathBuf::from("."),
    };
    let mut app = App::new(settings.converter(), output_dir);
    if let Some(first) = settings.files.first() {
        app.open(first.clone());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("TUI closed");

    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        app.poll_reads();

        terminal.draw(|f| draw_ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

fn draw_ui(f: &mut ratatui::Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let top_bar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_layout[0]);

    let (prompt_text, prompt_style) = match app.mode {
        Mode::Select => (format!(" {}_", app.prompt), Style::default().fg(Color::Yellow)),
        Mode::Browse => {
            let current = match app.session.source() {
                Some(source) => source.name().to_string(),
                None => "(no file)".to_string(),
            };
            (format!(" {}", current), Style::default().fg(Color::Cyan))
        }
    };
    let file_box = Paragraph::new(prompt_text).style(prompt_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(if app.mode == Mode::Select { "Open file" } else { "Source" }),
    );
    f.render_widget(file_box, top_bar[0]);

    let converter = app.session.converter();
    let settings_box = Paragraph::new(format!(
        " {} | {}",
        converter.policy(),
        converter.accept_mode().describe()
    ))
    .style(Style::default().fg(Color::White))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Format"),
    );
    f.render_widget(settings_box, top_bar[1]);

    // borders take two rows
    app.viewport_height = main_layout[1].height.saturating_sub(2);
    app.viewport_width = main_layout[1].width.saturating_sub(2);

    let max_scroll = app.get_max_scroll();
    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", app.scroll_position, max_scroll)
    } else {
        String::new()
    };
    let title = match app.session.result() {
        Some(result) => format!("{}{}", result.output_name, scroll_info),
        None => "Converted output".to_string(),
    };

    let content = Paragraph::new(app.preview_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_position, 0));
    f.render_widget(content, main_layout[1]);

    let notice_line = match &app.notice {
        Some(notice) => {
            let color = if notice.is_error() { Color::Red } else { Color::Green };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", notice.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(notice.body.clone()),
            ])
        }
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(notice_line), main_layout[2]);

    let downloaded = matches!(
        app.session.state(),
        State::Converted {
            downloaded: true,
            ..
        }
    );
    let status = if downloaded { "Saved ✔" } else { "Unsaved" };

    let help_text = Line::from(vec![
        Span::styled(
            " q ",
            Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" quit | "),
        Span::styled(" o ", Style::default().bg(Color::Blue).fg(Color::White)),
        Span::raw(" open | "),
        Span::styled(" s ", Style::default().bg(Color::Blue).fg(Color::White)),
        Span::raw(" save .txt | "),
        Span::styled(" ↑↓ ", Style::default().bg(Color::Blue).fg(Color::White)),
        Span::raw(" scroll | "),
        Span::styled(
            status,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let help_bar = Paragraph::new(help_text).style(Style::default().bg(Color::DarkGray));
    f.render_widget(help_bar, main_layout[3]);
}
