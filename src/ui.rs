use crate::task::Task;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame, Terminal,
};
use std::io;

struct Column<'a> {
    name: &'static str,
    tasks: Vec<&'a Task>,
}

/// Read-only board of tasks split into pending and completed columns.
pub struct Board<'a> {
    columns: Vec<Column<'a>>,
    pub selected_column: usize,
    pub selected_task: usize,
}

impl<'a> Board<'a> {
    pub fn new(tasks: &[&'a Task], show_completed: bool) -> Self {
        let mut columns = vec![Column {
            name: "Pending",
            tasks: tasks.iter().copied().filter(|t| !t.completed()).collect(),
        }];
        if show_completed {
            columns.push(Column {
                name: "Completed",
                tasks: tasks.iter().copied().filter(|t| t.completed()).collect(),
            });
        }
        Self {
            columns,
            selected_column: 0,
            selected_task: 0,
        }
    }

    pub fn selected(&self) -> Option<&'a Task> {
        self.columns
            .get(self.selected_column)
            .and_then(|c| c.tasks.get(self.selected_task))
            .copied()
    }

    /// Applies a key press. Returns `true` when the board should close.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.selected_task = 0;
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.columns.len() {
                    self.selected_column += 1;
                    self.selected_task = 0;
                }
            }
            KeyCode::Up => {
                self.selected_task = self.selected_task.saturating_sub(1);
            }
            KeyCode::Down => {
                let max_tasks = self.columns[self.selected_column].tasks.len();
                if self.selected_task + 1 < max_tasks {
                    self.selected_task += 1;
                }
            }
            _ => {}
        }
        false
    }
}

pub fn render_board(f: &mut Frame, board: &Board) {
    let percent = 100 / board.columns.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(percent); board.columns.len()])
        .split(f.area());

    for (i, column) in board.columns.iter().enumerate() {
        let items: Vec<ListItem> = column
            .tasks
            .iter()
            .map(|t| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("[{}] ", t.priority)),
                    Span::styled(&t.title, Style::default().fg(Color::White)),
                    Span::raw(format!(" (Due: {}, {})", t.due_date, t.category)),
                ]))
            })
            .collect();

        let is_selected = board.selected_column == i;
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("{} ({})", column.name, column.tasks.len()))
                    .borders(Borders::ALL)
                    .border_style(if is_selected {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    }),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if is_selected && !column.tasks.is_empty() {
            state.select(Some(board.selected_task));
        }
        f.render_stateful_widget(list, chunks[i], &mut state);
    }
}

pub fn run_board<B: Backend>(terminal: &mut Terminal<B>, board: &mut Board) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_board(f, board))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && board.handle_key(key.code) {
                return Ok(());
            }
        }
    }
}

/// Takes over the terminal to show `tasks` until the user closes the board.
pub fn show_board(tasks: &[&Task], show_completed: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut board = Board::new(tasks, show_completed);
    let result = run_board(&mut terminal, &mut board);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
