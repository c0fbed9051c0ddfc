//! Terminal event loop: raw-mode setup, key dispatch through the
//! chord resolver, hover preloading, idle-time queue draining and
//! periodic autosave.

use crate::command;
use crate::controller::PlaygroundController;
use anyhow::Result;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use showroom_memory::AUTOSAVE_INTERVAL_SECS;
use showroom_perf::ManualScheduler;
use std::io::Stdout;
use std::time::Duration;
use std::time::Instant;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct App {
    controller: PlaygroundController,
    last_save: Instant,
}

impl App {
    pub fn new(controller: PlaygroundController) -> Self {
        Self {
            controller,
            last_save: Instant::now(),
        }
    }

    pub fn run(mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        self.controller.restore_session();
        let result = self.event_loop(&mut terminal);
        // Final save happens even when the loop errored out.
        self.controller.save();
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let idle = ManualScheduler::new(true);
        while !self.controller.should_quit() {
            terminal.draw(|frame| {
                let area = frame.area();
                crate::ui::draw(&self.controller, area, frame.buffer_mut());
            })?;
            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
                    Event::Mouse(mouse) => {
                        let size = terminal.size()?;
                        self.on_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                    }
                    _ => {}
                }
            } else {
                // No input pending: background work may run.
                self.controller.on_idle(&idle);
                self.autosave_tick();
            }
        }
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        let focused = self.controller.search_focused();
        if let Some(cmd) = command::resolve(key, focused) {
            self.controller.handle(cmd);
            self.controller.flush_frame();
            return;
        }
        if focused {
            match key.code {
                KeyCode::Char(c) => self.controller.push_search_char(c),
                KeyCode::Backspace => self.controller.pop_search_char(),
                KeyCode::Enter => self.controller.blur_search(),
                _ => {}
            }
        }
    }

    /// Hovering a catalog row hints the preloader; the queued load runs
    /// later, from the idle branch of the loop.
    fn on_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Moved {
            return;
        }
        if let Some(row) = crate::ui::catalog_row_at(area, mouse.column, mouse.row) {
            self.controller.preload_hint(row);
        }
    }

    fn autosave_tick(&mut self) {
        if self.last_save.elapsed() >= Duration::from_secs(AUTOSAVE_INTERVAL_SECS) {
            self.controller.save();
            self.last_save = Instant::now();
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
