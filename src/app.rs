//! Host loop: terminal setup, event multiplexing and the Menu/Playing
//! state machine. All simulation happens inside [`PlaySession`]; this module
//! only routes input and drives one draw pass per frame.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{GameConfig, PlaySession};
use crate::highscore::HighscoreStore;
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// Which screen the player is looking at
enum Screen {
    Menu { highscore: u32 },
    Playing(PlaySession),
}

pub struct App {
    config: GameConfig,
    screen: Screen,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl App {
    /// Start at the menu, showing the persisted highscore
    pub fn new(config: GameConfig) -> Result<Self> {
        let highscore = HighscoreStore::new(config.highscore_path.clone())
            .load()
            .context("failed to load highscore")?;

        Ok(Self {
            config,
            screen: Screen::Menu { highscore },
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run the loop with cleanup
        let result = self.run_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One simulation step and one draw pass per frame; the session
        // gates actual movement on its own fixed timestep.
        let mut frame_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Simulation step, then draw
                _ = frame_timer.tick() => {
                    if let Screen::Playing(session) = &mut self.screen {
                        session.run(Instant::now());
                    }
                    // Gameplay state is independent of draw success: a
                    // failed frame is logged and skipped, not fatal.
                    if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                        log::error!("failed to draw frame: {err}");
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.quit();
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);

            if matches!(self.screen, Screen::Menu { .. }) {
                match action {
                    KeyAction::Confirm => {
                        let session =
                            PlaySession::new(&self.config, StdRng::from_entropy())
                                .context("failed to start game session")?;
                        self.screen = Screen::Playing(session);
                    }
                    KeyAction::Quit => self.should_quit = true,
                    _ => {}
                }
            } else if let Screen::Playing(session) = &mut self.screen {
                match action {
                    KeyAction::Direction(dir) => session.steer(dir),
                    KeyAction::TogglePause => session.toggle_pause(),
                    KeyAction::ToggleGodmode => session.toggle_godmode(),
                    KeyAction::Confirm => session.restart(),
                    KeyAction::Quit => self.quit(),
                    KeyAction::None => {}
                }
            }
        }

        Ok(())
    }

    /// Best-effort highscore save, then leave the loop
    fn quit(&mut self) {
        if let Screen::Playing(session) = &mut self.screen {
            session.save_highscore();
        }
        self.should_quit = true;
    }

    fn draw(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::Menu { highscore } => self.renderer.render_menu(frame, *highscore),
            Screen::Playing(session) => self.renderer.render_play(frame, session),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
