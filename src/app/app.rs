use std::io;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::prelude::*;

use fb_base::actions::{Action, ActionResult};
use fb_base::config::constants::{EVENT_POLL_MS, IDLE_POLL_MS, RENDER_THROTTLE_MS};
use fb_mod_tree::{FsSource, LoadRequest, LoadResult, Loader, ROOT_PATH};

use crate::app::actions::apply_action;
use crate::app::events::handle_event;
use crate::state::State;
use crate::ui;

pub struct App {
    pub state: State,
    loader: Loader,
    load_rx: Receiver<LoadResult>,
    /// Reference point for render throttling
    started: Instant,
    /// Last render time for throttling, in ms since `started`
    last_render_ms: u64,
}

impl App {
    pub fn new(state: State, source: Arc<dyn FsSource>) -> Self {
        let (loader, load_rx) = Loader::new(source);
        Self { state, loader, load_rx, started: Instant::now(), last_render_ms: 0 }
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Request the root listing. The root starts open, so its rows appear as soon as it lands.
    pub fn mount(&mut self) {
        if let Some(request) = self.state.tree.begin_load(ROOT_PATH) {
            tracing::info!("loading root directory");
            self.state.refresh_rows();
            self.loader.spawn(request);
        }
    }

    /// Stop accepting fetch results. Anything still on the wire is discarded.
    pub fn unmount(&mut self) {
        self.loader.shutdown();
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        self.mount();

        loop {
            let current_ms = self.now_ms();

            // Input first, rendered right away
            if event::poll(Duration::ZERO)? {
                let evt = event::read()?;
                let Some(action) = handle_event(&evt, &self.state) else {
                    break;
                };
                self.handle_action(action);

                if self.state.dirty {
                    terminal.draw(|frame| ui::render(frame, &mut self.state))?;
                    self.state.dirty = false;
                    self.last_render_ms = current_ms;
                }
            }

            self.process_load_results();

            if self.state.dirty && current_ms.saturating_sub(self.last_render_ms) >= RENDER_THROTTLE_MS {
                terminal.draw(|frame| ui::render(frame, &mut self.state))?;
                self.state.dirty = false;
                self.last_render_ms = current_ms;
            }

            // Poll faster while fetches are pending
            let poll_ms = if self.loader.in_flight() > 0 || self.state.dirty { EVENT_POLL_MS } else { IDLE_POLL_MS };
            let _ = event::poll(Duration::from_millis(poll_ms))?;
        }

        self.unmount();
        Ok(())
    }

    fn handle_action(&mut self, action: Action) {
        if action != Action::None {
            self.state.dirty = true;
        }
        match apply_action(&mut self.state, action) {
            ActionResult::Nothing => {}
            ActionResult::Load(path) => {
                tracing::debug!(%path, "fetching directory");
                self.loader.spawn(LoadRequest::new(path));
            }
        }
    }

    /// Merge every fetch that has finished since the last call.
    fn process_load_results(&mut self) {
        loop {
            match self.load_rx.try_recv() {
                Ok(LoadResult { path, outcome }) => {
                    self.state.tree.finish_load(&path, outcome);
                    self.state.refresh_rows();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}
