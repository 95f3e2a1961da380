use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::execute;
use ratatui::DefaultTerminal;
use thinkbot_core::{update, AppState, AppViewModel, Endpoint, Msg, WELCOME_DELAY};
use thinkbot_logging::tb_info;

use super::config::AppConfig;
use super::effects::{now, EffectRunner};
use super::keymap::{map_key, map_paste, Action};
use super::{logging, ui};

/// How long to wait for terminal input before draining the message inbox.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app(config: AppConfig) -> Result<()> {
    logging::initialize(&config.log_file, config.log_level);
    tb_info!(
        "Starting ThinkBot client base_url={} endpoint={}",
        config.base_url,
        config.endpoint
    );

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let effects = EffectRunner::new(config.client_settings(), msg_tx)
        .context("Failed to start HTTP engine")?;
    let state = AppState::with_endpoint(Endpoint::from_selector(&config.endpoint));

    effects.schedule(WELCOME_DELAY, || Msg::WelcomeDue { at: now() });

    let mut terminal = ratatui::init();
    let result = execute!(std::io::stdout(), EnableBracketedPaste)
        .context("Failed to enable bracketed paste")
        .and_then(|()| App::new(state, effects, msg_rx).run(&mut terminal));
    let _ = execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    tb_info!("ThinkBot client exiting");
    result
}

struct App {
    state: AppState,
    view: AppViewModel,
    effects: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    needs_render: bool,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, effects: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        let view = state.view();
        Self {
            state,
            view,
            effects,
            msg_rx,
            needs_render: true,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            if self.needs_render {
                let mut max_scroll_back = 0;
                terminal
                    .draw(|frame| max_scroll_back = ui::render::render(frame, &self.view))
                    .context("Failed to draw frame")?;
                self.needs_render = false;
                self.dispatch_msg(Msg::TranscriptMeasured { max_scroll_back });
            }

            if event::poll(POLL_INTERVAL).context("Failed to poll terminal events")? {
                let event = event::read().context("Failed to read terminal event")?;
                self.handle_terminal_event(event);
            }

            self.process_pending_messages();
        }
        self.effects.shutdown();
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) {
        let action = match event {
            Event::Key(key) => map_key(key, &self.view, now()),
            Event::Paste(text) => map_paste(&text, &self.view),
            Event::Resize(..) => {
                self.needs_render = true;
                None
            }
            _ => None,
        };

        match action {
            Some(Action::Dispatch(msg)) => self.dispatch_msg(msg),
            Some(Action::Quit) => self.should_quit = true,
            None => {}
        }
    }

    fn process_pending_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
            self.needs_render = true;
        }
        self.state = state;
        self.effects.enqueue(effects);
    }
}
