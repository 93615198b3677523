use crate::prompt::model::Picker;
use crate::prompt::run::{Select, SelectError};
use crate::prompt::Msg;
use bubbletea_rs::{
    Program, command::Cmd, event::KeyMsg, event::WindowSizeMsg, model::Model as TeaModel,
    window_size,
};
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::Lazy;
use std::sync::Mutex;

// bubbletea-rs builds the model through `init()`, so the picker is parked here until then
static PENDING: Lazy<Mutex<Option<Picker>>> = Lazy::new(|| Mutex::new(None));

struct TeaAdapter {
    inner: Option<Picker>,
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        (TeaAdapter { inner: reclaim() }, Some(window_size()))
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        let Some(picker) = self.inner.as_mut() else {
            return Some(bubbletea_rs::quit());
        };
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            match &km.key {
                KeyCode::Esc => {
                    picker.update(Msg::KeyEsc);
                    return Some(bubbletea_rs::quit());
                }
                KeyCode::Enter => {
                    picker.update(Msg::KeyEnter);
                    if picker.chosen.is_some() {
                        return Some(bubbletea_rs::quit());
                    }
                }
                KeyCode::Backspace => picker.update(Msg::KeyBackspace),
                KeyCode::Up => picker.update(Msg::KeyUp),
                KeyCode::Down => picker.update(Msg::KeyDown),
                KeyCode::Char(ch) => {
                    if km.modifiers.contains(KeyModifiers::CONTROL) {
                        match ch {
                            'c' | 'C' => {
                                picker.update(Msg::KeyEsc);
                                return Some(bubbletea_rs::quit());
                            }
                            'n' | 'N' => picker.update(Msg::KeyDown),
                            'p' | 'P' => picker.update(Msg::KeyUp),
                            _ => {}
                        }
                    } else if *ch == '\u{03}' {
                        // Ctrl-C delivered as ETX
                        picker.update(Msg::KeyEsc);
                        return Some(bubbletea_rs::quit());
                    } else {
                        picker.update(Msg::Rune(*ch));
                    }
                }
                _ => {}
            }
            return None;
        }
        if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            picker.update(Msg::WindowSize {
                height: ws.height as usize,
            });
        }
        None
    }

    fn view(&self) -> String {
        self.inner.as_ref().map(Picker::view).unwrap_or_default()
    }
}

fn park(picker: Picker) -> Result<(), SelectError> {
    *PENDING.lock().map_err(|_| SelectError::Handoff)? = Some(picker);
    Ok(())
}

fn reclaim() -> Option<Picker> {
    PENDING.lock().ok().and_then(|mut pending| pending.take())
}

fn run_program() -> Result<TeaAdapter, SelectError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| SelectError::Program(format!("failed to start runtime: {e}")))?;
    let program = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()
        .map_err(|e| SelectError::Program(format!("failed to build program: {e:?}")))?;
    runtime
        .block_on(program.run())
        .map_err(|e| SelectError::Program(format!("program error: {e:?}")))
}

/// Runs a [`Picker`] as a full-screen terminal program.
pub struct TerminalSelect {
    picker: Option<Picker>,
}

impl TerminalSelect {
    pub fn new(picker: Picker) -> Self {
        TerminalSelect {
            picker: Some(picker),
        }
    }
}

impl Select for TerminalSelect {
    fn select(&mut self) -> Result<usize, SelectError> {
        let picker = self.picker.take().ok_or(SelectError::Consumed)?;
        if picker.items.is_empty() {
            return Err(SelectError::NoItems);
        }
        tracing::debug!(
            items = picker.items.len(),
            show_all = picker.show_all,
            "starting prompt"
        );
        park(picker)?;
        let final_adapter = match run_program() {
            Ok(adapter) => adapter,
            Err(e) => {
                // drop the picker if init() never picked it up
                reclaim();
                return Err(e);
            }
        };

        let picker = final_adapter.inner.ok_or(SelectError::Handoff)?;
        match picker.chosen {
            Some(idx) if !picker.aborted => Ok(idx),
            _ => Err(SelectError::Aborted),
        }
    }
}
