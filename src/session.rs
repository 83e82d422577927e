//! Per-input-context dispatch: turns host key events into buffer operations
//! and tells the host what to commit, what to draw and whether the key was
//! eaten.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use tracing::{debug, debug_span};

use crate::config::{PreeditSettings, Settings};
use crate::engine::TransliterationBuffer;
use crate::keys::{KeyEvent, KeySym};
use crate::tables::{KeyClass, classify_key};

/// What the host can draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// The client application can render preedit text inline.
    pub client_preedit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreeditPlacement {
    /// Inline in the client application.
    Client,
    /// In the input method's own floating panel.
    Floating,
}

/// Provisional text to draw. An empty `text` clears the preedit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preedit {
    pub text: String,
    /// Byte offset into `text`; always at the end.
    pub cursor: usize,
    pub highlight: bool,
    pub placement: PreeditPlacement,
}

/// Result of one key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    /// The host must not process the key any further.
    pub consumed: bool,
    /// Text to insert, in order. Never contains empty strings.
    pub commits: Vec<String>,
    /// `Some` when the host must redraw the preedit.
    pub preedit: Option<Preedit>,
}

impl KeyResponse {
    fn not_consumed() -> Self {
        Self {
            consumed: false,
            commits: Vec::new(),
            preedit: None,
        }
    }

    fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::not_consumed()
        }
    }

    fn push_commit(&mut self, text: String) {
        if !text.is_empty() {
            self.commits.push(text);
        }
    }

    /// All committed text joined.
    pub fn committed_text(&self) -> String {
        self.commits.concat()
    }
}

/// One editing session with its own composition buffer.
#[derive(Debug, Clone)]
pub struct Session {
    buffer: TransliterationBuffer,
    capabilities: Capabilities,
    preedit: PreeditSettings,
}

impl Session {
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_settings(capabilities, &Settings::default())
    }

    pub fn with_settings(capabilities: Capabilities, settings: &Settings) -> Self {
        Self {
            buffer: TransliterationBuffer::new(),
            capabilities,
            preedit: settings.preedit,
        }
    }

    pub fn buffer(&self) -> &TransliterationBuffer {
        &self.buffer
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    /// Process a key event.
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event).entered();

        if event.is_release {
            return KeyResponse::not_consumed();
        }
        if !event.modifiers.is_empty() {
            debug!("modified key, ignored");
            return KeyResponse::not_consumed();
        }

        match event.sym {
            KeySym::Escape => self.reset(),
            KeySym::BackSpace => {
                if self.buffer.backspace() {
                    self.redraw(KeyResponse::consumed())
                } else {
                    KeyResponse::not_consumed()
                }
            }
            // The space itself passes through after the unit.
            KeySym::Space => self.commit_and_redraw(KeyResponse::not_consumed()),
            KeySym::Shift => KeyResponse::not_consumed(),
            sym => match classify_key(sym) {
                KeyClass::Consonant(consonant) => {
                    let mut resp = KeyResponse::consumed();
                    if let Some(text) = self.buffer.append_consonant(consonant) {
                        resp.push_commit(text);
                    }
                    self.redraw(resp)
                }
                KeyClass::Vowel(vowel) => {
                    self.buffer.append_vowel(vowel);
                    self.redraw(KeyResponse::consumed())
                }
                KeyClass::Unmapped => {
                    debug!("unmapped key, flushing");
                    self.commit_and_redraw(KeyResponse::not_consumed())
                }
            },
        }
    }

    /// Flush the pending unit, e.g. when the host commits on focus change.
    pub fn commit(&mut self) -> KeyResponse {
        self.commit_and_redraw(KeyResponse::not_consumed())
    }

    /// Discard the pending unit.
    pub fn reset(&mut self) -> KeyResponse {
        self.buffer.reset();
        self.redraw(KeyResponse::not_consumed())
    }

    /// The input method is switched away from this context.
    pub fn deactivate(&mut self) -> KeyResponse {
        self.commit()
    }

    /// Current preedit as the host should draw it.
    pub fn preedit(&self) -> Preedit {
        let text = self.buffer.text();
        Preedit {
            cursor: text.len(),
            text,
            highlight: self.preedit.highlight,
            placement: if self.capabilities.client_preedit {
                PreeditPlacement::Client
            } else {
                PreeditPlacement::Floating
            },
        }
    }

    fn commit_and_redraw(&mut self, mut resp: KeyResponse) -> KeyResponse {
        resp.push_commit(self.buffer.commit());
        self.redraw(resp)
    }

    fn redraw(&self, mut resp: KeyResponse) -> KeyResponse {
        resp.preedit = Some(self.preedit());
        resp
    }
}

/// Sessions keyed by the host's input-context id.
///
/// A session is created the first time its id is seen and lives until
/// `remove`; there is no state shared between sessions.
#[derive(Debug)]
pub struct SessionRegistry<Id> {
    sessions: HashMap<Id, Session>,
    settings: Settings,
}

impl<Id: Eq + Hash> Default for SessionRegistry<Id> {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl<Id: Eq + Hash> SessionRegistry<Id> {
    pub fn new(settings: Settings) -> Self {
        Self {
            sessions: HashMap::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Session for `id`. A missing one is created with
    /// `default_client_preedit` standing in for the host's capabilities;
    /// use [`create`](Self::create) when the host has declared them.
    pub fn session(&mut self, id: Id) -> &mut Session {
        let settings = &self.settings;
        self.sessions.entry(id).or_insert_with(|| {
            debug!("session created");
            let capabilities = Capabilities {
                client_preedit: settings.preedit.default_client_preedit,
            };
            Session::with_settings(capabilities, settings)
        })
    }

    /// Create or replace the session for `id` with explicit capabilities.
    pub fn create(&mut self, id: Id, capabilities: Capabilities) -> &mut Session {
        debug!("session created");
        let session = Session::with_settings(capabilities, &self.settings);
        match self.sessions.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.insert(session);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(session),
        }
    }

    pub fn get(&self, id: &Id) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &Id) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// End a session. Pending composition is discarded, not committed.
    pub fn remove(&mut self, id: &Id) -> Option<Session> {
        let removed = self.sessions.remove(id);
        if removed.is_some() {
            debug!("session removed");
        }
        removed
    }

    pub fn handle_key(&mut self, id: Id, event: KeyEvent) -> KeyResponse {
        self.session(id).handle_key(event)
    }

    /// Deactivate `id`. `None` if the session does not exist.
    pub fn deactivate(&mut self, id: &Id) -> Option<KeyResponse> {
        self.sessions.get_mut(id).map(Session::deactivate)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
