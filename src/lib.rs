//! Phonetic Sinhala input method engine.
//!
//! Latin key presses are turned into Sinhala text one orthographic unit at a
//! time: consonant keys start a unit, vowel keys attach to it, and a handful
//! of consonant keys (`w W H G R Y`) modify the unit in place.
//!
//! ```
//! use sayura::transliterate;
//!
//! assert_eq!(transliterate("kaa"), "\u{0D9A}\u{0DCF}");
//! ```

mod buffers;
pub mod config;
pub mod engine;
pub mod keys;
pub mod session;
pub mod tables;


pub use config::{PreeditSettings, Settings, SettingsError};
pub use engine::TransliterationBuffer;
pub use keys::{KeyEvent, KeySym, Modifiers};
pub use session::{
    Capabilities, KeyResponse, Preedit, PreeditPlacement, Session, SessionRegistry,
};
pub use tables::{
    ConsonantDefinition, KeyClass, ModifierRole, VowelDefinition, classify_key,
    is_consonant_letter, resolve_by_output,
};

/// Type `input` into a fresh session and return everything the host would
/// end up with, including keys that pass through and the final flush.
pub fn transliterate(input: &str) -> String {
    let mut session = Session::new(Capabilities::default());
    let mut out = String::new();
    for c in input.chars() {
        let resp = session.handle_key(KeyEvent::press(c));
        out.push_str(&resp.committed_text());
        if !resp.consumed {
            out.push(c);
        }
    }
    out.push_str(&session.deactivate().committed_text());
    out
}
