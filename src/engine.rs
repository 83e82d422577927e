use tracing::trace;

use crate::buffers::{self, CodePoints, new_code_points};
use crate::tables::{
    self, ConsonantDefinition, ModifierRole, RA, VIRAMA, VowelDefinition, YA, ZWJ,
    is_consonant_letter, resolve_by_output,
};

/// The orthographic unit currently being composed.
///
/// Holds at most one base consonant (or independent vowel) at index 0,
/// followed by the marks and vowel signs typed after it. Modifier keys act on
/// the first element; vowel keys act on the last one.
#[derive(Debug, Clone)]
pub struct TransliterationBuffer {
    code_points: CodePoints,
}

impl Default for TransliterationBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransliterationBuffer {
    pub fn new() -> Self {
        Self {
            code_points: new_code_points(),
        }
    }

    pub fn as_slice(&self) -> &[char] {
        &self.code_points
    }

    pub fn is_empty(&self) -> bool {
        self.code_points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.code_points.len()
    }

    /// Current contents as UTF-8 text.
    pub fn text(&self) -> String {
        buffers::encode(&self.code_points)
    }

    /// Feed a consonant key. Returns the committed text if the key flushed
    /// the previous unit.
    #[must_use = "committed text must be delivered to the host"]
    pub fn append_consonant(&mut self, consonant: &ConsonantDefinition) -> Option<String> {
        if self.code_points.is_empty() {
            self.push(consonant.base);
            return None;
        }

        match ModifierRole::of(consonant) {
            Some(ModifierRole::Virama) => {
                self.push(VIRAMA);
                return None;
            }
            Some(ModifierRole::ViramaJoin) => {
                self.push(VIRAMA);
                let committed = self.commit();
                self.push(ZWJ);
                return Some(committed);
            }
            Some(ModifierRole::Aspirate) => {
                if let Some(form) = self.first_consonant().and_then(|c| c.aspirated) {
                    self.replace_first(form);
                    return None;
                }
            }
            Some(ModifierRole::Nasalize) => {
                if let Some(form) = self.first_consonant().and_then(|c| c.nasalized) {
                    self.replace_first(form);
                    return None;
                }
            }
            Some(ModifierRole::Repha) => return Some(self.join_and_continue(RA)),
            Some(ModifierRole::Semivowel) => return Some(self.join_and_continue(YA)),
            None => {}
        }

        let committed = self.commit();
        self.push(consonant.base);
        Some(committed)
    }

    /// Feed a vowel key. Never commits; a key that matches no rule is
    /// dropped.
    pub fn append_vowel(&mut self, vowel: &VowelDefinition) {
        let Some(&last) = self.code_points.last() else {
            self.push(vowel.independent_short);
            return;
        };

        if is_consonant_letter(last) {
            self.push(vowel.dependent_short);
        } else if last == vowel.independent_short {
            // ඓ and ඖ have no long form.
            if let Some(long) = vowel.independent_long {
                self.replace_last(long);
            }
        } else if last == vowel.dependent_short {
            self.replace_last(vowel.dependent_long);
        } else if tables::corrects_to_next(last, vowel) {
            if let Some(next) = char::from_u32(vowel.independent_short as u32 + 1) {
                self.replace_last(next);
            }
        } else {
            trace!(key = %vowel.key, last = %last.escape_unicode(), "vowel ignored");
        }
    }

    /// Remove the last code point. `false` when there was nothing to remove,
    /// so the host can delete committed text instead.
    pub fn backspace(&mut self) -> bool {
        self.code_points.pop().is_some()
    }

    /// Encode the unit, clear the buffer and return the text.
    pub fn commit(&mut self) -> String {
        let text = self.text();
        self.code_points.clear();
        trace!(%text, "commit");
        text
    }

    /// Drop the unit without committing it.
    pub fn reset(&mut self) {
        self.code_points.clear();
    }

    fn push(&mut self, c: char) {
        self.code_points.push(c);
    }

    fn first_consonant(&self) -> Option<&'static ConsonantDefinition> {
        self.code_points.first().copied().and_then(resolve_by_output)
    }

    fn replace_first(&mut self, c: char) {
        if let Some(first) = self.code_points.first_mut() {
            *first = c;
        }
    }

    fn replace_last(&mut self, c: char) {
        if let Some(last) = self.code_points.last_mut() {
            *last = c;
        }
    }

    fn join_and_continue(&mut self, next: char) -> String {
        self.push(VIRAMA);
        self.push(ZWJ);
        let committed = self.commit();
        self.push(next);
        committed
    }
}
