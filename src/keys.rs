use std::ops::BitOr;

/// Key symbols the engine tells apart. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySym {
    /// A printable character, already shifted (`H`, not `Shift+h`).
    Char(char),
    Space,
    BackSpace,
    Escape,
    /// Left or right Shift pressed on its own.
    Shift,
    /// Opaque host keysym.
    Other(u32),
}

impl KeySym {
    pub fn from_char(c: char) -> Self {
        if c == ' ' { Self::Space } else { Self::Char(c) }
    }
}

impl From<char> for KeySym {
    fn from(c: char) -> Self {
        Self::from_char(c)
    }
}

/// Modifier keys held during a key event. Shift is folded into the symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const CONTROL: Self = Self(1 << 0);
    pub const ALT: Self = Self(1 << 1);
    pub const SUPER: Self = Self(1 << 2);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One physical key event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub sym: KeySym,
    pub modifiers: Modifiers,
    pub is_release: bool,
}

impl KeyEvent {
    pub fn press(sym: impl Into<KeySym>) -> Self {
        Self {
            sym: sym.into(),
            modifiers: Modifiers::empty(),
            is_release: false,
        }
    }

    pub fn release(sym: impl Into<KeySym>) -> Self {
        Self {
            is_release: true,
            ..Self::press(sym)
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
