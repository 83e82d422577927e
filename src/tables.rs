//! Sayura key tables and the indices derived from them.
//!
//! Both tables and all three indices are evaluated at compile time, so they
//! exist before the first session and can be read from any thread.

use crate::keys::KeySym;

/// Combining virama (al-lakuna).
pub const VIRAMA: char = '\u{0DCA}';
/// Zero-width joiner, requests an explicit conjunct glyph.
pub const ZWJ: char = '\u{200D}';
/// Base form of the "ra" consonant, continuation after a repha.
pub const RA: char = '\u{0DBB}';
/// Base form of the "ya" consonant, continuation after a yansaya.
pub const YA: char = '\u{0DBA}';

const LONG_AA: char = '\u{0D86}';
const AE: char = '\u{0D87}';

const CONSONANT_FIRST: char = '\u{0D9A}';
const CONSONANT_LAST: char = '\u{0DC6}';

/// Start of the Sinhala block, origin of the reverse index.
const BLOCK_START: u32 = 0x0D80;
const BLOCK_LEN: usize = 128;
const NONE: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsonantDefinition {
    pub base: char,
    pub aspirated: Option<char>,
    pub nasalized: Option<char>,
    pub key: char,
}

impl ConsonantDefinition {
    const fn new(base: u32, aspirated: u32, nasalized: u32, key: char) -> Self {
        Self {
            base: code_point(base),
            aspirated: optional(aspirated),
            nasalized: optional(nasalized),
            key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VowelDefinition {
    pub independent_short: char,
    pub independent_long: Option<char>,
    pub dependent_short: char,
    pub dependent_long: char,
    pub key: char,
}

impl VowelDefinition {
    const fn new(
        independent_short: u32,
        independent_long: u32,
        dependent_short: u32,
        dependent_long: u32,
        key: char,
    ) -> Self {
        Self {
            independent_short: code_point(independent_short),
            independent_long: optional(independent_long),
            dependent_short: code_point(dependent_short),
            dependent_long: code_point(dependent_long),
            key,
        }
    }
}

const fn code_point(v: u32) -> char {
    match char::from_u32(v) {
        Some(c) => c,
        None => panic!("table entry is not a scalar value"),
    }
}

const fn optional(v: u32) -> Option<char> {
    if v == 0 { None } else { Some(code_point(v)) }
}

type C = ConsonantDefinition;

const CONSONANT_ROWS: [ConsonantDefinition; 40] = [
    C::new(0xda4, 0x000, 0x000, 'z'),
    C::new(0xda5, 0x000, 0x000, 'Z'),
    C::new(0xdc0, 0x000, 0x000, 'w'),
    C::new(0x200c, 0x000, 0x000, 'W'),
    C::new(0xdbb, 0x000, 0x000, 'r'),
    C::new(0xdbb, 0x000, 0x000, 'R'),
    C::new(0xdad, 0xdae, 0x000, 't'),
    C::new(0xda7, 0xda8, 0x000, 'T'),
    C::new(0xdba, 0x000, 0x000, 'y'),
    C::new(0xdba, 0x000, 0x000, 'Y'),
    C::new(0xdb4, 0xdb5, 0x000, 'p'),
    C::new(0xdb5, 0xdb5, 0x000, 'P'),
    C::new(0xdc3, 0xdc2, 0x000, 's'),
    C::new(0xdc1, 0xdc2, 0x000, 'S'),
    C::new(0xdaf, 0xdb0, 0xdb3, 'd'),
    C::new(0xda9, 0xdaa, 0xdac, 'D'),
    C::new(0xdc6, 0x000, 0x000, 'f'),
    C::new(0xdc6, 0x000, 0x000, 'F'),
    C::new(0xd9c, 0xd9d, 0xd9f, 'g'),
    C::new(0xd9f, 0xd9d, 0x000, 'G'),
    C::new(0xdc4, 0xd83, 0x000, 'h'),
    C::new(0xdc4, 0x000, 0x000, 'H'),
    C::new(0xda2, 0xda3, 0xda6, 'j'),
    C::new(0xda3, 0xda3, 0xda6, 'J'),
    C::new(0xd9a, 0xd9b, 0x000, 'k'),
    C::new(0xd9b, 0xd9b, 0x000, 'K'),
    C::new(0xdbd, 0x000, 0x000, 'l'),
    C::new(0xdc5, 0x000, 0x000, 'L'),
    C::new(0xd82, 0x000, 0x000, 'x'),
    C::new(0xd9e, 0x000, 0x000, 'X'),
    C::new(0xda0, 0xda1, 0x000, 'c'),
    C::new(0xda1, 0xda1, 0x000, 'C'),
    C::new(0xdc0, 0x000, 0x000, 'v'),
    C::new(0xdc0, 0x000, 0x000, 'V'),
    C::new(0xdb6, 0xdb7, 0xdb9, 'b'),
    C::new(0xdb7, 0xdb7, 0xdb9, 'B'),
    C::new(0xdb1, 0x000, 0xd82, 'n'),
    C::new(0xdab, 0x000, 0xd9e, 'N'),
    C::new(0xdb8, 0x000, 0x000, 'm'),
    C::new(0xdb9, 0x000, 0x000, 'M'),
];

type V = VowelDefinition;

const VOWEL_ROWS: [VowelDefinition; 12] = [
    V::new(0xd85, 0xd86, 0xdcf, 0xdcf, 'a'),
    V::new(0xd87, 0xd88, 0xdd0, 0xdd1, 'A'),
    V::new(0xd87, 0xd88, 0xdd0, 0xdd1, 'q'),
    V::new(0xd91, 0xd92, 0xdd9, 0xdda, 'e'),
    V::new(0xd91, 0xd92, 0xdd9, 0xdda, 'E'),
    V::new(0xd89, 0xd8a, 0xdd2, 0xdd3, 'i'),
    V::new(0xd93, 0x000, 0xddb, 0xddb, 'I'),
    V::new(0xd94, 0xd95, 0xddc, 0xddd, 'o'),
    V::new(0xd96, 0x000, 0xdde, 0xddf, 'O'),
    V::new(0xd8b, 0xd8c, 0xdd4, 0xdd6, 'u'),
    V::new(0xd8d, 0xd8e, 0xdd8, 0xdf2, 'U'),
    // Shadowed by the consonant "Z" row when dispatching keys.
    V::new(0xd8f, 0xd90, 0xd8f, 0xd90, 'Z'),
];

/// The 40 consonant rows in declaration order.
pub static CONSONANTS: [ConsonantDefinition; 40] = CONSONANT_ROWS;
/// The 12 vowel rows in declaration order.
pub static VOWELS: [VowelDefinition; 12] = VOWEL_ROWS;

/// ASCII key -> row in `CONSONANTS`.
const CONSONANT_BY_KEY: [u8; 128] = {
    let mut t = [NONE; 128];
    let mut i = 0;
    while i < CONSONANT_ROWS.len() {
        let k = CONSONANT_ROWS[i].key as usize;
        if t[k] == NONE {
            t[k] = i as u8;
        }
        i += 1;
    }
    t
};

/// ASCII key -> row in `VOWELS`.
const VOWEL_BY_KEY: [u8; 128] = {
    let mut t = [NONE; 128];
    let mut i = 0;
    while i < VOWEL_ROWS.len() {
        let k = VOWEL_ROWS[i].key as usize;
        if t[k] == NONE {
            t[k] = i as u8;
        }
        i += 1;
    }
    t
};

/// Sinhala-block code point -> first consonant row able to produce it.
const CONSONANT_BY_OUTPUT: [u8; BLOCK_LEN] = {
    let mut t = [NONE; BLOCK_LEN];
    let mut i = 0;
    while i < CONSONANT_ROWS.len() {
        let row = &CONSONANT_ROWS[i];
        let forms = [Some(row.base), row.aspirated, row.nasalized];
        let mut f = 0;
        while f < forms.len() {
            if let Some(c) = forms[f] {
                let cp = c as u32;
                if cp >= BLOCK_START && cp < BLOCK_START + BLOCK_LEN as u32 {
                    let slot = (cp - BLOCK_START) as usize;
                    if t[slot] == NONE {
                        t[slot] = i as u8;
                    }
                }
            }
            f += 1;
        }
        i += 1;
    }
    t
};

/// What a key press means to the transliteration buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Consonant(&'static ConsonantDefinition),
    Vowel(&'static VowelDefinition),
    Unmapped,
}

/// Consonant keys that act on the unit being composed instead of starting a
/// new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierRole {
    /// `w`: append a virama.
    Virama,
    /// `W`: virama, commit, then continue with a zero-width joiner.
    ViramaJoin,
    /// `H`: switch the base consonant to its aspirated form.
    Aspirate,
    /// `G`: switch the base consonant to its prenasalized form.
    Nasalize,
    /// `R`: virama + ZWJ, commit, continue with "ra".
    Repha,
    /// `Y`: virama + ZWJ, commit, continue with "ya".
    Semivowel,
}

impl ModifierRole {
    pub fn of(consonant: &ConsonantDefinition) -> Option<Self> {
        match consonant.key {
            'w' => Some(Self::Virama),
            'W' => Some(Self::ViramaJoin),
            'H' => Some(Self::Aspirate),
            'G' => Some(Self::Nasalize),
            'R' => Some(Self::Repha),
            'Y' => Some(Self::Semivowel),
            _ => None,
        }
    }
}

/// Classify a key symbol. Consonant rows take precedence over vowel rows.
pub fn classify_key(sym: KeySym) -> KeyClass {
    let KeySym::Char(c) = sym else {
        return KeyClass::Unmapped;
    };
    if !c.is_ascii() {
        return KeyClass::Unmapped;
    }
    let k = c as usize;
    match (CONSONANT_BY_KEY[k], VOWEL_BY_KEY[k]) {
        (NONE, NONE) => KeyClass::Unmapped,
        (NONE, v) => KeyClass::Vowel(&VOWELS[v as usize]),
        (row, _) => KeyClass::Consonant(&CONSONANTS[row as usize]),
    }
}

/// Find the consonant row that produces `c`, first row in table order wins.
pub fn resolve_by_output(c: char) -> Option<&'static ConsonantDefinition> {
    let cp = c as u32;
    if (BLOCK_START..BLOCK_START + BLOCK_LEN as u32).contains(&cp) {
        return match CONSONANT_BY_OUTPUT[(cp - BLOCK_START) as usize] {
            NONE => None,
            row => Some(&CONSONANTS[row as usize]),
        };
    }
    // Only the ZWNJ row produces anything outside the block.
    CONSONANTS
        .iter()
        .find(|row| row.base == c || row.aspirated == Some(c) || row.nasalized == Some(c))
}

/// Range test over the consonant letters of the Sinhala block.
#[inline(always)]
pub fn is_consonant_letter(c: char) -> bool {
    (CONSONANT_FIRST..=CONSONANT_LAST).contains(&c)
}

/// Vowel-cluster correction: `last` is ආ or ඇ and the incoming key is `a`.
pub(crate) fn corrects_to_next(last: char, vowel: &VowelDefinition) -> bool {
    (last == LONG_AA || last == AE) && vowel.key == 'a'
}
