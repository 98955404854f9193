//! Hangul syllable arithmetic, initial-consonant (Chosung) extraction and
//! composition of Dubeolsik keystrokes typed on a QWERTY layout.
//!
//! A precomposed syllable is `0xAC00 + (L * 21 + V) * 28 + T` where `L`,
//! `V` and `T` index the 19 initials, 21 medials and 27 finals (plus "no
//! final"). Jamo are exchanged as Hangul Compatibility Jamo (U+3131..U+3163),
//! which is what a Korean IME emits for a lone consonant or vowel.

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const MEDIAL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

const CONSONANT_JAMO_FIRST: char = '\u{3131}';
const CONSONANT_JAMO_LAST: char = '\u{314E}';
const VOWEL_JAMO_FIRST: char = '\u{314F}';
const VOWEL_JAMO_LAST: char = '\u{3163}';

/// Initial consonants in syllable-block order.
pub const INITIALS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Medial vowels in syllable-block order.
pub const MEDIALS: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Final consonants in syllable-block order; index 0 of the block means
/// "no final", so `FINALS[i]` has block index `i + 1`.
pub const FINALS: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅁ',
    'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

pub fn is_syllable(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

pub fn is_consonant_jamo(c: char) -> bool {
    (CONSONANT_JAMO_FIRST..=CONSONANT_JAMO_LAST).contains(&c)
}

pub fn is_vowel_jamo(c: char) -> bool {
    (VOWEL_JAMO_FIRST..=VOWEL_JAMO_LAST).contains(&c)
}

/// Syllable or compatibility jamo.
pub fn is_hangul(c: char) -> bool {
    is_syllable(c) || is_consonant_jamo(c) || is_vowel_jamo(c)
}

pub fn contains_hangul(s: &str) -> bool {
    s.chars().any(is_hangul)
}

// ---------------------------------------------------------------------------
// Syllable decomposition
// ---------------------------------------------------------------------------

/// The jamo of one precomposed syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    pub initial: char,
    pub medial: char,
    pub final_consonant: Option<char>,
}

pub fn decompose(c: char) -> Option<Syllable> {
    if !is_syllable(c) {
        return None;
    }
    let offset = c as u32 - SYLLABLE_BASE;
    let initial = offset / (MEDIAL_COUNT * FINAL_COUNT);
    let medial = (offset % (MEDIAL_COUNT * FINAL_COUNT)) / FINAL_COUNT;
    let final_index = offset % FINAL_COUNT;

    Some(Syllable {
        initial: INITIALS[initial as usize],
        medial: MEDIALS[medial as usize],
        final_consonant: match final_index {
            0 => None,
            i => Some(FINALS[(i - 1) as usize]),
        },
    })
}

/// Build a precomposed syllable. Returns `None` if any jamo cannot occupy
/// its position (e.g. `ㄸ` as a final).
pub fn compose(initial: char, medial: char, final_consonant: Option<char>) -> Option<char> {
    let l = INITIALS.iter().position(|&j| j == initial)? as u32;
    let v = MEDIALS.iter().position(|&j| j == medial)? as u32;
    let t = match final_consonant {
        None => 0,
        Some(f) => FINALS.iter().position(|&j| j == f)? as u32 + 1,
    };
    char::from_u32(SYLLABLE_BASE + (l * MEDIAL_COUNT + v) * FINAL_COUNT + t)
}

// ---------------------------------------------------------------------------
// Chosung
// ---------------------------------------------------------------------------

/// Initial consonant of a syllable; a lone consonant jamo is its own
/// initial.
pub fn chosung(c: char) -> Option<char> {
    if let Some(syllable) = decompose(c) {
        return Some(syllable.initial);
    }
    is_consonant_jamo(c).then_some(c)
}

/// Reduce `s` to its initial consonants.
///
/// Whitespace is kept so word boundaries survive; every other non-Hangul
/// character and every lone vowel is dropped.
///
/// ```
/// use bitmap_core::hangul::extract_chosung;
/// assert_eq!(extract_chosung("리듬 게임"), "ㄹㄷ ㄱㅇ");
/// assert_eq!(extract_chosung("액션RPG"), "ㅇㅅ");
/// ```
pub fn extract_chosung(s: &str) -> String {
    s.chars()
        .filter_map(|c| if c.is_whitespace() { Some(c) } else { chosung(c) })
        .collect()
}

// ---------------------------------------------------------------------------
// QWERTY composition
// ---------------------------------------------------------------------------

/// Jamo produced by a key on the standard Dubeolsik layout.
///
/// Shifted `Q W E R T O P` give the tense consonants and `ㅒ ㅖ`; any other
/// upper-case letter types the same jamo as its lower-case key.
pub fn qwerty_to_jamo(key: char) -> Option<char> {
    let jamo = match key {
        'Q' => 'ㅃ',
        'W' => 'ㅉ',
        'E' => 'ㄸ',
        'R' => 'ㄲ',
        'T' => 'ㅆ',
        'O' => 'ㅒ',
        'P' => 'ㅖ',
        _ => match key.to_ascii_lowercase() {
            'q' => 'ㅂ',
            'w' => 'ㅈ',
            'e' => 'ㄷ',
            'r' => 'ㄱ',
            't' => 'ㅅ',
            'y' => 'ㅛ',
            'u' => 'ㅕ',
            'i' => 'ㅑ',
            'o' => 'ㅐ',
            'p' => 'ㅔ',
            'a' => 'ㅁ',
            's' => 'ㄴ',
            'd' => 'ㅇ',
            'f' => 'ㄹ',
            'g' => 'ㅎ',
            'h' => 'ㅗ',
            'j' => 'ㅓ',
            'k' => 'ㅏ',
            'l' => 'ㅣ',
            'z' => 'ㅋ',
            'x' => 'ㅌ',
            'c' => 'ㅊ',
            'v' => 'ㅍ',
            'b' => 'ㅠ',
            'n' => 'ㅜ',
            'm' => 'ㅡ',
            _ => return None,
        },
    };
    Some(jamo)
}

fn compound_vowel(first: char, second: char) -> Option<char> {
    match (first, second) {
        ('ㅗ', 'ㅏ') => Some('ㅘ'),
        ('ㅗ', 'ㅐ') => Some('ㅙ'),
        ('ㅗ', 'ㅣ') => Some('ㅚ'),
        ('ㅜ', 'ㅓ') => Some('ㅝ'),
        ('ㅜ', 'ㅔ') => Some('ㅞ'),
        ('ㅜ', 'ㅣ') => Some('ㅟ'),
        ('ㅡ', 'ㅣ') => Some('ㅢ'),
        _ => None,
    }
}

fn compound_final(first: char, second: char) -> Option<char> {
    match (first, second) {
        ('ㄱ', 'ㅅ') => Some('ㄳ'),
        ('ㄴ', 'ㅈ') => Some('ㄵ'),
        ('ㄴ', 'ㅎ') => Some('ㄶ'),
        ('ㄹ', 'ㄱ') => Some('ㄺ'),
        ('ㄹ', 'ㅁ') => Some('ㄻ'),
        ('ㄹ', 'ㅂ') => Some('ㄼ'),
        ('ㄹ', 'ㅅ') => Some('ㄽ'),
        ('ㄹ', 'ㅌ') => Some('ㄾ'),
        ('ㄹ', 'ㅍ') => Some('ㄿ'),
        ('ㄹ', 'ㅎ') => Some('ㅀ'),
        ('ㅂ', 'ㅅ') => Some('ㅄ'),
        _ => None,
    }
}

fn can_be_final(c: char) -> bool {
    FINALS.contains(&c)
}

/// Incremental syllable builder fed one jamo at a time, the way an IME
/// assembles keystrokes.
#[derive(Default)]
struct Assembler {
    out: String,
    initial: Option<char>,
    medial: Option<char>,
    /// Up to two consonants; two only when they form a compound final.
    finals: Vec<char>,
}

impl Assembler {
    fn push_consonant(&mut self, c: char) {
        if self.initial.is_some() && self.medial.is_some() {
            let fits = match self.finals.as_slice() {
                [] => can_be_final(c),
                [first] => compound_final(*first, c).is_some(),
                _ => false,
            };
            if fits {
                self.finals.push(c);
                return;
            }
        }
        self.flush();
        self.initial = Some(c);
    }

    fn push_vowel(&mut self, v: char) {
        match (self.initial, self.medial) {
            (Some(_), None) | (None, None) => self.medial = Some(v),
            (_, Some(m)) if self.finals.is_empty() => match compound_vowel(m, v) {
                Some(compound) => self.medial = Some(compound),
                None => {
                    self.flush();
                    self.medial = Some(v);
                }
            },
            _ => {
                // The last final consonant becomes the next syllable's initial.
                let moved = self.finals.pop();
                self.flush();
                self.initial = moved;
                self.medial = Some(v);
            }
        }
    }

    fn push_other(&mut self, c: char) {
        self.flush();
        self.out.push(c);
    }

    fn flush(&mut self) {
        let final_consonant = match self.finals.as_slice() {
            [] => None,
            [only] => Some(*only),
            [first, second, ..] => compound_final(*first, *second),
        };
        match (self.initial, self.medial) {
            (Some(i), Some(m)) => match compose(i, m, final_consonant) {
                Some(syllable) => self.out.push(syllable),
                None => {
                    self.out.push(i);
                    self.out.push(m);
                    self.out.extend(self.finals.iter());
                }
            },
            (Some(i), None) => self.out.push(i),
            (None, Some(m)) => self.out.push(m),
            (None, None) => {}
        }
        self.initial = None;
        self.medial = None;
        self.finals.clear();
    }

    fn finish(mut self) -> String {
        self.flush();
        self.out
    }
}

/// Compose Hangul from text typed with a Korean 2-set layout while the
/// input method was set to Latin.
///
/// Characters that are not layout keys pass through unchanged. Returns an
/// empty string when no character maps to a key.
///
/// ```
/// use bitmap_core::hangul::compose_qwerty;
/// assert_eq!(compose_qwerty("dortjs"), "액션");
/// assert_eq!(compose_qwerty("gksrmf 2"), "한글 2");
/// assert_eq!(compose_qwerty("123"), "");
/// ```
pub fn compose_qwerty(input: &str) -> String {
    if !input.chars().any(|c| qwerty_to_jamo(c).is_some()) {
        return String::new();
    }

    let mut assembler = Assembler::default();
    for c in input.chars() {
        match qwerty_to_jamo(c) {
            Some(j) if is_vowel_jamo(j) => assembler.push_vowel(j),
            Some(j) => assembler.push_consonant(j),
            None => assembler.push_other(c),
        }
    }
    assembler.finish()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
