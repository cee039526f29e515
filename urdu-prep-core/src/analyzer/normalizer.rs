//! Urdu script normalizer.
//!
//! First stage of the pipeline. Maps one raw string to one normalized string:
//!
//! 1. Deletes Arabic/Urdu combining marks (harakat and Quranic annotation signs)
//! 2. Maps Hamza/Wasla Alef variants to plain Alef (`ا`)
//! 3. Maps Arabic Yeh, Alef Maksura and Hamza-Yeh to Urdu Yeh (`ی`)
//! 4. Deletes zero-width non-joiner and zero-width joiner
//! 5. Maps curly and low-9 quotes to ASCII `'` and `"`
//! 6. Maps `…` to `...`, en/em dashes to `-`, backtick to `'`
//! 7. Trims leading and trailing whitespace
//!
//! No rule produces a character that another rule consumes, so a single
//! forward scan through [`fold_char`] is equivalent to applying the rules in
//! order. The same property makes normalization idempotent.

/// Every combining mark deleted by rule 1.
#[rustfmt::skip]
pub const DIACRITICS: [char; 52] = [
    '\u{0610}', '\u{0611}', '\u{0612}', '\u{0613}', '\u{0614}', '\u{0615}', '\u{0616}',
    '\u{0617}', '\u{0618}', '\u{0619}', '\u{061A}', '\u{064B}', '\u{064C}', '\u{064D}',
    '\u{064E}', '\u{064F}', '\u{0650}', '\u{0651}', '\u{0652}', '\u{0653}', '\u{0654}',
    '\u{0655}', '\u{0656}', '\u{0657}', '\u{0658}', '\u{0659}', '\u{065A}', '\u{065B}',
    '\u{065C}', '\u{065D}', '\u{065E}', '\u{065F}', '\u{0670}', '\u{06D6}', '\u{06D7}',
    '\u{06D8}', '\u{06D9}', '\u{06DA}', '\u{06DB}', '\u{06DC}', '\u{06DF}', '\u{06E0}',
    '\u{06E1}', '\u{06E2}', '\u{06E3}', '\u{06E4}', '\u{06E7}', '\u{06E8}', '\u{06EA}',
    '\u{06EB}', '\u{06EC}', '\u{06ED}',
];

const ALEF: char = '\u{0627}';
const URDU_YEH: char = '\u{06CC}';

/// Configuration options for Urdu normalization.
///
/// Every rule group is on by default; the default configuration is the full
/// seven-step normalization. Trimming cannot be switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Delete combining marks listed in [`DIACRITICS`].
    pub strip_diacritics: bool,
    /// Unify Alef and Yeh letterform variants.
    pub unify_letterforms: bool,
    /// Delete ZWNJ (U+200C) and ZWJ (U+200D).
    pub strip_joiners: bool,
    /// Map typographic quotes, ellipsis, dashes and backtick to ASCII.
    pub ascii_punctuation: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            strip_diacritics: true,
            unify_letterforms: true,
            strip_joiners: true,
            ascii_punctuation: true,
        }
    }
}

/// Outcome of folding one input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// Emit this character.
    Char(char),
    /// Emit nothing.
    Drop,
    /// Emit this ASCII string.
    Expand(&'static str),
}

/// Returns `true` for characters in [`DIACRITICS`].
#[inline(always)]
pub const fn is_diacritic(c: char) -> bool {
    matches!(
        c,
        '\u{0610}'..='\u{061A}'
            | '\u{064B}'..='\u{065F}'
            | '\u{0670}'
            | '\u{06D6}'..='\u{06DC}'
            | '\u{06DF}'..='\u{06E4}'
            | '\u{06E7}'
            | '\u{06E8}'
            | '\u{06EA}'..='\u{06ED}'
    )
}

/// Folds a single character under `config`.
#[inline(always)]
pub fn fold_char(c: char, config: &NormalizerConfig) -> Fold {
    if c.is_ascii() {
        return if c == '`' && config.ascii_punctuation {
            Fold::Char('\'')
        } else {
            Fold::Char(c)
        };
    }

    if config.strip_diacritics && is_diacritic(c) {
        return Fold::Drop;
    }

    if config.unify_letterforms {
        match c {
            // أ إ ٱ
            '\u{0623}' | '\u{0625}' | '\u{0671}' => return Fold::Char(ALEF),
            // ي ى ئ
            '\u{064A}' | '\u{0649}' | '\u{0626}' => return Fold::Char(URDU_YEH),
            _ => {}
        }
    }

    if config.strip_joiners && matches!(c, '\u{200C}' | '\u{200D}') {
        return Fold::Drop;
    }

    if config.ascii_punctuation {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' => return Fold::Char('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' => return Fold::Char('"'),
            '\u{2026}' => return Fold::Expand("..."),
            '\u{2013}' | '\u{2014}' => return Fold::Char('-'),
            _ => {}
        }
    }

    Fold::Char(c)
}

/// Urdu text normalizer.
///
/// Total and deterministic: every input, including the empty string,
/// produces an output, and the same input always produces the same output.
///
/// # Examples
///
/// ```
/// use urdu_prep_core::analyzer::normalizer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("  أحمد  "), "احمد");
/// assert_eq!(normalizer.normalize("\u{2018}hello\u{2019}"), "'hello'");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer first and reuses its capacity when sufficient.
    #[inline]
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        for c in input.chars() {
            match fold_char(c, &self.config) {
                Fold::Char(folded) => out.push(folded),
                Fold::Drop => {}
                Fold::Expand(s) => out.push_str(s),
            }
        }

        trim_in_place(out);
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }

    /// Normalizes an optional field; a missing value becomes `""`.
    #[inline]
    pub fn normalize_opt(&self, input: Option<&str>) -> String {
        input.map(|s| self.normalize(s)).unwrap_or_default()
    }
}

fn trim_in_place(s: &mut String) {
    let end = s.trim_end().len();
    s.truncate(end);
    let start = s.len() - s.trim_start().len();
    if start > 0 {
        s.drain(..start);
    }
}
