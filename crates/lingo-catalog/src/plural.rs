//! Cardinal plural rules and per-category message forms.
//!
//! Rules follow the CLDR cardinal categories for integer operands. Negative
//! counts are categorized by absolute value.

use std::fmt;

/// CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Few,
        Self::Many,
        Self::Other,
    ];

    /// Lowercase CLDR keyword (`"one"`, `"other"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// Parse a CLDR keyword, case-insensitively.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cat| cat.as_str().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translated forms of one message, keyed by plural category.
///
/// Every form is optional so that catalogs can be partial; [`form`] is the
/// strict accessor and [`select`] the lenient one.
///
/// [`form`]: PluralForms::form
/// [`select`]: PluralForms::select
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralForms {
    pub zero: Option<String>,
    pub one: Option<String>,
    pub two: Option<String>,
    pub few: Option<String>,
    pub many: Option<String>,
    pub other: Option<String>,
}

impl PluralForms {
    /// Forms with just `one` and `other`, the shape most languages need.
    #[must_use]
    pub fn one_other(one: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            one: Some(one.into()),
            other: Some(other.into()),
            ..Self::default()
        }
    }

    /// The form for exactly `category`, if present.
    #[must_use]
    pub fn form(&self, category: PluralCategory) -> Option<&str> {
        let slot = match category {
            PluralCategory::Zero => &self.zero,
            PluralCategory::One => &self.one,
            PluralCategory::Two => &self.two,
            PluralCategory::Few => &self.few,
            PluralCategory::Many => &self.many,
            PluralCategory::Other => &self.other,
        };
        slot.as_deref()
    }

    /// Mutable slot for `category`.
    pub fn slot_mut(&mut self, category: PluralCategory) -> &mut Option<String> {
        match category {
            PluralCategory::Zero => &mut self.zero,
            PluralCategory::One => &mut self.one,
            PluralCategory::Two => &mut self.two,
            PluralCategory::Few => &mut self.few,
            PluralCategory::Many => &mut self.many,
            PluralCategory::Other => &mut self.other,
        }
    }

    /// The form for `category`, falling back to `other`, then to the first
    /// form present. Empty only when no form is present at all.
    #[must_use]
    pub fn select(&self, category: PluralCategory) -> &str {
        self.form(category)
            .or(self.other.as_deref())
            .or_else(|| {
                PluralCategory::ALL
                    .into_iter()
                    .find_map(|cat| self.form(cat))
            })
            .unwrap_or("")
    }

    /// Whether any category other than `other` is populated.
    #[must_use]
    pub fn is_plural(&self) -> bool {
        self.zero.is_some()
            || self.one.is_some()
            || self.two.is_some()
            || self.few.is_some()
            || self.many.is_some()
    }

    /// Whether no form at all is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.is_plural() && self.other.is_none()
    }
}

/// Cardinal plural rule for a language family.
#[derive(Debug, Clone, Copy)]
pub enum PluralRule {
    /// one: n = 1; other. English, German, Dutch, Spanish, Italian, ...
    English,
    /// one: n = 0..1; other. French, Portuguese (Brazil), Hindi, ...
    French,
    /// one / few / many. Russian, Ukrainian, Belarusian, Serbian, Croatian, ...
    Russian,
    /// one: n = 1; few; many. Polish.
    Polish,
    /// one: n = 1; few: n = 2..4; other. Czech, Slovak.
    Czech,
    /// zero / one / two / few / many / other.
    Arabic,
    /// other only. Chinese, Japanese, Korean, Vietnamese, Thai, ...
    CJK,
    /// Caller-supplied rule.
    Custom(fn(u64) -> PluralCategory),
}

impl PartialEq for PluralRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for PluralRule {}

impl PluralRule {
    /// Pick the rule for a locale tag by its primary language subtag.
    ///
    /// Unknown or malformed tags use [`PluralRule::English`].
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let primary = locale
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match primary.as_str() {
            "fr" | "hi" | "bn" | "fa" | "am" | "zu" | "hy" | "pt" => Self::French,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::Russian,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::Czech,
            "ar" => Self::Arabic,
            "zh" | "ja" | "ko" | "vi" | "th" | "id" | "ms" | "lo" | "my" | "km" => Self::CJK,
            _ => Self::English,
        }
    }

    /// Categorize a count.
    #[must_use]
    pub fn categorize(self, count: i64) -> PluralCategory {
        let n = count.unsigned_abs();
        match self {
            Self::English => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::French => {
                if n <= 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::Russian => {
                let (m10, m100) = (n % 10, n % 100);
                if m10 == 1 && m100 != 11 {
                    PluralCategory::One
                } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Self::Polish => {
                let (m10, m100) = (n % 10, n % 100);
                if n == 1 {
                    PluralCategory::One
                } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Self::Czech => match n {
                1 => PluralCategory::One,
                2..=4 => PluralCategory::Few,
                _ => PluralCategory::Other,
            },
            Self::Arabic => {
                let m100 = n % 100;
                match n {
                    0 => PluralCategory::Zero,
                    1 => PluralCategory::One,
                    2 => PluralCategory::Two,
                    _ if (3..=10).contains(&m100) => PluralCategory::Few,
                    _ if (11..=99).contains(&m100) => PluralCategory::Many,
                    _ => PluralCategory::Other,
                }
            }
            Self::CJK => PluralCategory::Other,
            Self::Custom(rule) => rule(n),
        }
    }
}
