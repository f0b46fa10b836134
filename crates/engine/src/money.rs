use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use crate::EngineError;

/// Signed money amount represented as **integer céntimos**.
///
/// Use this type for **all** monetary values (transaction amounts, budget
/// limits, aggregate totals) to avoid floating-point drift. Text conversion
/// follows the grouped-thousands/comma-decimal convention used across the
/// app: `1.234.567,89`.
///
/// The value is signed:
/// - positive = income / increase
/// - negative = expense / decrease
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(1_234_567_89);
/// assert_eq!(amount.format_text(), "1.234.567,89");
/// assert_eq!(Money::parse_text("1.234.567,89"), amount);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer céntimos.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in céntimos.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Saturating addition. Aggregation over untrusted row sets must not wrap.
    #[must_use]
    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// Formats the amount in the grouped text convention: optional `-` sign,
    /// integer part in 3-digit clusters joined by `.`, two fractional digits
    /// after `,`.
    ///
    /// ```rust
    /// use engine::Money;
    ///
    /// assert_eq!(Money::new(0).format_text(), "0,00");
    /// assert_eq!(Money::new(-10_50).format_text(), "-10,50");
    /// ```
    #[must_use]
    pub fn format_text(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = (abs / 100).to_string();
        let cents = abs % 100;
        format!("{sign}{},{cents:02}", group_thousands(&whole))
    }

    /// Fail-soft parse of free-form amount text into céntimos.
    ///
    /// This runs on every keystroke and on redisplay, so it is total: it never
    /// errors and never panics. Every character that is not a digit, `,`, `.`
    /// or `-` is stripped; all `.` are treated as thousands separators and
    /// removed; the first `,` becomes the decimal separator; parsing stops at
    /// the first character that no longer fits a decimal number. Fractional
    /// digits beyond the second round half-away-from-zero. Empty or
    /// unparseable input yields [`Money::ZERO`]; out-of-range input saturates.
    ///
    /// Pair with [`is_valid_text`] at the form level so a silent zero never
    /// reaches storage for a field the user believes is populated.
    ///
    /// ```rust
    /// use engine::Money;
    ///
    /// assert_eq!(Money::parse_text("1.234.567,89").cents(), 1_234_567_89);
    /// assert_eq!(Money::parse_text(""), Money::ZERO);
    /// assert_eq!(Money::parse_text("abc"), Money::ZERO);
    /// ```
    #[must_use]
    pub fn parse_text(input: &str) -> Money {
        let cleaned: String = input
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
            .collect();
        // '.' only ever groups thousands in this convention.
        let cleaned = cleaned.replace('.', "");

        let mut rest = cleaned.as_str();
        let negative = if let Some(stripped) = rest.strip_prefix('-') {
            rest = stripped;
            true
        } else {
            false
        };

        let int_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_digits, tail) = rest.split_at(int_end);

        let mut frac_digits = "";
        if let Some(stripped) = tail.strip_prefix(',') {
            let frac_end = stripped
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(stripped.len());
            frac_digits = &stripped[..frac_end];
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Money::ZERO;
        }

        let mut whole: i128 = 0;
        for d in int_digits.bytes() {
            whole = whole * 10 + i128::from(d - b'0');
            if whole > i128::from(i64::MAX) {
                return Money(if negative { i64::MIN } else { i64::MAX });
            }
        }

        let mut frac = frac_digits.bytes().map(|d| i128::from(d - b'0'));
        let cents = frac.next().unwrap_or(0) * 10
            + frac.next().unwrap_or(0)
            + i128::from(frac.next().is_some_and(|d| d >= 5));

        let total = whole.saturating_mul(100).saturating_add(cents);
        let total = if negative { -total } else { total };
        Money(total.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", crate::Currency::Crc.symbol(), self.format_text())
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Strict commit-time parse: the text must pass [`is_valid_text`] and must
    /// not be one of the incomplete mid-edit states (`""`, `","`, `"."`).
    ///
    /// Use this when an amount leaves an input field for good (CLI arguments,
    /// form submission). The keystroke path goes through the fail-soft
    /// [`Money::parse_text`] instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "," || trimmed == "." || !is_valid_text(trimmed) {
            return Err(EngineError::InvalidAmount(format!(
                "invalid amount text: {s:?}"
            )));
        }
        Ok(Money::parse_text(trimmed))
    }
}

/// Strict grammar gate for amount text.
///
/// Accepts the empty string and a lone `,` or `.` as incomplete-but-valid
/// mid-edit states. Anything else must match: 1–3 leading digits (a leading
/// `0` only as the sole integer digit), zero or more `.`-prefixed groups of
/// exactly 3 digits, then optionally `,` followed by 0–2 digits.
///
/// ```rust
/// use engine::is_valid_text;
///
/// assert!(is_valid_text("1.234.567,89"));
/// assert!(!is_valid_text("1.23.456"));
/// assert!(is_valid_text(""));
/// assert!(is_valid_text(","));
/// ```
#[must_use]
pub fn is_valid_text(text: &str) -> bool {
    if text.is_empty() || text == "," || text == "." {
        return true;
    }

    let (int_part, frac_part) = match text.split_once(',') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };

    // A second ',' lands in frac_part and fails the digit check.
    if let Some(frac) = frac_part
        && (frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()))
    {
        return false;
    }

    let mut groups = int_part.split('.');
    let Some(head) = groups.next() else {
        return false;
    };
    if head.is_empty()
        || head.len() > 3
        || !head.bytes().all(|b| b.is_ascii_digit())
        || (head.len() > 1 && head.starts_with('0'))
    {
        return false;
    }
    groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

/// Reshapes in-progress amount text after every keystroke.
///
/// Keeps the field in a state [`is_valid_text`] accepts: strips disallowed
/// characters, collapses separator runs, keeps only the first `,` as decimal
/// separator (discarding fractional groups beyond the second one typed),
/// drops redundant leading zeros, regroups the integer part into 3-digit
/// clusters and truncates (never rounds) the fraction at 2 digits.
///
/// Idempotent: `reshape_input(&reshape_input(s)) == reshape_input(s)`.
#[must_use]
pub fn reshape_input(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_digit() || (matches!(c, '.' | ',') && !cleaned.ends_with(c)) {
            cleaned.push(c);
        }
    }

    let (int_raw, frac) = match cleaned.split_once(',') {
        None => (cleaned.as_str(), None),
        Some((int_raw, tail)) => {
            // Only the first ',' separates decimals; later groups are noise.
            let frac = tail.split([',', '.']).next().unwrap_or("");
            (int_raw, Some(&frac[..frac.len().min(2)]))
        }
    };

    let digits: String = int_raw.chars().filter(char::is_ascii_digit).collect();
    let significant = digits.trim_start_matches('0');
    let int_part = if significant.is_empty() {
        // "007" -> "0"; ",5" -> "0,5"; lone "," keeps its empty integer part.
        if !digits.is_empty() || frac.is_some_and(|f| !f.is_empty()) {
            "0".to_string()
        } else {
            String::new()
        }
    } else {
        group_thousands(significant)
    };

    match frac {
        Some(frac) => format!("{int_part},{frac}"),
        None => int_part,
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
