//! Rendering violation messages.
//!
//! A [`MessageFormatter`] turns a message key, its default format and the
//! violation arguments into text. Formats use positional placeholders:
//! `{0}` is the field name, the predicate's own arguments follow, and the
//! violated value comes last.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use verdict::{Locale, MessageFormatter, SimpleMessageFormatter};
//!
//! let text = SimpleMessageFormatter.format(
//!     "numeric.greaterThanOrEqual",
//!     "\"{0}\" must be greater than or equal to {1}",
//!     &[json!("age"), json!(0), json!(-1)],
//!     &Locale::root(),
//! );
//! assert_eq!(text, "\"age\" must be greater than or equal to 0");
//! ```

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;

/// A language tag such as `en`, `ja-JP`, or the root (empty) locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Locale(String);

impl Locale {
    /// Creates a locale from a tag. Both `-` and `_` are accepted as separators.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().replace('_', "-"))
    }

    /// The root locale, used when nothing more specific matches.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the full tag.
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Returns the language part of the tag (`ja` for `ja-JP`).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// Returns true for the root locale.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the next less specific locale: `ja-JP` to `ja`, `ja` to root.
    pub fn parent(&self) -> Option<Locale> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('-') {
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => Some(Self::root()),
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Renders a violation message.
///
/// Implementations must be thread-safe; a validator shares its formatter
/// with every violation it produces. Any
/// `Fn(&str, &str, &[Value], &Locale) -> String` closure is a formatter.
pub trait MessageFormatter: Send + Sync {
    /// Formats a message from its key, default format, arguments and locale.
    fn format(
        &self,
        message_key: &str,
        default_message_format: &str,
        args: &[Value],
        locale: &Locale,
    ) -> String;
}

impl<F> MessageFormatter for F
where
    F: Fn(&str, &str, &[Value], &Locale) -> String + Send + Sync,
{
    fn format(
        &self,
        message_key: &str,
        default_message_format: &str,
        args: &[Value],
        locale: &Locale,
    ) -> String {
        self(message_key, default_message_format, args, locale)
    }
}

/// Substitutes `{n}` placeholders in the default format.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMessageFormatter;

impl MessageFormatter for SimpleMessageFormatter {
    fn format(&self, _: &str, default_message_format: &str, args: &[Value], _: &Locale) -> String {
        interpolate(default_message_format, args)
    }
}

/// Looks up per-locale message formats by key.
///
/// Lookup walks from the requested locale towards the root (`ja-JP`, then
/// `ja`, then root) and falls back to the violation's default format.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{BundleMessageFormatter, Locale, MessageFormatter};
///
/// let formatter = BundleMessageFormatter::new()
///     .with_message(Locale::new("ja"), "object.notNull", "「{0}」が未入力です");
///
/// let text = formatter.format(
///     "object.notNull",
///     "\"{0}\" must not be null",
///     &[json!("name"), json!(null)],
///     &Locale::new("ja-JP"),
/// );
/// assert_eq!(text, "「name」が未入力です");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BundleMessageFormatter {
    bundles: IndexMap<Locale, IndexMap<String, String>>,
}

impl BundleMessageFormatter {
    /// Creates a formatter with no bundles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one message format for a locale.
    pub fn with_message(
        mut self,
        locale: Locale,
        message_key: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        self.bundles
            .entry(locale)
            .or_default()
            .insert(message_key.into(), format.into());
        self
    }

    /// Registers several message formats for a locale.
    pub fn with_messages<K, V>(mut self, locale: Locale, messages: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let bundle = self.bundles.entry(locale).or_default();
        for (key, format) in messages {
            bundle.insert(key.into(), format.into());
        }
        self
    }

    /// Finds the most specific format registered for `message_key`.
    pub fn lookup(&self, message_key: &str, locale: &Locale) -> Option<&str> {
        let mut current = Some(locale.clone());
        while let Some(candidate) = current {
            let found = self
                .bundles
                .get(&candidate)
                .and_then(|bundle| bundle.get(message_key));
            if let Some(format) = found {
                return Some(format.as_str());
            }
            current = candidate.parent();
        }
        None
    }
}

impl MessageFormatter for BundleMessageFormatter {
    fn format(
        &self,
        message_key: &str,
        default_message_format: &str,
        args: &[Value],
        locale: &Locale,
    ) -> String {
        let format = self
            .lookup(message_key, locale)
            .unwrap_or(default_message_format);
        interpolate(format, args)
    }
}

/// Renders one message argument. Strings appear without quotes.
pub fn render_arg(arg: &Value) -> String {
    match arg {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_arg).collect();
            format!("[{}]", rendered.join(", "))
        }
        other => other.to_string(),
    }
}

/// Replaces every `{n}` in `format` with the rendered `args[n]`.
///
/// Placeholders without a matching argument are left as written.
pub(crate) fn interpolate(format: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after.find('}').and_then(|close| {
            let arg = after[..close].parse::<usize>().ok().and_then(|i| args.get(i))?;
            Some((arg, close))
        });
        match placeholder {
            Some((arg, close)) => {
                out.push_str(&render_arg(arg));
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpolate_positional() {
        let args = [json!("name"), json!(3), json!("ab")];
        assert_eq!(
            interpolate("The size of \"{0}\" must be greater than or equal to {1}. The given size is {2}", &args),
            "The size of \"name\" must be greater than or equal to 3. The given size is ab"
        );
    }

    #[test]
    fn test_interpolate_leaves_unknown_placeholders() {
        let args = [json!("x")];
        assert_eq!(interpolate("{0} {1} {x} {", &args), "x {1} {x} {");
    }

    #[test]
    fn test_render_arg() {
        assert_eq!(render_arg(&json!(null)), "null");
        assert_eq!(render_arg(&json!(1.5)), "1.5");
        assert_eq!(render_arg(&json!(["a", 1])), "[a, 1]");
        assert_eq!(render_arg(&json!(true)), "true");
    }

    #[test]
    fn test_locale_parent_chain() {
        let locale = Locale::new("ja_JP");
        assert_eq!(locale.tag(), "ja-JP");
        assert_eq!(locale.language(), "ja");
        let parent = locale.parent().unwrap();
        assert_eq!(parent, Locale::new("ja"));
        assert_eq!(parent.parent(), Some(Locale::root()));
        assert_eq!(Locale::root().parent(), None);
    }

    #[test]
    fn test_bundle_falls_back_to_default_format() {
        let formatter = BundleMessageFormatter::new().with_message(
            Locale::new("ja"),
            "object.notNull",
            "「{0}」が未入力です",
        );
        let text = formatter.format(
            "object.isNull",
            "\"{0}\" must be null",
            &[json!("name")],
            &Locale::new("ja"),
        );
        assert_eq!(text, "\"name\" must be null");
    }

    #[test]
    fn test_bundle_prefers_most_specific_locale() {
        let formatter = BundleMessageFormatter::new()
            .with_message(Locale::root(), "k", "root {0}")
            .with_messages(Locale::new("en"), [("k", "en {0}")])
            .with_message(Locale::new("en-GB"), "k", "en-GB {0}");

        let args = [json!("v")];
        assert_eq!(formatter.format("k", "", &args, &Locale::new("en-GB")), "en-GB v");
        assert_eq!(formatter.format("k", "", &args, &Locale::new("en-US")), "en v");
        assert_eq!(formatter.format("k", "", &args, &Locale::new("fr")), "root v");
    }

    #[test]
    fn test_closure_formatter() {
        let upper = |key: &str, _: &str, _: &[Value], _: &Locale| key.to_uppercase();
        assert_eq!(upper.format("a.b", "", &[], &Locale::root()), "A.B");
    }
}
