//! # Localization
//!
//! Bilingual (English/Arabic) message table for every string the kiosk shows.
//!
//! The [`LocalizationTable`] is immutable once built and shared behind an
//! `Arc`. A [`Localizer`] pairs it with the active [`Language`].
//!
//! Templates use `{name}` placeholders; `{{` and `}}` are literal braces.
//! A key missing from the table resolves to the key itself.

use crate::error::{I18nError, I18nResult, InputError};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Supported languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    /// Tag the buyer types at the language prompt
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Arabic => "arabic",
        }
    }

    /// Short tag (ISO 639-1)
    pub fn short_tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Affirmative answer in this language
    pub fn yes_token(&self) -> &'static str {
        match self {
            Language::English => "yes",
            Language::Arabic => "نعم",
        }
    }

    /// Negative answer in this language
    pub fn no_token(&self) -> &'static str {
        match self {
            Language::English => "no",
            Language::Arabic => "لا",
        }
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.tag() == tag || l.short_tag() == tag)
            .ok_or(I18nError::UnsupportedLanguage { tag })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parse a yes/no answer.
///
/// Tokens of every supported language are accepted whatever language is
/// active, so an Arabic speaker can answer `نعم` on the English screens.
pub fn parse_yes_no(input: &str) -> Result<bool, InputError> {
    let answer = input.trim().to_lowercase();
    if Language::ALL.iter().any(|l| l.yes_token() == answer) {
        Ok(true)
    } else if Language::ALL.iter().any(|l| l.no_token() == answer) {
        Ok(false)
    } else {
        Err(InputError::InvalidYesNo {
            input: input.trim().to_string(),
        })
    }
}

const ENGLISH: &[(&str, &str)] = &[
    ("welcome", "Welcome to Luna's Vending Machine!"),
    ("language_prompt", "Select language (english/arabic): "),
    (
        "invalid_language",
        "Invalid language choice. Please select either 'english' or 'arabic'.",
    ),
    ("language_hint", "(type 'lang' to change the language)"),
    ("menu_header", "--- VENDING MACHINE MENU ---"),
    ("category_header", "{category} category:"),
    ("stock", "Stock: {stock}"),
    ("sold_out_tag", "SOLD OUT"),
    ("select_product", "Enter the number of the product you want: "),
    ("invalid_choice", "Invalid product number. Please try again."),
    ("sold_out", "Sorry, {product} is SOLD OUT!"),
    ("enter_payment", "{product} costs ${price}"),
    ("payment_prompt", "Enter payment amount: $"),
    ("invalid_amount", "Please enter a valid payment amount."),
    (
        "insufficient_payment",
        "Insufficient payment. You need at least ${amount}",
    ),
    ("dispensing", "Dispensing"),
    ("change_returned", "Change returned: ${change}"),
    ("recommended_addons", "Recommended add-ons:"),
    ("add_on_prompt", "Would you like to buy an add-on? (yes/no): "),
    ("yes_no_prompt", "Would you like to buy another item? (yes/no): "),
    (
        "invalid_yes_no",
        "Invalid input. Please enter 'yes'/'نعم' or 'no'/'لا'.",
    ),
    ("thank_you", "Thank you for using Luna's Vending Machine. Goodbye!"),
    ("orange_juice", "orange juice"),
    ("apple_juice", "apple juice"),
    ("salty_chips", "salty chips"),
    ("takkis", "takkis"),
    ("kitkat", "kitkat"),
    ("water", "water"),
    ("professor_peppy", "professor peppy"),
    ("chocolate_bar", "chocolate bar"),
    ("cookies", "cookies"),
    ("dr_pepper", "dr Pepper"),
    ("drinks", "Drinks"),
    ("snacks", "Snacks"),
    ("chocolate", "Chocolate"),
];

const ARABIC: &[(&str, &str)] = &[
    ("welcome", "!مرحباً بكم في آلة لونا للبيع"),
    ("language_prompt", "اختر اللغة (english/arabic): "),
    (
        "invalid_language",
        "اختيار لغة غير صالح. يرجى اختيار 'english' أو 'arabic'.",
    ),
    ("language_hint", "(اكتب 'lang' لتغيير اللغة)"),
    ("menu_header", "--- قائمة آلة البيع ---"),
    ("category_header", "فئة {category}:"),
    ("stock", "المخزون: {stock}"),
    ("sold_out_tag", "نفد من المخزون"),
    ("select_product", "أدخل رقم المنتج الذي ترغب في اختياره: "),
    ("invalid_choice", "رقم المنتج غير صالح. يرجى المحاولة مرة أخرى."),
    ("sold_out", "عذرًا، {product} نفد من المخزون!"),
    ("enter_payment", "{product} يكلف ${price}"),
    ("payment_prompt", "أدخل مبلغ الدفع: $"),
    ("invalid_amount", "يرجى إدخال مبلغ دفع صالح."),
    (
        "insufficient_payment",
        "المبلغ غير كافٍ. تحتاج إلى دفع على الأقل ${amount}",
    ),
    ("dispensing", "جاري صرف"),
    ("change_returned", "المبلغ المتبقي: ${change}"),
    ("recommended_addons", "الإضافات الموصى بها:"),
    ("add_on_prompt", "هل ترغب في شراء إضافة؟ (نعم/لا): "),
    ("yes_no_prompt", "هل ترغب في شراء عنصر آخر؟ (نعم/لا): "),
    (
        "invalid_yes_no",
        "إدخال غير صالح. يرجى إدخال 'yes'/'نعم' أو 'no'/'لا'.",
    ),
    ("thank_you", "شكرًا لاستخدامك جهاز لونا للبيع. وداعًا!"),
    ("orange_juice", "عصير برتقال"),
    ("apple_juice", "عصير تفاح"),
    ("salty_chips", "شيبس مملح"),
    ("takkis", "تاكيز"),
    ("kitkat", "كيت كات"),
    ("water", "ماء"),
    ("professor_peppy", "بروفيسور بيبي"),
    ("chocolate_bar", "لوح شوكولاتة"),
    ("cookies", "بسكويت"),
    ("dr_pepper", "دكتور بيبر"),
    ("drinks", "المشروبات"),
    ("snacks", "الوجبات الخفيفة"),
    ("chocolate", "الشوكولاتة"),
];

/// Message templates per language
#[derive(Debug, Clone, Default)]
pub struct LocalizationTable {
    templates: HashMap<Language, HashMap<String, String>>,
}

impl LocalizationTable {
    /// Create an empty table (every key falls back to itself)
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// The built-in English/Arabic table
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (language, entries) in [(Language::English, ENGLISH), (Language::Arabic, ARABIC)] {
            for (key, template) in entries {
                table.insert(language, *key, *template);
            }
        }
        table
    }

    /// Add or replace a template
    pub fn insert(&mut self, language: Language, key: impl Into<String>, template: impl Into<String>) {
        self.templates
            .entry(language)
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Builder: add a template
    pub fn with_message(
        mut self,
        language: Language,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.insert(language, key, template);
        self
    }

    /// Raw template, if the key exists for this language
    pub fn template(&self, language: Language, key: &str) -> Option<&str> {
        self.templates
            .get(&language)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }

    /// Keys defined for a language (unordered)
    pub fn keys(&self, language: Language) -> impl Iterator<Item = &str> {
        self.templates
            .get(&language)
            .into_iter()
            .flat_map(|messages| messages.keys().map(String::as_str))
    }

    /// Resolve `key` in `language` and fill its placeholders.
    ///
    /// A missing key yields the key itself. With no substitutions the
    /// template is returned verbatim; otherwise every `{name}` must be
    /// supplied or [`I18nError::Format`] is returned.
    pub fn resolve(
        &self,
        language: Language,
        key: &str,
        substitutions: &[(&str, String)],
    ) -> I18nResult<String> {
        let template = self.template(language, key).unwrap_or(key);
        if substitutions.is_empty() {
            return Ok(template.to_string());
        }
        interpolate(key, template, substitutions)
    }
}

fn interpolate(key: &str, template: &str, substitutions: &[(&str, String)]) -> I18nResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                let value = substitutions
                    .iter()
                    .find(|(k, _)| closed && *k == name)
                    .map(|(_, v)| v)
                    .ok_or_else(|| I18nError::Format {
                        key: key.to_string(),
                        placeholder: name.clone(),
                    })?;
                out.push_str(value);
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// A shared table plus the language currently in use
#[derive(Debug, Clone)]
pub struct Localizer {
    table: Arc<LocalizationTable>,
    language: Language,
}

impl Localizer {
    pub fn new(table: Arc<LocalizationTable>, language: Language) -> Self {
        Self { table, language }
    }

    /// Active language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language by tag; the active language is unchanged on error
    pub fn set_language(&mut self, tag: &str) -> I18nResult<Language> {
        let language = tag.parse()?;
        self.language = language;
        Ok(language)
    }

    /// Switch to a known language
    pub fn set(&mut self, language: Language) {
        self.language = language;
    }

    /// Template with no placeholders filled
    pub fn text(&self, key: &str) -> String {
        self.table
            .template(self.language, key)
            .unwrap_or(key)
            .to_string()
    }

    /// Template with placeholders filled
    pub fn resolve(&self, key: &str, substitutions: &[(&str, String)]) -> I18nResult<String> {
        self.table.resolve(self.language, key, substitutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localizer(language: Language) -> Localizer {
        Localizer::new(Arc::new(LocalizationTable::builtin()), language)
    }

    #[test]
    fn test_resolve_english_and_arabic() {
        let table = LocalizationTable::builtin();
        assert_eq!(
            table.resolve(Language::English, "dispensing", &[]).unwrap(),
            "Dispensing"
        );
        assert_eq!(
            table.resolve(Language::Arabic, "dispensing", &[]).unwrap(),
            "جاري صرف"
        );
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let table = LocalizationTable::builtin();
        assert_eq!(
            table.resolve(Language::English, "no_such_key", &[]).unwrap(),
            "no_such_key"
        );
        assert_eq!(localizer(Language::Arabic).text("no_such_key"), "no_such_key");
    }

    #[test]
    fn test_substitution() {
        let table = LocalizationTable::builtin();
        let text = table
            .resolve(
                Language::English,
                "insufficient_payment",
                &[("amount", "1.50".to_string())],
            )
            .unwrap();
        assert_eq!(text, "Insufficient payment. You need at least $1.50");
    }

    #[test]
    fn test_missing_placeholder_is_format_error() {
        let table = LocalizationTable::builtin();
        let err = table
            .resolve(Language::English, "enter_payment", &[("product", "water".to_string())])
            .unwrap_err();
        assert_eq!(
            err,
            I18nError::Format {
                key: "enter_payment".into(),
                placeholder: "price".into()
            }
        );
    }

    #[test]
    fn test_unterminated_placeholder_is_format_error() {
        let table = LocalizationTable::new().with_message(Language::English, "broken", "oops {name");
        let err = table
            .resolve(Language::English, "broken", &[("name", "x".to_string())])
            .unwrap_err();
        assert!(matches!(err, I18nError::Format { .. }));
    }

    #[test]
    fn test_escaped_braces() {
        let table = LocalizationTable::new().with_message(Language::English, "k", "{{{v}}}");
        assert_eq!(
            table.resolve(Language::English, "k", &[("v", "1".to_string())]).unwrap(),
            "{1}"
        );
    }

    #[test]
    fn test_stub_table_injection() {
        let table = LocalizationTable::new().with_message(Language::English, "welcome", "hi");
        let l = Localizer::new(Arc::new(table), Language::English);
        assert_eq!(l.text("welcome"), "hi");
        assert_eq!(l.text("thank_you"), "thank_you");
    }

    #[test]
    fn test_set_language() {
        let mut l = localizer(Language::English);
        assert_eq!(l.set_language(" Arabic ").unwrap(), Language::Arabic);
        assert_eq!(l.language(), Language::Arabic);
        assert_eq!(l.set_language("ar").unwrap(), Language::Arabic);

        let err = l.set_language("french").unwrap_err();
        assert_eq!(err, I18nError::UnsupportedLanguage { tag: "french".into() });
        assert_eq!(l.language(), Language::Arabic);
    }

    #[test]
    fn test_yes_no_accepts_both_languages() {
        assert_eq!(parse_yes_no("yes"), Ok(true));
        assert_eq!(parse_yes_no(" YES "), Ok(true));
        assert_eq!(parse_yes_no("نعم"), Ok(true));
        assert_eq!(parse_yes_no("no"), Ok(false));
        assert_eq!(parse_yes_no("لا"), Ok(false));
        assert!(matches!(parse_yes_no("y"), Err(InputError::InvalidYesNo { .. })));
        assert!(parse_yes_no("").is_err());
    }

    #[test]
    fn test_languages_define_the_same_keys() {
        let table = LocalizationTable::builtin();
        let mut english: Vec<_> = table.keys(Language::English).collect();
        let mut arabic: Vec<_> = table.keys(Language::Arabic).collect();
        english.sort_unstable();
        arabic.sort_unstable();
        assert_eq!(english, arabic);
    }
}
