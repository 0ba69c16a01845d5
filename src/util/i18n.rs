//! Compiled-in translation tables for `data-key` tagged page text.
//!
//! The two tables do not share a key set; the Urdu one covers more of the
//! landing page. Lookups for keys missing from a table return `None` and
//! callers leave the element untouched.

#[cfg(test)]
#[path = "i18n_test.rs"]
mod i18n_test;

use crate::state::prefs::Language;

const EN: &[(&str, &str)] = &[
    ("nav-about", "About"),
    ("nav-how", "How It Works"),
    ("nav-login", "Login"),
    ("hero-save", "Save Lives"),
];

const UR: &[(&str, &str)] = &[
    ("nav-about", "ہمارے بارے میں"),
    ("nav-how", "یہ کیسے کام کرتا ہے"),
    ("nav-login", "لاگ ان کریں"),
    ("hero-save", "جانیں بچائیں"),
    ("hero-title-1", "ہر قطرہ جانیں بچاتا ہے"),
    ("hero-title-2", "جانیں بچائیں"),
    (
        "hero-subtitle",
        "پاکستان کا پہلا سمارٹ خون ملان کرنے والا نظام جو اعلیٰ ڈیٹا کے ڈھانچے اور الگورتھم استعمال کرتے ہوئے فوری جواب کے اوقات کے لیے۔",
    ),
    ("register-now", "اب رجسٹر کریں"),
    ("learn-more", "مزید جانیں"),
    ("about-bloodconnect", "BLOODCONNECT کے بارے میں"),
    ("innovation-meets", "جدت و انسانی خدمت ملتی ہے"),
    ("about-desc", "BloodConnect صرف ایک ملان کرنے والا نظام نہیں ہے؛ یہ ایک مشن سے چلنے والا نظام ہے۔"),
    ("custom-dsa", "اعلیٰ ڈیٹا کے ڈھانچے"),
    ("real-time", "حقیقی وقت میں"),
    ("choose-role", "اپنا کردار منتخب کریں"),
    ("choose-subtitle", "منتخب کریں کہ آپ جانیں بچانے میں کس طرح حصہ ڈالنا چاہتے ہیں"),
    ("register-donor", "ڈونر کے طور پر رجسٹر کریں"),
    ("donor-desc", "ہیرو بنیں۔ خون عطیہ کریں اور اپنی کمیونٹی میں جانیں بچائیں۔"),
    ("request-blood", "خون کی درخواست کریں"),
    ("recipient-desc", "فوری ڈونر تلاش کریں اپنی فوری ضروریات کے لیے۔"),
];

fn table(lang: Language) -> &'static [(&'static str, &'static str)] {
    match lang {
        Language::En => EN,
        Language::Ur => UR,
    }
}

/// Localized text for `key`, if the language's table has one.
#[must_use]
pub fn translate(lang: Language, key: &str) -> Option<&'static str> {
    table(lang).iter().find(|(k, _)| *k == key).map(|(_, text)| *text)
}

/// All keys the language's table defines, in declaration order.
pub fn keys(lang: Language) -> impl Iterator<Item = &'static str> {
    table(lang).iter().map(|(k, _)| *k)
}
