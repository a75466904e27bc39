//! Fixed user-facing text per locale.

use crate::domain::model::{ActivityTier, Locale, ValidationError};

pub struct Strings {
    pub activity_labels: [&'static str; 3],
    pub time_labels: [&'static str; 8],
    pub encouragement: [&'static str; 3],
    pub liter_unit: &'static str,
    pub ml_unit: &'static str,
    pub kg_unit: &'static str,
    pub breakdown_heading: &'static str,
    pub weight_heading: &'static str,
    pub activity_heading: &'static str,
    pub formula_heading: &'static str,
    pub schedule_heading: &'static str,
    pub meter_heading: &'static str,
    pub missing_weight: &'static str,
    pub weight_out_of_range: &'static str,
    pub missing_activity: &'static str,
    pub share_title: &'static str,
    pub need_prefix: &'static str,
    pub need_suffix: &'static str,
    pub calculate_prompt: &'static str,
    pub copied: &'static str,
    pub share_failed: &'static str,
    pub shared: &'static str,
    pub saved: &'static str,
    pub nothing_to_save: &'static str,
    pub history_cleared: &'static str,
    pub no_saved_results: &'static str,
    pub exported: &'static str,
    pub results_to: &'static str,
}

static ARABIC: Strings = Strings {
    activity_labels: ["النشاط المنخفض", "النشاط المتوسط", "النشاط العالي"],
    time_labels: [
        "7:00 - الاستيقاظ",
        "9:00 - الإفطار",
        "11:00 - منتصف الصباح",
        "13:00 - الغداء",
        "15:00 - بعد الظهر",
        "17:00 - المساء",
        "19:00 - العشاء",
        "21:00 - قبل النوم",
    ],
    encouragement: [
        "ممتاز! هذه الكمية ستساعدك في الحفاظ على ترطيب جسمك وصحتك العامة.",
        "رائع! مع نشاطك المتوسط، هذه الكمية ضرورية لتعويض السوائل المفقودة.",
        "عظيم! مع نشاطك العالي، شرب هذه الكمية سيحافظ على أدائك وطاقتك.",
    ],
    liter_unit: "لتر",
    ml_unit: "مل",
    kg_unit: "كجم",
    breakdown_heading: "تفصيل الحساب:",
    weight_heading: "الوزن:",
    activity_heading: "مستوى النشاط:",
    formula_heading: "المعادلة:",
    schedule_heading: "جدول الشرب اليومي:",
    meter_heading: "مستوى الترطيب:",
    missing_weight: "يرجى إدخال وزن صحيح بين 1 و 300 كيلو جرام",
    weight_out_of_range: "الوزن يجب أن يكون بين 1 و 300 كيلو جرام",
    missing_activity: "يرجى اختيار مستوى النشاط",
    share_title: "حاسبة شرب المياه اليومية",
    need_prefix: "تحتاج إلى",
    need_suffix: "من الماء يوميًا للحفاظ على صحتك",
    calculate_prompt: "احسب احتياجك من الماء:",
    copied: "تم نسخ النتيجة إلى الحافظة!",
    share_failed: "حدث خطأ في المشاركة",
    shared: "تمت مشاركة النتيجة!",
    saved: "تم حفظ النتيجة بنجاح!",
    nothing_to_save: "لا توجد نتيجة لحفظها",
    history_cleared: "تم مسح النتائج المحفوظة",
    no_saved_results: "لا توجد نتائج محفوظة",
    exported: "تم تصدير",
    results_to: "نتيجة إلى",
};

static ENGLISH: Strings = Strings {
    activity_labels: ["Low activity", "Moderate activity", "High activity"],
    time_labels: [
        "7:00 - Wake up",
        "9:00 - Breakfast",
        "11:00 - Mid-morning",
        "13:00 - Lunch",
        "15:00 - Afternoon",
        "17:00 - Evening",
        "19:00 - Dinner",
        "21:00 - Before sleep",
    ],
    encouragement: [
        "Excellent! This amount will keep you hydrated and support your overall health.",
        "Great! With moderate activity, this amount replaces the fluids you lose.",
        "Awesome! With high activity, drinking this much keeps your performance and energy up.",
    ],
    liter_unit: "L",
    ml_unit: "ml",
    kg_unit: "kg",
    breakdown_heading: "Calculation breakdown:",
    weight_heading: "Weight:",
    activity_heading: "Activity level:",
    formula_heading: "Formula:",
    schedule_heading: "Daily schedule:",
    meter_heading: "Hydration level:",
    missing_weight: "Please enter a valid weight between 1 and 300 kg",
    weight_out_of_range: "Weight must be between 1 and 300 kg",
    missing_activity: "Please choose an activity level",
    share_title: "Daily Water Intake Calculator",
    need_prefix: "You need",
    need_suffix: "of water daily to stay healthy",
    calculate_prompt: "Calculate your water needs:",
    copied: "Result copied to clipboard!",
    share_failed: "Sharing failed",
    shared: "Result shared!",
    saved: "Result saved successfully!",
    nothing_to_save: "There is no result to save",
    history_cleared: "Saved results cleared",
    no_saved_results: "No saved results",
    exported: "Exported",
    results_to: "results to",
};

pub fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::Ar => &ARABIC,
        Locale::En => &ENGLISH,
    }
}

fn tier_index(tier: ActivityTier) -> usize {
    match tier {
        ActivityTier::Low => 0,
        ActivityTier::Medium => 1,
        ActivityTier::High => 2,
    }
}

pub fn activity_label(locale: Locale, tier: ActivityTier) -> &'static str {
    strings(locale).activity_labels[tier_index(tier)]
}

pub fn encouragement(locale: Locale, tier: ActivityTier) -> &'static str {
    strings(locale).encouragement[tier_index(tier)]
}

pub fn validation_message(locale: Locale, error: ValidationError) -> &'static str {
    let s = strings(locale);
    match error {
        ValidationError::MissingWeight => s.missing_weight,
        ValidationError::WeightOutOfRange => s.weight_out_of_range,
        ValidationError::MissingActivity => s.missing_activity,
    }
}

/// "You need {amount} L of water daily to stay healthy"
pub fn need_sentence(locale: Locale, amount: &str) -> String {
    let s = strings(locale);
    format!("{} {} {} {}", s.need_prefix, amount, s.liter_unit, s.need_suffix)
}

/// "Exported {count} results to {path}"
pub fn exported_sentence(locale: Locale, count: usize, path: &str) -> String {
    let s = strings(locale);
    format!("{} {} {} {}", s.exported, count, s.results_to, path)
}

const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Replaces ASCII digits with Arabic-Indic digits, leaving everything else untouched.
pub fn to_arabic_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => ARABIC_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arabic_digits() {
        assert_eq!(to_arabic_digits("2.5"), "٢.٥");
        assert_eq!(to_arabic_digits("7:00 - x"), "٧:٠٠ - x");
    }

    #[test]
    fn test_every_locale_has_eight_time_labels() {
        for locale in [Locale::Ar, Locale::En] {
            assert_eq!(strings(locale).time_labels.len(), 8);
            assert!(strings(locale).time_labels[0].starts_with("7:00"));
            assert!(strings(locale).time_labels[7].starts_with("21:00"));
        }
    }

    #[test]
    fn test_exported_sentence() {
        assert_eq!(
            exported_sentence(Locale::En, 2, "out/history.zip"),
            "Exported 2 results to out/history.zip"
        );
        assert_eq!(
            exported_sentence(Locale::Ar, 2, "history.zip"),
            "تم تصدير 2 نتيجة إلى history.zip"
        );
    }

    #[test]
    fn test_history_status_lines_follow_locale() {
        assert_eq!(strings(Locale::En).no_saved_results, "No saved results");
        assert_eq!(strings(Locale::Ar).no_saved_results, "لا توجد نتائج محفوظة");
        assert_ne!(
            strings(Locale::Ar).history_cleared,
            strings(Locale::En).history_cleared
        );
    }

    #[test]
    fn test_need_sentence() {
        assert_eq!(
            need_sentence(Locale::En, "2.5"),
            "You need 2.5 L of water daily to stay healthy"
        );
    }
}
