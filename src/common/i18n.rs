// src/common/i18n.rs

use std::collections::HashMap;

use crate::middleware::i18n::Locale;
use crate::models::complaint::ComplaintStatus;

/// Presentation-layer message catalog (Arabic / English). The rest of the
/// crate compares statuses and error kinds as enum values; only this table
/// knows how to display them.
#[derive(Debug, Clone)]
pub struct I18nStore {
    en: HashMap<&'static str, &'static str>,
    ar: HashMap<&'static str, &'static str>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut en = HashMap::new();
        let mut ar = HashMap::new();
        for (key, english, arabic) in MESSAGES {
            en.insert(*key, *english);
            ar.insert(*key, *arabic);
        }
        Self { en, ar }
    }

    /// Resolves a message key for the request locale. Unknown locales fall
    /// back to Arabic, unknown keys to the key itself.
    pub fn message(&self, locale: &Locale, key: &str) -> String {
        let table = if locale.0 == "en" { &self.en } else { &self.ar };
        table
            .get(key)
            .map(|m| m.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Display label for a complaint status.
    pub fn status_label(&self, locale: &Locale, status: ComplaintStatus) -> String {
        self.message(locale, status_key(status))
    }

    /// Confirmation message for a status update.
    pub fn status_updated(&self, locale: &Locale, status: ComplaintStatus) -> String {
        self.message(locale, "status_updated")
            .replace("{status}", &self.status_label(locale, status))
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

fn status_key(status: ComplaintStatus) -> &'static str {
    match status {
        ComplaintStatus::Pending => "status_pending",
        ComplaintStatus::InReview => "status_in_review",
        ComplaintStatus::Resolved => "status_resolved",
        ComplaintStatus::Rejected => "status_rejected",
    }
}

// (key, english, arabic)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("validation_failed", "One or more fields are invalid.", "بعض الحقول غير صالحة."),
    ("required", "This field is required.", "هذا الحقل مطلوب."),
    ("invalid_email", "The e-mail address is invalid.", "البريد الإلكتروني غير صالح."),
    (
        "password_too_short",
        "The password must be at least 6 characters.",
        "كلمة المرور يجب ألا تقل عن 6 أحرف.",
    ),
    (
        "invalid_national_id",
        "The national ID must be exactly 14 digits.",
        "الرقم القومي يجب أن يتكون من 14 رقمًا.",
    ),
    (
        "missing_role_field",
        "A field required by the account role is missing.",
        "حقل مطلوب لهذا النوع من الحسابات غير موجود.",
    ),
    ("role_immutable", "The account role cannot be changed.", "لا يمكن تغيير نوع الحساب."),
    (
        "credential_mismatch",
        "The password confirmation does not match.",
        "كلمتا المرور غير متطابقتين.",
    ),
    (
        "empty_query",
        "Enter a tracking number or national ID to search.",
        "أدخل رقم المتابعة أو الرقم القومي للبحث.",
    ),
    ("unknown_governorate", "The governorate is not recognised.", "المحافظة غير معروفة."),
    ("unknown_ministry", "The ministry is not recognised.", "الوزارة غير معروفة."),
    (
        "duplicate_email",
        "This e-mail is already in use.",
        "هذا البريد الإلكتروني مستخدم بالفعل.",
    ),
    ("complaint_not_found", "Complaint not found.", "الشكوى غير موجودة."),
    ("account_not_found", "Account not found.", "الحساب غير موجود."),
    (
        "invalid_credentials",
        "Invalid e-mail or password.",
        "البريد الإلكتروني أو كلمة المرور غير صحيحة.",
    ),
    (
        "invalid_token",
        "Missing or invalid authentication token.",
        "رمز الدخول غير صالح أو مفقود.",
    ),
    ("account_suspended", "This account has been suspended.", "تم إيقاف هذا الحساب."),
    (
        "scope_denied",
        "This account is not entitled to act on this complaint.",
        "لا يملك هذا الحساب صلاحية التعامل مع هذه الشكوى.",
    ),
    (
        "storage_error",
        "The service is temporarily unavailable, please retry.",
        "الخدمة غير متاحة مؤقتًا، يرجى المحاولة لاحقًا.",
    ),
    ("internal_error", "An unexpected error occurred.", "حدث خطأ غير متوقع."),
    (
        "status_updated",
        "Complaint status updated to {status}.",
        "تم تحديث حالة الشكوى إلى {status}.",
    ),
    ("status_pending", "Pending", "قيد الانتظار"),
    ("status_in_review", "In review", "قيد المراجعة"),
    ("status_resolved", "Resolved", "تم الحل"),
    ("status_rejected", "Rejected", "مرفوضة"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn ar() -> Locale {
        Locale("ar".to_string())
    }

    fn en() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn resolves_messages_per_locale() {
        let store = I18nStore::new();
        assert_eq!(store.message(&en(), "complaint_not_found"), "Complaint not found.");
        assert_eq!(store.message(&ar(), "complaint_not_found"), "الشكوى غير موجودة.");
    }

    #[test]
    fn unknown_locale_falls_back_to_arabic() {
        let store = I18nStore::new();
        let locale = Locale("fr".to_string());
        assert_eq!(store.message(&locale, "account_not_found"), "الحساب غير موجود.");
    }

    #[test]
    fn unknown_key_falls_back_to_the_key() {
        let store = I18nStore::new();
        assert_eq!(store.message(&en(), "no_such_key"), "no_such_key");
    }

    #[test]
    fn status_labels_are_localized() {
        let store = I18nStore::new();
        assert_eq!(store.status_label(&en(), ComplaintStatus::InReview), "In review");
        assert_eq!(store.status_label(&ar(), ComplaintStatus::Resolved), "تم الحل");
    }

    #[test]
    fn status_updated_interpolates_the_label() {
        let store = I18nStore::new();
        assert_eq!(
            store.status_updated(&en(), ComplaintStatus::Resolved),
            "Complaint status updated to Resolved."
        );
    }
}
