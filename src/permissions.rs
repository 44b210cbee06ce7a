use crate::i18n::{Locale, Translations};
use serenity::all::Permissions;

/// Turns a flag name such as `MODERATE_MEMBERS` into `Moderate Members`
fn display_name(flag_name: &str) -> String {
    flag_name
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The localized name of a single permission flag.
///
/// Looks up `permission.<flag name>` and falls back to the flag name in title case
pub fn permission_name(flag_name: &str, translations: &Translations, locale: &Locale) -> String {
    let key = format!("permission.{}", flag_name.to_lowercase());
    translations
        .try_translate(&key, locale, None)
        .unwrap_or_else(|| display_name(flag_name))
}

/// Formats a permission set as a comma separated list of localized names.
///
/// Returns `None` for an empty set so callers can omit the line entirely
pub fn format_permissions(
    permissions: Permissions,
    translations: &Translations,
    locale: &Locale,
) -> Option<String> {
    if permissions.is_empty() {
        return None;
    }

    let mut names: Vec<String> = Vec::new();
    for (flag_name, _) in permissions.iter_names() {
        let name = permission_name(flag_name, translations, locale);
        if !names.contains(&name) {
            names.push(name);
        }
    }

    // Bits serenity doesn't know about yet
    if permissions.bits() & !Permissions::all().bits() != 0 {
        names.push(translations.translate("permission.unknown", locale, None));
    }

    Some(names.join(", "))
}

/// Same as `format_permissions` for an optional set, such as default member permissions
pub fn format_optional_permissions(
    permissions: Option<Permissions>,
    translations: &Translations,
    locale: &Locale,
) -> Option<String> {
    permissions.and_then(|p| format_permissions(p, translations, locale))
}
