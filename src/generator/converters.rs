use crate::error::{DocsError, Result};
use crate::i18n::{Locale, Translations};
use commands_docgen::{Converter, ConverterRef, DecoratorConverter, DirectConverter};

/// Strips the namespace and any `@<hash>` instance suffix off a converter type identifier.
///
/// Returns the bare identifier and whether the namespace marked it as a direct
/// converter (an `impl` segment). Stripping an already stripped identifier is a no-op
pub fn strip_identifier(type_id: &str) -> (&str, bool) {
    let without_hash = type_id.split('@').next().unwrap_or(type_id).trim();

    let segments = without_hash
        .split("::")
        .flat_map(|s| s.split('.'))
        .collect::<Vec<_>>();

    let Some((name, namespace)) = segments.split_last() else {
        return (without_hash, false);
    };

    (*name, namespace.contains(&"impl"))
}

/// Turns a raw converter type identifier into a converter
pub fn resolve_converter(type_id: &str, signature: &str) -> Result<Converter> {
    let (name, marked_direct) = strip_identifier(type_id);

    if let Ok(direct) = name.parse::<DirectConverter>() {
        return Ok(Converter::Direct(direct));
    }

    if marked_direct {
        return Err(DocsError::InvalidConverter(name.to_string()));
    }

    match name.parse::<DecoratorConverter>() {
        Ok(decorator) => Ok(Converter::Decorated {
            decorator,
            signature: signature.to_string(),
        }),
        Err(_) => Err(DocsError::InvalidConverter(name.to_string())),
    }
}

fn direct_label_key(converter: DirectConverter) -> &'static str {
    match converter {
        DirectConverter::Attachment => "converter.attachment",
        DirectConverter::Boolean => "converter.boolean",
        DirectConverter::Channel => "converter.channel",
        DirectConverter::Color => "converter.color",
        DirectConverter::Decimal => "converter.decimal",
        DirectConverter::Duration => "converter.duration",
        DirectConverter::DurationCoalescing => "converter.duration_coalescing",
        DirectConverter::Email => "converter.email",
        DirectConverter::Emoji => "converter.emoji",
        DirectConverter::Enum => "converter.enum",
        DirectConverter::Guild => "converter.guild",
        DirectConverter::Int => "converter.int",
        DirectConverter::Long => "converter.long",
        DirectConverter::Member => "converter.member",
        DirectConverter::Message => "converter.message",
        DirectConverter::Regex => "converter.regex",
        DirectConverter::RegexCoalescing => "converter.regex_coalescing",
        DirectConverter::Role => "converter.role",
        DirectConverter::Snowflake => "converter.snowflake",
        DirectConverter::StringCoalescing => "converter.string_coalescing",
        DirectConverter::String => "converter.string",
        DirectConverter::SupportedLocale => "converter.supported_locale",
        DirectConverter::Timestamp => "converter.timestamp",
        DirectConverter::User => "converter.user",
        DirectConverter::StringChoice => "converter.string_choice",
        DirectConverter::NumberChoice => "converter.number_choice",
        DirectConverter::EnumChoice => "converter.enum_choice",
    }
}

fn decorator_label_key(decorator: DecoratorConverter) -> &'static str {
    match decorator {
        DecoratorConverter::CoalescingToDefaulting => "decorator.coalescing_to_defaulting",
        DecoratorConverter::CoalescingToOptional => "decorator.coalescing_to_optional",
        DecoratorConverter::SingleToDefaulting => "decorator.single_to_defaulting",
        DecoratorConverter::SingleToList => "decorator.single_to_list",
        DecoratorConverter::SingleToOptional => "decorator.single_to_optional",
    }
}

fn signature_label_key(signature: &str) -> Option<&'static str> {
    Some(match signature {
        "attachment" => "signature.attachment",
        "yes/no" => "signature.boolean",
        "channel" => "signature.channel",
        "color" => "signature.color",
        "decimal" => "signature.decimal",
        "duration" => "signature.duration",
        "email" => "signature.email",
        "server emoji" => "signature.emoji",
        "server" => "signature.server",
        "number" => "signature.number",
        "member" => "signature.member",
        "message" => "signature.message",
        "regex" => "signature.regex",
        "regexes" => "signature.regexes",
        "role" => "signature.role",
        "ID" => "signature.snowflake",
        "text" => "signature.string",
        "locale name/code" => "signature.locale",
        "timestamp" => "signature.timestamp",
        "user" => "signature.user",
        _ => return None,
    })
}

/// Produces the human-facing label of an argument's converter in one locale
pub struct ConverterLabeler<'a> {
    translations: &'a Translations,
    locale: &'a Locale,
}

impl<'a> ConverterLabeler<'a> {
    pub fn new(translations: &'a Translations, locale: &'a Locale) -> Self {
        Self {
            translations,
            locale,
        }
    }

    /// Labels a raw converter type identifier. Fails with `InvalidConverter` when the
    /// identifier is in neither table
    pub fn label(&self, type_id: &str, signature: &str) -> Result<String> {
        let converter = resolve_converter(type_id, signature)?;
        Ok(self.label_converter(&converter))
    }

    pub fn label_ref(&self, converter: &ConverterRef) -> Result<String> {
        match converter {
            ConverterRef::Typed(converter) => Ok(self.label_converter(converter)),
            ConverterRef::TypeId { type_id, signature } => self.label(type_id, signature),
        }
    }

    pub fn label_converter(&self, converter: &Converter) -> String {
        match converter {
            Converter::Direct(direct) => self.tr(direct_label_key(*direct)),
            Converter::Decorated {
                decorator,
                signature,
            } => {
                let modifier = self.tr(decorator_label_key(*decorator));
                let typ = match signature_label_key(signature) {
                    Some(key) => self.tr(key),
                    None => signature.clone(),
                };

                format!("{} {}", modifier, typ)
            }
        }
    }

    fn tr(&self, key: &str) -> String {
        self.translations.translate(key, self.locale, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD_PREFIX: &str = "botframework.commands.converters";
    const APPLICATION_PREFIX: &str = "botframework.commands.application.slash.converters";

    #[test]
    fn test_converter() {
        let translations = Translations::new().unwrap();
        let labeler = ConverterLabeler::new(&translations, &Locale::ENGLISH);

        let raw = format!("{}.impl.NotRealConverter", STANDARD_PREFIX);
        let err = labeler.label(&raw, "fake").unwrap_err();
        match err {
            DocsError::InvalidConverter(name) => assert_eq!(name, "NotRealConverter"),
            e => panic!("unexpected error: {}", e),
        }

        let raw = format!("{}.impl.ChannelConverter", STANDARD_PREFIX);
        assert_eq!(labeler.label(&raw, "channel").unwrap(), "Channel");

        let raw = format!("{}.impl.StringChoiceConverter", APPLICATION_PREFIX);
        assert_eq!(labeler.label(&raw, "").unwrap(), "String Choice");

        let raw = format!("{}.SingleToDefaultingConverter", STANDARD_PREFIX);
        assert_eq!(
            labeler.label(&raw, "channel").unwrap(),
            "Defaulting Channel"
        );
    }

    #[test]
    fn test_direct_ignores_signature() {
        let translations = Translations::new().unwrap();
        let labeler = ConverterLabeler::new(&translations, &Locale::ENGLISH);

        for signature in ["", "channel", "number", "whatever"] {
            assert_eq!(
                labeler.label("MemberConverter", signature).unwrap(),
                "Member"
            );
        }
    }

    #[test]
    fn test_every_converter_has_a_label() {
        let translations = Translations::new().unwrap();

        for locale in [Locale::ENGLISH, Locale::GERMAN] {
            let labeler = ConverterLabeler::new(&translations, &locale);

            for c in DirectConverter::ALL {
                let label = labeler.label(c.identifier(), "").unwrap();
                assert!(
                    !label.starts_with("converter."),
                    "{} has no label",
                    c.identifier()
                );
                assert_eq!(labeler.label(c.identifier(), "role").unwrap(), label);
            }

            for d in DecoratorConverter::ALL {
                let modifier = translations.translate(decorator_label_key(d), &locale, None);
                let typ = translations.translate("signature.number", &locale, None);
                assert_eq!(
                    labeler.label(d.identifier(), "number").unwrap(),
                    format!("{} {}", modifier, typ)
                );
            }
        }
    }

    #[test]
    fn test_unknown_signature_is_echoed() {
        let translations = Translations::new().unwrap();
        let labeler = ConverterLabeler::new(&translations, &Locale::ENGLISH);

        assert_eq!(
            labeler
                .label("SingleToListConverter", "colour palette")
                .unwrap(),
            "List colour palette"
        );
        assert_eq!(
            labeler
                .label("SingleToOptionalConverter", "yes/no")
                .unwrap(),
            "Optional Boolean"
        );
    }

    #[test]
    fn test_stripping() {
        let raw = format!("{}.impl.DurationConverter@5d6f64b1", STANDARD_PREFIX);
        assert_eq!(strip_identifier(&raw), ("DurationConverter", true));
        assert_eq!(
            strip_identifier("DurationConverter"),
            ("DurationConverter", false)
        );
        assert_eq!(
            strip_identifier("my_bot::converters::impl::RoleConverter@ff"),
            ("RoleConverter", true)
        );

        let translations = Translations::new().unwrap();
        let labeler = ConverterLabeler::new(&translations, &Locale::ENGLISH);

        // Stripped and unstripped forms label identically
        let (stripped, _) = strip_identifier(&raw);
        assert_eq!(
            labeler.label(&raw, "duration").unwrap(),
            labeler.label(stripped, "duration").unwrap()
        );

        let raw = format!("{}.CoalescingToOptionalConverter@12", STANDARD_PREFIX);
        let (stripped, _) = strip_identifier(&raw);
        assert_eq!(
            labeler.label(&raw, "text").unwrap(),
            labeler.label(stripped, "text").unwrap()
        );
    }

    #[test]
    fn test_error_carries_stripped_identifier() {
        let translations = Translations::new().unwrap();
        let labeler = ConverterLabeler::new(&translations, &Locale::ENGLISH);

        let raw = format!("{}.FancyConverter@abc123", STANDARD_PREFIX);
        let err = labeler.label(&raw, "text").unwrap_err();
        assert!(matches!(
            err,
            DocsError::InvalidConverter(name) if name == "FancyConverter"
        ));
    }

    #[test]
    fn test_decorated_direct_marker_is_invalid() {
        // Decorators never live under `impl`
        assert!(matches!(
            resolve_converter("converters.impl.SingleToListConverter", "text"),
            Err(DocsError::InvalidConverter(_))
        ));
    }

    #[test]
    fn test_localized_labels() {
        let translations = Translations::new().unwrap();
        let labeler = ConverterLabeler::new(&translations, &Locale::GERMAN);

        assert_eq!(labeler.label("ChannelConverter", "").unwrap(), "Kanal");
        assert_eq!(
            labeler.label("SingleToOptionalConverter", "user").unwrap(),
            "Optional Benutzer"
        );
        assert_eq!(
            labeler
                .label_ref(&ConverterRef::Typed(Converter::Direct(DirectConverter::Role)))
                .unwrap(),
            "Rolle"
        );
    }
}
