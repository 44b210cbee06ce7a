use crate::error::Result;
use rust_embed::Embed;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// The name of the bundle containing the generator's own strings
pub const DEFAULT_BUNDLE_NAME: &str = "doc-generator";

/// Built-in translation bundles, laid out as `<bundle>/<locale tag>.yaml`
#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/translations"]
struct BuiltinBundles;

/// A BCP 47 language tag such as `en-GB` or `de`
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    /// British English, the locale used whenever no locale was requested
    pub const ENGLISH: Locale = Locale(Cow::Borrowed("en-GB"));
    pub const GERMAN: Locale = Locale(Cow::Borrowed("de"));

    pub fn new(tag: &str) -> Self {
        Locale(Cow::Owned(tag.trim().replace('_', "-")))
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, e.g. `en` for `en-GB`
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(());
        }

        Ok(Locale::new(s))
    }
}

/// Bundle-based string lookup.
///
/// A lookup tries the requested bundle and then the built-in bundle. Within a bundle
/// it tries the exact locale, its language, the default locale and the default
/// locale's language, in that order. If nothing matches the key itself is returned,
/// so untranslated command names and descriptions pass through unchanged
#[derive(Debug, Clone)]
pub struct Translations {
    /// bundle -> locale tag -> key -> text
    bundles: HashMap<String, HashMap<String, HashMap<String, String>>>,
    default_locale: Locale,
}

impl Translations {
    /// Translations with the built-in bundles loaded
    pub fn new() -> Result<Self> {
        let mut translations = Self::empty(Locale::ENGLISH);

        for file in BuiltinBundles::iter() {
            let name: &str = &file;
            let path = Path::new(name);

            let (Some(bundle), Some(locale)) = (
                path.parent().and_then(|p| p.to_str()),
                path.file_stem().and_then(|s| s.to_str()),
            ) else {
                continue;
            };

            let Some(contents) = BuiltinBundles::get(name) else {
                continue;
            };

            let entries: HashMap<String, String> = serde_yaml::from_slice(&contents.data)?;
            translations.add_entries(bundle, &Locale::new(locale), entries);
        }

        Ok(translations)
    }

    pub fn empty(default_locale: Locale) -> Self {
        Translations {
            bundles: HashMap::new(),
            default_locale,
        }
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Merges entries into a bundle, replacing existing keys
    pub fn add_entries(
        &mut self,
        bundle: &str,
        locale: &Locale,
        entries: impl IntoIterator<Item = (String, String)>,
    ) {
        self.bundles
            .entry(bundle.to_string())
            .or_default()
            .entry(locale.tag().to_string())
            .or_default()
            .extend(entries);
    }

    /// Loads a flat `key: text` yaml document into a bundle
    pub fn load_yaml(&mut self, bundle: &str, locale: &Locale, yaml: &str) -> Result<()> {
        let entries: HashMap<String, String> = serde_yaml::from_str(yaml)?;
        self.add_entries(bundle, locale, entries);
        Ok(())
    }

    /// Loads every `<dir>/<bundle>/<locale>.yaml` file
    pub fn load_dir(&mut self, dir: &Path) -> Result<()> {
        for bundle_dir in std::fs::read_dir(dir)? {
            let bundle_dir = bundle_dir?.path();
            if !bundle_dir.is_dir() {
                continue;
            }

            let Some(bundle) = bundle_dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            for file in std::fs::read_dir(&bundle_dir)? {
                let file = file?.path();
                if file.extension().and_then(|e| e.to_str()) != Some("yaml") {
                    continue;
                }

                let Some(locale) = file.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };

                let contents = std::fs::read_to_string(&file)?;
                self.load_yaml(bundle, &Locale::new(locale), &contents)?;
                log::debug!("Loaded translations {} for bundle {}", locale, bundle);
            }
        }

        Ok(())
    }

    pub fn translate(&self, key: &str, locale: &Locale, bundle: Option<&str>) -> String {
        self.try_translate(key, locale, bundle)
            .unwrap_or_else(|| key.to_string())
    }

    /// Like `translate` but returns `None` instead of echoing a missing key
    pub fn try_translate(
        &self,
        key: &str,
        locale: &Locale,
        bundle: Option<&str>,
    ) -> Option<String> {
        let bundle = bundle.unwrap_or(DEFAULT_BUNDLE_NAME);
        let mut bundle_names = vec![bundle];
        if bundle != DEFAULT_BUNDLE_NAME {
            bundle_names.push(DEFAULT_BUNDLE_NAME);
        }

        let locale_tags = [
            locale.tag(),
            locale.language(),
            self.default_locale.tag(),
            self.default_locale.language(),
        ];

        for name in bundle_names {
            let Some(bundle) = self.bundles.get(name) else {
                continue;
            };

            for tag in locale_tags {
                if let Some(text) = bundle.get(tag).and_then(|entries| entries.get(key)) {
                    return Some(text.clone());
                }
            }
        }

        None
    }
}
