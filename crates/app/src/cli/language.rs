use std::io;

use clap::Args;
use jam3a::locale::Language;
use jam3a_app::storage::{Storage, StorageExt, StorageKey};
use tracing::{info, warn};

use crate::cli::{Shell, chain, output_failed};

#[derive(Debug, Args)]
pub(crate) struct LanguageArgs {
    /// Language to switch to (en, ar); omit to show the current one
    language: Option<Language>,
}

/// Language for this run: the flag, then the stored choice, then English.
pub(crate) fn resolve(storage: &dyn Storage, flag: Option<Language>) -> Language {
    if let Some(language) = flag {
        return language;
    }

    match storage.load::<Language>(StorageKey::Language) {
        Ok(stored) => stored.unwrap_or_default(),
        Err(error) => {
            warn!(%error, "ignoring unreadable language preference");
            Language::default()
        }
    }
}

pub(crate) fn run(
    args: LanguageArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let Some(language) = args.language else {
        return writeln!(out, "{}", shell.language).map_err(output_failed);
    };

    shell
        .app
        .storage
        .save(StorageKey::Language, &language)
        .map_err(|error| format!("failed to save language: {}", chain(&error)))?;

    info!(%language, "language changed");

    let confirmation = match language {
        Language::English => "Language set to English.",
        Language::Arabic => "تم تغيير اللغة إلى العربية.",
    };

    writeln!(out, "{confirmation}").map_err(output_failed)
}

#[cfg(test)]
mod tests {
    use jam3a_app::storage::MemoryStorage;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn flag_beats_stored_choice() -> TestResult {
        let storage = MemoryStorage::new();
        storage.save(StorageKey::Language, &Language::Arabic)?;

        assert_eq!(resolve(&storage, Some(Language::English)), Language::English);
        assert_eq!(resolve(&storage, None), Language::Arabic);

        Ok(())
    }

    #[test]
    fn defaults_to_english() -> TestResult {
        let storage = MemoryStorage::new();
        storage.write(StorageKey::Language, "{broken")?;

        assert_eq!(resolve(&MemoryStorage::new(), None), Language::English);
        assert_eq!(resolve(&storage, None), Language::English);

        Ok(())
    }
}
