//! Configuration file discovery for `apdu-gen`.
//!
//! An explicit path (from `--config` or `APDU_GEN_CONFIG_PATH`) must exist.
//! Without one, the first existing file among the candidates is used:
//!
//! 1. `$XDG_CONFIG_HOME/apdu-gen/config.toml`
//! 2. `$HOME/.config/apdu-gen/config.toml`
//! 3. `$HOME/.apdu-gen.toml`
//! 4. `./.apdu-gen.toml`

use std::collections::HashSet;
use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};
use dirs::home_dir;

use crate::error::GenError;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "APDU_GEN_CONFIG_PATH";

const APP_NAME: &str = "apdu-gen";
const CONFIG_FILE_NAME: &str = "config.toml";
const DOTFILE_NAME: &str = ".apdu-gen.toml";

/// Returns the configuration file to load, if any.
///
/// `explicit` takes precedence over [`CONFIG_PATH_ENV`], which takes
/// precedence over the discovered candidates.
///
/// # Errors
///
/// Returns [`GenError::MissingConfig`] when an explicit path does not name an
/// existing file.
pub fn resolve_config_path(explicit: Option<&Utf8Path>) -> Result<Option<Utf8PathBuf>, GenError> {
    let requested = explicit
        .map(Utf8Path::to_path_buf)
        .or_else(|| env_path(CONFIG_PATH_ENV));
    if let Some(path) = requested {
        return if path.is_file() {
            Ok(Some(path))
        } else {
            Err(GenError::MissingConfig(path))
        };
    }
    Ok(candidates().into_iter().find(|path| path.is_file()))
}

/// Lists candidate configuration paths in priority order, without duplicates.
#[must_use]
pub fn candidates() -> Vec<Utf8PathBuf> {
    let mut paths = Vec::new();
    let mut seen = HashSet::new();

    if let Some(xdg) = env_path("XDG_CONFIG_HOME") {
        push_unique(&mut paths, &mut seen, xdg.join(APP_NAME).join(CONFIG_FILE_NAME));
    }
    if let Some(home) = home() {
        push_unique(
            &mut paths,
            &mut seen,
            home.join(".config").join(APP_NAME).join(CONFIG_FILE_NAME),
        );
        push_unique(&mut paths, &mut seen, home.join(DOTFILE_NAME));
    }
    if let Some(cwd) = std::env::current_dir().ok().and_then(to_utf8) {
        push_unique(&mut paths, &mut seen, cwd.join(DOTFILE_NAME));
    }

    paths
}

fn push_unique(paths: &mut Vec<Utf8PathBuf>, seen: &mut HashSet<Utf8PathBuf>, candidate: Utf8PathBuf) {
    if seen.insert(candidate.clone()) {
        paths.push(candidate);
    }
}

fn home() -> Option<Utf8PathBuf> {
    std::env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(home_dir)
        .and_then(to_utf8)
}

fn env_path(key: &str) -> Option<Utf8PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .and_then(to_utf8)
}

fn to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}

#[cfg(test)]
mod tests {
    //! Tests for configuration discovery.

    use super::*;
    use figment::Jail;
    use rstest::rstest;

    fn jail_root(jail: &Jail) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(jail.directory().to_path_buf()).expect("jail path is UTF-8")
    }

    fn isolate(jail: &mut Jail) -> Utf8PathBuf {
        let root = jail_root(jail);
        jail.clear_env();
        jail.set_env("HOME", root.join("home"));
        jail.set_env("XDG_CONFIG_HOME", root.join("xdg"));
        root
    }

    #[rstest]
    fn candidates_follow_priority_order() {
        Jail::expect_with(|jail| {
            let root = isolate(jail);
            let expected = vec![
                root.join("xdg/apdu-gen/config.toml"),
                root.join("home/.config/apdu-gen/config.toml"),
                root.join("home/.apdu-gen.toml"),
                root.join(".apdu-gen.toml"),
            ];
            assert_eq!(candidates(), expected);
            Ok(())
        });
    }

    #[rstest]
    fn duplicate_candidates_are_dropped() {
        Jail::expect_with(|jail| {
            let root = jail_root(jail);
            jail.clear_env();
            jail.set_env("HOME", &root);
            jail.set_env("XDG_CONFIG_HOME", root.join(".config"));
            let paths = candidates();
            assert_eq!(
                paths,
                vec![
                    root.join(".config/apdu-gen/config.toml"),
                    root.join(".apdu-gen.toml"),
                ]
            );
            Ok(())
        });
    }

    #[rstest]
    fn first_existing_candidate_wins() {
        Jail::expect_with(|jail| {
            let root = isolate(jail);
            jail.create_file(".apdu-gen.toml", "dialect = \"go\"")?;
            std::fs::create_dir_all(root.join("home")).map_err(|err| err.to_string())?;
            jail.create_file("home/.apdu-gen.toml", "dialect = \"rust\"")?;

            let found = resolve_config_path(None).map_err(|err| err.to_string())?;
            assert_eq!(found, Some(root.join("home/.apdu-gen.toml")));
            Ok(())
        });
    }

    #[rstest]
    fn no_candidates_means_no_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let found = resolve_config_path(None).map_err(|err| err.to_string())?;
            assert_eq!(found, None);
            Ok(())
        });
    }

    #[rstest]
    fn explicit_path_must_exist() {
        Jail::expect_with(|jail| {
            let root = isolate(jail);
            let missing = root.join("missing.toml");
            let err = resolve_config_path(Some(&missing)).expect_err("missing file");
            assert!(matches!(err, GenError::MissingConfig(ref path) if *path == missing));
            Ok(())
        });
    }

    #[rstest]
    fn environment_path_is_used_when_no_flag_is_given() {
        Jail::expect_with(|jail| {
            let root = isolate(jail);
            jail.create_file("custom.toml", "check = true")?;
            jail.set_env(CONFIG_PATH_ENV, root.join("custom.toml"));

            let found = resolve_config_path(None).map_err(|err| err.to_string())?;
            assert_eq!(found, Some(root.join("custom.toml")));
            Ok(())
        });
    }
}
