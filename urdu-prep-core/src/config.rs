//! Run settings.
//!
//! Built-in defaults reproduce the fixed filenames of a plain `urdu-prep`
//! invocation. [`PipelineConfig::from_env`] overlays `URDU_PREP_*` variables,
//! and the binary applies its flags on top.

use std::env;
use std::path::{Component, Path, PathBuf};

use urdu_prep_types::WindowConfig;

use crate::error::{PipelineError, Result};

/// Source TSV corpus read by the clean stage.
pub const DEFAULT_INPUT: &str = "final_main_dataset.tsv";
/// Written by the clean stage, read by the group stage.
pub const DEFAULT_CLEANED_OUTPUT: &str = "cleaned_urdu_text.txt";
/// Written by the group stage.
pub const DEFAULT_GROUPS_OUTPUT: &str = "sentence_groups.txt";
/// 0-based index of the sentence column in the source TSV.
pub const DEFAULT_TEXT_COLUMN: usize = 2;
/// Cleaned sentences kept in [`CleanReport::preview`](crate::CleanReport).
pub const DEFAULT_PREVIEW: usize = 5;
/// Rendered windows kept in [`GroupReport::preview`](crate::GroupReport).
pub const DEFAULT_GROUP_PREVIEW: usize = 3;

/// Paths and knobs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Source TSV corpus.
    pub input: PathBuf,
    /// Intermediate artifact: one normalized sentence per line.
    pub cleaned_output: PathBuf,
    /// Final artifact: one space-joined window per line.
    pub groups_output: PathBuf,
    /// 0-based TSV column holding the sentence text.
    pub text_column: usize,
    /// Sentences per group.
    pub window: WindowConfig,
    /// Leading cleaned sentences kept for display.
    pub preview: usize,
    /// Leading groups kept for display.
    pub group_preview: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            cleaned_output: PathBuf::from(DEFAULT_CLEANED_OUTPUT),
            groups_output: PathBuf::from(DEFAULT_GROUPS_OUTPUT),
            text_column: DEFAULT_TEXT_COLUMN,
            window: WindowConfig::default(),
            preview: DEFAULT_PREVIEW,
            group_preview: DEFAULT_GROUP_PREVIEW,
        }
    }
}

impl PipelineConfig {
    /// Defaults overlaid with `URDU_PREP_*` environment variables.
    ///
    /// Unset or unparsable variables keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str, fallback: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(fallback)
        };

        Self {
            input: lookup("URDU_PREP_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input),
            cleaned_output: lookup("URDU_PREP_CLEANED")
                .map(PathBuf::from)
                .unwrap_or(defaults.cleaned_output),
            groups_output: lookup("URDU_PREP_GROUPS")
                .map(PathBuf::from)
                .unwrap_or(defaults.groups_output),
            text_column: number("URDU_PREP_TEXT_COLUMN", defaults.text_column),
            window: WindowConfig::new(number(
                "URDU_PREP_GROUP_SIZE",
                defaults.window.group_size,
            )),
            preview: number("URDU_PREP_PREVIEW", defaults.preview),
            group_preview: number("URDU_PREP_GROUP_PREVIEW", defaults.group_preview),
        }
    }

    /// Rejects settings no run could honour.
    pub fn validate(&self) -> Result<()> {
        if self.window.group_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "group size must be at least 1".into(),
            ));
        }
        if same_path(&self.cleaned_output, &self.input)
            || same_path(&self.groups_output, &self.input)
        {
            return Err(PipelineError::InvalidConfig(format!(
                "output path '{}' would overwrite the input",
                self.input.display()
            )));
        }
        if same_path(&self.cleaned_output, &self.groups_output) {
            return Err(PipelineError::InvalidConfig(format!(
                "groups output '{}' would overwrite the cleaned text",
                self.groups_output.display()
            )));
        }
        Ok(())
    }
}

/// `true` when `a` and `b` name the same file.
///
/// Paths are compared after dropping `.` components; when both exist their
/// canonical forms are compared too, which resolves `..` and symlinks.
fn same_path(a: &Path, b: &Path) -> bool {
    let lexical = |p: &Path| -> PathBuf {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    };
    if lexical(a) == lexical(b) {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_use_fixed_filenames() {
        let c = PipelineConfig::default();
        assert_eq!(c.input, PathBuf::from("final_main_dataset.tsv"));
        assert_eq!(c.cleaned_output, PathBuf::from("cleaned_urdu_text.txt"));
        assert_eq!(c.groups_output, PathBuf::from("sentence_groups.txt"));
        assert_eq!(c.text_column, 2);
        assert_eq!(c.window.group_size, 5);
        assert_eq!(c.preview, 5);
        assert_eq!(c.group_preview, 3);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn env_overrides_apply() {
        let c = PipelineConfig::from_lookup(lookup_from(&[
            ("URDU_PREP_INPUT", "corpus.tsv"),
            ("URDU_PREP_GROUP_SIZE", "3"),
            ("URDU_PREP_TEXT_COLUMN", " 1 "),
            ("URDU_PREP_GROUP_PREVIEW", "7"),
        ]));
        assert_eq!(c.input, PathBuf::from("corpus.tsv"));
        assert_eq!(c.window.group_size, 3);
        assert_eq!(c.text_column, 1);
        assert_eq!(c.preview, DEFAULT_PREVIEW);
        assert_eq!(c.group_preview, 7);
    }

    #[test]
    fn unparsable_env_falls_back() {
        let c = PipelineConfig::from_lookup(lookup_from(&[("URDU_PREP_GROUP_SIZE", "five")]));
        assert_eq!(c.window.group_size, 5);
    }

    #[test]
    fn zero_group_size_rejected() {
        let mut c = PipelineConfig::default();
        c.window.group_size = 0;
        assert!(matches!(c.validate(), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn output_over_input_rejected() {
        let mut c = PipelineConfig::default();
        c.cleaned_output = c.input.clone();
        assert!(matches!(c.validate(), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn dot_prefixed_output_over_input_rejected() {
        let mut c = PipelineConfig::default();
        c.groups_output = PathBuf::from("./final_main_dataset.tsv");
        assert!(matches!(c.validate(), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn groups_over_cleaned_rejected() {
        let mut c = PipelineConfig::default();
        c.groups_output = PathBuf::from("./cleaned_urdu_text.txt");
        let err = c.validate().expect_err("same artifact");
        assert!(err.to_string().contains("overwrite the cleaned text"));
    }

    #[test]
    fn existing_alias_of_input_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("sub")).expect("mkdir");
        std::fs::write(dir.path().join("corpus.tsv"), "h\n").expect("seed");

        let c = PipelineConfig {
            input: dir.path().join("corpus.tsv"),
            cleaned_output: dir.path().join("sub").join("..").join("corpus.tsv"),
            ..PipelineConfig::default()
        };
        assert!(matches!(c.validate(), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn distinct_paths_pass() {
        let c = PipelineConfig {
            input: PathBuf::from("data/in.tsv"),
            cleaned_output: PathBuf::from("data/in.txt"),
            groups_output: PathBuf::from("in.tsv"),
            ..PipelineConfig::default()
        };
        assert!(c.validate().is_ok());
    }
}
