use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use urdu_prep_core::config::PipelineConfig;
use urdu_prep_core::types::WindowConfig;
use urdu_prep_core::{CleanReport, GroupReport, Pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "urdu-prep",
    version,
    about = "Normalize an Urdu TSV corpus and group its sentences into sliding windows."
)]
pub struct Cli {
    /// Stage to run; both when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub paths: PathArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Clean, then group.
    Run,
    /// Normalize the TSV corpus into the cleaned text file.
    Clean,
    /// Split the cleaned text into sentences and write overlapping groups.
    Group,
}

/// Overrides for the `URDU_PREP_*` environment and the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct PathArgs {
    /// Source TSV corpus.
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,
    /// Cleaned text file (clean output, group input).
    #[arg(long, global = true)]
    pub cleaned: Option<PathBuf>,
    /// Sentence groups file.
    #[arg(long, global = true)]
    pub groups: Option<PathBuf>,
    /// 0-based TSV column holding the sentence.
    #[arg(long, global = true)]
    pub text_column: Option<usize>,
    /// Sentences per group.
    #[arg(long, global = true)]
    pub group_size: Option<usize>,
    /// Cleaned sentences to echo after cleaning.
    #[arg(long, global = true)]
    pub preview: Option<usize>,
    /// Groups to echo after grouping.
    #[arg(long, global = true)]
    pub group_preview: Option<usize>,
}

impl PathArgs {
    fn apply(self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(cleaned) = self.cleaned {
            config.cleaned_output = cleaned;
        }
        if let Some(groups) = self.groups {
            config.groups_output = groups;
        }
        if let Some(column) = self.text_column {
            config.text_column = column;
        }
        if let Some(size) = self.group_size {
            config.window = WindowConfig::new(size);
        }
        if let Some(preview) = self.preview {
            config.preview = preview;
        }
        if let Some(group_preview) = self.group_preview {
            config.group_preview = group_preview;
        }
        config
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let command = self.command.unwrap_or(Command::Run);
        let config = self.paths.apply(PipelineConfig::from_env());
        tracing::debug!("{:?} with {:?}", command, config);
        let pipeline = Pipeline::new(config).context("invalid settings")?;

        match command {
            Command::Run => {
                print_clean(&pipeline, &pipeline.clean()?);
                print_group(&pipeline, &pipeline.group()?);
            }
            Command::Clean => print_clean(&pipeline, &pipeline.clean()?),
            Command::Group => print_group(&pipeline, &pipeline.group()?),
        }
        Ok(())
    }
}

fn print_clean(pipeline: &Pipeline, report: &CleanReport) {
    println!("Successfully processed {} sentences", report.kept);
    println!(
        "Cleaned text saved to: {}",
        pipeline.config().cleaned_output.display()
    );
    if !report.preview.is_empty() {
        println!("\nFirst {} cleaned sentences:", report.preview.len());
        for (i, sentence) in report.preview.iter().enumerate() {
            println!("{}. {}", i + 1, sentence);
        }
    }
}

fn print_group(pipeline: &Pipeline, report: &GroupReport) {
    if report.is_empty() {
        println!("No text found to process.");
        return;
    }
    println!("Found {} lines of text.", report.lines);
    println!("Found {} sentences.", report.sentences);
    println!(
        "Successfully saved {} groups to {}",
        report.windows,
        pipeline.config().groups_output.display()
    );
    if !report.preview.is_empty() {
        println!("\nFirst {} groups:", report.preview.len());
        for (i, group) in report.preview.iter().enumerate() {
            println!("Group {}: {}", i + 1, group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_run_with_defaults() {
        let cli = Cli::try_parse_from(["urdu-prep"]).expect("parse");
        assert_eq!(cli.command, None);
        let config = cli.paths.apply(PipelineConfig::default());
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "urdu-prep",
            "group",
            "--cleaned",
            "in.txt",
            "--group-size",
            "3",
        ])
        .expect("parse");
        assert_eq!(cli.command, Some(Command::Group));

        let config = cli.paths.apply(PipelineConfig::default());
        assert_eq!(config.cleaned_output, PathBuf::from("in.txt"));
        assert_eq!(config.window.group_size, 3);
        assert_eq!(config.input, PipelineConfig::default().input);
    }

    #[test]
    fn previews_are_set_independently() {
        let cli = Cli::try_parse_from(["urdu-prep", "--group-preview", "1"]).expect("parse");
        let config = cli.paths.apply(PipelineConfig::default());
        assert_eq!(config.group_preview, 1);
        assert_eq!(config.preview, PipelineConfig::default().preview);
    }

    #[test]
    fn non_numeric_group_size_rejected() {
        assert!(Cli::try_parse_from(["urdu-prep", "--group-size", "many"]).is_err());
    }
}
