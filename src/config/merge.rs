//! CLI overrides layered on top of file configuration.

use crate::domain::{SegmenterConfig, SplitterKind, UnitMode};

/// Settings given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub token_budget: Option<usize>,
    pub chars_per_token: Option<f64>,
    pub paragraph_char_budget: Option<usize>,
    pub mode: Option<UnitMode>,
    pub splitter: Option<SplitterKind>,
    pub normalize: Option<bool>,
    pub annotated: Option<bool>,
    pub known_styles: Option<Vec<String>>,
}

/// Apply every override that was given to `config`.
pub fn merge_cli_with_config(config: SegmenterConfig, cli: CliOverrides) -> SegmenterConfig {
    SegmenterConfig {
        token_budget: cli.token_budget.unwrap_or(config.token_budget),
        chars_per_token: cli.chars_per_token.unwrap_or(config.chars_per_token),
        paragraph_char_budget: cli.paragraph_char_budget.unwrap_or(config.paragraph_char_budget),
        mode: cli.mode.unwrap_or(config.mode),
        splitter: cli.splitter.unwrap_or(config.splitter),
        normalize: cli.normalize.unwrap_or(config.normalize),
        annotated: cli.annotated.unwrap_or(config.annotated),
        known_styles: cli.known_styles.unwrap_or(config.known_styles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_keep_file_values() {
        let file = SegmenterConfig { token_budget: 99, annotated: true, ..Default::default() };
        assert_eq!(merge_cli_with_config(file.clone(), CliOverrides::default()), file);
    }

    #[test]
    fn cli_values_win() {
        let file = SegmenterConfig { token_budget: 99, chars_per_token: 2.0, ..Default::default() };
        let merged = merge_cli_with_config(
            file,
            CliOverrides {
                token_budget: Some(40),
                mode: Some(UnitMode::Line),
                normalize: Some(false),
                known_styles: Some(vec!["SHOUT".into()]),
                ..CliOverrides::default()
            },
        );
        assert_eq!(merged.token_budget, 40);
        assert_eq!(merged.chars_per_token, 2.0);
        assert_eq!(merged.mode, UnitMode::Line);
        assert!(!merged.normalize);
        assert_eq!(merged.known_styles, vec!["SHOUT".to_string()]);
    }
}
