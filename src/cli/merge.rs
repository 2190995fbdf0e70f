// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        self.input = self.input.or(config.input);
        self.output_folder = self.output_folder.or(config.output_folder);
        self.shuffled_file = self.shuffled_file.or(config.shuffled_file);

        // Dataset
        self.total_snps = self.total_snps.or(config.total_snps);
        self.total_individuals = self.total_individuals.or(config.total_individuals);

        // Encoding
        self.alleles = self.alleles.or(config.alleles);
        self.missing_char = self.missing_char.or(config.missing_char);

        // Window
        self.window_size = self.window_size.or(config.window_size);
        self.window_index = self.window_index.or(config.window_index);

        // Switches can only be turned on from the config file
        if !self.binary && config.binary.unwrap_or(false) {
            self.binary = true;
        }
        if !self.pivoted && config.pivoted.unwrap_or(false) {
            self.pivoted = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_values_take_precedence() {
        let args = Args::parse(
            "asdist",
            &["--input", "cli.txt", "--window-index", "4"],
        )
        .unwrap();
        let config = Config {
            input: Some("config.txt".to_string()),
            output_folder: Some("results".to_string()),
            window_index: Some(9),
            window_size: Some(100),
            binary: Some(true),
            pivoted: Some(false),
            ..Config::default()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.input.as_deref(), Some("cli.txt"));
        assert_eq!(merged.window_index, Some(4));
        assert_eq!(merged.output_folder.as_deref(), Some("results"));
        assert_eq!(merged.window_size, Some(100));
        assert!(merged.binary);
        assert!(!merged.pivoted);
    }

    #[test]
    fn test_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(&path, "total_snps = 30\npivoted = true\n").unwrap();

        let args = Args::parse("asdist", &["--total-snps", "20"]).unwrap();
        let merged = args.with_config_file(path.to_str().unwrap()).unwrap();
        assert_eq!(merged.total_snps, Some(20));
        assert!(merged.pivoted);

        let args = Args::default();
        assert!(args.with_config_file("/nonexistent/run.toml").is_err());
    }
}
