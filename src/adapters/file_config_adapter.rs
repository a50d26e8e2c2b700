//! INI file configuration adapter.

use crate::domain::error::AlgoError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AlgoError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| AlgoError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, AlgoError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| AlgoError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }

    fn get_usize(&self, section: &str, key: &str, default: usize) -> usize {
        self.config
            .getuint(section, key)
            .ok()
            .flatten()
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[data]
dir = ./tables
max_tables = 25

[strategy]
preset = fixed_target
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_string("data", "dir"), Some("./tables".to_string()));
        assert_eq!(adapter.get_usize("data", "max_tables", 100), 25);
        assert_eq!(
            adapter.get_string("strategy", "preset"),
            Some("fixed_target".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[data]\ndir = x\n").unwrap();
        assert_eq!(adapter.get_string("data", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
        assert!(adapter.has_key("data", "dir"));
        assert!(!adapter.has_key("data", "missing"));
    }

    #[test]
    fn get_usize_returns_default_for_missing_or_bad() {
        let adapter = FileConfigAdapter::from_string("[data]\nmax_tables = many\n").unwrap();
        assert_eq!(adapter.get_usize("data", "max_tables", 100), 100);
        assert_eq!(adapter.get_usize("data", "missing", 7), 7);
    }

    #[test]
    fn get_double_returns_value() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nprofit_target_pct = 0.005\n").unwrap();
        assert_eq!(adapter.get_double("strategy", "profit_target_pct", 0.0), 0.005);
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nprofit_target_pct = lots\n").unwrap();
        assert_eq!(adapter.get_double("strategy", "profit_target_pct", 0.1), 0.1);
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[strategy]\na = true\nb = yes\nc = 1\nd = false\ne = no\nf = 0\n",
        )
        .unwrap();
        assert!(adapter.get_bool("strategy", "a", false));
        assert!(adapter.get_bool("strategy", "b", false));
        assert!(adapter.get_bool("strategy", "c", false));
        assert!(!adapter.get_bool("strategy", "d", true));
        assert!(!adapter.get_bool("strategy", "e", true));
        assert!(!adapter.get_bool("strategy", "f", true));
        assert!(adapter.get_bool("strategy", "missing", true));
    }

    #[test]
    fn dotted_sections_are_separate() {
        let content = "[strategy]\nallow_reversal = true\n\n[strategy.put]\nallow_reversal = false\n";
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert!(adapter.get_bool("strategy", "allow_reversal", false));
        assert!(!adapter.get_bool("strategy.put", "allow_reversal", true));
        assert!(!adapter.has_key("strategy.call", "allow_reversal"));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[report]\noutput_dir = /tmp/out\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "output_dir"),
            Some("/tmp/out".to_string())
        );
    }

    #[test]
    fn from_file_missing_file_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(result, Err(AlgoError::ConfigParse { .. })));
    }
}
