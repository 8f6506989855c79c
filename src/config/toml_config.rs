use crate::adapters::csv_source::DEFAULT_DELIMITER;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub source: SourceConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub preload: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl PlannerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COURSE_FILE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = &self.source.path {
            validation::validate_path("source.path", path)?;
        }

        self.delimiter()?;

        if self.preload() {
            validation::validate_required_field("source.path", &self.source.path)?;
        }

        Ok(())
    }

    /// 取得資料檔路徑
    pub fn data_path(&self) -> Option<&str> {
        self.source.path.as_deref()
    }

    /// 取得欄位分隔字元
    pub fn delimiter(&self) -> Result<u8> {
        match &self.source.delimiter {
            Some(value) => validation::validate_delimiter("source.delimiter", value),
            None => Ok(DEFAULT_DELIMITER),
        }
    }

    /// 是否在顯示選單前先載入資料
    pub fn preload(&self) -> bool {
        self.session.preload.unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl Validate for PlannerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
path = "ABCU_Advising_Program_Input.csv"
delimiter = ";"

[session]
preload = true

[logging]
verbose = true
json = false
"#;

        let config = PlannerConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_path(), Some("ABCU_Advising_Program_Input.csv"));
        assert_eq!(config.delimiter().unwrap(), b';');
        assert!(config.preload());
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = PlannerConfig::from_toml_str("").unwrap();

        assert_eq!(config.data_path(), None);
        assert_eq!(config.delimiter().unwrap(), b',');
        assert!(!config.preload());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COURSE_PLANNER_TEST_FILE", "courses-2026.csv");

        let toml_content = r#"
[source]
path = "${COURSE_PLANNER_TEST_FILE}"
"#;

        let config = PlannerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_path(), Some("courses-2026.csv"));

        std::env::remove_var("COURSE_PLANNER_TEST_FILE");
    }

    #[test]
    fn test_unset_env_var_is_left_as_is() {
        let toml_content = r#"
[source]
path = "${COURSE_PLANNER_SURELY_UNSET_VAR}"
"#;

        let config = PlannerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.data_path(),
            Some("${COURSE_PLANNER_SURELY_UNSET_VAR}")
        );
    }

    #[test]
    fn test_config_validation() {
        let bad_delimiter = PlannerConfig::from_toml_str("[source]\ndelimiter = \"::\"\n").unwrap();
        assert!(bad_delimiter.validate().is_err());

        let preload_without_path =
            PlannerConfig::from_toml_str("[session]\npreload = true\n").unwrap();
        assert!(matches!(
            preload_without_path.validate(),
            Err(PlannerError::MissingConfigError { .. })
        ));

        let empty_path = PlannerConfig::from_toml_str("[source]\npath = \"\"\n").unwrap();
        assert!(empty_path.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = PlannerConfig::from_toml_str("[source\npath = 1").unwrap_err();
        assert!(matches!(err, PlannerError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\npath = \"catalog.csv\"\n")
            .unwrap();

        let config = PlannerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_path(), Some("catalog.csv"));
    }
}
