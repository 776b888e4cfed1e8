//! 自动注册选项加载

use di_abstractions::RegistrationOptions;
use infrastructure_common::{ConfigError, ConfigResult};
use std::path::Path;
use tracing::{debug, error};

/// 环境变量前缀，例如 `AUTOREG_STRATEGY=self`
pub const ENV_PREFIX: &str = "AUTOREG";

/// 未指定文件时尝试加载的默认配置（可不存在）
pub const DEFAULT_CONFIG_NAME: &str = "config/registration";

/// 加载自动注册选项
///
/// 先读取配置文件，再用 `AUTOREG_*` 环境变量覆盖，最后校验。
/// 显式指定的文件必须存在。
pub fn load_registration_options(path: Option<&Path>) -> ConfigResult<RegistrationOptions> {
    load_registration_options_with_prefix(path, ENV_PREFIX)
}

/// 以指定的环境变量前缀加载自动注册选项
///
/// `code_units` 按逗号拆分为列表。
pub fn load_registration_options_with_prefix(
    path: Option<&Path>,
    env_prefix: &str,
) -> ConfigResult<RegistrationOptions> {
    let mut builder = config::Config::builder();

    builder = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载注册配置文件: {}", path.display());
            builder.add_source(config::File::from(path))
        }
        None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
    };

    let settings = builder
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("code_units"),
        )
        .build()
        .map_err(|e| {
            error!("注册配置构建失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

    let options: RegistrationOptions = settings.try_deserialize().map_err(|e| {
        error!("注册配置绑定失败: {}", e);
        ConfigError::ParseError {
            source: Box::new(e),
        }
    })?;

    options.validate()?;
    debug!("注册配置加载完成: {:?}", options);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use di_abstractions::RegistrationStrategy;
    use infrastructure_common::Lifetime;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_toml_file() {
        let file = write_config(
            r#"
default_lifetime = "singleton"
strategy = "default_interface_and_self"
code_units = ["app", "plugins"]
"#,
        );

        let options = load_registration_options(Some(file.path())).unwrap();
        assert_eq!(options.default_lifetime, Lifetime::Singleton);
        assert_eq!(options.strategy, RegistrationStrategy::DefaultInterfaceAndSelf);
        assert_eq!(options.code_units, vec!["app".to_string(), "plugins".to_string()]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let file = write_config("strategy = \"self\"\n");
        let options = load_registration_options(Some(file.path())).unwrap();
        assert_eq!(options.strategy, RegistrationStrategy::SelfType);
        assert_eq!(options.default_lifetime, Lifetime::Scoped);
    }

    #[test]
    fn test_missing_file_and_invalid_values() {
        let err = load_registration_options(Some(Path::new("/nonexistent/registration.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));

        let file = write_config("strategy = \"everything\"\n");
        let err = load_registration_options(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));

        let file = write_config("code_units = [\"app\", \"\"]\n");
        let err = load_registration_options(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_environment_overrides_file() {
        std::env::set_var("REGTEST_OVERRIDE_STRATEGY", "base_class_and_self");
        std::env::set_var("REGTEST_OVERRIDE_DEFAULT_LIFETIME", "singleton");
        std::env::set_var("REGTEST_OVERRIDE_CODE_UNITS", "app,plugins");

        let file = write_config(
            r#"
default_lifetime = "transient"
strategy = "self"
code_units = ["core"]
"#,
        );
        let options =
            load_registration_options_with_prefix(Some(file.path()), "REGTEST_OVERRIDE").unwrap();
        assert_eq!(options.default_lifetime, Lifetime::Singleton);
        assert_eq!(options.strategy, RegistrationStrategy::BaseClassAndSelf);
        assert_eq!(options.code_units, vec!["app".to_string(), "plugins".to_string()]);

        let options = load_registration_options_with_prefix(None, "REGTEST_OVERRIDE").unwrap();
        assert_eq!(options.default_lifetime, Lifetime::Singleton);
        assert_eq!(options.strategy, RegistrationStrategy::BaseClassAndSelf);
        assert_eq!(options.code_units, vec!["app".to_string(), "plugins".to_string()]);
    }

    #[test]
    fn test_environment_single_code_unit_is_a_list() {
        std::env::set_var("REGTEST_SINGLE_CODE_UNITS", "app");

        let options = load_registration_options_with_prefix(None, "REGTEST_SINGLE").unwrap();
        assert_eq!(options.code_units, vec!["app".to_string()]);
        assert_eq!(options.strategy, RegistrationStrategy::DefaultInterface);
        assert_eq!(options.default_lifetime, Lifetime::Scoped);
    }
}
