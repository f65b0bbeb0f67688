use racesheet::presentation::config::{
    DatabaseProviderSetting, DispatchModeSetting, Environment, Settings, StorageProviderSetting,
};

#[test]
fn given_no_configuration_when_using_defaults_then_local_in_process_setup() {
    let settings = Settings::default();

    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.database.provider, DatabaseProviderSetting::Postgres);
    assert_eq!(settings.storage.provider, StorageProviderSetting::Local);
    assert_eq!(settings.dispatch.mode, DispatchModeSetting::InProcess);
    assert_eq!(settings.pagination.default_limit, 20);
    assert_eq!(settings.pagination.max_limit, 50);
    assert_eq!(settings.conversion.timeout_secs, 1800);
}

#[test]
fn given_environment_aliases_when_parsing_then_mapped_case_insensitively() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from("dev".to_string()),
        Ok(Environment::Local)
    );
    assert_eq!(
        Environment::try_from(" TEST ".to_string()),
        Ok(Environment::Test)
    );
}

#[test]
fn given_unknown_environment_when_parsing_then_error_names_value() {
    let err = Environment::try_from("staging".to_string()).unwrap_err();
    assert!(err.contains("staging"));
}

#[test]
fn given_environment_when_formatting_then_matches_overlay_file_suffix() {
    assert_eq!(Environment::Test.as_str().to_lowercase(), "test");
    assert!(Environment::Prod.is_production());
    assert!(!Environment::Local.is_production());
}
