mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ConversionSettings, CorsSettings, DatabaseProviderSetting, DatabaseSettings,
    DispatchModeSetting, DispatchSettings, LoggingSettings, PaginationSettings, ServerSettings,
    Settings, StorageProviderSetting, StorageSettings,
};
