use std::path::PathBuf;

pub fn data_dir() -> PathBuf {
    // Keep ~/.local/share/v1deo on every Unix (including macOS) so log and
    // state paths stay consistent across machines.
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join("v1deo")
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("v1deo")
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("v1deo")
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("v1deo")
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}
