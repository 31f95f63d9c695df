use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or validating the scene config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failures while loading a model for an entity.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("model has no triangles")]
    Empty,

    #[error("asset loader thread exited before delivering")]
    Disconnected,
}

/// Window, GL context and shader failures. All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum GfxError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("failed to create window: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),

    #[error("{kind} shader compile error: {log}")]
    Compile { kind: &'static str, log: String },

    #[error("shader link error: {0}")]
    Link(String),
}

/// Anything that stops the demo from starting or keeps the loop from running.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gfx(#[from] GfxError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_field() {
        let err = ConfigError::Invalid {
            field: "projectile.mass",
            reason: "must be a positive number, got 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for projectile.mass: must be a positive number, got 0"
        );
        let app: AppError = err.into();
        assert!(app.to_string().starts_with("invalid config value"));
    }

    #[test]
    fn malformed_model_reports_line() {
        let err = AssetError::Malformed {
            line: 12,
            reason: "bad number \"x\"".to_string(),
        };
        assert_eq!(err.to_string(), "malformed model at line 12: bad number \"x\"");
    }
}
