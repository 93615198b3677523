use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs a tracing subscriber when `KONF_LOG` holds a filter (e.g. `debug`).
///
/// Output goes to `KONF_LOG_FILE` when set so the full-screen prompt on stdout
/// stays clean; otherwise to stderr. A log file that cannot be opened disables
/// logging rather than spilling onto the prompt.
pub fn init() {
    let Ok(filter) = env::var("KONF_LOG") else {
        return;
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false);

    let installed = match env::var("KONF_LOG_FILE") {
        Ok(path) => match open_log_file(&path) {
            Ok(f) => builder.with_ansi(false).with_writer(Mutex::new(f)).try_init(),
            Err(e) => {
                eprintln!("{e}; logging disabled");
                return;
            }
        },
        Err(_) => builder.with_writer(io::stderr).try_init(),
    };
    if let Err(e) = installed {
        eprintln!("failed to install logger: {e}");
    }
}

fn open_log_file(path: &str) -> Result<File, String> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("failed to open log file {path}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unopenable_log_file_is_reported() {
        let err = open_log_file("/nonexistent/konf/konf.log").unwrap_err();
        assert!(err.starts_with("failed to open log file /nonexistent/konf/konf.log"));
    }

    #[test]
    fn log_file_is_created_for_append() {
        let path = env::temp_dir().join(format!("konf-log-{}.log", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        assert!(open_log_file(&path_str).is_ok());
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
