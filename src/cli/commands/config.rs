use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::check::{missing_keys, unknown_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (defaults in use).",
                    path.display()
                ));
            } else {
                let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
                let missing = missing_keys(&content)?;
                let unknown = unknown_keys(&content)?;

                for key in &unknown {
                    warning(format!("Unknown configuration key: {key}"));
                }

                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    info(format!("Adding missing keys: {}", missing.join(", ")));
                    Config::from_yaml(&content)?.save()?;
                    success(format!("Configuration updated: {}", path.display()));
                }
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            match Command::new(&editor_to_use).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using '{}'",
                        editor_to_use
                    ));
                }
                Ok(_) | Err(_) => {
                    warning(format!(
                        "Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    ));

                    let fallback = Command::new(&default_editor)
                        .arg(&path)
                        .status()
                        .map_err(|e| AppError::Config(e.to_string()))?;
                    if !fallback.success() {
                        return Err(AppError::Config(format!(
                            "failed to edit configuration file using '{}'",
                            default_editor
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}
