//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which writes a `PrCheck.toml`
//! populated with the default step commands. In interactive mode each
//! command can be edited before the file is written.
//!
//! 此模块实现了 `init` 命令，用于写入填充了默认步骤命令的 `PrCheck.toml`。
//! 在交互模式下，每个命令都可以在写入文件之前进行编辑。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use rust_i18n::t;
use std::path::Path;

use crate::core::config::{CheckConfig, Commands};
use crate::infra::fs::write_file;

/// Runs the wizard that generates the config file at `output`.
///
/// An existing file is only replaced with `force` or after the user
/// confirms. In non-interactive mode an existing file without `force` is
/// left alone.
///
/// 运行生成 `output` 配置文件的向导。
/// 只有在指定 `force` 或用户确认后才会替换已存在的文件。
/// 在非交互模式下，若文件已存在且未指定 `force`，则保持不变。
pub fn run_init_wizard(
    output: &Path,
    language: &str,
    force: bool,
    non_interactive: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init.welcome", locale = language).cyan().bold());
        println!("{}", t!("init.description", locale = language));
    }

    if output.exists() && !force {
        if non_interactive {
            println!(
                "{}",
                t!("init.file_exists", locale = language, path = output.display()).red()
            );
            println!("{}", t!("init.use_force", locale = language).yellow());
            return Ok(());
        }
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", locale = language, path = output.display()))
            .default(false)
            .interact()
            .context(t!("init.confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    let mut config = CheckConfig {
        language: language.to_string(),
        ..CheckConfig::default()
    };

    if !non_interactive {
        config.job_name = Input::with_theme(&theme)
            .with_prompt(t!("init.job_name_prompt", locale = language))
            .default(config.job_name)
            .interact_text()
            .context(t!("init.confirmation_failed", locale = language).to_string())?;
        edit_commands(&theme, &mut config.commands, language)?;
    }

    write_config(output, &config, language)
}

/// Prompts for every command, pre-filled with the current value.
/// Optional commands may be left empty to disable them.
fn edit_commands(theme: &ColorfulTheme, commands: &mut Commands, language: &str) -> Result<()> {
    let required = [
        ("update_packages", &mut commands.update_packages),
        ("integration_report", &mut commands.integration_report),
        ("unit_report", &mut commands.unit_report),
        ("coverage_upload", &mut commands.coverage_upload),
        ("report_upload", &mut commands.report_upload),
        ("unit_local_changes", &mut commands.unit_local_changes),
        ("integration_coverage", &mut commands.integration_coverage),
        ("unit_coverage", &mut commands.unit_coverage),
    ];
    for (key, value) in required {
        *value = Input::with_theme(theme)
            .with_prompt(t!("init.command_prompt", locale = language, key = key))
            .default(value.clone())
            .interact_text()
            .context(t!("init.confirmation_failed", locale = language).to_string())?;
    }

    let optional = [
        ("download_artifact", &mut commands.download_artifact),
        ("change_summary", &mut commands.change_summary),
        ("build_targets", &mut commands.build_targets),
    ];
    for (key, value) in optional {
        let answer: String = Input::with_theme(theme)
            .with_prompt(t!("init.optional_command_prompt", locale = language, key = key))
            .default(value.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()
            .context(t!("init.confirmation_failed", locale = language).to_string())?;
        *value = Some(answer.trim().to_string()).filter(|a| !a.is_empty());
    }
    Ok(())
}

fn write_config(path: &Path, config: &CheckConfig, language: &str) -> Result<()> {
    let toml_string = config
        .to_toml()
        .context(t!("init.serialize_failed", locale = language).to_string())?;

    write_file(path, &toml_string)?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init.success", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init.usage_hint", locale = language));

    Ok(())
}
