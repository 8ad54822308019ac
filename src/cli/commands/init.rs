use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::{
    cli::{exit_status::ExitStatus, report::print_created},
    config::{CONFIG_FILE_NAME, default_config_json},
};

pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;
    print_created(CONFIG_FILE_NAME);

    Ok(ExitStatus::Success)
}
