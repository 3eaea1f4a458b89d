//! Status command for showing the resolved configuration.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config, config_files: &[PathBuf]) -> Result<()> {
    writeln!(writer, "Monitor summary status")?;

    if config_files.is_empty() {
        writeln!(writer, "Config files: (defaults only)")?;
    } else {
        writeln!(writer, "Config files:")?;
        for path in config_files {
            writeln!(writer, "- {}", path.display())?;
        }
    }

    writeln!(writer, "Input: {}", config.input_path.display())?;
    writeln!(writer, "{}", describe_input(&config.input_path))?;

    Ok(())
}

fn describe_input(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => format!("Input size: {} bytes", meta.len()),
        Ok(_) => "Input is not a regular file.".to_string(),
        Err(err) => format!("Input not readable: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn test_status_with_existing_input() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("monitor.csv");
        std::fs::write(&input, "2024-01-01T08:00:00,0,0,1,90,100.0,80,0,0\n").unwrap();
        let config = Config {
            input_path: input.clone(),
        };

        let mut output = Vec::new();
        run(&mut output, &config, &[]).unwrap();
        let output = String::from_utf8(output)
            .unwrap()
            .replace(&input.display().to_string(), "[INPUT]");

        assert_snapshot!(output, @r"
        Monitor summary status
        Config files: (defaults only)
        Input: [INPUT]
        Input size: 42 bytes
        ");
    }

    #[test]
    fn test_status_lists_config_files() {
        let config = Config {
            input_path: PathBuf::from("/definitely/not/here/monitor.csv"),
        };
        let files = vec![PathBuf::from("/etc/monsum.toml")];

        let mut output = Vec::new();
        run(&mut output, &config, &files).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Config files:\n- /etc/monsum.toml\n"));
        assert!(output.contains("Input not readable:"));
    }
}
