use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use elemtris_engine::GameConfig;

/// Writes `value` as pretty JSON to the file at `path`, or to stdout.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_pretty_json(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => {
            write_pretty_json(io::stdout().lock(), value).context("Failed to write JSON to stdout")
        }
    }
}

fn write_pretty_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Loads a game config from a JSON file, or the default config when no path is given.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed, or if it describes an
/// unplayable board.
pub fn load_game_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let config: GameConfig = read_json_file("game config", path)?;
    config
        .validate()
        .with_context(|| format!("Invalid game config: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("elemtris-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_missing_path_loads_default_config() {
        assert_eq!(load_game_config(None).unwrap(), GameConfig::default());
    }

    #[test]
    fn test_saved_config_loads_back() {
        let path = temp_path("roundtrip.json");
        let config = GameConfig::with_board(8, 12);
        save_json(&config, Some(path.as_path())).unwrap();

        let loaded = load_game_config(Some(path.as_path())).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unplayable_config_is_rejected() {
        let path = temp_path("zero-block.json");
        fs::write(&path, r#"{ "layout": { "block_size": 0 } }"#).unwrap();

        let err = load_game_config(Some(path.as_path())).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().starts_with("Invalid game config"), "{err}");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let path = temp_path("unknown-field.json");
        fs::write(&path, r#"{ "gravity": 3 }"#).unwrap();

        let err = load_game_config(Some(path.as_path())).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().starts_with("Failed to parse game config"), "{err}");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = temp_path("does-not-exist.json");
        let err = load_game_config(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"), "{err}");
    }
}
