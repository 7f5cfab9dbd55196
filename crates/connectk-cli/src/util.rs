use std::{fs::File, io, path::Path};

use anyhow::Context;

use crate::schema::match_config::MatchConfig;

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

/// Read a match configuration from a JSON file
pub fn read_match_config_file<P>(path: P) -> anyhow::Result<MatchConfig>
where
    P: AsRef<Path>,
{
    read_json_file("match config", path)
}
