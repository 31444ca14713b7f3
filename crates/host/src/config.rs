use std::io::Read;

/// Runtime configuration for the `twenty48` binary. Every field is optional;
/// command-line flags override whatever the file provides.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: Store,
    #[serde(default)]
    pub game: Game,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Store {
    /// Path to the SQLite best-score database. Omitted means no persistence.
    #[serde(default)]
    pub path: Option<std::path::PathBuf>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Game {
    /// Fixed RNG seed for reproducible games. Omitted uses OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        Ok(cfg)
    }
}
