/// The separator between integers in the textual program encoding.
pub const PROGRAM_SEPARATOR: char = ',';

/// The directory, relative to the user's home, holding intcode configuration.
pub const CONFIG_DIR: &str = ".intcode";

/// The configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";
