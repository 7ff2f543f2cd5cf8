//! The clip table
//!
//! Names the sound effects the game can trigger and the file each one loads
//! from. The table is data: the default set below matches the server's
//! vocabulary, and tests substitute their own tables.

/// One named clip and the file it loads from (relative to the sounds dir)
#[derive(Debug, Clone)]
pub struct ClipSpec {
    pub name: String,
    pub file: String,
}

impl ClipSpec {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// The gameplay clip set the server triggers
pub fn default_clips() -> Vec<ClipSpec> {
    [
        "move",
        "rotate",
        "drop",
        "line_clear",
        "tetris",
        "level_up",
        "game_over",
    ]
    .iter()
    .map(|name| ClipSpec::new(*name, format!("{}.mp3", name)))
    .collect()
}
