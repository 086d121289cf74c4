//! Single source of truth for everything sokolgen reads or writes on disk.
//!
//! This module defines WHERE files live. It has no I/O and no validation.
//!
//! # User-Level Paths (~/.sokolgen/)
//!
//! ```text
//! ~/.sokolgen/
//! └── config.toml              # Global config
//! ```
//!
//! # Project-Level Paths (relative to the target directory)
//!
//! ```text
//! project/
//! ├── sokolgen.toml            # Project config (optional)
//! ├── main.c                   # Entry point
//! ├── Makefile                 # Native + wasm targets
//! ├── sokol.html               # Emscripten shell
//! ├── style.css                # Canvas stylesheet
//! └── sokol/                   # Downloaded headers
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// User Level (~/.sokolgen/)
// =============================================================================

/// User's sokolgen home directory: `~/.sokolgen/`
pub fn sokolgen_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sokolgen")
}

/// Global config file: `~/.sokolgen/config.toml`
pub fn user_config_path() -> PathBuf {
    sokolgen_home().join("config.toml")
}

// =============================================================================
// Project Level
// =============================================================================

/// Generated files, relative to the target directory.
pub mod project {
    use super::*;

    pub const MAIN_C: &str = "main.c";
    pub const MAKEFILE: &str = "Makefile";
    pub const SHELL_HTML: &str = "sokol.html";
    pub const STYLE_CSS: &str = "style.css";

    /// Default header directory: `sokol/`
    pub const HEADER_DIR: &str = "sokol";

    /// Project config: `sokolgen.toml`
    pub fn config_path(root: &Path) -> PathBuf {
        root.join("sokolgen.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_config_under_home() {
        let path = user_config_path();
        assert!(path.ends_with(".sokolgen/config.toml"));
    }

    #[test]
    fn test_project_config_relative_to_root() {
        let root = Path::new("/work/game");
        assert_eq!(
            project::config_path(root),
            Path::new("/work/game/sokolgen.toml")
        );
    }
}
