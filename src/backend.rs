//! Graphics backend selection.
//!
//! The backend is the only input that varies between runs. It ends up as a
//! preprocessor define in `main.c` and as a `-D` flag in the wasm target of
//! the Makefile.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the sokol_gfx backends, in menu order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    GlCore,
    Gles3,
    D3d11,
    Metal,
    Wgpu,
    NoApi,
}

impl Backend {
    pub const ALL: [Backend; 6] = [
        Backend::GlCore,
        Backend::Gles3,
        Backend::D3d11,
        Backend::Metal,
        Backend::Wgpu,
        Backend::NoApi,
    ];

    /// Map a 1-based menu number to a backend.
    pub fn from_choice(choice: i64) -> Option<Backend> {
        match choice {
            1 => Some(Backend::GlCore),
            2 => Some(Backend::Gles3),
            3 => Some(Backend::D3d11),
            4 => Some(Backend::Metal),
            5 => Some(Backend::Wgpu),
            6 => Some(Backend::NoApi),
            _ => None,
        }
    }

    /// 1-based menu number.
    pub fn choice(self) -> u8 {
        match self {
            Backend::GlCore => 1,
            Backend::Gles3 => 2,
            Backend::D3d11 => 3,
            Backend::Metal => 4,
            Backend::Wgpu => 5,
            Backend::NoApi => 6,
        }
    }

    /// Short label shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            Backend::GlCore => "GLCORE",
            Backend::Gles3 => "GLES3",
            Backend::D3d11 => "D3D11",
            Backend::Metal => "METAL",
            Backend::Wgpu => "WGPU",
            Backend::NoApi => "NOAPI",
        }
    }

    /// The define that selects this backend in sokol_gfx.h.
    pub fn identifier(self) -> &'static str {
        match self {
            Backend::GlCore => "SOKOL_GLCORE",
            Backend::Gles3 => "SOKOL_GLES3",
            Backend::D3d11 => "SOKOL_D3D11",
            Backend::Metal => "SOKOL_METAL",
            Backend::Wgpu => "SOKOL_WGPU",
            Backend::NoApi => "SOKOL_NOAPI",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Backend {
    type Err = String;

    /// Accepts the menu number, the label or the full define, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Backend::from_choice(n).ok_or_else(|| format!("no backend numbered {n}"));
        }

        let upper = trimmed.to_ascii_uppercase();
        let name = upper.strip_prefix("SOKOL_").unwrap_or(&upper);
        Backend::ALL
            .into_iter()
            .find(|b| b.label() == name)
            .ok_or_else(|| format!("unknown backend '{trimmed}'"))
    }
}
