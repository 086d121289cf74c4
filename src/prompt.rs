//! Interactive backend selection.

use std::io::{BufRead, Write};

use crate::backend::Backend;
use crate::error::ScaffoldError;

/// Print the backend menu.
pub fn print_menu(output: &mut impl Write) -> std::io::Result<()> {
    writeln!(output, "Enter target platform 1-{}: ", Backend::ALL.len())?;
    for backend in Backend::ALL {
        writeln!(output, "{}: {}", backend.choice(), backend.label())?;
    }
    output.flush()
}

/// Map one line of operator input to a backend.
pub fn parse_choice(line: &str) -> Result<Backend, ScaffoldError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ScaffoldError::Input("expected a number, got nothing".to_string()));
    }

    let n: i64 = trimmed
        .parse()
        .map_err(|_| ScaffoldError::Input(format!("'{trimmed}' is not a number")))?;

    Backend::from_choice(n).ok_or_else(|| {
        ScaffoldError::Input(format!(
            "{n} is not a platform, pick 1-{}",
            Backend::ALL.len()
        ))
    })
}

/// Show the menu on `output` and read the choice from `input`.
pub fn read_backend(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Backend, ScaffoldError> {
    print_menu(output).map_err(|e| ScaffoldError::Input(e.to_string()))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| ScaffoldError::Input(e.to_string()))?;
    if read == 0 {
        return Err(ScaffoldError::Input("unexpected end of input".to_string()));
    }

    parse_choice(&line)
}
