use anyhow::Result;

use sokolgen::Backend;

pub fn execute(json: bool) -> Result<()> {
    if json {
        let list: Vec<_> = Backend::ALL
            .iter()
            .map(|b| {
                serde_json::json!({
                    "choice": b.choice(),
                    "name": b,
                    "define": b.identifier(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    for backend in Backend::ALL {
        println!("{}: {:<7} {}", backend.choice(), backend.label(), backend.identifier());
    }
    Ok(())
}
