//! Voices command handler.

use ttsdeck_core::Provider;

/// Providers with a built-in voice catalog.
const CATALOGED: [Provider; 2] = [Provider::OpenAi, Provider::Gemini];

/// Lines describing the voices of `provider`.
#[must_use]
pub fn catalog_lines(provider: &Provider) -> Vec<String> {
    let Some(voices) = provider.voices() else {
        return vec![format!(
            "{}: no built-in catalog, pass --voice explicitly",
            provider.display_name()
        )];
    };

    let mut lines = Vec::with_capacity(voices.len() + 1);
    lines.push(format!("{} ({}):", provider.display_name(), provider.wire_id()));
    for (i, voice) in voices.iter().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        lines.push(format!("  {:<10} {}{marker}", voice.id, voice.label));
    }
    lines
}

/// Execute the voices command.
pub fn execute(provider: Option<&Provider>) {
    let providers: Vec<&Provider> = match provider {
        Some(p) => vec![p],
        None => CATALOGED.iter().collect(),
    };

    for (i, provider) in providers.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in catalog_lines(provider) {
            println!("{line}");
        }
    }
}
