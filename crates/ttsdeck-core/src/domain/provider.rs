//! Speech providers and their voice catalogs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A speech-synthesis provider the backend can route a request to.
///
/// `OpenAi` and `Gemini` carry a fixed voice catalog. Any other name is
/// accepted as a registered provider whose voices are not known client-side.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Provider {
    OpenAi,
    Gemini,
    Other(String),
}

/// A selectable voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VoiceInfo {
    /// Value sent on the wire (e.g. `"alloy"`).
    pub id: &'static str,
    /// Label shown to the user (e.g. `"Zephyr (Bright)"`).
    pub label: &'static str,
}

const fn voice(id: &'static str, label: &'static str) -> VoiceInfo {
    VoiceInfo { id, label }
}

const OPENAI_VOICES: &[VoiceInfo] = &[
    voice("alloy", "Alloy"),
    voice("echo", "Echo"),
    voice("fable", "Fable"),
    voice("nova", "Nova"),
    voice("onyx", "Onyx"),
    voice("shimmer", "Shimmer"),
];

const GEMINI_VOICES: &[VoiceInfo] = &[
    voice("Zephyr", "Zephyr (Bright)"),
    voice("Puck", "Puck (Upbeat)"),
    voice("Charon", "Charon (Informative)"),
    voice("Kore", "Kore (Firm)"),
    voice("Fenrir", "Fenrir (Excitable)"),
    voice("Leda", "Leda (Youthful)"),
    voice("Orus", "Orus (Firm)"),
    voice("Aoede", "Aoede (Breezy)"),
    voice("Callirrhoe", "Callirrhoe (Easy-going)"),
    voice("Autonoe", "Autonoe (Bright)"),
    voice("Enceladus", "Enceladus (Breathy)"),
    voice("Iapetus", "Iapetus (Clear)"),
    voice("Umbriel", "Umbriel (Easy-going)"),
    voice("Algieba", "Algieba (Smooth)"),
    voice("Despina", "Despina (Smooth)"),
    voice("Erinome", "Erinome (Clear)"),
    voice("Algenib", "Algenib (Gravelly)"),
    voice("Rasalgethi", "Rasalgethi (Informative)"),
    voice("Laomedeia", "Laomedeia (Upbeat)"),
    voice("Achernar", "Achernar (Soft)"),
    voice("Alnilam", "Alnilam (Firm)"),
    voice("Schedar", "Schedar (Even)"),
    voice("Gacrux", "Gacrux (Mature)"),
    voice("Pulcherrima", "Pulcherrima (Forward)"),
    voice("Achird", "Achird (Friendly)"),
    voice("Zubenelgenubi", "Zubenelgenubi (Casual)"),
    voice("Vindemiatrix", "Vindemiatrix (Gentle)"),
    voice("Sadachbia", "Sadachbia (Lively)"),
    voice("Sadaltager", "Sadaltager (Knowledgeable)"),
    voice("Sulafat", "Sulafat (Warm)"),
];

impl Provider {
    /// Identifier sent to the backend in the `service` field.
    #[must_use]
    pub fn wire_id(&self) -> &str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Other(name) => name,
        }
    }

    /// Human-readable name used in status notices.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Other(name) => name,
        }
    }

    /// Known voices, or `None` for registered providers without a catalog.
    #[must_use]
    pub const fn voices(&self) -> Option<&'static [VoiceInfo]> {
        match self {
            Self::OpenAi => Some(OPENAI_VOICES),
            Self::Gemini => Some(GEMINI_VOICES),
            Self::Other(_) => None,
        }
    }

    /// The voice preselected when this provider is chosen.
    #[must_use]
    pub fn default_voice(&self) -> Option<&'static str> {
        self.voices().and_then(|v| v.first()).map(|v| v.id)
    }

    /// Whether `voice` may be sent to this provider.
    ///
    /// Catalog providers match exactly; other providers accept any
    /// non-blank voice.
    #[must_use]
    pub fn supports_voice(&self, voice: &str) -> bool {
        match self.voices() {
            Some(catalog) => catalog.iter().any(|v| v.id == voice),
            None => !voice.trim().is_empty(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "gemini" => Self::Gemini,
            _ => Self::Other(trimmed.to_string()),
        })
    }
}

impl From<String> for Provider {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(p) => p,
            Err(never) => match never {},
        }
    }
}

impl From<Provider> for String {
    fn from(p: Provider) -> Self {
        p.wire_id().to_string()
    }
}
