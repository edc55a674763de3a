/// Caller-selected behavior. The string forms accepted by [`Mode::parse`]
/// include the spellings older spreadsheet clients still send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Chat,
    Coach,
    Fix,
    Clean,
    Transcribe,
    Translate,
}

impl Mode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "chat" => Some(Mode::Chat),
            "coach" => Some(Mode::Coach),
            "fix" | "refine" | "rewriteTranslate" => Some(Mode::Fix),
            "clean" | "file" | "docClean" => Some(Mode::Clean),
            "transcribe" => Some(Mode::Transcribe),
            "translate" => Some(Mode::Translate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::Coach => "coach",
            Mode::Fix => "fix",
            Mode::Clean => "clean",
            Mode::Transcribe => "transcribe",
            Mode::Translate => "translate",
        }
    }

    /// Audio modes carry `audioBase64` instead of `text`
    pub fn is_audio(&self) -> bool {
        matches!(self, Mode::Transcribe | Mode::Translate)
    }
}

/// Register for fix-mode rewriting, one of the caller-facing tone codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    Casual,    // A1
    Formal,    // B1
    Business,  // C1
    Legal,     // D1
    Emotional, // E1
    #[default]
    Auto, // F1
}

impl Tone {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "A1" => Some(Tone::Casual),
            "B1" => Some(Tone::Formal),
            "C1" => Some(Tone::Business),
            "D1" => Some(Tone::Legal),
            "E1" => Some(Tone::Emotional),
            "F1" => Some(Tone::Auto),
            _ => None,
        }
    }

    pub fn register_description(&self) -> &'static str {
        match self {
            Tone::Casual => "a relaxed, casual register, as between friends",
            Tone::Formal => "a polite, formal register",
            Tone::Business => "a concise, professional business register",
            Tone::Legal => "a rigorous legal register with precise, unambiguous wording",
            Tone::Emotional => "a warm, expressive register that keeps the emotional color",
            Tone::Auto => "the register that best matches the source text",
        }
    }
}

/// Result of resolving a text mode: what to send upstream
#[derive(Debug, Clone)]
pub struct PromptResolution {
    pub system_prompt: String,
    pub model: String,
    pub temperature: f32,
}
