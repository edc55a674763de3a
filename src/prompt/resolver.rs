use crate::config::Config;
use crate::constants::{TEMPERATURE_CHAT, TEMPERATURE_CLEAN, TEMPERATURE_COACH, TEMPERATURE_FIX};
use crate::error::ProxyError;
use crate::prompt::types::{Mode, PromptResolution, Tone};

const CHAT_PROMPT: &str = "You are a friendly assistant. Answer the user's question naturally \
     and conversationally, in the same language the user writes in.";

const COACH_PROMPT: &str = "You are a language coach. Reply in this exact format:\n\
     1. The user's original sentence\n\
     2. An improved version (natural and precise)\n\
     3. A short grammar note explaining the changes\n\
     4. One follow-up practice sentence for the user";

const CLEAN_PROMPT: &str = "You are a document cleanup specialist. Take the input text and:\n\
     - remove noise, broken line wraps, and OCR artifacts\n\
     - repair sentence structure\n\
     - keep the meaning exactly as written\n\
     Output only the cleaned text, ready for translation.";

/// Maps (mode, target language, tone) to the system prompt, model, and
/// temperature for the upstream call. Pure: the same triple always yields
/// the same resolution. Audio modes never reach this function.
pub fn resolve_prompt(
    mode: Mode,
    target_language: Option<&str>,
    tone: Tone,
    config: &Config,
) -> Result<PromptResolution, ProxyError> {
    match mode {
        Mode::Chat => Ok(PromptResolution {
            system_prompt: CHAT_PROMPT.to_string(),
            model: config.chat_model.clone(),
            temperature: TEMPERATURE_CHAT,
        }),
        Mode::Coach => Ok(PromptResolution {
            system_prompt: COACH_PROMPT.to_string(),
            model: config.coach_model().to_string(),
            temperature: TEMPERATURE_COACH,
        }),
        Mode::Fix => {
            let language = target_language
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .ok_or_else(|| ProxyError::missing_param("targetLanguage"))?;
            Ok(PromptResolution {
                system_prompt: fix_prompt(language, tone),
                model: config.chat_model.clone(),
                temperature: TEMPERATURE_FIX,
            })
        }
        Mode::Clean => Ok(PromptResolution {
            system_prompt: CLEAN_PROMPT.to_string(),
            model: config.chat_model.clone(),
            temperature: TEMPERATURE_CLEAN,
        }),
        Mode::Transcribe | Mode::Translate => Err(ProxyError::internal(
            "audio modes have no chat prompt resolution",
        )),
    }
}

fn fix_prompt(target_language: &str, tone: Tone) -> String {
    format!(
        "You are an expert rewriting translator. Translate the user's text into {} \
         using {}. Fix grammar, punctuation, and awkward phrasing without changing \
         the meaning. If the input reads like a raw translation, rewrite it so it \
         sounds native. Output only the rewritten translation.",
        target_language,
        tone.register_description()
    )
}
