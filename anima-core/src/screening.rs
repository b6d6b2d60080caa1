//! Risk screening of chat messages.
//!
//! A case-insensitive substring scan against a configurable trigger-phrase
//! list. A hit doesn't block the conversation; it tells the caller to attach
//! the human-support referral to the reply.

use serde::Serialize;

/// Trigger phrases (lowercase) plus the referral text shown on a hit.
#[derive(Debug, Clone)]
pub struct ScreeningRules {
    pub triggers: Vec<String>,
    pub referral_text: String,
    pub referral_url: String,
}

impl Default for ScreeningRules {
    fn default() -> Self {
        ScreeningRules {
            triggers: [
                "suicid",
                "quitarme la vida",
                "no quiero vivir",
                "hacerme daño",
                "autolesi",
                "ya no puedo más",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            referral_text: "Si prefieres hablar con un profesional del área de \
                            bienestar UDD, escríbenos por WhatsApp."
                .to_string(),
            referral_url:
                "https://wa.me/56912345678?text=Hola%20necesito%20apoyo%20emocional%20desde%20ANIMA"
                    .to_string(),
        }
    }
}

/// Referral attached to a flagged reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Referral {
    pub text: String,
    pub url: String,
}

/// Scan a student message; `Some(referral)` when any trigger phrase appears.
pub fn screen(message: &str, rules: &ScreeningRules) -> Option<Referral> {
    let lower = message.to_lowercase();

    rules
        .triggers
        .iter()
        .any(|t| lower.contains(t))
        .then(|| Referral {
            text: rules.referral_text.clone(),
            url: rules.referral_url.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_message_passes() {
        let rules = ScreeningRules::default();
        assert!(screen("Hola, ¿cómo armo un horario de estudio?", &rules).is_none());
    }

    #[test]
    fn test_trigger_phrase_is_flagged_case_insensitively() {
        let rules = ScreeningRules::default();
        assert!(screen("Siento que YA NO PUEDO MÁS con el semestre", &rules).is_some());
        assert!(screen("he pensado en hacerme daño", &rules).is_some());
    }

    #[test]
    fn test_custom_rule_set() {
        let rules = ScreeningRules {
            triggers: vec!["abandonar la carrera".to_string()],
            ..ScreeningRules::default()
        };
        assert!(screen("quiero abandonar la carrera", &rules).is_some());
        assert!(screen("no quiero vivir así", &rules).is_none());
    }
}
