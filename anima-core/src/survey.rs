//! Wellbeing survey scoring.
//!
//! Four 0–10 ratings collected once per session. The result lives on the
//! session only and is never written to disk.

use serde::{Deserialize, Serialize};

use crate::error::{AnimaError, AnimaResult};

/// One completed survey: energy, mood, concentration, motivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub energy: u8,
    pub mood: u8,
    pub concentration: u8,
    pub motivation: u8,
}

impl SurveyResponse {
    /// Validate each rating into [0, 10].
    pub fn new(energy: u8, mood: u8, concentration: u8, motivation: u8) -> AnimaResult<Self> {
        let response = SurveyResponse {
            energy,
            mood,
            concentration,
            motivation,
        };

        for rating in response.ratings() {
            if rating > 10 {
                return Err(AnimaError::InvalidInput(
                    "Cada puntaje debe estar entre 0 y 10".to_string(),
                ));
            }
        }

        Ok(response)
    }

    fn ratings(&self) -> [u8; 4] {
        [self.energy, self.mood, self.concentration, self.motivation]
    }

    /// Arithmetic mean of the four ratings.
    pub fn mean(&self) -> f64 {
        let sum: u32 = self.ratings().iter().map(|&r| u32::from(r)).sum();
        f64::from(sum) / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        let survey = SurveyResponse::new(2, 3, 4, 5).unwrap();
        assert_eq!(survey.mean(), 3.5);

        let survey = SurveyResponse::new(8, 8, 8, 8).unwrap();
        assert_eq!(survey.mean(), 8.0);
    }

    #[test]
    fn test_rejects_out_of_range_rating() {
        assert!(SurveyResponse::new(11, 5, 5, 5).is_err());
        assert!(SurveyResponse::new(5, 5, 5, 11).is_err());
        assert!(SurveyResponse::new(0, 10, 0, 10).is_ok());
    }
}
