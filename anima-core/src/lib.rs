//! Core types and logic for the ANIMA student wellbeing service.
//!
//! This crate is shared by anima-server and the anima CLI:
//! - `event` / `profile` — per-user calendar records and their JSON storage
//! - `month` — the Monday-first month grid and (year, month) navigation
//! - `advice` — the recommendation scan over events and survey results
//! - `survey`, `screening`, `chat` — wellbeing survey scoring, message risk
//!   screening, and the outbound chat-completion client

pub mod advice;
pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod month;
pub mod profile;
pub mod screening;
pub mod survey;

pub use advice::{recommend, AdviceRules};
pub use chat::{ChatClient, ChatTurn};
pub use config::AnimaConfig;
pub use error::{AnimaError, AnimaResult};
pub use event::{Event, EventDraft, Prefs, UserProfile};
pub use month::{MonthCursor, MonthGrid};
pub use profile::ProfileStore;
pub use screening::{screen, Referral, ScreeningRules};
pub use survey::SurveyResponse;
